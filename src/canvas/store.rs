//! The graph store: sole owner of nodes, edges and the selection.

use log::{debug, warn};
use uuid::Uuid;

use super::types::{CanvasData, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, EdgeData, NodeData, Position};

/// Owner of the canonical graph and the current selection.
///
/// Every mutation goes through a method here and none of them can fail:
/// operations on an unknown id are no-ops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasStore {
	canvas: CanvasData,
	selected: Option<String>,
}

impl CanvasStore {
	/// Empty graph with nothing selected.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a node with default size and `"New <type>"` content.
	///
	/// `id` is used as given unless it is empty or already taken; a taken id
	/// becomes `<id>#<n>` with the first free `n` starting at 2. Returns the id
	/// the node was stored under.
	pub fn add_node(&mut self, node_type: &str, position: Position, id: Option<&str>) -> String {
		let id = match id.filter(|id| !id.is_empty()) {
			Some(id) if self.node(id).is_some() => {
				let fresh = (2..)
					.map(|n| format!("{}#{}", id, n))
					.find(|candidate| self.node(candidate).is_none())
					.unwrap_or_else(generate_id);
				warn!("Node id {} already in use, stored as {}", id, fresh);
				fresh
			}
			Some(id) => id.to_string(),
			None => generate_id(),
		};

		debug!("Adding node {} ({}) at {:?}", id, node_type, position);
		self.canvas.nodes.push(NodeData {
			id: id.clone(),
			node_type: node_type.to_string(),
			content: format!("New {}", node_type),
			position,
			width: DEFAULT_NODE_WIDTH,
			height: DEFAULT_NODE_HEIGHT,
		});
		id
	}

	/// Move a node. No-op for unknown ids.
	pub fn update_node_position(&mut self, id: &str, position: Position) {
		if let Some(node) = self.node_mut(id) {
			node.position = position;
		}
	}

	/// Replace a node's text. No-op for unknown ids.
	pub fn update_node_content(&mut self, id: &str, content: impl Into<String>) {
		if let Some(node) = self.node_mut(id) {
			node.content = content.into();
		}
	}

	/// Remove a node together with every edge touching it.
	pub fn remove_node(&mut self, id: &str) {
		self.canvas.nodes.retain(|node| node.id != id);
		self.canvas
			.edges
			.retain(|edge| edge.source != id && edge.target != id);
		if self.selected.as_deref() == Some(id) {
			self.selected = None;
		}
		debug!("Removed node {}", id);
	}

	/// Append `source -> target` unless it is a self-loop or already present.
	/// Returns whether an edge was added.
	pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
		let exists = self
			.canvas
			.edges
			.iter()
			.any(|edge| edge.source == source && edge.target == target);
		if exists || source == target {
			debug!("Rejected edge {} -> {}", source, target);
			return false;
		}

		let edge = EdgeData {
			id: EdgeData::id_for(source, target),
			source: source.to_string(),
			target: target.to_string(),
			label: None,
		};
		debug!("Adding edge {}", edge.id);
		self.canvas.edges.push(edge);
		true
	}

	/// Remove every edge with `id`.
	pub fn remove_edge(&mut self, id: &str) {
		self.canvas.edges.retain(|edge| edge.id != id);
	}

	/// Set or clear the single selected node.
	pub fn select_node(&mut self, id: Option<&str>) {
		self.selected = id.map(str::to_string);
	}

	/// Currently selected node id.
	pub fn selected_node(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Replace the whole graph. Nothing is merged or validated.
	pub fn load_canvas(&mut self, data: CanvasData) {
		debug!(
			"Loading canvas with {} nodes and {} edges",
			data.nodes.len(),
			data.edges.len()
		);
		self.canvas = data;
	}

	/// The current graph, verbatim.
	pub fn export_canvas(&self) -> &CanvasData {
		&self.canvas
	}

	/// Drop all nodes and edges.
	pub fn clear(&mut self) {
		self.load_canvas(CanvasData::default());
	}

	/// First node with `id`.
	pub fn node(&self, id: &str) -> Option<&NodeData> {
		self.canvas.nodes.iter().find(|node| node.id == id)
	}

	/// First edge with `id`.
	pub fn edge(&self, id: &str) -> Option<&EdgeData> {
		self.canvas.edges.iter().find(|edge| edge.id == id)
	}

	fn node_mut(&mut self, id: &str) -> Option<&mut NodeData> {
		self.canvas.nodes.iter_mut().find(|node| node.id == id)
	}
}

fn generate_id() -> String {
	Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store_with(ids: &[&str]) -> CanvasStore {
		let mut store = CanvasStore::new();
		for (i, id) in ids.iter().enumerate() {
			store.add_node("basic", Position::new(i as f64 * 200.0, 0.0), Some(id));
		}
		store
	}

	#[test]
	fn add_node_stores_supplied_fields() {
		let mut store = CanvasStore::new();
		let id = store.add_node("note", Position::new(12.0, 34.0), Some("n1"));
		assert_eq!(id, "n1");

		let node = store.node("n1").unwrap();
		assert_eq!(node.node_type, "note");
		assert_eq!(node.content, "New note");
		assert_eq!(node.position, Position::new(12.0, 34.0));
		assert_eq!((node.width, node.height), (DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT));
	}

	#[test]
	fn add_node_generates_ids() {
		let mut store = CanvasStore::new();
		let a = store.add_node("basic", Position::default(), None);
		let b = store.add_node("basic", Position::default(), Some(""));
		assert_ne!(a, b);
		assert_eq!(a.len(), 32);
		assert_eq!(store.export_canvas().nodes.len(), 2);
	}

	#[test]
	fn colliding_ids_are_regenerated() {
		let mut store = store_with(&["a"]);
		assert_eq!(store.add_node("basic", Position::default(), Some("a")), "a#2");
		assert_eq!(store.add_node("basic", Position::default(), Some("a")), "a#3");

		let ids: Vec<_> = store.export_canvas().nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "a#2", "a#3"]);
	}

	#[test]
	fn updates_only_touch_the_matching_node() {
		let mut store = store_with(&["a", "b"]);
		store.update_node_position("a", Position::new(5.0, 6.0));
		store.update_node_content("b", "hello");

		assert_eq!(store.node("a").unwrap().position, Position::new(5.0, 6.0));
		assert_eq!(store.node("a").unwrap().content, "New basic");
		assert_eq!(store.node("b").unwrap().content, "hello");
		assert_eq!(store.node("b").unwrap().position, Position::new(200.0, 0.0));
	}

	#[test]
	fn updates_on_missing_ids_are_noops() {
		let mut store = store_with(&["a"]);
		let before = store.clone();
		store.update_node_position("zzz", Position::new(1.0, 1.0));
		store.update_node_content("zzz", "x");
		store.remove_node("zzz");
		store.remove_edge("zzz");
		assert_eq!(store, before);
	}

	#[test]
	fn remove_node_cascades_to_edges_and_selection() {
		let mut store = store_with(&["a", "b", "c"]);
		store.add_edge("a", "b");
		store.add_edge("b", "c");
		store.add_edge("c", "a");
		store.select_node(Some("b"));

		store.remove_node("b");

		assert!(store.node("b").is_none());
		assert!(store
			.export_canvas()
			.edges
			.iter()
			.all(|e| e.source != "b" && e.target != "b"));
		assert_eq!(store.export_canvas().edges.len(), 1);
		assert_eq!(store.selected_node(), None);
	}

	#[test]
	fn remove_node_keeps_unrelated_selection() {
		let mut store = store_with(&["a", "b"]);
		store.select_node(Some("a"));
		store.remove_node("b");
		assert_eq!(store.selected_node(), Some("a"));
	}

	#[test]
	fn duplicate_edges_are_rejected() {
		let mut store = store_with(&["a", "b"]);
		assert!(store.add_edge("a", "b"));
		assert!(!store.add_edge("a", "b"));
		assert!(store.add_edge("b", "a"));

		let forward = store
			.export_canvas()
			.edges
			.iter()
			.filter(|e| e.source == "a" && e.target == "b")
			.count();
		assert_eq!(forward, 1);
		assert_eq!(store.edge("edge-a-b").unwrap().target, "b");
	}

	#[test]
	fn dashed_ids_can_share_an_edge_id() {
		let mut store = CanvasStore::new();
		assert!(store.add_edge("a-b", "c"));
		assert!(store.add_edge("a", "b-c"));
		assert_eq!(EdgeData::id_for("a-b", "c"), EdgeData::id_for("a", "b-c"));

		store.remove_edge("edge-a-b-c");
		assert!(store.export_canvas().edges.is_empty());
	}

	#[test]
	fn self_loops_are_rejected() {
		let mut store = store_with(&["a"]);
		assert!(!store.add_edge("a", "a"));
		assert!(store.export_canvas().edges.is_empty());
	}

	#[test]
	fn edges_may_reference_unknown_nodes() {
		let mut store = CanvasStore::new();
		assert!(store.add_edge("ghost", "other"));
		store.remove_edge("edge-ghost-other");
		assert!(store.export_canvas().edges.is_empty());
	}

	#[test]
	fn load_of_export_is_identical() {
		let mut store = store_with(&["a", "b"]);
		store.add_edge("a", "b");
		store.update_node_content("a", "edited");

		let exported = store.export_canvas().clone();
		store.load_canvas(exported.clone());
		assert_eq!(store.export_canvas(), &exported);
	}

	#[test]
	fn load_replaces_wholesale() {
		let mut store = store_with(&["a", "b"]);
		store.add_edge("a", "b");
		store.load_canvas(store_with(&["x"]).export_canvas().clone());

		assert!(store.node("a").is_none());
		assert!(store.node("x").is_some());
		assert!(store.export_canvas().edges.is_empty());

		store.clear();
		assert_eq!(store.export_canvas(), &CanvasData::default());
	}
}
