//! Persisted graph shape.

use serde::{Deserialize, Serialize};

/// Default box width for newly created nodes.
pub const DEFAULT_NODE_WIDTH: f64 = 150.0;
/// Default box height for newly created nodes.
pub const DEFAULT_NODE_HEIGHT: f64 = 80.0;

/// Canvas-local coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Horizontal offset from the canvas origin.
	pub x: f64,
	/// Vertical offset from the canvas origin.
	pub y: f64,
}

impl Position {
	/// Shorthand constructor.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A positioned, content-bearing box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
	/// Identity within a graph.
	pub id: String,
	/// Free-form label, used as the default content.
	#[serde(rename = "type")]
	pub node_type: String,
	/// Editable text shown inside the box.
	pub content: String,
	/// Top-left corner.
	pub position: Position,
	/// Box width, fixed at creation.
	pub width: f64,
	/// Box height, fixed at creation.
	pub height: f64,
}

impl NodeData {
	/// Center of the box.
	pub fn center(&self) -> Position {
		Position::new(
			self.position.x + self.width / 2.0,
			self.position.y + self.height / 2.0,
		)
	}

	/// Whether the boxes of `self` and `other` intersect.
	pub fn overlaps(&self, other: &NodeData) -> bool {
		self.position.x < other.position.x + other.width
			&& other.position.x < self.position.x + self.width
			&& self.position.y < other.position.y + other.height
			&& other.position.y < self.position.y + self.height
	}
}

/// A directed connection between two nodes.
///
/// Endpoints are plain ids and are not checked against the node list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
	/// `edge-<source>-<target>`.
	pub id: String,
	/// Id of the node the edge starts from.
	pub source: String,
	/// Id of the node the edge points to.
	pub target: String,
	/// Optional text drawn at the middle of the edge.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

impl EdgeData {
	/// Deterministic edge id for an ordered endpoint pair.
	///
	/// Not injective when ids contain `-`: `("a-b", "c")` and `("a", "b-c")`
	/// both map to `edge-a-b-c`, and removing by id removes both edges.
	pub fn id_for(source: &str, target: &str) -> String {
		format!("edge-{}-{}", source, target)
	}
}

/// The whole persisted state: nodes and edges in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasData {
	/// Nodes in insertion order.
	pub nodes: Vec<NodeData>,
	/// Edges in insertion order.
	pub edges: Vec<EdgeData>,
}
