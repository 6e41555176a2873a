//! Converts an arbitrary JSON document into a positioned tree of nodes.
//!
//! Depth runs along x, and every created node takes the next row on y in
//! pre-order, so no two nodes of one import share a row.

use log::info;
use serde_json::Value;

use super::store::CanvasStore;
use super::types::Position;

/// Prefix for ids of top-level keys.
pub const ROOT_ID: &str = "root";

/// What to do with keys whose value is a string, number, bool or null.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeafPolicy {
	/// Only top-level scalar keys get a node; nested ones are skipped.
	#[default]
	Drop,
	/// Every key gets a node.
	Keep,
}

/// Placement tunables for [`import_json`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// x of the depth-0 column.
	pub left_padding: f64,
	/// y of the first row.
	pub top_padding: f64,
	/// Distance between depth columns.
	pub horizontal_spacing: f64,
	/// Distance between rows. Must exceed the node height to avoid overlap.
	pub vertical_spacing: f64,
	/// Handling of scalar-valued keys.
	pub leaves: LeafPolicy,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			left_padding: 50.0,
			top_padding: 120.0,
			horizontal_spacing: 250.0,
			vertical_spacing: 120.0,
			leaves: LeafPolicy::default(),
		}
	}
}

impl LayoutConfig {
	/// Top-left corner for a node at `depth` on pre-order `row`.
	pub fn position(&self, depth: usize, row: usize) -> Position {
		Position::new(
			self.left_padding + depth as f64 * self.horizontal_spacing,
			self.top_padding + row as f64 * self.vertical_spacing,
		)
	}
}

/// Counts of what an import added to the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
	/// Nodes created.
	pub nodes: usize,
	/// Edges created.
	pub edges: usize,
}

/// Add one node per key of `document` (recursively) and one edge per
/// parent-child pair. Scalar documents add nothing.
pub fn import_json(store: &mut CanvasStore, document: &Value, config: &LayoutConfig) -> ImportSummary {
	let mut walker = Walker {
		store,
		config,
		row: 0,
		summary: ImportSummary::default(),
	};
	walker.visit(document, None, 0);
	info!(
		"Imported JSON document: {} nodes, {} edges",
		walker.summary.nodes, walker.summary.edges
	);
	walker.summary
}

struct Walker<'a> {
	store: &'a mut CanvasStore,
	config: &'a LayoutConfig,
	row: usize,
	summary: ImportSummary,
}

impl Walker<'_> {
	fn visit(&mut self, value: &Value, parent: Option<&str>, depth: usize) {
		let entries: Vec<(String, &Value)> = match value {
			Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
			Value::Array(items) => items
				.iter()
				.enumerate()
				.map(|(i, v)| (i.to_string(), v))
				.collect(),
			_ => return,
		};

		for (key, child) in entries {
			let composite = is_composite(child);
			if !composite && depth > 0 && self.config.leaves == LeafPolicy::Drop {
				continue;
			}

			let wanted = format!("{}-{}", parent.unwrap_or(ROOT_ID), key);
			let position = self.config.position(depth, self.row);
			self.row += 1;

			let id = self.store.add_node(&key, position, Some(&wanted));
			self.summary.nodes += 1;

			if let Some(parent) = parent {
				if parent != id && self.store.add_edge(parent, &id) {
					self.summary.edges += 1;
				}
			}

			if composite {
				self.visit(child, Some(&id), depth + 1);
			}
		}
	}
}

fn is_composite(value: &Value) -> bool {
	matches!(value, Value::Object(_) | Value::Array(_))
}
