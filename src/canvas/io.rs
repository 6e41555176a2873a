//! JSON codec for the two import paths and for export.

use log::info;
use serde_json::Value;

use super::error::{CanvasError, Result};
use super::layout::{ImportSummary, LayoutConfig, import_json};
use super::store::CanvasStore;
use super::types::CanvasData;

/// File name offered for exported graphs.
pub const EXPORT_FILE_NAME: &str = "canvas.json";

/// Parse a graph file. The text must match the persisted node/edge shape.
pub fn parse_canvas(text: &str) -> Result<CanvasData> {
	let data: CanvasData = serde_json::from_str(text).map_err(CanvasError::Parse)?;
	info!(
		"Parsed canvas with {} nodes and {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Ok(data)
}

/// Parse any well-formed JSON document for the layout importer.
pub fn parse_document(text: &str) -> Result<Value> {
	serde_json::from_str(text).map_err(CanvasError::Parse)
}

/// Graph import: replace the store's graph with the one in `text`. On a
/// parse failure the store is not touched.
pub fn apply_canvas_text(store: &mut CanvasStore, text: &str) -> Result<()> {
	let data = parse_canvas(text)?;
	store.load_canvas(data);
	Ok(())
}

/// Generic import: run any JSON document in `text` through the layout
/// importer. On a parse failure the store is not touched.
pub fn apply_document_text(store: &mut CanvasStore, text: &str, config: &LayoutConfig) -> Result<ImportSummary> {
	let document = parse_document(text)?;
	Ok(import_json(store, &document, config))
}

/// Pretty-printed export text.
pub fn export_json(data: &CanvasData) -> Result<String> {
	serde_json::to_string_pretty(data).map_err(CanvasError::Serialize)
}
