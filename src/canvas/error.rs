//! Error type for file import and export.

use wasm_bindgen::JsValue;

/// Failures of the file import/export paths.
///
/// Store mutations never fail; only the codec and the browser glue around it
/// produce these.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
	/// Input text is not well-formed JSON, or does not match the graph shape.
	#[error("invalid JSON file: {0}")]
	Parse(#[source] serde_json::Error),

	/// The graph could not be written out as JSON.
	#[error("failed to serialize canvas: {0}")]
	Serialize(#[source] serde_json::Error),

	/// The selected file could not be read as text.
	#[error("failed to read file: {0}")]
	Read(String),

	/// A DOM or JS call failed.
	#[error("browser call failed: {0}")]
	Browser(String),
}

impl From<JsValue> for CanvasError {
	fn from(value: JsValue) -> Self {
		Self::Browser(
			value
				.as_string()
				.unwrap_or_else(|| format!("{:?}", value)),
		)
	}
}

/// Convenience alias used by the codec and browser helpers.
pub type Result<T> = std::result::Result<T, CanvasError>;
