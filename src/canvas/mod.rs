//! Graph model, store, layout importer and file codec. Nothing in here
//! touches the DOM.

pub mod error;
pub mod interaction;
pub mod io;
pub mod layout;
pub mod store;
pub mod types;

pub use error::CanvasError;
pub use interaction::{ConnectState, DragGesture};
pub use layout::{ImportSummary, LayoutConfig, LeafPolicy, import_json};
pub use store::CanvasStore;
pub use types::{CanvasData, EdgeData, NodeData, Position};
