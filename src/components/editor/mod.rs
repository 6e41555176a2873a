mod component;
mod file;
mod node;
mod render;
mod state;
mod toolbar;

pub use component::EditorCanvas;
pub use state::EditorState;
pub use toolbar::Toolbar;
