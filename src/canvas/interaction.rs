//! Pointer interaction state that does not depend on the DOM.

use super::types::Position;

/// Click-to-connect state: at most one node waits for a second endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectState {
	/// No connection in progress.
	#[default]
	Idle,
	/// The node waiting for a second endpoint.
	Pending(String),
}

impl ConnectState {
	/// Handle a click on a node's connect handle. Returns the edge to create,
	/// if the click completed one.
	pub fn click_node(&mut self, id: &str) -> Option<(String, String)> {
		match std::mem::take(self) {
			ConnectState::Idle => {
				*self = ConnectState::Pending(id.to_string());
				None
			}
			ConnectState::Pending(source) if source == id => None,
			ConnectState::Pending(source) => Some((source, id.to_string())),
		}
	}

	/// A click that did not land on a node abandons any pending connection.
	pub fn click_canvas(&mut self) {
		*self = ConnectState::Idle;
	}

	/// Drop the pending endpoint if it was `id`.
	pub fn forget(&mut self, id: &str) {
		if self.pending() == Some(id) {
			*self = ConnectState::Idle;
		}
	}

	/// Id of the pending endpoint, if any.
	pub fn pending(&self) -> Option<&str> {
		match self {
			ConnectState::Pending(id) => Some(id),
			ConnectState::Idle => None,
		}
	}
}

/// One pointer-down to pointer-up drag of a node.
///
/// Moves only update the live preview; the store sees a single position when
/// the gesture finishes.
#[derive(Clone, Debug, PartialEq)]
pub struct DragGesture {
	node_id: String,
	pointer_start: Position,
	node_start: Position,
	current: Position,
}

impl DragGesture {
	/// Start dragging `node_id`, currently at `node_position`.
	pub fn begin(node_id: &str, pointer: Position, node_position: Position) -> Self {
		Self {
			node_id: node_id.to_string(),
			pointer_start: pointer,
			node_start: node_position,
			current: node_position,
		}
	}

	/// Move the preview by the pointer delta since `begin`.
	pub fn move_to(&mut self, pointer: Position) -> Position {
		let (dx, dy) = (
			pointer.x - self.pointer_start.x,
			pointer.y - self.pointer_start.y,
		);
		self.current = Position::new(self.node_start.x + dx, self.node_start.y + dy);
		self.current
	}

	/// Id of the dragged node.
	pub fn node_id(&self) -> &str {
		&self.node_id
	}

	/// Live position of the dragged node.
	pub fn current(&self) -> Position {
		self.current
	}

	/// End the gesture, yielding the node id and the position to commit.
	pub fn finish(self) -> (String, Position) {
		(self.node_id, self.current)
	}
}
