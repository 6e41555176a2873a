use leptos::prelude::*;
use log::{debug, info};

use super::{file, render};
use crate::canvas::io::{self, EXPORT_FILE_NAME};
use crate::canvas::{CanvasStore, ConnectState, DragGesture, LayoutConfig, Position};

/// Reactive handles shared by every editor component through context.
///
/// The store itself is only ever changed through its own methods, via the
/// helpers below.
#[derive(Clone, Copy)]
pub struct EditorState {
	pub store: RwSignal<CanvasStore>,
	pub connect: RwSignal<ConnectState>,
	pub drag: RwSignal<Option<DragGesture>>,
	pub layout: StoredValue<LayoutConfig>,
}

impl EditorState {
	pub fn new(layout: LayoutConfig) -> Self {
		Self {
			store: RwSignal::new(CanvasStore::new()),
			connect: RwSignal::new(ConnectState::Idle),
			drag: RwSignal::new(None),
			layout: StoredValue::new(layout),
		}
	}

	/// Create the state and make it available to descendants.
	pub fn provide(layout: LayoutConfig) -> Self {
		let state = Self::new(layout);
		provide_context(state);
		state
	}

	/// Live placement of a node: drag preview if it is being dragged,
	/// otherwise the stored position. Tracks both signals.
	pub fn node_box(&self, id: &str) -> Option<(Position, f64, f64)> {
		let preview = self.drag.with(|d| {
			d.as_ref()
				.filter(|g| g.node_id() == id)
				.map(DragGesture::current)
		});
		self.store.with(|s| {
			s.node(id)
				.map(|n| (preview.unwrap_or(n.position), n.width, n.height))
		})
	}

	/// Click on empty canvas: abandon any pending connection, then either
	/// remove the edge under the pointer or add a node there.
	pub fn click_surface(&self, position: Position) {
		self.connect.update(ConnectState::click_canvas);
		let hit = self
			.store
			.with_untracked(|s| render::edge_at(s.export_canvas(), position));
		match hit {
			Some(edge_id) => {
				info!("Removing edge {}", edge_id);
				self.store.update(|s| s.remove_edge(&edge_id));
			}
			None => {
				self.store.update(|s| {
					s.add_node("basic", position, None);
				});
			}
		}
	}

	pub fn click_connect(&self, id: &str) {
		let Some((source, target)) = self.connect.try_update(|c| c.click_node(id)).flatten() else {
			return;
		};
		debug!("Connecting {} -> {}", source, target);
		self.store.update(|s| {
			s.add_edge(&source, &target);
		});
	}

	pub fn remove_node(&self, id: &str) {
		self.connect.update(|c| c.forget(id));
		self.store.update(|s| s.remove_node(id));
	}

	/// Pointer-down on a node selects it and starts a drag.
	pub fn begin_drag(&self, id: &str, pointer: Position) {
		let Some(origin) = self.store.with_untracked(|s| s.node(id).map(|n| n.position)) else {
			return;
		};
		self.store.update(|s| s.select_node(Some(id)));
		self.drag.set(Some(DragGesture::begin(id, pointer, origin)));
	}

	pub fn drag_to(&self, pointer: Position) {
		if self.drag.with_untracked(Option::is_some) {
			self.drag.update(|d| {
				if let Some(gesture) = d {
					gesture.move_to(pointer);
				}
			});
		}
	}

	/// Pointer-up anywhere: commit the dragged node's final position once.
	pub fn end_drag(&self) {
		if self.drag.with_untracked(Option::is_none) {
			return;
		}
		if let Some((id, position)) = self.drag.try_update(Option::take).flatten().map(DragGesture::finish) {
			self.store.update(|s| s.update_node_position(&id, position));
		}
	}

	/// Graph import: replace the store with the file's graph, or report and
	/// leave it untouched.
	pub fn import_canvas(&self, text: &str) {
		match self.store.try_update(|s| io::apply_canvas_text(s, text)) {
			Some(Ok(())) => self.connect.set(ConnectState::Idle),
			Some(Err(err)) => file::report("Could not import canvas", &err),
			None => {}
		}
	}

	/// Generic JSON import through the layout importer.
	pub fn import_document(&self, text: &str) {
		let result = self.layout.with_value(|layout| {
			self.store
				.try_update(|s| io::apply_document_text(s, text, layout))
		});
		if let Some(Err(err)) = result {
			file::report("Could not import JSON", &err);
		}
	}

	pub fn export(&self) {
		let result = self
			.store
			.with_untracked(|s| io::export_json(s.export_canvas()))
			.and_then(|text| file::download_json(EXPORT_FILE_NAME, &text));
		match result {
			Ok(()) => info!("Exported canvas to {}", EXPORT_FILE_NAME),
			Err(err) => file::report("Could not export canvas", &err),
		}
	}

	pub fn clear(&self) {
		self.connect.set(ConnectState::Idle);
		self.store.update(CanvasStore::clear);
	}
}
