use leptos::prelude::*;
use web_sys::{Event, MouseEvent};

use super::state::EditorState;
use crate::canvas::Position;

/// One draggable box with editable content, a connect handle and a remove
/// button.
#[component]
pub fn NodeBox(id: String) -> impl IntoView {
	let state = expect_context::<EditorState>();

	let id_style = id.clone();
	let style = move || match state.node_box(&id_style) {
		Some((p, w, h)) => format!(
			"position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
			p.x, p.y, w, h
		),
		None => "display: none;".to_string(),
	};

	let id_class = id.clone();
	let class = move || {
		let selected = state
			.store
			.with(|s| s.selected_node() == Some(id_class.as_str()));
		let pending = state.connect.with(|c| c.pending() == Some(id_class.as_str()));
		match (selected, pending) {
			(_, true) => "node node-pending",
			(true, false) => "node node-selected",
			(false, false) => "node",
		}
	};

	let id_content = id.clone();
	let content = move || {
		state.store.with(|s| {
			s.node(&id_content)
				.map(|n| n.content.clone())
				.unwrap_or_default()
		})
	};

	let id_md = id.clone();
	let on_mousedown = move |ev: MouseEvent| {
		ev.stop_propagation();
		state.begin_drag(
			&id_md,
			Position::new(ev.client_x() as f64, ev.client_y() as f64),
		);
	};

	let id_input = id.clone();
	let on_input = move |ev: Event| {
		let text = event_target_value(&ev);
		state
			.store
			.update(|s| s.update_node_content(&id_input, text));
	};

	let id_connect = id.clone();
	let on_connect = move |ev: MouseEvent| {
		ev.stop_propagation();
		state.click_connect(&id_connect);
	};

	let on_remove = move |ev: MouseEvent| {
		ev.stop_propagation();
		state.remove_node(&id);
	};

	let stop = |ev: MouseEvent| ev.stop_propagation();

	view! {
		<div class=class style=style on:mousedown=on_mousedown on:click=stop>
			<textarea
				class="node-content"
				prop:value=content
				on:input=on_input
				on:mousedown=stop
				on:click=stop
			/>
			<div class="node-actions">
				<button class="node-connect" title="Connect" on:mousedown=stop on:click=on_connect>
					"→"
				</button>
				<button class="node-remove" title="Remove" on:mousedown=stop on:click=on_remove>
					"×"
				</button>
			</div>
		</div>
	}
}
