use leptos::prelude::*;
use web_sys::Event;

use super::file::{read_picked_file, report};
use super::state::EditorState;

/// Export/import/clear controls.
#[component]
pub fn Toolbar() -> impl IntoView {
	let state = expect_context::<EditorState>();

	let on_import_canvas = move |ev: Event| {
		read_picked_file(&ev, move |result| match result {
			Ok(text) => state.import_canvas(&text),
			Err(err) => report("Could not read file", &err),
		});
	};

	let on_import_json = move |ev: Event| {
		read_picked_file(&ev, move |result| match result {
			Ok(text) => state.import_document(&text),
			Err(err) => report("Could not read file", &err),
		});
	};

	view! {
		<div class="toolbar">
			<h1>"JSON Canvas"</h1>
			<div class="toolbar-spacer"></div>
			<button class="toolbar-button" on:click=move |_| state.clear()>
				"Clear"
			</button>
			<button class="toolbar-button" on:click=move |_| state.export()>
				"Export Canvas"
			</button>
			<label class="toolbar-button">
				"Import Canvas"
				<input type="file" accept=".json,application/json" class="hidden" on:change=on_import_canvas />
			</label>
			<label class="toolbar-button">
				"Import JSON"
				<input type="file" accept=".json,application/json" class="hidden" on:change=on_import_json />
			</label>
		</div>
	}
}
