use leptos::prelude::*;

use crate::canvas::LayoutConfig;
use crate::components::editor::{EditorCanvas, EditorState, Toolbar};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	EditorState::provide(LayoutConfig::default());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="editor">
				<Toolbar />
				<div class="editor-body">
					<EditorCanvas />
				</div>
			</div>
		</ErrorBoundary>
	}
}
