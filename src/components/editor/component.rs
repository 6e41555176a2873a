use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent};

use super::node::NodeBox;
use super::render;
use super::state::EditorState;
use crate::canvas::Position;

/// Drawing surface: an edge layer underneath positioned node boxes.
///
/// Expects an [`EditorState`] in context.
#[component]
pub fn EditorCanvas(
	#[prop(default = 1500.0)] min_width: f64,
	#[prop(default = 1000.0)] min_height: f64,
) -> impl IntoView {
	let state = expect_context::<EditorState>();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let size = Memo::new(move |_| {
		state
			.store
			.with(|s| render::surface_size(s.export_canvas(), (min_width, min_height)))
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = size.get();
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};
		let preview = state
			.drag
			.with(|d| d.as_ref().map(|g| (g.node_id().to_string(), g.current())));
		state.store.with(|s| {
			render::render(
				s.export_canvas(),
				preview.as_ref().map(|(id, p)| (id.as_str(), *p)),
				&ctx,
				w,
				h,
			)
		});
	});

	// Pointer-up must end a drag even when it happens outside the node.
	let move_handle = window_event_listener(ev::mousemove, move |ev: MouseEvent| {
		state.drag_to(Position::new(ev.client_x() as f64, ev.client_y() as f64));
	});
	let up_handle = window_event_listener(ev::mouseup, move |_: MouseEvent| {
		state.end_drag();
	});
	on_cleanup(move || {
		move_handle.remove();
		up_handle.remove();
	});

	let on_click = move |ev: MouseEvent| {
		let Some(surface) = ev
			.current_target()
			.and_then(|t| t.dyn_into::<Element>().ok())
		else {
			return;
		};
		let rect = surface.get_bounding_client_rect();
		state.click_surface(Position::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		));
	};

	let node_keys = move || state.store.with(|s| render::node_keys(s.export_canvas()));

	view! {
		<div class="canvas-scroll">
			<div
				class="canvas-surface"
				on:click=on_click
				style=move || {
					let (w, h) = size.get();
					format!("position: relative; width: {}px; height: {}px;", w, h)
				}
			>
				<canvas
					node_ref=canvas_ref
					class="edge-layer"
					style="position: absolute; left: 0; top: 0; pointer-events: none;"
				/>
				<For each=node_keys key=|key| key.clone() children=move |(id, _)| view! { <NodeBox id=id /> } />
			</div>
		</div>
	}
}
