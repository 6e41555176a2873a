use std::collections::HashMap;

use web_sys::CanvasRenderingContext2d;

use crate::canvas::{CanvasData, EdgeData, NodeData, Position};

/// Clicks closer than this to an edge segment hit the edge.
pub const EDGE_HIT_DISTANCE: f64 = 6.0;

const ARROW_SIZE: f64 = 10.0;
const SURFACE_MARGIN: f64 = 200.0;

/// An edge whose endpoints both exist, clipped to the node boxes.
pub struct EdgeSegment<'a> {
	pub edge: &'a EdgeData,
	pub from: Position,
	pub to: Position,
}

/// Node lookup used while drawing; a drag preview overrides the stored
/// position of one node.
fn placed(
	data: &CanvasData,
	id: &str,
	preview: Option<(&str, Position)>,
) -> Option<NodeData> {
	let node = data.nodes.iter().find(|node| node.id == id)?;
	let mut node = node.clone();
	if let Some((preview_id, position)) = preview {
		if preview_id == id {
			node.position = position;
		}
	}
	Some(node)
}

/// Point where the line from the box center toward `toward` leaves the box.
fn border_point(node: &NodeData, toward: Position) -> Position {
	let c = node.center();
	let (dx, dy) = (toward.x - c.x, toward.y - c.y);
	if dx.abs() < 1e-9 && dy.abs() < 1e-9 {
		return c;
	}
	let (hw, hh) = (node.width / 2.0, node.height / 2.0);
	let tx = if dx.abs() < 1e-9 { f64::INFINITY } else { hw / dx.abs() };
	let ty = if dy.abs() < 1e-9 { f64::INFINITY } else { hh / dy.abs() };
	let t = tx.min(ty).min(1.0);
	Position::new(c.x + dx * t, c.y + dy * t)
}

/// Drawable edges. Edges with a missing endpoint are skipped.
pub fn edge_segments<'a>(
	data: &'a CanvasData,
	preview: Option<(&str, Position)>,
) -> Vec<EdgeSegment<'a>> {
	data.edges
		.iter()
		.filter_map(|edge| {
			let source = placed(data, &edge.source, preview)?;
			let target = placed(data, &edge.target, preview)?;
			let (sc, tc) = (source.center(), target.center());
			Some(EdgeSegment {
				edge,
				from: border_point(&source, tc),
				to: border_point(&target, sc),
			})
		})
		.collect()
}

fn distance_to_segment(p: Position, a: Position, b: Position) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < 1e-9 {
		0.0
	} else {
		(((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.x + t * dx, a.y + t * dy);
	((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Id of the closest edge within [`EDGE_HIT_DISTANCE`] of `point`.
pub fn edge_at(data: &CanvasData, point: Position) -> Option<String> {
	edge_segments(data, None)
		.into_iter()
		.map(|seg| (distance_to_segment(point, seg.from, seg.to), seg.edge.id.clone()))
		.filter(|(d, _)| *d < EDGE_HIT_DISTANCE)
		.min_by(|a, b| a.0.total_cmp(&b.0))
		.map(|(_, id)| id)
}

/// List keys for the node boxes: the id plus how many earlier nodes share it,
/// so a loaded file with repeated ids still yields distinct keys.
pub fn node_keys(data: &CanvasData) -> Vec<(String, usize)> {
	let mut seen: HashMap<&str, usize> = HashMap::new();
	data.nodes
		.iter()
		.map(|node| {
			let count = seen.entry(node.id.as_str()).or_default();
			let key = (node.id.clone(), *count);
			*count += 1;
			key
		})
		.collect()
}

/// Size the drawing surface so every node fits, never below `min`.
pub fn surface_size(data: &CanvasData, min: (f64, f64)) -> (f64, f64) {
	data.nodes.iter().fold(min, |(w, h), node| {
		(
			w.max(node.position.x + node.width + SURFACE_MARGIN),
			h.max(node.position.y + node.height + SURFACE_MARGIN),
		)
	})
}

pub fn render(
	data: &CanvasData,
	preview: Option<(&str, Position)>,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
) {
	ctx.clear_rect(0.0, 0.0, width, height);
	for seg in edge_segments(data, preview) {
		draw_edge(&seg, ctx);
	}
}

fn draw_edge(seg: &EdgeSegment, ctx: &CanvasRenderingContext2d) {
	let (x1, y1, x2, y2) = (seg.from.x, seg.from.y, seg.to.x, seg.to.y);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}

	let (ux, uy) = (dx / dist, dy / dist);
	ctx.set_stroke_style_str("#888");
	ctx.set_line_width(2.0);
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2 - ux * ARROW_SIZE, y2 - uy * ARROW_SIZE);
	ctx.stroke();

	ctx.set_fill_style_str("#888");
	let (back_x, back_y) = (x2 - ux * ARROW_SIZE, y2 - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(x2, y2);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();

	if let Some(label) = seg.edge.label.as_deref().filter(|l| !l.is_empty()) {
		let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
		ctx.set_fill_style_str("#333");
		ctx.set_font("12px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(label, mx, my - 4.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, x: f64, y: f64) -> NodeData {
		NodeData {
			id: id.into(),
			node_type: "basic".into(),
			content: String::new(),
			position: Position::new(x, y),
			width: 150.0,
			height: 80.0,
		}
	}

	fn edge(source: &str, target: &str) -> EdgeData {
		EdgeData {
			id: EdgeData::id_for(source, target),
			source: source.into(),
			target: target.into(),
			label: None,
		}
	}

	#[test]
	fn anchors_sit_on_facing_box_borders() {
		let data = CanvasData {
			nodes: vec![node("a", 0.0, 0.0), node("b", 300.0, 0.0)],
			edges: vec![edge("a", "b")],
		};
		let segs = edge_segments(&data, None);
		assert_eq!(segs.len(), 1);
		assert_eq!(segs[0].from, Position::new(150.0, 40.0));
		assert_eq!(segs[0].to, Position::new(300.0, 40.0));
	}

	#[test]
	fn dangling_edges_are_skipped() {
		let data = CanvasData {
			nodes: vec![node("a", 0.0, 0.0), node("b", 0.0, 300.0)],
			edges: vec![edge("a", "ghost"), edge("a", "b"), edge("ghost", "b")],
		};
		let segs = edge_segments(&data, None);
		assert_eq!(segs.len(), 1);
		assert_eq!(segs[0].edge.id, "edge-a-b");
	}

	#[test]
	fn preview_overrides_stored_position() {
		let data = CanvasData {
			nodes: vec![node("a", 0.0, 0.0), node("b", 300.0, 0.0)],
			edges: vec![edge("a", "b")],
		};
		let segs = edge_segments(&data, Some(("b", Position::new(600.0, 0.0))));
		assert_eq!(segs[0].to, Position::new(600.0, 40.0));
	}

	#[test]
	fn clicks_near_a_segment_hit_the_edge() {
		let data = CanvasData {
			nodes: vec![node("a", 0.0, 0.0), node("b", 300.0, 0.0)],
			edges: vec![edge("a", "b")],
		};
		assert_eq!(edge_at(&data, Position::new(220.0, 43.0)), Some("edge-a-b".into()));
		assert_eq!(edge_at(&data, Position::new(220.0, 60.0)), None);
		assert_eq!(edge_at(&data, Position::new(500.0, 40.0)), None);
	}

	#[test]
	fn repeated_ids_get_distinct_keys() {
		let data = CanvasData {
			nodes: vec![node("a", 0.0, 0.0), node("b", 0.0, 0.0), node("a", 10.0, 0.0)],
			edges: vec![],
		};
		assert_eq!(
			node_keys(&data),
			[("a".to_string(), 0), ("b".to_string(), 0), ("a".to_string(), 1)]
		);
	}

	#[test]
	fn surface_grows_to_fit_nodes() {
		let mut data = CanvasData::default();
		assert_eq!(surface_size(&data, (1500.0, 1000.0)), (1500.0, 1000.0));
		data.nodes.push(node("far", 2000.0, 50.0));
		assert_eq!(surface_size(&data, (1500.0, 1000.0)), (2350.0, 1000.0));
	}
}
