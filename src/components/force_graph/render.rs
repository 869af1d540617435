use web_sys::CanvasRenderingContext2d;

use super::label::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
use super::scene::{LinkElement, NodeElement};
use super::state::SceneSession;

const BACKGROUND: &str = "#fafafa";
const LINK_ALPHA: f64 = 0.6;
const LINK_WIDTH: f64 = 1.2;
const FALLBACK_COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

/// Measures text with the canvas' own font engine.
pub struct CanvasTextMeasurer<'a> {
	ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasTextMeasurer<'a> {
	pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl TextMeasurer for CanvasTextMeasurer<'_> {
	fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
		self.ctx.set_font(&style.css_font());
		match self.ctx.measure_text(text) {
			Ok(m) if !text.is_empty() => TextMetrics {
				width: m.width(),
				height: m.font_bounding_box_ascent() + m.font_bounding_box_descent(),
			},
			_ => DeterministicTextMeasurer::default().measure(text, style),
		}
	}
}

fn node_color(kind: &str) -> &'static str {
	match kind {
		"person" => "#3b6ea8",
		"family" => "#b5651d",
		other => {
			let hash = other.bytes().fold(0usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize));
			FALLBACK_COLORS[hash % FALLBACK_COLORS.len()]
		}
	}
}

fn link_color(role: Option<&str>) -> String {
	let rgb = match role {
		Some("husband") | Some("wife") => "110, 110, 160",
		Some("child") => "110, 150, 110",
		_ => "153, 153, 153",
	};
	format!("rgba({rgb}, {LINK_ALPHA})")
}

pub fn render(session: &SceneSession, ctx: &CanvasRenderingContext2d, font: &TextStyle) {
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, session.width, session.height);

	ctx.save();
	let m = session.transform().apply();
	let _ = ctx.set_transform(m.a, m.b, m.c, m.d, m.e, m.f);
	let scene = session.scene();
	for link in &scene.links {
		draw_link(ctx, link);
	}
	ctx.set_font(&font.css_font());
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for node in &scene.nodes {
		draw_node(ctx, node);
	}
	ctx.restore();
}

fn draw_link(ctx: &CanvasRenderingContext2d, link: &LinkElement) {
	ctx.set_stroke_style_str(&link_color(link.role.as_deref()));
	ctx.set_line_width(LINK_WIDTH);
	ctx.begin_path();
	ctx.move_to(link.from.x, link.from.y);
	ctx.line_to(link.to.x, link.to.y);
	ctx.stroke();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &NodeElement) {
	let (hw, hh) = node.shape.half_extents();
	let (left, top, right, bottom) = (
		node.at.x - hw,
		node.at.y - hh,
		node.at.x + hw,
		node.at.y + hh,
	);
	let r = node.shape.corner_radius;

	ctx.begin_path();
	ctx.move_to(left + r, top);
	let _ = ctx.arc_to(right, top, right, bottom, r);
	let _ = ctx.arc_to(right, bottom, left, bottom, r);
	let _ = ctx.arc_to(left, bottom, left, top, r);
	let _ = ctx.arc_to(left, top, right, top, r);
	ctx.close_path();
	ctx.set_fill_style_str(node_color(&node.kind));
	ctx.fill();

	if !node.shape.text.is_empty() {
		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text(&node.shape.text, node.at.x, node.at.y);
	}
}
