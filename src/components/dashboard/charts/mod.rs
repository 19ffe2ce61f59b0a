//! Canvas renderers, one per [`ChartKind`]. Each initializer parses its own
//! embedded payload, builds a renderer bound to its placeholder canvas and
//! registers it for resize broadcasts. A missing or malformed payload skips
//! that one chart and nothing else.

pub mod playtime;
pub mod radar;
pub mod scatter;
pub mod timeseries;
pub mod wordcloud;

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::context::{ChartKind, DashboardContext};

pub const POSITIVE_COLOR: &str = "#4CAF50";
pub const NEGATIVE_COLOR: &str = "#F44336";
pub const BACKGROUND: &str = "#1a1a2e";
pub const AXIS_COLOR: &str = "#8392A5";
pub const GRID_COLOR: &str = "rgba(255, 255, 255, 0.1)";
pub const LABEL_COLOR: &str = "#e0e0e0";

/// A live renderer that can re-fit itself to its container. Resize events
/// are broadcast to every registered surface; each one redraws on its own.
pub trait ChartSurface {
	fn resize(&mut self);
}

/// Run the one-shot initializer for `kind`. The ledger insert happens first,
/// so a second call for the same kind is structurally a no-op rather than an
/// error, no matter how the region's visibility toggles.
pub fn initialize(ctx: &Rc<DashboardContext>, kind: ChartKind) {
	if !ctx.init.begin(kind) {
		return;
	}
	match kind {
		ChartKind::WordCloud => wordcloud::init(ctx),
		ChartKind::TimeSeries => timeseries::init(ctx),
		ChartKind::Playtime => playtime::init(ctx),
		ChartKind::Radar => radar::init(ctx),
		ChartKind::Scatter => scatter::init(ctx),
	}
}

/// Look up the placeholder canvas and its 2d context for a chart kind.
pub(super) fn canvas_for(kind: ChartKind) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
	let canvas: HtmlCanvasElement = web_sys::window()?
		.document()?
		.get_element_by_id(kind.element_id())?
		.dyn_into()
		.ok()?;
	let ctx2d: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.ok()
		.flatten()?
		.dyn_into()
		.ok()?;
	Some((canvas, ctx2d))
}

/// Size the canvas backing store to its parent container.
pub(super) fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 380.0));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

/// Round a value-axis maximum up to 1/2/5 times a power of ten.
pub fn nice_max(value: f64) -> f64 {
	if !value.is_finite() || value <= 0.0 {
		return 1.0;
	}
	let magnitude = 10f64.powf(value.log10().floor());
	for step in [1.0, 2.0, 5.0, 10.0] {
		let candidate = step * magnitude;
		if candidate >= value {
			return candidate;
		}
	}
	10.0 * magnitude
}

/// Largest finite value across a set of series, at least zero.
pub fn series_max(series: &[&[f64]]) -> f64 {
	series
		.iter()
		.flat_map(|s| s.iter())
		.copied()
		.filter(|v| v.is_finite())
		.fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nice_max_rounds_to_1_2_5_steps() {
		assert_eq!(nice_max(3.0), 5.0);
		assert_eq!(nice_max(5.0), 5.0);
		assert_eq!(nice_max(7.0), 10.0);
		assert_eq!(nice_max(73.0), 100.0);
		assert_eq!(nice_max(120.0), 200.0);
		assert_eq!(nice_max(0.8), 1.0);
	}

	#[test]
	fn nice_max_degenerate_inputs_fall_back_to_one() {
		assert_eq!(nice_max(0.0), 1.0);
		assert_eq!(nice_max(-4.0), 1.0);
		assert_eq!(nice_max(f64::NAN), 1.0);
	}

	#[test]
	fn series_max_spans_all_series() {
		assert_eq!(series_max(&[&[1.0, 9.0], &[4.0]]), 9.0);
		assert_eq!(series_max(&[&[], &[]]), 0.0);
	}
}
