//! Playtime vs. sentiment score scatter, one point set per polarity.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use log::debug;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::super::context::{ChartKind, DashboardContext};
use super::super::payload;
use super::super::types::ScatterPayload;
use super::{
	AXIS_COLOR, BACKGROUND, ChartSurface, GRID_COLOR, LABEL_COLOR, NEGATIVE_COLOR, POSITIVE_COLOR,
	canvas_for, fit_to_parent,
};

const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 34.0;
const POINT_RADIUS: f64 = 3.0;

/// `(min_x, max_x, min_y, max_y)` across both point sets, padded so edge
/// points do not sit on the plot border.
pub fn extent(data: &ScatterPayload) -> (f64, f64, f64, f64) {
	let mut min_x = f64::INFINITY;
	let mut max_x = f64::NEG_INFINITY;
	let mut min_y = f64::INFINITY;
	let mut max_y = f64::NEG_INFINITY;
	for &[x, y, _] in data.positive.iter().chain(&data.negative) {
		min_x = min_x.min(x);
		max_x = max_x.max(x);
		min_y = min_y.min(y);
		max_y = max_y.max(y);
	}
	let pad_x = ((max_x - min_x) * 0.05).max(0.5);
	let pad_y = ((max_y - min_y) * 0.05).max(0.05);
	(min_x - pad_x, max_x + pad_x, min_y - pad_y, max_y + pad_y)
}

pub struct ScatterState {
	canvas: HtmlCanvasElement,
	ctx2d: CanvasRenderingContext2d,
	data: ScatterPayload,
	width: f64,
	height: f64,
}

impl ScatterState {
	pub fn new(canvas: HtmlCanvasElement, ctx2d: CanvasRenderingContext2d, data: ScatterPayload) -> Self {
		let (width, height) = fit_to_parent(&canvas);
		Self {
			canvas,
			ctx2d,
			data,
			width,
			height,
		}
	}

	pub fn redraw(&self) {
		let ctx = &self.ctx2d;
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill_rect(0.0, 0.0, self.width, self.height);

		let (left, top) = (MARGIN_LEFT, MARGIN_TOP);
		let pw = (self.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
		let ph = (self.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
		let (min_x, max_x, min_y, max_y) = extent(&self.data);
		let sx = |x: f64| left + pw * (x - min_x) / (max_x - min_x);
		let sy = |y: f64| top + ph * (1.0 - (y - min_y) / (max_y - min_y));

		ctx.set_font("11px sans-serif");
		ctx.set_text_baseline("middle");
		for tick in 0..=4 {
			let v = min_y + (max_y - min_y) * tick as f64 / 4.0;
			let ty = sy(v);
			ctx.set_stroke_style_str(GRID_COLOR);
			ctx.begin_path();
			ctx.move_to(left, ty);
			ctx.line_to(left + pw, ty);
			ctx.stroke();
			ctx.set_text_align("right");
			ctx.set_fill_style_str(LABEL_COLOR);
			let _ = ctx.fill_text(&format!("{v:.1}"), left - 6.0, ty);
		}
		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		ctx.set_fill_style_str(AXIS_COLOR);
		for tick in 0..=4 {
			let v = min_x + (max_x - min_x) * tick as f64 / 4.0;
			let _ = ctx.fill_text(&format!("{v:.0}"), sx(v), top + ph + 6.0);
		}

		for (points, color) in [
			(&self.data.positive, POSITIVE_COLOR),
			(&self.data.negative, NEGATIVE_COLOR),
		] {
			ctx.set_fill_style_str(color);
			ctx.set_global_alpha(0.75);
			for &[x, y, _] in points {
				ctx.begin_path();
				let _ = ctx.arc(sx(x), sy(y), POINT_RADIUS, 0.0, 2.0 * PI);
				ctx.fill();
			}
		}
		ctx.set_global_alpha(1.0);
	}
}

impl ChartSurface for ScatterState {
	fn resize(&mut self) {
		let (width, height) = fit_to_parent(&self.canvas);
		self.width = width;
		self.height = height;
		self.redraw();
	}
}

pub(super) fn init(ctx: &Rc<DashboardContext>) {
	let Some((canvas, ctx2d)) = canvas_for(ChartKind::Scatter) else {
		return;
	};
	let Some(data) = payload::embedded::<ScatterPayload>("scatter") else {
		return;
	};
	if !data.is_renderable() {
		debug!("empty scatter payload, skipping");
		return;
	}
	let state = ScatterState::new(canvas, ctx2d, data);
	state.redraw();
	ctx.surfaces.borrow_mut().push(Rc::new(RefCell::new(state)));
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extent_spans_both_point_sets_with_padding() {
		let data = ScatterPayload {
			positive: vec![[1.0, 0.2, 60.0], [10.0, 0.9, 600.0]],
			negative: vec![[5.0, -0.4, 300.0]],
		};
		let (min_x, max_x, min_y, max_y) = extent(&data);
		assert!(min_x < 1.0 && max_x > 10.0);
		assert!(min_y < -0.4 && max_y > 0.9);
	}
}
