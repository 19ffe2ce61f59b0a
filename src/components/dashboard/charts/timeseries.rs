//! Review volume over time, one line per sentiment with a translucent
//! area fill underneath.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::super::context::{ChartKind, DashboardContext};
use super::super::payload;
use super::super::types::TimeSeriesPayload;
use super::{
	AXIS_COLOR, BACKGROUND, ChartSurface, GRID_COLOR, LABEL_COLOR, NEGATIVE_COLOR, POSITIVE_COLOR,
	canvas_for, fit_to_parent, nice_max, series_max,
};

const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 32.0;

/// Label every n-th date so the axis stays readable.
pub fn label_step(dates: usize) -> usize {
	dates.div_ceil(6).max(1)
}

pub struct TimeSeriesState {
	canvas: HtmlCanvasElement,
	ctx2d: CanvasRenderingContext2d,
	data: TimeSeriesPayload,
	width: f64,
	height: f64,
}

impl TimeSeriesState {
	pub fn new(
		canvas: HtmlCanvasElement,
		ctx2d: CanvasRenderingContext2d,
		data: TimeSeriesPayload,
	) -> Self {
		let (width, height) = fit_to_parent(&canvas);
		Self {
			canvas,
			ctx2d,
			data,
			width,
			height,
		}
	}

	fn plot_rect(&self) -> (f64, f64, f64, f64) {
		(
			MARGIN_LEFT,
			MARGIN_TOP,
			(self.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
			(self.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
		)
	}

	pub fn redraw(&self) {
		let ctx = &self.ctx2d;
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill_rect(0.0, 0.0, self.width, self.height);

		let n = self.data.dates.len();
		let (left, top, pw, ph) = self.plot_rect();
		let max = nice_max(series_max(&[
			&self.data.positive_counts,
			&self.data.negative_counts,
		]));
		let x = |i: usize| left + pw * i as f64 / (n - 1).max(1) as f64;
		let y = |v: f64| top + ph * (1.0 - (v / max).clamp(0.0, 1.0));

		// Value grid and tick labels.
		ctx.set_text_align("right");
		ctx.set_text_baseline("middle");
		ctx.set_font("11px sans-serif");
		for tick in 0..=4 {
			let v = max * tick as f64 / 4.0;
			let ty = y(v);
			ctx.set_stroke_style_str(GRID_COLOR);
			ctx.begin_path();
			ctx.move_to(left, ty);
			ctx.line_to(left + pw, ty);
			ctx.stroke();
			ctx.set_fill_style_str(LABEL_COLOR);
			let _ = ctx.fill_text(&format!("{v:.0}"), left - 6.0, ty);
		}

		// Date labels, thinned.
		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		ctx.set_fill_style_str(AXIS_COLOR);
		let step = label_step(n);
		for i in (0..n).step_by(step) {
			let _ = ctx.fill_text(&self.data.dates[i], x(i), top + ph + 6.0);
		}

		for (series, color, fill) in [
			(
				&self.data.positive_counts,
				POSITIVE_COLOR,
				"rgba(76, 175, 80, 0.25)",
			),
			(
				&self.data.negative_counts,
				NEGATIVE_COLOR,
				"rgba(244, 67, 54, 0.25)",
			),
		] {
			ctx.begin_path();
			for (i, &v) in series.iter().enumerate() {
				if i == 0 {
					ctx.move_to(x(i), y(v));
				} else {
					ctx.line_to(x(i), y(v));
				}
			}
			ctx.set_stroke_style_str(color);
			ctx.set_line_width(2.0);
			ctx.stroke();

			ctx.line_to(x(n - 1), top + ph);
			ctx.line_to(x(0), top + ph);
			ctx.close_path();
			ctx.set_fill_style_str(fill);
			ctx.fill();
		}

		// Legend, top right.
		ctx.set_text_align("left");
		ctx.set_text_baseline("middle");
		ctx.set_fill_style_str(POSITIVE_COLOR);
		ctx.fill_rect(left + pw - 150.0, 8.0, 10.0, 10.0);
		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text("Positive", left + pw - 136.0, 13.0);
		ctx.set_fill_style_str(NEGATIVE_COLOR);
		ctx.fill_rect(left + pw - 74.0, 8.0, 10.0, 10.0);
		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text("Negative", left + pw - 60.0, 13.0);
	}
}

impl ChartSurface for TimeSeriesState {
	fn resize(&mut self) {
		let (width, height) = fit_to_parent(&self.canvas);
		self.width = width;
		self.height = height;
		self.redraw();
	}
}

pub(super) fn init(ctx: &Rc<DashboardContext>) {
	let Some((canvas, ctx2d)) = canvas_for(ChartKind::TimeSeries) else {
		return;
	};
	let Some(data) = payload::embedded::<TimeSeriesPayload>("time-series") else {
		return;
	};
	if !data.is_renderable() {
		debug!("empty or ragged time series payload, skipping");
		return;
	}
	let state = TimeSeriesState::new(canvas, ctx2d, data);
	state.redraw();
	ctx.surfaces.borrow_mut().push(Rc::new(RefCell::new(state)));
}

#[cfg(test)]
mod tests {
	use super::label_step;

	#[test]
	fn label_step_keeps_at_most_six_labels() {
		assert_eq!(label_step(1), 1);
		assert_eq!(label_step(6), 1);
		assert_eq!(label_step(7), 2);
		assert_eq!(label_step(24), 4);
		assert!(24usize.div_ceil(label_step(24)) <= 6);
	}
}
