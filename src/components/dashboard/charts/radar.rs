//! Game-dimension radar. Each axis is normalized against its own maximum
//! from the payload's indicator definitions.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use log::debug;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::super::context::{ChartKind, DashboardContext};
use super::super::payload;
use super::super::types::RadarPayload;
use super::{AXIS_COLOR, BACKGROUND, ChartSurface, canvas_for, fit_to_parent};

const RING_COUNT: usize = 4;
const FILL: &str = "rgba(0, 255, 255, 0.35)";
const STROKE: &str = "rgba(0, 255, 255, 0.8)";
const RING_COLOR: &str = "rgba(100, 100, 100, 0.5)";

/// Per-axis value fractions, clamped to the unit interval.
pub fn axis_fractions(data: &RadarPayload) -> Vec<f64> {
	data.value
		.iter()
		.zip(&data.indicator)
		.map(|(&v, axis)| {
			if axis.max > 0.0 {
				(v / axis.max).clamp(0.0, 1.0)
			} else {
				0.0
			}
		})
		.collect()
}

/// Point on spoke `i` of `n` at `fraction` of `radius`, starting at twelve
/// o'clock and going clockwise.
pub fn spoke_point(cx: f64, cy: f64, radius: f64, i: usize, n: usize, fraction: f64) -> (f64, f64) {
	let angle = -PI / 2.0 + 2.0 * PI * i as f64 / n as f64;
	(
		cx + radius * fraction * angle.cos(),
		cy + radius * fraction * angle.sin(),
	)
}

pub struct RadarState {
	canvas: HtmlCanvasElement,
	ctx2d: CanvasRenderingContext2d,
	data: RadarPayload,
	width: f64,
	height: f64,
}

impl RadarState {
	pub fn new(canvas: HtmlCanvasElement, ctx2d: CanvasRenderingContext2d, data: RadarPayload) -> Self {
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

		let n = self.data.indicator.len();
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let radius = (self.width.min(self.height) / 2.0 - 36.0).max(10.0);

		// Concentric grid rings and spokes.
		ctx.set_stroke_style_str(RING_COLOR);
		ctx.set_line_width(1.0);
		for ring in 1..=RING_COUNT {
			let f = ring as f64 / RING_COUNT as f64;
			ctx.begin_path();
			let _ = ctx.arc(cx, cy, radius * f, 0.0, 2.0 * PI);
			ctx.stroke();
		}
		for i in 0..n {
			let (x, y) = spoke_point(cx, cy, radius, i, n, 1.0);
			ctx.begin_path();
			ctx.move_to(cx, cy);
			ctx.line_to(x, y);
			ctx.stroke();
		}

		// Value polygon.
		let fractions = axis_fractions(&self.data);
		ctx.begin_path();
		for (i, &f) in fractions.iter().enumerate() {
			let (x, y) = spoke_point(cx, cy, radius, i, n, f);
			if i == 0 {
				ctx.move_to(x, y);
			} else {
				ctx.line_to(x, y);
			}
		}
		ctx.close_path();
		ctx.set_fill_style_str(FILL);
		ctx.fill();
		ctx.set_stroke_style_str(STROKE);
		ctx.set_line_width(2.0);
		ctx.stroke();

		// Axis names just beyond the rim.
		ctx.set_fill_style_str(AXIS_COLOR);
		ctx.set_font("12px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		for (i, axis) in self.data.indicator.iter().enumerate() {
			let (x, y) = spoke_point(cx, cy, radius + 18.0, i, n, 1.0);
			let _ = ctx.fill_text(&axis.name, x, y);
		}
	}
}

impl ChartSurface for RadarState {
	fn resize(&mut self) {
		let (width, height) = fit_to_parent(&self.canvas);
		self.width = width;
		self.height = height;
		self.redraw();
	}
}

pub(super) fn init(ctx: &Rc<DashboardContext>) {
	let Some((canvas, ctx2d)) = canvas_for(ChartKind::Radar) else {
		return;
	};
	let Some(data) = payload::embedded::<RadarPayload>("radar") else {
		return;
	};
	if !data.is_renderable() {
		debug!("radar payload unusable, skipping");
		return;
	}
	let state = RadarState::new(canvas, ctx2d, data);
	state.redraw();
	ctx.surfaces.borrow_mut().push(Rc::new(RefCell::new(state)));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::dashboard::types::RadarAxis;

	fn axis(name: &str, max: f64) -> RadarAxis {
		RadarAxis {
			name: name.into(),
			max,
		}
	}

	#[test]
	fn fractions_normalize_per_axis_and_clamp() {
		let data = RadarPayload {
			indicator: vec![axis("Gameplay", 5.0), axis("Story", 10.0), axis("Audio", 0.0)],
			value: vec![2.5, 15.0, 3.0],
		};
		assert_eq!(axis_fractions(&data), vec![0.5, 1.0, 0.0]);
	}

	#[test]
	fn first_spoke_points_straight_up() {
		let (x, y) = spoke_point(100.0, 100.0, 50.0, 0, 5, 1.0);
		assert!((x - 100.0).abs() < 1e-9);
		assert!((y - 50.0).abs() < 1e-9);
	}

	#[test]
	fn too_few_axes_are_not_renderable() {
		let data = RadarPayload {
			indicator: vec![axis("Gameplay", 5.0), axis("Story", 5.0)],
			value: vec![1.0, 2.0],
		};
		assert!(!data.is_renderable());
	}
}
