//! Average sentiment score per playtime bucket, drawn as grouped bars.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::super::context::{ChartKind, DashboardContext};
use super::super::payload;
use super::super::types::PlaytimePayload;
use super::{
	AXIS_COLOR, BACKGROUND, ChartSurface, GRID_COLOR, LABEL_COLOR, NEGATIVE_COLOR, POSITIVE_COLOR,
	canvas_for, fit_to_parent, nice_max, series_max,
};

const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 34.0;
const BAR_FRACTION: f64 = 0.32;

pub struct PlaytimeState {
	canvas: HtmlCanvasElement,
	ctx2d: CanvasRenderingContext2d,
	data: PlaytimePayload,
	width: f64,
	height: f64,
}

impl PlaytimeState {
	pub fn new(
		canvas: HtmlCanvasElement,
		ctx2d: CanvasRenderingContext2d,
		data: PlaytimePayload,
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

	pub fn redraw(&self) {
		let ctx = &self.ctx2d;
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill_rect(0.0, 0.0, self.width, self.height);

		let n = self.data.labels.len();
		let (left, top) = (MARGIN_LEFT, MARGIN_TOP);
		let pw = (self.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
		let ph = (self.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
		let max = nice_max(series_max(&[
			&self.data.positive_scores,
			&self.data.negative_scores,
		]));
		let group = pw / n as f64;
		let bar = group * BAR_FRACTION;
		let bar_h = |v: f64| ph * (v / max).clamp(0.0, 1.0);

		ctx.set_text_align("right");
		ctx.set_text_baseline("middle");
		ctx.set_font("11px sans-serif");
		for tick in 0..=4 {
			let v = max * tick as f64 / 4.0;
			let ty = top + ph * (1.0 - v / max);
			ctx.set_stroke_style_str(GRID_COLOR);
			ctx.begin_path();
			ctx.move_to(left, ty);
			ctx.line_to(left + pw, ty);
			ctx.stroke();
			ctx.set_fill_style_str(LABEL_COLOR);
			let _ = ctx.fill_text(&format!("{v:.2}"), left - 6.0, ty);
		}

		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		for (i, label) in self.data.labels.iter().enumerate() {
			let gx = left + group * i as f64;
			let center = gx + group / 2.0;

			let hp = bar_h(self.data.positive_scores[i]);
			ctx.set_fill_style_str(POSITIVE_COLOR);
			ctx.fill_rect(center - bar - 2.0, top + ph - hp, bar, hp);

			let hn = bar_h(self.data.negative_scores[i]);
			ctx.set_fill_style_str(NEGATIVE_COLOR);
			ctx.fill_rect(center + 2.0, top + ph - hn, bar, hn);

			ctx.set_fill_style_str(AXIS_COLOR);
			let _ = ctx.fill_text(label, center, top + ph + 6.0);
		}
	}
}

impl ChartSurface for PlaytimeState {
	fn resize(&mut self) {
		let (width, height) = fit_to_parent(&self.canvas);
		self.width = width;
		self.height = height;
		self.redraw();
	}
}

pub(super) fn init(ctx: &Rc<DashboardContext>) {
	let Some((canvas, ctx2d)) = canvas_for(ChartKind::Playtime) else {
		return;
	};
	let Some(data) = payload::embedded::<PlaytimePayload>("playtime") else {
		return;
	};
	if !data.is_renderable() {
		debug!("empty or ragged playtime payload, skipping");
		return;
	}
	let state = PlaytimeState::new(canvas, ctx2d, data);
	state.redraw();
	ctx.surfaces.borrow_mut().push(Rc::new(RefCell::new(state)));
}
