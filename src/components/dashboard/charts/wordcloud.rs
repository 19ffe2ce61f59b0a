//! Interactive word cloud. Layout runs once per canvas size; all emphasis
//! changes go through per-index state consulted at draw time, so a
//! selection never moves a word.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::super::context::{ChartKind, DashboardContext, WordCloudHandle};
use super::super::highlight::{Emphasis, EmphasisCmd, EmphasisSet};
use super::super::payload;
use super::super::types::WordItem;
use super::{BACKGROUND, ChartSurface, canvas_for, fit_to_parent};

pub const SIZE_MIN_PX: f64 = 14.0;
pub const SIZE_MAX_PX: f64 = 60.0;

/// Axis-aligned box of one placed word, center-anchored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedBox {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

impl PlacedBox {
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(x - self.x).abs() <= self.w / 2.0 && (y - self.y).abs() <= self.h / 2.0
	}

	fn overlaps(&self, other: &PlacedBox, pad: f64) -> bool {
		(self.x - other.x).abs() < (self.w + other.w) / 2.0 + pad
			&& (self.y - other.y).abs() < (self.h + other.h) / 2.0 + pad
	}
}

/// Map item weights linearly into the font-size band.
pub fn scale_px(values: &[f64]) -> Vec<f64> {
	let min = values.iter().copied().fold(f64::INFINITY, f64::min);
	let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
	let span = max - min;
	values
		.iter()
		.map(|v| {
			if span > 0.0 {
				SIZE_MIN_PX + (v - min) / span * (SIZE_MAX_PX - SIZE_MIN_PX)
			} else {
				(SIZE_MIN_PX + SIZE_MAX_PX) / 2.0
			}
		})
		.collect()
}

/// Deterministic per-word color in the source's 95..255 RGB band.
pub fn word_color(name: &str) -> String {
	let mut hash: u32 = 0x811c9dc5;
	for byte in name.bytes() {
		hash ^= byte as u32;
		hash = hash.wrapping_mul(0x0100_0193);
	}
	let r = 95 + hash % 160;
	let g = 95 + (hash >> 8) % 160;
	let b = 95 + (hash >> 16) % 160;
	format!("rgb({r}, {g}, {b})")
}

fn word_box(name: &str, px: f64) -> (f64, f64) {
	let chars = name.chars().count().max(1) as f64;
	(px * 0.62 * chars, px * 1.05)
}

/// Greedy spiral placement, preserving input order. Every word gets a box
/// even when the canvas is crowded, because the output indexes the same
/// canonical sequence the emphasis instructions do.
pub fn layout(names: &[String], px: &[f64], width: f64, height: f64) -> Vec<PlacedBox> {
	let (cx, cy) = (width / 2.0, height / 2.0);
	let mut placed: Vec<PlacedBox> = Vec::with_capacity(names.len());
	for (name, &size) in names.iter().zip(px) {
		let (w, h) = word_box(name, size);
		let mut candidate = PlacedBox { x: cx, y: cy, w, h };
		for step in 0..800 {
			let angle = 0.55 * step as f64;
			let radius = 1.6 * step as f64 * (width.min(height) / 400.0).max(0.5);
			candidate.x = cx + radius * angle.cos();
			candidate.y = cy + radius * angle.sin() * 0.62;
			let free = placed.iter().all(|p| !candidate.overlaps(p, 2.0));
			let inside = candidate.x - w / 2.0 >= 0.0
				&& candidate.x + w / 2.0 <= width
				&& candidate.y - h / 2.0 >= 0.0
				&& candidate.y + h / 2.0 <= height;
			if free && inside {
				break;
			}
		}
		placed.push(candidate);
	}
	placed
}

pub struct WordCloudState {
	canvas: HtmlCanvasElement,
	ctx2d: CanvasRenderingContext2d,
	names: Vec<String>,
	px: Vec<f64>,
	colors: Vec<String>,
	placed: Vec<PlacedBox>,
	emphasis: EmphasisSet,
	width: f64,
	height: f64,
}

impl WordCloudState {
	pub fn new(
		canvas: HtmlCanvasElement,
		ctx2d: CanvasRenderingContext2d,
		items: &[WordItem],
	) -> Self {
		let (width, height) = fit_to_parent(&canvas);
		let names: Vec<String> = items.iter().map(|i| i.name.clone()).collect();
		let values: Vec<f64> = items.iter().map(|i| i.value).collect();
		let px = scale_px(&values);
		let colors = names.iter().map(|n| word_color(n)).collect();
		let placed = layout(&names, &px, width, height);
		Self {
			canvas,
			ctx2d,
			names,
			px,
			colors,
			placed,
			emphasis: EmphasisSet::new(items.len()),
			width,
			height,
		}
	}

	/// Apply an emphasis instruction without touching the layout.
	pub fn apply(&mut self, cmd: &EmphasisCmd) {
		self.emphasis.apply(cmd);
	}

	pub fn redraw(&self) {
		let ctx = &self.ctx2d;
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill_rect(0.0, 0.0, self.width, self.height);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");

		for i in 0..self.names.len() {
			let b = &self.placed[i];
			let (alpha, shadow) = match self.emphasis.state(i) {
				Emphasis::Normal => (1.0, 0.0),
				Emphasis::Highlight => (1.0, 10.0),
				Emphasis::Downplay => (0.12, 0.0),
			};
			ctx.set_global_alpha(alpha);
			ctx.set_shadow_blur(shadow);
			ctx.set_shadow_color(if shadow > 0.0 { "#333" } else { "transparent" });
			ctx.set_font(&format!("{}px sans-serif", self.px[i]));
			ctx.set_fill_style_str(&self.colors[i]);
			let _ = ctx.fill_text(&self.names[i], b.x, b.y);
		}
		ctx.set_global_alpha(1.0);
		ctx.set_shadow_blur(0.0);
	}

	/// Hit-test canvas coordinates against the placed boxes.
	pub fn word_at(&self, x: f64, y: f64) -> Option<usize> {
		self.placed.iter().position(|b| b.contains(x, y))
	}
}

impl ChartSurface for WordCloudState {
	fn resize(&mut self) {
		let (width, height) = fit_to_parent(&self.canvas);
		self.width = width;
		self.height = height;
		// Emphasis survives a re-fit: indices are stable even though
		// positions are recomputed.
		self.placed = layout(&self.names, &self.px, width, height);
		self.redraw();
	}
}

pub(super) fn init(ctx: &Rc<DashboardContext>) {
	let Some((canvas, ctx2d)) = canvas_for(ChartKind::WordCloud) else {
		return;
	};
	let Some(items) = payload::embedded::<Vec<WordItem>>("word-data") else {
		return;
	};
	if items.is_empty() {
		debug!("empty word payload, skipping word cloud");
		return;
	}
	let state = WordCloudState::new(canvas, ctx2d, &items);
	state.redraw();
	let state = Rc::new(RefCell::new(state));
	ctx.surfaces.borrow_mut().push(state.clone());
	*ctx.cloud.borrow_mut() = Some(WordCloudHandle {
		state,
		items: Rc::new(items),
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scale_px_stays_inside_the_band() {
		let px = scale_px(&[1.0, 10.0, 100.0]);
		assert_eq!(px.len(), 3);
		assert_eq!(px[0], SIZE_MIN_PX);
		assert_eq!(px[2], SIZE_MAX_PX);
		for v in &px {
			assert!((SIZE_MIN_PX..=SIZE_MAX_PX).contains(v));
		}
	}

	#[test]
	fn scale_px_flat_values_take_the_midpoint() {
		let px = scale_px(&[5.0, 5.0]);
		assert_eq!(px, vec![37.0, 37.0]);
	}

	#[test]
	fn word_color_is_deterministic_and_in_band() {
		assert_eq!(word_color("fun"), word_color("fun"));
		assert_ne!(word_color("fun"), word_color("bug"));
		let rgb = word_color("fun");
		let nums: Vec<u32> = rgb
			.trim_start_matches("rgb(")
			.trim_end_matches(')')
			.split(", ")
			.map(|n| n.parse().unwrap())
			.collect();
		for c in nums {
			assert!((95..255).contains(&c), "{rgb}");
		}
	}

	#[test]
	fn layout_preserves_canonical_order_and_is_deterministic() {
		let names: Vec<String> = ["fun", "bug", "easy", "grind"]
			.iter()
			.map(|s| s.to_string())
			.collect();
		let px = vec![40.0, 20.0, 30.0, 16.0];
		let a = layout(&names, &px, 800.0, 400.0);
		let b = layout(&names, &px, 800.0, 400.0);
		assert_eq!(a.len(), names.len());
		assert_eq!(a, b);
	}

	#[test]
	fn layout_separates_words_on_a_roomy_canvas() {
		let names: Vec<String> = (0..8).map(|i| format!("word{i}")).collect();
		let px = vec![24.0; 8];
		let placed = layout(&names, &px, 1200.0, 700.0);
		for i in 0..placed.len() {
			for j in (i + 1)..placed.len() {
				assert!(
					!placed[i].overlaps(&placed[j], 0.0),
					"{i} and {j} overlap: {:?} {:?}",
					placed[i],
					placed[j]
				);
			}
		}
	}

	#[test]
	fn hit_test_finds_the_placed_word() {
		let b = PlacedBox {
			x: 100.0,
			y: 50.0,
			w: 40.0,
			h: 20.0,
		};
		assert!(b.contains(100.0, 50.0));
		assert!(b.contains(119.0, 59.0));
		assert!(!b.contains(130.0, 50.0));
	}
}
