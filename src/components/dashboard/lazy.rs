//! Viewport-driven chart initialization. Every `.chart-slot` region is
//! observed; the first time one intersects the viewport its chart is
//! initialized and the region is released from observation. Runtimes
//! without `IntersectionObserver` fall back to eager initialization.

use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};

use super::charts;
use super::context::{ChartKind, DashboardContext};

/// Class marking the regions the loader watches.
pub const SLOT_SELECTOR: &str = ".chart-slot";
/// Class applied once a region has been revealed.
pub const REVEALED_CLASS: &str = "is-revealed";

pub struct LazyChartLoader {
	observer: Option<IntersectionObserver>,
	// Keeps the callback alive for the observer's lifetime.
	_callback: Option<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>,
}

impl LazyChartLoader {
	/// Begin observing every slot region. When observation is unsupported,
	/// every registered initializer runs immediately instead.
	pub fn register(ctx: Rc<DashboardContext>) -> Self {
		let Some(window) = web_sys::window() else {
			return Self::inert();
		};
		let supported = js_sys::Reflect::has(
			window.as_ref(),
			&JsValue::from_str("IntersectionObserver"),
		)
		.unwrap_or(false);
		if !supported {
			info!("IntersectionObserver unavailable, initializing all charts eagerly");
			Self::init_eagerly(&ctx);
			return Self::inert();
		}

		let cb_ctx = ctx.clone();
		let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
			move |entries: js_sys::Array, observer: IntersectionObserver| {
				for entry in entries.iter() {
					let entry: IntersectionObserverEntry = entry.unchecked_into();
					if !entry.is_intersecting() {
						continue;
					}
					let region = entry.target();
					on_visible(&cb_ctx, &region);
					// One-shot regardless of outcome.
					observer.unobserve(&region);
				}
			},
		);

		let observer = match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
			Ok(obs) => obs,
			Err(_) => {
				Self::init_eagerly(&ctx);
				return Self::inert();
			}
		};
		for region in slot_regions() {
			observer.observe(&region);
		}
		Self {
			observer: Some(observer),
			_callback: Some(callback),
		}
	}

	fn inert() -> Self {
		Self {
			observer: None,
			_callback: None,
		}
	}

	fn init_eagerly(ctx: &Rc<DashboardContext>) {
		for region in slot_regions() {
			reveal(&region);
		}
		for kind in ChartKind::ALL {
			charts::initialize(ctx, kind);
		}
	}
}

impl Drop for LazyChartLoader {
	fn drop(&mut self) {
		if let Some(observer) = &self.observer {
			observer.disconnect();
		}
	}
}

fn slot_regions() -> Vec<Element> {
	let Some(list) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.query_selector_all(SLOT_SELECTOR).ok())
	else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

fn reveal(region: &Element) {
	let _ = region.class_list().add_1(REVEALED_CLASS);
}

/// Reveal the region, resolve the chart placeholder it carries (itself or
/// the first known descendant) and run that chart's one-shot initializer.
fn on_visible(ctx: &Rc<DashboardContext>, region: &Element) {
	reveal(region);
	let Some(kind) = resolve_chart(region) else {
		debug!("revealed region '{}' holds no chart", region.id());
		return;
	};
	if ctx.init.has_begun(kind) {
		return;
	}
	charts::initialize(ctx, kind);
}

fn resolve_chart(region: &Element) -> Option<ChartKind> {
	if let Some(kind) = ChartKind::from_element_id(&region.id()) {
		return Some(kind);
	}
	ChartKind::ALL.into_iter().find(|kind| {
		region
			.query_selector(&format!("#{}", kind.element_id()))
			.ok()
			.flatten()
			.is_some()
	})
}
