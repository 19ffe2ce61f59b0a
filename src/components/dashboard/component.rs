use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use super::context::{ChartKind, DashboardContext};
use super::detail::{ReviewDetail, open_detail};
use super::highlight::HighlightCoordinator;
use super::lazy::LazyChartLoader;
use super::payload;
use super::types::{Polarity, ReviewCard, TopicInfo, TopicMap};

#[derive(Clone, Debug, PartialEq)]
struct WordTooltip {
	x: f64,
	y: f64,
	name: String,
	info: Option<TopicInfo>,
}

/// Topic entries sorted by id for a stable panel order.
fn topic_entries(topics: &TopicMap) -> Vec<(i64, TopicInfo)> {
	let mut entries: Vec<(i64, TopicInfo)> = topics
		.iter()
		.filter_map(|(key, info)| key.parse::<i64>().ok().map(|id| (id, info.clone())))
		.collect();
	entries.sort_by_key(|(id, _)| *id);
	entries
}

/// The review analytics dashboard: topic panel, lazily initialized charts,
/// review cards and the detail modal, all sharing one context object.
#[component]
pub fn Dashboard() -> impl IntoView {
	let ctx: Rc<DashboardContext> = Rc::new(DashboardContext::default());
	let reset_visible = RwSignal::new(false);
	let coordinator = HighlightCoordinator::new(ctx.clone(), reset_visible);
	let modal: RwSignal<Option<ReviewDetail>> = RwSignal::new(None);
	let tooltip: RwSignal<Option<WordTooltip>> = RwSignal::new(None);
	let loading = RwSignal::new(false);

	let topics: TopicMap = payload::embedded("topic-map").unwrap_or_default();
	let reviews: Vec<ReviewCard> = payload::embedded("reviews").unwrap_or_default();

	// Loader and resize listener live as long as the component.
	let loader: Rc<RefCell<Option<LazyChartLoader>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (ctx_fx, loader_fx, resize_fx) = (ctx.clone(), loader.clone(), resize_cb.clone());
	Effect::new(move |_| {
		if loader_fx.borrow().is_some() {
			return;
		}
		*loader_fx.borrow_mut() = Some(LazyChartLoader::register(ctx_fx.clone()));

		let ctx_resize = ctx_fx.clone();
		*resize_fx.borrow_mut() = Some(Closure::new(move || ctx_resize.resize_all()));
		if let Some(window) = web_sys::window() {
			if let Some(cb) = resize_fx.borrow().as_ref() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let ctx_mm = ctx.clone();
	let topics_mm = topics.clone();
	let on_cloud_mousemove = move |ev: MouseEvent| {
		let Some(handle) = ctx_mm.cloud.borrow().clone() else {
			return;
		};
		let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
		match handle.state.borrow().word_at(x, y) {
			Some(i) => {
				let item = &handle.items[i];
				let info = item
					.topic_id
					.and_then(|t| topics_mm.get(&t.to_string()).cloned());
				tooltip.set(Some(WordTooltip {
					x,
					y,
					name: item.name.clone(),
					info,
				}));
			}
			None => tooltip.set(None),
		}
	};

	let coord_reset = coordinator.clone();

	view! {
		<div class="dashboard">
			<form class="filter-form" action="/analyze" method="get" on:submit=move |_| loading.set(true)>
				<input type="text" name="app_id" placeholder="Steam app id" />
				<button type="submit">"Analyze"</button>
			</form>
			<div class="loading-indicator" class:is-hidden=move || !loading.get()>
				"Loading, please wait..."
			</div>

			<aside class="topic-panel">
				<h2>"Topics"</h2>
				<ul>
					{topic_entries(&topics)
						.into_iter()
						.map(|(id, info)| {
							let coord = coordinator.clone();
							view! {
								<li class="topic-entry" on:click=move |_| coord.on_topic_selected(Some(id))>
									<span class="topic-id">{format!("#{id}")}</span>
									<span class="topic-keywords">{info.keywords}</span>
								</li>
							}
						})
						.collect_view()}
				</ul>
				<button
					class="reset-highlight"
					class:is-hidden=move || !reset_visible.get()
					on:click=move |_| coord_reset.on_reset_requested()
				>
					"Reset highlight"
				</button>
			</aside>

			<section class="chart-slot" id="wordcloud-section">
				<h2>"Keyword cloud"</h2>
				<div class="chart-body">
					<canvas
						id={ChartKind::WordCloud.element_id()}
						on:mousemove=on_cloud_mousemove
						on:mouseleave=move |_| tooltip.set(None)
					/>
					{move || {
						tooltip
							.get()
							.map(|t| {
								view! {
									<div
										class="cloud-tooltip"
										style=format!("left: {}px; top: {}px;", t.x + 12.0, t.y + 14.0)
									>
										<strong>{t.name}</strong>
										<p>
											{match t.info {
												Some(info) => {
													format!("Topic: {}. {}", info.keywords, info.summary)
												}
												None => "(no associated topic)".to_string(),
											}}
										</p>
									</div>
								}
							})
					}}
				</div>
			</section>

			<section class="chart-slot" id="time-series-section">
				<h2>"Review volume over time"</h2>
				<div class="chart-body">
					<canvas id={ChartKind::TimeSeries.element_id()} />
				</div>
			</section>

			<section class="chart-slot" id="playtime-section">
				<h2>"Sentiment by playtime"</h2>
				<div class="chart-body">
					<canvas id={ChartKind::Playtime.element_id()} />
				</div>
			</section>

			<section class="chart-slot" id="radar-section">
				<h2>"Game dimensions"</h2>
				<div class="chart-body">
					<canvas id={ChartKind::Radar.element_id()} />
				</div>
			</section>

			<section class="chart-slot" id="scatter-section">
				<h2>"Playtime vs. score"</h2>
				<div class="chart-body">
					<canvas id={ChartKind::Scatter.element_id()} />
				</div>
			</section>

			<section class="review-list">
				<h2>"Reviews"</h2>
				{reviews
					.into_iter()
					.map(|card| {
						let excerpt: String = card.content.chars().take(120).collect();
						let polarity = card.polarity();
						view! {
							<article
								class="comment-card"
								class:is-negative={polarity == Polarity::Negative}
								on:click=move |_| open_detail(card.clone(), modal)
							>
								<p class="card-excerpt">{excerpt}</p>
							</article>
						}
					})
					.collect_view()}
			</section>

			<ReviewModal modal=modal />
		</div>
	}
}

/// Detail overlay filled once the author lookup resolves.
#[component]
fn ReviewModal(modal: RwSignal<Option<ReviewDetail>>) -> impl IntoView {
	move || {
		modal
			.get()
			.map(|detail| {
				view! {
					<div class="modal-backdrop" on:click=move |_| modal.set(None)>
						<div class="review-modal">
							<img class="modal-avatar" src=detail.author.avatar.clone() alt="avatar" />
							<h3 class="modal-author">{detail.author.nickname.clone()}</h3>
							<span
								class="modal-polarity"
								class:is-negative={detail.polarity == Polarity::Negative}
							>
								{detail.polarity.label()}
							</span>
							<p class="modal-content">{detail.content.clone()}</p>
							<dl class="modal-meta">
								<dt>"Playtime"</dt>
								<dd>{detail.playtime.clone()}</dd>
								<dt>"Helpful votes"</dt>
								<dd>{detail.votes_up}</dd>
							</dl>
						</div>
					</div>
				}
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn topic_entries_sort_by_numeric_id() {
		let mut topics = TopicMap::new();
		for (key, keywords) in [("10", "story"), ("2", "combat"), ("oops", "ignored")] {
			topics.insert(
				key.into(),
				TopicInfo {
					keywords: keywords.into(),
					summary: String::new(),
				},
			);
		}
		let entries = topic_entries(&topics);
		let ids: Vec<i64> = entries.iter().map(|(id, _)| *id).collect();
		assert_eq!(ids, vec![2, 10]);
	}

	#[test]
	fn playtime_is_displayed_in_hours() {
		assert_eq!(super::super::types::playtime_hours(126.0), "2.1 h");
	}
}
