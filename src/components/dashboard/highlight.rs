//! Cross-panel highlight coordination between the topic list and the word
//! cloud. Selections are dispatched as index sets over the canonical item
//! sequence; the renderer only flips per-index emphasis and redraws, it
//! never relayouts or re-ingests the dataset.

use std::rc::Rc;

use leptos::prelude::*;

use super::context::DashboardContext;
use super::types::WordItem;

/// Per-index emphasis state. `Normal` is the never-selected state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emphasis {
	#[default]
	Normal,
	Highlight,
	Downplay,
}

/// Instructions the coordinator issues against a live renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmphasisCmd {
	Highlight(Vec<usize>),
	Downplay(Vec<usize>),
	Clear,
}

/// Emphasis bookkeeping for one renderer, addressed by canonical index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmphasisSet {
	states: Vec<Emphasis>,
}

impl EmphasisSet {
	pub fn new(len: usize) -> Self {
		Self {
			states: vec![Emphasis::Normal; len],
		}
	}

	pub fn apply(&mut self, cmd: &EmphasisCmd) {
		match cmd {
			EmphasisCmd::Highlight(indices) => self.set_all(indices, Emphasis::Highlight),
			EmphasisCmd::Downplay(indices) => self.set_all(indices, Emphasis::Downplay),
			EmphasisCmd::Clear => self.states.fill(Emphasis::Normal),
		}
	}

	fn set_all(&mut self, indices: &[usize], emphasis: Emphasis) {
		for &i in indices {
			if let Some(state) = self.states.get_mut(i) {
				*state = emphasis;
			}
		}
	}

	pub fn state(&self, index: usize) -> Emphasis {
		self.states.get(index).copied().unwrap_or_default()
	}
}

/// Split canonical indices into `(matched, others)` for a selected topic.
///
/// Matching is exact numeric equality; items without a topic always land in
/// `others`. A `None` selector (the "no topic" sentinel clicked upstream)
/// matches nothing.
pub fn partition(items: &[WordItem], topic_id: Option<i64>) -> (Vec<usize>, Vec<usize>) {
	let mut matched = Vec::new();
	let mut others = Vec::new();
	for (i, item) in items.iter().enumerate() {
		let hit = matches!((item.topic_id, topic_id), (Some(a), Some(b)) if a == b);
		if hit {
			matched.push(i);
		} else {
			others.push(i);
		}
	}
	(matched, others)
}

/// Click-driven coordinator. Holds the shared context (for the word-cloud
/// handle) and the signal controlling the reset control's visibility.
#[derive(Clone)]
pub struct HighlightCoordinator {
	ctx: Rc<DashboardContext>,
	reset_visible: RwSignal<bool>,
}

impl HighlightCoordinator {
	pub fn new(ctx: Rc<DashboardContext>, reset_visible: RwSignal<bool>) -> Self {
		Self { ctx, reset_visible }
	}

	/// Highlight every word of the selected topic and downplay the rest.
	/// A no-op until the word cloud has initialized.
	pub fn on_topic_selected(&self, topic_id: Option<i64>) {
		let Some(handle) = self.ctx.cloud.borrow().clone() else {
			return;
		};
		if handle.items.is_empty() {
			return;
		}
		let (matched, others) = partition(&handle.items, topic_id);
		let mut cloud = handle.state.borrow_mut();
		cloud.apply(&EmphasisCmd::Downplay(others));
		cloud.apply(&EmphasisCmd::Highlight(matched));
		cloud.redraw();
		self.reset_visible.set(true);
	}

	/// Clear emphasis on every canonical index, restoring the same neutral
	/// state as never having selected anything.
	pub fn on_reset_requested(&self) {
		let Some(handle) = self.ctx.cloud.borrow().clone() else {
			return;
		};
		let mut cloud = handle.state.borrow_mut();
		cloud.apply(&EmphasisCmd::Clear);
		cloud.redraw();
		self.reset_visible.set(false);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn word(name: &str, topic_id: Option<i64>) -> WordItem {
		WordItem {
			name: name.into(),
			value: 10.0,
			topic_id,
		}
	}

	fn sample() -> Vec<WordItem> {
		vec![
			word("fun", Some(2)),
			word("bug", Some(5)),
			word("easy", Some(2)),
		]
	}

	#[test]
	fn partition_splits_the_worked_scenario() {
		let (matched, others) = partition(&sample(), Some(2));
		assert_eq!(matched, vec![0, 2]);
		assert_eq!(others, vec![1]);
	}

	#[test]
	fn partition_covers_every_index_exactly_once() {
		let items = vec![
			word("fun", Some(2)),
			word("grind", None),
			word("bug", Some(5)),
			word("easy", Some(2)),
		];
		for topic in [Some(2), Some(5), Some(99), None] {
			let (matched, others) = partition(&items, topic);
			let mut all: Vec<usize> = matched.iter().chain(&others).copied().collect();
			all.sort_unstable();
			assert_eq!(all, vec![0, 1, 2, 3], "topic {topic:?}");
		}
	}

	#[test]
	fn absent_topic_keys_go_to_others() {
		let items = vec![word("fun", Some(2)), word("grind", None)];
		let (matched, others) = partition(&items, Some(2));
		assert_eq!(matched, vec![0]);
		assert_eq!(others, vec![1]);
	}

	#[test]
	fn none_selector_matches_nothing() {
		let (matched, others) = partition(&sample(), None);
		assert!(matched.is_empty());
		assert_eq!(others, vec![0, 1, 2]);
	}

	#[test]
	fn select_then_clear_restores_the_neutral_state() {
		let items = sample();
		let mut set = EmphasisSet::new(items.len());
		let fresh = set.clone();

		let (matched, others) = partition(&items, Some(2));
		set.apply(&EmphasisCmd::Downplay(others));
		set.apply(&EmphasisCmd::Highlight(matched));
		assert_eq!(set.state(0), Emphasis::Highlight);
		assert_eq!(set.state(1), Emphasis::Downplay);
		assert_eq!(set.state(2), Emphasis::Highlight);

		set.apply(&EmphasisCmd::Clear);
		assert_eq!(set, fresh);
		for i in 0..items.len() {
			assert_eq!(set.state(i), Emphasis::Normal);
		}
	}

	#[test]
	fn out_of_range_indices_are_ignored() {
		let mut set = EmphasisSet::new(2);
		set.apply(&EmphasisCmd::Highlight(vec![0, 7]));
		assert_eq!(set.state(0), Emphasis::Highlight);
		assert_eq!(set.state(7), Emphasis::Normal);
	}
}
