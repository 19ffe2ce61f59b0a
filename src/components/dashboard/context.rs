use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::charts::ChartSurface;
use super::charts::wordcloud::WordCloudState;
use super::types::WordItem;

/// Closed enumeration of the dashboard's visualizations. Dispatch goes
/// through a `match` on this enum rather than the element-id strings the
/// ids map to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
	WordCloud,
	TimeSeries,
	Playtime,
	Radar,
	Scatter,
}

impl ChartKind {
	pub const ALL: [ChartKind; 5] = [
		ChartKind::WordCloud,
		ChartKind::TimeSeries,
		ChartKind::Playtime,
		ChartKind::Radar,
		ChartKind::Scatter,
	];

	/// Stable id of the placeholder canvas for this chart.
	pub fn element_id(self) -> &'static str {
		match self {
			ChartKind::WordCloud => "wordcloud_chart",
			ChartKind::TimeSeries => "time_series_chart",
			ChartKind::Playtime => "playtime_chart",
			ChartKind::Radar => "radar_chart",
			ChartKind::Scatter => "scatter_chart",
		}
	}

	pub fn from_element_id(id: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.element_id() == id)
	}
}

/// Set-once initialization ledger. `begin` returns `true` exactly once per
/// kind; the flag is never reset, which is what makes every initializer
/// one-shot no matter how often its region re-enters the viewport.
#[derive(Debug, Default)]
pub struct InitLedger {
	started: RefCell<HashSet<ChartKind>>,
}

impl InitLedger {
	pub fn begin(&self, kind: ChartKind) -> bool {
		self.started.borrow_mut().insert(kind)
	}

	pub fn has_begun(&self, kind: ChartKind) -> bool {
		self.started.borrow().contains(&kind)
	}
}

/// Live word-cloud renderer plus the canonical item sequence it was built
/// from. Written once by the word-cloud initializer; every interaction
/// handler checks for its presence before doing anything.
#[derive(Clone)]
pub struct WordCloudHandle {
	pub state: Rc<RefCell<WordCloudState>>,
	pub items: Rc<Vec<WordItem>>,
}

/// Shared page-lifetime state, constructed once when the dashboard mounts
/// and passed by reference to every handler that needs it. Replaces the ad
/// hoc globals of the source script.
#[derive(Default)]
pub struct DashboardContext {
	pub init: InitLedger,
	pub cloud: RefCell<Option<WordCloudHandle>>,
	pub surfaces: RefCell<Vec<Rc<RefCell<dyn ChartSurface>>>>,
}

impl DashboardContext {
	/// Broadcast a container resize to every live renderer. Each surface
	/// re-fits independently; none share mutable state.
	pub fn resize_all(&self) {
		for surface in self.surfaces.borrow().iter() {
			surface.borrow_mut().resize();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ledger_begins_each_kind_exactly_once() {
		let ledger = InitLedger::default();
		assert!(ledger.begin(ChartKind::Radar));
		assert!(!ledger.begin(ChartKind::Radar));
		assert!(!ledger.begin(ChartKind::Radar));
		assert!(ledger.has_begun(ChartKind::Radar));
		assert!(!ledger.has_begun(ChartKind::Scatter));
	}

	#[test]
	fn element_ids_round_trip_through_the_enum() {
		for kind in ChartKind::ALL {
			assert_eq!(ChartKind::from_element_id(kind.element_id()), Some(kind));
		}
		assert_eq!(ChartKind::from_element_id("sidebar"), None);
	}
}
