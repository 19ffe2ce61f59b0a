use std::collections::HashMap;

use serde::Deserialize;

/// One entry of the word-cloud payload. The order of the deserialized
/// sequence is the canonical index space: every later highlight/downplay
/// instruction addresses items by position in it, so it is never reordered
/// or mutated after the initial render.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WordItem {
	pub name: String,
	pub value: f64,
	#[serde(default)]
	pub topic_id: Option<i64>,
}

/// Topic lookup entry, keyed by topic id in the embedded map.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TopicInfo {
	pub keywords: String,
	pub summary: String,
}

pub type TopicMap = HashMap<String, TopicInfo>;

/// Monthly review counts split by sentiment. All three arrays have equal
/// length; an empty `dates` array means there is nothing to render.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TimeSeriesPayload {
	pub dates: Vec<String>,
	pub positive_counts: Vec<f64>,
	pub negative_counts: Vec<f64>,
}

impl TimeSeriesPayload {
	pub fn is_renderable(&self) -> bool {
		!self.dates.is_empty()
			&& self.dates.len() == self.positive_counts.len()
			&& self.dates.len() == self.negative_counts.len()
	}
}

/// Average sentiment score per playtime bucket.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PlaytimePayload {
	pub labels: Vec<String>,
	pub positive_scores: Vec<f64>,
	pub negative_scores: Vec<f64>,
}

impl PlaytimePayload {
	pub fn is_renderable(&self) -> bool {
		!self.labels.is_empty()
			&& self.labels.len() == self.positive_scores.len()
			&& self.labels.len() == self.negative_scores.len()
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RadarAxis {
	pub name: String,
	pub max: f64,
}

/// Per-dimension averages for the radar chart.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RadarPayload {
	#[serde(default)]
	pub indicator: Vec<RadarAxis>,
	#[serde(default)]
	pub value: Vec<f64>,
}

impl RadarPayload {
	pub fn is_renderable(&self) -> bool {
		self.indicator.len() >= 3 && self.indicator.len() == self.value.len()
	}
}

/// Playtime-vs-score points, `[x, y, raw_hours]` per point.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ScatterPayload {
	#[serde(default)]
	pub positive: Vec<[f64; 3]>,
	#[serde(default)]
	pub negative: Vec<[f64; 3]>,
}

impl ScatterPayload {
	pub fn is_renderable(&self) -> bool {
		!self.positive.is_empty() || !self.negative.is_empty()
	}
}

/// Review polarity, normalized at the boundary. The backend has emitted the
/// recommendation flag as `"1"`/`"0"`, `true`/`false` and `1`/`0` across
/// revisions; downstream code only ever sees this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
	Positive,
	Negative,
}

impl Polarity {
	pub fn label(self) -> &'static str {
		match self {
			Polarity::Positive => "Recommended",
			Polarity::Negative => "Not recommended",
		}
	}
}

/// Raw wire forms the recommendation flag shows up in.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PolarityFlag {
	Bool(bool),
	Num(i64),
	Text(String),
}

impl From<&PolarityFlag> for Polarity {
	fn from(raw: &PolarityFlag) -> Self {
		let positive = match raw {
			PolarityFlag::Bool(b) => *b,
			PolarityFlag::Num(n) => *n != 0,
			PolarityFlag::Text(s) => {
				let s = s.trim();
				s == "1" || s.eq_ignore_ascii_case("true")
			}
		};
		if positive {
			Polarity::Positive
		} else {
			Polarity::Negative
		}
	}
}

/// One review card as embedded by the template layer.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ReviewCard {
	pub steam_id: String,
	pub app_id: String,
	pub content: String,
	#[serde(default)]
	pub playtime_minutes: f64,
	#[serde(default)]
	pub votes_up: u32,
	pub voted_up: PolarityFlag,
}

impl ReviewCard {
	pub fn polarity(&self) -> Polarity {
		Polarity::from(&self.voted_up)
	}
}

/// Author identity returned by the detail lookup endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AuthorProfile {
	pub nickname: String,
	pub avatar: String,
}

/// Playtime for display: minutes on the wire, hours with one decimal on
/// screen.
pub fn playtime_hours(minutes: f64) -> String {
	format!("{:.1} h", minutes / 60.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn polarity_normalizes_every_wire_encoding() {
		for raw in [
			PolarityFlag::Text("1".into()),
			PolarityFlag::Text("true".into()),
			PolarityFlag::Text("True".into()),
			PolarityFlag::Bool(true),
			PolarityFlag::Num(1),
		] {
			assert_eq!(Polarity::from(&raw), Polarity::Positive, "{raw:?}");
		}
		for raw in [
			PolarityFlag::Text("0".into()),
			PolarityFlag::Text("false".into()),
			PolarityFlag::Bool(false),
			PolarityFlag::Num(0),
		] {
			assert_eq!(Polarity::from(&raw), Polarity::Negative, "{raw:?}");
		}
	}

	#[test]
	fn word_item_topic_id_is_optional() {
		let items: Vec<WordItem> =
			serde_json::from_str(r#"[{"name":"fun","value":30,"topic_id":2},{"name":"grind","value":12}]"#)
				.unwrap();
		assert_eq!(items[0].topic_id, Some(2));
		assert_eq!(items[1].topic_id, None);
	}

	#[test]
	fn time_series_scenario_parses_and_validates() {
		let ts: TimeSeriesPayload = serde_json::from_str(
			r#"{"dates":["2021-01","2021-02"],"positive_counts":[3,5],"negative_counts":[1,0]}"#,
		)
		.unwrap();
		assert!(ts.is_renderable());
		assert_eq!(ts.dates.len(), 2);

		let empty: TimeSeriesPayload =
			serde_json::from_str(r#"{"dates":[],"positive_counts":[],"negative_counts":[]}"#).unwrap();
		assert!(!empty.is_renderable());
	}

	#[test]
	fn ragged_series_is_rejected() {
		let ts = TimeSeriesPayload {
			dates: vec!["2021-01".into()],
			positive_counts: vec![1.0, 2.0],
			negative_counts: vec![1.0],
		};
		assert!(!ts.is_renderable());
	}

	#[test]
	fn review_card_parses_mixed_flag_encodings() {
		let cards: Vec<ReviewCard> = serde_json::from_str(
			r#"[
				{"steam_id":"7","app_id":"570","content":"great","playtime_minutes":90,"votes_up":4,"voted_up":"1"},
				{"steam_id":"8","app_id":"570","content":"meh","voted_up":false}
			]"#,
		)
		.unwrap();
		assert_eq!(cards[0].polarity(), Polarity::Positive);
		assert_eq!(cards[1].polarity(), Polarity::Negative);
		assert_eq!(cards[1].votes_up, 0);
	}

	#[test]
	fn playtime_formats_in_hours() {
		assert_eq!(playtime_hours(90.0), "1.5 h");
		assert_eq!(playtime_hours(0.0), "0.0 h");
	}
}
