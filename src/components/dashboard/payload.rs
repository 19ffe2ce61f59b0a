//! Embedded payload access. The template layer serializes every analytics
//! payload as a `data-*` attribute on the `#dashboard-data` host element;
//! each initializer parses its own payload exactly once from there.

use log::{debug, warn};
use serde::de::DeserializeOwned;

/// Element carrying the serialized payload attributes.
pub const DATA_HOST_ID: &str = "dashboard-data";

/// Read and deserialize `data-{attr}` off the payload host.
///
/// Absent/empty attributes and parse failures both collapse to `None` so a
/// bad payload skips exactly one visualization. Parse failures are logged;
/// this is the source's radar try/catch generalized to every chart.
pub fn embedded<T: DeserializeOwned>(attr: &str) -> Option<T> {
	let host = web_sys::window()?
		.document()?
		.get_element_by_id(DATA_HOST_ID)?;
	parse_payload(attr, host.get_attribute(&format!("data-{attr}")))
}

fn parse_payload<T: DeserializeOwned>(attr: &str, raw: Option<String>) -> Option<T> {
	let raw = match raw {
		Some(r) if !r.trim().is_empty() => r,
		_ => {
			debug!("no payload for data-{attr}, skipping");
			return None;
		}
	};
	match serde_json::from_str(&raw) {
		Ok(value) => Some(value),
		Err(err) => {
			warn!("malformed payload in data-{attr}: {err}");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::parse_payload;
	use crate::components::dashboard::types::WordItem;

	#[test]
	fn absent_and_blank_payloads_are_skipped() {
		assert!(parse_payload::<Vec<WordItem>>("word-data", None).is_none());
		assert!(parse_payload::<Vec<WordItem>>("word-data", Some("  ".into())).is_none());
	}

	#[test]
	fn malformed_payload_is_isolated_to_none() {
		assert!(parse_payload::<Vec<WordItem>>("word-data", Some("[{".into())).is_none());
	}

	#[test]
	fn valid_payload_round_trips() {
		let items: Vec<WordItem> =
			parse_payload("word-data", Some(r#"[{"name":"fun","value":3}]"#.into())).unwrap();
		assert_eq!(items.len(), 1);
		assert_eq!(items[0].name, "fun");
	}
}
