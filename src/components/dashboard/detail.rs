//! Review detail modal population. Clicking a card fetches the author's
//! nickname and avatar, then fills the modal in one shot. The fetch
//! suspends only this continuation; chart interaction stays live.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::types::{AuthorProfile, Polarity, ReviewCard, playtime_hours};

/// Everything the modal displays once the lookup resolves.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewDetail {
	pub author: AuthorProfile,
	pub content: String,
	pub playtime: String,
	pub votes_up: u32,
	pub polarity: Polarity,
}

fn fallback_author() -> AuthorProfile {
	AuthorProfile {
		nickname: "Unknown player".into(),
		avatar: String::new(),
	}
}

/// Read-only, idempotent lookup keyed by the (user, app) identity pair.
pub async fn fetch_author(steam_id: &str, app_id: &str) -> Result<AuthorProfile, gloo_net::Error> {
	gloo_net::http::Request::get(&format!("/comment_detail/{steam_id}/{app_id}"))
		.send()
		.await?
		.json::<AuthorProfile>()
		.await
}

/// Open the detail modal for a card. The lookup failure path degrades to a
/// placeholder author instead of taking the page down.
pub fn open_detail(card: ReviewCard, modal: RwSignal<Option<ReviewDetail>>) {
	spawn_local(async move {
		let author = match fetch_author(&card.steam_id, &card.app_id).await {
			Ok(author) => author,
			Err(err) => {
				warn!(
					"author lookup failed for {}/{}: {err}",
					card.steam_id, card.app_id
				);
				fallback_author()
			}
		};
		modal.set(Some(ReviewDetail {
			author,
			content: card.content.clone(),
			playtime: playtime_hours(card.playtime_minutes),
			votes_up: card.votes_up,
			polarity: card.polarity(),
		}));
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::dashboard::types::PolarityFlag;

	#[test]
	fn detail_fields_derive_from_the_card() {
		let card = ReviewCard {
			steam_id: "7".into(),
			app_id: "570".into(),
			content: "great game".into(),
			playtime_minutes: 150.0,
			votes_up: 3,
			voted_up: PolarityFlag::Text("1".into()),
		};
		assert_eq!(playtime_hours(card.playtime_minutes), "2.5 h");
		assert_eq!(card.polarity(), Polarity::Positive);
		assert_eq!(card.polarity().label(), "Recommended");
	}
}
