use leptos::prelude::*;

use review_dashboard::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(|| view! { <App /> });
}
