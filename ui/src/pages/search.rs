use serde::{Deserialize, Serialize};
use timeline::PostFeed;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::PostList;
use crate::hooks::{use_post_feed, use_title, use_viewer_context};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[function_component]
pub fn SearchPage() -> Html {
    use_title("Search");
    let location = use_location();
    let navigator = use_navigator();
    let query = location
        .and_then(|l| l.query::<SearchQuery>().ok())
        .map(|q| q.q.trim().to_string())
        .unwrap_or_default();

    let feed = use_post_feed(PostFeed::Search(query.clone()));
    let viewer = use_viewer_context();
    let input_ref = use_node_ref();

    let on_submit = {
        let input_ref = input_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let q = input_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            if let Some(navigator) = &navigator
                && let Err(e) =
                    navigator.push_with_query(&Route::Search, &SearchQuery { q })
            {
                tracing::error!("Could not update search url: {e}");
            }
        })
    };

    let results = if query.is_empty() {
        html! {
            <p class="text-center py-8 text-neutral-500 dark:text-neutral-400">
                {"Search posts by any part of their text."}
            </p>
        }
    } else {
        html! {
            <PostList
                {feed}
                {viewer}
                empty_message={format!("No posts match \"{query}\".")}
            />
        }
    };

    html! {
        <div class="space-y-4">
            <form onsubmit={on_submit} class="flex space-x-2">
                <input
                    ref={input_ref}
                    type="search"
                    value={query.clone()}
                    placeholder="Search posts"
                    class="flex-1 px-3 py-2 border border-neutral-300 dark:border-neutral-600
                           rounded-md bg-white dark:bg-neutral-800
                           focus:outline-none focus:ring-2 focus:ring-neutral-500"
                />
                <button
                    type="submit"
                    class="px-4 py-2 rounded-md text-sm font-medium text-white
                           bg-neutral-900 dark:bg-neutral-100 dark:text-neutral-900"
                >
                    {"Search"}
                </button>
            </form>
            {results}
        </div>
    }
}
