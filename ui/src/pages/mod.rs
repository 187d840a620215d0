pub mod account;
pub mod auth;
pub mod home;
pub mod not_found;
pub mod profile;
pub mod search;

pub use account::AccountPage;
pub use auth::AuthPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
pub use search::SearchPage;

pub use crate::components::AuthMode;

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TabProps {
    pub label: AttrValue,
    pub active: bool,
    pub onclick: Callback<MouseEvent>,
}

/// One tab in a row of feed tabs.
#[function_component]
pub fn Tab(props: &TabProps) -> Html {
    let style = if props.active {
        "border-neutral-900 dark:border-neutral-100 text-neutral-900 dark:text-neutral-100"
    } else {
        "border-transparent text-neutral-500 dark:text-neutral-400 hover:text-neutral-700"
    };
    html! {
        <button
            onclick={props.onclick.clone()}
            class={classes!("flex-1", "py-3", "text-sm", "font-medium", "border-b-2", style)}
        >
            {&props.label}
        </button>
    }
}
