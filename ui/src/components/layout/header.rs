use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::components::Avatar;
use crate::hooks::use_logout;
use crate::{Route, State};

const LINK_CLASS: &str = "text-sm font-medium text-neutral-600 dark:text-neutral-300 \
                          hover:text-neutral-900 dark:hover:text-white";

#[function_component]
pub fn Header() -> Html {
    let (state, _) = use_store::<State>();
    let on_logout = use_logout();

    let nav = match state.profile() {
        Some(profile) => html! {
            <>
                <Link<Route> to={Route::Home} classes={LINK_CLASS}>{"Home"}</Link<Route>>
                <Link<Route> to={Route::Search} classes={LINK_CLASS}>{"Search"}</Link<Route>>
                <Link<Route> to={Route::Account} classes={LINK_CLASS}>{"Account"}</Link<Route>>
                <button onclick={on_logout} class={LINK_CLASS}>{"Log out"}</button>
                <Link<Route> to={Route::Profile { user_id: profile.user_id }}>
                    <Avatar
                        user_id={profile.user_id}
                        username={profile.username.clone()}
                        avatar_updated_at={profile.avatar_updated_at}
                        small=true
                    />
                </Link<Route>>
            </>
        },
        None => html! {
            <>
                <Link<Route> to={Route::Login} classes={LINK_CLASS}>{"Log in"}</Link<Route>>
                <Link<Route> to={Route::Signup} classes={LINK_CLASS}>{"Sign up"}</Link<Route>>
            </>
        },
    };

    html! {
        <header class="bg-white dark:bg-neutral-800 border-b border-neutral-200 dark:border-neutral-700">
            <div class="max-w-2xl mx-auto px-4 sm:px-6">
                <div class="flex justify-between items-center h-16">
                    <Link<Route> to={Route::Home} classes="text-xl font-semibold">
                        {"Gobi"}
                    </Link<Route>>
                    <nav class="flex items-center space-x-4">{nav}</nav>
                </div>
            </div>
        </header>
    }
}
