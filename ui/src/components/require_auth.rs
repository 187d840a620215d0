use payloads::responses::UserProfile;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{AuthState, Route, State};

/// Renders its children only for a logged in user. Logged out visitors are
/// sent to the login page; while the session check is still running a
/// spinner is shown.
///
/// Supports two modes:
/// 1. Simple children mode: Just wraps content that doesn't need the profile
/// 2. Render prop mode: Provides UserProfile to children that need it
#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub render: Option<Callback<UserProfile, Html>>,
}

#[function_component]
pub fn RequireAuth(props: &RequireAuthProps) -> Html {
    let (state, _) = use_store::<State>();

    match &state.auth_state {
        AuthState::Unknown => html! {
            <div class="text-center py-8">
                <div class="inline-block animate-spin rounded-full h-8 w-8 border-2
                            border-neutral-900 dark:border-neutral-100
                            border-t-transparent dark:border-t-transparent"></div>
            </div>
        },
        AuthState::LoggedOut => html! { <Redirect<Route> to={Route::Login} /> },
        AuthState::LoggedIn(profile) => match &props.render {
            Some(render) => render.emit(profile.clone()),
            None => html! { <>{for props.children.iter()}</> },
        },
    }
}
