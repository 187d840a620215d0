use yew::prelude::*;
use yewdux::prelude::*;

use crate::{State, get_api_client};

/// Hook to check authentication status once on startup
#[hook]
pub fn use_authentication() {
    let (_state, dispatch) = use_store::<State>();

    use_effect_with((), move |_| {
        yew::platform::spawn_local(async move {
            let api_client = get_api_client();
            let profile = match api_client.login_check().await {
                Ok(true) => api_client.user_profile().await.ok(),
                Ok(false) => None,
                Err(e) => {
                    // Network error or other issue, assume logged out
                    tracing::warn!("Session check failed: {e}");
                    None
                }
            };
            dispatch.reduce_mut(|state| match profile {
                Some(profile) => state.set_profile(profile),
                None => state.logout(),
            });
        });
    });
}
