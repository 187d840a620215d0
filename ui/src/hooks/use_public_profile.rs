use payloads::{UserId, responses};
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};
use crate::get_api_client;

#[hook]
pub fn use_public_profile(
    user_id: UserId,
) -> FetchHookReturn<responses::PublicProfile> {
    use_fetch(user_id, move || async move {
        get_api_client()
            .public_profile(&user_id)
            .await
            .map_err(|e| e.to_string())
    })
}
