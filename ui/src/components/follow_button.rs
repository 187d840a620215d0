use payloads::UserId;
use yew::prelude::*;

use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::use_busy_flag;

#[derive(Properties, PartialEq)]
pub struct FollowButtonProps {
    pub user_id: UserId,
    pub following: bool,
    /// Called after the server accepted a follow or unfollow, so the caller
    /// can refresh the viewer context and follower counts.
    pub on_change: Callback<()>,
}

#[function_component]
pub fn FollowButton(props: &FollowButtonProps) -> Html {
    let is_loading = use_state(|| false);
    let busy = use_busy_flag();
    let toast = use_toast();

    let on_click = {
        let is_loading = is_loading.clone();
        let user_id = props.user_id;
        let following = props.following;
        let on_change = props.on_change.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(guard) = busy.try_acquire() else {
                return;
            };
            is_loading.set(true);
            let is_loading = is_loading.clone();
            let on_change = on_change.clone();
            let toast = toast.clone();

            yew::platform::spawn_local(async move {
                let _guard = guard;
                let api_client = get_api_client();
                let result = if following {
                    api_client.unfollow_user(&user_id).await
                } else {
                    api_client.follow_user(&user_id).await
                };
                match result {
                    Ok(()) => on_change.emit(()),
                    Err(e) => toast.error(e.to_string()),
                }
                is_loading.set(false);
            });
        })
    };

    let (label, style) = if props.following {
        (
            "Following",
            "border border-neutral-300 dark:border-neutral-600 text-neutral-900 dark:text-neutral-100",
        )
    } else {
        (
            "Follow",
            "bg-neutral-900 text-white dark:bg-neutral-100 dark:text-neutral-900",
        )
    };

    html! {
        <button
            onclick={on_click}
            disabled={*is_loading}
            class={classes!(
                "px-4", "py-1.5", "rounded-full", "text-sm", "font-medium",
                "disabled:opacity-50", style
            )}
        >
            {label}
        </button>
    }
}
