use payloads::PostId;
use timeline::{OptimisticToggle, ToggleOutcome};
use yew::prelude::*;

use crate::contexts::toast::use_toast;
use crate::get_api_client;

#[derive(Properties, PartialEq)]
pub struct LikeButtonProps {
    pub post_id: PostId,
    pub liked: bool,
    pub like_count: i64,
    /// Called with the new state once the server has accepted a change.
    #[prop_or_default]
    pub on_change: Callback<(PostId, bool)>,
}

/// Heart with a count. The click shows immediately and is undone with a
/// toast if the server refuses.
#[function_component]
pub fn LikeButton(props: &LikeButtonProps) -> Html {
    let toggle =
        use_mut_ref(|| OptimisticToggle::new(props.liked, props.like_count));
    let update = use_force_update();
    let toast = use_toast();

    // Adopt fresh server values when the post itself was refetched. A change
    // in `liked` alone is our own confirmed click echoing back, so it is not
    // a reason to rebase.
    {
        let toggle = toggle.clone();
        let update = update.clone();
        let liked = props.liked;
        use_effect_with(props.like_count, move |count| {
            let before = *toggle.borrow();
            toggle.borrow_mut().rebase(liked, *count);
            if *toggle.borrow() != before {
                update.force_update();
            }
        });
    }

    let on_click = {
        let toggle = toggle.clone();
        let post_id = props.post_id;
        let on_change = props.on_change.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(ticket) = toggle.borrow_mut().begin() else {
                return;
            };
            update.force_update();

            let toggle = toggle.clone();
            let update = update.clone();
            let toast = toast.clone();
            let on_change = on_change.clone();
            yew::platform::spawn_local(async move {
                let api_client = get_api_client();
                let result = if ticket.target {
                    api_client.like_post(&post_id).await
                } else {
                    api_client.unlike_post(&post_id).await
                };

                let outcome = toggle.borrow_mut().settle(ticket, result);
                match outcome {
                    ToggleOutcome::Committed(liked) => {
                        on_change.emit((post_id, liked))
                    }
                    ToggleOutcome::RolledBack(e) => {
                        tracing::warn!(%post_id, "Like rolled back: {e}");
                        toast.error(format!("Could not update like: {e}"));
                    }
                    ToggleOutcome::Busy => {}
                }
                update.force_update();
            });
        })
    };

    let state = *toggle.borrow();
    let (icon, color) = if state.active() {
        ("♥", "text-red-600 dark:text-red-400")
    } else {
        ("♡", "text-neutral-500 dark:text-neutral-400")
    };

    html! {
        <button
            onclick={on_click}
            disabled={state.is_pending()}
            aria-pressed={state.active().to_string()}
            class={classes!(
                "inline-flex", "items-center", "space-x-1", "text-sm",
                "hover:text-red-600", "disabled:cursor-wait", color
            )}
        >
            <span>{icon}</span>
            <span>{state.count()}</span>
        </button>
    }
}
