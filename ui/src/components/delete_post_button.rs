use payloads::PostId;
use yew::prelude::*;

use crate::contexts::toast::use_toast;
use crate::get_api_client;

#[derive(Properties, PartialEq)]
pub struct DeletePostButtonProps {
    pub post_id: PostId,
    pub on_deleted: Callback<()>,
}

#[function_component]
pub fn DeletePostButton(props: &DeletePostButtonProps) -> Html {
    let is_deleting = use_state(|| false);
    let toast = use_toast();

    let on_click = {
        let is_deleting = is_deleting.clone();
        let post_id = props.post_id;
        let on_deleted = props.on_deleted.clone();

        Callback::from(move |_: MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this post?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let is_deleting = is_deleting.clone();
            let on_deleted = on_deleted.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                is_deleting.set(true);
                match get_api_client().delete_post(&post_id).await {
                    Ok(()) => {
                        toast.success("Post deleted");
                        on_deleted.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_deleting.set(false);
            });
        })
    };

    html! {
        <button
            onclick={on_click}
            disabled={*is_deleting}
            class="text-sm text-neutral-500 hover:text-red-600 dark:text-neutral-400
                   dark:hover:text-red-400 disabled:opacity-50"
        >
            {if *is_deleting { "Deleting..." } else { "Delete" }}
        </button>
    }
}
