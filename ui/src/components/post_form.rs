use payloads::requests::{self, POST_CONTENT_MAX_LEN, validate_post_content};
use payloads::responses::Post;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::use_busy_flag;

#[derive(Properties, PartialEq)]
pub struct PostFormProps {
    /// The author's current gobi. Every post must contain it.
    pub gobi: String,
    pub on_created: Callback<Post>,
}

#[function_component]
pub fn PostForm(props: &PostFormProps) -> Html {
    let content = use_state(String::new);
    let error_message = use_state(|| None::<String>);
    let is_submitting = use_state(|| false);
    let busy = use_busy_flag();
    let toast = use_toast();

    let on_input = {
        let content = content.clone();
        let error_message = error_message.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            content.set(input.value());
            error_message.set(None);
        })
    };

    let on_submit = {
        let content = content.clone();
        let error_message = error_message.clone();
        let is_submitting = is_submitting.clone();
        let gobi = props.gobi.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if busy.is_busy() {
                return;
            }
            if let Some(message) =
                validate_post_content(&content, &gobi).error_message()
            {
                error_message.set(Some(message));
                return;
            }
            let Some(guard) = busy.try_acquire() else {
                return;
            };
            is_submitting.set(true);

            let request = requests::CreatePost {
                content: (*content).clone(),
            };
            let content = content.clone();
            let error_message = error_message.clone();
            let is_submitting = is_submitting.clone();
            let on_created = on_created.clone();
            let toast = toast.clone();

            yew::platform::spawn_local(async move {
                let _guard = guard;
                match get_api_client().create_post(&request).await {
                    Ok(post) => {
                        content.set(String::new());
                        toast.success("Posted");
                        on_created.emit(post);
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                is_submitting.set(false);
            });
        })
    };

    let length = content.chars().count();
    let counter_class = if length > POST_CONTENT_MAX_LEN {
        "text-red-600 dark:text-red-400"
    } else {
        "text-neutral-500 dark:text-neutral-400"
    };

    html! {
        <form onsubmit={on_submit} class="space-y-2 pb-4 border-b border-neutral-200 dark:border-neutral-700">
            <textarea
                value={(*content).clone()}
                oninput={on_input}
                rows="3"
                placeholder={format!("Say something, ending with \"{}\"", props.gobi)}
                class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600
                       rounded-md bg-white dark:bg-neutral-800 resize-none
                       focus:outline-none focus:ring-2 focus:ring-neutral-500"
            />
            if let Some(error) = &*error_message {
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            }
            <div class="flex items-center justify-between">
                <span class={classes!("text-sm", counter_class)}>
                    {format!("{length}/{POST_CONTENT_MAX_LEN}")}
                </span>
                <button
                    type="submit"
                    disabled={*is_submitting}
                    class="px-4 py-1.5 rounded-full text-sm font-medium text-white
                           bg-neutral-900 hover:bg-neutral-800
                           dark:bg-neutral-100 dark:text-neutral-900
                           disabled:opacity-50"
                >
                    {if *is_submitting { "Posting..." } else { "Post" }}
                </button>
            </div>
        </form>
    }
}
