use payloads::requests::{
    self, gobi_error_message, username_error_message, validate_gobi,
    validate_username,
};
use payloads::responses::UserProfile;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::components::AvatarUpload;
use crate::contexts::toast::use_toast;
use crate::hooks::use_title;
use crate::{Route, State, get_api_client};

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 \
                           rounded-md bg-white dark:bg-neutral-700 \
                           focus:outline-none focus:ring-2 focus:ring-neutral-500";

#[derive(Properties, PartialEq)]
pub struct AccountPageProps {
    pub profile: UserProfile,
}

#[function_component]
pub fn AccountPage(props: &AccountPageProps) -> Html {
    use_title("Account");
    let (_, dispatch) = use_store::<State>();

    let on_profile_change = {
        let dispatch = dispatch.clone();
        Callback::from(move |profile: UserProfile| {
            dispatch.reduce_mut(|state| state.set_profile(profile));
        })
    };

    html! {
        <div class="space-y-10">
            <section class="space-y-4">
                <h1 class="text-2xl font-bold">{"Your profile"}</h1>
                if !props.profile.is_complete() {
                    <p class="text-sm text-neutral-600 dark:text-neutral-400">
                        {"Choose a username and a gobi. Your gobi is the phrase \
                          every one of your posts has to include."}
                    </p>
                }
                <ProfileForm profile={props.profile.clone()} on_change={on_profile_change.clone()} />
            </section>
            <section class="space-y-4">
                <h2 class="text-lg font-semibold">{"Avatar"}</h2>
                <AvatarUpload profile={props.profile.clone()} on_change={on_profile_change} />
            </section>
            <section class="space-y-4">
                <h2 class="text-lg font-semibold text-red-700 dark:text-red-400">
                    {"Delete account"}
                </h2>
                <DeleteAccountForm />
            </section>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProfileFormProps {
    profile: UserProfile,
    on_change: Callback<UserProfile>,
}

#[function_component]
fn ProfileForm(props: &ProfileFormProps) -> Html {
    let username = use_state(|| props.profile.username.clone().unwrap_or_default());
    let gobi = use_state(|| props.profile.gobi.clone().unwrap_or_default());
    let error_message = use_state(|| None::<String>);
    let is_saving = use_state(|| false);
    let toast = use_toast();
    let navigator = use_navigator();

    let bind = |field: UseStateHandle<String>| {
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field.set(input.value());
        })
    };
    let on_username = bind(username.clone());
    let on_gobi = bind(gobi.clone());

    let on_submit = {
        let username = username.clone();
        let gobi = gobi.clone();
        let error_message = error_message.clone();
        let is_saving = is_saving.clone();
        let on_change = props.on_change.clone();
        let was_complete = props.profile.is_complete();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let details = requests::UpdateProfile {
                username: username.trim().to_string(),
                gobi: gobi.trim().to_string(),
            };
            let problem =
                username_error_message(validate_username(&details.username))
                    .or_else(|| gobi_error_message(validate_gobi(&details.gobi)));
            if let Some(message) = problem {
                error_message.set(Some(message));
                return;
            }

            let error_message = error_message.clone();
            let is_saving = is_saving.clone();
            let on_change = on_change.clone();
            let toast = toast.clone();
            let navigator = navigator.clone();

            yew::platform::spawn_local(async move {
                is_saving.set(true);
                error_message.set(None);
                match get_api_client().update_profile(&details).await {
                    Ok(profile) => {
                        toast.success("Profile saved");
                        on_change.emit(profile);
                        // First time through: go write a post.
                        if !was_complete && let Some(navigator) = navigator {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                is_saving.set(false);
            });
        })
    };

    html! {
        <form onsubmit={on_submit} class="space-y-4">
            if let Some(error) = &*error_message {
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            }
            <div>
                <label for="username" class="block text-sm font-medium mb-2">{"Username"}</label>
                <input
                    id="username"
                    type="text"
                    value={(*username).clone()}
                    oninput={on_username}
                    class={INPUT_CLASS}
                />
            </div>
            <div>
                <label for="gobi" class="block text-sm font-medium mb-2">{"Gobi"}</label>
                <input
                    id="gobi"
                    type="text"
                    value={(*gobi).clone()}
                    oninput={on_gobi}
                    placeholder="nya"
                    class={INPUT_CLASS}
                />
                <p class="mt-1 text-xs text-neutral-500">
                    {"Changing it only affects posts you write from now on."}
                </p>
            </div>
            <button
                type="submit"
                disabled={*is_saving}
                class="px-4 py-2 rounded-md text-sm font-medium text-white
                       bg-neutral-900 dark:bg-neutral-100 dark:text-neutral-900
                       disabled:opacity-50"
            >
                {if *is_saving { "Saving..." } else { "Save" }}
            </button>
        </form>
    }
}

#[function_component]
fn DeleteAccountForm() -> Html {
    let (_, dispatch) = use_store::<State>();
    let password_ref = use_node_ref();
    let error_message = use_state(|| None::<String>);
    let is_deleting = use_state(|| false);
    let navigator = use_navigator();

    let on_submit = {
        let password_ref = password_ref.clone();
        let error_message = error_message.clone();
        let is_deleting = is_deleting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let password = password_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            if password.is_empty() {
                error_message
                    .set(Some("Enter your password to confirm".to_string()));
                return;
            }

            let error_message = error_message.clone();
            let is_deleting = is_deleting.clone();
            let dispatch = dispatch.clone();
            let navigator = navigator.clone();

            yew::platform::spawn_local(async move {
                is_deleting.set(true);
                let request = requests::DeleteAccount { password };
                match get_api_client().delete_account(&request).await {
                    Ok(()) => {
                        dispatch.reduce_mut(|state| state.logout());
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Signup);
                        }
                    }
                    Err(e) => {
                        error_message.set(Some(e.to_string()));
                        is_deleting.set(false);
                    }
                }
            });
        })
    };

    html! {
        <form onsubmit={on_submit} class="space-y-4">
            <p class="text-sm text-neutral-600 dark:text-neutral-400">
                {"This removes your profile, posts, likes, and follows for good."}
            </p>
            if let Some(error) = &*error_message {
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            }
            <input
                ref={password_ref}
                type="password"
                autocomplete="current-password"
                placeholder="Password"
                class={INPUT_CLASS}
            />
            <button
                type="submit"
                disabled={*is_deleting}
                class="px-4 py-2 rounded-md text-sm font-medium text-white bg-red-600
                       hover:bg-red-700 disabled:opacity-50"
            >
                {if *is_deleting { "Deleting..." } else { "Delete my account" }}
            </button>
        </form>
    }
}
