use payloads::requests::{self, validate_signup};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{State, get_api_client};

#[derive(Clone, Copy, PartialEq)]
pub enum AuthMode {
    Login,
    CreateAccount,
}

#[derive(Properties, PartialEq)]
pub struct AuthFormProps {
    pub mode: AuthMode,
}

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 \
                           rounded-md shadow-sm bg-white dark:bg-neutral-700 \
                           text-neutral-900 dark:text-neutral-100 \
                           focus:outline-none focus:ring-2 focus:ring-neutral-500";

/// Email and password form for logging in or creating an account. A new
/// account is logged in right away; success shows up as a profile in the
/// global state.
#[function_component]
pub fn AuthForm(props: &AuthFormProps) -> Html {
    let (_state, dispatch) = use_store::<State>();

    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let confirm_password_ref = use_node_ref();
    let error_message = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let confirm_password_ref = confirm_password_ref.clone();
        let error_message = error_message.clone();
        let is_loading = is_loading.clone();
        let mode = props.mode;

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let value_of = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            };
            let credentials = requests::LoginCredentials {
                email: value_of(&email_ref).trim().to_string(),
                password: value_of(&password_ref),
            };

            let new_account = match mode {
                AuthMode::Login => {
                    if credentials.email.is_empty()
                        || credentials.password.is_empty()
                    {
                        error_message.set(Some(
                            "Please enter your email and password".to_string(),
                        ));
                        return;
                    }
                    None
                }
                AuthMode::CreateAccount => {
                    let details = requests::CreateAccount {
                        email: credentials.email.clone(),
                        password: credentials.password.clone(),
                        password_confirm: value_of(&confirm_password_ref),
                    };
                    if let Some(message) =
                        validate_signup(&details).error_message()
                    {
                        error_message.set(Some(message));
                        return;
                    }
                    Some(details)
                }
            };

            let error_message = error_message.clone();
            let is_loading = is_loading.clone();
            let dispatch = dispatch.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error_message.set(None);

                let api_client = get_api_client();
                let result = async {
                    if let Some(details) = &new_account {
                        api_client.create_account(details).await?;
                    }
                    api_client.login(&credentials).await?;
                    api_client.user_profile().await
                }
                .await;

                match result {
                    Ok(profile) => {
                        dispatch.reduce_mut(|state| state.set_profile(profile));
                    }
                    Err(e) => {
                        error_message.set(Some(e.to_string()));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    let creating = props.mode == AuthMode::CreateAccount;

    html! {
        <form onsubmit={on_submit} class="space-y-6">
            if let Some(error) = &*error_message {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            }

            <div>
                <label for="email" class="block text-sm font-medium mb-2">{"Email"}</label>
                <input
                    ref={email_ref}
                    type="email"
                    id="email"
                    autocomplete="email"
                    required={true}
                    class={INPUT_CLASS}
                    placeholder="you@example.com"
                />
            </div>

            <div>
                <label for="password" class="block text-sm font-medium mb-2">{"Password"}</label>
                <input
                    ref={password_ref}
                    type="password"
                    id="password"
                    autocomplete={if creating { "new-password" } else { "current-password" }}
                    required={true}
                    class={INPUT_CLASS}
                />
            </div>

            if creating {
                <div>
                    <label for="confirm-password" class="block text-sm font-medium mb-2">
                        {"Confirm Password"}
                    </label>
                    <input
                        ref={confirm_password_ref}
                        type="password"
                        id="confirm-password"
                        autocomplete="new-password"
                        required={true}
                        class={INPUT_CLASS}
                    />
                </div>
            }

            <button
                type="submit"
                disabled={*is_loading}
                class="w-full py-2 px-4 rounded-md text-sm font-medium text-white
                       bg-neutral-900 hover:bg-neutral-800
                       dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200
                       disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
            >
                {match (*is_loading, props.mode) {
                    (true, AuthMode::Login) => "Signing in...",
                    (true, AuthMode::CreateAccount) => "Creating account...",
                    (false, AuthMode::Login) => "Sign in",
                    (false, AuthMode::CreateAccount) => "Create account",
                }}
            </button>
        </form>
    }
}
