use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::components::{AuthForm, AuthMode};
use crate::hooks::use_title;
use crate::{Route, State};

#[derive(Properties, PartialEq)]
pub struct AuthPageProps {
    pub mode: AuthMode,
}

#[function_component]
pub fn AuthPage(props: &AuthPageProps) -> Html {
    let navigator = use_navigator();
    let (state, _) = use_store::<State>();
    let mode = props.mode;

    use_title(match mode {
        AuthMode::Login => "Log in",
        AuthMode::CreateAccount => "Sign up",
    });

    // Already logged in: new accounts still need a username and gobi.
    {
        let navigator = navigator.clone();
        let profile_complete = state.profile().map(|p| p.is_complete());
        use_effect_with(profile_complete, move |complete| {
            let target = match complete {
                Some(true) => Route::Home,
                Some(false) => Route::Account,
                None => return,
            };
            if let Some(navigator) = navigator {
                navigator.push(&target);
            }
        });
    }

    let (title, description, other_text, other_link, other_route) = match mode {
        AuthMode::Login => (
            "Log in to Gobi",
            "Enter your email and password to continue",
            "Don't have an account?",
            "Sign up",
            Route::Signup,
        ),
        AuthMode::CreateAccount => (
            "Create your account",
            "You'll pick a username and gobi next",
            "Already have an account?",
            "Log in",
            Route::Login,
        ),
    };

    html! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="max-w-md w-full space-y-4">
                <div class="bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md">
                    <div class="mb-8 text-center">
                        <h1 class="text-2xl font-bold mb-2">{title}</h1>
                        <p class="text-neutral-600 dark:text-neutral-400">{description}</p>
                    </div>
                    <AuthForm {mode} />
                </div>
                <p class="text-center text-sm text-neutral-600 dark:text-neutral-400">
                    {other_text}{" "}
                    <Link<Route> to={other_route} classes="font-medium underline">
                        {other_link}
                    </Link<Route>>
                </p>
            </div>
        </div>
    }
}
