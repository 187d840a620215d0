use payloads::{APIClient, UserId, responses::UserProfile};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod state;

pub use state::{AuthState, State};

use components::{RequireAuth, layout::MainLayout, toast::ToastContainer};
use contexts::toast::ToastProvider;
use hooks::use_authentication;
use pages::{
    AccountPage, AuthMode, AuthPage, HomePage, NotFoundPage, ProfilePage,
    SearchPage,
};

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| web_sys::window()?.location().origin().ok())
        .unwrap_or_default();

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <BrowserRouter>
            <ToastProvider>
                <AppShell />
            </ToastProvider>
        </BrowserRouter>
    }
}

/// Runs the session check once and lays out every page.
#[function_component]
fn AppShell() -> Html {
    use_authentication();
    html! {
        <MainLayout>
            <Switch<Route> render={switch} />
            <ToastContainer />
        </MainLayout>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/profile/:user_id")]
    Profile { user_id: UserId },
    #[at("/search")]
    Search,
    #[at("/account/profile")]
    Account,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! {
            <RequireAuth render={Callback::from(|profile: UserProfile| html! {
                <HomePage {profile} />
            })} />
        },
        Route::Login => html! { <AuthPage mode={AuthMode::Login} /> },
        Route::Signup => html! { <AuthPage mode={AuthMode::CreateAccount} /> },
        Route::Profile { user_id } => html! {
            <RequireAuth>
                <ProfilePage {user_id} />
            </RequireAuth>
        },
        Route::Search => html! {
            <RequireAuth>
                <SearchPage />
            </RequireAuth>
        },
        Route::Account => html! {
            <RequireAuth render={Callback::from(|profile: UserProfile| html! {
                <AccountPage {profile} />
            })} />
        },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
