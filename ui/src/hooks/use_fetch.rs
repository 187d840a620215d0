use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use super::FetchState;

pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T: Clone> FetchHookReturn<T> {
    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// - No data + loading: "Loading {context}..."
    /// - No data + error: "Error loading {context}: ..."
    /// - Has data: `render_fn(data)`. Data from an earlier fetch stays on
    ///   screen while a refetch runs or after it fails.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T) -> Html,
    {
        match (self.data.as_ref(), &self.error) {
            (Some(data), _) => render_fn(data),
            (None, Some(error)) => html! {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border
                            border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">
                        {format!("Error loading {context}: {error}")}
                    </p>
                </div>
            },
            (None, None) => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("Loading {context}...")}
                    </p>
                </div>
            },
        }
    }
}

/// Generic fetch hook composer.
///
/// Fetches on mount and whenever `deps` changes. The fetch function captures
/// its inputs; `deps` is only used for change tracking.
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let data = use_state(|| FetchState::NotFetched);
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let refetch = {
        let data = data.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(deps.clone(), move |_: (), _| {
            let data = data.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            let fetch_fn = fetch_fn.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                match fetch_fn().await {
                    Ok(result) => {
                        data.set(FetchState::Fetched(result));
                        error.set(None);
                    }
                    Err(e) => error.set(Some(e)),
                }
                is_loading.set(false);
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(deps, move |_| refetch.emit(()));
    }

    FetchHookReturn {
        data: (*data).clone(),
        is_loading: *is_loading,
        error: (*error).clone(),
        refetch,
    }
}
