use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FeedSentinelProps {
    /// Fired when the sentinel comes into view, and again whenever a load
    /// finishes cleanly while it is still in view. The first callback passed
    /// is the one the observer holds, so it should be stable.
    pub on_visible: Callback<()>,
    /// A page fetch is in flight.
    pub loading: bool,
    /// The last fetch failed. A failed load does not re-fire on its own.
    #[prop_or_default]
    pub failed: bool,
}

/// Last visibility reported by the observer.
///
/// The observer only delivers entries when the intersection changes, so a
/// sentinel that stays in view after a page lands produces no new entry.
/// `load_settled` covers that case.
#[derive(Debug, Default)]
pub struct SentinelVisibility {
    visible: Cell<bool>,
}

impl SentinelVisibility {
    /// Records an observer report. True on a hidden to visible transition.
    pub fn report(&self, visible: bool) -> bool {
        let was_visible = self.visible.replace(visible);
        visible && !was_visible
    }

    /// True when no load is running, the last one succeeded, and the
    /// sentinel is still in view.
    pub fn load_settled(&self, loading: bool, failed: bool) -> bool {
        !loading && !failed && self.visible.get()
    }
}

/// An empty element at the bottom of a feed that asks for the next page while
/// it is in view.
#[function_component]
pub fn FeedSentinel(props: &FeedSentinelProps) -> Html {
    let node = use_node_ref();
    let visibility = use_memo((), |_| SentinelVisibility::default());

    {
        let on_visible = props.on_visible.clone();
        let visibility = visibility.clone();
        use_effect_with(node.clone(), move |node| {
            let reports = visibility.clone();
            let callback = Closure::<dyn FnMut(js_sys::Array)>::new(
                move |entries: js_sys::Array| {
                    let visible = entries.iter().any(|entry| {
                        entry
                            .unchecked_into::<IntersectionObserverEntry>()
                            .is_intersecting()
                    });
                    if reports.report(visible) {
                        on_visible.emit(());
                    }
                },
            );

            let options = IntersectionObserverInit::new();
            options.set_root_margin("200px");
            let observer = match IntersectionObserver::new_with_options(
                callback.as_ref().unchecked_ref(),
                &options,
            ) {
                Ok(observer) => Some(observer),
                Err(e) => {
                    tracing::error!("Could not create IntersectionObserver: {e:?}");
                    None
                }
            };
            if let (Some(observer), Some(element)) =
                (&observer, node.cast::<web_sys::Element>())
            {
                observer.observe(&element);
            }

            move || {
                if let Some(observer) = observer {
                    observer.disconnect();
                }
                visibility.report(false);
                drop(callback);
            }
        });
    }

    {
        let on_visible = props.on_visible.clone();
        let failed = props.failed;
        use_effect_with(props.loading, move |loading| {
            if visibility.load_settled(*loading, failed) {
                on_visible.emit(());
            }
        });
    }

    html! { <div ref={node} class="h-px" aria-hidden="true"></div> }
}
