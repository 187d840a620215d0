use payloads::{
    TimelineScope,
    responses::{Post, UserProfile},
};
use timeline::PostFeed;
use yew::prelude::*;
use yew_router::prelude::*;

use super::Tab;
use crate::Route;
use crate::components::{PostForm, PostList};
use crate::hooks::{use_post_feed, use_title, use_viewer_context};

#[derive(Properties, PartialEq)]
pub struct HomePageProps {
    pub profile: UserProfile,
}

#[function_component]
pub fn HomePage(props: &HomePageProps) -> Html {
    use_title("Home");
    let scope = use_state(|| TimelineScope::Following);
    let feed = use_post_feed(PostFeed::Timeline(*scope));
    let viewer = use_viewer_context();

    let select = |target: TimelineScope| {
        let scope = scope.clone();
        Callback::from(move |_: MouseEvent| scope.set(target))
    };

    let on_created = {
        let reload = feed.reload.clone();
        Callback::from(move |_: Post| reload.emit(()))
    };

    let composer = match &props.profile.gobi {
        Some(gobi) if props.profile.is_complete() => html! {
            <PostForm gobi={gobi.clone()} {on_created} />
        },
        _ => html! {
            <div class="p-4 rounded-md bg-yellow-50 dark:bg-yellow-900/20 border
                        border-yellow-200 dark:border-yellow-800 text-sm">
                {"Pick a username and gobi before you post. "}
                <Link<Route> to={Route::Account} classes="font-medium underline">
                    {"Finish your profile"}
                </Link<Route>>
            </div>
        },
    };

    let empty_message = match *scope {
        TimelineScope::Following => {
            "Nothing here yet. Follow someone to see their posts."
        }
        TimelineScope::All => "Nobody has posted yet.",
    };

    html! {
        <div class="space-y-4">
            {composer}
            <div class="flex border-b border-neutral-200 dark:border-neutral-700">
                <Tab
                    label="Following"
                    active={*scope == TimelineScope::Following}
                    onclick={select(TimelineScope::Following)}
                />
                <Tab
                    label="Everyone"
                    active={*scope == TimelineScope::All}
                    onclick={select(TimelineScope::All)}
                />
            </div>
            <div class="flex justify-end">
                <button
                    onclick={feed.revalidate.reform(|_| ())}
                    class="text-sm text-neutral-500 hover:underline"
                >
                    {"Refresh"}
                </button>
            </div>
            <PostList feed={feed} {viewer} {empty_message} />
        </div>
    }
}
