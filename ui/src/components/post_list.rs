use yew::prelude::*;

use crate::components::{FeedSentinel, PostCard};
use crate::hooks::{PostFeedHandle, ViewerContextHandle};

#[derive(Properties, PartialEq)]
pub struct PostListProps {
    pub feed: PostFeedHandle,
    pub viewer: ViewerContextHandle,
    /// Shown when the feed has no posts at all.
    pub empty_message: AttrValue,
}

/// Renders a feed with an infinite-scroll sentinel under the last post.
#[function_component]
pub fn PostList(props: &PostListProps) -> Html {
    let feed = &props.feed;

    if !feed.is_seeded || !props.viewer.is_loaded {
        return html! {
            <p class="text-center py-8 text-neutral-500 dark:text-neutral-400">
                {"Loading posts..."}
            </p>
        };
    }

    let on_deleted = feed.reload.clone();
    let load_more = feed.load_more.clone();
    // A failed first page leaves nothing to append to.
    let retry = if feed.posts.is_empty() {
        feed.reload.clone()
    } else {
        load_more.clone()
    };

    html! {
        <div>
            if feed.posts.is_empty() && feed.error.is_none() {
                <p class="text-center py-8 text-neutral-500 dark:text-neutral-400">
                    {&props.empty_message}
                </p>
            }
            {for feed.posts.iter().map(|post| html! {
                <PostCard
                    key={post.id.0.to_string()}
                    post={post.clone()}
                    viewer={props.viewer.clone()}
                    on_deleted={on_deleted.clone()}
                />
            })}
            if let Some(error) = &feed.error {
                <div class="py-4 text-center space-y-2">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                    <button
                        onclick={retry.reform(|_| ())}
                        class="text-sm underline"
                    >
                        {"Try again"}
                    </button>
                </div>
            }
            if feed.has_more {
                <FeedSentinel
                    on_visible={load_more.clone()}
                    loading={feed.is_loading}
                    failed={feed.error.is_some()}
                />
                if feed.is_loading {
                    <p class="text-center py-4 text-sm text-neutral-500">{"Loading more..."}</p>
                } else {
                    <div class="text-center py-4">
                        <button onclick={load_more.reform(|_| ())} class="text-sm underline">
                            {"Load more"}
                        </button>
                    </div>
                }
            }
        </div>
    }
}
