use payloads::responses::Post;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::{Avatar, DeletePostButton, LikeButton, TimestampDisplay};
use crate::hooks::ViewerContextHandle;

#[derive(Properties, PartialEq)]
pub struct PostCardProps {
    pub post: Post,
    pub viewer: ViewerContextHandle,
    pub on_deleted: Callback<()>,
}

#[function_component]
pub fn PostCard(props: &PostCardProps) -> Html {
    let post = &props.post;
    let author = &post.author;
    let profile_route = Route::Profile {
        user_id: author.user_id,
    };

    html! {
        <article class="flex space-x-3 py-4 border-b border-neutral-200 dark:border-neutral-700">
            <Link<Route> to={profile_route.clone()}>
                <Avatar
                    user_id={author.user_id}
                    username={author.username.clone()}
                    avatar_updated_at={author.avatar_updated_at}
                />
            </Link<Route>>
            <div class="flex-1 min-w-0">
                <div class="flex items-baseline space-x-2">
                    <Link<Route> to={profile_route} classes="font-medium hover:underline">
                        {author.username.clone().unwrap_or_else(|| "unnamed".into())}
                    </Link<Route>>
                    <TimestampDisplay timestamp={post.created_at} />
                </div>
                <p class="mt-1 whitespace-pre-wrap break-words">{&post.content}</p>
                <div class="mt-2 flex items-center space-x-6">
                    <LikeButton
                        post_id={post.id}
                        liked={props.viewer.has_liked(&post.id)}
                        like_count={post.like_count}
                        on_change={props.viewer.set_liked.clone()}
                    />
                    if props.viewer.is_own(&author.user_id) {
                        <DeletePostButton
                            post_id={post.id}
                            on_deleted={props.on_deleted.clone()}
                        />
                    }
                </div>
            </div>
        </article>
    }
}
