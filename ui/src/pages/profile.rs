use payloads::{UserId, responses::PublicProfile};
use timeline::PostFeed;
use yew::prelude::*;

use super::Tab;
use crate::components::{Avatar, FollowButton, PostList};
use crate::hooks::{
    ViewerContextHandle, use_post_feed, use_public_profile, use_title,
    use_viewer_context,
};

#[derive(Clone, Copy, PartialEq)]
enum ProfileTab {
    Posts,
    Likes,
}

#[derive(Properties, PartialEq)]
pub struct ProfilePageProps {
    pub user_id: UserId,
}

#[function_component]
pub fn ProfilePage(props: &ProfilePageProps) -> Html {
    let user_id = props.user_id;
    let tab = use_state(|| ProfileTab::Posts);
    let profile = use_public_profile(user_id);
    let viewer = use_viewer_context();
    let feed = use_post_feed(match *tab {
        ProfileTab::Posts => PostFeed::ByUser(user_id),
        ProfileTab::Likes => PostFeed::LikedBy(user_id),
    });

    let title = profile
        .data
        .as_ref()
        .and_then(|p| p.username.clone())
        .unwrap_or_else(|| "Profile".to_string());
    use_title(&title);

    // Following someone changes both our context and their counts.
    let on_follow_change = {
        let refresh_viewer = viewer.refresh.clone();
        let refetch_profile = profile.refetch.clone();
        Callback::from(move |_: ()| {
            refresh_viewer.emit(());
            refetch_profile.emit(());
        })
    };

    let select = |target: ProfileTab| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(target))
    };

    let header = profile.render("profile", |public| {
        profile_header(public, &viewer, on_follow_change.clone())
    });

    html! {
        <div class="space-y-4">
            {header}
            <div class="flex border-b border-neutral-200 dark:border-neutral-700">
                <Tab
                    label="Posts"
                    active={*tab == ProfileTab::Posts}
                    onclick={select(ProfileTab::Posts)}
                />
                <Tab
                    label="Likes"
                    active={*tab == ProfileTab::Likes}
                    onclick={select(ProfileTab::Likes)}
                />
            </div>
            <PostList
                {feed}
                {viewer}
                empty_message={match *tab {
                    ProfileTab::Posts => "No posts yet.",
                    ProfileTab::Likes => "No liked posts yet.",
                }}
            />
        </div>
    }
}

fn profile_header(
    profile: &PublicProfile,
    viewer: &ViewerContextHandle,
    on_follow_change: Callback<()>,
) -> Html {
    html! {
        <div class="flex items-center space-x-4">
            <Avatar
                user_id={profile.user_id}
                username={profile.username.clone()}
                avatar_updated_at={profile.avatar_updated_at}
                large=true
            />
            <div class="flex-1 min-w-0">
                <h1 class="text-xl font-bold truncate">
                    {profile.username.clone().unwrap_or_else(|| "unnamed".into())}
                </h1>
                if let Some(gobi) = &profile.gobi {
                    <p class="text-sm text-neutral-600 dark:text-neutral-400">
                        {format!("Ends every post with \"{gobi}\"")}
                    </p>
                }
                <p class="mt-1 text-sm space-x-4">
                    <span><strong>{profile.following_count}</strong>{" following"}</span>
                    <span><strong>{profile.follower_count}</strong>{" followers"}</span>
                </p>
            </div>
            if !viewer.is_own(&profile.user_id) {
                <FollowButton
                    user_id={profile.user_id}
                    following={viewer.is_following(&profile.user_id)}
                    on_change={on_follow_change}
                />
            }
        </div>
    }
}
