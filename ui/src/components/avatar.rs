use jiff::Timestamp;
use payloads::UserId;
use yew::prelude::*;

use crate::get_api_client;

#[derive(Properties, PartialEq)]
pub struct AvatarProps {
    pub user_id: UserId,
    pub username: Option<String>,
    pub avatar_updated_at: Option<Timestamp>,
    #[prop_or_default]
    pub small: bool,
    #[prop_or_default]
    pub large: bool,
}

/// A user's uploaded avatar, or their initial on a grey circle.
#[function_component]
pub fn Avatar(props: &AvatarProps) -> Html {
    let size = if props.large {
        "w-20 h-20 text-2xl"
    } else if props.small {
        "w-8 h-8 text-sm"
    } else {
        "w-10 h-10 text-base"
    };

    match &props.avatar_updated_at {
        Some(updated_at) => {
            let src = get_api_client().avatar_url(&props.user_id, updated_at);
            html! {
                <img
                    {src}
                    alt={props.username.clone().unwrap_or_default()}
                    class={classes!(size, "rounded-full", "object-cover")}
                />
            }
        }
        None => {
            let initial = props
                .username
                .as_deref()
                .and_then(|name| name.chars().next())
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string());
            html! {
                <div class={classes!(
                    size,
                    "rounded-full", "flex", "items-center", "justify-center", "font-medium",
                    "bg-neutral-200", "dark:bg-neutral-700", "text-neutral-600", "dark:text-neutral-300"
                )}>
                    {initial}
                </div>
            }
        }
    }
}
