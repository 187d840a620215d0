pub mod auth_form;
pub mod avatar;
pub mod avatar_upload;
pub mod delete_post_button;
pub mod feed_sentinel;
pub mod follow_button;
pub mod layout;
pub mod like_button;
pub mod post_card;
pub mod post_form;
pub mod post_list;
pub mod require_auth;
pub mod timestamp_display;
pub mod toast;

pub use auth_form::{AuthForm, AuthMode};
pub use avatar::Avatar;
pub use avatar_upload::AvatarUpload;
pub use delete_post_button::DeletePostButton;
pub use feed_sentinel::FeedSentinel;
pub use follow_button::FollowButton;
pub use like_button::LikeButton;
pub use post_card::PostCard;
pub use post_form::PostForm;
pub use post_list::PostList;
pub use require_auth::RequireAuth;
pub use timestamp_display::TimestampDisplay;
