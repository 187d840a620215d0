pub mod use_authentication;
pub mod use_busy_flag;
pub mod use_fetch;
pub mod use_logout;
pub mod use_post_feed;
pub mod use_public_profile;
pub mod use_title;
pub mod use_viewer_context;

pub use use_authentication::use_authentication;
pub use use_busy_flag::{BusyFlag, use_busy_flag};
pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_logout::use_logout;
pub use use_post_feed::{PostFeedHandle, use_post_feed};
pub use use_public_profile::use_public_profile;
pub use use_title::use_title;
pub use use_viewer_context::{ViewerContextHandle, use_viewer_context};

/// Distinguishes "not fetched yet" from "fetched, possibly empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }
}
