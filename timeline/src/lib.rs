//! Incremental list synchronization for infinite-scroll feeds.
//!
//! A feed starts from a seed page supplied by whoever renders the view, then
//! grows one page at a time as the viewer scrolls. [`ListSynchronizer`] owns
//! that state; [`PageFetcher`] is the seam through which it asks for more.
//! [`OptimisticToggle`] covers the like button's apply-then-confirm flow.

pub mod feed;
pub mod sync;
pub mod toggle;

pub use feed::{FeedFetcher, PostFeed};
pub use sync::{
    Identified, ListSynchronizer, LoadOutcome, LoadTicket, PageFetcher,
    SeedOutcome,
};
pub use toggle::{OptimisticToggle, ToggleOutcome, ToggleTicket};

pub use payloads::PAGE_SIZE;
