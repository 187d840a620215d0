//! Infinite feeds backed by a [`ListSynchronizer`].
//!
//! One synchronizer exists per [`PostFeed`]. When the feed changes (a new
//! search query, a different profile tab) the old synchronizer is dropped
//! and a fresh one is seeded, so a query switch never depends on the
//! leading-id heuristic in `seed`.

use payloads::{PAGE_SIZE, responses::Post};
use std::cell::RefCell;
use std::rc::Rc;
use timeline::{
    FeedFetcher, ListSynchronizer, LoadOutcome, PageFetcher, PostFeed,
    SeedOutcome,
};
use yew::prelude::*;

use crate::get_api_client;

struct FeedSlot {
    feed: PostFeed,
    /// Bumped whenever the synchronizer is replaced. Responses carry the
    /// epoch they were issued under and are dropped on mismatch.
    epoch: u64,
    sync: ListSynchronizer<Post>,
    seeded: bool,
}

impl FeedSlot {
    fn new(feed: PostFeed, epoch: u64) -> Self {
        Self {
            feed,
            epoch,
            sync: ListSynchronizer::new(PAGE_SIZE),
            seeded: false,
        }
    }
}

type SharedSlot = Rc<RefCell<FeedSlot>>;

#[derive(Clone, Copy, PartialEq)]
enum SeedMode {
    /// Throw away what is shown, e.g. after a post was added or removed.
    Reset,
    /// Refresh what is shown and keep scroll position.
    Revalidate,
}

#[derive(Clone, PartialEq)]
pub struct PostFeedHandle {
    pub posts: Vec<Post>,
    /// False until the first page has arrived.
    pub is_seeded: bool,
    pub is_loading: bool,
    pub has_more: bool,
    pub error: Option<String>,
    /// Fetch the next page. Dropped while a fetch is running or once the
    /// feed is exhausted.
    pub load_more: Callback<()>,
    /// Refetch the first page and start over.
    pub reload: Callback<()>,
    /// Refetch the first page, updating posts already on screen.
    pub revalidate: Callback<()>,
}

fn spawn_seed(
    slot: SharedSlot,
    mode: SeedMode,
    error: UseStateHandle<Option<String>>,
    update: UseForceUpdateHandle,
) {
    let (feed, epoch) = {
        let slot = slot.borrow();
        (slot.feed.clone(), slot.epoch)
    };
    yew::platform::spawn_local(async move {
        let fetcher = FeedFetcher::new(get_api_client(), feed);
        let result = fetcher.first_page().await;

        let mut slot = slot.borrow_mut();
        if slot.epoch != epoch {
            return;
        }
        match result {
            Ok(page) => {
                let outcome = match mode {
                    SeedMode::Reset => {
                        slot.sync.reset(page);
                        SeedOutcome::Reset
                    }
                    SeedMode::Revalidate => slot.sync.seed(Some(page)),
                };
                tracing::debug!(feed = ?slot.feed, ?outcome, "Seeded feed");
                error.set(None);
            }
            Err(e) => {
                tracing::warn!(feed = ?slot.feed, "Could not load feed: {e}");
                error.set(Some(e.to_string()));
            }
        }
        slot.seeded = true;
        drop(slot);
        update.force_update();
    });
}

#[hook]
pub fn use_post_feed(feed: PostFeed) -> PostFeedHandle {
    let slot: SharedSlot = {
        let feed = feed.clone();
        use_memo((), move |_| RefCell::new(FeedSlot::new(feed, 0)))
    };
    let error = use_state(|| None::<String>);
    let update = use_force_update();

    {
        let slot = slot.clone();
        let error = error.clone();
        let update = update.clone();
        use_effect_with(feed, move |feed| {
            {
                let mut current = slot.borrow_mut();
                let epoch = current.epoch + 1;
                *current = FeedSlot::new(feed.clone(), epoch);
            }
            error.set(None);
            spawn_seed(slot, SeedMode::Reset, error, update.clone());
            update.force_update();
        });
    }

    let load_more = {
        let slot = slot.clone();
        let error = error.clone();
        let update = update.clone();
        use_callback((), move |_: (), _| {
            let (ticket, feed, epoch) = {
                let mut current = slot.borrow_mut();
                let Some(ticket) = current.sync.begin_load() else {
                    return;
                };
                (ticket, current.feed.clone(), current.epoch)
            };
            update.force_update();

            let slot = slot.clone();
            let error = error.clone();
            let update = update.clone();
            yew::platform::spawn_local(async move {
                let fetcher = FeedFetcher::new(get_api_client(), feed);
                let result =
                    fetcher.fetch_page(ticket.page, ticket.page_size).await;

                let mut current = slot.borrow_mut();
                if current.epoch != epoch {
                    return;
                }
                match current.sync.finish_load(ticket, result) {
                    LoadOutcome::Failed(e) => error.set(Some(e.to_string())),
                    outcome => {
                        tracing::debug!(?outcome, "Loaded page {}", ticket.page);
                        error.set(None);
                    }
                }
                drop(current);
                update.force_update();
            });
        })
    };

    let reseed = |mode: SeedMode| {
        let slot = slot.clone();
        let error = error.clone();
        let update = update.clone();
        Callback::from(move |_: ()| {
            spawn_seed(slot.clone(), mode, error.clone(), update.clone());
        })
    };
    let reload = reseed(SeedMode::Reset);
    let revalidate = reseed(SeedMode::Revalidate);

    let current = slot.borrow();
    PostFeedHandle {
        posts: current.sync.items().to_vec(),
        is_seeded: current.seeded,
        is_loading: current.sync.is_loading(),
        has_more: current.sync.has_more(),
        error: (*error).clone(),
        load_more,
        reload,
        revalidate,
    }
}
