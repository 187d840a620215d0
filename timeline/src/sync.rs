use std::fmt::{Debug, Display};
use std::future::Future;

/// Items with a stable identity, used to match revalidated entries against
/// the ones already on screen.
pub trait Identified {
    type Id: PartialEq + Clone + Debug;

    fn id(&self) -> Self::Id;
}

/// Source of pages for a feed.
///
/// Page 0 is the first `page_size` items of the ordering, page N the next
/// slice. Returning fewer than `page_size` items signals the end of the
/// collection. Errors are treated as retryable.
pub trait PageFetcher<T> {
    type Error: Display;

    fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<T>, Self::Error>>;
}

/// Result of [`ListSynchronizer::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The seed replaced the list and rewound pagination.
    Reset,
    /// The seed refreshed items already on screen; pagination untouched.
    Merged,
}

/// Permission to run one fetch, handed out by
/// [`ListSynchronizer::begin_load`] and returned to
/// [`ListSynchronizer::finish_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub page: u32,
    pub page_size: u32,
    generation: u64,
}

/// Result of a load attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome<E> {
    /// A fetch was already running or the list is exhausted.
    Skipped,
    /// This many items were appended.
    Appended(usize),
    /// The fetch returned nothing; the list is now exhausted.
    Exhausted,
    /// The list was reset while the fetch was in flight, so its result was
    /// dropped.
    Stale,
    /// The fetch failed. Nothing changed except that loading stopped.
    Failed(E),
}

/// Client-side view of an externally paginated, ordered collection.
///
/// Invariants:
/// - `items` holds no two entries with the same id, as long as the fetcher
///   returns non-overlapping pages.
/// - at most one fetch is outstanding; `is_loading` is true for exactly its
///   duration.
/// - once `has_more` is false no fetch starts until the list is reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSynchronizer<T> {
    items: Vec<T>,
    next_page: u32,
    is_loading: bool,
    has_more: bool,
    page_size: u32,
    /// Bumped on every reset so that responses to fetches issued before the
    /// reset can be recognized and discarded.
    generation: u64,
}

impl<T: Identified> ListSynchronizer<T> {
    /// An empty, exhausted list. Call [`seed`](Self::seed) to populate it.
    pub fn new(page_size: u32) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            items: Vec::new(),
            next_page: 1,
            is_loading: false,
            has_more: false,
            page_size,
            generation: 0,
        }
    }

    /// Build a list from the first page of a feed. `None` is treated as an
    /// empty page.
    pub fn with_seed(seed: Option<Vec<T>>, page_size: u32) -> Self {
        let mut sync = Self::new(page_size);
        sync.reset(seed.unwrap_or_default());
        sync
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// The page index the next fetch will request.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Apply a freshly produced first page.
    ///
    /// When the leading id matches what is already shown, the seed is a
    /// revalidation: items present in both are replaced by the seed's
    /// version and everything else is left alone, including items that
    /// only the seed contains. Otherwise (including an empty seed or an
    /// empty list) the seed replaces the list.
    ///
    /// Only the leading id is compared, so a different query whose first
    /// item happens to coincide will be merged rather than reset. Hosts that
    /// know the query changed should build a new synchronizer or call
    /// [`reset`](Self::reset).
    pub fn seed(&mut self, seed: Option<Vec<T>>) -> SeedOutcome {
        let seed = seed.unwrap_or_default();
        let same_leading_item = match (self.items.first(), seed.first()) {
            (Some(current), Some(incoming)) => current.id() == incoming.id(),
            _ => false,
        };

        if same_leading_item {
            self.merge(seed);
            SeedOutcome::Merged
        } else {
            self.reset(seed);
            SeedOutcome::Reset
        }
    }

    /// Replace the list with a new first page and rewind pagination.
    ///
    /// A fetch already in flight keeps `is_loading` set until it finishes,
    /// but its result will be discarded.
    pub fn reset(&mut self, first_page: Vec<T>) {
        self.has_more = first_page.len() == self.page_size as usize;
        self.items = first_page;
        self.next_page = 1;
        self.generation += 1;
    }

    fn merge(&mut self, seed: Vec<T>) {
        let mut incoming: Vec<Option<T>> = seed.into_iter().map(Some).collect();
        for item in self.items.iter_mut() {
            let id = item.id();
            let updated = incoming
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|new| new.id() == id))
                .and_then(Option::take);
            if let Some(updated) = updated {
                *item = updated;
            }
        }
    }

    /// Claim the right to fetch the next page.
    ///
    /// Returns `None` while another fetch is running or once the list is
    /// exhausted; a trigger that arrives then is simply dropped.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.is_loading || !self.has_more {
            return None;
        }
        self.is_loading = true;
        Some(LoadTicket {
            page: self.next_page,
            page_size: self.page_size,
            generation: self.generation,
        })
    }

    /// Apply the result of the fetch started by `ticket`.
    pub fn finish_load<E: Display>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<T>, E>,
    ) -> LoadOutcome<E> {
        self.is_loading = false;

        if ticket.generation != self.generation {
            tracing::debug!(
                page = ticket.page,
                "Dropping page fetched before the list was reset"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(batch) => {
                let count = batch.len();
                if count < self.page_size as usize {
                    self.has_more = false;
                }
                if count == 0 {
                    return LoadOutcome::Exhausted;
                }
                self.items.extend(batch);
                self.next_page += 1;
                LoadOutcome::Appended(count)
            }
            Err(e) => {
                tracing::warn!(page = ticket.page, "Failed to load page: {e}");
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Fetch and apply the next page, unless one is already loading or the
    /// list is exhausted.
    pub async fn load_more<F>(&mut self, fetcher: &F) -> LoadOutcome<F::Error>
    where
        F: PageFetcher<T>,
    {
        let Some(ticket) = self.begin_load() else {
            return LoadOutcome::Skipped;
        };
        let result = fetcher.fetch_page(ticket.page, ticket.page_size).await;
        self.finish_load(ticket, result)
    }
}
