use crate::sync::{Identified, PageFetcher};
use payloads::{
    APIClient, ClientError, PostId, TimelineScope, UserId,
    requests::{self, PageRequest},
    responses::Post,
};
use std::future::Future;

impl Identified for Post {
    type Id = PostId;

    fn id(&self) -> PostId {
        self.id
    }
}

/// Which ordered collection of posts a list shows.
///
/// Two feeds that compare equal return the same collection, so hosts can
/// use this as the identity of a synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostFeed {
    Timeline(TimelineScope),
    ByUser(UserId),
    LikedBy(UserId),
    Search(String),
}

/// Fetches pages of a [`PostFeed`] from the api.
#[derive(Clone)]
pub struct FeedFetcher {
    client: APIClient,
    feed: PostFeed,
}

impl FeedFetcher {
    pub fn new(client: APIClient, feed: PostFeed) -> Self {
        Self { client, feed }
    }

    pub fn feed(&self) -> &PostFeed {
        &self.feed
    }

    pub async fn fetch(&self, page: PageRequest) -> Result<Vec<Post>, ClientError> {
        match &self.feed {
            PostFeed::Timeline(scope) => {
                self.client
                    .timeline(&requests::Timeline {
                        scope: *scope,
                        page,
                    })
                    .await
            }
            PostFeed::ByUser(user_id) => {
                self.client
                    .user_posts(&requests::UserPosts {
                        user_id: *user_id,
                        page,
                    })
                    .await
            }
            PostFeed::LikedBy(user_id) => {
                self.client
                    .liked_posts(&requests::LikedPosts {
                        user_id: *user_id,
                        page,
                    })
                    .await
            }
            PostFeed::Search(query) => {
                self.client
                    .search_posts(&requests::SearchPosts {
                        query: query.clone(),
                        page,
                    })
                    .await
            }
        }
    }

    /// The seed page for a new synchronizer.
    pub async fn first_page(&self) -> Result<Vec<Post>, ClientError> {
        self.fetch(PageRequest::first()).await
    }
}

impl PageFetcher<Post> for FeedFetcher {
    type Error = ClientError;

    fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<Post>, ClientError>> {
        self.fetch(PageRequest::new(page, page_size))
    }
}
