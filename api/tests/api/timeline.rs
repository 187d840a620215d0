//! The client-side synchronizer driven against a live api.

use payloads::{PAGE_SIZE, TimelineScope, requests, responses::Post};
use timeline::{
    FeedFetcher, ListSynchronizer, LoadOutcome, OptimisticToggle, PostFeed,
    SeedOutcome, ToggleOutcome,
};

use test_helpers::spawn_app;

fn ids(posts: &[Post]) -> Vec<i64> {
    posts.iter().map(|post| post.id.0).collect()
}

#[tokio::test]
async fn scroll_to_the_end_of_the_timeline() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let created = app.create_numbered_posts(23).await?;
    let mut expected = ids(&created);
    expected.reverse();

    let fetcher = FeedFetcher::new(
        app.client.clone(),
        PostFeed::Timeline(TimelineScope::All),
    );
    let seed = fetcher.first_page().await?;
    let mut sync = ListSynchronizer::with_seed(Some(seed), PAGE_SIZE);
    assert_eq!(sync.items().len(), 10);
    assert!(sync.has_more());

    assert!(matches!(
        sync.load_more(&fetcher).await,
        LoadOutcome::Appended(10)
    ));
    assert!(matches!(
        sync.load_more(&fetcher).await,
        LoadOutcome::Appended(3)
    ));
    assert!(!sync.has_more());
    assert!(matches!(sync.load_more(&fetcher).await, LoadOutcome::Skipped));

    assert_eq!(ids(sync.items()), expected);

    Ok(())
}

#[tokio::test]
async fn revalidation_merges_new_like_counts() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let created = app.create_numbered_posts(15).await?;

    let fetcher = FeedFetcher::new(
        app.client.clone(),
        PostFeed::Timeline(TimelineScope::All),
    );
    let mut sync =
        ListSynchronizer::with_seed(Some(fetcher.first_page().await?), PAGE_SIZE);
    sync.load_more(&fetcher).await;
    assert_eq!(sync.items().len(), 15);

    // someone likes the newest post; a re-render hands over a fresh seed
    app.create_bob_user().await?;
    let newest = &created[14];
    app.client.like_post(&newest.id).await?;

    let outcome = sync.seed(Some(fetcher.first_page().await?));
    assert_eq!(outcome, SeedOutcome::Merged);
    assert_eq!(sync.items().len(), 15);
    assert_eq!(sync.items()[0].id, newest.id);
    assert_eq!(sync.items()[0].like_count, 1);
    assert_eq!(sync.next_page(), 2);

    Ok(())
}

#[tokio::test]
async fn new_post_at_the_top_resets() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    app.create_numbered_posts(12).await?;

    let fetcher = FeedFetcher::new(
        app.client.clone(),
        PostFeed::Timeline(TimelineScope::All),
    );
    let mut sync =
        ListSynchronizer::with_seed(Some(fetcher.first_page().await?), PAGE_SIZE);
    sync.load_more(&fetcher).await;

    let fresh = app.post_with_gobi("breaking news ").await?;
    let outcome = sync.seed(Some(fetcher.first_page().await?));
    assert_eq!(outcome, SeedOutcome::Reset);
    assert_eq!(sync.items()[0].id, fresh.id);
    assert_eq!(sync.items().len(), 10);
    assert_eq!(sync.next_page(), 1);

    Ok(())
}

#[tokio::test]
async fn search_feed_pages() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    for i in 0..12 {
        app.post_with_gobi(&format!("needle {i} ")).await?;
    }
    app.post_with_gobi("haystack ").await?;

    let fetcher = FeedFetcher::new(
        app.client.clone(),
        PostFeed::Search("NEEDLE".into()),
    );
    let mut sync =
        ListSynchronizer::with_seed(Some(fetcher.first_page().await?), PAGE_SIZE);
    assert!(matches!(
        sync.load_more(&fetcher).await,
        LoadOutcome::Appended(2)
    ));
    assert!(!sync.has_more());
    assert!(sync.items().iter().all(|post| post.content.contains("needle")));

    Ok(())
}

#[tokio::test]
async fn like_button_rolls_back_on_failure() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let post = app.post_with_gobi("like me ").await?;
    app.create_bob_user().await?;

    let mut toggle = OptimisticToggle::new(false, post.like_count);
    let client = app.client.clone();
    let outcome = toggle
        .toggle(|like| async move {
            if like {
                client.like_post(&post.id).await
            } else {
                client.unlike_post(&post.id).await
            }
        })
        .await;
    assert!(matches!(outcome, ToggleOutcome::Committed(true)));
    assert_eq!(toggle.count(), 1);

    // liking a deleted post fails, so the toggle rolls back
    app.login_alice().await?;
    app.client.delete_post(&post.id).await?;
    app.login_bob().await?;

    let mut toggle = OptimisticToggle::new(false, 0);
    let client = app.client.clone();
    let outcome = toggle
        .toggle(|_| async move { client.like_post(&post.id).await })
        .await;
    assert!(matches!(outcome, ToggleOutcome::RolledBack(_)));
    assert!(!toggle.active());
    assert_eq!(toggle.count(), 0);

    Ok(())
}

#[tokio::test]
async fn user_and_liked_feeds() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;
    let posts = app.create_numbered_posts(4).await?;
    let bob_id = app.create_bob_user().await?;
    app.client.like_post(&posts[1].id).await?;

    let by_alice = FeedFetcher::new(app.client.clone(), PostFeed::ByUser(alice_id));
    assert_eq!(by_alice.first_page().await?.len(), 4);

    let liked_by_bob =
        FeedFetcher::new(app.client.clone(), PostFeed::LikedBy(bob_id));
    let liked = liked_by_bob.first_page().await?;
    assert_eq!(ids(&liked), vec![posts[1].id.0]);

    // sanity check that the fetcher's page maps onto the request
    let direct = app
        .client
        .user_posts(&requests::UserPosts {
            user_id: alice_id,
            page: requests::PageRequest::new(1, 3),
        })
        .await?;
    assert_eq!(ids(&direct), vec![posts[0].id.0]);

    Ok(())
}
