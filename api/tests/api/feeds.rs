use jiff::Span;
use payloads::{
    MAX_PAGE_SIZE, PAGE_SIZE, TimelineScope, requests,
    requests::PageRequest, responses::Post,
};
use reqwest::StatusCode;

use test_helpers::{assert_status_code, spawn_app};

fn ids(posts: &[Post]) -> Vec<i64> {
    posts.iter().map(|post| post.id.0).collect()
}

fn all(page: u32) -> requests::Timeline {
    requests::Timeline {
        scope: TimelineScope::All,
        page: PageRequest::new(page, PAGE_SIZE),
    }
}

#[tokio::test]
async fn timeline_pages_newest_first() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let created = app.create_numbered_posts(23).await?;
    let mut expected = ids(&created);
    expected.reverse();

    let first = app.client.timeline(&all(0)).await?;
    let second = app.client.timeline(&all(1)).await?;
    let third = app.client.timeline(&all(2)).await?;
    let fourth = app.client.timeline(&all(3)).await?;

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 10);
    assert_eq!(third.len(), 3);
    assert!(fourth.is_empty());

    let mut seen = ids(&first);
    seen.extend(ids(&second));
    seen.extend(ids(&third));
    assert_eq!(seen, expected);
    assert_eq!(first[0].content, "post 22 nya");

    Ok(())
}

#[tokio::test]
async fn same_timestamp_pages_do_not_overlap() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    // without advancing the clock every post shares one created_at
    for i in 0..15 {
        app.client
            .create_post(&requests::CreatePost {
                content: format!("tie {i} nya"),
            })
            .await?;
    }

    let first = app.client.timeline(&all(0)).await?;
    let second = app.client.timeline(&all(1)).await?;
    let mut seen = ids(&first);
    seen.extend(ids(&second));
    assert_eq!(seen.len(), 15);
    let mut sorted = seen.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    assert_eq!(seen, sorted);

    Ok(())
}

#[tokio::test]
async fn following_timeline_only_has_followed_users() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;
    let alice_post = app.post_with_gobi("from alice ").await?;
    app.create_bob_user().await?;
    app.post_with_gobi("from bob ").await?;

    app.create_charlie_user().await?;
    app.post_with_gobi("from charlie ").await?;

    let following = requests::Timeline {
        scope: TimelineScope::Following,
        page: PageRequest::first(),
    };
    assert!(app.client.timeline(&following).await?.is_empty());

    app.client.follow_user(&alice_id).await?;
    let posts = app.client.timeline(&following).await?;
    assert_eq!(ids(&posts), vec![alice_post.id.0]);

    // the all timeline still shows everyone
    assert_eq!(app.client.timeline(&all(0)).await?.len(), 3);

    Ok(())
}

#[tokio::test]
async fn user_posts_are_filtered_by_author() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;
    let alice_posts = app.create_numbered_posts(3).await?;
    let bob_id = app.create_bob_user().await?;
    app.create_numbered_posts(2).await?;

    let posts = app
        .client
        .user_posts(&requests::UserPosts {
            user_id: alice_id,
            page: PageRequest::first(),
        })
        .await?;
    let mut expected = ids(&alice_posts);
    expected.reverse();
    assert_eq!(ids(&posts), expected);
    assert!(posts.iter().all(|post| post.author.user_id == alice_id));

    let bobs = app
        .client
        .user_posts(&requests::UserPosts {
            user_id: bob_id,
            page: PageRequest::first(),
        })
        .await?;
    assert_eq!(bobs.len(), 2);

    Ok(())
}

#[tokio::test]
async fn liked_posts_most_recent_like_first() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let posts = app.create_numbered_posts(3).await?;

    let bob_id = app.create_bob_user().await?;
    // like the newest first, then the oldest
    app.client.like_post(&posts[2].id).await?;
    app.time_source.advance(Span::new().seconds(1));
    app.client.like_post(&posts[0].id).await?;

    let liked = app
        .client
        .liked_posts(&requests::LikedPosts {
            user_id: bob_id,
            page: PageRequest::first(),
        })
        .await?;
    assert_eq!(ids(&liked), vec![posts[0].id.0, posts[2].id.0]);
    assert!(liked.iter().all(|post| post.like_count == 1));

    Ok(())
}

#[tokio::test]
async fn search_is_case_insensitive_substring() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let cat = app.post_with_gobi("I saw a Cat today ").await?;
    app.post_with_gobi("dogs only ").await?;
    let cats = app.post_with_gobi("so many CATS ").await?;

    let results = app
        .client
        .search_posts(&requests::SearchPosts {
            query: "cat".into(),
            page: PageRequest::first(),
        })
        .await?;
    assert_eq!(ids(&results), vec![cats.id.0, cat.id.0]);

    Ok(())
}

#[tokio::test]
async fn search_matches_wildcards_literally() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let percent = app.post_with_gobi("100% sure ").await?;
    let underscore = app.post_with_gobi("snake_case ").await?;
    app.post_with_gobi("plain text ").await?;

    let search = |query: &str| requests::SearchPosts {
        query: query.into(),
        page: PageRequest::first(),
    };

    let results = app.client.search_posts(&search("%")).await?;
    assert_eq!(ids(&results), vec![percent.id.0]);

    let results = app.client.search_posts(&search("_")).await?;
    assert_eq!(ids(&results), vec![underscore.id.0]);

    // blank queries match nothing rather than everything
    assert!(app.client.search_posts(&search("")).await?.is_empty());
    assert!(app.client.search_posts(&search("   ")).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn invalid_page_sizes_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;

    for page_size in [0, MAX_PAGE_SIZE + 1] {
        let result = app
            .client
            .timeline(&requests::Timeline {
                scope: TimelineScope::All,
                page: PageRequest::new(0, page_size),
            })
            .await;
        assert_status_code(result, StatusCode::BAD_REQUEST);
    }

    app.client
        .timeline(&requests::Timeline {
            scope: TimelineScope::All,
            page: PageRequest::new(0, MAX_PAGE_SIZE),
        })
        .await?;

    Ok(())
}

#[tokio::test]
async fn feeds_require_login() -> anyhow::Result<()> {
    let app = spawn_app().await;
    assert_status_code(
        app.client.timeline(&all(0)).await,
        StatusCode::UNAUTHORIZED,
    );
    Ok(())
}
