//! Feed, like and save commands.

use anyhow::{bail, Result};
use picfeed_bff::display::relative_time;
use picfeed_bff::request::{PostLikeReq, PostSaveReq, PostsLoadReq};
use picfeed_bff::state::{ListScope, PostList};
use picfeed_client::{Post, PostId};

use super::{clip, Session};

async fn load_feed(session: &Session) -> Result<PostList> {
    session
        .flux
        .emit(PostsLoadReq::PATH, PostsLoadReq { scope: ListScope::Feed })
        .await;
    let list: PostList = session.flux.read(&ListScope::Feed.path()).unwrap_or_default();
    if let Some(error) = list.error {
        bail!("{error}");
    }
    Ok(list)
}

pub async fn feed(session: &Session) -> Result<()> {
    let list = load_feed(session).await?;
    if session.json {
        return session.print_json(&list.posts);
    }
    print_posts(session, &list.posts);
    Ok(())
}

pub fn print_posts(session: &Session, posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts.");
        return;
    }
    let now = chrono::Utc::now();
    let media = session.config.media();
    println!(
        "{:<8} {:<16} {:>6} {:>6} {:>5}  {:<10} {:<32} IMAGE",
        "ID", "AUTHOR", "LIKES", "SAVES", "CMTS", "WHEN", "CAPTION"
    );
    for p in posts {
        let when = p
            .created_at
            .as_deref()
            .map(|at| relative_time(at, now))
            .unwrap_or_else(|| "-".into());
        let liked = if p.is_liked_by_current_user { "*" } else { " " };
        let saved = if p.is_saved_by_current_user { "*" } else { " " };
        println!(
            "{:<8} {:<16} {:>5}{} {:>5}{} {:>5}  {:<10} {:<32} {}",
            p.post_id,
            clip(&p.username, 16),
            p.like_count,
            liked,
            p.save_count,
            saved,
            p.comment_count,
            when,
            clip(&p.caption.replace('\n', " "), 32),
            media.image(p.image_url.as_deref()),
        );
    }
}

pub async fn like(session: &Session, post_id: PostId) -> Result<()> {
    find_in_feed(session, post_id).await?;
    let req = PostLikeReq {
        scope: ListScope::Feed,
        post_id,
    };
    session.flux.emit(PostLikeReq::PATH, req).await;
    report(session, post_id, |p| (p.is_liked_by_current_user, p.like_count), ("Liked", "Unliked"))
}

pub async fn save(session: &Session, post_id: PostId) -> Result<()> {
    let before = find_in_feed(session, post_id).await?;
    let req = PostSaveReq {
        scope: ListScope::Feed,
        post_id,
    };
    session.flux.emit(PostSaveReq::PATH, req).await;
    tracing::debug!(post_id, was_saved = before.is_saved_by_current_user, "save toggled");
    report(session, post_id, |p| (p.is_saved_by_current_user, p.save_count), ("Saved", "Unsaved"))
}

/// Posts can only be toggled where they are shown; the CLI uses the feed.
async fn find_in_feed(session: &Session, post_id: PostId) -> Result<Post> {
    let list = load_feed(session).await?;
    match list.posts.into_iter().find(|p| p.post_id == post_id) {
        Some(post) => Ok(post),
        None => bail!("Post {post_id} is not in your feed."),
    }
}

fn report(
    session: &Session,
    post_id: PostId,
    flag: impl Fn(&Post) -> (bool, u64),
    (on, off): (&str, &str),
) -> Result<()> {
    let list: PostList = session.flux.read(&ListScope::Feed.path()).unwrap_or_default();
    let post = list
        .posts
        .iter()
        .find(|p| p.post_id == post_id)
        .ok_or_else(|| anyhow::anyhow!("Post {post_id} disappeared from the feed."))?;
    let (active, count) = flag(post);

    if session.json {
        return session.print_json(&serde_json::json!({
            "postId": post_id,
            "active": active,
            "count": count,
            "notice": session.last_notice(),
        }));
    }

    if let Some(notice) = session.last_notice() {
        eprintln!("{notice}");
    }
    println!("{} post {post_id} ({count}).", if active { on } else { off });
    Ok(())
}
