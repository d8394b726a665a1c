//! Search and profile commands.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use picfeed_bff::request::{ProfileLoadReq, SearchInputReq};
use picfeed_bff::state::{ListScope, PostList, ProfilePage, SearchState};
use tokio::sync::mpsc;

use super::posts::print_posts;
use super::{clip, Session};

/// Upper bound on waiting for a debounced search.
const SEARCH_WAIT: Duration = Duration::from_secs(15);

pub async fn search(session: &Session, query: &str) -> Result<()> {
    if query.trim().chars().count() < session.config.search_min_chars {
        bail!(
            "Search needs at least {} characters.",
            session.config.search_min_chars
        );
    }

    // Watch the state before typing so the loading edge cannot be missed.
    let (tx, rx) = mpsc::unbounded_channel();
    let watch = session.flux.subscribe(SearchState::PATH, move |_, value| {
        if let Some(state) = value.downcast_ref::<SearchState>() {
            let _ = tx.send(state.clone());
        }
    });
    session
        .flux
        .emit(SearchInputReq::PATH, SearchInputReq { text: query.into() })
        .await;
    let state = wait_for_results(rx).await;
    session.flux.unsubscribe(SearchState::PATH, watch);

    let state = state?;
    if let Some(error) = state.error {
        bail!("{error}");
    }

    if session.json {
        return session.print_json(&state.results);
    }
    if state.results.is_empty() {
        println!("No users match \"{}\".", query.trim());
        return Ok(());
    }
    println!("{:<8} {:<20} {:<24} {:>9}", "ID", "USERNAME", "NAME", "FOLLOWERS");
    for u in &state.results {
        println!(
            "{:<8} {:<20} {:<24} {:>9}",
            u.user_id,
            clip(&u.username, 20),
            clip(&u.name, 24),
            u.followers_count
        );
    }
    Ok(())
}

/// The search fires after the debounce; its answer is the first state
/// that clears `loading` after having set it.
async fn wait_for_results(mut rx: mpsc::UnboundedReceiver<SearchState>) -> Result<SearchState> {
    let answer = async {
        let mut started = false;
        while let Some(state) = rx.recv().await {
            if state.loading {
                started = true;
            } else if started {
                return Some(state);
            }
        }
        None
    };
    tokio::time::timeout(SEARCH_WAIT, answer)
        .await
        .context("Search timed out.")?
        .context("Search was abandoned.")
}

pub async fn profile(session: &Session, username: &str) -> Result<()> {
    session
        .flux
        .emit(
            ProfileLoadReq::PATH,
            ProfileLoadReq {
                username: username.into(),
            },
        )
        .await;

    let page: ProfilePage = session
        .flux
        .read(&ProfilePage::path_for(username.trim()))
        .unwrap_or_default();
    if let Some(error) = page.error {
        bail!("{error}");
    }
    let user = page.user.context("User not found")?;
    let posts: PostList = session
        .flux
        .read(&ListScope::user(username.trim()).path())
        .unwrap_or_default();

    if session.json {
        return session.print_json(&serde_json::json!({
            "profile": user,
            "isOwn": page.is_own,
            "isFollowing": page.is_following,
            "posts": posts.posts,
        }));
    }

    let relation = if page.is_own {
        "you"
    } else if page.is_following {
        "following"
    } else {
        "not following"
    };
    println!("Username:   {} ({relation})", user.username);
    println!("Name:       {}", user.name);
    println!("Posts:      {}", user.posts_count);
    println!("Followers:  {}", user.followers_count);
    println!("Following:  {}", user.following_count);
    println!(
        "Avatar:     {}",
        session.config.media().avatar(user.profile_image_url.as_deref())
    );
    if !user.bio.is_empty() {
        println!("Bio:        {}", user.bio);
    }
    println!();
    print_posts(session, &posts.posts);
    Ok(())
}
