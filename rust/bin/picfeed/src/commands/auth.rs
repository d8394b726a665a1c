//! Login / whoami commands.

use std::path::Path;

use anyhow::{Context, Result};
use picfeed_bff::ClientConfig;

use super::Session;

/// Print the signed-in user.
pub fn whoami(session: &Session) -> Result<()> {
    let user = session
        .session()
        .user
        .context("Not signed in.")?;

    if session.json {
        return session.print_json(&user);
    }

    let avatar = session
        .config
        .media()
        .avatar_versioned(user.profile_image_url.as_deref(), session.session().avatar_version);
    println!("Username:   {}", user.username);
    println!("Name:       {}", user.name);
    println!("Email:      {}", user.email);
    println!("Verified:   {}", if user.is_account_verified { "yes" } else { "no" });
    println!("Posts:      {}", user.posts_count);
    println!("Followers:  {}", user.followers_count);
    println!("Following:  {}", user.following_count);
    println!("Avatar:     {avatar}");
    if !user.bio.is_empty() {
        println!("Bio:        {}", user.bio);
    }
    Ok(())
}

/// Save the login email for later commands.
pub fn remember(email: &str, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    if config.email.as_deref() == Some(email) {
        return Ok(());
    }
    config.email = Some(email.to_string());
    config.save(config_path)?;
    eprintln!("Email saved to {}.", config_path.display());
    Ok(())
}
