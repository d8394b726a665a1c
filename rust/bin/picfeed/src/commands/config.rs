//! Config commands.

use std::path::Path;

use anyhow::{bail, Result};
use picfeed_bff::ClientConfig;

/// Print the effective configuration (file, env and flags applied).
pub fn show(config: &ClientConfig, config_path: &Path, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }
    println!("Config:     {}", config_path.display());
    println!("Backend:    {}", config.backend_url);
    println!("Media:      {}", config.media_origin());
    println!("Debounce:   {} ms", config.search_debounce_ms);
    println!("Min chars:  {}", config.search_min_chars);
    println!("Email:      {}", config.email.as_deref().unwrap_or("-"));
    Ok(())
}

pub fn set_server(url: &str, config_path: &Path) -> Result<()> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("Server URL must start with http:// or https://.");
    }
    let mut config = ClientConfig::load(config_path)?;
    config.backend_url = url.to_string();
    config.save(config_path)?;
    println!("Backend set to {url}.");
    Ok(())
}
