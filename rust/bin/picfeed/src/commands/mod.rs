//! Command implementations.

pub mod auth;
pub mod config;
pub mod posts;
pub mod users;

use std::sync::Arc;

use anyhow::{bail, Result};
use picfeed_bff::request::{LoginReq, SessionBootReq};
use picfeed_bff::state::{AuthForm, Notices, SessionState};
use picfeed_bff::{ClientConfig, PicfeedBff};
use picfeed_client::HttpApi;
use picfeed_flux::Flux;
use serde::Serialize;

/// Credentials given on the command line.
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// One process-lifetime session: the cookie jar lives in the HTTP client,
/// so every command signs in first.
pub struct Session {
    pub flux: Flux,
    pub config: ClientConfig,
    pub json: bool,
}

impl Session {
    pub fn open(config: ClientConfig, json: bool) -> Result<Self> {
        tracing::debug!(backend = %config.backend_url, "opening session");
        let api = HttpApi::new(&config.backend_url)?;
        let flux = Flux::new();
        PicfeedBff::new(Arc::new(api), &config).register(&flux);
        Ok(Self { flux, config, json })
    }

    /// Boot, then log in unless the boot check already found a session.
    /// Returns the email used.
    pub async fn sign_in(&mut self, credentials: Credentials) -> Result<String> {
        self.flux.emit(SessionBootReq::PATH, SessionBootReq).await;
        if let Some(user) = self.session().user {
            return Ok(user.email);
        }

        let email = match credentials.email.or_else(|| self.config.email.clone()) {
            Some(email) => email,
            None => prompt("Email: ")?,
        };
        if email.is_empty() {
            bail!("Email cannot be empty.");
        }
        let password = match credentials.password {
            Some(p) => p,
            None => rpassword::prompt_password("Password: ")?,
        };

        let login = LoginReq {
            email: email.clone(),
            password,
            remember_me: false,
        };
        self.flux.emit(LoginReq::PATH, login).await;

        if !self.session().is_logged_in() {
            let reason = self
                .flux
                .read::<AuthForm>(AuthForm::PATH)
                .and_then(|f| f.error)
                .unwrap_or_else(|| "Login failed".to_string());
            bail!("{reason}");
        }
        Ok(email)
    }

    pub fn session(&self) -> SessionState {
        self.flux.read(SessionState::PATH).unwrap_or_default()
    }

    /// The newest notice, if any.
    pub fn last_notice(&self) -> Option<String> {
        self.flux
            .read::<Notices>(Notices::PATH)
            .and_then(|n| n.last().map(|n| n.message.clone()))
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{label}");
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

/// Shorten `s` to `max` characters for table cells.
pub fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
