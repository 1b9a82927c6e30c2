//! Session commands: login, logout, status, open.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use taskdeck_core::AppContext;
use tracing::warn;

use crate::output;

/// Password source checked before prompting
const PASSWORD_ENV: &str = "TASKDECK_PASSWORD";

#[derive(Serialize)]
struct StatusReport {
    state: String,
    expires_at: Option<String>,
    api_base_url: String,
}

pub async fn login(context: &mut AppContext, identifier: Option<String>) -> Result<()> {
    let identifier = match identifier.or_else(|| context.config.last_identifier.clone()) {
        Some(identifier) => identifier,
        None => prompt("Username or email: ")?,
    };
    if identifier.is_empty() {
        bail!("An identifier is required");
    }

    let password = match std::env::var(PASSWORD_ENV) {
        Ok(password) if !password.is_empty() => password,
        _ => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };

    eprintln!("Signing in as {}...", identifier);
    context.login(&identifier, &password).await?;

    if let Err(e) = context.config.save() {
        warn!(error = %e, "Failed to save config");
    }

    output::success("Signed in");
    if let Some(expires_at) = context.credentials.expires_at() {
        output::field("Expires", &expires_at.to_rfc3339());
    }
    Ok(())
}

pub fn logout(context: &mut AppContext) -> Result<()> {
    context.logout();
    output::success("Signed out");
    Ok(())
}

pub fn status(context: &AppContext, json: bool) -> Result<()> {
    let report = StatusReport {
        state: context.credentials.state().to_string(),
        expires_at: context.credentials.expires_at().map(|t| t.to_rfc3339()),
        api_base_url: context.api.base_url().to_string(),
    };
    if json {
        return output::json_pretty(&report);
    }

    output::field("Session", &report.state);
    if let Some(expires_at) = report.expires_at.as_deref() {
        output::field("Expires", expires_at);
    }
    output::field("API", &report.api_base_url);
    Ok(())
}

pub fn open(context: &AppContext, path: &str) -> Result<()> {
    let nav = context.navigate_path(path)?;
    if nav.redirected() {
        output::field("Requested", &nav.requested.to_string());
        output::field("Redirected to", &nav.resolved.to_string());
    } else {
        output::field("Opened", &nav.resolved.to_string());
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
