//! Command implementations.
//!
//! Private commands first navigate to the screen they belong to; if the
//! guard redirects, the command stops there.

pub mod invitations;
pub mod projects;
pub mod session;
pub mod tasks;

use anyhow::{bail, Result};
use taskdeck_core::models::InvitationQuery;
use taskdeck_core::navigation::Route;
use taskdeck_core::AppContext;

use crate::cli::Commands;
use crate::output;

pub async fn run(context: &mut AppContext, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Login { identifier } => session::login(context, identifier).await,
        Commands::Logout => session::logout(context),
        Commands::Status => session::status(context, json),
        Commands::Open { path } => session::open(context, &path),
        Commands::Dashboard => dashboard(context, json).await,
        Commands::Projects(cmd) => projects::handle(context, cmd, json).await,
        Commands::Tasks(cmd) => tasks::handle(context, cmd, json).await,
        Commands::Invitations(cmd) => invitations::handle(context, cmd, json).await,
        Commands::Me => me(context, json).await,
    }
}

/// Navigate to `route` and fail unless the guard allows it as requested.
pub(crate) fn enter(context: &AppContext, route: Route) -> Result<()> {
    let nav = context.navigate(route)?;
    if nav.redirected() {
        if nav.resolved == Route::Login {
            bail!("Not signed in. Run 'taskdeck login' first.");
        }
        bail!("Redirected to {}", nav.resolved);
    }
    Ok(())
}

/// Turn a store's recorded failure into a command error.
pub(crate) fn check(error: &Option<String>) -> Result<()> {
    match error {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

async fn dashboard(context: &mut AppContext, json: bool) -> Result<()> {
    enter(context, Route::Dashboard)?;
    let pending = InvitationQuery::pending();
    futures::join!(
        context.dashboard.load_summary(),
        context.invitations.fetch_my_invitations(&pending),
    );
    check(&context.dashboard.error)?;

    let Some(summary) = context.dashboard.summary.as_ref() else {
        bail!("No summary returned");
    };
    if json {
        return output::json_pretty(summary);
    }

    output::heading(&format!("Dashboard for {}", summary.username));
    output::field("Active projects", &summary.active_projects.to_string());
    output::field("Owned projects", &summary.owned_projects.to_string());
    output::field("Pending tasks", &summary.pending_tasks.to_string());
    output::field("Overdue tasks", &summary.overdue_tasks.to_string());
    output::field("Due today", &summary.tasks_due_today.to_string());
    if let Some(meta) = context.invitations.page_meta {
        output::field("Pending invitations", &meta.total_elements.to_string());
    }
    if !summary.tasks_by_priority.is_empty() {
        println!();
        println!("By priority:");
        for (label, count) in &summary.tasks_by_priority {
            println!("  {:<16} {}", label, count);
        }
    }
    if !summary.tasks_by_status.is_empty() {
        println!();
        println!("By status:");
        for (label, count) in &summary.tasks_by_status {
            println!("  {:<16} {}", label, count);
        }
    }
    Ok(())
}

async fn me(context: &mut AppContext, json: bool) -> Result<()> {
    enter(context, Route::Dashboard)?;
    context.user.load_me().await;
    check(&context.user.error)?;

    let Some(me) = context.user.me.as_ref() else {
        bail!("No profile returned");
    };
    if json {
        return output::json_pretty(me);
    }

    output::field("User", me.display_name());
    if let Some(id) = me.id {
        output::field("Id", &id.to_string());
    }
    if let Some(email) = me.email.as_deref() {
        output::field("Email", email);
    }
    Ok(())
}
