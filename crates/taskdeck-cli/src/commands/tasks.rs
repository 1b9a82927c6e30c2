//! Task commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use taskdeck_core::models::NewTask;
use taskdeck_core::navigation::Route;
use taskdeck_core::AppContext;

use super::{check, enter};
use crate::output;

#[derive(Args, Debug)]
pub struct TasksCommand {
    #[command(subcommand)]
    pub command: TasksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TasksSubcommand {
    /// List task priorities and statuses
    Catalogs,

    /// Create a task in a project, optionally assigning it
    Create {
        project_id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Priority id from `tasks catalogs`
        #[arg(long)]
        priority: i64,
        /// Status id from `tasks catalogs`
        #[arg(long)]
        status: i64,
        /// YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS
        #[arg(long)]
        due: Option<String>,
        /// User id to assign the task to
        #[arg(long)]
        assignee: Option<i64>,
    },
}

pub async fn handle(context: &mut AppContext, cmd: TasksCommand, json: bool) -> Result<()> {
    match cmd.command {
        TasksSubcommand::Catalogs => {
            enter(context, Route::Projects)?;
            let store = &mut context.tasks;
            store.load_catalogs().await;
            check(&store.error)?;
            if json {
                return output::json_pretty(&serde_json::json!({
                    "priorities": store.priorities,
                    "statuses": store.statuses,
                }));
            }
            output::heading("Priorities");
            for priority in &store.priorities {
                println!("  {:<4} {}", priority.id, priority.label);
            }
            println!();
            output::heading("Statuses");
            for status in &store.statuses {
                println!("  {:<4} {}", status.id, status.label);
            }
            Ok(())
        }
        TasksSubcommand::Create {
            project_id,
            title,
            description,
            priority,
            status,
            due,
            assignee,
        } => {
            enter(
                context,
                Route::ProjectDetail {
                    project_id: project_id.clone(),
                },
            )?;
            let task = NewTask {
                title,
                description,
                priority_id: priority,
                status_id: status,
                project_id,
                due_date: due,
                assignee_id: assignee,
            };

            let Some(task_id) = context.tasks.create_task(&task).await else {
                check(&context.tasks.error)?;
                bail!("Task was not created");
            };
            output::success(&format!("Created task {}", task_id));
            // Created but not assigned: report it without failing the command.
            if let Some(message) = context.tasks.error.as_deref() {
                output::error(message);
            }
            Ok(())
        }
    }
}
