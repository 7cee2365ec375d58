//! Command-line client for a sprint board.
//!
//! Usage:
//!
//! ```text
//! sprintboard --project 1 --user 7 board
//! sprintboard --project 1 --user 7 move 42 IN_PROGRESS
//! sprintboard --project 1 --user 7 detail 42
//! sprintboard --project 1 --user 7 comment 42 "Looks good"
//! sprintboard --project 1 --user 7 create "Write release notes" 7
//! ```
//!
//! Configuration is read from `--config` (TOML) with environment
//! overrides; see [`sprintboard::config`].

use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use sprintboard::board::{
    adapters::{http::HttpBoardApi, tracing_notifier::TracingNotifier},
    domain::{BoardContext, ProjectId, SessionUser, StatusKey, TaskDetail, TaskId, UserId},
    services::{BoardSyncController, CreateTaskRequest, DropOutcome},
};
use sprintboard::config::SprintboardConfig;
use sprintboard::telemetry::init_tracing;

type Controller = BoardSyncController<HttpBoardApi, TracingNotifier, DefaultClock>;

#[derive(Parser)]
#[command(name = "sprintboard")]
#[command(version, about = "Sprint board client for the planning REST API")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "SPRINTBOARD_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Project whose board is shown
    #[arg(long, global = true, default_value = "1")]
    project: u64,

    /// Signed-in user id
    #[arg(long, global = true, default_value = "1")]
    user: u64,

    /// Signed-in user display name
    #[arg(long, global = true, default_value = "me")]
    user_name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and print every column
    Board,
    /// Move a task to another column
    Move {
        /// Task id
        task: u64,
        /// Target status, e.g. `IN_PROGRESS`
        status: String,
    },
    /// Show a task with its comments and activity
    Detail {
        /// Task id
        task: u64,
    },
    /// Comment on a task
    Comment {
        /// Task id
        task: u64,
        /// Comment text
        text: String,
    },
    /// Create a task
    Create {
        /// Task title
        title: String,
        /// Assignee user id
        assignee: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Initial status, defaults to the board's default column
        #[arg(long)]
        status: Option<String>,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let config = SprintboardConfig::load(cli.config.as_deref())?;
    init_tracing(&config.log_level)?;

    let api = Arc::new(HttpBoardApi::from_config(&config.api)?);
    let user = SessionUser::new(UserId::new(cli.user), cli.user_name);
    let context = BoardContext::resolve(api.as_ref(), ProjectId::new(cli.project), user)
        .await
        .wrap_err("failed to resolve the active sprint")?;
    let controller = BoardSyncController::new(
        api,
        Arc::new(TracingNotifier),
        Arc::new(DefaultClock),
        context,
        config.board_settings()?,
    );

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Board => {
            controller.load_board().await;
            print_board(&controller, &mut out)?;
        }
        Command::Move { task, status } => {
            let target = StatusKey::new(status)?;
            move_task(&controller, TaskId::new(task), &target, &mut out).await?;
        }
        Command::Detail { task } => {
            let detail = controller.open_detail(TaskId::new(task)).await?;
            print_detail(&detail, &mut out)?;
        }
        Command::Comment { task, text } => {
            let comment = controller.add_comment(TaskId::new(task), &text).await?;
            writeln!(out, "added comment {}", comment.id)?;
        }
        Command::Create {
            title,
            assignee,
            description,
            status,
        } => {
            let mut request = CreateTaskRequest::new(title, assignee);
            if let Some(text) = description {
                request = request.with_description(text);
            }
            if let Some(initial) = status {
                request = request.with_status(initial);
            }
            let created = controller.create_task(request).await?;
            writeln!(out, "created #{} in {}", created.id(), created.status())?;
        }
    }
    Ok(())
}

async fn move_task(
    controller: &Controller,
    task_id: TaskId,
    target: &StatusKey,
    out: &mut impl Write,
) -> eyre::Result<()> {
    controller.load_board().await;
    let task = controller
        .snapshot()
        .get(task_id)
        .cloned()
        .ok_or_else(|| eyre!("task {task_id} is not on the board"))?;
    controller.begin_drag(&task);
    match controller.drop_on_column(target).await {
        DropOutcome::Confirmed { .. } => writeln!(out, "moved #{task_id} to {target}")?,
        DropOutcome::Skipped(reason) => writeln!(out, "nothing to do: {reason:?}")?,
        DropOutcome::Failed { error, .. } => return Err(error.into()),
    }
    Ok(())
}

fn print_board(controller: &Controller, out: &mut impl Write) -> eyre::Result<()> {
    let snapshot = controller.snapshot();
    for bucket in snapshot.buckets() {
        writeln!(out, "{} ({})", bucket.column().label(), bucket.tasks().len())?;
        for task in bucket.tasks() {
            writeln!(out, "  #{} {} [{}]", task.id(), task.title(), task.priority())?;
        }
    }
    Ok(())
}

fn print_detail(detail: &TaskDetail, out: &mut impl Write) -> eyre::Result<()> {
    let task = &detail.task;
    writeln!(out, "#{} {} ({})", task.id(), task.title(), task.status())?;
    if let Some(description) = task.description() {
        writeln!(out, "{description}")?;
    }
    writeln!(out, "comments:")?;
    for comment in &detail.comments {
        writeln!(out, "  - {}", comment.content)?;
    }
    writeln!(out, "activity:")?;
    for activity in &detail.activities {
        writeln!(out, "  - {} {}", activity.kind.as_str(), activity.description)?;
    }
    Ok(())
}
