/*
[INPUT]:  CLI arguments, YAML configuration file, TASKFLOW_TOKEN
[OUTPUT]: Task overviews and transition results as JSON on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI commands, startup flow, or output format
*/

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskflow_adapter::{IdentityProvider, TaskStatus, TaskflowClient};
use taskflow_engine::demo::run_demo;
use taskflow_engine::{
    EngineConfig, TaskOverview, TaskRepository, WorkflowService, derive_submission_history,
};

#[derive(Parser, Debug)]
#[command(name = "taskflow", version, about = "Task lifecycle workflow client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the overview and submission history of a task
    Show { task_id: String },
    /// Move a task to any status the current user may set
    Move { task_id: String, status: TaskStatus },
    /// Submit an in-progress task for review
    Submit {
        task_id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Approve a task in review
    Approve { task_id: String },
    /// Send a task in review back to in progress
    Reject { task_id: String },
    /// Run a full review cycle against an in-memory backend
    Demo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowOutput<'a> {
    overview: TaskOverview,
    submissions: Vec<taskflow_engine::SubmissionRecord>,
    actor_id: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    if args.dry_run {
        let config = load_config(args.config_path.as_deref())?;
        info!(base_url = %config.api.base_url, "dry-run requested; configuration validated");
        return Ok(());
    }

    if let Some(Command::Demo) = args.command {
        return demo().await;
    }

    let config = load_config(args.config_path.as_deref())?;
    info!(base_url = %config.api.base_url, "configuration loaded");

    let command = args
        .command
        .ok_or_else(|| anyhow!("no command given; run with --help"))?;
    let client = config.build_client()?;
    execute(command, client).await
}

async fn execute(command: Command, client: TaskflowClient) -> Result<()> {
    let actor = client
        .current_actor()
        .await
        .context("resolve current user")?;
    info!(actor_id = %actor.id, role = ?actor.role, "acting user resolved");
    let service = WorkflowService::new(client);

    match command {
        Command::Show { task_id } => {
            let task = service.repository().get_task(&task_id).await?;
            print_json(&ShowOutput {
                overview: TaskOverview::build(&task, &actor, Utc::now()),
                submissions: derive_submission_history(&task),
                actor_id: &actor.id,
            })
        }
        Command::Move { task_id, status } => {
            let task = service.transition(&task_id, &actor, status).await?;
            print_json(&TaskOverview::build(&task, &actor, Utc::now()))
        }
        Command::Submit { task_id, notes } => {
            let outcome = service
                .submit_for_review(&task_id, &actor, notes.as_deref())
                .await?;
            info!(notes_posted = outcome.notes_posted(), "submitted for review");
            print_json(&TaskOverview::build(&outcome.task, &actor, Utc::now()))
        }
        Command::Approve { task_id } => {
            let task = service.approve(&task_id, &actor).await?;
            print_json(&TaskOverview::build(&task, &actor, Utc::now()))
        }
        Command::Reject { task_id } => {
            let task = service.reject(&task_id, &actor).await?;
            print_json(&TaskOverview::build(&task, &actor, Utc::now()))
        }
        Command::Demo => demo().await,
    }
}

async fn demo() -> Result<()> {
    let report = run_demo().await.context("run demo")?;
    print_json(&report)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("encode output")?;
    println!("{out}");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => EngineConfig::default_path()?,
    };
    EngineConfig::from_file(&path).with_context(|| format!("load config {}", path.display()))
}
