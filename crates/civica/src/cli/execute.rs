//! Command execution: wires parsed arguments to the application context.

use anyhow::{Context as _, Result};
use std::env;
use std::path::Path;

use super::{
    Cli, Commands, DeleteArgs, GrantAdminArgs, InitArgs, ListArgs, ReportArgs, ShowArgs,
    StatsArgs, TransitionArgs, UpvoteArgs,
};
use crate::app::App;
use crate::commands::init as init_cmd;
use crate::commands::init::{CivicaConfig, CIVICA_DIR_NAME, CONFIG_FILE_NAME};
use crate::domain::{Issue, IssueFilter, IssueId};
use crate::error::Error;
use crate::output::{self, OutputConfig};
use crate::storage::IssueStore;
use crate::submission::{self, IssueDraft, MediaUpload};
use crate::{lifecycle, query};

/// Run the parsed CLI command.
pub(super) async fn run(cli: Cli) -> Result<()> {
    let config = OutputConfig::new(cli.json);
    let cwd = env::current_dir().context("cannot determine working directory")?;

    match cli.command {
        Commands::Init(args) => run_init(&cwd, args).await,
        Commands::Report(args) => run_report(&cwd, args, &config).await,
        Commands::List(args) => run_list(&cwd, args, &config).await,
        Commands::Show(args) => run_show(&cwd, args, &config).await,
        Commands::Transition(args) => run_transition(&cwd, args, &config).await,
        Commands::Upvote(args) => run_upvote(&cwd, args, &config).await,
        Commands::Delete(args) => run_delete(&cwd, args).await,
        Commands::Stats(args) => run_stats(&cwd, args, &config).await,
        Commands::GrantAdmin(args) => run_grant_admin(&cwd, args).await,
    }
}

async fn run_init(cwd: &Path, args: InitArgs) -> Result<()> {
    let result = init_cmd::init(cwd, args.prefix.as_deref()).await?;

    if !args.quiet {
        println!(
            "Initialized civica repository in {} (prefix {})",
            result.civica_dir.display(),
            result.prefix
        );
    }

    Ok(())
}

async fn run_report(cwd: &Path, args: ReportArgs, config: &OutputConfig) -> Result<()> {
    let mut app = App::from_directory(cwd).await?;
    let ctx = app.context_for(args.acting_as.as_deref()).await?;

    let mut media = Vec::with_capacity(args.media.len());
    for path in &args.media {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("cannot read media file {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        media.push(MediaUpload { file_name, bytes });
    }

    let draft = IssueDraft {
        title: args.title,
        description: args.description,
        category: args.category.as_str().to_string(),
        priority: args.priority.map(Into::into),
        location: args.location,
        address: None,
        latitude: args.latitude,
        longitude: args.longitude,
    };

    let blobs = app.media_store();
    let geocoder = app.geocoder();
    let issue =
        submission::submit(app.store_mut(), &blobs, &geocoder, &ctx, draft, media).await?;
    app.save().await?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        println!(
            "Issue submitted successfully! Tracking ID: {}",
            issue.tracking_id
        );
    }

    Ok(())
}

async fn run_list(cwd: &Path, args: ListArgs, config: &OutputConfig) -> Result<()> {
    let app = App::from_directory(cwd).await?;
    let issues = app.store().list().await?;

    let criteria = IssueFilter {
        search: args.search,
        category: args.category,
        status: args.status.map(Into::into),
        priority: args.priority.map(Into::into),
    };

    let mut filtered = query::filter(&issues, &criteria);
    filtered.truncate(args.limit);

    if args.pins {
        for issue in query::with_coordinates(&filtered) {
            if let Some(line) = output::pin_line(issue) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
        return Ok(());
    }

    for issue in &filtered {
        println!("{}", output::issue_line(issue, config));
    }
    println!();
    println!("Showing {} of {} issues", filtered.len(), issues.len());

    Ok(())
}

async fn run_show(cwd: &Path, args: ShowArgs, config: &OutputConfig) -> Result<()> {
    let app = App::from_directory(cwd).await?;
    let issue = resolve_issue(&app, &args.issue).await?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        println!("{}", output::issue_detail(&issue, config));
    }

    Ok(())
}

async fn run_transition(cwd: &Path, args: TransitionArgs, config: &OutputConfig) -> Result<()> {
    let mut app = App::from_directory(cwd).await?;
    let ctx = app.context_for(Some(&args.acting_as)).await?;

    let issue =
        lifecycle::transition(app.store_mut(), &ctx, args.issue_id(), args.status.into()).await?;
    app.save().await?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        println!("Issue {} status updated to {}", issue.id, issue.status);
    }

    Ok(())
}

async fn run_upvote(cwd: &Path, args: UpvoteArgs, config: &OutputConfig) -> Result<()> {
    let mut app = App::from_directory(cwd).await?;

    let count = app.store_mut().increment_upvotes(IssueId::new(args.id)).await?;
    app.save().await?;

    if config.json {
        println!("{}", serde_json::json!({ "id": args.id, "upvotes": count }));
    } else {
        println!("Issue {} now has {count} upvotes", args.id);
    }

    Ok(())
}

async fn run_delete(cwd: &Path, args: DeleteArgs) -> Result<()> {
    let mut app = App::from_directory(cwd).await?;
    let ctx = app.context_for(Some(&args.acting_as)).await?;

    lifecycle::remove(app.store_mut(), &ctx, IssueId::new(args.id)).await?;
    app.save().await?;

    println!("Issue {} deleted", args.id);

    Ok(())
}

async fn run_stats(cwd: &Path, _args: StatsArgs, config: &OutputConfig) -> Result<()> {
    let app = App::from_directory(cwd).await?;
    let issues = app.store().list().await?;
    let stats = query::aggregate(&issues);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", output::stats_block(&stats));
    }

    Ok(())
}

async fn run_grant_admin(cwd: &Path, args: GrantAdminArgs) -> Result<()> {
    let root = init_cmd::find_civica_root(cwd).ok_or_else(|| {
        Error::Config(format!(
            "Not a civica repository (no '{CIVICA_DIR_NAME}' directory found)"
        ))
    })?;
    let config_path = root.join(CIVICA_DIR_NAME).join(CONFIG_FILE_NAME);

    let mut config = CivicaConfig::load(&config_path).await?;

    if config.grant_admin(&args.email) {
        config.save(&config_path).await?;
        println!("Successfully made {} an admin", args.email);
    } else {
        println!("{} is already an admin", args.email);
    }

    Ok(())
}

async fn resolve_issue(app: &App, reference: &str) -> Result<Issue, Error> {
    let issue = if let Ok(id) = reference.parse::<u64>() {
        app.store().get(IssueId::new(id)).await?
    } else {
        app.store().find_by_tracking_id(reference).await?
    };

    issue.ok_or_else(|| Error::not_found(reference))
}
