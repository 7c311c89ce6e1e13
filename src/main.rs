//! git-aicommit - CLI entry point.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use git_aicommit::commit::{build_prompt_messages, collect_staged_diff, create_commit, open_repository};
use git_aicommit::config::Config;
use git_aicommit::llm::DeepSeekClient;
use git_aicommit::ui::write_banner;

/// Create an AI-generated commit.
///
/// Generate commit messages using AI and optionally create commits with those messages.
#[derive(Parser, Debug)]
#[command(name = "git-aicommit")]
#[command(about = "Create an AI-generated commit")]
#[command(version)]
struct Cli {
    /// Apply the AI-generated message to the new commit
    #[arg(short, long)]
    apply: bool,

    /// Path to the config file (defaults to ~/.config/git-aicommit/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Load configuration
    let loaded = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if loaded.created {
        eprintln!("Created default config at {}", loaded.path.display());
    }
    let api_key = loaded.api_key()?;

    // Step 2: Get staged changes
    let repo = open_repository()?;
    let staged = collect_staged_diff(&repo).context("Failed to get staged changes")?;
    debug!(
        "Staged: {} files, {} additions, {} deletions",
        staged.files_changed, staged.additions, staged.deletions
    );

    // Step 3: Build prompt messages
    let messages = build_prompt_messages(&staged.diff_text, loaded.prompt());

    // Step 4: Stream the commit message
    write_banner(&mut io::stdout(), "AI Suggested Commit Message")?;
    let client = DeepSeekClient::new();
    let full_message = client
        .stream_commit_message(&api_key, &messages, loaded.temperature(), io::stdout())
        .await
        .context("Failed to generate commit message")?;

    // Step 5: Apply commit if requested
    if cli.apply {
        let oid = create_commit(&repo, full_message.trim()).context("Failed to create commit")?;
        write_banner(&mut io::stdout(), "✅ Commit Successful")?;
        println!("Commit ID: {}\n", oid);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` is honoured unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("git_aicommit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}
