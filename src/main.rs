//! # News Sentiment Dashboard
//!
//! A terminal dashboard for a remote news analysis API. The user submits a
//! topic, the API answers with analyzed articles, and the dashboard presents
//! them across three views:
//!
//! - **Overview**: totals, per-label counts and a preview of the first articles
//! - **Sentiment Breakdown**: label distribution, per-article labels and
//!   per-label mean confidence
//! - **Article Browser**: article cards filtered by search term and label
//!
//! ## Usage
//!
//! ```sh
//! news_sentiment_dashboard --endpoint https://analysis.example.com/analyze/
//! news_sentiment_dashboard analyze Farming --view breakdown
//! ```
//!
//! ## Architecture
//!
//! 1. **Client** ([`api`]): one `POST {"topic": ...}` per analysis, no retries
//! 2. **Adapter** ([`results`]): accepts a bare list or `{"results": [...]}`
//! 3. **Normalizer** ([`sentiment`]): any sentiment shape to `(label, confidence)`
//! 4. **Session** ([`session`]): current topic and result, replaced on success
//! 5. **Views** ([`views`]): pure renderings of the session

use clap::Parser;
use std::error::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod dashboard;
mod error;
mod models;
mod outputs;
mod results;
mod sentiment;
mod session;
mod utils;
mod views;

use api::{AnalysisClient, Analyze};
use cli::{Cli, Command, ViewArgs};
use config::DashboardConfig;
use dashboard::{Dashboard, HELP, Outcome, ReplCommand};
use models::AnalysisResult;
use results::extract_results;
use session::Session;
use views::Style;
use views::browser::ArticleFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr, so rendered views own stdout) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("news_sentiment_dashboard starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = DashboardConfig::load(args.config.as_deref())?
        .with_overrides(args.endpoint.clone(), args.timeout_secs);
    let style = if args.no_color { Style::PLAIN } else { Style::COLOR };
    let dashboard = Dashboard::new(config.clone(), style, args.json_output_dir.clone());

    let result = match args.command {
        Some(Command::Analyze { topic, view }) => {
            let client = AnalysisClient::from_config(&config)?;
            info!(endpoint = %client.endpoint(), "Analysis client ready");
            run_once(dashboard, &client, &topic, view).await
        }
        Some(Command::Render { input, topic, view }) => {
            render_saved(dashboard, &input, &topic, view).await
        }
        Some(Command::Interactive) | None => {
            let client = AnalysisClient::from_config(&config)?;
            info!(endpoint = %client.endpoint(), "Analysis client ready");
            run_interactive(dashboard, &client).await
        }
    };

    let elapsed = start_time.elapsed();
    match &result {
        Ok(()) => info!(?elapsed, secs = elapsed.as_secs(), "Execution complete"),
        Err(e) => error!(?elapsed, error = %e, "Execution failed"),
    }
    result
}

/// Analyze a single topic, print the requested views and optionally export.
#[instrument(level = "info", skip(dashboard, analyzer, view))]
async fn run_once<A: Analyze>(
    dashboard: Dashboard,
    analyzer: &A,
    topic: &str,
    view: ViewArgs,
) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new();
    let count = session.submit(analyzer, topic).await?;
    println!("Analysis complete! Found {count} articles.\n");
    show(dashboard.with_session(session), view).await
}

/// Render a payload previously saved from the analysis API.
#[instrument(level = "info", skip(dashboard, input, view), fields(input = %input.display()))]
async fn render_saved(
    dashboard: Dashboard,
    input: &std::path::Path,
    topic: &str,
    view: ViewArgs,
) -> Result<(), Box<dyn Error>> {
    let raw = tokio::fs::read_to_string(input).await?;
    let payload: serde_json::Value = serde_json::from_str(&raw)?;
    let articles = extract_results(payload)?;
    info!(count = articles.len(), "Loaded saved payload");
    let session = Session::with_result(AnalysisResult::new(topic.trim(), articles));
    show(dashboard.with_session(session), view).await
}

async fn show(dashboard: Dashboard, view: ViewArgs) -> Result<(), Box<dyn Error>> {
    let dashboard = dashboard.with_filter(ArticleFilter::new(view.search, view.label));
    println!("{}", dashboard.render(view.view));
    if let Some(path) = dashboard.export().await? {
        println!("Wrote {path}");
    }
    Ok(())
}

/// Read commands from stdin until `quit` or end of input.
async fn run_interactive<A: Analyze>(
    mut dashboard: Dashboard,
    analyzer: &A,
) -> Result<(), Box<dyn Error>> {
    println!("News Summary & Sentiment Viewer\n\n{HELP}\n");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_prompt();
        let Some(line) = lines.next_line().await? else {
            debug!("stdin closed");
            break;
        };
        let cmd = match ReplCommand::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };
        match dashboard.handle(analyzer, cmd).await {
            Outcome::Continue(text) => println!("{text}\n"),
            Outcome::Quit => break,
        }
    }
    Ok(())
}

fn print_prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}
