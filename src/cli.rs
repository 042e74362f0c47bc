//! Command-line interface definitions for the News Sentiment Dashboard.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The endpoint can also be provided through the environment.

use crate::views::ViewKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the News Sentiment Dashboard.
///
/// # Examples
///
/// ```sh
/// # Interactive session against the default endpoint
/// news_sentiment_dashboard
///
/// # One-shot analysis showing only the article browser, filtered
/// news_sentiment_dashboard analyze Farming --view browser --label negative
///
/// # Render a saved payload and export the views as JSON
/// news_sentiment_dashboard -j ./json render --input payload.json --topic AI
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Optional path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Analysis API endpoint (overrides the config file)
    #[arg(long, env = "ANALYSIS_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (defaults to the HTTP client's own)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory to write the dashboard views to as JSON
    #[arg(short, long, global = true)]
    pub json_output_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a topic and print the selected views
    Analyze {
        /// Topic to analyze (e.g. Farming, AI, Politics)
        topic: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Render a saved API payload without calling the endpoint
    Render {
        /// Path to a JSON payload as returned by the analysis API
        #[arg(short, long)]
        input: PathBuf,

        /// Topic the payload belongs to
        #[arg(short, long)]
        topic: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Start an interactive session (the default)
    Interactive,
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Which view to print
    #[arg(long, value_enum, default_value = "all")]
    pub view: ViewKind,

    /// Search term for the article browser
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sentiment label for the article browser ("all" for no filter)
    #[arg(short, long)]
    pub label: Option<String>,
}
