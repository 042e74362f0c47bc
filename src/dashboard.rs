//! Top-level controller.
//!
//! [`Dashboard`] owns the [`Session`] and the article browser's filter, routes
//! user commands, and lends the session to the views for rendering. The
//! interactive loop and the one-shot subcommands both go through it.

use crate::api::Analyze;
use crate::config::DashboardConfig;
use crate::outputs::json::write_dashboard;
use crate::session::Session;
use crate::views::browser::ArticleFilter;
use crate::views::{Style, ViewKind, breakdown, browser, overview};
use tracing::{error, info};

pub const HELP: &str = "\
Commands:
  analyze <topic>     analyze news coverage of a topic
  overview            show totals and a preview of the first articles
  breakdown           show the sentiment distribution and per-label details
  browse              show the article browser with the current filters
  search <term>       set the browser search term (no term clears it)
  label <label|all>   set the browser sentiment filter
  clear               clear both browser filters
  status              show the current topic and article count
  export              write the views to the JSON output directory
  help                show this message
  quit                leave the dashboard";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Analyze(String),
    Show(ViewKind),
    Search(Option<String>),
    Label(Option<String>),
    Clear,
    Status,
    Export,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a line; `Ok(None)` for blank input.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let cmd = match word.to_lowercase().as_str() {
            "analyze" | "a" => match arg {
                Some(topic) => ReplCommand::Analyze(topic),
                None => return Err("usage: analyze <topic>".to_string()),
            },
            "overview" | "home" => ReplCommand::Show(ViewKind::Overview),
            "breakdown" | "sentiment" => ReplCommand::Show(ViewKind::Breakdown),
            "browse" | "articles" => ReplCommand::Show(ViewKind::Browser),
            "all" => ReplCommand::Show(ViewKind::All),
            "search" => ReplCommand::Search(arg),
            "label" => ReplCommand::Label(arg),
            "clear" => ReplCommand::Clear,
            "status" => ReplCommand::Status,
            "export" => ReplCommand::Export,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => return Err(format!("unknown command {other:?}; type `help`")),
        };
        Ok(Some(cmd))
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

#[derive(Debug)]
pub struct Dashboard {
    session: Session,
    filter: ArticleFilter,
    config: DashboardConfig,
    style: Style,
    json_output_dir: Option<String>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, style: Style, json_output_dir: Option<String>) -> Self {
        Self {
            session: Session::new(),
            filter: ArticleFilter::default(),
            config,
            style,
            json_output_dir,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn with_filter(mut self, filter: ArticleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Render one view (or all of them), preceded by the status line.
    pub fn render(&self, view: ViewKind) -> String {
        let mut out = String::new();
        if let Some(status) = self.session.status_line() {
            out.push_str(&status);
            out.push_str("\n\n");
        }
        let views: &[ViewKind] = match view {
            ViewKind::All => &[ViewKind::Overview, ViewKind::Breakdown, ViewKind::Browser],
            ref single => std::slice::from_ref(single),
        };
        let rendered: Vec<String> = views
            .iter()
            .map(|v| match v {
                ViewKind::Overview => {
                    overview::render(&self.session, self.config.preview_count, &self.style)
                }
                ViewKind::Breakdown => {
                    breakdown::render(&self.session, self.config.summary_preview_chars, &self.style)
                }
                ViewKind::Browser | ViewKind::All => {
                    browser::render(&self.session, &self.filter, &self.style)
                }
            })
            .collect();
        out.push_str(&rendered.join("\n"));
        out
    }

    /// Write the views to the configured JSON directory, if there is one.
    pub async fn export(&self) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let Some(dir) = self.json_output_dir.as_deref() else {
            return Ok(None);
        };
        let path = write_dashboard(&self.session, &self.filter, &self.config, dir).await?;
        Ok(Some(path.display().to_string()))
    }

    /// Execute one command against the session.
    pub async fn handle<A: Analyze>(&mut self, analyzer: &A, cmd: ReplCommand) -> Outcome {
        let text = match cmd {
            ReplCommand::Analyze(topic) => {
                println!("Analyzing news about '{topic}'...");
                match self.session.submit(analyzer, &topic).await {
                    Ok(count) => {
                        // A new topic starts with an unfiltered browser.
                        self.filter = ArticleFilter::default();
                        format!(
                            "Analysis complete! Found {count} articles.\n\n{}",
                            self.render(ViewKind::Overview)
                        )
                    }
                    Err(e) => format!("Error: {e}"),
                }
            }
            ReplCommand::Show(view) => self.render(view),
            ReplCommand::Search(term) => {
                self.filter.set_search(term);
                self.render(ViewKind::Browser)
            }
            ReplCommand::Label(label) => {
                self.filter.set_label(label);
                self.render(ViewKind::Browser)
            }
            ReplCommand::Clear => {
                self.filter = ArticleFilter::default();
                self.render(ViewKind::Browser)
            }
            ReplCommand::Status => self
                .session
                .status_line()
                .unwrap_or_else(|| "No topic analyzed yet.".to_string()),
            ReplCommand::Export => match self.export().await {
                Ok(Some(path)) => {
                    info!(%path, "Exported dashboard");
                    format!("Wrote {path}")
                }
                Ok(None) => "No JSON output directory configured (use --json-output-dir).".to_string(),
                Err(e) => {
                    error!(error = %e, "Export failed");
                    format!("Error: {e}")
                }
            },
            ReplCommand::Help => HELP.to_string(),
            ReplCommand::Quit => return Outcome::Quit,
        };
        Outcome::Continue(text)
    }
}
