//! Command line argument parsing and validation.
//!
//! Every flag falls back to the environment variable a CI workflow would set,
//! so the binary can run as a pipeline step without extra wiring.

use crate::config::{Credentials, PageConfig, TrackerConfig};
use crate::error::{ConfigError, RequestError};
use crate::http::{DEFAULT_RETRIES, RetryPolicy};
use crate::release::{ReleaseRequest, parse_comma_list};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Release bookkeeping for CI pipelines
#[derive(Parser, Debug)]
#[command(
    name = "release_bookkeeper",
    version,
    about = "Create Jira fix-versions and Confluence release pages from CI",
    long_about = "Create Jira fix-versions for one or more projects and publish release pages.

Usage:
  release_bookkeeper create-release --project-keys ABC,DEF --identifier 24.07.27.07
  release_bookkeeper create-page --space-key REL --title \"Release 24.07.27.07\""
)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a fix-version in every listed project
    CreateRelease(CreateReleaseArgs),
    /// Publish a release page in a documentation space
    CreatePage(CreatePageArgs),
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateRelease(_) => "create-release",
            Command::CreatePage(_) => "create-page",
        }
    }
}

/// Retry tuning shared by both commands
#[derive(ClapArgs, Debug, Clone)]
pub struct RetryArgs {
    /// Retries after a rate-limited (429) response
    #[arg(long, env = "API_RETRIES", default_value_t = DEFAULT_RETRIES)]
    pub retries: u32,

    /// Initial backoff before the first retry, in milliseconds
    #[arg(long, env = "API_INITIAL_BACKOFF_MS", default_value_t = 1000)]
    pub initial_backoff_ms: u64,
}

impl RetryArgs {
    /// Build a validated retry policy
    pub fn policy(&self) -> Result<RetryPolicy, ConfigError> {
        let policy = RetryPolicy::new(
            self.retries,
            Duration::from_millis(self.initial_backoff_ms),
        );
        policy.validate()?;
        Ok(policy)
    }
}

/// CI sink locations
#[derive(ClapArgs, Debug, Clone)]
pub struct SinkArgs {
    /// Markdown job summary file to append to
    #[arg(long, env = "GITHUB_STEP_SUMMARY")]
    pub summary_file: Option<PathBuf>,

    /// Step outputs file to append `name=value` records to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,
}

/// Arguments for `create-release`
#[derive(ClapArgs, Debug, Clone)]
pub struct CreateReleaseArgs {
    /// Jira REST API root, e.g. https://example.atlassian.net/rest/api/3
    #[arg(long, env = "JIRA_API_URL")]
    pub api_url: String,

    /// Jira web root used for release links
    #[arg(long, env = "JIRA_URL")]
    pub web_url: String,

    /// Jira API user
    #[arg(long, env = "JIRA_API_USER")]
    pub user: String,

    /// Jira API token
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Comma-separated project keys, processed in order
    #[arg(long, env = "JIRA_PROJECT_KEY")]
    pub project_keys: String,

    /// Release identifier, e.g. 24.07.27.07
    #[arg(long, env = "JIRA_RELEASE_IDENTIFIER")]
    pub identifier: String,

    /// Release description
    #[arg(long, env = "JIRA_RELEASE_DESCRIPTION")]
    pub description: Option<String>,

    /// Mark versions released on creation
    #[arg(
        long,
        env = "JIRA_RELEASE_NOW",
        default_value_t = false,
        action = clap::ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub release_now: bool,

    /// Write the run report as JSON for a later `create-page` step
    #[arg(long, env = "RELEASE_REPORT_FILE")]
    pub report_file: Option<PathBuf>,

    #[command(flatten)]
    pub retry: RetryArgs,

    #[command(flatten)]
    pub sinks: SinkArgs,
}

impl CreateReleaseArgs {
    /// Tracker connection settings
    pub fn tracker_config(&self) -> Result<TrackerConfig, ConfigError> {
        TrackerConfig::new(
            &self.api_url,
            &self.web_url,
            Credentials::new(&self.user, &self.token),
        )
    }

    /// Validated release request
    pub fn release_request(&self) -> Result<ReleaseRequest, RequestError> {
        ReleaseRequest::new(
            parse_comma_list(&self.project_keys),
            self.identifier.trim(),
            self.description.clone(),
            self.release_now,
        )
    }
}

/// Arguments for `create-page`
#[derive(ClapArgs, Debug, Clone)]
pub struct CreatePageArgs {
    /// Confluence API root
    #[arg(long, env = "CONFLUENCE_API_URL")]
    pub api_url: String,

    /// Confluence web root used for page links
    #[arg(long, env = "CONFLUENCE_URL")]
    pub web_url: String,

    /// Confluence API user
    #[arg(long, env = "CONFLUENCE_API_USERNAME")]
    pub user: String,

    /// Confluence API token
    #[arg(long, env = "CONFLUENCE_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Space key the page is created in
    #[arg(long, env = "CONFLUENCE_SPACE_KEY")]
    pub space_key: String,

    /// Page title
    #[arg(long, env = "CONFLUENCE_PAGE_TITLE")]
    pub title: String,

    /// Space lookup path relative to the API root
    #[arg(long, env = "CONFLUENCE_API_SPACE_PATH", default_value = "rest/api/space")]
    pub space_path: String,

    /// Page creation path relative to the API root
    #[arg(long, env = "CONFLUENCE_API_PAGE_PATH", default_value = "rest/api/content")]
    pub page_path: String,

    /// Comma-separated release names to list on the page
    #[arg(long, env = "JIRA_RELEASE_NAME", default_value = "")]
    pub release_names: String,

    /// Comma-separated release URLs, matched to release names by position
    #[arg(long, env = "JIRA_VERSION_URL", default_value = "")]
    pub release_urls: String,

    /// Run report written by `create-release`; replaces the name/URL lists
    #[arg(long, env = "RELEASE_REPORT_FILE")]
    pub report_file: Option<PathBuf>,

    #[command(flatten)]
    pub retry: RetryArgs,

    #[command(flatten)]
    pub sinks: SinkArgs,
}

impl CreatePageArgs {
    /// Documentation service connection settings
    pub fn page_config(&self) -> Result<PageConfig, ConfigError> {
        PageConfig::new(
            &self.api_url,
            &self.web_url,
            Credentials::new(&self.user, &self.token),
            &self.space_path,
            &self.page_path,
        )
    }

    /// Release names to list, in order
    pub fn release_names(&self) -> Vec<String> {
        parse_comma_list(&self.release_names)
    }

    /// Release URLs, positionally matched to [`Self::release_names`]
    pub fn release_urls(&self) -> Vec<String> {
        parse_comma_list(&self.release_urls)
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::CreateRelease(args) => {
                if args.project_keys.trim().is_empty() {
                    return Err("At least one project key is required".to_string());
                }
                if args.identifier.trim().is_empty() {
                    return Err("Release identifier is required".to_string());
                }
            }
            Command::CreatePage(args) => {
                if args.space_key.trim().is_empty() {
                    return Err("Space key is required".to_string());
                }
                if args.title.trim().is_empty() {
                    return Err("Page title is required".to_string());
                }
            }
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new() -> Self {
        Self {
            output: super::OutputManager::new(),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}
