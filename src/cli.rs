use crate::commands;
use crate::common::CommonParams;
use crate::config::Config;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use colored::Colorize;

const LOG_FILE: &str = "chorus-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Chorus: one question, many models, one answer",
    long_about = "Chorus fans your question out to several AI endpoints at once, scores every reply, and fuses the best ones into a single consolidated answer.",
    disable_version_flag = true,
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, separators, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Ask a single question and print the consolidated answer
    #[command(
        about = "Ask a single question",
        long_about = "Fan one question out to every configured source, score the replies, and print the fused answer."
    )]
    Ask {
        #[command(flatten)]
        common: CommonParams,

        /// The question to ask
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Start an interactive question-and-answer session
    #[command(
        about = "Start an interactive session",
        long_about = "Read questions line by line and answer each one. Type 'quit', 'exit', or 'q' to leave."
    )]
    Chat {
        #[command(flatten)]
        common: CommonParams,
    },

    /// List the configured sources
    #[command(about = "List the configured sources in query order")]
    ListSources,

    /// Configure Chorus settings and sources
    #[command(about = "Configure Chorus settings and sources")]
    Config {
        /// Set the per-call timeout in seconds
        #[arg(long, help = "Set the per-call timeout in seconds")]
        timeout: Option<u64>,

        /// Set the maximum number of concurrent upstream calls
        #[arg(long, help = "Set the maximum number of concurrent upstream calls")]
        concurrency: Option<usize>,

        /// Set how many top answers a synthesized reply may combine
        #[arg(long, help = "Set how many top answers a synthesized reply may combine")]
        max_fused: Option<usize>,

        /// Add or replace a source (name=url-template with {prompt} placeholder)
        #[arg(
            long,
            help = "Add or replace a source (name=url-template, where the template contains {prompt})"
        )]
        add_source: Option<String>,

        /// Remove a source by name
        #[arg(long, help = "Remove a source by name")]
        remove_source: Option<String>,
    },
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Generate dynamic help including the configured sources
fn get_dynamic_help() -> String {
    let names = Config::load().map_or_else(
        |_| Vec::new(),
        |config| {
            config
                .sources
                .iter()
                .map(|s| s.name.clone())
                .collect::<Vec<_>>()
        },
    );

    if names.is_empty() {
        return String::new();
    }

    let sources_list = names
        .iter()
        .map(|name| format!("{}", name.bold()))
        .collect::<Vec<_>>()
        .join(" • ");

    format!("\nConfigured sources: {sources_list}")
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
    } else {
        crate::logger::disable_logging();
    }

    // Set quiet mode in the UI module
    if cli.quiet {
        crate::ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        handle_command(command).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["chorus", "--help"]);
        Ok(())
    }
}

/// Handle the command based on parsed arguments
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Ask { common, query } => commands::handle_ask_command(common, &query).await,
        Commands::Chat { common } => commands::handle_chat_command(common).await,
        Commands::ListSources => commands::handle_list_sources_command(),
        Commands::Config {
            timeout,
            concurrency,
            max_fused,
            add_source,
            remove_source,
        } => commands::handle_config_command(
            timeout,
            concurrency,
            max_fused,
            add_source,
            remove_source,
        ),
    }
}
