use crate::common::CommonParams;
use crate::config::Config;
use crate::log_debug;
use crate::messages;
use crate::pipeline::Orchestrator;
use crate::ui;
use anyhow::{Result, anyhow};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::time::Instant;

/// Tokens that end an interactive session
const QUIT_TOKENS: [&str; 3] = ["quit", "exit", "q"];

/// Handle the 'ask' command: one question, one fused answer
pub async fn handle_ask_command(common: CommonParams, query: &[String]) -> Result<()> {
    let mut config = Config::load()?;
    common.apply_to_config(&mut config)?;
    config.validate()?;

    let prompt = query.join(" ");
    let orchestrator = Orchestrator::new(config)?;
    let answer = run_query(&orchestrator, &prompt).await;
    ui::print_answer(&answer);
    Ok(())
}

/// Handle the 'chat' command: a line-oriented interactive session
pub async fn handle_chat_command(common: CommonParams) -> Result<()> {
    let mut config = Config::load()?;
    common.apply_to_config(&mut config)?;
    config.validate()?;

    ui::print_info("Interactive session. Type 'quit' to leave.");

    let orchestrator = Orchestrator::new(config)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", "You:".truecolor(128, 255, 234).bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let input = line?;
        let input = input.trim();

        if QUIT_TOKENS.contains(&input.to_lowercase().as_str()) {
            ui::print_info("Goodbye!");
            break;
        }
        if input.is_empty() {
            ui::print_warning("Please enter a question");
            continue;
        }

        let answer = run_query(&orchestrator, input).await;
        ui::print_answer(&messages::with_conversational_opener(&answer));
    }

    Ok(())
}

/// Handle the 'list-sources' command
pub fn handle_list_sources_command() -> Result<()> {
    let config = Config::load()?;

    ui::print_info("Configured sources (query order):");
    for source in &config.sources {
        println!(
            "  {}  {}",
            format!("{:<14}", source.name).green().bold(),
            source.url_template.dimmed()
        );
    }
    println!(
        "\n{} calls in flight at most, {}s per-call timeout",
        config.network.max_concurrent_calls,
        config.network.timeout_seconds
    );
    Ok(())
}

/// Handle the 'config' command
pub fn handle_config_command(
    timeout: Option<u64>,
    concurrency: Option<usize>,
    max_fused: Option<usize>,
    add_source: Option<String>,
    remove_source: Option<String>,
) -> Result<()> {
    let mut config = Config::load()?;

    let no_changes = timeout.is_none()
        && concurrency.is_none()
        && max_fused.is_none()
        && add_source.is_none()
        && remove_source.is_none();
    if no_changes {
        // Nothing to set: print the current configuration
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let add_source = add_source.map(parse_source_spec).transpose()?;
    config.update(timeout, concurrency, max_fused, add_source, remove_source)?;
    config.save()?;
    ui::print_success("Configuration updated");
    Ok(())
}

/// Parse a 'name=url-template' source specification
fn parse_source_spec(spec: String) -> Result<(String, String)> {
    spec.split_once('=')
        .map(|(name, url)| (name.trim().to_string(), url.trim().to_string()))
        .filter(|(name, url)| !name.is_empty() && !url.is_empty())
        .ok_or_else(|| anyhow!("Source must be given as name=url-template"))
}

/// Run one query through the pipeline with a spinner
async fn run_query(orchestrator: &Orchestrator, prompt: &str) -> String {
    let spinner = ui::create_spinner(&messages::random_waiting_message());
    let start = Instant::now();
    let answer = orchestrator.answer(prompt).await;
    spinner.finish_and_clear();

    log_debug!("Query answered in {:.2}s", start.elapsed().as_secs_f64());
    answer
}
