use anyhow::Result;
use tracing::debug;

use exline::cli::{self, Args, Input};
use exline::config;
use exline::formatter::CommandFormatter;
use exline::logger;
use exline::parser::{ParseResult, parse_line_command, parse_line_range};

fn main() -> Result<()> {
    let args = cli::parse_args()?;

    match args {
        Args::Parse {
            input,
            json,
            range_only,
            quiet,
            debug,
        } => {
            let config = config::load_config().unwrap_or_default();
            config::validate_config(&config)?;

            let debug_enabled = debug || config.logging.debug.unwrap_or(false);
            let log_path = logger::init_debug_logging(debug_enabled)?;
            if let Some(path) = &log_path {
                debug!("debug logging enabled at {}", path.display());
            }

            let json = json || config.output.format.as_deref() == Some("json");

            let lines = match input {
                Input::Lines { lines } => lines,
                Input::File { path } => cli::read_lines_from_file(&path)?,
            };

            let mut failures = 0usize;
            for line in &lines {
                if !quiet {
                    println!("{}", CommandFormatter::format_header(line));
                }
                if range_only {
                    if !parse_range_line(line, json) {
                        failures += 1;
                    }
                } else if !parse_command_line(line, json) {
                    failures += 1;
                }
            }

            if failures > 0 {
                debug!("{failures} of {} lines failed to parse", lines.len());
                std::process::exit(1);
            }
        }
        Args::Config => {
            show_config()?;
        }
    }

    Ok(())
}

/// Parse one command line and print the outcome. Returns false on failure.
fn parse_command_line(line: &str, json: bool) -> bool {
    match parse_line_command(line) {
        ParseResult::Succeeded(command) => {
            debug!("parsed {line:?}");
            if json {
                match serde_json::to_string_pretty(&command) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(e) => eprintln!("Error serializing {line:?}: {e}"),
                }
            } else {
                print!("{}", CommandFormatter::format_command(&command));
            }
            true
        }
        ParseResult::Failed(message) => {
            debug!("failed to parse {line:?}: {message}");
            eprintln!("{}", CommandFormatter::format_failure(&message));
            false
        }
    }
}

/// Parse only a leading range from the line. Returns false on failure.
fn parse_range_line(line: &str, json: bool) -> bool {
    let input = line.strip_prefix(':').unwrap_or(line);
    match parse_line_range(input) {
        ParseResult::Succeeded((range, remainder)) => {
            if json {
                match serde_json::to_string_pretty(&range) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(e) => eprintln!("Error serializing {line:?}: {e}"),
                }
            } else {
                println!("range: {}", CommandFormatter::describe_range(&range));
            }
            if !remainder.is_empty() {
                println!("remainder: {remainder}");
            }
            true
        }
        ParseResult::Failed(message) => {
            eprintln!("{}", CommandFormatter::format_failure(&message));
            false
        }
    }
}

/// Print the effective configuration and the paths that matter.
fn show_config() -> Result<()> {
    let config = config::load_config()?;
    let config_path = config::config_file_path()?;

    println!("Configuration file: {}", config_path.display());
    println!("Log file: {}", logger::get_current_log_path().display());
    println!();
    print!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}
