use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

Copyright (c) 2025 InkyQuill
License: MIT
Source: https://github.com/InkyQuill/exline
Rust Edition: 2024"
);

#[derive(Parser)]
#[command(name = "exline")]
#[command(about = "Parse Vim-style ex command lines into structured commands")]
#[command(long_about = "exline parses lines of Vim-style ex command text (':1,5s/foo/bar/g',
':wq!', ':marks abc') into a structured command tree, without executing
anything. It is the command-line front end of the exline parser library.

Each input line is parsed independently. Successful parses are printed as a
readable outline (or JSON with --json); failures are reported on stderr and
the exit status is non-zero if any line failed.

WHAT IS UNDERSTOOD:
  • Line ranges: '%', '1,5', '.;$', \"'a,'b\", '/pat/,?pat?', '.+3'
  • Abbreviated command names: ':su' for ':substitute', ':e' for ':edit'
  • Per-command arguments: registers, counts, '!' variants, '+10 file'
    options, substitute flag letters

LINES FROM A FILE:
  --file parses every non-empty line of an exrc-style file, skipping
  \"-comment lines.

EXAMPLES:
  exline ':1,5s/foo/bar/g'              Parse one substitute command
  exline ':wq!' ':close'                Parse several lines at once
  exline --json ':edit +10 foo.txt'     Emit the parse tree as JSON
  exline --range-only '1,5delete'       Parse only the leading range
  exline --file commands.ex             Check every line of a file")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
#[command(propagate_version = true)]
struct Cli {
    /// Ex command lines to parse (e.g., ':1,5s/foo/bar/g', ':wq!')
    #[arg(value_name = "COMMAND_LINE")]
    lines: Vec<String>,

    /// Read command lines from a file instead of the arguments
    #[arg(short = 'f', long, value_name = "PATH", conflicts_with = "lines")]
    #[arg(help = "Parse every non-empty line of an exrc-style file\nLines starting with \" are treated as comments and skipped.")]
    file: Option<String>,

    /// Emit each parsed command as JSON
    #[arg(long)]
    #[arg(help = "Emit each successfully parsed command as one JSON document\nOverrides the [output] format setting from the config file.")]
    json: bool,

    /// Parse only a leading line range
    #[arg(long = "range-only")]
    #[arg(help = "Parse only a leading line range and print it together with\nthe unconsumed remainder of the line.")]
    range_only: bool,

    /// Suppress per-line headers
    #[arg(short = 'q', long)]
    #[arg(help = "Print only parse results, without echoing each input line.")]
    quiet: bool,

    /// Enable debug logging to a file
    #[arg(long)]
    #[arg(help = "Write debug logs to /var/log/exline.log (or ~/.exline/exline.log)\nEquivalent to setting [logging] debug = true in the config file.")]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show configuration
    #[command(long_about = "Print the effective configuration and where it lives.

The configuration file (~/.exline/config.toml) is created with commented
defaults the first time it is needed.

CONFIGURATION OPTIONS:
  [output]
    format = \"text\"    # Output format: text or json
    color = true        # Colorize text output

  [logging]
    debug = false       # Write debug logs to a file

EXAMPLES:
  exline config                   Show configuration and paths")]
    Config,
}

pub fn parse_args() -> Result<Args> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config) => Ok(Args::Config),
        None => {
            if cli.lines.is_empty() && cli.file.is_none() {
                anyhow::bail!(
                    "Missing command line. Usage: exline ':1,5s/foo/bar/g' (see --help)"
                );
            }

            let input = match cli.file {
                Some(path) => Input::File { path },
                None => Input::Lines { lines: cli.lines },
            };

            Ok(Args::Parse {
                input,
                json: cli.json,
                range_only: cli.range_only,
                quiet: cli.quiet,
                debug: cli.debug,
            })
        }
    }
}

/// Where the command lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Lines { lines: Vec<String> },
    File { path: String },
}

#[derive(Debug)]
pub enum Args {
    Parse {
        input: Input,
        json: bool,
        range_only: bool,
        quiet: bool,
        debug: bool,
    },
    Config,
}

/// Read the lines to parse from an exrc-style file, skipping blank lines
/// and `"`-comments.
pub fn read_lines_from_file(path: &str) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read command file: {path}"))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('"'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_declaration_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_read_lines_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\" exrc excerpt").unwrap();
        writeln!(file).unwrap();
        writeln!(file, ":1,5s/foo/bar/g").unwrap();
        writeln!(file, "  :wq!  ").unwrap();
        let lines = read_lines_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(lines, vec![":1,5s/foo/bar/g".to_string(), ":wq!".to_string()]);
    }

    #[test]
    fn test_read_lines_missing_file_errors() {
        assert!(read_lines_from_file("/no/such/file.ex").is_err());
    }
}
