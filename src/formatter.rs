//! Terminal rendering of parse results
//!
//! Turns a parsed [`Command`] into a readable outline and a failure into a
//! one-line diagnostic, with colors when stdout is a terminal and NO_COLOR
//! is unset.

use std::io::IsTerminal;

use colored::*;

use crate::command::{Command, CommandOption, LineRange, LineSpecifier, SubstituteFlags};

pub struct CommandFormatter;

impl CommandFormatter {
    /// Auto-detect if we should use colors
    fn should_use_color() -> bool {
        // Check NO_COLOR env var (https://no-color.org/)
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }

        std::io::stdout().is_terminal()
    }

    /// Header naming the input line, shown above each parse result.
    pub fn format_header(line: &str) -> String {
        if Self::should_use_color() {
            format!("{}", line.bold().cyan())
        } else {
            line.to_string()
        }
    }

    /// One-line diagnostic for a failed parse.
    pub fn format_failure(message: &str) -> String {
        if Self::should_use_color() {
            format!("{} {}", "error:".red().bold(), message)
        } else {
            format!("error: {message}")
        }
    }

    /// Multi-line outline of a parsed command.
    pub fn format_command(command: &Command) -> String {
        let use_color = Self::should_use_color();
        let mut output = String::new();
        let label = |text: &str| -> String {
            if use_color {
                format!("{}", text.green().bold())
            } else {
                text.to_string()
            }
        };

        match command {
            Command::Close { bang } => {
                output.push_str(&label("close"));
                if *bang {
                    output.push_str(" (forced)");
                }
                output.push('\n');
            }
            Command::Delete {
                range,
                register,
                count,
            } => {
                output.push_str(&label("delete"));
                output.push('\n');
                Self::push_range(&mut output, range.as_ref());
                if let Some(register) = register {
                    output.push_str(&format!("  register: {}\n", register.as_char()));
                }
                if let Some(count) = count {
                    output.push_str(&format!("  count: {count}\n"));
                }
            }
            Command::DisplayMarks { marks } => {
                output.push_str(&label("marks"));
                output.push('\n');
                if !marks.is_empty() {
                    let listed: String = marks.iter().map(|mark| mark.as_char()).collect();
                    output.push_str(&format!("  marks: {listed}\n"));
                }
            }
            Command::DisplayRegisters { register } => {
                output.push_str(&label("registers"));
                output.push('\n');
                if let Some(register) = register {
                    output.push_str(&format!("  register: {}\n", register.as_char()));
                }
            }
            Command::Edit {
                bang,
                file_options: _,
                option,
                file_name,
            } => {
                output.push_str(&label("edit"));
                if *bang {
                    output.push_str(" (forced)");
                }
                output.push('\n');
                if let Some(option) = option {
                    output.push_str(&format!("  open at: {}\n", Self::describe_option(option)));
                }
                if let Some(file_name) = file_name {
                    output.push_str(&format!("  file: {file_name}\n"));
                }
            }
            Command::Fold { range } => {
                output.push_str(&label("fold"));
                output.push('\n');
                Self::push_range(&mut output, range.as_ref());
            }
            Command::JumpToLastLine => {
                output.push_str(&label("jump"));
                output.push_str("\n  to: last line\n");
            }
            Command::JumpToLine(number) => {
                output.push_str(&label("jump"));
                output.push_str(&format!("\n  to: line {number}\n"));
            }
            Command::Join { range, count } => {
                output.push_str(&label("join"));
                output.push('\n');
                Self::push_range(&mut output, range.as_ref());
                if let Some(count) = count {
                    output.push_str(&format!("  count: {count}\n"));
                }
            }
            Command::Make { bang, arguments } => {
                output.push_str(&label("make"));
                if *bang {
                    output.push_str(" (forced)");
                }
                output.push('\n');
                if let Some(arguments) = arguments {
                    output.push_str(&format!("  arguments: {arguments}\n"));
                }
            }
            Command::QuitWithWrite {
                range,
                bang,
                file_options: _,
                file_name,
            } => {
                output.push_str(&label("write and quit"));
                if *bang {
                    output.push_str(" (forced)");
                }
                output.push('\n');
                Self::push_range(&mut output, range.as_ref());
                if let Some(file_name) = file_name {
                    output.push_str(&format!("  file: {file_name}\n"));
                }
            }
            Command::Substitute {
                range,
                pattern,
                replacement,
                flags,
                count,
            } => {
                output.push_str(&label("substitute"));
                output.push('\n');
                Self::push_range(&mut output, range.as_ref());
                output.push_str(&format!("  pattern: {pattern:?}\n"));
                output.push_str(&format!("  replacement: {replacement:?}\n"));
                if !flags.is_empty() {
                    output.push_str(&format!("  flags: {}\n", Self::describe_flags(*flags)));
                }
                if let Some(count) = count {
                    output.push_str(&format!("  count: {count}\n"));
                }
            }
        }

        output
    }

    fn push_range(output: &mut String, range: Option<&LineRange>) {
        if let Some(range) = range {
            output.push_str(&format!("  range: {}\n", Self::describe_range(range)));
        }
    }

    /// Human-readable form of a line range.
    pub fn describe_range(range: &LineRange) -> String {
        match range {
            LineRange::EntireBuffer => "entire buffer".to_string(),
            LineRange::SingleLine(specifier) => Self::describe_specifier(specifier),
            LineRange::Range {
                left,
                right,
                reset_cursor_first,
            } => {
                let separator = if *reset_cursor_first { ";" } else { "," };
                format!(
                    "{} {separator} {}",
                    Self::describe_specifier(left),
                    Self::describe_specifier(right)
                )
            }
        }
    }

    /// Human-readable form of a line specifier.
    pub fn describe_specifier(specifier: &LineSpecifier) -> String {
        match specifier {
            LineSpecifier::CurrentLine => "current line".to_string(),
            LineSpecifier::LastLine => "last line".to_string(),
            LineSpecifier::MarkLine(mark) => format!("mark '{}", mark.as_char()),
            LineSpecifier::NextLineWithPattern(pattern) => {
                format!("next line matching {pattern:?}")
            }
            LineSpecifier::PreviousLineWithPattern(pattern) => {
                format!("previous line matching {pattern:?}")
            }
            LineSpecifier::NextLineWithPreviousPattern => {
                "next line matching the previous pattern".to_string()
            }
            LineSpecifier::PreviousLineWithPreviousPattern => {
                "previous line matching the previous pattern".to_string()
            }
            LineSpecifier::NextLineWithPreviousSubstitutePattern => {
                "next line matching the previous substitute pattern".to_string()
            }
            LineSpecifier::Number(number) => format!("line {number}"),
            LineSpecifier::AdjustmentOnCurrent(delta) => format!("current line {delta:+}"),
            LineSpecifier::WithAdjustment { base, delta } => {
                format!("{} {delta:+}", Self::describe_specifier(base))
            }
        }
    }

    fn describe_option(option: &CommandOption) -> String {
        match option {
            CommandOption::StartAtLastLine => "last line".to_string(),
            CommandOption::StartAtLine(number) => format!("line {number}"),
            CommandOption::StartAtPattern(pattern) => format!("first match of {pattern:?}"),
            CommandOption::ExecuteLineCommand(command) => {
                format!("result of running {command:?}")
            }
        }
    }

    fn describe_flags(flags: SubstituteFlags) -> String {
        let mut parts = Vec::new();
        for (name, flag) in [
            ("confirm", SubstituteFlags::CONFIRM),
            ("previous-search-pattern", SubstituteFlags::USE_PREVIOUS_SEARCH_PATTERN),
            ("suppress-error", SubstituteFlags::SUPPRESS_ERROR),
            ("replace-all", SubstituteFlags::REPLACE_ALL),
            ("ignore-case", SubstituteFlags::IGNORE_CASE),
            ("ordinal-case", SubstituteFlags::ORDINAL_CASE),
            ("report-only", SubstituteFlags::REPORT_ONLY),
            ("print-last", SubstituteFlags::PRINT_LAST),
            ("print-last-with-list", SubstituteFlags::PRINT_LAST_WITH_LIST),
            ("print-last-with-number", SubstituteFlags::PRINT_LAST_WITH_NUMBER),
            ("previous-flags", SubstituteFlags::USE_PREVIOUS_FLAGS),
        ] {
            if flags.contains(flag) {
                parts.push(name);
            }
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseResult, parse_line_command};

    fn parsed(line: &str) -> Command {
        match parse_line_command(line) {
            ParseResult::Succeeded(command) => command,
            ParseResult::Failed(message) => panic!("{message}"),
        }
    }

    #[test]
    fn test_format_substitute_outline() {
        let rendered = CommandFormatter::format_command(&parsed(":1,5s/foo/bar/g"));
        assert!(rendered.contains("substitute"));
        assert!(rendered.contains("line 1 , line 5"));
        assert!(rendered.contains("\"foo\""));
        assert!(rendered.contains("\"bar\""));
        assert!(rendered.contains("replace-all"));
    }

    #[test]
    fn test_format_close_forced() {
        let rendered = CommandFormatter::format_command(&parsed(":close!"));
        assert!(rendered.contains("close"));
        assert!(rendered.contains("forced"));
    }

    #[test]
    fn test_format_failure_mentions_message() {
        let rendered = CommandFormatter::format_failure("not an editor command: zz");
        assert!(rendered.contains("error:"));
        assert!(rendered.contains("not an editor command: zz"));
    }

    #[test]
    fn test_describe_specifier_adjustments() {
        assert_eq!(
            CommandFormatter::describe_specifier(&LineSpecifier::AdjustmentOnCurrent(-2)),
            "current line -2"
        );
        assert_eq!(
            CommandFormatter::describe_specifier(&LineSpecifier::WithAdjustment {
                base: Box::new(LineSpecifier::LastLine),
                delta: 3,
            }),
            "last line +3"
        );
    }

    #[test]
    fn test_describe_range_semicolon_separator() {
        let rendered = CommandFormatter::describe_range(&LineRange::Range {
            left: LineSpecifier::Number(1),
            right: LineSpecifier::Number(5),
            reset_cursor_first: true,
        });
        assert_eq!(rendered, "line 1 ; line 5");
    }
}
