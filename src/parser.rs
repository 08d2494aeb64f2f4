//! Ex command line grammar
//!
//! A single pass over one line of input: an optional numeric or `$` jump
//! shortcut, an optional line range, a command name resolved through the
//! abbreviation table, one family-specific argument grammar, and a final
//! check that the whole line was consumed.
//!
//! Parsing either commits its cursor movement and succeeds, or fails with a
//! diagnostic; there is no partial success. The grammar does not backtrack,
//! with two deliberate, local exceptions: `Scanner::take_pattern` restores
//! the cursor when a closing delimiter is missing, and the `+{command}`
//! file option rolls back to its `+` when the nested parse fails.

use tracing::trace;

use crate::abbrev;
use crate::command::{
    Command, CommandOption, Expression, FileOption, LineRange, LineSpecifier, SubstituteFlags,
};
use crate::mark::Mark;
use crate::register::RegisterName;
use crate::scanner::{Scanner, is_blank};

/// Outcome of a parse: a value, or a diagnostic message.
///
/// On `Failed` the scanner's cursor is not meaningfully positioned and the
/// caller must not continue parsing from it.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult<T> {
    Succeeded(T),
    Failed(String),
}

impl<T> ParseResult<T> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, ParseResult::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ParseResult::Failed(_))
    }

    /// The parsed value, discarding any diagnostic.
    pub fn succeeded(self) -> Option<T> {
        match self {
            ParseResult::Succeeded(value) => Some(value),
            ParseResult::Failed(_) => None,
        }
    }

    /// The diagnostic message, if this is a failure.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ParseResult::Succeeded(_) => None,
            ParseResult::Failed(message) => Some(message),
        }
    }
}

/// Parse one full ex command line into a [`Command`].
///
/// A leading `:` is accepted and ignored. The entire line must be consumed:
/// leftover characters after a well-formed command are a failure.
pub fn parse_line_command(line: &str) -> ParseResult<Command> {
    trace!("parsing command line: {line:?}");
    let input = line.strip_prefix(':').unwrap_or(line);
    let mut scanner = Scanner::new(input);
    parse_single_command(&mut scanner)
}

/// Parse a leading line range and return it with the unconsumed remainder.
///
/// Helper for collaborators that only need range syntax. Unlike the grammar
/// position inside [`parse_line_command`], where an absent range is a valid
/// outcome, this entry point fails when the input does not start with a
/// range.
pub fn parse_line_range(line: &str) -> ParseResult<(LineRange, String)> {
    trace!("parsing line range: {line:?}");
    let mut scanner = Scanner::new(line);
    match parse_range(&mut scanner) {
        Some(range) => ParseResult::Succeeded((range, scanner.take_remainder())),
        None => ParseResult::Failed(format!("not a line range: {line}")),
    }
}

/// Parse an expression.
///
/// The expression sub-language has never been implemented; this fails for
/// every input, and callers rely on that being uniform rather than input
/// dependent. Keep the contract if you extend it.
pub fn parse_expression(_line: &str) -> ParseResult<Expression> {
    ParseResult::Failed("expression parsing is not implemented".to_string())
}

/// One pass of the top-level command grammar.
fn parse_single_command(scanner: &mut Scanner) -> ParseResult<Command> {
    scanner.skip_blanks();

    let command = match parse_command_body(scanner) {
        ParseResult::Succeeded(command) => command,
        failed => return failed,
    };

    scanner.skip_blanks();
    if !scanner.is_at_end() {
        return ParseResult::Failed(format!(
            "trailing characters: {}",
            scanner.take_remainder()
        ));
    }
    ParseResult::Succeeded(command)
}

fn parse_command_body(scanner: &mut Scanner) -> ParseResult<Command> {
    if scanner.matches(|ch| ch.is_ascii_digit()) {
        // A line that is nothing but a number jumps to that line. When more
        // input follows, the digits start a range instead and the cursor is
        // put back for the range parse.
        let start = scanner.pos();
        match scanner.take_unsigned_integer() {
            Some(number) => {
                let mut lookahead = scanner.clone();
                lookahead.skip_blanks();
                if lookahead.is_at_end() {
                    return ParseResult::Succeeded(Command::JumpToLine(number));
                }
                scanner.rewind(start);
            }
            // Unreachable given the guard above; a hard failure rather than
            // a panic.
            None => return ParseResult::Failed("expected a line number".to_string()),
        }
    } else if scanner.matches_char('$') {
        // Unlike digits, a leading `$` always means "jump to the last
        // line"; `$` only acts as a range endpoint in non-leading position.
        scanner.advance();
        return ParseResult::Succeeded(Command::JumpToLastLine);
    }

    let range = parse_range(scanner);
    scanner.skip_blanks();
    let name = take_command_name(scanner);
    let expanded = abbrev::expand(&name);
    dispatch(scanner, &expanded, range)
}

/// The command-name token: a maximal run of ASCII letters, or a single
/// punctuation command character when no letter is present. Anything else
/// (including an empty line) yields the empty string, which dispatch
/// rejects.
fn take_command_name(scanner: &mut Scanner) -> String {
    let mut name = String::new();
    while let Some(ch) = scanner.peek() {
        if !ch.is_ascii_alphabetic() {
            break;
        }
        name.push(ch);
        scanner.advance();
    }
    if name.is_empty() {
        if let Some(ch @ ('/' | '?' | '<' | '>' | '&' | '~')) = scanner.peek() {
            name.push(ch);
            scanner.advance();
        }
    }
    name
}

/// Route an expanded command name to its family sub-parser.
///
/// The abbreviation table is larger than the dispatchable set on purpose:
/// names like `put` or `undo` resolve but have no sub-parser and fail here,
/// exactly like names the table never heard of.
fn dispatch(
    scanner: &mut Scanner,
    name: &str,
    range: Option<LineRange>,
) -> ParseResult<Command> {
    match name {
        "close" => parse_close(scanner, range),
        "delete" => parse_delete(scanner, range),
        "display" | "registers" => parse_display_registers(scanner, range),
        "edit" => parse_edit(scanner, range),
        "exit" | "wq" | "xit" => parse_write_quit(scanner, range),
        "fold" => ParseResult::Succeeded(Command::Fold { range }),
        "join" => parse_join(scanner, range),
        "make" => parse_make(scanner, range),
        "marks" => parse_marks(scanner, range),
        "substitute" => parse_substitute(scanner, range),
        _ => ParseResult::Failed(format!("not an editor command: {name}")),
    }
}

// ---------------------------------------------------------------------------
// Line specifiers and ranges
// ---------------------------------------------------------------------------

/// Parse an optional line range at the cursor.
///
/// `None` means "no range here", which is valid at the top level. A
/// separator with no right-hand specifier also collapses to `None` with the
/// left side already consumed; the leftover input then fails the name parse,
/// which is the surfaced error for a dangling `1,`.
fn parse_range(scanner: &mut Scanner) -> Option<LineRange> {
    if scanner.matches_char('%') {
        scanner.advance();
        return Some(LineRange::EntireBuffer);
    }
    let left = parse_line_specifier(scanner)?;
    match scanner.peek() {
        Some(separator @ (',' | ';')) => {
            scanner.advance();
            let right = parse_line_specifier(scanner)?;
            Some(LineRange::Range {
                left,
                right,
                reset_cursor_first: separator == ';',
            })
        }
        _ => Some(LineRange::SingleLine(left)),
    }
}

/// Parse one line specifier, including at most one trailing adjustment.
fn parse_line_specifier(scanner: &mut Scanner) -> Option<LineSpecifier> {
    let base = parse_base_specifier(scanner)?;
    Some(parse_trailing_adjustment(scanner, base))
}

fn parse_base_specifier(scanner: &mut Scanner) -> Option<LineSpecifier> {
    match scanner.peek()? {
        '.' => {
            scanner.advance();
            Some(LineSpecifier::CurrentLine)
        }
        '\'' => {
            let start = scanner.pos();
            scanner.advance();
            match scanner.take_char().and_then(Mark::from_char) {
                Some(mark) => Some(LineSpecifier::MarkLine(mark)),
                None => {
                    scanner.rewind(start);
                    None
                }
            }
        }
        '$' | '%' => {
            scanner.advance();
            Some(LineSpecifier::LastLine)
        }
        '/' => {
            let start = scanner.pos();
            scanner.advance();
            if scanner.matches_char('/') {
                scanner.advance();
                Some(LineSpecifier::NextLineWithPreviousPattern)
            } else if scanner.matches_char('&') {
                scanner.advance();
                Some(LineSpecifier::NextLineWithPreviousSubstitutePattern)
            } else {
                match scanner.take_pattern('/') {
                    Some(pattern) => Some(LineSpecifier::NextLineWithPattern(pattern)),
                    None => {
                        scanner.rewind(start);
                        None
                    }
                }
            }
        }
        '?' => {
            let start = scanner.pos();
            scanner.advance();
            if scanner.matches_char('?') {
                scanner.advance();
                Some(LineSpecifier::PreviousLineWithPreviousPattern)
            } else {
                match scanner.take_pattern('?') {
                    Some(pattern) => Some(LineSpecifier::PreviousLineWithPattern(pattern)),
                    None => {
                        scanner.rewind(start);
                        None
                    }
                }
            }
        }
        sign @ ('+' | '-') => {
            // In leading position the digits are required: a bare `+` or
            // `-` is not a specifier here (unlike the trailing-adjustment
            // position, where the magnitude defaults to 1).
            let start = scanner.pos();
            scanner.advance();
            match scanner.take_unsigned_integer() {
                Some(magnitude) => Some(LineSpecifier::AdjustmentOnCurrent(signed(
                    sign, magnitude,
                ))),
                None => {
                    scanner.rewind(start);
                    None
                }
            }
        }
        ch if ch.is_ascii_digit() => {
            scanner.take_unsigned_integer().map(LineSpecifier::Number)
        }
        _ => None,
    }
}

/// Apply at most one trailing `+n` / `-n` to a recognized specifier.
/// `1+2-3` does not chain: the second sign is left for the caller, where it
/// will fail the name parse.
fn parse_trailing_adjustment(scanner: &mut Scanner, base: LineSpecifier) -> LineSpecifier {
    let sign = match scanner.peek() {
        Some(sign @ ('+' | '-')) => sign,
        _ => return base,
    };
    scanner.advance();
    let magnitude = scanner.take_unsigned_integer().unwrap_or(1);
    LineSpecifier::WithAdjustment {
        base: Box::new(base),
        delta: signed(sign, magnitude),
    }
}

fn signed(sign: char, magnitude: u32) -> i32 {
    let magnitude = magnitude.min(i32::MAX as u32) as i32;
    if sign == '-' { -magnitude } else { magnitude }
}

// ---------------------------------------------------------------------------
// Family sub-parsers
// ---------------------------------------------------------------------------

fn no_range_allowed(name: &str) -> ParseResult<Command> {
    ParseResult::Failed(format!("no range allowed for :{name}"))
}

/// Consume an optional `!` directly after the command name.
fn take_bang(scanner: &mut Scanner) -> bool {
    if scanner.matches_char('!') {
        scanner.advance();
        true
    } else {
        false
    }
}

/// `:close[!]`
fn parse_close(scanner: &mut Scanner, range: Option<LineRange>) -> ParseResult<Command> {
    if range.is_some() {
        return no_range_allowed("close");
    }
    let bang = take_bang(scanner);
    ParseResult::Succeeded(Command::Close { bang })
}

/// `:[range]delete [x] [count]`
fn parse_delete(scanner: &mut Scanner, range: Option<LineRange>) -> ParseResult<Command> {
    scanner.skip_blanks();
    // A digit here is a count, never the numbered register.
    let register = match scanner.peek() {
        Some(ch) if !ch.is_ascii_digit() => match RegisterName::from_char(ch) {
            Some(register) => {
                scanner.advance();
                Some(register)
            }
            None => None,
        },
        _ => None,
    };
    scanner.skip_blanks();
    let count = scanner.take_unsigned_integer();
    ParseResult::Succeeded(Command::Delete {
        range,
        register,
        count,
    })
}

/// `:display [x]` / `:registers [x]`
fn parse_display_registers(
    scanner: &mut Scanner,
    range: Option<LineRange>,
) -> ParseResult<Command> {
    if range.is_some() {
        return no_range_allowed("registers");
    }
    scanner.skip_blanks();
    let register = match scanner.peek().and_then(RegisterName::from_char) {
        Some(register) => {
            scanner.advance();
            Some(register)
        }
        None => None,
    };
    ParseResult::Succeeded(Command::DisplayRegisters { register })
}

/// `:edit[!] [+opt] [file]`
fn parse_edit(scanner: &mut Scanner, range: Option<LineRange>) -> ParseResult<Command> {
    if range.is_some() {
        return no_range_allowed("edit");
    }
    let bang = take_bang(scanner);
    scanner.skip_blanks();
    let file_options = parse_file_options(scanner);
    scanner.skip_blanks();
    let option = parse_command_option(scanner);
    scanner.skip_blanks();
    let file_name = take_file_name(scanner);
    ParseResult::Succeeded(Command::Edit {
        bang,
        file_options,
        option,
        file_name,
    })
}

/// `:[range]wq[!] [file]` and the `xit` / `exit` spellings.
fn parse_write_quit(scanner: &mut Scanner, range: Option<LineRange>) -> ParseResult<Command> {
    let bang = take_bang(scanner);
    scanner.skip_blanks();
    let file_options = parse_file_options(scanner);
    scanner.skip_blanks();
    let file_name = take_file_name(scanner);
    ParseResult::Succeeded(Command::QuitWithWrite {
        range,
        bang,
        file_options,
        file_name,
    })
}

/// `:[range]join [count]`
fn parse_join(scanner: &mut Scanner, range: Option<LineRange>) -> ParseResult<Command> {
    scanner.skip_blanks();
    let count = scanner.take_unsigned_integer();
    ParseResult::Succeeded(Command::Join { range, count })
}

/// `:make[!] [args]`: everything after the name is one opaque argument
/// string for the host's build program.
fn parse_make(scanner: &mut Scanner, range: Option<LineRange>) -> ParseResult<Command> {
    if range.is_some() {
        return no_range_allowed("make");
    }
    let bang = take_bang(scanner);
    scanner.skip_blanks();
    let rest = scanner.take_remainder();
    let arguments = if rest.is_empty() { None } else { Some(rest) };
    ParseResult::Succeeded(Command::Make { bang, arguments })
}

/// `:marks [arg]`
///
/// Every character of the argument word must name a mark. Invalid characters
/// each produce a diagnostic; if any occurred, the whole command fails and
/// the valid marks that were collected are discarded.
fn parse_marks(scanner: &mut Scanner, range: Option<LineRange>) -> ParseResult<Command> {
    if range.is_some() {
        return no_range_allowed("marks");
    }
    scanner.skip_blanks();
    let mut marks = Vec::new();
    let mut problems = Vec::new();
    if let Some(word) = scanner.take_word() {
        for ch in word.chars() {
            match Mark::from_char(ch) {
                Some(mark) => marks.push(mark),
                None => problems.push(format!("invalid mark character: {ch}")),
            }
        }
    }
    if !problems.is_empty() {
        return ParseResult::Failed(problems.join("; "));
    }
    ParseResult::Succeeded(Command::DisplayMarks { marks })
}

/// `:[range]s/pat/repl/[flags] [count]`
fn parse_substitute(scanner: &mut Scanner, range: Option<LineRange>) -> ParseResult<Command> {
    scanner.skip_blanks();
    let delimiter = match scanner.peek() {
        Some(ch) if is_substitute_delimiter(ch) => ch,
        Some(ch) => {
            return ParseResult::Failed(format!("invalid substitute delimiter: {ch}"));
        }
        None => return ParseResult::Failed("substitute is missing a delimiter".to_string()),
    };
    scanner.advance();
    let Some(pattern) = scanner.take_pattern(delimiter) else {
        return ParseResult::Failed(format!(
            "unterminated pattern: missing closing {delimiter}"
        ));
    };
    let Some(replacement) = scanner.take_pattern(delimiter) else {
        return ParseResult::Failed(format!(
            "unterminated replacement: missing closing {delimiter}"
        ));
    };
    let flags = scan_substitute_flags(scanner);
    scanner.skip_blanks();
    let count = scanner.take_unsigned_integer();
    ParseResult::Succeeded(Command::Substitute {
        range,
        pattern,
        replacement,
        flags,
        count,
    })
}

/// Anything but letters, digits, backslash, double quote, pipe, and blanks
/// can delimit a substitution.
fn is_substitute_delimiter(ch: char) -> bool {
    !(ch.is_alphanumeric() || ch == '\\' || ch == '"' || ch == '|' || is_blank(ch))
}

/// Fold flag letters into a set; the first non-flag character ends the scan
/// without error so a trailing count or end of line can follow.
fn scan_substitute_flags(scanner: &mut Scanner) -> SubstituteFlags {
    let mut flags = SubstituteFlags::empty();
    while let Some(ch) = scanner.peek() {
        let flag = match ch {
            '&' => SubstituteFlags::USE_PREVIOUS_FLAGS,
            'c' => SubstituteFlags::CONFIRM,
            'e' => SubstituteFlags::SUPPRESS_ERROR,
            'g' => SubstituteFlags::REPLACE_ALL,
            'i' => SubstituteFlags::IGNORE_CASE,
            'I' => SubstituteFlags::ORDINAL_CASE,
            'n' => SubstituteFlags::REPORT_ONLY,
            'p' => SubstituteFlags::PRINT_LAST,
            'l' => SubstituteFlags::PRINT_LAST_WITH_LIST,
            '#' => SubstituteFlags::PRINT_LAST_WITH_NUMBER,
            'r' => SubstituteFlags::USE_PREVIOUS_SEARCH_PATTERN,
            _ => break,
        };
        flags |= flag;
        scanner.advance();
    }
    flags
}

// ---------------------------------------------------------------------------
// File options and the `+` command option
// ---------------------------------------------------------------------------

/// Parse a `++opt` file-option list.
///
/// Not implemented: nothing is consumed and the list is always empty.
/// TODO: parse ++ff/++enc/++bin once an executor exists that honors them.
fn parse_file_options(_scanner: &mut Scanner) -> Vec<FileOption> {
    Vec::new()
}

/// Parse the optional `+...` suffix of a file-opening command.
///
/// Digits give a starting line, `/` a starting pattern running to the end
/// of the line, a bare `+` the last line. Anything else is attempted as a
/// nested command; if that parse fails, the cursor rolls back to the `+`
/// and the option is simply absent; the inner failure is not propagated.
fn parse_command_option(scanner: &mut Scanner) -> Option<CommandOption> {
    if !scanner.matches_char('+') {
        return None;
    }
    let start = scanner.pos();
    scanner.advance();
    match scanner.peek() {
        Some(ch) if ch.is_ascii_digit() => {
            scanner.take_unsigned_integer().map(CommandOption::StartAtLine)
        }
        Some('/') => {
            scanner.advance();
            Some(CommandOption::StartAtPattern(scanner.take_remainder()))
        }
        Some(ch) if is_blank(ch) => Some(CommandOption::StartAtLastLine),
        None => Some(CommandOption::StartAtLastLine),
        _ => match scanner.take_word() {
            Some(word) => match parse_line_command(&word) {
                ParseResult::Succeeded(command) => {
                    Some(CommandOption::ExecuteLineCommand(Box::new(command)))
                }
                ParseResult::Failed(_) => {
                    scanner.rewind(start);
                    None
                }
            },
            None => {
                scanner.rewind(start);
                None
            }
        },
    }
}

/// The rest of the line as a file name, if there is anything left.
fn take_file_name(scanner: &mut Scanner) -> Option<String> {
    let rest = scanner.take_remainder();
    if rest.is_empty() { None } else { Some(rest) }
}
