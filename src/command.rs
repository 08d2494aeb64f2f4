//! Command AST
//!
//! This module defines the structured representation an ex command line is
//! parsed into. A `Command` is the parser's sole output and the execution
//! engine's sole input; nothing here is ever resolved against a buffer;
//! line specifiers, patterns, and counts are carried exactly as written.

use serde::{Deserialize, Serialize};

use crate::mark::Mark;
use crate::register::RegisterName;

/// One addressable line, before resolution against a buffer.
///
/// Resolution (current line, mark positions, pattern searches) is the
/// execution engine's job; the parser records what was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LineSpecifier {
    /// `.`
    CurrentLine,

    /// `$` (or `%` in specifier position)
    LastLine,

    /// `'x`
    MarkLine(Mark),

    /// `/pattern/`
    NextLineWithPattern(String),

    /// `?pattern?`
    PreviousLineWithPattern(String),

    /// `//`
    NextLineWithPreviousPattern,

    /// `??`
    PreviousLineWithPreviousPattern,

    /// `/&`
    NextLineWithPreviousSubstitutePattern,

    /// An absolute line number.
    Number(u32),

    /// Standalone `+n` / `-n`: an offset from the current line.
    AdjustmentOnCurrent(i32),

    /// A specifier followed by a trailing `+n` / `-n` (`.+3`, `'a-2`).
    /// The magnitude defaults to 1 when omitted (`.+`).
    WithAdjustment {
        base: Box<LineSpecifier>,
        delta: i32,
    },
}

/// The range portion of a command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LineRange {
    /// `%`
    EntireBuffer,

    /// A single specifier with no separator.
    SingleLine(LineSpecifier),

    /// `left,right` or `left;right`. `reset_cursor_first` records a `;`
    /// separator; acting on it (re-anchoring the cursor before resolving
    /// `right`) is the execution engine's responsibility.
    Range {
        left: LineSpecifier,
        right: LineSpecifier,
        reset_cursor_first: bool,
    },
}

/// The `+...` suffix accepted by file-opening commands (`:edit +10 file`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandOption {
    /// Bare `+`
    StartAtLastLine,

    /// `+10`
    StartAtLine(u32),

    /// `+/pattern` (the pattern runs to the end of the line)
    StartAtPattern(String),

    /// `+{command}`: a nested command to run after opening.
    ExecuteLineCommand(Box<Command>),
}

/// A `++opt` file option.
///
/// `++opt` lists are not parsed yet; the parser always produces an empty
/// list, and this type exists so the AST shape does not change when they
/// are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOption(pub String);

bitflags::bitflags! {
    /// Flag letters accepted after `:substitute`'s replacement.
    ///
    /// Repeated letters are idempotent; scanning stops at the first
    /// character that is not a flag letter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct SubstituteFlags: u16 {
        /// `c`
        const CONFIRM = 1;
        /// `r`
        const USE_PREVIOUS_SEARCH_PATTERN = 1 << 1;
        /// `e`
        const SUPPRESS_ERROR = 1 << 2;
        /// `g`
        const REPLACE_ALL = 1 << 3;
        /// `i`
        const IGNORE_CASE = 1 << 4;
        /// `I`
        const ORDINAL_CASE = 1 << 5;
        /// `n`
        const REPORT_ONLY = 1 << 6;
        /// `p`
        const PRINT_LAST = 1 << 7;
        /// `l`
        const PRINT_LAST_WITH_LIST = 1 << 8;
        /// `#`
        const PRINT_LAST_WITH_NUMBER = 1 << 9;
        /// `&`
        const USE_PREVIOUS_FLAGS = 1 << 10;
    }
}

/// A fully parsed ex command, one constructor per supported command family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// `:close[!]`
    Close { bang: bool },

    /// `:[range]delete [x] [count]`
    Delete {
        range: Option<LineRange>,
        register: Option<RegisterName>,
        count: Option<u32>,
    },

    /// `:marks [arg]`
    DisplayMarks { marks: Vec<Mark> },

    /// `:display [x]` / `:registers [x]`
    DisplayRegisters { register: Option<RegisterName> },

    /// `:edit[!] [+opt] [file]`
    Edit {
        bang: bool,
        file_options: Vec<FileOption>,
        option: Option<CommandOption>,
        file_name: Option<String>,
    },

    /// `:[range]fold`
    Fold { range: Option<LineRange> },

    /// A bare `$` line: jump to the last line.
    JumpToLastLine,

    /// A bare line number: jump to that line.
    JumpToLine(u32),

    /// `:[range]join [count]`
    Join {
        range: Option<LineRange>,
        count: Option<u32>,
    },

    /// `:make[!] [args]`: the arguments are host-defined and opaque.
    Make {
        bang: bool,
        arguments: Option<String>,
    },

    /// `:[range]wq[!] [file]` and the `xit` / `exit` spellings.
    QuitWithWrite {
        range: Option<LineRange>,
        bang: bool,
        file_options: Vec<FileOption>,
        file_name: Option<String>,
    },

    /// `:[range]s/pat/repl/[flags] [count]`
    Substitute {
        range: Option<LineRange>,
        pattern: String,
        replacement: String,
        flags: SubstituteFlags,
        count: Option<u32>,
    },
}

/// The (unimplemented) expression sub-language.
///
/// No variant exists and none can be constructed; `parse_expression` fails
/// unconditionally. The type is public so the entry point's signature stays
/// stable if expression parsing is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Expression {}
