//! Command name abbreviation table
//!
//! Ex command names may be typed as any prefix no shorter than their minimal
//! abbreviation (`:su` for `:substitute`, `:e` for `:edit`). The table below
//! is scanned linearly and the first matching entry wins, so declaration
//! order doubles as tie-break priority: `w` resolves to `write` because
//! `write` is declared ahead of `wq` and `wall`. Do not reorder, and do not
//! replace the scan with a map.

/// `(full name, minimal abbreviation)` pairs, in priority order.
///
/// An empty abbreviation means any prefix of the full name is acceptable to
/// this entry; earlier entries still shadow it for contested prefixes.
pub const COMMAND_NAMES: &[(&str, &str)] = &[
    ("close", "clo"),
    ("delete", "d"),
    ("edit", "e"),
    ("exit", "exi"),
    ("display", "di"),
    ("fold", "fo"),
    ("join", "j"),
    ("make", "mak"),
    ("marks", ""),
    ("nohlsearch", "noh"),
    ("put", "pu"),
    ("quit", "q"),
    ("qall", "qa"),
    ("quitall", "quita"),
    ("redo", "red"),
    ("registers", "reg"),
    ("retab", "ret"),
    ("set", "se"),
    ("source", "so"),
    ("split", "sp"),
    ("substitute", "s"),
    ("smagic", "sm"),
    ("snomagic", "sno"),
    ("tabfirst", "tabfir"),
    ("tablast", "tabl"),
    ("tabnext", "tabn"),
    ("tabNext", "tabN"),
    ("tabprevious", "tabp"),
    ("tabrewind", "tabr"),
    ("undo", "u"),
    ("write", "w"),
    ("wq", ""),
    ("wall", "wa"),
    ("xit", "x"),
    ("yank", "y"),
    ("/", "/"),
    ("?", "?"),
    ("<", "<"),
    (">", ">"),
    ("&", "&"),
    ("~", "~"),
];

/// Expand a typed command name to its full form.
///
/// A candidate matches an entry when it equals the full name, or when it
/// both starts with the entry's abbreviation and is itself a prefix of the
/// full name. Unrecognized candidates are returned unchanged; rejection
/// happens later, at dispatch. The empty candidate matches nothing.
pub fn expand(candidate: &str) -> String {
    if candidate.is_empty() {
        return String::new();
    }
    for (full, abbreviation) in COMMAND_NAMES {
        if candidate == *full
            || (candidate.starts_with(abbreviation) && full.starts_with(candidate))
        {
            return (*full).to_string();
        }
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_abbreviations_expand() {
        for (full, abbreviation) in COMMAND_NAMES {
            if !abbreviation.is_empty() {
                assert_eq!(expand(abbreviation), *full, "abbreviation {abbreviation}");
            }
        }
    }

    #[test]
    fn test_full_names_are_fixed_points() {
        for (full, _) in COMMAND_NAMES {
            assert_eq!(expand(full), *full);
        }
    }

    #[test]
    fn test_order_breaks_ties() {
        // `write` is declared before `wq` and `wall`.
        assert_eq!(expand("w"), "write");
        assert_eq!(expand("wq"), "wq");
        assert_eq!(expand("wa"), "wall");
        // `quit` shadows `qall` and `quitall` for short prefixes.
        assert_eq!(expand("q"), "quit");
        assert_eq!(expand("qa"), "qall");
        assert_eq!(expand("quita"), "quitall");
        assert_eq!(expand("qui"), "quit");
    }

    #[test]
    fn test_substitute_family() {
        assert_eq!(expand("s"), "substitute");
        assert_eq!(expand("su"), "substitute");
        assert_eq!(expand("sm"), "smagic");
        assert_eq!(expand("sno"), "snomagic");
        // `se`, `so`, `sp` are claimed by earlier entries.
        assert_eq!(expand("se"), "set");
        assert_eq!(expand("so"), "source");
        assert_eq!(expand("sp"), "split");
    }

    #[test]
    fn test_tab_family_is_case_sensitive() {
        assert_eq!(expand("tabn"), "tabnext");
        assert_eq!(expand("tabN"), "tabNext");
        assert_eq!(expand("tabnext"), "tabnext");
        assert_eq!(expand("tabNext"), "tabNext");
    }

    #[test]
    fn test_marks_accepts_any_prefix_not_taken_earlier() {
        assert_eq!(expand("marks"), "marks");
        assert_eq!(expand("mar"), "marks");
        // `mak` belongs to make.
        assert_eq!(expand("mak"), "make");
    }

    #[test]
    fn test_punctuation_commands() {
        for name in ["/", "?", "<", ">", "&", "~"] {
            assert_eq!(expand(name), name);
        }
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(expand("frobnicate"), "frobnicate");
        assert_eq!(expand("dx"), "dx");
        assert_eq!(expand(""), "");
    }

    #[test]
    fn test_expand_is_idempotent() {
        for candidate in ["d", "su", "wq", "frobnicate", "tabN", ""] {
            let once = expand(candidate);
            assert_eq!(expand(&once), once);
        }
    }
}
