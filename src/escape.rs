//! Shell escaping for command fragments
//!
//! Two disciplines, applied at append time:
//! - Argument escaping treats the value as opaque data and quotes it so the
//!   shell never word-splits, globs, or expands it.
//! - Command-position escaping keeps a sub-command token a single literal
//!   word by backslash-escaping metacharacters instead of quoting.

use std::borrow::Cow;

/// Characters that carry meaning to the shell in command position.
const COMMAND_METACHARACTERS: &[char] = &[
    '#', '&', ';', '`', '|', '*', '?', '~', '<', '>', '^', '(', ')', '[', ']', '{', '}', '$',
    '\\', '"', '\'', '\n', ' ', '\t',
];

/// Escape a value for use as a single shell argument.
///
/// Safe strings pass through unchanged; anything else is single-quoted.
pub fn escape_argument(value: &str) -> String {
    shell_escape::escape(Cow::Borrowed(value)).into_owned()
}

/// Escape a token for use in command position (e.g. the `add` in `git add`).
///
/// Metacharacters are neutralized with a backslash so the token stays one
/// literal word without picking up quoting that would change how the shell
/// resolves it as a command name.
pub fn escape_command(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());

    for ch in token.chars() {
        if COMMAND_METACHARACTERS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_argument_plain() {
        assert_eq!(escape_argument("file.txt"), "file.txt");
        assert_eq!(escape_argument("-la"), "-la");
        assert_eq!(escape_argument("./path/to/file"), "./path/to/file");
    }

    #[test]
    fn test_escape_argument_spaces() {
        assert_eq!(escape_argument("./tmp file.xls"), "'./tmp file.xls'");
    }

    #[test]
    fn test_escape_argument_metacharacters() {
        let escaped = escape_argument("a; rm -rf /");
        assert!(escaped.starts_with('\''));
        assert!(escaped.ends_with('\''));

        let escaped = escape_argument("$(whoami)");
        assert!(escaped.starts_with('\''));
    }

    #[test]
    fn test_escape_argument_embedded_quote() {
        // A quote inside the value must not terminate the quoting.
        assert_eq!(escape_argument("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_escape_command_plain() {
        assert_eq!(escape_command("add"), "add");
        assert_eq!(escape_command("commit-all"), "commit-all");
    }

    #[test]
    fn test_escape_command_metacharacters() {
        assert_eq!(escape_command("a;b"), "a\\;b");
        assert_eq!(escape_command("a b"), "a\\ b");
        assert_eq!(escape_command("$(x)"), "\\$\\(x\\)");
        assert_eq!(escape_command("a`b`"), "a\\`b\\`");
    }
}
