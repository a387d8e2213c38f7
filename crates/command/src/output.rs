//! Terminal output cleanup for captured container logs.
//!
//! Two independent transforms, applied in this order by [`clean_log_text`]:
//!
//! 1. [`strip_ansi_escapes`] removes color codes (CSI), window-title
//!    sequences (OSC), cursor-visibility toggles and other escape sequences.
//! 2. [`collapse_backspaces`] applies backspace semantics: each `\x08`
//!    deletes the character emitted immediately before it.

use std::sync::LazyLock;

use regex::Regex;

/// OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`), CSI (`ESC [ params final`),
/// charset designation (`ESC ( B`) and two-byte Fe escapes.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\x1B(?:\][^\x07\x1B]*(?:\x07|\x1B\\)|\[[0-?]*[ -/]*[@-~]|[()][0-9A-Za-z]|[@-Z\\-_])",
    )
    .expect("ANSI escape pattern is valid")
});

const BACKSPACE: char = '\u{8}';

/// Removes ANSI escape sequences, keeping visible text and control
/// characters such as `\n`, `\t` and backspace untouched.
pub fn strip_ansi_escapes(input: &str) -> String {
    ANSI_ESCAPE.replace_all(input, "").into_owned()
}

/// Applies backspace characters: each one removes the previously emitted
/// character. A backspace with nothing before it is dropped.
pub fn collapse_backspaces(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c == BACKSPACE {
            out.pop();
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape-stripping followed by backspace-collapsing.
pub fn clean_log_text(input: &str) -> String {
    collapse_backspaces(&strip_ansi_escapes(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_color_codes_and_backspace() {
        assert_eq!(clean_log_text("ab\x08c\x1B[31mRED\x1B[0m"), "acRED");
    }

    #[test]
    fn strip_keeps_backspace_for_second_pass() {
        assert_eq!(strip_ansi_escapes("ab\x08c\x1B[1;32m"), "ab\x08c");
    }

    #[test]
    fn strips_window_title_sequences() {
        assert_eq!(strip_ansi_escapes("\x1B]0;build log\x07done"), "done");
        assert_eq!(strip_ansi_escapes("\x1B]2;title\x1B\\done"), "done");
    }

    #[test]
    fn strips_cursor_visibility_toggles() {
        assert_eq!(strip_ansi_escapes("\x1B[?25lprogress\x1B[?25h"), "progress");
    }

    #[test]
    fn strips_cursor_movement_and_erase() {
        assert_eq!(strip_ansi_escapes("50%\x1B[2K\x1B[1G100%"), "50%100%");
    }

    #[test]
    fn keeps_newlines_and_tabs() {
        assert_eq!(
            clean_log_text("line1\n\tline2\r\n"),
            "line1\n\tline2\r\n"
        );
    }

    #[test]
    fn leading_backspace_is_dropped() {
        assert_eq!(collapse_backspaces("\x08\x08abc"), "abc");
    }

    #[test]
    fn backspace_deletes_multibyte_char() {
        assert_eq!(collapse_backspaces("가나\x08다"), "가다");
    }

    #[test]
    fn consecutive_backspaces_delete_in_order() {
        assert_eq!(collapse_backspaces("abcd\x08\x08x"), "abx");
    }

    #[test]
    fn order_matters_escape_before_backspace() {
        // backspace after an escape sequence deletes the visible char before it
        assert_eq!(clean_log_text("ab\x1B[0m\x08"), "a");
    }

    #[test]
    fn plain_text_is_unchanged() {
        let text = "Started Application in 3.2 seconds";
        assert_eq!(clean_log_text(text), text);
    }
}
