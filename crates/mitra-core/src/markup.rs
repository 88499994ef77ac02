//! Inline markup for bot answers.
//!
//! The assistant replies in a constrained markdown subset: `**bold**`,
//! `*italic*` and literal newlines. [`render_inline`] turns that subset into
//! display markup; [`strip_for_speech`] produces the plain text handed to the
//! speech coordinator. Both are pure and total; unmatched delimiters pass
//! through as literal characters.
//!
//! All text content is HTML-escaped before any token is emitted, so only the
//! allow-listed `<strong>`/`<em>`/`<br>` tags ever reach the display surface.

use regex::Regex;
use std::sync::OnceLock;

fn bold_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("literal pattern"))
}

fn italic_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*(.*?)\*").expect("literal pattern"))
}

/// Escape text for safe insertion into markup. Applied to every answer before
/// token substitution, and to fallback/error strings displayed verbatim.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the constrained markdown subset to inline markup.
///
/// Paired `**text**` becomes `<strong>text</strong>`, paired `*text*` becomes
/// `<em>text</em>`, and newlines become `<br>`. A delimiter without a partner
/// stays in the output as-is. Empty input yields empty output.
pub fn render_inline(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let text = escape_text(raw);
    let text = bold_token().replace_all(&text, "<strong>$1</strong>");
    let text = italic_token().replace_all(&text, "<em>$1</em>");
    text.replace('\n', "<br>")
}

/// Strip markup delimiters for speech: drop `*` characters and collapse all
/// whitespace runs (including newlines) into single spaces, trimming the ends.
pub fn strip_for_speech(raw: &str) -> String {
    let without_stars = raw.replace('*', "");
    without_stars.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bold_italic_and_newline() {
        assert_eq!(
            render_inline("**a** *b*\nc"),
            "<strong>a</strong> <em>b</em><br>c"
        );
    }

    #[test]
    fn strips_to_plain_speech_text() {
        assert_eq!(strip_for_speech("**a** *b*\nc"), "a b c");
    }

    #[test]
    fn unmatched_delimiters_stay_literal() {
        assert_eq!(render_inline("a *b"), "a *b");
        assert_eq!(render_inline("*a"), "*a");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(render_inline(""), "");
        assert_eq!(strip_for_speech(""), "");
    }

    #[test]
    fn escapes_hostile_content_but_keeps_allowed_tokens() {
        let rendered = render_inline("**safe** <script>alert(1)</script>");
        assert!(rendered.starts_with("<strong>safe</strong>"));
        assert!(rendered.contains("&lt;script&gt;"));
        assert!(!rendered.contains("<script>"));
    }

    #[test]
    fn collapses_whitespace_runs_for_speech() {
        assert_eq!(strip_for_speech("  a \n\n b\t c  "), "a b c");
    }

    #[test]
    fn newline_inside_answer_becomes_break() {
        assert_eq!(
            render_inline("**Rain** expected\nBring umbrella"),
            "<strong>Rain</strong> expected<br>Bring umbrella"
        );
    }
}
