//! Terminal implementations of the display capabilities.
//!
//! [`TermSurface`] is the chat's display surface: entries print as lines,
//! pending bot entries show a thinking line that is superseded by the
//! resolved one (matched by entry number), and scrolling is the terminal's
//! own job. [`StaticPanel`] is a fixed labelled region for the weather and
//! market-price panels.

use mitra_core::{ChatSurface, PanelTarget, Sender};

/// Convert the renderer's inline markup to ANSI styling for the terminal.
pub fn markup_to_ansi(markup: &str) -> String {
    markup
        .replace("<br>", "\n")
        .replace("<strong>", "\x1b[1m")
        .replace("</strong>", "\x1b[0m")
        .replace("<em>", "\x1b[3m")
        .replace("</em>", "\x1b[0m")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[derive(Debug, Default)]
pub struct TermSurface;

impl TermSurface {
    pub fn new() -> Self {
        Self
    }
}

impl ChatSurface for TermSurface {
    fn append_entry(&self, id: usize, sender: Sender, content: &str, pending: bool) {
        match sender {
            Sender::User => println!("[आप] {content}"),
            Sender::Bot if pending => println!("[मित्र #{id}] सोच रहा हूँ…"),
            Sender::Bot => println!("[मित्र #{id}] {content}"),
        }
    }

    fn resolve_entry(&self, id: usize, content: &str) {
        println!("[मित्र #{id}] {}", markup_to_ansi(content));
    }

    fn scroll_to_end(&self) {}
}

/// Labelled stdout region for a one-shot data panel.
#[derive(Debug)]
pub struct StaticPanel {
    label: String,
}

impl StaticPanel {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl PanelTarget for StaticPanel {
    fn show(&self, text: &str) {
        for line in text.lines() {
            println!("[{}] {line}", self.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_becomes_ansi_styling() {
        assert_eq!(
            markup_to_ansi("<strong>a</strong> <em>b</em><br>c"),
            "\x1b[1ma\x1b[0m \x1b[3mb\x1b[0m\nc"
        );
    }

    #[test]
    fn escaped_entities_are_restored_for_display() {
        assert_eq!(markup_to_ansi("1 &lt; 2 &amp;&amp; 3 &gt; 2"), "1 < 2 && 3 > 2");
    }
}
