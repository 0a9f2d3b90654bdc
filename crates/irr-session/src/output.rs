//! The ordered, append-only log of display lines.

use serde::{Deserialize, Serialize};

/// Everything shown to the player, oldest line first.
///
/// Text without a line break extends the last line in place, the way a
/// terminal continues a partial line. The log is never truncated or
/// reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLog {
    lines: Vec<String>,
}

impl OutputLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a chunk of interpreter output into the log.
    ///
    /// Text up to the first line break extends the last line; each further
    /// segment becomes a new line. Joining [`lines`](Self::lines) with `\n`
    /// reproduces the concatenated chunks exactly.
    pub fn append(&mut self, text: &str) {
        let mut segments = text.split('\n');
        let head = segments.next().unwrap_or_default();
        match self.lines.last_mut() {
            Some(last) => last.push_str(head),
            None => self.lines.push(head.to_string()),
        }
        self.lines.extend(segments.map(str::to_string));
    }

    /// Start a fresh line, regardless of how the last one ended.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// All lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The last `n` lines (fewer if the log is shorter).
    pub fn tail(&self, n: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The whole log as one string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn partial_line_extends_last() {
        let mut log = OutputLog::new();
        log.append("West of ");
        log.append("House");
        assert_eq!(log.lines(), ["West of House"]);
    }

    #[test]
    fn line_breaks_start_new_lines() {
        let mut log = OutputLog::new();
        log.append("ZORK I\nCopyright");
        log.append(" 1981\n\n>");
        assert_eq!(log.lines(), ["ZORK I", "Copyright 1981", "", ">"]);
    }

    #[test]
    fn trailing_newline_leaves_open_empty_line() {
        let mut log = OutputLog::new();
        log.append("Taken.\n");
        assert_eq!(log.lines(), ["Taken.", ""]);
        log.append(">");
        assert_eq!(log.lines(), ["Taken.", ">"]);
    }

    #[test]
    fn push_line_never_merges() {
        let mut log = OutputLog::new();
        log.append(">");
        log.push_line("> look");
        log.push_line("");
        assert_eq!(log.lines(), [">", "> look", ""]);
    }

    #[test]
    fn tail_is_clamped() {
        let mut log = OutputLog::new();
        log.append("a\nb\nc");
        assert_eq!(log.tail(2), ["b", "c"]);
        assert_eq!(log.tail(10), ["a", "b", "c"]);
        assert!(OutputLog::new().tail(3).is_empty());
    }

    proptest! {
        #[test]
        fn merging_is_lossless(chunks in prop::collection::vec("[a-z >.\n]{0,12}", 1..20)) {
            let mut log = OutputLog::new();
            for chunk in &chunks {
                log.append(chunk);
            }
            prop_assert_eq!(log.text(), chunks.concat());
        }
    }
}
