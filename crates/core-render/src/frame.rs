//! One fully rendered prompt state.

/// The complete rendered text for one redraw, split into lines. Immutable
/// once produced; the paint path compares frames, it never edits them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            lines: text.as_ref().split('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl From<&str> for Frame {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Frame {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_rejoins() {
        let f = Frame::new("a\nb\nc");
        assert_eq!(f.height(), 3);
        assert_eq!(f.line(1), Some("b"));
        assert_eq!(f.text(), "a\nb\nc");
    }

    #[test]
    fn single_line_frame() {
        let f = Frame::new("just one");
        assert_eq!(f.height(), 1);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let f = Frame::new("");
        assert_eq!(f.height(), 1);
        assert_eq!(f.line(0), Some(""));
    }
}
