/// Pixel width measurement for a run of text under some font metrics.
pub trait TextMeasure {
    /// Advance width of `text` in pixels when laid out on one line.
    fn measure(&mut self, text: &str) -> f32;
}

/// Result of greedy wrapping: lines in original word order.
///
/// Every line measures `<= max_width`, except a line holding a single word that is wider than
/// `max_width` on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineLayout {
    lines: Vec<String>,
}

impl LineLayout {
    /// Wrapped lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Return `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consume into owned lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Words are split on Unicode whitespace and joined with a single space. A word that does not fit
/// even on an empty line is emitted alone rather than hyphenated or truncated.
pub fn wrap(text: &str, max_width: f32, metrics: &mut impl TextMeasure) -> LineLayout {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };

        if metrics.measure(&candidate) <= max_width {
            current = candidate;
        } else if current.is_empty() {
            // Over-long first word of a line: it stands alone.
            lines.push(candidate);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    LineLayout { lines }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
