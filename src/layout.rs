//! Fixed-width line composition.
//!
//! Every record is a 100-character line. Textual fields are justified with
//! blanks while the line is composed; once composed, every blank is replaced
//! with the fill character so that no literal space survives in the output.

/// Width of every encoded record.
pub const RECORD_WIDTH: usize = 100;

/// Universal fill/pad character.
pub const FILL: char = '0';

/// Left-justifies `value` in a field of `width`, padding with blanks.
pub fn left(value: &str, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}

/// Right-justifies `value` in a field of `width`, padding with blanks.
pub fn right(value: &str, width: usize) -> String {
    format!("{:>width$}", value, width = width)
}

/// A run of `count` fill characters.
pub fn fill(count: usize) -> String {
    std::iter::repeat(FILL).take(count).collect()
}

/// Replaces every blank with the fill character.
pub fn finish(line: String) -> String {
    line.replace(' ', &FILL.to_string())
}

/// Line builder that concatenates fields in order.
#[derive(Debug, Default)]
pub struct LineBuilder {
    line: String,
}

impl LineBuilder {
    /// Starts a line with the record marker.
    pub fn new(marker: &str) -> Self {
        let mut line = String::with_capacity(RECORD_WIDTH);
        line.push_str(marker);
        LineBuilder { line }
    }

    /// Appends a field verbatim.
    pub fn raw(mut self, value: &str) -> Self {
        self.line.push_str(value);
        self
    }

    pub fn left(self, value: &str, width: usize) -> Self {
        self.raw(&left(value, width))
    }

    pub fn right(self, value: &str, width: usize) -> Self {
        self.raw(&right(value, width))
    }

    /// Pads the remainder of the line with fill characters and applies the
    /// blank substitution.
    pub fn build(self) -> String {
        finish(self.build_verbatim())
    }

    /// Pads the remainder of the line with fill characters, leaving blanks
    /// already in the line untouched.
    pub fn build_verbatim(self) -> String {
        let remaining = RECORD_WIDTH.saturating_sub(self.line.chars().count());
        let line = self.line + &fill(remaining);
        debug_assert_eq!(line.chars().count(), RECORD_WIDTH, "record overflow: {line}");
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_justification() {
        assert_eq!(left("AB", 5), "AB   ");
        assert_eq!(right("12.75", 11), "      12.75");
        // Wider values are never truncated
        assert_eq!(left("ABCDEF", 3), "ABCDEF");
    }

    #[test]
    fn test_finish_replaces_blanks() {
        assert_eq!(finish(right("12.75", 11)), "00000012.75");
        assert_eq!(finish("My Company".to_string()), "My0Company");
    }

    #[test]
    fn test_builder_pads_to_width() {
        let line = LineBuilder::new("XX000").left("HELLO", 10).build();
        assert_eq!(line.len(), RECORD_WIDTH);
        assert!(line.starts_with("XX000HELLO00000"));
        assert!(line.chars().skip(5).all(|c| c != ' '));
    }

    #[test]
    fn test_verbatim_keeps_inner_blanks() {
        let line = LineBuilder::new("XX000").raw("A B").build_verbatim();
        assert_eq!(line.len(), RECORD_WIDTH);
        assert!(line.starts_with("XX000A B000"));
    }
}
