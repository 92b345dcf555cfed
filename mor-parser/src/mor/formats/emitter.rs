//! Output buffer with look-back
//!
//! Every serialized unit has to end with exactly one newline, and anchored comments need a
//! separating space only when they follow text on the same line. Both decisions depend on
//! what was emitted last, so writers go through an [Emitter] rather than straight into a
//! sink; the buffer is handed to the sink once complete.

#[derive(Debug, Default)]
pub struct Emitter {
    output: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// True at the start of the output or right after a line break
    pub fn at_line_start(&self) -> bool {
        self.output.is_empty() || self.output.ends_with(&['\n', '\r'][..])
    }

    /// End the current line unless it already ended.
    pub fn ensure_newline(&mut self) {
        if !self.at_line_start() {
            self.output.push('\n');
        }
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_newline_never_doubles() {
        let mut emitter = Emitter::new();
        emitter.write("cat");
        emitter.ensure_newline();
        emitter.ensure_newline();
        emitter.write("% note\r");
        emitter.ensure_newline();
        assert_eq!(emitter.into_string(), "cat\n% note\r");
    }

    #[test]
    fn test_empty_output_is_at_line_start() {
        let mut emitter = Emitter::new();
        assert!(emitter.at_line_start());
        emitter.ensure_newline();
        assert_eq!(emitter.as_str(), "");
    }
}
