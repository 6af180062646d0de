const SEPARATOR: &str = "; ";

/// Collects non-fatal problems found while parsing a single game.
///
/// Drained into the `ParseError` report column; `None` means the record
/// parsed cleanly.
#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator(Option<String>);

impl ErrorAccumulator {
    pub fn push(&mut self, msg: &str) {
        match &mut self.0 {
            Some(existing) => {
                existing.push_str(SEPARATOR);
                existing.push_str(msg);
            }
            None => {
                self.0 = Some(msg.to_string());
            }
        }
    }

    /// Records a header value that failed to convert to its typed form.
    pub fn push_conversion_error(&mut self, field: &str, raw: &str) {
        self.push(&format!("Conversion error: {field}='{raw}'"));
    }

    pub fn take(&mut self) -> Option<String> {
        self.0.take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}
