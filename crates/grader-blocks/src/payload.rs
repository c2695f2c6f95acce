//! Injected payload text.

/// Opaque multi-line text placed right after the BEFORE marker line.
///
/// A non-empty payload always ends with a newline so the AFTER marker keeps
/// its own line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Payload {
    text: String,
}

impl Payload {
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines the payload occupies once inserted.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
