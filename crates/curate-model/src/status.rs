#![deny(unsafe_code)]

/// Ordered audit log of the pipeline: one short token per step.
///
/// The joined string is the sole diagnostic channel for expected failure
/// classes, so tokens must stay short, deterministic and human-readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatusLog {
    tokens: Vec<String>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Render the semicolon-joined status string.
    pub fn join(&self) -> String {
        self.tokens.join("; ")
    }

    /// True when any token marks a failed or skipped-with-error step.
    pub fn has_failure(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| t.contains("failed") || t.contains("error") || t.contains("unknown"))
    }
}

impl std::fmt::Display for StatusLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.join())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_is_semicolon_separated_in_order() {
        let mut log = StatusLog::new();
        log.push("loaded");
        log.push("classified as patients");
        assert_eq!(log.join(), "loaded; classified as patients");
    }

    #[test]
    fn failure_detection() {
        let mut ok = StatusLog::new();
        ok.push("saved");
        assert!(!ok.has_failure());

        let mut failed = StatusLog::new();
        failed.push("read failed: no such file");
        assert!(failed.has_failure());

        let mut unknown = StatusLog::new();
        unknown.push("classification unknown");
        assert!(unknown.has_failure());
    }
}
