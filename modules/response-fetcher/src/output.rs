use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

/// Id of the element that receives rendered text.
pub const RESPONSE_ELEMENT_ID: &str = "response";

/// A place whose visible text is replaced by each render.
pub trait OutputLocation: Send + Sync {
    fn id(&self) -> &str;
    fn set_text(&self, text: &str);
}

#[derive(Debug, Default)]
struct MemoryState {
    text: String,
    writes: usize,
}

/// In-memory output location. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Number of times `set_text` has been called.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panic while holding the lock can't leave the text half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl OutputLocation for MemoryOutput {
    fn id(&self) -> &str {
        RESPONSE_ELEMENT_ID
    }

    fn set_text(&self, text: &str) {
        let mut state = self.lock();
        state.text = text.to_string();
        state.writes += 1;
    }
}

/// Writes each render to stdout.
#[derive(Debug, Default)]
pub struct StdoutOutput;

impl OutputLocation for StdoutOutput {
    fn id(&self) -> &str {
        RESPONSE_ELEMENT_ID
    }

    fn set_text(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{text}").and_then(|_| stdout.flush()) {
            tracing::warn!(error = %e, "Failed to write response to stdout");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_output_replaces_text() {
        let out = MemoryOutput::new();
        assert_eq!(out.text(), "");
        assert_eq!(out.writes(), 0);

        out.set_text("first");
        out.set_text("second");
        assert_eq!(out.text(), "second");
        assert_eq!(out.writes(), 2);
    }

    #[test]
    fn test_memory_output_clones_share_buffer() {
        let out = MemoryOutput::new();
        let handle = out.clone();
        handle.set_text("shared");
        assert_eq!(out.text(), "shared");
        assert_eq!(out.id(), RESPONSE_ELEMENT_ID);
    }
}
