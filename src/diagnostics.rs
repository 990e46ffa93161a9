use tracing::debug;

/// Human-readable messages about rejected lines and unreadable files.
///
/// Messages are kept in the order they were raised so the caller can print
/// them on stdout ahead of the report; each one is also logged at debug level.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{}", message);
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Print every message on stdout, one per line, and clear the buffer.
    pub fn flush_to_stdout(&mut self) {
        for message in self.messages.drain(..) {
            println!("{}", message);
        }
    }
}
