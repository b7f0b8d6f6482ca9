//! In-memory capturing sink
//!
//! Keeps every chunk it receives, in order. Useful in tests and for
//! forwarding log output somewhere the caller controls.

use crate::core::sink::{complete, Completion, Sink};
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each write call as text, in arrival order
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }

    /// Everything written, concatenated
    pub fn contents(&self) -> String {
        let writes = self.writes.lock();
        let bytes: Vec<u8> = writes.iter().flatten().copied().collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// The concatenated output split into lines without terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Number of write calls received
    pub fn len(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.writes.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, data: &[u8], done: Option<Completion>) {
        self.writes.lock().push(data.to_vec());
        complete(done, Ok(()));
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_in_order() {
        let sink = MemorySink::new();
        sink.write(b"a\n", None);
        sink.write(b"b\nc\n", None);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.writes(), vec!["a\n", "b\nc\n"]);
        assert_eq!(sink.lines(), vec!["a", "b", "c"]);

        sink.clear();
        assert!(sink.is_empty());
    }
}
