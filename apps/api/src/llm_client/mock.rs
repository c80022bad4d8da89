//! Scriptable `TextGenerator` stub for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmError, TextGenerator};

/// One canned reply per call, in order. Calls past the end repeat the last
/// entry. `Err` entries simulate transport failures.
pub struct ScriptedGenerator {
    replies: Mutex<Vec<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, String>>) -> Self {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always returns the same successful reply.
    pub fn always_ok(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    /// Always fails with a transport error.
    pub fn always_err(message: &str) -> Self {
        Self::new(vec![Err(message.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let replies = self.replies.lock().unwrap();
        let reply = replies.get(n).unwrap_or_else(|| replies.last().unwrap());
        match reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(LlmError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}
