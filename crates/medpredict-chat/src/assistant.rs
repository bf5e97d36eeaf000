//! The chat assistant. `reply` always produces an answer.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::TextGenerator;
use crate::fallback::{build_prompt, fallback_reply, is_greeting, GREETING_REPLY};

pub struct ChatAssistant {
    generator: Arc<dyn TextGenerator>,
}

impl ChatAssistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Answer `message`. Backend failures fall back to the keyword table.
    pub fn reply(&self, message: &str) -> String {
        if is_greeting(message) {
            return GREETING_REPLY.to_string();
        }

        match self.generator.generate(&build_prompt(message)) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "chat backend unavailable, using fallback reply");
                let reply = fallback_reply(message);
                debug!(reply, "fallback selected");
                reply.to_string()
            }
        }
    }
}
