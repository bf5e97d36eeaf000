//! # medpredict-chat
//!
//! A small medical chat assistant.
//!
//! [`ChatAssistant::reply`] sends the user's message, wrapped in a fixed
//! prompt, to a [`TextGenerator`]. When the generator fails or returns no
//! text the assistant answers from a keyword table instead, so `reply`
//! never errors.

pub mod assistant;
pub mod client;
pub mod config;
pub mod fallback;

pub use assistant::ChatAssistant;
pub use client::{ChatError, HostedInference, TextGenerator};
pub use config::ChatConfig;
pub use fallback::{fallback_reply, GREETING_REPLY};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;

    use serde_json::json;

    use medpredict_contracts::error::MedPredictError;

    use super::*;
    use crate::client::extract_generated_text;
    use crate::fallback::build_prompt;

    // ── Mocks ─────────────────────────────────────────────────────────────────

    struct ScriptedGenerator {
        answer: Result<String, ChatError>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedGenerator {
        fn new(answer: Result<String, ChatError>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    impl TextGenerator for ScriptedGenerator {
        fn generate(&self, prompt: &str) -> Result<String, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.answer.clone()
        }
    }

    // ── Assistant ─────────────────────────────────────────────────────────────

    #[test]
    fn greeting_skips_the_backend() {
        let generator = ScriptedGenerator::new(Ok("unused".to_string()));
        let assistant = ChatAssistant::new(generator.clone());
        assert_eq!(assistant.reply("Hi, HOW ARE YOU today?"), GREETING_REPLY);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn generated_text_is_returned() {
        let generator = ScriptedGenerator::new(Ok("Drink water and rest.".to_string()));
        let assistant = ChatAssistant::new(generator.clone());
        assert_eq!(assistant.reply("I have a cold"), "Drink water and rest.");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            generator.last_prompt.lock().unwrap().as_deref(),
            Some(
                "As a medical AI assistant, please provide a brief, professional response to: I have a cold. Focus on health-related aspects if applicable."
            )
        );
    }

    #[test]
    fn backend_failure_falls_back() {
        let generator = ScriptedGenerator::new(Err(ChatError::Backend { status: 503 }));
        let assistant = ChatAssistant::new(generator);
        assert_eq!(
            assistant.reply("Tell me about diabetes"),
            "I can help you understand diabetes and its risk factors. Would you like to use our diabetes prediction tool?"
        );
    }

    #[test]
    fn empty_response_falls_back() {
        let assistant = ChatAssistant::new(ScriptedGenerator::new(Err(ChatError::EmptyResponse)));
        assert_eq!(
            assistant.reply("random question"),
            "I'm focused on helping with medical questions and disease prediction. Would you like to learn about our health assessment tools?"
        );
    }

    // ── Fallback table ────────────────────────────────────────────────────────

    #[test]
    fn fallback_rules_apply_in_order() {
        // "diabetes" is listed before "heart".
        assert!(fallback_reply("heart disease and diabetes").starts_with("I can help you understand diabetes"));
        assert!(fallback_reply("My HEART hurts").starts_with("Heart disease has many risk factors"));
        assert!(fallback_reply("Parkinson's symptoms").starts_with("Our Parkinson's disease prediction tool"));
        assert!(fallback_reply("breast cancer").starts_with("Early detection is crucial"));
        assert!(fallback_reply("Hello there").starts_with("Hello! I'm your medical AI assistant"));
        assert!(fallback_reply("how are you").starts_with("I'm here to help with your medical questions!"));
    }

    #[test]
    fn hi_matches_as_substring() {
        assert!(fallback_reply("this is odd").starts_with("Hello!"));
        assert!(fallback_reply("ok").starts_with("I'm focused on helping"));
    }

    #[test]
    fn prompt_wraps_message() {
        assert!(build_prompt("x").contains("response to: x. Focus"));
    }

    // ── Response parsing ──────────────────────────────────────────────────────

    #[test]
    fn extracts_text_from_array_or_object() {
        assert_eq!(
            extract_generated_text(&json!([{"generated_text": "a"}, {"generated_text": "b"}])).as_deref(),
            Some("a")
        );
        assert_eq!(extract_generated_text(&json!({"generated_text": "c"})).as_deref(), Some("c"));
        assert_eq!(extract_generated_text(&json!([])), None);
        assert_eq!(extract_generated_text(&json!({"generated_text": ""})), None);
        assert_eq!(extract_generated_text(&json!({"error": "loading"})), None);
    }

    // ── Hosted backend ────────────────────────────────────────────────────────

    #[test]
    fn hosted_inference_sends_parameters_and_token() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/models/test", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 2048];
            while !String::from_utf8_lossy(&buf).contains("return_full_text") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = r#"[{"generated_text":"Stay hydrated."}]"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&buf).to_string()
        });

        let generator = HostedInference::new(ChatConfig {
            endpoint,
            api_key: Some("secret-token".to_string()),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(generator.generate("prompt").unwrap(), "Stay hydrated.");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /models/test HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer secret-token"));
        assert!(request.contains(r#""max_new_tokens":100"#));
        assert!(request.contains(r#""do_sample":true"#));
    }

    #[test]
    fn non_json_success_body_is_malformed() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/models/test", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 2048];
            while !String::from_utf8_lossy(&buf).contains("return_full_text") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = "<html>Model is loading</html>";
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        let generator = HostedInference::new(ChatConfig {
            endpoint,
            ..ChatConfig::default()
        })
        .unwrap();
        let err = generator.generate("prompt").unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, ChatError::MalformedBody { .. }), "got {err:?}");
        assert!(err.to_string().starts_with("chat response body is not valid JSON"));
    }

    #[test]
    fn unreachable_backend_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let generator = HostedInference::new(ChatConfig {
            endpoint,
            ..ChatConfig::default()
        })
        .unwrap();
        assert!(matches!(generator.generate("p"), Err(ChatError::Transport { .. })));
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    #[test]
    fn config_from_lookup() {
        let config = ChatConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.endpoint, crate::config::DEFAULT_ENDPOINT);
        assert!(config.api_key.is_none());

        let config = ChatConfig::from_lookup(|k| match k {
            "MEDPREDICT_CHAT_URL" => Some("http://localhost:9999/generate".to_string()),
            "MEDPREDICT_CHAT_API_KEY" => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:9999/generate");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn zero_timeout_is_config_error() {
        let err = HostedInference::new(ChatConfig {
            timeout_secs: 0,
            ..ChatConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, MedPredictError::ConfigError { .. }));
    }

    #[test]
    fn debug_hides_api_key() {
        let config = ChatConfig {
            api_key: Some("secret-token".to_string()),
            ..ChatConfig::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }
}
