// Scripted content generator for exercising the studio without network calls.

#![allow(dead_code)]

use async_trait::async_trait;
use persona_studio::{
    Candidate, Content, ContentGenerator, GenerateContentRequest, GenerateContentResponse,
    GenerationError, Part, Persona, Result, ServiceError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the mock answers for a matching prompt.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// An inline image part carrying this base64 payload
    Image(String),
    /// A text-only answer (a refusal for image calls, JSON for text calls)
    Text(String),
    /// A candidate with no parts
    Empty,
    /// No candidates at all
    NoCandidates,
    /// A transport-level failure
    Fail(GenerationError),
}

impl MockReply {
    pub fn forbidden() -> Self {
        MockReply::Fail(
            ServiceError::new("The caller does not have permission")
                .with_status(403)
                .with_reason("PERMISSION_DENIED")
                .into(),
        )
    }

    pub fn rate_limited() -> Self {
        MockReply::Fail(
            ServiceError::new("Resource has been exhausted")
                .with_status(429)
                .with_reason("RESOURCE_EXHAUSTED")
                .into(),
        )
    }

    fn into_response(self) -> Result<GenerateContentResponse> {
        let parts = match self {
            MockReply::Image(data) => vec![Part::inline("image/png", data)],
            MockReply::Text(text) => vec![Part::text(text)],
            MockReply::Empty => vec![],
            MockReply::NoCandidates => return Ok(GenerateContentResponse::default()),
            MockReply::Fail(err) => return Err(err),
        };
        Ok(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content { role: None, parts }),
                finish_reason: Some("STOP".to_string()),
            }],
        })
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub request: GenerateContentRequest,
}

impl RecordedCall {
    pub fn prompt(&self) -> String {
        self.request.contents[0]
            .parts
            .iter()
            .filter_map(|p| p.text.clone())
            .collect()
    }
}

/// Answers by the first rule whose needle appears in the request text.
pub struct ScriptedGenerator {
    rules: Vec<(String, MockReply, Duration)>,
    fallback: MockReply,
    calls: Mutex<Vec<RecordedCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: MockReply::Image("ZGVmYXVsdA==".to_string()),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn on(mut self, needle: &str, reply: MockReply) -> Self {
        self.rules.push((needle.to_string(), reply, Duration::ZERO));
        self
    }

    pub fn on_after(mut self, needle: &str, reply: MockReply, delay: Duration) -> Self {
        self.rules.push((needle.to_string(), reply, delay));
        self
    }

    pub fn otherwise(mut self, reply: MockReply) -> Self {
        self.fallback = reply;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let call = RecordedCall {
            model: model.to_string(),
            request: request.clone(),
        };
        let prompt = call.prompt();
        self.calls.lock().unwrap().push(call);

        let (reply, delay) = self
            .rules
            .iter()
            .find(|(needle, _, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply, delay)| (reply.clone(), *delay))
            .unwrap_or((self.fallback.clone(), Duration::ZERO));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        reply.into_response()
    }
}

pub fn persona() -> Persona {
    Persona {
        nickname: "Mika".to_string(),
        age_range: "25-30".to_string(),
        occupation: "Barista".to_string(),
        personality: "Warm and curious".to_string(),
        lifestyle: "Urban cyclist".to_string(),
        vibe: "Cozy".to_string(),
        description: "A barista who shoots film on weekends.".to_string(),
        tags: vec!["coffee".to_string(), "film".to_string()],
    }
}

pub const REFERENCE: &str = "data:image/png;base64,AAAA";

pub fn prompts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
