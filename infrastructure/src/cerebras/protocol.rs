//! Chat Completions wire types for the Cerebras inference API.
//!
//! The API is OpenAI-compatible:
//!
//! - **Request**: `POST {base_url}/chat/completions` with a JSON body
//! - **Batch response**: one JSON object, text at `choices[0].message.content`
//! - **Streamed response**: Server-Sent Events, one `data: {...}` line per
//!   chunk with text at `choices[0].delta.content`, terminated by
//!   `data: [DONE]`

use fusion_application::CompletionRequest;
use serde::{Deserialize, Serialize};

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Request body for `/chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stream: bool,
}

impl From<&CompletionRequest> for ChatCompletionRequest {
    fn from(request: &CompletionRequest) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request
            .system_message
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            messages.push(Message {
                role: Role::System,
                content: system.to_string(),
            });
        }
        messages.push(Message {
            role: Role::User,
            content: request.user_message.clone(),
        });

        Self {
            model: request.model_id.clone(),
            messages,
            max_tokens: request.sampling.max_tokens,
            temperature: request.sampling.temperature,
            top_p: request.sampling.top_p,
            stream: request.sampling.stream,
        }
    }
}

/// Batch response body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }
}

/// One streamed chunk
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    pub delta: Option<Delta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Delta {
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// Text fragment carried by this chunk, if any
    pub fn into_fragment(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.delta)
            .and_then(|d| d.content)
    }
}

/// A parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    /// A text fragment to append
    Fragment(String),
    /// The `[DONE]` terminator
    Done,
    /// Blank lines, comments, non-data fields, chunks without text
    Skip,
}

/// Parse one line of an SSE body.
///
/// Returns an error string when a `data:` payload is not a valid chunk.
pub fn parse_sse_line(line: &str) -> Result<SseEvent, String> {
    let line = line.trim_end_matches('\r');
    let Some(payload) = line.strip_prefix("data:") else {
        return Ok(SseEvent::Skip);
    };
    let payload = payload.trim();

    if payload == "[DONE]" {
        return Ok(SseEvent::Done);
    }
    if payload.is_empty() {
        return Ok(SseEvent::Skip);
    }

    let chunk: ChatCompletionChunk =
        serde_json::from_str(payload).map_err(|e| format!("malformed stream chunk: {}", e))?;
    Ok(chunk
        .into_fragment()
        .map(SseEvent::Fragment)
        .unwrap_or(SseEvent::Skip))
}

/// Incremental SSE decoder fed with raw body bytes.
///
/// Bytes are buffered until a full line is available, so multi-byte
/// characters split across network chunks decode correctly.
#[derive(Debug, Default)]
pub struct SseAccumulator {
    buffer: Vec<u8>,
    text: String,
    done: bool,
}

impl SseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of body bytes.
    pub fn push(&mut self, bytes: &[u8]) -> Result<(), String> {
        if self.done {
            return Ok(());
        }
        self.buffer.extend_from_slice(bytes);

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
            if self.apply(&line)? {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Flush any trailing line without a newline and return the collected text.
    pub fn finish(mut self) -> Result<String, String> {
        if !self.done && !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer).into_owned();
            self.buffer.clear();
            self.apply(&line)?;
        }
        Ok(self.text)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn apply(&mut self, line: &str) -> Result<bool, String> {
        match parse_sse_line(line)? {
            SseEvent::Fragment(fragment) => self.text.push_str(&fragment),
            SseEvent::Done => self.done = true,
            SseEvent::Skip => {}
        }
        Ok(self.done)
    }
}
