//! Gemini streaming implementation.
//!
//! Tokens arrive as SSE `data:` lines from `streamGenerateContent?alt=sse`,
//! each carrying a partial `GenerateContentResponse`.

use std::pin::Pin;

use futures::Stream;
use marquee_core::{Error, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tokio_stream::StreamExt;
use tracing::{debug, error, info};

use crate::config::GeminiConfig;

/// Boxed stream type for returning the provider stream.
pub type BoxedStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send>>;

/// A single streamed token or error.
#[derive(Debug)]
pub enum StreamChunk {
    Token(String),
    Done { tokens_used: usize },
    Error(Error),
}

/// One decoded SSE payload.
#[derive(Debug, PartialEq)]
pub(crate) enum Payload {
    Text { text: String, tokens: Option<usize> },
    Failed(String),
    Empty,
}

/// Stream a generated document for `prompt`.
pub fn stream_gemini(client: &Client, config: &GeminiConfig, prompt: &str) -> BoxedStream {
    let client = client.clone();
    let url = format!(
        "{}/models/{}:streamGenerateContent?alt=sse",
        config.base_url.trim_end_matches('/'),
        config.model
    );
    let api_key = config.api_key().map(str::to_string);
    let model = config.model.clone();
    let body = json!({
        "contents": [{"role": "user", "parts": [{"text": prompt}]}],
        "generationConfig": {
            "temperature": config.temperature,
            "maxOutputTokens": config.max_output_tokens,
        },
    });

    Box::pin(async_stream::stream! {
        let api_key = match api_key {
            Some(k) => k,
            None => {
                yield StreamChunk::Error(Error::Config("Gemini API key is not configured".into()));
                return;
            }
        };

        debug!("Streaming from Gemini with model {}", model);

        let response = match client
            .post(&url)
            .header("x-goog-api-key", &api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                yield StreamChunk::Error(Error::Http(format!("Request failed: {}", e)));
                return;
            }
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            yield StreamChunk::Error(Error::Upstream { status, message: error_message(&body) });
            return;
        }

        let mut stream = response.bytes_stream();
        let mut lines = LineBuffer::default();
        let mut token_count = 0usize;
        let mut reported_tokens: Option<usize> = None;
        let mut finished = false;

        while !finished {
            match stream.next().await {
                Some(Ok(bytes)) => lines.push(&bytes),
                Some(Err(e)) => {
                    yield StreamChunk::Error(Error::Http(format!("Stream read error: {}", e)));
                    return;
                }
                None => {
                    // Flush an unterminated final line
                    lines.push(b"\n");
                    finished = true;
                }
            }

            while let Some(line) = lines.next_line() {
                if line.is_empty() || line.starts_with(':') {
                    continue;
                }

                if let Some(data) = line.strip_prefix("data:") {
                    match parse_payload(data.trim()) {
                        Payload::Text { text, tokens } => {
                            if tokens.is_some() {
                                reported_tokens = tokens;
                            }
                            if !text.is_empty() {
                                token_count += 1;
                                yield StreamChunk::Token(text);
                            }
                        }
                        Payload::Failed(msg) => {
                            error!("Gemini error: {}", msg);
                            yield StreamChunk::Error(Error::Upstream { status: 200, message: msg });
                            return;
                        }
                        Payload::Empty => {}
                    }
                }
            }
        }

        yield StreamChunk::Done { tokens_used: reported_tokens.unwrap_or(token_count) };
    })
}

/// Raw response bytes split into complete lines.
///
/// Network chunks may end inside a multibyte character, so bytes are only
/// decoded once the whole line has arrived.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub(crate) fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Next complete line, trimmed; `None` until a newline arrives.
    pub(crate) fn next_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=end).collect();
        Some(String::from_utf8_lossy(&line).trim().to_string())
    }
}

/// Generate a complete document, collecting the token stream.
pub async fn generate(client: &Client, config: &GeminiConfig, prompt: &str) -> Result<String> {
    let mut stream = stream_gemini(client, config, prompt);
    let mut document = String::new();

    while let Some(chunk) = stream.next().await {
        match chunk {
            StreamChunk::Token(text) => document.push_str(&text),
            StreamChunk::Done { tokens_used } => {
                info!("Received Gemini document ({} tokens)", tokens_used);
            }
            StreamChunk::Error(e) => return Err(e),
        }
    }

    if document.trim().is_empty() {
        return Err(Error::Internal("Gemini returned an empty document".into()));
    }
    Ok(document)
}

/// Test an API key by listing models.
pub async fn test_api_key(client: &Client, config: &GeminiConfig) -> Result<()> {
    let api_key = config
        .api_key()
        .ok_or_else(|| Error::Config("Gemini API key is not configured".into()))?;
    let url = format!("{}/models", config.base_url.trim_end_matches('/'));

    let resp = client
        .get(&url)
        .header("x-goog-api-key", api_key)
        .send()
        .await
        .map_err(|e| Error::Http(e.to_string()))?;

    if resp.status().is_success() {
        Ok(())
    } else {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Upstream { status, message: error_message(&body) })
    }
}

/// Decode one SSE `data:` payload.
pub(crate) fn parse_payload(data: &str) -> Payload {
    let Ok(parsed) = serde_json::from_str::<Value>(data) else {
        return Payload::Empty;
    };

    if let Some(msg) = parsed["error"]["message"].as_str() {
        return Payload::Failed(msg.to_string());
    }
    if let Some(reason) = parsed["promptFeedback"]["blockReason"].as_str() {
        return Payload::Failed(format!("Prompt blocked: {}", reason));
    }

    let text: String = parsed["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();
    let tokens = parsed["usageMetadata"]["candidatesTokenCount"]
        .as_u64()
        .map(|t| t as usize);

    if text.is_empty() && tokens.is_none() {
        Payload::Empty
    } else {
        Payload::Text { text, tokens }
    }
}

/// Best-effort message from an error response body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
