//! Blocking chat-completions client behind the engine's `Generator` trait.

use std::time::Duration;

use log::debug;
use margin_config::Config;
use margin_engine::{EditError, GenerationError, GenerationRequest, Generator, Mode};
use serde::{Deserialize, Serialize};

const CURSOR: &str = "<<CURSOR>>";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct HttpGenerator {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpGenerator {
    pub fn from_config(config: &Config) -> Result<Self, EditError> {
        let credentials = config
            .credentials()
            .map_err(|e| EditError::Configuration(e.to_string()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EditError::Configuration(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: credentials.endpoint,
            model: credentials.model,
            api_key: credentials.api_key,
        })
    }
}

impl Generator for HttpGenerator {
    fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(request.mode),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(request),
                },
            ],
            temperature: 0.3,
        };
        debug!("POST {} ({})", self.endpoint, self.model);

        let mut call = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }
        let response = call
            .send()
            .map_err(|e| GenerationError::new(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| GenerationError::new(format!("could not read response: {e}")))?;
        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(GenerationError::new(format!(
                "endpoint returned {}: {message}",
                status.as_u16()
            )));
        }
        parse_response(&text)
    }
}

fn system_prompt(mode: Mode) -> String {
    let task = match mode {
        Mode::Replace => "Rewrite the selected text as instructed. Reply with the replacement only.",
        Mode::Insert => {
            "Write the text to insert at the cursor as instructed. Reply with the inserted text only."
        }
    };
    format!(
        "You are a writing assistant working inside a Markdown document. {task} \
         Do not repeat surrounding text and do not wrap the reply in a code fence."
    )
}

fn user_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::new();
    prompt.push_str("INSTRUCTION:\n");
    prompt.push_str(&request.instruction);
    prompt.push_str("\n\nDOCUMENT:\n");
    prompt.push_str(&request.document);
    prompt.push_str(&format!(
        "\n\nPOSITION: character {} ({:.0}% through the document)\n",
        request.offset,
        request.offset_fraction * 100.0
    ));
    if !request.selection.is_empty() {
        prompt.push_str("\nSELECTION:\n");
        prompt.push_str(&request.selection);
        prompt.push('\n');
    }
    prompt.push_str("\nAROUND THE CURSOR:\n");
    prompt.push_str(&request.context_before);
    prompt.push_str(CURSOR);
    prompt.push_str(&request.context_after);
    prompt
}

fn parse_response(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::new(format!("unexpected response shape: {e}")))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::new("no choices in response"))?;

    if let Some(refusal) = choice.message.refusal {
        return Err(GenerationError::new(format!("model refused: {refusal}")));
    }
    if choice.finish_reason.as_deref() == Some("length") {
        return Err(GenerationError::new("response was cut off at the token limit"));
    }
    choice
        .message
        .content
        .ok_or_else(|| GenerationError::new("response has no content"))
}
