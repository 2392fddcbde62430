//! Talks to an OpenAI-compatible chat completion endpoint.

use crate::config::{CompletionConfig, API_KEY_ENV};
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};

/// Turns an instruction embedded in a command into a shell fragment.
pub trait CompletionClient {
    /// Returns the fragment that satisfies `instruction` within `document`.
    fn complete(&self, document: &str, instruction: &str) -> Result<String, ResolveError>;
}

/// Builds the single user prompt sent to the model.
pub fn build_prompt(document: &str, instruction: &str) -> String {
    format!(
        "Given the following shell command:\n\n```shell\n{document}\n```\n\n\
         Translate the AI instruction `\"{instruction}\"` into a shell command segment \
         that achieves the described task. \
         The AI instruction is embedded in the command. \
         Return *only* the resulting shell command segment, not the entire modified command. \
         For example, if the input command is 'ls -l | <AI>show only last 5 lines</AI>' \
         and the instruction is 'show only last 5 lines', you should return 'tail -n 5'."
    )
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extracts the top choice's text from a raw response body.
fn parse_response(body: &str) -> Result<String, ResolveError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ResolveError::Transport(format!("invalid response body: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .ok_or(ResolveError::EmptyResponse)
}

/// Blocking client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiClient {
    config: CompletionConfig,
    agent: ureq::Agent,
}

impl OpenAiClient {
    pub fn new(config: CompletionConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, document: &str, instruction: &str) -> Result<String, ResolveError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ResolveError::MissingCredential {
                var: API_KEY_ENV.to_string(),
            })?;

        let url = self.config.completions_url();
        log::debug!("Using completion endpoint: {url}");
        log::debug!("Using model: {}", self.config.model);

        let prompt = build_prompt(document, instruction);
        log::debug!("Sending prompt to model: {prompt}");

        let body = serde_json::to_string(&ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        })
        .map_err(|e| ResolveError::Transport(format!("failed to encode request: {e}")))?;

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {api_key}"))
            .set("Content-Type", "application/json")
            .send_string(&body);

        let text = match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| ResolveError::Transport(format!("failed to read response: {e}")))?,
            Err(ureq::Error::Status(status, resp)) => {
                let text = resp.into_string().unwrap_or_default();
                return Err(ResolveError::Transport(format!(
                    "{url} returned status {status}: {}",
                    text.trim()
                )));
            }
            Err(err) => return Err(ResolveError::Transport(err.to_string())),
        };

        let fragment = parse_response(&text)?;
        log::debug!("Model response (processed segment): {fragment}");
        Ok(fragment)
    }
}
