use fitlog_domain as domain;
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::CompletionConfig,
    rest::{Request, SendRequest, fetch},
};

const SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<Message>,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

/// Chat completion endpoint answering guide prompts.
pub struct CompletionClient<S: SendRequest> {
    config: CompletionConfig,
    sender: S,
}

impl<S: SendRequest> CompletionClient<S> {
    pub fn new(config: CompletionConfig, sender: S) -> Self {
        Self { config, sender }
    }
}

impl<S: SendRequest> domain::GuideRepository for CompletionClient<S> {
    async fn request_guide(&self, prompt: &str) -> Result<String, domain::GuideError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            debug!("no API key for chat completions");
            return Err(domain::StorageError::Unauthorized.into());
        };
        let request = Request::post(
            self.config.chat_completions_url(),
            json!({
                "messages": [
                    { "role": "system", "content": SYSTEM_MESSAGE },
                    { "role": "user", "content": prompt }
                ],
                "temperature": self.config.temperature,
                "top_p": self.config.top_p,
                "model": self.config.model,
            }),
        )
        .bearer(Some(api_key));
        let completion: ChatCompletion = fetch(&self.sender, request).await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(domain::GuideError::EmptyResponse)
    }
}
