use serde::Deserialize;

/// Connection settings of the content store holding exercises and workouts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub host: String,
    /// Token with write access. Reads of a public dataset work without it.
    pub token: Option<String>,
}

impl StoreConfig {
    #[must_use]
    pub fn query_url(&self) -> String {
        format!("{}/query/{}", self.data_url(), self.dataset)
    }

    #[must_use]
    pub fn mutate_url(&self) -> String {
        format!("{}/mutate/{}", self.data_url(), self.dataset)
    }

    fn data_url(&self) -> String {
        format!(
            "https://{}.{}/v{}/data",
            self.project_id, self.host, self.api_version
        )
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            host: "api.sanity.io".to_string(),
            token: None,
        }
    }
}

/// Settings of the chat completion endpoint used for exercise guides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub top_p: f32,
}

impl CompletionConfig {
    #[must_use]
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://models.github.ai/inference".to_string(),
            model: "openai/gpt-4.1".to_string(),
            api_key: None,
            temperature: 1.0,
            top_p: 1.0,
        }
    }
}
