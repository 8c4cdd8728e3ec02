use serde_json::json;

use crate::error::{Result, RetellError};

/// AI provider used for the translation and summarization stages.
///
/// All three expose OpenAI-compatible chat-completions endpoints, so one
/// request shape covers them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    Openai,
    Grok,
    Gemini,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub model: &'static str,
    pub api_key_env: &'static str,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Openai => "openai",
            Provider::Grok => "grok",
            Provider::Gemini => "gemini",
        }
    }

    pub fn config(&self) -> ProviderConfig {
        match self {
            Provider::Openai => ProviderConfig {
                api_url: "https://api.openai.com/v1/chat/completions",
                model: "gpt-4o",
                api_key_env: "OPENAI_API_KEY",
            },
            Provider::Grok => ProviderConfig {
                api_url: "https://api.x.ai/v1/chat/completions",
                model: "grok-2-latest",
                api_key_env: "XAI_API_KEY",
            },
            Provider::Gemini => ProviderConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
                model: "gemini-2.0-flash",
                api_key_env: "GEMINI_API_KEY",
            },
        }
    }

    pub fn validate_api_key(&self) -> Result<String> {
        let env_var = self.config().api_key_env;
        std::env::var(env_var).map_err(|_| RetellError::MissingApiKey {
            env_var: env_var.to_string(),
        })
    }
}

/// Chat-completions client shared by the per-chunk transforms.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    provider: Provider,
    api_key: String,
}

impl ChatClient {
    pub fn new(provider: Provider) -> Result<Self> {
        let api_key = provider.validate_api_key()?;
        Ok(Self {
            client: reqwest::Client::new(),
            provider,
            api_key,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Run one chat completion and return the assistant message content.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String> {
        let config = self.provider.config();
        let response = self
            .client
            .post(config.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": config.model,
                "messages": [
                    { "role": "system", "content": system_prompt },
                    { "role": "user", "content": user_prompt },
                ],
                "temperature": temperature,
                "max_tokens": max_tokens,
            }))
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| RetellError::ApiResponseInvalid {
                reason: format!("{response:?}"),
            })?;

        Ok(content.trim().to_string())
    }
}
