use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Result};

pub const OPENAI_HOST: &str = "https://api.openai.com";
pub const DEEPSEEK_HOST: &str = "https://api.deepseek.com";

/// Unified enum to wrap different provider configurations
pub enum ProviderConfig {
    OpenAi(OpenAiProviderConfig),
    DeepSeek(DeepSeekProviderConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiModel {
    Gpt35Turbo,
    Gpt4,
    Gpt4Turbo,
    Gpt4o,
    Gpt4oMini,
    O1,
    O1Mini,
    O3Mini,
}

impl OpenAiModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenAiModel::Gpt35Turbo => "gpt-3.5-turbo",
            OpenAiModel::Gpt4 => "gpt-4",
            OpenAiModel::Gpt4Turbo => "gpt-4-turbo",
            OpenAiModel::Gpt4o => "gpt-4o",
            OpenAiModel::Gpt4oMini => "gpt-4o-mini",
            OpenAiModel::O1 => "o1",
            OpenAiModel::O1Mini => "o1-mini",
            OpenAiModel::O3Mini => "o3-mini",
        }
    }

    /// Whether this model accepts the reasoning_effort parameter. Note that
    /// o1-mini does not.
    pub fn is_reasoning(&self) -> bool {
        matches!(self, OpenAiModel::O1 | OpenAiModel::O3Mini)
    }
}

impl FromStr for OpenAiModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gpt-3.5-turbo" => Ok(OpenAiModel::Gpt35Turbo),
            "gpt-4" => Ok(OpenAiModel::Gpt4),
            "gpt-4-turbo" => Ok(OpenAiModel::Gpt4Turbo),
            "gpt-4o" => Ok(OpenAiModel::Gpt4o),
            "gpt-4o-mini" => Ok(OpenAiModel::Gpt4oMini),
            "o1" => Ok(OpenAiModel::O1),
            "o1-mini" => Ok(OpenAiModel::O1Mini),
            "o3-mini" => Ok(OpenAiModel::O3Mini),
            other => Err(anyhow!("unknown OpenAI model: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepSeekModel {
    Chat,
    Reasoner,
}

impl DeepSeekModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeepSeekModel::Chat => "deepseek-chat",
            DeepSeekModel::Reasoner => "deepseek-reasoner",
        }
    }
}

impl FromStr for DeepSeekModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deepseek-chat" => Ok(DeepSeekModel::Chat),
            "deepseek-reasoner" => Ok(DeepSeekModel::Reasoner),
            other => Err(anyhow!("unknown DeepSeek model: {}", other)),
        }
    }
}

/// Effort level for reasoning models. Only sent when explicitly configured
/// and only for models where `OpenAiModel::is_reasoning` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningEffort::Low => "low",
            ReasoningEffort::Medium => "medium",
            ReasoningEffort::High => "high",
        }
    }
}

impl FromStr for ReasoningEffort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(ReasoningEffort::Low),
            "medium" => Ok(ReasoningEffort::Medium),
            "high" => Ok(ReasoningEffort::High),
            other => Err(anyhow!("unknown reasoning effort: {}", other)),
        }
    }
}

pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: OpenAiModel,
    pub reasoning_effort: Option<ReasoningEffort>,
}

impl OpenAiProviderConfig {
    pub fn new(api_key: String, model: OpenAiModel) -> Self {
        Self {
            host: OPENAI_HOST.to_string(),
            api_key,
            model,
            reasoning_effort: None,
        }
    }

    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    pub fn from_env() -> Result<Self> {
        let api_key = get_env("OPENAI_API_KEY", true, None)?
            .ok_or_else(|| anyhow!("OpenAI API key should be present"))?;

        let host = get_env("OPENAI_API_HOST", false, Some(OPENAI_HOST.to_string()))?
            .unwrap_or_else(|| OPENAI_HOST.to_string());

        let model = get_env("OPENAI_MODEL", false, Some("gpt-3.5-turbo".to_string()))?
            .unwrap_or_else(|| "gpt-3.5-turbo".to_string())
            .parse()?;

        let reasoning_effort = get_env("OPENAI_REASONING_EFFORT", false, None)?
            .map(|s| s.parse())
            .transpose()?;

        Ok(Self {
            host,
            api_key,
            model,
            reasoning_effort,
        })
    }
}

pub struct DeepSeekProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: DeepSeekModel,
}

impl DeepSeekProviderConfig {
    pub fn new(api_key: String, model: DeepSeekModel) -> Self {
        Self {
            host: DEEPSEEK_HOST.to_string(),
            api_key,
            model,
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = get_env("DEEPSEEK_API_KEY", true, None)?
            .ok_or_else(|| anyhow!("DeepSeek API key should be present"))?;

        let host = get_env("DEEPSEEK_API_HOST", false, Some(DEEPSEEK_HOST.to_string()))?
            .unwrap_or_else(|| DEEPSEEK_HOST.to_string());

        let model = get_env("DEEPSEEK_MODEL", false, Some("deepseek-chat".to_string()))?
            .unwrap_or_else(|| "deepseek-chat".to_string())
            .parse()?;

        Ok(Self {
            host,
            api_key,
            model,
        })
    }
}

/// Helper to read environment variables with error handling
fn get_env(key: &str, required: bool, default: Option<String>) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) if !required => Ok(default),
        Err(env::VarError::NotPresent) => Err(anyhow!(
            "Environment variable '{}' is required but not set.",
            key
        )),
        Err(e) => Err(e.into()),
    }
}
