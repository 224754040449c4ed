use std::str::FromStr;

use anyhow::{anyhow, Result};

use super::{
    base::Provider, configs::ProviderConfig, deepseek::DeepSeekProvider, openai::OpenAiProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    OpenAi,
    DeepSeek,
}

impl FromStr for ProviderType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "openai" => Ok(ProviderType::OpenAi),
            "deepseek" => Ok(ProviderType::DeepSeek),
            other => Err(anyhow!(
                "unknown backend '{}', expected 'openai' or 'deepseek'",
                other
            )),
        }
    }
}

pub fn get_provider(config: ProviderConfig) -> Result<Box<dyn Provider>> {
    match config {
        ProviderConfig::OpenAi(openai_config) => Ok(Box::new(OpenAiProvider::new(openai_config)?)),
        ProviderConfig::DeepSeek(deepseek_config) => {
            Ok(Box::new(DeepSeekProvider::new(deepseek_config)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::configs::{OpenAiModel, OpenAiProviderConfig};

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!("openai".parse::<ProviderType>().unwrap(), ProviderType::OpenAi);
        assert_eq!("deepseek".parse::<ProviderType>().unwrap(), ProviderType::DeepSeek);
        assert!("cohere".parse::<ProviderType>().is_err());
    }

    #[test]
    fn test_get_provider_openai() {
        let config = ProviderConfig::OpenAi(OpenAiProviderConfig::new(
            "test_key".to_string(),
            OpenAiModel::Gpt4oMini,
        ));
        let provider = get_provider(config).unwrap();
        assert_eq!(provider.describe(), "OpenAI with Model: gpt-4o-mini");
    }
}
