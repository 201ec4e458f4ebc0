use crate::core::ConfigProvider;
use crate::utils::error::{BlastError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    pub campaign: CampaignSection,
    pub data: DataSection,
    pub provider: ProviderSection,
    pub dispatch: DispatchSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSection {
    pub data_dir: String,
    pub raw_csv: String,
    pub normalized_csv: String,
    pub default_country_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSection {
    pub account_sid: String,
    pub auth_token: String,
    pub whatsapp_from: String,
    pub template_sid: String,
    pub media_urls: Vec<String>,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSection {
    pub allow_repeat: Option<bool>,
    pub delay_seconds: Option<u64>,
}

impl CampaignConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BlastError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BlastError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TWILIO_AUTH_TOKEN})，未設定者原樣保留
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BlastError::ConfigParseError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性；憑證缺失屬致命設定錯誤
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("campaign.name", &self.campaign.name)?;

        validation::validate_path("data.data_dir", &self.data.data_dir)?;
        validation::validate_non_empty_string("data.raw_csv", &self.data.raw_csv)?;
        validation::validate_non_empty_string("data.normalized_csv", &self.data.normalized_csv)?;

        let country_code = self.default_country_code();
        if !country_code.starts_with('+') {
            return Err(BlastError::InvalidConfigValueError {
                field: "data.default_country_code".to_string(),
                value: country_code.to_string(),
                reason: "Country code must start with '+'".to_string(),
            });
        }

        validation::validate_credential("provider.account_sid", &self.provider.account_sid)?;
        validation::validate_credential("provider.auth_token", &self.provider.auth_token)?;
        validation::validate_non_empty_string("provider.template_sid", &self.provider.template_sid)?;

        if !self.provider.whatsapp_from.starts_with("whatsapp:") {
            return Err(BlastError::InvalidConfigValueError {
                field: "provider.whatsapp_from".to_string(),
                value: self.provider.whatsapp_from.clone(),
                reason: "Sender identity must carry the 'whatsapp:' prefix".to_string(),
            });
        }

        for media_url in &self.provider.media_urls {
            validation::validate_url("provider.media_urls", media_url)?;
        }

        if let Some(base_url) = &self.provider.api_base_url {
            validation::validate_url("provider.api_base_url", base_url)?;
        }

        validation::validate_range("dispatch.delay_seconds", self.delay_seconds(), 0, 300)?;

        Ok(())
    }
}

impl ConfigProvider for CampaignConfig {
    fn data_dir(&self) -> &str {
        &self.data.data_dir
    }

    fn raw_csv(&self) -> &str {
        &self.data.raw_csv
    }

    fn normalized_csv(&self) -> &str {
        &self.data.normalized_csv
    }

    fn default_country_code(&self) -> &str {
        self.data.default_country_code.as_deref().unwrap_or("+91")
    }

    fn allow_repeat(&self) -> bool {
        self.dispatch.allow_repeat.unwrap_or(false)
    }

    fn delay_seconds(&self) -> u64 {
        self.dispatch.delay_seconds.unwrap_or(2)
    }

    fn template_sid(&self) -> &str {
        &self.provider.template_sid
    }

    fn media_urls(&self) -> &[String] {
        &self.provider.media_urls
    }
}

impl Validate for CampaignConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
