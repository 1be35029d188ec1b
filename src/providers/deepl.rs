use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::Client;
use log::error;

use crate::app_config::Formality;
use crate::errors::ProviderError;
use crate::providers::Provider;

/// Endpoint for DeepL API Pro keys
const PRO_ENDPOINT: &str = "https://api.deepl.com";

/// Endpoint for DeepL API Free keys (key suffix ":fx")
const FREE_ENDPOINT: &str = "https://api-free.deepl.com";

/// DeepL client for interacting with the DeepL REST API
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the endpoint matching the key)
    endpoint: String,
    /// Formality preference sent with every request
    formality: Formality,
}

/// DeepL translate request body
#[derive(Debug, Serialize)]
pub struct DeepLRequest {
    /// Texts to translate, one result per element
    text: Vec<String>,

    /// Source language code; omitted for auto-detection
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,

    /// Target language code
    target_lang: String,

    /// Formality preference
    #[serde(skip_serializing_if = "Option::is_none")]
    formality: Option<String>,
}

/// DeepL translate response body
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// Translations in request order
    pub translations: Vec<DeepLTranslation>,
}

/// A single translation in a DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// Language DeepL detected the source text to be in
    pub detected_source_language: Option<String>,

    /// The translated text
    pub text: String,
}

impl DeepL {
    /// Create a new DeepL client
    ///
    /// An empty `endpoint` selects the API host matching the key: keys with
    /// the ":fx" suffix are Free-plan keys and go to the free endpoint.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, formality: Formality, timeout_secs: u64) -> Self {
        let api_key = api_key.into();
        let endpoint = endpoint.into();
        let endpoint = if endpoint.is_empty() {
            Self::endpoint_for_key(&api_key).to_string()
        } else {
            endpoint
        };

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key,
            endpoint,
            formality,
        }
    }

    /// Select the API endpoint matching a key
    pub fn endpoint_for_key(api_key: &str) -> &'static str {
        if api_key.ends_with(":fx") {
            FREE_ENDPOINT
        } else {
            PRO_ENDPOINT
        }
    }

    /// Endpoint this client sends requests to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), path)
    }

    fn map_status_error(status: reqwest::StatusCode, body: String) -> ProviderError {
        match status.as_u16() {
            401 | 403 => ProviderError::AuthenticationError(body),
            429 => ProviderError::RateLimitExceeded(body),
            456 => ProviderError::QuotaExceeded(body),
            code => ProviderError::ApiError { status_code: code, message: body },
        }
    }

    /// Complete a translate request
    pub async fn complete(&self, request: DeepLRequest) -> Result<DeepLResponse, ProviderError> {
        let response = self.client.post(self.api_url("/v2/translate"))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to send request to DeepL API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(Self::map_status_error(status, error_text));
        }

        let deepl_response = response.json::<DeepLResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepL API response: {}", e)))?;

        Ok(deepl_response)
    }
}

#[async_trait]
impl Provider for DeepL {
    async fn translate_batch(
        &self,
        texts: &[String],
        source_language: Option<&str>,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let formality = match self.formality {
            Formality::DefaultTone => None,
            other => Some(other.as_api_value().to_string()),
        };

        let request = DeepLRequest {
            text: texts.to_vec(),
            source_lang: source_language.map(|lang| lang.to_uppercase()),
            target_lang: target_language.to_uppercase(),
            formality,
        };

        let response = self.complete(request).await?;

        if response.translations.len() != texts.len() {
            return Err(ProviderError::ParseError(format!(
                "DeepL returned {} translations for {} texts",
                response.translations.len(),
                texts.len()
            )));
        }

        Ok(response.translations.into_iter().map(|t| t.text).collect())
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.client.get(self.api_url("/v2/usage"))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to reach DeepL API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(Self::map_status_error(status, error_text));
        }

        Ok(())
    }
}
