/*!
 * Provider implementations for translation services.
 *
 * This module contains client implementations for translation providers:
 * - DeepL: DeepL REST API integration
 * - Mock: deterministic in-process provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the application controller.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate an ordered batch of texts
    ///
    /// # Arguments
    /// * `texts` - The texts to translate, in request order
    /// * `source_language` - Source language code; None lets the provider auto-detect
    /// * `target_language` - Target language code
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - Translated texts with the same
    ///   length and order as `texts`, or an error
    async fn translate_batch(
        &self,
        texts: &[String],
        source_language: Option<&str>,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod deepl;
pub mod mock;
