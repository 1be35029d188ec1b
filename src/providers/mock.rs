/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds, marking texts as translated
 * - `MockProvider::with_dictionary()` - Succeeds using a fixed word mapping
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::intermittent(n)` - Fails every nth request
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, uppercasing each text
    Working,
    /// Always succeeds, translating through a fixed dictionary and echoing
    /// texts without an entry
    Dictionary(HashMap<String, String>),
    /// Fails every nth request
    Intermittent { fail_every: usize },
    /// Always fails with a connection error
    Failing,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate_batch calls made
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock provider translating through a fixed dictionary
    pub fn with_dictionary(entries: &[(&str, &str)]) -> Self {
        let dictionary = entries.iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self::new(MockBehavior::Dictionary(dictionary))
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of translate_batch calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the call counter
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.call_count.clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate_batch(
        &self,
        texts: &[String],
        _source_language: Option<&str>,
        _target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;

        match &self.behavior {
            MockBehavior::Working => {
                Ok(texts.iter().map(|text| text.to_uppercase()).collect())
            }
            MockBehavior::Dictionary(dictionary) => {
                Ok(texts.iter()
                    .map(|text| dictionary.get(text).cloned().unwrap_or_else(|| text.clone()))
                    .collect())
            }
            MockBehavior::Intermittent { fail_every } => {
                if *fail_every > 0 && count % fail_every == 0 {
                    Err(ProviderError::ConnectionError("Simulated intermittent failure".to_string()))
                } else {
                    Ok(texts.iter().map(|text| text.to_uppercase()).collect())
                }
            }
            MockBehavior::Failing => {
                Err(ProviderError::ConnectionError("Simulated connection failure".to_string()))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => {
                Err(ProviderError::ConnectionError("Simulated connection failure".to_string()))
            }
            _ => Ok(()),
        }
    }
}
