/*!
 * Tests for application configuration
 */

use anyhow::Result;
use dialoc::app_config::{Config, FileEncoding, Formality, LogLevel};
use crate::common;

/// Test that the default configuration matches the documented defaults
#[test]
fn test_default_withNoOverrides_shouldUseDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, None);
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.chunk_size, 20);
    assert_eq!(config.encoding, FileEncoding::Utf16Le);
    assert_eq!(config.translation.formality, Formality::PreferLess);
    assert_eq!(config.translation.timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that a minimal config file parses with defaults filled in
#[test]
fn test_from_file_withMinimalJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "target_language": "es" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.target_language, "es");
    assert_eq!(config.source_language, None);
    assert_eq!(config.chunk_size, 20);
    assert_eq!(config.encoding, FileEncoding::Utf16Le);
    Ok(())
}

/// Test that a full config file parses all fields
#[test]
fn test_from_file_withFullJson_shouldParseAllFields() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{
            "source_language": "de",
            "target_language": "en",
            "chunk_size": 5,
            "encoding": "utf8",
            "log_level": "debug",
            "translation": {
                "api_key": "key:fx",
                "formality": "prefer_more",
                "timeout_secs": 10
            }
        }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.source_language.as_deref(), Some("de"));
    assert_eq!(config.target_language, "en");
    assert_eq!(config.chunk_size, 5);
    assert_eq!(config.encoding, FileEncoding::Utf8);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.translation.api_key, "key:fx");
    assert_eq!(config.translation.formality, Formality::PreferMore);
    assert_eq!(config.translation.timeout_secs, 10);
    Ok(())
}

/// Test that save followed by from_file round-trips the configuration
#[test]
fn test_save_withConfig_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = common::test_config();
    config.chunk_size = 7;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.chunk_size, 7);
    assert_eq!(loaded.translation.api_key, config.translation.api_key);
    Ok(())
}

/// Test that validation rejects a missing API key
#[test]
fn test_validate_withMissingApiKey_shouldFail() {
    let mut config = common::test_config();
    config.translation.api_key = String::new();
    assert!(config.validate().is_err());
}

/// Test that validation rejects an empty target language
#[test]
fn test_validate_withEmptyTargetLanguage_shouldFail() {
    let mut config = common::test_config();
    config.target_language = String::new();
    assert!(config.validate().is_err());
}

/// Test that validation rejects a zero chunk size
#[test]
fn test_validate_withZeroChunkSize_shouldFail() {
    let mut config = common::test_config();
    config.chunk_size = 0;
    assert!(config.validate().is_err());
}

/// Test that validation accepts a complete configuration
#[test]
fn test_validate_withCompleteConfig_shouldSucceed() {
    assert!(common::test_config().validate().is_ok());
}

/// Test that formality values map to the DeepL wire format
#[test]
fn test_formality_asApiValue_shouldMatchWireFormat() {
    assert_eq!(Formality::DefaultTone.as_api_value(), "default");
    assert_eq!(Formality::More.as_api_value(), "more");
    assert_eq!(Formality::Less.as_api_value(), "less");
    assert_eq!(Formality::PreferMore.as_api_value(), "prefer_more");
    assert_eq!(Formality::PreferLess.as_api_value(), "prefer_less");
}

/// Test that encodings parse from common spellings
#[test]
fn test_encoding_fromStr_shouldAcceptCommonSpellings() {
    assert_eq!("utf8".parse::<FileEncoding>().unwrap(), FileEncoding::Utf8);
    assert_eq!("UTF-8".parse::<FileEncoding>().unwrap(), FileEncoding::Utf8);
    assert_eq!("utf16le".parse::<FileEncoding>().unwrap(), FileEncoding::Utf16Le);
    assert_eq!("UTF-16LE".parse::<FileEncoding>().unwrap(), FileEncoding::Utf16Le);
    assert!("latin1".parse::<FileEncoding>().is_err());
}
