/*!
 * End-to-end dialogue file translation tests
 *
 * These tests drive the full pipeline (read, chunk, translate, reassemble,
 * write) against mock providers, so no network is touched.
 */

use std::fs;
use std::sync::Arc;
use anyhow::Result;
use indicatif::MultiProgress;

use dialoc::app_config::FileEncoding;
use dialoc::app_controller::Controller;
use dialoc::file_utils::FileManager;
use dialoc::providers::mock::MockProvider;
use crate::common;

/// Test that keyed lines are translated and structure is preserved
#[tokio::test]
async fn test_translate_file_withKeyedLines_shouldTranslateAndPreserveStructure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "input.txt",
        "[CHAPTER1]\nINTRO_01|Hello\nINTRO_02|World\n",
    )?;
    let output = temp_dir.path().join("output.txt");

    let provider = Arc::new(MockProvider::with_dictionary(&[
        ("Hello", "Bonjour"),
        ("World", "Monde"),
    ]));
    let controller = Controller::with_provider(common::test_config(), provider.clone());

    controller.translate_file(&input, &output, &MultiProgress::new()).await?;

    let translated = fs::read_to_string(&output)?;
    assert_eq!(translated, "[CHAPTER1]\nINTRO_01|Bonjour\nINTRO_02|Monde\n");
    assert_eq!(provider.call_count(), 1);
    Ok(())
}

/// Test that a bare continuation merges across chunk boundaries
#[tokio::test]
async fn test_translate_file_withBareContinuationAcrossChunks_shouldMergeIntoPreviousChunk() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "input.txt",
        "A|Hello\nthere",
    )?;
    let output = temp_dir.path().join("output.txt");

    let mut config = common::test_config();
    config.chunk_size = 1;

    let provider = Arc::new(MockProvider::with_dictionary(&[
        ("Hello", "Bonjour"),
        ("there", "là"),
    ]));
    let controller = Controller::with_provider(config, provider.clone());

    controller.translate_file(&input, &output, &MultiProgress::new()).await?;

    assert_eq!(fs::read_to_string(&output)?, "A|Bonjour là");
    // One call per non-empty chunk
    assert_eq!(provider.call_count(), 2);
    Ok(())
}

/// Fail-open law: with a failing provider the output mirrors the input
#[tokio::test]
async fn test_translate_file_withFailingProvider_shouldKeepSourceText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "[SECTION1]\nA|Hello\n\nB|\nC|World";
    let input = common::create_test_file(&temp_dir.path().to_path_buf(), "input.txt", content)?;
    let output = temp_dir.path().join("output.txt");

    let provider = Arc::new(MockProvider::failing());
    let controller = Controller::with_provider(common::test_config(), provider.clone());

    controller.translate_file(&input, &output, &MultiProgress::new()).await?;

    // No bare lines in the input, so the output is byte-identical
    assert_eq!(fs::read_to_string(&output)?, content);
    assert_eq!(provider.call_count(), 1);
    Ok(())
}

/// Test that a passthrough-only file makes no provider calls
#[tokio::test]
async fn test_translate_file_withOnlyPassthroughLines_shouldSkipProvider() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "[SECTION1]\n\n   \n[SECTION2]";
    let input = common::create_test_file(&temp_dir.path().to_path_buf(), "input.txt", content)?;
    let output = temp_dir.path().join("output.txt");

    let provider = Arc::new(MockProvider::working());
    let controller = Controller::with_provider(common::test_config(), provider.clone());

    controller.translate_file(&input, &output, &MultiProgress::new()).await?;

    assert_eq!(fs::read_to_string(&output)?, content);
    assert_eq!(provider.call_count(), 0);
    Ok(())
}

/// Test that mixed line breaks are normalized to the canonical separator
#[tokio::test]
async fn test_translate_file_withMixedLineBreaks_shouldNormalizeToLf() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "input.txt",
        "A|Hello\r\nB|World\rC|Again",
    )?;
    let output = temp_dir.path().join("output.txt");

    let provider = Arc::new(MockProvider::working());
    let controller = Controller::with_provider(common::test_config(), provider);

    controller.translate_file(&input, &output, &MultiProgress::new()).await?;

    assert_eq!(fs::read_to_string(&output)?, "A|HELLO\nB|WORLD\nC|AGAIN");
    Ok(())
}

/// Test that UTF-16LE files round-trip through the whole pipeline
#[tokio::test]
async fn test_translate_file_withUtf16Input_shouldWriteUtf16Output() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("input.txt");
    let output = temp_dir.path().join("output.txt");

    FileManager::write_to_file(&input, "[SECTION1]\nA|Hello", FileEncoding::Utf16Le)?;

    let mut config = common::test_config();
    config.encoding = FileEncoding::Utf16Le;

    let provider = Arc::new(MockProvider::with_dictionary(&[("Hello", "Bonjour")]));
    let controller = Controller::with_provider(config, provider);

    controller.translate_file(&input, &output, &MultiProgress::new()).await?;

    let bytes = fs::read(&output)?;
    assert_eq!(&bytes[..2], &[0xFF, 0xFE]);

    let translated = FileManager::read_to_string(&output, FileEncoding::Utf16Le)?;
    assert_eq!(translated, "[SECTION1]\nA|Bonjour");
    Ok(())
}

/// Test that folder translation processes every eligible file, preserving names
#[tokio::test]
async fn test_translate_folder_withEligibleFiles_shouldTranslateEach() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_dir = temp_dir.path().join("in");
    let output_dir = temp_dir.path().join("out").join("nested");
    fs::create_dir_all(&input_dir)?;

    common::create_test_dialogue_file(&input_dir.to_path_buf(), "first.txt")?;
    common::create_test_dialogue_file(&input_dir.to_path_buf(), "second.txt")?;
    common::create_test_file(&input_dir.to_path_buf(), "ignored.srt", "1\nnot a dialogue file")?;

    let provider = Arc::new(MockProvider::with_dictionary(&[
        ("Hello", "Bonjour"),
        ("World", "Monde"),
    ]));
    let controller = Controller::with_provider(common::test_config(), provider.clone());

    controller.translate_folder(&input_dir, &output_dir).await?;

    assert!(output_dir.is_dir());
    assert!(!output_dir.join("ignored.srt").exists());

    for name in ["first.txt", "second.txt"] {
        let translated = fs::read_to_string(output_dir.join(name))?;
        assert_eq!(translated, "[CHAPTER1]\nINTRO_01|Bonjour\nINTRO_02|Monde\n");
    }

    assert_eq!(provider.call_count(), 2);
    Ok(())
}

/// Test that folder translation fails for a missing input directory
#[tokio::test]
async fn test_translate_folder_withMissingInputDir_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("does_not_exist");
    let output_dir = temp_dir.path().join("out");

    let controller = Controller::with_provider(
        common::test_config(),
        Arc::new(MockProvider::working()),
    );

    assert!(controller.translate_folder(&missing, &output_dir).await.is_err());
    Ok(())
}

/// Test that run with a file input and directory output keeps the file name
#[tokio::test]
async fn test_run_withFileInputAndDirOutput_shouldKeepFileName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(&temp_dir.path().to_path_buf(), "dialogue.txt", "A|Hello")?;
    let output_dir = temp_dir.path().join("out");
    fs::create_dir_all(&output_dir)?;

    let controller = Controller::with_provider(
        common::test_config(),
        Arc::new(MockProvider::with_dictionary(&[("Hello", "Bonjour")])),
    );

    controller.run(input, output_dir.clone()).await?;

    assert_eq!(fs::read_to_string(output_dir.join("dialogue.txt"))?, "A|Bonjour");
    Ok(())
}
