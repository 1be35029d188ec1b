use anyhow::{Result, Context};
use log::{error, info, debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use indicatif::{ProgressBar, ProgressStyle, MultiProgress};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::line_processor::{self, OutputAccumulator};
use crate::providers::Provider;
use crate::providers::deepl::DeepL;

// @module: Application controller for dialogue file translation

/// Extension of the dialogue files eligible for folder translation
const DIALOGUE_FILE_EXTENSION: &str = "txt";

/// Main application controller for dialogue file translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Translation provider
    provider: Arc<dyn Provider>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let provider = Arc::new(DeepL::new(
            config.translation.api_key.clone(),
            config.translation.endpoint.clone(),
            config.translation.formality,
            config.translation.timeout_secs,
        ));

        Ok(Self { config, provider })
    }

    /// Create a controller with an explicit provider, used by tests
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Self {
        Self { config, provider }
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.target_language.is_empty()
    }

    /// Run the main workflow for a file or directory input
    pub async fn run(&self, input_path: PathBuf, output_path: PathBuf) -> Result<()> {
        if !input_path.exists() {
            return Err(anyhow::anyhow!("Input path does not exist: {:?}", input_path));
        }

        if input_path.is_dir() {
            self.translate_folder(&input_path, &output_path).await
        } else {
            // A directory output keeps the input file name
            let output_file = if FileManager::dir_exists(&output_path) {
                let file_name = input_path.file_name()
                    .ok_or_else(|| anyhow::anyhow!("Input path has no file name: {:?}", input_path))?;
                output_path.join(file_name)
            } else {
                output_path
            };

            let multi_progress = MultiProgress::new();
            self.translate_file(&input_path, &output_file, &multi_progress).await
        }
    }

    /// Translate every eligible dialogue file of a directory, sequentially
    ///
    /// A file whose translation fails fatally (unreadable input, failed
    /// write) is reported and skipped; remaining files still run.
    pub async fn translate_folder(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_files(input_dir, DIALOGUE_FILE_EXTENSION)?;
        if files.is_empty() {
            warn!("No .{} files found in directory: {:?}", DIALOGUE_FILE_EXTENSION, input_dir);
            return Ok(());
        }

        FileManager::ensure_dir(output_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

        // Create multi-progress instance for multiple file processing
        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        folder_pb.set_style(Self::progress_style("files"));
        folder_pb.set_message("Processing files");

        let mut success_count = 0;
        let mut error_count = 0;

        for file in files.iter() {
            let file_name = file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_file = output_dir.join(&file_name);
            match self.translate_file(file, &output_file, &multi_progress).await {
                Ok(()) => {
                    success_count += 1;
                }
                Err(e) => {
                    error!("Skipping {:?}: {}", file, e);
                    error_count += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();
        info!(
            "Translation completed: {} succeeded, {} failed in {:.1}s",
            success_count,
            error_count,
            start_time.elapsed().as_secs_f64()
        );

        Ok(())
    }

    /// Translate a single dialogue file
    ///
    /// Reads the whole file, processes it chunk by chunk through the provider
    /// and writes the reassembled content with the input's encoding. Provider
    /// failures are recovered per chunk by keeping the source text, so the
    /// output always has the input's structural shape.
    pub async fn translate_file(&self, input_file: &Path, output_file: &Path, multi_progress: &MultiProgress) -> Result<()> {
        let content = FileManager::read_to_string(input_file, self.config.encoding)?;
        let lines = line_processor::split_lines(&content);
        let chunks = line_processor::chunk_lines(&lines, self.config.chunk_size);
        let total_chunks = chunks.len();

        let progress_bar = multi_progress.add(ProgressBar::new(total_chunks as u64));
        progress_bar.set_style(Self::progress_style("chunks"));
        progress_bar.set_message(format!(
            "Translating {}",
            input_file.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default()
        ));

        let mut accumulator = OutputAccumulator::new();

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            let units = line_processor::collect_units(chunk);
            let request = line_processor::build_request(&units);

            // An empty request is never sent to the provider
            let response = if request.is_empty() {
                Vec::new()
            } else {
                match self.provider.translate_batch(
                    &request,
                    self.config.source_language.as_deref(),
                    &self.config.target_language,
                ).await {
                    Ok(translated) => translated,
                    Err(e) => {
                        // Fail open: the chunk keeps its source text
                        error!("Chunk {}/{} translation failed, keeping source text: {}",
                            chunk_index + 1, total_chunks, e);
                        request.clone()
                    }
                }
            };

            line_processor::reassemble(chunk, &units, &response, &mut accumulator);

            let processed = chunk_index + 1;
            progress_bar.set_position(processed as u64);
            debug!("Progress: {}/{} chunks ({}%)",
                processed, total_chunks, processed * 100 / total_chunks);
        }

        progress_bar.finish_and_clear();

        FileManager::write_to_file(output_file, &accumulator.into_content(), self.config.encoding)?;
        info!("Translation success: {:?}", output_file);

        Ok(())
    }

    fn progress_style(unit: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
                unit
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }
}
