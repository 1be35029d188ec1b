use std::collections::BTreeMap;
use once_cell::sync::Lazy;
use regex::Regex;

// @module: Dialogue line classification, chunking and reassembly

// @const: Line break pattern, accepts CRLF, lone CR and lone LF
static LINE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|\r|\n").unwrap()
});

// @const: Passthrough pattern, optional leading whitespace then a section marker
static SECTION_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\[").unwrap()
});

/// Canonical separator used when joining output lines
pub const LINE_SEPARATOR: &str = "\n";

/// Separator between a key and its translatable text
const KEY_SEPARATOR: char = '|';

/// Classification of a single dialogue file line
///
/// Classification is a pure function of the line content; it never looks at
/// neighboring lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// Blank, whitespace-only or `[SECTION]` line, copied to output verbatim
    Passthrough(String),
    /// `key|text` line; key is everything before the first `|`
    Keyed {
        /// Opaque identifier, kept untranslated
        key: String,
        /// Translatable text, may be empty
        text: String,
    },
    /// Line without a `|`, a continuation of the previous entry
    Bare(String),
}

/// One position of a chunk that requires translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableUnit {
    /// Key of the originating line; None for bare continuation lines
    pub key: Option<String>,
    /// Text to send to the provider
    pub text: String,
}

/// Classify a single line
///
/// Rules, first match wins:
/// 1. Empty, whitespace-only or `[`-prefixed lines are passthrough.
/// 2. Lines containing `|` are keyed; the key is everything before the first
///    `|`, the text everything after. A keyed line with empty text stays
///    keyed so that it occupies its position and is copied verbatim when it
///    carries nothing to translate.
/// 3. Everything else is a bare continuation line.
pub fn classify(line: &str) -> ClassifiedLine {
    if line.trim().is_empty() || SECTION_MARKER_REGEX.is_match(line) {
        return ClassifiedLine::Passthrough(line.to_string());
    }

    match line.split_once(KEY_SEPARATOR) {
        Some((key, text)) => ClassifiedLine::Keyed {
            key: key.to_string(),
            text: text.to_string(),
        },
        None => ClassifiedLine::Bare(line.to_string()),
    }
}

/// Split raw file content into lines, accepting any line break convention
pub fn split_lines(content: &str) -> Vec<String> {
    LINE_BREAK_REGEX.split(content).map(|s| s.to_string()).collect()
}

/// Split a line sequence into contiguous chunks of at most `size` lines
///
/// Chunks partition the input exactly: no line is dropped, duplicated or
/// reordered, and the last chunk may be shorter.
pub fn chunk_lines(lines: &[String], size: usize) -> Vec<&[String]> {
    debug_assert!(size >= 1);
    lines.chunks(size.max(1)).collect()
}

/// Build the sparse position -> unit map for one chunk
///
/// Positions holding passthrough lines, or lines whose text is empty after
/// stripping break characters, carry nothing to translate and are excluded.
/// The BTreeMap iterates in ascending position order, which is the order the
/// request is built in and the order responses are consumed in.
pub fn collect_units(chunk: &[String]) -> BTreeMap<usize, TranslatableUnit> {
    let mut units = BTreeMap::new();

    for (index, line) in chunk.iter().enumerate() {
        match classify(line) {
            ClassifiedLine::Passthrough(_) => {}
            ClassifiedLine::Keyed { key, text } => {
                let text = strip_breaks(&text);
                if !text.is_empty() {
                    units.insert(index, TranslatableUnit { key: Some(key), text });
                }
            }
            ClassifiedLine::Bare(text) => {
                let text = strip_breaks(&text);
                if !text.is_empty() {
                    units.insert(index, TranslatableUnit { key: None, text });
                }
            }
        }
    }

    units
}

/// Project the ordered request texts for a chunk's unit map
///
/// The i-th request text corresponds to the i-th smallest position in the
/// map. An empty map yields an empty request, which is never sent upstream.
pub fn build_request(units: &BTreeMap<usize, TranslatableUnit>) -> Vec<String> {
    units.values().map(|unit| unit.text.clone()).collect()
}

/// Reconstruct a chunk's output lines from the provider response
///
/// Walks the chunk position by position: positions without a unit are copied
/// verbatim, keyed units are rewritten as `key|translated`, bare units are
/// merged onto the previously emitted output line. `response` must have the
/// same length and order as the request built from `units`; on provider
/// failure the caller passes the original request texts so the chunk degrades
/// to a verbatim copy.
pub fn reassemble(
    chunk: &[String],
    units: &BTreeMap<usize, TranslatableUnit>,
    response: &[String],
    accumulator: &mut OutputAccumulator,
) {
    let mut cursor = 0;

    for (index, line) in chunk.iter().enumerate() {
        match units.get(&index) {
            None => accumulator.push(line.clone()),
            Some(unit) => {
                let translated = response
                    .get(cursor)
                    .map(|text| text.as_str())
                    .unwrap_or(unit.text.as_str());
                cursor += 1;

                match &unit.key {
                    Some(key) => {
                        accumulator.push(format!("{}{}{}", key, KEY_SEPARATOR, translated));
                    }
                    None => accumulator.push_merged(translated),
                }
            }
        }
    }
}

fn strip_breaks(text: &str) -> String {
    text.replace(['\r', '\n'], "")
}

/// Ordered output line sequence for a whole file
///
/// The accumulator is only ever appended to, or has its last line extended
/// for bare-continuation merges. It is file scoped, so a bare unit at the
/// head of a chunk merges into the previous chunk's last emitted line.
#[derive(Debug, Default)]
pub struct OutputAccumulator {
    lines: Vec<String>,
}

impl OutputAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new output line
    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Merge text onto the last emitted line, joined by a single space
    ///
    /// When nothing has been emitted yet the text starts a new unkeyed line
    /// instead.
    pub fn push_merged(&mut self, text: &str) {
        match self.lines.last_mut() {
            Some(last) => {
                last.push(' ');
                last.push_str(text);
            }
            None => self.lines.push(text.to_string()),
        }
    }

    /// Number of emitted lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been emitted yet
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Emitted lines so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join the emitted lines with the canonical separator
    pub fn into_content(self) -> String {
        self.lines.join(LINE_SEPARATOR)
    }
}
