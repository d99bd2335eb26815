//! Settings file loading and command-line overrides.

use std::path::Path;

use anyhow::Context;
use clap::Args;
use learner_core::{Settings, TestBlock};

/// The settings file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "learner.json";

/// Loads settings from `path`.
///
/// A missing file yields the defaults. A file that exists but does not
/// parse or validate is an error.
pub fn load_from_file(path: &Path) -> anyhow::Result<Settings> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            let settings = Settings::default();
            settings.validate()?;
            return Ok(settings);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let settings: Settings = serde_json::from_str(&contents)
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Options shared by every command that reads a set file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Name shown for the set (default: file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Separator between cards; `\n` and `\t` are unescaped
    #[arg(long, value_name = "DELIMITER", value_parser = parse_delimiter)]
    pub card_delimiter: Option<String>,

    /// Separator between term, optional year and definition
    #[arg(long, value_name = "DELIMITER", value_parser = parse_delimiter)]
    pub field_delimiter: Option<String>,

    /// Separator between hints inside a definition
    #[arg(long, value_name = "DELIMITER", value_parser = parse_delimiter)]
    pub hint_delimiter: Option<String>,

    /// Minimum similarity for a wrong answer to be offered as a typo
    #[arg(long, value_name = "RATIO")]
    pub typo_ratio: Option<f64>,
}

impl SourceArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(ref card) = self.card_delimiter {
            settings.delimiters.card.clone_from(card);
        }
        if let Some(ref field) = self.field_delimiter {
            settings.delimiters.field.clone_from(field);
        }
        if let Some(ref hint) = self.hint_delimiter {
            settings.delimiters.hint.clone_from(hint);
        }
        if let Some(ratio) = self.typo_ratio {
            settings.similarity_threshold = ratio;
        }
    }
}

fn parse_delimiter(value: &str) -> Result<String, String> {
    let unescaped = value.replace("\\n", "\n").replace("\\t", "\t");
    if unescaped.is_empty() {
        return Err("delimiter must not be empty".to_string());
    }
    Ok(unescaped)
}

/// Parses a `kind=count` test block.
pub fn parse_block(value: &str) -> Result<TestBlock, String> {
    let (kind, count) = value
        .split_once('=')
        .ok_or_else(|| format!("expected kind=count, got {value:?}"))?;
    let count = count
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid count in {value:?}: {e}"))?;
    Ok(TestBlock::new(kind.trim(), count))
}
