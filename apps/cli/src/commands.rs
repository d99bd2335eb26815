//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::Context;
use learner_core::{
    learn, parse, run_flashcards, run_test, serialize, Drill, Event, Interaction, LearnOptions,
    LearnSummary, RandomSource, Settings, TermSet, TestBlock, TestReport,
};
use tracing::info;

/// Reads and parses a set file with the configured delimiters and threshold.
pub fn load_set(path: &Path, name: Option<&str>, settings: &Settings) -> anyhow::Result<TermSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = name.map(str::to_string).unwrap_or_else(|| set_name(path));

    let parsed = parse(&content, &name, &settings.delimiters)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    if !parsed.skipped.is_empty() {
        info!(
            path = %path.display(),
            skipped = parsed.skipped.len(),
            "some cards were skipped"
        );
    }
    Ok(parsed.set.with_threshold(settings.similarity_threshold))
}

fn set_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "default".to_string())
}

fn open_set(
    path: &Path,
    name: Option<&str>,
    settings: &Settings,
    io: &mut dyn Interaction,
) -> anyhow::Result<TermSet> {
    let set = load_set(path, name, settings)?;
    io.show(&Event::SetLoaded(set.info()))?;
    Ok(set)
}

pub fn learn_command(
    path: &Path,
    name: Option<&str>,
    settings: &Settings,
    rng: &mut dyn RandomSource,
    io: &mut dyn Interaction,
) -> anyhow::Result<LearnSummary> {
    let mut set = open_set(path, name, settings, io)?;
    let summary = learn(
        &mut Drill::new(&mut set, rng, io),
        &LearnOptions::from(settings),
    )?;
    Ok(summary)
}

pub fn test_command(
    path: &Path,
    name: Option<&str>,
    settings: &Settings,
    blocks: &[TestBlock],
    report_path: Option<&Path>,
    rng: &mut dyn RandomSource,
    io: &mut dyn Interaction,
) -> anyhow::Result<TestReport> {
    let mut set = open_set(path, name, settings, io)?;
    let configuration = if blocks.is_empty() {
        settings.test.as_slice()
    } else {
        blocks
    };
    let report = run_test(&mut Drill::new(&mut set, rng, io), configuration)?;

    if let Some(report_path) = report_path {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        std::fs::write(report_path, json)
            .with_context(|| format!("failed to write {}", report_path.display()))?;
        info!(path = %report_path.display(), "wrote test report");
    }
    Ok(report)
}

pub fn flashcards_command(
    path: &Path,
    name: Option<&str>,
    settings: &Settings,
    io: &mut dyn Interaction,
) -> anyhow::Result<()> {
    let set = open_set(path, name, settings, io)?;
    run_flashcards(&set, io)?;
    Ok(())
}

/// Unions the sets in order and saves the result. Later files win on
/// shared terms.
pub fn merge_command(
    paths: &[PathBuf],
    settings: &Settings,
    output: &Path,
) -> anyhow::Result<TermSet> {
    let mut merged: Option<TermSet> = None;
    for path in paths {
        let set = load_set(path, None, settings)?;
        merged = Some(match merged {
            Some(acc) => acc.union(&set),
            None => set,
        });
    }
    let merged = merged.context("no files to merge")?;

    let text = serialize(&merged, &settings.delimiters)
        .with_context(|| format!("failed to save merged set to {}", output.display()))?;
    std::fs::write(output, text)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        files = paths.len(),
        terms = merged.len(),
        output = %output.display(),
        "merged sets"
    );
    Ok(merged)
}
