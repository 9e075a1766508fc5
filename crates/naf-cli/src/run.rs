//! The `run` workflow: load, clean, apply rules, write.
//!
//! Outputs are written only after every rule succeeded, so a failed run
//! leaves no half-relabeled dataset behind.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use naf_core::{
    ApplyReport, EngineConfig, RuleRegistry, RuleSummary, RunSettings, apply_rules, load_config,
    prepare_text_columns,
};
use naf_ingest::{DataFormat, journal_to_frame, load_dataset, output_path, save_frames};
use naf_match::shared_models;
use naf_model::StrategyKind;
use tracing::{info, info_span};

/// Stem of the relabeled dataset file.
pub const DATA_STEM: &str = "data_with_naf";
/// Stem of the audit journal file.
pub const JOURNAL_STEM: &str = "log_rules_applied";

/// Inputs of one run, already parsed from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub methods: Vec<String>,
    pub tag: String,
    pub config: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<DataFormat>,
    pub dry_run: bool,
    pub synthetic_count: Option<usize>,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            methods: vec![StrategyKind::Exact.as_str().to_string()],
            tag: "naf_2025".to_string(),
            config: None,
            output_dir: None,
            format: None,
            dry_run: false,
            synthetic_count: None,
        }
    }
}

/// Paths written by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutputs {
    pub dataset: PathBuf,
    pub journal: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub input: PathBuf,
    pub tag: String,
    pub methods: Vec<StrategyKind>,
    pub rows_in: usize,
    pub rows_out: usize,
    pub modified: usize,
    pub created: usize,
    pub rules: Vec<RuleSummary>,
    /// `None` for a dry run.
    pub outputs: Option<RunOutputs>,
    pub elapsed_ms: u128,
}

/// File name suffix identifying the strategies of a run.
///
/// A single strategy gives `_<name>`; several give `_` followed by their
/// names sorted and joined with `_`.
pub fn output_suffix(methods: &[StrategyKind]) -> String {
    let mut names: Vec<&str> = methods.iter().map(|kind| kind.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    format!("_{}", names.join("_"))
}

/// Executes a full run.
///
/// # Errors
///
/// Fails on an unknown strategy name before any data is read, then on any
/// I/O, configuration or rule failure. Nothing is written on failure.
pub fn execute_run(options: &RunOptions) -> Result<RunResult> {
    let started = Instant::now();
    let span = info_span!("run", input = %options.input.display(), tag = %options.tag);
    let _guard = span.enter();

    let methods = StrategyKind::parse_all(&options.methods)?;
    if methods.is_empty() {
        bail!("at least one matching method is required");
    }

    let config = match &options.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    let mut dataset = load_dataset(&options.input)?;
    let rows_in = dataset.height();
    let text_columns =
        prepare_text_columns(&mut dataset, &config.columns.text, &config.columns.cleaned_suffix)
            .context("prepare text columns")?;

    let mut settings = RunSettings::new(methods.clone(), config.strategy_params())
        .with_text_columns(text_columns)
        .with_synthetic_count(options.synthetic_count);
    settings.modification_context = config.columns.modification_context.clone();
    settings.creation_context = config.columns.creation_context.clone();

    let registry = RuleRegistry::discover();
    let report = apply_rules(dataset, &registry, &options.tag, &settings, shared_models())?;
    let modified = report.modified_rows();
    let created = report.created_rows();
    let rules = report.rules.clone();

    let rows_out = report.dataset.height();

    let outputs = if options.dry_run {
        info!("dry run, no output written");
        None
    } else {
        Some(write_outputs(options, &methods, report)?)
    };

    Ok(RunResult {
        input: options.input.clone(),
        tag: options.tag.clone(),
        methods,
        rows_in,
        rows_out,
        modified,
        created,
        rules,
        outputs,
        elapsed_ms: started.elapsed().as_millis(),
    })
}

fn write_outputs(
    options: &RunOptions,
    methods: &[StrategyKind],
    report: ApplyReport,
) -> Result<RunOutputs> {
    let format = match options.format {
        Some(format) => format,
        None => DataFormat::from_path(&options.input)?,
    };
    let dir = output_dir(options);
    let suffix = output_suffix(methods);
    let dataset_path = output_path(&dir, DATA_STEM, &suffix, format);
    let journal_path = output_path(&dir, JOURNAL_STEM, &suffix, format);

    let mut journal = journal_to_frame(&report.journal)?;
    let mut frame = report.dataset.into_frame();
    save_frames(
        &mut [
            (&mut frame, dataset_path.as_path()),
            (&mut journal, journal_path.as_path()),
        ],
        format,
    )?;
    info!(
        dataset = %dataset_path.display(),
        journal = %journal_path.display(),
        "wrote outputs"
    );
    Ok(RunOutputs {
        dataset: dataset_path,
        journal: journal_path,
    })
}

fn output_dir(options: &RunOptions) -> PathBuf {
    options.output_dir.clone().unwrap_or_else(|| {
        options
            .input
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_for_single_method() {
        assert_eq!(output_suffix(&[StrategyKind::Approximate]), "_fuzzy");
    }

    #[test]
    fn suffix_sorts_methods() {
        insta::assert_snapshot!(
            output_suffix(&[StrategyKind::Semantic, StrategyKind::Exact, StrategyKind::Approximate]),
            @"_fuzzy_regex_similarity"
        );
    }
}
