use anyhow::Result;
use comfy_table::Table;
use naf_core::RuleRegistry;
use naf_cli::run::{RunOptions, RunResult, execute_run};
use naf_ingest::DataFormat;

use crate::cli::{OutputFormatArg, RulesArgs, RunArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_rules(args: &RunArgs) -> Result<RunResult> {
    let options = RunOptions {
        input: args.input.clone(),
        methods: args.methods.clone(),
        tag: args.tag.clone(),
        config: args.config.clone(),
        output_dir: args.output_dir.clone(),
        format: args.format.map(|format| match format {
            OutputFormatArg::Csv => DataFormat::Csv,
            OutputFormatArg::Parquet => DataFormat::Parquet,
        }),
        dry_run: args.dry_run,
        synthetic_count: args.synthetic_count,
    };
    execute_run(&options)
}

pub fn list_rules(args: &RulesArgs) -> Result<()> {
    let registry = RuleRegistry::discover();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Tags"),
        header_cell("Kind"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    let selected: Vec<_> = match &args.tag {
        Some(tag) => registry.rules_with_tag(tag),
        None => registry.rules().collect(),
    };
    for rule in &selected {
        let meta = rule.meta();
        table.add_row(vec![
            meta.name.clone(),
            meta.tags.join(", "),
            rule.change_kind().to_string(),
            meta.description.clone(),
        ]);
    }
    println!("{table}");
    println!("{} rule(s)", selected.len());
    Ok(())
}
