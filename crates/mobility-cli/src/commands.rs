use anyhow::Result;
use comfy_table::Table;

use mobility_cli::types::{EnrichReport, RunOutputs, RunReport};
use mobility_cli::workflow;
use mobility_core::{CLASSIFICATION_RULES, ClassifierConfig, PipelineOptions, SummaryOptions};
use mobility_enrich::EnrichOptions;
use mobility_ingest::IngestOptions;

use crate::cli::{
    ClassifyArgs, ClassifyOptionsArgs, EnrichArgs, IngestArgs, RunArgs, SequencesArgs,
};
use crate::summary::apply_table_style;

pub fn run_categories() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Rule", "Category", "Label", "Condition"]);
    apply_table_style(&mut table);
    for rule in &CLASSIFICATION_RULES {
        table.add_row(vec![
            rule.id,
            rule.category.as_str(),
            rule.category.label(),
            rule.description,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_sequences(args: &SequencesArgs) -> Result<RunReport> {
    let options = PipelineOptions::default().with_ingest(ingest_options(&args.ingest));
    let options = with_threads(options, args.ingest.threads);
    workflow::sequences(&args.input, &args.output, &options)
}

pub fn run_classify(args: &ClassifyArgs) -> Result<RunReport> {
    let options = classify_options(PipelineOptions::default(), &args.classify);
    let options = with_threads(options, args.threads);
    workflow::classify(&args.input, args.cohort_output.as_deref(), &options)
}

pub fn run_full(args: &RunArgs) -> Result<RunReport> {
    let options = PipelineOptions::default().with_ingest(ingest_options(&args.ingest));
    let options = classify_options(options, &args.classify);
    let options = with_threads(options, args.ingest.threads);
    let outputs = RunOutputs {
        sequences: args.sequences_output.clone(),
        cohorts: args.cohort_output.clone(),
        summary_json: args.summary_json.clone(),
    };
    workflow::run(&args.input, &outputs, &options)
}

pub fn run_enrich(args: &EnrichArgs) -> Result<EnrichReport> {
    let options = EnrichOptions::default()
        .with_origin(args.origin.clone())
        .with_origin_only(args.origin_only);
    workflow::enrich(&args.input, &args.cache, &args.output, options)
}

fn ingest_options(args: &IngestArgs) -> IngestOptions {
    let mut options = IngestOptions::default();
    if let Some(size) = args.batch_size {
        options = options.with_batch_size(size);
    }
    if let Some(shards) = args.shards {
        options = options.with_shards(shards);
    }
    options
}

fn classify_options(options: PipelineOptions, args: &ClassifyOptionsArgs) -> PipelineOptions {
    options
        .with_classifier(
            ClassifierConfig::default()
                .with_origin(args.origin.clone())
                .with_hub(args.hub.clone()),
        )
        .with_summary(SummaryOptions::default().with_floor_year(args.floor_year))
}

fn with_threads(options: PipelineOptions, threads: Option<usize>) -> PipelineOptions {
    match threads {
        Some(threads) => options.with_threads(threads),
        None => options,
    }
}
