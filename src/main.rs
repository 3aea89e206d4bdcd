use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use prompt_dataset_builder::schema::{
    AnalysisConfig, AnalyzerRecord, GeneratorRecord, GroupConfig, GroupedRecord, MergeConfig,
    MergedRecord, PairsConfig,
};
use prompt_dataset_builder::{run_analysis, run_group, run_merge, run_pairs};
use schemars::schema_for;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "prompt-dataset-builder",
    version,
    about = "Merge, deduplicate, group, and analyze LLM prompt/response datasets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the generator and analyzer datasets by prompt, failing on any
    /// key present in only one side
    Merge {
        /// Generator dataset (prompt, field, response, followup_prompt)
        generator: PathBuf,
        /// Analyzer dataset (prompt, JSON-encoded verdict response)
        analyzer: PathBuf,
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Deduplicate a dataset, drop unanswered records, and group by field
    /// with one global index
    Group {
        /// Input dataset
        input: PathBuf,
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
        /// Exclude records whose response length is at or below this value
        #[arg(short, long, default_value_t = 0)]
        threshold: usize,
    },
    /// Export distinct trimmed field,prompt pairs as delimited text
    Pairs {
        /// Input dataset
        input: PathBuf,
        /// Output text file (one field,prompt line per pair)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print reading-effort metrics for a merged dataset
    Analyze {
        /// Merged dataset produced by the merge subcommand
        input: PathBuf,
    },
    /// Print the JSON Schema describing a dataset shape
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaKind {
    Generator,
    Analyzer,
    Merged,
    Grouped,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Merge {
            generator,
            analyzer,
            output,
        } => {
            let config = MergeConfig {
                generator_path: generator,
                analyzer_path: analyzer,
                output_path: output,
            };
            run_merge(&config).context("merge failed")?;
        }
        Commands::Group {
            input,
            output,
            threshold,
        } => {
            let config = GroupConfig {
                input_path: input,
                output_path: output,
                threshold,
            };
            run_group(&config).context("grouping failed")?;
        }
        Commands::Pairs { input, output } => {
            let config = PairsConfig {
                input_path: input,
                output_path: output,
            };
            run_pairs(&config).context("pair extraction failed")?;
        }
        Commands::Analyze { input } => {
            let config = AnalysisConfig { input_path: input };
            run_analysis(&config).context("analysis failed")?;
        }
        Commands::Schema { kind } => {
            let schema = match kind {
                SchemaKind::Generator => schema_for!(GeneratorRecord),
                SchemaKind::Analyzer => schema_for!(AnalyzerRecord),
                SchemaKind::Merged => schema_for!(MergedRecord),
                SchemaKind::Grouped => schema_for!(GroupedRecord),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}
