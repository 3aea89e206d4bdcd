//! # Prompt Dataset Builder
//!
//! Batch reconciliation tools for JSON datasets of LLM prompt/response
//! pairs produced by two pipelines: a *generator* that answers prompts and
//! an *analyzer* that proposes clarified rewrites of ambiguous prompts.
//!
//! ## Operations
//!
//! Three independent entry points share a common shape
//! (load → validate → transform → sort → re-index → persist):
//!
//! - **Merge-and-Validate** ([`merge_datasets`]): joins the two datasets by
//!   prompt, failing loudly when the key sets differ.
//! - **Deduplicate-and-Group** ([`group_records`]): collapses duplicate
//!   `(field, prompt)` records, drops unanswered ones, and groups the rest
//!   by field with a single global index.
//! - **Unique-Pair Extraction** ([`unique_pairs`]): projects a dataset down
//!   to its distinct trimmed `(field, prompt)` pairs.
//!
//! A supplementary [`reading_metrics`] pass compares reading effort between
//! baseline responses and clarified prompts over merged output.
//!
//! Each operation is a pure function over in-memory collections; the
//! matching `run_*` wrapper takes a config struct with the file paths and
//! performs the I/O and logging.
//!
//! ## Example
//!
//! ```rust,ignore
//! use prompt_dataset_builder::*;
//!
//! let config = MergeConfig {
//!     generator_path: "generatorLLMResponseWithFollowup.json".into(),
//!     analyzer_path: "analyzerLLMResponse.json".into(),
//!     output_path: "merged_LLM_output.json".into(),
//! };
//! let summary = run_merge(&config)?;
//! println!("merged {} records", summary.records);
//! ```

pub mod analysis;
pub mod error;
pub mod grouping;
pub mod ingestion;
pub mod merge;
pub mod pairs;
pub mod schema;

pub use analysis::{reading_metrics, run_analysis, ReadingMetrics, CHARS_PER_SECOND};
pub use error::{DatasetError, Result};
pub use grouping::{group_records, run_group, GroupReport};
pub use ingestion::{read_records, write_lines, write_pretty_json};
pub use merge::{merge_datasets, run_merge, MergeSummary};
pub use pairs::{run_pairs, unique_pairs};
pub use schema::*;
