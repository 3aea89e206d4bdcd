use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One row of the generator pipeline's output: a prompt, a category label,
/// and the baseline model response (which may be absent when generation
/// failed or was skipped).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeneratorRecord {
    #[schemars(description = "The original query text. Acts as the join key when merging with the analyzer dataset and as part of the deduplication key.")]
    pub prompt: String,

    #[schemars(description = "Categorical label used for grouping and sorting (e.g., 'math', 'history')")]
    pub field: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Free-text model output. Absence or an empty string marks the record as unanswered; such records are filtered out of grouped output.")]
    pub response: Option<String>,

    #[serde(rename = "responseLength", default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Character length of the response as reported by the pipeline. Not trusted: the grouping path recomputes it from the response text.")]
    pub response_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Follow-up question the generator asked, if any")]
    pub followup_prompt: Option<String>,
}

/// One row of the analyzer pipeline's output. The `response` field is a
/// JSON-encoded [`AnalyzerVerdict`] that gets a nested parse during merge.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzerRecord {
    #[schemars(description = "The original query text, matching the generator dataset's prompt")]
    pub prompt: String,

    #[schemars(description = "JSON-encoded analyzer verdict containing at least suggestedClarifiedPrompt")]
    pub response: String,

    #[serde(rename = "responseLength")]
    pub response_length: usize,
}

/// The structured object embedded in [`AnalyzerRecord::response`]. Keys
/// beyond the clarified prompt are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzerVerdict {
    #[serde(rename = "suggestedClarifiedPrompt")]
    #[schemars(description = "The analyzer's rewrite of an ambiguous prompt")]
    pub suggested_clarified_prompt: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One joined record produced by merge. `index` is declared first so the
/// pretty-printed output leads with it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MergedRecord {
    #[schemars(description = "Dense 1-based position in the final (field, prompt) ordering")]
    pub index: usize,

    pub prompt: String,

    pub field: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_response: Option<String>,

    #[serde(rename = "responseLength", default, skip_serializing_if = "Option::is_none")]
    pub response_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup_prompt: Option<String>,

    pub analyzer_response: AnalyzerVerdict,

    #[serde(rename = "analyzer_responseLength")]
    pub analyzer_response_length: usize,
}

/// One row of grouped output: deduplicated, filtered, and globally
/// re-indexed across field groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GroupedRecord {
    pub field: String,

    #[schemars(description = "Dense 1-based position, monotonic across field groups")]
    pub index: usize,

    pub prompt: String,

    pub response: String,

    #[serde(rename = "responseLength")]
    #[schemars(description = "Character count recomputed from the response text")]
    pub response_length: usize,
}

/// Inputs and output for one merge run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub generator_path: PathBuf,
    pub analyzer_path: PathBuf,
    pub output_path: PathBuf,
}

/// Input, output, and filter threshold for one grouping run.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Records whose recomputed response length is at or below this value
    /// are excluded. Zero keeps every non-empty response.
    pub threshold: usize,
}

/// Input and output for one unique-pair extraction run.
#[derive(Debug, Clone)]
pub struct PairsConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Input for one reading-effort analysis run. Analysis prints metrics and
/// writes no file.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
}
