use crate::error::Result;
use crate::ingestion::read_records;
use crate::schema::{AnalysisConfig, MergedRecord};
use log::info;

/// Assumed reading speed for the time estimates.
pub const CHARS_PER_SECOND: f64 = 15.0;

/// Reading-effort comparison between baseline responses and the analyzer's
/// clarified prompts, counting alphanumeric characters only.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingMetrics {
    pub avg_baseline_chars: f64,
    pub avg_analyzer_chars: f64,
    pub net_chars_saved: f64,
    pub baseline_seconds: f64,
    pub analyzer_seconds: f64,
    pub net_seconds_saved: f64,
}

fn alphanumeric_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_alphanumeric).count()
}

/// Computes average per-record character counts for both response kinds
/// and the implied reading times. Returns `None` for an empty dataset.
pub fn reading_metrics(records: &[MergedRecord]) -> Option<ReadingMetrics> {
    if records.is_empty() {
        return None;
    }

    let mut baseline_total = 0usize;
    let mut analyzer_total = 0usize;
    for record in records {
        baseline_total += alphanumeric_count(record.baseline_response.as_deref().unwrap_or(""));
        analyzer_total +=
            alphanumeric_count(&record.analyzer_response.suggested_clarified_prompt);
    }

    let count = records.len() as f64;
    let avg_baseline_chars = baseline_total as f64 / count;
    let avg_analyzer_chars = analyzer_total as f64 / count;
    let net_chars_saved = avg_baseline_chars - avg_analyzer_chars;

    Some(ReadingMetrics {
        avg_baseline_chars,
        avg_analyzer_chars,
        net_chars_saved,
        baseline_seconds: avg_baseline_chars / CHARS_PER_SECOND,
        analyzer_seconds: avg_analyzer_chars / CHARS_PER_SECOND,
        net_seconds_saved: net_chars_saved / CHARS_PER_SECOND,
    })
}

/// Reads a merged dataset and logs its reading-effort metrics. No output
/// file is produced.
pub fn run_analysis(config: &AnalysisConfig) -> Result<Option<ReadingMetrics>> {
    let records: Vec<MergedRecord> = read_records(&config.input_path)?;
    let metrics = match reading_metrics(&records) {
        Some(metrics) => metrics,
        None => {
            info!("No records in {}; nothing to analyze", config.input_path.display());
            return Ok(None);
        }
    };

    info!(
        "Avg. baseline response: {:.1} chars ({:.2} sec at {CHARS_PER_SECOND} chars/sec)",
        metrics.avg_baseline_chars, metrics.baseline_seconds
    );
    info!(
        "Avg. clarified prompt: {:.1} chars ({:.2} sec at {CHARS_PER_SECOND} chars/sec)",
        metrics.avg_analyzer_chars, metrics.analyzer_seconds
    );
    info!(
        "Net reading effort saved: {:.1} chars ({:.2} sec)",
        metrics.net_chars_saved, metrics.net_seconds_saved
    );

    Ok(Some(metrics))
}
