use crate::error::{DatasetError, Result};
use crate::ingestion::{read_records, require_key_field, write_pretty_json};
use crate::schema::{AnalyzerRecord, AnalyzerVerdict, GeneratorRecord, MergeConfig, MergedRecord};
use log::{error, info};
use std::collections::HashMap;

/// Counts reported after a successful merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub records: usize,
}

/// Joins the generator and analyzer datasets on the prompt key.
///
/// Both key sets must be identical; any asymmetry fails the whole merge
/// with [`DatasetError::KeySetMismatch`] reporting the missing prompts on
/// each side. Duplicate prompts within one dataset resolve last-write-wins
/// while the key map is built.
pub fn merge_datasets(
    generator: Vec<GeneratorRecord>,
    analyzer: Vec<AnalyzerRecord>,
) -> Result<Vec<MergedRecord>> {
    for (i, record) in generator.iter().enumerate() {
        require_key_field(&record.prompt, i, "prompt")?;
        require_key_field(&record.field, i, "field")?;
    }
    for (i, record) in analyzer.iter().enumerate() {
        require_key_field(&record.prompt, i, "prompt")?;
    }

    let gen_map: HashMap<String, GeneratorRecord> = generator
        .into_iter()
        .map(|r| (r.prompt.clone(), r))
        .collect();
    let ana_map: HashMap<String, AnalyzerRecord> = analyzer
        .into_iter()
        .map(|r| (r.prompt.clone(), r))
        .collect();

    let mut missing_in_analyzer: Vec<String> = gen_map
        .keys()
        .filter(|k| !ana_map.contains_key(*k))
        .cloned()
        .collect();
    let mut missing_in_generator: Vec<String> = ana_map
        .keys()
        .filter(|k| !gen_map.contains_key(*k))
        .cloned()
        .collect();
    missing_in_analyzer.sort();
    missing_in_generator.sort();

    if !missing_in_analyzer.is_empty() || !missing_in_generator.is_empty() {
        return Err(DatasetError::KeySetMismatch {
            missing_in_analyzer,
            missing_in_generator,
        });
    }

    let mut merged: Vec<MergedRecord> = Vec::with_capacity(gen_map.len());
    for (prompt, gen) in gen_map {
        let ana = &ana_map[&prompt];
        // The analyzer's response is itself JSON-encoded text.
        let verdict: AnalyzerVerdict = serde_json::from_str(&ana.response).map_err(|source| {
            DatasetError::AnalyzerPayload {
                prompt: prompt.clone(),
                source,
            }
        })?;

        merged.push(MergedRecord {
            index: 0, // assigned after the final sort
            prompt,
            field: gen.field,
            baseline_response: gen.response,
            response_length: gen.response_length,
            followup_prompt: gen.followup_prompt,
            analyzer_response: verdict,
            analyzer_response_length: ana.response_length,
        });
    }

    merged.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.prompt.cmp(&b.prompt)));
    for (i, record) in merged.iter_mut().enumerate() {
        record.index = i + 1;
    }

    Ok(merged)
}

/// Reads both datasets, merges them, and writes the joined output.
///
/// On a key-set mismatch the full missing lists are logged per side and no
/// output file is produced.
pub fn run_merge(config: &MergeConfig) -> Result<MergeSummary> {
    let generator: Vec<GeneratorRecord> = read_records(&config.generator_path)?;
    let analyzer: Vec<AnalyzerRecord> = read_records(&config.analyzer_path)?;

    let merged = match merge_datasets(generator, analyzer) {
        Ok(merged) => merged,
        Err(DatasetError::KeySetMismatch {
            missing_in_analyzer,
            missing_in_generator,
        }) => {
            error!(
                "Prompt mismatch between {} and {}",
                config.generator_path.display(),
                config.analyzer_path.display()
            );
            if !missing_in_analyzer.is_empty() {
                error!(
                    "Missing in {}:\n{}",
                    config.analyzer_path.display(),
                    missing_in_analyzer.join("\n")
                );
            }
            if !missing_in_generator.is_empty() {
                error!(
                    "Missing in {}:\n{}",
                    config.generator_path.display(),
                    missing_in_generator.join("\n")
                );
            }
            return Err(DatasetError::KeySetMismatch {
                missing_in_analyzer,
                missing_in_generator,
            });
        }
        Err(e) => return Err(e),
    };

    write_pretty_json(&config.output_path, &merged)?;
    info!(
        "Merged {} records, sorted by (field, prompt), re-indexed, and saved to {}",
        merged.len(),
        config.output_path.display()
    );

    Ok(MergeSummary {
        records: merged.len(),
    })
}
