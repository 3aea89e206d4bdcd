use crate::error::Result;
use crate::ingestion::{read_records, require_key_field, write_pretty_json};
use crate::schema::{GeneratorRecord, GroupConfig, GroupedRecord};
use log::info;
use std::collections::{BTreeMap, HashSet};

/// Outcome of one grouping pass: the re-indexed records plus the
/// diagnostic counts that get logged but never persisted.
#[derive(Debug, Clone, Default)]
pub struct GroupReport {
    pub records: Vec<GroupedRecord>,
    /// Trimmed `(field, prompt)` keys of records with no response text,
    /// kept for manual inspection.
    pub unanswered: Vec<(String, String)>,
    /// Records whose recomputed response length was at or below the
    /// threshold.
    pub below_threshold: usize,
    /// Retained record count per field, after filtering.
    pub per_field: BTreeMap<String, usize>,
}

/// Deduplicates on `(field, prompt)`, drops unanswered records, groups by
/// field, and assigns one global 1-based index across all groups.
///
/// The first occurrence of a duplicate key wins; response content plays no
/// part in the dedup decision. Response lengths are recomputed from the
/// response text rather than trusted from the input. Groups are emitted in
/// ascending field order, each sorted descending by response length with
/// ties keeping their `(field, prompt)` order.
pub fn group_records(records: Vec<GeneratorRecord>, threshold: usize) -> Result<GroupReport> {
    for (i, record) in records.iter().enumerate() {
        require_key_field(&record.field, i, "field")?;
        require_key_field(&record.prompt, i, "prompt")?;
    }

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut unique: Vec<GeneratorRecord> = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert((record.field.clone(), record.prompt.clone())) {
            unique.push(record);
        }
    }

    // Deterministic iteration order before grouping; not the final order.
    unique.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.prompt.cmp(&b.prompt)));

    let mut report = GroupReport::default();
    let mut groups: BTreeMap<String, Vec<GroupedRecord>> = BTreeMap::new();

    for record in unique {
        let response = match record.response {
            Some(ref r) if !r.is_empty() => r.clone(),
            _ => {
                report
                    .unanswered
                    .push((record.field.trim().to_string(), record.prompt.trim().to_string()));
                continue;
            }
        };

        let response_length = response.chars().count();
        if response_length <= threshold {
            report.below_threshold += 1;
            continue;
        }

        groups.entry(record.field.clone()).or_default().push(GroupedRecord {
            field: record.field,
            index: 0, // assigned once all groups are final
            prompt: record.prompt,
            response,
            response_length,
        });
    }

    let mut index = 1;
    for (field, mut members) in groups {
        members.sort_by(|a, b| b.response_length.cmp(&a.response_length));
        report.per_field.insert(field, members.len());
        for mut member in members {
            member.index = index;
            index += 1;
            report.records.push(member);
        }
    }

    Ok(report)
}

/// Reads a raw dataset, groups it, writes the grouped output, and logs the
/// diagnostic counts.
pub fn run_group(config: &GroupConfig) -> Result<GroupReport> {
    let records: Vec<GeneratorRecord> = read_records(&config.input_path)?;
    let report = group_records(records, config.threshold)?;

    for (field, prompt) in &report.unanswered {
        info!("Unanswered prompt skipped: {field},{prompt}");
    }
    info!("Below threshold ({}): {}", config.threshold, report.below_threshold);
    info!("Retained: {}", report.records.len());
    info!("Retained per field: {:?}", report.per_field);

    write_pretty_json(&config.output_path, &report.records)?;
    info!(
        "Grouped {} records into {} fields and saved to {}",
        report.records.len(),
        report.per_field.len(),
        config.output_path.display()
    );

    Ok(report)
}
