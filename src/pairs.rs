use crate::error::Result;
use crate::ingestion::{read_records, require_key_field, write_lines};
use crate::schema::{GeneratorRecord, PairsConfig};
use log::info;
use std::collections::HashSet;

/// Projects a dataset down to its distinct `(field, prompt)` pairs.
///
/// Both components are trimmed before the dedup key is computed and before
/// emission, so records differing only by surrounding whitespace collapse
/// to one pair. First-seen order is preserved.
pub fn unique_pairs(records: &[GeneratorRecord]) -> Result<Vec<(String, String)>> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut pairs: Vec<(String, String)> = Vec::new();

    for (i, record) in records.iter().enumerate() {
        require_key_field(&record.field, i, "field")?;
        require_key_field(&record.prompt, i, "prompt")?;

        let pair = (
            record.field.trim().to_string(),
            record.prompt.trim().to_string(),
        );
        if seen.insert(pair.clone()) {
            pairs.push(pair);
        }
    }

    Ok(pairs)
}

/// Reads a dataset and writes its unique pairs as `field,prompt` lines.
///
/// Embedded commas in either component are not escaped; the export is a
/// plain delimited list, not a conforming CSV.
pub fn run_pairs(config: &PairsConfig) -> Result<usize> {
    let records: Vec<GeneratorRecord> = read_records(&config.input_path)?;
    let pairs = unique_pairs(&records)?;

    let lines: Vec<String> = pairs
        .iter()
        .map(|(field, prompt)| format!("{field},{prompt}"))
        .collect();
    write_lines(&config.output_path, &lines)?;

    info!(
        "Extracted {} unique pairs from {} records into {}",
        pairs.len(),
        records.len(),
        config.output_path.display()
    );
    Ok(pairs.len())
}
