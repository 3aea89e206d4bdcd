use prompt_dataset_builder::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn generator_json() -> &'static str {
    r#"[
        {"prompt": "what is a derivative", "field": "math",
         "response": "A derivative measures the rate of change of a function.",
         "responseLength": 55, "followup_prompt": "Of which function?"},
        {"prompt": "who won the war", "field": "history",
         "response": "Which war do you mean?", "responseLength": 22}
    ]"#
}

fn analyzer_json() -> &'static str {
    r#"[
        {"prompt": "what is a derivative",
         "response": "{\"suggestedClarifiedPrompt\":\"What is a derivative in calculus?\"}",
         "responseLength": 64},
        {"prompt": "who won the war",
         "response": "{\"suggestedClarifiedPrompt\":\"Who won World War II?\",\"confidence\":0.9}",
         "responseLength": 69}
    ]"#
}

#[test]
fn merge_run_writes_sorted_indexed_output() {
    let dir = TempDir::new().unwrap();
    let generator = write_file(&dir, "generator.json", generator_json());
    let analyzer = write_file(&dir, "analyzer.json", analyzer_json());
    let output = dir.path().join("merged.json");

    let config = MergeConfig {
        generator_path: generator,
        analyzer_path: analyzer,
        output_path: output.clone(),
    };
    let summary = run_merge(&config).unwrap();
    assert_eq!(summary.records, 2);

    let content = fs::read_to_string(&output).unwrap();
    let merged: Vec<MergedRecord> = serde_json::from_str(&content).unwrap();

    // history sorts before math; indices are dense and 1-based.
    assert_eq!(merged[0].field, "history");
    assert_eq!(merged[0].index, 1);
    assert_eq!(merged[1].field, "math");
    assert_eq!(merged[1].index, 2);

    // The nested analyzer payload was parsed, extra keys intact.
    assert_eq!(
        merged[0].analyzer_response.suggested_clarified_prompt,
        "Who won World War II?"
    );
    assert!(merged[0].analyzer_response.extra.contains_key("confidence"));

    // Pretty-printed with index leading each record.
    assert!(content.starts_with("[\n  {\n    \"index\": 1,"));
}

#[test]
fn merge_mismatch_writes_no_output() {
    let dir = TempDir::new().unwrap();
    let generator = write_file(&dir, "generator.json", generator_json());
    let analyzer = write_file(
        &dir,
        "analyzer.json",
        r#"[{"prompt": "what is a derivative",
            "response": "{\"suggestedClarifiedPrompt\":\"x\"}", "responseLength": 33}]"#,
    );
    let output = dir.path().join("merged.json");

    let config = MergeConfig {
        generator_path: generator,
        analyzer_path: analyzer,
        output_path: output.clone(),
    };
    let err = run_merge(&config).unwrap_err();
    match err {
        DatasetError::KeySetMismatch {
            missing_in_analyzer,
            missing_in_generator,
        } => {
            assert_eq!(missing_in_analyzer, vec!["who won the war".to_string()]);
            assert!(missing_in_generator.is_empty());
        }
        other => panic!("expected KeySetMismatch, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn group_run_accepts_wrapped_input_and_reindexes() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "dataset.json",
        r#"{"entries": [
            {"prompt": "pb", "field": "b", "response": "short"},
            {"prompt": "pa1", "field": "a", "response": "mid-length "},
            {"prompt": "pa2", "field": "a", "response": "the longest response here"},
            {"prompt": "pa1", "field": "a", "response": "duplicate, dropped"},
            {"prompt": "empty", "field": "a", "response": ""}
        ]}"#,
    );
    let output = dir.path().join("grouped.json");

    let config = GroupConfig {
        input_path: input,
        output_path: output.clone(),
        threshold: 0,
    };
    let report = run_group(&config).unwrap();
    assert_eq!(report.unanswered.len(), 1);
    assert_eq!(report.per_field["a"], 2);
    assert_eq!(report.per_field["b"], 1);

    let grouped: Vec<GroupedRecord> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let order: Vec<(&str, &str, usize)> = grouped
        .iter()
        .map(|r| (r.field.as_str(), r.prompt.as_str(), r.index))
        .collect();
    assert_eq!(
        order,
        vec![("a", "pa2", 1), ("a", "pa1", 2), ("b", "pb", 3)]
    );
}

#[test]
fn pairs_run_emits_trimmed_delimited_lines() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "dataset.json",
        r#"[
            {"prompt": " who won the war ", "field": " history "},
            {"prompt": "who won the war", "field": "history"},
            {"prompt": "what is a derivative", "field": "math"}
        ]"#,
    );
    let output = dir.path().join("pairs.csv");

    let config = PairsConfig {
        input_path: input,
        output_path: output.clone(),
    };
    let count = run_pairs(&config).unwrap();
    assert_eq!(count, 2);

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "history,who won the war\nmath,what is a derivative"
    );
}

#[test]
fn analysis_runs_over_merge_output() {
    let dir = TempDir::new().unwrap();
    let generator = write_file(&dir, "generator.json", generator_json());
    let analyzer = write_file(&dir, "analyzer.json", analyzer_json());
    let merged = dir.path().join("merged.json");

    run_merge(&MergeConfig {
        generator_path: generator,
        analyzer_path: analyzer,
        output_path: merged.clone(),
    })
    .unwrap();

    let metrics = run_analysis(&AnalysisConfig { input_path: merged })
        .unwrap()
        .unwrap();
    assert!(metrics.avg_baseline_chars > 0.0);
    assert!(metrics.avg_analyzer_chars > 0.0);
}

#[test]
fn malformed_input_is_fatal_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "dataset.json", "{ not json");
    let output = dir.path().join("grouped.json");

    let config = GroupConfig {
        input_path: input,
        output_path: output.clone(),
        threshold: 0,
    };
    assert!(matches!(
        run_group(&config),
        Err(DatasetError::MalformedInput { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn missing_input_file_is_fatal() {
    let config = PairsConfig {
        input_path: Path::new("/nonexistent/dataset.json").to_path_buf(),
        output_path: Path::new("/tmp/never-written.csv").to_path_buf(),
    };
    assert!(matches!(run_pairs(&config), Err(DatasetError::IoError(_))));
}
