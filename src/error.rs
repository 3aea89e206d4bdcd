use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Prompt key sets differ: {} missing from analyzer, {} missing from generator", .missing_in_analyzer.len(), .missing_in_generator.len())]
    KeySetMismatch {
        /// Prompts present in the generator dataset but absent from the analyzer dataset.
        missing_in_analyzer: Vec<String>,
        /// Prompts present in the analyzer dataset but absent from the generator dataset.
        missing_in_generator: Vec<String>,
    },

    #[error("Record #{index} is missing required field `{name}`")]
    MissingRequiredField { index: usize, name: &'static str },

    #[error("Analyzer response for prompt {prompt:?} is not valid JSON: {source}")]
    AnalyzerPayload {
        prompt: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unrecognized JSON structure in {path}: expected an array at the top level or under \"data\"/\"entries\"")]
    UnrecognizedShape { path: String },

    #[error("Malformed JSON in {path}: {source}")]
    MalformedInput {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
