use std::fs;

use counter_engine::{load_model_list, parse_model_list, ModelId, ModelListError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn ids(models: &[ModelId]) -> Vec<&str> {
    models.iter().map(ModelId::as_str).collect()
}

#[test]
fn parses_trimmed_non_empty_lines_in_order() {
    let text = "  gpt2\n\nbert-base-uncased  \n\t\n meta-llama/Llama-3.1-8B\r\ngpt2\n";
    let models = parse_model_list(text);
    assert_eq!(
        ids(&models),
        vec!["gpt2", "bert-base-uncased", "meta-llama/Llama-3.1-8B", "gpt2"]
    );
}

#[test]
fn empty_or_blank_text_yields_no_models() {
    assert!(parse_model_list("").is_empty());
    assert!(parse_model_list("\n  \n\t\n").is_empty());
}

#[test]
fn loads_models_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("models.txt");
    fs::write(&path, "openai-community/gpt2\n\n  google/gemma-2b \n").unwrap();

    let models = load_model_list(&path).unwrap();
    assert_eq!(ids(&models), vec!["openai-community/gpt2", "google/gemma-2b"]);
}

#[test]
fn missing_file_is_reported_as_missing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("models.txt");

    let err = load_model_list(&path).unwrap_err();
    match &err {
        ModelListError::Missing { path: reported } => assert_eq!(reported, &path),
        other => panic!("expected Missing, got {other:?}"),
    }
    assert!(err.to_string().contains("not found"));
}

#[test]
fn directory_path_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let err = load_model_list(temp.path()).unwrap_err();
    assert!(matches!(err, ModelListError::Io { .. }), "got {err:?}");
}
