//! Test doubles and fixture loading for the sift workspace.
//!
//! Scripted language models, static document sources, and recording unit
//! doubles shared by every crate's tests, plus typed loading of the JSON
//! fixtures under `test-fixtures/data`.

pub mod models;
pub mod sources;
pub mod units;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use sift_core::RetrievedDocument;

pub use models::{FailingModel, ScriptedModel};
pub use sources::StaticSource;
pub use units::{
    CountingValidator, FixedClassifier, PanickingGenerator, RecordingRetriever, ScriptedGenerator,
};

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("data").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/data from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures").join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load a document set from `documents/<name>.json`.
pub fn load_documents(name: &str) -> Vec<RetrievedDocument> {
    load_fixture(&format!("documents/{name}.json"))
}
