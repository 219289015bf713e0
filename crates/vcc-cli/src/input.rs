//! Document loading for subcommands that read local files.

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Read a JSON or YAML document. Files ending in `.yaml` / `.yml` are
/// parsed as YAML, everything else as JSON.
pub fn read_document(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(path, &content)
}

fn parse_document(path: &Path, content: &str) -> anyhow::Result<Value> {
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml::from_str(content)
            .with_context(|| format!("failed to parse YAML in {}", path.display()))
    } else {
        serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))
    }
}
