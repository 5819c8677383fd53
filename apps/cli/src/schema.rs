//! Loading schema and instance documents.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cascade_validator::prelude::*;
use serde::de::DeserializeOwned;

/// Reads a JSON document, or a YAML one when the extension is `yaml`/`yml`.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML in `{}`", path.display()))
    } else {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in `{}`", path.display()))
    }
}

/// Loads a schema document.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let schema: Schema = read_document(path)?;
    tracing::debug!(
        path = %path.display(),
        types = schema.types.len(),
        annotation_types = schema.annotation_types.len(),
        "schema loaded"
    );
    Ok(schema)
}

/// A synthesizer knowing the built-in annotations plus the schema's own.
pub fn synthesizer(schema: &Schema, options: SynthOptions) -> Synthesizer {
    let mut catalog = RuleCatalog::with_builtin();
    catalog.extend(schema.annotation_types.iter().cloned());
    Synthesizer::new(catalog).with_options(options)
}

/// Looks up a type by full or simple name.
pub fn find_type<'a>(schema: &'a Schema, name: &str) -> Result<&'a TypeDescription> {
    schema
        .find(name)
        .with_context(|| format!("type `{name}` not found in schema"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("schema.json");
        let yaml = dir.path().join("schema.YML");
        fs::write(&json, r#"{"types": [{"name": "a::B", "kind": "record"}]}"#).unwrap();
        fs::write(&yaml, "types:\n  - name: a::B\n    kind: record\n").unwrap();

        assert_eq!(load_schema(&json).unwrap(), load_schema(&yaml).unwrap());
    }

    #[test]
    fn errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();

        let err = load_schema(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn schema_annotations_extend_builtins() {
        let schema: Schema = serde_json::from_str(
            r#"{"annotation_types": [{"name": "Sku", "annotations": [
                {"type": "ValidatedBy", "arguments": {"value": {"ref": "PatternFactory"}}}
            ]}]}"#,
        )
        .unwrap();

        let synth = synthesizer(&schema, SynthOptions::default());
        assert!(synth.catalog().annotation_type(&TypeRef::new("Sku")).is_some());
        assert!(synth.catalog().annotation_type(&TypeRef::new("NotBlank")).is_some());
    }
}
