// src/config/reports.rs

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::{fs, path::Path};
use tracing::debug;

use crate::error::{ConfigError, DefinitionError};

/// A config entry after validation; a bad entry only fails its own report.
pub type LoadedReport = Result<ReportDefinition, DefinitionError>;

/// One report to fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportDefinition {
    /// Account id, used as the request subdomain.
    pub compid: String,
    /// Display name and output file stem.
    pub name: String,
    /// Query parameters in config order: every key except `name`.
    pub params: Vec<(String, String)>,
}

impl ReportDefinition {
    /// Validate a raw config object.
    pub fn from_entry(entry: Map<String, Value>) -> Result<Self, DefinitionError> {
        let name = required_text(&entry, "name")?;
        if name.contains(|c: char| c == '/' || c == '\\') || name == "." || name == ".." {
            return Err(DefinitionError::InvalidValue {
                key: "name".into(),
                reason: "must be a plain file name",
            });
        }

        let compid = required_text(&entry, "compid")?;
        if !compid
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DefinitionError::InvalidValue {
                key: "compid".into(),
                reason: "must be a bare account id",
            });
        }

        let mut params = Vec::with_capacity(entry.len());
        for (key, value) in entry {
            if key == "name" {
                continue;
            }
            push_param(&mut params, key, value)?;
        }

        Ok(Self {
            compid,
            name,
            params,
        })
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required_text(entry: &Map<String, Value>, key: &'static str) -> Result<String, DefinitionError> {
    let value = entry.get(key).ok_or(DefinitionError::MissingKey(key))?;
    let text = scalar_text(value).ok_or_else(|| DefinitionError::InvalidValue {
        key: key.into(),
        reason: "must be a string or number",
    })?;
    if text.trim().is_empty() {
        return Err(DefinitionError::InvalidValue {
            key: key.into(),
            reason: "must not be empty",
        });
    }
    Ok(text)
}

// null drops the key; a list repeats it once per element.
fn push_param(
    params: &mut Vec<(String, String)>,
    key: String,
    value: Value,
) -> Result<(), DefinitionError> {
    let nested = || DefinitionError::InvalidValue {
        key: key.clone(),
        reason: "must not be a nested object",
    };
    match value {
        Value::Null => {}
        Value::Object(_) => return Err(nested()),
        Value::Array(items) => {
            for item in items.iter().filter(|v| !v.is_null()) {
                let text = scalar_text(item).ok_or_else(nested)?;
                params.push((key.clone(), text));
            }
        }
        scalar => {
            if let Some(text) = scalar_text(&scalar) {
                params.push((key, text));
            }
        }
    }
    Ok(())
}

/// Read the ordered list of report definitions at `path`.
///
/// `.yaml`/`.yml` files are read as YAML, anything else as JSON.
pub fn load_reports(path: &Path) -> Result<Vec<LoadedReport>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<Map<String, Value>> = parse_entries(path, &text)?;
    debug!(path = %path.display(), count = entries.len(), "loaded report definitions");

    Ok(entries
        .into_iter()
        .map(ReportDefinition::from_entry)
        .collect())
}

fn parse_entries<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T, ConfigError> {
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn entry(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_params_exclude_name_and_keep_order() {
        let def = ReportDefinition::from_entry(entry(json!({
            "searchid": "customsearch_sales",
            "compid": "1234567",
            "name": "Sales",
            "h": "abc123",
            "deploy": 1
        })))
        .unwrap();

        assert_eq!(def.name, "Sales");
        assert_eq!(def.compid, "1234567");
        assert_eq!(
            def.params,
            pairs(&[
                ("searchid", "customsearch_sales"),
                ("compid", "1234567"),
                ("h", "abc123"),
                ("deploy", "1"),
            ])
        );
    }

    #[test]
    fn test_value_rendering() {
        let def = ReportDefinition::from_entry(entry(json!({
            "compid": 42,
            "name": "Mixed",
            "flag": true,
            "skip": null,
            "ids": [1, "two", null]
        })))
        .unwrap();

        assert_eq!(def.compid, "42");
        assert_eq!(
            def.params,
            pairs(&[("compid", "42"), ("flag", "true"), ("ids", "1"), ("ids", "two")])
        );
    }

    #[test]
    fn test_missing_keys() {
        let err = ReportDefinition::from_entry(entry(json!({"compid": "1"}))).unwrap_err();
        assert_eq!(err, DefinitionError::MissingKey("name"));

        let err = ReportDefinition::from_entry(entry(json!({"name": "x"}))).unwrap_err();
        assert_eq!(err, DefinitionError::MissingKey("compid"));
    }

    #[test]
    fn test_rejects_bad_values() {
        for bad in [
            json!({"compid": "1", "name": "../escape"}),
            json!({"compid": "1", "name": ""}),
            json!({"compid": "evil.example.com/x?", "name": "r"}),
            json!({"compid": ["1"], "name": "r"}),
            json!({"compid": "1", "name": "r", "extra": {"nested": 1}}),
        ] {
            assert!(
                matches!(
                    ReportDefinition::from_entry(entry(bad.clone())),
                    Err(DefinitionError::InvalidValue { .. })
                ),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn test_load_json_keeps_bad_entries_in_place() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("netsuite_credentials.json");
        fs::write(
            &path,
            r#"[
                {"compid": "111", "name": "First", "searchid": "1"},
                {"compid": "222", "searchid": "2"},
                {"compid": "333", "name": "Third"}
            ]"#,
        )
        .unwrap();

        let loaded = load_reports(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].as_ref().unwrap().name, "First");
        assert_eq!(
            loaded[1].as_ref().unwrap_err(),
            &DefinitionError::MissingKey("name")
        );
        assert_eq!(loaded[2].as_ref().unwrap().name, "Third");
    }

    #[test]
    fn test_load_yaml() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("reports.yaml");
        fs::write(
            &path,
            "- compid: \"111\"\n  name: Stock\n  searchid: \"9\"\n  h: xyz\n",
        )
        .unwrap();

        let loaded = load_reports(&path).unwrap();
        let def = loaded[0].as_ref().unwrap();
        assert_eq!(def.name, "Stock");
        assert_eq!(
            def.params,
            pairs(&[("compid", "111"), ("searchid", "9"), ("h", "xyz")])
        );
    }

    #[test]
    fn test_load_errors() {
        let tmp = tempdir().unwrap();

        let missing = tmp.path().join("nope.json");
        assert!(matches!(load_reports(&missing), Err(ConfigError::Io { .. })));

        let broken = tmp.path().join("broken.json");
        fs::write(&broken, "[{\"compid\": ").unwrap();
        assert!(matches!(load_reports(&broken), Err(ConfigError::Json { .. })));

        let not_list = tmp.path().join("object.json");
        fs::write(&not_list, r#"{"compid": "1", "name": "x"}"#).unwrap();
        assert!(matches!(load_reports(&not_list), Err(ConfigError::Json { .. })));

        let bad_yaml = tmp.path().join("bad.yml");
        fs::write(&bad_yaml, "- compid: [unclosed\n").unwrap();
        assert!(matches!(load_reports(&bad_yaml), Err(ConfigError::Yaml { .. })));
    }
}
