//! Versioned loading of [`PrecomputedDraftMetrics`].
//!
//! Bundles carry a `schema_version`. Older layouts are upgraded in a single,
//! explicit migration step on the JSON value before typed deserialization, so
//! the typed model only ever describes the current layout.
//!
//! | version | layout |
//! |---|---|
//! | 1 | `synergy` is a nested map `{a: {b: entry}}`; no `dataset_id`, no `player_reliability` |
//! | 2 | `synergy` is a list of pair entries; adds `dataset_id` and `player_reliability` |

use serde_json::{Map, Value, json};
use xxhash_rust::xxh3::xxh3_64;

use crate::metrics::{DatasetId, PrecomputedDraftMetrics};

pub const SCHEMA_VERSION: u32 = 2;

const EPOCH: &str = "1970-01-01T00:00:00Z";

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MetricsLoadError {
    #[display("malformed metrics bundle: {_0}")]
    Json(serde_json::Error),
    #[display("metrics bundle has no schema_version")]
    #[from(ignore)]
    MissingVersion,
    #[display("unsupported schema version {found}")]
    #[from(ignore)]
    UnsupportedVersion { found: u64 },
    #[display("malformed legacy synergy map: {reason}")]
    #[from(ignore)]
    LegacySynergy {
        #[error(not(source))]
        reason: &'static str,
    },
}

impl PrecomputedDraftMetrics {
    /// Parses a bundle of any supported schema version.
    ///
    /// # Errors
    ///
    /// See [`PrecomputedDraftMetrics::from_json_value`].
    pub fn from_json_str(json: &str) -> Result<Self, MetricsLoadError> {
        Self::from_json_value(serde_json::from_str(json)?)
    }

    /// Migrates `value` to the current schema and deserializes it.
    ///
    /// # Errors
    ///
    /// Fails on a missing or unknown schema version, or when the (migrated)
    /// value does not match the current layout.
    pub fn from_json_value(mut value: Value) -> Result<Self, MetricsLoadError> {
        let version = value
            .get("schema_version")
            .and_then(Value::as_u64)
            .ok_or(MetricsLoadError::MissingVersion)?;
        match version {
            1 => {
                tracing::warn!(from = 1, to = SCHEMA_VERSION, "migrating metrics bundle");
                migrate_v1(&mut value)?;
            }
            2 => {}
            found => return Err(MetricsLoadError::UnsupportedVersion { found }),
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn legacy(reason: &'static str) -> MetricsLoadError {
    MetricsLoadError::LegacySynergy { reason }
}

fn migrate_v1(value: &mut Value) -> Result<(), MetricsLoadError> {
    // Keys of a `Value` object are sorted, so the text is canonical.
    let dataset_id = DatasetId::from_hash(xxh3_64(value.to_string().as_bytes()));
    let Some(root) = value.as_object_mut() else {
        return Err(legacy("bundle is not an object"));
    };

    let nested = root.remove("synergy").unwrap_or_else(|| Value::Object(Map::new()));
    let Value::Object(nested) = nested else {
        return Err(legacy("synergy is not an object"));
    };
    let mut entries = std::collections::BTreeMap::new();
    for (a, partners) in nested {
        let Value::Object(partners) = partners else {
            return Err(legacy("synergy partners are not an object"));
        };
        for (b, entry) in partners {
            if a == b {
                continue;
            }
            let Value::Object(mut entry) = entry else {
                return Err(legacy("synergy entry is not an object"));
            };
            let (first, second) = if a < b { (a.clone(), b) } else { (b, a.clone()) };
            entry.insert("first".into(), json!(first));
            entry.insert("second".into(), json!(second));
            entry.entry("wins").or_insert(json!(0));
            entries.entry((first, second)).or_insert(Value::Object(entry));
        }
    }

    root.insert("synergy".into(), Value::Array(entries.into_values().collect()));
    root.insert("dataset_id".into(), json!(dataset_id));
    root.entry("generated_at").or_insert(json!(EPOCH));
    root.entry("player_reliability").or_insert(json!([]));
    root.insert("schema_version".into(), json!(SCHEMA_VERSION));
    Ok(())
}
