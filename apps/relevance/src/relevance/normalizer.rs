//! Response Normalizer: coerces the model's loosely-structured reply into a
//! `RelevanceTable`.
//!
//! Never fails: anything that cannot be repaired into an array of objects yields
//! an empty table, so callers only ever need to check the row count.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::relevance::lenient_json;
use crate::relevance::models::{Category, KeywordRecord, RelevanceTable};

/// Field holding the per-keyword records when the model nests them.
const NESTED_KEY: &str = "keywords";

/// Repairs, parses and normalizes a raw model reply.
pub fn normalize(raw: &str) -> RelevanceTable {
    let repaired = lenient_json::repair(raw);

    let parsed: Value = match serde_json::from_str(&repaired) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse model reply as JSON after repair: {e}");
            return RelevanceTable::empty();
        }
    };

    let Some(rows) = flatten(parsed) else {
        return RelevanceTable::empty();
    };

    let records: Vec<KeywordRecord> = rows.iter().map(to_record).collect();
    debug!("Normalized {} keyword records", records.len());
    RelevanceTable::new(records)
}

/// Returns the row objects, or `None` when the structure is not an array of objects.
fn flatten(parsed: Value) -> Option<Vec<Map<String, Value>>> {
    let Value::Array(mut items) = parsed else {
        warn!("Model reply is not an array after repair");
        return None;
    };

    // An array root comes back wrapped once more: [[{...}, {...}]].
    if items.len() == 1 && is_array_of_objects(&items[0]) {
        if let Some(Value::Array(inner)) = items.pop() {
            items = inner;
        }
    }

    let mut objects = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(map) => objects.push(map),
            other => {
                warn!("Model reply holds a non-object element: {other}");
                return None;
            }
        }
    }

    let nested = objects
        .first()
        .is_some_and(|first| first.contains_key(NESTED_KEY));
    if !nested {
        return Some(objects);
    }

    let mut rows = Vec::new();
    for mut object in objects {
        match object.remove(NESTED_KEY) {
            Some(Value::Array(entries)) => {
                for entry in entries {
                    match entry {
                        Value::Object(map) => rows.push(map),
                        other => {
                            warn!("Nested keyword entry is not an object: {other}");
                            return None;
                        }
                    }
                }
            }
            Some(other) => {
                warn!("'{NESTED_KEY}' is not a list: {other}");
                return None;
            }
            None => warn!("Skipping element without a '{NESTED_KEY}' list"),
        }
    }
    Some(rows)
}

fn is_array_of_objects(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_object))
}

fn to_record(row: &Map<String, Value>) -> KeywordRecord {
    let fields = flatten_paths(row);
    let [keyword, score, category, cohort] = RelevanceTable::COLUMNS.map(|c| lookup(&fields, c));

    KeywordRecord {
        keyword: keyword.map(coerce_text).unwrap_or_default(),
        relevance_score: score.map(coerce_score).unwrap_or(0.0),
        category: category
            .map(|v| Category::parse(&coerce_text(v)))
            .unwrap_or_default(),
        cohort: cohort.map(coerce_text).unwrap_or_default(),
    }
}

/// Flattens nested objects into dotted paths: `{"a": {"b": 1}}` -> `a.b`.
fn flatten_paths(row: &Map<String, Value>) -> Vec<(String, &Value)> {
    let mut out = Vec::new();
    for (key, value) in row {
        push_path(key.clone(), value, &mut out);
    }
    out
}

fn push_path<'a>(path: String, value: &'a Value, out: &mut Vec<(String, &'a Value)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, inner) in map {
                push_path(format!("{path}.{key}"), inner, out);
            }
        }
        _ => out.push((path, value)),
    }
}

/// Exact path first, then a folded match against the full path or its last segment.
fn lookup<'a>(fields: &[(String, &'a Value)], column: &str) -> Option<&'a Value> {
    if let Some((_, value)) = fields.iter().find(|(path, _)| path == column) {
        return Some(*value);
    }

    let wanted = fold(column);
    fields
        .iter()
        .find(|(path, _)| {
            fold(path) == wanted || path.rsplit('.').next().is_some_and(|last| fold(last) == wanted)
        })
        .map(|(_, value)| *value)
}

fn fold(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) if items.iter().all(|v| !v.is_array() && !v.is_object()) => items
            .iter()
            .map(coerce_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn coerce_score(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}
