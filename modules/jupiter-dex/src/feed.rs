//! Defensive navigation of the pre-extracted entity change-feed.
//!
//! Upstream has shipped three generations of the feed: a bare
//! `{"entities": [...]}` array, the wrapped `{"entityChanges": {"entities":
//! [...]}}` form, and `{"changes": [...]}` whose field entries carry a flat
//! `new_value` instead of a typed value. All three normalize into
//! [`ChangeRecord`]s here; nothing downstream needs to know which generation
//! produced a record.

use std::collections::HashMap;
use std::convert::TryFrom;

use serde_json::Value;

pub const OP_UNSET: i64 = 0;
pub const OP_CREATE: i64 = 1;
pub const OP_UPDATE: i64 = 2;
pub const OP_DELETE: i64 = 3;

/// One entity mutation, already flattened out of whichever feed shape
/// carried it.
#[derive(Debug, Clone)]
pub struct ChangeRecord {
    pub entity_type: String,
    pub id: Option<String>,
    pub operation: i64,
    pub fields: HashMap<String, FeedValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedValue {
    Str(String),
    Int(i64),
    Bool(bool),
    /// Hex text payload; decoded to bytes at materialization time.
    Bytes(String),
}

impl FeedValue {
    pub fn as_text(&self) -> Option<String> {
        match self {
            FeedValue::Str(s) => Some(s.clone()),
            FeedValue::Int(v) => Some(v.to_string()),
            FeedValue::Bool(v) => Some(v.to_string()),
            FeedValue::Bytes(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FeedValue::Int(v) => u64::try_from(*v).ok(),
            FeedValue::Str(s) => s.parse::<u64>().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FeedValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            FeedValue::Bytes(h) => hex::decode(h).ok().filter(|b| !b.is_empty()),
            _ => None,
        }
    }
}

/// Missing-required-field policy. Strict is the production setting: a record
/// missing any required field is skipped whole. Lenient substitutes zero or
/// the empty string, matching the superseded handler generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldPolicy {
    Strict,
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Numeric,
}

/// Flattens the feed into records. An unrecognized top-level shape yields no
/// records, which the pipeline treats as "nothing to do".
pub fn change_records(root: &Value) -> Vec<ChangeRecord> {
    let elements = match locate_elements(root) {
        Some(elements) => elements,
        None => return vec![],
    };

    let mut records = Vec::with_capacity(elements.len());
    for element in elements {
        match element_record(element) {
            Some(record) => records.push(record),
            None => log::debug!("dropping change element without an entity tag"),
        }
    }
    records
}

fn locate_elements(root: &Value) -> Option<&Vec<Value>> {
    let obj = root.as_object()?;
    if let Some(entities) = obj.get("entities").and_then(Value::as_array) {
        return Some(entities);
    }
    if let Some(entities) = obj
        .get("entityChanges")
        .and_then(|wrapped| wrapped.get("entities"))
        .and_then(Value::as_array)
    {
        return Some(entities);
    }
    obj.get("changes").and_then(Value::as_array)
}

fn element_record(element: &Value) -> Option<ChangeRecord> {
    let entity_type = element
        .get("entity_type")
        .or_else(|| element.get("type"))
        .or_else(|| element.get("entity"))
        .and_then(Value::as_str)
        .filter(|tag| !tag.is_empty())?
        .to_string();

    let id = element
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let operation = element
        .get("operation")
        .and_then(operation_code)
        .unwrap_or(OP_UNSET);

    let entries = element.get("fields").or_else(|| element.get("data"));
    let mut fields = match entries {
        Some(Value::Array(entries)) => field_entries(entries),
        Some(Value::Object(map)) => {
            let mut fields = HashMap::with_capacity(map.len());
            for (name, raw) in map {
                if let Some(value) = scalar_value(raw) {
                    fields.insert(name.clone(), value);
                }
            }
            fields
        }
        _ => HashMap::new(),
    };

    // the element-level id doubles as the `id` field when upstream left the
    // field list without one
    if let Some(id) = &id {
        fields
            .entry("id".to_string())
            .or_insert_with(|| FeedValue::Str(id.clone()));
    }

    Some(ChangeRecord {
        entity_type,
        id,
        operation,
        fields,
    })
}

fn operation_code(raw: &Value) -> Option<i64> {
    if let Some(code) = raw.as_i64() {
        return Some(code);
    }
    match raw.as_str()? {
        "UNSET" | "UNSPECIFIED" => Some(OP_UNSET),
        "CREATE" => Some(OP_CREATE),
        "UPDATE" => Some(OP_UPDATE),
        "DELETE" => Some(OP_DELETE),
        _ => None,
    }
}

fn field_entries(entries: &[Value]) -> HashMap<String, FeedValue> {
    let mut fields = HashMap::with_capacity(entries.len());
    for entry in entries {
        let name = match entry.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };
        if let Some(value) = field_value(entry) {
            fields.insert(name.to_string(), value);
        }
    }
    fields
}

fn field_value(entry: &Value) -> Option<FeedValue> {
    if let Some(raw) = entry.get("value") {
        let unwrapped = raw.get("typed_value").unwrap_or(raw);
        return scalar_value(unwrapped);
    }
    if let Some(raw) = entry.get("new_value") {
        return scalar_value(raw);
    }
    None
}

fn scalar_value(raw: &Value) -> Option<FeedValue> {
    match raw {
        Value::String(s) => Some(FeedValue::Str(s.clone())),
        Value::Number(n) => n.as_i64().map(FeedValue::Int),
        Value::Bool(b) => Some(FeedValue::Bool(*b)),
        Value::Object(map) => {
            if let Some(s) = map.get("string_value").and_then(Value::as_str) {
                return Some(FeedValue::Str(s.to_string()));
            }
            if let Some(raw) = map.get("int64_value") {
                if let Some(v) = raw.as_i64() {
                    return Some(FeedValue::Int(v));
                }
                // proto JSON renders int64 as a decimal string
                return raw.as_str().and_then(|s| s.parse().ok()).map(FeedValue::Int);
            }
            if let Some(b) = map.get("bool_value").and_then(Value::as_bool) {
                return Some(FeedValue::Bool(b));
            }
            if let Some(h) = map.get("bytes_value").and_then(Value::as_str) {
                // empty bytes are absent, not a zero-length payload
                if h.is_empty() {
                    return None;
                }
                return Some(FeedValue::Bytes(h.to_string()));
            }
            None
        }
        _ => None,
    }
}

/// Fetch-or-skip over a record's fields: every required field or nothing
/// under [`FieldPolicy::Strict`], zero/empty fallbacks under
/// [`FieldPolicy::Lenient`].
pub fn take_fields(
    record: &ChangeRecord,
    required: &[(&str, FieldKind)],
    policy: FieldPolicy,
) -> Option<HashMap<String, FeedValue>> {
    let mut out = HashMap::with_capacity(required.len());
    for (name, kind) in required {
        match record.fields.get(*name) {
            Some(value) => {
                out.insert((*name).to_string(), value.clone());
            }
            None => match policy {
                FieldPolicy::Strict => {
                    log::debug!(
                        "skipping {} record {:?}: missing required field {}",
                        record.entity_type,
                        record.id,
                        name
                    );
                    return None;
                }
                FieldPolicy::Lenient => {
                    let fallback = match kind {
                        FieldKind::Numeric => FeedValue::Str("0".to_string()),
                        FieldKind::Text => FeedValue::Str(String::new()),
                    };
                    out.insert((*name).to_string(), fallback);
                }
            },
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn swap_element() -> Value {
        json!({
            "entity_type": "Swap",
            "id": "s1",
            "fields": [
                {"name": "amountIn", "value": {"typed_value": {"string_value": "1000"}}},
                {"name": "slot", "value": {"int64_value": 5}},
            ]
        })
    }

    #[test]
    fn all_three_container_shapes_yield_the_same_records() {
        let bare = json!({ "entities": [swap_element()] });
        let wrapped = json!({ "entityChanges": { "entities": [swap_element()] } });
        let changes = json!({ "changes": [swap_element()] });

        for feed in [&bare, &wrapped, &changes] {
            let records = change_records(feed);
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].entity_type, "Swap");
            assert_eq!(records[0].id.as_deref(), Some("s1"));
            assert_eq!(
                records[0].fields.get("amountIn"),
                Some(&FeedValue::Str("1000".to_string()))
            );
            assert_eq!(records[0].fields.get("slot"), Some(&FeedValue::Int(5)));
        }
    }

    #[test]
    fn unrecognized_roots_yield_nothing() {
        assert!(change_records(&json!(null)).is_empty());
        assert!(change_records(&json!([1, 2])).is_empty());
        assert!(change_records(&json!({"other": []})).is_empty());
        assert!(change_records(&json!({"entities": "nope"})).is_empty());
    }

    #[test]
    fn elements_without_a_tag_are_dropped() {
        let feed = json!({ "entities": [ {"id": "x", "fields": []}, swap_element() ] });
        assert_eq!(change_records(&feed).len(), 1);
    }

    #[test]
    fn flat_new_value_entries_decode() {
        let feed = json!({
            "changes": [{
                "entity": "Trade",
                "id": "t1",
                "fields": [
                    {"name": "amountIn", "new_value": "42"},
                    {"name": "from", "new_value": "X"},
                ]
            }]
        });
        let records = change_records(&feed);
        assert_eq!(records[0].entity_type, "Trade");
        assert_eq!(
            records[0].fields.get("amountIn"),
            Some(&FeedValue::Str("42".to_string()))
        );
    }

    #[test]
    fn typed_values_decode_with_and_without_wrapper() {
        let feed = json!({
            "entities": [{
                "type": "Account",
                "id": "a1",
                "operation": 1,
                "fields": [
                    {"name": "owner", "value": {"string_value": "own"}},
                    {"name": "lamports", "value": {"typed_value": {"int64_value": "99"}}},
                    {"name": "executable", "value": {"typed_value": {"bool_value": true}}},
                    {"name": "data", "value": {"typed_value": {"bytes_value": "deadbeef"}}},
                ]
            }]
        });
        let record = &change_records(&feed)[0];
        assert_eq!(record.operation, OP_CREATE);
        assert_eq!(record.fields.get("owner"), Some(&FeedValue::Str("own".to_string())));
        assert_eq!(record.fields.get("lamports"), Some(&FeedValue::Int(99)));
        assert_eq!(record.fields.get("executable"), Some(&FeedValue::Bool(true)));
        assert_eq!(
            record.fields.get("data").and_then(|v| v.as_bytes()),
            Some(vec![0xde, 0xad, 0xbe, 0xef])
        );
    }

    #[test]
    fn empty_bytes_value_is_absent() {
        let feed = json!({
            "entities": [{
                "entity_type": "Account",
                "id": "a1",
                "fields": [ {"name": "data", "value": {"typed_value": {"bytes_value": ""}}} ]
            }]
        });
        let record = &change_records(&feed)[0];
        assert!(record.fields.get("data").is_none());
    }

    #[test]
    fn delete_operation_parses_from_code_and_name() {
        let by_code = json!({ "entities": [{"entity_type": "Account", "id": "a", "operation": 3}] });
        let by_name = json!({ "entities": [{"entity_type": "Account", "id": "a", "operation": "DELETE"}] });
        assert_eq!(change_records(&by_code)[0].operation, OP_DELETE);
        assert_eq!(change_records(&by_name)[0].operation, OP_DELETE);
    }

    #[test]
    fn strict_policy_skips_on_any_missing_field() {
        let record = &change_records(&json!({ "entities": [swap_element()] }))[0];
        let required = [
            ("amountIn", FieldKind::Numeric),
            ("amountOut", FieldKind::Numeric),
        ];
        assert!(take_fields(record, &required, FieldPolicy::Strict).is_none());
    }

    #[test]
    fn lenient_policy_substitutes_defaults() {
        let record = &change_records(&json!({ "entities": [swap_element()] }))[0];
        let required = [
            ("amountOut", FieldKind::Numeric),
            ("blockHash", FieldKind::Text),
        ];
        let fields = take_fields(record, &required, FieldPolicy::Lenient).unwrap();
        assert_eq!(fields.get("amountOut"), Some(&FeedValue::Str("0".to_string())));
        assert_eq!(fields.get("blockHash"), Some(&FeedValue::Str(String::new())));
    }

    #[test]
    fn element_id_backfills_the_id_field() {
        let record = &change_records(&json!({ "entities": [swap_element()] }))[0];
        let fields = take_fields(record, &[("id", FieldKind::Text)], FieldPolicy::Strict).unwrap();
        assert_eq!(fields.get("id"), Some(&FeedValue::Str("s1".to_string())));
    }
}
