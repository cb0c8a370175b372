//! Structured description codec.
//!
//! A card's description column holds either plain text or a JSON object with
//! the optional keys `clientName`, `phoneNo`, `resourceId` and `description`
//! (the free-text note). A value is JSON-encoded iff it is non-empty and starts
//! with `{`. Decoding never fails: malformed JSON is read back as plain text.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const CLIENT_NAME: &str = "clientName";
const PHONE_NO: &str = "phoneNo";
const RESOURCE_ID: &str = "resourceId";
const DESCRIPTION: &str = "description";

/// Service category of a card, sent by the planner as a number but tolerated
/// as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Auxiliary fields multiplexed into the description column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keys this codec does not know about, and known keys whose value is not
    /// a plain string or number, kept so merges stay lossless
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StructuredDescription {
    /// Splits a JSON object into the known fields and everything else.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let client_name = take_text(&mut map, CLIENT_NAME);
        let phone_no = take_text(&mut map, PHONE_NO);
        let description = take_text(&mut map, DESCRIPTION);
        let resource_id = match map.remove(RESOURCE_ID) {
            Some(Value::Null) | None => None,
            Some(value) => match serde_json::from_value::<ResourceId>(value.clone()) {
                Ok(id) => Some(id),
                Err(_) => {
                    map.insert(RESOURCE_ID.to_string(), value);
                    None
                }
            },
        };

        Self {
            client_name,
            phone_no,
            resource_id,
            description,
            extra: map,
        }
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && !self.has_structured_fields()
    }

    /// Returns true if any field other than the free-text note is set.
    pub fn has_structured_fields(&self) -> bool {
        self.client_name.is_some()
            || self.phone_no.is_some()
            || self.resource_id.is_some()
            || !self.extra.is_empty()
    }
}

/// How a raw description value was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Empty,
    Plain,
    Json,
}

/// A decoded description together with the encoding it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub fields: StructuredDescription,
    pub encoding: Encoding,
}

impl Description {
    /// An empty description, as for a card that has none yet.
    pub fn empty() -> Self {
        Self {
            fields: StructuredDescription::default(),
            encoding: Encoding::Empty,
        }
    }

    /// Decodes an optional raw column value.
    pub fn from_raw(raw: Option<&str>) -> Self {
        decode(raw.unwrap_or_default())
    }
}

/// Fields to merge into a description. `None` leaves the existing value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionPatch {
    pub client_name: Option<String>,
    pub phone_no: Option<String>,
    pub resource_id: Option<ResourceId>,
    pub description: Option<String>,
}

impl DescriptionPatch {
    /// Builds a patch from raw action fields.
    ///
    /// Blank values count as absent, and a note that itself looks like JSON is
    /// dropped so the column can never be double-encoded.
    pub fn from_fields(
        client_name: Option<&str>,
        phone_no: Option<&str>,
        resource_id: Option<&ResourceId>,
        description: Option<&str>,
    ) -> Self {
        Self {
            client_name: non_blank(client_name),
            phone_no: non_blank(phone_no),
            resource_id: resource_id
                .filter(|id| !matches!(id, ResourceId::Text(s) if s.trim().is_empty()))
                .cloned(),
            description: non_blank(description).filter(|d| !d.starts_with('{')),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && !self.has_structured_fields()
    }

    pub fn has_structured_fields(&self) -> bool {
        self.client_name.is_some() || self.phone_no.is_some() || self.resource_id.is_some()
    }
}

/// Returns true if `raw` is stored as a JSON object.
pub fn is_json_encoded(raw: &str) -> bool {
    raw.starts_with('{')
}

/// Decodes a raw description column value.
pub fn decode(raw: &str) -> Description {
    if raw.is_empty() {
        return Description::empty();
    }

    if is_json_encoded(raw) {
        match serde_json::from_str::<Map<String, Value>>(raw) {
            Ok(map) => {
                return Description {
                    fields: StructuredDescription::from_map(map),
                    encoding: Encoding::Json,
                }
            }
            Err(e) => log::debug!("Description looks like JSON but failed to parse: {e}"),
        }
    }

    Description {
        fields: StructuredDescription {
            description: Some(raw.to_string()),
            ..Default::default()
        },
        encoding: Encoding::Plain,
    }
}

/// Merges `patch` over `existing` and encodes the result.
///
/// A free-text-only patch against a plain-text value overwrites the text
/// directly. Everything else is written as JSON, except that an empty result
/// encodes to the empty string.
pub fn encode(existing: &Description, patch: &DescriptionPatch) -> String {
    if existing.encoding == Encoding::Plain && !patch.has_structured_fields() {
        return patch
            .description
            .clone()
            .or_else(|| existing.fields.description.clone())
            .unwrap_or_default();
    }

    let mut merged = existing.fields.clone();
    // A patched key replaces whatever non-scalar value was kept for it
    if let Some(client_name) = &patch.client_name {
        merged.extra.remove(CLIENT_NAME);
        merged.client_name = Some(client_name.clone());
    }
    if let Some(phone_no) = &patch.phone_no {
        merged.extra.remove(PHONE_NO);
        merged.phone_no = Some(phone_no.clone());
    }
    if let Some(resource_id) = &patch.resource_id {
        merged.extra.remove(RESOURCE_ID);
        merged.resource_id = Some(resource_id.clone());
    }
    if let Some(description) = &patch.description {
        merged.extra.remove(DESCRIPTION);
        merged.description = Some(description.clone());
    }

    if merged.is_empty() {
        return String::new();
    }

    // Serializing string/number fields and a JSON map cannot fail.
    serde_json::to_string(&merged).unwrap_or_default()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Reads an optional text field that a planner may also send as a number.
///
/// Anything that is not a string or a number reads as absent.
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Option::<Value>::deserialize(deserializer)?))
}

fn scalar_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Removes `key` from `map` if it holds text. Other values stay where they are.
fn take_text(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(_) | Value::Number(_) => scalar_text(map.remove(key)),
        Value::Null => {
            map.remove(key);
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_patch(phone: &str) -> DescriptionPatch {
        DescriptionPatch {
            phone_no: Some(phone.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_empty() {
        let decoded = decode("");
        assert_eq!(decoded.encoding, Encoding::Empty);
        assert!(decoded.fields.is_empty());
    }

    #[test]
    fn test_decode_json() {
        let decoded = decode(r#"{"clientName":"Ion"}"#);
        assert_eq!(decoded.encoding, Encoding::Json);
        assert_eq!(decoded.fields.client_name.as_deref(), Some("Ion"));
        assert!(decoded.fields.phone_no.is_none());
        assert!(decoded.fields.description.is_none());
    }

    #[test]
    fn test_decode_plain_text() {
        let decoded = decode("Spune-i lui Ion");
        assert_eq!(decoded.encoding, Encoding::Plain);
        assert_eq!(
            decoded.fields,
            StructuredDescription {
                description: Some("Spune-i lui Ion".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_decode_malformed_json_falls_back_to_text() {
        let decoded = decode("{not json");
        assert_eq!(decoded.encoding, Encoding::Plain);
        assert_eq!(decoded.fields.description.as_deref(), Some("{not json"));
    }

    #[test]
    fn test_decode_numeric_fields() {
        let decoded = decode(r#"{"phoneNo":711,"resourceId":2}"#);
        assert_eq!(decoded.fields.phone_no.as_deref(), Some("711"));
        assert_eq!(decoded.fields.resource_id, Some(ResourceId::Number(2)));
    }

    #[test]
    fn test_round_trip_with_empty_patch() {
        let empty = DescriptionPatch::default();

        assert_eq!(encode(&decode(""), &empty), "");
        assert_eq!(encode(&decode("Spune-i lui Ion"), &empty), "Spune-i lui Ion");

        let json = r#"{"clientName":"Ion","phoneNo":"0711"}"#;
        let encoded = encode(&decode(json), &empty);
        assert_eq!(decode(&encoded), decode(json));
    }

    #[test]
    fn test_merge_is_non_destructive() {
        let existing = decode(r#"{"clientName":"Ion","phoneNo":"0711"}"#);
        let encoded = encode(&existing, &phone_patch("0722"));
        let merged = decode(&encoded).fields;

        assert_eq!(merged.client_name.as_deref(), Some("Ion"));
        assert_eq!(merged.phone_no.as_deref(), Some("0722"));
    }

    #[test]
    fn test_merge_keeps_unknown_keys() {
        let existing = decode(r#"{"clientName":"Ion","plate":"B-01-ABC"}"#);
        let encoded = encode(&existing, &phone_patch("0722"));
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["plate"], "B-01-ABC");
        assert_eq!(value["phoneNo"], "0722");
    }

    #[test]
    fn test_merge_keeps_non_text_values_of_known_keys() {
        let existing = decode(r#"{"clientName":{"first":"Ion"},"phoneNo":"0711"}"#);
        assert!(existing.fields.client_name.is_none());

        let encoded = encode(&existing, &phone_patch("0722"));
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["clientName"], serde_json::json!({ "first": "Ion" }));
        assert_eq!(value["phoneNo"], "0722");
    }

    #[test]
    fn test_round_trip_keeps_every_key() {
        let raw = r#"{"clientName":["Ion","Ana"],"phoneNo":"0711","resourceId":1.5,"description":true}"#;
        let encoded = encode(&decode(raw), &DescriptionPatch::default());

        let before: Value = serde_json::from_str(raw).unwrap();
        let after: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_patched_key_replaces_non_text_value() {
        let existing = decode(r#"{"clientName":{"first":"Ion"}}"#);
        let patch = DescriptionPatch {
            client_name: Some("Ion Popa".to_string()),
            ..Default::default()
        };
        let value: Value = serde_json::from_str(&encode(&existing, &patch)).unwrap();

        assert_eq!(value, serde_json::json!({ "clientName": "Ion Popa" }));
    }

    #[test]
    fn test_plain_text_overwritten_by_free_text() {
        let existing = decode("old note");
        let patch = DescriptionPatch {
            description: Some("new note".to_string()),
            ..Default::default()
        };
        assert_eq!(encode(&existing, &patch), "new note");
    }

    #[test]
    fn test_plain_text_promoted_by_structured_patch() {
        let encoded = encode(&decode("old note"), &phone_patch("0722"));
        let decoded = decode(&encoded);

        assert_eq!(decoded.encoding, Encoding::Json);
        assert_eq!(decoded.fields.description.as_deref(), Some("old note"));
        assert_eq!(decoded.fields.phone_no.as_deref(), Some("0722"));
    }

    #[test]
    fn test_new_description_is_json() {
        let patch = DescriptionPatch {
            description: Some("nota".to_string()),
            ..Default::default()
        };
        assert_eq!(
            encode(&Description::empty(), &patch),
            r#"{"description":"nota"}"#
        );
    }

    #[test]
    fn test_patch_from_fields_drops_blank_and_json_notes() {
        let patch = DescriptionPatch::from_fields(Some("  "), None, None, Some("{\"a\":1}"));
        assert!(patch.is_empty());

        let patch = DescriptionPatch::from_fields(
            Some("Ion"),
            None,
            Some(&ResourceId::Number(1)),
            Some("note"),
        );
        assert!(patch.has_structured_fields());
        assert_eq!(patch.description.as_deref(), Some("note"));
    }
}
