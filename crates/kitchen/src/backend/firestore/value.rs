//! Firestore typed value encoding.
//!
//! Firestore's REST API wraps every value in a single-key object naming its
//! type (`{"stringValue": "..."}`, `{"integerValue": "42"}`, ...). Records
//! are converted through plain JSON: [`Recipe`] to `serde_json::Value` with
//! serde, then to the typed form, and back the same way.

use serde::Deserialize;
use serde_json::{json, Map, Number, Value};

use crate::error::{Error, Result};
use crate::recipe::Recipe;

/// A document as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Full resource name, ending in `/{collection}/{id}`.
    pub name: String,
    /// Typed field map.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// The document id: the last segment of its resource name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name has no id segment.
    pub fn id(&self) -> Result<&str> {
        self.name
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::malformed(format!("document name without id: {}", self.name)))
    }
}

/// Encode a recipe's stored fields. The id is addressing metadata and is
/// never written as a field.
///
/// # Errors
///
/// Returns an error if the recipe cannot be serialized.
pub fn encode_fields(recipe: &Recipe) -> Result<Map<String, Value>> {
    let Value::Object(mut plain) = serde_json::to_value(recipe)? else {
        return Err(Error::internal("recipe did not serialize to an object"));
    };
    plain.remove("id");
    Ok(plain
        .into_iter()
        .map(|(key, value)| (key, to_typed(value)))
        .collect())
}

/// Decode a document into a recipe carrying the document's id.
///
/// # Errors
///
/// Returns an error if a field uses an unknown value type or the fields do
/// not form a valid recipe.
pub fn decode_document(document: &Document) -> Result<Recipe> {
    let mut plain = Map::new();
    for (key, value) in &document.fields {
        plain.insert(key.clone(), from_typed(value)?);
    }
    plain.insert("id".to_string(), Value::String(document.id()?.to_string()));

    serde_json::from_value(Value::Object(plain))
        .map_err(|e| Error::malformed(format!("{}: {e}", document.name)))
}

/// Convert plain JSON to Firestore's typed form.
#[must_use]
pub fn to_typed(value: Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // Integers travel as decimal strings.
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.into_iter().map(to_typed).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let fields: Map<String, Value> =
                map.into_iter().map(|(k, v)| (k, to_typed(v))).collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Convert a Firestore typed value to plain JSON.
///
/// # Errors
///
/// Returns an error for values that are not single-key typed objects or use
/// an unsupported type.
pub fn from_typed(value: &Value) -> Result<Value> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(Error::malformed(format!("untyped value: {value}")));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "stringValue" | "timestampValue" | "referenceValue" => Ok(inner.clone()),
        "integerValue" => parse_integer(inner),
        "doubleValue" => Ok(normalize_double(inner)),
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(from_typed).collect::<Result<Vec<_>>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let mut map = Map::new();
            if let Some(fields) = inner.get("fields").and_then(Value::as_object) {
                for (key, field) in fields {
                    map.insert(key.clone(), from_typed(field)?);
                }
            }
            Ok(Value::Object(map))
        }
        other => Err(Error::malformed(format!("unsupported value type: {other}"))),
    }
}

fn parse_integer(inner: &Value) -> Result<Value> {
    match inner {
        Value::String(s) => s
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| Error::malformed(format!("invalid integerValue: {s}"))),
        Value::Number(n) => Ok(Value::Number(n.clone())),
        other => Err(Error::malformed(format!("invalid integerValue: {other}"))),
    }
}

/// Whole doubles become integers so timestamps written as doubles still
/// decode into `i64` fields.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn normalize_double(inner: &Value) -> Value {
    match inner.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::from(f as i64),
        Some(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        None => inner.clone(),
    }
}
