//! Field annotations and their interpretation into schema constraints.

use serde_json::Value;

use crate::common_names::CommonName;
use crate::error::SchemaError;
use crate::schema::{BaseType, CollectionFormat, Constraints, SchemaNode};

/// Ordered `key -> value` annotations attached to a field.
///
/// Keys are case-sensitive. When a key appears twice, lookups return the
/// first occurrence while [`apply_tags`] lets the last one win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<(String, String)>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Name carried by a naming tag such as `json:"id,omitempty"`.
    ///
    /// Returns `None` when the tag is absent, `"-"`, or has an empty name part.
    pub fn name_for(&self, key: &str) -> Option<&str> {
        let value = self.get(key)?;
        let name = value.split(',').next().unwrap_or_default().trim();
        if name.is_empty() || name == "-" {
            None
        } else {
            Some(name)
        }
    }

    /// Whether the tag is present and explicitly excludes the field.
    pub fn is_excluded(&self, key: &str) -> bool {
        self.get(key).map(str::trim) == Some("-")
    }

    /// Whether any constraint-bearing key is present.
    pub fn has_constraints(&self) -> bool {
        CONSTRAINT_KEYS.iter().any(|k| self.get(k).is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const CONSTRAINT_KEYS: &[&str] = &[
    "type",
    "title",
    "description",
    "format",
    "pattern",
    "default",
    "enum",
    "minimum",
    "maximum",
    "multipleOf",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
    "minProperties",
    "maxProperties",
    "uniqueItems",
    "nullable",
];

fn invalid(subject: &str, key: &str, value: &str, expected: &'static str) -> SchemaError {
    SchemaError::InvalidTag {
        subject: subject.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}

fn parse_f64(subject: &str, key: &str, value: &str) -> Result<f64, SchemaError> {
    value
        .parse::<f64>()
        .map_err(|_| invalid(subject, key, value, "a number"))
}

fn parse_u64(subject: &str, key: &str, value: &str) -> Result<u64, SchemaError> {
    value
        .parse::<u64>()
        .map_err(|_| invalid(subject, key, value, "a non-negative integer"))
}

fn parse_bool(subject: &str, key: &str, value: &str) -> Result<bool, SchemaError> {
    value
        .parse::<bool>()
        .map_err(|_| invalid(subject, key, value, "a boolean"))
}

fn set_text(slot: &mut Option<String>, value: &str) {
    if value == "-" {
        *slot = None;
    } else {
        *slot = Some(value.to_string());
    }
}

/// Schema node for a `type` tag value.
pub fn schema_from_type_tag(subject: &str, value: &str) -> Result<SchemaNode, SchemaError> {
    SchemaNode::from_common_name(value.trim())
        .ok_or_else(|| invalid(subject, "type", value, "a common name or base type"))
}

/// Parse a `default` tag according to the base type already present.
pub fn parse_default(
    subject: &str,
    base_type: Option<BaseType>,
    value: &str,
) -> Result<Value, SchemaError> {
    match base_type {
        Some(BaseType::Integer) => value
            .parse::<i64>()
            .map(Value::from)
            .or_else(|_| value.parse::<u64>().map(Value::from))
            .map_err(|_| invalid(subject, "default", value, "an integer")),
        Some(BaseType::Number) => {
            let number = parse_f64(subject, "default", value)?;
            serde_json::Number::from_f64(number)
                .map(Value::Number)
                .ok_or_else(|| invalid(subject, "default", value, "a finite number"))
        }
        Some(BaseType::Boolean) => parse_bool(subject, "default", value).map(Value::Bool),
        Some(BaseType::String) => Ok(Value::String(value.to_string())),
        _ => serde_json::from_str(value)
            .map_err(|_| invalid(subject, "default", value, "a JSON literal")),
    }
}

/// Parse an `enum` tag: a JSON array, or else comma-separated strings.
pub fn parse_enum(value: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(value) {
        Ok(Value::Array(values)) => values,
        _ => value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Value::String(v.to_string()))
            .collect(),
    }
}

/// Apply every recognized tag to a constraint bag.
///
/// `subject` names the field in error messages. Empty values are ignored,
/// `"-"` clears textual keys, unknown keys are left for other consumers
/// (naming and location tags).
pub fn apply_tags(
    tags: &Tags,
    constraints: &mut Constraints,
    subject: &str,
) -> Result<(), SchemaError> {
    // `type` first so `default` parses against the final base type.
    if let Some(value) = tags.get("type") {
        apply_one(constraints, subject, "type", value)?;
    }
    for (key, value) in tags.iter() {
        if key != "type" {
            apply_one(constraints, subject, key, value)?;
        }
    }
    Ok(())
}

fn apply_one(
    c: &mut Constraints,
    subject: &str,
    key: &str,
    value: &str,
) -> Result<(), SchemaError> {
    if value.is_empty() {
        return Ok(());
    }
    match key {
        "type" => {
            if value == "-" {
                c.base_type = None;
                c.format = None;
            } else if let Some(common) = CommonName::parse(value) {
                c.base_type = Some(common.base_type());
                c.format = common.format().map(str::to_string);
            } else {
                c.base_type = Some(
                    BaseType::parse(value)
                        .ok_or_else(|| invalid(subject, key, value, "a common name or base type"))?,
                );
            }
        }
        "title" => set_text(&mut c.title, value),
        "description" => set_text(&mut c.description, value),
        "format" => set_text(&mut c.format, value),
        "pattern" => set_text(&mut c.pattern, value),
        "default" => {
            c.default = if value == "-" {
                None
            } else {
                Some(parse_default(subject, c.base_type, value)?)
            };
        }
        "enum" => {
            if value == "-" {
                c.enum_values.clear();
                c.enum_names.clear();
            } else {
                c.enum_values = parse_enum(value);
            }
        }
        "collectionFormat" => {
            c.collection_format = if value == "-" {
                None
            } else {
                Some(
                    CollectionFormat::parse(value)
                        .ok_or_else(|| invalid(subject, key, value, "a collection format"))?,
                )
            };
        }
        "minimum" => c.minimum = Some(parse_f64(subject, key, value)?),
        "maximum" => c.maximum = Some(parse_f64(subject, key, value)?),
        "multipleOf" => c.multiple_of = Some(parse_f64(subject, key, value)?),
        "minLength" => c.min_length = Some(parse_u64(subject, key, value)?),
        "maxLength" => c.max_length = Some(parse_u64(subject, key, value)?),
        "minItems" => c.min_items = Some(parse_u64(subject, key, value)?),
        "maxItems" => c.max_items = Some(parse_u64(subject, key, value)?),
        "minProperties" => c.min_properties = Some(parse_u64(subject, key, value)?),
        "maxProperties" => c.max_properties = Some(parse_u64(subject, key, value)?),
        "exclusiveMinimum" => c.exclusive_minimum = parse_bool(subject, key, value)?,
        "exclusiveMaximum" => c.exclusive_maximum = parse_bool(subject, key, value)?,
        "uniqueItems" => c.unique_items = parse_bool(subject, key, value)?,
        "nullable" => c.nullable = parse_bool(subject, key, value)?,
        "required" => c.required = Some(parse_bool(subject, key, value)?),
        _ => {}
    }
    Ok(())
}

/// Read only the `required` flag, validating it.
pub fn required_flag(tags: &Tags, subject: &str) -> Result<bool, SchemaError> {
    match tags.get("required") {
        None | Some("") => Ok(false),
        Some(value) => parse_bool(subject, "required", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_parts() {
        let tags = Tags::new()
            .with("json", "id,omitempty")
            .with("query", ",omitempty")
            .with("path", "-");
        assert_eq!(tags.name_for("json"), Some("id"));
        assert_eq!(tags.name_for("query"), None);
        assert_eq!(tags.name_for("path"), None);
        assert!(tags.is_excluded("path"));
        assert!(!tags.is_excluded("json"));
    }

    #[test]
    fn first_occurrence_wins_on_lookup() {
        let tags = Tags::from_pairs([("a", "1"), ("a", "2")]);
        assert_eq!(tags.get("a"), Some("1"));
    }

    #[test]
    fn enum_forms() {
        assert_eq!(parse_enum(r#"[1, 2]"#), vec![Value::from(1), Value::from(2)]);
        assert_eq!(
            parse_enum("a, b,c"),
            vec![Value::from("a"), Value::from("b"), Value::from("c")]
        );
        assert_eq!(parse_enum("5"), vec![Value::from("5")]);
    }
}
