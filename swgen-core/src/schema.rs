use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::common_names::{self, CommonName};

/// Swagger 2.0 primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
    File,
}

impl BaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            BaseType::Object => "object",
            BaseType::Array => "array",
            BaseType::String => "string",
            BaseType::Integer => "integer",
            BaseType::Number => "number",
            BaseType::Boolean => "boolean",
            BaseType::Null => "null",
            BaseType::File => "file",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "object" => Some(BaseType::Object),
            "array" => Some(BaseType::Array),
            "string" => Some(BaseType::String),
            "integer" => Some(BaseType::Integer),
            "number" => Some(BaseType::Number),
            "boolean" => Some(BaseType::Boolean),
            "null" => Some(BaseType::Null),
            "file" => Some(BaseType::File),
            _ => None,
        }
    }

    pub fn is_scalar(self) -> bool {
        !matches!(self, BaseType::Object | BaseType::Array | BaseType::Null)
    }
}

impl std::fmt::Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How array values are serialized into a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    Csv,
    Ssv,
    Tsv,
    Pipes,
    Multi,
}

impl CollectionFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "csv" => Some(CollectionFormat::Csv),
            "ssv" => Some(CollectionFormat::Ssv),
            "tsv" => Some(CollectionFormat::Tsv),
            "pipes" => Some(CollectionFormat::Pipes),
            "multi" => Some(CollectionFormat::Multi),
            _ => None,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Constraint bag shared by schema nodes and parameter descriptors.
///
/// Tag interpretation writes into this structure. `required` and
/// `collection_format` are carried here so a single tag pass can fill them,
/// but they are emitted by the owner (object `required` list, parameter
/// fields) rather than serialized inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub base_type: Option<BaseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub exclusive_maximum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub exclusive_minimum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "is_false")]
    pub unique_items: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(rename = "x-enum-names", skip_serializing_if = "Vec::is_empty")]
    pub enum_names: Vec<String>,
    #[serde(rename = "x-nullable", skip_serializing_if = "is_false")]
    pub nullable: bool,
    #[serde(skip)]
    pub collection_format: Option<CollectionFormat>,
    #[serde(skip)]
    pub required: Option<bool>,
}

impl Constraints {
    pub fn of_type(base_type: BaseType) -> Self {
        Self {
            base_type: Some(base_type),
            ..Self::default()
        }
    }
}

/// One schema object: a definition body, an inline property schema, or a
/// reference to a named definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaNode {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(flatten)]
    pub constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Internal naming hint: the definition name for references, the base
    /// type name for top-level primitives. Never serialized.
    #[serde(skip)]
    pub type_name: String,
}

impl SchemaNode {
    pub fn of_type(base_type: BaseType) -> Self {
        Self {
            constraints: Constraints::of_type(base_type),
            ..Self::default()
        }
    }

    /// Fresh node for a portable common name. Unknown names fall back to a
    /// bare base type when one matches, and to `None` otherwise.
    pub fn from_common_name(name: &str) -> Option<Self> {
        if let Some(common) = CommonName::parse(name) {
            return Some(common.schema());
        }
        BaseType::parse(name).map(Self::of_type)
    }

    pub fn object() -> Self {
        Self::of_type(BaseType::Object)
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(BaseType::Array)
        }
    }

    pub fn map(values: SchemaNode) -> Self {
        Self {
            additional_properties: Some(Box::new(values)),
            ..Self::of_type(BaseType::Object)
        }
    }

    /// Reference node pointing at `{prefix}{name}`.
    pub fn reference(prefix: &str, name: &str) -> Self {
        Self {
            reference: Some(format!("{prefix}{name}")),
            type_name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.constraints.format = Some(format.to_string());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.constraints.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn base_type(&self) -> Option<BaseType> {
        self.constraints.base_type
    }

    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Whether the node carries no information worth emitting.
    ///
    /// Common-name scalars and references are never empty. Objects are empty
    /// without properties, arrays without items. Anything else is empty when
    /// it has no properties, no additional properties and no format.
    pub fn is_empty(&self) -> bool {
        if self.is_reference() || common_names::is_common_name(&self.type_name) {
            return false;
        }
        match self.constraints.base_type {
            Some(BaseType::Object) => {
                self.properties.is_empty() && self.additional_properties.is_none()
            }
            Some(BaseType::Array) => self.items.is_none(),
            _ => {
                self.properties.is_empty()
                    && self.additional_properties.is_none()
                    && self.constraints.format.is_none()
            }
        }
    }

    /// Reference-only copy of this node, suitable for embedding elsewhere.
    pub fn export(&self) -> SchemaNode {
        SchemaNode {
            reference: self.reference.clone(),
            type_name: self.type_name.clone(),
            ..SchemaNode::default()
        }
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reference_serializes_as_pointer_only() {
        let node = SchemaNode::reference("#/definitions/", "User");
        assert_eq!(node.to_value(), json!({"$ref": "#/definitions/User"}));
        assert_eq!(node.type_name, "User");
    }

    #[test]
    fn skipped_fields_stay_out_of_output() {
        let mut node = SchemaNode::of_type(BaseType::String);
        node.constraints.required = Some(true);
        node.constraints.collection_format = Some(CollectionFormat::Csv);
        assert_eq!(node.to_value(), json!({"type": "string"}));
    }

    #[test]
    fn emptiness() {
        assert!(SchemaNode::object().is_empty());
        assert!(SchemaNode::default().is_empty());
        assert!(!SchemaNode::object()
            .with_property("a", SchemaNode::of_type(BaseType::String))
            .is_empty());
        assert!(!SchemaNode::array(SchemaNode::default()).is_empty());
        assert!(!SchemaNode::of_type(BaseType::Number)
            .with_format("double")
            .is_empty());

        let mut boolean = SchemaNode::of_type(BaseType::Boolean);
        assert!(boolean.is_empty());
        boolean.type_name = "boolean".into();
        assert!(!boolean.is_empty());
    }

    #[test]
    fn export_keeps_only_the_reference() {
        let mut node = SchemaNode::reference("#/definitions/", "Pet");
        node.constraints.description = Some("ignored".into());
        let exported = node.export();
        assert_eq!(exported.reference.as_deref(), Some("#/definitions/Pet"));
        assert_eq!(exported.type_name, "Pet");
        assert!(exported.constraints.description.is_none());
    }
}
