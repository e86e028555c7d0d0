use serde::Serialize;
use tracing::{debug, warn};

use crate::builder::ensure_visible;
use crate::error::SchemaError;
use crate::overrides::Override;
use crate::reflect::{Capability, FieldInfo, TypeInfo, TypeKind};
use crate::schema::{BaseType, CollectionFormat, Constraints, SchemaNode};
use crate::state::GeneratorState;
use crate::tags::{self, apply_tags};

/// Where a request parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    Path,
    Query,
    Header,
    FormData,
    Body,
    Cookie,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Path => "path",
            Location::Query => "query",
            Location::Header => "header",
            Location::FormData => "formData",
            Location::Body => "body",
            Location::Cookie => "cookie",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "path" => Some(Location::Path),
            "query" => Some(Location::Query),
            "header" => Some(Location::Header),
            "formData" | "form" => Some(Location::FormData),
            "body" => Some(Location::Body),
            "cookie" => Some(Location::Cookie),
            _ => None,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element type of an array parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamItems {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub base_type: Option<BaseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One Swagger parameter object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "in")]
    pub location: Location,
    #[serde(flatten)]
    pub constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ParamItems>,
    #[serde(rename = "collectionFormat", skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            constraints: Constraints::default(),
            items: None,
            collection_format: None,
            schema: None,
            required: location == Location::Path,
        }
    }

    /// Required body parameter carrying `schema`.
    pub fn body(schema: SchemaNode) -> Self {
        Self {
            schema: Some(Box::new(schema)),
            required: true,
            ..Self::new("body", Location::Body)
        }
    }

    pub fn is_array(&self) -> bool {
        self.constraints.base_type == Some(BaseType::Array)
    }
}

/// Location and name a field binds to, if any.
fn classify(field: &FieldInfo, subject: &str) -> Result<Option<(Location, bool, String)>, SchemaError> {
    let tags = &field.tags;
    let explicit = match tags.get("in").map(str::trim) {
        None | Some("") | Some("-") => None,
        Some(value) => Some(Location::parse(value).ok_or_else(|| SchemaError::InvalidLocation {
            subject: subject.to_string(),
            value: value.to_string(),
        })?),
    };

    let implied = [
        ("query", Location::Query, false),
        ("path", Location::Path, false),
        ("header", Location::Header, false),
        ("formData", Location::FormData, false),
        ("file", Location::FormData, true),
        ("cookie", Location::Cookie, false),
    ]
    .into_iter()
    .find_map(|(key, location, file)| tags.name_for(key).map(|name| (location, file, name)));

    let binding = match (explicit, implied) {
        (Some(location), Some((_, file, name))) => Some((location, file, name.to_string())),
        (Some(location), None) => {
            let name = tags.name_for("json").unwrap_or(field.ident);
            Some((location, false, name.to_string()))
        }
        (None, Some((location, file, name))) => Some((location, file, name.to_string())),
        (None, None) => None,
    };
    Ok(binding)
}

fn is_unbound(field: &FieldInfo) -> bool {
    ["in", "query", "path", "header", "formData", "file", "cookie"]
        .iter()
        .all(|key| field.tags.get(key).is_none())
        && field.tags.name_for("json").is_none()
}

impl GeneratorState {
    /// Bind the fields of a struct to request parameters.
    ///
    /// Returns the reliable name of the struct and its non-body parameters in
    /// field order. Fields without a location tag belong to the body and are
    /// skipped.
    pub(crate) fn bind(&mut self, info: TypeInfo) -> Result<(String, Vec<ParameterDescriptor>), SchemaError> {
        if let Some(Override::Definition(_)) = self.overrides.get(&info.identity) {
            return Err(SchemaError::NotAStruct {
                type_name: info.identity,
            });
        }
        let info = self.overrides.substitute(info);
        let Some(fields) = info.fields() else {
            return Err(SchemaError::NotAStruct {
                type_name: info.identity.clone(),
            });
        };
        ensure_visible(&info)?;

        let name = info.reliable_name();
        let mut params = Vec::new();
        self.bind_fields(&name, fields, &mut params)?;
        debug!(name = %name, count = params.len(), "Bound request parameters");
        Ok((name, params))
    }

    fn bind_fields(
        &mut self,
        owner: &str,
        fields: &[FieldInfo],
        params: &mut Vec<ParameterDescriptor>,
    ) -> Result<(), SchemaError> {
        for field in fields.iter().filter(|f| f.visible) {
            if field.embedded && is_unbound(field) {
                let inner = self.overrides.substitute(field.resolve());
                if let (Some(sub), false) = (inner.fields(), inner.is_custom()) {
                    self.bind_fields(owner, sub, params)?;
                    continue;
                }
            }

            let subject = format!("{owner}.{}", field.ident);
            let Some((location, file_tag, name)) = classify(field, &subject)? else {
                continue;
            };
            if location == Location::Body {
                continue;
            }
            let param = self.bind_field(field, &subject, location, file_tag, name)?;
            if param.constraints.base_type == Some(BaseType::File)
                && params
                    .iter()
                    .any(|p| p.name == param.name && p.location == param.location)
            {
                continue;
            }
            params.push(param);
        }
        Ok(())
    }

    fn bind_field(
        &mut self,
        field: &FieldInfo,
        subject: &str,
        location: Location,
        file_tag: bool,
        name: String,
    ) -> Result<ParameterDescriptor, SchemaError> {
        let info = self.overrides.substitute(field.resolve());
        let is_file = file_tag || matches!(info.kind, TypeKind::File);

        let mut shape = match field.tags.get("type").filter(|t| !t.is_empty() && *t != "-") {
            Some(type_tag) => tags::schema_from_type_tag(subject, type_tag)?,
            None => self.parameter_shape(&info)?,
        };
        if is_file {
            shape = SchemaNode::of_type(BaseType::File);
        }

        let unsupported = || SchemaError::UnsupportedParameter {
            subject: subject.to_string(),
            type_name: info.identity.clone(),
        };
        let base_type = match shape.base_type() {
            Some(base) if !shape.is_reference() && base != BaseType::Object && base != BaseType::Null => base,
            _ => return Err(unsupported()),
        };

        let location = if is_file { Location::FormData } else { location };
        let mut param = ParameterDescriptor::new(name, location);

        if base_type == BaseType::Array {
            let items = shape.items.take().ok_or_else(unsupported)?;
            if items.is_reference() || !items.base_type().is_some_and(BaseType::is_scalar) {
                return Err(SchemaError::NestedParameter {
                    subject: subject.to_string(),
                });
            }
            param.items = Some(ParamItems {
                base_type: items.constraints.base_type,
                format: items.constraints.format.clone(),
            });
            param.collection_format = Some(match location {
                Location::Query | Location::FormData => self.config.default_collection_format,
                _ => CollectionFormat::Csv,
            });
        }

        param.constraints = shape.constraints;
        apply_tags(&field.tags, &mut param.constraints, subject)?;

        if let Some(format) = param.constraints.collection_format.take() {
            if param.is_array() {
                param.collection_format = Some(format);
            } else {
                warn!(field = %subject, "collectionFormat on a non-array parameter is ignored");
            }
        }
        let required = param.constraints.required.take().unwrap_or(false);
        param.required = location == Location::Path || required;

        Ok(param)
    }

    /// Inline shape of a parameter type. Custom types contribute their own
    /// schema, structs and maps collapse to a bare object so they are
    /// rejected without being queued as definitions.
    fn parameter_shape(&mut self, info: &TypeInfo) -> Result<SchemaNode, SchemaError> {
        if let Some(Override::Definition(def)) = self.overrides.get(&info.identity) {
            return Ok(def.schema.clone());
        }
        match (&info.capability, &info.kind) {
            (Capability::Custom(def), _) => Ok(def.schema.clone()),
            (_, TypeKind::Struct(_)) | (_, TypeKind::Map { .. }) => Ok(SchemaNode::object()),
            (_, TypeKind::Seq { elem, unique }) => {
                let element = self.overrides.substitute(elem());
                let mut node = SchemaNode::array(self.parameter_shape(&element)?);
                node.constraints.unique_items = *unique;
                Ok(node)
            }
            _ => self.schema_for_type(info.clone()),
        }
    }

    /// Body parameter for `info`, or `None` when its schema is empty.
    pub(crate) fn bind_body(&mut self, info: TypeInfo) -> Result<Option<ParameterDescriptor>, SchemaError> {
        let identity = self.overrides.substitute(info.clone()).identity;
        let known = self.definitions.contains_key(&identity);

        let node = self.build_definition(info)?;
        self.drain()?;

        let empty = match node.reference.as_ref() {
            Some(_) => self
                .definition_named(&node.type_name)
                .is_some_and(|entry| entry.schema.is_empty()),
            None => node.is_empty(),
        };
        if empty {
            if node.is_reference() && !known {
                if let Some(owner) = self.names.owner_of(&node.type_name).map(str::to_string) {
                    self.forget(&owner);
                }
            }
            debug!(identity = %identity, "Empty body dropped");
            return Ok(None);
        }
        Ok(Some(ParameterDescriptor::body(node)))
    }
}
