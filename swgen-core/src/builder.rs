use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::common_names::CommonName;
use crate::error::SchemaError;
use crate::overrides::Override;
use crate::reflect::{Capability, CustomDefinition, FieldInfo, TypeInfo, TypeKind};
use crate::schema::{BaseType, SchemaNode};
use crate::state::{DefinitionEntry, GeneratorState};
use crate::tags::{self, apply_tags};

type Properties = (BTreeMap<String, SchemaNode>, Vec<String>);

impl GeneratorState {
    /// Top-level build: register `info` as a definition when it is named and
    /// return a reference, or return the inline schema for anonymous shapes.
    pub(crate) fn build_definition(&mut self, info: TypeInfo) -> Result<SchemaNode, SchemaError> {
        let (info, fallback_name) = match self.overrides.get(&info.identity) {
            Some(Override::Definition(def)) => {
                let def = def.clone();
                return Ok(self.register_custom(&info, def));
            }
            Some(Override::Type(replacement)) => {
                let fallback = info.reliable_name();
                (replacement(), Some(fallback))
            }
            None => (info, None),
        };

        if let Capability::Custom(def) = &info.capability {
            let def = def.clone();
            return Ok(self.register_custom(&info, def));
        }

        match &info.kind {
            TypeKind::Struct(fields) => self.build_struct(&info, fields),
            TypeKind::Seq { elem, unique } => {
                if let Some(entry) = self.definitions.get(&info.identity) {
                    return Ok(self.reference_to(&entry.name));
                }
                let element = self.overrides.substitute(elem());
                let items = if element.is_anonymous() && element.is_struct() && !element.is_custom() {
                    self.inline_object(&element)?
                } else {
                    self.schema_for_type(element)?
                };
                let mut node = SchemaNode::array(items);
                node.constraints.unique_items = *unique;
                Ok(self.register_aggregate(&info, node, fallback_name))
            }
            TypeKind::Map { value } => {
                if let Some(entry) = self.definitions.get(&info.identity) {
                    return Ok(self.reference_to(&entry.name));
                }
                let values = self.schema_for_type(value())?;
                Ok(self.register_aggregate(&info, SchemaNode::map(values), fallback_name))
            }
            _ => {
                let mut node = self.schema_for_type(info.clone())?;
                if !node.is_reference() {
                    if let Some(base) = node.base_type() {
                        node.type_name = base.as_str().to_string();
                    }
                }
                Ok(node)
            }
        }
    }

    /// Field-level schema. Structs and custom types become references and are
    /// queued for later resolution; everything else is inlined.
    pub(crate) fn schema_for_type(&mut self, info: TypeInfo) -> Result<SchemaNode, SchemaError> {
        if let Some(Override::Definition(def)) = self.overrides.get(&info.identity) {
            let def = def.clone();
            return Ok(self.register_custom(&info, def));
        }
        let info = self.overrides.substitute(info);

        let enumerated = match &info.capability {
            Capability::Custom(def) => {
                let def = def.clone();
                return Ok(self.register_custom(&info, def));
            }
            Capability::Enumerated(values) => Some(values.clone()),
            Capability::Reflected => None,
        };

        let mut node = match &info.kind {
            TypeKind::Bool => CommonName::Boolean.schema(),
            TypeKind::Int { bits, signed } => {
                let common = match (*signed, *bits) {
                    (true, 0..=32) | (false, 0..=16) => CommonName::Integer,
                    _ => CommonName::Long,
                };
                let mut node = common.schema();
                if !*signed {
                    node.constraints.minimum = Some(0.0);
                }
                node
            }
            TypeKind::Float { bits: 32 } => CommonName::Float.schema(),
            TypeKind::Float { .. } => CommonName::Double.schema(),
            TypeKind::String => CommonName::String.schema(),
            TypeKind::Char => {
                let mut node = CommonName::String.schema();
                node.constraints.min_length = Some(1);
                node.constraints.max_length = Some(1);
                node
            }
            TypeKind::Date => CommonName::Date.schema(),
            TypeKind::DateTime => CommonName::DateTime.schema(),
            TypeKind::Text { format } => {
                let node = CommonName::String.schema();
                match format {
                    Some(format) => node.with_format(format),
                    None => node,
                }
            }
            TypeKind::File => SchemaNode::of_type(BaseType::File),
            TypeKind::Raw | TypeKind::Any => SchemaNode::default(),
            TypeKind::Seq { elem, unique } => {
                let mut node = SchemaNode::array(self.schema_for_type(elem())?);
                node.constraints.unique_items = *unique;
                node
            }
            TypeKind::Map { value } => SchemaNode::map(self.schema_for_type(value())?),
            TypeKind::Struct(_) => return Ok(self.reference_for(info.clone())),
            TypeKind::Interface => {
                return Err(SchemaError::NonEmptyInterface {
                    type_name: info.identity.clone(),
                })
            }
            TypeKind::Unsupported(kind) => {
                return Err(SchemaError::Unsupported {
                    type_name: info.identity.clone(),
                    kind: *kind,
                })
            }
        };

        if let Some(values) = enumerated {
            node.constraints.enum_values = values.values;
            node.constraints.enum_names = values.names;
        }
        Ok(node)
    }

    /// Reference to the definition of `info`, queuing it when unbuilt.
    fn reference_for(&mut self, info: TypeInfo) -> SchemaNode {
        let name = self
            .names
            .allocate(&info.identity, &info.reliable_name(), &info.namespace);
        if !self.definitions.contains_key(&info.identity) && self.queue.enqueue(info) {
            trace!(name = %name, "Queued deferred definition");
        }
        self.reference_to(&name)
    }

    fn register_custom(&mut self, info: &TypeInfo, def: CustomDefinition) -> SchemaNode {
        if let Some(entry) = self.definitions.get(&info.identity) {
            return self.reference_to(&entry.name);
        }
        let requested = def.name.unwrap_or_else(|| info.reliable_name());
        let name = self
            .names
            .allocate(&info.identity, &requested, &info.namespace);
        let mut schema = def.schema;
        schema.type_name = name.clone();
        debug!(name = %name, identity = %info.identity, "Registered custom definition");
        self.definitions.insert(
            info.identity.clone(),
            DefinitionEntry {
                identity: info.identity.clone(),
                name: name.clone(),
                schema,
            },
        );
        self.reference_to(&name)
    }

    /// Named sequences and maps become definitions, anonymous ones stay inline.
    fn register_aggregate(
        &mut self,
        info: &TypeInfo,
        mut node: SchemaNode,
        fallback_name: Option<String>,
    ) -> SchemaNode {
        let requested = if info.is_anonymous() {
            fallback_name.unwrap_or_default()
        } else {
            info.name.clone()
        };
        if requested.is_empty() {
            return node;
        }
        let name = self
            .names
            .allocate(&info.identity, &requested, &info.namespace);
        node.type_name = name.clone();
        debug!(name = %name, identity = %info.identity, "Registered definition");
        self.definitions.insert(
            info.identity.clone(),
            DefinitionEntry {
                identity: info.identity.clone(),
                name: name.clone(),
                schema: node,
            },
        );
        self.reference_to(&name)
    }

    fn build_struct(&mut self, info: &TypeInfo, fields: &[FieldInfo]) -> Result<SchemaNode, SchemaError> {
        if let Some(entry) = self.definitions.get(&info.identity) {
            return Ok(self.reference_to(&entry.name));
        }
        ensure_visible(info)?;
        let name = self
            .names
            .allocate(&info.identity, &info.reliable_name(), &info.namespace);

        // Placeholder so self references resolve to this entry instead of
        // being queued again.
        self.definitions.insert(
            info.identity.clone(),
            DefinitionEntry {
                identity: info.identity.clone(),
                name: name.clone(),
                schema: SchemaNode::object(),
            },
        );

        match self.object_properties(&name, fields) {
            Ok((properties, required)) => {
                let mut schema = SchemaNode::object();
                schema.properties = properties;
                schema.required = required;
                schema.type_name = name.clone();
                if let Some(entry) = self.definitions.get_mut(&info.identity) {
                    entry.schema = schema;
                }
                debug!(name = %name, identity = %info.identity, "Registered definition");
                Ok(self.reference_to(&name))
            }
            Err(err) => {
                self.forget(&info.identity);
                Err(err)
            }
        }
    }

    fn inline_object(&mut self, info: &TypeInfo) -> Result<SchemaNode, SchemaError> {
        ensure_visible(info)?;
        let owner = info.reliable_name();
        let (properties, required) = self.object_properties(&owner, info.fields().unwrap_or_default())?;
        let mut node = SchemaNode::object();
        node.properties = properties;
        node.required = required;
        Ok(node)
    }

    fn object_properties(&mut self, owner: &str, fields: &[FieldInfo]) -> Result<Properties, SchemaError> {
        let mut properties = BTreeMap::new();
        let mut required = Vec::new();

        for field in fields.iter().filter(|f| f.visible) {
            if field.tags.is_excluded("json") {
                continue;
            }

            if field.embedded && field.tags.name_for("json").is_none() {
                let inner = self.overrides.substitute(field.resolve());
                if let (Some(sub), false) = (inner.fields(), inner.is_custom()) {
                    let (nested, nested_required) = self.object_properties(owner, sub)?;
                    properties.extend(nested);
                    for name in nested_required {
                        if !required.contains(&name) {
                            required.push(name);
                        }
                    }
                    continue;
                }
            }

            let name = field
                .tags
                .name_for("json")
                .unwrap_or(field.ident)
                .to_string();
            let subject = format!("{owner}.{}", field.ident);
            let node = self.property_schema(field, &subject)?;

            if tags::required_flag(&field.tags, &subject)? && !required.contains(&name) {
                required.push(name.clone());
            }
            properties.insert(name, node);
        }

        Ok((properties, required))
    }

    fn property_schema(&mut self, field: &FieldInfo, subject: &str) -> Result<SchemaNode, SchemaError> {
        let mut node = match field.tags.get("type").filter(|t| !t.is_empty() && *t != "-") {
            Some(type_tag) => tags::schema_from_type_tag(subject, type_tag)?,
            None => self.schema_for_type(field.resolve())?,
        };

        if node.is_reference() {
            if field.tags.has_constraints() {
                warn!(field = %subject, "Constraint tags on a referenced type are ignored");
            }
        } else {
            apply_tags(&field.tags, &mut node.constraints, subject)?;
            node.constraints.required = None;
        }
        Ok(node)
    }

    /// Build every queued definition, including ones queued along the way.
    pub(crate) fn drain(&mut self) -> Result<usize, SchemaError> {
        let mut built = 0;
        while let Some(entry) = self.queue.pop() {
            if self.definitions.contains_key(&entry.identity) {
                continue;
            }
            trace!(identity = %entry.identity, "Resolving deferred definition");
            self.build_definition(entry.info)?;
            built += 1;
        }
        Ok(built)
    }
}

pub(crate) fn ensure_visible(info: &TypeInfo) -> Result<(), SchemaError> {
    if info.has_only_hidden_fields() {
        return Err(SchemaError::NoVisibleFields {
            type_name: info.identity.clone(),
        });
    }
    Ok(())
}
