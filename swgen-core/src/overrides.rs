use std::collections::HashMap;

use crate::reflect::{CustomDefinition, Reflect, TypeFn, TypeInfo};

/// Replacement applied whenever a given type is encountered.
#[derive(Debug, Clone)]
pub enum Override {
    /// Describe the type as another type.
    Type(TypeFn),
    /// Render the type from a fixed definition.
    Definition(CustomDefinition),
}

impl Override {
    pub fn with<T: Reflect>() -> Self {
        Override::Type(T::type_info)
    }

    pub fn definition(definition: CustomDefinition) -> Self {
        Override::Definition(definition)
    }
}

/// Overrides keyed by type identity.
#[derive(Debug, Clone, Default)]
pub struct OverrideMap {
    entries: HashMap<String, Override>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: impl Into<String>, replacement: Override) {
        self.entries.insert(identity.into(), replacement);
    }

    pub fn get(&self, identity: &str) -> Option<&Override> {
        self.entries.get(identity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follow a type override. Definition overrides are left to the caller.
    pub fn substitute(&self, info: TypeInfo) -> TypeInfo {
        match self.entries.get(&info.identity) {
            Some(Override::Type(replacement)) => replacement(),
            _ => info,
        }
    }
}
