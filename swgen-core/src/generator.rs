use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::SchemaError;
use crate::overrides::Override;
use crate::params::ParameterDescriptor;
use crate::reflect::Reflect;
use crate::schema::SchemaNode;
use crate::state::{DefinitionEntry, GeneratorState};

/// Schema generator: owns the definition table, the naming registry, the
/// deferred queue and the override map.
///
/// Every public operation takes the internal lock for its whole duration, so
/// a generator can be shared between threads and each call observes and
/// produces a consistent table. A call that fails leaves the table exactly as
/// it found it.
///
/// # Example
///
/// ```ignore
/// use swgen::prelude::*;
///
/// #[derive(Reflect)]
/// struct User {
///     #[swgen(required = true)]
///     id: i64,
///     name: String,
/// }
///
/// let generator = Generator::new();
/// let schema = generator.build_schema_for::<User>()?;
/// assert_eq!(schema.to_value()["$ref"], "#/definitions/User");
/// ```
#[derive(Debug)]
pub struct Generator {
    state: RwLock<GeneratorState>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            state: RwLock::new(GeneratorState::new(config)),
        }
    }

    // Failed builds roll back before returning, so a poisoned table is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, GeneratorState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, GeneratorState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `op` on the table, restoring the previous table if it fails.
    fn transact<R>(
        &self,
        op: impl FnOnce(&mut GeneratorState) -> Result<R, SchemaError>,
    ) -> Result<R, SchemaError> {
        let mut state = self.write();
        let checkpoint = state.checkpoint();
        let result = op(&mut state);
        if result.is_err() {
            state.restore(checkpoint);
        }
        result
    }

    pub fn config(&self) -> GeneratorConfig {
        self.read().config.clone()
    }

    /// Replace `T` wherever it is encountered.
    pub fn register_override<T: Reflect>(&self, replacement: Override) {
        self.register_override_for(&T::type_info().identity, replacement);
    }

    /// Replace the type with the given identity wherever it is encountered.
    pub fn register_override_for(&self, identity: &str, replacement: Override) {
        debug!(identity, "Registered type override");
        self.write().overrides.insert(identity, replacement);
    }

    /// Schema for `value`, resolving every definition it references.
    ///
    /// Named structs, named collections and custom types are registered and a
    /// reference is returned. Anonymous shapes are returned inline.
    pub fn build_schema<T: Reflect>(&self, value: &T) -> Result<SchemaNode, SchemaError> {
        let info = value.value_info();
        self.transact(|state| {
            let node = state.build_definition(info)?;
            state.drain()?;
            Ok(node)
        })
    }

    /// Like [`Generator::build_schema`] from the static type alone.
    pub fn build_schema_for<T: Reflect>(&self) -> Result<SchemaNode, SchemaError> {
        self.transact(|state| {
            let node = state.build_definition(T::type_info())?;
            state.drain()?;
            Ok(node)
        })
    }

    /// Register the definition of `value` without resolving referenced
    /// types. Pending work stays queued until [`Generator::drain_deferred`].
    pub fn build_definition<T: Reflect>(&self, value: &T) -> Result<SchemaNode, SchemaError> {
        let info = value.value_info();
        self.transact(|state| state.build_definition(info))
    }

    /// Build every pending definition. Returns how many were built.
    pub fn drain_deferred(&self) -> Result<usize, SchemaError> {
        self.transact(GeneratorState::drain)
    }

    pub fn pending(&self) -> usize {
        self.read().queue.len()
    }

    /// Bind the fields of `value` to request parameters.
    ///
    /// Returns the display name of the struct and its parameters in field
    /// order.
    pub fn bind_parameters<T: Reflect>(
        &self,
        value: &T,
    ) -> Result<(String, Vec<ParameterDescriptor>), SchemaError> {
        let info = value.value_info();
        self.transact(|state| state.bind(info))
    }

    pub fn bind_parameters_for<T: Reflect>(
        &self,
    ) -> Result<(String, Vec<ParameterDescriptor>), SchemaError> {
        self.transact(|state| state.bind(T::type_info()))
    }

    /// Body parameter for `value`. Empty bodies yield `None` and leave no
    /// definition behind.
    pub fn bind_body<T: Reflect>(&self, value: &T) -> Result<Option<ParameterDescriptor>, SchemaError> {
        let info = value.value_info();
        self.transact(|state| state.bind_body(info))
    }

    pub fn bind_body_for<T: Reflect>(&self) -> Result<Option<ParameterDescriptor>, SchemaError> {
        self.transact(|state| state.bind_body(T::type_info()))
    }

    /// Registered definition of `T`, or of its override replacement.
    pub fn definition<T: Reflect>(&self) -> Option<DefinitionEntry> {
        let state = self.read();
        let identity = state.overrides.substitute(T::type_info()).identity;
        state.definitions.get(&identity).cloned()
    }

    /// Registered definition with the given name.
    pub fn definition_named(&self, name: &str) -> Option<SchemaNode> {
        self.read()
            .definition_named(name)
            .map(|entry| entry.schema.clone())
    }

    /// Every registered definition keyed by name, in name order.
    ///
    /// Does not drain the deferred queue: types referenced but not built yet
    /// are missing until [`Generator::drain_deferred`] runs.
    pub fn export_definitions(&self) -> BTreeMap<String, SchemaNode> {
        let state = self.read();
        state
            .definitions
            .values()
            .map(|entry| {
                let mut schema = entry.schema.clone();
                schema.reference = None;
                (entry.name.clone(), schema)
            })
            .collect()
    }

    /// [`Generator::export_definitions`] as a JSON object.
    pub fn definitions_json(&self) -> Value {
        let definitions = self.export_definitions();
        Value::Object(
            definitions
                .into_iter()
                .map(|(name, schema)| (name, schema.to_value()))
                .collect(),
        )
    }

    /// Forget every definition, name and pending entry. Overrides are kept.
    pub fn reset_definitions(&self) {
        self.write().reset();
    }
}
