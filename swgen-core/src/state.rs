use std::collections::BTreeMap;

use crate::config::GeneratorConfig;
use crate::naming::NameRegistry;
use crate::overrides::OverrideMap;
use crate::queue::DeferredQueue;
use crate::schema::SchemaNode;

/// A registered definition.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionEntry {
    pub identity: String,
    pub name: String,
    pub schema: SchemaNode,
}

/// Everything a generator mutates, guarded as one unit.
#[derive(Debug, Default)]
pub(crate) struct GeneratorState {
    pub(crate) config: GeneratorConfig,
    pub(crate) names: NameRegistry,
    /// Keyed by identity.
    pub(crate) definitions: BTreeMap<String, DefinitionEntry>,
    pub(crate) queue: DeferredQueue,
    pub(crate) overrides: OverrideMap,
}

/// Names, definitions and pending work as they were before a call.
#[derive(Debug)]
pub(crate) struct Checkpoint {
    names: NameRegistry,
    definitions: BTreeMap<String, DefinitionEntry>,
    queue: DeferredQueue,
}

impl GeneratorState {
    pub(crate) fn new(config: GeneratorConfig) -> Self {
        Self {
            names: NameRegistry::new(config.qualify_names),
            config,
            ..Self::default()
        }
    }

    pub(crate) fn reference_to(&self, name: &str) -> SchemaNode {
        SchemaNode::reference(&self.config.definition_prefix, name)
    }

    pub(crate) fn definition_named(&self, name: &str) -> Option<&DefinitionEntry> {
        let identity = self.names.owner_of(name)?;
        self.definitions.get(identity)
    }

    /// Drop a definition and release its name.
    pub(crate) fn forget(&mut self, identity: &str) {
        self.definitions.remove(identity);
        self.names.release(identity);
    }

    /// Copy of the parts a build can change.
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            names: self.names.clone(),
            definitions: self.definitions.clone(),
            queue: self.queue.clone(),
        }
    }

    /// Put back the table captured by [`GeneratorState::checkpoint`].
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.names = checkpoint.names;
        self.definitions = checkpoint.definitions;
        self.queue = checkpoint.queue;
    }

    /// Drop all definitions and pending work. Overrides survive.
    pub(crate) fn reset(&mut self) {
        self.definitions.clear();
        self.names.clear();
        self.queue.clear();
    }
}
