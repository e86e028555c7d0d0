//! Reflection-driven Swagger 2.0 schema assembly.
//!
//! Types describe themselves through [`Reflect`]. A [`Generator`] turns those
//! descriptions into a table of named definitions, reference nodes and
//! request parameter descriptors.

extern crate self as swgen_core;

mod builder;
pub mod common_names;
pub mod config;
pub mod error;
mod generator;
pub mod naming;
pub mod overrides;
mod params;
pub mod queue;
pub mod reflect;
pub mod schema;
mod state;
pub mod tags;

pub use common_names::CommonName;
pub use config::{ConfigError, GeneratorConfig};
pub use error::SchemaError;
pub use generator::Generator;
pub use overrides::{Override, OverrideMap};
pub use params::{Location, ParamItems, ParameterDescriptor};
pub use reflect::{
    short_type_name, Capability, CustomDefinition, Dynamic, EnumValues, FieldInfo, Reflect,
    TypeFn, TypeInfo, TypeKind, UploadFile, UploadHeader,
};
pub use schema::{BaseType, CollectionFormat, Constraints, SchemaNode};
pub use state::DefinitionEntry;
pub use tags::Tags;

pub use swgen_macros::Reflect;
