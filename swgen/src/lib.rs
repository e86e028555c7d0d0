//! swgen: Swagger 2.0 definitions and operation parameters from Rust types.
//!
//! This facade crate re-exports the engine and the derive macro through a
//! single dependency. Import everything you need with:
//!
//! ```ignore
//! use swgen::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature  | Default | Effect                                         |
//! |----------|---------|------------------------------------------------|
//! | `chrono` | **yes** | `Reflect` for chrono dates and timestamps      |
//! | `uuid`   | **yes** | `Reflect` for `uuid::Uuid` (`format: uuid`)    |
//!
//! # Example
//!
//! ```ignore
//! use swgen::prelude::*;
//!
//! #[derive(Reflect)]
//! pub struct Pet {
//!     #[swgen(required = true)]
//!     pub id: i64,
//!     pub tags: Vec<Tag>,
//! }
//!
//! #[derive(Reflect)]
//! pub struct Tag {
//!     pub label: String,
//! }
//!
//! let generator = Generator::new();
//! let pet = generator.build_schema_for::<Pet>()?;
//! let definitions = generator.definitions_json();
//! assert!(definitions.get("Tag").is_some());
//! ```

// The derive resolves paths through `proc-macro-crate`, which reports this
// crate as itself when it is compiled here.
extern crate self as swgen;

pub extern crate swgen_core;
pub extern crate swgen_macros;

pub use swgen_core::*;

/// Unified prelude. Import everything with `use swgen::prelude::*`.
pub mod prelude {
    pub use swgen_core::{
        BaseType, CollectionFormat, CommonName, CustomDefinition, Dynamic, Generator,
        GeneratorConfig, Location, Override, ParameterDescriptor, Reflect, SchemaError,
        SchemaNode, TypeInfo, UploadFile, UploadHeader,
    };
}
