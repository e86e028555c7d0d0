extern crate proc_macro;
use proc_macro::TokenStream;

pub(crate) mod crate_path;
pub(crate) mod derive_codegen;
pub(crate) mod derive_parsing;
pub(crate) mod derive_reflect;
pub(crate) mod serde_attrs;

/// Derive macro implementing [`Reflect`](swgen_core::Reflect).
///
/// # Container attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[swgen(name = "Name")]` | Definition name (defaults to the type name, or `#[serde(rename)]`) |
/// | `#[swgen(inline)]` | Anonymous type: arrays of it inline the object, references use `anon_xxxxxxxx` |
/// | `#[swgen(definition = path::to_fn)]` | Use the `CustomDefinition` returned by `fn() -> CustomDefinition` |
///
/// # Field attributes
///
/// Every `key = literal` pair becomes a field tag, read by the schema
/// builder and the parameter binder:
///
/// | Tag | Effect |
/// |-----|--------|
/// | `json = "name"` | Property name (`"-"` excludes the field) |
/// | `query`, `path`, `header`, `formData`, `file`, `cookie` | Parameter location and name |
/// | `in = "query"` | Explicit parameter location |
/// | `type = "dateTime"` | Replace the schema with a common name or base type |
/// | `required = true` | Required property or parameter |
/// | `description`, `title`, `format`, `pattern`, `default`, `enum` | Schema text and values |
/// | `minimum`, `maximum`, `multipleOf`, `minLength`, `maxLength`, ... | Numeric and size constraints |
/// | `collectionFormat = "csv"` | Array parameter encoding |
///
/// Bare `flatten` embeds the field's properties into the parent, bare
/// `skip` drops the field. `#[serde(rename, rename_all, skip, flatten)]` are
/// honoured and `///` comments become the description.
///
/// Only `pub` fields are described.
///
/// Single-field tuple structs describe as their inner type under their own
/// name. Unit-only enums describe as string enumerations.
///
/// # Example
///
/// ```ignore
/// use swgen::prelude::*;
///
/// #[derive(Serialize, Reflect)]
/// #[serde(rename_all = "camelCase")]
/// pub struct ListUsers {
///     #[swgen(query = "page", minimum = 1, default = 1)]
///     pub page: u32,
///     #[swgen(header = "X-Tenant", required = true)]
///     pub tenant: String,
///     /// Filter on the display name.
///     pub display_name: Option<String>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(swgen))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    derive_reflect::expand(input)
}
