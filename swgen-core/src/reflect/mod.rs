//! Runtime type descriptions consumed by the schema builder and the
//! parameter binder.
//!
//! A type describes itself through [`Reflect`], usually via
//! `#[derive(Reflect)]`. Field types are stored as [`TypeFn`] pointers and
//! only expanded on demand, so recursive type graphs describe themselves
//! without looping.

mod impls;

use serde_json::Value;

use crate::schema::SchemaNode;
use crate::tags::Tags;

pub use impls::{Dynamic, UploadFile, UploadHeader};

/// Lazily produces the description of a type.
pub type TypeFn = fn() -> TypeInfo;

/// A type that can describe its own shape.
pub trait Reflect {
    /// Static description of the type.
    fn type_info() -> TypeInfo
    where
        Self: Sized;

    /// Description of this value. Differs from [`Reflect::type_info`] when
    /// fields hold dynamically typed values whose concrete type is only known
    /// at runtime.
    fn value_info(&self) -> TypeInfo
    where
        Self: Sized,
    {
        Self::type_info()
    }

    /// Concrete description of the value held by a dynamic container, if any.
    fn sample_info(&self) -> Option<TypeInfo> {
        None
    }
}

/// Object-safe view of [`Reflect`].
pub trait DynReflect {
    fn dyn_value_info(&self) -> TypeInfo;
}

impl<T: Reflect> DynReflect for T {
    fn dyn_value_info(&self) -> TypeInfo {
        self.value_info()
    }
}

/// Structural category of a type.
#[derive(Debug, Clone)]
pub enum TypeKind {
    Bool,
    Int { bits: u8, signed: bool },
    Float { bits: u8 },
    String,
    Char,
    Date,
    DateTime,
    /// Textual value with an optional format (`uuid`, `ipv4`...).
    Text { format: Option<&'static str> },
    File,
    /// Pre-serialized JSON, emitted as an opaque schema.
    Raw,
    /// Any JSON value (empty contract).
    Any,
    Seq { elem: TypeFn, unique: bool },
    Map { value: TypeFn },
    Struct(Vec<FieldInfo>),
    /// Behavioral contract with no structural shape.
    Interface,
    Unsupported(&'static str),
}

/// Values and display names of an enumerated type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumValues {
    pub values: Vec<Value>,
    pub names: Vec<String>,
}

impl EnumValues {
    pub fn strings(values: &[&str], names: &[&str]) -> Self {
        Self {
            values: values.iter().map(|v| Value::from(*v)).collect(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// A schema supplied by the type itself instead of derived from its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomDefinition {
    /// Definition name. Defaults to the type's own name.
    pub name: Option<String>,
    pub schema: SchemaNode,
}

impl CustomDefinition {
    pub fn new(schema: SchemaNode) -> Self {
        Self { name: None, schema }
    }

    pub fn named(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            name: Some(name.into()),
            schema,
        }
    }
}

/// Optional capabilities that change how a type is rendered.
#[derive(Debug, Clone, Default)]
pub enum Capability {
    #[default]
    Reflected,
    Custom(CustomDefinition),
    Enumerated(EnumValues),
}

#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub ident: &'static str,
    pub ty: TypeFn,
    /// Private fields are never emitted.
    pub visible: bool,
    /// Embedded fields are flattened into their parent unless a naming tag
    /// nests them.
    pub embedded: bool,
    pub tags: Tags,
    /// Concrete description taken from a value, overriding `ty`.
    pub sample: Option<Box<TypeInfo>>,
}

impl FieldInfo {
    pub fn new(ident: &'static str, ty: TypeFn) -> Self {
        Self {
            ident,
            ty,
            visible: true,
            embedded: false,
            tags: Tags::new(),
            sample: None,
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Effective description: the sample when present, the static type otherwise.
    pub fn resolve(&self) -> TypeInfo {
        match &self.sample {
            Some(sample) => (**sample).clone(),
            None => (self.ty)(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// Unique key of the type (its fully qualified path).
    pub identity: String,
    /// Declared name. Empty for anonymous and built-in types.
    pub name: String,
    /// Module path the type was declared in.
    pub namespace: String,
    pub kind: TypeKind,
    pub capability: Capability,
    /// Declared fields left out of `kind` because they are private.
    pub hidden_fields: usize,
}

impl TypeInfo {
    pub fn new(identity: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            identity: identity.into(),
            name: String::new(),
            namespace: String::new(),
            kind,
            capability: Capability::Reflected,
            hidden_fields: 0,
        }
    }

    /// Anonymous description keyed by `T`'s type name.
    pub fn of<T: ?Sized>(kind: TypeKind) -> Self {
        Self::new(std::any::type_name::<T>(), kind)
    }

    pub fn named(mut self, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.name = name.into();
        self.namespace = namespace.into();
        self
    }

    pub fn structure(
        identity: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
        fields: Vec<FieldInfo>,
    ) -> Self {
        Self::new(identity, TypeKind::Struct(fields)).named(name, namespace)
    }

    /// Named type whose shape is the one of `inner`.
    pub fn alias(
        identity: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
        inner: TypeInfo,
    ) -> Self {
        Self {
            identity: identity.into(),
            name: name.into(),
            namespace: namespace.into(),
            kind: inner.kind,
            capability: inner.capability,
            hidden_fields: inner.hidden_fields,
        }
    }

    /// String-valued enumeration.
    pub fn enumeration(
        identity: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
        values: EnumValues,
    ) -> Self {
        Self {
            capability: Capability::Enumerated(values),
            ..Self::new(identity, TypeKind::String).named(name, namespace)
        }
    }

    /// Type rendered from a hand-written definition.
    pub fn custom<T: ?Sized>(definition: CustomDefinition) -> Self {
        let identity = std::any::type_name::<T>();
        Self {
            identity: identity.to_string(),
            name: short_type_name(identity).to_string(),
            namespace: namespace_of(identity).to_string(),
            kind: TypeKind::Struct(Vec::new()),
            capability: Capability::Custom(definition),
            hidden_fields: 0,
        }
    }

    /// Behavioral contract with no structural shape.
    pub fn contract<T: ?Sized>() -> Self {
        let identity = std::any::type_name::<T>();
        Self::new(identity, TypeKind::Interface)
            .named(short_type_name(identity), namespace_of(identity))
    }

    /// Record private fields that were not described.
    pub fn with_hidden_fields(mut self, count: usize) -> Self {
        self.hidden_fields = count;
        self
    }

    /// A struct that declares fields but exposes none of them.
    pub fn has_only_hidden_fields(&self) -> bool {
        match &self.kind {
            TypeKind::Struct(fields) => {
                let hidden = self.hidden_fields + fields.iter().filter(|f| !f.visible).count();
                hidden > 0 && !fields.iter().any(|f| f.visible)
            }
            _ => false,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.capability, Capability::Custom(_))
    }

    pub fn fields(&self) -> Option<&[FieldInfo]> {
        match &self.kind {
            TypeKind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Declared name, or a stable `anon_xxxxxxxx` name derived from the identity.
    pub fn reliable_name(&self) -> String {
        if self.is_anonymous() {
            format!("anon_{:08x}", fnv1a(self.identity.as_bytes()))
        } else {
            self.name.clone()
        }
    }

    /// Attach per-field samples taken from a value. Entries line up with the
    /// declared fields; `None` keeps the static type.
    #[doc(hidden)]
    pub fn with_samples(mut self, samples: Vec<Option<TypeInfo>>) -> Self {
        if let TypeKind::Struct(fields) = &mut self.kind {
            for (field, sample) in fields.iter_mut().zip(samples) {
                field.sample = sample.map(Box::new);
            }
        }
        self
    }
}

/// Last path segment of a type name, generics stripped.
pub fn short_type_name(identity: &str) -> &str {
    let base = identity.split('<').next().unwrap_or(identity);
    base.rsplit("::").next().unwrap_or(base)
}

fn namespace_of(identity: &str) -> &str {
    let base = identity.split('<').next().unwrap_or(identity);
    base.rsplit_once("::").map(|(ns, _)| ns).unwrap_or_default()
}

fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(0x0100_0193)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names() {
        assert_eq!(short_type_name("a::b::User"), "User");
        assert_eq!(short_type_name("a::b::Page<a::b::User>"), "Page");
        assert_eq!(short_type_name("i32"), "i32");
        assert_eq!(namespace_of("a::b::User"), "a::b");
        assert_eq!(namespace_of("i32"), "");
    }

    #[test]
    fn anonymous_names_are_stable() {
        let a = TypeInfo::new("x::{{closure}}", TypeKind::Struct(vec![]));
        let b = TypeInfo::new("x::{{closure}}", TypeKind::Struct(vec![]));
        assert_eq!(a.reliable_name(), b.reliable_name());
        assert!(a.reliable_name().starts_with("anon_"));
        assert_eq!(a.reliable_name().len(), "anon_".len() + 8);

        let c = TypeInfo::new("y::Other", TypeKind::Struct(vec![]));
        assert_ne!(a.reliable_name(), c.reliable_name());
    }

    #[test]
    fn samples_line_up_with_fields() {
        let info = TypeInfo::structure(
            "t::S",
            "S",
            "t",
            vec![
                FieldInfo::new("a", <i32 as Reflect>::type_info),
                FieldInfo::new("b", <Dynamic as Reflect>::type_info),
            ],
        )
        .with_samples(vec![None, Some(<String as Reflect>::type_info())]);

        let fields = info.fields().unwrap();
        assert!(fields[0].sample.is_none());
        assert!(matches!(fields[1].resolve().kind, TypeKind::String));
    }
}
