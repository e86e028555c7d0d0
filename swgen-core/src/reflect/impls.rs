use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::{DynReflect, Reflect, TypeInfo, TypeKind};

macro_rules! reflect_scalar {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<$ty>($kind)
                }
            }
        )*
    };
}

reflect_scalar! {
    bool => TypeKind::Bool,
    i8 => TypeKind::Int { bits: 8, signed: true },
    i16 => TypeKind::Int { bits: 16, signed: true },
    i32 => TypeKind::Int { bits: 32, signed: true },
    i64 => TypeKind::Int { bits: 64, signed: true },
    isize => TypeKind::Int { bits: isize::BITS as u8, signed: true },
    u8 => TypeKind::Int { bits: 8, signed: false },
    u16 => TypeKind::Int { bits: 16, signed: false },
    u32 => TypeKind::Int { bits: 32, signed: false },
    u64 => TypeKind::Int { bits: 64, signed: false },
    usize => TypeKind::Int { bits: usize::BITS as u8, signed: false },
    f32 => TypeKind::Float { bits: 32 },
    f64 => TypeKind::Float { bits: 64 },
    char => TypeKind::Char,
    String => TypeKind::String,
    serde_json::Value => TypeKind::Any,
    Box<serde_json::value::RawValue> => TypeKind::Raw,
    std::net::IpAddr => TypeKind::Text { format: None },
    std::net::Ipv4Addr => TypeKind::Text { format: Some("ipv4") },
    std::net::Ipv6Addr => TypeKind::Text { format: Some("ipv6") },
    std::path::PathBuf => TypeKind::String,
}

impl Reflect for &str {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<str>(TypeKind::String)
    }
}

impl Reflect for std::borrow::Cow<'_, str> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<str>(TypeKind::String)
    }
}

// Transparent wrappers describe their content and forward dynamic samples.
macro_rules! reflect_transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Reflect> Reflect for $wrapper<T> {
                fn type_info() -> TypeInfo {
                    T::type_info()
                }

                fn value_info(&self) -> TypeInfo {
                    (**self).value_info()
                }

                fn sample_info(&self) -> Option<TypeInfo> {
                    (**self).sample_info()
                }
            }
        )*
    };
}

reflect_transparent!(Box, Rc, Arc);

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        T::type_info()
    }

    fn value_info(&self) -> TypeInfo {
        match self {
            Some(value) => value.value_info(),
            None => T::type_info(),
        }
    }

    fn sample_info(&self) -> Option<TypeInfo> {
        self.as_ref().and_then(Reflect::sample_info)
    }
}

macro_rules! reflect_seq {
    ($($seq:ident => $unique:expr),*) => {
        $(
            impl<T: Reflect> Reflect for $seq<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<Self>(TypeKind::Seq { elem: T::type_info, unique: $unique })
                }
            }
        )*
    };
}

reflect_seq!(Vec => false, VecDeque => false, LinkedList => false, HashSet => true, BTreeSet => true);

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Seq {
            elem: T::type_info,
            unique: false,
        })
    }
}

impl<K, V: Reflect> Reflect for HashMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Map { value: V::type_info })
    }
}

impl<K, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Map { value: V::type_info })
    }
}

impl<T> Reflect for std::sync::mpsc::Sender<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Unsupported("channel"))
    }
}

impl<T> Reflect for std::sync::mpsc::Receiver<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Unsupported("channel"))
    }
}

impl<R> Reflect for fn() -> R {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Unsupported("function"))
    }
}

/// Uploaded file content. Binds as a `formData` parameter of type `file`.
#[derive(Debug, Clone, Default)]
pub struct UploadFile;

/// Metadata of an uploaded file. Binds like [`UploadFile`].
#[derive(Debug, Clone, Default)]
pub struct UploadHeader {
    pub filename: String,
    pub size: u64,
}

impl Reflect for UploadFile {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::File)
    }
}

impl Reflect for UploadHeader {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::File)
    }
}

/// Field holding a value whose concrete type is chosen at runtime.
///
/// Statically it describes as "any JSON value". When a value is present,
/// describing the enclosing struct through [`Reflect::value_info`] uses the
/// concrete type of that value instead.
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn DynReflect + Send + Sync>>);

impl Dynamic {
    pub fn new<T: Reflect + Send + Sync + 'static>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl std::fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "Dynamic({})", value.dyn_value_info().identity),
            None => f.write_str("Dynamic(None)"),
        }
    }
}

impl Reflect for Dynamic {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Any)
    }

    fn sample_info(&self) -> Option<TypeInfo> {
        self.0.as_ref().map(|value| value.dyn_value_info())
    }
}

#[cfg(feature = "chrono")]
mod chrono_impls {
    use super::*;

    impl<Tz: chrono::TimeZone> Reflect for chrono::DateTime<Tz> {
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>(TypeKind::DateTime)
        }
    }

    impl Reflect for chrono::NaiveDateTime {
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>(TypeKind::DateTime)
        }
    }

    impl Reflect for chrono::NaiveDate {
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>(TypeKind::Date)
        }
    }

    impl Reflect for chrono::NaiveTime {
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>(TypeKind::Text { format: None })
        }
    }
}

#[cfg(feature = "uuid")]
impl Reflect for uuid::Uuid {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Text {
            format: Some("uuid"),
        })
    }
}
