/// Error raised while building a schema or binding request parameters.
///
/// Every variant is a caller configuration mistake: the type graph or its
/// tags cannot be expressed as a schema. The failing call is aborted and no
/// partial output is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A tag value could not be parsed as the primitive its key expects.
    InvalidTag {
        subject: String,
        key: String,
        value: String,
        expected: &'static str,
    },
    /// An `in` tag named a location that does not exist.
    InvalidLocation { subject: String, value: String },
    /// A contract (non-empty interface) type was reached with no concrete
    /// sample value and no custom definition.
    NonEmptyInterface { type_name: String },
    /// A kind that has no schema representation (channels, functions).
    Unsupported { type_name: String, kind: &'static str },
    /// A struct whose declared fields are all private, with no custom
    /// definition to describe it.
    NoVisibleFields { type_name: String },
    /// Parameters can only be bound from struct types.
    NotAStruct { type_name: String },
    /// A non-body parameter whose shape is not a scalar or a flat array.
    UnsupportedParameter { subject: String, type_name: String },
    /// An array of structs or an array of arrays in a non-body parameter.
    NestedParameter { subject: String },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::InvalidTag {
                subject,
                key,
                value,
                expected,
            } => write!(
                f,
                "Invalid tag on {subject}: `{key}` = {value:?} is not {expected}"
            ),
            SchemaError::InvalidLocation { subject, value } => {
                write!(f, "Invalid parameter location {value:?} on {subject}")
            }
            SchemaError::NonEmptyInterface { type_name } => write!(
                f,
                "Non-empty interface is not supported: {type_name} (provide a concrete value or a custom definition)"
            ),
            SchemaError::Unsupported { type_name, kind } => {
                write!(f, "Type {type_name} of kind {kind} is not supported")
            }
            SchemaError::NoVisibleFields { type_name } => write!(
                f,
                "Struct {type_name} has no public fields (make some public or provide a custom definition)"
            ),
            SchemaError::NotAStruct { type_name } => {
                write!(f, "Parameters must be a struct, got {type_name}")
            }
            SchemaError::UnsupportedParameter { subject, type_name } => write!(
                f,
                "Unsupported field {subject} of type {type_name} in request parameters"
            ),
            SchemaError::NestedParameter { subject } => write!(
                f,
                "Unsupported array of struct or nested array in parameter {subject}"
            ),
        }
    }
}

impl std::error::Error for SchemaError {}
