//! Portable data type names and their `(type, format)` pairs.

use crate::schema::{BaseType, SchemaNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonName {
    Integer,
    Long,
    Float,
    Double,
    String,
    Byte,
    Binary,
    Boolean,
    Date,
    DateTime,
    Password,
}

impl CommonName {
    pub const ALL: [CommonName; 11] = [
        CommonName::Integer,
        CommonName::Long,
        CommonName::Float,
        CommonName::Double,
        CommonName::String,
        CommonName::Byte,
        CommonName::Binary,
        CommonName::Boolean,
        CommonName::Date,
        CommonName::DateTime,
        CommonName::Password,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommonName::Integer => "integer",
            CommonName::Long => "long",
            CommonName::Float => "float",
            CommonName::Double => "double",
            CommonName::String => "string",
            CommonName::Byte => "byte",
            CommonName::Binary => "binary",
            CommonName::Boolean => "boolean",
            CommonName::Date => "date",
            CommonName::DateTime => "dateTime",
            CommonName::Password => "password",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    pub fn base_type(self) -> BaseType {
        match self {
            CommonName::Integer | CommonName::Long => BaseType::Integer,
            CommonName::Float | CommonName::Double => BaseType::Number,
            CommonName::Boolean => BaseType::Boolean,
            CommonName::String
            | CommonName::Byte
            | CommonName::Binary
            | CommonName::Date
            | CommonName::DateTime
            | CommonName::Password => BaseType::String,
        }
    }

    pub fn format(self) -> Option<&'static str> {
        match self {
            CommonName::Integer => Some("int32"),
            CommonName::Long => Some("int64"),
            CommonName::Float => Some("float"),
            CommonName::Double => Some("double"),
            CommonName::Byte => Some("byte"),
            CommonName::Binary => Some("binary"),
            CommonName::Date => Some("date"),
            CommonName::DateTime => Some("date-time"),
            CommonName::Password => Some("password"),
            CommonName::String | CommonName::Boolean => None,
        }
    }

    /// Fresh schema node with this name's base type and format.
    pub fn schema(self) -> SchemaNode {
        let node = SchemaNode::of_type(self.base_type());
        match self.format() {
            Some(format) => node.with_format(format),
            None => node,
        }
    }
}

impl std::fmt::Display for CommonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_common_name(name: &str) -> bool {
    CommonName::parse(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table() {
        let cases = [
            ("integer", BaseType::Integer, Some("int32")),
            ("long", BaseType::Integer, Some("int64")),
            ("float", BaseType::Number, Some("float")),
            ("double", BaseType::Number, Some("double")),
            ("string", BaseType::String, None),
            ("byte", BaseType::String, Some("byte")),
            ("binary", BaseType::String, Some("binary")),
            ("boolean", BaseType::Boolean, None),
            ("date", BaseType::String, Some("date")),
            ("dateTime", BaseType::String, Some("date-time")),
            ("password", BaseType::String, Some("password")),
        ];
        for (name, base, format) in cases {
            let common = CommonName::parse(name).unwrap();
            assert_eq!(common.as_str(), name);
            assert_eq!(common.base_type(), base, "{name}");
            assert_eq!(common.format(), format, "{name}");
        }
    }

    #[test]
    fn unknown_names() {
        assert!(!is_common_name("number"));
        assert!(!is_common_name("DateTime"));
        assert!(!is_common_name(""));
    }
}
