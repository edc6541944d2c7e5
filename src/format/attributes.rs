//! Attribute and literal value rendering.

use std::fmt;

use crate::metadata::{
    attributes::{AttributeInstance, Value},
    typesystem::TypeRef,
};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::UInt(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::String(value) => write!(f, "\"{value}\""),
            Value::Char { char } => write!(f, "'{char}'"),
            Value::Enum { type_name, value } => {
                let simple = TypeRef::named(type_name).simple_name();
                write!(f, "{simple}.{value}")
            }
            Value::Type { type_ref } => write!(f, "{type_ref}"),
            Value::Array(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// `AttributeType(ctorArg, ..., name=value, ...)`, without parentheses when there are no
/// arguments at all.
impl fmt::Display for AttributeInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute_type)?;
        if self.is_empty() {
            return Ok(());
        }

        let parts: Vec<String> = self
            .arguments
            .iter()
            .map(ToString::to_string)
            .chain(
                self.named_arguments
                    .iter()
                    .map(|named| format!("{}={}", named.name, named.value)),
            )
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Render every attribute of a list, one entry per attribute.
#[must_use]
pub fn render_all(attributes: &[AttributeInstance]) -> Vec<String> {
    attributes.iter().map(ToString::to_string).collect()
}
