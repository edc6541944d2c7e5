//! Custom attribute instances and literal values.
//!
//! An [`AttributeInstance`] is one application of a custom attribute: the attribute type, the
//! positional constructor arguments and the named (field or property) arguments, in the order
//! they were encoded. Argument values and parameter defaults share the [`Value`] literal
//! model.
//!
//! # Snapshot encoding
//!
//! Values are encoded untagged: JSON scalars, strings and arrays map onto the matching
//! variant, while the three literal kinds without a JSON counterpart use single-purpose
//! objects:
//!
//! ```json
//! { "char": "x" }
//! { "enum": "System.AttributeTargets", "value": "Class" }
//! { "type": { "kind": "named", "name": "String", "full_name": "System.String" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::metadata::typesystem::TypeRef;

/// A literal value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// A boolean
    Bool(bool),
    /// A signed integer
    Int(i64),
    /// An unsigned integer too large for `i64`
    UInt(u64),
    /// A floating point number
    Float(f64),
    /// A string
    String(String),
    /// A single character
    Char {
        /// The character
        char: char,
    },
    /// An enumerant
    Enum {
        /// Qualified name of the enum type
        #[serde(rename = "enum")]
        type_name: String,
        /// Name of the enum member
        value: String,
    },
    /// A type reference, as in `typeof(T)`
    Type {
        /// The referenced type
        #[serde(rename = "type")]
        type_ref: TypeRef,
    },
    /// An array of values
    Array(Vec<Value>),
}

/// A named argument of a custom attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArgument {
    /// Name of the field or property being set
    pub name: String,
    /// The assigned value
    #[serde(default)]
    pub value: Value,
}

/// One applied custom attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInstance {
    /// The attribute type
    #[serde(rename = "type")]
    pub attribute_type: TypeRef,
    /// Constructor arguments, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Value>,
    /// Named arguments, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named_arguments: Vec<NamedArgument>,
}

impl AttributeInstance {
    /// An attribute of the given type without arguments.
    #[must_use]
    pub fn new(attribute_type: &str) -> Self {
        AttributeInstance {
            attribute_type: TypeRef::named(attribute_type),
            arguments: Vec::new(),
            named_arguments: Vec::new(),
        }
    }

    /// Append a constructor argument.
    #[must_use]
    pub fn with_argument(mut self, value: Value) -> Self {
        self.arguments.push(value);
        self
    }

    /// Append a named argument.
    #[must_use]
    pub fn with_named(mut self, name: &str, value: Value) -> Self {
        self.named_arguments.push(NamedArgument {
            name: name.to_string(),
            value,
        });
        self
    }

    /// Returns `true` if the attribute carries neither constructor nor named arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty() && self.named_arguments.is_empty()
    }
}
