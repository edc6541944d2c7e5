//! Member descriptors.
//!
//! Members form a closed set of five kinds, modelled as the [`Member`] enum. Every variant
//! carries its own descriptor: methods and constructors share [`MethodDescriptor`],
//! properties, fields and events have dedicated ones. Code that needs per-kind behavior
//! matches on the variant, so adding a kind is a compile error everywhere it matters.
//!
//! Visibility and static-ness come from the raw attribute words. Properties and events have
//! no attribute word of their own; they take both from their accessor methods, the way the
//! host runtime does: a property is public if any accessor is public, static if any
//! accessor is static.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::metadata::{
    attributes::{AttributeInstance, Value},
    flags::{FieldAttributes, MethodModifiers, ParamAttributes},
    typesystem::TypeRef,
    visibility::{classify_member, Visibility},
};

/// Kind selector for member enumeration.
///
/// Parsing accepts the singular and plural spelling, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum MemberKind {
    /// Methods
    #[strum(to_string = "method", serialize = "methods")]
    Method,
    /// Instance and type constructors
    #[strum(to_string = "constructor", serialize = "constructors")]
    Constructor,
    /// Properties
    #[strum(to_string = "property", serialize = "properties")]
    Property,
    /// Fields
    #[strum(to_string = "field", serialize = "fields")]
    Field,
    /// Events
    #[strum(to_string = "event", serialize = "events")]
    Event,
}

/// One member of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    /// A method
    Method(MethodDescriptor),
    /// An instance or type constructor
    Constructor(MethodDescriptor),
    /// A property
    Property(PropertyDescriptor),
    /// A field
    Field(FieldDescriptor),
    /// An event
    Event(EventDescriptor),
}

impl Member {
    /// The kind tag of this member.
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Method(_) => MemberKind::Method,
            Member::Constructor(_) => MemberKind::Constructor,
            Member::Property(_) => MemberKind::Property,
            Member::Field(_) => MemberKind::Field,
            Member::Event(_) => MemberKind::Event,
        }
    }

    /// The member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Member::Method(method) | Member::Constructor(method) => &method.name,
            Member::Property(property) => &property.name,
            Member::Field(field) => &field.name,
            Member::Event(event) => &event.name,
        }
    }

    /// Custom attributes applied to the member.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeInstance] {
        match self {
            Member::Method(method) | Member::Constructor(method) => &method.attributes,
            Member::Property(property) => &property.attributes,
            Member::Field(field) => &field.attributes,
            Member::Event(event) => &event.attributes,
        }
    }

    /// Returns `true` if the member is public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        match self {
            Member::Method(method) | Member::Constructor(method) => method.is_public(),
            Member::Property(property) => property.is_public(),
            Member::Field(field) => field.is_public(),
            Member::Event(event) => event.is_public(),
        }
    }

    /// Returns `true` if the member is private, which keeps it from being inherited.
    #[must_use]
    pub fn is_private(&self) -> bool {
        match self {
            Member::Method(method) | Member::Constructor(method) => {
                method.visibility() == Visibility::Private
            }
            Member::Property(property) => property
                .accessors()
                .all(|accessor| accessor.visibility() == Visibility::Private),
            Member::Field(field) => field.visibility() == Visibility::Private,
            Member::Event(event) => event
                .accessors()
                .all(|accessor| accessor.visibility() == Visibility::Private),
        }
    }

    /// Returns `true` if the member belongs to the type rather than to instances.
    #[must_use]
    pub fn is_static(&self) -> bool {
        match self {
            Member::Method(method) | Member::Constructor(method) => method.is_static(),
            Member::Property(property) => property.accessors().any(Accessor::is_static),
            Member::Field(field) => field.is_static(),
            Member::Event(event) => event.accessors().any(Accessor::is_static),
        }
    }

    /// The method descriptor of a method or constructor.
    #[must_use]
    pub fn as_method(&self) -> Option<&MethodDescriptor> {
        match self {
            Member::Method(method) | Member::Constructor(method) => Some(method),
            _ => None,
        }
    }
}

/// Summary of a method body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBody {
    /// Size of the IL code in bytes
    #[serde(default)]
    pub il_size: u32,
    /// Number of local variables
    #[serde(default)]
    pub local_count: u32,
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name, `.ctor` / `.cctor` for constructors
    pub name: String,
    /// Raw `MethodAttributes`
    #[serde(default)]
    pub flags: u32,
    /// Return type
    #[serde(default = "TypeRef::void")]
    pub return_type: TypeRef,
    /// Generic arguments of a generic method
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<TypeRef>,
    /// Parameters, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Custom attributes applied to the method
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInstance>,
    /// Body summary; absent for abstract, extern and runtime-provided methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MethodBody>,
}

impl MethodDescriptor {
    /// Create a method returning `System.Void` without parameters.
    #[must_use]
    pub fn new(name: &str, flags: u32) -> Self {
        MethodDescriptor {
            name: name.to_string(),
            flags,
            return_type: TypeRef::void(),
            generic_arguments: Vec::new(),
            parameters: Vec::new(),
            attributes: Vec::new(),
            body: None,
        }
    }

    /// The modifier bits of the method.
    #[must_use]
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags)
    }

    /// The accessibility label of the method.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        classify_member(self.flags)
    }

    /// Returns `true` if the method is public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility() == Visibility::Public
    }

    /// Returns `true` if the method is static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// Returns `true` if the method is virtual.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.modifiers().contains(MethodModifiers::VIRTUAL)
    }

    /// Returns `true` if the method is abstract.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers().contains(MethodModifiers::ABSTRACT)
    }
}

/// A parameter of a method or constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name; may be empty in stripped metadata
    #[serde(default)]
    pub name: String,
    /// Parameter type; by-reference for `ref` and `out` parameters
    #[serde(rename = "type")]
    pub parameter_type: TypeRef,
    /// Raw `ParamAttributes`
    #[serde(default)]
    pub flags: u32,
    /// Default value of an optional parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl Parameter {
    /// Create a parameter without flags or default.
    #[must_use]
    pub fn new(name: &str, parameter_type: TypeRef) -> Self {
        Parameter {
            name: name.to_string(),
            parameter_type,
            flags: 0,
            default_value: None,
        }
    }

    /// The attribute bits of the parameter.
    #[must_use]
    pub fn attributes(&self) -> ParamAttributes {
        ParamAttributes::from_bits_truncate(self.flags)
    }

    /// Returns `true` for `out` parameters.
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.attributes().contains(ParamAttributes::OUT)
    }

    /// Returns `true` if the parameter declares a default value, which may be `null`.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default_value.is_some() || self.attributes().contains(ParamAttributes::HAS_DEFAULT)
    }
}

/// An accessor method of a property or event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessor {
    /// Accessor method name, e.g. `get_Name`
    pub name: String,
    /// Raw `MethodAttributes` of the accessor
    #[serde(default)]
    pub flags: u32,
}

impl Accessor {
    /// Create an accessor.
    #[must_use]
    pub fn new(name: &str, flags: u32) -> Self {
        Accessor {
            name: name.to_string(),
            flags,
        }
    }

    /// The accessibility label of the accessor.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        classify_member(self.flags)
    }

    /// Returns `true` if the accessor is public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility() == Visibility::Public
    }

    /// Returns `true` if the accessor is static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        MethodModifiers::from_method_flags(self.flags).contains(MethodModifiers::STATIC)
    }
}

/// A property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Property name
    pub name: String,
    /// Property type
    #[serde(rename = "type")]
    pub property_type: TypeRef,
    /// Getter accessor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getter: Option<Accessor>,
    /// Setter accessor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter: Option<Accessor>,
    /// Custom attributes applied to the property
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInstance>,
}

impl PropertyDescriptor {
    /// The existing accessors, getter first.
    pub fn accessors(&self) -> impl Iterator<Item = &Accessor> {
        self.getter.iter().chain(self.setter.iter())
    }

    /// Returns `true` if any accessor is public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.accessors().any(Accessor::is_public)
    }
}

/// A field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub field_type: TypeRef,
    /// Raw `FieldAttributes`
    #[serde(default)]
    pub flags: u32,
    /// Custom attributes applied to the field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInstance>,
}

impl FieldDescriptor {
    /// Create a field.
    #[must_use]
    pub fn new(name: &str, field_type: TypeRef, flags: u32) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            field_type,
            flags,
            attributes: Vec::new(),
        }
    }

    /// The accessibility label of the field.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        classify_member(self.flags)
    }

    /// Returns `true` if the field is public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility() == Visibility::Public
    }

    /// Returns `true` if the field is static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags & FieldAttributes::STATIC != 0
    }
}

/// An event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDescriptor {
    /// Event name
    pub name: String,
    /// Delegate type of the event handler
    pub handler_type: TypeRef,
    /// `add_` accessor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adder: Option<Accessor>,
    /// `remove_` accessor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remover: Option<Accessor>,
    /// Custom attributes applied to the event
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInstance>,
}

impl EventDescriptor {
    /// The existing accessors, adder first.
    pub fn accessors(&self) -> impl Iterator<Item = &Accessor> {
        self.adder.iter().chain(self.remover.iter())
    }

    /// Returns `true` if any accessor is public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.accessors().any(Accessor::is_public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::flags::MemberAccess;
    use std::str::FromStr;

    #[test]
    fn kind_parsing_accepts_both_numbers() {
        assert_eq!(MemberKind::from_str("methods").unwrap(), MemberKind::Method);
        assert_eq!(MemberKind::from_str("Method").unwrap(), MemberKind::Method);
        assert_eq!(
            MemberKind::from_str("PROPERTIES").unwrap(),
            MemberKind::Property
        );
        assert_eq!(
            MemberKind::from_str("constructor").unwrap(),
            MemberKind::Constructor
        );
        assert!(MemberKind::from_str("indexers").is_err());
        assert_eq!(MemberKind::Event.to_string(), "event");
    }

    #[test]
    fn property_visibility_follows_accessors() {
        let mut property = PropertyDescriptor {
            name: "Count".to_string(),
            property_type: TypeRef::named("System.Int32"),
            getter: Some(Accessor::new("get_Count", MemberAccess::PUBLIC)),
            setter: Some(Accessor::new("set_Count", MemberAccess::PRIVATE)),
            attributes: Vec::new(),
        };
        assert!(property.is_public());

        property.getter = None;
        let member = Member::Property(property);
        assert!(!member.is_public());
        assert!(member.is_private());
        assert!(!member.is_static());
    }

    #[test]
    fn static_accessor_makes_event_static() {
        let event = EventDescriptor {
            name: "Changed".to_string(),
            handler_type: TypeRef::named("System.EventHandler"),
            adder: Some(Accessor::new("add_Changed", MemberAccess::PUBLIC | 0x0010)),
            remover: Some(Accessor::new("remove_Changed", MemberAccess::PUBLIC | 0x0010)),
            attributes: Vec::new(),
        };
        assert!(Member::Event(event).is_static());
    }

    #[test]
    fn parameter_defaults() {
        let mut parameter = Parameter::new("count", TypeRef::named("System.Int32"));
        assert!(!parameter.has_default());
        parameter.flags = ParamAttributes::HAS_DEFAULT.bits();
        assert!(parameter.has_default());

        let mut output = Parameter::new(
            "result",
            TypeRef::by_ref(TypeRef::named("System.Int32")),
        );
        output.flags = ParamAttributes::OUT.bits();
        assert!(output.is_out());
    }

    #[test]
    fn member_json_is_tagged_by_kind() {
        let json = r#"{"kind":"field","name":"_count","type":{"kind":"named","name":"Int32","full_name":"System.Int32"},"flags":1}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.kind(), MemberKind::Field);
        assert_eq!(member.name(), "_count");
        assert!(member.is_private());
    }

    #[test]
    fn method_defaults_to_void() {
        let json = r#"{"kind":"method","name":"Run","flags":6}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        let method = member.as_method().unwrap();
        assert_eq!(method.return_type, TypeRef::void());
        assert!(method.is_public());
    }
}
