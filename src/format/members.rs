//! Member signatures.
//!
//! Every signature starts with the canonical name of the declaring type, so inherited members
//! show the base type they come from:
//!
//! | Kind | Shape |
//! |------|-------|
//! | method, constructor | `Declaring.Name<GenericArgs>(Type name, out Type name = default)` |
//! | property | `Declaring.Name : Type [get_Name, set_Name]` |
//! | field | `Declaring.Name : Type [visibility, static]` |
//! | event | `Declaring.Name : HandlerType` |

use crate::{
    format::types::join,
    metadata::{
        members::{
            EventDescriptor, FieldDescriptor, Member, MethodDescriptor, Parameter,
            PropertyDescriptor,
        },
        typesystem::TypeDescriptor,
    },
};

/// `[out |ref ]Type name[ = default]`
#[must_use]
pub fn parameter(parameter: &Parameter) -> String {
    let mut rendered = String::new();
    if parameter.is_out() {
        rendered.push_str("out ");
    } else if parameter.parameter_type.is_by_ref() {
        rendered.push_str("ref ");
    }

    rendered.push_str(&parameter.parameter_type.strip_by_ref().to_string());
    rendered.push(' ');
    rendered.push_str(&parameter.name);

    if parameter.has_default() {
        let default = parameter.default_value.clone().unwrap_or_default();
        rendered.push_str(&format!(" = {default}"));
    }
    rendered
}

/// Signature of a method or constructor.
#[must_use]
pub fn method(declaring: &TypeDescriptor, method: &MethodDescriptor) -> String {
    let generics = if method.generic_arguments.is_empty() {
        String::new()
    } else {
        format!("<{}>", join(&method.generic_arguments))
    };
    let parameters: Vec<String> = method.parameters.iter().map(parameter).collect();

    format!(
        "{}.{}{}({})",
        declaring.full_name(),
        method.name,
        generics,
        parameters.join(", ")
    )
}

/// Signature of a property; non-public accessors are listed only when asked for.
#[must_use]
pub fn property(
    declaring: &TypeDescriptor,
    property: &PropertyDescriptor,
    include_non_public: bool,
) -> String {
    let accessors: Vec<&str> = property
        .accessors()
        .filter(|accessor| include_non_public || accessor.is_public())
        .map(|accessor| accessor.name.as_str())
        .collect();

    format!(
        "{}.{} : {} [{}]",
        declaring.full_name(),
        property.name,
        property.property_type,
        accessors.join(", ")
    )
}

/// Signature of a field.
#[must_use]
pub fn field(declaring: &TypeDescriptor, field: &FieldDescriptor) -> String {
    format!(
        "{}.{} : {} [{}{}]",
        declaring.full_name(),
        field.name,
        field.field_type,
        field.visibility(),
        if field.is_static() { ", static" } else { "" }
    )
}

/// Signature of an event.
#[must_use]
pub fn event(declaring: &TypeDescriptor, event: &EventDescriptor) -> String {
    format!(
        "{}.{} : {}",
        declaring.full_name(),
        event.name,
        event.handler_type
    )
}

/// Signature of any member.
#[must_use]
pub fn member(declaring: &TypeDescriptor, member: &Member, include_non_public: bool) -> String {
    match member {
        Member::Method(descriptor) | Member::Constructor(descriptor) => method(declaring, descriptor),
        Member::Property(descriptor) => property(declaring, descriptor, include_non_public),
        Member::Field(descriptor) => field(declaring, descriptor),
        Member::Event(descriptor) => event(declaring, descriptor),
    }
}

/// The detailed description block of a method.
#[must_use]
pub fn method_details(declaring: &TypeDescriptor, descriptor: &MethodDescriptor) -> Vec<String> {
    let mut lines = vec![
        method(declaring, descriptor),
        format!("Accessibility: {}", descriptor.visibility()),
        format!("Static: {}", descriptor.is_static()),
        format!("Virtual: {}", descriptor.is_virtual()),
        format!("Abstract: {}", descriptor.is_abstract()),
        format!("ReturnType: {}", descriptor.return_type),
    ];

    if !descriptor.attributes.is_empty() {
        lines.push("Attributes:".to_string());
        lines.extend(descriptor.attributes.iter().map(ToString::to_string));
    }

    if let Some(body) = descriptor.body {
        lines.push(format!("ILSize: {}", body.il_size));
        lines.push(format!("LocalVariables: {}", body.local_count));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        attributes::{AttributeInstance, Value},
        flags::{MemberAccess, ParamAttributes, TypeAttributes},
        members::{Accessor, MethodBody},
        typesystem::TypeRef,
    };

    fn gear() -> TypeDescriptor {
        TypeDescriptor::new("Acme", "Gear", TypeAttributes::PUBLIC)
    }

    #[test]
    fn parameter_directions() {
        let int = TypeRef::named("System.Int32");

        let plain = Parameter::new("count", int.clone());
        assert_eq!(parameter(&plain), "System.Int32 count");

        let by_ref = Parameter::new("value", TypeRef::by_ref(int.clone()));
        assert_eq!(parameter(&by_ref), "ref System.Int32 value");

        let mut out = Parameter::new("result", TypeRef::by_ref(int));
        out.flags = ParamAttributes::OUT.bits();
        assert_eq!(parameter(&out), "out System.Int32 result");
    }

    #[test]
    fn parameter_defaults() {
        let mut text = Parameter::new("label", TypeRef::named("System.String"));
        text.default_value = Some(Value::String("none".to_string()));
        assert_eq!(parameter(&text), "System.String label = \"none\"");

        let mut nothing = Parameter::new("owner", TypeRef::named("System.Object"));
        nothing.flags = ParamAttributes::HAS_DEFAULT.bits();
        assert_eq!(parameter(&nothing), "System.Object owner = null");
    }

    #[test]
    fn generic_method_signature() {
        let mut convert = MethodDescriptor::new("Convert", MemberAccess::PUBLIC);
        convert.generic_arguments = vec![TypeRef::generic_parameter("T")];
        convert.parameters = vec![
            Parameter::new("input", TypeRef::generic_parameter("T")),
            Parameter::new("items", TypeRef::array(TypeRef::named("System.String"), 1)),
        ];
        assert_eq!(
            method(&gear(), &convert),
            "Acme.Gear.Convert<T>(T input, System.String[] items)"
        );
    }

    #[test]
    fn property_accessors_respect_visibility() {
        let count = PropertyDescriptor {
            name: "Count".to_string(),
            property_type: TypeRef::named("System.Int32"),
            getter: Some(Accessor::new("get_Count", MemberAccess::PUBLIC)),
            setter: Some(Accessor::new("set_Count", MemberAccess::PRIVATE)),
            attributes: Vec::new(),
        };
        assert_eq!(
            property(&gear(), &count, false),
            "Acme.Gear.Count : System.Int32 [get_Count]"
        );
        assert_eq!(
            property(&gear(), &count, true),
            "Acme.Gear.Count : System.Int32 [get_Count, set_Count]"
        );
    }

    #[test]
    fn field_and_event_signatures() {
        let teeth = FieldDescriptor::new(
            "Teeth",
            TypeRef::named("System.Int32"),
            MemberAccess::PUBLIC | 0x0010,
        );
        assert_eq!(
            field(&gear(), &teeth),
            "Acme.Gear.Teeth : System.Int32 [public, static]"
        );

        let hidden = FieldDescriptor::new("_size", TypeRef::named("System.Double"), MemberAccess::PRIVATE);
        assert_eq!(field(&gear(), &hidden), "Acme.Gear._size : System.Double [private]");

        let turned = EventDescriptor {
            name: "Turned".to_string(),
            handler_type: TypeRef::named("System.EventHandler"),
            adder: None,
            remover: None,
            attributes: Vec::new(),
        };
        assert_eq!(event(&gear(), &turned), "Acme.Gear.Turned : System.EventHandler");
    }

    #[test]
    fn detailed_block() {
        let mut turn = MethodDescriptor::new("Turn", MemberAccess::PUBLIC | 0x0040);
        turn.attributes = vec![AttributeInstance::new("System.ObsoleteAttribute")];
        turn.body = Some(MethodBody {
            il_size: 12,
            local_count: 1,
        });
        assert_eq!(
            method_details(&gear(), &turn),
            vec![
                "Acme.Gear.Turn()",
                "Accessibility: public",
                "Static: false",
                "Virtual: true",
                "Abstract: false",
                "ReturnType: System.Void",
                "Attributes:",
                "System.ObsoleteAttribute",
                "ILSize: 12",
                "LocalVariables: 1",
            ]
        );
    }

    #[test]
    fn abstract_method_has_no_body_lines() {
        let spin = MethodDescriptor::new("Spin", MemberAccess::FAMILY | 0x0400 | 0x0040);
        let lines = method_details(&gear(), &spin);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "Accessibility: protected");
        assert_eq!(lines[4], "Abstract: true");
    }
}
