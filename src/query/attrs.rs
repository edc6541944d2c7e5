use crate::{
    catalog::Catalog,
    format,
    metadata::members::MemberKind,
    options::OptionSet,
    query::{binding_flags, resolve_type, type_with_remainder},
    utils::eq_ignore_case,
    Error, Result,
};

/// Lookup order for `attributes --member`.
const LOOKUP_ORDER: [MemberKind; 4] = [
    MemberKind::Method,
    MemberKind::Property,
    MemberKind::Field,
    MemberKind::Event,
];

/// `attributes`: the attributes of a type, or of one of its members with `--member`.
pub(super) fn attributes(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    if options.has("member") {
        return member_attributes(catalog, options);
    }

    let ty = resolve_type(catalog, options, &["type"])?;
    Ok(format::attributes::render_all(&ty.attributes))
}

fn member_attributes(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    let (ty, remainder) = type_with_remainder(catalog, options);
    let name = options
        .first_of(&["member"])
        .or_else(|| remainder.first().map(String::as_str));

    let (Some(ty), Some(name)) = (ty, name) else {
        return Err(Error::MissingArgument("Type and member"));
    };

    let flags = binding_flags(options);
    let entry = LOOKUP_ORDER
        .iter()
        .find_map(|kind| {
            catalog
                .members(ty, *kind, flags)
                .into_iter()
                .find(|entry| eq_ignore_case(entry.member.name(), name))
        })
        .ok_or(Error::MemberNotFound)?;

    Ok(format::attributes::render_all(entry.member.attributes()))
}

#[cfg(test)]
mod tests {
    use crate::{
        metadata::{
            attributes::{AttributeInstance, Value},
            flags::{MemberAccess, TypeAttributes},
            members::{FieldDescriptor, Member, MethodDescriptor},
            typesystem::TypeRef,
        },
        query::tests::{failure, lines},
        test::factories::{self, ModuleBuilder},
    };

    #[test]
    fn type_attributes() {
        let module = factories::shapes_module();
        assert_eq!(
            lines(&module, &["attributes", "Polygon"]),
            vec![
                "System.SerializableAttribute",
                "System.ObsoleteAttribute(\"use Shape\")"
            ]
        );
        assert!(lines(&module, &["attributes", "--type", "Circle"]).is_empty());
    }

    #[test]
    fn member_attributes() {
        let module = factories::shapes_module();
        assert_eq!(
            lines(&module, &["attributes", "Polygon", "--member", "describe"]),
            vec!["System.Diagnostics.DebuggerStepThroughAttribute"]
        );
        assert!(lines(&module, &["attributes", "--type", "Polygon", "--member", "Sides"]).is_empty());
    }

    #[test]
    fn methods_are_searched_before_fields() {
        let mut gauge = factories::class("Acme", "Gauge", TypeAttributes::PUBLIC);
        let mut level = MethodDescriptor::new("Level", MemberAccess::PUBLIC);
        level.attributes = vec![AttributeInstance::new("Acme.MethodTagAttribute")];
        let mut field =
            FieldDescriptor::new("level", TypeRef::named("System.Int32"), MemberAccess::PUBLIC);
        field.attributes = vec![AttributeInstance::new("Acme.FieldTagAttribute")
            .with_named("Order", Value::Int(2))];
        gauge.members = vec![Member::Field(field), Member::Method(level)];
        let module = ModuleBuilder::new("Acme").with_type(gauge).build();

        assert_eq!(
            lines(&module, &["attributes", "Gauge", "--member", "LEVEL"]),
            vec!["Acme.MethodTagAttribute"]
        );
    }

    #[test]
    fn member_lookup_failures() {
        let module = factories::shapes_module();
        assert_eq!(
            failure(&module, &["attributes", "Polygon", "--member", "Perimeter"]),
            "Member not found"
        );
        assert_eq!(
            failure(&module, &["attributes", "Hexagon", "--member", "Area"]),
            "Type and member required"
        );
        assert_eq!(
            failure(&module, &["attributes", "Polygon", "--member", "_sides"]),
            "Member not found"
        );
        assert_eq!(
            lines(&module, &["attributes", "Polygon", "--member", "_sides", "--nonpublic"]),
            Vec::<String>::new()
        );
        assert_eq!(failure(&module, &["attributes", "Hexagon"]), "Type not found");
    }
}
