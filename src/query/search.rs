use crate::{
    catalog::Catalog,
    format,
    metadata::members::MemberKind,
    options::OptionSet,
    query::{binding_flags, identifier, include_non_public},
    utils::contains_ignore_case,
    Error, Result,
};

/// Member kinds scanned by `search`, in output order.
const SEARCHED_KINDS: [MemberKind; 3] = [MemberKind::Method, MemberKind::Property, MemberKind::Field];

/// `search`: types whose qualified name, and members whose name, contain the pattern.
///
/// Hits are reported per type in catalog order: the type itself, then its methods,
/// properties and fields.
pub(super) fn search(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    let pattern = identifier(options, &["pattern"])
        .filter(|value| !value.trim().is_empty())
        .ok_or(Error::MissingArgument("Pattern"))?;

    let case_sensitive = options.has("case-sensitive");
    let matches = |text: &str| {
        if case_sensitive {
            text.contains(pattern)
        } else {
            contains_ignore_case(text, pattern)
        }
    };

    let include_non_public = include_non_public(options);
    let flags = binding_flags(options);
    let mut lines = Vec::new();

    for ty in catalog.get_types(true, include_non_public) {
        let full_name = ty.full_name();
        if matches(&full_name) {
            lines.push(format!("{full_name} [type]"));
        }

        for kind in SEARCHED_KINDS {
            for entry in catalog.members(ty, kind, flags) {
                if matches(entry.member.name()) {
                    let signature = format::members::member(
                        entry.declaring_type,
                        entry.member,
                        include_non_public,
                    );
                    lines.push(format!("{full_name} :: {signature}"));
                }
            }
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use crate::{
        query::tests::{failure, lines},
        test::factories,
    };

    #[test]
    fn types_and_members() {
        let module = factories::shapes_module();
        assert_eq!(
            lines(&module, &["search", "side"]),
            vec![
                "Shapes.Polygon :: Shapes.Polygon.Sides : System.Int32 [get_Sides]",
                "Shapes.Polygon :: Shapes.Polygon.MaxSides : System.Int32 [public, static]",
                "Shapes.Square :: Shapes.Polygon.Sides : System.Int32 [get_Sides]",
            ]
        );
    }

    #[test]
    fn type_hits_come_first() {
        let module = factories::shapes_module();
        let hits = lines(&module, &["search", "--pattern", "Square"]);
        assert_eq!(
            hits,
            vec!["Shapes.ISquare [type]", "Shapes.Square [type]"]
        );
    }

    #[test]
    fn case_sensitive_toggle() {
        let module = factories::shapes_module();
        assert!(!lines(&module, &["search", "area"]).is_empty());
        assert!(lines(&module, &["search", "area", "--case-sensitive"]).is_empty());
        assert_eq!(
            lines(&module, &["search", "Area", "--case-sensitive"]),
            vec![
                "Shapes.IShape :: Shapes.IShape.Area()",
                "Shapes.Polygon :: Shapes.Polygon.Area()",
                "Shapes.Square :: Shapes.Square.Area()",
            ]
        );
    }

    #[test]
    fn non_public_scope() {
        let module = factories::shapes_module();
        assert!(lines(&module, &["search", "Main"]).is_empty());
        assert_eq!(
            lines(&module, &["search", "Main", "--nonpublic"]),
            vec!["Shapes.Program :: Shapes.Program.Main(System.String[] args)"]
        );
    }

    #[test]
    fn pattern_required() {
        let module = factories::shapes_module();
        assert_eq!(failure(&module, &["search"]), "Pattern required");
    }
}
