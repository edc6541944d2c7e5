use crate::{
    catalog::Catalog,
    export::{type_model, ModuleModel},
    options::OptionSet,
    query::{identifier, include_non_public},
    Error, Result,
};

/// `dump-json`: the export document as one indented JSON text.
///
/// With a type identifier only that type is exported, always with its members. Otherwise
/// every type under the visibility filter is exported, with members on `--with-members`.
pub(super) fn dump_json(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    let include_non_public = include_non_public(options);
    let mut model = ModuleModel::new(catalog.module());

    match identifier(options, &["type", "name"]) {
        Some(identifier) => {
            let ty = catalog.find_type(identifier).ok_or(Error::TypeNotFound)?;
            model
                .types
                .push(type_model(catalog, ty, true, include_non_public));
        }
        None => {
            let with_members = options.has("with-members");
            model.types.extend(
                catalog
                    .get_types(true, include_non_public)
                    .map(|ty| type_model(catalog, ty, with_members, include_non_public)),
            );
        }
    }

    Ok(vec![serde_json::to_string_pretty(&model)?])
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{
        query::tests::{failure, run},
        test::factories,
    };

    fn document(module: &crate::metadata::module::Module, args: &[&str]) -> Value {
        let (status, out, err) = run(module, args);
        assert_eq!(status, 0, "dump failed: {err}");
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn two_types_in_catalog_order() {
        let module = factories::scenario_module();
        let json = document(&module, &["dump-json", "--nonpublic"]);

        let types = json["Types"].as_array().unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0]["FullName"], "Acme.A");
        assert_eq!(types[1]["FullName"], "Acme.B");
        assert!(types.iter().all(|ty| !ty["FullName"].as_str().unwrap().is_empty()));
        assert!(types.iter().all(|ty| ty["Members"].as_array().unwrap().is_empty()));
        assert_eq!(json["Location"], "/modules/Acme.dll");
    }

    #[test]
    fn public_only_by_default() {
        let module = factories::scenario_module();
        let json = document(&module, &["dump-json"]);
        assert_eq!(json["Types"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn with_members_flag() {
        let module = factories::scenario_module();
        let json = document(&module, &["dump-json", "--with-members"]);
        let members = json["Types"][0]["Members"].as_array().unwrap();
        assert_eq!(members[0]["Kind"], "method");
        assert_eq!(members[0]["Name"], "Foo");
        assert_eq!(members[0]["Signature"], "Acme.A.Foo(System.Int32 value)");
    }

    #[test]
    fn single_type_always_has_members() {
        let module = factories::shapes_module();
        let json = document(&module, &["dump-json", "--type", "square"]);

        let types = json["Types"].as_array().unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0]["FullName"], "Shapes.Square");
        assert_eq!(types[0]["BaseType"], "Shapes.Polygon");
        assert_eq!(
            types[0]["Interfaces"],
            serde_json::json!(["Shapes.IShape", "Shapes.ISquare", "System.IComparable"])
        );
        assert!(!types[0]["Members"].as_array().unwrap().is_empty());
    }

    #[test]
    fn output_is_indented() {
        let module = factories::scenario_module();
        let (_, out, _) = run(&module, &["dump-json"]);
        assert!(out.starts_with("{\n  \"Name\": \"Acme\""));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let module = factories::scenario_module();
        assert_eq!(failure(&module, &["dump-json", "Gadget"]), "Type not found");
    }
}
