//! Type catalog over a loaded module.
//!
//! The [`Catalog`] is the read-only index every query command works through. It borrows the
//! [`Module`] for its whole lifetime and never changes it; all results are references into the
//! module's descriptors.
//!
//! # Enumeration
//!
//! [`Catalog::get_types`] yields the module's types in their native order, partitioned by
//! visibility. Referenced (external) types never appear in enumeration or identifier lookup;
//! they only let base chains, interface sets and inherited members reach past the module.
//!
//! # Identifier resolution
//!
//! [`Catalog::find_type`] resolves user input in four stages and returns the first hit of the
//! first stage that has one:
//!
//! 1. qualified name, exact
//! 2. qualified name, ignoring case
//! 3. simple name, exact
//! 4. simple name, ignoring case
//!
//! # Examples
//!
//! ```rust
//! use dotinspect::catalog::Catalog;
//! use dotinspect::metadata::{
//!     flags::TypeAttributes,
//!     identity::ModuleIdentity,
//!     module::Module,
//!     typesystem::TypeDescriptor,
//! };
//!
//! let mut module = Module::new(ModuleIdentity::new("Acme", "1.0.0.0"));
//! module.types.push(TypeDescriptor::new("Acme", "Gear", TypeAttributes::PUBLIC));
//! module.types.push(TypeDescriptor::new("Acme.Internal", "gear", TypeAttributes::NOT_PUBLIC));
//!
//! let catalog = Catalog::new(&module);
//! assert_eq!(catalog.find_type("acme.gear").map(|t| t.full_name()), Some("Acme.Gear".to_string()));
//! assert_eq!(catalog.find_type("gear").map(|t| t.full_name()), Some("Acme.Internal.gear".to_string()));
//! assert_eq!(catalog.get_types(false, true).count(), 1);
//! ```

use std::collections::{HashMap, HashSet};

use crate::{
    metadata::{
        flags::BindingFlags,
        members::{Member, MemberKind},
        module::Module,
        typesystem::{TypeDescriptor, TypeRef},
    },
    utils::eq_ignore_case,
};

/// A member together with the type that declares it.
#[derive(Debug, Clone, Copy)]
pub struct MemberEntry<'m> {
    /// The declaring type; a base type for inherited members
    pub declaring_type: &'m TypeDescriptor,
    /// The member
    pub member: &'m Member,
}

/// One step of a base-type walk: the reference as written, and what it resolved to.
type BaseStep<'m> = (&'m TypeRef, Option<&'m TypeDescriptor>);

/// Read-only index over the types of one module.
pub struct Catalog<'m> {
    module: &'m Module,
    /// Qualified names of `module.types`, index-aligned
    names: Vec<String>,
    /// Qualified name to the first module type carrying it
    defined: HashMap<String, usize>,
    /// Qualified name to the first referenced type carrying it
    referenced: HashMap<String, usize>,
}

/// Map each qualified name to the index of its first occurrence.
fn first_occurrences<'a>(names: impl Iterator<Item = &'a String>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (position, name) in names.enumerate() {
        index.entry(name.clone()).or_insert(position);
    }
    index
}

impl<'m> Catalog<'m> {
    /// Index a module.
    #[must_use]
    pub fn new(module: &'m Module) -> Self {
        let names: Vec<String> = module.types.iter().map(TypeDescriptor::full_name).collect();
        let external: Vec<String> = module
            .referenced_types
            .iter()
            .map(TypeDescriptor::full_name)
            .collect();

        Catalog {
            module,
            defined: first_occurrences(names.iter()),
            referenced: first_occurrences(external.iter()),
            names,
        }
    }

    /// The indexed module.
    #[must_use]
    pub fn module(&self) -> &'m Module {
        self.module
    }

    /// Number of types defined in the module.
    #[must_use]
    pub fn len(&self) -> usize {
        self.module.types.len()
    }

    /// Returns `true` if the module defines no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.module.types.is_empty()
    }

    /// Module types matching the visibility filter, in native order.
    ///
    /// When both flags are `false` the filter is off and every type is returned.
    pub fn get_types(
        &self,
        include_public: bool,
        include_non_public: bool,
    ) -> impl Iterator<Item = &'m TypeDescriptor> + '_ {
        let (include_public, include_non_public) = if include_public || include_non_public {
            (include_public, include_non_public)
        } else {
            (true, true)
        };

        self.module.types.iter().filter(move |ty| {
            if ty.is_public() {
                include_public
            } else {
                include_non_public
            }
        })
    }

    /// Resolve a user-supplied identifier to a module type.
    ///
    /// Returns `None` for blank identifiers and when no stage matches.
    #[must_use]
    pub fn find_type(&self, identifier: &str) -> Option<&'m TypeDescriptor> {
        if identifier.trim().is_empty() {
            return None;
        }

        let types = &self.module.types;
        let qualified = |matches: &dyn Fn(&str) -> bool| {
            self.names
                .iter()
                .position(|name| matches(name))
                .map(|index| &types[index])
        };
        let simple = |matches: &dyn Fn(&str) -> bool| types.iter().find(|ty| matches(&ty.name));

        self.defined
            .get(identifier)
            .and_then(|index| types.get(*index))
            .or_else(|| qualified(&|name: &str| eq_ignore_case(name, identifier)))
            .or_else(|| simple(&|name: &str| name == identifier))
            .or_else(|| simple(&|name: &str| eq_ignore_case(name, identifier)))
    }

    /// Resolve a type reference to its descriptor.
    ///
    /// Plain references resolve by qualified name, closed generics by their open definition.
    /// Module types are searched before referenced types. Arrays, by-reference types and
    /// generic parameters never resolve.
    #[must_use]
    pub fn resolve(&self, reference: &TypeRef) -> Option<&'m TypeDescriptor> {
        let name = reference.definition_name()?;

        match self.defined.get(name) {
            Some(index) => self.module.types.get(*index),
            None => self
                .referenced
                .get(name)
                .and_then(|index| self.module.referenced_types.get(*index)),
        }
    }

    /// The resolved base type.
    #[must_use]
    pub fn base_of(&self, ty: &'m TypeDescriptor) -> Option<&'m TypeDescriptor> {
        ty.base.as_ref().and_then(|base| self.resolve(base))
    }

    /// Walk the base references of `ty`, most-derived first.
    ///
    /// The walk ends after a reference that does not resolve, or before a reference that
    /// resolves to a type already visited.
    fn walk_bases(&self, ty: &'m TypeDescriptor) -> Vec<BaseStep<'m>> {
        let mut steps = Vec::new();
        let mut visited = HashSet::from([ty.full_name()]);
        let mut current = ty;

        while let Some(reference) = &current.base {
            match self.base_of(current) {
                Some(next) => {
                    if !visited.insert(next.full_name()) {
                        break;
                    }
                    steps.push((reference, Some(next)));
                    current = next;
                }
                None => {
                    steps.push((reference, None));
                    break;
                }
            }
        }

        steps
    }

    /// The resolvable base types of `ty`, most-derived first.
    #[must_use]
    pub fn base_chain(&self, ty: &'m TypeDescriptor) -> Vec<&'m TypeDescriptor> {
        self.walk_bases(ty)
            .into_iter()
            .filter_map(|(_, resolved)| resolved)
            .collect()
    }

    /// Canonical names of `ty` and each of its bases up to the root, most-derived first.
    ///
    /// A base that cannot be resolved is still listed but ends the chain.
    #[must_use]
    pub fn inheritance_chain(&self, ty: &'m TypeDescriptor) -> Vec<String> {
        std::iter::once(ty.full_name())
            .chain(
                self.walk_bases(ty)
                    .into_iter()
                    .map(|(reference, _)| reference.to_string()),
            )
            .collect()
    }

    /// Every interface `ty` implements, directly, through its bases or through interfaces
    /// extending other interfaces. Each interface appears once, in discovery order.
    #[must_use]
    pub fn interfaces_of(&self, ty: &'m TypeDescriptor) -> Vec<&'m TypeRef> {
        let mut found: Vec<&'m TypeRef> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut visited: HashSet<String> = HashSet::new();

        let mut pending: Vec<&'m TypeDescriptor> = vec![ty];
        pending.extend(self.base_chain(ty));
        pending.reverse();

        while let Some(current) = pending.pop() {
            if !visited.insert(current.full_name()) {
                continue;
            }

            let mut extended = Vec::new();
            for reference in &current.interfaces {
                if seen.insert(reference.to_string()) {
                    found.push(reference);
                }
                if let Some(resolved) = self.resolve(reference) {
                    extended.push(resolved);
                }
            }
            pending.extend(extended.into_iter().rev());
        }

        found
    }

    /// Returns `true` if a value of `candidate` can be used where `target` is expected.
    ///
    /// That holds for the type itself, and when `target` names a base type of `candidate` or
    /// one of the interfaces it implements.
    #[must_use]
    pub fn is_assignable(&self, target: &'m TypeDescriptor, candidate: &'m TypeDescriptor) -> bool {
        if std::ptr::eq(target, candidate) {
            return true;
        }

        let target_name = target.full_name();
        let names_target = |reference: &TypeRef| reference.full_name() == Some(target_name.as_str());

        self.walk_bases(candidate)
            .into_iter()
            .any(|(reference, _)| names_target(reference))
            || self
                .interfaces_of(candidate)
                .into_iter()
                .any(|reference| names_target(reference))
    }

    /// Module types declared directly inside `ty`, in native order.
    #[must_use]
    pub fn nested_types(&self, ty: &TypeDescriptor) -> Vec<&'m TypeDescriptor> {
        let outer = ty.full_name();
        self.module
            .types
            .iter()
            .filter(|candidate| candidate.declaring_type.as_deref() == Some(outer.as_str()))
            .collect()
    }

    /// Members of one kind selected by `flags`.
    ///
    /// Declared members come first, in metadata order. Unless `flags` contains
    /// [`BindingFlags::DECLARED_ONLY`], the non-private instance members of every resolvable
    /// base type follow, most-derived base first. Constructors are never inherited, and a base
    /// member is skipped when a more derived type declares a member with the same name and
    /// signature.
    #[must_use]
    pub fn members(
        &self,
        ty: &'m TypeDescriptor,
        kind: MemberKind,
        flags: BindingFlags,
    ) -> Vec<MemberEntry<'m>> {
        let mut entries: Vec<MemberEntry<'m>> = ty
            .declared(kind)
            .filter(|member| flags.selects(member.is_public(), member.is_static()))
            .map(|member| MemberEntry {
                declaring_type: ty,
                member,
            })
            .collect();

        if flags.contains(BindingFlags::DECLARED_ONLY) || kind == MemberKind::Constructor {
            return entries;
        }

        let mut hidden: HashSet<String> = ty.declared(kind).map(hiding_key).collect();
        for base in self.base_chain(ty) {
            for member in base.declared(kind) {
                if member.is_static() || member.is_private() {
                    continue;
                }
                if hidden.contains(&hiding_key(member)) {
                    continue;
                }
                if flags.selects(member.is_public(), false) {
                    entries.push(MemberEntry {
                        declaring_type: base,
                        member,
                    });
                }
            }
            hidden.extend(base.declared(kind).map(hiding_key));
        }

        entries
    }

    /// The assembly-qualified name of a module type: `FullName, Name, Version=…, Culture=…,
    /// PublicKeyToken=…`.
    #[must_use]
    pub fn assembly_qualified_name(&self, ty: &TypeDescriptor) -> String {
        format!(
            "{}, {}",
            ty.full_name(),
            self.module.identity.display_name()
        )
    }
}

/// Name and, for callables, parameter types; a derived member with the same key hides the
/// base member.
fn hiding_key(member: &Member) -> String {
    match member.as_method() {
        Some(method) => {
            let parameters: Vec<String> = method
                .parameters
                .iter()
                .map(|parameter| parameter.parameter_type.to_string())
                .collect();
            format!("{}({})", method.name, parameters.join(","))
        }
        None => member.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            flags::{MemberAccess, TypeAttributes},
            members::MethodDescriptor,
        },
        test::factories::{self, ModuleBuilder},
    };

    fn object_module() -> ModuleBuilder {
        ModuleBuilder::new("Acme").referenced(factories::system_object())
    }

    #[test]
    fn resolution_stage_order() {
        let module = object_module()
            .with_type(factories::class("Acme", "gear", TypeAttributes::PUBLIC))
            .with_type(factories::class("Acme", "Gear", TypeAttributes::PUBLIC))
            .with_type(factories::class("Other", "Acme.Gear", TypeAttributes::PUBLIC))
            .build();
        let catalog = Catalog::new(&module);

        // exact qualified beats case-insensitive qualified
        assert_eq!(catalog.find_type("Acme.Gear").unwrap().name, "Gear");
        // case-insensitive qualified: first in native order
        assert_eq!(catalog.find_type("ACME.GEAR").unwrap().name, "gear");
        // qualified beats simple
        assert_eq!(
            catalog.find_type("Acme.Gear").unwrap().namespace(),
            Some("Acme")
        );
        assert_eq!(catalog.find_type("Gear").unwrap().name, "Gear");
        assert_eq!(catalog.find_type("GEAR").unwrap().name, "gear");
    }

    #[test]
    fn blank_identifiers_do_not_resolve() {
        let module = object_module()
            .with_type(factories::class("", "Program", TypeAttributes::NOT_PUBLIC))
            .build();
        let catalog = Catalog::new(&module);
        assert!(catalog.find_type("").is_none());
        assert!(catalog.find_type("   ").is_none());
        assert!(catalog.find_type("Missing").is_none());
        assert!(catalog.find_type("program").is_some());
    }

    #[test]
    fn referenced_types_are_not_found_by_identifier() {
        let module = object_module().build();
        let catalog = Catalog::new(&module);
        assert!(catalog.find_type("System.Object").is_none());
        assert!(catalog.resolve(&TypeRef::named("System.Object")).is_some());
    }

    #[test]
    fn visibility_partition() {
        let module = factories::scenario_module();
        let catalog = Catalog::new(&module);

        let names = |public, non_public| {
            catalog
                .get_types(public, non_public)
                .map(TypeDescriptor::full_name)
                .collect::<Vec<_>>()
        };
        assert_eq!(names(true, false), vec!["Acme.A"]);
        assert_eq!(names(false, true), vec!["Acme.B"]);
        assert_eq!(names(false, false), names(true, true));
    }

    #[test]
    fn inheritance_chain_reaches_root() {
        let module = factories::scenario_module();
        let catalog = Catalog::new(&module);
        let b = catalog.find_type("B").unwrap();
        assert_eq!(
            catalog.inheritance_chain(b),
            vec!["Acme.B", "Acme.A", "System.Object"]
        );
    }

    #[test]
    fn inheritance_stops_at_unresolved_base() {
        let mut widget = factories::class("Acme", "Widget", TypeAttributes::PUBLIC);
        widget.base = Some(TypeRef::named("Vendor.Control"));
        let module = ModuleBuilder::new("Acme").with_type(widget).build();
        let catalog = Catalog::new(&module);

        let widget = catalog.find_type("Widget").unwrap();
        assert_eq!(
            catalog.inheritance_chain(widget),
            vec!["Acme.Widget", "Vendor.Control"]
        );
        assert!(catalog.base_chain(widget).is_empty());
        assert!(catalog.base_of(widget).is_none());
    }

    #[test]
    fn resolve_prefers_first_and_defined_types() {
        let mut first = factories::class("Acme", "Gear", TypeAttributes::PUBLIC);
        first.members = vec![factories::method("Turn", MemberAccess::PUBLIC)];
        let second = factories::class("Acme", "Gear", TypeAttributes::NOT_PUBLIC);
        let external = factories::class("Acme", "Gear", TypeAttributes::PUBLIC);
        let module = ModuleBuilder::new("Acme")
            .with_type(first)
            .with_type(second)
            .referenced(external)
            .referenced(factories::system_object())
            .build();
        let catalog = Catalog::new(&module);

        let gear = catalog.resolve(&TypeRef::named("Acme.Gear")).unwrap();
        assert!(std::ptr::eq(gear, &module.types[0]));
        assert!(std::ptr::eq(catalog.find_type("Acme.Gear").unwrap(), gear));

        let object = catalog.resolve(&TypeRef::named("System.Object")).unwrap();
        assert!(std::ptr::eq(object, &module.referenced_types[1]));
        assert!(catalog.resolve(&TypeRef::named("Acme.Missing")).is_none());
    }

    #[test]
    fn base_of_reaches_referenced_types() {
        let module = factories::scenario_module();
        let catalog = Catalog::new(&module);

        let b = catalog.find_type("B").unwrap();
        let a = catalog.base_of(b).unwrap();
        assert_eq!(a.full_name(), "Acme.A");
        assert_eq!(
            catalog.base_of(a).map(TypeDescriptor::full_name),
            Some("System.Object".to_string())
        );
    }

    #[test]
    fn cyclic_bases_terminate() {
        let mut left = factories::class("Acme", "Left", TypeAttributes::PUBLIC);
        left.base = Some(TypeRef::named("Acme.Right"));
        let mut right = factories::class("Acme", "Right", TypeAttributes::PUBLIC);
        right.base = Some(TypeRef::named("Acme.Left"));
        let module = ModuleBuilder::new("Acme").with_type(left).with_type(right).build();
        let catalog = Catalog::new(&module);

        let left = catalog.find_type("Left").unwrap();
        assert_eq!(catalog.inheritance_chain(left), vec!["Acme.Left", "Acme.Right"]);
    }

    #[test]
    fn transitive_interfaces() {
        let module = factories::shapes_module();
        let catalog = Catalog::new(&module);

        let square = catalog.find_type("Square").unwrap();
        let names: Vec<String> = catalog
            .interfaces_of(square)
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            names,
            vec!["Shapes.ISquare", "Shapes.IShape", "System.IComparable"]
        );
    }

    #[test]
    fn assignability() {
        let module = factories::shapes_module();
        let catalog = Catalog::new(&module);

        let shape = catalog.find_type("IShape").unwrap();
        let square = catalog.find_type("Square").unwrap();
        let polygon = catalog.find_type("Polygon").unwrap();
        let circle = catalog.find_type("Circle").unwrap();

        assert!(catalog.is_assignable(shape, square));
        assert!(catalog.is_assignable(polygon, square));
        assert!(catalog.is_assignable(shape, shape));
        assert!(!catalog.is_assignable(square, polygon));
        assert!(!catalog.is_assignable(polygon, circle));
    }

    #[test]
    fn nested_types_follow_declaring_links() {
        let module = factories::shapes_module();
        let catalog = Catalog::new(&module);
        let polygon = catalog.find_type("Polygon").unwrap();
        let nested: Vec<String> = catalog
            .nested_types(polygon)
            .into_iter()
            .map(TypeDescriptor::full_name)
            .collect();
        assert_eq!(nested, vec!["Shapes.Polygon+Vertex"]);
    }

    #[test]
    fn inherited_members() {
        let module = factories::shapes_module();
        let catalog = Catalog::new(&module);
        let square = catalog.find_type("Square").unwrap();

        let methods: Vec<String> = catalog
            .members(square, MemberKind::Method, BindingFlags::for_visibility(false))
            .into_iter()
            .map(|entry| format!("{}.{}", entry.declaring_type.name, entry.member.name()))
            .collect();
        // Polygon.Area is hidden by the override, static Polygon.Create is not inherited
        assert_eq!(
            methods,
            vec![
                "Square.Area",
                "Polygon.Describe",
                "Polygon.CompareTo",
                "Object.ToString",
                "Object.GetHashCode"
            ]
        );

        let declared_only = BindingFlags::for_visibility(false) | BindingFlags::DECLARED_ONLY;
        assert_eq!(
            catalog
                .members(square, MemberKind::Method, declared_only)
                .len(),
            1
        );
    }

    #[test]
    fn constructors_are_not_inherited() {
        let module = factories::shapes_module();
        let catalog = Catalog::new(&module);
        let square = catalog.find_type("Square").unwrap();

        let constructors =
            catalog.members(square, MemberKind::Constructor, BindingFlags::for_visibility(true));
        assert_eq!(constructors.len(), 1);
        assert_eq!(constructors[0].declaring_type.name, "Square");
    }

    #[test]
    fn non_public_members_need_the_flag() {
        let mut gear = factories::class("Acme", "Gear", TypeAttributes::PUBLIC);
        gear.members.push(Member::Method(MethodDescriptor::new(
            "Grind",
            MemberAccess::PRIVATE,
        )));
        let module = ModuleBuilder::new("Acme").with_type(gear).build();
        let catalog = Catalog::new(&module);
        let gear = catalog.find_type("Gear").unwrap();

        assert!(catalog
            .members(gear, MemberKind::Method, BindingFlags::for_visibility(false))
            .is_empty());
        assert_eq!(
            catalog
                .members(gear, MemberKind::Method, BindingFlags::for_visibility(true))
                .len(),
            1
        );
    }

    #[test]
    fn assembly_qualified_name() {
        let module = factories::scenario_module();
        let catalog = Catalog::new(&module);
        let a = catalog.find_type("A").unwrap();
        assert_eq!(
            catalog.assembly_qualified_name(a),
            "Acme.A, Acme, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null"
        );
    }
}
