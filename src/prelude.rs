//! # dotinspect Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dotinspect library. Import this module to get quick access to the essential
//! types for building, loading and querying module metadata.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotinspect operations
pub use crate::Error;

/// The result type used throughout dotinspect
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The command-line application over a metadata provider
pub use crate::app::Application;

/// Command runner and the supported commands
pub use crate::query::{Command, QueryEngine};

/// Read-only index over a module's types
pub use crate::catalog::{Catalog, MemberEntry};

/// Parsed command-line options
pub use crate::options::OptionSet;

// ================================================================================================
// Providers
// ================================================================================================

/// Metadata sources and the scoped load context
pub use crate::provider::{LoadContext, MemoryProvider, MetadataProvider, SnapshotProvider};

// ================================================================================================
// Metadata
// ================================================================================================

/// The loaded module and its parts
pub use crate::metadata::module::{EntryPoint, Module, Resource};

/// Module identity
pub use crate::metadata::identity::{Identity, ModuleIdentity};

/// Types and type references
pub use crate::metadata::typesystem::{TypeDescriptor, TypeKind, TypeRef};

/// Members and their descriptors
pub use crate::metadata::members::{
    Accessor, EventDescriptor, FieldDescriptor, Member, MemberKind, MethodBody, MethodDescriptor,
    Parameter, PropertyDescriptor,
};

/// Custom attributes and literal values
pub use crate::metadata::attributes::{AttributeInstance, NamedArgument, Value};

/// ECMA-335 attribute bits
pub use crate::metadata::flags::{
    BindingFlags, FieldAttributes, MemberAccess, MethodModifiers, ParamAttributes, TypeAttributes,
};

/// Accessibility labels
pub use crate::metadata::visibility::Visibility;

// ================================================================================================
// Export
// ================================================================================================

/// Structured export model
pub use crate::export::{MemberModel, ModuleModel, TypeModel};
