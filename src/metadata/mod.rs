//! Metadata representation for inspected modules.
//!
//! This module holds the data model every other part of the crate works on. It is produced by
//! a [`crate::provider::MetadataProvider`] and only ever read afterwards.
//!
//! # Key Components
//!
//! - [`module`] - The loaded [`module::Module`] snapshot: identity, types, resources, entry point
//! - [`typesystem`] - Type references and type descriptors
//! - [`members`] - Methods, constructors, properties, fields and events
//! - [`attributes`] - Custom attribute instances and literal values
//! - [`identity`] - Module identity and public key tokens
//! - [`flags`] - ECMA-335 attribute bits
//! - [`visibility`] - Accessibility classification tables

/// Custom attributes and literal values
pub mod attributes;
/// ECMA-335 attribute flags
pub mod flags;
/// Module identity and public key tokens
pub mod identity;
/// Member descriptors
pub mod members;
/// The loaded module snapshot
pub mod module;
/// Type references and descriptors
pub mod typesystem;
/// Accessibility classification
pub mod visibility;
