// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # dotinspect
//!
//! Query and document the types, members and attributes of compiled .NET modules, working
//! from their metadata alone. `dotinspect` never executes or modifies the inspected code.
//!
//! ## Features
//!
//! - **Identifier resolution** - qualified and simple names, exact before case-insensitive
//! - **Visibility filtering** - public and non-public views with per-command defaults
//! - **Deterministic output** - every listing has a fixed, documented order
//! - **Canonical signatures** - generics, arrays, `ref`/`out` parameters, defaults, attributes
//! - **Structured export** - one JSON document per module for downstream tooling
//!
//! ## Quick Start
//!
//! ```rust
//! use dotinspect::prelude::*;
//!
//! let mut module = Module::new(ModuleIdentity::new("Acme", "1.0.0.0"));
//! let mut gear = TypeDescriptor::new("Acme", "Gear", TypeAttributes::PUBLIC);
//! gear.base = Some(TypeRef::named("System.Object"));
//! module.types.push(gear);
//!
//! let provider = MemoryProvider::new();
//! provider.insert("/modules/Acme.dll", module);
//!
//! let app = Application::new(provider);
//! let (mut out, mut err) = (Vec::new(), Vec::new());
//! let status = app.run(&["/modules/Acme.dll", "inheritance", "gear"], &mut out, &mut err);
//! assert_eq!(status, 0);
//! assert_eq!(String::from_utf8(out).unwrap(), "Acme.Gear\nSystem.Object\n");
//! ```
//!
//! ## Architecture
//!
//! A command flows through four layers:
//!
//! 1. [`options`] tokenizes the arguments after the command name
//! 2. [`provider`] loads the module into a scoped [`provider::LoadContext`]
//! 3. [`query`] runs the command against a [`catalog::Catalog`] over the module
//! 4. [`format`] and [`export`] render the result as text lines or a JSON document
//!
//! The metadata itself comes from a [`provider::MetadataProvider`]. The shipped
//! [`provider::SnapshotProvider`] reads metadata snapshots, JSON documents produced by an
//! external extractor; [`provider::MemoryProvider`] serves modules built in memory.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Lookup failures carry exactly the
//! message a command prints:
//!
//! ```rust
//! use dotinspect::{catalog::Catalog, metadata::{identity::ModuleIdentity, module::Module}};
//!
//! let module = Module::new(ModuleIdentity::new("Empty", "1.0.0.0"));
//! assert!(Catalog::new(&module).find_type("Missing").is_none());
//! assert_eq!(dotinspect::Error::TypeNotFound.to_string(), "Type not found");
//! ```

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use dotinspect::prelude::*;
///
/// let module = Module::new(ModuleIdentity::new("Acme", "1.0.0.0"));
/// let catalog = Catalog::new(&module);
/// assert!(catalog.is_empty());
/// ```
pub mod prelude;

pub mod app;
pub mod catalog;
pub mod export;
pub mod format;

/// Module metadata: types, members, attributes, identity and the attribute bit sets
///
/// Everything here is plain data. A [`provider::MetadataProvider`] produces it once per
/// invocation and nothing changes it afterwards.
///
/// # Key Types
///
/// - [`metadata::module::Module`] - one loaded module
/// - [`metadata::typesystem::TypeDescriptor`] - one type defined in or referenced by it
/// - [`metadata::typesystem::TypeRef`] - a type as it appears in a signature
/// - [`metadata::members::Member`] - methods, constructors, properties, fields and events
/// - [`metadata::attributes::AttributeInstance`] - an applied custom attribute
pub mod metadata;

pub mod options;
pub mod provider;
pub mod query;

/// Case-insensitive string helpers
pub mod utils;

/// `dotinspect` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate.
///
/// # Examples
///
/// ```rust
/// use dotinspect::{Result, Error};
///
/// fn require(value: Option<&str>) -> Result<&str> {
///     value.ok_or(Error::MissingArgument("Value"))
/// }
/// assert!(require(None).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `dotinspect` Error type
///
/// The main error type for all operations in this crate, covering lookup, usage and
/// loading failures.
pub use error::Error;
