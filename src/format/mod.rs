//! Canonical text rendering.
//!
//! Everything the query commands print goes through this module, so two commands showing the
//! same type, member or attribute always show it the same way.
//!
//! - [`types`] - canonical type names ([`std::fmt::Display`] for
//!   [`crate::metadata::typesystem::TypeRef`]), kind labels and type listing lines
//! - [`members`] - member signatures and the detailed method block
//! - [`attributes`] - attribute instances and literal values ([`std::fmt::Display`] for both)
//!
//! # Examples
//!
//! ```rust
//! use dotinspect::metadata::{attributes::{AttributeInstance, Value}, typesystem::TypeRef};
//!
//! let grid = TypeRef::array(TypeRef::named("System.Int32"), 3);
//! assert_eq!(grid.to_string(), "System.Int32[,,]");
//!
//! let obsolete = AttributeInstance::new("System.ObsoleteAttribute")
//!     .with_argument(Value::String("use Turn".to_string()));
//! assert_eq!(obsolete.to_string(), "System.ObsoleteAttribute(\"use Turn\")");
//! ```

/// Attribute and literal rendering
pub mod attributes;
/// Member signatures
pub mod members;
/// Canonical type names and labels
pub mod types;
