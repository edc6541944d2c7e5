//! Query commands.
//!
//! The [`QueryEngine`] runs one [`Command`] against a loaded module. Each command reads what
//! it needs from the [`OptionSet`], works through the [`Catalog`] and renders its result with
//! [`crate::format`]. Commands build their complete output before anything is written: a
//! command either prints all of its lines to the output stream and reports status `0`, or
//! prints one error message to the error stream and reports status `1`.
//!
//! # Visibility defaults
//!
//! Commands differ in what they show when no visibility option is given:
//!
//! | Command | Default | Widened by |
//! |---------|---------|------------|
//! | `types` | all types | `--public` / `--nonpublic` narrow |
//! | `members`, `method`, `attributes --member` | public members | `--include-nonpublic`, `--nonpublic` |
//! | `implements`, `search`, `dump-json` | public types and members | `--include-nonpublic`, `--nonpublic` |
//!
//! # Examples
//!
//! ```rust
//! use dotinspect::metadata::{flags::TypeAttributes, identity::ModuleIdentity, module::Module, typesystem::TypeDescriptor};
//! use dotinspect::options::OptionSet;
//! use dotinspect::query::QueryEngine;
//!
//! let mut module = Module::new(ModuleIdentity::new("Acme", "1.0.0.0"));
//! module.types.push(TypeDescriptor::new("Acme", "Gear", TypeAttributes::PUBLIC));
//!
//! let engine = QueryEngine::new(&module);
//! let (mut out, mut err) = (Vec::new(), Vec::new());
//! let status = engine.execute("types", &OptionSet::parse(["--public"]), &mut out, &mut err);
//! assert_eq!(status, 0);
//! assert_eq!(String::from_utf8(out).unwrap(), "Acme.Gear [public] [class]\n");
//! ```

use std::{io::Write, str::FromStr};

use log::{debug, warn};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
    catalog::Catalog,
    metadata::{flags::BindingFlags, module::Module, typesystem::TypeDescriptor},
    options::OptionSet,
    Error, Result,
};

mod attrs;
mod dump;
mod hierarchy;
mod info;
mod members;
mod search;
mod types;

/// The supported commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Command {
    /// Module name, version, location, type and namespace counts
    Summary,
    /// Filtered type listing
    Types,
    /// Details of one type
    Type,
    /// Member listing of one type
    Members,
    /// Detailed lookup of one method
    Method,
    /// Base type chain of one type
    Inheritance,
    /// Types assignable to a reference type
    Implements,
    /// Free-text search over types and members
    Search,
    /// Attributes of a type or member
    Attributes,
    /// Manifest resources
    Resources,
    /// The entry point method
    Entrypoint,
    /// Structured JSON export
    DumpJson,
}

/// Runs commands against one module.
pub struct QueryEngine<'m> {
    catalog: Catalog<'m>,
}

impl<'m> QueryEngine<'m> {
    /// Create an engine over `module`.
    #[must_use]
    pub fn new(module: &'m Module) -> Self {
        QueryEngine {
            catalog: Catalog::new(module),
        }
    }

    /// The catalog commands run against.
    #[must_use]
    pub fn catalog(&self) -> &Catalog<'m> {
        &self.catalog
    }

    /// Run the named command and write its output.
    ///
    /// Returns the exit status: `0` on success, `1` if the command is unknown or failed, or if
    /// its output could not be written and flushed.
    pub fn execute(
        &self,
        command: &str,
        options: &OptionSet,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> i32 {
        let result = Command::from_str(command)
            .map_err(|_| Error::UnknownCommand(command.to_string()))
            .and_then(|command| self.run(command, options));

        let written = match &result {
            Ok(lines) => lines
                .iter()
                .try_for_each(|line| writeln!(out, "{line}"))
                .and_then(|()| out.flush()),
            Err(error) => writeln!(err, "{error}").and_then(|()| err.flush()),
        };
        if let Err(error) = written {
            warn!("failed to write command output: {error}");
            return 1;
        }

        i32::from(result.is_err())
    }

    /// Run a command and return its output lines.
    ///
    /// # Errors
    /// Returns the lookup or usage error the command failed with.
    pub fn run(&self, command: Command, options: &OptionSet) -> Result<Vec<String>> {
        debug!("running command {command}");
        let catalog = &self.catalog;

        match command {
            Command::Summary => info::summary(catalog),
            Command::Types => types::list(catalog, options),
            Command::Type => types::details(catalog, options),
            Command::Members => members::list(catalog, options),
            Command::Method => members::method(catalog, options),
            Command::Inheritance => hierarchy::inheritance(catalog, options),
            Command::Implements => hierarchy::implements(catalog, options),
            Command::Search => search::search(catalog, options),
            Command::Attributes => attrs::attributes(catalog, options),
            Command::Resources => info::resources(catalog),
            Command::Entrypoint => info::entry_point(catalog),
            Command::DumpJson => dump::dump_json(catalog, options),
        }
    }
}

/// `--include-nonpublic` or `--nonpublic`
fn include_non_public(options: &OptionSet) -> bool {
    options.has("include-nonpublic") || options.has("nonpublic")
}

/// Member selection mask for the visibility options.
fn binding_flags(options: &OptionSet) -> BindingFlags {
    BindingFlags::for_visibility(include_non_public(options))
}

/// The type named by `--type`, or else by the first positional token.
///
/// Also returns the positional tokens not consumed by the type.
fn type_with_remainder<'m>(
    catalog: &Catalog<'m>,
    options: &OptionSet,
) -> (Option<&'m TypeDescriptor>, Vec<String>) {
    let mut remainder = options.positional().to_vec();
    let identifier = match options.get("type").filter(|value| !value.trim().is_empty()) {
        Some(identifier) => Some(identifier.to_string()),
        None if !remainder.is_empty() => Some(remainder.remove(0)),
        None => None,
    };

    let ty = identifier.and_then(|identifier| catalog.find_type(&identifier));
    (ty, remainder)
}

/// The first of `keys` with a value, else the first positional token.
fn identifier<'o>(options: &'o OptionSet, keys: &[&str]) -> Option<&'o str> {
    options
        .first_of(keys)
        .or_else(|| options.positional().first().map(String::as_str))
}

/// Resolve the type named by the first of `keys`, else by the first positional token.
fn resolve_type<'m>(
    catalog: &Catalog<'m>,
    options: &OptionSet,
    keys: &[&str],
) -> Result<&'m TypeDescriptor> {
    identifier(options, keys)
        .and_then(|identifier| catalog.find_type(identifier))
        .ok_or(Error::TypeNotFound)
}
