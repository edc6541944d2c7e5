//! Command-line option parsing.
//!
//! [`OptionSet`] turns the tokens following the command name into keyed values and unkeyed
//! positional tokens:
//!
//! - `--key` or `-key` starts an option and records the value `true` for it
//! - the next token that is not itself an option replaces that `true` with a real value
//! - any other token is positional
//! - blank tokens are skipped
//!
//! Keys are case-insensitive. Each occurrence of a key appends a value, so repeated options
//! keep every value in order while single-value reads see the most recent one.
//!
//! # Examples
//!
//! ```rust
//! use dotinspect::options::OptionSet;
//!
//! let options = OptionSet::parse(["Acme.Gear", "--kind", "methods", "--Kind", "fields", "--nonpublic"]);
//! assert_eq!(options.get("kind"), Some("fields"));
//! assert_eq!(options.get_all("KIND").collect::<Vec<_>>(), vec!["methods", "fields"]);
//! assert_eq!(options.get("nonpublic"), Some("true"));
//! assert_eq!(options.positional(), ["Acme.Gear"]);
//! ```

use std::collections::HashMap;

/// Parsed options of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: HashMap<String, Vec<String>>,
    positional: Vec<String>,
}

impl OptionSet {
    /// Parse the given tokens.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = OptionSet::default();
        let mut pending: Option<String> = None;

        for token in args {
            let token = token.as_ref();
            if token.trim().is_empty() {
                continue;
            }

            if let Some(key) = option_key(token) {
                let key = key.to_lowercase();
                options.values.entry(key.clone()).or_default().push("true".to_string());
                pending = Some(key);
                continue;
            }

            match pending.take() {
                Some(key) => {
                    if let Some(last) = options.values.get_mut(&key).and_then(|list| list.last_mut()) {
                        *last = token.to_string();
                    }
                }
                None => options.positional.push(token.to_string()),
            }
        }

        options
    }

    /// Returns `true` if the option occurred at least once, with or without a value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(&key.to_lowercase())
    }

    /// The most recent value of an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_lowercase())
            .and_then(|list| list.last())
            .map(String::as_str)
    }

    /// Every value of an option, in the order given.
    pub fn get_all(&self, key: &str) -> impl Iterator<Item = &str> {
        self.values
            .get(&key.to_lowercase())
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// The first of several option names that carries a non-blank value.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.trim().is_empty())
    }

    /// Unkeyed tokens, in order.
    #[must_use]
    pub fn positional(&self) -> &[String] {
        &self.positional
    }
}

/// The key of an option token, or `None` for value tokens.
fn option_key(token: &str) -> Option<&str> {
    if let Some(key) = token.strip_prefix("--") {
        if !key.is_empty() {
            return Some(key);
        }
    }

    token.strip_prefix('-').filter(|key| !key.is_empty())
}
