//! Command-line application.
//!
//! [`Application`] is everything the `dotinspect` binary does, minus process setup: it checks
//! the argument count, loads the module through a [`MetadataProvider`] inside a
//! [`LoadContext`], runs the command and reports the exit status. Output goes to the writers
//! passed in, so the whole flow runs in tests against in-memory buffers.
//!
//! ```text
//! dotinspect <modulePath> <command> [options...]
//! ```

use std::{io::Write, path::Path};

use anyhow::Context;
use log::{debug, warn};
use strum::IntoEnumIterator;

use crate::{
    options::OptionSet,
    provider::{LoadContext, MetadataProvider},
    query::{Command, QueryEngine},
};

/// The `dotinspect` command-line application over a metadata provider.
pub struct Application<P: MetadataProvider> {
    provider: P,
}

impl<P: MetadataProvider> Application<P> {
    /// Create an application loading modules through `provider`.
    pub fn new(provider: P) -> Self {
        Application { provider }
    }

    /// The provider modules are loaded through.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run one invocation.
    ///
    /// `args` are the command-line arguments without the program name: the module path, the
    /// command and its options. Returns the process exit status.
    pub fn run<S: AsRef<str>>(&self, args: &[S], out: &mut dyn Write, err: &mut dyn Write) -> i32 {
        if args.len() < 2 {
            if let Err(error) = write_usage(out) {
                warn!("failed to write usage: {error}");
            }
            return 1;
        }

        let path = Path::new(args[0].as_ref());
        let command = args[1].as_ref().trim().to_lowercase();
        let options = OptionSet::parse(&args[2..]);

        let context = match LoadContext::open(&self.provider, path)
            .with_context(|| format!("failed to load module: {}", path.display()))
        {
            Ok(context) => context,
            Err(error) => {
                debug!("{error:?}");
                if let Err(error) = writeln!(err, "{error:#}") {
                    warn!("failed to write error: {error}");
                }
                return 1;
            }
        };

        QueryEngine::new(context.module()).execute(&command, &options, out, err)
    }
}

/// The usage text: synopsis and every command name.
#[must_use]
pub fn usage() -> Vec<String> {
    let commands: Vec<&'static str> = Command::iter().map(Into::into).collect();
    vec![
        "Usage: dotinspect <modulePath> <command> [options]".to_string(),
        format!("Commands: {}", commands.join(", ")),
    ]
}

fn write_usage(out: &mut dyn Write) -> std::io::Result<()> {
    for line in usage() {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
