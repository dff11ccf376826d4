//! Stamps out new route modules from the embedded templates.
//!
//! A module is six files under `src/modules/<name>/`: model, service, controller,
//! routes entry, validation and `route.config.toml`. The `model`, `service` and
//! `controller` targets write a single file into the same directory.

use std::path::PathBuf;

use thiserror::Error;

pub mod interactive;
pub mod names;
pub mod templates;
pub mod writer;

pub use templates::Artifact;
pub use writer::{registration_hint, ModuleWriter, WriteOutcome};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("{0}")]
    InvalidName(String),
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("input closed before an answer was given")]
    Aborted,
}

/// What a generator invocation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Module,
    Model,
    Service,
    Controller,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Module => "module",
            Target::Model => "model",
            Target::Service => "service",
            Target::Controller => "controller",
        }
    }

    pub fn artifacts(self) -> &'static [Artifact] {
        match self {
            Target::Module => &Artifact::ALL,
            Target::Model => &[Artifact::Model],
            Target::Service => &[Artifact::Service],
            Target::Controller => &[Artifact::Controller],
        }
    }
}

/// Validates `raw_name` and writes every artifact of `target`.
pub fn generate(
    writer: &ModuleWriter,
    target: Target,
    raw_name: &str,
) -> Result<(String, Vec<WriteOutcome>), GeneratorError> {
    let name = names::validate_name(raw_name)?;
    let outcomes = writer.write(&name, target.artifacts())?;
    Ok((name, outcomes))
}
