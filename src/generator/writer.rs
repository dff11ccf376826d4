use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::generator::{
    names::capitalize,
    templates::{Artifact, Renderer},
    GeneratorError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created(PathBuf),
    Overwritten(PathBuf),
    Skipped(PathBuf),
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Created(path)
            | WriteOutcome::Overwritten(path)
            | WriteOutcome::Skipped(path) => path,
        }
    }
}

/// Renders artifacts into `<root>/src/modules/<name>/`.
pub struct ModuleWriter {
    root: PathBuf,
    overwrite: bool,
    renderer: Renderer,
}

impl ModuleWriter {
    pub fn new(root: impl Into<PathBuf>, overwrite: bool) -> Result<Self, GeneratorError> {
        Ok(Self {
            root: root.into(),
            overwrite,
            renderer: Renderer::new()?,
        })
    }

    pub fn module_dir(&self, name: &str) -> PathBuf {
        self.root.join("src").join("modules").join(name)
    }

    pub fn write(&self, name: &str, artifacts: &[Artifact]) -> Result<Vec<WriteOutcome>, GeneratorError> {
        let dir = self.module_dir(name);
        fs::create_dir_all(&dir).map_err(|source| GeneratorError::Io {
            path: dir.clone(),
            source,
        })?;

        artifacts
            .iter()
            .map(|artifact| {
                let path = dir.join(artifact.file_name(name));
                let existed = path.exists();
                if existed && !self.overwrite {
                    tracing::debug!(path = %path.display(), "keeping existing file");
                    return Ok(WriteOutcome::Skipped(path));
                }
                let content = self.renderer.render(*artifact, name)?;
                fs::write(&path, content).map_err(|source| GeneratorError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(if existed {
                    WriteOutcome::Overwritten(path)
                } else {
                    WriteOutcome::Created(path)
                })
            })
            .collect()
    }
}

/// Lines to paste into `src/modules/mod.rs` so the loader can mount the module.
pub fn registration_hint(name: &str) -> String {
    format!(
        "#[path = \"{name}/{name}.routes.rs\"]\npub mod {name};\n\n// in builtin_registry():\n    .with({name}::{}Module)",
        capitalize(name)
    )
}
