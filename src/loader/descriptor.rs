use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::AppError;

pub const CONFIG_FILE_PREFIX: &str = "route.config.";

/// One candidate module found under the modules root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub name: String,
    pub dir: PathBuf,
    /// `<name>.routes.<ext>`
    pub routes_entry: Option<PathBuf>,
    /// `route.config.<ext>`
    pub config_file: Option<PathBuf>,
}

impl ModuleDescriptor {
    pub fn has_routes_entry(&self) -> bool {
        self.routes_entry.is_some()
    }
}

/// Lists the immediate subdirectories of `root` as module candidates, sorted by name.
/// A missing root yields no modules.
pub fn discover(root: &Path) -> Result<Vec<ModuleDescriptor>, AppError> {
    if !root.is_dir() {
        tracing::info!(root = %root.display(), "no modules directory found");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(root)
        .map_err(|err| AppError::ModuleLoad(format!("read {}: {err}", root.display())))?;

    let mut modules = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(dir = %path.display(), "skipping module directory with non UTF-8 name");
            continue;
        };
        modules.push(describe_dir(name, path));
    }

    modules.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(modules)
}

fn describe_dir(name: String, dir: PathBuf) -> ModuleDescriptor {
    let routes_prefix = format!("{name}.routes.");
    let mut files: Vec<(String, PathBuf)> = match fs::read_dir(&dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let file_name = entry.file_name().to_str()?.to_string();
                Some((file_name, entry.path()))
            })
            .collect(),
        Err(err) => {
            tracing::warn!(module = %name, error = %err, "cannot read module directory");
            Vec::new()
        }
    };
    files.sort();

    let routes_entry = files
        .iter()
        .find(|(file_name, _)| has_extension_after(file_name, &routes_prefix))
        .map(|(_, path)| path.clone());
    let config_file = files
        .iter()
        .find(|(file_name, _)| has_extension_after(file_name, CONFIG_FILE_PREFIX))
        .map(|(_, path)| path.clone());

    ModuleDescriptor {
        name,
        dir,
        routes_entry,
        config_file,
    }
}

fn has_extension_after(file_name: &str, prefix: &str) -> bool {
    file_name
        .strip_prefix(prefix)
        .is_some_and(|ext| !ext.is_empty())
}
