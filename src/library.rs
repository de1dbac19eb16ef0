//! Named particle effect presets with RON persistence.
//!
//! The library starts from the built-in presets and layers `<name>.pfx.ron`
//! files from the preset directory on top. It remembers what each entry
//! looked like when it was last loaded or saved, so only entries that were
//! edited since get written back.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy_particle_engine::{presets, ParticleEffectDef};
use thiserror::Error;

pub const PARTICLES_DIR: &str = "assets/particles";
pub const PRESET_EXTENSION: &str = ".pfx.ron";

/// Failures reading or writing preset files.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid preset file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("could not serialize preset '{name}': {source}")]
    Serialize {
        name: String,
        #[source]
        source: ron::Error,
    },

    #[error("no preset named '{0}'")]
    UnknownPreset(String),
}

/// Outcome of scanning a preset directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Presets loaded, in directory order.
    pub loaded: Vec<String>,
    /// Preset files that could not be read or parsed.
    pub skipped: Vec<LibraryError>,
}

/// Library of named particle effect presets.
#[derive(Resource, Default)]
pub struct ParticleLibrary {
    pub effects: HashMap<String, ParticleEffectDef>,
    /// Last loaded or saved form of each entry.
    saved: HashMap<String, ParticleEffectDef>,
}

impl ParticleLibrary {
    /// Library holding only the built-in presets, all considered clean.
    pub fn with_builtins() -> Self {
        let mut library = Self::default();
        for (name, def) in presets::default_presets() {
            library.effects.insert(name.to_string(), def);
        }
        library.mark_clean();
        library
    }

    /// Sorted preset names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.effects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted names of entries that differ from their last loaded or saved form.
    pub fn dirty(&self) -> Vec<String> {
        let mut dirty: Vec<String> = self
            .effects
            .iter()
            .filter(|(name, def)| self.saved.get(*name) != Some(*def))
            .map(|(name, _)| name.clone())
            .collect();
        dirty.sort_unstable();
        dirty
    }

    /// Treat the current contents as persisted.
    pub fn mark_clean(&mut self) {
        self.saved = self.effects.clone();
    }

    /// Load every preset file in `dir`, replacing entries of the same name.
    ///
    /// A missing directory is an empty one. Files that fail to read or parse
    /// are collected in [`LoadReport::skipped`] and leave the library as is.
    pub fn load_dir(&mut self, dir: &Path) -> Result<LoadReport, LibraryError> {
        let mut report = LoadReport::default();
        if !dir.is_dir() {
            return Ok(report);
        }

        let entries = std::fs::read_dir(dir).map_err(|source| LibraryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = preset_name(&path) else {
                continue;
            };
            match read_preset(&path) {
                Ok(def) => {
                    self.saved.insert(name.clone(), def.clone());
                    self.effects.insert(name.clone(), def);
                    report.loaded.push(name);
                }
                Err(err) => report.skipped.push(err),
            }
        }
        Ok(report)
    }

    /// Write the preset `name` to `dir` and mark it clean.
    pub fn save(&mut self, dir: &Path, name: &str) -> Result<PathBuf, LibraryError> {
        let def = self
            .effects
            .get(name)
            .ok_or_else(|| LibraryError::UnknownPreset(name.to_string()))?;
        let path = preset_path(dir, name);
        write_preset(&path, name, def)?;
        self.saved.insert(name.to_string(), def.clone());
        Ok(path)
    }
}

/// Directory presets are loaded from and saved to.
#[derive(Resource, Clone, Debug)]
pub struct ParticleLibraryDir(pub PathBuf);

impl Default for ParticleLibraryDir {
    fn default() -> Self {
        Self(PathBuf::from(PARTICLES_DIR))
    }
}

/// File path for the preset `name`. Characters that are not portable in file
/// names become `_`.
pub fn preset_path(dir: &Path, name: &str) -> PathBuf {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    dir.join(stem + PRESET_EXTENSION)
}

/// Preset name for a file in the preset directory, if it is one.
fn preset_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?.strip_suffix(PRESET_EXTENSION)?;
    (!name.is_empty()).then(|| name.to_string())
}

pub fn read_preset(path: &Path) -> Result<ParticleEffectDef, LibraryError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| LibraryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `def` as pretty RON, creating parent directories as needed.
pub fn write_preset(path: &Path, name: &str, def: &ParticleEffectDef) -> Result<(), LibraryError> {
    let text = ron::ser::to_string_pretty(def, ron::ser::PrettyConfig::default()).map_err(|source| {
        LibraryError::Serialize {
            name: name.to_string(),
            source,
        }
    })?;
    let io_err = |source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, text).map_err(io_err)
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub(crate) fn init_particle_library(
    mut library: ResMut<ParticleLibrary>,
    dir: Res<ParticleLibraryDir>,
) {
    for (name, def) in presets::default_presets() {
        library.effects.entry(name.to_string()).or_insert(def);
    }
    library.mark_clean();

    match library.load_dir(&dir.0) {
        Ok(report) => {
            for name in &report.loaded {
                info!("Loaded particle preset '{}' from disk", name);
            }
            for err in &report.skipped {
                warn!("Skipping particle preset: {}", err);
            }
        }
        Err(err) => warn!("Could not scan particle presets: {}", err),
    }
}

/// Write back presets edited since they were loaded or last saved.
pub(crate) fn save_edited_presets(
    mut library: ResMut<ParticleLibrary>,
    dir: Res<ParticleLibraryDir>,
) {
    if !library.is_changed() {
        return;
    }

    // Marking entries clean is bookkeeping, not an edit.
    let library = library.bypass_change_detection();
    for name in library.dirty() {
        match library.save(&dir.0, &name) {
            Ok(path) => debug!("Saved particle preset '{}' to {}", name, path.display()),
            Err(err) => warn!("Could not save particle preset '{}': {}", name, err),
        }
    }
}
