use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use ordo_util::errors::OrdoError;
use ordo_util::fs::normalize_path;

use crate::artifact::SourceExtensions;
use crate::unit::CompilationUnit;

/// The parsed representation of an `Ordo.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project: ProjectMetadata,

    /// Compilation units keyed by their unique name.
    #[serde(default)]
    pub unit: BTreeMap<String, UnitManifest>,
}

/// Project identity and project-wide settings from the `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,

    /// Transform modules applied to every module source of every unit.
    #[serde(default, rename = "global-transforms")]
    pub global_transforms: Vec<String>,

    #[serde(default = "default_module_extensions", rename = "module-extensions")]
    pub module_extensions: Vec<String>,

    #[serde(default = "default_header_extensions", rename = "header-extensions")]
    pub header_extensions: Vec<String>,

    /// Glob patterns (relative to the project root) skipped during discovery.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_module_extensions() -> Vec<String> {
    vec!["erl".to_string()]
}

fn default_header_extensions() -> Vec<String> {
    vec!["hrl".to_string()]
}

/// One compilation unit from a `[unit.<name>]` table.
///
/// All paths are relative to the manifest directory. Omitted roots default
/// to the conventional layout under `root` (`src`, `test`, `include`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitManifest {
    /// Unit content root. Defaults to a directory named after the unit.
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub sources: Option<Vec<PathBuf>>,

    #[serde(default)]
    pub tests: Option<Vec<PathBuf>>,

    #[serde(default)]
    pub include: Option<Vec<PathBuf>>,

    /// Names of units this unit can see and must be built after.
    #[serde(default, rename = "depends-on")]
    pub depends_on: Vec<String>,

    /// Transform modules applied to every module source of this unit.
    #[serde(default, rename = "global-transforms")]
    pub global_transforms: Vec<String>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default, rename = "test-output")]
    pub test_output: Option<PathBuf>,
}

impl Manifest {
    /// Load, parse and validate an `Ordo.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| OrdoError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let manifest = Self::from_str(&content)?;
        tracing::debug!(
            "loaded {} ({} units)",
            path.display(),
            manifest.unit.len()
        );
        Ok(manifest)
    }

    /// Parse and validate an `Ordo.toml` from a string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        let manifest: Self = toml::from_str(content).map_err(|e| OrdoError::Manifest {
            message: format!("Failed to parse Ordo.toml: {e}"),
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check unit names and `depends-on` references.
    ///
    /// Unit names end up in persisted file names, so they are restricted to
    /// `[A-Za-z0-9_.-]`.
    pub fn validate(&self) -> miette::Result<()> {
        if self.unit.is_empty() {
            return Err(OrdoError::Manifest {
                message: "at least one [unit.<name>] table is required".to_string(),
            }
            .into());
        }
        for (name, unit) in &self.unit {
            if !is_valid_unit_name(name) {
                return Err(OrdoError::Manifest {
                    message: format!(
                        "invalid unit name '{name}': only letters, digits, '_', '-' and '.' are allowed"
                    ),
                }
                .into());
            }
            let mut seen = BTreeSet::new();
            for dep in &unit.depends_on {
                if dep == name {
                    return Err(OrdoError::Manifest {
                        message: format!("unit '{name}' cannot depend on itself"),
                    }
                    .into());
                }
                if !self.unit.contains_key(dep) {
                    return Err(OrdoError::Manifest {
                        message: format!("unit '{name}' depends on unknown unit '{dep}'"),
                    }
                    .into());
                }
                if !seen.insert(dep) {
                    return Err(OrdoError::Manifest {
                        message: format!("unit '{name}' lists '{dep}' in depends-on twice"),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Extensions used to classify discovered files.
    pub fn extensions(&self) -> SourceExtensions {
        SourceExtensions {
            module: self.project.module_extensions.clone(),
            header: self.project.header_extensions.clone(),
        }
    }

    /// Resolve every unit against `project_root`, in name order.
    pub fn units(&self, project_root: &Path) -> Vec<CompilationUnit> {
        self.unit
            .iter()
            .map(|(name, unit)| self.resolve_unit(project_root, name, unit))
            .collect()
    }

    fn resolve_unit(&self, project_root: &Path, name: &str, unit: &UnitManifest) -> CompilationUnit {
        let root = normalize_path(
            project_root,
            unit.root.as_deref().unwrap_or_else(|| Path::new(name)),
        );
        let roots = |declared: &Option<Vec<PathBuf>>, conventional: &str| -> Vec<PathBuf> {
            match declared {
                Some(paths) => paths
                    .iter()
                    .map(|p| normalize_path(project_root, p))
                    .collect(),
                None => vec![root.join(conventional)],
            }
        };

        let mut global_transforms = self.project.global_transforms.clone();
        for t in &unit.global_transforms {
            if !global_transforms.contains(t) {
                global_transforms.push(t.clone());
            }
        }

        let build_dir = project_root.join("_build").join(name);
        CompilationUnit {
            name: name.to_string(),
            source_roots: roots(&unit.sources, "src"),
            test_roots: roots(&unit.tests, "test"),
            include_roots: roots(&unit.include, "include"),
            root,
            depends_on: unit.depends_on.clone(),
            global_transforms,
            output_dir: unit
                .output
                .as_deref()
                .map(|p| normalize_path(project_root, p))
                .unwrap_or_else(|| build_dir.join("ebin")),
            test_output_dir: unit
                .test_output
                .as_deref()
                .map(|p| normalize_path(project_root, p))
                .unwrap_or_else(|| build_dir.join("test")),
        }
    }
}

fn is_valid_unit_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
