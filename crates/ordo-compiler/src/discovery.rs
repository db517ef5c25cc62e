//! Discover module sources and headers under each unit's configured roots.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use ordo_core::artifact::{Artifact, ArtifactKind, Role, SourceExtensions};
use ordo_core::unit::CompilationUnit;
use ordo_util::errors::{OrdoError, OrdoResult};

/// Everything discovered for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSources {
    pub unit: String,
    pub source_roots: Vec<PathBuf>,
    pub test_roots: Vec<PathBuf>,
    pub include_roots: Vec<PathBuf>,
    /// Modules and headers, production roots first, then test roots, then
    /// include roots. Sorted by path within each root.
    pub artifacts: Vec<Artifact>,
}

/// Lists the artifacts that belong to a unit.
pub trait SourceRootEnumerator {
    fn enumerate(&self, unit: &CompilationUnit) -> OrdoResult<UnitSources>;
}

/// Walks the file system below the unit's roots.
///
/// Missing roots are skipped. Include roots contribute headers only; a
/// file reachable from several roots is reported once, for the first root.
#[derive(Debug, Clone)]
pub struct FsEnumerator {
    project_root: PathBuf,
    extensions: SourceExtensions,
    exclude: GlobSet,
}

impl FsEnumerator {
    /// `exclude` holds glob patterns matched against paths relative to
    /// `project_root`.
    pub fn new(
        project_root: impl Into<PathBuf>,
        extensions: SourceExtensions,
        exclude: &[String],
    ) -> OrdoResult<Self> {
        Ok(Self {
            project_root: project_root.into(),
            extensions,
            exclude: compile_globset(exclude)?,
        })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.project_root).unwrap_or(path);
        self.exclude.is_match(relative)
    }

    fn collect(
        &self,
        unit: &CompilationUnit,
        roots: &[PathBuf],
        role: Role,
        headers_only: bool,
        seen: &mut HashSet<PathBuf>,
        out: &mut Vec<Artifact>,
    ) {
        for root in roots {
            let mut files = Vec::new();
            collect_files_recursive(root, &mut files);
            files.sort();
            for file in files {
                let kind = self.extensions.classify(&file);
                let wanted = match kind {
                    ArtifactKind::Header => true,
                    ArtifactKind::Module => !headers_only,
                    ArtifactKind::Other => false,
                };
                if !wanted || self.is_excluded(&file) || !seen.insert(file.clone()) {
                    continue;
                }
                out.push(Artifact::new(
                    file.to_string_lossy().into_owned(),
                    kind,
                    unit.name.clone(),
                    role,
                ));
            }
        }
    }
}

impl SourceRootEnumerator for FsEnumerator {
    fn enumerate(&self, unit: &CompilationUnit) -> OrdoResult<UnitSources> {
        let mut seen = HashSet::new();
        let mut artifacts = Vec::new();
        self.collect(unit, &unit.source_roots, Role::Production, false, &mut seen, &mut artifacts);
        self.collect(unit, &unit.test_roots, Role::Test, false, &mut seen, &mut artifacts);
        self.collect(unit, &unit.include_roots, Role::Production, true, &mut seen, &mut artifacts);

        tracing::debug!("{}: discovered {} artifacts", unit.name, artifacts.len());
        Ok(UnitSources {
            unit: unit.name.clone(),
            source_roots: unit.source_roots.clone(),
            test_roots: unit.test_roots.clone(),
            include_roots: unit.include_roots.clone(),
            artifacts,
        })
    }
}

/// Enumerate every unit in order.
pub fn discover_all(
    enumerator: &dyn SourceRootEnumerator,
    units: &[CompilationUnit],
) -> OrdoResult<Vec<UnitSources>> {
    units.iter().map(|u| enumerator.enumerate(u)).collect()
}

fn compile_globset(patterns: &[String]) -> OrdoResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| OrdoError::Manifest {
            message: format!("invalid exclude pattern '{pattern}': {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        OrdoError::Manifest {
            message: format!("invalid exclude patterns: {e}"),
        }
        .into()
    })
}

fn collect_files_recursive(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            collect_files_recursive(&path, out);
        } else if file_type.is_symlink() && path.is_dir() {
            // A linked directory may point back up the tree.
            tracing::debug!("not following directory link {}", path.display());
        } else {
            out.push(path);
        }
    }
}
