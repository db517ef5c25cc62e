//! Project-wide lookup from declared names to artifacts.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use ordo_core::artifact::{Artifact, ArtifactId, Role};
use ordo_util::fs::normalize_path;

use crate::discovery::UnitSources;

/// Units whose artifacts a reference may resolve to: the referencing unit
/// and everything it transitively depends on.
///
/// Test artifacts are only visible from a scope opened for the test role,
/// so production code never depends on test code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionScope {
    units: BTreeSet<String>,
    tests: bool,
}

impl ResolutionScope {
    pub fn new<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            units: units.into_iter().map(Into::into).collect(),
            tests: false,
        }
    }

    /// The same units, seen from an artifact with `role`.
    pub fn for_role(mut self, role: Role) -> Self {
        self.tests = role.is_test();
        self
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.units.contains(unit)
    }

    /// Whether a reference in this scope may resolve to `artifact`.
    pub fn admits(&self, artifact: &Artifact) -> bool {
        self.contains(&artifact.unit) && (self.tests || !artifact.role.is_test())
    }

    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(String::as_str)
    }
}

/// Resolves declared names to artifacts visible in a scope.
///
/// Every matching candidate is returned; an ambiguous name yields several.
pub trait NameResolver {
    /// Module artifacts whose module name is `name`.
    fn resolve_module(&self, name: &str, scope: &ResolutionScope) -> Vec<ArtifactId>;

    /// Header artifacts an include of `name` written in `from` can refer to.
    fn resolve_include(&self, name: &str, from: &Artifact, scope: &ResolutionScope) -> Vec<ArtifactId>;
}

/// In-memory index over every discovered artifact.
#[derive(Debug, Clone, Default)]
pub struct ArtifactIndex {
    artifacts: Vec<Artifact>,
    by_path: HashMap<ArtifactId, usize>,
    modules: HashMap<String, Vec<usize>>,
    headers_by_file_name: HashMap<String, Vec<usize>>,
    include_roots: HashMap<String, Vec<PathBuf>>,
}

impl ArtifactIndex {
    /// Index the discovered sources. When two units report the same path,
    /// the first unit keeps it.
    pub fn new(sources: &[UnitSources]) -> Self {
        let mut index = Self::default();
        for unit in sources {
            index
                .include_roots
                .insert(unit.unit.clone(), unit.include_roots.clone());
            for artifact in &unit.artifacts {
                if let Some(&existing) = index.by_path.get(&artifact.path) {
                    tracing::warn!(
                        "{} is claimed by units '{}' and '{}'; keeping '{}'",
                        artifact.path,
                        index.artifacts[existing].unit,
                        artifact.unit,
                        index.artifacts[existing].unit
                    );
                    continue;
                }
                index.insert(artifact.clone());
            }
        }
        index
    }

    fn insert(&mut self, artifact: Artifact) {
        let pos = self.artifacts.len();
        self.by_path.insert(artifact.path.clone(), pos);
        if artifact.is_module() {
            if let Some(name) = artifact.module_name() {
                self.modules.entry(name.to_string()).or_default().push(pos);
            }
        } else if artifact.is_header() {
            if let Some(name) = artifact.file_name() {
                self.headers_by_file_name
                    .entry(name.to_string())
                    .or_default()
                    .push(pos);
            }
        }
        self.artifacts.push(artifact);
    }

    /// Artifacts in discovery order.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn get(&self, id: &str) -> Option<&Artifact> {
        self.by_path.get(id).map(|&i| &self.artifacts[i])
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    fn visible_header(&self, path: &Path, scope: &ResolutionScope) -> Option<&Artifact> {
        let artifact = self.get(path.to_str()?)?;
        (artifact.is_header() && scope.admits(artifact)).then_some(artifact)
    }
}

impl NameResolver for ArtifactIndex {
    fn resolve_module(&self, name: &str, scope: &ResolutionScope) -> Vec<ArtifactId> {
        let Some(candidates) = self.modules.get(name) else {
            return Vec::new();
        };
        candidates
            .iter()
            .map(|&i| &self.artifacts[i])
            .filter(|a| scope.admits(a))
            .map(|a| a.path.clone())
            .collect()
    }

    fn resolve_include(&self, name: &str, from: &Artifact, scope: &ResolutionScope) -> Vec<ArtifactId> {
        let mut found: Vec<ArtifactId> = Vec::new();
        let mut push = |id: &ArtifactId| {
            if !found.contains(id) {
                found.push(id.clone());
            }
        };

        let include = Path::new(name);
        if let Some(dir) = Path::new(&from.path).parent() {
            if let Some(a) = self.visible_header(&normalize_path(dir, include), scope) {
                push(&a.path);
            }
        }
        for unit in scope.units() {
            for root in self.include_roots.get(unit).into_iter().flatten() {
                if let Some(a) = self.visible_header(&normalize_path(root, include), scope) {
                    push(&a.path);
                }
            }
        }

        // include_lib style: "app/include/defs.hrl" names a path relative to
        // some unit, so any visible header ending with it matches.
        if include.components().count() > 1 {
            if let Some(file_name) = include.file_name().and_then(|f| f.to_str()) {
                for &i in self.headers_by_file_name.get(file_name).into_iter().flatten() {
                    let a = &self.artifacts[i];
                    if scope.admits(a) && Path::new(&a.path).ends_with(include) {
                        push(&a.path);
                    }
                }
            }
        }
        found
    }
}
