//! Split the dirty part of the global build order into per-unit work lists.

use std::collections::HashMap;
use std::ops::Index;
use std::path::{Path, PathBuf};

use ordo_core::artifact::{ArtifactId, ArtifactKind, Role, SourceExtensions};
use ordo_core::unit::CompilationUnit;
use ordo_graph::DirtySet;
use ordo_util::errors::OrdoError;

use crate::store::BuildOrder;

/// A module root and the unit and role it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    pub path: PathBuf,
    pub unit: String,
    pub role: Role,
}

/// Production and test roots of every unit.
pub fn source_roots(units: &[CompilationUnit]) -> Vec<SourceRoot> {
    let mut roots = Vec::new();
    for unit in units {
        for role in [Role::Production, Role::Test] {
            for path in unit.roots_for(role) {
                roots.push(SourceRoot {
                    path: path.clone(),
                    unit: unit.name.clone(),
                    role,
                });
            }
        }
    }
    roots
}

/// Production, test and include roots of every unit. Include roots count as
/// production.
pub fn content_roots(units: &[CompilationUnit]) -> Vec<SourceRoot> {
    let mut roots = source_roots(units);
    for unit in units {
        for path in &unit.include_roots {
            roots.push(SourceRoot {
                path: path.clone(),
                unit: unit.name.clone(),
                role: Role::Production,
            });
        }
    }
    roots
}

/// The root that contains `path` with the most path components.
pub fn owning_root<'a>(path: &Path, roots: &'a [SourceRoot]) -> Option<&'a SourceRoot> {
    roots
        .iter()
        .filter(|r| path.starts_with(&r.path))
        .max_by_key(|r| r.path.components().count())
}

/// Reorder a topological `order` so that files of earlier entries of
/// `units` come first. Files of one unit keep their relative order.
///
/// The result is still topological because a file only depends on files
/// of its own unit or of units it depends on, which sort earlier. Files
/// outside every root keep their place relative to each other at the end.
pub fn unit_major<'a, I>(order: Vec<ArtifactId>, roots: &[SourceRoot], units: I) -> Vec<ArtifactId>
where
    I: IntoIterator<Item = &'a CompilationUnit>,
{
    let rank: HashMap<&str, usize> = units
        .into_iter()
        .enumerate()
        .map(|(i, u)| (u.name.as_str(), i))
        .collect();
    let mut ranked: Vec<(usize, ArtifactId)> = order
        .into_iter()
        .map(|path| {
            let r = owning_root(Path::new(&path), roots)
                .and_then(|root| rank.get(root.unit.as_str()).copied())
                .unwrap_or(usize::MAX);
            (r, path)
        })
        .collect();
    ranked.sort_by_key(|(r, _)| *r);
    ranked.into_iter().map(|(_, path)| path).collect()
}

/// Per-unit build orders, in the order the units were given to
/// [`partition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitOrders {
    entries: Vec<(String, BuildOrder)>,
}

impl UnitOrders {
    pub fn get(&self, unit: &str) -> Option<&BuildOrder> {
        self.entries.iter().find(|(name, _)| name == unit).map(|(_, o)| o)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BuildOrder)> {
        self.entries.iter().map(|(name, o)| (name.as_str(), o))
    }

    pub fn values(&self) -> impl Iterator<Item = &BuildOrder> {
        self.entries.iter().map(|(_, o)| o)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Production lists of every unit, one after the other.
    pub fn production(&self) -> Vec<ArtifactId> {
        self.values().flat_map(|o| o.production.iter().cloned()).collect()
    }

    fn entry(&mut self, unit: &str) -> &mut BuildOrder {
        let pos = match self.entries.iter().position(|(name, _)| name == unit) {
            Some(pos) => pos,
            None => {
                self.entries.push((unit.to_string(), BuildOrder::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }
}

impl Index<&str> for UnitOrders {
    type Output = BuildOrder;

    fn index(&self, unit: &str) -> &BuildOrder {
        match self.get(unit) {
            Some(order) => order,
            None => panic!("no build order for unit '{unit}'"),
        }
    }
}

/// Bucket dirty modules of `order` by unit and role, keeping their relative
/// order. Every unit in `units` gets an entry, empty when nothing is dirty,
/// and entries follow the order of `units`.
///
/// A dirty module outside every root is an internal error: all artifacts
/// come from the same roots.
pub fn partition<'a, I>(
    order: &[ArtifactId],
    dirty: &DirtySet<ArtifactId>,
    extensions: &SourceExtensions,
    roots: &[SourceRoot],
    units: I,
) -> Result<UnitOrders, OrdoError>
where
    I: IntoIterator<Item = &'a CompilationUnit>,
{
    let mut orders = UnitOrders {
        entries: units
            .into_iter()
            .map(|u| (u.name.clone(), BuildOrder::default()))
            .collect(),
    };
    if dirty.is_empty() {
        return Ok(orders);
    }

    for path in order {
        if !dirty.contains(path) || extensions.classify(Path::new(path)) != ArtifactKind::Module {
            continue;
        }
        let root = owning_root(Path::new(path), roots)
            .ok_or_else(|| OrdoError::SourceRootMismatch { path: path.clone() })?;
        let entry = orders.entry(&root.unit);
        match root.role {
            Role::Production => entry.production.push(path.clone()),
            Role::Test => entry.test.push(path.clone()),
        }
    }
    Ok(orders)
}
