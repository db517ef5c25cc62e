//! What the compile phase of one unit has to do.
//!
//! Reads the unit's build-order document. Without one, the whole unit is
//! rebuilt from its source roots.

use std::fmt;
use std::path::PathBuf;

use ordo_core::artifact::Role;
use ordo_core::unit::CompilationUnit;
use ordo_util::errors::OrdoResult;

use crate::discovery::SourceRootEnumerator;
use crate::store::BuildOrderStore;
use crate::unit_graph::UnitGraph;

/// Where a plan's file list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOrigin {
    /// The unit's build-order document.
    Persisted,
    /// No usable document; every module under the unit's roots.
    FullRebuild,
}

impl fmt::Display for PlanOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanOrigin::Persisted => f.write_str("incremental"),
            PlanOrigin::FullRebuild => f.write_str("full rebuild"),
        }
    }
}

/// Input for an external compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitCompilePlan {
    pub unit: String,
    pub role: Role,
    /// Module sources to compile, in order.
    pub files: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub code_path: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub origin: PlanOrigin,
}

impl UnitCompilePlan {
    pub fn is_up_to_date(&self) -> bool {
        self.origin == PlanOrigin::Persisted && self.files.is_empty()
    }
}

/// Plan the production or test step of `unit`.
///
/// The test step compiles the production list followed by the test list.
pub fn plan_unit(
    unit: &CompilationUnit,
    role: Role,
    store: &BuildOrderStore,
    units: &UnitGraph,
    enumerator: &dyn SourceRootEnumerator,
) -> OrdoResult<UnitCompilePlan> {
    let (files, origin) = match store.read_order(&unit.name) {
        Some(order) => {
            let files = match role {
                Role::Production => order.production,
                Role::Test => order.with_tests(),
            };
            (files.into_iter().map(PathBuf::from).collect(), PlanOrigin::Persisted)
        }
        None => {
            tracing::warn!(
                "{}: no build order found, unit will be fully rebuilt",
                unit.name
            );
            let sources = enumerator.enumerate(unit)?;
            let files = sources
                .artifacts
                .iter()
                .filter(|a| a.is_module() && (role.is_test() || !a.role.is_test()))
                .map(|a| PathBuf::from(&a.path))
                .collect();
            (files, PlanOrigin::FullRebuild)
        }
    };

    Ok(UnitCompilePlan {
        unit: unit.name.clone(),
        role,
        files,
        include_dirs: units.include_dirs(&unit.name),
        code_path: units.code_path(&unit.name, role),
        output_dir: unit.output_for(role).clone(),
        origin,
    })
}
