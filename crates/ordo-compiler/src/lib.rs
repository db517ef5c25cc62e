//! Build-order computation for a project: source discovery, dependency edge
//! construction, dirty partitioning, persisted build-order documents, and
//! the per-unit compile plans that consume them.

pub mod discovery;
pub mod edges;
pub mod fingerprint;
pub mod index;
pub mod oracle;
pub mod partition;
pub mod plan;
pub mod store;
pub mod unit_graph;
