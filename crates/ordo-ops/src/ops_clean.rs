//! Operation: remove persisted build orders and fingerprints.

use ordo_compiler::fingerprint;
use ordo_util::errors::OrdoError;

use crate::ProjectContext;

/// Remove the build-order store and the fingerprint snapshot so the next
/// pass starts from a full rebuild.
pub fn clean(ctx: &ProjectContext) -> miette::Result<CleanResult> {
    let fingerprints = fingerprint::storage_path(&ctx.state_dir);
    let had_store = ctx.store.dir().exists();
    let had_fingerprints = fingerprints.exists();
    if !had_store && !had_fingerprints {
        return Ok(CleanResult::NothingToClean);
    }

    ctx.store.clear().map_err(OrdoError::Io)?;
    if had_fingerprints {
        std::fs::remove_file(&fingerprints).map_err(OrdoError::Io)?;
    }
    Ok(CleanResult::Cleaned)
}

/// Result of a clean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanResult {
    Cleaned,
    NothingToClean,
}
