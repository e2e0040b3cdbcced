//! Identity rewriting: relocating auxiliary types into a subpackage.

use entigen_ir::{ArtifactKind, ClassModel, TableMetadata, TypeIdentity};
use tracing::{debug, info};

use crate::{Error, GenerationContext, Result};

/// Append `segment` to the package path of `identity`.
///
/// `com.x.model.User` rewritten with `key` becomes `com.x.model.key.User`.
///
/// # Errors
///
/// Returns [`Error::InvalidIdentity`] if the package path is empty, holds an
/// invalid segment, or `segment` itself is not a valid segment.
pub fn rewrite(identity: &TypeIdentity, segment: &str) -> Result<TypeIdentity> {
    identity
        .with_segment(segment)
        .map_err(|source| Error::invalid_identity(identity, source))
}

/// Move `model` into `segment` and register its new identity for the table.
///
/// A model already relocated into `segment` keeps its identity and is only
/// registered, so models fed back through the host are never nested twice.
pub fn relocate(
    model: &mut ClassModel,
    table: &TableMetadata,
    kind: ArtifactKind,
    segment: &str,
    ctx: &mut GenerationContext,
) -> Result<TypeIdentity> {
    if table.name.trim().is_empty() {
        return Err(Error::missing_metadata(
            &table.name,
            format!("a name to register its {} type under", kind),
        ));
    }

    if model.relocation() == Some(segment) {
        debug!(table = %table.name, %kind, identity = %model.identity(), "already relocated");
        let identity = model.identity().clone();
        ctx.register(&table.name, kind, identity.clone());
        return Ok(identity);
    }

    let relocated = rewrite(model.identity(), segment)?;
    info!(
        table = %table.name,
        %kind,
        from = %model.identity(),
        to = %relocated,
        "relocated auxiliary type"
    );

    model.relocate_to(relocated.clone(), segment);
    ctx.register(&table.name, kind, relocated.clone());
    Ok(relocated)
}
