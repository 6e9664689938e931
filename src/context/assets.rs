//! Asset byte providers.

use bytes::Bytes;
use std::collections::HashMap;

/// Hands out the bytes behind a relationship id (`r:embed`).
///
/// The engine never decodes these bytes; picture fills and picture bullets
/// just carry them along for the renderer.
pub trait AssetProvider: Sync {
    fn asset(&self, rel_id: &str) -> Option<Bytes>;
}

/// Provider for slides without media.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn asset(&self, _rel_id: &str) -> Option<Bytes> {
        None
    }
}

impl AssetProvider for HashMap<String, Bytes> {
    fn asset(&self, rel_id: &str) -> Option<Bytes> {
        self.get(rel_id).cloned()
    }
}
