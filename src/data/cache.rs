use std::sync::Arc;

use super::model::{RelatedStack, RelationDataset};

/// Request token tying a related-entity lookup to the generation it was
/// issued under. A completion carrying a stale token is discarded, which
/// gives last-request-wins semantics when focal entities change quickly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

struct CacheEntry {
    focal_id: String,
    related: Arc<Vec<RelatedStack>>,
}

/// Explicit cache for the related-entity list of the current focal entity.
/// Owned by the view model and invalidated as a whole on dataset reload;
/// deliberately not a module-level static.
#[derive(Default)]
pub struct RelatedCache {
    generation: u64,
    entry: Option<CacheEntry>,
}

impl RelatedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a lookup for `focal_id`, superseding any in-flight request.
    pub fn begin_request(&mut self) -> RequestToken {
        self.generation = self.generation.wrapping_add(1);
        RequestToken(self.generation)
    }

    /// Stores a completed lookup. Returns false (and stores nothing) when a
    /// newer request was issued after `token`.
    pub fn complete(
        &mut self,
        token: RequestToken,
        focal_id: &str,
        related: Vec<RelatedStack>,
    ) -> bool {
        if token.0 != self.generation {
            log::debug!("discarding stale related-entity result for {focal_id}");
            return false;
        }

        self.entry = Some(CacheEntry {
            focal_id: focal_id.to_owned(),
            related: Arc::new(related),
        });
        true
    }

    pub fn get(&self, focal_id: &str) -> Option<Arc<Vec<RelatedStack>>> {
        self.entry
            .as_ref()
            .filter(|entry| entry.focal_id == focal_id)
            .map(|entry| Arc::clone(&entry.related))
    }

    /// Drops the cached list and invalidates outstanding tokens. Called on
    /// dataset reload.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.entry = None;
    }

    /// Cached (or freshly computed) related list for `focal_id`.
    pub fn related_for(
        &mut self,
        dataset: &RelationDataset,
        focal_id: &str,
    ) -> Arc<Vec<RelatedStack>> {
        if let Some(cached) = self.get(focal_id) {
            return cached;
        }

        let token = self.begin_request();
        let related = dataset.related(focal_id).to_vec();
        self.complete(token, focal_id, related);
        self.get(focal_id).unwrap_or_default()
    }
}
