//! Resolving many slides at once.
//!
//! Resolution never mutates its input, so independent slides can be spread
//! over rayon's thread pool. Each call of the closure builds its own
//! resolvers and counters.

use crate::context::StyleContext;
use rayon::prelude::*;

/// Minimum number of slides to justify parallel processing overhead.
const PARALLEL_THRESHOLD: usize = 4;

/// Map `f` over `contexts`, in parallel for larger decks. Results keep the
/// order of `contexts`.
pub fn resolve_slides<'a, T, F>(contexts: &[StyleContext<'a>], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&StyleContext<'a>) -> T + Sync + Send,
{
    if contexts.len() < PARALLEL_THRESHOLD {
        return contexts.iter().map(f).collect();
    }
    tracing::debug!(slides = contexts.len(), "resolving slides in parallel");
    contexts.par_iter().map(f).collect()
}
