//! Crawl session orchestration
//!
//! Composes layout construction, filter loading, the engine call, and
//! per-result persistence into one session:
//! `Init -> LayoutReady -> FilterLoaded -> Crawling -> Draining -> Done`,
//! aborting only from `Init` when the seed URL yields no session root.

mod runner;
mod summary;

pub use runner::SessionRunner;
pub use summary::{print_summary, SessionSummary};
