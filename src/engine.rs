//! SKU decomposition and stock resolution.
//!
//! This module is the reconciliation core. It is purely computational: no
//! I/O, no shared state, every function total and deterministic. Loading the
//! two tabular inputs and writing the output column back is the caller's
//! business (see `src/ingest.rs` on the binary side).
//!
//! ## How the parts work together
//!
//! Each listing row passes through a two-stage pipeline:
//!
//! ```text
//! raw token ── decompose ──▶ Decomposition     (tokenizer.rs)
//!                              - split code/size on the first '-'
//!                              - partition code into 6-char segments
//!                              - classify single item vs bundle
//!                              │
//!                              v
//!            stock table ── resolve ──▶ Resolution   (resolver.rs)
//!                              - single item: lookup or keep-original
//!                              - bundle: min across components, or a
//!                                conservative zero when any is missing
//!                              - collect unmatched SKUs
//! ```
//!
//! There is no fatal path anywhere in the pipeline: malformed tokens
//! degrade to a single opaque component, and failed lookups degrade to the
//! keep-original sentinel or the conservative zero. Every row always yields
//! a renderable value, so the output column always matches the input row
//! count.
//!
//! ## Debugging
//!
//! Set `STOCKLINE_DEBUG=1` to print a per-row resolution trace.

#[path = "engine/resolver.rs"]
mod resolver;
#[path = "engine/tokenizer.rs"]
mod tokenizer;

pub use resolver::resolve;
pub use tokenizer::{MAX_BUNDLE_COMPONENTS, SEGMENT_LEN, decompose, decompose_with_limit};
