//! Stock resolution.
//!
//! Decomposition produces component SKUs; resolution turns them into the
//! quantity to publish for the row plus any unmatched diagnostics:
//!
//! - Single item: the stocked quantity, or the keep-original sentinel when
//!   the item has no stock entry.
//! - Bundle: the minimum across component quantities (the bundle can only
//!   ship as many units as its scarcest component), or a conservative zero
//!   when any component is missing.
//!
//! Unmatched SKUs are returned to the caller, never stored here; resolving
//! the same token against the same table twice yields identical output.

use super::tokenizer::decompose;
use crate::{Decomposition, Outcome, Resolution, StockTable};

/// Strings the inventory export leaves where a SKU cell was absent. These
/// are not worth reporting as unmatched.
const MISSING_PLACEHOLDERS: [&str; 2] = ["nan", "None"];

/// Resolve one listing row's token against the stock table.
///
/// ```text
/// token ──┬─ single item ─▶ Resolved(qty) | KeepOriginal (+unmatched)
///         └─ bundle      ─▶ Resolved(min) | ShortBundle  (+missing parts)
/// ```
///
/// Total function: every input yields an outcome, malformed ones included.
pub fn resolve(token: &str, table: &StockTable) -> Resolution {
    let Decomposition { components, is_bundle } = decompose(token);

    let resolution = if is_bundle {
        resolve_bundle(&components, table)
    } else {
        resolve_single(&components[0], table)
    };

    if std::env::var_os("STOCKLINE_DEBUG").is_some() {
        eprintln!(
            "[resolve] token=\"{}\" bundle={} outcome={:?} unmatched={:?}",
            token.trim(),
            is_bundle,
            resolution.outcome,
            resolution.unmatched
        );
    }

    resolution
}

fn resolve_single(sku: &str, table: &StockTable) -> Resolution {
    match table.get(sku) {
        Some(qty) => Resolution { outcome: Outcome::Resolved(qty), unmatched: Vec::new() },
        None => {
            let mut unmatched = Vec::new();
            if !sku.is_empty() && !MISSING_PLACEHOLDERS.contains(&sku) {
                unmatched.push(sku.to_string());
            }
            Resolution { outcome: Outcome::KeepOriginal, unmatched }
        }
    }
}

fn resolve_bundle(components: &[String], table: &StockTable) -> Resolution {
    let mut missing: Vec<String> = Vec::new();
    let mut scarcest: Option<u64> = None;

    for sku in components {
        match table.get(sku) {
            Some(qty) => scarcest = Some(scarcest.map_or(qty, |floor| floor.min(qty))),
            None => missing.push(sku.clone()),
        }
    }

    if missing.is_empty() {
        // A bundle has >= 2 components, so at least one lookup succeeded.
        Resolution { outcome: Outcome::Resolved(scarcest.unwrap_or(0)), unmatched: Vec::new() }
    } else {
        Resolution { outcome: Outcome::ShortBundle, unmatched: missing }
    }
}
