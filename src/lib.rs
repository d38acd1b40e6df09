extern crate self as stockline;

#[macro_use]
mod macros;
mod api;
mod engine;
mod table;

pub use api::{ReconcileResult, fill_column, reconcile};
pub use engine::{MAX_BUNDLE_COMPONENTS, SEGMENT_LEN, decompose, decompose_with_limit, resolve};
pub use table::StockTable;

// --- Core types -------------------------------------------------------------

/// The component breakdown of one listing SKU token.
///
/// Marketplace templates encode bundles by concatenating fixed-width
/// component codes before the size suffix (`ABC123DEF456-M` is the bundle of
/// `ABC123-M` and `DEF456-M`). A `Decomposition` recovers the real inventory
/// SKUs a listing consumes; tokens that don't follow the bundle encoding
/// decompose to a single opaque component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    /// Component SKUs in code order, each of the form `<code>-<size>`.
    /// Always non-empty: malformed tokens yield the whole token as the
    /// single component.
    pub components: Vec<String>,
    /// True only when the token split into two or more valid segments.
    pub is_bundle: bool,
}

/// What the resolver decided for one listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Stock was found for the item (or for every bundle component; the
    /// value is then the minimum across components).
    Resolved(u64),
    /// The single item had no stock entry; the caller should keep the
    /// row's pre-existing published quantity.
    KeepOriginal,
    /// A bundle was missing at least one component. Publishing anything
    /// above zero could oversell, so the quantity is forced to zero.
    ShortBundle,
}

impl Outcome {
    /// Render the outcome as a quantity-column cell.
    ///
    /// `KeepOriginal` renders as the empty string; callers substitute the
    /// row's original value (see [`fill_column`]).
    pub fn column_value(&self) -> String {
        match self {
            Outcome::Resolved(qty) => qty.to_string(),
            Outcome::KeepOriginal => String::new(),
            Outcome::ShortBundle => "0".to_string(),
        }
    }
}

/// Full result of resolving one listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// SKUs that failed lookup, in component order. Empty when everything
    /// resolved. The caller accumulates these across rows; duplicates are
    /// deliberately preserved.
    pub unmatched: Vec<String>,
}

impl Resolution {
    /// Shorthand for `self.outcome.column_value()`.
    pub fn column_value(&self) -> String {
        self.outcome.column_value()
    }
}
