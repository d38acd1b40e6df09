use stockline::{Outcome, ReconcileResult};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// How many distinct unmatched SKUs to show before truncating.
const UNMATCHED_DISPLAY_LIMIT: usize = 10;

/// Print the run report to stderr (stdout carries the quantity column).
pub fn print_run(run: &ReconcileResult, stock_entries: usize, color: bool) {
    let palette = ansi::Palette::new(color);

    let mut updated = 0usize;
    let mut kept = 0usize;
    let mut short = 0usize;
    for outcome in &run.outcomes {
        match outcome {
            Outcome::Resolved(_) => updated += 1,
            Outcome::KeepOriginal => kept += 1,
            Outcome::ShortBundle => short += 1,
        }
    }

    eprintln!("\n{}", palette.paint("━━━ Reconciliation ━━━", ansi::GRAY));
    eprintln!(
        "  Rows: {}  │  Updated: {}  │  Kept original: {}  │  Short bundles: {}",
        palette.bold(run.outcomes.len().to_string()),
        palette.paint(updated.to_string(), ansi::GREEN),
        palette.paint(kept.to_string(), ansi::YELLOW),
        if short > 0 {
            palette.paint(short.to_string(), ansi::YELLOW)
        } else {
            palette.dim(short.to_string())
        },
    );
    eprintln!(
        "  Stock entries: {}  │  Elapsed: {}",
        palette.paint(stock_entries.to_string(), ansi::CYAN),
        palette.dim(format!("{:?}", run.elapsed)),
    );

    if run.unmatched.is_empty() {
        eprintln!("  {}", palette.paint("✓ every SKU matched", ansi::GREEN));
        eprintln!();
        return;
    }

    eprintln!("\n{}", palette.paint("━━━ Unmatched SKUs ━━━", ansi::GRAY));
    let distinct = dedup_preserving_order(&run.unmatched);
    for sku in distinct.iter().take(UNMATCHED_DISPLAY_LIMIT) {
        eprintln!("  {} {}", palette.paint("✗", ansi::YELLOW), sku);
    }
    if distinct.len() > UNMATCHED_DISPLAY_LIMIT {
        eprintln!("  {}", palette.dim(format!("... +{} more", distinct.len() - UNMATCHED_DISPLAY_LIMIT)));
    }
    eprintln!("  {}", palette.dim("(single items kept their original quantity; bundles were zeroed)"));
    eprintln!();
}

/// First-seen-order deduplication for display. The engine deliberately
/// reports duplicates; collapsing them is presentation-only.
fn dedup_preserving_order(unmatched: &[String]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    unmatched.iter().map(String::as_str).filter(|sku| seen.insert(*sku)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let unmatched: Vec<String> =
            ["B-1", "A-1", "B-1", "C-1", "A-1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(dedup_preserving_order(&unmatched), vec!["B-1", "A-1", "C-1"]);
    }
}
