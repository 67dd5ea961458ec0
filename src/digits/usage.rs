use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::digits::multiset::DigitMultiset;

static LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+(\.[0-9]+)?").expect("literal pattern is valid")
});

/// Every numeric literal (`\d+(\.\d+)?`, ASCII digits) in `text`, in textual order.
///
/// Works on raw text, so it never fails; a fragment like `1.` yields `1`.
pub fn extract_literals(text: &str) -> Vec<f64> {
    LITERAL
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

fn count_map(values: impl IntoIterator<Item = f64>) -> HashMap<u64, usize> {
    let mut counts = HashMap::new();
    for value in values {
        *counts.entry(value.to_bits()).or_insert(0) += 1;
    }
    counts
}

/// True iff the literals of `expr` are exactly the puzzle digits as a multiset:
/// no foreign literal, no digit used more often than handed out, none left unused.
pub fn validate_usage(expr: &str, digits: &DigitMultiset) -> bool {
    let literals = extract_literals(expr);
    if literals.is_empty() && !digits.is_empty() {
        debug!("No literals in '{}'", expr);
        return false;
    }

    let used = count_map(literals);
    let available = count_map(digits.as_slice().iter().map(|&d| f64::from(d)));
    let matches = used == available;
    debug!(
        "Usage check for '{}' against [{}]: {}",
        expr, digits, matches
    );
    matches
}
