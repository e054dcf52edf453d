//! Term splitting and scoring shared by menu and order search.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Lowercase alphanumeric words of `input`, deduplicated, in first-seen order.
pub fn terms(input: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// Share of `terms` that occur as words in any of `fields`. Zero when `terms` is empty.
pub fn relevance<'a>(terms: &[String], fields: impl IntoIterator<Item = &'a str>) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }
    let words: BTreeSet<String> = fields.into_iter().flat_map(self::terms).collect();
    let matched = terms.iter().filter(|term| words.contains(*term)).count();
    matched as f64 / terms.len() as f64
}

/// Inclusive range check; absent bounds are open.
pub fn price_in_range(price: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> bool {
    min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
}
