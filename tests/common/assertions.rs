//! Domain-specific assertion macros for catsearch harnesses.
//!
//! These add context-rich failure messages that make it clear which ranking
//! invariant was violated.

/// Assert that a result list contains a record with the given name.
///
/// ```rust
/// assert_found!(results, "Fortnite V-Bucks 1000");
/// ```
#[macro_export]
macro_rules! assert_found {
    ($results:expr, $name:expr) => {{
        let results: &[&catsearch::CatalogRecord] = &$results;
        let name: &str = $name;
        if !results.iter().any(|r| r.name == name) {
            panic!(
                "assert_found! failed: {:?} not in results.\n  got: {:?}",
                name,
                results.iter().map(|r| r.name.as_str()).collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that a result list does not contain a record with the given name.
#[macro_export]
macro_rules! assert_not_found {
    ($results:expr, $name:expr) => {{
        let results: &[&catsearch::CatalogRecord] = &$results;
        let name: &str = $name;
        if results.iter().any(|r| r.name == name) {
            panic!(
                "assert_not_found! failed: {:?} unexpectedly in results.\n  got: {:?}",
                name,
                results.iter().map(|r| r.name.as_str()).collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that `first` is ranked strictly ahead of `second`.
///
/// ```rust
/// assert_ranked_before!(results, "Steam Wallet Code", "Steam Wallet Code €20");
/// ```
#[macro_export]
macro_rules! assert_ranked_before {
    ($results:expr, $first:expr, $second:expr) => {{
        let results: &[&catsearch::CatalogRecord] = &$results;
        let position = |name: &str| results.iter().position(|r| r.name == name);
        match (position($first), position($second)) {
            (Some(a), Some(b)) if a < b => {}
            (a, b) => panic!(
                "assert_ranked_before! failed: {:?} at {:?}, {:?} at {:?}.\n  got: {:?}",
                $first,
                a,
                $second,
                b,
                results.iter().map(|r| r.name.as_str()).collect::<Vec<_>>()
            ),
        }
    }};
}

/// Every element of `subset` appears (by identity) in `superset`.
pub fn is_subset_by_identity<T>(subset: &[&T], superset: &[T]) -> bool {
    subset
        .iter()
        .all(|item| superset.iter().any(|candidate| std::ptr::eq(*item, candidate)))
}
