#![allow(dead_code)]

use access_tree::{Declaration, Entry};
use proptest::prelude::*;

/// Installs a test-writer subscriber once so `RUST_LOG`-style output shows up under `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

// Keys never contain the spacer, so every generated declaration has unique scopes.
fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,5}"
}

fn arb_entry() -> impl Strategy<Value = Entry> {
    let leaf = "[a-z ]{0,16}".prop_map(Entry::Leaf);
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop::collection::vec((arb_key(), inner), 0..5)
            .prop_map(|pairs| Entry::Branch(pairs.into_iter().collect()))
    })
}

/// Arbitrary nested declarations, empty branches included.
pub fn arb_declaration() -> impl Strategy<Value = Declaration> {
    prop::collection::vec((arb_key(), arb_entry()), 0..6).prop_map(|pairs| pairs.into_iter().collect())
}

pub fn arb_prefix() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z]{1,4}(\\.[a-z]{1,4}){0,2}"]
}
