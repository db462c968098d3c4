#![no_main]

// ────────────────────────────────────────────────────────────
// Harness: declaration_json
// Arbitrary text through the JSON loader. Anything accepted must
// build a registry with one node per leaf, or be rejected as a
// duplicate scope; nothing may panic.
// ────────────────────────────────────────────────────────────

use libfuzzer_sys::fuzz_target;

use access_tree::{AccessError, Declaration, Registry};

fuzz_target!(|text: &str| {
    let Ok(decl) = Declaration::from_json_str(text) else {
        return;
    };
    let leaves = decl.leaf_count();
    match Registry::from_declaration(decl) {
        Ok(registry) => assert_eq!(registry.len(), leaves),
        Err(AccessError::DuplicateScope(_)) => {}
        Err(other) => panic!("unexpected construction error: {other}"),
    }
});
