#![no_main]

// ────────────────────────────────────────────────────────────
// Harness: registry_ops
// Builds a registry from an arbitrary tree, then replays an
// arbitrary sequence of grant/toggle/reset/group-toggle calls.
// Checks that the node set never changes and that `can` keeps
// agreeing with the flat state.
// ────────────────────────────────────────────────────────────

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;

use access_tree::{AccessControlOptions, AccessEditor, Declaration, Entry, Registry};

#[derive(Arbitrary, Debug)]
enum FuzzEntry {
    Leaf(String),
    Branch(Vec<(String, FuzzEntry)>),
}

#[derive(Arbitrary, Debug)]
enum Op {
    Grant(String),
    GrantNth(u8),
    Toggle(u8),
    GroupToggle(String),
    Reset,
}

#[derive(Arbitrary, Debug)]
struct Input {
    prefix: String,
    tree: Vec<(String, FuzzEntry)>,
    ops: Vec<Op>,
}

fn to_declaration(pairs: Vec<(String, FuzzEntry)>) -> Declaration {
    pairs
        .into_iter()
        .map(|(key, entry)| match entry {
            FuzzEntry::Leaf(desc) => (key, Entry::Leaf(desc)),
            FuzzEntry::Branch(inner) => (key, Entry::Branch(to_declaration(inner))),
        })
        .collect()
}

fuzz_target!(|input: Input| {
    let decl = to_declaration(input.tree);
    let opts = AccessControlOptions::default().with_prefix(input.prefix);
    // Keys may contain the spacer; duplicate scopes are a valid rejection.
    let Ok(mut registry) = Registry::new(decl.clone(), opts) else {
        return;
    };
    let len = registry.len();

    for op in input.ops {
        match op {
            Op::Grant(scope) => registry.grant([scope]),
            Op::GrantNth(n) if len > 0 => {
                let scope = registry.iter().nth(n as usize % len).map(|n| n.scope().to_string());
                registry.grant(scope);
            }
            Op::Toggle(n) if len > 0 => {
                let scope = registry.iter().nth(n as usize % len).map(|n| n.scope().to_string());
                if let Some(scope) = scope {
                    assert!(registry.toggle(&scope).is_some());
                }
            }
            Op::GroupToggle(scope) => AccessEditor::new(&mut registry).toggle(&scope, true),
            Op::Reset => registry.reset(),
            _ => {}
        }
        assert_eq!(registry.len(), len);
    }

    assert!(registry.can().same_shape(&decl));
    let granted = registry.can().leaves().into_iter().filter(|f| **f).count();
    assert_eq!(granted, registry.enabled().len());
});
