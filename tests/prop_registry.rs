mod common;

use std::collections::HashSet;

use access_tree::{AccessControlOptions, Registry};
use proptest::prelude::*;

fn build(decl: access_tree::Declaration, prefix: &str) -> Registry {
    Registry::new(decl, AccessControlOptions::default().with_prefix(prefix)).unwrap()
}

proptest! {
    /// One node per description leaf.
    #[test]
    fn prop_node_count_equals_leaf_count(decl in common::arb_declaration(), prefix in common::arb_prefix()) {
        let leaves = decl.leaf_count();
        let registry = build(decl, &prefix);
        prop_assert_eq!(registry.len(), leaves);
    }

    /// Scope strings are pairwise distinct and all carry the prefix.
    #[test]
    fn prop_scopes_unique(decl in common::arb_declaration(), prefix in common::arb_prefix()) {
        let registry = build(decl, &prefix);
        let scopes: HashSet<&str> = registry.iter().map(|n| n.scope()).collect();
        prop_assert_eq!(scopes.len(), registry.len());
        if !prefix.is_empty() {
            let lead = format!("{prefix}.");
            prop_assert!(registry.iter().all(|n| n.scope().starts_with(&lead)));
        }
    }

    /// Resetting twice leaves exactly the configured defaults enabled.
    #[test]
    fn prop_reset_idempotent(decl in common::arb_declaration(), pick in any::<prop::sample::Index>()) {
        let all = decl.scopes("", ".");
        let default: Vec<String> = if all.is_empty() { Vec::new() } else { vec![all[pick.index(all.len())].clone()] };
        let mut registry = Registry::new(decl, AccessControlOptions::default().with_default(default.clone())).unwrap();

        registry.grant(&all);
        registry.reset();
        let once: Vec<String> = registry.enabled().iter().map(|n| n.scope().to_string()).collect();
        registry.reset();
        let twice: Vec<String> = registry.enabled().iter().map(|n| n.scope().to_string()).collect();

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once, default);
    }

    /// Granting one scope enables it and touches nothing else.
    #[test]
    fn prop_grant_is_local(decl in common::arb_declaration(), pick in any::<prop::sample::Index>()) {
        let mut registry = build(decl, "p");
        prop_assume!(!registry.is_empty());
        let target = registry.iter().nth(pick.index(registry.len())).unwrap().scope().to_string();
        let before: Vec<(String, bool)> = registry.iter().map(|n| (n.scope().to_string(), n.enabled())).collect();

        registry.grant([target.as_str()]);

        prop_assert!(registry.has(&target) && registry.is_enabled(&target));
        for (scope, was) in before {
            if scope != target {
                prop_assert_eq!(registry.is_enabled(&scope), was);
            }
        }
    }

    /// Unknown grants change nothing observable.
    #[test]
    fn prop_unknown_grant_noop(decl in common::arb_declaration(), junk in "[A-Z]{1,8}") {
        let mut registry = build(decl, "p");
        let before = registry.export(access_tree::ExportScope::All);
        let enabled = registry.enabled().len();
        registry.grant([junk.as_str()]);
        prop_assert_eq!(registry.enabled().len(), enabled);
        prop_assert_eq!(registry.export(access_tree::ExportScope::All), before);
    }

    /// toggle twice restores the original flag.
    #[test]
    fn prop_toggle_round_trip(decl in common::arb_declaration(), pick in any::<prop::sample::Index>()) {
        let mut registry = build(decl, "");
        prop_assume!(!registry.is_empty());
        let node = registry.iter().nth(pick.index(registry.len())).unwrap().clone();
        node.toggle(&mut registry);
        node.toggle(&mut registry);
        prop_assert_eq!(registry.is_enabled(node.scope()), node.enabled());
    }
}
