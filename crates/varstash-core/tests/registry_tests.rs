// Integration tests for scope lifecycle and the externally observable
// storage contract.

use varstash_core::{ScopeRegistry, VarKind, Variant};

#[test]
fn test_round_trip_every_kind() {
    let mut reg = ScopeRegistry::new();

    reg.set_global("count", Variant::Int(7));
    reg.set_global("ratio", Variant::Float(0.25));
    reg.set_global("motd", Variant::Text("welcome".into()));

    assert_eq!(reg.get_global("count").and_then(|v| v.as_int()), Some(7));
    assert_eq!(
        reg.get_global("ratio").and_then(|v| v.as_float()),
        Some(0.25)
    );
    assert_eq!(
        reg.get_global("motd").and_then(|v| v.as_text()),
        Some("welcome")
    );
}

#[test]
fn test_cross_kind_read_is_indistinguishable_from_absent() {
    let mut reg = ScopeRegistry::new();
    reg.set_global("n", Variant::Int(5));

    // Wrong kind and missing name collapse to the same outcome
    assert_eq!(reg.get_global("n").and_then(|v| v.as_float()), None);
    assert_eq!(reg.get_global("missing").and_then(|v| v.as_float()), None);
}

#[test]
fn test_case_insensitive_aliasing() {
    let mut reg = ScopeRegistry::new();
    reg.set_global("Foo", Variant::Int(1));
    assert_eq!(reg.get_global("foo").and_then(|v| v.as_int()), Some(1));
    assert_eq!(reg.get_global("FOO").and_then(|v| v.as_int()), Some(1));

    // Re-set through an alias updates in place
    let a = reg.set_global("fOo", Variant::Int(2));
    assert_eq!(reg.get_global("Foo").and_then(|v| v.as_int()), Some(2));
    assert_eq!(reg.global_name_at(a), Some("foo"));
}

#[test]
fn test_index_stable_across_resets() {
    let mut reg = ScopeRegistry::new();
    let first = reg.set_player(3, "hp", Variant::Int(100));
    let second = reg.set_player(3, "hp", Variant::Int(50));
    assert_eq!(first, second);
    assert_eq!(reg.player_name_at(3, first), Some("hp"));

    // Kind change keeps the index too
    let third = reg.set_player(3, "hp", Variant::Text("dead".into()));
    assert_eq!(first, third);
}

#[test]
fn test_player_fifo_recycling() {
    let mut reg = ScopeRegistry::new();
    assert_eq!(reg.set_player(1, "a", Variant::Int(1)), 0);
    assert_eq!(reg.set_player(1, "b", Variant::Int(2)), 1);
    assert_eq!(reg.set_player(1, "c", Variant::Int(3)), 2);

    assert!(reg.delete_player(1, "a"));
    assert!(reg.delete_player(1, "b"));

    // Oldest freed index comes back first
    assert_eq!(reg.set_player(1, "d", Variant::Int(4)), 0);
    assert_eq!(reg.set_player(1, "e", Variant::Int(5)), 1);
    assert_eq!(reg.set_player(1, "f", Variant::Int(6)), 3);
}

#[test]
fn test_player_scope_full_reset_on_empty() {
    let mut reg = ScopeRegistry::new();
    reg.set_player(9, "a", Variant::Int(1));
    reg.set_player(9, "b", Variant::Int(2));

    assert!(reg.delete_player(9, "a"));
    assert!(reg.delete_player(9, "b"));

    // Scope is gone, not merely empty
    assert!(!reg.has_player_scope(9));
    assert_eq!(reg.player_upper_index(9), 0);
    assert_eq!(reg.player_type_of(9, "a"), VarKind::None);

    // Recreated scope allocates from zero again
    assert_eq!(reg.set_player(9, "z", Variant::Int(3)), 0);
}

#[test]
fn test_global_scope_never_recycles() {
    let mut reg = ScopeRegistry::new();
    let x = reg.set_global("x", Variant::Int(1));
    assert!(reg.delete_global("x"));

    let y = reg.set_global("y", Variant::Int(2));
    assert!(y > x, "deleted global index must stay a gap");
    assert_eq!(reg.global_name_at(x), None);
}

#[test]
fn test_global_scope_survives_emptying() {
    let mut reg = ScopeRegistry::new();
    let a = reg.set_global("a", Variant::Int(1));
    reg.delete_global("a");
    assert_eq!(reg.global_len(), 0);

    // No reset: allocation continues past the old watermark
    let b = reg.set_global("b", Variant::Int(2));
    assert!(b > a);
}

#[test]
fn test_disconnect_teardown_is_unconditional() {
    let mut reg = ScopeRegistry::new();
    reg.set_player(4, "a", Variant::Int(1));
    reg.set_player(4, "b", Variant::Int(2));
    reg.set_player(5, "other", Variant::Int(3));

    reg.disconnect_player(4);

    assert!(!reg.has_player_scope(4));
    assert_eq!(reg.get_player(4, "a"), None);
    assert_eq!(reg.player_upper_index(4), 0);

    // Other scopes untouched
    assert_eq!(reg.get_player(5, "other").and_then(|v| v.as_int()), Some(3));

    // Disconnecting an entity with no scope is a no-op
    reg.disconnect_player(4);
    reg.disconnect_player(999);
}

#[test]
fn test_queries_never_create_scopes() {
    let mut reg = ScopeRegistry::new();
    assert_eq!(reg.get_player(2, "x"), None);
    assert_eq!(reg.player_type_of(2, "x"), VarKind::None);
    assert_eq!(reg.player_name_at(2, 0), None);
    assert_eq!(reg.player_upper_index(2), 0);
    assert!(!reg.delete_player(2, "x"));
    assert_eq!(reg.player_scope_count(), 0);

    reg.set_player(2, "x", Variant::Int(1));
    assert_eq!(reg.player_scope_count(), 1);
}

#[test]
fn test_player_scopes_are_isolated() {
    let mut reg = ScopeRegistry::new();
    reg.set_player(1, "score", Variant::Int(10));
    reg.set_player(2, "score", Variant::Int(20));
    reg.set_global("score", Variant::Int(30));

    assert_eq!(reg.get_player(1, "score").and_then(|v| v.as_int()), Some(10));
    assert_eq!(reg.get_player(2, "score").and_then(|v| v.as_int()), Some(20));
    assert_eq!(reg.get_global("score").and_then(|v| v.as_int()), Some(30));

    assert!(reg.delete_player(1, "score"));
    assert_eq!(reg.get_player(2, "score").and_then(|v| v.as_int()), Some(20));
    assert_eq!(reg.get_global("score").and_then(|v| v.as_int()), Some(30));
}

// The reference sequence for entity 7 from the legacy scripting docs.
#[test]
fn test_entity_seven_scenario() {
    let mut reg = ScopeRegistry::new();

    assert_eq!(reg.set_player(7, "score", Variant::Int(10)), 0);
    assert_eq!(reg.set_player(7, "lives", Variant::Int(3)), 1);

    assert!(reg.delete_player(7, "score"));

    // Free list is [0]; the upper-index query switches to the live-scan
    // branch while the queue is non-empty.
    assert_eq!(reg.player_upper_index(7), 2);

    // Freed index 0 is reused
    assert_eq!(reg.set_player(7, "coins", Variant::Int(5)), 0);

    // Queue drained; watermark branch again
    assert_eq!(reg.player_upper_index(7), 2);
    assert_eq!(reg.player_name_at(7, 0), Some("coins"));
    assert_eq!(reg.player_name_at(7, 1), Some("lives"));
}
