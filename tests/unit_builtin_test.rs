use typedcmds::builtin;

#[test]
fn test_connection_builtins() {
    assert_eq!(builtin::ping().commands(), ["PING"]);
    assert_eq!(builtin::multi().commands(), ["MULTI"]);
    assert_eq!(builtin::exec().commands(), ["EXEC"]);
    assert_eq!(builtin::discard().commands(), ["DISCARD"]);
    assert_eq!(builtin::asking().commands(), ["ASKING"]);
    assert!(builtin::ping().slot().is_unset());
    assert!(builtin::ping().flags().is_empty());
}

#[test]
fn test_opt_in_builtin() {
    let cmd = builtin::opt_in();
    assert_eq!(cmd.commands(), ["CLIENT", "CACHING", "YES"]);
    assert!(cmd.is_opt_in());
}

#[test]
fn test_unsubscribe_builtins() {
    for cmd in [
        builtin::unsubscribe(),
        builtin::punsubscribe(),
        builtin::sunsubscribe(),
    ] {
        assert_eq!(cmd.commands().len(), 1);
        assert!(cmd.no_reply());
        assert!(cmd.is_unsubscribe());
    }
    assert_eq!(builtin::punsubscribe().name(), "PUNSUBSCRIBE");
}

#[test]
fn test_cluster_builtins() {
    assert_eq!(builtin::cluster_slots().commands(), ["CLUSTER", "SLOTS"]);
    assert_eq!(builtin::cluster_shards().commands(), ["CLUSTER", "SHARDS"]);
}

#[test]
fn test_builtins_are_fresh_values() {
    let a = builtin::ping();
    let b = builtin::ping();
    assert_eq!(a, b);
}
