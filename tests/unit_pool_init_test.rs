use typedcmds::config::PoolConfig;
use typedcmds::core::commands::pool;
use typedcmds::{Builder, CommandError};

#[test]
fn test_init_once() {
    let config = PoolConfig {
        shards: 2,
        max_cells_per_shard: 16,
        initial_capacity: 8,
        max_retained_capacity: 64,
    };
    let installed = pool::init(config.clone()).unwrap();
    assert_eq!(installed.config(), &config);
    assert!(std::ptr::eq(installed, pool::global()));
    assert!(std::ptr::eq(Builder::new().pool(), installed));

    let err = pool::init(PoolConfig::default()).unwrap_err();
    assert_eq!(err, CommandError::PoolAlreadyInitialized);
    assert_eq!(pool::global().config(), &config);
}

#[test]
fn test_init_rejects_invalid_config() {
    let err = pool::init(PoolConfig {
        shards: 0,
        ..PoolConfig::default()
    })
    .unwrap_err();
    assert!(matches!(err, CommandError::InvalidConfig(_)));
}
