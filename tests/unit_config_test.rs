use std::io::Write;
use tempfile::NamedTempFile;
use typedcmds::config::{Config, PoolConfig};

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.pool.max_cells_per_shard, 1024);
    assert_eq!(config.pool.initial_capacity, 8);
    assert_eq!(config.pool.max_retained_capacity, 256);
    assert!(config.pool.shards >= 1 && config.pool.shards <= 64);
}

#[test]
fn test_partial_pool_section() {
    let config = Config::from_toml("[pool]\nshards = 4\nmax_cells_per_shard = 32\n").unwrap();
    assert_eq!(config.pool.shards, 4);
    assert_eq!(config.pool.max_cells_per_shard, 32);
    assert_eq!(config.pool.initial_capacity, 8);
}

#[test]
fn test_invalid_values_rejected() {
    let err = Config::from_toml("[pool]\nshards = 0\n").unwrap_err();
    assert!(format!("{:?}", err).contains("pool.shards cannot be 0"));

    let err = Config::from_toml(
        "[pool]\ninitial_capacity = 512\nmax_retained_capacity = 16\n",
    )
    .unwrap_err();
    assert!(format!("{:?}", err).contains("max_retained_capacity"));
}

#[test]
fn test_malformed_toml() {
    let err = Config::from_toml("[pool\nshards = ").unwrap_err();
    assert!(format!("{:?}", err).contains("Failed to parse TOML"));

    let err = Config::from_toml("[pool]\nshards = \"many\"\n").unwrap_err();
    assert!(format!("{:?}", err).contains("Failed to parse TOML"));
}

#[test]
fn test_zero_retention_is_allowed() {
    let config = Config::from_toml("[pool]\nmax_cells_per_shard = 0\n").unwrap();
    assert_eq!(config.pool.max_cells_per_shard, 0);
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[pool]").unwrap();
    writeln!(file, "shards = 2").unwrap();
    writeln!(file, "max_retained_capacity = 128").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(
        config.pool,
        PoolConfig {
            shards: 2,
            max_retained_capacity: 128,
            ..PoolConfig::default()
        }
    );
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = Config::from_file(&path).unwrap_err();
    assert!(format!("{:?}", err).contains("Failed to read config file"));
}

#[test]
fn test_round_trip_through_toml() {
    let config = Config {
        pool: PoolConfig {
            shards: 3,
            max_cells_per_shard: 10,
            initial_capacity: 2,
            max_retained_capacity: 20,
        },
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(Config::from_toml(&text).unwrap(), config);
}
