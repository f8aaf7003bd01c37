// tests/property/pool_test.rs

//! Property-based tests for cell recycling

use proptest::prelude::*;
use typedcmds::config::PoolConfig;
use typedcmds::core::commands::CellPool;
use typedcmds::Builder;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 50, // Every case leaks a pool
        max_shrink_iters: 500,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_every_cell_is_accounted_for(
        batches in prop::collection::vec(1usize..12, 1..10),
        max_cells in 0usize..6,
    ) {
        let pool = CellPool::leak(PoolConfig {
            shards: 1,
            max_cells_per_shard: max_cells,
            initial_capacity: 4,
            max_retained_capacity: 16,
        })
        .unwrap();
        let builder = Builder::with_pool(pool);

        let mut total = 0u64;
        for batch in &batches {
            let held: Vec<_> = (0..*batch).map(|_| builder.ping().build()).collect();
            total += held.len() as u64;
            drop(held);
            prop_assert!(pool.idle() <= max_cells);
        }

        let stats = pool.stats();
        prop_assert_eq!(stats.hits() + stats.misses(), total);
        prop_assert_eq!(stats.returns() + stats.drops(), total);
        prop_assert_eq!(pool.idle() as u64, stats.returns() - stats.hits());
    }

    #[test]
    fn test_recycled_cells_carry_nothing_over(keys in prop::collection::vec("[a-z]{1,6}", 1..8)) {
        let pool = CellPool::leak(PoolConfig {
            shards: 1,
            max_cells_per_shard: 4,
            initial_capacity: 4,
            max_retained_capacity: 64,
        })
        .unwrap();
        let builder = Builder::with_pool(pool);

        drop(builder.mget().key(keys.clone()).build());
        let cmd = builder.ping().build();
        prop_assert_eq!(pool.stats().hits(), 1);
        prop_assert_eq!(cmd.commands().len(), 1);
        prop_assert!(cmd.flags().is_empty());
        prop_assert!(cmd.slot().is_unset());
    }
}
