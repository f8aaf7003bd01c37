// src/core/commands/groups.rs

//! The generated grammars, one module per schema group.
//!
//! Each module holds the state types of its commands; the start methods are
//! all attached to [`Builder`](crate::core::commands::Builder).

macro_rules! command_groups {
    ($($group:ident),* $(,)?) => {
        $(
            pub mod $group {
                include!(concat!(env!("OUT_DIR"), "/gen_", stringify!($group), ".rs"));
            }
        )*
    };
}

command_groups!(
    bitmap,
    cluster,
    connection,
    generic,
    geo,
    graph,
    search,
    sorted_set,
    stream,
    string,
    tdigest,
    timeseries,
);
