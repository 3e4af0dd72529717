#![forbid(unsafe_code)]

mod synthetic;

pub use synthetic::{grid_minimap, init_tracing, ring_cluster, KillCluster};
