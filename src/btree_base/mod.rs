pub mod btree;
mod deletion;
pub mod iter;
mod node;
pub mod params;
pub mod tree_stats;
