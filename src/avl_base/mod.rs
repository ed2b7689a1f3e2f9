pub mod iter;
mod node;
pub mod tree;
