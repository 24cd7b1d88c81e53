//! A mutable 2-d tree over unique points, with per-node regions.

mod builder;
mod index;
mod query;
mod traversal;

pub use builder::KdTreeBuilder;
pub use index::KdTree;
pub use traversal::{Iter, NodeRef, Split, Splits};
