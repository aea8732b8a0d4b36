//! Balanced multiway search tree of order 4. Every node holds between one and three keys, an
//! internal node has one more child than it has keys, and every leaf sits at the same depth.
//!
//! Insertion splits full nodes on the way down. Deletion borrows from or merges with a sibling
//! before descending so that it never enters a node holding a single key.

mod node;
mod set;
mod tree;

pub use self::set::{TwoFourSet, TwoFourSetIter, TwoFourView};
