//! Ordered collections that share a single container contract: an AVL tree, a red black tree,
//! a 2-4 tree and a binary heap with either a min or a max order.
//!
//! Every structure implements `OrderedContainer`, stores distinct values, and can be saved to
//! and loaded from a byte stream through `persist`. Binary-shaped structures expose their nodes
//! through `NodeView`; the 2-4 tree exposes its nodes through `MultiwayView`.

extern crate bincode;
extern crate byteorder;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod arena;
pub mod avl_tree;
pub mod container;
pub mod heap;
pub mod persist;
pub mod red_black_tree;
pub mod two_four_tree;

pub use crate::avl_tree::AvlSet;
pub use crate::container::{DisplayColor, MultiwayView, NodeView, OrderedContainer, TreeKind};
pub use crate::heap::{Heap, HeapOrder};
pub use crate::persist::AnyTree;
pub use crate::red_black_tree::RedBlackSet;
pub use crate::two_four_tree::TwoFourSet;
