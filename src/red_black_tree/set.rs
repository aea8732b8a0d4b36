use crate::arena::{Handle, TypedArena};
use crate::container::{NodeView, OrderedContainer, TreeKind};
use crate::red_black_tree::node::{Color, Node};
use crate::red_black_tree::tree::{self, Tree};

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree where every node is colored red or
/// black, the root is black, no red node has a red child, and every path from a node down to
/// an absent child passes through the same number of black nodes. Each node also keeps a
/// link to its parent so that the fix-up passes can walk upwards.
///
/// # Examples
/// ```
/// use ordered_trees::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.max(), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Serialize, Deserialize)]
pub struct RedBlackSet<T> {
    tree: Tree<T>,
    len: usize,
}

impl<T> RedBlackSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(tree::DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackSet<T>` whose node arena allocates `chunk_size` nodes
    /// at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::with_chunk_size(64);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackSet {
            tree: Tree::new(chunk_size),
            len: 0,
        }
    }

    /// Inserts a value into the set. Returns `false` and leaves the set untouched if an equal
    /// value already exists in the set.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = self.tree.insert(value);
        if inserted {
            self.len += 1;
        }
        debug_assert!(self.tree.black_height().is_some());
        inserted
    }

    /// Removes a value from the set. Returns the removed value if it existed, otherwise
    /// `None`.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let handle = self.tree.find(value)?;
        let ret = self.tree.remove(handle);
        self.len -= 1;
        debug_assert!(self.tree.black_height().is_some());
        Some(ret)
    }

    /// Checks if a value exists in the set.
    pub fn contains(&self, value: &T) -> bool {
        self.tree.find(value).is_some()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the number of black nodes on every path from the root down to an absent child,
    /// counting the absent child itself. Returns `None` if the tree violates a red black
    /// invariant.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.black_height(), Some(1));
    /// set.insert(1);
    /// assert_eq!(set.black_height(), Some(2));
    /// ```
    pub fn black_height(&self) -> Option<usize> {
        self.tree.black_height()
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        let mut curr = self.tree.root?;
        while let Some(left) = self.tree.arena[curr].left {
            curr = left;
        }
        Some(&self.tree.arena[curr].value)
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        let mut curr = self.tree.root?;
        while let Some(right) = self.tree.arena[curr].right {
            curr = right;
        }
        Some(&self.tree.arena[curr].value)
    }

    /// Returns a view of the root node. Returns `None` if the set is empty.
    pub fn root(&self) -> Option<RedBlackView<'_, T>> {
        self.tree.root.map(|handle| RedBlackView {
            arena: &self.tree.arena,
            handle,
        })
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order
    /// traversal.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        let mut iter = RedBlackSetIter {
            arena: &self.tree.arena,
            stack: Vec::new(),
        };
        iter.push_left(self.tree.root);
        iter
    }
}

impl<T> OrderedContainer<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn kind(&self) -> TreeKind {
        TreeKind::RedBlack
    }

    fn insert(&mut self, value: T) -> bool {
        self.insert(value)
    }

    fn delete(&mut self, value: &T) -> bool {
        self.remove(value).is_some()
    }

    fn contains(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn clear(&mut self) {
        self.clear()
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn traverse(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn root_view<'a>(&'a self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        self.root().map(|view| Box::new(view) as Box<dyn NodeView<'a, T> + 'a>)
    }

    fn check_invariants(&self) -> bool {
        // link checks come first so that the walk below cannot cycle or hit a stale handle
        if !self.tree.arena.is_consistent() || self.tree.arena.len() != self.len {
            return false;
        }
        if self.tree.black_height().is_none() {
            return false;
        }
        let values: Vec<&T> = self.iter().collect();
        values.len() == self.len && values.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// A read-only view of a node in a `RedBlackSet<T>`.
pub struct RedBlackView<'a, T> {
    arena: &'a TypedArena<Node<T>>,
    handle: Handle,
}

impl<'a, T> RedBlackView<'a, T> {
    /// Returns the color of the node.
    pub fn node_color(&self) -> Color {
        self.arena[self.handle].color
    }

    fn child(&self, child: Option<Handle>) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        let arena = self.arena;
        child.map(|handle| {
            Box::new(RedBlackView { arena, handle }) as Box<dyn NodeView<'a, T> + 'a>
        })
    }
}

impl<'a, T> NodeView<'a, T> for RedBlackView<'a, T> {
    fn value(&self) -> &'a T {
        &self.arena[self.handle].value
    }

    fn left(&self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        self.child(self.arena[self.handle].left)
    }

    fn right(&self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        self.child(self.arena[self.handle].right)
    }

    fn color(&self) -> &'static str {
        self.node_color().name()
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = RedBlackSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T> {
    arena: &'a TypedArena<Node<T>>,
    stack: Vec<Handle>,
}

impl<'a, T> RedBlackSetIter<'a, T> {
    fn push_left(&mut self, mut curr: Option<Handle>) {
        while let Some(handle) = curr {
            self.stack.push(handle);
            curr = self.arena[handle].left;
        }
    }
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[handle];
        self.push_left(node.right);
        Some(&node.value)
    }
}

impl<T> Default for RedBlackSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackSet;
    use crate::container::{NodeView, OrderedContainer, TreeKind};
    use crate::persist::{self, AnyTree, Error};
    use crate::red_black_tree::node::Node;
    use crate::red_black_tree::Color;

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert!(set.root().is_none());
    }

    #[test]
    fn test_min_max_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert_root_is_black() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert_eq!(set.root().unwrap().node_color(), Color::Black);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
        assert_eq!(set.tree.arena.len(), 1);
    }

    #[test]
    fn test_insert_fix_up() {
        let mut set = RedBlackSet::new();
        for value in &[10, 20, 30, 40, 50, 25] {
            set.insert(*value);
            assert!(set.check_invariants());
        }

        let root = set.root().unwrap();
        assert_eq!(root.value(), &20);
        assert_eq!(root.color(), "BLACK");
        let right = root.right().unwrap();
        assert_eq!(right.value(), &40);
        assert_eq!(right.color(), "RED");
        assert_eq!(right.left().unwrap().value(), &30);
        assert_eq!(right.left().unwrap().color(), "BLACK");
        assert_eq!(right.left().unwrap().left().unwrap().color(), "RED");

        assert_eq!(set.traverse(), vec![&10, &20, &25, &30, &40, &50]);
    }

    #[test]
    fn test_remove_two_children() {
        let mut set = RedBlackSet::new();
        for value in &[10, 20, 30, 40, 50, 25] {
            set.insert(*value);
        }
        let black_height = set.black_height();
        assert!(black_height.is_some());

        assert_eq!(set.remove(&40), Some(40));
        assert_eq!(set.black_height(), black_height);
        assert!(set.check_invariants());

        let root = set.root().unwrap();
        assert_eq!(root.value(), &20);
        let right = root.right().unwrap();
        assert_eq!(right.value(), &30);
        assert_eq!(right.color(), "RED");
        assert_eq!(right.left().unwrap().value(), &25);
        assert_eq!(right.right().unwrap().value(), &50);
        assert_eq!(set.traverse(), vec![&10, &20, &25, &30, &50]);
    }

    #[test]
    fn test_remove_black_leaf() {
        let mut set = RedBlackSet::new();
        for value in 1..=7 {
            set.insert(value);
        }
        for value in &[1, 3, 2] {
            assert_eq!(set.remove(value), Some(*value));
            assert!(set.check_invariants());
        }
        assert_eq!(set.traverse(), vec![&4, &5, &6, &7]);
    }

    #[test]
    fn test_remove_missing() {
        let mut set = RedBlackSet::new();
        assert_eq!(set.remove(&1), None);
        set.insert(2);
        assert_eq!(set.remove(&1), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_all_reuses_arena() {
        let mut set = RedBlackSet::with_chunk_size(8);
        for value in 0..100 {
            set.insert((value * 37) % 100);
        }
        for value in 0..100 {
            assert_eq!(set.remove(&((value * 61) % 100)), Some((value * 61) % 100));
            assert!(set.check_invariants());
        }
        assert!(set.is_empty());
        assert!(set.tree.arena.is_empty());
        assert_eq!(set.black_height(), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(2);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(&1));
        assert!(set.check_invariants());
    }

    #[test]
    fn test_corrupted_colors_detected() {
        let mut set = RedBlackSet::new();
        for value in 0..3 {
            set.insert(value);
        }
        let root = set.tree.root.unwrap();
        set.tree.arena[root].color = Color::Red;
        assert_eq!(set.black_height(), None);
        assert!(!set.check_invariants());
    }

    #[test]
    fn test_load_rejects_long_black_chain() {
        // every parent link is consistent, but the leftmost path is far deeper than the rest
        let len = 200_000;
        let mut set: RedBlackSet<u32> = RedBlackSet::new();
        let mut parent = None;
        for value in (0..len).rev() {
            let handle = set.tree.arena.allocate(Node {
                value,
                color: Color::Black,
                parent,
                left: None,
                right: None,
            });
            match parent {
                Some(parent) => set.tree.arena[parent].left = Some(handle),
                None => set.tree.root = Some(handle),
            }
            parent = Some(handle);
        }
        set.len = len as usize;
        assert_eq!(set.black_height(), None);

        let bytes = persist::to_bytes(&AnyTree::from(set)).unwrap();
        match persist::from_bytes::<u32>(&bytes) {
            Err(Error::Corrupted(kind)) => assert_eq!(kind, TreeKind::RedBlack),
            _ => panic!("Expected `Error::Corrupted`."),
        }
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!((&set).into_iter().count(), 3);
    }
}
