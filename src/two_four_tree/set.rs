use crate::container::{MultiwayView, NodeView, OrderedContainer, TreeKind};
use crate::two_four_tree::node::Node;
use crate::two_four_tree::tree::{self, Tree};

/// An ordered set implemented using a 2-4 tree.
///
/// A 2-4 tree is a B-tree of order 4. Each node holds one to three sorted keys, an internal
/// node holding `k` keys has `k + 1` children whose key ranges are separated by those keys,
/// and all leaves are at the same depth.
///
/// # Examples
/// ```
/// use ordered_trees::two_four_tree::TwoFourSet;
///
/// let mut set = TwoFourSet::new();
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
pub struct TwoFourSet<T> {
    tree: Tree<T>,
    len: usize,
}

impl<T> TwoFourSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `TwoFourSet<T>`.
    pub fn new() -> Self {
        TwoFourSet { tree: None, len: 0 }
    }

    /// Inserts a value into the set. Returns `false` and leaves the set untouched if an equal
    /// value already exists in the set.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::two_four_tree::TwoFourSet;
    ///
    /// let mut set = TwoFourSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        if tree::contains(&self.tree, &value) {
            return false;
        }
        tree::insert(&mut self.tree, value);
        self.len += 1;
        debug_assert!(tree::is_valid(&self.tree));
        true
    }

    /// Removes a value from the set. Returns the removed value if it existed, otherwise
    /// `None`.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let ret = tree::remove(&mut self.tree, value);
        if ret.is_some() {
            self.len -= 1;
        }
        debug_assert!(tree::is_valid(&self.tree));
        ret
    }

    /// Checks if a value exists in the set.
    pub fn contains(&self, value: &T) -> bool {
        tree::contains(&self.tree, value)
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
        self.tree = None;
        self.len = 0;
    }

    /// Returns the number of levels in the tree. An empty set has depth zero.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::two_four_tree::TwoFourSet;
    ///
    /// let mut set = TwoFourSet::new();
    /// for value in 0..3 {
    ///     set.insert(value);
    /// }
    /// assert_eq!(set.depth(), 1);
    /// set.insert(3);
    /// assert_eq!(set.depth(), 2);
    /// ```
    pub fn depth(&self) -> usize {
        tree::depth(&self.tree)
    }

    /// Returns `true` if every node holds one to three keys and every leaf is at the same
    /// depth.
    pub fn has_uniform_leaves(&self) -> bool {
        tree::is_valid(&self.tree)
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree)
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree)
    }

    /// Returns a view of the root node. Returns `None` if the set is empty.
    pub fn root(&self) -> Option<TwoFourView<'_, T>> {
        self.tree.as_ref().map(|node| TwoFourView { node })
    }

    /// Returns the root node as a boxed `MultiwayView`. Returns `None` if the set is empty.
    pub fn root_view_multiway<'a>(&'a self) -> Option<Box<dyn MultiwayView<'a, T> + 'a>> {
        self.root().map(|view| Box::new(view) as Box<dyn MultiwayView<'a, T> + 'a>)
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order
    /// traversal.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::two_four_tree::TwoFourSet;
    ///
    /// let mut set = TwoFourSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TwoFourSetIter<'_, T> {
        let mut iter = TwoFourSetIter { stack: Vec::new() };
        if let Some(ref root) = self.tree {
            iter.push_left(root);
        }
        iter
    }
}

impl<T> OrderedContainer<T> for TwoFourSet<T>
where
    T: Ord,
{
    fn kind(&self) -> TreeKind {
        TreeKind::TwoFour
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

    // the shape is not binary, see `root_view_multiway`
    fn root_view<'a>(&'a self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        None
    }

    fn check_invariants(&self) -> bool {
        if !tree::is_valid(&self.tree) {
            return false;
        }
        let values: Vec<&T> = self.iter().collect();
        values.len() == self.len && values.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// A read-only view of a node in a `TwoFourSet<T>`.
pub struct TwoFourView<'a, T> {
    node: &'a Node<T>,
}

impl<'a, T> TwoFourView<'a, T> {
    /// Returns the sorted keys stored in the node.
    pub fn keys(&self) -> &'a [T] {
        &self.node.keys
    }
}

impl<'a, T> MultiwayView<'a, T> for TwoFourView<'a, T> {
    fn key_count(&self) -> usize {
        self.node.keys.len()
    }

    fn key(&self, index: usize) -> Option<&'a T> {
        self.node.keys.get(index)
    }

    fn child_count(&self) -> usize {
        self.node.children.len()
    }

    fn child(&self, index: usize) -> Option<Box<dyn MultiwayView<'a, T> + 'a>> {
        self.node
            .children
            .get(index)
            .map(|node| Box::new(TwoFourView { node }) as Box<dyn MultiwayView<'a, T> + 'a>)
    }
}

impl<'a, T> IntoIterator for &'a TwoFourSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = TwoFourSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `TwoFourSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct TwoFourSetIter<'a, T> {
    // each entry is a node and the index of its next unvisited key
    stack: Vec<(&'a Node<T>, usize)>,
}

impl<'a, T> TwoFourSetIter<'a, T> {
    fn push_left(&mut self, mut node: &'a Node<T>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, T> Iterator for TwoFourSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, index) = self.stack.pop()?;
        if index + 1 < node.keys.len() {
            self.stack.push((node, index + 1));
        }
        if let Some(child) = node.children.get(index + 1) {
            self.push_left(child);
        }
        node.keys.get(index)
    }
}

impl<T> Default for TwoFourSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::TwoFourSet;
    use crate::container::OrderedContainer;

    #[test]
    fn test_len_empty() {
        let set: TwoFourSet<u32> = TwoFourSet::new();
        assert_eq!(set.len(), 0);
        assert_eq!(set.depth(), 0);
        assert!(set.root_view_multiway().is_none());
        assert!(set.root_view().is_none());
    }

    #[test]
    fn test_insert_fills_leaf() {
        let mut set = TwoFourSet::new();
        set.insert(30);
        set.insert(10);
        set.insert(20);
        assert_eq!(set.root().unwrap().keys(), &[10, 20, 30]);
        assert_eq!(set.depth(), 1);
    }

    #[test]
    fn test_insert_splits_root() {
        let mut set = TwoFourSet::new();
        for value in &[10, 20, 30, 40] {
            set.insert(*value);
        }

        let root = set.root_view_multiway().unwrap();
        assert_eq!(root.key_count(), 1);
        assert_eq!(root.key(0), Some(&20));
        assert_eq!(root.child_count(), 2);
        assert!(!root.is_leaf());
        assert_eq!(root.child(0).unwrap().key(0), Some(&10));
        assert_eq!(root.child(1).unwrap().key_count(), 2);
        assert!(root.child(1).unwrap().is_leaf());
        assert!(root.child(2).is_none());

        assert_eq!(set.traverse(), vec![&10, &20, &30, &40]);
        assert!(set.check_invariants());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = TwoFourSet::new();
        for value in 0..10 {
            set.insert(value);
        }
        assert!(!set.insert(5));
        assert_eq!(set.len(), 10);
        assert!(set.check_invariants());
    }

    #[test]
    fn test_remove_merges_leaves() {
        let mut set = TwoFourSet::new();
        for value in &[10, 20, 30, 40] {
            set.insert(*value);
        }
        assert_eq!(set.remove(&40), Some(40));
        assert_eq!(set.depth(), 2);

        // both children now hold a single key, so they merge with the root key
        assert_eq!(set.remove(&10), Some(10));
        assert_eq!(set.depth(), 1);
        assert!(set.has_uniform_leaves());
        assert_eq!(set.root().unwrap().keys(), &[20, 30]);
    }

    #[test]
    fn test_remove_keeps_leaf_depth() {
        let mut set = TwoFourSet::new();
        for value in 0..64 {
            set.insert(value);
        }
        for value in (0..64).filter(|value| value % 3 != 0) {
            assert_eq!(set.remove(&value), Some(value));
            assert!(set.has_uniform_leaves());
            assert!(set.check_invariants());
        }
        assert_eq!(set.len(), 22);
        let expected: Vec<u32> = (0..64).filter(|value| value % 3 == 0).collect();
        assert_eq!(set.traverse(), expected.iter().collect::<Vec<&u32>>());
    }

    #[test]
    fn test_remove_internal_key() {
        let mut set = TwoFourSet::new();
        for value in 0..10 {
            set.insert(value);
        }
        let root_key = *set.root().unwrap().keys().first().unwrap();
        assert_eq!(set.remove(&root_key), Some(root_key));
        assert!(!set.contains(&root_key));
        assert!(set.check_invariants());
    }

    #[test]
    fn test_remove_missing() {
        let mut set = TwoFourSet::new();
        assert_eq!(set.remove(&1), None);
        for value in 0..10 {
            set.insert(value * 2);
        }
        assert_eq!(set.remove(&3), None);
        assert_eq!(set.len(), 10);
        assert!(set.check_invariants());
    }

    #[test]
    fn test_remove_all() {
        let mut set = TwoFourSet::new();
        for value in 0..100 {
            set.insert((value * 37) % 100);
        }
        for value in 0..100 {
            assert_eq!(set.remove(&value), Some(value));
            assert!(set.check_invariants());
        }
        assert!(set.is_empty());
        assert_eq!(set.depth(), 0);
    }

    #[test]
    fn test_min_max() {
        let mut set = TwoFourSet::new();
        assert_eq!(set.min(), None);
        for value in &[5, 1, 9, 3, 7] {
            set.insert(*value);
        }
        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&9));
    }

    #[test]
    fn test_clear() {
        let mut set = TwoFourSet::new();
        set.insert(1);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(&1));
    }
}
