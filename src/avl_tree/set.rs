use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::container::{NodeView, OrderedContainer, TreeKind};

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one.
///
/// # Examples
/// ```
/// use ordered_trees::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
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
pub struct AvlSet<T> {
    tree: tree::Tree<T>,
    len: usize,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        AvlSet { tree: None, len: 0 }
    }

    /// Inserts a value into the set. Returns `false` and leaves the set untouched if an equal
    /// value already exists in the set.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = tree::insert(&mut self.tree, value).is_some();
        if inserted {
            self.len += 1;
        }
        debug_assert!(tree::is_valid(&self.tree));
        inserted
    }

    /// Removes a value from the set. Returns the removed value if it existed, otherwise
    /// `None`.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let ret = tree::remove(&mut self.tree, value);
        if ret.is_some() {
            self.len -= 1;
        }
        debug_assert!(tree::is_valid(&self.tree));
        ret
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
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

    /// Returns the height of the tree. An empty tree has height 0.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// for value in 0..7 {
    ///     set.insert(value);
    /// }
    /// assert_eq!(set.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree)
    }

    /// Returns `true` if every node has a balance factor within `[-1, 1]`.
    pub fn is_balanced(&self) -> bool {
        tree::is_balanced(&self.tree)
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
    pub fn root(&self) -> Option<AvlView<'_, T>> {
        self.tree.as_ref().map(|node| AvlView { node })
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order
    /// traversal.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<'_, T> {
        let mut iter = AvlSetIter { stack: Vec::new() };
        iter.push_left(&self.tree);
        iter
    }
}

impl<T> OrderedContainer<T> for AvlSet<T>
where
    T: Ord,
{
    fn kind(&self) -> TreeKind {
        TreeKind::Avl
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
        let values: Vec<&T> = self.iter().collect();
        tree::is_valid(&self.tree)
            && values.len() == self.len
            && values.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// A read-only view of a node in an `AvlSet<T>`.
pub struct AvlView<'a, T> {
    node: &'a Node<T>,
}

impl<'a, T> AvlView<'a, T> {
    /// Returns the height of the subtree rooted at this node.
    pub fn height(&self) -> usize {
        self.node.height
    }

    /// Returns the height of the left subtree minus the height of the right subtree.
    pub fn balance(&self) -> isize {
        self.node.balance()
    }
}

impl<'a, T> NodeView<'a, T> for AvlView<'a, T> {
    fn value(&self) -> &'a T {
        &self.node.value
    }

    fn left(&self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        self.node
            .left
            .as_ref()
            .map(|node| Box::new(AvlView { node: &**node }) as Box<dyn NodeView<'a, T> + 'a>)
    }

    fn right(&self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        self.node
            .right
            .as_ref()
            .map(|node| Box::new(AvlView { node: &**node }) as Box<dyn NodeView<'a, T> + 'a>)
    }

    fn color(&self) -> &'static str {
        if self.node.balance().abs() > 1 {
            "UNBALANCED"
        } else {
            "BALANCED"
        }
    }
}

impl<T> IntoIterator for AvlSet<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = AvlSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iter = AvlSetIntoIter { stack: Vec::new() };
        iter.push_left(self.tree);
        iter
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = AvlSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct AvlSetIntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

impl<T> AvlSetIntoIter<T> {
    fn push_left(&mut self, mut tree: tree::Tree<T>) {
        while let Some(mut node) = tree {
            tree = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { value, right, .. } = *node;
        self.push_left(right);
        Some(value)
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct AvlSetIter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> AvlSetIter<'a, T> {
    fn push_left(&mut self, mut tree: &'a tree::Tree<T>) {
        while let Some(node) = tree {
            self.stack.push(&**node);
            tree = &node.left;
        }
    }
}

impl<'a, T> Iterator for AvlSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        Some(&node.value)
    }
}

impl<T> Default for AvlSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
