//! Array-backed binary heap that keeps either its smallest or its largest element at the root.
//!
//! The element at index `i` has children at `2i + 1` and `2i + 2` and a parent at
//! `(i - 1) / 2`. Besides the usual `peek`, the heap supports removing an arbitrary value,
//! which takes a linear scan to locate it.

use crate::container::{NodeView, OrderedContainer, TreeKind};
use std::cmp::Ordering;

/// The order relation a `Heap<T>` keeps between a parent and its children.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum HeapOrder {
    /// Every parent is no greater than its children.
    Min,
    /// Every parent is no less than its children.
    Max,
}

impl HeapOrder {
    /// Returns `true` if `a` belongs strictly above `b` in a heap of this order.
    pub fn precedes<T>(self, a: &T, b: &T) -> bool
    where
        T: Ord,
    {
        match (self, a.cmp(b)) {
            (HeapOrder::Min, Ordering::Less) | (HeapOrder::Max, Ordering::Greater) => true,
            _ => false,
        }
    }
}

/// A binary heap of distinct values.
///
/// # Examples
/// ```
/// use ordered_trees::heap::Heap;
///
/// let mut heap = Heap::max();
/// for value in &[5, 3, 8, 1, 9] {
///     heap.insert(*value);
/// }
///
/// assert_eq!(heap.peek(), Some(&9));
/// assert!(heap.remove(&9));
/// assert_eq!(heap.peek(), Some(&8));
/// ```
#[derive(Serialize, Deserialize)]
pub struct Heap<T> {
    order: HeapOrder,
    data: Vec<T>,
}

impl<T> Heap<T>
where
    T: Ord,
{
    /// Constructs a new, empty `Heap<T>` with the given order.
    pub fn new(order: HeapOrder) -> Self {
        Heap {
            order,
            data: Vec::new(),
        }
    }

    /// Constructs a new, empty `Heap<T>` with room for `capacity` values before it
    /// reallocates.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::heap::{Heap, HeapOrder};
    ///
    /// let heap: Heap<u32> = Heap::with_capacity(HeapOrder::Min, 16);
    /// assert!(heap.is_empty());
    /// ```
    pub fn with_capacity(order: HeapOrder, capacity: usize) -> Self {
        Heap {
            order,
            data: Vec::with_capacity(capacity),
        }
    }

    /// Constructs a new, empty max heap.
    pub fn max() -> Self {
        Self::new(HeapOrder::Max)
    }

    /// Constructs a new, empty min heap.
    pub fn min() -> Self {
        Self::new(HeapOrder::Min)
    }

    /// Returns the order relation the heap keeps.
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.order.precedes(&self.data[index], &self.data[parent]) {
                break;
            }
            self.data.swap(index, parent);
            index = parent;
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) -> usize {
        loop {
            let mut next = index;
            for child in &[2 * index + 1, 2 * index + 2] {
                if *child < self.data.len()
                    && self.order.precedes(&self.data[*child], &self.data[next])
                {
                    next = *child;
                }
            }
            if next == index {
                return index;
            }
            self.data.swap(index, next);
            index = next;
        }
    }

    /// Inserts a value into the heap. Returns `false` and leaves the heap untouched if an equal
    /// value already exists in the heap.
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.data.push(value);
        let index = self.sift_up(self.data.len() - 1);
        trace!("heap: inserted value settled at index {}", index);
        debug_assert!(self.is_heap());
        true
    }

    /// Removes a value from the heap. Returns `false` if the value did not exist.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::heap::Heap;
    ///
    /// let mut heap = Heap::min();
    /// heap.insert(1);
    /// assert!(heap.remove(&1));
    /// assert!(!heap.remove(&1));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        let index = match self.data.iter().position(|other| other == value) {
            Some(index) => index,
            None => return false,
        };
        self.data.swap_remove(index);
        if index < self.data.len() {
            // the element moved in from the last slot may belong above or below `index`
            if self.sift_down(index) == index {
                self.sift_up(index);
            }
        }
        debug_assert!(self.is_heap());
        true
    }

    /// Checks if a value exists in the heap. This is a linear scan.
    pub fn contains(&self, value: &T) -> bool {
        self.data.contains(value)
    }

    /// Returns the root of the heap: the minimum of a min heap or the maximum of a max heap.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Returns the values in array order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns a view of the root slot. Returns `None` if the heap is empty.
    pub fn root(&self) -> Option<HeapView<'_, T>> {
        if self.data.is_empty() {
            None
        } else {
            Some(HeapView {
                data: &self.data,
                index: 0,
            })
        }
    }

    /// Returns `true` if every parent precedes or equals its children.
    pub fn is_heap(&self) -> bool {
        (1..self.data.len()).all(|index| {
            !self.order.precedes(&self.data[index], &self.data[(index - 1) / 2])
        })
    }
}

impl<T> OrderedContainer<T> for Heap<T>
where
    T: Ord,
{
    fn kind(&self) -> TreeKind {
        match self.order {
            HeapOrder::Max => TreeKind::MaxHeap,
            HeapOrder::Min => TreeKind::MinHeap,
        }
    }

    fn insert(&mut self, value: T) -> bool {
        self.insert(value)
    }

    fn delete(&mut self, value: &T) -> bool {
        self.remove(value)
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

    // sorted snapshot, independent of array order
    fn traverse(&self) -> Vec<&T> {
        let mut values: Vec<&T> = self.data.iter().collect();
        values.sort_unstable();
        values
    }

    fn root_view<'a>(&'a self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        self.root().map(|view| Box::new(view) as Box<dyn NodeView<'a, T> + 'a>)
    }

    fn check_invariants(&self) -> bool {
        if !self.is_heap() {
            return false;
        }
        let values = self.traverse();
        values.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// A read-only view of a slot in a `Heap<T>`, shaped as a node of a complete binary tree.
pub struct HeapView<'a, T> {
    data: &'a [T],
    index: usize,
}

impl<'a, T> HeapView<'a, T> {
    /// Returns the array index of the slot this view points at.
    pub fn index(&self) -> usize {
        self.index
    }

    fn slot(&self, index: usize) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        if index < self.data.len() {
            let data = self.data;
            Some(Box::new(HeapView { data, index }) as Box<dyn NodeView<'a, T> + 'a>)
        } else {
            None
        }
    }
}

impl<'a, T> NodeView<'a, T> for HeapView<'a, T> {
    fn value(&self) -> &'a T {
        &self.data[self.index]
    }

    fn left(&self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        self.slot(2 * self.index + 1)
    }

    fn right(&self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        self.slot(2 * self.index + 2)
    }

    fn color(&self) -> &'static str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::{Heap, HeapOrder};
    use crate::container::{OrderedContainer, TreeKind};
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_heap_order_tokens() {
        assert_tokens(
            &HeapOrder::Min,
            &[Token::UnitVariant {
                name: "HeapOrder",
                variant: "Min",
            }],
        );
        assert_tokens(
            &HeapOrder::Max,
            &[Token::UnitVariant {
                name: "HeapOrder",
                variant: "Max",
            }],
        );
    }

    #[test]
    fn test_precedes() {
        assert!(HeapOrder::Min.precedes(&1, &2));
        assert!(!HeapOrder::Min.precedes(&2, &2));
        assert!(HeapOrder::Max.precedes(&2, &1));
        assert!(!HeapOrder::Max.precedes(&1, &2));
    }

    #[test]
    fn test_max_heap() {
        let mut heap = Heap::max();
        for value in &[5, 3, 8, 1, 9] {
            assert!(heap.insert(*value));
        }
        assert_eq!(heap.as_slice()[0], 9);
        assert_eq!(heap.traverse(), vec![&1, &3, &5, &8, &9]);
        assert_eq!(heap.kind(), TreeKind::MaxHeap);
        assert_eq!(heap.name(), "MaxHeap");
        assert!(heap.check_invariants());
    }

    #[test]
    fn test_min_heap() {
        let mut heap = Heap::min();
        for value in &[5, 3, 8, 1, 9] {
            heap.insert(*value);
        }
        assert_eq!(heap.peek(), Some(&1));
        assert_eq!(heap.kind(), TreeKind::MinHeap);
        assert!(heap.remove(&1));
        assert_eq!(heap.peek(), Some(&3));
        assert!(heap.check_invariants());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut heap = Heap::min();
        assert!(heap.insert(1));
        assert!(!heap.insert(1));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_remove_missing() {
        let mut heap = Heap::max();
        assert!(!heap.remove(&1));
        heap.insert(2);
        assert!(!heap.remove(&1));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_remove_sifts_up() {
        // the last slot holds a value greater than the parent of the removed slot
        let mut heap = Heap::max();
        for value in &[100, 50, 90, 40, 45, 80, 85] {
            heap.insert(*value);
        }
        assert_eq!(heap.as_slice(), &[100, 50, 90, 40, 45, 80, 85]);
        assert!(heap.remove(&40));
        assert_eq!(heap.as_slice(), &[100, 85, 90, 50, 45, 80]);
        assert!(heap.is_heap());
    }

    #[test]
    fn test_remove_all() {
        let mut heap = Heap::with_capacity(HeapOrder::Min, 100);
        for value in 0..100 {
            heap.insert((value * 37) % 100);
        }
        for value in 0..100 {
            assert!(heap.remove(&((value * 61) % 100)));
            assert!(heap.check_invariants());
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn test_root_view() {
        let mut heap = Heap::max();
        assert!(heap.root_view().is_none());
        for value in &[1, 2, 3] {
            heap.insert(*value);
        }
        let root = heap.root_view().unwrap();
        assert_eq!(root.value(), &3);
        assert_eq!(root.color(), "null");
        assert_eq!(root.left().unwrap().value(), &1);
        assert_eq!(root.right().unwrap().value(), &2);
        assert!(root.left().unwrap().left().is_none());
    }

    #[test]
    fn test_clear() {
        let mut heap = Heap::max();
        heap.insert(1);
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
    }
}
