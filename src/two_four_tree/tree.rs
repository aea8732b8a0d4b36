use crate::two_four_tree::node::{Node, MAX_KEYS};
use std::mem;

pub type Tree<T> = Option<Node<T>>;

// Splits the full child at `index`. Its middle key moves up into `parent` and its upper half
// becomes a new child at `index + 1`.
fn split_child<T>(parent: &mut Node<T>, index: usize) {
    let (median, sibling) = {
        let child = &mut parent.children[index];
        debug_assert!(child.keys.len() == MAX_KEYS);
        let mut keys = child.keys.split_off(1);
        let median = keys.remove(0);
        let children = if child.is_leaf() {
            Vec::new()
        } else {
            child.children.split_off(2)
        };
        (median, Node { keys, children })
    };
    parent.keys.insert(index, median);
    parent.children.insert(index + 1, sibling);
    trace!("2-4: split child {}", index);
}

// precondition: `node` is not full
fn insert_non_full<T>(node: &mut Node<T>, value: T)
where
    T: Ord,
{
    let mut index = node.find_index(&value);
    if node.is_leaf() {
        node.keys.insert(index, value);
        return;
    }

    if node.children[index].is_full() {
        split_child(node, index);
        if value > node.keys[index] {
            index += 1;
        }
    }
    insert_non_full(&mut node.children[index], value);
}

/// Inserts `value`, splitting full nodes on the way down. The caller guarantees that `value`
/// is not already present.
pub fn insert<T>(tree: &mut Tree<T>, value: T)
where
    T: Ord,
{
    let mut root = match tree.take() {
        Some(root) => root,
        None => {
            *tree = Some(Node::new(value));
            return;
        },
    };

    if root.is_full() {
        let mut new_root = Node {
            keys: Vec::with_capacity(MAX_KEYS),
            children: vec![root],
        };
        split_child(&mut new_root, 0);
        root = new_root;
    }

    insert_non_full(&mut root, value);
    *tree = Some(root);
}

// Moves the last key of the left sibling up into `node` and the separator down into the
// child at `index`.
fn borrow_from_left<T>(node: &mut Node<T>, index: usize) {
    let (left, right) = node.children.split_at_mut(index);
    let sibling = &mut left[index - 1];
    let child = &mut right[0];

    let key = sibling.keys.pop().expect("Expected sibling to have a key.");
    let separator = mem::replace(&mut node.keys[index - 1], key);
    child.keys.insert(0, separator);
    if let Some(grandchild) = sibling.children.pop() {
        child.children.insert(0, grandchild);
    }
    trace!("2-4: borrowed from left sibling of child {}", index);
}

fn borrow_from_right<T>(node: &mut Node<T>, index: usize) {
    let (left, right) = node.children.split_at_mut(index + 1);
    let child = &mut left[index];
    let sibling = &mut right[0];

    let key = sibling.keys.remove(0);
    let separator = mem::replace(&mut node.keys[index], key);
    child.keys.push(separator);
    if !sibling.is_leaf() {
        child.children.push(sibling.children.remove(0));
    }
    trace!("2-4: borrowed from right sibling of child {}", index);
}

// Pulls the separator at `index` down and folds the child at `index + 1` into the child at
// `index`.
fn merge<T>(node: &mut Node<T>, index: usize) {
    let separator = node.keys.remove(index);
    let Node { keys, children } = node.children.remove(index + 1);
    let child = &mut node.children[index];
    child.keys.push(separator);
    child.keys.extend(keys);
    child.children.extend(children);
    trace!("2-4: merged children {} and {}", index, index + 1);
}

// Ensures the child at `index` holds at least two keys and returns the index of the child
// that now covers its key range.
fn fill_child<T>(node: &mut Node<T>, index: usize) -> usize {
    if !node.children[index].is_minimal() {
        return index;
    }

    let has_right = index + 1 < node.children.len();
    if index > 0 && !node.children[index - 1].is_minimal() {
        borrow_from_left(node, index);
        index
    } else if has_right && !node.children[index + 1].is_minimal() {
        borrow_from_right(node, index);
        index
    } else if has_right {
        merge(node, index);
        index
    } else {
        merge(node, index - 1);
        index - 1
    }
}

fn remove_min<T>(node: &mut Node<T>) -> T {
    if node.is_leaf() {
        return node.keys.remove(0);
    }
    let index = fill_child(node, 0);
    remove_min(&mut node.children[index])
}

fn remove_max<T>(node: &mut Node<T>) -> T {
    if node.is_leaf() {
        return node.keys.pop().expect("Expected leaf node to have a key.");
    }
    let index = fill_child(node, node.children.len() - 1);
    remove_max(&mut node.children[index])
}

// precondition: `node` is the root or holds at least two keys
fn remove_from<T>(node: &mut Node<T>, value: &T) -> Option<T>
where
    T: Ord,
{
    let index = node.find_index(value);

    if node.holds_at(index, value) {
        if node.is_leaf() {
            return Some(node.keys.remove(index));
        }
        if !node.children[index].is_minimal() {
            let predecessor = remove_max(&mut node.children[index]);
            return Some(mem::replace(&mut node.keys[index], predecessor));
        }
        if !node.children[index + 1].is_minimal() {
            let successor = remove_min(&mut node.children[index + 1]);
            return Some(mem::replace(&mut node.keys[index], successor));
        }
        merge(node, index);
        return remove_from(&mut node.children[index], value);
    }

    if node.is_leaf() {
        return None;
    }
    let index = fill_child(node, index);
    remove_from(&mut node.children[index], value)
}

pub fn remove<T>(tree: &mut Tree<T>, value: &T) -> Option<T>
where
    T: Ord,
{
    let ret = match tree {
        Some(ref mut root) => remove_from(root, value),
        None => return None,
    };

    let shrink = match tree {
        Some(ref root) => root.keys.is_empty(),
        None => false,
    };
    if shrink {
        // a keyless root has at most one child
        let mut root = tree.take().expect("Expected tree to be `Some`.");
        *tree = root.children.pop();
        trace!("2-4: root collapsed");
    }
    ret
}

pub fn contains<T>(tree: &Tree<T>, value: &T) -> bool
where
    T: Ord,
{
    let mut curr = match tree {
        Some(ref root) => root,
        None => return false,
    };
    loop {
        let index = curr.find_index(value);
        if curr.holds_at(index, value) {
            return true;
        }
        match curr.children.get(index) {
            Some(child) => curr = child,
            None => return false,
        }
    }
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    let mut curr = tree.as_ref()?;
    while let Some(child) = curr.children.first() {
        curr = child;
    }
    curr.keys.first()
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    let mut curr = tree.as_ref()?;
    while let Some(child) = curr.children.last() {
        curr = child;
    }
    curr.keys.last()
}

/// Returns the number of levels in the tree, measured along the leftmost path.
pub fn depth<T>(tree: &Tree<T>) -> usize {
    let mut curr = match tree {
        Some(ref root) => root,
        None => return 0,
    };
    let mut depth = 1;
    while let Some(child) = curr.children.first() {
        curr = child;
        depth += 1;
    }
    depth
}

// Returns the depth of every leaf below `node` if they all agree and every node has a legal
// shape, otherwise `None`.
fn checked_depth<T>(node: &Node<T>) -> Option<usize>
where
    T: Ord,
{
    if node.keys.is_empty() || node.keys.len() > MAX_KEYS {
        return None;
    }
    if !node.keys.windows(2).all(|pair| pair[0] < pair[1]) {
        return None;
    }
    if node.is_leaf() {
        return Some(1);
    }
    if node.children.len() != node.keys.len() + 1 {
        return None;
    }

    let mut depth = None;
    for (index, child) in node.children.iter().enumerate() {
        let above = index.checked_sub(1).map(|index| &node.keys[index]);
        let below = node.keys.get(index);
        let separated = child.keys.iter().all(|key| {
            above.map_or(true, |above| above < key) && below.map_or(true, |below| key < below)
        });
        if !separated {
            return None;
        }
        let child_depth = checked_depth(child)?;
        match depth {
            Some(depth) if depth != child_depth => return None,
            _ => depth = Some(child_depth),
        }
    }
    depth.map(|depth| depth + 1)
}

pub fn is_valid<T>(tree: &Tree<T>) -> bool
where
    T: Ord,
{
    match tree {
        Some(ref root) => checked_depth(root).is_some(),
        None => true,
    }
}
