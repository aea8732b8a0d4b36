use crate::avl_tree::node::Node;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T> = Option<Box<Node<T>>>;

pub fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = node
        .right
        .take()
        .expect("Expected right child node to be `Some`.");
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    trace!("avl: rotated left, new subtree height {}", child.height);
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = node
        .left
        .take()
        .expect("Expected left child node to be `Some`.");
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    trace!("avl: rotated right, new subtree height {}", child.height);
    child
}

// After an insertion below `tree`, `below` is the direction the insertion took inside the
// heavier child, which picks between the single and double rotation.
fn rebalance_insert<T>(tree: &mut Tree<T>, below: Ordering) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        if below == Ordering::Greater {
            node.left = node.left.take().map(rotate_left);
        }
        node = rotate_right(node);
    } else if node.balance() < -1 {
        if below == Ordering::Less {
            node.right = node.right.take().map(rotate_right);
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

// After a removal below `tree`, the heavier child's own balance picks the rotation. A
// perfectly balanced child takes the single rotation.
fn rebalance<T>(tree: &mut Tree<T>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        if let Some(child) = node.left.take() {
            node.left = Some(if child.balance() < 0 { rotate_left(child) } else { child });
        }
        node = rotate_right(node);
    } else if node.balance() < -1 {
        if let Some(child) = node.right.take() {
            node.right = Some(if child.balance() > 0 { rotate_right(child) } else { child });
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

/// Inserts `value` into the tree. Returns `None` if an equal value is already present,
/// `Some(Ordering::Equal)` if the node was created at this level, and otherwise the direction
/// the insertion took from the root of `tree`.
pub fn insert<T>(tree: &mut Tree<T>, value: T) -> Option<Ordering>
where
    T: Ord,
{
    let (side, below) = match tree {
        Some(ref mut node) => {
            let side = value.cmp(&node.value);
            let below = match side {
                Ordering::Less => insert(&mut node.left, value)?,
                Ordering::Greater => insert(&mut node.right, value)?,
                Ordering::Equal => return None,
            };
            (side, below)
        },
        None => {
            *tree = Some(Box::new(Node::new(value)));
            return Some(Ordering::Equal);
        },
    };

    rebalance_insert(tree, below);
    Some(side)
}

// precondition: the tree is not empty
fn remove_min<T>(tree: &mut Tree<T>) -> T {
    let has_left = match tree {
        Some(ref node) => node.left.is_some(),
        None => unreachable!(),
    };

    if has_left {
        let ret = match tree {
            Some(ref mut node) => remove_min(&mut node.left),
            None => unreachable!(),
        };
        rebalance(tree);
        return ret;
    }

    match tree.take() {
        Some(node) => {
            let Node { value, right, .. } = *node;
            *tree = right;
            value
        },
        None => unreachable!(),
    }
}

pub fn remove<T>(tree: &mut Tree<T>, value: &T) -> Option<T>
where
    T: Ord,
{
    let ret = match tree.take() {
        Some(mut node) => match value.cmp(&node.value) {
            Ordering::Less => {
                let ret = remove(&mut node.left, value);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, value);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                if node.left.is_some() && node.right.is_some() {
                    // the in-order successor has no left child, so unlinking it is a splice
                    let successor = remove_min(&mut node.right);
                    let ret = mem::replace(&mut node.value, successor);
                    *tree = Some(node);
                    Some(ret)
                } else {
                    let Node { value, left, right, .. } = *node;
                    *tree = left.or(right);
                    Some(value)
                }
            },
        },
        None => return None,
    };

    if ret.is_some() {
        rebalance(tree);
    }
    ret
}

pub fn contains<T>(tree: &Tree<T>, value: &T) -> bool
where
    T: Ord,
{
    let mut curr = tree;
    while let Some(ref node) = curr {
        curr = match value.cmp(&node.value) {
            Ordering::Less => &node.left,
            Ordering::Greater => &node.right,
            Ordering::Equal => return true,
        };
    }
    false
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.value
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.value
    })
}

pub fn is_balanced<T>(tree: &Tree<T>) -> bool {
    match tree {
        None => true,
        Some(ref node) => {
            node.balance().abs() <= 1 && is_balanced(&node.left) && is_balanced(&node.right)
        },
    }
}

// Returns the recomputed height of a subtree whose stored heights are all correct and whose
// balance factors are all within [-1, 1].
fn checked_height<T>(tree: &Tree<T>) -> Option<usize> {
    match tree {
        None => Some(0),
        Some(ref node) => {
            let left = checked_height(&node.left)?;
            let right = checked_height(&node.right)?;
            let height = left.max(right) + 1;
            let balanced = (left as isize - right as isize).abs() <= 1;
            if node.height == height && balanced {
                Some(height)
            } else {
                None
            }
        },
    }
}

pub fn is_valid<T>(tree: &Tree<T>) -> bool {
    checked_height(tree).is_some()
}
