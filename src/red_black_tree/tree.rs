use crate::arena::{Handle, TypedArena};
use crate::red_black_tree::node::{Color, Node};
use std::cmp::Ordering;
use std::mem;

pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// The arena-backed link structure of a red black tree.
#[derive(Serialize, Deserialize)]
pub struct Tree<T> {
    pub arena: TypedArena<Node<T>>,
    pub root: Option<Handle>,
}

impl<T> Tree<T> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: TypedArena::new(chunk_size),
            root: None,
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    // absent children count as black
    fn color(&self, handle: Option<Handle>) -> Color {
        match handle {
            Some(handle) => self.arena[handle].color,
            None => Color::Black,
        }
    }

    fn set_color(&mut self, handle: Option<Handle>, color: Color) {
        if let Some(handle) = handle {
            self.arena[handle].color = color;
        }
    }

    fn is_left_child(&self, parent: Handle, child: Handle) -> bool {
        self.arena[parent].left == Some(child)
    }

    // Points whatever referred to `old` (the parent's child slot or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if self.is_left_child(parent, old) {
                    self.arena[parent].left = new;
                } else {
                    self.arena[parent].right = new;
                }
            },
        }
    }

    fn rotate_left(&mut self, node: Handle) {
        let child = self.arena[node]
            .right
            .expect("Expected right child node to be `Some`.");
        let middle = self.arena[child].left;

        self.arena[node].right = middle;
        if let Some(middle) = middle {
            self.arena[middle].parent = Some(node);
        }

        let parent = self.arena[node].parent;
        self.arena[child].parent = parent;
        self.replace_child(parent, node, Some(child));

        self.arena[child].left = Some(node);
        self.arena[node].parent = Some(child);
        trace!("red black: rotated left");
    }

    fn rotate_right(&mut self, node: Handle) {
        let child = self.arena[node]
            .left
            .expect("Expected left child node to be `Some`.");
        let middle = self.arena[child].right;

        self.arena[node].left = middle;
        if let Some(middle) = middle {
            self.arena[middle].parent = Some(node);
        }

        let parent = self.arena[node].parent;
        self.arena[child].parent = parent;
        self.replace_child(parent, node, Some(child));

        self.arena[child].right = Some(node);
        self.arena[node].parent = Some(child);
        trace!("red black: rotated right");
    }

    fn minimum(&self, mut node: Handle) -> Handle {
        while let Some(left) = self.arena[node].left {
            node = left;
        }
        node
    }

    pub fn find(&self, value: &T) -> Option<Handle>
    where
        T: Ord,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Inserts `value`. Returns `false` if an equal value is already present.
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let mut parent = None;
        let mut ordering = Ordering::Equal;
        let mut curr = self.root;
        while let Some(handle) = curr {
            parent = Some(handle);
            let node = &self.arena[handle];
            ordering = value.cmp(&node.value);
            curr = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return false,
            };
        }

        let new_node = self.arena.allocate(Node::new(value, parent));
        match parent {
            None => self.root = Some(new_node),
            Some(parent) => {
                if ordering == Ordering::Less {
                    self.arena[parent].left = Some(new_node);
                } else {
                    self.arena[parent].right = Some(new_node);
                }
            },
        }

        self.fix_insert(new_node);
        true
    }

    fn fix_insert(&mut self, mut node: Handle) {
        while let Some(mut parent) = self.arena[node].parent {
            if self.arena[parent].color == Color::Black {
                break;
            }
            let grandparent = self.arena[parent]
                .parent
                .expect("Expected a red node to have a parent.");
            let parent_is_left = self.is_left_child(grandparent, parent);
            let uncle = if parent_is_left {
                self.arena[grandparent].right
            } else {
                self.arena[grandparent].left
            };

            if self.color(uncle) == Color::Red {
                self.arena[parent].color = Color::Black;
                self.set_color(uncle, Color::Black);
                self.arena[grandparent].color = Color::Red;
                node = grandparent;
                continue;
            }

            let is_inner = if parent_is_left {
                !self.is_left_child(parent, node)
            } else {
                self.is_left_child(parent, node)
            };
            if is_inner {
                node = parent;
                if parent_is_left {
                    self.rotate_left(node);
                } else {
                    self.rotate_right(node);
                }
                parent = self.arena[node]
                    .parent
                    .expect("Expected a rotated node to have a parent.");
            }

            self.arena[parent].color = Color::Black;
            self.arena[grandparent].color = Color::Red;
            if parent_is_left {
                self.rotate_right(grandparent);
            } else {
                self.rotate_left(grandparent);
            }
        }

        self.set_color(self.root, Color::Black);
    }

    /// Unlinks and frees `node`, returning its value.
    pub fn remove(&mut self, node: Handle) -> T {
        let has_two_children = {
            let node = &self.arena[node];
            node.left.is_some() && node.right.is_some()
        };
        let target = if has_two_children {
            let right = self.arena[node].right.expect("Expected right child node to be `Some`.");
            self.minimum(right)
        } else {
            node
        };

        let (parent, replacement, color) = {
            let target = &self.arena[target];
            (target.parent, target.left.or(target.right), target.color)
        };

        match replacement {
            Some(replacement) => {
                self.arena[replacement].parent = parent;
                self.replace_child(parent, target, Some(replacement));
                if color == Color::Black {
                    self.fix_delete(replacement);
                }
            },
            None if parent.is_none() => self.root = None,
            None => {
                // the childless black node stands in for the missing black until it is unlinked
                if color == Color::Black {
                    self.fix_delete(target);
                }
                let parent = self.arena[target].parent;
                self.replace_child(parent, target, None);
            },
        }

        let removed = self.arena.free(target);
        if target == node {
            removed.value
        } else {
            mem::replace(&mut self.arena[node].value, removed.value)
        }
    }

    fn fix_delete(&mut self, mut node: Handle) {
        while Some(node) != self.root && self.arena[node].color == Color::Black {
            let parent = self.arena[node]
                .parent
                .expect("Expected a non-root node to have a parent.");

            if self.is_left_child(parent, node) {
                let mut sibling = self.arena[parent].right;
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.arena[parent].color = Color::Red;
                    self.rotate_left(parent);
                    sibling = self.arena[parent].right;
                }

                let sibling = match sibling {
                    Some(sibling) => sibling,
                    None => {
                        node = parent;
                        continue;
                    },
                };

                let near = self.arena[sibling].left;
                let far = self.arena[sibling].right;
                if self.color(near) == Color::Black && self.color(far) == Color::Black {
                    self.arena[sibling].color = Color::Red;
                    node = parent;
                    continue;
                }

                let sibling = if self.color(far) == Color::Black {
                    self.set_color(near, Color::Black);
                    self.arena[sibling].color = Color::Red;
                    self.rotate_right(sibling);
                    self.arena[parent]
                        .right
                        .expect("Expected sibling node to be `Some`.")
                } else {
                    sibling
                };

                self.arena[sibling].color = self.arena[parent].color;
                self.arena[parent].color = Color::Black;
                let far = self.arena[sibling].right;
                self.set_color(far, Color::Black);
                self.rotate_left(parent);
            } else {
                let mut sibling = self.arena[parent].left;
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.arena[parent].color = Color::Red;
                    self.rotate_right(parent);
                    sibling = self.arena[parent].left;
                }

                let sibling = match sibling {
                    Some(sibling) => sibling,
                    None => {
                        node = parent;
                        continue;
                    },
                };

                let near = self.arena[sibling].right;
                let far = self.arena[sibling].left;
                if self.color(near) == Color::Black && self.color(far) == Color::Black {
                    self.arena[sibling].color = Color::Red;
                    node = parent;
                    continue;
                }

                let sibling = if self.color(far) == Color::Black {
                    self.set_color(near, Color::Black);
                    self.arena[sibling].color = Color::Red;
                    self.rotate_left(sibling);
                    self.arena[parent]
                        .left
                        .expect("Expected sibling node to be `Some`.")
                } else {
                    sibling
                };

                self.arena[sibling].color = self.arena[parent].color;
                self.arena[parent].color = Color::Black;
                let far = self.arena[sibling].left;
                self.set_color(far, Color::Black);
                self.rotate_right(parent);
            }

            node = self.root.expect("Expected a non-empty tree.");
        }

        self.arena[node].color = Color::Black;
    }

    fn checked_color(&self, handle: Option<Handle>) -> Option<Color> {
        match handle {
            Some(handle) => self.arena.get(handle).map(|node| node.color),
            None => Some(Color::Black),
        }
    }

    /// Returns the black height of the tree if every red black invariant holds.
    pub fn black_height(&self) -> Option<usize> {
        if self.checked_color(self.root)? != Color::Black {
            return None;
        }

        // each entry is a link, the node it hangs from, and the black nodes above it
        let mut stack = vec![(self.root, None, 0)];
        let mut black_height = None;
        let mut visited = 0;
        while let Some((handle, parent, blacks)) = stack.pop() {
            let handle = match handle {
                Some(handle) => handle,
                None => {
                    // absent children count as one black level
                    match black_height {
                        Some(height) if height != blacks + 1 => return None,
                        _ => black_height = Some(blacks + 1),
                    }
                    continue;
                },
            };
            // a node shared by two links would be visited more often than the arena holds nodes
            visited += 1;
            if visited > self.arena.len() {
                return None;
            }
            let node = self.arena.get(handle)?;
            if node.parent != parent {
                return None;
            }
            let blacks = match node.color {
                Color::Black => blacks + 1,
                Color::Red => {
                    let left_color = self.checked_color(node.left)?;
                    let right_color = self.checked_color(node.right)?;
                    if left_color == Color::Red || right_color == Color::Red {
                        return None;
                    }
                    blacks
                },
            };
            stack.push((node.right, Some(handle), blacks));
            stack.push((node.left, Some(handle), blacks));
        }
        black_height
    }
}
