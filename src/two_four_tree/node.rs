pub const MAX_KEYS: usize = 3;
pub const MIN_KEYS: usize = 1;

/// A node of a 2-4 tree. A node with no children is a leaf.
#[derive(Serialize, Deserialize)]
pub struct Node<T> {
    pub keys: Vec<T>,
    pub children: Vec<Node<T>>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        let mut keys = Vec::with_capacity(MAX_KEYS);
        keys.push(value);
        Node {
            keys,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.keys.len() >= MAX_KEYS
    }

    // A node with a single key cannot give one up.
    pub fn is_minimal(&self) -> bool {
        self.keys.len() <= MIN_KEYS
    }

    /// Returns the index of the first key that is not less than `value`.
    pub fn find_index(&self, value: &T) -> usize
    where
        T: Ord,
    {
        self.keys.iter().take_while(|key| *key < value).count()
    }

    pub fn holds_at(&self, index: usize, value: &T) -> bool
    where
        T: Ord,
    {
        self.keys.get(index).map_or(false, |key| key == value)
    }
}
