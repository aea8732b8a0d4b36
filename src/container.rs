//! The operation surface shared by every structure in this crate, plus the read-only views
//! that let an external renderer walk a structure without knowing its internals.

/// An RGB color suggested for drawing a structure. It carries no algorithmic meaning.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl DisplayColor {
    pub const GREEN: DisplayColor = DisplayColor { red: 0, green: 128, blue: 0 };
    pub const DARK_RED: DisplayColor = DisplayColor { red: 139, green: 0, blue: 0 };
    pub const BLUE: DisplayColor = DisplayColor { red: 0, green: 0, blue: 255 };
    pub const LIGHT_CORAL: DisplayColor = DisplayColor { red: 240, green: 128, blue: 128 };
    pub const LIGHT_BLUE: DisplayColor = DisplayColor { red: 173, green: 216, blue: 230 };
}

/// The concrete kind of an ordered container.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TreeKind {
    Avl,
    RedBlack,
    TwoFour,
    MaxHeap,
    MinHeap,
}

impl TreeKind {
    /// Every kind, in the order a chooser would list them.
    pub const ALL: [TreeKind; 5] = [
        TreeKind::Avl,
        TreeKind::RedBlack,
        TreeKind::TwoFour,
        TreeKind::MaxHeap,
        TreeKind::MinHeap,
    ];

    /// Returns the human-readable name of the kind.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::TreeKind;
    ///
    /// assert_eq!(TreeKind::RedBlack.name(), "RBT");
    /// assert_eq!(TreeKind::TwoFour.name(), "2-4 Tree");
    /// ```
    pub fn name(self) -> &'static str {
        match self {
            TreeKind::Avl => "AVL Tree",
            TreeKind::RedBlack => "RBT",
            TreeKind::TwoFour => "2-4 Tree",
            TreeKind::MaxHeap => "MaxHeap",
            TreeKind::MinHeap => "MinHeap",
        }
    }

    pub fn color(self) -> DisplayColor {
        match self {
            TreeKind::Avl => DisplayColor::GREEN,
            TreeKind::RedBlack => DisplayColor::DARK_RED,
            TreeKind::TwoFour => DisplayColor::BLUE,
            TreeKind::MaxHeap => DisplayColor::LIGHT_CORAL,
            TreeKind::MinHeap => DisplayColor::LIGHT_BLUE,
        }
    }

    /// Looks a kind up by its human-readable name. Returns `None` for unknown names.
    ///
    /// # Examples
    /// ```
    /// use ordered_trees::TreeKind;
    ///
    /// assert_eq!(TreeKind::from_name("MinHeap"), Some(TreeKind::MinHeap));
    /// assert_eq!(TreeKind::from_name("Splay Tree"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<TreeKind> {
        TreeKind::ALL.iter().cloned().find(|kind| kind.name() == name)
    }
}

/// A read-only handle to a node of a binary-shaped structure.
pub trait NodeView<'a, T> {
    fn value(&self) -> &'a T;

    fn left(&self) -> Option<Box<dyn NodeView<'a, T> + 'a>>;

    fn right(&self) -> Option<Box<dyn NodeView<'a, T> + 'a>>;

    /// A display tag: `"RED"`/`"BLACK"` for red black trees, `"BALANCED"`/`"UNBALANCED"` for
    /// avl trees and `"null"` for heaps.
    fn color(&self) -> &'static str;
}

/// A read-only handle to a node of a multi-way structure such as the 2-4 tree.
pub trait MultiwayView<'a, T> {
    fn key_count(&self) -> usize;

    fn key(&self, index: usize) -> Option<&'a T>;

    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<Box<dyn MultiwayView<'a, T> + 'a>>;

    fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }
}

/// The uniform contract implemented by `AvlSet`, `RedBlackSet`, `TwoFourSet` and `Heap`.
///
/// Elements are unique: inserting a value that is already present leaves the container
/// untouched.
///
/// # Examples
/// ```
/// use ordered_trees::{AvlSet, OrderedContainer, RedBlackSet};
///
/// fn fill(container: &mut dyn OrderedContainer<u32>) {
///     for value in &[5, 1, 4, 1, 3] {
///         container.insert(*value);
///     }
/// }
///
/// let mut avl: AvlSet<u32> = AvlSet::new();
/// let mut red_black: RedBlackSet<u32> = RedBlackSet::new();
/// fill(&mut avl);
/// fill(&mut red_black);
/// assert_eq!(avl.traverse(), vec![&1, &3, &4, &5]);
/// assert_eq!(red_black.traverse(), avl.traverse());
/// ```
pub trait OrderedContainer<T>
where
    T: Ord,
{
    fn kind(&self) -> TreeKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn color(&self) -> DisplayColor {
        self.kind().color()
    }

    /// Inserts a value. Returns `false` if the value was already present.
    fn insert(&mut self, value: T) -> bool;

    /// Deletes a value. Returns `false` if the value was not present.
    fn delete(&mut self, value: &T) -> bool;

    fn contains(&self, value: &T) -> bool;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every element in ascending order.
    fn traverse(&self) -> Vec<&T>;

    /// Returns a view of the root for binary-shaped structures. Returns `None` if the
    /// structure is empty or is not binary-shaped.
    fn root_view<'a>(&'a self) -> Option<Box<dyn NodeView<'a, T> + 'a>>;

    /// Walks the whole structure and checks its balancing and ordering invariants, and that
    /// the maintained length matches the number of reachable elements.
    fn check_invariants(&self) -> bool;
}
