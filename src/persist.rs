//! Whole-structure save and load.
//!
//! A saved structure is framed as the magic bytes `OTRE`, a one byte format version, the
//! big-endian `u64` length of the payload, and the payload itself: the bincode encoding of an
//! `AnyTree<T>`. The variant tag in the payload records which structure was saved, so loading
//! recovers the structure type from the stream alone.

use crate::avl_tree::AvlSet;
use crate::container::{MultiwayView, NodeView, OrderedContainer, TreeKind};
use crate::heap::{Heap, HeapOrder};
use crate::red_black_tree::RedBlackSet;
use crate::two_four_tree::TwoFourSet;
use bincode::{deserialize, serialize};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error;
use std::fmt;
use std::io::{self, Read, Write};
use std::result;

pub const MAGIC: &[u8; 4] = b"OTRE";
pub const VERSION: u8 = 1;

#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    SerdeError(bincode::Error),
    /// The stream does not start with the expected magic bytes.
    InvalidHeader,
    UnsupportedVersion(u8),
    /// The payload decoded, but the structure it describes breaks its own invariants.
    Corrupted(TreeKind),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IOError(err)
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Error {
        Error::SerdeError(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IOError(error) => Some(error),
            Error::SerdeError(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IOError(error) => write!(f, "{}", error),
            Error::SerdeError(error) => write!(f, "{}", error),
            Error::InvalidHeader => write!(f, "not a saved tree: missing magic bytes"),
            Error::UnsupportedVersion(version) => {
                write!(f, "unsupported format version {} (expected {})", version, VERSION)
            },
            Error::Corrupted(kind) => write!(f, "saved {} breaks its invariants", kind.name()),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Any one of the ordered containers, tagged with its structure type.
///
/// # Examples
/// ```
/// use ordered_trees::{AnyTree, OrderedContainer, TreeKind};
///
/// let mut tree = AnyTree::new(TreeKind::TwoFour);
/// tree.insert(2);
/// tree.insert(1);
///
/// assert_eq!(tree.name(), "2-4 Tree");
/// assert_eq!(tree.traverse(), vec![&1, &2]);
/// ```
#[derive(Serialize, Deserialize)]
pub enum AnyTree<T> {
    Avl(AvlSet<T>),
    RedBlack(RedBlackSet<T>),
    TwoFour(TwoFourSet<T>),
    Heap(Heap<T>),
}

impl<T> AnyTree<T>
where
    T: Ord,
{
    /// Constructs a new, empty structure of the given kind.
    pub fn new(kind: TreeKind) -> Self {
        match kind {
            TreeKind::Avl => AnyTree::Avl(AvlSet::new()),
            TreeKind::RedBlack => AnyTree::RedBlack(RedBlackSet::new()),
            TreeKind::TwoFour => AnyTree::TwoFour(TwoFourSet::new()),
            TreeKind::MaxHeap => AnyTree::Heap(Heap::new(HeapOrder::Max)),
            TreeKind::MinHeap => AnyTree::Heap(Heap::new(HeapOrder::Min)),
        }
    }

    /// Returns the wrapped structure as a trait object.
    pub fn as_container(&self) -> &dyn OrderedContainer<T> {
        match self {
            AnyTree::Avl(set) => set,
            AnyTree::RedBlack(set) => set,
            AnyTree::TwoFour(set) => set,
            AnyTree::Heap(heap) => heap,
        }
    }

    /// Returns the wrapped structure as a mutable trait object.
    pub fn as_container_mut(&mut self) -> &mut dyn OrderedContainer<T> {
        match self {
            AnyTree::Avl(set) => set,
            AnyTree::RedBlack(set) => set,
            AnyTree::TwoFour(set) => set,
            AnyTree::Heap(heap) => heap,
        }
    }

    /// Returns an n-ary view of the root for the 2-4 tree. Returns `None` for every other
    /// structure and for an empty tree.
    pub fn root_view_multiway<'a>(&'a self) -> Option<Box<dyn MultiwayView<'a, T> + 'a>> {
        match self {
            AnyTree::TwoFour(set) => set.root_view_multiway(),
            _ => None,
        }
    }
}

impl<T> OrderedContainer<T> for AnyTree<T>
where
    T: Ord,
{
    fn kind(&self) -> TreeKind {
        self.as_container().kind()
    }

    fn insert(&mut self, value: T) -> bool {
        self.as_container_mut().insert(value)
    }

    fn delete(&mut self, value: &T) -> bool {
        self.as_container_mut().delete(value)
    }

    fn contains(&self, value: &T) -> bool {
        self.as_container().contains(value)
    }

    fn clear(&mut self) {
        self.as_container_mut().clear()
    }

    fn len(&self) -> usize {
        self.as_container().len()
    }

    fn traverse(&self) -> Vec<&T> {
        self.as_container().traverse()
    }

    fn root_view<'a>(&'a self) -> Option<Box<dyn NodeView<'a, T> + 'a>> {
        self.as_container().root_view()
    }

    fn check_invariants(&self) -> bool {
        self.as_container().check_invariants()
    }
}

impl<T> From<AvlSet<T>> for AnyTree<T> {
    fn from(set: AvlSet<T>) -> Self {
        AnyTree::Avl(set)
    }
}

impl<T> From<RedBlackSet<T>> for AnyTree<T> {
    fn from(set: RedBlackSet<T>) -> Self {
        AnyTree::RedBlack(set)
    }
}

impl<T> From<TwoFourSet<T>> for AnyTree<T> {
    fn from(set: TwoFourSet<T>) -> Self {
        AnyTree::TwoFour(set)
    }
}

impl<T> From<Heap<T>> for AnyTree<T> {
    fn from(heap: Heap<T>) -> Self {
        AnyTree::Heap(heap)
    }
}

/// Writes `tree` to `writer`.
pub fn save<T, W>(tree: &AnyTree<T>, writer: &mut W) -> Result<()>
where
    T: Ord + Serialize,
    W: Write,
{
    let payload = serialize(tree)?;
    writer.write_all(MAGIC)?;
    writer.write_u8(VERSION)?;
    writer.write_u64::<BigEndian>(payload.len() as u64)?;
    writer.write_all(&payload)?;
    writer.flush()?;
    debug!("saved {} with {} values in {} bytes", tree.name(), tree.len(), payload.len());
    Ok(())
}

/// Reads a structure previously written by `save`. The structure type comes from the stream.
/// A structure whose invariants do not hold is rejected with `Error::Corrupted`.
pub fn load<T, R>(reader: &mut R) -> Result<AnyTree<T>>
where
    T: Ord + DeserializeOwned,
    R: Read,
{
    let mut magic = [0; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(Error::InvalidHeader);
    }

    let version = reader.read_u8()?;
    if version != VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    let size = reader.read_u64::<BigEndian>()?;
    let mut payload = Vec::new();
    reader.take(size).read_to_end(&mut payload)?;
    if payload.len() as u64 != size {
        return Err(Error::IOError(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "payload is shorter than its declared length",
        )));
    }

    let tree: AnyTree<T> = deserialize(&payload)?;
    if !tree.check_invariants() {
        warn!("rejected saved {}: invariants do not hold", tree.name());
        return Err(Error::Corrupted(tree.kind()));
    }
    debug!("loaded {} with {} values", tree.name(), tree.len());
    Ok(tree)
}

/// Encodes `tree` into a framed byte vector.
pub fn to_bytes<T>(tree: &AnyTree<T>) -> Result<Vec<u8>>
where
    T: Ord + Serialize,
{
    let mut bytes = Vec::new();
    save(tree, &mut bytes)?;
    Ok(bytes)
}

/// Decodes a structure from a framed byte slice.
pub fn from_bytes<T>(mut bytes: &[u8]) -> Result<AnyTree<T>>
where
    T: Ord + DeserializeOwned,
{
    load(&mut bytes)
}

#[cfg(test)]
mod tests {
    use super::{from_bytes, to_bytes, AnyTree, Error, MAGIC, VERSION};
    use crate::container::{OrderedContainer, TreeKind};

    #[test]
    fn test_header() {
        let tree: AnyTree<u32> = AnyTree::new(TreeKind::Avl);
        let bytes = to_bytes(&tree).unwrap();
        assert_eq!(&bytes[..4], MAGIC);
        assert_eq!(bytes[4], VERSION);
    }

    #[test]
    fn test_round_trip_keeps_kind() {
        for kind in TreeKind::ALL.iter() {
            let mut tree = AnyTree::new(*kind);
            for value in &[5u32, 3, 8, 1, 9] {
                tree.insert(*value);
            }
            let loaded: AnyTree<u32> = from_bytes(&to_bytes(&tree).unwrap()).unwrap();
            assert_eq!(loaded.kind(), *kind);
            assert_eq!(loaded.traverse(), vec![&1, &3, &5, &8, &9]);
        }
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = to_bytes(&AnyTree::<u32>::new(TreeKind::Avl)).unwrap();
        bytes[0] = b'X';
        match from_bytes::<u32>(&bytes) {
            Err(Error::InvalidHeader) => {},
            _ => panic!("Expected `Error::InvalidHeader`."),
        }
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = to_bytes(&AnyTree::<u32>::new(TreeKind::Avl)).unwrap();
        bytes[4] = VERSION + 1;
        match from_bytes::<u32>(&bytes) {
            Err(Error::UnsupportedVersion(version)) => assert_eq!(version, VERSION + 1),
            _ => panic!("Expected `Error::UnsupportedVersion`."),
        }
    }

    #[test]
    fn test_root_view_multiway() {
        let mut tree = AnyTree::new(TreeKind::TwoFour);
        tree.insert(1);
        assert!(tree.root_view().is_none());
        assert_eq!(tree.root_view_multiway().unwrap().key(0), Some(&1));

        let mut tree = AnyTree::new(TreeKind::Avl);
        tree.insert(1);
        assert!(tree.root_view().is_some());
        assert!(tree.root_view_multiway().is_none());
    }
}
