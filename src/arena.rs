//! Index-addressed node pool. Links between pooled objects are `Handle`s rather than
//! references, so a structure may hold cyclic navigation links (such as parent pointers)
//! while the pool stays the sole owner of every object.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object stored in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    chunk: u32,
    block: u32,
}

#[derive(Serialize, Deserialize)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A pool that only stores a single type of object.
///
/// Objects are stored in fixed-size chunks so that growing the pool never moves existing
/// objects. Freed blocks are threaded onto a free list and reused by later allocations.
///
/// # Examples
///
/// ```
/// use ordered_trees::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Serialize, Deserialize)]
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>` that holds `chunk_size` objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
        }
    }

    fn block(&self, handle: Handle) -> Option<&Block<T>> {
        self.chunks
            .get(handle.chunk as usize)
            .and_then(|chunk| chunk.get(handle.block as usize))
    }

    fn block_mut(&mut self, handle: Handle) -> Option<&mut Block<T>> {
        self.chunks
            .get_mut(handle.chunk as usize)
            .and_then(|chunk| chunk.get_mut(handle.block as usize))
    }

    /// Stores an object in the pool and returns its handle.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            Some(handle) => {
                let block = &mut self.chunks[handle.chunk as usize][handle.block as usize];
                match mem::replace(block, Block::Occupied(value)) {
                    Block::Vacant(next) => self.head = next,
                    Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
                }
                handle
            },
            None => {
                let needs_chunk = match self.chunks.last() {
                    Some(chunk) => chunk.len() == self.chunk_size,
                    None => true,
                };
                if needs_chunk {
                    self.chunks.push(Vec::with_capacity(self.chunk_size));
                }
                let chunk_index = self.chunks.len() - 1;
                let chunk = &mut self.chunks[chunk_index];
                chunk.push(Block::Occupied(value));
                Handle {
                    chunk: chunk_index as u32,
                    block: (chunk.len() - 1) as u32,
                }
            },
        }
    }

    /// Removes an object from the pool and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not refer to an occupied block.
    pub fn free(&mut self, handle: Handle) -> T {
        let next = self.head;
        let block = match self.block_mut(handle) {
            Some(block) => block,
            None => panic!("Error: attempting to free invalid block."),
        };
        if let Block::Vacant(_) = block {
            panic!("Error: attempting to free vacant block.");
        }
        match mem::replace(block, Block::Vacant(next)) {
            Block::Occupied(value) => {
                self.head = Some(handle);
                self.len -= 1;
                value
            },
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns a reference to an object. Returns `None` if the handle is stale or invalid.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.block(handle) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object. Returns `None` if the handle is stale or
    /// invalid.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.block_mut(handle) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the pool.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks that the free list only visits vacant blocks, visits each of them once, and
    /// that the live count matches the occupied blocks.
    pub fn is_consistent(&self) -> bool {
        let total: usize = self.chunks.iter().map(|chunk| chunk.len()).sum();
        if self.chunks.iter().any(|chunk| chunk.len() > self.chunk_size) {
            return false;
        }
        let mut vacant = 0;
        let mut curr = self.head;
        while let Some(handle) = curr {
            if vacant >= total {
                return false;
            }
            match self.block(handle) {
                Some(Block::Vacant(next)) => curr = *next,
                _ => return false,
            }
            vacant += 1;
        }
        vacant + self.len == total
    }

    /// Drops every object in the pool and releases its chunks.
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.len = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
