//! A disjoint-set-union (union-find) over a pre-declared universe of
//! elements, translated from `examples/original_source/sigen_core/common/disjoint_set.h`.
//!
//! The phases are strict: `add` every element first, then `setup` to
//! freeze the universe and allocate the internal forest, then use
//! `merge`/`same`/`size`. Calling any of those three before `setup` is a
//! contract violation.

use std::collections::HashMap;
use std::hash::Hash;

struct Forest {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl Forest {
    fn new(n: usize) -> Self {
        Forest {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn root(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.root(self.parent[x]);
        }
        self.parent[x]
    }

    fn same(&mut self, x: usize, y: usize) -> bool {
        self.root(x) == self.root(y)
    }

    fn merge(&mut self, x: usize, y: usize) {
        let x = self.root(x);
        let y = self.root(y);
        if x == y {
            return;
        }
        let (big, small) = if self.size[x] >= self.size[y] { (x, y) } else { (y, x) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
    }

    fn size_of(&mut self, x: usize) -> usize {
        let root = self.root(x);
        self.size[root]
    }
}

/// Union-find over elements of type `T`. See module docs for the phase
/// discipline.
pub struct DisjointSet<T: Eq + Hash + Clone> {
    forward: HashMap<T, usize>,
    forest: Option<Forest>,
}

impl<T: Eq + Hash + Clone> Default for DisjointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> DisjointSet<T> {
    pub fn new() -> Self {
        DisjointSet {
            forward: HashMap::new(),
            forest: None,
        }
    }

    /// Registers `x` in the universe. Panics if called after `setup`.
    pub fn add(&mut self, x: T) {
        assert!(self.forest.is_none(), "cannot add elements after setup");
        let next_id = self.forward.len();
        self.forward.entry(x).or_insert(next_id);
    }

    /// Freezes the universe and allocates the internal forest.
    pub fn setup(&mut self) {
        self.forest = Some(Forest::new(self.forward.len()));
    }

    fn id(&self, x: &T) -> usize {
        *self
            .forward
            .get(x)
            .unwrap_or_else(|| panic!("element was never added to the disjoint set"))
    }

    fn forest_mut(&mut self) -> &mut Forest {
        self.forest.as_mut().expect("DisjointSet used before setup")
    }

    pub fn size(&mut self, x: &T) -> usize {
        let id = self.id(x);
        self.forest_mut().size_of(id)
    }

    pub fn same(&mut self, x: &T, y: &T) -> bool {
        let (a, b) = (self.id(x), self.id(y));
        self.forest_mut().same(a, b)
    }

    pub fn merge(&mut self, x: &T, y: &T) {
        let (a, b) = (self.id(x), self.id(y));
        self.forest_mut().merge(a, b);
    }
}
