use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::allocator::Allocator;
use crate::allocator::Global;
use crate::err::Error;
use crate::hash_table::HashTable;
use crate::hash_table::Iter as TableIter;

/// The default hash builder used by [`HashMap::try_new`], backed by
/// `foldhash`.
#[cfg(feature = "foldhash")]
pub type DefaultHashBuilder = foldhash::fast::RandomState;

/// Folds a 64-bit hash down to the 32 bits the table consumes.
///
/// Both halves contribute, so hashers that concentrate entropy in the high
/// bits keep distributing well after the table truncates to 31 bits.
#[inline(always)]
fn fold_hash(hash: u64) -> u32 {
    ((hash >> 32) ^ hash) as u32
}

/// A key-value map over the open-addressing [`HashTable`].
///
/// `HashMap<K, V, S, A>` stores pairs where keys implement `Hash + Eq`,
/// hashing them with a configurable builder `S` and folding the result to
/// the 32 bits the table caches per slot. The underlying storage, probing,
/// and growth behavior are exactly those of [`HashTable`].
///
/// Insertion never overwrites: [`add`](HashMap::add) rejects duplicate keys
/// and leaves the existing value untouched. Construction and reservation are
/// fallible and never panic; see [`Error`].
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "foldhash")]
/// # {
/// use probe_map::HashMap;
///
/// let mut map = HashMap::try_new().unwrap();
/// assert!(map.add("a", 1));
/// assert!(map.add("b", 2));
/// assert!(!map.add("a", 3));
///
/// assert_eq!(map.get(&"a"), Some(&1));
/// assert_eq!(map.len(), 2);
/// # }
/// ```
pub struct HashMap<K, V, S, A: Allocator = Global> {
    table: HashTable<K, V, A>,
    hash_builder: S,
}

#[cfg(feature = "foldhash")]
impl<K, V> HashMap<K, V, DefaultHashBuilder, Global>
where
    K: Hash + Eq,
{
    /// Creates a map with the default hasher and the global allocator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_map::HashMap;
    ///
    /// let map: HashMap<u64, u64, _> = HashMap::try_new().unwrap();
    /// assert!(map.is_empty());
    /// ```
    pub fn try_new() -> Result<Self, Error> {
        Self::try_with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a map that can hold at least `entries` entries before its
    /// first resize, with the default hasher and the global allocator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_map::HashMap;
    ///
    /// let map: HashMap<u64, u64, _> = HashMap::try_with_capacity(100).unwrap();
    /// assert!(map.capacity() >= 100);
    /// ```
    pub fn try_with_capacity(entries: usize) -> Result<Self, Error> {
        Self::try_with_capacity_and_hasher(entries, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashMap<K, V, S, Global>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a map with the given hash builder and the global allocator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use probe_map::HashMap;
    ///
    /// let map: HashMap<u64, u64, _> = HashMap::try_with_hasher(RandomState::new()).unwrap();
    /// assert!(map.is_empty());
    /// # }
    /// ```
    pub fn try_with_hasher(hash_builder: S) -> Result<Self, Error> {
        Self::try_with_hasher_in(hash_builder, Global)
    }

    /// Creates a map that can hold at least `entries` entries before its
    /// first resize, with the given hash builder and the global allocator.
    pub fn try_with_capacity_and_hasher(entries: usize, hash_builder: S) -> Result<Self, Error> {
        Self::try_with_capacity_and_hasher_in(entries, hash_builder, Global)
    }
}

impl<K, V, S, A> HashMap<K, V, S, A>
where
    K: Hash + Eq,
    S: BuildHasher,
    A: Allocator,
{
    /// Creates a map with the given hash builder inside `alloc`.
    pub fn try_with_hasher_in(hash_builder: S, alloc: A) -> Result<Self, Error> {
        Ok(Self {
            table: HashTable::try_new_in(alloc)?,
            hash_builder,
        })
    }

    /// Creates a map that can hold at least `entries` entries before its
    /// first resize, with the given hash builder inside `alloc`.
    pub fn try_with_capacity_and_hasher_in(
        entries: usize,
        hash_builder: S,
        alloc: A,
    ) -> Result<Self, Error> {
        Ok(Self {
            table: HashTable::try_with_capacity_in(entries, alloc)?,
            hash_builder,
        })
    }

    fn hash_key(&self, key: &K) -> u32 {
        fold_hash(self.hash_builder.hash_one(key))
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the total slot count of the underlying table.
    ///
    /// Always a power of two of at least 16; the map grows once `len`
    /// reaches 70% of it.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns a reference to the map's allocator.
    pub fn allocator(&self) -> &A {
        self.table.allocator()
    }

    /// Adds a key-value pair, refusing duplicates.
    ///
    /// Returns `true` on success. Returns `false` when an equal key is
    /// already present, or when the table is full and cannot grow; the map
    /// is left unchanged, the existing value is untouched, and the rejected
    /// pair is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use probe_map::HashMap;
    ///
    /// let mut map = HashMap::try_new().unwrap();
    /// assert!(map.add("k", 1));
    /// assert!(!map.add("k", 2));
    /// assert_eq!(map.get(&"k"), Some(&1));
    /// # }
    /// ```
    pub fn add(&mut self, key: K, value: V) -> bool {
        let hash = self.hash_key(&key);
        self.table
            .try_insert(hash, |stored, new| stored == new, key, value)
            .is_ok()
    }

    /// Finds the slot index holding `key`, or `None`.
    ///
    /// The index can be fed to [`remove_at`](HashMap::remove_at); it is
    /// invalidated by any resize.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use probe_map::HashMap;
    ///
    /// let mut map = HashMap::try_new().unwrap();
    /// map.add("k", 7);
    ///
    /// let slot = map.find(&"k").unwrap();
    /// assert_eq!(map.remove_at(slot), Some(("k", 7)));
    /// assert_eq!(map.find(&"k"), None);
    /// # }
    /// ```
    pub fn find(&self, key: &K) -> Option<usize> {
        self.table.find(self.hash_key(key), |stored| stored == key)
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.get(self.hash_key(key), |stored| stored == key)
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use probe_map::HashMap;
    ///
    /// let mut map = HashMap::try_new().unwrap();
    /// map.add("k", 1);
    /// if let Some(value) = map.get_mut(&"k") {
    ///     *value += 10;
    /// }
    /// assert_eq!(map.get(&"k"), Some(&11));
    /// # }
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_key(key);
        self.table.get_mut(hash, |stored| stored == key)
    }

    /// Copies the value stored for `key` out of the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use probe_map::HashMap;
    ///
    /// let mut map = HashMap::try_new().unwrap();
    /// map.add(1u64, 10u64);
    ///
    /// assert_eq!(map.try_get(&1), Some(10));
    /// assert_eq!(map.try_get(&2), None);
    /// # }
    /// ```
    pub fn try_get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.get(key).cloned()
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` and returns its value, or `None` if absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use probe_map::HashMap;
    ///
    /// let mut map = HashMap::try_new().unwrap();
    /// map.add("k", 5);
    ///
    /// assert_eq!(map.remove(&"k"), Some(5));
    /// assert_eq!(map.remove(&"k"), None);
    /// # }
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let hash = self.hash_key(key);
        self.table
            .remove(hash, |stored| stored == key)
            .map(|(_, value)| value)
    }

    /// Removes and returns the entry at `slot`, or `None` when the index is
    /// out of bounds or the slot is empty.
    pub fn remove_at(&mut self, slot: usize) -> Option<(K, V)> {
        self.table.remove_at(slot)
    }

    /// Reserves room for at least `additional` more entries.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.table.try_reserve(additional)
    }

    /// Removes all entries, keeping the current capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the map's entries in arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V, A> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the map's keys in arbitrary order.
    pub fn keys(&self) -> Keys<'_, K, V, A> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the map's values in arbitrary order.
    pub fn values(&self) -> Values<'_, K, V, A> {
        Values { inner: self.iter() }
    }

    /// Makes a deep copy of the map.
    pub fn try_clone(&self) -> Result<Self, Error>
    where
        K: Clone,
        V: Clone,
        S: Clone,
        A: Clone,
    {
        Ok(Self {
            table: self.table.try_clone()?,
            hash_builder: self.hash_builder.clone(),
        })
    }
}

impl<K, V, S, A> Debug for HashMap<K, V, S, A>
where
    K: Debug,
    V: Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S, A> PartialEq for HashMap<K, V, S, A>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    A: Allocator,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S, A> Eq for HashMap<K, V, S, A>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
    A: Allocator,
{
}

impl<'a, K, V, S, A> IntoIterator for &'a HashMap<K, V, S, A>
where
    A: Allocator,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.table.iter(),
        }
    }
}

/// Borrowing iterator over a map's entries.
///
/// Created by [`HashMap::iter`].
pub struct Iter<'a, K, V, A: Allocator> {
    inner: TableIter<'a, K, V, A>,
}

impl<'a, K, V, A: Allocator> Iterator for Iter<'a, K, V, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Borrowing iterator over a map's keys.
///
/// Created by [`HashMap::keys`].
pub struct Keys<'a, K, V, A: Allocator> {
    inner: Iter<'a, K, V, A>,
}

impl<'a, K, V, A: Allocator> Iterator for Keys<'a, K, V, A> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Borrowing iterator over a map's values.
///
/// Created by [`HashMap::values`].
pub struct Values<'a, K, V, A: Allocator> {
    inner: Iter<'a, K, V, A>,
}

impl<'a, K, V, A: Allocator> Iterator for Values<'a, K, V, A> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
