use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::config::Config;
use crate::cursor;
use crate::error::Error;
use crate::error::Result;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// A hash map backed by the neighborhood/chaining [`HashTable`].
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement `Hash + Eq`
/// and uses a configurable hasher builder `S` to hash keys.
///
/// Insertion never overwrites: [`insert`](Self::insert) on a key that is
/// already present leaves the stored value untouched. Use
/// [`get_mut`](Self::get_mut) or the [`entry`](Self::entry) API to update
/// values.
///
/// Iteration visits entries in bucket order, which depends on the hashes and
/// on the table's growth history, not on insertion order.
///
/// Cloning rebuilds the map by inserting the source's entries in iteration
/// order; the clone compares equal but may be laid out differently.
#[derive(Clone)]
pub struct HashMap<K, V, S> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k).is_some_and(|other_v| v == other_v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> HashMap<K, V, S> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str, DefaultHashBuilder> = HashMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the table configuration.
    pub fn config(&self) -> Config {
        self.table.config()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns a copy of the map's hasher builder.
    pub fn hash_function(&self) -> S
    where
        S: Clone,
    {
        self.hash_builder.clone()
    }

    /// Removes all elements and resets the map to its initial capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let mut map: HashMap<i32, i32, DefaultHashBuilder> = (0..100).map(|i| (i, i)).collect();
    /// assert!(map.capacity() > 24);
    ///
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 24);
    /// assert!(map.begin() == map.end());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Swaps the contents of two maps, including their hashers, in constant
    /// time.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Returns an iterator over the key-value pairs of the map, in bucket
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let map: HashMap<i32, &str, DefaultHashBuilder> = HashMap::from([(1, "a"), (2, "b")]);
    ///
    /// for (key, value) in map.iter() {
    ///     println!("Key: {}, Value: {}", key, value);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the entries with mutable references to the
    /// values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values of the map.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Returns an iterator that removes and yields all key-value pairs from the
    /// map.
    ///
    /// After calling `drain()`, the map is empty and keeps its capacity.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Returns a cursor at the first entry, equal to [`end`](Self::end) for an
    /// empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::Error;
    /// # use hop_chain::HashMap;
    /// #
    /// let map: HashMap<i32, i32, DefaultHashBuilder> = HashMap::from([(1, 10)]);
    ///
    /// let mut cursor = map.begin();
    /// assert_eq!(cursor.get(), Some((&1, &10)));
    /// cursor.move_next().unwrap();
    /// assert!(cursor == map.end());
    /// assert_eq!(cursor.move_next(), Err(Error::InvalidIterator));
    /// ```
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor {
            inner: self.table.begin(),
        }
    }

    /// Returns the past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor {
            inner: self.table.end(),
        }
    }

    /// Returns an exclusive cursor at the first entry.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut {
            inner: self.table.begin_mut(),
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash map with the given hasher builder and the default
    /// configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use hop_chain::HashMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let map: HashMap<i32, String, _> = HashMap::with_hasher(SimpleHasher);
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 24);
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Creates a new hash map able to hold `capacity` entries without growing.
    ///
    /// Uses [`Config::default`]; see
    /// [`with_config_capacity_and_hasher`](Self::with_config_capacity_and_hasher)
    /// to pre-size a map with custom parameters.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if `capacity` cannot be represented.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates a new hash map with a custom table configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::Config;
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let config = Config::default().with_initial_capacity(16).with_neighborhood(4);
    /// let map: HashMap<u32, u32, _> =
    ///     HashMap::with_config_and_hasher(config, DefaultHashBuilder::default()).unwrap();
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn with_config_and_hasher(config: Config, hash_builder: S) -> Result<Self> {
        Ok(Self {
            table: HashTable::with_config(config)?,
            hash_builder,
        })
    }

    /// Creates a new hash map with a custom configuration, pre-sized to hold
    /// `capacity` entries without growing.
    ///
    /// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig) for a
    /// rejected configuration and
    /// [`Error::CapacityOverflow`](crate::Error::CapacityOverflow) when
    /// `capacity` cannot be represented.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::Config;
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let config = Config::default().with_initial_capacity(10).with_neighborhood(4);
    /// let map: HashMap<u32, u32, _> =
    ///     HashMap::with_config_capacity_and_hasher(config, 100, DefaultHashBuilder::default())
    ///         .unwrap();
    /// assert_eq!(map.capacity(), 160);
    /// ```
    pub fn with_config_capacity_and_hasher(
        config: Config,
        capacity: usize,
        hash_builder: S,
    ) -> Result<Self> {
        Ok(Self {
            table: HashTable::with_config_and_capacity(config, capacity)?,
            hash_builder,
        })
    }

    /// Builds a map from an iterator of pairs using `hash_builder`.
    ///
    /// Later duplicates of a key are ignored, following
    /// [`insert`](Self::insert).
    pub fn from_iter_with_hasher<I>(iter: I, hash_builder: S) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_hasher(hash_builder);
        map.extend(iter);
        map
    }

    /// Grows the map so that at least `additional` more entries fit without a
    /// rehash.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the required capacity cannot be
    /// represented.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Like [`reserve`](Self::reserve), but returns
    /// [`Error::CapacityOverflow`](crate::Error::CapacityOverflow) instead of
    /// panicking.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.table.try_reserve(additional)
    }

    /// Inserts a key-value pair if the key is absent.
    ///
    /// Returns `true` if the pair was inserted. If the key is already present
    /// the map is left unchanged, the stored value is kept, and `value` is
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str, DefaultHashBuilder> = HashMap::new();
    /// assert!(map.insert(37, "a"));
    /// assert!(!map.insert(37, "b"));
    /// assert_eq!(map.get(&37), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(_) => false,
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                true
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str, DefaultHashBuilder> = HashMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find_mut(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a reference to the value for `key`, or
    /// [`Error::KeyNotFound`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::Error;
    /// # use hop_chain::HashMap;
    /// #
    /// let map: HashMap<i32, &str, DefaultHashBuilder> = HashMap::from([(1, "a")]);
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value for `key`, or
    /// [`Error::KeyNotFound`].
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let mut map: HashMap<&str, u32, DefaultHashBuilder> = HashMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *map.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(map.at(&"a"), Ok(&2));
    /// assert_eq!(map.at(&"b"), Ok(&1));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a cursor at the entry for `key`, or the end cursor if the key
    /// is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let map: HashMap<i32, &str, DefaultHashBuilder> = HashMap::from([(1, "a")]);
    /// assert_eq!(map.find(&1).value(), Some(&"a"));
    /// assert!(map.find(&2) == map.end());
    /// ```
    pub fn find(&self, key: &K) -> Cursor<'_, K, V> {
        let hash = self.hash_builder.hash_one(key);
        Cursor {
            inner: self.table.find_cursor(hash, |(k, _)| k == key),
        }
    }

    /// Returns an exclusive cursor at the entry for `key`, or at the end if
    /// the key is absent.
    pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K, V> {
        let hash = self.hash_builder.hash_one(key);
        CursorMut {
            inner: self.table.find_cursor_mut(hash, |(k, _)| k == key),
        }
    }

    /// Removes a key from the map, returning `true` if it was present.
    ///
    /// Erasing an absent key is a no-op.
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str, DefaultHashBuilder> = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key)
    }

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str, DefaultHashBuilder> = HashMap::new();
    ///
    /// map.entry(1).or_insert("a");
    /// map.entry(2).or_insert("b");
    /// map.entry(1).or_insert("c");
    ///
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), Some(&"b"));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Returns placement statistics of the underlying table.
    #[cfg(any(test, feature = "stats"))]
    pub fn stats(&self) -> crate::hash_table::TableStats {
        self.table.stats()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new hash map using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new hash map able to hold `capacity` entries without growing,
    /// using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::DefaultHashBuilder;
    /// # use hop_chain::HashMap;
    /// #
    /// let map: HashMap<i32, String, DefaultHashBuilder> = HashMap::with_capacity(100);
    /// assert!(map.capacity() >= 125);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates a new hash map with a custom configuration and the default
    /// hasher builder.
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_config_and_hasher(config, S::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts every pair whose key is not already present.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_iter_with_hasher(iter, S::default())
    }
}

impl<K, V, S, const N: usize> From<[(K, V); N]> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Replaces the value in the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}

/// A shared cursor into a [`HashMap`].
///
/// See [`cursor`](crate::cursor) for the positioning rules.
pub struct Cursor<'a, K, V> {
    inner: cursor::Cursor<'a, (K, V)>,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K, V> Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.inner.fmt(f)
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// Returns the entry under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.inner.get().map(|(k, v)| (k, v))
    }

    /// Returns the key under the cursor.
    pub fn key(&self) -> Option<&'a K> {
        self.inner.get().map(|(k, _)| k)
    }

    /// Returns the value under the cursor.
    pub fn value(&self) -> Option<&'a V> {
        self.inner.get().map(|(_, v)| v)
    }

    /// Returns `true` if this is the past-the-end cursor.
    pub fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// Advances to the next entry, failing with [`Error::InvalidIterator`] at
    /// the end.
    pub fn move_next(&mut self) -> Result<()> {
        self.inner.move_next()
    }
}

/// An exclusive cursor into a [`HashMap`]; keys stay immutable.
pub struct CursorMut<'a, K, V> {
    inner: cursor::CursorMut<'a, (K, V)>,
}

impl<K, V> Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.inner.fmt(f)
    }
}

impl<'a, K, V> CursorMut<'a, K, V> {
    /// Returns the entry under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<(&K, &V)> {
        self.inner.get().map(|(k, v)| (k, v))
    }

    /// Returns the key under the cursor.
    pub fn key(&self) -> Option<&K> {
        self.inner.get().map(|(k, _)| k)
    }

    /// Returns a mutable reference to the value under the cursor.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.inner.get_mut().map(|(_, v)| v)
    }

    /// Converts the cursor into a mutable reference to the value.
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        self.inner.into_mut().map(|(_, v)| v)
    }

    /// Returns `true` if this is the past-the-end cursor.
    pub fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// Advances to the next entry, failing with [`Error::InvalidIterator`] at
    /// the end.
    pub fn move_next(&mut self) -> Result<()> {
        self.inner.move_next()
    }
}

/// An iterator over the key-value pairs of a `HashMap`.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// A mutable iterator over the key-value pairs of a `HashMap`.
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}


/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}


/// A mutable iterator over the values of a `HashMap`.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}


/// An owning iterator over the key-value pairs of a `HashMap`.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// A draining iterator over the key-value pairs of a `HashMap`.
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Drain<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}
