use alloc::collections::VecDeque;
use alloc::collections::vec_deque;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

use crate::config::Config;
use crate::config::DEFAULT_INITIAL_CAPACITY;
use crate::config::DEFAULT_MAX_LOAD_FACTOR;
use crate::config::DEFAULT_NEIGHBORHOOD;
use crate::cursor::Cursor;
use crate::cursor::CursorMut;
use crate::error::Error;
use crate::error::Result;

/// A bucket's chain. Each entry carries the full hash it was inserted with so
/// that a rehash never has to call back into the user's hasher.
type Chain<V> = VecDeque<(u64, V)>;

fn allocate_buckets<V>(capacity: usize) -> Vec<Chain<V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, VecDeque::new);
    buckets
}

/// Physical position of an entry: bucket index plus position in that bucket's
/// chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Location {
    pub(crate) bucket: usize,
    pub(crate) position: usize,
}

/// Statistics describing how entries are spread over the buckets.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    /// Number of entries in the table
    pub populated: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Buckets holding at least one entry
    pub occupied_buckets: usize,
    /// Front entries stored outside their home bucket
    pub displaced_entries: usize,
    /// Entries stored behind the front of a chain
    pub chained_entries: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
}

#[cfg(any(test, feature = "stats"))]
impl TableStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Statistics ===");
        println!(
            "Population: {} entries in {} buckets ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Bucket Usage: {}/{} occupied",
            self.occupied_buckets, self.capacity
        );
        println!("Displaced: {} entries", self.displaced_entries);
        println!(
            "Chained: {} entries (longest chain {})",
            self.chained_entries, self.longest_chain
        );
    }
}

/// A hash table combining neighborhood probing with per-bucket chaining.
///
/// Every entry has a *home* bucket, `hash % capacity`. A new entry is stored
/// in the first empty bucket among the `neighborhood` buckets that start at
/// its home (wrapping around the end of the table), where it becomes that
/// bucket's only entry. When the whole neighborhood is occupied the entry is
/// appended to its home bucket's chain instead.
///
/// Lookups mirror this: the front entry of every bucket in the neighborhood
/// is checked first, then the full chain of the home bucket. This is complete
/// because of the table's central invariant: **an entry that is not at the
/// front of its chain always lives in its home bucket.** Entries placed in a
/// neighbor are always placed into an empty bucket, and removals only ever
/// move entries towards the front.
///
/// Like the low-level tables it is modelled after, `HashTable<V>` does not
/// hash anything itself: every operation takes the hash and an equality
/// predicate.
///
/// The table grows by doubling its bucket count once the number of entries
/// reaches `capacity * max_load_factor`, so the capacity is always the
/// initial capacity times a power of two.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use hop_chain::hash_table::Entry;
/// # use hop_chain::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::new();
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.find(hash, |p| p.id == 123).unwrap().name, "Alice");
/// ```
pub struct HashTable<V> {
    pub(crate) buckets: Vec<Chain<V>>,
    populated: usize,
    config: Config,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field(
                "chains",
                &self.buckets.iter().map(VecDeque::len).collect::<Vec<_>>(),
            )
            .field("populated", &self.populated)
            .field("capacity", &self.buckets.len())
            .finish()
    }
}

/// Cloning rebuilds the table by re-placing every entry in iteration order
/// into a table of the initial capacity. The clone is equal as a collection
/// but its physical layout may differ from the source.
impl<V> Clone for HashTable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut new_table = Self::from_validated(self.config);
        for chain in &self.buckets {
            for (hash, value) in chain {
                new_table.maybe_resize_rehash();
                new_table.place(*hash, value.clone());
            }
        }

        debug_assert_eq!(new_table.populated, self.populated);
        new_table
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Default number of buckets.
    pub const INITIAL_CAPACITY: usize = DEFAULT_INITIAL_CAPACITY;
    /// Default neighborhood width.
    pub const NEIGHBORHOOD: usize = DEFAULT_NEIGHBORHOOD;
    /// Default growth threshold.
    pub const MAX_LOAD_FACTOR: f64 = DEFAULT_MAX_LOAD_FACTOR;

    /// Creates an empty table with the default [`Config`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), HashTable::<String>::INITIAL_CAPACITY);
    /// ```
    pub fn new() -> Self {
        Self::from_validated(Config::default())
    }

    /// Creates an empty table using `config`.
    ///
    /// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
    /// configuration does not pass [`Config::validate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::Config;
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let config = Config::default().with_initial_capacity(8).with_neighborhood(4);
    /// let table: HashTable<u64> = HashTable::with_config(config).unwrap();
    /// assert_eq!(table.capacity(), 8);
    ///
    /// let bad = Config::default().with_initial_capacity(2);
    /// assert!(HashTable::<u64>::with_config(bad).is_err());
    /// ```
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Creates an empty table able to hold at least `capacity` entries
    /// without growing.
    ///
    /// Uses [`Config::default`]; see
    /// [`with_config_and_capacity`](Self::with_config_and_capacity) for custom
    /// parameters.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if `capacity` cannot be represented.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let table: HashTable<u64> = HashTable::with_capacity(100);
    /// assert!(table.capacity() as f64 * HashTable::<u64>::MAX_LOAD_FACTOR >= 100.0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut table = Self::new();
        table.reserve(capacity);
        table
    }

    /// Creates an empty table with a custom configuration, pre-sized to hold
    /// at least `capacity` entries without growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::Config;
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let config = Config::default().with_initial_capacity(10).with_neighborhood(4);
    /// let table: HashTable<u64> = HashTable::with_config_and_capacity(config, 100).unwrap();
    /// assert_eq!(table.capacity(), 160);
    /// ```
    pub fn with_config_and_capacity(config: Config, capacity: usize) -> Result<Self> {
        let mut table = Self::with_config(config)?;
        table.try_reserve(capacity)?;
        Ok(table)
    }

    fn from_validated(config: Config) -> Self {
        Self {
            buckets: allocate_buckets(config.initial_capacity()),
            populated: 0,
            config,
        }
    }

    /// Returns the configuration this table was built with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Returns the number of buckets.
    ///
    /// This is the initial capacity multiplied by a power of two. It only
    /// changes on growth (doubling) and on [`clear`](Self::clear) (reset to
    /// the initial capacity).
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Removes every entry and resets the table to its initial capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for i in 0..100u64 {
    ///     table.entry(i, |&v: &u64| v == i).or_insert(i);
    /// }
    /// assert!(table.capacity() > 24);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 24);
    /// ```
    pub fn clear(&mut self) {
        log::trace!(
            "clearing {} entries, resetting to {} buckets",
            self.populated,
            self.config.initial_capacity()
        );
        self.buckets = allocate_buckets(self.config.initial_capacity());
        self.populated = 0;
    }

    /// Grows the table so that at least `additional` more entries fit without
    /// another rehash.
    ///
    /// Growth happens in doublings, so the capacity remains the initial
    /// capacity times a power of two.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the required bucket count cannot be
    /// represented. Use [`try_reserve`](Self::try_reserve) to handle that case.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            panic!("{err}");
        }
    }

    /// Like [`reserve`](Self::reserve), but reports an unrepresentable
    /// capacity as [`Error::CapacityOverflow`](crate::Error::CapacityOverflow)
    /// instead of panicking. The table is left unchanged on error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::Error;
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<u64> = HashTable::new();
    /// assert_eq!(table.try_reserve(usize::MAX), Err(Error::CapacityOverflow));
    /// assert_eq!(table.capacity(), 24);
    ///
    /// table.try_reserve(100).unwrap();
    /// assert!(table.capacity() >= 125);
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let wanted = self
            .populated
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        if wanted == 0 {
            return Ok(());
        }

        let mut capacity = self.buckets.len();
        while self.config.needs_growth(wanted - 1, capacity) {
            capacity = capacity.checked_mul(2).ok_or(Error::CapacityOverflow)?;
        }

        let bytes = capacity
            .checked_mul(core::mem::size_of::<Chain<V>>())
            .ok_or(Error::CapacityOverflow)?;
        if bytes > isize::MAX as usize {
            return Err(Error::CapacityOverflow);
        }

        if capacity != self.buckets.len() {
            log::trace!("reserving room for {wanted} entries");
            self.resize_rehash(capacity);
        }
        Ok(())
    }

    #[inline]
    fn home_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Locates the entry matching `hash`/`eq`.
    ///
    /// First the front entry of each bucket in the neighborhood, then the
    /// whole home chain. Non-front entries outside the home chain cannot
    /// exist, so the two passes together are exhaustive.
    pub(crate) fn search(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<Location> {
        let capacity = self.buckets.len();
        let home = self.home_index(hash);

        for offset in 0..self.config.neighborhood() {
            let bucket = (home + offset) % capacity;
            if let Some((front_hash, front)) = self.buckets[bucket].front() {
                if *front_hash == hash && eq(front) {
                    return Some(Location {
                        bucket,
                        position: 0,
                    });
                }
            }
        }

        self.buckets[home]
            .iter()
            .position(|(entry_hash, entry)| *entry_hash == hash && eq(entry))
            .map(|position| Location {
                bucket: home,
                position,
            })
    }

    /// Stores a new entry without checking for duplicates or growth.
    ///
    /// The entry goes into the first empty bucket of its neighborhood or, if
    /// there is none, to the back of its home chain.
    fn place(&mut self, hash: u64, value: V) -> Location {
        let capacity = self.buckets.len();
        let home = self.home_index(hash);
        self.populated += 1;

        for offset in 0..self.config.neighborhood() {
            let bucket = (home + offset) % capacity;
            if self.buckets[bucket].is_empty() {
                self.buckets[bucket].push_back((hash, value));
                return Location {
                    bucket,
                    position: 0,
                };
            }
        }

        let chain = &mut self.buckets[home];
        chain.push_back((hash, value));
        Location {
            bucket: home,
            position: chain.len() - 1,
        }
    }

    fn remove_at(&mut self, location: Location) -> Option<V> {
        let chain = &mut self.buckets[location.bucket];
        let removed = if location.position == 0 {
            chain.pop_front()
        } else {
            chain.remove(location.position)
        };

        let (_, value) = removed?;
        self.populated -= 1;
        Some(value)
    }

    #[inline]
    fn maybe_resize_rehash(&mut self) {
        if self.config.needs_growth(self.populated, self.buckets.len()) {
            self.resize_rehash(self.buckets.len() * 2);
        }
    }

    /// Moves every entry into a freshly allocated table of `capacity` buckets.
    ///
    /// The new bucket vector is allocated before the old one is detached and
    /// entries are moved with their stored hashes, so the table is never
    /// observable in a half-migrated state.
    #[cold]
    fn resize_rehash(&mut self, capacity: usize) {
        debug_assert!(capacity > self.buckets.len());

        let old_capacity = self.buckets.len();
        let old_buckets = core::mem::replace(&mut self.buckets, allocate_buckets(capacity));
        let migrated = self.populated;
        self.populated = 0;

        for chain in old_buckets {
            for (hash, value) in chain {
                self.place(hash, value);
            }
        }

        debug_assert_eq!(self.populated, migrated);
        log::trace!("rehashed {migrated} entries from {old_capacity} to {capacity} buckets");
    }

    pub(crate) fn value_at(&self, location: Location) -> Option<&V> {
        self.buckets
            .get(location.bucket)?
            .get(location.position)
            .map(|(_, value)| value)
    }

    pub(crate) fn value_at_mut(&mut self, location: Location) -> Option<&mut V> {
        self.buckets
            .get_mut(location.bucket)?
            .get_mut(location.position)
            .map(|(_, value)| value)
    }

    /// The unique past-the-end location: one past the last entry of the last
    /// bucket, whether or not that bucket is empty.
    pub(crate) fn end_location(&self) -> Location {
        let last = self.buckets.len() - 1;
        Location {
            bucket: last,
            position: self.buckets[last].len(),
        }
    }

    /// First entry of the first non-empty bucket, or position 0 of the last
    /// bucket when every earlier bucket is empty.
    pub(crate) fn begin_location(&self) -> Location {
        let last = self.buckets.len() - 1;
        let bucket = self.buckets[..last]
            .iter()
            .position(|chain| !chain.is_empty())
            .unwrap_or(last);
        Location {
            bucket,
            position: 0,
        }
    }

    /// Location following `location` in bucket-then-chain order.
    ///
    /// Must not be called with the end location.
    pub(crate) fn next_location(&self, location: Location) -> Location {
        let last = self.buckets.len() - 1;
        let Location {
            mut bucket,
            mut position,
        } = location;

        position += 1;
        if position < self.buckets[bucket].len() || bucket == last {
            return Location { bucket, position };
        }

        bucket += 1;
        while bucket != last && self.buckets[bucket].is_empty() {
            bucket += 1;
        }
        Location {
            bucket,
            position: 0,
        }
    }

    /// Returns a cursor at the first entry, equal to [`end`](Self::end) when
    /// the table is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert!(table.begin() == table.end());
    ///
    /// table.entry(7, |&v: &u64| v == 7).or_insert(7);
    /// let mut cursor = table.begin();
    /// assert_eq!(cursor.get(), Some(&7));
    /// cursor.move_next().unwrap();
    /// assert!(cursor.is_end());
    /// assert!(cursor.move_next().is_err());
    /// ```
    pub fn begin(&self) -> Cursor<'_, V> {
        Cursor::new(self, self.begin_location())
    }

    /// Returns the past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, V> {
        Cursor::new(self, self.end_location())
    }

    /// Returns an exclusive cursor at the first entry.
    pub fn begin_mut(&mut self) -> CursorMut<'_, V> {
        let location = self.begin_location();
        CursorMut::new(self, location)
    }

    /// Returns a cursor at the matching entry, or the end cursor if there is
    /// none.
    pub fn find_cursor(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Cursor<'_, V> {
        let location = self
            .search(hash, eq)
            .unwrap_or_else(|| self.end_location());
        Cursor::new(self, location)
    }

    /// Returns an exclusive cursor at the matching entry, or at the end if
    /// there is none.
    pub fn find_cursor_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> CursorMut<'_, V> {
        let location = self
            .search(hash, eq)
            .unwrap_or_else(|| self.end_location());
        CursorMut::new(self, location)
    }

    /// Finds an entry by hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(42, |&v: &u64| v == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&v| v == 42), Some(&42));
    /// assert_eq!(table.find(43, |&v| v == 43), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let location = self.search(hash, eq)?;
        self.value_at(location)
    }

    /// Finds an entry by hash and equality predicate, returning a mutable
    /// reference.
    ///
    /// Whatever part of the value `eq` and the hash were derived from must
    /// not be changed through this reference.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let location = self.search(hash, eq)?;
        self.value_at_mut(location)
    }

    /// Removes and returns the matching entry, if any.
    ///
    /// A match at the front of a neighborhood bucket is popped in constant
    /// time. A match further down the home chain is removed from its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(1, |&v: &u64| v == 1).or_insert(1);
    ///
    /// assert_eq!(table.remove(1, |&v| v == 1), Some(1));
    /// assert_eq!(table.remove(1, |&v| v == 1), None);
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let location = self.search(hash, eq)?;
        self.remove_at(location)
    }

    /// Gets the entry for `hash`/`eq` for in-place manipulation.
    ///
    /// Growth is deferred until a vacant entry is actually filled, so looking
    /// up a present key never rehashes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::hash_table::Entry;
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    ///
    /// match table.entry(5, |&(k, _): &(u64, &str)| k == 5) {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert((5, "five"));
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// assert!(matches!(
    ///     table.entry(5, |&(k, _)| k == 5),
    ///     Entry::Occupied(_)
    /// ));
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.search(hash, eq) {
            Some(location) => Entry::Occupied(OccupiedEntry {
                table: self,
                location,
            }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Returns an iterator over all values in bucket-then-chain order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            cursor: self.begin(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator yielding mutable references to all values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            remaining: self.populated,
            buckets: self.buckets.iter_mut(),
            chain: None,
        }
    }

    /// Removes all values, returning them in an iterator.
    ///
    /// The table keeps its current capacity. Values not consumed before the
    /// iterator is dropped are dropped with it.
    pub fn drain(&mut self) -> Drain<'_, V> {
        let capacity = self.buckets.len();
        let buckets = core::mem::replace(&mut self.buckets, allocate_buckets(capacity));
        let remaining = core::mem::take(&mut self.populated);
        Drain {
            inner: IntoIter::new(buckets, remaining),
            _marker: PhantomData,
        }
    }

    /// Computes a histogram of chain lengths: index `n` counts the buckets
    /// holding exactly `n` entries.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let longest = self.buckets.iter().map(VecDeque::len).max().unwrap_or(0);
        let mut hist = alloc::vec![0usize; longest + 1];
        for chain in &self.buckets {
            hist[chain.len()] += 1;
        }
        hist
    }

    /// Returns placement statistics for debugging and tuning.
    #[cfg(any(test, feature = "stats"))]
    pub fn stats(&self) -> TableStats {
        let mut occupied_buckets = 0;
        let mut displaced_entries = 0;
        let mut chained_entries = 0;
        let mut longest_chain = 0;

        for (index, chain) in self.buckets.iter().enumerate() {
            if let Some((hash, _)) = chain.front() {
                occupied_buckets += 1;
                if self.home_index(*hash) != index {
                    displaced_entries += 1;
                }
            }
            chained_entries += chain.len().saturating_sub(1);
            longest_chain = longest_chain.max(chain.len());
        }

        TableStats {
            populated: self.populated,
            capacity: self.buckets.len(),
            occupied_buckets,
            displaced_entries,
            chained_entries,
            longest_chain,
            load_factor: self.populated as f64 / self.buckets.len() as f64,
        }
    }

    /// Pretty-prints the chain-length histogram horizontally using stdout.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_chain_histogram(&self) {
        let hist = self.chain_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("chain histogram ({} buckets):", self.buckets.len());
        for (len, &count) in hist.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", len, "█".repeat(width), count);
        }
    }

    /// Checks every structural invariant, panicking with the table's debug
    /// representation on violation.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.buckets.len();
        let initial = self.config.initial_capacity();
        assert!(
            capacity % initial == 0 && (capacity / initial).is_power_of_two(),
            "capacity {capacity} is not {initial} * 2^k"
        );
        assert_eq!(
            self.buckets.iter().map(VecDeque::len).sum::<usize>(),
            self.populated,
            "{self:?}"
        );

        for (index, chain) in self.buckets.iter().enumerate() {
            for (position, (hash, _)) in chain.iter().enumerate() {
                let home = self.home_index(*hash);
                if position == 0 {
                    let distance = (index + capacity - home) % capacity;
                    assert!(
                        distance < self.config.neighborhood(),
                        "front entry of bucket {index} is {distance} buckets from home {home}"
                    );
                } else {
                    assert_eq!(
                        home, index,
                        "non-front entry at {index}:{position} is outside its home bucket"
                    );
                }
            }
        }
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the stored value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hop_chain::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(*table.entry(3, |&v: &u64| v == 3).or_insert(3), 3);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the value returned by `default` if the entry is vacant.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to an occupied entry's value before any potential inserts.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Inserts `V::default()` if the entry is vacant.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }
}

/// A view into a vacant entry in a [`HashTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts `value`, growing the table first if it has reached its load
    /// factor, and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        self.table.maybe_resize_rehash();
        let location = self.table.place(self.hash, value);
        &mut self.table.buckets[location.bucket][location.position].1
    }
}

/// A view into an occupied entry in a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    location: Location,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value.
    pub fn get(&self) -> &V {
        &self.table.buckets[self.location.bucket][self.location.position].1
    }

    /// Gets a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.buckets[self.location.bucket][self.location.position].1
    }

    /// Converts the entry into a mutable reference bound to the table.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.buckets[self.location.bucket][self.location.position].1
    }

    /// Removes the entry from the table and returns its value.
    pub fn remove(self) -> V {
        self.table
            .remove_at(self.location)
            .unwrap_or_else(|| unreachable!("occupied entry points at a live slot"))
    }
}

/// An iterator over the values in a [`HashTable`], in bucket-then-chain
/// order.
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    cursor: Cursor<'a, V>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cursor.get()?;
        self.cursor.step();
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// A mutable iterator over the values in a [`HashTable`].
pub struct IterMut<'a, V> {
    buckets: core::slice::IterMut<'a, Chain<V>>,
    chain: Option<vec_deque::IterMut<'a, (u64, V)>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(value);
            }
            self.chain = Some(self.buckets.next()?.iter_mut());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    buckets: alloc::vec::IntoIter<Chain<V>>,
    chain: Option<vec_deque::IntoIter<(u64, V)>>,
    remaining: usize,
}

impl<V> IntoIter<V> {
    fn new(buckets: Vec<Chain<V>>, remaining: usize) -> Self {
        Self {
            buckets: buckets.into_iter(),
            chain: None,
            remaining,
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(value);
            }
            self.chain = Some(self.buckets.next()?.into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> IntoIterator for HashTable<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buckets, self.populated)
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    inner: IntoIter<V>,
    _marker: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}
