//! Two-level cursors over a [`HashTable`].
//!
//! A cursor is a `(bucket, position)` pair plus a borrow of the table. It is
//! either at the end or at a live entry of a non-empty bucket. The end is the
//! position one past the last entry of the *last* bucket, so there is exactly
//! one end cursor per table state.
//!
//! Cursors borrow the table, which statically rules out the invalidation
//! that any insertion (possibly rehashing) or removal would cause.

use core::fmt::Debug;

use crate::error::Error;
use crate::error::Result;
use crate::hash_table::HashTable;
use crate::hash_table::Location;

/// A shared cursor into a [`HashTable`].
///
/// Created by [`HashTable::begin`], [`HashTable::end`] and
/// [`HashTable::find_cursor`].
pub struct Cursor<'a, V> {
    table: &'a HashTable<V>,
    location: Location,
}

impl<V> Clone for Cursor<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Cursor<'_, V> {}

impl<V> PartialEq for Cursor<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.table, other.table) && self.location == other.location
    }
}

impl<V> Eq for Cursor<'_, V> {}

impl<V> Debug for Cursor<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("bucket", &self.location.bucket)
            .field("position", &self.location.position)
            .field("end", &self.is_end())
            .finish()
    }
}

impl<'a, V> Cursor<'a, V> {
    pub(crate) fn new(table: &'a HashTable<V>, location: Location) -> Self {
        Self { table, location }
    }

    /// Returns the value under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&'a V> {
        self.table.value_at(self.location)
    }

    /// Returns `true` if this is the past-the-end cursor.
    pub fn is_end(&self) -> bool {
        self.location == self.table.end_location()
    }

    /// Index of the bucket the cursor is in.
    pub fn bucket(&self) -> usize {
        self.location.bucket
    }

    /// Position within the bucket's chain.
    pub fn position(&self) -> usize {
        self.location.position
    }

    /// Advances to the next entry in bucket-then-chain order.
    ///
    /// Fails with [`Error::InvalidIterator`] if the cursor is already at the
    /// end; the cursor is left unchanged.
    pub fn move_next(&mut self) -> Result<()> {
        if self.is_end() {
            return Err(Error::InvalidIterator);
        }
        self.step();
        Ok(())
    }

    /// Advances without checking for the end.
    pub(crate) fn step(&mut self) {
        self.location = self.table.next_location(self.location);
    }
}

/// An exclusive cursor into a [`HashTable`], allowing values to be modified
/// in place.
///
/// Created by [`HashTable::begin_mut`] and [`HashTable::find_cursor_mut`].
pub struct CursorMut<'a, V> {
    table: &'a mut HashTable<V>,
    location: Location,
}

impl<V> Debug for CursorMut<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorMut")
            .field("bucket", &self.location.bucket)
            .field("position", &self.location.position)
            .field("end", &self.is_end())
            .finish()
    }
}

impl<'a, V> CursorMut<'a, V> {
    pub(crate) fn new(table: &'a mut HashTable<V>, location: Location) -> Self {
        Self { table, location }
    }

    /// Returns the value under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&V> {
        self.table.value_at(self.location)
    }

    /// Returns a mutable reference to the value under the cursor.
    pub fn get_mut(&mut self) -> Option<&mut V> {
        self.table.value_at_mut(self.location)
    }

    /// Converts the cursor into a mutable reference bound to the table.
    pub fn into_mut(self) -> Option<&'a mut V> {
        self.table.value_at_mut(self.location)
    }

    /// Returns `true` if this is the past-the-end cursor.
    pub fn is_end(&self) -> bool {
        self.location == self.table.end_location()
    }

    /// Index of the bucket the cursor is in.
    pub fn bucket(&self) -> usize {
        self.location.bucket
    }

    /// Position within the bucket's chain.
    pub fn position(&self) -> usize {
        self.location.position
    }

    /// Advances to the next entry; see [`Cursor::move_next`].
    pub fn move_next(&mut self) -> Result<()> {
        if self.is_end() {
            return Err(Error::InvalidIterator);
        }
        self.location = self.table.next_location(self.location);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn table_with(hashes: &[u64]) -> HashTable<u64> {
        let mut table = HashTable::new();
        for (i, &hash) in hashes.iter().enumerate() {
            let value = i as u64;
            table.entry(hash, |&v| v == value).or_insert(value);
        }
        table
    }

    fn collect(table: &HashTable<u64>) -> Vec<(usize, usize, u64)> {
        let mut out = Vec::new();
        let mut cursor = table.begin();
        while !cursor.is_end() {
            out.push((cursor.bucket(), cursor.position(), *cursor.get().unwrap()));
            cursor.move_next().unwrap();
        }
        out
    }

    #[test]
    fn walks_chains_before_next_bucket() {
        // Seven entries homed at bucket 2: six fill buckets 2..8, the seventh
        // chains behind bucket 2's front.
        let table = table_with(&[2, 2, 2, 2, 2, 2, 2, 20]);
        assert_eq!(
            collect(&table),
            [
                (2, 0, 0),
                (2, 1, 6),
                (3, 0, 1),
                (4, 0, 2),
                (5, 0, 3),
                (6, 0, 4),
                (7, 0, 5),
                (20, 0, 7),
            ]
        );
    }

    #[test]
    fn end_is_unique_for_a_populated_last_bucket() {
        let table = table_with(&[23, 23]);
        // Bucket 23 holds the first key, the second wrapped to bucket 0.
        let mut cursor = table.begin();
        assert_eq!((cursor.bucket(), cursor.position()), (0, 0));
        cursor.move_next().unwrap();
        assert_eq!((cursor.bucket(), cursor.position()), (23, 0));
        cursor.move_next().unwrap();
        assert_eq!(cursor, table.end());
        assert_eq!((cursor.bucket(), cursor.position()), (23, 1));
        assert_eq!(cursor.move_next(), Err(Error::InvalidIterator));
        assert_eq!(cursor, table.end());
    }

    #[test]
    fn cursors_from_different_tables_differ() {
        let a: HashTable<u64> = HashTable::new();
        let b: HashTable<u64> = HashTable::new();
        assert_eq!(a.end(), a.end());
        assert_ne!(a.end(), b.end());
    }

    #[test]
    fn cursor_mut_updates_in_place() {
        let mut table = table_with(&[1, 4, 9]);
        let mut cursor = table.begin_mut();
        while !cursor.is_end() {
            if let Some(v) = cursor.get_mut() {
                *v += 100;
            }
            cursor.move_next().unwrap();
        }
        assert!(cursor.get().is_none());
        assert_eq!(cursor.move_next(), Err(Error::InvalidIterator));

        let values: Vec<u64> = table.iter().copied().collect();
        assert_eq!(values, [100, 101, 102]);

        let found = table.find_cursor_mut(4, |&v| v == 101).into_mut();
        assert_eq!(found, Some(&mut 101));
    }
}
