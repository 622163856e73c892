use crate::error::Error;
use crate::error::Result;

/// Number of buckets a freshly constructed (or cleared) table starts with.
pub const DEFAULT_INITIAL_CAPACITY: usize = 24;

/// Number of consecutive buckets, starting at the home bucket, that may host
/// an entry directly.
pub const DEFAULT_NEIGHBORHOOD: usize = 6;

/// Ratio of entries to buckets at which the next insertion doubles the table.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.8;

/// Tuning parameters for a [`HashTable`](crate::HashTable).
///
/// The defaults are [`DEFAULT_INITIAL_CAPACITY`], [`DEFAULT_NEIGHBORHOOD`] and
/// [`DEFAULT_MAX_LOAD_FACTOR`].
///
/// # Examples
///
/// ```rust
/// # use hop_chain::Config;
/// #
/// let config = Config::default()
///     .with_initial_capacity(64)
///     .with_neighborhood(8)
///     .with_max_load_factor(0.75);
/// assert!(config.validate().is_ok());
///
/// let bad = Config::default().with_neighborhood(0);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    initial_capacity: usize,
    neighborhood: usize,
    max_load_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            neighborhood: DEFAULT_NEIGHBORHOOD,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl Config {
    /// Sets the number of buckets the table starts with and returns to on
    /// [`clear`](crate::HashTable::clear).
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the neighborhood width.
    pub fn with_neighborhood(mut self, neighborhood: usize) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Sets the load factor that triggers growth.
    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Initial bucket count.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Neighborhood width.
    pub fn neighborhood(&self) -> usize {
        self.neighborhood
    }

    /// Growth threshold as a fraction of the bucket count.
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Checks that the parameters describe a usable table.
    ///
    /// The neighborhood may not be wider than the initial capacity, since a
    /// wrapping window would then visit the same bucket twice. Capacity only
    /// grows, so this holds for the lifetime of the table.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(Error::InvalidConfig("initial capacity must be at least 1"));
        }
        if self.neighborhood == 0 {
            return Err(Error::InvalidConfig("neighborhood must be at least 1"));
        }
        if self.neighborhood > self.initial_capacity {
            return Err(Error::InvalidConfig(
                "neighborhood must not exceed the initial capacity",
            ));
        }
        if !self.max_load_factor.is_finite()
            || self.max_load_factor <= 0.0
            || self.max_load_factor > 1.0
        {
            return Err(Error::InvalidConfig(
                "max load factor must be in the range (0.0, 1.0]",
            ));
        }
        Ok(())
    }

    /// Returns `true` when a table holding `populated` entries in `capacity`
    /// buckets must grow before accepting another entry.
    #[inline]
    pub(crate) fn needs_growth(&self, populated: usize, capacity: usize) -> bool {
        populated as f64 >= capacity as f64 * self.max_load_factor
    }
}
