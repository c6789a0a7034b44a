//! Sharded map for accumulating values from many threads at once.
//!
//! Keys are spread over a fixed number of shards, each an ordinary
//! [`BTreeMap`] behind its own [`parking_lot::Mutex`]. Updates to the same key
//! always hit the same shard, so they serialize on one lock and never lose
//! writes; updates landing in different shards do not contend.
//!
//! ```
//! use docrank::ConcurrentMap;
//!
//! let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(4);
//! *map.access(7) += 0.5;
//! map.update(7, |v| *v += 0.25);
//! assert_eq!(map.into_ordinary_map().get(&7), Some(&0.75));
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

/// Shard count matching the machine's available parallelism.
pub fn default_shard_count() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Keys that can pick a shard deterministically.
pub trait ShardKey: Ord + Copy {
    /// Index in `0..shard_count`. `shard_count` is never zero.
    fn shard_index(&self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(
            impl ShardKey for $t {
                fn shard_index(&self, shard_count: usize) -> usize {
                    (*self as i128).rem_euclid(shard_count as i128) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A key → value map split into independently locked shards.
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// Create a map with `shard_count` shards (at least one).
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        Self {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    /// Create a map with one shard per available hardware thread.
    pub fn with_default_shards() -> Self {
        Self::new(default_shard_count())
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        &self.shards[key.shard_index(self.shards.len())]
    }

    /// Lock the key's shard and return its value, inserting the default first
    /// if absent. The shard stays locked until the guard is dropped.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        let guard = self.shard(&key).lock();
        MutexGuard::map(guard, |shard| shard.entry(key).or_default())
    }

    /// Run `f` on the key's value (default-inserted) under the shard lock.
    pub fn update<R>(&self, key: K, f: impl FnOnce(&mut V) -> R) -> R
    where
        V: Default,
    {
        let mut shard = self.shard(&key).lock();
        f(shard.entry(key).or_default())
    }

    /// Remove a key under its shard lock.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    /// Total entries across all shards. Locks each shard in turn, so the
    /// count is only exact once writers have finished.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Merge every shard into one ordinary map. Call after all producers
    /// have joined to get a consistent view.
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            merged.extend(shard.lock().iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }

    /// Consume the map and merge its shards without cloning.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.append(&mut shard.into_inner());
        }
        merged
    }
}

impl<K: ShardKey, V> Default for ConcurrentMap<K, V> {
    fn default() -> Self {
        Self::with_default_shards()
    }
}
