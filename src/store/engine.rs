//! Store Engine Module
//!
//! Ties the skip list, TTL registry and volatile LRU together behind one
//! per-instance lock. Every public operation funnels through that lock so the
//! three structures are never observable in an inconsistent state.

use std::fmt::Display;
use std::fs::{self, File};
use std::hash::Hash;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::store::lru::{PutOutcome, VolatileLru};
use crate::store::skiplist::{InsertOutcome, SkipList};
use crate::store::ttl::{ExpiryState, TtlRegistry};
use crate::store::{DEFAULT_MAX_LEVEL, DELIMITER, STORE_FILE, VOLATILE_LRU_THRESHOLD};

// == TTL Status ==
/// Outcome of a `ttl` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlStatus {
    /// Key carries no TTL (or does not exist)
    Persistent,
    /// TTL had elapsed; the key has just been reaped
    Expired,
    /// Seconds left before the key expires
    Remaining(u64),
}

// == Store Options ==
/// Construction parameters for a store instance.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Cap on skip-list tower height
    pub max_level: usize,
    /// Bound on the number of volatile keys held at once
    pub volatile_capacity: usize,
    /// Snapshot file path
    pub store_file: PathBuf,
    /// Seed for the level-assignment random source; entropy when `None`
    pub rng_seed: Option<u64>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            volatile_capacity: VOLATILE_LRU_THRESHOLD,
            store_file: PathBuf::from(STORE_FILE),
            rng_seed: None,
        }
    }
}

// == Store ==
/// Ordered key-value store with per-key TTL and LRU-bounded volatile subset.
///
/// Persistent keys (no TTL) live only in the skip list. Calling
/// [`expire`](Self::expire) makes a key volatile: it gains a registry entry
/// and a slot in the LRU, and from then on can be lazily reaped or evicted.
pub struct SkipStore<K, V> {
    inner: Mutex<StoreInner<K, V>>,
    store_file: PathBuf,
}

struct StoreInner<K, V> {
    list: SkipList<K, V>,
    ttl: TtlRegistry<K>,
    volatile: VolatileLru<K, V>,
}

impl<K, V> SkipStore<K, V>
where
    K: Ord + Eq + Hash + Clone + Display,
    V: Clone,
{
    // == Constructors ==
    /// Creates a store with the given tower cap and default options.
    pub fn new(max_level: usize) -> Self {
        Self::with_options(StoreOptions {
            max_level,
            ..StoreOptions::default()
        })
    }

    pub fn with_options(options: StoreOptions) -> Self {
        let list = match options.rng_seed {
            Some(seed) => SkipList::with_seed(options.max_level, seed),
            None => SkipList::new(options.max_level),
        };
        Self {
            inner: Mutex::new(StoreInner {
                list,
                ttl: TtlRegistry::new(),
                volatile: VolatileLru::new(options.volatile_capacity),
            }),
            store_file: options.store_file,
        }
    }

    // == Insert ==
    /// Binds `key` to `value`.
    ///
    /// An expired key is reaped first and the insertion counts as fresh. A
    /// live volatile key is promoted in the LRU with the new value.
    pub fn insert(&self, key: K, value: V) -> InsertOutcome {
        self.inner.lock().insert(key, value)
    }

    // == Search ==
    /// Looks up `key`, consulting the volatile LRU before the skip list.
    ///
    /// The read path is lazy-only: an expired-but-untouched key is still
    /// returned. Pair with [`ttl`](Self::ttl) when liveness matters.
    pub fn search(&self, key: &K) -> Option<V> {
        self.inner.lock().search(key)
    }

    // == Delete ==
    /// Removes `key` from all three structures, reporting whether it existed.
    pub fn delete(&self, key: &K) -> bool {
        self.inner.lock().delete(key)
    }

    // == Expire ==
    /// Gives `key` a lifetime of `seconds`, overwriting any prior TTL.
    ///
    /// Admitting the key into the volatile LRU may evict the least-recently
    /// used volatile key, which is then cascade-deleted from the store.
    pub fn expire(&self, key: K, seconds: u64) -> Result<()> {
        self.inner.lock().expire(key, seconds)
    }

    // == Ttl ==
    /// Reports the key's liveness; an expired key is reaped on the spot.
    pub fn ttl(&self, key: &K) -> TtlStatus {
        self.inner.lock().ttl(key)
    }

    // == Size ==
    /// Number of keys currently in the skip list.
    pub fn size(&self) -> usize {
        self.inner.lock().list.len()
    }

    /// Highest occupied skip-list level.
    pub fn level(&self) -> usize {
        self.inner.lock().list.level()
    }

    /// Number of volatile keys currently held.
    pub fn volatile_len(&self) -> usize {
        self.inner.lock().volatile.len()
    }

    /// Volatile keys in recency order, most-recent first.
    pub fn volatile_keys(&self) -> Vec<K> {
        self.inner.lock().volatile.keys()
    }

    pub fn volatile_capacity(&self) -> usize {
        self.inner.lock().volatile.capacity()
    }

    /// One-lock snapshot of the observable counters.
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        StoreStats {
            elements: inner.list.len(),
            level: inner.list.level(),
            volatile_entries: inner.volatile.len(),
            volatile_capacity: inner.volatile.capacity(),
        }
    }

    pub fn store_file(&self) -> &Path {
        &self.store_file
    }

    // == Dump ==
    /// Writes every binding in level-0 order as `key:value` lines, truncating
    /// the store file. TTL and LRU state are not persisted. Returns the
    /// number of records written.
    pub fn dump(&self) -> Result<usize>
    where
        V: Display,
    {
        let inner = self.inner.lock();
        if let Some(parent) = self.store_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.store_file)?);
        let mut written = 0;
        for (key, value) in inner.list.iter() {
            writeln!(writer, "{key}{DELIMITER}{value}")?;
            written += 1;
        }
        writer.flush()?;
        info!(records = written, path = %self.store_file.display(), "snapshot written");
        Ok(written)
    }

    // == Load ==
    /// Feeds every well-formed `key:value` line of the store file through the
    /// normal insert path (loading merges into in-memory state). Malformed
    /// records are skipped silently. Returns the number of records inserted.
    pub fn load(&self) -> Result<usize>
    where
        K: FromStr,
        V: FromStr,
    {
        let mut inner = self.inner.lock();
        let reader = BufReader::new(File::open(&self.store_file)?);
        let mut loaded = 0;
        for line in reader.lines() {
            let line = line?;
            let Some((key, value)) = split_record(&line) else {
                if !line.is_empty() {
                    debug!(line = %line, "skipping malformed snapshot record");
                }
                continue;
            };
            let (Ok(key), Ok(value)) = (key.parse::<K>(), value.parse::<V>()) else {
                debug!(line = %line, "skipping unparsable snapshot record");
                continue;
            };
            inner.insert(key, value);
            loaded += 1;
        }
        info!(records = loaded, path = %self.store_file.display(), "snapshot loaded");
        Ok(loaded)
    }

    // == Display ==
    /// Renders every level of the tower, one line per level.
    pub fn render(&self) -> String
    where
        V: Display,
    {
        use std::fmt::Write as _;

        let inner = self.inner.lock();
        let mut out = String::new();
        let _ = writeln!(out, "{:-^72}", "SkipList");
        for level in 0..=inner.list.level() {
            let _ = write!(out, "Level {level}: ");
            for (key, value) in inner.list.iter_level(level) {
                let _ = write!(out, "{key}{DELIMITER}{value};");
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "{:-^72}", "");
        out
    }

    /// Human-readable dump of the whole tower to standard output.
    pub fn display(&self)
    where
        V: Display,
    {
        print!("{}", self.render());
    }
}

impl<K, V> StoreInner<K, V>
where
    K: Ord + Eq + Hash + Clone + Display,
    V: Clone,
{
    fn insert(&mut self, key: K, value: V) -> InsertOutcome {
        match self.ttl.state(&key) {
            ExpiryState::Expired => {
                // reap before the write so the insertion counts as fresh
                self.volatile.remove(&key);
                self.ttl.remove(&key);
                self.list.remove(&key);
                debug!(key = %key, "reaped expired key on insert");
            }
            ExpiryState::Live => {
                self.volatile.put(key.clone(), value.clone());
            }
            ExpiryState::Persistent => {}
        }
        self.list.insert(key, value)
    }

    fn search(&mut self, key: &K) -> Option<V> {
        if let Some(value) = self.volatile.get(key).cloned() {
            return Some(value);
        }
        self.list.get(key).cloned()
    }

    fn delete(&mut self, key: &K) -> bool {
        if self.volatile.remove(key) {
            self.ttl.remove(key);
        }
        self.list.remove(key)
    }

    fn expire(&mut self, key: K, seconds: u64) -> Result<()> {
        let cached = self.volatile.get(&key).cloned();
        let value = match cached {
            Some(value) => value,
            None => match self.list.get(&key) {
                Some(value) => value.clone(),
                None => return Err(StoreError::NotFound(key.to_string())),
            },
        };

        self.ttl.set(key.clone(), seconds);
        if let PutOutcome::Evicted(old) = self.volatile.put(key.clone(), value) {
            self.ttl.remove(&old);
            self.list.remove(&old);
            info!(evicted = %old, admitted = %key, "volatile capacity reached, evicted LRU key");
        }
        debug!(key = %key, seconds, "ttl set");
        Ok(())
    }

    fn ttl(&mut self, key: &K) -> TtlStatus {
        match self.ttl.state(key) {
            ExpiryState::Persistent => TtlStatus::Persistent,
            ExpiryState::Expired => {
                self.volatile.remove(key);
                self.ttl.remove(key);
                self.list.remove(key);
                debug!(key = %key, "reaped expired key on ttl");
                TtlStatus::Expired
            }
            ExpiryState::Live => TtlStatus::Remaining(self.ttl.remaining(key).unwrap_or(0)),
        }
    }
}

// == Store Stats ==
/// Observable counters, captured under a single lock acquisition.
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    pub elements: usize,
    pub level: usize,
    pub volatile_entries: usize,
    pub volatile_capacity: usize,
}

// == Record Parsing ==
/// Splits a snapshot line at the first delimiter. Lines without a delimiter,
/// or with an empty key or value, are malformed.
fn split_record(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(DELIMITER)?;
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

// == Test Support ==
#[cfg(test)]
impl<K, V> SkipStore<K, V>
where
    K: Ord + Eq + Hash + Clone + Display,
    V: Clone,
{
    pub(crate) fn ttl_keys(&self) -> Vec<K> {
        self.inner.lock().ttl.keys().cloned().collect()
    }

    pub(crate) fn level_keys(&self, level: usize) -> Vec<K> {
        self.inner
            .lock()
            .list
            .iter_level(level)
            .map(|(k, _)| k.clone())
            .collect()
    }
}
