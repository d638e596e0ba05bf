use crate::config::FjallConfig;
use fjall::{Keyspace, Partition, PartitionCreateOptions, PersistMode};
use quadkv::{KeyValueStore, QuadError, QuadResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Name of the partition holding node records
const NODES_PARTITION: &str = "nodes";

/// Maps a Fjall engine error into the store contract's backend error.
pub(crate) fn to_quad_error(error: impl std::error::Error) -> QuadError {
    QuadError::Backend(error.to_string())
}

#[derive(Clone)]
/// Fjall-based key-value store implementation.
///
/// A persistent, thread-safe backend for the quadtree's node records
/// using the Fjall LSM engine. Uses PIMPL pattern with
/// `Arc<FjallStoreInner>` for efficient cloning and shared ownership.
///
/// Characteristics:
/// - Thread-safe (Arc-based, cloneable across threads)
/// - Persistent (node records survive process restarts)
/// - Single partition (all records live in one keyspace partition)
/// - Explicit durability (`commit` syncs the journal; an fsync
///   frequency can be configured instead)
///
/// Usage: build via `FjallStore::builder()`, then hand the store to
/// `QuadTree::open`.
pub struct FjallStore {
    inner: Arc<FjallStoreInner>,
}

impl FjallStore {
    /// Creates a builder for configuring a store.
    pub fn builder() -> FjallStoreBuilder {
        FjallStoreBuilder::new()
    }

    /// Opens the keyspace at the configured path, creating it on first
    /// use.
    pub fn open(config: FjallConfig) -> QuadResult<FjallStore> {
        let keyspace = Keyspace::open(config.keyspace_config()).map_err(|err| {
            log::error!("Failed to open fjall keyspace: {}", err);
            to_quad_error(err)
        })?;
        let partition = keyspace
            .open_partition(NODES_PARTITION, PartitionCreateOptions::default())
            .map_err(|err| {
                log::error!("Failed to open fjall partition: {}", err);
                to_quad_error(err)
            })?;

        log::debug!("Opened fjall store at {}", config.db_path());
        Ok(FjallStore {
            inner: Arc::new(FjallStoreInner {
                keyspace,
                partition,
                closed: AtomicBool::new(false),
                config,
            }),
        })
    }

    /// Returns this store's configuration.
    pub fn config(&self) -> &FjallConfig {
        &self.inner.config
    }
}

struct FjallStoreInner {
    keyspace: Keyspace,
    partition: Partition,
    closed: AtomicBool,
    config: FjallConfig,
}

impl FjallStoreInner {
    fn check_opened(&self) -> QuadResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            return Err(QuadError::Closed);
        }
        Ok(())
    }
}

impl KeyValueStore for FjallStore {
    fn get(&self, key: &str) -> QuadResult<Option<Vec<u8>>> {
        self.inner.check_opened()?;
        match self.inner.partition.get(key) {
            Ok(Some(slice)) => Ok(Some(slice.to_vec())),
            Ok(None) => Ok(None),
            Err(err) => {
                log::error!("Failed to read key from fjall partition: {}", err);
                Err(to_quad_error(err))
            }
        }
    }

    fn put(&self, key: &str, value: Vec<u8>) -> QuadResult<()> {
        self.inner.check_opened()?;
        self.inner.partition.insert(key, value).map_err(|err| {
            log::error!("Failed to write key to fjall partition: {}", err);
            to_quad_error(err)
        })
    }

    fn contains_key(&self, key: &str) -> QuadResult<bool> {
        self.inner.check_opened()?;
        self.inner.partition.contains_key(key).map_err(|err| {
            log::error!("Failed to check key in fjall partition: {}", err);
            to_quad_error(err)
        })
    }

    fn commit(&self) -> QuadResult<()> {
        self.inner.check_opened()?;
        self.inner
            .keyspace
            .persist(PersistMode::SyncAll)
            .map_err(|err| {
                log::error!("Failed to persist fjall keyspace: {}", err);
                to_quad_error(err)
            })
    }

    fn close(&self) -> QuadResult<()> {
        if self.inner.closed.swap(true, Ordering::Relaxed) {
            return Ok(());
        }
        // Flush the journal on the way out
        self.inner
            .keyspace
            .persist(PersistMode::SyncAll)
            .map_err(to_quad_error)
    }

    fn is_closed(&self) -> QuadResult<bool> {
        Ok(self.inner.closed.load(Ordering::Relaxed))
    }
}

/// Builder for configuring a Fjall-backed store.
///
/// # Examples
///
/// ```rust,no_run
/// use quadkv_fjall_adapter::FjallStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FjallStore::builder()
///     .db_path("/path/to/index")
///     .fsync_ms(100)
///     .open()?;
/// # Ok(())
/// # }
/// ```
pub struct FjallStoreBuilder {
    config: FjallConfig,
}

impl FjallStoreBuilder {
    /// Creates a builder with default configuration.
    pub fn new() -> FjallStoreBuilder {
        FjallStoreBuilder {
            config: FjallConfig::new(),
        }
    }

    /// Sets the keyspace directory path.
    pub fn db_path(self, path: &str) -> Self {
        self.config.set_db_path(path);
        self
    }

    /// Sets the block cache capacity in bytes.
    pub fn cache_size(self, bytes: u64) -> Self {
        self.config.set_cache_size(bytes);
        self
    }

    /// Syncs the journal every `ms` milliseconds instead of only on
    /// explicit commits.
    pub fn fsync_ms(self, ms: u16) -> Self {
        self.config.set_fsync_frequency(ms);
        self
    }

    /// Leaves journal persistence entirely to explicit commits.
    pub fn manual_journal_persist(self, v: bool) -> Self {
        self.config.set_manual_journal_persist(v);
        self
    }

    /// Opens the store with the accumulated configuration.
    pub fn open(self) -> QuadResult<FjallStore> {
        FjallStore::open(self.config)
    }
}

impl Default for FjallStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
