use fjall::Config;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU64, Ordering};
use std::sync::Arc;

/// Default block cache capacity (32 MB)
const DEFAULT_CACHE_SIZE: u64 = 32 * 1024 * 1024;

#[derive(Clone)]
/// Fjall store configuration wrapper.
///
/// A cloneable, thread-safe configuration holder for the Fjall keyspace
/// parameters the node store uses. Uses an `Arc` inner so clones share
/// the same underlying settings.
///
/// Usage: obtain via `FjallStore::builder()`, configure, then open the
/// store. Settings are fixed once the keyspace is open.
pub struct FjallConfig {
    inner: Arc<FjallConfigInner>,
}

impl FjallConfig {
    /// Creates a configuration with default values.
    ///
    /// Defaults: 32 MB block cache, journal fsync left to explicit
    /// `commit` calls (frequency 0), automatic journal persistence.
    pub fn new() -> FjallConfig {
        FjallConfig {
            inner: Arc::new(FjallConfigInner::new()),
        }
    }

    /// Builds a Fjall keyspace configuration from this config.
    pub(crate) fn keyspace_config(&self) -> Config {
        let mut config = Config::new(self.inner.db_path());
        config = config
            .manual_journal_persist(self.inner.manual_journal_persist())
            .cache_size(self.inner.cache_size());

        if self.inner.fsync_frequency() > 0 {
            config = config.fsync_ms(Some(self.inner.fsync_frequency()));
        }
        config
    }

    /// Returns the keyspace directory path.
    pub fn db_path(&self) -> String {
        self.inner.db_path()
    }

    /// Sets the keyspace directory path.
    pub(crate) fn set_db_path(&self, db_path: &str) {
        self.inner.set_db_path(db_path)
    }

    /// Returns the block cache capacity in bytes.
    pub fn cache_size(&self) -> u64 {
        self.inner.cache_size()
    }

    /// Sets the block cache capacity in bytes.
    pub(crate) fn set_cache_size(&self, bytes: u64) {
        self.inner.set_cache_size(bytes)
    }

    /// Returns the journal fsync frequency in milliseconds (0 = only on
    /// explicit commit).
    pub fn fsync_frequency(&self) -> u16 {
        self.inner.fsync_frequency()
    }

    /// Sets the journal fsync frequency in milliseconds.
    pub(crate) fn set_fsync_frequency(&self, ms: u16) {
        self.inner.set_fsync_frequency(ms)
    }

    /// Returns manual journal persist setting.
    pub fn manual_journal_persist(&self) -> bool {
        self.inner.manual_journal_persist()
    }

    /// Sets manual journal persistence.
    pub(crate) fn set_manual_journal_persist(&self, v: bool) {
        self.inner.set_manual_journal_persist(v)
    }
}

impl Default for FjallConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct FjallConfigInner {
    db_path: RwLock<String>,
    cache_size: AtomicU64,
    fsync_frequency: AtomicU16,
    manual_journal_persist: AtomicBool,
}

impl FjallConfigInner {
    fn new() -> FjallConfigInner {
        FjallConfigInner {
            db_path: RwLock::new(String::new()),
            cache_size: AtomicU64::new(DEFAULT_CACHE_SIZE),
            fsync_frequency: AtomicU16::new(0),
            manual_journal_persist: AtomicBool::new(false),
        }
    }

    fn db_path(&self) -> String {
        self.db_path.read().clone()
    }

    fn set_db_path(&self, db_path: &str) {
        *self.db_path.write() = db_path.to_string();
    }

    fn cache_size(&self) -> u64 {
        self.cache_size.load(Ordering::Relaxed)
    }

    fn set_cache_size(&self, bytes: u64) {
        self.cache_size.store(bytes, Ordering::Relaxed)
    }

    fn fsync_frequency(&self) -> u16 {
        self.fsync_frequency.load(Ordering::Relaxed)
    }

    fn set_fsync_frequency(&self, ms: u16) {
        self.fsync_frequency.store(ms, Ordering::Relaxed)
    }

    fn manual_journal_persist(&self) -> bool {
        self.manual_journal_persist.load(Ordering::Relaxed)
    }

    fn set_manual_journal_persist(&self, v: bool) {
        self.manual_journal_persist.store(v, Ordering::Relaxed)
    }
}
