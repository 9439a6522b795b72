use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::SeriesConfig;
use crate::os::{FixedHost, HostOs, OsFamily, OsReleaseHost, static_family};
use crate::series::error::SeriesError;
use crate::series::parser::{SeriesRecord, parse_distro_info, split_version};
use crate::series::source::{FileSource, MetadataSource};
use crate::series::table::{SeriesTable, version_key};

/// Series codename to version cache for a single distribution family.
///
/// The cache starts empty. The first miss triggers one automatic refresh from the
/// metadata source; later misses fail without touching the source until
/// [`force_refresh`](Self::force_refresh) is called.
///
/// Readers clone an `Arc` snapshot and never observe a half-built table. Refreshes are
/// serialized by `refresh_lock`; reading and parsing happen under that lock only, and
/// the snapshot write guard is held just for the swap.
pub struct SeriesVersionCache {
    family: OsFamily,
    source: Arc<dyn MetadataSource>,
    host: Arc<dyn HostOs>,
    table: RwLock<Arc<SeriesTable>>,
    refresh_lock: Mutex<()>,
    auto_refreshed: AtomicBool,
    min_version: Option<Vec<u32>>,
}

impl SeriesVersionCache {
    pub fn new(
        family: OsFamily,
        source: Arc<dyn MetadataSource>,
        host: Arc<dyn HostOs>,
    ) -> Self {
        Self {
            family,
            source,
            host,
            table: RwLock::new(Arc::new(SeriesTable::default())),
            refresh_lock: Mutex::new(()),
            auto_refreshed: AtomicBool::new(false),
            min_version: None,
        }
    }

    /// Build a cache reading the configured file, detecting the host unless overridden.
    pub fn from_config(config: &SeriesConfig) -> Self {
        let host: Arc<dyn HostOs> = match config.host {
            Some(family) => Arc::new(FixedHost(family)),
            None => Arc::new(OsReleaseHost::new()),
        };
        info!(
            "Using distro-info source {:?} for {}",
            config.source.path, config.family
        );
        let cache = Self::new(
            config.family,
            Arc::new(FileSource::new(&config.source.path)),
            host,
        );
        match &config.min_version {
            Some(min_version) => cache.with_min_version(min_version),
            None => cache,
        }
    }

    /// Drop rows older than `min_version` whenever the table is refreshed.
    pub fn with_min_version(mut self, min_version: &str) -> Self {
        self.min_version = Some(version_key(min_version));
        self
    }

    /// Start with the automatic refresh already consumed (or not).
    pub fn with_auto_refresh_consumed(self, consumed: bool) -> Self {
        self.auto_refreshed.store(consumed, Ordering::Release);
        self
    }

    /// Distribution family described by the metadata source
    pub fn family(&self) -> OsFamily {
        self.family
    }

    pub fn auto_refresh_consumed(&self) -> bool {
        self.auto_refreshed.load(Ordering::Acquire)
    }

    /// Returns the version for `codename`, e.g. "12.04" for "precise".
    pub fn lookup_version(&self, codename: &str) -> Result<String, SeriesError> {
        self.find_with_refresh(|table| table.version(codename).map(str::to_string))?
            .ok_or_else(|| SeriesError::invalid_series(codename))
    }

    /// Returns every cached codename when the host belongs to this cache's family.
    pub fn list_supported(&self) -> Result<BTreeSet<String>, SeriesError> {
        let host_family = self.host.family();
        if host_family != self.family {
            debug!(
                "Host family {} does not match {}, no supported series",
                host_family, self.family
            );
            return Ok(BTreeSet::new());
        }

        let mut table = self.snapshot()?;
        if table.is_empty() {
            if !self.auto_refresh_consumed() {
                self.refresh_once()?;
            }
            table = self.snapshot()?;
        }

        Ok(table.codenames())
    }

    /// Unconditionally re-read the metadata source and replace the cache.
    ///
    /// Consumes the automatic refresh, even when it fails. On failure the previous table
    /// stays in place.
    pub fn force_refresh(&self) -> Result<(), SeriesError> {
        let _guard = self
            .refresh_lock
            .lock()
            .map_err(|_| SeriesError::LockPoisoned)?;
        let result = self.reload();
        self.auto_refreshed.store(true, Ordering::Release);

        let count = result?;
        info!("Refreshed {} series from distro-info", count);
        Ok(())
    }

    /// Map a codename to the OS family that owns it.
    ///
    /// The static table is consulted first, so non-distro-info series never touch the
    /// metadata source. Anything else is owned by this cache's family if the cache knows it.
    pub fn resolve_os_family(&self, codename: &str) -> Result<OsFamily, SeriesError> {
        if let Some(family) = static_family(codename) {
            return Ok(family);
        }

        self.find_with_refresh(|table| table.contains(codename).then_some(self.family))?
            .ok_or_else(|| SeriesError::invalid_series(codename))
    }

    /// Reverse lookup: "12.04" or "12.04 LTS" to "precise".
    pub fn series_for_version(&self, version: &str) -> Result<String, SeriesError> {
        let (numeric, _) = split_version(version);
        self.find_with_refresh(|table| table.series_for_version(numeric).map(str::to_string))?
            .ok_or_else(|| SeriesError::UnknownVersion {
                version: version.to_string(),
            })
    }

    pub fn is_lts(&self, codename: &str) -> Result<bool, SeriesError> {
        self.find_with_refresh(|table| table.get(codename).map(|record| record.lts))?
            .ok_or_else(|| SeriesError::invalid_series(codename))
    }

    /// Full distro-info row for `codename`
    pub fn record(&self, codename: &str) -> Result<SeriesRecord, SeriesError> {
        self.find_with_refresh(|table| table.get(codename).cloned())?
            .ok_or_else(|| SeriesError::invalid_series(codename))
    }

    /// Codename of the newest LTS release out on `today`.
    pub fn latest_lts(&self, today: NaiveDate) -> Result<String, SeriesError> {
        self.find_with_refresh(|table| {
            table
                .latest_lts(today)
                .map(|record| record.codename.clone())
        })?
        .ok_or(SeriesError::NoLtsRelease)
    }

    fn snapshot(&self) -> Result<Arc<SeriesTable>, SeriesError> {
        self.table
            .read()
            .map(|table| Arc::clone(&table))
            .map_err(|_| SeriesError::LockPoisoned)
    }

    /// Run `find` against the current table, applying the one-time automatic refresh on a miss.
    fn find_with_refresh<T>(
        &self,
        find: impl Fn(&SeriesTable) -> Option<T>,
    ) -> Result<Option<T>, SeriesError> {
        let table = self.snapshot()?;
        if let Some(found) = find(&*table) {
            return Ok(Some(found));
        }

        if self.auto_refresh_consumed() {
            debug!("Cache miss after automatic refresh, not reloading");
        } else {
            self.refresh_once()?;
        }

        // The flag is only set once a refresh has published, so a fresh snapshot is current
        let table = self.snapshot()?;
        Ok(find(&*table))
    }

    /// Perform the automatic refresh unless some caller already has.
    fn refresh_once(&self) -> Result<(), SeriesError> {
        let _guard = self
            .refresh_lock
            .lock()
            .map_err(|_| SeriesError::LockPoisoned)?;

        // Another caller may have finished while we waited for the lock
        if self.auto_refresh_consumed() {
            return Ok(());
        }

        debug!("Running automatic distro-info refresh");
        let result = self.reload();
        self.auto_refreshed.store(true, Ordering::Release);

        let count = result.inspect_err(|e| warn!("Automatic distro-info refresh failed: {}", e))?;
        info!("Loaded {} series from distro-info", count);
        Ok(())
    }

    /// Read, parse and publish a new table. Callers must hold `refresh_lock`.
    fn reload(&self) -> Result<usize, SeriesError> {
        let content = self.source.read()?;
        let mut records = parse_distro_info(&content)?;
        if let Some(min_version) = &self.min_version {
            records.retain(|record| version_key(&record.version) >= *min_version);
        }
        let table = SeriesTable::from_records(records);
        let count = table.len();

        let table = Arc::new(table);
        *self
            .table
            .write()
            .map_err(|_| SeriesError::LockPoisoned)? = table;
        debug!("Published series table with {} entries", count);

        Ok(count)
    }
}
