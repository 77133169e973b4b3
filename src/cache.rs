use crate::error::RecipeError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use log::{debug, warn};
use lru::LruCache;
use serde::Deserialize;
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Longest file name most filesystems accept
const MAX_FILE_NAME: usize = 255;

/// Marks files owned by the cache; anything else in the directory is left alone
const FILE_SUFFIX: &str = ".img";

/// In-progress write, renamed into place once complete
const PARTIAL_SUFFIX: &str = ".part";

/// Capacity bounds for the image cache.
///
/// Fixed once the cache is opened. There is no resizing or invalidation.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Bytes kept in memory (~10 MB by default)
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: u64,
    /// Bytes kept on disk (~1 GB by default)
    #[serde(default = "default_disk_capacity")]
    pub disk_capacity: u64,
    /// Disk cache location; the disk tier is off when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_capacity: default_memory_capacity(),
            disk_capacity: default_disk_capacity(),
            directory: None,
        }
    }
}

fn default_memory_capacity() -> u64 {
    10_000_000
}

fn default_disk_capacity() -> u64 {
    1_000_000_000
}

#[derive(Debug)]
struct DiskEntry {
    file_name: String,
    size: u64,
}

struct CacheState {
    memory: LruCache<String, Vec<u8>>,
    memory_usage: u64,
    // oldest write first
    disk: VecDeque<DiskEntry>,
    disk_usage: u64,
}

/// Two-tier, byte-bounded cache for downloaded images keyed by URL.
///
/// The memory tier evicts least-recently-used entries. The disk tier evicts
/// the oldest writes. A disk hit is promoted back into memory.
pub struct ImageCache {
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl ImageCache {
    /// Open the cache, indexing the images a previous run left in the disk directory.
    ///
    /// Only files the cache itself wrote are indexed or evicted.
    pub async fn open(config: CacheConfig) -> Result<Self, RecipeError> {
        let mut disk = VecDeque::new();
        let mut disk_usage = 0;

        if let Some(dir) = &config.directory {
            fs::create_dir_all(dir).await?;

            let mut found = Vec::new();
            let mut entries = fs::read_dir(dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let metadata = entry.metadata().await?;
                if !metadata.is_file() {
                    continue;
                }
                let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                    continue;
                };
                if let Some(partial) = file_name.strip_suffix(PARTIAL_SUFFIX) {
                    if is_cache_file(partial) {
                        debug!("Removing interrupted cache write {}", file_name);
                        delete_file(&entry.path()).await?;
                    }
                    continue;
                }
                if !is_cache_file(&file_name) {
                    continue;
                }
                found.push((metadata.modified()?, file_name, metadata.len()));
            }
            found.sort();

            for (_, file_name, size) in found {
                disk_usage += size;
                disk.push_back(DiskEntry { file_name, size });
            }
            debug!(
                "Indexed {} cached images ({} bytes) in {}",
                disk.len(),
                disk_usage,
                dir.display()
            );
        }

        let cache = Self {
            state: Mutex::new(CacheState {
                memory: LruCache::unbounded(),
                memory_usage: 0,
                disk,
                disk_usage,
            }),
            config,
        };

        if let Some(dir) = &cache.config.directory {
            let mut state = cache.state.lock().await;
            cache.evict_disk(&mut state, dir).await?;
        }

        Ok(cache)
    }

    /// Look up an image, checking memory first and then disk
    pub async fn get(&self, url: &str) -> Option<Vec<u8>> {
        let mut state = self.state.lock().await;
        if let Some(bytes) = state.memory.get(url) {
            debug!("Memory cache hit for {}", url);
            return Some(bytes.clone());
        }

        let dir = self.config.directory.as_ref()?;
        let file_name = disk_file_name(url);
        let position = state.disk.iter().position(|e| e.file_name == file_name);
        let Some(position) = position else {
            debug!("Cache miss for {}", url);
            return None;
        };

        match fs::read(dir.join(&file_name)).await {
            Ok(bytes) => {
                debug!("Disk cache hit for {}", url);
                self.store_in_memory(&mut state, url, bytes.clone());
                Some(bytes)
            }
            Err(e) => {
                warn!("Dropping unreadable cache entry for {}: {}", url, e);
                if let Some(entry) = state.disk.remove(position) {
                    state.disk_usage -= entry.size;
                }
                None
            }
        }
    }

    /// Store an image in both tiers, evicting as needed to stay within capacity.
    ///
    /// The memory tier is updated even when the disk write fails.
    pub async fn insert(&self, url: &str, bytes: Vec<u8>) -> Result<(), RecipeError> {
        let mut state = self.state.lock().await;
        self.store_in_memory(&mut state, url, bytes.clone());
        if let Some(dir) = &self.config.directory {
            self.store_on_disk(&mut state, dir, url, &bytes).await?;
        }
        Ok(())
    }

    /// Number of images held in memory
    pub async fn len(&self) -> usize {
        self.state.lock().await.memory.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn memory_usage(&self) -> u64 {
        self.state.lock().await.memory_usage
    }

    pub async fn disk_usage(&self) -> u64 {
        self.state.lock().await.disk_usage
    }

    fn store_in_memory(&self, state: &mut CacheState, url: &str, bytes: Vec<u8>) {
        let size = bytes.len() as u64;
        if size > self.config.memory_capacity {
            if let Some(old) = state.memory.pop(url) {
                state.memory_usage -= old.len() as u64;
            }
            return;
        }

        if let Some(old) = state.memory.put(url.to_string(), bytes) {
            state.memory_usage -= old.len() as u64;
        }
        state.memory_usage += size;

        while state.memory_usage > self.config.memory_capacity {
            let Some((evicted_url, evicted)) = state.memory.pop_lru() else {
                break;
            };
            state.memory_usage -= evicted.len() as u64;
            debug!("Evicted {} from memory cache", evicted_url);
        }
    }

    async fn store_on_disk(
        &self,
        state: &mut CacheState,
        dir: &Path,
        url: &str,
        bytes: &[u8],
    ) -> Result<(), RecipeError> {
        let size = bytes.len() as u64;
        let file_name = disk_file_name(url);
        if size > self.config.disk_capacity
            || file_name.len() + PARTIAL_SUFFIX.len() > MAX_FILE_NAME
        {
            debug!("Not writing {} to disk cache", url);
            // an older body for this url must not outlive the new one
            return self.remove_from_disk(state, dir, &file_name).await;
        }

        let path = dir.join(&file_name);
        let partial = dir.join(format!("{file_name}{PARTIAL_SUFFIX}"));
        if let Err(e) = write_then_rename(&partial, &path, bytes).await {
            let _ = fs::remove_file(&partial).await;
            return Err(e.into());
        }

        if let Some(position) = state.disk.iter().position(|e| e.file_name == file_name) {
            if let Some(old) = state.disk.remove(position) {
                state.disk_usage -= old.size;
            }
        }
        state.disk.push_back(DiskEntry { file_name, size });
        state.disk_usage += size;

        self.evict_disk(state, dir).await
    }

    async fn evict_disk(&self, state: &mut CacheState, dir: &Path) -> Result<(), RecipeError> {
        while state.disk_usage > self.config.disk_capacity {
            let Some(entry) = state.disk.pop_front() else {
                break;
            };
            state.disk_usage -= entry.size;

            delete_file(&dir.join(&entry.file_name)).await?;
            debug!("Evicted {} from disk cache", entry.file_name);
        }
        Ok(())
    }

    async fn remove_from_disk(
        &self,
        state: &mut CacheState,
        dir: &Path,
        file_name: &str,
    ) -> Result<(), RecipeError> {
        let Some(position) = state.disk.iter().position(|e| e.file_name == file_name) else {
            return Ok(());
        };
        if let Some(old) = state.disk.remove(position) {
            state.disk_usage -= old.size;
        }
        delete_file(&dir.join(file_name)).await
    }
}

async fn write_then_rename(partial: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(partial, bytes).await?;
    fs::rename(partial, path).await
}

async fn delete_file(path: &Path) -> Result<(), RecipeError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn disk_file_name(url: &str) -> String {
    format!("{}{}", URL_SAFE_NO_PAD.encode(url), FILE_SUFFIX)
}

fn is_cache_file(file_name: &str) -> bool {
    file_name
        .strip_suffix(FILE_SUFFIX)
        .and_then(|stem| URL_SAFE_NO_PAD.decode(stem).ok())
        .is_some_and(|bytes| String::from_utf8(bytes).is_ok())
}
