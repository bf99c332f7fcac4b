// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// In-memory TTL cache for GitHub snapshots.
///
/// Entries are fresh for the configured TTL. A failed refresh falls back to
/// the stale entry when one exists so a GitHub outage does not blank a card.
/// The current time is always passed in by the caller.
use std::{
    collections::HashMap,
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Duration, Utc};
use masterror::AppError;
use tracing::{debug, warn};

use crate::attributes::GithubStats;

/// Default freshness window of a cached snapshot, in seconds.
pub const DEFAULT_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone,)]
struct Entry<V,>
{
    value:      V,
    fetched_at: DateTime<Utc,>,
}

/// Keyed get-or-load cache with stale fallback.
#[derive(Debug,)]
pub struct TtlCache<V,>
{
    ttl:     Duration,
    entries: Mutex<HashMap<String, Entry<V,>,>,>,
}

/// Cache of [`GithubStats`] keyed by login.
pub type StatsCache = TtlCache<GithubStats,>;

impl<V: Clone,> Default for TtlCache<V,>
{
    fn default() -> Self
    {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS,),)
    }
}

impl<V: Clone,> TtlCache<V,>
{
    /// Creates an empty cache whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration,) -> Self
    {
        Self {
            ttl, entries: Mutex::new(HashMap::new(),),
        }
    }

    fn lock(&self,) -> MutexGuard<'_, HashMap<String, Entry<V,>,>,>
    {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner,)
    }

    /// Returns the entry for `key` if it is still fresh at `now`.
    pub fn get_fresh(&self, key: &str, now: DateTime<Utc,>,) -> Option<V,>
    {
        self.lock()
            .get(key,)
            .filter(|entry| now - entry.fetched_at < self.ttl,)
            .map(|entry| entry.value.clone(),)
    }

    /// Returns the entry for `key` regardless of its age.
    pub fn get_stale(&self, key: &str,) -> Option<V,>
    {
        self.lock().get(key,).map(|entry| entry.value.clone(),)
    }

    /// Stores `value` as fetched at `now`.
    pub fn insert(&self, key: &str, value: V, now: DateTime<Utc,>,)
    {
        self.lock().insert(
            key.to_owned(),
            Entry {
                value, fetched_at: now,
            },
        );
    }

    /// Drops the entry for `key`.
    pub fn invalidate(&self, key: &str,)
    {
        self.lock().remove(key,);
    }

    /// Returns the fresh entry or runs `loader`, caching its result.
    ///
    /// The lock is not held while `loader` runs.
    ///
    /// # Errors
    ///
    /// Returns the loader error when no entry, fresh or stale, exists.
    pub async fn get_or_load<F, Fut,>(
        &self,
        key: &str,
        now: DateTime<Utc,>,
        loader: F,
    ) -> Result<V, AppError,>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AppError,>,>,
    {
        if let Some(value,) = self.get_fresh(key, now,) {
            debug!(key, "cache hit");
            return Ok(value,);
        }

        match loader().await {
            Ok(value,) => {
                self.insert(key, value.clone(), now,);
                Ok(value,)
            }
            Err(error,) => match self.get_stale(key,) {
                Some(stale,) => {
                    warn!(key, %error, "refresh failed, serving stale entry");
                    Ok(stale,)
                }
                None => Err(error,),
            },
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::sync::atomic::{AtomicU32, Ordering};

    use chrono::TimeZone;

    use super::*;

    fn at(minute: u32,) -> DateTime<Utc,>
    {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0,).single().expect("valid timestamp",)
            + Duration::minutes(i64::from(minute,),)
    }

    #[tokio::test]
    async fn fresh_entries_skip_the_loader()
    {
        let cache: TtlCache<u32,> = TtlCache::default();
        let calls = AtomicU32::new(0,);

        for minute in [0, 30, 59] {
            let value = cache
                .get_or_load("octocat", at(minute,), || async {
                    calls.fetch_add(1, Ordering::SeqCst,);
                    Ok(7,)
                },)
                .await
                .expect("load succeeds",);
            assert_eq!(value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst,), 1);
    }

    #[tokio::test]
    async fn expired_entries_are_reloaded()
    {
        let cache: TtlCache<u32,> = TtlCache::default();
        cache.insert("octocat", 1, at(0,),);

        let value = cache
            .get_or_load("octocat", at(60,), || async { Ok(2,) },)
            .await
            .expect("reload succeeds",);
        assert_eq!(value, 2);
        assert_eq!(cache.get_fresh("octocat", at(61,),), Some(2));
    }

    #[tokio::test]
    async fn loader_error_falls_back_to_stale_entry()
    {
        let cache: TtlCache<u32,> = TtlCache::default();
        cache.insert("octocat", 5, at(0,),);

        let value = cache
            .get_or_load("octocat", at(120,), || async {
                Err(AppError::service("GitHub unavailable",),)
            },)
            .await
            .expect("stale fallback",);
        assert_eq!(value, 5);
    }

    #[tokio::test]
    async fn loader_error_without_entry_propagates()
    {
        let cache: TtlCache<u32,> = TtlCache::default();
        let result = cache
            .get_or_load("ghost", at(0,), || async { Err(AppError::service("not found",),) },)
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn invalidate_removes_entry()
    {
        let cache: TtlCache<u32,> = TtlCache::new(Duration::minutes(5,),);
        cache.insert("octocat", 3, at(0,),);
        assert_eq!(cache.get_fresh("octocat", at(4,),), Some(3));
        assert_eq!(cache.get_fresh("octocat", at(5,),), None);
        cache.invalidate("octocat",);
        assert_eq!(cache.get_stale("octocat",), None);
    }
}
