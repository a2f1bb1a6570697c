//! Source loading boundary and the per-dataset memoization cache.
//!
//! Network addressing, routing, and transport are a collaborator's concern:
//! implement [`SourceLoader`] to resolve a [`Dataset`] to parsed JSON. The
//! [`SourceCache`] guarantees that each dataset is fetched at most once per
//! session (single-flight), that concurrent requesters share the in-flight
//! fetch, and that a failed fetch is memoized as absent instead of
//! propagating — downstream indexes treat an absent dataset as empty.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};

use crate::mst::Locale;

/// Logical dataset identifier.
///
/// Identifies *what* to load, never *where from*; the loader owns the
/// mapping to URLs or files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    CardMst(Locale),
    SkillMst(Locale),
    CharacterMst(Locale),
    CharacterAbilityMst(Locale),
    ArtMst(Locale),
    /// Community multiplier sheet, keyed by skill id.
    SkillMultipliers,
    /// Community weapon rate sheet, keyed by numeric card id.
    RateSheet,
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardMst(locale) => write!(f, "{locale}/card_mst_list"),
            Self::SkillMst(locale) => write!(f, "{locale}/skill_mst_list"),
            Self::CharacterMst(locale) => write!(f, "{locale}/character_mst_list"),
            Self::CharacterAbilityMst(locale) => write!(f, "{locale}/character_ability_mst_list"),
            Self::ArtMst(locale) => write!(f, "{locale}/art_mst_list"),
            Self::SkillMultipliers => f.write_str("sheets/skill_multipliers"),
            Self::RateSheet => f.write_str("sheets/weapon_rates"),
        }
    }
}

/// Failure to produce a dataset.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Transport boundary: fetch one dataset as parsed JSON.
pub trait SourceLoader: Send + Sync {
    fn fetch(
        &self,
        dataset: Dataset,
    ) -> impl Future<Output = Result<serde_json::Value, SourceError>> + Send;
}

type Slot = Arc<OnceCell<Option<Arc<serde_json::Value>>>>;

/// Memoized, single-flight dataset cache.
///
/// A failed load is terminal for the session: the failure is logged once
/// and every later request observes the memoized absence. No timeouts or
/// retries happen at this layer.
pub struct SourceCache<L> {
    loader: L,
    slots: Mutex<HashMap<Dataset, Slot>>,
}

impl<L: SourceLoader> SourceCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// The wrapped loader (tests observe fetch counts through this).
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Fetch a dataset, memoized. Returns `None` when the load failed.
    pub async fn fetch(&self, dataset: Dataset) -> Option<Arc<serde_json::Value>> {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(dataset).or_default().clone()
        };
        slot.get_or_init(|| async {
            match self.loader.fetch(dataset).await {
                Ok(value) => Some(Arc::new(value)),
                Err(err) => {
                    tracing::warn!(%dataset, %err, "source load failed");
                    None
                }
            }
        })
        .await
        .clone()
    }

    /// Fetch a dataset and decode it as an array of records.
    ///
    /// Degrades rather than fails: an absent dataset or a non-array payload
    /// yields an empty list, and individual records that do not decode are
    /// skipped with a warning.
    pub async fn records<T: DeserializeOwned>(&self, dataset: Dataset) -> Vec<T> {
        let Some(value) = self.fetch(dataset).await else {
            return Vec::new();
        };
        let Some(entries) = value.as_array() else {
            tracing::warn!(%dataset, "expected a JSON array of records");
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| match serde_json::from_value(entry.clone()) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(%dataset, %err, "skipping undecodable record");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::mst::CardMst;

    struct CountingLoader {
        calls: AtomicUsize,
    }

    impl CountingLoader {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SourceLoader for CountingLoader {
        fn fetch(
            &self,
            dataset: Dataset,
        ) -> impl Future<Output = Result<serde_json::Value, SourceError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            async move {
                match dataset {
                    Dataset::RateSheet => Err(SourceError::Unavailable(dataset.to_string())),
                    _ => Ok(json!([
                        {"cardMstId": 1, "cardUniqueId": 1, "name": "A", "isRelease": true},
                        {"cardMstId": "bogus"},
                    ])),
                }
            }
        }
    }

    #[tokio::test]
    async fn test_single_flight_per_dataset() {
        let cache = SourceCache::new(CountingLoader::new());
        let dataset = Dataset::CardMst(Locale::En);

        let (a, b) = tokio::join!(cache.fetch(dataset), cache.fetch(dataset));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.loader.calls.load(Ordering::SeqCst), 1);

        // A later request still reuses the memoized value.
        cache.fetch(dataset).await.unwrap();
        assert_eq!(cache.loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_memoized_as_absent() {
        let cache = SourceCache::new(CountingLoader::new());

        assert!(cache.fetch(Dataset::RateSheet).await.is_none());
        assert!(cache.fetch(Dataset::RateSheet).await.is_none());
        assert_eq!(cache.loader.calls.load(Ordering::SeqCst), 1);

        let records: Vec<CardMst> = cache.records(Dataset::RateSheet).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_records_skip_undecodable_entries() {
        let cache = SourceCache::new(CountingLoader::new());
        let records: Vec<CardMst> = cache.records(Dataset::CardMst(Locale::En)).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
    }

    #[tokio::test]
    async fn test_distinct_datasets_fetch_independently() {
        let cache = SourceCache::new(CountingLoader::new());
        let (_, _) = tokio::join!(
            cache.fetch(Dataset::CardMst(Locale::En)),
            cache.fetch(Dataset::CardMst(Locale::Jp)),
        );
        assert_eq!(cache.loader.calls.load(Ordering::SeqCst), 2);
    }
}
