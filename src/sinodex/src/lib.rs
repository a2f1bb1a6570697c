//! # sinodex
//!
//! Master-data fusion and indexing library for SINoALICE datamine sources.
//!
//! This library provides functionality to:
//! - Group flat card master records into canonical cards with ordered variants
//! - Enrich skill master records with community multiplier data
//! - Correlate weapons and skills across the EN and JP localizations plus
//!   two community sheets, with explicit conflict diagnostics
//! - Compute derived attributes (class stat growth, max-level flags)
//! - Parse and resolve user-exported library dumps
//!
//! Sources arrive through the [`SourceLoader`] boundary; the [`Database`]
//! memoizes every dataset and every derived index once per session with
//! single-flight semantics, so concurrent views share one computation.
//!
//! ## Example
//!
//! ```no_run
//! use sinodex::{Database, Dataset, Locale, SourceError, SourceLoader};
//!
//! struct NullLoader;
//!
//! impl SourceLoader for NullLoader {
//!     fn fetch(
//!         &self,
//!         dataset: Dataset,
//!     ) -> impl std::future::Future<Output = Result<serde_json::Value, SourceError>> + Send {
//!         async move { Err(SourceError::Unavailable(dataset.to_string())) }
//!     }
//! }
//!
//! # async fn run() {
//! let db = Database::new(NullLoader);
//! // Every index degrades to empty when its sources are absent.
//! let cards = db.cards(Locale::En).await;
//! assert!(cards.is_empty());
//! # }
//! ```

pub mod arts;
pub mod cards;
pub mod collate;
pub mod db;
pub mod diagnostics;
pub mod growth;
pub mod library;
pub mod mst;
pub mod reference;
pub mod skillmap;
pub mod skills;
pub mod source;
pub mod targets;

// Re-export commonly used items
#[doc(inline)]
pub use cards::{Card, CardIndex, NameIndex};
#[doc(inline)]
pub use db::Database;
#[doc(inline)]
pub use diagnostics::{Diagnostic, Diagnostics};
#[doc(inline)]
pub use library::{LibraryImport, LibraryItem, Resolution};
#[doc(inline)]
pub use mst::{
    ArtMst, CardMst, CharacterAbilityMst, CharacterMst, Locale, MultiplierValues, RateSheetEntry,
    SkillMst, SkillMultiplier,
};
#[doc(inline)]
pub use skillmap::{SkillIdentity, SkillMap, WeaponIdentity};
#[doc(inline)]
pub use skills::{Skill, SkillIndex};
#[doc(inline)]
pub use source::{Dataset, SourceCache, SourceError, SourceLoader};
