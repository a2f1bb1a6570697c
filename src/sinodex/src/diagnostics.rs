//! Per-record diagnostics carried alongside fused indexes.
//!
//! No condition in this crate aborts a view computation: a record that
//! cannot be fused is either skipped by documented policy or reported here
//! and carried forward with the index it was collected for.

use thiserror::Error;

use crate::targets::TargetParseError;

/// One per-record anomaly observed while building an index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Two weapon records share a cardMstId; the first one seen is kept.
    #[error("duplicate cardMstId: {card_mst_id}")]
    DuplicateCardId { card_mst_id: u32 },

    /// Rate sheet entry references a cardMstId absent from the master data.
    /// A stub weapon identity is synthesized so the data is not dropped.
    #[error("unknown cardMstId in rate sheet: {card_mst_id}")]
    UnknownSheetCard { card_mst_id: u32 },

    /// Rate sheet entry whose id cell is not a number; the entry cannot be
    /// keyed at all.
    #[error("unusable rate sheet id: {raw:?}")]
    UnusableSheetId { raw: String },

    /// Two unrelated weapons map the same skill to different rate texts.
    /// The first value is kept.
    #[error("conflicting rate_text for skill {skill_mst_id}: {kept:?} vs. {ignored:?}")]
    ConflictingRateText {
        skill_mst_id: u32,
        kept: String,
        ignored: String,
    },

    /// Multiplier sheet entry references a skill absent from the master
    /// data; the entry is dropped from enrichment.
    #[error("multiplier references unknown skillMstId: {skill_mst_id}")]
    DanglingMultiplier { skill_mst_id: u32 },

    /// Ability record references a character absent from the master data.
    #[error("ability {character_ability_mst_id} references unknown characterMstId {character_mst_id}")]
    DanglingAbility {
        character_ability_mst_id: u32,
        character_mst_id: u32,
    },

    /// Ability record carries an effect type outside the stat slot range.
    #[error("ability {character_ability_mst_id} has out-of-range effectType {effect_type}")]
    BadEffectType {
        character_ability_mst_id: u32,
        effect_type: u8,
    },

    /// Target-count extraction failed for a skill description; targets are
    /// left unset for that skill.
    #[error("skill {skill_mst_id}: {source}")]
    TargetParse {
        skill_mst_id: u32,
        source: TargetParseError,
    },
}

/// Ordered collector for [`Diagnostic`]s.
///
/// Every push is also emitted as a `tracing` warning so anomalies are
/// visible even when the caller discards the collected list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.0.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
