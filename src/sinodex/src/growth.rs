//! Character (class) stat growth aggregation.
//!
//! Abilities of the two stat-bearing kinds (Common and Class) contribute
//! their effect value to one of six unlock tiers, chosen by the ability's
//! release-level threshold, and to a running grand total across all
//! characters. Seven stat slots exist; slot index 5 is reserved in the
//! master data and is skipped when totals are displayed.

use std::collections::HashMap;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::mst::{CharacterAbilityMst, CharacterMst};

/// Stat slots: HP, patk, pdef, matk, mdef, (reserved), cost.
pub const STAT_SLOTS: usize = 7;

/// Reserved slot excluded from totals display.
pub const RESERVED_STAT_SLOT: usize = 5;

/// Display names per stat slot.
pub const STAT_SLOT_NAMES: &[&str; STAT_SLOTS] =
    &["HP", "patk", "pdef", "matk", "mdef", "weapon", "cost"];

/// Unlock tiers, base plus five arcana steps.
pub const GROWTH_TIERS: usize = 6;

/// Display names per unlock tier.
pub const GROWTH_TIER_NAMES: &[&str; GROWTH_TIERS] = &[
    "base", "arcana1", "arcana2", "arcana3", "arcana4", "arcana5",
];

/// Per-slot stat values for one tier.
pub type StatRow = [i64; STAT_SLOTS];

/// Tier index for a release-level threshold.
pub fn tier_for_release_level(release_level: u32) -> usize {
    match release_level {
        0..=10 => 0,
        11..=12 => 1,
        13..=14 => 2,
        15..=16 => 3,
        17..=18 => 4,
        _ => 5,
    }
}

/// One character with its abilities and accumulated per-tier stats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterGrowth {
    pub mst: CharacterMst,
    /// All abilities in input order, stat-bearing or not.
    pub abilities: Vec<CharacterAbilityMst>,
    pub tiers: [StatRow; GROWTH_TIERS],
}

/// Growth for every character plus grand totals over all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrowthSummary {
    pub characters: Vec<CharacterGrowth>,
    pub totals: StatRow,
    pub diagnostics: Diagnostics,
}

/// Whether an ability kind contributes to stat growth.
fn is_stat_kind(skill_type: u8) -> bool {
    skill_type == 1 || skill_type == 2
}

/// Aggregate abilities into per-character tiers and cross-character totals.
///
/// Abilities referencing an unknown character, or carrying an effect type
/// outside the slot range, are reported and skipped; the summary is still
/// produced.
pub fn summarize(
    characters: &[CharacterMst],
    abilities: &[CharacterAbilityMst],
) -> GrowthSummary {
    let mut diagnostics = Diagnostics::new();
    let mut rows: Vec<CharacterGrowth> = characters
        .iter()
        .map(|mst| CharacterGrowth {
            mst: mst.clone(),
            ..CharacterGrowth::default()
        })
        .collect();
    let index_by_id: HashMap<u32, usize> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| (row.mst.character_mst_id, idx))
        .collect();

    let mut totals = StatRow::default();
    for ability in abilities {
        let Some(&idx) = index_by_id.get(&ability.character_mst_id) else {
            diagnostics.push(Diagnostic::DanglingAbility {
                character_ability_mst_id: ability.character_ability_mst_id,
                character_mst_id: ability.character_mst_id,
            });
            continue;
        };
        let row = &mut rows[idx];
        row.abilities.push(ability.clone());

        if !is_stat_kind(ability.skill_type) {
            continue;
        }
        let slot = usize::from(ability.effect_type);
        if slot == 0 || slot > STAT_SLOTS {
            diagnostics.push(Diagnostic::BadEffectType {
                character_ability_mst_id: ability.character_ability_mst_id,
                effect_type: ability.effect_type,
            });
            continue;
        }
        let tier = tier_for_release_level(ability.release_level);
        row.tiers[tier][slot - 1] += ability.effect_value;
        totals[slot - 1] += ability.effect_value;
    }

    GrowthSummary {
        characters: rows,
        totals,
        diagnostics,
    }
}
