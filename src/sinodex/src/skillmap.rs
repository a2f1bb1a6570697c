//! Cross-source weapon/skill correlation.
//!
//! Builds one unified identity table for weapon skills spanning the JP and
//! EN masters plus the two community sheets. The JP card list is the seed:
//! the community rate sheet keys by JP `cardMstId`, so weapon identities
//! anchor there, and EN weapon records only contribute additional skill ids.
//!
//! Conflict policy differs from the name index on purpose: when two
//! unrelated weapons map the same skill to different rate texts the first
//! value is kept and the conflict reported, whereas the name index lets the
//! last writer win. Both behaviors are preserved as observed upstream.

use std::collections::BTreeMap;

use crate::collate;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::mst::{CardMst, RateSheetEntry, SkillMst, SkillMultiplier};
use crate::reference::CardType;
use crate::skills::Multiplier;

/// One weapon keyed by JP `cardMstId`, with its rate sheet entry when the
/// sheet knows it.
///
/// `mst` is `None` for a stub synthesized from a sheet entry that matched
/// no master record; the entry is kept so the data is never dropped
/// silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponIdentity {
    pub card_mst_id: u32,
    pub mst: Option<CardMst>,
    pub sheet: Option<RateSheetEntry>,
}

/// One skill identity fusing both localizations with the community data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillIdentity {
    pub skill_mst_id: u32,
    pub en: Option<SkillMst>,
    pub jp: Option<SkillMst>,
    /// Free-text rate from the community weapon sheet, routed through the
    /// weapon that references this skill.
    pub rate_text: Option<String>,
    /// Numeric multiplier block from the community multiplier sheet.
    pub multiplier: Option<Multiplier>,
}

/// Inputs to the join, all optional in practice: an absent dataset arrives
/// as an empty slice and degrades the result instead of failing it.
#[derive(Debug, Clone, Copy)]
pub struct SkillMapInputs<'a> {
    pub jp_cards: &'a [CardMst],
    pub en_cards: &'a [CardMst],
    pub jp_skills: &'a [SkillMst],
    pub en_skills: &'a [SkillMst],
    pub multipliers: &'a [SkillMultiplier],
    pub rate_sheet: &'a [RateSheetEntry],
}

/// The fused result: weapon identities, skill identities in display order,
/// and everything anomalous that was seen on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillMap {
    pub weapons: BTreeMap<u32, WeaponIdentity>,
    pub skills: Vec<SkillIdentity>,
    pub diagnostics: Diagnostics,
}

fn is_weapon(card: &CardMst) -> bool {
    CardType::from_code(card.card_type) == Some(CardType::Weapon)
}

fn seed_skill(skills: &mut BTreeMap<u32, SkillIdentity>, id: u32) {
    skills.entry(id).or_insert_with(|| SkillIdentity {
        skill_mst_id: id,
        ..SkillIdentity::default()
    });
}

/// Correlate weapons and skills across both localizations and both
/// community sheets.
pub fn build(inputs: SkillMapInputs<'_>) -> SkillMap {
    let mut diagnostics = Diagnostics::new();
    let mut weapons: BTreeMap<u32, WeaponIdentity> = BTreeMap::new();
    let mut skills: BTreeMap<u32, SkillIdentity> = BTreeMap::new();

    // Seed weapon identities from the JP masters; duplicates keep the
    // first record seen.
    for card in inputs.jp_cards.iter().filter(|c| is_weapon(c)) {
        if weapons.contains_key(&card.card_mst_id) {
            diagnostics.push(Diagnostic::DuplicateCardId {
                card_mst_id: card.card_mst_id,
            });
        } else {
            weapons.insert(
                card.card_mst_id,
                WeaponIdentity {
                    card_mst_id: card.card_mst_id,
                    mst: Some(card.clone()),
                    sheet: None,
                },
            );
        }
        if let Some(id) = card.front_skill_mst_id {
            seed_skill(&mut skills, id);
        }
    }

    // EN weapons only harvest skill ids; they never overlay weapon rows.
    for card in inputs.en_cards.iter().filter(|c| is_weapon(c)) {
        if let Some(id) = card.front_skill_mst_id {
            seed_skill(&mut skills, id);
        }
    }

    // Attach the rate sheet by numeric id; unmatched entries become stub
    // weapon identities and are reported, never dropped.
    for entry in inputs.rate_sheet {
        if entry.id.is_empty() {
            continue;
        }
        let Ok(card_mst_id) = entry.id.trim().parse::<u32>() else {
            diagnostics.push(Diagnostic::UnusableSheetId {
                raw: entry.id.clone(),
            });
            continue;
        };
        match weapons.get_mut(&card_mst_id) {
            Some(weapon) => weapon.sheet = Some(entry.clone()),
            None => {
                diagnostics.push(Diagnostic::UnknownSheetCard { card_mst_id });
                weapons.insert(
                    card_mst_id,
                    WeaponIdentity {
                        card_mst_id,
                        mst: None,
                        sheet: Some(entry.clone()),
                    },
                );
            }
        }
    }

    // Localized text attaches only to identities some weapon references.
    for skill in inputs.jp_skills {
        if let Some(identity) = skills.get_mut(&skill.skill_mst_id) {
            identity.jp = Some(skill.clone());
        }
    }
    for skill in inputs.en_skills {
        if let Some(identity) = skills.get_mut(&skill.skill_mst_id) {
            identity.en = Some(skill.clone());
        }
    }

    // Route rate texts weapon -> front skill. First write wins; a
    // different later value for the same skill is a reported conflict.
    for weapon in weapons.values() {
        let Some(mst) = &weapon.mst else { continue };
        let Some(skill_mst_id) = mst.front_skill_mst_id else {
            continue;
        };
        let Some(rate_text) = weapon
            .sheet
            .as_ref()
            .and_then(|sheet| sheet.rate_text.as_deref())
            .filter(|text| !text.is_empty())
        else {
            continue;
        };
        let Some(identity) = skills.get_mut(&skill_mst_id) else {
            continue;
        };
        match &identity.rate_text {
            Some(kept) if kept != rate_text => {
                diagnostics.push(Diagnostic::ConflictingRateText {
                    skill_mst_id,
                    kept: kept.clone(),
                    ignored: rate_text.to_string(),
                });
            }
            Some(_) => {}
            None => identity.rate_text = Some(rate_text.to_string()),
        }
    }

    // Numeric multiplier sheet attaches by skill id. Entries for skills no
    // weapon references are normal (the sheet covers more than weapons).
    for mult in inputs.multipliers {
        if let Some(identity) = skills.get_mut(&mult.skill_mst_id) {
            identity.multiplier = Some(Multiplier {
                base: mult.base,
                alt: mult.alt,
            });
        } else {
            tracing::debug!(
                skill_mst_id = mult.skill_mst_id,
                "multiplier entry outside the weapon skill set"
            );
        }
    }

    // Display order: EN name collation ascending, identities without an EN
    // name after, ties on skill id.
    let mut skills: Vec<SkillIdentity> = skills.into_values().collect();
    skills.sort_by(|a, b| match (&a.en, &b.en) {
        (Some(ea), Some(eb)) => {
            collate::cmp(&ea.name, &eb.name).then(a.skill_mst_id.cmp(&b.skill_mst_id))
        }
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.skill_mst_id.cmp(&b.skill_mst_id),
    });

    SkillMap {
        weapons,
        skills,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mst::MultiplierValues;

    fn weapon(card_mst_id: u32, front_skill: u32) -> CardMst {
        CardMst {
            card_mst_id,
            card_unique_id: card_mst_id,
            name: format!("weapon {card_mst_id}"),
            is_release: true,
            card_type: 1,
            front_skill_mst_id: Some(front_skill),
            ..CardMst::default()
        }
    }

    fn skill(id: u32, name: &str) -> SkillMst {
        SkillMst {
            skill_mst_id: id,
            name: name.to_string(),
            ..SkillMst::default()
        }
    }

    fn sheet(id: &str, rate_text: Option<&str>) -> RateSheetEntry {
        RateSheetEntry {
            id: id.to_string(),
            rate_text: rate_text.map(str::to_string),
        }
    }

    fn inputs<'a>(
        jp_cards: &'a [CardMst],
        jp_skills: &'a [SkillMst],
        rate_sheet: &'a [RateSheetEntry],
        multipliers: &'a [SkillMultiplier],
    ) -> SkillMapInputs<'a> {
        SkillMapInputs {
            jp_cards,
            en_cards: &[],
            jp_skills,
            en_skills: &[],
            multipliers,
            rate_sheet,
        }
    }

    #[test]
    fn test_duplicate_weapon_id_keeps_first_and_reports_once() {
        let mut second = weapon(10, 200);
        second.name = "impostor".to_string();
        let jp = vec![weapon(10, 100), second];
        let map = build(inputs(&jp, &[], &[], &[]));

        assert_eq!(
            map.diagnostics.as_slice(),
            &[Diagnostic::DuplicateCardId { card_mst_id: 10 }]
        );
        let kept = map.weapons.get(&10).unwrap().mst.as_ref().unwrap();
        assert_eq!(kept.front_skill_mst_id, Some(100));
        // Both front skills were still seeded.
        assert_eq!(map.skills.len(), 2);
    }

    #[test]
    fn test_unknown_sheet_entry_becomes_stub() {
        let jp = vec![weapon(10, 100)];
        let entries = vec![sheet("10", Some("x2.0")), sheet("77", Some("x9")), sheet("", None)];
        let map = build(inputs(&jp, &[], &entries, &[]));

        assert_eq!(
            map.diagnostics.as_slice(),
            &[Diagnostic::UnknownSheetCard { card_mst_id: 77 }]
        );
        let stub = map.weapons.get(&77).unwrap();
        assert!(stub.mst.is_none());
        assert_eq!(stub.sheet.as_ref().unwrap().rate_text.as_deref(), Some("x9"));
    }

    #[test]
    fn test_unusable_sheet_id_is_reported() {
        let map = build(inputs(&[], &[], &[sheet("n/a", Some("x1"))], &[]));
        assert_eq!(
            map.diagnostics.as_slice(),
            &[Diagnostic::UnusableSheetId {
                raw: "n/a".to_string()
            }]
        );
    }

    #[test]
    fn test_rate_text_conflict_keeps_first() {
        // Two distinct weapons share a front skill but the sheet disagrees.
        let jp = vec![weapon(10, 100), weapon(11, 100)];
        let entries = vec![sheet("10", Some("x2.0")), sheet("11", Some("x3.0"))];
        let map = build(inputs(&jp, &[], &entries, &[]));

        let identity = map.skills.iter().find(|s| s.skill_mst_id == 100).unwrap();
        assert_eq!(identity.rate_text.as_deref(), Some("x2.0"));
        assert_eq!(
            map.diagnostics.as_slice(),
            &[Diagnostic::ConflictingRateText {
                skill_mst_id: 100,
                kept: "x2.0".to_string(),
                ignored: "x3.0".to_string(),
            }]
        );
    }

    #[test]
    fn test_identical_rate_text_is_not_a_conflict() {
        let jp = vec![weapon(10, 100), weapon(11, 100)];
        let entries = vec![sheet("10", Some("x2.0")), sheet("11", Some("x2.0"))];
        let map = build(inputs(&jp, &[], &entries, &[]));
        assert!(map.diagnostics.is_empty());
    }

    #[test]
    fn test_localized_text_and_multiplier_attach() {
        let jp = vec![weapon(10, 100)];
        let jp_skills = vec![skill(100, "日本語名"), skill(999, "unrelated")];
        let en_skills = vec![skill(100, "Flame Strike")];
        let multipliers = vec![SkillMultiplier {
            skill_mst_id: 100,
            base: MultiplierValues {
                damage: Some(2.5),
                ..MultiplierValues::default()
            },
            alt: None,
        }];
        let map = build(SkillMapInputs {
            jp_cards: &jp,
            en_cards: &[],
            jp_skills: &jp_skills,
            en_skills: &en_skills,
            multipliers: &multipliers,
            rate_sheet: &[],
        });

        assert_eq!(map.skills.len(), 1);
        let identity = &map.skills[0];
        assert_eq!(identity.en.as_ref().unwrap().name, "Flame Strike");
        assert_eq!(identity.jp.as_ref().unwrap().name, "日本語名");
        assert_eq!(identity.multiplier.unwrap().base.damage, Some(2.5));
    }

    #[test]
    fn test_output_sorted_by_en_name_with_missing_en_last() {
        let jp = vec![weapon(10, 100), weapon(11, 101), weapon(12, 102)];
        let en_skills = vec![skill(100, "Zeal"), skill(102, "Aria")];
        let map = build(SkillMapInputs {
            jp_cards: &jp,
            en_cards: &[],
            jp_skills: &[],
            en_skills: &en_skills,
            multipliers: &[],
            rate_sheet: &[],
        });

        let order: Vec<u32> = map.skills.iter().map(|s| s.skill_mst_id).collect();
        assert_eq!(order, vec![102, 100, 101]);
    }

    #[test]
    fn test_empty_inputs_build_empty_map() {
        let map = build(inputs(&[], &[], &[], &[]));
        assert!(map.weapons.is_empty());
        assert!(map.skills.is_empty());
        assert!(map.diagnostics.is_empty());
    }
}
