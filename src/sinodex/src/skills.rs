//! Skill indexing and community multiplier enrichment.
//!
//! A raw [`SkillMst`] and an enriched [`Skill`] are distinct types joined
//! by an explicit merge: [`Skill::attach_multiplier`] returns a new state
//! rather than injecting fields, and attaching the same multiplier twice is
//! a no-op. Target counts come out of the description text through the
//! narrow grammar in [`crate::targets`].
//!
//! Enrichment of target counts only runs for the EN localization; the JP
//! descriptions use phrasings the extractor does not cover, so JP skills
//! keep their multiplier block without target data. Known limitation, not
//! one this layer papers over.

use std::collections::HashMap;
use std::sync::Arc;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::mst::{Locale, MultiplierValues, SkillMst, SkillMultiplier};
use crate::targets;

/// Multiplier fields a community sheet can state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultField {
    Damage,
    Recovery,
    Patk,
    Matk,
    Pdef,
    Mdef,
}

impl MultField {
    pub const ALL: &'static [MultField] = &[
        MultField::Damage,
        MultField::Recovery,
        MultField::Patk,
        MultField::Matk,
        MultField::Pdef,
        MultField::Mdef,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Recovery => "recovery",
            Self::Patk => "patk",
            Self::Matk => "matk",
            Self::Pdef => "pdef",
            Self::Mdef => "mdef",
        }
    }
}

impl MultiplierValues {
    /// Value of one multiplier field; 0 means "not stated" on the sheet.
    pub fn field(&self, field: MultField) -> Option<f64> {
        let value = match field {
            MultField::Damage => self.damage,
            MultField::Recovery => self.recovery,
            MultField::Patk => self.patk,
            MultField::Matk => self.matk,
            MultField::Pdef => self.pdef,
            MultField::Mdef => self.mdef,
        };
        value.filter(|v| *v != 0.0)
    }
}

/// Multiplier block attached to a skill: sheet values plus extracted
/// target counts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Multiplier {
    pub base: MultiplierValues,
    pub alt: Option<MultiplierValues>,
}

impl Multiplier {
    /// Render one field as `base` with the alt value in parentheses when
    /// the sheet states both, e.g. `2.5(3)`.
    pub fn field_text(&self, field: MultField) -> String {
        let mut text = String::new();
        if let Some(value) = self.base.field(field) {
            text.push_str(&value.to_string());
        }
        if let Some(value) = self.alt.as_ref().and_then(|alt| alt.field(field)) {
            text.push_str(&format!("({value})"));
        }
        text
    }

    /// Render the target-count range as `min-max` (or `min` when exact),
    /// with the alt range in parentheses when it differs.
    pub fn targets_text(&self) -> String {
        let Some(base_min) = self.base.targets_min else {
            return String::new();
        };
        let base_max = self.base.targets_max.unwrap_or(base_min);

        let alt = self.alt.as_ref();
        let alt_min = alt.and_then(|a| a.targets_min).unwrap_or(base_min);
        let alt_max = alt.and_then(|a| a.targets_max).unwrap_or(base_max);

        let mut text = range_text(base_min, base_max);
        if (alt_min, alt_max) != (base_min, base_max) {
            text.push_str(&format!("({})", range_text(alt_min, alt_max)));
        }
        text
    }
}

fn range_text(min: u32, max: u32) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{min}-{max}")
    }
}

/// A skill master record together with its community multiplier, when one
/// has been merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub mst: SkillMst,
    pub mult: Option<Multiplier>,
}

impl Skill {
    pub fn new(mst: SkillMst) -> Self {
        Self { mst, mult: None }
    }

    /// Merge a community multiplier record into this skill.
    ///
    /// A skill carries at most one multiplier: re-merging when one is
    /// already attached is a no-op. For the EN localization the skill's
    /// range icon decides how target counts are derived; an extraction
    /// failure is reported against the skill id and leaves targets unset.
    pub fn attach_multiplier(
        &mut self,
        mult: &SkillMultiplier,
        locale: Locale,
        diagnostics: &mut Diagnostics,
    ) {
        if self.mult.is_some() {
            return;
        }

        let mut block = Multiplier {
            base: mult.base,
            alt: mult.alt,
        };

        if locale == Locale::En {
            match self.mst.range_icon {
                1 => {
                    block.base.targets_min = Some(targets::TargetRange::SINGLE.min);
                    block.base.targets_max = Some(targets::TargetRange::SINGLE.max);
                }
                3 => match targets::exact_count(&self.mst.description) {
                    Ok(range) => {
                        block.base.targets_min = Some(range.min);
                        block.base.targets_max = Some(range.max);
                    }
                    Err(source) => diagnostics.push(Diagnostic::TargetParse {
                        skill_mst_id: self.mst.skill_mst_id,
                        source,
                    }),
                },
                2 => match targets::ranged_count(&self.mst.description) {
                    Ok(range) => {
                        block.base.targets_min = Some(range.min);
                        block.base.targets_max = Some(range.max);
                    }
                    Err(source) => diagnostics.push(Diagnostic::TargetParse {
                        skill_mst_id: self.mst.skill_mst_id,
                        source,
                    }),
                },
                _ => {}
            }
        }

        self.mult = Some(block);
    }
}

/// Skills keyed by id, with the diagnostics collected while enriching.
#[derive(Debug, Clone, Default)]
pub struct SkillIndex {
    by_id: HashMap<u32, Arc<Skill>>,
    pub diagnostics: Diagnostics,
}

impl SkillIndex {
    pub fn get(&self, skill_mst_id: u32) -> Option<&Arc<Skill>> {
        self.by_id.get(&skill_mst_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Skill>> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Index skill masters by id and merge in the multiplier sheet.
///
/// Multiplier entries referencing an unknown skill are dropped from
/// enrichment with a diagnostic; the rest of the build continues.
pub fn build_index(
    locale: Locale,
    masters: &[SkillMst],
    multipliers: &[SkillMultiplier],
) -> SkillIndex {
    let mut skills: HashMap<u32, Skill> = masters
        .iter()
        .map(|mst| (mst.skill_mst_id, Skill::new(mst.clone())))
        .collect();

    let mut diagnostics = Diagnostics::new();
    for mult in multipliers {
        match skills.get_mut(&mult.skill_mst_id) {
            Some(skill) => skill.attach_multiplier(mult, locale, &mut diagnostics),
            None => diagnostics.push(Diagnostic::DanglingMultiplier {
                skill_mst_id: mult.skill_mst_id,
            }),
        }
    }

    SkillIndex {
        by_id: skills
            .into_iter()
            .map(|(id, skill)| (id, Arc::new(skill)))
            .collect(),
        diagnostics,
    }
}

/// An EN skill row paired with its JP counterpart, where one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BilingualSkill {
    pub en: SkillMst,
    pub jp: Option<SkillMst>,
}

/// Pair the EN skill list with JP rows by skill id, preserving EN order.
pub fn pair_bilingual(en: Vec<SkillMst>, jp: Vec<SkillMst>) -> Vec<BilingualSkill> {
    let mut jp_by_id: HashMap<u32, SkillMst> = jp
        .into_iter()
        .map(|skill| (skill.skill_mst_id, skill))
        .collect();

    en.into_iter()
        .map(|skill| {
            let jp = jp_by_id.remove(&skill.skill_mst_id);
            BilingualSkill { en: skill, jp }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: u32, description: &str, range_icon: u8) -> SkillMst {
        SkillMst {
            skill_mst_id: id,
            name: format!("skill {id}"),
            description: description.to_string(),
            sp: 20,
            range_icon,
        }
    }

    fn mult(id: u32, damage: f64) -> SkillMultiplier {
        SkillMultiplier {
            skill_mst_id: id,
            base: MultiplierValues {
                damage: Some(damage),
                ..MultiplierValues::default()
            },
            alt: None,
        }
    }

    #[test]
    fn test_enrichment_attaches_and_reports_dangling() {
        let index = build_index(
            Locale::En,
            &[skill(1, "Greatly raises physical attack.", 0)],
            &[mult(1, 2.5), mult(99, 1.0)],
        );
        assert!(index.get(1).unwrap().mult.is_some());
        assert_eq!(
            index.diagnostics.as_slice(),
            &[Diagnostic::DanglingMultiplier { skill_mst_id: 99 }]
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut diagnostics = Diagnostics::new();
        let mut once = Skill::new(skill(1, "Deal damage to 3 enemies", 3));
        once.attach_multiplier(&mult(1, 2.5), Locale::En, &mut diagnostics);

        let mut twice = once.clone();
        twice.attach_multiplier(&mult(1, 9.9), Locale::En, &mut diagnostics);

        assert_eq!(once.mult, twice.mult);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_single_target_icon_sets_targets() {
        let index = build_index(
            Locale::En,
            &[skill(1, "Deals one mighty blow.", 1)],
            &[mult(1, 2.5)],
        );
        let block = index.get(1).unwrap().mult.unwrap();
        assert_eq!(block.base.targets_min, Some(1));
        assert_eq!(block.base.targets_max, Some(1));
    }

    #[test]
    fn test_exact_and_ranged_extraction() {
        let index = build_index(
            Locale::En,
            &[
                skill(1, "Deal damage to 3 enemies", 3),
                skill(2, "Heal 2 to 4 allies", 2),
            ],
            &[mult(1, 2.5), mult(2, 1.2)],
        );
        let exact = index.get(1).unwrap().mult.unwrap();
        assert_eq!((exact.base.targets_min, exact.base.targets_max), (Some(3), Some(3)));
        let ranged = index.get(2).unwrap().mult.unwrap();
        assert_eq!(
            (ranged.base.targets_min, ranged.base.targets_max),
            (Some(2), Some(4))
        );
    }

    #[test]
    fn test_extraction_failure_reports_and_leaves_targets_unset() {
        let index = build_index(
            Locale::En,
            &[skill(1, "Greatly raises physical attack.", 3)],
            &[mult(1, 2.5)],
        );
        let block = index.get(1).unwrap().mult.unwrap();
        assert_eq!(block.base.targets_min, None);
        assert_eq!(block.base.targets_max, None);
        assert_eq!(index.diagnostics.len(), 1);
        assert!(matches!(
            index.diagnostics.as_slice()[0],
            Diagnostic::TargetParse { skill_mst_id: 1, .. }
        ));
    }

    #[test]
    fn test_jp_skips_target_extraction() {
        let index = build_index(
            Locale::Jp,
            &[skill(1, "2体の敵にダメージ", 3)],
            &[mult(1, 2.5)],
        );
        let block = index.get(1).unwrap().mult.unwrap();
        assert_eq!(block.base.damage, Some(2.5));
        assert_eq!(block.base.targets_min, None);
        assert!(index.diagnostics.is_empty());
    }

    #[test]
    fn test_multiplier_text() {
        let block = Multiplier {
            base: MultiplierValues {
                damage: Some(2.5),
                recovery: Some(0.0),
                ..MultiplierValues::default()
            },
            alt: Some(MultiplierValues {
                damage: Some(3.0),
                ..MultiplierValues::default()
            }),
        };
        assert_eq!(block.field_text(MultField::Damage), "2.5(3)");
        assert_eq!(block.field_text(MultField::Recovery), "");
        assert_eq!(block.field_text(MultField::Patk), "");
    }

    #[test]
    fn test_targets_text() {
        let mut block = Multiplier::default();
        assert_eq!(block.targets_text(), "");

        block.base.targets_min = Some(2);
        block.base.targets_max = Some(4);
        assert_eq!(block.targets_text(), "2-4");

        block.alt = Some(MultiplierValues {
            targets_min: Some(3),
            targets_max: Some(3),
            ..MultiplierValues::default()
        });
        assert_eq!(block.targets_text(), "2-4(3)");
    }

    #[test]
    fn test_bilingual_pairing() {
        let en = vec![skill(1, "a", 0), skill(2, "b", 0)];
        let jp = vec![skill(2, "日本語", 0)];
        let rows = pair_bilingual(en, jp);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].jp.is_none());
        assert_eq!(rows[1].jp.as_ref().unwrap().skill_mst_id, 2);
    }
}
