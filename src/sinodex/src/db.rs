//! Session database: memoized datasets plus memoized derived indexes.
//!
//! One [`Database`] value owns the [`SourceCache`] and a per-localization
//! table of index cells. Each index builds at most once per session even
//! under concurrent requesters (single-flight via `tokio::sync::OnceCell`)
//! and is published as an immutable `Arc`. Views that the upstream tool
//! recomputes per request (weapon listing, nightmare listing, library
//! import) stay uncached here too; only their inputs are.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::arts::{self, NightmareRow};
use crate::cards::{self, Card, CardIndex, NameIndex};
use crate::growth::{self, GrowthSummary};
use crate::library::{self, LibraryImport};
use crate::mst::{
    ArtMst, CardMst, CharacterAbilityMst, CharacterMst, Locale, RateSheetEntry, SkillMst,
    SkillMultiplier,
};
use crate::skillmap::{self, SkillMap, SkillMapInputs};
use crate::skills::{self, BilingualSkill, SkillIndex};
use crate::source::{Dataset, SourceCache, SourceLoader};

#[derive(Default)]
struct LocaleCells {
    cards: OnceCell<Arc<CardIndex>>,
    names: OnceCell<Arc<NameIndex>>,
    skills: OnceCell<Arc<SkillIndex>>,
    growth: OnceCell<Arc<GrowthSummary>>,
}

/// Fused view over all configured sources for one session.
pub struct Database<L> {
    sources: SourceCache<L>,
    en: LocaleCells,
    jp: LocaleCells,
    skill_map: OnceCell<Arc<SkillMap>>,
}

impl<L: SourceLoader> Database<L> {
    pub fn new(loader: L) -> Self {
        Self {
            sources: SourceCache::new(loader),
            en: LocaleCells::default(),
            jp: LocaleCells::default(),
            skill_map: OnceCell::new(),
        }
    }

    /// The underlying dataset cache, for callers that need raw records.
    pub fn sources(&self) -> &SourceCache<L> {
        &self.sources
    }

    fn cells(&self, locale: Locale) -> &LocaleCells {
        match locale {
            Locale::En => &self.en,
            Locale::Jp => &self.jp,
        }
    }

    /// Cards grouped by unique id.
    pub async fn cards(&self, locale: Locale) -> Arc<CardIndex> {
        self.cells(locale)
            .cards
            .get_or_init(|| async {
                let records: Vec<CardMst> = self.sources.records(Dataset::CardMst(locale)).await;
                Arc::new(cards::group_by_unique_id(&records))
            })
            .await
            .clone()
    }

    /// Canonical name lookup, derived from [`Database::cards`].
    pub async fn names(&self, locale: Locale) -> Arc<NameIndex> {
        self.cells(locale)
            .names
            .get_or_init(|| async {
                let cards = self.cards(locale).await;
                Arc::new(cards::index_by_name(&cards))
            })
            .await
            .clone()
    }

    /// Skills enriched with the community multiplier sheet.
    pub async fn skills(&self, locale: Locale) -> Arc<SkillIndex> {
        self.cells(locale)
            .skills
            .get_or_init(|| async {
                let (masters, multipliers) = tokio::join!(
                    self.sources.records::<SkillMst>(Dataset::SkillMst(locale)),
                    self.sources
                        .records::<SkillMultiplier>(Dataset::SkillMultipliers),
                );
                Arc::new(skills::build_index(locale, &masters, &multipliers))
            })
            .await
            .clone()
    }

    /// Character stat growth summary.
    pub async fn growth(&self, locale: Locale) -> Arc<GrowthSummary> {
        self.cells(locale)
            .growth
            .get_or_init(|| async {
                let (characters, abilities) = tokio::join!(
                    self.sources
                        .records::<CharacterMst>(Dataset::CharacterMst(locale)),
                    self.sources
                        .records::<CharacterAbilityMst>(Dataset::CharacterAbilityMst(locale)),
                );
                Arc::new(growth::summarize(&characters, &abilities))
            })
            .await
            .clone()
    }

    /// The cross-source weapon/skill identity table.
    pub async fn skill_map(&self) -> Arc<SkillMap> {
        self.skill_map
            .get_or_init(|| async {
                let (jp_cards, en_cards, jp_skills, en_skills, multipliers, rate_sheet) = tokio::join!(
                    self.sources.records::<CardMst>(Dataset::CardMst(Locale::Jp)),
                    self.sources.records::<CardMst>(Dataset::CardMst(Locale::En)),
                    self.sources.records::<SkillMst>(Dataset::SkillMst(Locale::Jp)),
                    self.sources.records::<SkillMst>(Dataset::SkillMst(Locale::En)),
                    self.sources
                        .records::<SkillMultiplier>(Dataset::SkillMultipliers),
                    self.sources.records::<RateSheetEntry>(Dataset::RateSheet),
                );
                Arc::new(skillmap::build(SkillMapInputs {
                    jp_cards: &jp_cards,
                    en_cards: &en_cards,
                    jp_skills: &jp_skills,
                    en_skills: &en_skills,
                    multipliers: &multipliers,
                    rate_sheet: &rate_sheet,
                }))
            })
            .await
            .clone()
    }

    /// Weapon cards in display order.
    pub async fn weapons(&self, locale: Locale) -> Vec<Arc<Card>> {
        let (cards, skills) = tokio::join!(self.cards(locale), self.skills(locale));
        cards::weapon_cards(&cards, &skills)
    }

    /// EN skill rows paired with their JP counterparts.
    pub async fn bilingual_skills(&self) -> Vec<BilingualSkill> {
        let (en, jp) = tokio::join!(
            self.sources.records::<SkillMst>(Dataset::SkillMst(Locale::En)),
            self.sources.records::<SkillMst>(Dataset::SkillMst(Locale::Jp)),
        );
        skills::pair_bilingual(en, jp)
    }

    /// Nightmare cards with resolved art names.
    pub async fn nightmares(&self, locale: Locale, include_unreleased: bool) -> Vec<NightmareRow> {
        let (cards, arts) = tokio::join!(
            self.sources.records::<CardMst>(Dataset::CardMst(locale)),
            self.sources.records::<ArtMst>(Dataset::ArtMst(locale)),
        );
        arts::nightmare_rows(&cards, &arts, include_unreleased)
    }

    /// Parse and resolve a library dump against this session's indexes.
    pub async fn import_library(&self, locale: Locale, text: &str) -> LibraryImport {
        let names = self.names(locale).await;
        library::parse_library(text, &names)
    }
}
