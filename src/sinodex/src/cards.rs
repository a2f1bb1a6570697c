//! Canonical card grouping and name lookup.
//!
//! A card master list carries one flat record per rarity/evolution instance;
//! the same logical card appears once per variant under a shared
//! `cardUniqueId`. Grouping produces one [`Card`] per unique id with its
//! variants in a deterministic order, which every downstream view shares.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::collate;
use crate::mst::CardMst;
use crate::reference::CardType;
use crate::skills::SkillIndex;

/// One logical card spanning one or more variants.
///
/// Variants are sorted ascending by evolution level, ties broken by
/// `cardMstId`. A card that is not infinitely evolvable has exactly one
/// variant with no evolution level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub unique_id: u32,
    /// Trimmed name of the first released variant. A later variant released
    /// under the same unique id with a different name does not rename the
    /// card.
    pub name: String,
    pub variants: Vec<CardMst>,
}

impl Card {
    /// The highest variant (last in evolution order).
    pub fn variant_max(&self) -> Option<&CardMst> {
        self.variants.last()
    }

    /// Card category, taken from the first variant.
    pub fn card_type(&self) -> Option<CardType> {
        self.variants.first().and_then(|v| CardType::from_code(v.card_type))
    }
}

/// Cards keyed by unique id, iterated in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardIndex {
    by_unique_id: BTreeMap<u32, Arc<Card>>,
}

impl CardIndex {
    pub fn get(&self, unique_id: u32) -> Option<&Arc<Card>> {
        self.by_unique_id.get(&unique_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.by_unique_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_unique_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_unique_id.is_empty()
    }
}

/// Group flat master records into canonical cards.
///
/// Unreleased records are skipped silently. Recomputation over the same
/// input yields a deeply equal result.
pub fn group_by_unique_id(records: &[CardMst]) -> CardIndex {
    let mut cards: BTreeMap<u32, Card> = BTreeMap::new();

    for record in records {
        if !record.is_release {
            continue;
        }
        let mut record = record.clone();
        record.name = record.name.trim().to_string();

        let card = cards.entry(record.card_unique_id).or_insert_with(|| Card {
            unique_id: record.card_unique_id,
            name: record.name.clone(),
            variants: Vec::new(),
        });
        card.variants.push(record);
    }

    for card in cards.values_mut() {
        card.variants
            .sort_by_key(|v| (v.evolution_level.unwrap_or(0), v.card_mst_id));
    }

    CardIndex {
        by_unique_id: cards.into_iter().map(|(id, c)| (id, Arc::new(c))).collect(),
    }
}

/// Canonical name -> card lookup for user-typed names.
///
/// On a name collision the card with the higher unique id wins
/// (last-write-wins over the ascending id iteration). Collisions are not
/// reported at this layer.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_name: HashMap<String, Arc<Card>>,
}

impl NameIndex {
    pub fn get(&self, name: &str) -> Option<&Arc<Card>> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Derive the name lookup from a card index.
pub fn index_by_name(cards: &CardIndex) -> NameIndex {
    let mut by_name = HashMap::new();
    for card in cards.iter() {
        by_name.insert(card.name.clone(), card.clone());
    }
    NameIndex { by_name }
}

/// Weapon cards in display order.
///
/// Infinitely evolvable weapons come first, ordered by name; the rest are
/// ordered by their top variant's front skill name, ties broken by front
/// skill id. The skill index supplies the names; a weapon whose front skill
/// is unknown falls back to the id comparison.
pub fn weapon_cards(cards: &CardIndex, skills: &SkillIndex) -> Vec<Arc<Card>> {
    let mut weapons: Vec<Arc<Card>> = cards
        .iter()
        .filter(|card| card.card_type() == Some(CardType::Weapon))
        .cloned()
        .collect();

    weapons.sort_by(|a, b| {
        let (Some(va), Some(vb)) = (a.variant_max(), b.variant_max()) else {
            return a.unique_id.cmp(&b.unique_id);
        };
        match (va.is_infinite_evolution, vb.is_infinite_evolution) {
            (true, true) => collate::cmp(&va.name, &vb.name),
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            (false, false) => {
                let sa = va.front_skill_mst_id.and_then(|id| skills.get(id));
                let sb = vb.front_skill_mst_id.and_then(|id| skills.get(id));
                if let (Some(sa), Some(sb)) = (sa, sb) {
                    let by_name = collate::cmp(&sa.mst.name, &sb.mst.name);
                    if by_name != std::cmp::Ordering::Equal {
                        return by_name;
                    }
                }
                va.front_skill_mst_id
                    .unwrap_or(0)
                    .cmp(&vb.front_skill_mst_id.unwrap_or(0))
            }
        }
    });

    weapons
}
