//! Nightmare listing: cards of the nightmare category joined to the art
//! master that names their story and colosseum skills.

use std::collections::HashMap;

use crate::mst::{ArtMst, CardMst};
use crate::reference::CardType;

/// One nightmare card with its resolved art names.
///
/// An art reference the master does not know stays `None`; the row is kept
/// and rendered as unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightmareRow {
    pub mst: CardMst,
    pub story_art: Option<String>,
    pub colosseum_art: Option<String>,
}

/// Index art masters by id.
pub fn art_index(arts: &[ArtMst]) -> HashMap<u32, &ArtMst> {
    arts.iter().map(|art| (art.art_mst_id, art)).collect()
}

/// Nightmare cards in input order with their art names resolved.
///
/// Unreleased cards are skipped unless `include_unreleased` is set (the
/// debug listing shows them).
pub fn nightmare_rows(
    cards: &[CardMst],
    arts: &[ArtMst],
    include_unreleased: bool,
) -> Vec<NightmareRow> {
    let arts = art_index(arts);

    cards
        .iter()
        .filter(|card| CardType::from_code(card.card_type) == Some(CardType::Nightmare))
        .filter(|card| include_unreleased || card.is_release)
        .map(|card| NightmareRow {
            mst: card.clone(),
            story_art: card
                .quest_art_mst_id
                .and_then(|id| arts.get(&id))
                .map(|art| art.name.clone()),
            colosseum_art: card
                .art_mst_id
                .and_then(|id| arts.get(&id))
                .map(|art| art.name.clone()),
        })
        .collect()
}
