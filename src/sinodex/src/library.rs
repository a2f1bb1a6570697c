//! User library import: parse a pasted/exported tab-separated dump and
//! resolve each row against the canonical card index.
//!
//! The parser never fails fatally. Lines with the wrong cell count are
//! skipped by design; a row that parses but matches no card or variant is
//! still produced, explicitly unresolved, so it can render as unknown.

use std::sync::Arc;

use crate::cards::{Card, NameIndex};
use crate::mst::CardMst;
use crate::reference::{self, RARITY_LB_LEVELS, RARITY_LEVELS};

/// Cells per valid library line.
const LIBRARY_LINE_CELLS: usize = 7;

/// Outcome of matching a parsed row against the card index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Resolution {
    /// Matched a card and the index of the matching variant within it.
    Resolved { card: Arc<Card>, variant: usize },
    #[default]
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// One user-declared possession.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryItem {
    pub name: String,
    /// Rarity ordinal; `None` when the rarity letter was unrecognized.
    pub rarity: Option<u8>,
    /// `None` preserves a blank cell, distinguishing "non-evolvable" from
    /// "evolution level 0".
    pub evolution_level: Option<u32>,
    pub limit_breaks: u32,
    pub level: u32,
    pub main_skill_level: u32,
    pub aid_skill_level: u32,
    pub resolution: Resolution,
    /// Level equals the computed maximum for this rarity, limit breaks,
    /// and matched variant. Always false while unresolved.
    pub is_max_level: bool,
    pub is_max_main_skill_level: bool,
    pub is_max_aid_skill_level: bool,
}

impl LibraryItem {
    pub fn card(&self) -> Option<&Arc<Card>> {
        match &self.resolution {
            Resolution::Resolved { card, .. } => Some(card),
            Resolution::Unresolved => None,
        }
    }

    /// The matched variant, when resolved.
    pub fn variant(&self) -> Option<&CardMst> {
        match &self.resolution {
            Resolution::Resolved { card, variant } => card.variants.get(*variant),
            Resolution::Unresolved => None,
        }
    }

    /// The matched card's highest variant, when resolved.
    pub fn variant_max(&self) -> Option<&CardMst> {
        self.card().and_then(|card| card.variant_max())
    }
}

/// A parsed library dump.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryImport {
    pub items: Vec<LibraryItem>,
}

impl LibraryImport {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Maximum obtainable level for a rarity and limit-break count, clamped to
/// the matched variant's own bound.
pub fn max_level(rarity: u8, limit_breaks: u32, variant_cap: u32) -> u32 {
    let idx = usize::from(rarity);
    let base = RARITY_LEVELS.get(idx).copied().unwrap_or(0);
    let per_lb = RARITY_LB_LEVELS.get(idx).copied().unwrap_or(0);
    (base + limit_breaks * per_lb).min(variant_cap)
}

/// Maximum skill level for a limit-break count.
pub fn max_skill_level(limit_breaks: u32) -> u32 {
    15 + limit_breaks + limit_breaks / 4
}

fn int_cell(cell: &str) -> u32 {
    cell.trim().parse().unwrap_or(0)
}

fn resolve(name: &str, rarity: Option<u8>, evolution_level: Option<u32>, names: &NameIndex) -> Resolution {
    let Some(card) = names.get(name) else {
        return Resolution::Unresolved;
    };
    let matched = card.variants.iter().position(|variant| {
        if rarity != Some(variant.rarity) || variant.name != name {
            return false;
        }
        match (variant.is_infinite_evolution, evolution_level) {
            (false, None) => true,
            (true, Some(level)) => variant.evolution_level == Some(level),
            _ => false,
        }
    });
    match matched {
        Some(variant) => Resolution::Resolved {
            card: card.clone(),
            variant,
        },
        None => Resolution::Unresolved,
    }
}

fn parse_line(line: &str, names: &NameIndex) -> Option<LibraryItem> {
    let cells: Vec<&str> = line.split('\t').collect();
    if cells.len() != LIBRARY_LINE_CELLS {
        return None;
    }

    let name = cells[0].trim().to_string();
    let rarity = reference::rarity_by_letter(cells[1].trim());
    let evo_cell = cells[2].trim();
    let evolution_level = if evo_cell.is_empty() {
        None
    } else {
        Some(int_cell(evo_cell))
    };
    let limit_breaks = int_cell(cells[3]);
    let level = int_cell(cells[4]);
    let main_skill_level = int_cell(cells[5]);
    let aid_skill_level = int_cell(cells[6]);

    let resolution = resolve(&name, rarity, evolution_level, names);

    let is_max_level = match (&resolution, rarity) {
        (Resolution::Resolved { card, variant }, Some(rarity)) => card
            .variants
            .get(*variant)
            .is_some_and(|v| level == max_level(rarity, limit_breaks, v.max_level)),
        _ => false,
    };
    let max_skill = max_skill_level(limit_breaks);

    Some(LibraryItem {
        name,
        rarity,
        evolution_level,
        limit_breaks,
        level,
        main_skill_level,
        aid_skill_level,
        resolution,
        is_max_level,
        is_max_main_skill_level: main_skill_level == max_skill,
        is_max_aid_skill_level: aid_skill_level == max_skill,
    })
}

/// Parse a library dump and resolve every qualifying line.
pub fn parse_library(text: &str, names: &NameIndex) -> LibraryImport {
    let items = text
        .split('\n')
        .filter_map(|line| parse_line(line, names))
        .collect();
    LibraryImport { items }
}
