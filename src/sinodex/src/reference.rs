//! Reference data for SINoALICE cards
//!
//! Hardcoded reference data for game concepts like rarity tiers, card
//! categories, weapon kinds, and elemental attributes. This data is used
//! for categorization and display purposes.

// ============================================================================
// Rarity
// ============================================================================

/// Rarity letters indexed by ordinal, lowest to highest.
pub const RARITY_LETTERS: &[&str] = &["D", "C", "B", "A", "S", "SR", "L", "LL"];

/// Base max level per rarity ordinal (before limit breaks).
pub const RARITY_LEVELS: &[u32] = &[0, 0, 0, 40, 50, 60, 80, 100];

/// Max-level bonus granted by each limit break, per rarity ordinal.
pub const RARITY_LB_LEVELS: &[u32] = &[5, 5, 5, 5, 5, 5, 10, 10];

/// Rarity letter -> ordinal.
static RARITY_BY_LETTER: phf::Map<&'static str, u8> = phf::phf_map! {
    "D" => 0,
    "C" => 1,
    "B" => 2,
    "A" => 3,
    "S" => 4,
    "SR" => 5,
    "L" => 6,
    "LL" => 7,
};

/// Get rarity ordinal by letter
pub fn rarity_by_letter(letter: &str) -> Option<u8> {
    RARITY_BY_LETTER.get(letter).copied()
}

/// Get rarity letter by ordinal
pub fn rarity_letter(ordinal: u8) -> Option<&'static str> {
    RARITY_LETTERS.get(usize::from(ordinal)).copied()
}

// ============================================================================
// Card categories
// ============================================================================

/// Card category codes from the master data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Weapon,
    Armor,
    Nightmare,
    /// Upgrade sword/shield/tablet
    UpgradeExp,
    Gold,
    /// Gem (story, story support, colo, colo support)
    SkillExp,
}

impl CardType {
    /// Convert a cardType code to a category
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Weapon),
            2 => Some(Self::Armor),
            3 => Some(Self::Nightmare),
            5 => Some(Self::UpgradeExp),
            6 => Some(Self::Gold),
            7 => Some(Self::SkillExp),
            _ => None,
        }
    }

    /// Raw master-data code
    pub fn code(self) -> u8 {
        match self {
            Self::Weapon => 1,
            Self::Armor => 2,
            Self::Nightmare => 3,
            Self::UpgradeExp => 5,
            Self::Gold => 6,
            Self::SkillExp => 7,
        }
    }
}

// ============================================================================
// Weapon kinds
// ============================================================================

/// Weapon kind names indexed by `cardDetailType - 1`.
pub const WEAPON_KINDS: &[&str] = &[
    "instrument",
    "tome",
    "artifact",
    "staff",
    "sword",
    "hammer",
    "projectile",
    "polearm",
];

/// Get weapon kind name by cardDetailType code
pub fn weapon_kind(card_detail_type: u8) -> Option<&'static str> {
    card_detail_type
        .checked_sub(1)
        .and_then(|idx| WEAPON_KINDS.get(usize::from(idx)))
        .copied()
}

// ============================================================================
// Attributes
// ============================================================================

/// Elemental attribute names indexed by `attribute - 1`.
pub const ATTRIBUTES: &[&str] = &["Fire", "Water", "Wind"];

/// Get attribute name by attribute code
pub fn attribute_name(attribute: u8) -> Option<&'static str> {
    attribute
        .checked_sub(1)
        .and_then(|idx| ATTRIBUTES.get(usize::from(idx)))
        .copied()
}

// ============================================================================
// Ability kinds
// ============================================================================

/// Character ability kind names indexed by skillType. Index 0 is unused.
pub const ABILITY_KINDS: &[&str] = &["", "Common", "Class", "Support", "Support"];

/// Get ability kind name by skillType code
pub fn ability_kind(skill_type: u8) -> Option<&'static str> {
    ABILITY_KINDS
        .get(usize::from(skill_type))
        .copied()
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_lookup() {
        assert_eq!(rarity_by_letter("A"), Some(3));
        assert_eq!(rarity_by_letter("LL"), Some(7));
        assert_eq!(rarity_by_letter("X"), None);
        assert_eq!(rarity_letter(4), Some("S"));
        assert_eq!(rarity_letter(8), None);
    }

    #[test]
    fn test_rarity_tables_aligned() {
        assert_eq!(RARITY_LETTERS.len(), RARITY_LEVELS.len());
        assert_eq!(RARITY_LETTERS.len(), RARITY_LB_LEVELS.len());
    }

    #[test]
    fn test_card_type_codes() {
        assert_eq!(CardType::from_code(1), Some(CardType::Weapon));
        assert_eq!(CardType::from_code(3), Some(CardType::Nightmare));
        assert_eq!(CardType::from_code(4), None);
        assert_eq!(CardType::Nightmare.code(), 3);
    }

    #[test]
    fn test_weapon_kind_lookup() {
        assert_eq!(weapon_kind(1), Some("instrument"));
        assert_eq!(weapon_kind(8), Some("polearm"));
        assert_eq!(weapon_kind(0), None);
        assert_eq!(weapon_kind(9), None);
    }

    #[test]
    fn test_attribute_lookup() {
        assert_eq!(attribute_name(1), Some("Fire"));
        assert_eq!(attribute_name(3), Some("Wind"));
        assert_eq!(attribute_name(0), None);
    }
}
