//! Raw master-data record shapes.
//!
//! One struct per upstream dataset, mirroring the JSON field names
//! (camelCase). Upstream data is loosely typed: flags arrive as booleans or
//! 0/1 integers, id references use 0 for "none", and the community rate
//! sheet carries its numeric id as a string. The deserializers here absorb
//! those quirks so the rest of the crate works with honest types.

use serde::{Deserialize, Serialize};

/// Dataset localization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Locale {
    En,
    Jp,
}

impl Locale {
    /// Uppercase code as used in dataset paths.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Jp => "JP",
        }
    }

    /// Parse a user-supplied locale string; anything unrecognized falls
    /// back to EN rather than erroring.
    pub fn sanitize(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_uppercase).as_deref() {
            Some("JP") => Self::Jp,
            _ => Self::En,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One card master record: a concrete rarity/evolution instance of a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardMst {
    pub card_mst_id: u32,
    pub card_unique_id: u32,
    pub name: String,
    #[serde(deserialize_with = "de::flag")]
    pub is_release: bool,
    pub role_type: u8,
    pub card_type: u8,
    pub card_detail_type: u8,
    pub weapon_type: u8,
    pub attribute: u8,
    pub rarity: u8,
    /// Position in the evolution chain; only meaningful when
    /// `is_infinite_evolution` is set.
    pub evolution_level: Option<u32>,
    #[serde(deserialize_with = "de::flag")]
    pub is_infinite_evolution: bool,
    #[serde(deserialize_with = "de::id_ref")]
    pub front_skill_mst_id: Option<u32>,
    #[serde(deserialize_with = "de::id_ref")]
    pub auto_skill_mst_id: Option<u32>,
    #[serde(deserialize_with = "de::id_ref")]
    pub back_skill_mst_id: Option<u32>,
    #[serde(deserialize_with = "de::id_ref")]
    pub quest_skill_mst_id: Option<u32>,
    #[serde(deserialize_with = "de::id_ref")]
    pub limit_break_skill_mst_id: Option<u32>,
    #[serde(deserialize_with = "de::id_ref")]
    pub quest_art_mst_id: Option<u32>,
    #[serde(deserialize_with = "de::id_ref")]
    pub art_mst_id: Option<u32>,
    pub max_level: u32,
}

/// One skill master record.
///
/// `description` may embed literal `\n` escape sequences meant as line
/// breaks; they are preserved here and converted at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillMst {
    pub skill_mst_id: u32,
    pub name: String,
    pub description: String,
    pub sp: u32,
    /// Targeting indicator: 1 single target, 2 ranged count, 3 exact count.
    pub range_icon: u8,
}

/// Numeric multiplier values for one skill variant (base or alt block).
///
/// A value of 0 is treated as "not stated" by the sheet maintainers and is
/// skipped when formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiplierValues {
    pub damage: Option<f64>,
    pub recovery: Option<f64>,
    pub patk: Option<f64>,
    pub matk: Option<f64>,
    pub pdef: Option<f64>,
    pub mdef: Option<f64>,
    pub targets_min: Option<u32>,
    pub targets_max: Option<u32>,
}

/// One entry of the community multiplier sheet, keyed by skill id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillMultiplier {
    pub skill_mst_id: u32,
    pub base: MultiplierValues,
    pub alt: Option<MultiplierValues>,
}

/// One entry of the community weapon rate sheet.
///
/// The sheet is maintained by hand: `ID` is a string and may be empty or
/// non-numeric, and `rate_text` is free text. Unknown columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSheetEntry {
    #[serde(rename = "ID", deserialize_with = "de::loose_string")]
    pub id: String,
    pub rate_text: Option<String>,
}

/// One character (class) master record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterMst {
    pub character_mst_id: u32,
    pub name: String,
    /// Display-availability epoch seconds, when published.
    pub display_start_time: Option<i64>,
}

/// One character ability record, bucketed into stat-growth tiers by its
/// release-level threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterAbilityMst {
    pub character_ability_mst_id: u32,
    pub character_mst_id: u32,
    pub name: String,
    pub skill_type: u8,
    /// Stat slot the ability feeds, 1-based (see [`crate::growth`]).
    pub effect_type: u8,
    pub effect_value: i64,
    pub release_level: u32,
    pub card_detail_type: u8,
}

/// One art (nightmare skill) master record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtMst {
    pub art_mst_id: u32,
    pub name: String,
}

mod de {
    use serde::{Deserialize, Deserializer};

    /// Accept `true`/`false` as well as 0/1 integers.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Bool(bool),
            Int(i64),
        }

        Ok(match Option::<Flag>::deserialize(deserializer)? {
            Some(Flag::Bool(b)) => b,
            Some(Flag::Int(i)) => i != 0,
            None => false,
        })
    }

    /// Id reference where 0 and null both mean "none".
    pub fn id_ref<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u32>::deserialize(deserializer)?.filter(|id| *id != 0))
    }

    /// Accept a string or a bare number and keep it as a string.
    pub fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Loose {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Option::<Loose>::deserialize(deserializer)? {
            Some(Loose::Text(s)) => s,
            Some(Loose::Int(i)) => i.to_string(),
            Some(Loose::Float(f)) => f.to_string(),
            None => String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_mst_accepts_integer_flags() {
        let card: CardMst = serde_json::from_str(
            r#"{
                "cardMstId": 11,
                "cardUniqueId": 7,
                "name": "Excalibur",
                "isRelease": 1,
                "cardType": 1,
                "rarity": 3,
                "frontSkillMstId": 0,
                "autoSkillMstId": 42,
                "maxLevel": 50
            }"#,
        )
        .unwrap();
        assert!(card.is_release);
        assert_eq!(card.front_skill_mst_id, None);
        assert_eq!(card.auto_skill_mst_id, Some(42));
        assert_eq!(card.evolution_level, None);
    }

    #[test]
    fn test_rate_sheet_id_may_be_numeric() {
        let entry: RateSheetEntry =
            serde_json::from_str(r#"{"ID": 1021, "rate_text": "x2.5"}"#).unwrap();
        assert_eq!(entry.id, "1021");

        let entry: RateSheetEntry = serde_json::from_str(r#"{"ID": ""}"#).unwrap();
        assert_eq!(entry.id, "");
        assert_eq!(entry.rate_text, None);
    }

    #[test]
    fn test_locale_sanitize() {
        assert_eq!(Locale::sanitize(Some("jp")), Locale::Jp);
        assert_eq!(Locale::sanitize(Some("JP")), Locale::Jp);
        assert_eq!(Locale::sanitize(Some("fr")), Locale::En);
        assert_eq!(Locale::sanitize(None), Locale::En);
    }
}
