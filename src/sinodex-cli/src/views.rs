//! Text renderings of the fused views.
//!
//! Everything here consumes already-computed rows from the library and
//! formats them; no fusion logic lives in this crate.

use anyhow::Result;
use chrono::{DateTime, SecondsFormat};
use sinodex::growth::{GROWTH_TIER_NAMES, RESERVED_STAT_SLOT, STAT_SLOT_NAMES, STAT_SLOTS};
use sinodex::skills::{MultField, Skill};
use sinodex::{reference, Database, Locale, SkillIndex, SourceLoader};

const UNDEF: &str = "undef";

/// Render rows as a padded text table.
fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }
    }

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:width$}"))
            .collect();
        println!("{}", padded.join("  ").trim_end());
    };

    line(&headers.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    line(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>());
    for row in rows {
        line(row);
    }
}

fn rarity_text(ordinal: u8) -> String {
    reference::rarity_letter(ordinal)
        .map(str::to_string)
        .unwrap_or_else(|| format!("?{ordinal}"))
}

/// Literal `\n` escapes in descriptions are line breaks; keep the row on
/// one line.
fn description_text(description: &str) -> String {
    description.replace("\\n", " / ")
}

fn skill_name(skills: &SkillIndex, id: Option<u32>) -> String {
    id.and_then(|id| skills.get(id))
        .map(|skill| skill.mst.name.clone())
        .unwrap_or_else(|| UNDEF.to_string())
}

fn mult_cell(skill: &Skill, field: MultField) -> String {
    skill
        .mult
        .as_ref()
        .map(|mult| mult.field_text(field))
        .unwrap_or_default()
}

// ============================================================================
// Weapons
// ============================================================================

pub async fn weapons<L: SourceLoader>(db: &Database<L>, locale: Locale, debug: bool) -> Result<()> {
    let weapons = db.weapons(locale).await;
    let skills = db.skills(locale).await;

    let mut headers = vec!["name", "rarity", "colo support", "colo", "SP", "targets"];
    for field in MultField::ALL {
        headers.push(field.name());
    }
    if debug {
        headers.insert(0, "cardUniqueId");
        headers.insert(1, "cardMstId");
    }

    let mut rows = Vec::new();
    for weapon in &weapons {
        let variant_count = weapon.variants.len();
        for (idx, variant) in weapon.variants.iter().enumerate() {
            let mut row = Vec::new();
            if debug {
                row.push(variant.card_unique_id.to_string());
                row.push(variant.card_mst_id.to_string());
            }
            // Name only on the first row of a variant group.
            row.push(if idx == 0 {
                variant.name.clone()
            } else {
                String::new()
            });

            let mut rarity = rarity_text(variant.rarity);
            if variant.is_infinite_evolution {
                rarity.push_str(&format!(
                    " ({}/{})",
                    variant.evolution_level.unwrap_or(0),
                    variant_count - 1
                ));
            }
            row.push(rarity);

            row.push(skill_name(&skills, variant.auto_skill_mst_id));

            match variant.front_skill_mst_id.and_then(|id| skills.get(id)) {
                Some(front) => {
                    row.push(front.mst.name.clone());
                    row.push(front.mst.sp.to_string());
                    row.push(
                        front
                            .mult
                            .as_ref()
                            .map(|m| m.targets_text())
                            .unwrap_or_default(),
                    );
                    for field in MultField::ALL {
                        row.push(mult_cell(front, *field));
                    }
                }
                None => {
                    row.push(format!("?{UNDEF}?"));
                    row.extend(std::iter::repeat_with(String::new).take(8));
                }
            }
            rows.push(row);
        }
    }

    println!("Weapons ({locale})");
    print_table(&headers, &rows);
    Ok(())
}

// ============================================================================
// Skills (bilingual)
// ============================================================================

pub async fn skills<L: SourceLoader>(db: &Database<L>) -> Result<()> {
    let rows = db.bilingual_skills().await;

    let mut table = Vec::new();
    for row in &rows {
        table.push(vec![
            row.en.skill_mst_id.to_string(),
            row.en.name.clone(),
            description_text(&row.en.description),
        ]);
        if let Some(jp) = &row.jp {
            table.push(vec![
                String::new(),
                jp.name.clone(),
                description_text(&jp.description),
            ]);
        }
    }

    println!("Skills");
    print_table(&["skillMstId", "name", "description"], &table);
    Ok(())
}

// ============================================================================
// Skill map
// ============================================================================

pub async fn skill_map<L: SourceLoader>(db: &Database<L>) -> Result<()> {
    let map = db.skill_map().await;

    let mut rows = Vec::new();
    for identity in &map.skills {
        let blue_rates = identity
            .multiplier
            .map(|mult| {
                MultField::ALL
                    .iter()
                    .filter_map(|field| {
                        let text = mult.field_text(*field);
                        (!text.is_empty()).then(|| format!("{}: {text}", field.name()))
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        rows.push(vec![
            identity.skill_mst_id.to_string(),
            identity
                .en
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            identity
                .jp
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            identity.rate_text.clone().unwrap_or_default(),
            blue_rates,
        ]);
    }

    println!("Skill map");
    print_table(&["skillMstId", "EN name", "JP name", "ws rates", "blue rates"], &rows);

    if !map.diagnostics.is_empty() {
        println!();
        println!("{} anomalies:", map.diagnostics.len());
        for diagnostic in &map.diagnostics {
            println!("  {diagnostic}");
        }
    }
    Ok(())
}

// ============================================================================
// Classes
// ============================================================================

pub async fn classes<L: SourceLoader>(db: &Database<L>, locale: Locale, debug: bool) -> Result<()> {
    let summary = db.growth(locale).await;

    println!("Units (character/class)");
    for character in &summary.characters {
        println!();
        println!("== {}", character.mst.name);
        if let Some(start) = character.mst.display_start_time {
            if let Some(date) = DateTime::from_timestamp(start, 0) {
                println!("Display start time: {}", date.to_rfc3339_opts(SecondsFormat::Millis, true));
            }
        }

        let mut ability_rows = Vec::new();
        for ability in &character.abilities {
            let kind = reference::ability_kind(ability.skill_type).unwrap_or("");
            let mut row = vec![
                ability.release_level.to_string(),
                kind.to_string(),
                ability.name.clone(),
            ];
            if debug {
                row.push(ability.character_ability_mst_id.to_string());
                row.push(ability.effect_type.to_string());
                row.push(ability.effect_value.to_string());
            }
            ability_rows.push(row);
        }
        let mut ability_headers = vec!["level", "type", "name"];
        if debug {
            ability_headers.extend(["id", "effectType", "effectValue"]);
        }
        print_table(&ability_headers, &ability_rows);

        println!();
        let mut tier_headers = vec!["unlock"];
        for (slot, name) in STAT_SLOT_NAMES.iter().enumerate() {
            if slot != RESERVED_STAT_SLOT {
                tier_headers.push(*name);
            }
        }
        let tier_rows: Vec<Vec<String>> = character
            .tiers
            .iter()
            .enumerate()
            .map(|(tier, row)| {
                let mut cells = vec![GROWTH_TIER_NAMES[tier].to_string()];
                for (slot, value) in row.iter().enumerate() {
                    if slot == RESERVED_STAT_SLOT {
                        continue;
                    }
                    cells.push(if *value != 0 {
                        value.to_string()
                    } else {
                        String::new()
                    });
                }
                cells
            })
            .collect();
        print_table(&tier_headers, &tier_rows);
    }

    println!();
    println!("Total stats");
    println!("  Number of units: {}", summary.characters.len());
    for slot in 0..STAT_SLOTS {
        if slot == RESERVED_STAT_SLOT {
            continue;
        }
        println!("  {}: {}", STAT_SLOT_NAMES[slot], summary.totals[slot]);
    }
    Ok(())
}

// ============================================================================
// Nightmares
// ============================================================================

pub async fn nightmares<L: SourceLoader>(
    db: &Database<L>,
    locale: Locale,
    debug: bool,
) -> Result<()> {
    let rows = db.nightmares(locale, debug).await;

    let mut headers = vec!["name", "rarity", "story skill", "colosseum skill"];
    if debug {
        headers.insert(0, "cardMstId");
    }

    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::new();
            if debug {
                cells.push(row.mst.card_mst_id.to_string());
            }
            cells.push(row.mst.name.clone());
            cells.push(rarity_text(row.mst.rarity));
            cells.push(row.story_art.clone().unwrap_or_else(|| UNDEF.to_string()));
            cells.push(
                row.colosseum_art
                    .clone()
                    .unwrap_or_else(|| UNDEF.to_string()),
            );
            cells
        })
        .collect();

    println!("Nightmares ({locale})");
    print_table(&headers, &table);
    Ok(())
}

// ============================================================================
// Library
// ============================================================================

/// Suffix marking a value that sits at its computed maximum.
fn maxed(value: impl std::fmt::Display, is_max: bool) -> String {
    if is_max {
        format!("{value}*")
    } else {
        value.to_string()
    }
}

pub async fn library<L: SourceLoader>(db: &Database<L>, locale: Locale, text: &str) -> Result<()> {
    let import = db.import_library(locale, text).await;
    let skills = db.skills(locale).await;

    let headers = vec![
        "name",
        "rarity",
        "rarity (max)",
        "evo",
        "LBs",
        "level",
        "skill lvl",
        "support lvl",
        "type",
        "element",
        "skill",
        "skill (max)",
        "support skill",
        "support skill (max)",
    ];

    let rows: Vec<Vec<String>> = import
        .items
        .iter()
        .map(|item| {
            let variant = item.variant();
            let variant_max = item.variant_max();
            vec![
                item.name.clone(),
                item.rarity.map(rarity_text).unwrap_or_else(|| "?".into()),
                variant_max
                    .map(|v| rarity_text(v.rarity))
                    .unwrap_or_else(|| "?".into()),
                item.evolution_level
                    .map(|evo| evo.to_string())
                    .unwrap_or_default(),
                item.limit_breaks.to_string(),
                maxed(item.level, item.is_max_level),
                maxed(item.main_skill_level, item.is_max_main_skill_level),
                maxed(item.aid_skill_level, item.is_max_aid_skill_level),
                variant
                    .and_then(|v| reference::weapon_kind(v.card_detail_type))
                    .unwrap_or("?")
                    .to_string(),
                variant
                    .and_then(|v| reference::attribute_name(v.attribute))
                    .unwrap_or("?")
                    .to_string(),
                variant
                    .map(|v| skill_name(&skills, v.front_skill_mst_id))
                    .unwrap_or_else(|| "?".into()),
                variant_max
                    .map(|v| skill_name(&skills, v.front_skill_mst_id))
                    .unwrap_or_else(|| "?".into()),
                variant
                    .map(|v| skill_name(&skills, v.auto_skill_mst_id))
                    .unwrap_or_else(|| "?".into()),
                variant_max
                    .map(|v| skill_name(&skills, v.auto_skill_mst_id))
                    .unwrap_or_else(|| "?".into()),
            ]
        })
        .collect();

    println!("Library ({} items, * = maxed)", import.len());
    print_table(&headers, &rows);
    Ok(())
}
