//! File-backed source loader.
//!
//! Maps each logical dataset to a JSON file under the data directory,
//! mirroring the upstream repository layout (including its quirk: the EN
//! card list lives in `card_mst_list_en.json`, the JP one in
//! `card_mst_list.json`).

use std::future::Future;
use std::path::PathBuf;

use sinodex::{Dataset, Locale, SourceError, SourceLoader};

pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, dataset: Dataset) -> PathBuf {
        let relative = match dataset {
            Dataset::CardMst(Locale::En) => "EN/card_mst_list_en.json".to_string(),
            Dataset::CardMst(Locale::Jp) => "JP/card_mst_list.json".to_string(),
            Dataset::SkillMst(locale) => format!("{locale}/skill_mst_list.json"),
            Dataset::CharacterMst(locale) => format!("{locale}/character_mst_list.json"),
            Dataset::CharacterAbilityMst(locale) => {
                format!("{locale}/character_ability_mst_list.json")
            }
            Dataset::ArtMst(locale) => format!("{locale}/art_mst_list.json"),
            Dataset::SkillMultipliers => "sheets/skill_multipliers.json".to_string(),
            Dataset::RateSheet => "sheets/weapon_rates.json".to_string(),
        };
        self.root.join(relative)
    }
}

impl SourceLoader for FileLoader {
    fn fetch(
        &self,
        dataset: Dataset,
    ) -> impl Future<Output = Result<serde_json::Value, SourceError>> + Send {
        let path = self.path_for(dataset);
        async move {
            let bytes = tokio::fs::read(&path).await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinodex::SourceCache;

    #[tokio::test]
    async fn test_fetch_reads_locale_layout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("EN")).unwrap();
        std::fs::write(
            dir.path().join("EN/skill_mst_list.json"),
            r#"[{"skillMstId": 1, "name": "Flame Strike"}]"#,
        )
        .unwrap();

        let cache = SourceCache::new(FileLoader::new(dir.path()));
        let skills: Vec<sinodex::SkillMst> = cache.records(Dataset::SkillMst(Locale::En)).await;
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].name, "Flame Strike");
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SourceCache::new(FileLoader::new(dir.path()));
        assert!(cache.fetch(Dataset::RateSheet).await.is_none());
    }

    #[test]
    fn test_card_list_naming_quirk() {
        let loader = FileLoader::new("/data");
        assert!(loader
            .path_for(Dataset::CardMst(Locale::En))
            .ends_with("EN/card_mst_list_en.json"));
        assert!(loader
            .path_for(Dataset::CardMst(Locale::Jp))
            .ends_with("JP/card_mst_list.json"));
    }
}
