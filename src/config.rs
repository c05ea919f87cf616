use crate::error::{EnrichError, Result};
use klauke_enrich_common::{CatalogSchema, ImageUrlRule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 実行設定（~/.config/klauke-enrich/config.json）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 画像URLの導出ルール
    pub image: ImageUrlRule,
    /// カタログのフィールド名・ロケール
    pub catalog: CatalogSchema,
    /// 既定のカタログファイル
    pub default_catalog: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EnrichError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("klauke-enrich").join("config.json"))
    }

    /// CLI引数による一時的な上書き
    pub fn with_overrides(mut self, cdn_base: Option<&str>, locale: Option<&str>) -> Self {
        if let Some(base) = cdn_base {
            self.image.cdn_base_url = base.to_string();
        }
        if let Some(locale) = locale {
            self.catalog.locale = locale.to_string();
        }
        self
    }

    /// カタログファイルの決定（引数 > 設定）
    pub fn resolve_catalog(&self, arg: Option<PathBuf>) -> Result<PathBuf> {
        arg.or_else(|| self.default_catalog.clone()).ok_or_else(|| {
            EnrichError::Config(
                "カタログが指定されていません。`--catalog` または `klauke-enrich config --set-catalog` で指定してください".into(),
            )
        })
    }
}
