//! ルックアップ構築モジュール
//!
//! カタログレコードから識別子→付与情報のマップを作る。
//! 画像ファイル名は接頭辞（`Klauke_`）を除去してCDNベースURLと連結する。

use crate::types::{CatalogRecord, EnrichmentEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 画像URLの導出ルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageUrlRule {
    /// 除去するファイル名接頭辞
    pub strip_prefix: String,
    /// CDNのベースURL
    pub cdn_base_url: String,
}

impl Default for ImageUrlRule {
    fn default() -> Self {
        Self {
            strip_prefix: "Klauke_".into(),
            cdn_base_url: "https://cdn.klauke.com/resources/images/".into(),
        }
    }
}

impl ImageUrlRule {
    /// ファイル名から画像URLを導出
    ///
    /// 接頭辞除去後に空ならURLも空文字（ベースURLだけにはしない）。
    pub fn resolve(&self, file_name: &str) -> String {
        let key = if self.strip_prefix.is_empty() {
            file_name
        } else {
            file_name.strip_prefix(self.strip_prefix.as_str()).unwrap_or(file_name)
        };

        if key.is_empty() {
            String::new()
        } else {
            format!("{}{}", self.cdn_base_url, key)
        }
    }
}

/// カタログ集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MappingStats {
    /// カタログ内の製品総数（識別子なしを含む）
    pub total_products: usize,
    /// 画像URLありの製品数
    pub with_images: usize,
    /// 画像URLなしの製品数
    pub without_images: usize,
}

/// 識別子→付与情報のルックアップ
#[derive(Debug, Clone, Default)]
pub struct ProductLookup {
    entries: HashMap<String, EnrichmentEntry>,
    stats: MappingStats,
}

impl ProductLookup {
    pub fn get(&self, identifier: &str) -> Option<&EnrichmentEntry> {
        self.entries.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> MappingStats {
        self.stats
    }
}

/// カタログレコードからルックアップを構築
///
/// 識別子が空のレコードはスキップ。重複識別子は後勝ち。
/// 画像ありの件数は後勝ちで消えるレコードも含めて数える。
pub fn build_lookup(records: &[CatalogRecord], rule: &ImageUrlRule) -> ProductLookup {
    let mut entries = HashMap::with_capacity(records.len());
    let mut with_images = 0;

    for record in records {
        if record.identifier.is_empty() {
            continue;
        }

        let image_url = rule.resolve(&record.primary_image);
        if !image_url.is_empty() {
            with_images += 1;
        }

        entries.insert(
            record.identifier.clone(),
            EnrichmentEntry {
                identifier: record.identifier.clone(),
                image_url,
                product_name: record.product_name.clone(),
                product_url: record.product_url.clone(),
            },
        );
    }

    let total_products = records.len();
    ProductLookup {
        entries,
        stats: MappingStats {
            total_products,
            with_images,
            without_images: total_products - with_images,
        },
    }
}
