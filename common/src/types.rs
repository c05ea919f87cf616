//! 突合処理の型定義
//!
//! - CatalogRecord: カタログ（Salsify JSON）の1製品
//! - EnrichmentEntry: CatalogRecordから導出した付与情報
//! - Table: CSV/Excelから読み込んだ表データ

use serde::{Deserialize, Serialize};

/// カタログの1製品
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub identifier: String,
    pub product_name: String,
    pub product_url: String,
    /// 代表画像のファイル名（例: Klauke_ABC123.jpg）
    pub primary_image: String,
}

/// 識別子1件分の付与情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentEntry {
    pub identifier: String,
    /// CDNの画像URL（画像なしの場合は空文字）
    pub image_url: String,
    pub product_name: String,
    pub product_url: String,
}

impl EnrichmentEntry {
    /// 未一致時に使う空の付与情報
    pub fn empty(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            ..Self::default()
        }
    }

    /// 指定フィールドの値を取得
    pub fn field(&self, field: EnrichmentField) -> &str {
        match field {
            EnrichmentField::ImageUrl => &self.image_url,
            EnrichmentField::ProductName => &self.product_name,
            EnrichmentField::ProductUrl => &self.product_url,
        }
    }
}

/// 出力表に追加できる付与フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentField {
    ImageUrl,
    ProductName,
    ProductUrl,
}

/// 表データ（ヘッダー + 文字列セルの行）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 行を追加（ヘッダー幅に合わせて空セル補完・切り詰め）
    ///
    /// 切り詰めで捨てたセル数を返す。
    pub fn push_row(&mut self, mut row: Vec<String>) -> usize {
        let dropped = row.len().saturating_sub(self.headers.len());
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
        dropped
    }

    /// 列名から列番号を取得
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
