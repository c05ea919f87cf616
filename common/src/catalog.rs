//! カタログ読み取りモジュール
//!
//! Salsifyエクスポート（`{"products": [...]}`）から製品レコードを抽出する。
//! ローカライズ項目は `{"en-GB": "..."}` 形式で、欠損時は空文字を返す。

use crate::error::{Error, Result};
use crate::types::CatalogRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// カタログのフィールド名とロケール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSchema {
    pub products_key: String,
    pub id_field: String,
    pub name_field: String,
    pub url_field: String,
    pub image_field: String,
    pub locale: String,
}

impl Default for CatalogSchema {
    fn default() -> Self {
        Self {
            products_key: "products".into(),
            id_field: "salsify:id".into(),
            name_field: "Product Name".into(),
            url_field: "URL Product".into(),
            image_field: "Image Primary".into(),
            locale: "en-GB".into(),
        }
    }
}

impl CatalogSchema {
    /// ロケールだけ差し替えたスキーマを返す
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// 識別子の正規化（前後の空白を除去）
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_string()
}

/// JSON値を識別子文字列に変換
///
/// 文字列と数値のみ識別子として扱う。それ以外は空文字。
fn identifier_from_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => normalize_identifier(s),
        Some(Value::Number(n)) => number_identifier(n),
        _ => String::new(),
    }
}

/// 数値識別子の文字列化
///
/// 整数値の浮動小数点（12345.0）はExcelセルと同じく小数部なしで表記する。
fn number_identifier(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// ローカライズ項目を取得（欠損・型違いは空文字）
pub fn localized_field(product: &Value, field: &str, locale: &str) -> String {
    product
        .get(field)
        .and_then(|v| v.get(locale))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// カタログJSONから全製品レコードを抽出
///
/// 識別子のない製品も空識別子のレコードとして残す（総数の集計に使う）。
/// `products` キーがない場合は空のリストを返す。
pub fn extract_records(catalog: &Value, schema: &CatalogSchema) -> Result<Vec<CatalogRecord>> {
    let root = catalog
        .as_object()
        .ok_or_else(|| Error::Catalog("トップレベルがオブジェクトではありません".into()))?;

    let products = match root.get(&schema.products_key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(Error::Catalog(format!(
                "`{}` が配列ではありません",
                schema.products_key
            )))
        }
    };

    let records = products
        .iter()
        .map(|product| CatalogRecord {
            identifier: identifier_from_value(product.get(&schema.id_field)),
            product_name: localized_field(product, &schema.name_field, &schema.locale),
            product_url: localized_field(product, &schema.url_field, &schema.locale),
            primary_image: localized_field(product, &schema.image_field, &schema.locale),
        })
        .collect();

    Ok(records)
}
