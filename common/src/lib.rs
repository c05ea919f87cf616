//! Klauke Enrich Common Library
//!
//! カタログ突合のコア処理（I/Oを含まない）
//! - catalog: Salsify JSONからのレコード抽出
//! - mapper: 識別子→付与情報のルックアップ構築
//! - joiner: 表データへの付与と未一致の集計
//! - stats: 未一致識別子のシリーズ別集計

pub mod types;
pub mod error;
pub mod catalog;
pub mod mapper;
pub mod joiner;
pub mod stats;

pub use types::{CatalogRecord, EnrichmentEntry, EnrichmentField, Table};
pub use error::{Error, Result};
pub use catalog::{CatalogSchema, extract_records, normalize_identifier};
pub use mapper::{ImageUrlRule, MappingStats, ProductLookup, build_lookup};
pub use joiner::{EnrichmentColumn, JoinResult, Passthrough, PipelineProfile, join};
pub use stats::{SeriesCount, series_breakdown, series_of};
