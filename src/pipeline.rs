//! 突合パイプライン
//!
//! 読み込み → ルックアップ構築 → 突合 → 出力 の順に実行する。
//! 各ステップは個別にも呼べる（main.rsで進捗表示を挟むため）。
//! 読み込みで失敗した場合は出力ファイルを作らずにエラーを返す。

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{EnrichError, Result};
use crate::{export, loader};
use klauke_enrich_common::{
    build_lookup, join, CatalogRecord, JoinResult, MappingStats, PipelineProfile, Table,
};
use std::path::{Path, PathBuf};

/// パイプラインの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    /// 工具表（SKU）→ 製品URL・画像・製品名
    Tools,
    /// コネクタ表（Part No.）→ 画像URL
    Connectors,
}

impl PipelineKind {
    pub fn profile(&self) -> PipelineProfile {
        match self {
            PipelineKind::Tools => PipelineProfile::tools(),
            PipelineKind::Connectors => PipelineProfile::connectors(),
        }
    }

    /// 識別子の呼び方（表示用）
    pub fn identifier_label(&self) -> &'static str {
        match self {
            PipelineKind::Tools => "SKU",
            PipelineKind::Connectors => "品番",
        }
    }

    /// 既定の出力ファイル名（拡張子なし）
    fn default_output_stem(&self, table_path: &Path) -> String {
        match self {
            PipelineKind::Tools => "klauke_products_with_details".to_string(),
            PipelineKind::Connectors => {
                let stem = table_path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "output".to_string());
                format!("{}_with_images", stem)
            }
        }
    }
}

/// 1回の実行の入出力指定
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub table: PathBuf,
    pub catalog: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub sheet: Option<String>,
}

impl RunOptions {
    pub fn output_path(&self, kind: PipelineKind) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            export::default_output_path(&self.table, &kind.default_output_stem(&self.table), self.format)
        })
    }
}

/// 読み込み済みの入力
#[derive(Debug, Clone)]
pub struct Inputs {
    pub records: Vec<CatalogRecord>,
    pub table: Table,
}

/// 実行結果
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub kind: PipelineKind,
    pub mapping: MappingStats,
    pub join: JoinResult,
    pub output_path: PathBuf,
}

pub struct Pipeline<'a> {
    kind: PipelineKind,
    config: &'a Config,
}

impl<'a> Pipeline<'a> {
    pub fn new(kind: PipelineKind, config: &'a Config) -> Self {
        Self { kind, config }
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    /// 入力表とカタログを読み込み
    ///
    /// 識別子列のない表はここでエラーにする。
    pub fn load(&self, options: &RunOptions) -> Result<Inputs> {
        let table = loader::load_table(&options.table, options.sheet.as_deref())?;
        let id_column = self.kind.profile().id_column;
        if table.column_index(&id_column).is_none() {
            return Err(EnrichError::MissingColumn(id_column));
        }

        let records = loader::load_catalog(&options.catalog, &self.config.catalog)?;
        Ok(Inputs { records, table })
    }

    /// ルックアップ構築と突合
    pub fn enrich(&self, inputs: &Inputs) -> Result<(MappingStats, JoinResult)> {
        let lookup = build_lookup(&inputs.records, &self.config.image);
        let result = join(&inputs.table, &lookup, &self.kind.profile())?;
        Ok((lookup.stats(), result))
    }

    /// 付与済みの表を出力
    pub fn write(&self, result: &JoinResult, output_path: &Path, format: OutputFormat) -> Result<()> {
        export::write_table(&result.table, output_path, format)
    }

    /// 全ステップを実行
    pub fn run(&self, options: &RunOptions) -> Result<PipelineReport> {
        let inputs = self.load(options)?;
        let (mapping, join) = self.enrich(&inputs)?;

        let output_path = options.output_path(self.kind);
        self.write(&join, &output_path, options.format)?;

        Ok(PipelineReport {
            kind: self.kind,
            mapping,
            join,
            output_path,
        })
    }
}
