use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "klauke-enrich")]
#[command(about = "Klauke製品カタログとSKU/品番表の突合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 工具表（SKU列）に製品URL・画像URL・製品名を付与
    Tools(EnrichArgs),

    /// コネクタ表（Part No.列）に画像URLを付与
    Connectors(EnrichArgs),

    /// 設定を表示/編集
    Config {
        /// CDNのベースURLを設定
        #[arg(long)]
        set_cdn_base: Option<String>,

        /// 画像ファイル名から除去する接頭辞を設定
        #[arg(long)]
        set_image_prefix: Option<String>,

        /// カタログのロケールを設定
        #[arg(long)]
        set_locale: Option<String>,

        /// 既定のカタログJSONを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// tools/connectors共通の引数
#[derive(Args, Clone, Debug)]
pub struct EnrichArgs {
    /// 入力表（CSV/Excel）
    #[arg(required = true)]
    pub table: PathBuf,

    /// カタログJSON（Salsifyエクスポート、省略時は設定値）
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// 出力ファイル（省略時は入力表と同じフォルダ）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 出力形式 (csv/excel)
    #[arg(short, long, default_value = "csv")]
    pub format: OutputFormat,

    /// 読み込むシート名（Excel入力のみ、省略時は先頭シート）
    #[arg(long)]
    pub sheet: Option<String>,

    /// CDNのベースURL（設定を一時的に上書き）
    #[arg(long)]
    pub cdn_base: Option<String>,

    /// カタログのロケール（設定を一時的に上書き）
    #[arg(long)]
    pub locale: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Excel,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use csv or excel", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Excel => write!(f, "excel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("XLSX".parse::<OutputFormat>().unwrap(), OutputFormat::Excel);
        assert_eq!("excel".parse::<OutputFormat>().unwrap(), OutputFormat::Excel);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_parse_tools_command() {
        let cli = Cli::try_parse_from([
            "klauke-enrich",
            "tools",
            "documentation/KlaukeConnetorTools.xlsx",
            "--catalog",
            "data/salsify_data_prod.json",
            "-f",
            "excel",
        ])
        .unwrap();

        match cli.command {
            Commands::Tools(args) => {
                assert_eq!(args.table, PathBuf::from("documentation/KlaukeConnetorTools.xlsx"));
                assert_eq!(args.catalog, Some(PathBuf::from("data/salsify_data_prod.json")));
                assert_eq!(args.format, OutputFormat::Excel);
                assert!(args.output.is_none());
            }
            _ => panic!("tools subcommand expected"),
        }
    }

    #[test]
    fn test_parse_global_verbose() {
        let cli = Cli::try_parse_from(["klauke-enrich", "connectors", "parts.csv", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Connectors(_)));
    }
}
