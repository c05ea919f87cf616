use anyhow::Context;
use clap::Parser;
use klauke_enrich::{cli, config, pipeline, report};
use cli::{Cli, Commands, EnrichArgs};
use config::Config;
use pipeline::{Pipeline, PipelineKind, RunOptions};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Tools(args) => run_enrich(PipelineKind::Tools, args, config, cli.verbose)?,
        Commands::Connectors(args) => run_enrich(PipelineKind::Connectors, args, config, cli.verbose)?,

        Commands::Config { set_cdn_base, set_image_prefix, set_locale, set_catalog, show } => {
            let mut config = config;
            let changed = set_cdn_base.is_some()
                || set_image_prefix.is_some()
                || set_locale.is_some()
                || set_catalog.is_some();

            if let Some(base) = set_cdn_base {
                config.image.cdn_base_url = base;
            }
            if let Some(prefix) = set_image_prefix {
                config.image.strip_prefix = prefix;
            }
            if let Some(locale) = set_locale {
                config.catalog.locale = locale;
            }
            if let Some(catalog) = set_catalog {
                config.default_catalog = Some(catalog);
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  CDNベースURL: {}", config.image.cdn_base_url);
                println!("  画像接頭辞: {}", config.image.strip_prefix);
                println!("  ロケール: {}", config.catalog.locale);
                println!(
                    "  既定カタログ: {}",
                    config
                        .default_catalog
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".to_string())
                );
            }
        }
    }

    Ok(())
}

fn run_enrich(kind: PipelineKind, args: EnrichArgs, config: Config, verbose: bool) -> anyhow::Result<()> {
    let config = config.with_overrides(args.cdn_base.as_deref(), args.locale.as_deref());
    let options = RunOptions {
        catalog: config.resolve_catalog(args.catalog)?,
        table: args.table,
        output: args.output,
        format: args.format,
        sheet: args.sheet,
    };

    println!("🔧 klauke-enrich - {}\n", kind.identifier_label());
    let pipeline = Pipeline::new(kind, &config);

    // 1. 読み込み（失敗時は出力せずに終了）
    println!("[1/3] 入力ファイルを読み込み中...");
    let inputs = pipeline
        .load(&options)
        .context("入力ファイルの読み込みに失敗したため処理を中断しました")?;
    println!("✔ 表データ: {}行 / カタログ: {}件\n", inputs.table.len(), inputs.records.len());
    if verbose {
        println!("  表: {}", options.table.display());
        println!("  カタログ: {}", options.catalog.display());
        println!("  列: {}\n", inputs.table.headers.join(", "));
    }

    // 2. ルックアップ構築と突合
    println!("[2/3] カタログと突合中...");
    let (mapping, join) = pipeline
        .enrich(&inputs)
        .with_context(|| format!("突合に失敗しました: {}", options.table.display()))?;
    println!("✔ 突合完了\n");

    // 3. 出力
    let output_path = options.output_path(kind);
    println!("[3/3] 結果を保存中... (形式: {})", options.format);
    pipeline
        .write(&join, &output_path, options.format)
        .with_context(|| format!("出力に失敗しました: {}", output_path.display()))?;
    println!();

    let result = pipeline::PipelineReport {
        kind: pipeline.kind(),
        mapping,
        join,
        output_path,
    };
    report::print_report(&result, verbose);

    println!("\n✅ 完了");
    Ok(())
}
