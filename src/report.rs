//! コンソール向けの集計レポート

use crate::pipeline::PipelineReport;
use klauke_enrich_common::{JoinResult, MappingStats};
use std::fmt::Write;

/// 未一致の表示件数（verbose時は全件）
pub const UNMATCHED_PREVIEW: usize = 10;

/// カタログ集計の表示文字列
pub fn render_mapping_stats(stats: &MappingStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "カタログ集計:");
    let _ = writeln!(out, "  製品総数: {}", stats.total_products);
    let _ = writeln!(out, "  画像あり: {}", stats.with_images);
    let _ = writeln!(out, "  画像なし: {}", stats.without_images);
    out
}

/// 突合結果の表示文字列
pub fn render_join_summary(result: &JoinResult, label: &str, preview_limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "突合結果:");
    let _ = writeln!(out, "  行数: {}", result.total_rows);
    let _ = writeln!(out, "  付与あり: {}", result.with_enrichment);
    let _ = writeln!(out, "  付与なし: {}", result.without_enrichment);

    if result.all_matched() {
        let _ = writeln!(out, "\n✔ すべての{}がカタログと一致しました", label);
        return out;
    }

    let (shown, remaining) = result.unmatched_preview(preview_limit);
    let _ = writeln!(out, "\n未一致の{} (先頭{}件):", label, shown.len());
    for identifier in shown {
        let _ = writeln!(out, "  - {}", identifier);
    }
    if remaining > 0 {
        let _ = writeln!(out, "  ... 他 {}件", remaining);
    }

    let _ = writeln!(out, "\nシリーズ別の未一致:");
    for group in result.unmatched_by_series() {
        let _ = writeln!(out, "  シリーズ {}: {}件", group.series, group.count);
    }

    out
}

/// 実行結果をまとめて表示
pub fn print_report(report: &PipelineReport, verbose: bool) {
    let limit = if verbose { usize::MAX } else { UNMATCHED_PREVIEW };

    println!("{}", render_mapping_stats(&report.mapping));
    print!("{}", render_join_summary(&report.join, report.kind.identifier_label(), limit));
    println!("\n✔ 出力: {}", report.output_path.display());
}
