//! 未一致識別子の集計

use serde::Serialize;
use std::collections::HashMap;

/// シリーズ（識別子の先頭2文字）ごとの件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesCount {
    pub series: String,
    pub count: usize,
}

/// 識別子の先頭2文字（2文字未満ならそのまま）
pub fn series_of(identifier: &str) -> &str {
    match identifier.char_indices().nth(2) {
        Some((end, _)) => &identifier[..end],
        None => identifier,
    }
}

/// シリーズ別に集計して件数の降順で返す
///
/// 同数のシリーズは初出順。
pub fn series_breakdown(identifiers: &[String]) -> Vec<SeriesCount> {
    let mut counts: Vec<SeriesCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for identifier in identifiers {
        let series = series_of(identifier);
        match index.get(series) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(series, counts.len());
                counts.push(SeriesCount {
                    series: series.to_string(),
                    count: 1,
                });
            }
        }
    }

    // 安定ソートなので同数は初出順を維持
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_series_of() {
        assert_eq!(series_of("Z9"), "Z9");
        assert_eq!(series_of("EK354"), "EK");
        assert_eq!(series_of("K"), "K");
        assert_eq!(series_of(""), "");
        assert_eq!(series_of("ÄÖ12"), "ÄÖ");
    }

    #[test]
    fn test_breakdown_descending() {
        let result = series_breakdown(&ids(&["EK1", "HK1", "HK2", "EK2", "HK3", "Z9"]));
        assert_eq!(
            result,
            vec![
                SeriesCount { series: "HK".into(), count: 3 },
                SeriesCount { series: "EK".into(), count: 2 },
                SeriesCount { series: "Z9".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_breakdown_ties_keep_first_seen_order() {
        let result = series_breakdown(&ids(&["QA1", "PB1", "QA2", "PB2", "MC1"]));
        let order: Vec<_> = result.iter().map(|s| s.series.as_str()).collect();
        assert_eq!(order, vec!["QA", "PB", "MC"]);
    }

    #[test]
    fn test_breakdown_empty() {
        assert!(series_breakdown(&[]).is_empty());
    }
}
