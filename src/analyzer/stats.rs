//! コミットレコードの集計を担当するモジュール
//!
//! 時刻に基づく集計はすべてUTCに正規化した後に行います。
//! コミットが記録されたオフセットの違いによって集計先がずれることはありません。

use super::metrics::{AggregatedView, AuthorCount, HourCount, WeekdayCount};
use super::record::{weekday_name, CommitRecord};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// 上位作成者として残す既定の件数
pub const DEFAULT_TOP_AUTHORS: usize = 5;

/// コミットレコードの集合から`AggregatedView`を算出する構造体
///
/// 状態を持たない純粋な変換であり、同じ入力に対して常に同じ結果を返します。
#[derive(Debug, Clone, Copy)]
pub struct StatsAggregator {
    top_n: usize,
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_AUTHORS,
        }
    }
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 上位作成者の件数を変更します
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// レコード全体を集計します
    ///
    /// # 引数
    ///
    /// - `records`: 抽出されたコミットレコード（順序は集計結果に影響しません）
    ///
    /// # 戻り値
    ///
    /// 入力が空の場合は、3つのビューがすべて空の`AggregatedView`を返します。
    pub fn aggregate(&self, records: &[CommitRecord]) -> AggregatedView {
        AggregatedView {
            total_commits: records.len(),
            top_authors: self.top_authors(records),
            hour_histogram: hour_histogram(records),
            weekday_histogram: weekday_histogram(records),
        }
    }

    /// 作成者名ごとのコミット数を数え、上位`top_n`件を返します
    ///
    /// 作成者名は完全一致で比較します（大文字小文字や空白は正規化しません）。
    /// 同数の場合は入力中で最初に現れた順序を保ちます。
    fn top_authors(&self, records: &[CommitRecord]) -> Vec<AuthorCount> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for record in records {
            *counts.entry(record.author_name.as_str()).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        // sort_byは安定ソートなので、同数の作成者は出現順のまま残る
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(self.top_n)
            .map(|(author, commits)| AuthorCount {
                author: author.to_string(),
                commits,
            })
            .collect()
    }
}

fn hour_histogram(records: &[CommitRecord]) -> Vec<HourCount> {
    let mut buckets: BTreeMap<u32, usize> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.utc_hour()).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(hour, commits)| HourCount { hour, commits })
        .collect()
}

fn weekday_histogram(records: &[CommitRecord]) -> Vec<WeekdayCount> {
    let mut buckets: BTreeMap<u32, usize> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.utc_weekday()).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(weekday, commits)| WeekdayCount {
            weekday,
            name: weekday_name(weekday).unwrap_or_default().to_string(),
            commits,
        })
        .collect()
}
