//! 集計結果の表現を担当するモジュール
//!
//! このモジュールは、コミット履歴の集計結果を表現するためのデータ構造と、
//! グラフ描画用の系列への変換を提供します。

use super::record::WEEKDAY_NAMES;
use serde::{Deserialize, Serialize};

/// 作成者ごとのコミット数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub author: String,
    pub commits: usize,
}

/// UTCの時ごとのコミット数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    pub commits: usize,
}

/// UTCの曜日ごとのコミット数
///
/// 集計キーは`weekday`（0=月曜日）であり、`name`は表示専用です。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub weekday: u32,
    pub name: String,
    pub commits: usize,
}

/// コミット履歴全体から算出した集計結果
///
/// # フィールド
///
/// - `total_commits`: 集計対象のコミット数
/// - `top_authors`: コミット数の多い順に並べた上位の作成者
/// - `hour_histogram`: 観測された時のみを昇順に並べたヒストグラム
/// - `weekday_histogram`: 観測された曜日のみを昇順に並べたヒストグラム
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedView {
    pub total_commits: usize,
    pub top_authors: Vec<AuthorCount>,
    pub hour_histogram: Vec<HourCount>,
    pub weekday_histogram: Vec<WeekdayCount>,
}

impl AggregatedView {
    pub fn is_empty(&self) -> bool {
        self.total_commits == 0
    }

    /// グラフ描画用の作成者系列
    pub fn author_series(&self) -> Vec<(String, usize)> {
        self.top_authors
            .iter()
            .map(|a| (a.author.clone(), a.commits))
            .collect()
    }

    /// 0時から23時まで欠けのない時系列を返します
    ///
    /// ヒストグラムに現れない時は0件として扱います。
    pub fn hour_series(&self) -> Vec<(u32, usize)> {
        let mut series: Vec<(u32, usize)> = (0..24).map(|hour| (hour, 0)).collect();
        for bucket in &self.hour_histogram {
            if let Some(slot) = series.get_mut(bucket.hour as usize) {
                slot.1 = bucket.commits;
            }
        }
        series
    }

    /// 月曜日から日曜日まで欠けのない曜日系列を返します
    pub fn weekday_series(&self) -> Vec<(&'static str, usize)> {
        let mut series: Vec<(&'static str, usize)> =
            WEEKDAY_NAMES.iter().map(|name| (*name, 0)).collect();
        for bucket in &self.weekday_histogram {
            if let Some(slot) = series.get_mut(bucket.weekday as usize) {
                slot.1 = bucket.commits;
            }
        }
        series
    }
}
