//! コミット履歴分析の中核となるモジュール
//!
//! このモジュールは、Gitリポジトリの分析に必要な主要なコンポーネントを提供します。
//! 分析プロセスは以下の流れで行われます：
//!
//! 1. 指定されたブランチのコミット履歴の取得と正規化
//! 2. タイムスタンプのUTCへの正規化
//! 3. 作成者ごとのコミット数の集計
//! 4. 時・曜日ごとのヒストグラムの作成
//!
//! # 主要なコンポーネント
//!
//! - `CommitAnalyzer`: 分析プロセス全体を制御する主要な構造体
//! - `CommitExtractor`: ブランチの履歴を`CommitRecord`に変換する構造体
//! - `StatsAggregator`: レコードから`AggregatedView`を算出する構造体

mod error;
mod git;
mod metrics;
mod record;
mod stats;

pub use error::AnalyzerError;
pub use git::{CommitExtractor, ExtractorConfig, TimestampSource};
pub use metrics::{AggregatedView, AuthorCount, HourCount, WeekdayCount};
pub use record::{weekday_name, CommitRecord, SHORT_ID_LEN, WEEKDAY_NAMES};
pub use stats::{StatsAggregator, DEFAULT_TOP_AUTHORS};

/// 1回の分析で得られる結果
///
/// 抽出と集計の両方が成功した場合にのみ作成されます。
#[derive(Debug, Clone)]
pub struct Analysis {
    pub records: Vec<CommitRecord>,
    pub view: AggregatedView,
}

/// コミット履歴の分析を実行するメインの構造体
///
/// この構造体は、抽出と集計を順番に実行します。
///
/// # フィールド
///
/// - `extractor`: ブランチの履歴を読み取るインスタンス
/// - `aggregator`: 集計方法を保持するインスタンス
pub struct CommitAnalyzer {
    extractor: CommitExtractor,
    aggregator: StatsAggregator,
}

impl CommitAnalyzer {
    /// 新しいCommitAnalyzerインスタンスを作成します
    ///
    /// # 引数
    ///
    /// - `config`: 分析対象のリポジトリとブランチ
    /// - `top_n`: 上位作成者として残す件数
    ///
    /// # エラー
    ///
    /// 指定されたパスが有効なGitリポジトリでない場合にエラーを返します。
    pub fn new(config: ExtractorConfig, top_n: usize) -> Result<Self, AnalyzerError> {
        Ok(Self {
            extractor: CommitExtractor::open(config)?,
            aggregator: StatsAggregator::new().with_top_n(top_n),
        })
    }

    /// ブランチの履歴を抽出し、集計結果とともに返します
    ///
    /// # エラー
    ///
    /// 以下の場合にエラーを返します：
    /// - ブランチが存在しない
    /// - コミット履歴の取得に失敗
    pub fn analyze(&self) -> Result<Analysis, AnalyzerError> {
        let records = self.extractor.extract()?;
        let view = self.aggregator.aggregate(&records);

        Ok(Analysis { records, view })
    }
}

#[cfg(test)]
mod tests {
    use super::git::tests::Fixture;
    use super::*;

    #[test]
    fn test_analyze_repository() {
        let fixture = Fixture::new();
        // 月曜日 2024-03-11T10:00:00Z
        fixture.commit("main", "Alice", 1_710_151_200, 0, &[("a.txt", "1")], "one");
        // 記録されたオフセットは集計に影響しない
        fixture.commit("main", "Bob", 1_710_154_800, 9 * 60, &[("a.txt", "2")], "two");
        fixture.commit("main", "Alice", 1_710_158_400, -5 * 60, &[("b.txt", "3")], "three");

        let analyzer = CommitAnalyzer::new(fixture.config("main"), DEFAULT_TOP_AUTHORS).unwrap();
        let analysis = analyzer.analyze().unwrap();

        assert_eq!(analysis.records.len(), 3);
        assert_eq!(analysis.view.total_commits, 3);
        assert_eq!(
            analysis.view.top_authors,
            vec![
                AuthorCount {
                    author: "Alice".to_string(),
                    commits: 2
                },
                AuthorCount {
                    author: "Bob".to_string(),
                    commits: 1
                },
            ]
        );
        assert_eq!(
            analysis.view.hour_histogram,
            vec![
                HourCount {
                    hour: 10,
                    commits: 1
                },
                HourCount {
                    hour: 11,
                    commits: 1
                },
                HourCount {
                    hour: 12,
                    commits: 1
                },
            ]
        );
        assert_eq!(analysis.view.weekday_histogram.len(), 1);
        assert_eq!(analysis.view.weekday_histogram[0].name, "Monday");
    }

    #[test]
    fn test_analyze_missing_branch_produces_nothing() {
        let fixture = Fixture::new();
        fixture.commit("main", "Alice", 1_710_151_200, 0, &[("a.txt", "1")], "one");

        let analyzer = CommitAnalyzer::new(fixture.config("master"), DEFAULT_TOP_AUTHORS).unwrap();
        assert!(matches!(
            analyzer.analyze(),
            Err(AnalyzerError::BranchNotFound(_))
        ));
    }
}
