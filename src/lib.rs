//! Gitリポジトリのコミット履歴統計ツール
//!
//! このクレートは、Gitリポジトリの指定されたブランチのコミット履歴を読み取り、
//! 作成者やコミット時刻に関する記述統計を算出するための機能を提供します。
//!
//! # 主な機能
//!
//! - コミット履歴の抽出と正規化
//! - 上位作成者の集計
//! - UTC基準の時・曜日ごとのコミット数の集計
//! - CSVとグラフ画像の出力
//!
//! # 使用例
//!
//! ```no_run
//! use commit_stats::{CommitAnalyzer, ExtractorConfig};
//!
//! let analyzer = CommitAnalyzer::new(
//!     ExtractorConfig::new("path/to/repo", "main"),
//!     5,
//! ).unwrap();
//!
//! let analysis = analyzer.analyze().unwrap();
//! println!("{} commits", analysis.view.total_commits);
//! ```

pub mod analyzer;
pub mod chart;
pub mod export;

pub use analyzer::{
    AggregatedView, Analysis, AnalyzerError, CommitAnalyzer, CommitExtractor, CommitRecord,
    ExtractorConfig, StatsAggregator, TimestampSource,
};
