//! 分析結果を表形式で出力するモジュール
//!
//! コミット単位の表と上位作成者の表をCSVとして書き出します。
//! 作成者名やメッセージに含まれる非ASCII文字はUTF-8のまま保持されます。

use crate::analyzer::{weekday_name, AggregatedView, AnalyzerError, CommitRecord};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV出力の設定
///
/// `bom`が有効な場合、表計算ソフトがUTF-8として認識できるよう先頭にBOMを書き込みます。
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub bom: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { bom: true }
    }
}

/// コミット単位の表の1行
///
/// 時・曜日・月はUTCに正規化した時刻から求めます。
#[derive(Debug, Serialize)]
struct CommitRow<'a> {
    commit_id: String,
    full_id: String,
    author: &'a str,
    author_email: &'a str,
    timestamp: String,
    timestamp_utc: String,
    hour: u32,
    weekday: u32,
    weekday_name: &'static str,
    month: u32,
    message: &'a str,
    files_changed: usize,
}

impl<'a> From<&'a CommitRecord> for CommitRow<'a> {
    fn from(record: &'a CommitRecord) -> Self {
        let weekday = record.utc_weekday();
        Self {
            commit_id: record.short_id(),
            full_id: record.id.to_string(),
            author: &record.author_name,
            author_email: &record.author_email,
            timestamp: record.timestamp.to_rfc3339(),
            timestamp_utc: record.utc_timestamp().to_rfc3339(),
            hour: record.utc_hour(),
            weekday,
            weekday_name: weekday_name(weekday).unwrap_or_default(),
            month: record.utc_month(),
            message: &record.message,
            files_changed: record.files_changed,
        }
    }
}

#[derive(Debug, Serialize)]
struct AuthorRow<'a> {
    author: &'a str,
    commits: usize,
}

/// コミット単位の表を書き出します
///
/// # 引数
///
/// - `writer`: 出力先
/// - `records`: 抽出されたコミットレコード（入力の順序のまま出力）
/// - `options`: 出力設定
pub fn write_commits<W: Write>(
    mut writer: W,
    records: &[CommitRecord],
    options: ExportOptions,
) -> Result<(), AnalyzerError> {
    if options.bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut wtr = csv::Writer::from_writer(writer);
    if records.is_empty() {
        wtr.write_record(COMMIT_HEADERS)?;
    }
    for record in records {
        wtr.serialize(CommitRow::from(record))?;
    }
    wtr.flush()?;

    Ok(())
}

/// 上位作成者の表を書き出します
pub fn write_top_authors<W: Write>(
    mut writer: W,
    view: &AggregatedView,
    options: ExportOptions,
) -> Result<(), AnalyzerError> {
    if options.bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut wtr = csv::Writer::from_writer(writer);
    if view.top_authors.is_empty() {
        wtr.write_record(["author", "commits"])?;
    }
    for author in &view.top_authors {
        wtr.serialize(AuthorRow {
            author: &author.author,
            commits: author.commits,
        })?;
    }
    wtr.flush()?;

    Ok(())
}

pub fn write_commits_csv(
    path: impl AsRef<Path>,
    records: &[CommitRecord],
    options: ExportOptions,
) -> Result<(), AnalyzerError> {
    let path = path.as_ref();
    write_commits(BufWriter::new(File::create(path)?), records, options)?;
    debug!("Wrote {} commit rows to {}", records.len(), path.display());
    Ok(())
}

pub fn write_top_authors_csv(
    path: impl AsRef<Path>,
    view: &AggregatedView,
    options: ExportOptions,
) -> Result<(), AnalyzerError> {
    let path = path.as_ref();
    write_top_authors(BufWriter::new(File::create(path)?), view, options)?;
    debug!(
        "Wrote {} author rows to {}",
        view.top_authors.len(),
        path.display()
    );
    Ok(())
}

/// 集計結果を整形済みのJSONに変換します
pub fn summary_json(view: &AggregatedView) -> Result<String, AnalyzerError> {
    Ok(serde_json::to_string_pretty(view)?)
}

// レコードが1件もない場合はserializeからヘッダーが生成されないため明示的に書く
const COMMIT_HEADERS: [&str; 12] = [
    "commit_id",
    "full_id",
    "author",
    "author_email",
    "timestamp",
    "timestamp_utc",
    "hour",
    "weekday",
    "weekday_name",
    "month",
    "message",
    "files_changed",
];
