//! Gitリポジトリとの対話を担当するモジュール
//!
//! このモジュールは、libgit2を使用して指定されたブランチのコミット履歴を取得し、
//! 各コミットを`CommitRecord`に正規化するための機能を提供します。

use super::error::AnalyzerError;
use super::record::CommitRecord;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{BranchType, Commit, ErrorCode, Oid, Repository, Time};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// コミットの時刻としてどの署名の時刻を使うか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampSource {
    /// 作成者がコミットを作成した時刻
    #[default]
    Author,
    /// コミッターがコミットを記録した時刻
    Committer,
}

/// 抽出対象を指定する設定値
///
/// # フィールド
///
/// - `repo_path`: Gitリポジトリのパス
/// - `branch`: 履歴をたどるブランチ名
/// - `timestamp_source`: レコードの時刻に使う署名
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub repo_path: PathBuf,
    pub branch: String,
    pub timestamp_source: TimestampSource,
}

impl ExtractorConfig {
    pub fn new(repo_path: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            repo_path: repo_path.into(),
            branch: branch.into(),
            timestamp_source: TimestampSource::default(),
        }
    }

    pub fn with_timestamp_source(mut self, source: TimestampSource) -> Self {
        self.timestamp_source = source;
        self
    }
}

/// ブランチのコミット履歴を`CommitRecord`の列に変換する構造体
pub struct CommitExtractor {
    repo: Repository,
    branch: String,
    timestamp_source: TimestampSource,
}

impl CommitExtractor {
    /// 設定に従ってGitリポジトリをオープンします
    ///
    /// # エラー
    ///
    /// パスが有効なGitリポジトリでない場合は`RepositoryNotFound`を返します。
    pub fn open(config: ExtractorConfig) -> Result<Self, AnalyzerError> {
        let repo = Repository::open(&config.repo_path).map_err(|source| {
            AnalyzerError::RepositoryNotFound {
                path: config.repo_path.clone(),
                source,
            }
        })?;

        info!("Opened Git repository at {}", config.repo_path.display());

        Ok(Self {
            repo,
            branch: config.branch,
            timestamp_source: config.timestamp_source,
        })
    }

    /// ブランチの先端から到達可能なすべてのコミットを新しい順に取得します
    ///
    /// # 戻り値
    ///
    /// コミットごとに1件の`CommitRecord`を持つベクターを返します。
    ///
    /// # エラー
    ///
    /// 以下の場合にエラーを返します：
    /// - ブランチが存在しない（`BranchNotFound`）
    /// - 履歴の走査中にリポジトリの読み取りに失敗（`ExtractionAborted`）
    ///
    /// 途中で失敗した場合、それまでに読み取ったレコードは返しません。
    pub fn extract(&self) -> Result<Vec<CommitRecord>, AnalyzerError> {
        let tip = self.resolve_branch()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(tip)?;
        revwalk.set_sorting(git2::Sort::TIME)?;

        let mut records = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            records.push(self.to_record(&commit)?);
        }

        info!(
            "Extracted {} commits from branch {}",
            records.len(),
            self.branch
        );

        Ok(records)
    }

    /// ブランチ名を先端のコミットIDに解決します
    ///
    /// ローカルブランチを優先し、見つからない場合はリモート追跡ブランチを探します。
    /// 参照名として不正な名前も、存在しないブランチとして扱います。
    fn resolve_branch(&self) -> Result<Oid, AnalyzerError> {
        for kind in [BranchType::Local, BranchType::Remote] {
            match self.repo.find_branch(&self.branch, kind) {
                Ok(branch) => {
                    let commit = branch.get().peel_to_commit()?;
                    debug!("Resolved branch {} to {}", self.branch, commit.id());
                    return Ok(commit.id());
                }
                Err(e) if matches!(e.code(), ErrorCode::NotFound | ErrorCode::InvalidSpec) => {
                    continue
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AnalyzerError::BranchNotFound(self.branch.clone()))
    }

    fn to_record(&self, commit: &Commit) -> Result<CommitRecord, AnalyzerError> {
        let author = commit.author();
        let when = match self.timestamp_source {
            TimestampSource::Author => author.when(),
            TimestampSource::Committer => commit.committer().when(),
        };

        Ok(CommitRecord {
            id: commit.id(),
            author_name: String::from_utf8_lossy(author.name_bytes()).into_owned(),
            author_email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
            timestamp: to_datetime(when)?,
            message: String::from_utf8_lossy(commit.message_bytes())
                .trim()
                .to_string(),
            files_changed: self.count_changed_files(commit)?,
        })
    }

    /// 最初の親（ルートコミットの場合は空のツリー）との差分に現れる
    /// 異なるファイルパスの数を数えます
    fn count_changed_files(&self, commit: &Commit) -> Result<usize, AnalyzerError> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let mut paths: BTreeSet<&Path> = BTreeSet::new();
        for delta in diff.deltas() {
            if let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) {
                paths.insert(path);
            }
        }

        Ok(paths.len())
    }
}

/// 署名の時刻を、記録されたオフセットを保ったまま変換します
///
/// オフセットが±24時間の範囲外の場合はUTCとして扱います。
/// 集計はUTCの時刻のみを使うため、結果は変わりません。
fn to_datetime(time: Time) -> Result<DateTime<FixedOffset>, AnalyzerError> {
    let offset = match FixedOffset::east_opt(time.offset_minutes() * 60) {
        Some(offset) => offset,
        None => {
            warn!(
                "Ignoring invalid timezone offset of {} minutes",
                time.offset_minutes()
            );
            Utc.fix()
        }
    };

    DateTime::from_timestamp(time.seconds(), 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| {
            AnalyzerError::ExtractionAborted(git2::Error::from_str(&format!(
                "invalid commit timestamp: {}",
                time.seconds()
            )))
        })
}
