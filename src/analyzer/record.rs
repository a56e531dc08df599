//! 正規化されたコミット情報を表現するモジュール

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use git2::Oid;

/// 表示用に切り詰めるコミットIDの長さ
pub const SHORT_ID_LEN: usize = 8;

/// 曜日インデックス（0=月曜日）に対応する表示名
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// ブランチ上の1コミットに対応するレコード
///
/// # フィールド
///
/// - `id`: コミットの完全なID（同一性の比較には必ずこちらを使う）
/// - `author_name`: 作成者の表示名（一意ではない）
/// - `author_email`: 作成者のメールアドレス（表示専用）
/// - `timestamp`: コミット時に記録されたオフセット付きの時刻
/// - `message`: 前後の空白を取り除いたコミットメッセージ
/// - `files_changed`: 変更された異なるファイルパスの数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: Oid,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
    pub files_changed: usize,
}

impl CommitRecord {
    /// 表示用の8文字のコミットIDを返します
    ///
    /// 短縮IDは衝突し得るため、同一性の判定には`id`を使用してください。
    pub fn short_id(&self) -> String {
        let mut id = self.id.to_string();
        id.truncate(SHORT_ID_LEN);
        id
    }

    /// UTCに変換したタイムスタンプ
    pub fn utc_timestamp(&self) -> DateTime<Utc> {
        self.timestamp.with_timezone(&Utc)
    }

    /// UTCでの時（0-23）
    pub fn utc_hour(&self) -> u32 {
        self.utc_timestamp().hour()
    }

    /// UTCでの曜日インデックス（0=月曜日 … 6=日曜日）
    pub fn utc_weekday(&self) -> u32 {
        self.utc_timestamp().weekday().num_days_from_monday()
    }

    /// UTCでの月（1-12）
    pub fn utc_month(&self) -> u32 {
        self.utc_timestamp().month()
    }
}

/// 曜日インデックスを表示名に変換します
///
/// 範囲外のインデックスには`None`を返します。
pub fn weekday_name(index: u32) -> Option<&'static str> {
    WEEKDAY_NAMES.get(index as usize).copied()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// テスト用のレコードを作成する補助関数
    pub(crate) fn record(seed: u8, author: &str, timestamp: &str) -> CommitRecord {
        CommitRecord {
            id: Oid::from_bytes(&[seed; 20]).unwrap(),
            author_name: author.to_string(),
            author_email: format!("{}@example.com", author.to_lowercase()),
            timestamp: DateTime::parse_from_rfc3339(timestamp).unwrap(),
            message: format!("commit {}", seed),
            files_changed: 1,
        }
    }

    #[test]
    fn test_utc_buckets_ignore_recorded_offset() {
        let r = record(1, "Alice", "2024-03-15T02:30:00+05:00");

        // 2024-03-14T21:30:00Z（木曜日）
        assert_eq!(r.utc_hour(), 21);
        assert_eq!(r.utc_weekday(), 3);
        assert_eq!(r.utc_month(), 3);

        // 元のオフセットは保持されている
        assert_eq!(r.timestamp.offset().local_minus_utc(), 5 * 3600);
        assert_eq!(r.timestamp.hour(), 2);
    }

    #[test]
    fn test_month_rolls_back_with_utc_conversion() {
        let r = record(2, "Bob", "2024-04-01T01:00:00+09:00");
        assert_eq!(r.utc_month(), 3);
        assert_eq!(r.utc_weekday(), 6);
    }

    #[test]
    fn test_short_id() {
        let r = record(0xab, "Alice", "2024-01-01T00:00:00Z");
        assert_eq!(r.short_id(), "abababab");
        assert_eq!(r.id.to_string().len(), 40);
    }

    #[test]
    fn test_weekday_name() {
        assert_eq!(weekday_name(0), Some("Monday"));
        assert_eq!(weekday_name(6), Some("Sunday"));
        assert_eq!(weekday_name(7), None);
    }
}
