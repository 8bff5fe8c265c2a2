//! 集計結果の型定義
//!
//! - ExtractedRecord: 画像1枚のAI抽出直後の生レコード
//! - RankingRow: 正規化後の戦功表1行
//! - EnrichedRow: 名簿照合後の1行
//! - TallyTable: 表示・出力に渡す最終テーブル

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// AI抽出直後の生レコード（型は未保証）
///
/// rank/scoreはモデルが数値・文字列どちらでも返すためValueのまま保持し、
/// 正規化時に数値へ変換する。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRecord {
    pub rank: Option<Value>,
    pub name: String,
    pub score: Option<Value>,
}

/// 正規化後の戦功表1行
///
/// (rank, name) の組で一意。変換できなかったrank/scoreはNone。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: Option<u32>,
    pub name: String,
    pub score: Option<i64>,
}

/// 名簿照合後の1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub rank: Option<u32>,
    /// 名簿上の登録名（照合失敗時は「不明」）
    pub matched_name: String,
    /// 盟員コード（照合失敗時は「-」）
    pub code: String,
    /// 画像から読み取った名前
    pub name: String,
    pub score: Option<i64>,
}

/// 最終テーブル
///
/// 名簿なしの場合はPlain、名簿照合済みの場合はEnriched。
#[derive(Debug, Clone)]
pub enum TallyTable {
    Plain(Vec<RankingRow>),
    Enriched(Vec<EnrichedRow>),
}

impl TallyTable {
    pub fn len(&self) -> usize {
        match self {
            TallyTable::Plain(rows) => rows.len(),
            TallyTable::Enriched(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracted_record_deserialize() {
        let json = r#"{"rank": 1, "name": "王騎", "score": 12345}"#;
        let record: ExtractedRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(record.rank, Some(json!(1)));
        assert_eq!(record.name, "王騎");
        assert_eq!(record.score, Some(json!(12345)));
    }

    #[test]
    fn test_extracted_record_deserialize_string_numbers() {
        // モデルが数値を文字列で返すケース
        let json = r#"{"rank": "3", "name": "騰", "score": "9,876"}"#;
        let record: ExtractedRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(record.rank, Some(json!("3")));
        assert_eq!(record.score, Some(json!("9,876")));
    }

    #[test]
    fn test_extracted_record_deserialize_missing_fields() {
        let json = r#"{"name": "不明"}"#;
        let record: ExtractedRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(record.name, "不明");
        assert!(record.rank.is_none());
        assert!(record.score.is_none());
    }

    #[test]
    fn test_tally_table_len() {
        let plain = TallyTable::Plain(vec![RankingRow {
            rank: Some(1),
            name: "蒙恬".to_string(),
            score: Some(100),
        }]);
        assert_eq!(plain.len(), 1);
        assert!(!plain.is_empty());

        let empty = TallyTable::Enriched(vec![]);
        assert!(empty.is_empty());
    }
}
