//! レコード正規化
//!
//! AI抽出の生レコードを正規スキーマの戦功表へ変換する。
//!
//! ## 処理フロー
//! 1. rank/scoreの数値変換（失敗はNone、行は捨てない）
//! 2. (rank, name) での重複排除（先勝ち）
//! 3. rank昇順の安定ソート（None行は末尾）

use crate::types::{ExtractedRecord, RankingRow};
use serde_json::Value;
use std::collections::HashSet;

/// 生レコード列を正規化済み戦功表へ変換
///
/// 入力が空なら空の表を返す（エラーにしない）。
pub fn normalize(records: &[ExtractedRecord]) -> Vec<RankingRow> {
    let mut rows = Vec::with_capacity(records.len());
    let mut seen: HashSet<(Option<u32>, String)> = HashSet::new();

    for record in records {
        let row = RankingRow {
            rank: record.rank.as_ref().and_then(coerce_u32),
            name: record.name.trim().to_string(),
            score: record.score.as_ref().and_then(coerce_i64),
        };

        // 重複は先勝ち
        if seen.insert((row.rank, row.name.clone())) {
            rows.push(row);
        }
    }

    // 安定ソート: 数値rank昇順、変換不能(None)は末尾
    rows.sort_by_key(|row| (row.rank.is_none(), row.rank));

    rows
}

/// 緩いJSON値から順位を取り出す
///
/// 数値のほか、カンマ区切り・空白混じりの数字文字列も受ける。
fn coerce_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => clean_numeric(s).parse().ok(),
        _ => None,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => clean_numeric(s).parse().ok(),
        _ => None,
    }
}

/// 桁区切りと空白を除去（"12,345" → "12345"）
fn clean_numeric(s: &str) -> String {
    s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect()
}
