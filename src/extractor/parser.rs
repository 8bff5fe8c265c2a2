//! Geminiレスポンスパーサー
//!
//! 自由形式テキストからJSON配列を抽出し、戦功レコードへ変換する。

use crate::error::{RankingError, Result};
use crate::types::ExtractedRecord;

/// レスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の [...] 配列
/// 3. エラー
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の [...] を探す
    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(RankingError::ApiParse("JSONが見つかりません".into()))
}

/// レスポンスを戦功レコード配列へパース
///
/// 配列以外のJSONはエラー。nameを持たない要素はスキップして件数だけ返す
/// （形を信用せずスキーマで弾く）。
pub fn parse_records(response: &str) -> Result<(Vec<ExtractedRecord>, usize)> {
    let json_str = extract_json(response)?;
    let value: serde_json::Value = serde_json::from_str(json_str.trim())
        .map_err(|e| RankingError::ApiParse(format!("JSONパースエラー: {}", e)))?;

    let Some(items) = value.as_array() else {
        return Err(RankingError::ApiParse("JSON配列ではありません".into()));
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for item in items {
        match serde_json::from_value::<ExtractedRecord>(item.clone()) {
            Ok(record) if !record.name.trim().is_empty() => records.push(record),
            _ => skipped += 1,
        }
    }

    Ok((records, skipped))
}
