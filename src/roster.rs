//! 兵員名簿の読み込み
//!
//! Excel名簿（名前・コードの2列）を読み込む。列はヘッダー行から探す。

use crate::error::{RankingError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 名簿1行
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub code: String,
}

/// 列名の候補（日本語・英語どちらの名簿も受ける）
const NAME_HEADERS: &[&str] = &["名前", "name"];
const CODE_HEADERS: &[&str] = &["コード", "code"];

/// Excel名簿を読み込む
///
/// 先頭シートのヘッダー行から名前・コード列を特定し、両列を文字列として
/// 取り込む。名前が空の行はスキップ。
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    if !path.exists() {
        return Err(RankingError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| RankingError::InvalidRoster(format!("Excel読み込みエラー: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RankingError::InvalidRoster("シートがありません".into()))?
        .map_err(|e| RankingError::InvalidRoster(format!("シート読み込みエラー: {}", e)))?;

    let mut rows = range.rows();

    let header = rows
        .next()
        .ok_or_else(|| RankingError::InvalidRoster("名簿が空です".into()))?;

    let name_col = find_column(header, NAME_HEADERS)
        .ok_or_else(|| RankingError::InvalidRoster("「名前」列が見つかりません".into()))?;
    let code_col = find_column(header, CODE_HEADERS)
        .ok_or_else(|| RankingError::InvalidRoster("「コード」列が見つかりません".into()))?;

    let mut entries = Vec::new();

    for row in rows {
        let name = cell_to_string(row.get(name_col));
        if name.is_empty() {
            continue;
        }
        let code = cell_to_string(row.get(code_col));
        entries.push(RosterEntry { name, code });
    }

    Ok(entries)
}

fn find_column(header: &[Data], candidates: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let text = cell_to_string(Some(cell)).to_lowercase();
        candidates.iter().any(|c| text == *c)
    })
}

/// セル値を文字列へ変換（数値コードは整数表記に揃える）
fn cell_to_string(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
