//! 名寄せ（名簿照合）
//!
//! 画像から読み取った名前を名簿の正式名と突き合わせる。
//! 完全一致を優先し、それ以外は正規化レーベンシュタイン類似度で判定する。

use crate::roster::RosterEntry;
use crate::types::{EnrichedRow, RankingRow};

/// 採用する最低類似度
pub const SIMILARITY_THRESHOLD: f64 = 0.6;

/// 照合失敗時の登録名
pub const UNMATCHED_NAME: &str = "不明";

/// 照合失敗時の盟員コード
pub const UNMATCHED_CODE: &str = "-";

/// 照合結果
#[derive(Debug, Clone, PartialEq)]
pub struct NameMatch {
    pub name: String,
    pub similarity: f64,
}

/// 候補名に最も近い名簿名を返す
///
/// 完全一致は即座に類似度1.0で返す。それ以外は全名簿名との類似度を取り、
/// 最高スコアが閾値以上なら採用。同率は名簿順で先の名を採る。
/// 空白のみの候補はNone。
pub fn find_closest_name(candidate: &str, roster_names: &[String]) -> Option<NameMatch> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }

    // 完全一致
    if roster_names.iter().any(|n| n == candidate) {
        return Some(NameMatch {
            name: candidate.to_string(),
            similarity: 1.0,
        });
    }

    let mut best: Option<NameMatch> = None;

    for name in roster_names {
        let similarity = strsim::normalized_levenshtein(candidate, name);
        let is_better = best.as_ref().map(|b| similarity > b.similarity).unwrap_or(true);
        if is_better {
            best = Some(NameMatch {
                name: name.clone(),
                similarity,
            });
        }
    }

    best.filter(|m| m.similarity >= SIMILARITY_THRESHOLD)
}

/// 戦功表を名簿と照合して登録名・盟員コードを付与する
///
/// 行単位の写像であり、行の追加・削除・並べ替えは行わない。
/// コードは一致した登録名を持つ最初の名簿行から取る。
pub fn reconcile(rows: &[RankingRow], roster: &[RosterEntry]) -> Vec<EnrichedRow> {
    let roster_names: Vec<String> = roster.iter().map(|e| e.name.clone()).collect();

    rows.iter()
        .map(|row| {
            let (matched_name, code) = match find_closest_name(&row.name, &roster_names) {
                Some(m) => {
                    let code = roster
                        .iter()
                        .find(|e| e.name == m.name)
                        .map(|e| e.code.clone())
                        .unwrap_or_else(|| UNMATCHED_CODE.to_string());
                    (m.name, code)
                }
                None => (UNMATCHED_NAME.to_string(), UNMATCHED_CODE.to_string()),
            };

            EnrichedRow {
                rank: row.rank,
                matched_name,
                code,
                name: row.name.clone(),
                score: row.score,
            }
        })
        .collect()
}
