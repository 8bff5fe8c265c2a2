//! 同盟戦功ランキング画像AI集計ツール
//!
//! ランキングスクショをGeminiで解析し、戦功表（順位・名前・武功）として
//! 統合・名寄せ・Excel出力する。

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod extractor;
pub mod matcher;
pub mod model_select;
pub mod normalizer;
pub mod roster;
pub mod scanner;
pub mod types;

pub use error::{RankingError, Result};
pub use types::{EnrichedRow, ExtractedRecord, RankingRow, TallyTable};
