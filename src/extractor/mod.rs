//! 戦功スクショ一括抽出
//!
//! 画像を1枚ずつGeminiへ送り、戦功レコードを積み上げる。
//! 1枚の失敗でバッチ全体を止めない（スキップして続行）。

pub mod gemini;
pub mod parser;

pub use gemini::GeminiClient;

use crate::scanner::ImageInfo;
use crate::types::ExtractedRecord;

/// 抽出プロンプト
///
/// JSON配列以外を出力させない。数値のカンマ除去、読み取れない名前は「不明」。
const EXTRACTION_PROMPT: &str = "\
ランキング画像を解析し、JSON配列のみ出力せよ:
[{\"rank\": 数値, \"name\": \"名前\", \"score\": 数値}]
※数値のカンマ（桁区切り）は削除すること
※名前が読み取れない場合は \"不明\" とすること
※JSON配列以外のテキストは一切出力しないこと";

pub fn extraction_prompt() -> &'static str {
    EXTRACTION_PROMPT
}

/// 画像1枚分の失敗記録
#[derive(Debug, Clone)]
pub struct ImageFailure {
    pub file_name: String,
    pub reason: String,
}

/// バッチ抽出の結果
///
/// recordsは画像到着順。failuresは観測用で、件数0でもバッチは成功扱い。
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub records: Vec<ExtractedRecord>,
    pub failures: Vec<ImageFailure>,
    /// スキーマ不一致で捨てた要素数（配列自体はパースできたが不正な行）
    pub skipped_records: usize,
}

impl ExtractionReport {
    /// 画像1枚分のレスポンス（またはAPIエラー）を取り込む
    ///
    /// パース失敗・非配列・API失敗はすべて同じ扱い: その画像は0件、続行。
    pub fn absorb(&mut self, file_name: &str, response: crate::error::Result<String>) {
        match response.and_then(|text| parser::parse_records(&text)) {
            Ok((records, skipped)) => {
                self.records.extend(records);
                self.skipped_records += skipped;
            }
            Err(e) => {
                self.failures.push(ImageFailure {
                    file_name: file_name.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// 画像バッチを順次抽出
///
/// 1枚ずつ同期的に（前の画像の応答を待ってから）処理する。
/// on_progressは成否に関わらず各画像の処理後に (処理済, 総数) で呼ばれる。
pub async fn extract_batch(
    client: &GeminiClient,
    model: &str,
    images: &[ImageInfo],
    mut on_progress: impl FnMut(usize, usize),
) -> ExtractionReport {
    let total = images.len();
    let mut report = ExtractionReport::default();

    for (i, image) in images.iter().enumerate() {
        let response = match std::fs::read(&image.path) {
            Ok(bytes) => {
                client
                    .generate_content(model, EXTRACTION_PROMPT, &bytes, image.mime_type)
                    .await
            }
            Err(e) => Err(e.into()),
        };

        report.absorb(&image.file_name, response);
        on_progress(i + 1, total);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankingError;

    #[test]
    fn test_absorb_success() {
        let mut report = ExtractionReport::default();
        report.absorb(
            "img1.png",
            Ok(r#"[{"rank": 1, "name": "王騎", "score": 100}]"#.to_string()),
        );

        assert_eq!(report.records.len(), 1);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_absorb_api_error() {
        let mut report = ExtractionReport::default();
        report.absorb("img1.png", Err(RankingError::ApiCall("status 500".into())));

        assert!(report.records.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file_name, "img1.png");
    }

    #[test]
    fn test_absorb_non_json_text() {
        let mut report = ExtractionReport::default();
        report.absorb("img1.png", Ok("画像を解析できませんでした。".to_string()));

        assert!(report.records.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_absorb_array_of_non_objects() {
        // 配列ではあるが要素がレコードの形をしていない → 全要素スキップ
        let mut report = ExtractionReport::default();
        report.absorb("img1.png", Ok(r#"[1, 2, 3]"#.to_string()));

        assert!(report.records.is_empty());
        assert_eq!(report.skipped_records, 3);
    }

    #[test]
    fn test_absorb_json_object_not_array() {
        let mut report = ExtractionReport::default();
        report.absorb("img1.png", Ok(r#"{"rank": 1, "name": "王騎"}"#.to_string()));

        assert!(report.records.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_batch_one_bad_image_does_not_abort() {
        // 3枚中1枚がパース不能 → 残り2枚分のレコードのみ
        let mut report = ExtractionReport::default();
        report.absorb(
            "a.png",
            Ok(r#"[{"rank": 1, "name": "王騎", "score": 100}]"#.to_string()),
        );
        report.absorb("b.png", Ok("```json\n{{{{\n```".to_string()));
        report.absorb(
            "c.png",
            Ok(r#"[{"rank": 2, "name": "騰", "score": 90}]"#.to_string()),
        );

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file_name, "b.png");
        // 到着順が保たれる
        assert_eq!(report.records[0].name, "王騎");
        assert_eq!(report.records[1].name, "騰");
    }

    #[test]
    fn test_extraction_prompt_directives() {
        let prompt = extraction_prompt();
        assert!(prompt.contains("JSON配列のみ出力"));
        assert!(prompt.contains("カンマ"));
        assert!(prompt.contains("不明"));
    }
}
