//! Gemini API連携
//!
//! generateContentへの画像付きリクエストと、modelsエンドポイントからの
//! 利用可能モデル一覧取得。

use crate::error::{RankingError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// models一覧レスポンス
#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
    #[serde(rename = "supportedGenerationMethods", default)]
    supported_generation_methods: Vec<String>,
}

/// Gemini APIクライアント
///
/// APIキーは設定から明示的に渡す（グローバル状態にしない）。
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { client, api_key })
    }

    /// プロンプトと画像1枚をモデルへ送信し、レスポンステキストを返す
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image_bytes);

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: encoded,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig { temperature: 0.1 },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, model, self.api_key
        );

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RankingError::ApiCall(format!(
                "status {}: {}",
                status,
                body.trim()
            )));
        }

        let payload: GeminiResponse = response.json().await?;

        payload
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| RankingError::ApiCall("レスポンスが空です".into()))
    }

    /// generateContent対応のGeminiモデル名一覧を取得
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/models?key={}", GEMINI_API_BASE, self.api_key);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(RankingError::ApiCall(format!(
                "モデル一覧取得失敗 (status {})",
                status
            )));
        }

        let payload: ModelsResponse = response.json().await?;

        let models = payload
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            // "models/gemini-..." 形式からプレフィックスを落とす
            .map(|m| m.name.trim_start_matches("models/").to_string())
            .filter(|name| name.contains("gemini"))
            .collect();

        Ok(models)
    }
}
