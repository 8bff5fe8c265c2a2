use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`ranking-ai config --set-api-key YOUR_KEY` か環境変数 GEMINI_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("名簿ファイルが不正: {0}")]
    InvalidRoster(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RankingError>;
