use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ranking-ai")]
#[command(about = "同盟戦功ランキング画像AI集計ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スクショフォルダを解析して戦功レコードJSONを出力
    Analyze {
        /// スクショフォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力JSONファイル（デフォルト: 入力フォルダ/records.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 使用するモデル（省略時は自動選択）
        #[arg(short, long)]
        model: Option<String>,

        /// モデル一覧から対話式で選択
        #[arg(long)]
        choose_model: bool,
    },

    /// 戦功レコードJSONから戦功表Excelを生成
    Export {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 兵員名簿Excel（省略時は名寄せなし）
        #[arg(short, long)]
        roster: Option<PathBuf>,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 時期（例: 3月、省略時は対話式で選択）
        #[arg(long)]
        month: Option<String>,

        /// 戦場名（例: 秦国討伐戦、省略時は対話式で選択）
        #[arg(long)]
        event: Option<String>,
    },

    /// 解析から戦功表Excel出力まで一括実行
    Run {
        /// スクショフォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 兵員名簿Excel（省略時は名寄せなし）
        #[arg(short, long)]
        roster: Option<PathBuf>,

        /// 出力ディレクトリ（デフォルト: 入力フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 時期（例: 3月、省略時は対話式で選択）
        #[arg(long)]
        month: Option<String>,

        /// 戦場名（例: 秦国討伐戦、省略時は対話式で選択）
        #[arg(long)]
        event: Option<String>,

        /// 使用するモデル（省略時は自動選択）
        #[arg(short, long)]
        model: Option<String>,

        /// モデル一覧から対話式で選択
        #[arg(long)]
        choose_model: bool,
    },

    /// 利用可能なGeminiモデル一覧を表示
    Models,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 既定モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
