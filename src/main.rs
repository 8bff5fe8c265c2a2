use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ranking_ai_rust::{
    cli::{Cli, Commands},
    config::Config,
    error::{RankingError, Result},
    events, export,
    extractor::{self, ExtractionReport, GeminiClient},
    matcher, model_select, normalizer, roster, scanner,
    types::{ExtractedRecord, TallyTable},
};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            folder,
            output,
            model,
            choose_model,
        } => {
            println!("🏯 ranking-ai - 戦況解析\n");

            let client = make_client(&config)?;
            let model = resolve_model(&client, &config, model, choose_model).await?;
            println!("モデル: {}\n", model);

            println!("[1/2] スクショをスキャン中...");
            let images = scanner::scan_folder(&folder)?;
            println!("✔ {}枚の報告書を検出\n", images.len());

            if images.is_empty() {
                return Err(RankingError::NoImagesFound(folder.display().to_string()));
            }

            println!("[2/2] AI解析中...");
            let report = run_extraction(&client, &model, &images, &config).await;
            print_extraction_summary(&report, images.len());

            let output_path = output.unwrap_or_else(|| folder.join("records.json"));
            let json = serde_json::to_string_pretty(&report.records)?;
            std::fs::write(&output_path, json)?;
            println!("✔ 戦功レコードを保存: {}", output_path.display());

            println!("\n✅ 解析完了");
        }

        Commands::Export {
            input,
            roster,
            output,
            month,
            event,
        } => {
            println!("📜 ranking-ai - 戦功表出力\n");

            let content = std::fs::read_to_string(&input)?;
            let records: Vec<ExtractedRecord> = serde_json::from_str(&content)?;

            let table = build_table(&records, roster.as_deref(), cli.verbose);

            if table.is_empty() {
                println!("報告書から文字を判読できませんでした。");
                return Ok(());
            }

            print_table(&table);

            let (month, event) = resolve_month_event(month, event);
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let output_path = output_dir.join(events::output_file_name(&month, &event));

            export::export_to_file(&table, &output_path)?;
            println!("\n✔ 戦功表を保存: {}", output_path.display());

            println!("\n✅ 出力完了");
        }

        Commands::Run {
            folder,
            roster,
            output,
            month,
            event,
            model,
            choose_model,
        } => {
            println!("🏯 ranking-ai - 一括集計\n");

            let client = make_client(&config)?;
            let model = resolve_model(&client, &config, model, choose_model).await?;
            println!("モデル: {}\n", model);

            // 1. Scan
            println!("[1/4] スクショをスキャン中...");
            let images = scanner::scan_folder(&folder)?;
            println!("✔ {}枚の報告書を検出\n", images.len());

            if images.is_empty() {
                return Err(RankingError::NoImagesFound(folder.display().to_string()));
            }

            // 2. Extract
            println!("[2/4] AI解析中...");
            let report = run_extraction(&client, &model, &images, &config).await;
            print_extraction_summary(&report, images.len());

            // 3. Normalize + 名寄せ
            println!("[3/4] 集計・名寄せ中...");
            let table = build_table(&report.records, roster.as_deref(), cli.verbose);

            if table.is_empty() {
                println!("報告書から文字を判読できませんでした。");
                return Ok(());
            }
            println!("✔ {}行の戦功表を作成\n", table.len());

            print_table(&table);

            // 4. Export
            println!("\n[4/4] Excel出力中...");
            let (month, event) = resolve_month_event(month, event);
            let output_dir = output.unwrap_or_else(|| folder.clone());
            let output_path = output_dir.join(events::output_file_name(&month, &event));

            export::export_to_file(&table, &output_path)?;
            println!("✔ 戦功表を保存: {}", output_path.display());

            println!("\n✅ 集計完了");
        }

        Commands::Models => {
            let client = make_client(&config)?;
            let available = client.list_models().await?;

            println!("利用可能なモデル ({}件):", available.len());
            for line in model_select::describe_models(&available) {
                println!("  {}", line);
            }
            println!("\n自動選択: {}", model_select::auto_select(&available));
        }

        Commands::Config {
            set_api_key,
            set_model,
            show,
        } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ 既定モデルを設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  既定モデル: {}",
                    config.model.as_deref().unwrap_or("(自動選択)")
                );
                println!("  画像失敗の警告表示: {}", config.report_image_failures);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  APIキー: {}",
                    if config.api_key.is_some() {
                        "設定済み"
                    } else {
                        "未設定"
                    }
                );
            }
        }
    }

    Ok(())
}

fn make_client(config: &Config) -> Result<GeminiClient> {
    let api_key = config.get_api_key()?;
    GeminiClient::new(api_key, config.timeout_seconds)
}

/// 使用モデルを決定
///
/// 優先順: --model 指定 > 対話選択 > 設定の既定モデル > 一覧から自動選択。
async fn resolve_model(
    client: &GeminiClient,
    config: &Config,
    model_arg: Option<String>,
    choose_model: bool,
) -> Result<String> {
    if let Some(model) = model_arg {
        return Ok(model);
    }

    if choose_model {
        let available = client.list_models().await?;
        return Ok(model_select::select_interactive(&available));
    }

    if let Some(model) = &config.model {
        return Ok(model.clone());
    }

    // 一覧取得に失敗しても固定フォールバックで続行できる
    match client.list_models().await {
        Ok(available) => Ok(model_select::auto_select(&available)),
        Err(e) => {
            println!(
                "⚠ モデル一覧を取得できませんでした ({})。{} を使用します",
                e,
                model_select::FALLBACK_MODEL
            );
            Ok(model_select::FALLBACK_MODEL.to_string())
        }
    }
}

/// 進捗バー付きでバッチ抽出を実行
async fn run_extraction(
    client: &GeminiClient,
    model: &str,
    images: &[scanner::ImageInfo],
    config: &Config,
) -> ExtractionReport {
    let bar = ProgressBar::new(images.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("  戦況分析中... [{bar:30}] {pos}/{len}枚")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let report = extractor::extract_batch(client, model, images, |done, _total| {
        bar.set_position(done as u64);
    })
    .await;

    bar.finish_and_clear();

    if config.report_image_failures {
        for failure in &report.failures {
            println!("⚠ {} の解析失敗: {}", failure.file_name, failure.reason);
        }
    }

    report
}

fn print_extraction_summary(report: &ExtractionReport, total_images: usize) {
    println!(
        "✔ 解析完了: {}件のレコード（成功 {}枚 / 失敗 {}枚）",
        report.records.len(),
        total_images - report.failures.len(),
        report.failures.len()
    );
    if report.skipped_records > 0 {
        println!("  ※不正な形式の行を{}件スキップ", report.skipped_records);
    }
    println!();
}

/// 正規化と（名簿があれば）名寄せを行い最終テーブルを作る
///
/// 名簿の読み込み失敗は致命にしない: 警告を出して名寄せなしで続行する。
fn build_table(
    records: &[ExtractedRecord],
    roster_path: Option<&Path>,
    verbose: bool,
) -> TallyTable {
    let rows = normalizer::normalize(records);

    let Some(path) = roster_path else {
        return TallyTable::Plain(rows);
    };

    match roster::load_roster(path) {
        Ok(entries) => {
            println!("✔ {}名の将軍を名簿から確認", entries.len());
            TallyTable::Enriched(matcher::reconcile(&rows, &entries))
        }
        Err(e) => {
            println!("⚠ 名簿読込失敗（名寄せをスキップ）: {}", e);
            if verbose {
                println!("  名簿パス: {}", path.display());
            }
            TallyTable::Plain(rows)
        }
    }
}

/// 時期・戦場名を決定（未指定なら対話式）
fn resolve_month_event(month: Option<String>, event: Option<String>) -> (String, String) {
    match (month, event) {
        (Some(month), Some(event)) => {
            if events::category_of(&event).is_none() {
                println!("⚠ 既定の戦場名にない名前です: {}", event);
            }
            (month, event)
        }
        (month, event) => {
            let (sel_month, sel_event) = events::select_interactive();
            (month.unwrap_or(sel_month), event.unwrap_or(sel_event))
        }
    }
}

/// 集計結果を画面表示
fn print_table(table: &TallyTable) {
    println!("📊 集計結果:");
    match table {
        TallyTable::Plain(rows) => {
            println!("  {:<6} {:<16} {:>12}", "順位", "将軍名", "武功");
            for row in rows {
                println!(
                    "  {:<6} {:<16} {:>12}",
                    fmt_rank(row.rank),
                    row.name,
                    fmt_score(row.score)
                );
            }
        }
        TallyTable::Enriched(rows) => {
            println!(
                "  {:<6} {:<16} {:<10} {:<16} {:>12}",
                "順位", "登録名", "盟員コード", "将軍名", "武功"
            );
            for row in rows {
                println!(
                    "  {:<6} {:<16} {:<10} {:<16} {:>12}",
                    fmt_rank(row.rank),
                    row.matched_name,
                    row.code,
                    row.name,
                    fmt_score(row.score)
                );
            }
        }
    }
}

fn fmt_rank(rank: Option<u32>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())
}

fn fmt_score(score: Option<i64>) -> String {
    score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
}
