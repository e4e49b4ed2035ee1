use clap::Parser;
use indicatif::ProgressBar;
use menu_ai_rust::{cli, config, error, extractor, loader, pipeline, preference};
use cli::{Cli, Commands};
use config::Config;
use error::{MenuAiError, Result};
use preference::Preference;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(exit_code(&e));
    }
}

/// エラー種別ごとの終了コード（入力不備 / 該当なし / それ以外）
fn exit_code(error: &MenuAiError) -> i32 {
    if error.is_bad_request() {
        2
    } else if error.is_empty_result() {
        3
    } else {
        1
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Match {
            inputs,
            preference: preference_file,
            preference_flags,
            output,
            max_drinks,
        } => {
            println!("🍸 menu-ai - ドリンクマッチング\n");

            // 1. 画像読み込み
            println!("[1/3] メニュー画像を読み込み中...");
            let paths = loader::collect_image_paths(&inputs)?;
            if paths.is_empty() {
                return Err(MenuAiError::NoImages);
            }
            let images = loader::load_images(&paths, config.max_image_size)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            // 好みプロファイル（ファイル → フラグ上書き）
            let base = match preference_file {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)?;
                    serde_json::from_str(&content)?
                }
                None => Preference::default(),
            };
            let preference = preference_flags.apply(base);
            if cli.verbose {
                println!("  好み: {}", serde_json::to_string(&preference.standardize())?);
            }

            // 2. AI解析 + ランキング
            println!("[2/3] AI解析中...");
            let extractor = extractor::OpenAiExtractor::new(&config, cli.verbose)?;
            let mut options = pipeline::PipelineOptions::from(&config);
            if let Some(max) = max_drinks {
                options.max_results = max;
            }
            let pipeline = pipeline::Pipeline::new(Box::new(extractor), options)?;

            let bar = ProgressBar::new(images.len() as u64);
            let report = pipeline
                .run_with_progress(&preference, &images, |index, total| {
                    bar.set_position((index - 1) as u64);
                    bar.set_message(format!("画像 {}/{}", index, total));
                })
                .await?;
            bar.finish_and_clear();
            println!("✔ 解析完了\n");

            // 3. 結果出力
            println!("[3/3] 結果を出力中...");
            let json = serde_json::to_string_pretty(&report)?;
            match &output {
                Some(path) => {
                    std::fs::write(path, &json)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }

            println!("\n--- マッチ上位 ---");
            for drink in report.drinks.iter().take(5) {
                let price = drink
                    .price
                    .as_deref()
                    .map(|p| format!(" ({})", p))
                    .unwrap_or_default();
                println!("  {:>5.1}%  {}{}", drink.match_percentage, drink.name, price);
            }

            if !report.notes.is_empty() {
                println!("\nメモ: {}", report.notes);
            }

            let d = &report.diagnostics;
            println!(
                "\n✅ 完了（画像{}枚 / 候補{}件 / ユニーク{}件 / 表示{}件）",
                d.images_processed, d.total_drinks_found, d.unique_drinks, d.drinks_shown
            );
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  APIベースURL: {}", config.api_base);
                println!("  最大画像枚数: {}", config.max_images);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  表示件数上限: {}", config.max_results);
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
