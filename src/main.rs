use anyhow::{bail, Context};
use clap::Parser;
use config_lens::cli::{Cli, Commands};
use config_lens::config::Config;
use config_lens::extract::{Extractor, SheetStatus, WorkbookExtraction};
use config_lens::progress::ProgressReporter;
use config_lens::render::{render, to_text_table, GridBudget};
use config_lens::worker::{ExtractionWorker, RunResult};
use config_lens::worksheet::xlsx;
use config_lens::error::ConfigLensError;
use config_lens::{logging, prompt};
use config_lens_common::SpecFormatter;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("設定の読み込みに失敗しました")?;
    if let Some(policy) = cli.policy {
        config.duplicate_policy = policy;
    }
    if let Some(rows) = cli.blank_rows {
        config.blank_row_tolerance = rows;
    }

    match cli.command {
        Commands::Sheets { file } => {
            let names = xlsx::sheet_names(&file)?;
            let config_sheets = xlsx::filter_config_sheets(&names, &config.sheet_filter);
            println!("ワークシート: {}件（構成シート: {}件）", names.len(), config_sheets.len());
            for name in &names {
                let mark = if config_sheets.contains(name) { "✔" } else { " " };
                println!("  {} {}", mark, name);
            }
        }

        Commands::Ids { file, sheet } => {
            println!("🔎 config-lens - 識別子一覧\n");
            let extraction = extract(&file, sheet.as_deref(), &config).await?;

            for record in extraction.dataset.records() {
                println!("  {}  ({} / 列{})", record.identifier, record.sheet, record.column + 1);
            }
            println!("\n✅ {}件", extraction.dataset.len());
        }

        Commands::Show { file, sheet, id, budget, full, alias } => {
            println!("📋 config-lens - 構成表示\n");
            let extraction = extract(&file, sheet.as_deref(), &config).await?;
            let dataset = &extraction.dataset;

            let id = match id {
                Some(id) => id,
                None => prompt::select_identifier(dataset)?,
            };
            let record = dataset.require(&id)?;

            let aliases = config.alias_table(alias.as_deref())?;
            let formatter = SpecFormatter::new(config.model_bearing.iter().cloned());
            let budget = GridBudget::uniform(budget.unwrap_or(config.default_budget));
            let grid = render(record, &config.categories, &aliases, &formatter, budget, &());

            println!("System P/N: {}  ({})\n", record.identifier, record.sheet);
            if grid.is_empty() {
                println!("表示できる部品がありません");
            } else {
                print!("{}", to_text_table(&grid, full));
            }
        }

        Commands::Export { file, sheet, output } => {
            println!("📄 config-lens - エクスポート\n");
            let extraction = extract(&file, sheet.as_deref(), &config).await?;
            let json = serde_json::to_string_pretty(&extraction.dataset)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("書き込みに失敗しました: {}", path.display()))?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Config { show, init } => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => Config::config_path()?,
            };

            if init {
                if path.exists() {
                    println!("設定ファイルは既に存在します: {}", path.display());
                } else {
                    match &cli.config {
                        Some(path) => Config::default().save_to(path)?,
                        None => Config::default().save()?,
                    }
                    println!("✔ 設定ファイルを作成しました: {}", path.display());
                }
            }

            if show || !init {
                println!("設定: {}", path.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

/// ブックを読み込み、バックグラウンドで抽出する
async fn extract(file: &Path, sheet: Option<&str>, config: &Config) -> anyhow::Result<WorkbookExtraction> {
    println!("[1/2] ワークシートを読み込み中...");
    let sheets = match sheet {
        Some(name) => vec![xlsx::load_worksheet(file, name)?],
        None => xlsx::load_config_sheets(file, &config.sheet_filter)?,
    };
    println!("✔ {}シートを読み込み\n", sheets.len());

    println!("[2/2] 構成を抽出中...");
    let progress = Arc::new(ProgressReporter::new(sheets.len()));
    let worker = ExtractionWorker::new(Extractor::from_config(config));
    let result = worker.run(sheets, progress.clone()).await?;
    progress.finish();

    let extraction = match result {
        RunResult::Completed(extraction) => extraction,
        RunResult::Superseded { .. } | RunResult::Cancelled => return Err(ConfigLensError::Cancelled.into()),
    };

    // シート指定時は見出し・部品一覧が無ければエラー
    if let (Some(name), [report]) = (sheet, extraction.reports.as_slice()) {
        match report.status {
            SheetStatus::AnchorNotFound => return Err(ConfigLensError::AnchorNotFound(name.into()).into()),
            SheetStatus::EmptyCatalog => return Err(ConfigLensError::EmptyCatalog(name.into()).into()),
            _ => {}
        }
    }

    for report in &extraction.reports {
        match report.status {
            SheetStatus::Extracted => println!("  ✔ {}: {}件", report.sheet, report.identifiers),
            SheetStatus::AnchorNotFound => println!("  - {}: System P/N 見出しなし", report.sheet),
            SheetStatus::EmptyCatalog => println!("  - {}: 部品一覧なし", report.sheet),
            SheetStatus::Cancelled => println!("  - {}: 中断", report.sheet),
        }
    }
    if !extraction.dataset.conflicts().is_empty() {
        println!(
            "  ⚠ 重複した識別子: {}件（{}）",
            extraction.dataset.conflicts().len(),
            config.duplicate_policy
        );
    }
    if extraction.dataset.is_empty() {
        bail!("構成データが見つかりません: {}", file.display());
    }
    println!();
    Ok(extraction)
}
