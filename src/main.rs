// src/main.rs
//! Punto de entrada del CLI `alert-data-generator`.
//!
//! Objetivos principales:
//! - Cargar configuración (ficheros + `APP__*`) y aplicar overrides de línea de comandos.
//! - Inicializar tracing.
//! - Generar el dataset informando progreso, mostrar estadísticas y una vista previa.
//! - Exportar a CSV / JSON / XLSX.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use alert_data_generator::config::app_config::{validate_record_count, AppConfig, MAX_RECORDS, MIN_RECORDS};
use alert_data_generator::telemetry;
use alert_data_generator::usecase::export_dataset::{export_dataset, ExportFormat, TIMESTAMP_FORMAT};
use alert_data_generator::{
    CategoricalWeights, Category, DatasetAssembler, DatasetSummary, Priority, ProgressObserver, WatchProgress,
};

/// Ficheros de configuración por defecto (opcionales).
const DEFAULT_CONFIG_FILES: [&str; 2] = ["config/default.toml", "config/local.toml"];

/// Filas mostradas en la vista previa.
const DEFAULT_PREVIEW_ROWS: usize = 20;

#[derive(Debug, Parser)]
#[command(
    name = "alert-data-generator",
    version,
    about = "Generate realistic synthetic IT infrastructure alert data for ML training and testing"
)]
struct Cli {
    /// Number of alert records to generate (10..=100000)
    #[arg(short = 'n', long)]
    records: Option<u64>,

    /// Master seed for reproducible datasets
    #[arg(long)]
    seed: Option<u64>,

    /// Parallel generation workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Export format (repeatable)
    #[arg(short, long = "format", value_enum)]
    formats: Vec<ExportFormat>,

    /// Directory for exported files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file(s); replaces the default lookup
    #[arg(short, long)]
    config: Vec<PathBuf>,

    /// Skip writing export files
    #[arg(long)]
    no_export: bool,

    /// Rows shown in the data preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    preview: usize,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = ?e, "alert-data-generator failed");
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // 1) Configuración
    let config_paths: Vec<PathBuf> = if cli.config.is_empty() {
        DEFAULT_CONFIG_FILES.iter().map(PathBuf::from).collect()
    } else {
        cli.config.clone()
    };
    let mut cfg = AppConfig::load(&config_paths)?;
    apply_overrides(&mut cfg, &cli)?;

    // 2) Tracing
    telemetry::tracing::init_tracing(&cfg.logging);

    // 3) Generación
    let mut assembler = DatasetAssembler::new(CategoricalWeights::builtin())
        .context("built-in weight tables are invalid")?
        .with_workers(cfg.generation.workers);
    if let Some(seed) = cfg.generation.seed {
        assembler = assembler.with_seed(seed);
    }

    let (watch_progress, mut progress_rx) = WatchProgress::channel();
    let observer: Arc<dyn ProgressObserver> = Arc::new(watch_progress);
    let progress_task = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let p = *progress_rx.borrow_and_update();
            info!(generated = p.generated, total = p.total, "Generating alerts... {}/{}", p.generated, p.total);
            if p.is_complete() {
                break;
            }
        }
    });

    let started = Instant::now();
    let dataset = assembler
        .generate_parallel(cfg.generation.record_count as i64, Some(observer))
        .await?;
    let elapsed = started.elapsed().as_secs_f64();
    let _ = progress_task.await;

    println!("✅ Generated {} alert records in {:.2} seconds!", dataset.len(), elapsed);

    // 4) Estadísticas y vista previa
    let summary = DatasetSummary::from_records(&dataset);
    print_summary(&summary);
    print_preview(&dataset, cli.preview);

    // 5) Exportación
    if !cli.no_export {
        let written = export_dataset(&dataset, &cfg.export.formats, &cfg.export.output_dir)?;
        println!("\n💾 Exported files:");
        for path in written {
            println!("  - {}", path.display());
        }
    }

    Ok(())
}

fn apply_overrides(cfg: &mut AppConfig, cli: &Cli) -> Result<()> {
    if let Some(records) = cli.records {
        validate_record_count(records)
            .with_context(|| format!("--records must be between {MIN_RECORDS} and {MAX_RECORDS}"))?;
        cfg.generation.record_count = records;
    }
    if let Some(seed) = cli.seed {
        cfg.generation.seed = Some(seed);
    }
    if let Some(workers) = cli.workers {
        cfg.generation.workers = workers;
    }
    if !cli.formats.is_empty() {
        cfg.export.formats = cli.formats.clone();
    }
    if let Some(dir) = &cli.output_dir {
        cfg.export.output_dir = dir.clone();
    }
    cfg.validate()
}

fn print_summary(summary: &DatasetSummary) {
    println!("\n📈 Dataset Statistics");
    println!("  Total Records : {}", summary.total_records);
    println!("  Columns       : {}", summary.columns);
    println!("  Memory Usage  : {:.1} MB", summary.memory_megabytes());
    println!("  Days Span     : {}", summary.days_span);

    println!("\n📊 By Category");
    for e in &summary.by_category {
        println!("  {:<13} {:>7} ({:.1}%)", e.label, e.count, e.percentage);
    }

    println!("\n📊 By Priority");
    for (e, p) in summary.by_priority.iter().zip(Priority::ALL) {
        println!("  {} {:<9} {:>7} ({:.1}%)", e.label, format!("({})", p.description()), e.count, e.percentage);
    }

    println!("\n📊 By Status");
    for e in &summary.by_status {
        println!("  {:<13} {:>7} ({:.1}%)", e.label, e.count, e.percentage);
    }

    println!("\n🧮 Null counts");
    for (column, nulls) in &summary.null_counts {
        if *nulls > 0 {
            println!("  {column}: {nulls}");
        }
    }

    let configured = CategoricalWeights::builtin();
    let widest_gap = Category::ALL
        .iter()
        .map(|c| (summary.category_percentage(*c) - configured.category_share(*c) * 100.0).abs())
        .fold(0.0_f64, f64::max);
    info!(widest_gap_pp = widest_gap, "category shares vs configured weights");
}

fn print_preview(records: &[alert_data_generator::AlertRecord], rows: usize) {
    if rows == 0 {
        return;
    }
    println!("\n🔍 Data Preview (First {} Records)", rows.min(records.len()));
    for r in records.iter().take(rows) {
        println!(
            "  {} | {} | {:<12} | {} | {:<15} | {:<12} | {:>6.2} | {:<6} | {}",
            r.id,
            r.timestamp.format(TIMESTAMP_FORMAT),
            r.category,
            r.priority,
            r.system_source,
            r.status,
            r.severity_score,
            r.impact,
            r.message
        );
    }
    if records.len() > rows {
        println!("  📌 Showing first {} rows out of {} total records", rows, records.len());
    }
}
