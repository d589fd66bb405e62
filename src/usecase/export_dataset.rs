// src/usecase/export_dataset.rs
//! Exportación del dataset a CSV, JSON y XLSX.
//!
//! Contratos de formato:
//! - CSV: cabecera con los nombres de campo, timestamps `%Y-%m-%d %H:%M:%S`,
//!   `resolution_time_minutes` vacío cuando no aplica.
//! - JSON: array de objetos con indentación, timestamps ISO-8601 (RFC 3339), `null` si no aplica.
//! - XLSX: una hoja "Alert Data" con las mismas columnas que el CSV.
//!
//! Los fallos de escritura o codificación se reportan al caller; el motor de
//! generación no interviene aquí.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::domain::model::alert::AlertRecord;
use crate::domain::model::dataset::Dataset;
use crate::usecase::summarize_dataset::COLUMNS;

/// Formato de texto de los timestamps en CSV y XLSX.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Nombre de la hoja en el libro XLSX.
pub const SHEET_NAME: &str = "Alert Data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => anyhow::bail!("unsupported export format '{other}'"),
        }
    }
}

/// Fila plana para CSV: mismos campos que `AlertRecord`, timestamp ya formateado.
#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    timestamp: String,
    category: &'a str,
    priority: &'a str,
    system_source: &'a str,
    message: &'a str,
    status: &'a str,
    assigned_team: &'a str,
    resolution_time_minutes: Option<u32>,
    severity_score: f64,
    impact: &'a str,
}

impl<'a> From<&'a AlertRecord> for CsvRow<'a> {
    fn from(r: &'a AlertRecord) -> Self {
        CsvRow {
            id: &r.id,
            timestamp: r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            category: r.category.label(),
            priority: r.priority.label(),
            system_source: &r.system_source,
            message: &r.message,
            status: r.status.label(),
            assigned_team: &r.assigned_team,
            resolution_time_minutes: r.resolution_time_minutes,
            severity_score: r.severity_score,
            impact: r.impact.label(),
        }
    }
}

pub fn write_csv<W: Write>(records: &[AlertRecord], writer: W) -> Result<()> {
    // La cabecera se escribe explícitamente para que exista también con 0 filas
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(COLUMNS).context("failed to write CSV header")?;
    for record in records {
        csv_writer
            .serialize(CsvRow::from(record))
            .with_context(|| format!("failed to encode {} as CSV", record.id))?;
    }
    csv_writer.flush().context("failed to flush CSV output")?;
    Ok(())
}

pub fn write_json<W: Write>(records: &[AlertRecord], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, records).context("failed to encode dataset as JSON")?;
    Ok(())
}

pub fn to_csv_string(records: &[AlertRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).context("CSV output is not valid UTF-8")
}

pub fn to_xlsx_bytes(records: &[AlertRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (i, r) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &r.id)?;
        worksheet.write_string(row, 1, r.timestamp.format(TIMESTAMP_FORMAT).to_string())?;
        worksheet.write_string(row, 2, r.category.label())?;
        worksheet.write_string(row, 3, r.priority.label())?;
        worksheet.write_string(row, 4, &r.system_source)?;
        worksheet.write_string(row, 5, &r.message)?;
        worksheet.write_string(row, 6, r.status.label())?;
        worksheet.write_string(row, 7, &r.assigned_team)?;
        if let Some(minutes) = r.resolution_time_minutes {
            worksheet.write_number(row, 8, minutes as f64)?;
        }
        worksheet.write_number(row, 9, r.severity_score)?;
        worksheet.write_string(row, 10, r.impact.label())?;
    }

    let bytes = workbook.save_to_buffer().context("failed to build XLSX workbook")?;
    Ok(bytes)
}

/// `alert_data_<YYYYmmdd_HHMMSS>.<ext>`
pub fn default_file_name(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!("alert_data_{}.{}", at.format("%Y%m%d_%H%M%S"), format.extension())
}

/// Escribe el dataset en `path` con el formato indicado.
pub fn export_to_path(records: &[AlertRecord], format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
            write_csv(records, BufWriter::new(file))
        }
        ExportFormat::Json => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_json(records, &mut writer)?;
            writer.flush().with_context(|| format!("cannot flush {}", path.display()))
        }
        ExportFormat::Xlsx => {
            let bytes = to_xlsx_bytes(records)?;
            std::fs::write(path, bytes).with_context(|| format!("cannot write {}", path.display()))
        }
    }
}

/// Exporta a `dir` un fichero por formato, nombrado con el instante de referencia
/// de la ejecución. Devuelve las rutas escritas.
pub fn export_dataset(dataset: &Dataset, formats: &[ExportFormat], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("cannot create output dir {}", dir.display()))?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = dir.join(default_file_name(*format, dataset.run().reference_instant));
        export_to_path(dataset.records(), *format, &path)?;
        info!(
            run_id = %dataset.run().run_id,
            format = %format,
            records = dataset.len(),
            path = %path.display(),
            "dataset exported"
        );
        written.push(path);
    }
    Ok(written)
}
