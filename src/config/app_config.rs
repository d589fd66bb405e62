// src/config/app_config.rs

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::usecase::export_dataset::ExportFormat;

/// Límites del número de registros aceptados por el front end.
pub const MIN_RECORDS: u64 = 10;
pub const MAX_RECORDS: u64 = 100_000;

/// Estructura principal que representa la configuración de la aplicación.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_record_count")]
    pub record_count: u64,
    /// Semilla maestra; sin ella cada ejecución es distinta.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    /// Salida JSON en lugar de texto.
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_record_count() -> u64 {
    1_000
}

fn default_workers() -> usize {
    1
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Csv]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            record_count: default_record_count(),
            seed: None,
            workers: default_workers(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            output_dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde ficheros (en orden, el último sobrescribe)
    /// y variables de entorno `APP__SECCION__CLAVE`.
    pub fn load(config_paths: &[PathBuf]) -> Result<Self> {
        let mut builder = Config::builder();

        for path in config_paths {
            if path.exists() {
                builder = builder.add_source(File::from(path.clone()));
                info!("Loaded config file: {:?}", path);
            } else {
                info!("Config file not found, skipping: {:?}", path);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("export.formats"),
        );

        let built = builder.build().context("Failed to build configuration")?;
        let app_config: AppConfig = built.try_deserialize().context("Failed to deserialize configuration")?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Carga un único fichero obligatorio.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file '{}' does not exist", path.display());
        }
        Self::load(&[path.to_path_buf()])
    }

    /// Validar configuración con reglas de rango.
    pub fn validate(&self) -> Result<()> {
        validate_record_count(self.generation.record_count)?;

        if self.generation.workers == 0 {
            anyhow::bail!("generation.workers must be at least 1");
        }

        if self.export.output_dir.as_os_str().is_empty() {
            anyhow::bail!("export.output_dir must not be empty");
        }

        Ok(())
    }
}

/// Rango aceptado por el front end: 10..=100_000.
pub fn validate_record_count(count: u64) -> Result<()> {
    if !(MIN_RECORDS..=MAX_RECORDS).contains(&count) {
        anyhow::bail!(
            "record count {} out of range, must be between {} and {}",
            count,
            MIN_RECORDS,
            MAX_RECORDS
        );
    }
    Ok(())
}
