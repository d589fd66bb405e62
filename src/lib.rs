// src/lib.rs
//! `alert-data-generator`: generador de datasets sintéticos de alertas de infraestructura IT
//! para entrenamiento y pruebas de modelos de ML.
//!
//! Punto de entrada del motor: [`DatasetAssembler::generate`] (secuencial) y
//! [`DatasetAssembler::generate_parallel`] (workers con streams aleatorios independientes).
//! Resumen, exportación y caché son consumidores del dataset ya generado.

pub mod config {
    pub mod app_config;
    pub mod weights;
}

pub mod domain {
    pub mod error;
    pub mod model {
        pub mod alert;
        pub mod category;
        pub mod dataset;
        pub mod priority;
    }
}

pub mod service {
    pub mod attribute_resolver;
    pub mod record_factory;
    pub mod timestamp_sampler;
    pub mod weighted_sampler;
}

pub mod usecase {
    pub mod export_dataset;
    pub mod generate_dataset;
    pub mod summarize_dataset;
}

pub mod repository {
    pub mod dataset_cache;
}

pub mod telemetry {
    pub mod tracing;
}

pub use config::weights::CategoricalWeights;
pub use domain::error::{ErrorImpact, GeneratorError};
pub use domain::model::alert::{AlertRecord, Impact, Status};
pub use domain::model::category::Category;
pub use domain::model::dataset::{Dataset, GenerationRun};
pub use domain::model::priority::Priority;
pub use usecase::generate_dataset::{DatasetAssembler, Progress, ProgressObserver, WatchProgress};
pub use usecase::summarize_dataset::DatasetSummary;
