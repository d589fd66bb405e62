// src/domain/model/dataset.rs
//! Dataset generado: secuencia ordenada de `AlertRecord` más el descriptor de la ejecución.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use uuid::Uuid;

use crate::domain::model::alert::AlertRecord;

/// Descriptor de una ejecución de generación (para trazabilidad y nombres de exportación).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRun {
    pub run_id: Uuid,
    /// Instante de referencia (truncado a segundos) compartido por todos los registros.
    pub reference_instant: DateTime<Utc>,
    pub requested: u64,
    pub seed: Option<u64>,
    pub workers: usize,
}

/// Secuencia de registros ordenada por `timestamp` descendente.
///
/// Se genera una vez y se entrega al caller; el motor no la vuelve a mutar.
#[derive(Debug, Clone)]
pub struct Dataset {
    run: GenerationRun,
    records: Vec<AlertRecord>,
}

impl Dataset {
    pub(crate) fn new(run: GenerationRun, records: Vec<AlertRecord>) -> Self {
        Self { run, records }
    }

    pub fn run(&self) -> &GenerationRun {
        &self.run
    }

    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AlertRecord> {
        self.records
    }
}

impl Deref for Dataset {
    type Target = [AlertRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}
