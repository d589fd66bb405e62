// src/repository/dataset_cache.rs
//! Caché de datasets por petición de generación.
//!
//! Sustituye al estado de sesión de un front end interactivo: mientras el
//! número de registros pedido no cambie, se reutiliza el dataset ya generado.
//! Vive fuera del motor; el motor no guarda estado entre ejecuciones.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::error::GeneratorError;
use crate::domain::model::dataset::Dataset;
use crate::usecase::generate_dataset::{DatasetAssembler, ProgressObserver};

pub struct DatasetCache {
    assembler: DatasetAssembler,
    // record_count -> dataset
    entries: RwLock<HashMap<u64, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new(assembler: DatasetAssembler) -> Self {
        Self {
            assembler,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Devuelve el dataset cacheado para `n` o lo genera (en paralelo según
    /// los workers del ensamblador) y lo guarda.
    pub async fn get_or_generate(
        &self,
        n: i64,
        observer: Option<Arc<dyn ProgressObserver>>,
    ) -> Result<Arc<Dataset>, GeneratorError> {
        if n > 0 {
            if let Some(hit) = self.entries.read().await.get(&(n as u64)) {
                debug!(requested = n, run_id = %hit.run().run_id, "dataset cache hit");
                return Ok(Arc::clone(hit));
            }
        }

        let dataset = Arc::new(self.assembler.generate_parallel(n, observer).await?);

        let mut entries = self.entries.write().await;
        // Otra tarea pudo generar el mismo conteo mientras tanto; gana la primera
        let stored = entries.entry(n as u64).or_insert_with(|| Arc::clone(&dataset));
        Ok(Arc::clone(stored))
    }

    /// Descarta el dataset de `n` registros. Devuelve si existía.
    pub async fn invalidate(&self, n: i64) -> bool {
        if n <= 0 {
            return false;
        }
        self.entries.write().await.remove(&(n as u64)).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
