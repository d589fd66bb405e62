// src/usecase/generate_dataset.rs
//! Ensamblado del dataset.
//!
//! Objetivos cubiertos:
//! - Generar `n` registros independientes y ordenarlos por `timestamp` descendente
//!   (orden estable: los empates conservan el orden de generación).
//! - Reportar progreso cada 100 registros y al terminar, sin afectar al resultado.
//! - Ejecución secuencial o paralela (workers con rangos de índices disjuntos y
//!   un generador aleatorio independiente por worker).
//! - Reproducibilidad mediante semilla explícita.
//!
//! El progreso es puramente observacional y no altera los registros. En el camino
//! paralelo los reportes se serializan con un mutex, así que un observer lento
//! retrasa a los workers que cruzan un checkpoint.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::weights::CategoricalWeights;
use crate::domain::error::GeneratorError;
use crate::domain::model::alert::AlertRecord;
use crate::domain::model::dataset::{Dataset, GenerationRun};
use crate::service::record_factory::RecordFactory;
use crate::service::timestamp_sampler::TimestampSampler;

/// Cada cuántos registros se notifica progreso.
pub const PROGRESS_INTERVAL: u64 = 100;

/// Observer de progreso. Recibe `(generados, total)`; debe retornar rápido.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, generated: u64, total: u64);
}

impl<F> ProgressObserver for F
where
    F: Fn(u64, u64) + Send + Sync,
{
    fn on_progress(&self, generated: u64, total: u64) {
        self(generated, total)
    }
}

/// Snapshot de progreso publicado por `WatchProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub generated: u64,
    pub total: u64,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.generated as f64 / self.total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.generated == self.total
    }
}

/// Adaptador para consumidores async: publica el último progreso en un canal `watch`.
/// `send_replace` sobrescribe el valor anterior, nunca bloquea.
pub struct WatchProgress {
    tx: watch::Sender<Progress>,
}

impl WatchProgress {
    pub fn channel() -> (Self, watch::Receiver<Progress>) {
        let (tx, rx) = watch::channel(Progress::default());
        (Self { tx }, rx)
    }
}

impl ProgressObserver for WatchProgress {
    fn on_progress(&self, generated: u64, total: u64) {
        self.tx.send_replace(Progress { generated, total });
    }
}

/// Orquesta la generación de `n` registros.
#[derive(Debug, Clone)]
pub struct DatasetAssembler {
    weights: CategoricalWeights,
    seed: Option<u64>,
    workers: usize,
}

impl DatasetAssembler {
    /// Valida las tablas al construir: una tabla inválida no llega a generar nada.
    pub fn new(weights: CategoricalWeights) -> Result<Self, GeneratorError> {
        weights.validate()?;
        Ok(Self {
            weights,
            seed: None,
            workers: 1,
        })
    }

    /// Fija la semilla maestra; sin ella se usa entropía del SO.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Generación secuencial. Falla con `InvalidArgument` si `n <= 0`.
    pub fn generate(&self, n: i64, observer: Option<&dyn ProgressObserver>) -> Result<Dataset, GeneratorError> {
        let total = validate_count(n)?;
        let run = self.start_run(total, 1);
        let factory = RecordFactory::new(&self.weights, TimestampSampler::new(run.reference_instant))?;
        let started = Instant::now();

        info!(run_id = %run.run_id, requested = total, seed = ?run.seed, "dataset generation started");

        let mut rng = match run.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut records = Vec::with_capacity(total as usize);
        for index in 0..total {
            records.push(factory.generate(index, &mut rng));

            let generated = index + 1;
            if generated % PROGRESS_INTERVAL == 0 || generated == total {
                debug!(run_id = %run.run_id, generated, total, "generation progress");
                if let Some(obs) = observer {
                    obs.on_progress(generated, total);
                }
            }
        }

        sort_by_timestamp_desc(&mut records);

        info!(
            run_id = %run.run_id,
            generated = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset generation finished"
        );

        Ok(Dataset::new(run, records))
    }

    /// Generación paralela: cada worker produce un rango contiguo de índices con su
    /// propio `StdRng`, derivado de la semilla maestra. El orden final se impone
    /// después de reunir todos los registros.
    pub async fn generate_parallel(
        &self,
        n: i64,
        observer: Option<Arc<dyn ProgressObserver>>,
    ) -> Result<Dataset, GeneratorError> {
        let total = validate_count(n)?;
        let workers = (self.workers as u64).min(total).max(1);
        let run = self.start_run(total, workers as usize);
        let factory = Arc::new(RecordFactory::new(&self.weights, TimestampSampler::new(run.reference_instant))?);
        let started = Instant::now();

        info!(run_id = %run.run_id, requested = total, workers, seed = ?run.seed, "parallel dataset generation started");

        let mut master = match run.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let tracker = Arc::new(ProgressTracker::new(total, observer.clone()));
        let chunk = total.div_ceil(workers);

        let mut tasks = JoinSet::new();
        for worker in 0..workers {
            let start = worker * chunk;
            let end = ((worker + 1) * chunk).min(total);
            if start >= end {
                continue;
            }
            let worker_seed: u64 = master.gen();
            let factory = Arc::clone(&factory);
            let tracker = Arc::clone(&tracker);

            tasks.spawn_blocking(move || {
                let mut rng = StdRng::seed_from_u64(worker_seed);
                let mut chunk_records = Vec::with_capacity((end - start) as usize);
                for index in start..end {
                    chunk_records.push(factory.generate(index, &mut rng));
                    tracker.record_one();
                }
                (worker, chunk_records)
            });
        }

        let mut chunks: Vec<Option<Vec<AlertRecord>>> = (0..workers).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((worker, records)) => chunks[worker as usize] = Some(records),
                Err(e) => {
                    warn!(run_id = %run.run_id, error = %e, "generation worker failed");
                    tasks.abort_all();
                    return Err(GeneratorError::WorkerFailed { message: e.to_string() });
                }
            }
        }

        let mut records = Vec::with_capacity(total as usize);
        for chunk_records in chunks.into_iter().flatten() {
            records.extend(chunk_records);
        }
        if records.len() as u64 != total {
            return Err(GeneratorError::WorkerFailed {
                message: format!("expected {total} records, workers produced {}", records.len()),
            });
        }

        sort_by_timestamp_desc(&mut records);

        // El 100% se reporta una única vez, cuando ya están todos los registros.
        debug!(run_id = %run.run_id, generated = total, total, "generation progress");
        if let Some(obs) = observer {
            obs.on_progress(total, total);
        }

        info!(
            run_id = %run.run_id,
            generated = records.len(),
            workers,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "parallel dataset generation finished"
        );

        Ok(Dataset::new(run, records))
    }

    fn start_run(&self, requested: u64, workers: usize) -> GenerationRun {
        GenerationRun {
            run_id: Uuid::new_v4(),
            reference_instant: TimestampSampler::new(Utc::now()).reference(),
            requested,
            seed: self.seed,
            workers,
        }
    }
}

/// Contador compartido entre workers. Cada múltiplo de 100 (menor que el total)
/// se publica exactamente una vez y en orden creciente; el de 100% lo emite el
/// ensamblador tras reunir los registros.
struct ProgressTracker {
    total: u64,
    generated: AtomicU64,
    last_reported: Mutex<u64>,
    observer: Option<Arc<dyn ProgressObserver>>,
}

impl ProgressTracker {
    fn new(total: u64, observer: Option<Arc<dyn ProgressObserver>>) -> Self {
        Self {
            total,
            generated: AtomicU64::new(0),
            last_reported: Mutex::new(0),
            observer,
        }
    }

    fn record_one(&self) {
        let done = self.generated.fetch_add(1, Ordering::Relaxed) + 1;
        if done % PROGRESS_INTERVAL != 0 || done >= self.total {
            return;
        }
        let Some(observer) = &self.observer else {
            return;
        };
        // Un worker más rápido puede haber llegado antes al lock: se emiten
        // también los checkpoints intermedios que aún no se publicaron.
        let mut last = self.last_reported.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = *last + PROGRESS_INTERVAL;
        while next <= done {
            observer.on_progress(next, self.total);
            *last = next;
            next += PROGRESS_INTERVAL;
        }
    }
}

/// Máximo de registros que cabe en un único `Vec<AlertRecord>`.
pub fn max_record_count() -> u64 {
    (isize::MAX as u64) / (std::mem::size_of::<AlertRecord>() as u64)
}

fn validate_count(n: i64) -> Result<u64, GeneratorError> {
    if n <= 0 {
        return Err(GeneratorError::invalid_argument(format!(
            "record count must be a positive integer, got {n}"
        )));
    }
    let max = max_record_count();
    if n as u64 > max {
        return Err(GeneratorError::invalid_argument(format!(
            "record count {n} exceeds the maximum of {max}"
        )));
    }
    Ok(n as u64)
}

fn sort_by_timestamp_desc(records: &mut [AlertRecord]) {
    // sort_by es estable
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
