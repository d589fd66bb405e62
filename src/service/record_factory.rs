// src/service/record_factory.rs
//! Composición de un `AlertRecord` completo a partir de los samplers.

use rand::Rng;

use crate::config::weights::CategoricalWeights;
use crate::domain::error::GeneratorError;
use crate::domain::model::alert::AlertRecord;
use crate::domain::model::category::Category;
use crate::domain::model::priority::Priority;
use crate::service::attribute_resolver::ConditionalAttributeResolver;
use crate::service::timestamp_sampler::TimestampSampler;
use crate::service::weighted_sampler::WeightedSampler;

/// Fábrica de registros. Inmutable tras construirse: se comparte entre workers
/// y cada uno aporta su propio generador aleatorio.
#[derive(Debug, Clone)]
pub struct RecordFactory {
    categories: WeightedSampler<Category>,
    priorities: WeightedSampler<Priority>,
    systems: WeightedSampler<&'static str>,
    timestamps: TimestampSampler,
    resolver: ConditionalAttributeResolver,
}

impl RecordFactory {
    /// Valida las tablas y prepara los samplers. `timestamps` fija la referencia de la ejecución.
    pub fn new(weights: &CategoricalWeights, timestamps: TimestampSampler) -> Result<Self, GeneratorError> {
        weights.validate()?;
        Ok(Self {
            categories: WeightedSampler::new(weights.categories.iter().copied())?,
            priorities: WeightedSampler::new(weights.priorities.iter().copied())?,
            systems: WeightedSampler::uniform(weights.systems.iter().copied())?,
            timestamps,
            resolver: ConditionalAttributeResolver::new(weights)?,
        })
    }

    pub fn timestamps(&self) -> &TimestampSampler {
        &self.timestamps
    }

    /// Genera el registro para el índice 0-based `index` (id = index + 1).
    pub fn generate<R: Rng + ?Sized>(&self, index: u64, rng: &mut R) -> AlertRecord {
        let category = *self.categories.sample(rng);
        let priority = *self.priorities.sample(rng);
        let system_source = self.systems.sample(rng).to_string();
        let timestamp = self.timestamps.sample(rng);
        let derived = self.resolver.resolve(priority, category, rng);

        AlertRecord {
            id: AlertRecord::format_id(index),
            timestamp,
            category,
            priority,
            system_source,
            message: derived.message,
            status: derived.status,
            assigned_team: derived.assigned_team,
            resolution_time_minutes: derived.resolution_time_minutes,
            severity_score: derived.severity_score,
            impact: derived.impact,
        }
    }
}
