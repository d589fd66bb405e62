// src/service/weighted_sampler.rs
//! Sorteo categórico ponderado.
//!
//! Los pesos son relativos: no tienen que sumar 1 ni 100. La tabla se valida una
//! sola vez al construir el sampler; a partir de ahí `sample` es total.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::domain::error::GeneratorError;

#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    items: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T> WeightedSampler<T> {
    /// Construye el sampler desde pares (etiqueta, peso).
    ///
    /// Falla con `InvalidConfiguration` si la tabla está vacía o contiene
    /// un peso no positivo o no finito.
    pub fn new(table: impl IntoIterator<Item = (T, f64)>) -> Result<Self, GeneratorError> {
        let (items, weights): (Vec<T>, Vec<f64>) = table.into_iter().unzip();

        if items.is_empty() {
            return Err(GeneratorError::invalid_configuration("weight table is empty"));
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(GeneratorError::invalid_configuration(format!(
                "weight table contains non-positive weight {bad}"
            )));
        }

        let index = WeightedIndex::new(weights)
            .map_err(|e| GeneratorError::invalid_configuration(format!("weight table rejected: {e}")))?;

        Ok(Self { items, index })
    }

    /// Sampler equiprobable sobre un pool cerrado.
    pub fn uniform(items: impl IntoIterator<Item = T>) -> Result<Self, GeneratorError> {
        Self::new(items.into_iter().map(|item| (item, 1.0)))
    }

    /// Sortea una etiqueta consumiendo entropía de `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.items[self.index.sample(rng)]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
