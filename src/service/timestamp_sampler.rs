// src/service/timestamp_sampler.rs
//! Sorteo de timestamps dentro de la ventana de 30 días que termina en el instante
//! de referencia de la ejecución.
//!
//! Construcción: offset de días en [0,30], horas en [0,23], minutos en [0,59] y
//! segundos en [0,59], sorteados de forma independiente y restados a la referencia.
//! No es exactamente uniforme (el día 30 queda infra-representado y el límite inferior
//! real es referencia - 30d 23:59:59); se mantiene así para que las distribuciones
//! sean comparables con datasets ya generados.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::Rng;

/// Días hacia atrás cubiertos por la ventana.
pub const WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy)]
pub struct TimestampSampler {
    reference: DateTime<Utc>,
}

impl TimestampSampler {
    /// `reference` se trunca a segundos; todos los registros de la ejecución la comparten.
    pub fn new(reference: DateTime<Utc>) -> Self {
        Self {
            reference: reference.trunc_subsecs(0),
        }
    }

    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Límite inferior alcanzable: referencia - 30d 23:59:59.
    pub fn earliest(&self) -> DateTime<Utc> {
        self.reference - max_offset()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DateTime<Utc> {
        let days = rng.gen_range(0..=WINDOW_DAYS);
        let hours = rng.gen_range(0..=23);
        let minutes = rng.gen_range(0..=59);
        let seconds = rng.gen_range(0..=59);

        self.reference
            - (Duration::days(days)
                + Duration::hours(hours)
                + Duration::minutes(minutes)
                + Duration::seconds(seconds))
    }
}

fn max_offset() -> Duration {
    Duration::days(WINDOW_DAYS) + Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59)
}
