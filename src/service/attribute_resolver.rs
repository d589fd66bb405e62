// src/service/attribute_resolver.rs
//! Resolución de atributos condicionales.
//!
//! Dada una prioridad y una categoría ya sorteadas, deriva los campos dependientes:
//!
//! | Campo                     | Depende de  | Regla                                                  |
//! |---------------------------|-------------|--------------------------------------------------------|
//! | `status`                  | prioridad   | P1/P2: Open 60 / Ack 25 / Resolved 15; resto 30/30/40  |
//! | `resolution_time_minutes` | status      | entero uniforme en [5,245] solo si Resolved            |
//! | `severity_score`          | prioridad   | real uniforme en el rango de la prioridad, 2 decimales |
//! | `impact`                  | prioridad   | High (P1,P2), Medium (P3), Low (P4,P5), sin azar       |
//! | `assigned_team`           | categoría   | uniforme entre los 2 equipos de la categoría           |
//! | `message`                 | categoría   | uniforme en el pool de mensajes de la categoría        |
//!
//! La resolución es total sobre los enums cerrados y no guarda estado mutable:
//! mismas entradas y mismos sorteos producen los mismos campos.

use rand::Rng;
use std::ops::RangeInclusive;

use crate::config::weights::CategoricalWeights;
use crate::domain::error::GeneratorError;
use crate::domain::model::alert::{Impact, Status};
use crate::domain::model::category::Category;
use crate::domain::model::priority::Priority;
use crate::service::weighted_sampler::WeightedSampler;

/// Minutos de resolución para alertas resueltas.
pub const RESOLUTION_MINUTES: RangeInclusive<u32> = 5..=245;

/// Campos derivados de (prioridad, categoría).
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedAttributes {
    pub status: Status,
    pub resolution_time_minutes: Option<u32>,
    pub severity_score: f64,
    pub impact: Impact,
    pub assigned_team: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ConditionalAttributeResolver {
    urgent_status: WeightedSampler<Status>,
    routine_status: WeightedSampler<Status>,
    // Indexados por `Category::index()`
    messages: Vec<WeightedSampler<&'static str>>,
    teams: Vec<WeightedSampler<&'static str>>,
}

impl ConditionalAttributeResolver {
    pub fn new(weights: &CategoricalWeights) -> Result<Self, GeneratorError> {
        let urgent_status = WeightedSampler::new([
            (Status::Open, 60.0),
            (Status::Acknowledged, 25.0),
            (Status::Resolved, 15.0),
        ])?;
        let routine_status = WeightedSampler::new([
            (Status::Open, 30.0),
            (Status::Acknowledged, 30.0),
            (Status::Resolved, 40.0),
        ])?;

        let mut messages = Vec::with_capacity(Category::ALL.len());
        let mut teams = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let message_pool = weights.messages.get(&category).ok_or_else(|| {
                GeneratorError::invalid_configuration(format!("missing message pool for category '{category}'"))
            })?;
            let team_pool = weights.teams.get(&category).ok_or_else(|| {
                GeneratorError::invalid_configuration(format!("missing team pool for category '{category}'"))
            })?;
            messages.push(WeightedSampler::uniform(message_pool.iter().copied())?);
            teams.push(WeightedSampler::uniform(team_pool.iter().copied())?);
        }

        Ok(Self {
            urgent_status,
            routine_status,
            messages,
            teams,
        })
    }

    /// Deriva todos los campos dependientes. El orden de consumo de `rng` es fijo:
    /// status, resolución, equipo, severidad, mensaje.
    pub fn resolve<R: Rng + ?Sized>(&self, priority: Priority, category: Category, rng: &mut R) -> DerivedAttributes {
        let status = *self.status_sampler(priority).sample(rng);

        let resolution_time_minutes = match status {
            Status::Resolved => Some(rng.gen_range(RESOLUTION_MINUTES)),
            Status::Open | Status::Acknowledged => None,
        };

        let assigned_team = self.teams[category.index()].sample(rng).to_string();

        let (low, high) = severity_range(priority);
        let severity_score = round2(rng.gen_range(low..=high));

        let message = self.messages[category.index()].sample(rng).to_string();

        DerivedAttributes {
            status,
            resolution_time_minutes,
            severity_score,
            impact: impact_for(priority),
            assigned_team,
            message,
        }
    }

    fn status_sampler(&self, priority: Priority) -> &WeightedSampler<Status> {
        if priority.is_urgent() {
            &self.urgent_status
        } else {
            &self.routine_status
        }
    }
}

/// Rango cerrado de `severity_score` para cada prioridad.
pub fn severity_range(priority: Priority) -> (f64, f64) {
    match priority {
        Priority::P1 => (90.0, 100.0),
        Priority::P2 => (70.0, 89.0),
        Priority::P3 => (40.0, 69.0),
        Priority::P4 => (20.0, 39.0),
        Priority::P5 => (0.0, 19.0),
    }
}

/// Impacto como función pura de la prioridad.
pub fn impact_for(priority: Priority) -> Impact {
    match priority {
        Priority::P1 | Priority::P2 => Impact::High,
        Priority::P3 => Impact::Medium,
        Priority::P4 | Priority::P5 => Impact::Low,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
