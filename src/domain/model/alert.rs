// src/domain/model/alert.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::model::category::Category;
use crate::domain::model::priority::Priority;

/// Prefijo fijo de los identificadores de alerta.
pub const ALERT_ID_PREFIX: &str = "ALT";

/// Estado de la alerta en el momento del muestreo (no se simula ciclo de vida).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    Open,
    Acknowledged,
    Resolved,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Open, Status::Acknowledged, Status::Resolved];

    pub fn label(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Acknowledged => "Acknowledged",
            Status::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Impacto de negocio; función determinista de la prioridad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn label(&self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Un registro sintético de alerta de infraestructura.
///
/// Inmutable una vez producido por `RecordFactory`. Los campos dependientes
/// (`status`, `resolution_time_minutes`, `severity_score`, `impact`, `assigned_team`,
/// `message`) los deriva `ConditionalAttributeResolver` a partir de prioridad y categoría.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// `ALT-` + índice 1-based con 8 dígitos. Asignado en orden de generación.
    pub id: String,

    /// Instante UTC con resolución de segundos dentro de la ventana de 30 días.
    pub timestamp: DateTime<Utc>,

    pub category: Category,

    pub priority: Priority,

    /// Sistema de origen, independiente del resto de campos.
    pub system_source: String,

    pub message: String,

    pub status: Status,

    pub assigned_team: String,

    /// Presente si y solo si `status == Resolved`.
    pub resolution_time_minutes: Option<u32>,

    /// Redondeado a 2 decimales, dentro del sub-rango de la prioridad.
    pub severity_score: f64,

    pub impact: Impact,
}

impl AlertRecord {
    /// Formatea el identificador a partir del índice 0-based de generación.
    pub fn format_id(index: u64) -> String {
        format!("{}-{:08}", ALERT_ID_PREFIX, index + 1)
    }

    /// Recupera el número de secuencia (1-based) del identificador, si es válido.
    pub fn sequence_number(&self) -> Option<u64> {
        self.id
            .strip_prefix(ALERT_ID_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|digits| digits.parse().ok())
    }

    pub fn is_resolved(&self) -> bool {
        self.status == Status::Resolved
    }
}
