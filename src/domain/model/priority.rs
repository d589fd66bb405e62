// src/domain/model/priority.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::GeneratorError;

/// Prioridad operativa de una alerta. Ordenada por severidad: P1 es la más crítica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Crítica: caída o pérdida de servicio.
    P1,
    /// Alta: degradación severa.
    P2,
    /// Media.
    P3,
    /// Baja.
    P4,
    /// Informativa.
    P5,
}

impl Priority {
    /// Todas las prioridades en orden de severidad (P1 primero).
    pub const ALL: [Priority; 5] = [Priority::P1, Priority::P2, Priority::P3, Priority::P4, Priority::P5];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
            Priority::P4 => "P4",
            Priority::P5 => "P5",
        }
    }

    /// Descripción corta usada en los resúmenes del CLI.
    pub fn description(&self) -> &'static str {
        match self {
            Priority::P1 => "Critical",
            Priority::P2 => "High",
            Priority::P3 => "Medium",
            Priority::P4 => "Low",
            Priority::P5 => "Info",
        }
    }

    /// P1/P2 se tratan como urgentes: más probabilidad de seguir abiertas e impacto alto.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::P1 | Priority::P2)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "P1" => Ok(Priority::P1),
            "P2" => Ok(Priority::P2),
            "P3" => Ok(Priority::P3),
            "P4" => Ok(Priority::P4),
            "P5" => Ok(Priority::P5),
            other => Err(GeneratorError::invalid_argument(format!("unknown priority '{other}'"))),
        }
    }
}
