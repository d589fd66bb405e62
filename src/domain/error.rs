// src/domain/error.rs

use thiserror::Error;

/// Nivel de criticidad del error para clasificación operativa
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorImpact {
    Recoverable,   // El caller puede reintentar con otros argumentos
    NonRecoverable // Defecto de empaquetado o fallo interno
}

/// Tipos de error del motor de generación.
///
/// La taxonomía es deliberadamente estrecha: el muestreo por registro es total,
/// así que una ejecución o produce los `n` registros o falla antes de producir ninguno.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// Tabla de pesos mal formada (vacía o con peso no positivo). Fatal al arrancar.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Número de registros solicitado inválido (<= 0).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Un worker de generación paralela terminó con panic o fue cancelado.
    #[error("generation worker failed: {message}")]
    WorkerFailed { message: String },
}

impl GeneratorError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        GeneratorError::InvalidConfiguration { message: message.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        GeneratorError::InvalidArgument { message: message.into() }
    }

    pub fn impact(&self) -> ErrorImpact {
        match self {
            GeneratorError::InvalidArgument { .. } => ErrorImpact::Recoverable,
            GeneratorError::InvalidConfiguration { .. }
            | GeneratorError::WorkerFailed { .. } => ErrorImpact::NonRecoverable,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GeneratorError::InvalidConfiguration { message }
            | GeneratorError::InvalidArgument { message }
            | GeneratorError::WorkerFailed { message } => message,
        }
    }
}
