// src/domain/model/category.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categoría de la alerta. Conjunto cerrado de 8 etiquetas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Performance,
    Availability,
    Exception,
    Database,
    Connectivity,
    Security,
    Network,
    Application,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Performance,
        Category::Availability,
        Category::Exception,
        Category::Database,
        Category::Connectivity,
        Category::Security,
        Category::Network,
        Category::Application,
    ];

    /// Posición en `ALL`; usada para indexar pools por categoría.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Performance => "Performance",
            Category::Availability => "Availability",
            Category::Exception => "Exception",
            Category::Database => "Database",
            Category::Connectivity => "Connectivity",
            Category::Security => "Security",
            Category::Network => "Network",
            Category::Application => "Application",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
