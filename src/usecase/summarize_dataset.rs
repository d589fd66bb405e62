// src/usecase/summarize_dataset.rs
//! Estadísticas agregadas de un dataset ya generado.
//!
//! Se calculan únicamente a partir de los registros recibidos: este módulo
//! no vuelve a muestrear nada.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::mem;

use crate::domain::model::alert::{AlertRecord, Status};
use crate::domain::model::category::Category;
use crate::domain::model::priority::Priority;

/// Columnas exportadas, en orden.
pub const COLUMNS: [&str; 11] = [
    "id",
    "timestamp",
    "category",
    "priority",
    "system_source",
    "message",
    "status",
    "assigned_team",
    "resolution_time_minutes",
    "severity_score",
    "impact",
];

/// Conteo de una etiqueta y su porcentaje sobre el total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub label: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DatasetSummary {
    pub total_records: u64,
    pub columns: usize,
    /// Ordenado por conteo descendente.
    pub by_category: Vec<DistributionEntry>,
    /// Orden fijo P1..P5, incluyendo prioridades sin registros.
    pub by_priority: Vec<DistributionEntry>,
    /// Ordenado por conteo descendente.
    pub by_status: Vec<DistributionEntry>,
    /// Huella aproximada en memoria (structs + heap de strings).
    pub memory_bytes: u64,
    /// Días completos entre el timestamp más antiguo y el más reciente.
    pub days_span: i64,
    /// Valores nulos por columna.
    pub null_counts: BTreeMap<String, u64>,
}

impl DatasetSummary {
    pub fn from_records(records: &[AlertRecord]) -> Self {
        let total = records.len() as u64;

        let mut categories: BTreeMap<Category, u64> = BTreeMap::new();
        let mut priorities: BTreeMap<Priority, u64> = BTreeMap::new();
        let mut statuses: BTreeMap<Status, u64> = BTreeMap::new();
        let mut missing_resolution = 0u64;
        let mut heap_bytes = 0usize;

        for r in records {
            *categories.entry(r.category).or_insert(0) += 1;
            *priorities.entry(r.priority).or_insert(0) += 1;
            *statuses.entry(r.status).or_insert(0) += 1;
            if r.resolution_time_minutes.is_none() {
                missing_resolution += 1;
            }
            heap_bytes += r.id.capacity() + r.system_source.capacity() + r.message.capacity() + r.assigned_team.capacity();
        }

        let by_category = sorted_by_count(categories.into_iter().map(|(c, n)| (c.label(), n)), total);
        let by_priority = Priority::ALL
            .iter()
            .map(|p| entry(p.label(), priorities.get(p).copied().unwrap_or(0), total))
            .collect();
        let by_status = sorted_by_count(statuses.into_iter().map(|(s, n)| (s.label(), n)), total);

        let days_span = match (
            records.iter().map(|r| r.timestamp).min(),
            records.iter().map(|r| r.timestamp).max(),
        ) {
            (Some(min), Some(max)) => (max - min).num_days(),
            _ => 0,
        };

        let mut null_counts: BTreeMap<String, u64> = COLUMNS.iter().map(|c| (c.to_string(), 0)).collect();
        null_counts.insert("resolution_time_minutes".into(), missing_resolution);

        DatasetSummary {
            total_records: total,
            columns: COLUMNS.len(),
            by_category,
            by_priority,
            by_status,
            memory_bytes: (records.len() * mem::size_of::<AlertRecord>() + heap_bytes) as u64,
            days_span,
            null_counts,
        }
    }

    pub fn memory_megabytes(&self) -> f64 {
        self.memory_bytes as f64 / 1024.0 / 1024.0
    }

    /// Porcentaje de una categoría (0 si no aparece).
    pub fn category_percentage(&self, category: Category) -> f64 {
        percentage_of(&self.by_category, category.label())
    }

    pub fn priority_percentage(&self, priority: Priority) -> f64 {
        percentage_of(&self.by_priority, priority.label())
    }
}

fn entry(label: &str, count: u64, total: u64) -> DistributionEntry {
    let percentage = if total == 0 { 0.0 } else { count as f64 / total as f64 * 100.0 };
    DistributionEntry {
        label: label.to_string(),
        count,
        percentage,
    }
}

fn sorted_by_count<'a>(counts: impl Iterator<Item = (&'a str, u64)>, total: u64) -> Vec<DistributionEntry> {
    let mut entries: Vec<DistributionEntry> = counts.map(|(label, n)| entry(label, n, total)).collect();
    // sort_by estable: a igual conteo se mantiene el orden del enum
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

fn percentage_of(entries: &[DistributionEntry], label: &str) -> f64 {
    entries.iter().find(|e| e.label == label).map(|e| e.percentage).unwrap_or(0.0)
}
