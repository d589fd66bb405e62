// src/config/weights.rs
//! Tablas de pesos categóricos y pools cerrados de mensajes, equipos y sistemas.
//!
//! Es configuración estática empaquetada con el binario, no se carga de fuera.
//! `validate()` se ejecuta al construir el generador: una tabla mal formada
//! es un defecto de empaquetado y se reporta como `InvalidConfiguration`.

use std::collections::BTreeMap;

use crate::domain::error::GeneratorError;
use crate::domain::model::category::Category;
use crate::domain::model::priority::Priority;

#[derive(Debug, Clone)]
pub struct CategoricalWeights {
    /// Pesos relativos de categoría.
    pub categories: Vec<(Category, f64)>,
    /// Pesos relativos de prioridad.
    pub priorities: Vec<(Priority, f64)>,
    /// Sistemas de origen (sorteo uniforme).
    pub systems: Vec<&'static str>,
    /// Pool de mensajes por categoría (sorteo uniforme).
    pub messages: BTreeMap<Category, Vec<&'static str>>,
    /// Pool de equipos candidatos por categoría (sorteo uniforme).
    pub teams: BTreeMap<Category, Vec<&'static str>>,
}

impl CategoricalWeights {
    /// Tablas por defecto del generador.
    pub fn builtin() -> Self {
        let categories = vec![
            (Category::Performance, 25.0),
            (Category::Availability, 20.0),
            (Category::Exception, 20.0),
            (Category::Database, 15.0),
            (Category::Connectivity, 10.0),
            (Category::Security, 5.0),
            (Category::Network, 3.0),
            (Category::Application, 2.0),
        ];

        let priorities = vec![
            (Priority::P1, 10.0),
            (Priority::P2, 15.0),
            (Priority::P3, 35.0),
            (Priority::P4, 30.0),
            (Priority::P5, 10.0),
        ];

        let systems = vec![
            "SAP_ECC_PRD",
            "SAP_S4HANA_PRD",
            "HANA_DB_01",
            "HANA_DB_02",
            "BTP_Tenant_01",
            "BTP_Tenant_02",
            "App_SRV_01",
            "App_SRV_02",
            "Web_Gateway_01",
            "Integration_Hub",
            "API_Gateway",
            "Auth_Service",
            "Payment_Gateway",
            "Email_Service",
            "File_Server",
            "Backup_System",
        ];

        let mut messages = BTreeMap::new();
        messages.insert(
            Category::Performance,
            vec![
                "CPU utilization exceeded 90% threshold for 5 minutes",
                "Response time degradation detected - average 3.5s",
                "Memory usage critical - 95% utilized",
                "Disk I/O operations exceeding 1000 IOPS",
                "Thread pool exhaustion warning - 98% threads active",
                "Query execution time exceeded 10 seconds",
                "API response latency above 2000ms",
                "High garbage collection activity detected",
                "Connection pool near capacity - 90% used",
                "Slow transaction processing detected",
            ],
        );
        messages.insert(
            Category::Availability,
            vec![
                "Service unavailable - HTTP 503 errors",
                "Health check failure detected",
                "Database connection lost",
                "Service restart required due to unresponsive state",
                "Scheduled maintenance window started",
                "Failover to secondary system initiated",
                "Service degradation - partial functionality available",
                "Load balancer health check failing",
                "Cluster node unreachable",
                "Service recovery in progress",
            ],
        );
        messages.insert(
            Category::Exception,
            vec![
                "NullPointerException in payment processing module",
                "Unhandled exception in user authentication service",
                "OutOfMemoryError in report generation",
                "Database deadlock detected and resolved",
                "Connection timeout exception - external API",
                "JSON parsing error in data ingestion",
                "File not found exception in batch job",
                "Concurrent modification exception in cache layer",
                "Invalid state exception in workflow engine",
                "Stack overflow error in recursive function",
            ],
        );
        messages.insert(
            Category::Database,
            vec![
                "Database connection pool exhausted",
                "Long-running query detected - 45 seconds",
                "Database backup failed - disk space",
                "Replication lag exceeds 10 minutes",
                "Table lock timeout occurred",
                "Index fragmentation above 30%",
                "Database checkpoint taking longer than expected",
                "Transaction log full - immediate action required",
                "Database mirroring suspended",
                "Slow query alert - full table scan detected",
            ],
        );
        messages.insert(
            Category::Connectivity,
            vec![
                "Network latency spike detected - 500ms",
                "TCP connection reset by peer",
                "DNS resolution failure for external service",
                "VPN tunnel disconnected",
                "Firewall rule blocking legitimate traffic",
                "Network packet loss exceeds 5%",
                "SSL certificate validation failed",
                "Load balancer connection timeout",
                "Network interface card error detected",
                "Bandwidth utilization above 80%",
            ],
        );
        messages.insert(
            Category::Security,
            vec![
                "Multiple failed login attempts detected",
                "Unauthorized access attempt blocked",
                "Security certificate expiring in 7 days",
                "Suspicious API access pattern detected",
                "Privilege escalation attempt logged",
                "Data encryption key rotation required",
                "Firewall rule violation detected",
                "Intrusion detection system alert triggered",
                "SQL injection attempt blocked",
                "Cross-site scripting attempt detected",
            ],
        );
        messages.insert(
            Category::Network,
            vec![
                "Network switch port flapping detected",
                "Router CPU utilization high - 85%",
                "BGP peer session down",
                "Network packet corruption detected",
                "VLAN configuration mismatch",
                "Network device reboot detected",
                "Spanning tree topology change",
                "Network monitoring agent unreachable",
                "SNMP trap received - link down",
                "Network congestion detected on uplink",
            ],
        );
        messages.insert(
            Category::Application,
            vec![
                "Application deployment failed - rollback initiated",
                "Configuration file syntax error detected",
                "Application license expiring in 30 days",
                "Session management error - memory leak suspected",
                "Application cache invalidation failed",
                "Microservice mesh communication failure",
                "Application startup sequence timeout",
                "Feature flag configuration error",
                "Application metrics collection failed",
                "Third-party integration service timeout",
            ],
        );

        let mut teams = BTreeMap::new();
        teams.insert(Category::Performance, vec!["Infrastructure Team", "Platform Team"]);
        teams.insert(Category::Availability, vec!["SRE Team", "Operations Team"]);
        teams.insert(Category::Exception, vec!["Development Team", "Application Team"]);
        teams.insert(Category::Database, vec!["Database Team", "DBA Team"]);
        teams.insert(Category::Connectivity, vec!["Network Team", "Infrastructure Team"]);
        teams.insert(Category::Security, vec!["Security Team", "InfoSec Team"]);
        teams.insert(Category::Network, vec!["Network Team", "Infrastructure Team"]);
        teams.insert(Category::Application, vec!["Application Team", "Development Team"]);

        Self {
            categories,
            priorities,
            systems,
            messages,
            teams,
        }
    }

    /// Valida las tablas: ninguna vacía, pesos positivos y finitos, y pools definidos
    /// para cada categoría con peso.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        validate_table("category", &self.categories)?;
        validate_table("priority", &self.priorities)?;

        if self.systems.is_empty() {
            return Err(GeneratorError::invalid_configuration("system_source pool is empty"));
        }

        for (category, _) in &self.categories {
            match self.messages.get(category) {
                Some(pool) if !pool.is_empty() => {}
                _ => {
                    return Err(GeneratorError::invalid_configuration(format!(
                        "missing message pool for category '{category}'"
                    )))
                }
            }
            match self.teams.get(category) {
                Some(pool) if !pool.is_empty() => {}
                _ => {
                    return Err(GeneratorError::invalid_configuration(format!(
                        "missing team pool for category '{category}'"
                    )))
                }
            }
        }

        Ok(())
    }

    /// Cuota esperada (0..1) de una categoría según su peso relativo.
    pub fn category_share(&self, category: Category) -> f64 {
        share_of(&self.categories, &category)
    }

    /// Cuota esperada (0..1) de una prioridad según su peso relativo.
    pub fn priority_share(&self, priority: Priority) -> f64 {
        share_of(&self.priorities, &priority)
    }
}

impl Default for CategoricalWeights {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_table<T: std::fmt::Debug>(name: &str, table: &[(T, f64)]) -> Result<(), GeneratorError> {
    if table.is_empty() {
        return Err(GeneratorError::invalid_configuration(format!("weight table '{name}' is empty")));
    }
    for (label, weight) in table {
        if !weight.is_finite() || *weight <= 0.0 {
            return Err(GeneratorError::invalid_configuration(format!(
                "weight table '{name}' has non-positive weight {weight} for {label:?}"
            )));
        }
    }
    Ok(())
}

fn share_of<T: PartialEq>(table: &[(T, f64)], key: &T) -> f64 {
    let total: f64 = table.iter().map(|(_, w)| *w).sum();
    if total <= 0.0 {
        return 0.0;
    }
    table
        .iter()
        .filter(|(label, _)| label == key)
        .map(|(_, w)| *w)
        .sum::<f64>()
        / total
}
