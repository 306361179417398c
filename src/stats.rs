//! # Contadores del Servidor
//! src/stats.rs
//!
//! Recolecta los contadores globales del proceso: conexiones activas,
//! total de requests atendidos y tiempo acumulado de respuesta.
//!
//! Los contadores viven detrás de un mutex propio, separado del de la
//! cola y del log, con secciones críticas cortas (solo
//! incrementar/decrementar). Nunca se persisten.

use std::sync::Mutex;
use std::time::Duration;

/// Contadores thread-safe del servidor
pub struct StatsCollector {
    inner: Mutex<StatsData>,
}

/// Datos internos de los contadores
struct StatsData {
    /// Conexiones aceptadas que todavía no terminan de procesarse
    active_connections: u64,

    /// Total acumulado de requests atendidos
    total_requests: u64,

    /// Tiempo de respuesta acumulado de todos los requests
    total_response_time: Duration,
}

impl StatsCollector {
    /// Crea un collector con todos los contadores en cero
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StatsData {
                active_connections: 0,
                total_requests: 0,
                total_response_time: Duration::ZERO,
            }),
        }
    }

    /// Incrementa el contador de conexiones activas (al aceptar)
    pub fn increment_active(&self) {
        let mut data = self.inner.lock().unwrap();
        data.active_connections += 1;
    }

    /// Decrementa el contador de conexiones activas (al cerrar)
    pub fn decrement_active(&self) {
        let mut data = self.inner.lock().unwrap();
        if data.active_connections > 0 {
            data.active_connections -= 1;
        }
    }

    /// Obtiene el número de conexiones activas
    pub fn active_connections(&self) -> u64 {
        let data = self.inner.lock().unwrap();
        data.active_connections
    }

    /// Registra un request atendido y su tiempo de respuesta
    pub fn record_request(&self, latency: Duration) {
        let mut data = self.inner.lock().unwrap();
        data.total_requests += 1;
        data.total_response_time += latency;
    }

    /// Obtiene un snapshot de los contadores
    pub fn snapshot(&self) -> StatsSnapshot {
        let data = self.inner.lock().unwrap();
        StatsSnapshot {
            active_connections: data.active_connections,
            total_requests: data.total_requests,
            total_response_time: data.total_response_time,
        }
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot de los contadores (para uso externo)
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub active_connections: u64,
    pub total_requests: u64,
    pub total_response_time: Duration,
}
