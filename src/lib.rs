//! # File Server
//! src/lib.rs
//!
//! Servidor HTTP concurrente de archivos estáticos y subidas, implementado
//! desde cero para demostrar conceptos de sistemas operativos:
//! productor/consumidor, pool de threads, sincronización con monitores y
//! manejo de recursos.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de la cabecera y construcción de responses
//! - `server`: Acceptor TCP, cola acotada de tareas y pool de workers
//! - `handlers`: Los dos caminos de procesamiento (estáticos y subidas)
//! - `config`: Configuración por CLI y variables de entorno
//! - `logging`: Log de eventos en archivo, serializado
//! - `stats`: Contadores del proceso
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use file_server::config::Config;
//! use file_server::logging::Logger;
//! use file_server::server::{Server, ServerContext};
//! use file_server::stats::StatsCollector;
//!
//! let config = Config::default();
//! let logger = Logger::open(&config.log_file).expect("log file");
//! let ctx = ServerContext { config, logger, stats: StatsCollector::new() };
//!
//! Server::bind(ctx).expect("bind").run().expect("run");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod logging;
pub mod server;
pub mod stats;
