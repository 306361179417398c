//! # File Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos.
//!
//! El arranque es la única fase donde un fallo aborta el proceso:
//! configuración inválida, log que no abre, o bind que falla.

use file_server::config::Config;
use file_server::logging::Logger;
use file_server::server::{Server, ServerContext};
use file_server::stats::StatsCollector;

fn main() {
    println!("=================================");
    println!("  File Server");
    println!("=================================\n");

    // Configuración desde CLI / variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // El log es colaborador obligatorio: sin log no hay servidor
    let logger = match Logger::open(&config.log_file) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("💥 No se pudo abrir el archivo de log: {}", e);
            std::process::exit(1);
        }
    };

    let ctx = ServerContext {
        config,
        logger,
        stats: StatsCollector::new(),
    };

    // Bind + run; cualquier error acá también es fatal
    let server = match Server::bind(ctx) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error fatal en el arranque: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
