//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor de archivos con
//! soporte para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./file_server --port 8080 \
//!   --root-dir ./www \
//!   --upload-dir ./upload \
//!   --workers 4 \
//!   --queue-capacity 10
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ./file_server
//! ```

use clap::Parser;

/// Configuración del servidor HTTP de archivos
///
/// Inmutable después del arranque: no hay reconfiguración en runtime.
#[derive(Debug, Clone, Parser)]
#[command(name = "file_server")]
#[command(about = "Servidor HTTP concurrente de archivos estáticos y subidas")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    // === Directorios ===

    /// Directorio raíz de archivos estáticos
    #[arg(long = "root-dir", default_value = "./www", env = "ROOT_DIR")]
    pub root_dir: String,

    /// Directorio donde se guardan los archivos subidos
    #[arg(long = "upload-dir", default_value = "./upload", env = "UPLOAD_DIR")]
    pub upload_dir: String,

    /// Archivo de log (append-only)
    #[arg(long = "log-file", default_value = "./server.log", env = "LOG_FILE")]
    pub log_file: String,

    // === Concurrencia ===

    /// Número de workers del pool
    #[arg(long, default_value = "4", env = "WORKERS")]
    pub workers: usize,

    /// Capacidad de la cola de conexiones pendientes
    #[arg(long = "queue-capacity", default_value = "10", env = "QUEUE_CAPACITY")]
    pub queue_capacity: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use file_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos. El puerto 0 es válido:
    /// el sistema operativo asigna uno efímero (útil en pruebas).
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }
        if self.queue_capacity == 0 {
            return Err("Queue capacity must be >= 1".to_string());
        }
        if self.root_dir.is_empty() {
            return Err("Root dir must not be empty".to_string());
        }
        if self.upload_dir.is_empty() {
            return Err("Upload dir must not be empty".to_string());
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Address:        {}", self.address());
        println!("   Root dir:       {}", self.root_dir);
        println!("   Upload dir:     {}", self.upload_dir);
        println!("   Log file:       {}", self.log_file);
        println!("   Workers:        {}", self.workers);
        println!("   Queue capacity: {}", self.queue_capacity);
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            root_dir: "./www".to_string(),
            upload_dir: "./upload".to_string(),
            log_file: "./server.log".to_string(),
            workers: 4,
            queue_capacity: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.root_dir, "./www");
        assert_eq!(config.upload_dir, "./upload");
        assert_eq!(config.workers, 4);
        assert_eq!(config.queue_capacity, 10);
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ephemeral_port_ok() {
        let mut config = Config::default();
        config.port = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_workers() {
        let mut config = Config::default();
        config.workers = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Workers"));
    }

    #[test]
    fn test_validate_invalid_queue_capacity() {
        let mut config = Config::default();
        config.queue_capacity = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Queue capacity"));
    }

    #[test]
    fn test_validate_empty_dirs() {
        let mut config = Config::default();
        config.root_dir = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upload_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_print_summary() {
        let config = Config::default();
        // Should not panic
        config.print_summary();
    }
}
