//! # Log de Eventos del Servidor
//! src/logging.rs
//!
//! Logger de archivo en modo append: una línea por evento, con timestamp
//! local al frente.
//!
//! ## Formato
//!
//! ```text
//! [07-08-2026 14:32:05] 200 OK: File served successfully
//! ```
//!
//! Todas las escrituras pasan por un mutex propio y se hace flush línea
//! por línea: las entradas nunca se entrelazan ni se pierden, al costo de
//! serializar el logging de todos los workers.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Logger de archivo serializado
pub struct Logger {
    file: Mutex<File>,
}

impl Logger {
    /// Abre (o crea) el archivo de log en modo append
    ///
    /// Si el archivo no se puede abrir el servidor no debe arrancar:
    /// el caller trata este error como fatal.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Escribe un evento como línea `[DD-MM-YYYY HH:MM:SS] mensaje`
    ///
    /// La escritura es best-effort: si el filesystem falla a mitad de
    /// operación no hay nada razonable que hacer desde un worker, así que
    /// el error se descarta.
    pub fn log(&self, message: &str) {
        let timestamp = Local::now().format("%d-%m-%Y %H:%M:%S");
        let mut file = self.file.lock().unwrap();
        let _ = writeln!(file, "[{}] {}", timestamp, message);
        let _ = file.flush();
    }
}
