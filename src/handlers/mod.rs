//! # Handlers de Requests
//!
//! Este módulo contiene los dos caminos de procesamiento del servidor:
//!
//! - **static_files**: sirve GET (y cualquier método no reconocido) desde
//!   el directorio raíz, con contención de rutas
//! - **upload**: guarda el body de un POST en el directorio de uploads
//!
//! El despacho es fijo: método exactamente `POST` → upload, todo lo
//! demás → archivos estáticos. No hay tabla de rutas.

pub mod static_files;
pub mod upload;
