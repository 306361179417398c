//! # Servicio de Archivos Estáticos
//! src/handlers/static_files.rs
//!
//! Resuelve el target del request a una ruta dentro del directorio raíz y
//! sirve el archivo. El contención al directorio raíz es un contrato de
//! seguridad: la ruta candidata se canonicaliza (resolviendo `..` y
//! symlinks) y el resultado debe tener al raíz canónico como prefijo
//! literal. Cualquier escape se redirige al documento 404 fijo. Nunca se
//! compara sobre el string crudo.

use crate::http::{RequestHead, Response, StatusCode};
use crate::server::ServerContext;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Tamaño de chunk para el streaming del body
const CHUNK_SIZE: usize = 1024;

/// Documento servido cuando el target es `/`
const DEFAULT_DOCUMENT: &str = "index.html";

/// Documento fijo al que se redirige cualquier intento de escape
const NOT_FOUND_DOCUMENT: &str = "404.html";

/// Determina el Content-Type según la extensión del archivo
///
/// # Ejemplo
/// ```
/// use file_server::handlers::static_files::mime_type;
/// use std::path::Path;
///
/// assert_eq!(mime_type(Path::new("foto.jpg")), "image/jpeg");
/// assert_eq!(mime_type(Path::new("binario")), "application/octet-stream");
/// ```
pub fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Resuelve el target del request a una ruta contenida en el raíz
///
/// - `/` (o un target vacío de una request line imparseable) mapea al
///   documento por defecto
/// - la candidata se canonicaliza y debe quedar bajo el raíz canónico;
///   si no existe, no se puede resolver, o escapa del raíz, se retorna
///   la ruta del documento 404 (que normalmente tampoco existe y termina
///   en una respuesta 404)
pub fn resolve_path(target: &str, root: &str) -> PathBuf {
    let root_path = Path::new(root);
    let not_found = root_path.join(NOT_FOUND_DOCUMENT);

    let relative = match target.trim_start_matches('/') {
        "" => DEFAULT_DOCUMENT,
        other => other,
    };
    let candidate = root_path.join(relative);

    // Canonicalizar ambos lados; el raíz existe desde el arranque
    let canonical_root = match fs::canonicalize(root_path) {
        Ok(path) => path,
        Err(_) => return not_found,
    };

    match fs::canonicalize(&candidate) {
        Ok(canonical) if canonical.starts_with(&canonical_root) => canonical,
        _ => not_found,
    }
}

/// Sirve el target de un request GET (o de cualquier método no-POST)
///
/// Resultados posibles:
/// - archivo regular legible → 200 con Content-Type por extensión,
///   Content-Length del tamaño real y body en chunks de 1024 bytes
/// - inexistente o directorio → 404 con body plano fijo
/// - no se puede abrir → 500 con body plano fijo
pub fn handle<W: Write>(
    stream: &mut W,
    head: &RequestHead,
    ctx: &ServerContext,
) -> io::Result<()> {
    let path = resolve_path(head.target(), &ctx.config.root_dir);

    let metadata = match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => meta,
        _ => {
            let response = Response::text(StatusCode::NotFound, "404 Not Found");
            stream.write_all(&response.to_bytes())?;
            ctx.logger.log("404 Not Found: File not found");
            return Ok(());
        }
    };

    let mut file = match File::open(&path) {
        Ok(file) => file,
        Err(_) => {
            let response =
                Response::text(StatusCode::InternalServerError, "500 Internal Server Error");
            stream.write_all(&response.to_bytes())?;
            ctx.logger.log("500 Internal Server Error: File open failed");
            return Ok(());
        }
    };

    // Headers primero, después el contenido en chunks acotados
    let header = Response::new(StatusCode::Ok)
        .with_header("Content-Type", mime_type(&path))
        .with_header("Content-Length", &metadata.len().to_string());
    stream.write_all(&header.to_bytes())?;

    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let bytes = file.read(&mut buffer)?;
        if bytes == 0 {
            break;
        }
        stream.write_all(&buffer[..bytes])?;
    }

    ctx.logger.log("200 OK: File served successfully");
    Ok(())
}
