//! # Subida de Archivos
//! src/handlers/upload.rs
//!
//! Maneja los requests POST: el body crudo, delimitado por
//! `Content-Length`, se escribe en el directorio de uploads con
//! recuperación de escrituras cortas.
//!
//! Mapeo de fallos, en orden de verificación:
//!
//! 1. sin separador `\r\n\r\n` → 400
//! 2. sin `Content-Length` parseable → 411
//! 3. `X-Filename` con separadores o `..` → 400
//! 4. no se puede crear el destino → 500
//! 5. error de escritura o largo final distinto al declarado → 500
//!
//! Un archivo parcialmente escrito no se borra al fallar: queda como
//! artefacto, igual que en el resto del manejo de errores de filesystem.

use crate::http::{RequestHead, Response, StatusCode};
use crate::server::ServerContext;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

/// Tamaño de chunk para completar la lectura del body
const CHUNK_SIZE: usize = 1024;

/// Nombre de destino cuando el cliente no manda `X-Filename`
const DEFAULT_FILENAME: &str = "uploaded_file";

/// Maneja un request POST completo sobre la conexión
///
/// `buffer` es la cabecera ya capturada (primer read de la conexión).
/// Si el body declarado no llegó completo en esa primera lectura, se
/// siguen leyendo bytes del socket hasta juntar `Content-Length` o EOF;
/// la verificación final de largo exacto convierte un body corto en 500
/// en vez de un archivo truncado en silencio.
pub fn handle<S: Read + Write>(
    stream: &mut S,
    buffer: &[u8],
    head: &RequestHead,
    ctx: &ServerContext,
) -> io::Result<()> {
    // 1. El body empieza después del separador en blanco
    let body_offset = match head.body_offset() {
        Some(offset) => offset,
        None => {
            ctx.logger.log("400 Bad Request: POST request missing body.");
            stream.write_all(&Response::empty(StatusCode::BadRequest).to_bytes())?;
            return Ok(());
        }
    };

    // 2. Largo declarado del body
    let content_length = match head.content_length() {
        Some(length) => length,
        None => {
            ctx.logger
                .log("411 Length Required: POST request missing Content-Length header.");
            stream.write_all(&Response::empty(StatusCode::LengthRequired).to_bytes())?;
            return Ok(());
        }
    };

    // 3. Nombre de destino: el contención al directorio de uploads es el
    // mismo contrato que el raíz de archivos estáticos, así que nada de
    // separadores ni referencias al padre
    let filename = head.filename().unwrap_or(DEFAULT_FILENAME);
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        ctx.logger.log("400 Bad Request: Invalid upload filename.");
        stream.write_all(&Response::empty(StatusCode::BadRequest).to_bytes())?;
        return Ok(());
    }

    // 4. Juntar el body: lo capturado primero, el resto del socket después
    let captured = &buffer[body_offset..];
    let mut body = captured[..captured.len().min(content_length)].to_vec();

    while body.len() < content_length {
        let mut chunk = [0u8; CHUNK_SIZE];
        let bytes = stream.read(&mut chunk)?;
        if bytes == 0 {
            break; // EOF: el largo final se verifica abajo
        }
        let needed = content_length - body.len();
        body.extend_from_slice(&chunk[..bytes.min(needed)]);
    }

    // 5. Abrir el destino para escritura binaria
    let _ = fs::create_dir_all(&ctx.config.upload_dir);
    let destination = Path::new(&ctx.config.upload_dir).join(filename);

    let mut file = match File::create(&destination) {
        Ok(file) => file,
        Err(_) => {
            ctx.logger
                .log("500 Internal Server Error: Failed to create upload file.");
            stream.write_all(&Response::empty(StatusCode::InternalServerError).to_bytes())?;
            return Ok(());
        }
    };

    // 6. Loop de escritura con semántica de short-write: una sola llamada
    // puede transferir menos bytes de los pedidos sin ser error
    let mut total_written = 0usize;
    while total_written < body.len() {
        match file.write(&body[total_written..]) {
            Ok(0) => break, // fuente agotada, el chequeo final decide
            Ok(bytes) => total_written += bytes,
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(_) => {
                ctx.logger
                    .log("500 Internal Server Error: Failed to write file.");
                stream.write_all(&Response::empty(StatusCode::InternalServerError).to_bytes())?;
                return Ok(());
            }
        }
    }

    // 7. El total escrito debe coincidir exacto con lo declarado;
    // el archivo parcial no se limpia
    if total_written != content_length {
        ctx.logger
            .log("500 Internal Server Error: Failed to write complete file.");
        stream.write_all(&Response::empty(StatusCode::InternalServerError).to_bytes())?;
        return Ok(());
    }

    // 8. Confirmación fija
    let response = Response::text(StatusCode::Ok, "Upload Success!");
    stream.write_all(&response.to_bytes())?;
    ctx.logger
        .log(&format!("File uploaded successfully: {}", filename));
    Ok(())
}
