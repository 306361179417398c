//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP que el servidor habla,
//! sin librerías de alto nivel:
//!
//! - Parsing tolerante de la cabecera del request
//! - Construcción de responses
//! - Códigos de estado
//!
//! El protocolo no se negocia ni se valida: una conexión, un request, una
//! respuesta, y la conexión se cierra. No hay keep-alive ni chunked
//! transfer encoding.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /ruta HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <html>...</html>
//! ```

pub mod request;   // Parsing de la cabecera del request
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, RequestHead};
pub use response::Response;
pub use status::StatusCode;
