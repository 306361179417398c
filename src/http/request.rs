//! # Parsing de Requests HTTP
//!
//! Este módulo extrae del buffer crudo de una conexión lo único que el
//! servidor necesita para despachar: método, target y una vista tipada de
//! los dos headers reconocidos.
//!
//! ## Formato esperado
//!
//! ```text
//! POST /upload HTTP/1.1\r\n
//! Content-Length: 5\r\n
//! X-Filename: notas.txt\r\n
//! \r\n
//! hello
//! ```
//!
//! El parser es tolerante a propósito: no valida la versión HTTP ni el
//! formato de la request line. Una request line que no se puede parsear
//! produce un target vacío, que el handler de archivos estáticos trata
//! como not-found en vez de fallar. Todos los headers que no sean
//! `Content-Length` o `X-Filename` se ignoran.

/// Métodos HTTP que el servidor distingue
///
/// Solo `POST` (exacto, case-sensitive) va al handler de subidas;
/// cualquier otro token se sirve como archivo estático.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un archivo del directorio raíz
    Get,

    /// POST - Subir un archivo al directorio de uploads
    Post,

    /// Cualquier otro token (HEAD, PUT, basura...)
    Other,
}

impl Method {
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            _ => Method::Other,
        }
    }
}

/// Vista parseada de la cabecera de un request
///
/// Se construye con [`RequestHead::parse`] a partir del primer read de la
/// conexión. Nunca falla: los campos que no se encuentran quedan en su
/// valor por defecto.
#[derive(Debug, Clone)]
pub struct RequestHead {
    /// Método HTTP (primer token de la primera línea)
    method: Method,

    /// Target crudo de la request line (segundo token, "" si no existe)
    target: String,

    /// Valor de `Content-Length` si está presente y es un entero no negativo
    content_length: Option<usize>,

    /// Valor de `X-Filename` si está presente (hasta CR/LF)
    filename: Option<String>,

    /// Índice del primer byte después del separador `\r\n\r\n`
    body_offset: Option<usize>,
}

impl RequestHead {
    /// Parsea la cabecera desde el buffer capturado de la conexión
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use file_server::http::{Method, RequestHead};
    ///
    /// let raw = b"POST /upload HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
    /// let head = RequestHead::parse(raw);
    ///
    /// assert_eq!(head.method(), Method::Post);
    /// assert_eq!(head.content_length(), Some(5));
    /// assert_eq!(&raw[head.body_offset().unwrap()..], b"hello");
    /// ```
    pub fn parse(buffer: &[u8]) -> Self {
        // Ubicar el separador cabecera/body sobre los bytes crudos:
        // el body puede ser binario y no debe pasar por UTF-8
        let body_offset = find_separator(buffer).map(|pos| pos + 4);
        let head_end = body_offset.map(|off| off - 4).unwrap_or(buffer.len());
        let head = String::from_utf8_lossy(&buffer[..head_end]);

        let mut lines = head.split("\r\n");

        // 1. Request line: METHOD TARGET VERSION
        let request_line = lines.next().unwrap_or("");
        let mut parts = request_line.split_whitespace();
        let method = Method::from_token(parts.next().unwrap_or(""));
        let target = parts.next().unwrap_or("").to_string();

        // 2. Headers de interés; el resto se ignora
        let mut content_length = None;
        let mut filename = None;

        for line in lines {
            if line.trim().is_empty() {
                break;
            }
            if let Some(colon_pos) = line.find(':') {
                let name = line[..colon_pos].trim();
                let value = line[colon_pos + 1..].trim();

                if name.eq_ignore_ascii_case("Content-Length") {
                    content_length = value.parse::<usize>().ok();
                } else if name.eq_ignore_ascii_case("X-Filename") {
                    filename = Some(value.to_string());
                }
            }
        }

        RequestHead {
            method,
            target,
            content_length,
            filename,
            body_offset,
        }
    }

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el target crudo de la request line
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene el valor parseado de `Content-Length`
    pub fn content_length(&self) -> Option<usize> {
        self.content_length
    }

    /// Obtiene el valor de `X-Filename`
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Índice del primer byte del body dentro del buffer original
    pub fn body_offset(&self) -> Option<usize> {
        self.body_offset
    }
}

/// Busca el separador `\r\n\r\n` en el buffer crudo
fn find_separator(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET /index.html HTTP/1.1\r\n\r\n";
        let head = RequestHead::parse(raw);

        assert_eq!(head.method(), Method::Get);
        assert_eq!(head.target(), "/index.html");
        assert_eq!(head.content_length(), None);
        assert_eq!(head.filename(), None);
    }

    #[test]
    fn test_parse_root_target() {
        let raw = b"GET / HTTP/1.1\r\n\r\n";
        let head = RequestHead::parse(raw);

        assert_eq!(head.target(), "/");
    }

    #[test]
    fn test_post_is_case_sensitive() {
        // Solo "POST" exacto se reconoce como subida
        let head = RequestHead::parse(b"POST /upload HTTP/1.1\r\n\r\n");
        assert_eq!(head.method(), Method::Post);

        let head = RequestHead::parse(b"post /upload HTTP/1.1\r\n\r\n");
        assert_eq!(head.method(), Method::Other);
    }

    #[test]
    fn test_unknown_method() {
        let head = RequestHead::parse(b"DELETE /x HTTP/1.1\r\n\r\n");
        assert_eq!(head.method(), Method::Other);
        assert_eq!(head.target(), "/x");
    }

    #[test]
    fn test_parse_content_length() {
        let raw = b"POST /upload HTTP/1.1\r\nContent-Length: 42\r\n\r\n";
        let head = RequestHead::parse(raw);

        assert_eq!(head.content_length(), Some(42));
    }

    #[test]
    fn test_content_length_case_insensitive_name() {
        let raw = b"POST /upload HTTP/1.1\r\ncontent-length: 7\r\n\r\n";
        let head = RequestHead::parse(raw);

        assert_eq!(head.content_length(), Some(7));
    }

    #[test]
    fn test_content_length_invalid_value() {
        // Un valor que no es entero no negativo cuenta como ausente
        let head = RequestHead::parse(b"POST / HTTP/1.1\r\nContent-Length: abc\r\n\r\n");
        assert_eq!(head.content_length(), None);

        let head = RequestHead::parse(b"POST / HTTP/1.1\r\nContent-Length: -5\r\n\r\n");
        assert_eq!(head.content_length(), None);
    }

    #[test]
    fn test_parse_filename() {
        let raw = b"POST /upload HTTP/1.1\r\nContent-Length: 3\r\nX-Filename: notas.txt\r\n\r\nabc";
        let head = RequestHead::parse(raw);

        assert_eq!(head.filename(), Some("notas.txt"));
        assert_eq!(head.content_length(), Some(3));
    }

    #[test]
    fn test_other_headers_ignored() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost\r\nUser-Agent: curl\r\n\r\n";
        let head = RequestHead::parse(raw);

        assert_eq!(head.content_length(), None);
        assert_eq!(head.filename(), None);
    }

    #[test]
    fn test_body_offset() {
        let raw = b"POST /upload HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let head = RequestHead::parse(raw);

        let offset = head.body_offset().unwrap();
        assert_eq!(&raw[offset..], b"hello");
    }

    #[test]
    fn test_no_separator_no_body_offset() {
        let raw = b"POST /upload HTTP/1.1\r\nContent-Length: 5\r\n";
        let head = RequestHead::parse(raw);

        assert_eq!(head.body_offset(), None);
    }

    #[test]
    fn test_binary_body_does_not_break_head() {
        let mut raw = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n".to_vec();
        raw.extend_from_slice(&[0x00, 0xFF, 0x89, 0x50]);
        let head = RequestHead::parse(&raw);

        assert_eq!(head.method(), Method::Post);
        assert_eq!(head.content_length(), Some(4));
        assert_eq!(&raw[head.body_offset().unwrap()..], &[0x00, 0xFF, 0x89, 0x50]);
    }

    #[test]
    fn test_garbage_yields_empty_target() {
        let head = RequestHead::parse(b"\x00\x01\x02\x03garbage");

        assert_eq!(head.method(), Method::Other);
        assert_eq!(head.target(), "");
    }

    #[test]
    fn test_empty_buffer() {
        let head = RequestHead::parse(b"");

        assert_eq!(head.method(), Method::Other);
        assert_eq!(head.target(), "");
        assert_eq!(head.body_offset(), None);
    }

    #[test]
    fn test_method_without_target() {
        let head = RequestHead::parse(b"GET\r\n\r\n");

        assert_eq!(head.method(), Method::Get);
        assert_eq!(head.target(), "");
    }
}
