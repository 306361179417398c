//! # Relay TCP Round-Robin
//! src/bin/relay.rs
//!
//! Programa aparte del servidor de archivos: un relay one-shot que
//! reenvía un único par request/respuesta a uno de varios backends
//! fijos, rotando en round-robin.
//!
//! No parsea protocolo, no reintenta y no mantiene la conexión: un read
//! del cliente hacia el backend, un read del backend hacia el cliente,
//! y ambos sockets se cierran.

use clap::Parser;
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Tamaño del buffer de reenvío en cada dirección
const BUFFER_SIZE: usize = 1024;

/// Configuración del relay
#[derive(Debug, Clone, Parser)]
#[command(name = "relay")]
#[command(about = "Relay TCP one-shot con selección round-robin de backend")]
#[command(version = "0.1.0")]
struct RelayConfig {
    /// Dirección en la que escucha el relay
    #[arg(long, default_value = "0.0.0.0:8080", env = "RELAY_LISTEN")]
    listen: String,

    /// Backends entre los que se rota (host:puerto, repetible)
    #[arg(long = "backend", default_values_t = [
        "127.0.0.1:9100".to_string(),
        "127.0.0.1:9101".to_string(),
        "127.0.0.1:9102".to_string(),
    ])]
    backends: Vec<String>,
}

/// Selección round-robin sobre la lista fija de backends
struct Balancer {
    backends: Vec<String>,
    next: AtomicUsize,
}

impl Balancer {
    fn new(backends: Vec<String>) -> Self {
        assert!(!backends.is_empty(), "Balancer requires at least one backend");
        Self {
            backends,
            next: AtomicUsize::new(0),
        }
    }

    /// Retorna el siguiente backend y avanza el índice
    fn next_backend(&self) -> &str {
        let index = self.next.fetch_add(1, Ordering::SeqCst) % self.backends.len();
        &self.backends[index]
    }
}

/// Reenvía un único par request/respuesta entre cliente y backend
fn forward_once(client: &mut TcpStream, backend_addr: &str) -> io::Result<()> {
    let mut backend = TcpStream::connect(backend_addr)?;
    let mut buffer = [0u8; BUFFER_SIZE];

    // Cliente → backend
    let bytes = client.read(&mut buffer)?;
    if bytes > 0 {
        backend.write_all(&buffer[..bytes])?;
    }

    // Backend → cliente
    let bytes = backend.read(&mut buffer)?;
    if bytes > 0 {
        client.write_all(&buffer[..bytes])?;
    }

    Ok(())
}

/// Loop de accept: un thread por cliente, un reenvío por conexión
fn serve(listener: TcpListener, balancer: Arc<Balancer>) -> io::Result<()> {
    println!("[+] Relay escuchando en {}", listener.local_addr()?);

    for stream in listener.incoming() {
        match stream {
            Ok(mut client) => {
                let balancer = Arc::clone(&balancer);
                thread::spawn(move || {
                    let backend = balancer.next_backend();
                    if let Err(e) = forward_once(&mut client, backend) {
                        eprintln!("   ❌ Error reenviando a {}: {}", backend, e);
                    }
                });
            }
            Err(e) => {
                eprintln!("   ❌ Error al aceptar conexión: {}", e);
            }
        }
    }

    Ok(())
}

fn main() {
    let config = RelayConfig::parse();

    if config.backends.is_empty() {
        eprintln!("💥 Se necesita al menos un backend");
        std::process::exit(1);
    }

    println!("=================================");
    println!("  TCP Round-Robin Relay");
    println!("=================================\n");
    println!("⚙️  Backends:");
    for backend in &config.backends {
        println!("   - {}", backend);
    }
    println!();

    let listener = match TcpListener::bind(&config.listen) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("💥 Error fatal en el bind: {}", e);
            std::process::exit(1);
        }
    };

    let balancer = Arc::new(Balancer::new(config.backends));

    if let Err(e) = serve(listener, balancer) {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Shutdown;

    #[test]
    fn test_balancer_cycles_in_order() {
        let balancer = Balancer::new(vec![
            "a:1".to_string(),
            "b:2".to_string(),
            "c:3".to_string(),
        ]);

        assert_eq!(balancer.next_backend(), "a:1");
        assert_eq!(balancer.next_backend(), "b:2");
        assert_eq!(balancer.next_backend(), "c:3");
        assert_eq!(balancer.next_backend(), "a:1");
    }

    #[test]
    fn test_balancer_single_backend() {
        let balancer = Balancer::new(vec!["solo:9100".to_string()]);
        assert_eq!(balancer.next_backend(), "solo:9100");
        assert_eq!(balancer.next_backend(), "solo:9100");
    }

    #[test]
    #[should_panic(expected = "at least one backend")]
    fn test_balancer_empty_panics() {
        let _ = Balancer::new(Vec::new());
    }

    /// Backend de mentira: responde con su etiqueta a cada conexión
    fn mock_backend(label: &'static str, connections: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        thread::spawn(move || {
            for _ in 0..connections {
                let (mut stream, _) = listener.accept().unwrap();
                let mut buffer = [0u8; BUFFER_SIZE];
                let _ = stream.read(&mut buffer).unwrap();
                stream.write_all(label.as_bytes()).unwrap();
            }
        });

        addr
    }

    #[test]
    fn test_relay_alternates_backends() {
        let backend_a = mock_backend("respuesta-a", 2);
        let backend_b = mock_backend("respuesta-b", 2);

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let relay_addr = listener.local_addr().unwrap();
        let balancer = Arc::new(Balancer::new(vec![backend_a, backend_b]));

        thread::spawn(move || serve(listener, balancer));

        let ask = |expected: &str| {
            let mut client = TcpStream::connect(relay_addr).unwrap();
            client.write_all(b"ping").unwrap();
            client.shutdown(Shutdown::Write).unwrap();

            let mut response = String::new();
            client.read_to_string(&mut response).unwrap();
            assert_eq!(response, expected);
        };

        // El relay rota: primera conexión al backend a, segunda al b...
        ask("respuesta-a");
        ask("respuesta-b");
        ask("respuesta-a");
        ask("respuesta-b");
    }
}
