//! # Acceptor TCP y Despacho por Conexión
//! src/server/tcp.rs
//!
//! El acceptor corre en el thread principal: cada conexión aceptada se
//! encola como [`Task`]. Cuando la cola está llena, `enqueue` bloquea al
//! acceptor y los accepts nuevos se frenan: ese es todo el control de
//! admisión del servidor.
//!
//! El manejo por conexión vive acá también ([`Server::handle_connection`])
//! porque es la otra mitad del mismo protocolo: un read, un despacho por
//! método, una respuesta, cerrar.

use crate::handlers::{static_files, upload};
use crate::http::{Method, RequestHead};
use crate::server::{BoundedQueue, ServerContext, Task, WorkerPool};
use std::fs;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Instant;

/// Tamaño del buffer de captura de un request
pub const BUFFER_SIZE: usize = 1024;

/// Servidor HTTP concurrente de archivos y subidas
pub struct Server {
    ctx: Arc<ServerContext>,
    listener: TcpListener,
    queue: Arc<BoundedQueue<Task>>,
}

impl Server {
    /// Crea los directorios de trabajo y hace bind del listener
    ///
    /// Cualquier error acá es fatal: el proceso no debe arrancar sin
    /// socket ni directorios.
    pub fn bind(ctx: ServerContext) -> io::Result<Self> {
        fs::create_dir_all(&ctx.config.root_dir)?;
        fs::create_dir_all(&ctx.config.upload_dir)?;

        let listener = TcpListener::bind(ctx.config.address())?;
        let queue = Arc::new(BoundedQueue::new(ctx.config.queue_capacity));

        Ok(Self {
            ctx: Arc::new(ctx),
            listener,
            queue,
        })
    }

    /// Dirección real en la que quedó escuchando el listener
    ///
    /// Con puerto 0 el sistema asigna uno efímero; las pruebas lo
    /// consultan por acá.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Contexto compartido del servidor
    ///
    /// Permite observar los contadores desde afuera mientras `run()`
    /// tiene el servidor.
    pub fn context(&self) -> Arc<ServerContext> {
        Arc::clone(&self.ctx)
    }

    /// Arranca los workers y entra al loop de accept
    ///
    /// No retorna en operación normal.
    pub fn run(self) -> io::Result<()> {
        let address = self.local_addr()?;
        println!("[+] Servidor escuchando en {}", address);
        println!("[*] Workers: {} | Cola: {}\n", self.ctx.config.workers, self.queue.capacity());

        WorkerPool::spawn(
            self.ctx.config.workers,
            Arc::clone(&self.queue),
            Arc::clone(&self.ctx),
        );

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    self.ctx.stats.increment_active();
                    self.queue.enqueue(Task { stream });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                    self.ctx.logger.log("Error: Failed to accept connection.");
                }
            }
        }

        Ok(())
    }

    /// Atiende una conexión completa: un read, despacho, respuesta
    ///
    /// El socket es propiedad de esta función y se cierra al salir del
    /// scope, en todos los caminos. Un peer que cierra sin mandar nada
    /// no es un error.
    pub(crate) fn handle_connection(mut stream: TcpStream, ctx: &ServerContext) -> io::Result<()> {
        let start = Instant::now();

        let mut buffer = [0u8; BUFFER_SIZE];
        let bytes_read = stream.read(&mut buffer)?;
        if bytes_read == 0 {
            return Ok(());
        }

        let head = RequestHead::parse(&buffer[..bytes_read]);

        // Despacho fijo: POST exacto va a subidas, todo lo demás se sirve
        // como archivo estático
        let result = match head.method() {
            Method::Post => upload::handle(&mut stream, &buffer[..bytes_read], &head, ctx),
            _ => static_files::handle(&mut stream, &head, ctx),
        };

        let _ = stream.flush();
        ctx.stats.record_request(start.elapsed());

        result
    }
}
