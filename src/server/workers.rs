//! # Pool de Workers
//! src/server/workers.rs
//!
//! Un número fijo de threads de larga vida, arrancados una sola vez en el
//! boot. Cada worker corre un loop sin fin: desencolar una tarea,
//! atenderla completa, repetir. Nadie espera el resultado: el manejo es
//! fire-and-forget por conexión.
//!
//! Un fallo atendiendo una tarea no tumba al worker ni filtra la
//! conexión: el error se reporta y el loop sigue con la próxima tarea.
//! El socket se cierra exactamente una vez (drop de la tarea) y el
//! contador de conexiones activas se decrementa exactamente una vez, en
//! todos los caminos.

use crate::server::{BoundedQueue, Server, ServerContext, Task};
use std::sync::Arc;
use std::thread;

/// Pool fijo de workers sobre la cola de conexiones
pub struct WorkerPool;

impl WorkerPool {
    /// Arranca `count` workers que atienden tareas de `queue`
    ///
    /// Los workers no terminan en operación normal; los handles no se
    /// retienen.
    pub fn spawn(count: usize, queue: Arc<BoundedQueue<Task>>, ctx: Arc<ServerContext>) {
        for i in 0..count {
            let queue = Arc::clone(&queue);
            let ctx = Arc::clone(&ctx);

            thread::Builder::new()
                .name(format!("worker-{}", i))
                .spawn(move || Self::worker_loop(i, queue, ctx))
                .expect("Failed to spawn worker thread");
        }
    }

    /// Loop principal de un worker
    fn worker_loop(id: usize, queue: Arc<BoundedQueue<Task>>, ctx: Arc<ServerContext>) {
        loop {
            let task = queue.dequeue();

            if let Err(e) = Server::handle_connection(task.stream, &ctx) {
                eprintln!("   ❌ Error en worker-{}: {}", id, e);
            }

            // La tarea ya soltó el socket; el contador baja exactamente
            // una vez por conexión, haya salido bien o mal
            ctx.stats.decrement_active();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::Logger;
    use crate::stats::StatsCollector;
    use std::fs;
    use std::io::{Read, Write};
    use std::net::{Shutdown, TcpListener, TcpStream};
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_context(scratch: &TempDir) -> Arc<ServerContext> {
        let mut config = Config::default();
        config.root_dir = scratch.path().join("www").to_string_lossy().to_string();
        config.upload_dir = scratch.path().join("upload").to_string_lossy().to_string();

        Arc::new(ServerContext {
            config,
            logger: Logger::open(scratch.path().join("server.log")).unwrap(),
            stats: StatsCollector::new(),
        })
    }

    /// Simula al acceptor: conecta un cliente y encola la tarea aceptada
    fn feed_task(
        listener: &TcpListener,
        queue: &Arc<BoundedQueue<Task>>,
        ctx: &Arc<ServerContext>,
        request: &[u8],
    ) -> TcpStream {
        let mut client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (server_side, _) = listener.accept().unwrap();

        client.write_all(request).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        ctx.stats.increment_active();
        queue.enqueue(Task { stream: server_side });
        client
    }

    #[test]
    fn test_workers_process_tasks_and_balance_stats() {
        let scratch = TempDir::new().unwrap();
        let ctx = test_context(&scratch);
        fs::create_dir_all(&ctx.config.root_dir).unwrap();
        fs::write(
            std::path::Path::new(&ctx.config.root_dir).join("index.html"),
            "hola",
        )
        .unwrap();

        let queue = Arc::new(BoundedQueue::new(4));
        WorkerPool::spawn(2, Arc::clone(&queue), Arc::clone(&ctx));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();

        let mut client = feed_task(&listener, &queue, &ctx, b"GET /index.html HTTP/1.1\r\n\r\n");
        let mut response = String::new();
        client.read_to_string(&mut response).unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.ends_with("hola"));

        // El contador vuelve a su valor previo al request
        thread::sleep(Duration::from_millis(100));
        assert_eq!(ctx.stats.active_connections(), 0);
        assert_eq!(ctx.stats.snapshot().total_requests, 1);
    }

    #[test]
    fn test_worker_survives_bad_task() {
        let scratch = TempDir::new().unwrap();
        let ctx = test_context(&scratch);
        fs::create_dir_all(&ctx.config.root_dir).unwrap();
        fs::write(
            std::path::Path::new(&ctx.config.root_dir).join("index.html"),
            "sigo vivo",
        )
        .unwrap();

        let queue = Arc::new(BoundedQueue::new(4));
        // Un solo worker: si la tarea mala lo tumbara, la segunda
        // nunca se atendería
        WorkerPool::spawn(1, Arc::clone(&queue), Arc::clone(&ctx));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();

        // Tarea 1: el peer cierra sin mandar nada
        let bad_client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (server_side, _) = listener.accept().unwrap();
        drop(bad_client);
        ctx.stats.increment_active();
        queue.enqueue(Task { stream: server_side });

        // Tarea 2: un GET normal debe salir bien después
        let mut client = feed_task(&listener, &queue, &ctx, b"GET / HTTP/1.1\r\n\r\n");
        let mut response = String::new();
        client.read_to_string(&mut response).unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.ends_with("sigo vivo"));

        thread::sleep(Duration::from_millis(100));
        assert_eq!(ctx.stats.active_connections(), 0);
    }
}
