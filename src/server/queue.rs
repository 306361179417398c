//! # Cola Acotada de Tareas
//!
//! Implementa la cola FIFO de capacidad fija que conecta al acceptor con
//! el pool de workers: el patrón clásico de monitor con un mutex y dos
//! variables de condición (not_empty / not_full).
//!
//! La cola es el único mecanismo de backpressure del servidor: cuando los
//! workers y la cola están saturados, `enqueue` bloquea al acceptor y los
//! accepts nuevos se frenan solos.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// Cola FIFO acotada con inserción y extracción bloqueantes
///
/// Es genérica para poder probarla con valores simples; el servidor la usa
/// con [`Task`](crate::server::Task).
///
/// Invariantes:
/// - `0 <= len() <= capacity()`
/// - orden de salida = orden de llegada (FIFO estricto)
/// - ningún elemento se pierde ni se duplica
pub struct BoundedQueue<T> {
    /// Buffer interno protegido por el mutex del monitor
    inner: Mutex<VecDeque<T>>,

    /// Señal para consumidores esperando elementos
    not_empty: Condvar,

    /// Señal para productores esperando espacio
    not_full: Condvar,

    /// Capacidad máxima, fija durante toda la vida del proceso
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Crea una nueva cola con la capacidad indicada (debe ser > 0)
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedQueue capacity must be > 0");
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// Encola un elemento al final
    ///
    /// Bloquea al caller mientras la cola esté llena y despierta a un
    /// consumidor en espera al insertar.
    pub fn enqueue(&self, item: T) {
        let mut queue = self.inner.lock().unwrap();
        while queue.len() == self.capacity {
            queue = self.not_full.wait(queue).unwrap();
        }
        queue.push_back(item);
        self.not_empty.notify_one();
    }

    /// Desencola el elemento del frente
    ///
    /// Bloquea al caller mientras la cola esté vacía y despierta a un
    /// productor en espera al extraer.
    pub fn dequeue(&self) -> T {
        let mut queue = self.inner.lock().unwrap();
        loop {
            if let Some(item) = queue.pop_front() {
                self.not_full.notify_one();
                return item;
            }
            queue = self.not_empty.wait(queue).unwrap();
        }
    }

    /// Retorna el tamaño actual de la cola
    pub fn len(&self) -> usize {
        let queue = self.inner.lock().unwrap();
        queue.len()
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retorna la capacidad máxima
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
