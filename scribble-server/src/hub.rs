use std::collections::HashMap;

use scribble_system::{CanvasEvent, ConnectionId};

use crate::connection::ConnectionEvent;

pub type ConnectionTx = tokio::sync::mpsc::Sender<ConnectionEvent>;

/// Owns every live connection sender. Callers only ever address "one",
/// "everyone" or "everyone except the origin"; the membership itself is
/// not observable from outside.
///
/// All sends are fire-and-forget: a full or closed receiver drops that one
/// event, the others still get theirs, and the next full-history push or
/// reconnect repairs whatever a drop left behind.
pub struct BroadcastHub {
    connection_txs: HashMap<ConnectionId, ConnectionTx>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            connection_txs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, connection_id: ConnectionId, tx: ConnectionTx) {
        self.connection_txs.insert(connection_id, tx);
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionTx> {
        self.connection_txs.remove(connection_id)
    }

    pub fn send_to(&mut self, to: &ConnectionId, event: ConnectionEvent) {
        match self.connection_txs.get_mut(to) {
            Some(tx) => {
                if let Err(err) = tx.try_send(event) {
                    log::warn!("Dropping event for connection {}: {}", to, err);
                }
            }
            None => {
                log::warn!("Tried to send to unknown connection: {}", to);
            }
        }
    }

    pub fn send_to_all(&mut self, event: CanvasEvent) {
        for (connection_id, tx) in self.connection_txs.iter_mut() {
            if let Err(err) = tx.try_send(ConnectionEvent::CanvasEvent(event.clone())) {
                log::warn!("Dropping event for connection {}: {}", connection_id, err);
            }
        }
    }

    pub fn send_to_others(&mut self, origin: &ConnectionId, event: CanvasEvent) {
        for (connection_id, tx) in self.connection_txs.iter_mut() {
            if connection_id == origin {
                continue;
            }
            if let Err(err) = tx.try_send(ConnectionEvent::CanvasEvent(event.clone())) {
                log::warn!("Dropping event for connection {}: {}", connection_id, err);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.connection_txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connection_txs.is_empty()
    }
}
