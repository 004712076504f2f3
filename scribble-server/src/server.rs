use tokio::sync::mpsc::{channel, Sender};

use scribble_system::{CanvasCommand, CanvasEvent, ConnectionId, Operation, OperationLog, Roster};

use super::connection::{ConnectionCommand, ConnectionEvent};
use crate::admin::{AdminCommand, CanvasDescription};
use crate::hub::BroadcastHub;

pub type ServerTx = Sender<ServerCommand>;

#[derive(Debug)]
pub enum ServerCommand {
    ConnectionCommand(ConnectionCommand),
    AdminCommand(AdminCommand),
}

/// Owns all authoritative canvas state. Exactly one instance lives inside
/// the task spawned by `spawn_server`, and every command runs to completion
/// before the next one starts. That arrival order is the commit order; no
/// other synchronization exists or is needed.
struct Server {
    roster: Roster,
    log: OperationLog,
    connections: BroadcastHub,
}

impl Server {
    fn new() -> Self {
        Self {
            roster: Roster::new(),
            log: OperationLog::new(),
            connections: BroadcastHub::new(),
        }
    }

    fn handle_command(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::ConnectionCommand(command) => self.handle_connection_command(command),
            ServerCommand::AdminCommand(command) => self.handle_admin_command(command),
        }
    }

    fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect { tx } => {
                let user = self.roster.register();
                self.connections.insert(user.id, tx);
                self.connections
                    .send_to(&user.id, ConnectionEvent::Connected { user: user.clone() });

                // Resync runs before anything else can reach this
                // connection: identity first, then the applied history,
                // then the roster including the newcomer.
                self.connections.send_to(
                    &user.id,
                    ConnectionEvent::CanvasEvent(CanvasEvent::Registered { user: user.clone() }),
                );
                self.connections.send_to(
                    &user.id,
                    ConnectionEvent::CanvasEvent(CanvasEvent::HistoryInit {
                        operations: self.log.snapshot(),
                    }),
                );
                self.connections.send_to(
                    &user.id,
                    ConnectionEvent::CanvasEvent(CanvasEvent::UserList {
                        users: self.roster.list().to_vec(),
                    }),
                );
                self.connections
                    .send_to_others(&user.id, CanvasEvent::UserJoined { user: user.clone() });

                log::info!("User connected: {}", user.id);
            }
            ConnectionCommand::Disconnect { from } => {
                if self.connections.remove(&from).is_some() {
                    if self.roster.unregister(&from).is_some() {
                        self.connections
                            .send_to_all(CanvasEvent::UserLeft { user_id: from });
                        log::info!("User disconnected: {}", from);
                    }
                }
            }
            ConnectionCommand::CanvasCommand { from, command } => {
                self.handle_canvas_command(&from, command)
            }
        }
    }

    fn handle_canvas_command(&mut self, from: &ConnectionId, command: CanvasCommand) {
        let user = match self.roster.get(from) {
            Some(user) => user.clone(),
            None => {
                log::warn!("Dropping a command from unknown connection: {}", from);
                return;
            }
        };

        match command {
            CanvasCommand::StrokeStart(data) => {
                self.connections
                    .send_to_others(from, CanvasEvent::StrokeStarted { user, data });
            }
            CanvasCommand::StrokeDraw(data) => {
                self.connections
                    .send_to_others(from, CanvasEvent::StrokeDrawn { user, data });
            }
            CanvasCommand::CursorMove(data) => {
                self.connections
                    .send_to_others(from, CanvasEvent::CursorMoved { user, data });
            }
            CanvasCommand::StrokeEnd(data) => match data.validate() {
                Ok(()) => {
                    // Commit without broadcast. Peers already rendered the
                    // whole stroke through the relay; the log exists for
                    // resyncs and undo/redo.
                    self.log.commit(Operation::Stroke { user, data });
                }
                Err(error) => {
                    log::warn!("Rejecting a stroke from {}: {:?}", from, error);
                    self.connections.send_to(
                        from,
                        ConnectionEvent::CanvasEvent(CanvasEvent::Rejected { error }),
                    );
                }
            },
            CanvasCommand::Undo => {
                if self.log.undo().is_some() {
                    self.broadcast_history();
                } else {
                    log::debug!("Undo on empty history: ignored");
                }
            }
            CanvasCommand::Redo => {
                if self.log.redo().is_some() {
                    self.broadcast_history();
                } else {
                    log::debug!("Redo on empty stack: ignored");
                }
            }
        }
    }

    /// Undo and redo restructure the applied history, so every connection,
    /// including the requester, re-renders from the same snapshot.
    fn broadcast_history(&mut self) {
        self.connections.send_to_all(CanvasEvent::HistoryUpdate {
            operations: self.log.snapshot(),
        });
    }

    fn handle_admin_command(&mut self, command: AdminCommand) {
        match command {
            AdminCommand::DescribeCanvas { tx } => {
                let description = CanvasDescription {
                    users: self.roster.list().to_vec(),
                    history_len: self.log.history_len(),
                    redo_len: self.log.redo_len(),
                };
                if tx.send(description).is_err() {
                    log::warn!("Admin requester went away before the reply");
                }
            }
        }
    }
}

pub fn spawn_server() -> ServerTx {
    let (srv_tx, mut srv_rx) = channel::<ServerCommand>(16);

    tokio::spawn(async move {
        let mut server = Box::new(Server::new());

        while let Some(command) = srv_rx.recv().await {
            server.handle_command(command);
        }
    });

    return srv_tx;
}
