use actix::{Actor, ActorContext, AsyncContext, Handler, Message, Running, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use actix_web_actors::ws::{CloseCode, CloseReason};

use scribble_system::{bincode, CanvasCommand, CanvasEvent, ConnectionId, User};

use crate::hub::ConnectionTx;
use crate::server::{ServerCommand, ServerTx};

#[derive(Debug)]
pub enum ConnectionCommand {
    Connect { tx: ConnectionTx },
    Disconnect { from: ConnectionId },
    CanvasCommand { from: ConnectionId, command: CanvasCommand },
}

#[derive(Debug)]
pub enum ConnectionEvent {
    /// Internal acknowledgement carrying the registered identity. Consumed
    /// by the actor, never serialized to the wire.
    Connected { user: User },
    CanvasEvent(CanvasEvent),
}

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ConnectionEvent);

enum ConnectionState {
    Idle,
    Connected(ConnectionId),
}

struct ConnectionActor {
    state: ConnectionState,
    srv_tx: ServerTx,
}

impl ConnectionActor {
    fn send_to_server(&mut self, command: ServerCommand) {
        if let Err(err) = self.srv_tx.try_send(command) {
            log::warn!("Server inbox rejected a command: {}", err);
        }
    }
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<ConnectionEvent>(32);

        if self
            .srv_tx
            .try_send(ServerCommand::ConnectionCommand(ConnectionCommand::Connect { tx }))
            .is_err()
        {
            log::error!("Server inbox unavailable; refusing new connection");
            ctx.stop();
            return;
        }

        let addr = ctx.address().recipient();

        tokio::spawn(async move {
            let addr = addr;
            log::debug!("connection green thread - started");
            while let Some(event) = rx.recv().await {
                if addr.try_send(ConnectionActorMessage(event)).is_err() {
                    // Mailbox full or actor already gone. The next full
                    // history push repairs anything dropped here.
                    log::warn!("connection mailbox rejected an event");
                }
            }
            log::debug!("connection green thread - terminated");
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        if let ConnectionState::Connected(from) = self.state {
            self.send_to_server(ServerCommand::ConnectionCommand(
                ConnectionCommand::Disconnect { from },
            ));
        }

        Running::Stop
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Binary(bin)) => {
                log::debug!("Ingress size: {}", bin.len());
                if let ConnectionState::Connected(from) = self.state {
                    if let Ok(command) = bincode::deserialize::<CanvasCommand>(&bin) {
                        log::debug!("Ingress {:?}", command);
                        self.send_to_server(ServerCommand::ConnectionCommand(
                            ConnectionCommand::CanvasCommand { from, command },
                        ));
                    } else {
                        ctx.close(Some(CloseReason {
                            code: CloseCode::Invalid,
                            description: None,
                        }));
                    }
                }
            }
            Ok(ws::Message::Close(_)) => {
                if let ConnectionState::Connected(from) = self.state {
                    self.send_to_server(ServerCommand::ConnectionCommand(
                        ConnectionCommand::Disconnect { from },
                    ));
                    self.state = ConnectionState::Idle;
                }
                ctx.stop();
            }
            _ => (),
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        let connection_event = &msg.0;
        log::debug!("Egress {:?}", connection_event);
        match connection_event {
            ConnectionEvent::Connected { user } => {
                self.state = ConnectionState::Connected(user.id);
            }
            ConnectionEvent::CanvasEvent(event) => {
                let serialized = bincode::serialize(event).expect("must succeed");
                ctx.binary(serialized);
            }
        }
    }
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    ws::start(
        ConnectionActor {
            srv_tx: srv_tx.get_ref().clone(),
            state: ConnectionState::Idle,
        },
        &req,
        stream,
    )
}
