use crate::actix_web::Responder;
use crate::admin::{AdminCommand, CanvasDescription};
use crate::server::{ServerCommand, ServerTx};
use actix_web::error;
use actix_web::web::{self, HttpResponse};
use actix_web::Result;
use askama_actix::Template;
use scribble_system::serde_json::json;
use scribble_system::ConnectionId;

#[derive(Template)]
#[template(path = "admin-index.html")]
pub struct AdminIndexTemplate {
    users: Vec<UserRow>,
    history_len: usize,
    redo_len: usize,
}

struct UserRow {
    id: ConnectionId,
    color: String,
}

pub fn configure_admin_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(web::resource("").route(web::get().to(admin_index)))
            .service(web::resource("/status").route(web::get().to(status))),
    );
}

async fn describe_canvas(srv_tx: &ServerTx) -> Result<CanvasDescription> {
    let (tx, rx) = tokio::sync::oneshot::channel::<CanvasDescription>();

    srv_tx
        .clone()
        .send(ServerCommand::AdminCommand(AdminCommand::DescribeCanvas {
            tx,
        }))
        .await
        .map_err(|_| error::ErrorInternalServerError("Internal Server Error"))?;

    rx.await
        .map_err(|_| error::ErrorInternalServerError("Receiver await error"))
}

pub async fn admin_index(srv_tx: web::Data<ServerTx>) -> Result<impl Responder> {
    let description = describe_canvas(srv_tx.get_ref()).await?;

    Ok(AdminIndexTemplate {
        users: description
            .users
            .iter()
            .map(|user| UserRow {
                id: user.id,
                color: user.color.to_hex(),
            })
            .collect(),
        history_len: description.history_len,
        redo_len: description.redo_len,
    })
}

pub async fn status(srv_tx: web::Data<ServerTx>) -> Result<impl Responder> {
    let description = describe_canvas(srv_tx.get_ref()).await?;

    let users = description
        .users
        .iter()
        .map(|user| json!({ "id": user.id, "color": user.color.to_hex() }))
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(json!({
        "users": users,
        "historyLen": description.history_len,
        "redoLen": description.redo_len,
    })))
}
