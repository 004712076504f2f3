use actix_cors::Cors;
use actix_web::{App, HttpServer};

use scribble_server::handlers;
use scribble_server::server::spawn_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let srv_tx = spawn_server();

    log::info!("Listening on 127.0.0.1:{}", port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .data(srv_tx.clone())
            .configure(handlers::root)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
