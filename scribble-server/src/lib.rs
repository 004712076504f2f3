pub extern crate actix_web;

mod admin;
pub mod connection;
pub mod handlers;
mod hub;
pub mod server;
