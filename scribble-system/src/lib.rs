mod message;
mod operation_log;
mod roster;

pub use message::*;
pub use operation_log::*;
pub use roster::*;

pub extern crate bincode;
pub extern crate euclid;
pub extern crate serde;
pub extern crate serde_json;
