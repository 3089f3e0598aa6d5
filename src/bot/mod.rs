mod convert;
mod event_handler;
mod registrar;
mod responder;

pub mod init;

pub use event_handler::Gateway;
