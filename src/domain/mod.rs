//! Domain layer: the payment block record, the commands that act on it, and
//! the storage port the application layer depends on.

pub mod block;
pub mod command;
pub mod ports;
