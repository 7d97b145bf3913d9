//! Type definitions for Safe transactions

mod call;
mod operation;

pub use call::{MultiSendCall, SafeCall};
pub use operation::Operation;
