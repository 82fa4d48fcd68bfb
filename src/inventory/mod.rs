use enum_dispatch::enum_dispatch;
use thiserror::Error;

pub mod commands;
pub mod item;
pub mod ledger;
pub mod movement;

#[cfg(test)]
mod ledger_tests;

use commands::{AddItem, Command, RecordIncoming, RecordOutgoing, UpdateItem};
use ledger::Ledger;

#[derive(Debug, PartialEq, Error)]
pub enum LedgerError {
    #[error("item code `{0}` already exists")]
    DuplicateItem(String),
    #[error("item code `{0}` not found")]
    ItemNotFound(String),
    #[error("movement references unknown item code `{0}`")]
    UnknownItem(String),
    #[error("item code must not be empty")]
    EmptyItemCode,
    #[error("quantity must be greater than zero")]
    InvalidQuantity,
}

#[enum_dispatch]
pub trait LedgerCommand {
    fn apply(&self, ledger: &mut Ledger) -> Result<(), LedgerError>;
}
