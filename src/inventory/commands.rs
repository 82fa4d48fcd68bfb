use chrono::NaiveDate;
use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;

use super::ledger::Ledger;
use super::{LedgerCommand, LedgerError};

/// One explicit command per user action, decoupled from whatever frontend
/// issues it.
#[enum_dispatch(LedgerCommand)]
pub enum Command {
    AddItem,
    UpdateItem,
    RecordIncoming,
    RecordOutgoing,
}

pub struct AddItem {
    code: String,
    description: String,
    unit: String,
}

impl AddItem {
    pub fn new(code: &str, description: &str, unit: &str) -> AddItem {
        AddItem {
            code: code.to_string(),
            description: description.to_string(),
            unit: unit.to_string(),
        }
    }
}

impl LedgerCommand for AddItem {
    fn apply(&self, ledger: &mut Ledger) -> Result<(), LedgerError> {
        ledger.add_item(&self.code, &self.description, &self.unit)?;

        Ok(())
    }
}

pub struct UpdateItem {
    code: String,
    description: Option<String>,
    unit: Option<String>,
}

impl UpdateItem {
    pub fn new(code: &str, description: Option<String>, unit: Option<String>) -> UpdateItem {
        UpdateItem {
            code: code.to_string(),
            description,
            unit,
        }
    }
}

impl LedgerCommand for UpdateItem {
    fn apply(&self, ledger: &mut Ledger) -> Result<(), LedgerError> {
        ledger.update_item(&self.code, self.description.as_deref(), self.unit.as_deref())?;

        Ok(())
    }
}

pub struct RecordIncoming {
    item_code: String,
    quantity: Decimal,
    date: Option<NaiveDate>,
    remarks: Option<String>,
}

impl RecordIncoming {
    pub fn new(
        item_code: &str,
        quantity: Decimal,
        date: Option<NaiveDate>,
        remarks: Option<String>,
    ) -> RecordIncoming {
        RecordIncoming {
            item_code: item_code.to_string(),
            quantity,
            date,
            remarks,
        }
    }
}

impl LedgerCommand for RecordIncoming {
    fn apply(&self, ledger: &mut Ledger) -> Result<(), LedgerError> {
        ledger.record_incoming(&self.item_code, self.quantity, self.date, self.remarks.clone())?;

        Ok(())
    }
}

pub struct RecordOutgoing {
    item_code: String,
    quantity: Decimal,
    date: Option<NaiveDate>,
    remarks: Option<String>,
}

impl RecordOutgoing {
    pub fn new(
        item_code: &str,
        quantity: Decimal,
        date: Option<NaiveDate>,
        remarks: Option<String>,
    ) -> RecordOutgoing {
        RecordOutgoing {
            item_code: item_code.to_string(),
            quantity,
            date,
            remarks,
        }
    }
}

impl LedgerCommand for RecordOutgoing {
    fn apply(&self, ledger: &mut Ledger) -> Result<(), LedgerError> {
        ledger.record_outgoing(&self.item_code, self.quantity, self.date, self.remarks.clone())?;

        Ok(())
    }
}
