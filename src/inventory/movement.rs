use chrono::NaiveDate;
use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LedgerError;

/// A single recorded stock movement. The direction is carried by the log the
/// record lives in; quantities are positive for receipts and issues alike.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters, Serialize, Deserialize)]
pub struct Movement {
    #[getset(get_copy = "pub")]
    id: u32,
    #[getset(get = "pub")]
    item_code: String,
    #[getset(get_copy = "pub")]
    quantity: Decimal,
    #[getset(get_copy = "pub")]
    date: Option<NaiveDate>,
    #[getset(get = "pub")]
    remarks: Option<String>,
}

/// Append-only receipt and issue logs sharing one id counter.
///
/// Records are never updated or removed once appended; there is no
/// retraction path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementLog {
    incoming: Vec<Movement>,
    outgoing: Vec<Movement>,
    next_id: u32,
}

impl Default for MovementLog {
    fn default() -> MovementLog {
        MovementLog {
            incoming: Vec::new(),
            outgoing: Vec::new(),
            next_id: 1,
        }
    }
}

impl MovementLog {
    pub fn new() -> MovementLog {
        MovementLog::default()
    }

    /// Appends a receipt and returns its id.
    pub fn record_incoming(
        &mut self,
        item_code: &str,
        quantity: Decimal,
        date: Option<NaiveDate>,
        remarks: Option<String>,
    ) -> Result<u32, LedgerError> {
        let movement = self.build(item_code, quantity, date, remarks)?;
        let id = movement.id;
        self.incoming.push(movement);

        Ok(id)
    }

    /// Appends an issue and returns its id.
    pub fn record_outgoing(
        &mut self,
        item_code: &str,
        quantity: Decimal,
        date: Option<NaiveDate>,
        remarks: Option<String>,
    ) -> Result<u32, LedgerError> {
        let movement = self.build(item_code, quantity, date, remarks)?;
        let id = movement.id;
        self.outgoing.push(movement);

        Ok(id)
    }

    fn build(
        &mut self,
        item_code: &str,
        quantity: Decimal,
        date: Option<NaiveDate>,
        remarks: Option<String>,
    ) -> Result<Movement, LedgerError> {
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::InvalidQuantity);
        }

        let id = self.next_id;
        self.next_id += 1;

        Ok(Movement {
            id,
            item_code: item_code.to_string(),
            quantity,
            date,
            remarks,
        })
    }

    pub fn incoming(&self) -> &[Movement] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[Movement] {
        &self.outgoing
    }
}
