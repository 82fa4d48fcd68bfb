use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::commands::Command;
use super::item::{Item, ItemCatalog};
use super::movement::{Movement, MovementLog};
use super::{LedgerCommand, LedgerError};

const PRECISION: u32 = 4;

/// Whether movements may reference codes missing from the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferentialIntegrity {
    /// Movements are accepted as-is; uncataloged codes simply contribute to
    /// no report row.
    #[default]
    Permissive,
    /// Recording a movement for an uncataloged code fails with
    /// [`LedgerError::UnknownItem`].
    Strict,
}

/// Reported stock position for one item.
///
/// `balance` adds the two movement totals together, which is the figure the
/// stock report prints; [`StockSummary::net_on_hand`] is receipts minus
/// issues for callers that want the difference instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub item_code: String,
    pub description: String,
    pub unit: String,
    pub total_in: Decimal,
    pub total_out: Decimal,
    pub balance: Decimal,
}

impl StockSummary {
    fn new(item: &Item, total_in: Decimal, total_out: Decimal) -> StockSummary {
        StockSummary {
            item_code: item.code().clone(),
            description: item.description().clone(),
            unit: item.unit().clone(),
            total_in,
            total_out,
            balance: total_in + total_out,
        }
    }

    pub fn net_on_hand(&self) -> Decimal {
        self.total_in - self.total_out
    }
}

/// The inventory ledger: item catalog, movement logs and the aggregation
/// that joins them into stock summaries. Mutations go through `&mut self`,
/// reads take a consistent `&self` snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub catalog: ItemCatalog,
    pub movements: MovementLog,
    #[serde(default)]
    pub integrity: ReferentialIntegrity,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::default()
    }

    pub fn with_integrity(integrity: ReferentialIntegrity) -> Ledger {
        Ledger {
            integrity,
            ..Ledger::default()
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<(), LedgerError> {
        command.apply(self)
    }

    pub fn add_item(&mut self, code: &str, description: &str, unit: &str) -> Result<&Item, LedgerError> {
        self.catalog.add(code, description, unit)
    }

    pub fn update_item(
        &mut self,
        code: &str,
        description: Option<&str>,
        unit: Option<&str>,
    ) -> Result<&Item, LedgerError> {
        self.catalog.update(code, description, unit)
    }

    pub fn record_incoming(
        &mut self,
        item_code: &str,
        quantity: Decimal,
        date: Option<NaiveDate>,
        remarks: Option<String>,
    ) -> Result<u32, LedgerError> {
        self.check_reference(item_code)?;
        self.movements.record_incoming(item_code, quantity, date, remarks)
    }

    pub fn record_outgoing(
        &mut self,
        item_code: &str,
        quantity: Decimal,
        date: Option<NaiveDate>,
        remarks: Option<String>,
    ) -> Result<u32, LedgerError> {
        self.check_reference(item_code)?;
        self.movements.record_outgoing(item_code, quantity, date, remarks)
    }

    fn check_reference(&self, item_code: &str) -> Result<(), LedgerError> {
        if self.integrity == ReferentialIntegrity::Strict && !self.catalog.contains(item_code) {
            return Err(LedgerError::UnknownItem(item_code.to_string()));
        }

        Ok(())
    }

    /// Totals for a single cataloged item.
    pub fn stock_summary(&self, code: &str) -> Result<StockSummary, LedgerError> {
        let item = self.catalog.get(code)?;
        let total_in = direction_total(self.movements.incoming(), code);
        let total_out = direction_total(self.movements.outgoing(), code);

        Ok(StockSummary::new(item, total_in, total_out))
    }

    /// One summary per catalog entry, in catalog order.
    ///
    /// Each log is folded into a code-to-total map in a single pass, then
    /// joined against the catalog. Items without movements report zeros;
    /// movements without a catalog entry appear in no row.
    pub fn stock_report(&self) -> Vec<StockSummary> {
        let total_in = totals_by_code(self.movements.incoming());
        let total_out = totals_by_code(self.movements.outgoing());

        self.catalog
            .iter()
            .map(|item| {
                StockSummary::new(
                    item,
                    total_in.get(item.code().as_str()).copied().unwrap_or(Decimal::ZERO),
                    total_out.get(item.code().as_str()).copied().unwrap_or(Decimal::ZERO),
                )
            })
            .collect()
    }
}

fn totals_by_code(movements: &[Movement]) -> HashMap<&str, Decimal> {
    let mut totals = HashMap::new();
    for movement in movements {
        let total = totals.entry(movement.item_code().as_str()).or_insert(Decimal::ZERO);
        *total = (*total + movement.quantity()).round_dp(PRECISION);
    }

    totals
}

fn direction_total(movements: &[Movement], code: &str) -> Decimal {
    movements
        .iter()
        .filter(|movement| movement.item_code() == code)
        .fold(Decimal::ZERO, |total, movement| {
            (total + movement.quantity()).round_dp(PRECISION)
        })
}
