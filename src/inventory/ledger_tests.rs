use anyhow::{bail, Result};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::commands::{AddItem, Command, RecordIncoming, RecordOutgoing, UpdateItem};
use super::ledger::{Ledger, ReferentialIntegrity, StockSummary};
use super::LedgerError;

fn assert_summary(summary: &StockSummary, code: &str, total_in: Decimal, total_out: Decimal) {
    assert_eq!(summary.item_code, code);
    assert_eq!(summary.total_in, total_in);
    assert_eq!(summary.total_out, total_out);
    assert_eq!(summary.balance, total_in + total_out);
    assert_eq!(summary.net_on_hand(), total_in - total_out);
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_add_item() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("A1", "Hex bolt", "pcs")?;

    assert_eq!(ledger.catalog.len(), 1);
    let item = ledger.catalog.get("A1")?;
    assert_eq!(item.description(), "Hex bolt");
    assert_eq!(item.unit(), "pcs");

    Ok(())
}

#[test]
fn test_add_item_duplicate_code() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("A1", "Hex bolt", "pcs")?;

    if let Err(err) = ledger.add_item("A1", "Washer", "pcs") {
        assert_eq!(err, LedgerError::DuplicateItem("A1".to_string()));
    } else {
        bail!("adding a duplicate code should fail");
    }

    assert_eq!(ledger.catalog.len(), 1);
    assert_eq!(ledger.catalog.get("A1")?.description(), "Hex bolt");

    Ok(())
}

#[test]
fn test_add_item_empty_code() -> Result<()> {
    let mut ledger = Ledger::new();

    if let Err(err) = ledger.add_item("  ", "Nameless", "pcs") {
        assert_eq!(err, LedgerError::EmptyItemCode);
    } else {
        bail!("an item without a code should not exist");
    }

    assert_eq!(ledger.catalog.is_empty(), true);

    Ok(())
}

#[test]
fn test_get_item_not_found() {
    let ledger = Ledger::new();

    assert_eq!(
        ledger.catalog.get("A1"),
        Err(LedgerError::ItemNotFound("A1".to_string()))
    );
}

#[test]
fn test_update_item() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("A1", "Hex bolt", "pcs")?;

    ledger.update_item("A1", Some("Hex bolt M8"), None)?;
    let item = ledger.catalog.get("A1")?;
    assert_eq!(item.description(), "Hex bolt M8");
    assert_eq!(item.unit(), "pcs");

    ledger.update_item("A1", None, Some("box"))?;
    let item = ledger.catalog.get("A1")?;
    assert_eq!(item.code(), "A1");
    assert_eq!(item.description(), "Hex bolt M8");
    assert_eq!(item.unit(), "box");

    Ok(())
}

#[test]
fn test_update_item_not_found() {
    let mut ledger = Ledger::new();

    assert_eq!(
        ledger.update_item("A1", Some("Hex bolt"), None).err(),
        Some(LedgerError::ItemNotFound("A1".to_string()))
    );
}

#[test]
fn test_catalog_keeps_insertion_order() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("C3", "Angle bracket", "pcs")?;
    ledger.add_item("A1", "Hex bolt", "pcs")?;
    ledger.add_item("B2", "Nut", "pcs")?;

    let codes: Vec<&str> = ledger.catalog.iter().map(|item| item.code().as_str()).collect();
    assert_eq!(codes, vec!["C3", "A1", "B2"]);

    Ok(())
}

#[test]
fn test_record_movements_assign_sequential_ids() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("A1", "Hex bolt", "pcs")?;

    let first = ledger.record_incoming("A1", dec!(10), Some(date(2015, 6, 1)), None)?;
    let second = ledger.record_outgoing("A1", dec!(3), Some(date(2015, 6, 2)), None)?;
    let third = ledger.record_incoming("A1", dec!(5), None, Some("recount".to_string()))?;

    assert_eq!((first, second, third), (1, 2, 3));
    assert_eq!(ledger.movements.incoming().len(), 2);
    assert_eq!(ledger.movements.outgoing().len(), 1);

    Ok(())
}

#[test]
fn test_record_rejects_non_positive_quantity() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("A1", "Hex bolt", "pcs")?;

    for quantity in [dec!(0), dec!(-4)] {
        if let Err(err) = ledger.record_incoming("A1", quantity, None, None) {
            assert_eq!(err, LedgerError::InvalidQuantity);
        } else {
            bail!("non-positive quantities should be rejected");
        }
    }

    assert_eq!(ledger.movements.incoming().is_empty(), true);

    Ok(())
}

#[test]
fn test_summary_totals_per_direction() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("A1", "Bolt", "pcs")?;
    ledger.record_incoming("A1", dec!(10), None, None)?;
    ledger.record_incoming("A1", dec!(5), None, None)?;
    ledger.record_outgoing("A1", dec!(3), None, None)?;

    let summary = ledger.stock_summary("A1")?;
    assert_summary(&summary, "A1", dec!(15), dec!(3));
    assert_eq!(summary.balance, dec!(18));
    assert_eq!(summary.net_on_hand(), dec!(12));

    Ok(())
}

#[test]
fn test_summary_without_movements_is_zero() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("B2", "Nut", "pcs")?;

    let summary = ledger.stock_summary("B2")?;
    assert_summary(&summary, "B2", dec!(0), dec!(0));

    Ok(())
}

#[test]
fn test_summary_unknown_item() {
    let ledger = Ledger::new();

    assert_eq!(
        ledger.stock_summary("A1").err(),
        Some(LedgerError::ItemNotFound("A1".to_string()))
    );
}

#[test]
fn test_incoming_leaves_total_out_untouched() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("A1", "Hex bolt", "pcs")?;

    for quantity in [dec!(1.5), dec!(2), dec!(0.25)] {
        ledger.record_incoming("A1", quantity, None, None)?;
    }

    assert_summary(&ledger.stock_summary("A1")?, "A1", dec!(3.75), dec!(0));

    Ok(())
}

#[test]
fn test_report_matches_catalog_order() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("C3", "Angle bracket", "pcs")?;
    ledger.add_item("A1", "Hex bolt", "pcs")?;
    ledger.add_item("B2", "Nut", "kg")?;
    ledger.record_incoming("A1", dec!(10), None, None)?;
    ledger.record_outgoing("A1", dec!(4), None, None)?;
    ledger.record_incoming("ZZ", dec!(7), None, None)?;

    let report = ledger.stock_report();
    assert_eq!(report.len(), ledger.catalog.len());
    assert_summary(&report[0], "C3", dec!(0), dec!(0));
    assert_summary(&report[1], "A1", dec!(10), dec!(4));
    assert_summary(&report[2], "B2", dec!(0), dec!(0));

    Ok(())
}

#[test]
fn test_strict_mode_rejects_unknown_code() -> Result<()> {
    let mut ledger = Ledger::with_integrity(ReferentialIntegrity::Strict);

    if let Err(err) = ledger.record_incoming("A1", dec!(10), None, None) {
        assert_eq!(err, LedgerError::UnknownItem("A1".to_string()));
    } else {
        bail!("strict mode should reject movements for uncataloged codes");
    }

    assert_eq!(ledger.movements.incoming().is_empty(), true);

    ledger.add_item("A1", "Hex bolt", "pcs")?;
    ledger.record_incoming("A1", dec!(10), None, None)?;
    assert_eq!(ledger.movements.incoming().len(), 1);

    Ok(())
}

#[test]
fn test_permissive_mode_keeps_unmatched_movements() -> Result<()> {
    let mut ledger = Ledger::new();

    let id = ledger.record_incoming("ZZ", dec!(7), None, None)?;
    assert_eq!(id, 1);
    assert_eq!(ledger.movements.incoming().len(), 1);

    // The record stays in the log but no catalog entry means no report row.
    assert_eq!(ledger.stock_report().len(), 0);

    Ok(())
}

#[test]
fn test_commands_drive_the_ledger() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.execute(Command::AddItem(AddItem::new("A1", "Hex bolt", "pcs")))?;
    ledger.execute(Command::UpdateItem(UpdateItem::new("A1", None, Some("box".to_string()))))?;
    ledger.execute(Command::RecordIncoming(RecordIncoming::new(
        "A1",
        dec!(10),
        Some(date(2015, 6, 1)),
        None,
    )))?;
    ledger.execute(Command::RecordOutgoing(RecordOutgoing::new(
        "A1",
        dec!(3),
        Some(date(2015, 6, 3)),
        Some("site issue".to_string()),
    )))?;

    let summary = ledger.stock_summary("A1")?;
    assert_eq!(summary.unit, "box");
    assert_summary(&summary, "A1", dec!(10), dec!(3));

    Ok(())
}

#[test]
fn test_totals_round_to_four_decimals() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_item("A1", "Wire", "m")?;
    ledger.record_incoming("A1", dec!(3.1415926535), None, None)?;

    assert_summary(&ledger.stock_summary("A1")?, "A1", dec!(3.1416), dec!(0));

    Ok(())
}
