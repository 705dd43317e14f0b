//! Flatten reports into exportable tables

use super::debt::Debtor;
use super::sales::SalesReport;
use super::views::OrderSummary;
use crate::export::{Cell, Table};
use rust_decimal::Decimal;

pub fn sales_table(report: &SalesReport, description: &str, currency: &str) -> Table {
    let mut table = Table::new("Sales report", &["Item", "Quantity", "Revenue"], currency)
        .with_subtitle(description);
    for line in &report.lines {
        table.push_row(vec![
            Cell::text(line.item.as_str()),
            line.quantity.into(),
            line.revenue.into(),
        ]);
    }
    table.push_summary("Orders", report.order_count);
    table.push_summary("Total sales", report.total_sales);
    table.push_summary("Total paid", report.total_paid);
    table
}

pub fn debtors_table(debtors: &[Debtor], subtitle: &str, currency: &str) -> Table {
    let mut table =
        Table::new("Top debtors", &["#", "Customer", "Debt"], currency).with_subtitle(subtitle);
    for (rank, debtor) in debtors.iter().enumerate() {
        table.push_row(vec![
            (rank + 1).into(),
            Cell::text(debtor.customer.as_str()),
            debtor.debt.into(),
        ]);
    }
    let total: Decimal = debtors.iter().map(|d| d.debt).sum();
    table.push_summary("Total debt", total);
    table
}

pub fn order_table(summary: &OrderSummary, currency: &str) -> Table {
    let mut table = Table::new(
        format!("Order {}", summary.order_id),
        &["Item", "Quantity", "Unit price", "Price"],
        currency,
    )
    .with_subtitle(format!("{} - {}", summary.customer, summary.date));

    for line in &summary.items {
        table.push_row(vec![
            Cell::text(line.item.as_str()),
            line.quantity.into(),
            line.unit_price.into(),
            line.price.into(),
        ]);
    }
    for payment in &summary.payments {
        table.push_summary(format!("Payment {}", payment.date), payment.amount);
    }
    table.push_summary("Total", summary.totals.total_amount);
    table.push_summary("Paid", summary.totals.paid_amount);
    table.push_summary("Remaining", summary.totals.remaining_amount);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ledger::fixtures::*;
    use crate::reports::{debt, sales};

    #[test]
    fn test_sales_table() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Maria", "Papadopoulou");
        let bread = b.item("Bread", 150);
        b.order(c, date(2024, 3, 1), &[(bread, 2)]);
        let ledger = b.build();

        let report = sales::sales_report(&ledger, &Default::default());
        let table = sales_table(&report, "all orders", "EUR");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][2], Cell::Money(Decimal::new(300, 2)));
        assert_eq!(table.summary[0], ("Orders".to_string(), Cell::Integer(1)));
    }

    #[test]
    fn test_debtors_table_ranks() {
        let mut b = LedgerBuilder::default();
        let unit = b.item("Unit", 100);
        let a = b.customer("A", "A");
        let z = b.customer("Z", "Z");
        b.order(a, date(2024, 1, 1), &[(unit, 1)]);
        b.order(z, date(2024, 1, 1), &[(unit, 9)]);
        let ledger = b.build();

        let table = debtors_table(&debt::top_debtors(&ledger, 5), "today", "EUR");
        assert_eq!(table.rows[0][0], Cell::Integer(1));
        assert_eq!(table.rows[0][1], Cell::text("Z Z"));
        assert_eq!(table.summary[0].1, Cell::Money(Decimal::new(1000, 2)));
    }
}
