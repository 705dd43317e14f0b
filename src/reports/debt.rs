//! Customer debt reports

use super::ledger::Ledger;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Debt of a single customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerDebt {
    pub customer_id: Uuid,
    /// Display name
    pub customer: String,
    /// Value of all the customer's orders
    pub total_orders: Decimal,
    pub total_paid: Decimal,
    pub debt: Decimal,
}

/// One row of the debtor rankings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Debtor {
    pub customer_id: Uuid,
    pub customer: String,
    pub debt: Decimal,
}

/// `sum(total_amount) - sum(paid_amount)` over the customer's orders
pub fn customer_debt(ledger: &Ledger, customer_id: &Uuid) -> CustomerDebt {
    let (total_orders, total_paid) = ledger
        .orders_of(customer_id)
        .map(|order| (ledger.total_amount(&order.id), ledger.paid_amount(&order.id)))
        .fold((Decimal::ZERO, Decimal::ZERO), |(total, paid), (t, p)| {
            (total + t, paid + p)
        });

    CustomerDebt {
        customer_id: *customer_id,
        customer: ledger.customer_name(customer_id),
        total_orders,
        total_paid,
        debt: total_orders - total_paid,
    }
}

/// Customers with a positive debt, largest first.
///
/// With a cutoff only orders dated on or before it count.
fn debtors(ledger: &Ledger, cutoff: Option<NaiveDate>) -> Vec<Debtor> {
    let mut debtors: Vec<Debtor> = ledger
        .customers()
        .filter_map(|customer| {
            let debt: Decimal = ledger
                .orders_of(&customer.id)
                .filter(|order| cutoff.is_none_or(|cutoff| order.date <= cutoff))
                .map(|order| ledger.totals(&order.id).remaining_amount)
                .sum();

            (debt > Decimal::ZERO).then(|| Debtor {
                customer_id: customer.id,
                customer: customer.display_name(),
                debt,
            })
        })
        .collect();

    debtors.sort_by(|a, b| {
        b.debt
            .cmp(&a.debt)
            .then_with(|| a.customer.cmp(&b.customer))
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    debtors
}

/// The `limit` largest positive debts
pub fn top_debtors(ledger: &Ledger, limit: usize) -> Vec<Debtor> {
    let mut ranked = debtors(ledger, None);
    ranked.truncate(limit);
    ranked
}

/// Positive debts counting only orders dated on or before `cutoff`.
/// Not truncated.
pub fn overdue_debtors(ledger: &Ledger, cutoff: NaiveDate) -> Vec<Debtor> {
    debtors(ledger, Some(cutoff))
}
