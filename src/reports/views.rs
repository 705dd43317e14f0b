//! Response shapes that combine stored records with derived amounts

use super::ledger::{Ledger, OrderTotals};
use crate::entities::{Customer, Item, Order, OrderItem, Payment};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// An order line with its item nested and the line total
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub id: Uuid,
    pub order: Uuid,
    /// `None` only if the item vanished from storage
    pub item: Option<Item>,
    pub quantity: u32,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderItemView {
    pub fn build(ledger: &Ledger, line: &OrderItem) -> Self {
        Self {
            id: line.id,
            order: line.order,
            item: ledger.item(&line.item).cloned(),
            quantity: line.quantity,
            total_price: ledger.line_total(line),
            created_at: line.created_at,
            updated_at: line.updated_at,
        }
    }
}

/// A payment with the paying customer's display name
#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    pub id: Uuid,
    pub order: Uuid,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentView {
    pub fn build(ledger: &Ledger, payment: &Payment) -> Self {
        Self {
            id: payment.id,
            order: payment.order,
            amount: payment.amount,
            date: payment.date,
            customer_name: ledger.order_customer_name(&payment.order),
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

/// Full order: customer, lines, payments and the four aggregates
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: Uuid,
    pub customer: Option<Customer>,
    pub customer_name: String,
    pub date: NaiveDate,
    pub items: Vec<OrderItemView>,
    pub payments: Vec<PaymentView>,
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderView {
    pub fn build(ledger: &Ledger, order: &Order) -> Self {
        Self {
            id: order.id,
            customer: ledger.customer(&order.customer).cloned(),
            customer_name: ledger.customer_name(&order.customer),
            date: order.date,
            items: ledger
                .lines(&order.id)
                .iter()
                .map(|line| OrderItemView::build(ledger, line))
                .collect(),
            payments: ledger
                .payments(&order.id)
                .iter()
                .map(|payment| PaymentView::build(ledger, payment))
                .collect(),
            totals: ledger.totals(&order.id),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryLine {
    pub item: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// quantity × unit price
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryPayment {
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Flat summary of one order
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_id: Uuid,
    pub customer: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub items: Vec<SummaryLine>,
    pub payments: Vec<SummaryPayment>,
}

impl OrderSummary {
    pub fn build(ledger: &Ledger, order: &Order) -> Self {
        let items = ledger
            .lines(&order.id)
            .iter()
            .map(|line| {
                let (name, unit_price) = ledger
                    .item(&line.item)
                    .map(|item| (item.name.clone(), item.price))
                    .unwrap_or_default();
                SummaryLine {
                    item: name,
                    quantity: line.quantity,
                    unit_price,
                    price: ledger.line_total(line),
                }
            })
            .collect();

        let payments = ledger
            .payments(&order.id)
            .iter()
            .map(|p| SummaryPayment {
                amount: p.amount,
                date: p.date,
            })
            .collect();

        Self {
            order_id: order.id,
            customer: ledger.customer_name(&order.customer),
            date: order.date,
            totals: ledger.totals(&order.id),
            items,
            payments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ledger::fixtures::*;

    #[test]
    fn test_order_view_json_shape() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Maria", "Papadopoulou");
        let bread = b.item("Bread", 500);
        let order_id = b.order(c, date(2024, 3, 1), &[(bread, 2)]);
        b.pay(order_id, 400, date(2024, 3, 2));
        let orders = b.orders.clone();
        let ledger = b.build();

        let view = OrderView::build(&ledger, &orders[0]);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["customer_name"], "Maria Papadopoulou");
        assert_eq!(json["customer"]["first_name"], "Maria");
        assert_eq!(json["items"][0]["item"]["name"], "Bread");
        assert_eq!(json["items"][0]["total_price"], "10.00");
        assert_eq!(json["payments"][0]["customer_name"], "Maria Papadopoulou");
        assert_eq!(json["total_amount"], "10.00");
        assert_eq!(json["paid_amount"], "4.00");
        assert_eq!(json["remaining_amount"], "6.00");
        assert_eq!(json["is_paid"], false);
    }

    #[test]
    fn test_summary_lines() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Nikos", "Georgiou");
        let oil = b.item("Oil", 1250);
        b.order(c, date(2024, 3, 1), &[(oil, 3)]);
        let orders = b.orders.clone();
        let ledger = b.build();

        let summary = OrderSummary::build(&ledger, &orders[0]);
        assert_eq!(summary.customer, "Nikos Georgiou");
        assert_eq!(summary.items[0].item, "Oil");
        assert_eq!(summary.items[0].price, Decimal::new(3750, 2));
        assert!(summary.payments.is_empty());
        assert!(!summary.totals.is_paid);
    }
}
