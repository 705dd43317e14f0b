//! In-memory snapshot of the business records, indexed for aggregation
//!
//! Every report and every derived order amount is computed from a
//! [`Ledger`] loaded once per request. Nothing computed here is persisted.

use crate::core::error::StorageError;
use crate::entities::{Customer, Item, Order, OrderItem, Payment};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Derived amounts of one order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderTotals {
    /// Sum of quantity × unit price over the order's lines
    pub total_amount: Decimal,
    /// Sum of the order's payments
    pub paid_amount: Decimal,
    /// `total_amount - paid_amount`, negative when overpaid
    pub remaining_amount: Decimal,
    /// `remaining_amount <= 0`
    pub is_paid: bool,
}

impl OrderTotals {
    /// `None` when the remaining amount does not fit in a `Decimal`
    pub fn new(total_amount: Decimal, paid_amount: Decimal) -> Option<Self> {
        let remaining_amount = total_amount.checked_sub(paid_amount)?;
        Some(Self {
            total_amount,
            paid_amount,
            remaining_amount,
            is_paid: remaining_amount <= Decimal::ZERO,
        })
    }

    fn zero() -> Self {
        Self {
            total_amount: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            remaining_amount: Decimal::ZERO,
            is_paid: true,
        }
    }
}

/// Running sum of absolute amounts, bounding every sum a report can take
#[derive(Default)]
struct Magnitude(Decimal);

impl Magnitude {
    fn add(
        &mut self,
        acc: Decimal,
        amount: Decimal,
        what: &str,
        order: &Uuid,
    ) -> Result<Decimal, StorageError> {
        let overflow = || StorageError::IntegrityError {
            message: format!("{} of order {} overflows", what, order),
        };
        self.0 = self.0.checked_add(amount.abs()).ok_or_else(overflow)?;
        acc.checked_add(amount).ok_or_else(overflow)
    }
}

/// Snapshot of customers, items, orders, order lines and payments
#[derive(Debug, Default)]
pub struct Ledger {
    customers: HashMap<Uuid, Customer>,
    items: HashMap<Uuid, Item>,
    orders: Vec<Order>,
    order_index: HashMap<Uuid, usize>,
    lines_by_order: HashMap<Uuid, Vec<OrderItem>>,
    payments_by_order: HashMap<Uuid, Vec<Payment>>,
    totals: HashMap<Uuid, OrderTotals>,
}

impl Ledger {
    /// Build a ledger from full collections. Orders keep their given order.
    ///
    /// Fails when the amounts cannot be represented: the sum of the absolute
    /// values of every line total and every payment must fit in a `Decimal`,
    /// so any sum or difference the reports take over a subset also fits.
    pub fn new(
        customers: Vec<Customer>,
        items: Vec<Item>,
        orders: Vec<Order>,
        order_items: Vec<OrderItem>,
        payments: Vec<Payment>,
    ) -> Result<Self, StorageError> {
        let order_index = orders
            .iter()
            .enumerate()
            .map(|(index, order)| (order.id, index))
            .collect();

        let mut lines_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for line in order_items {
            lines_by_order.entry(line.order).or_default().push(line);
        }

        let mut payments_by_order: HashMap<Uuid, Vec<Payment>> = HashMap::new();
        for payment in payments {
            payments_by_order
                .entry(payment.order)
                .or_default()
                .push(payment);
        }

        let mut ledger = Self {
            customers: customers.into_iter().map(|c| (c.id, c)).collect(),
            items: items.into_iter().map(|i| (i.id, i)).collect(),
            orders,
            order_index,
            lines_by_order,
            payments_by_order,
            totals: HashMap::new(),
        };
        ledger.totals = ledger.compute_totals()?;
        Ok(ledger)
    }

    fn compute_totals(&self) -> Result<HashMap<Uuid, OrderTotals>, StorageError> {
        let mut magnitude = Magnitude::default();
        let mut totals = HashMap::new();
        for (order, lines) in &self.lines_by_order {
            let mut total = Decimal::ZERO;
            for line in lines {
                let amount = match self.items.get(&line.item) {
                    Some(item) => item
                        .price
                        .checked_mul(Decimal::from(line.quantity))
                        .ok_or_else(|| StorageError::IntegrityError {
                            message: format!("line {} of order {} overflows", line.id, order),
                        })?,
                    None => Decimal::ZERO,
                };
                total = magnitude.add(total, amount, "total", order)?;
            }
            totals.insert(*order, (total, Decimal::ZERO));
        }
        for (order, payments) in &self.payments_by_order {
            let mut paid = Decimal::ZERO;
            for payment in payments {
                paid = magnitude.add(paid, payment.amount, "payments", order)?;
            }
            totals.entry(*order).or_insert((Decimal::ZERO, Decimal::ZERO)).1 = paid;
        }

        totals
            .into_iter()
            .map(|(order, (total, paid))| {
                OrderTotals::new(total, paid)
                    .map(|t| (order, t))
                    .ok_or_else(|| StorageError::IntegrityError {
                        message: format!("remaining amount of order {} overflows", order),
                    })
            })
            .collect()
    }

    pub fn customer(&self, id: &Uuid) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn item(&self, id: &Uuid) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn order(&self, id: &Uuid) -> Option<&Order> {
        self.order_index.get(id).map(|index| &self.orders[*index])
    }

    /// All orders in storage order
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders of one customer, in storage order
    pub fn orders_of<'a>(&'a self, customer_id: &'a Uuid) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| &o.customer == customer_id)
    }

    /// Line items of an order
    pub fn lines(&self, order_id: &Uuid) -> &[OrderItem] {
        self.lines_by_order
            .get(order_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Payments of an order
    pub fn payments(&self, order_id: &Uuid) -> &[Payment] {
        self.payments_by_order
            .get(order_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every payment, grouped by order
    pub fn all_payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments_by_order.values().flatten()
    }

    /// quantity × current unit price; zero when the item no longer exists
    ///
    /// Never overflows for the lines this ledger was built from.
    pub fn line_total(&self, line: &OrderItem) -> Decimal {
        self.items
            .get(&line.item)
            .and_then(|item| item.price.checked_mul(Decimal::from(line.quantity)))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_amount(&self, order_id: &Uuid) -> Decimal {
        self.totals(order_id).total_amount
    }

    pub fn paid_amount(&self, order_id: &Uuid) -> Decimal {
        self.totals(order_id).paid_amount
    }

    /// Derived amounts; all zero for an order without lines or payments
    pub fn totals(&self, order_id: &Uuid) -> OrderTotals {
        self.totals
            .get(order_id)
            .copied()
            .unwrap_or_else(OrderTotals::zero)
    }

    /// "First Last" of a customer, empty when unknown
    pub fn customer_name(&self, customer_id: &Uuid) -> String {
        self.customers
            .get(customer_id)
            .map(Customer::display_name)
            .unwrap_or_default()
    }

    /// Display name of the customer owning an order
    pub fn order_customer_name(&self, order_id: &Uuid) -> String {
        self.order(order_id)
            .map(|order| self.customer_name(&order.customer))
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small ledgers shared by the report tests

    use super::*;
    use chrono::NaiveDate;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn customer(first: &str, last: &str) -> Customer {
        Customer::new(
            first.to_string(),
            last.to_string(),
            "2101234567".to_string(),
            format!("EL-{}", last),
            None,
        )
    }

    pub fn item(name: &str, cents: i64) -> Item {
        Item::new(name.to_string(), String::new(), None, Decimal::new(cents, 2))
    }

    /// Builder collecting records for a ledger
    #[derive(Default)]
    pub struct LedgerBuilder {
        pub customers: Vec<Customer>,
        pub items: Vec<Item>,
        pub orders: Vec<Order>,
        pub lines: Vec<OrderItem>,
        pub payments: Vec<Payment>,
    }

    impl LedgerBuilder {
        pub fn customer(&mut self, first: &str, last: &str) -> Uuid {
            let c = customer(first, last);
            let id = c.id;
            self.customers.push(c);
            id
        }

        pub fn item(&mut self, name: &str, cents: i64) -> Uuid {
            let i = item(name, cents);
            let id = i.id;
            self.items.push(i);
            id
        }

        pub fn order(&mut self, customer: Uuid, on: NaiveDate, lines: &[(Uuid, u32)]) -> Uuid {
            let order = Order::new(customer, on);
            let id = order.id;
            for (item, quantity) in lines {
                self.lines.push(OrderItem::new(id, *item, *quantity));
            }
            self.orders.push(order);
            id
        }

        pub fn pay(&mut self, order: Uuid, cents: i64, on: NaiveDate) {
            self.payments
                .push(Payment::new(order, Decimal::new(cents, 2), on));
        }

        pub fn build(self) -> Ledger {
            self.try_build().unwrap()
        }

        pub fn try_build(self) -> Result<Ledger, StorageError> {
            Ledger::new(
                self.customers,
                self.items,
                self.orders,
                self.lines,
                self.payments,
            )
        }
    }
}
