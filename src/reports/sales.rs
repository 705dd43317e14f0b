//! Sales aggregations: top sellers, quantities per period, daily totals

use super::ledger::Ledger;
use super::period::{DateRange, Month};
use crate::entities::Order;
use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Item name → quantity, kept in rank order when serialized
pub type QuantityByItem = IndexMap<String, u64>;

/// Sum quantities per item name over the lines of the given orders
fn quantities<'a>(ledger: &Ledger, orders: impl Iterator<Item = &'a Order>) -> HashMap<String, u64> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    for order in orders {
        for line in ledger.lines(&order.id) {
            if let Some(item) = ledger.item(&line.item) {
                *totals.entry(item.name.clone()).or_default() += u64::from(line.quantity);
            }
        }
    }
    totals
}

/// Rank by quantity descending, then by name
fn ranked(totals: HashMap<String, u64>, limit: Option<usize>) -> QuantityByItem {
    let mut rows: Vec<(String, u64)> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows.into_iter().collect()
}

/// The `limit` best-selling items over all orders
pub fn top_selling(ledger: &Ledger, limit: usize) -> QuantityByItem {
    ranked(quantities(ledger, ledger.orders().iter()), Some(limit))
}

/// Quantities sold per item on one date
pub fn sold_by_date(ledger: &Ledger, date: NaiveDate) -> QuantityByItem {
    let orders = ledger.orders().iter().filter(|o| o.date == date);
    ranked(quantities(ledger, orders), None)
}

/// Quantities sold per item during a month
pub fn sold_by_month(ledger: &Ledger, month: Month) -> QuantityByItem {
    let orders = ledger.orders().iter().filter(|o| month.contains(o.date));
    ranked(quantities(ledger, orders), None)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    /// Sum of the totals of the orders dated that day
    pub total_sales: Decimal,
    pub total_orders: usize,
}

pub fn daily_sales(ledger: &Ledger, date: NaiveDate) -> DailySales {
    let (total_sales, total_orders) = ledger
        .orders()
        .iter()
        .filter(|o| o.date == date)
        .fold((Decimal::ZERO, 0), |(sum, count), order| {
            (sum + ledger.total_amount(&order.id), count + 1)
        });

    DailySales {
        date,
        total_sales,
        total_orders,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPayments {
    pub date: NaiveDate,
    pub total_payments: Decimal,
    pub count: usize,
}

pub fn daily_payments(ledger: &Ledger, date: NaiveDate) -> DailyPayments {
    let (total_payments, count) = ledger
        .all_payments()
        .filter(|p| p.date == date)
        .fold((Decimal::ZERO, 0), |(sum, count), payment| {
            (sum + payment.amount, count + 1)
        });

    DailyPayments {
        date,
        total_payments,
        count,
    }
}

/// Order selection of the sales report. Every set criterion must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesFilter {
    pub date: Option<NaiveDate>,
    pub month: Option<Month>,
    pub range: DateRange,
    pub customer: Option<Uuid>,
}

impl SalesFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.date.is_none_or(|date| order.date == date)
            && self.month.is_none_or(|month| month.contains(order.date))
            && self.range.contains(order.date)
            && self.customer.is_none_or(|customer| order.customer == customer)
    }

    /// Human readable description used as a document subtitle
    pub fn describe(&self, ledger: &Ledger) -> String {
        let mut parts = Vec::new();
        if let Some(date) = self.date {
            parts.push(format!("date {}", date));
        }
        if let Some(month) = self.month {
            parts.push(format!("month {}", month));
        }
        match (self.range.from, self.range.to) {
            (Some(from), Some(to)) => parts.push(format!("from {} to {}", from, to)),
            (Some(from), None) => parts.push(format!("from {}", from)),
            (None, Some(to)) => parts.push(format!("until {}", to)),
            (None, None) => {}
        }
        if let Some(customer) = self.customer {
            parts.push(format!("customer {}", ledger.customer_name(&customer)));
        }
        if parts.is_empty() {
            "all orders".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Quantity and revenue of one item in the sales report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesLine {
    pub item: String,
    pub quantity: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub order_count: usize,
    pub total_sales: Decimal,
    pub total_paid: Decimal,
    pub lines: Vec<SalesLine>,
}

/// Aggregate the orders selected by `filter`
pub fn sales_report(ledger: &Ledger, filter: &SalesFilter) -> SalesReport {
    let mut order_count = 0;
    let mut total_sales = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut per_item: HashMap<String, (u64, Decimal)> = HashMap::new();

    for order in ledger.orders().iter().filter(|o| filter.matches(o)) {
        order_count += 1;
        total_sales += ledger.total_amount(&order.id);
        total_paid += ledger.paid_amount(&order.id);

        for line in ledger.lines(&order.id) {
            if let Some(item) = ledger.item(&line.item) {
                let entry = per_item.entry(item.name.clone()).or_default();
                entry.0 += u64::from(line.quantity);
                entry.1 += ledger.line_total(line);
            }
        }
    }

    let mut lines: Vec<SalesLine> = per_item
        .into_iter()
        .map(|(item, (quantity, revenue))| SalesLine {
            item,
            quantity,
            revenue,
        })
        .collect();
    lines.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.item.cmp(&b.item)));

    SalesReport {
        order_count,
        total_sales,
        total_paid,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ledger::fixtures::*;

    #[test]
    fn test_top_selling_groups_by_name_and_ranks() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Maria", "Papadopoulou");
        let names = ["Bread", "Cheese", "Eggs", "Honey", "Milk", "Olives", "Tea"];
        let ids: Vec<Uuid> = names.iter().map(|n| b.item(n, 100)).collect();
        // quantities 1..=7 in name order
        let lines: Vec<(Uuid, u32)> = ids.iter().zip(1..).map(|(id, q)| (*id, q)).collect();
        b.order(c, date(2024, 1, 1), &lines);
        // a second order adds 10 more Bread
        b.order(c, date(2024, 1, 2), &[(ids[0], 10)]);
        let ledger = b.build();

        let top = top_selling(&ledger, 5);
        let ranking: Vec<(&str, u64)> = top.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(
            ranking,
            vec![("Bread", 11), ("Tea", 7), ("Olives", 6), ("Milk", 5), ("Honey", 4)]
        );
    }

    #[test]
    fn test_top_selling_serializes_in_rank_order() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Maria", "Papadopoulou");
        let zucchini = b.item("Zucchini", 100);
        let apples = b.item("Apples", 100);
        b.order(c, date(2024, 1, 1), &[(apples, 1), (zucchini, 9)]);
        let ledger = b.build();

        let json = serde_json::to_string(&top_selling(&ledger, 5)).unwrap();
        assert_eq!(json, r#"{"Zucchini":9,"Apples":1}"#);
    }

    #[test]
    fn test_top_selling_ties_by_name() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Maria", "Papadopoulou");
        let y = b.item("Yogurt", 100);
        let a = b.item("Anise", 100);
        b.order(c, date(2024, 1, 1), &[(y, 3), (a, 3)]);
        let ledger = b.build();

        let top = top_selling(&ledger, 5);
        let keys: Vec<&String> = top.keys().collect();
        assert_eq!(keys, vec!["Anise", "Yogurt"]);
    }

    #[test]
    fn test_sold_by_date_and_month() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Maria", "Papadopoulou");
        let bread = b.item("Bread", 100);
        let milk = b.item("Milk", 100);
        b.order(c, date(2024, 3, 1), &[(bread, 2), (milk, 1)]);
        b.order(c, date(2024, 3, 1), &[(bread, 3)]);
        b.order(c, date(2024, 3, 15), &[(milk, 4)]);
        b.order(c, date(2024, 4, 1), &[(milk, 100)]);
        let ledger = b.build();

        let day = sold_by_date(&ledger, date(2024, 3, 1));
        assert_eq!(day.get("Bread"), Some(&5));
        assert_eq!(day.get("Milk"), Some(&1));

        let month = sold_by_month(&ledger, Month::parse("2024-03").unwrap());
        assert_eq!(month.get("Bread"), Some(&5));
        assert_eq!(month.get("Milk"), Some(&5));

        assert!(sold_by_date(&ledger, date(2024, 5, 1)).is_empty());
    }

    #[test]
    fn test_daily_sales_matches_sum_of_order_totals() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Maria", "Papadopoulou");
        let five = b.item("Bread", 500);
        let ten = b.item("Cheese", 1000);
        b.order(c, date(2024, 3, 1), &[(five, 2), (ten, 1)]);
        b.order(c, date(2024, 3, 1), &[(ten, 3)]);
        b.order(c, date(2024, 3, 2), &[(ten, 50)]);
        let ledger = b.build();

        let day = date(2024, 3, 1);
        let expected: Decimal = ledger
            .orders()
            .iter()
            .filter(|o| o.date == day)
            .map(|o| ledger.total_amount(&o.id))
            .sum();

        let sales = daily_sales(&ledger, day);
        assert_eq!(sales.total_sales, expected);
        assert_eq!(sales.total_sales, Decimal::new(5000, 2));
        assert_eq!(sales.total_orders, 2);
    }

    #[test]
    fn test_daily_payments() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Maria", "Papadopoulou");
        let o = b.order(c, date(2024, 3, 1), &[]);
        b.pay(o, 1000, date(2024, 3, 1));
        b.pay(o, 250, date(2024, 3, 1));
        b.pay(o, 9999, date(2024, 3, 2));
        let ledger = b.build();

        let payments = daily_payments(&ledger, date(2024, 3, 1));
        assert_eq!(payments.total_payments, Decimal::new(1250, 2));
        assert_eq!(payments.count, 2);

        let empty = daily_payments(&ledger, date(2024, 1, 1));
        assert_eq!(empty.total_payments, Decimal::ZERO);
        assert_eq!(empty.count, 0);
    }

    #[test]
    fn test_sales_report_filters_and_sorts_by_revenue() {
        let mut b = LedgerBuilder::default();
        let maria = b.customer("Maria", "Papadopoulou");
        let nikos = b.customer("Nikos", "Georgiou");
        let bread = b.item("Bread", 150);
        let oil = b.item("Oil", 1200);
        let o1 = b.order(maria, date(2024, 3, 1), &[(bread, 10), (oil, 1)]);
        b.order(maria, date(2024, 3, 20), &[(oil, 2)]);
        b.order(nikos, date(2024, 3, 5), &[(bread, 100)]);
        b.order(maria, date(2024, 4, 2), &[(oil, 9)]);
        b.pay(o1, 1000, date(2024, 3, 2));
        let ledger = b.build();

        let filter = SalesFilter {
            month: Some(Month::parse("2024-03").unwrap()),
            customer: Some(maria),
            ..Default::default()
        };
        let report = sales_report(&ledger, &filter);

        assert_eq!(report.order_count, 2);
        assert_eq!(report.total_sales, Decimal::new(5100, 2));
        assert_eq!(report.total_paid, Decimal::new(1000, 2));
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.lines[0].item, "Oil");
        assert_eq!(report.lines[0].quantity, 3);
        assert_eq!(report.lines[0].revenue, Decimal::new(3600, 2));
        assert_eq!(report.lines[1].item, "Bread");
        assert_eq!(report.lines[1].revenue, Decimal::new(1500, 2));
    }

    #[test]
    fn test_sales_report_date_range() {
        let mut b = LedgerBuilder::default();
        let c = b.customer("Maria", "Papadopoulou");
        let bread = b.item("Bread", 100);
        b.order(c, date(2024, 1, 1), &[(bread, 1)]);
        b.order(c, date(2024, 1, 10), &[(bread, 1)]);
        b.order(c, date(2024, 1, 20), &[(bread, 1)]);
        let ledger = b.build();

        let filter = SalesFilter {
            range: DateRange::parse(Some("2024-01-05"), Some("2024-01-20")).unwrap(),
            ..Default::default()
        };
        assert_eq!(sales_report(&ledger, &filter).order_count, 2);
        assert_eq!(filter.describe(&ledger), "from 2024-01-05 to 2024-01-20");
    }
}
