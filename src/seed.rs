//! Demo data for local runs (`ORDERDESK_SEED=1`)

use crate::core::auth::{generate_token_key, hash_password};
use crate::core::error::OrderDeskResult;
use crate::entities::{AuthToken, Customer, Item, Order, OrderItem, Payment, User};
use crate::reports::period;
use crate::store::EntityStore;
use chrono::Duration;
use rust_decimal::Decimal;

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo-password";

/// Populate an empty store with a few customers, items, orders and
/// payments plus a demo user. Returns the demo user's token.
pub async fn seed_demo(store: &EntityStore) -> OrderDeskResult<String> {
    let today = period::today();

    let maria = store
        .customers
        .create(Customer::new(
            "Maria".into(),
            "Papadopoulou".into(),
            "2101234567".into(),
            "EL094019245".into(),
            Some("maria@example.gr".into()),
        ))
        .await?;
    let nikos = store
        .customers
        .create(Customer::new(
            "Nikos".into(),
            "Georgiou".into(),
            "2310987654".into(),
            "EL800012345".into(),
            None,
        ))
        .await?;

    let feta = store
        .items
        .create(Item::new(
            "Feta".into(),
            "PDO feta, 1 kg".into(),
            Some("Dairy".into()),
            Decimal::new(1150, 2),
        ))
        .await?;
    let oil = store
        .items
        .create(Item::new(
            "Olive oil".into(),
            "Extra virgin, 5 l".into(),
            Some("Oil".into()),
            Decimal::new(4200, 2),
        ))
        .await?;
    let honey = store
        .items
        .create(Item::new(
            "Thyme honey".into(),
            String::new(),
            None,
            Decimal::new(900, 2),
        ))
        .await?;

    // (customer, days ago, lines, paid in cents)
    let orders = [
        (maria.id, 45, vec![(oil.id, 2), (feta.id, 3)], 5000),
        (maria.id, 3, vec![(honey.id, 4)], 3600),
        (nikos.id, 40, vec![(feta.id, 10)], 0),
        (nikos.id, 0, vec![(oil.id, 1), (honey.id, 2)], 2000),
    ];
    for (customer, days_ago, lines, paid) in orders {
        let date = today - Duration::days(days_ago);
        let order = store.orders.create(Order::new(customer, date)).await?;
        for (item, quantity) in lines {
            store
                .order_items
                .create(OrderItem::new(order.id, item, quantity))
                .await?;
        }
        if paid > 0 {
            store
                .payments
                .create(Payment::new(order.id, Decimal::new(paid, 2), date))
                .await?;
        }
    }

    let user = store
        .users
        .create(User::new(
            DEMO_USERNAME.into(),
            "demo@example.gr".into(),
            "Demo".into(),
            "User".into(),
            hash_password(DEMO_PASSWORD)?,
        ))
        .await?;
    let token = store
        .tokens
        .create(AuthToken::new(generate_token_key(), user.id))
        .await?;

    tracing::info!(customers = 2, items = 3, orders = 4, "demo data seeded");
    Ok(token.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::verify_password;
    use crate::reports::debt;

    #[tokio::test]
    async fn test_seed_demo() {
        let store = EntityStore::in_memory();
        let token = seed_demo(&store).await.unwrap();
        assert_eq!(token.len(), 40);

        let ledger = store.ledger().await.unwrap();
        assert_eq!(ledger.orders().len(), 4);

        // Nikos: 115.00 + 60.00 - 20.00, Maria: 118.50 + 36.00 - 86.00
        let debtors = debt::top_debtors(&ledger, 5);
        assert_eq!(debtors.len(), 2);
        assert_eq!(debtors[0].customer, "Nikos Georgiou");
        assert_eq!(debtors[0].debt, Decimal::new(15500, 2));
        assert_eq!(debtors[1].debt, Decimal::new(6850, 2));

        let users = store.users.search("username", DEMO_USERNAME).await.unwrap();
        assert!(verify_password(DEMO_PASSWORD, &users[0].password_hash).is_ok());
    }
}
