//! Aggregated store for all entities
//!
//! Holds one `DataService` per record type behind `Arc<dyn ...>` so the same
//! handlers run against the in-memory backend or PostgreSQL. Referential
//! checks and cascading deletes live here, on top of the plain services.

use crate::config::{StorageBackend, StorageConfig};
use crate::core::error::{ConfigError, EntityError, OrderDeskResult};
use crate::core::{Data, DataService};
use crate::entities::{AuthToken, Customer, Item, Order, OrderItem, Payment, User};
use crate::reports::Ledger;
use crate::storage::InMemoryDataService;
use std::sync::Arc;
use uuid::Uuid;

/// Aggregated store containing all entity services
#[derive(Clone)]
pub struct EntityStore {
    pub customers: Arc<dyn DataService<Customer>>,
    pub items: Arc<dyn DataService<Item>>,
    pub orders: Arc<dyn DataService<Order>>,
    pub order_items: Arc<dyn DataService<OrderItem>>,
    pub payments: Arc<dyn DataService<Payment>>,
    pub users: Arc<dyn DataService<User>>,
    pub tokens: Arc<dyn DataService<AuthToken>>,
}

impl EntityStore {
    /// Store backed by in-process hash maps
    pub fn in_memory() -> Self {
        Self {
            customers: Arc::new(InMemoryDataService::<Customer>::new()),
            items: Arc::new(InMemoryDataService::<Item>::new()),
            orders: Arc::new(InMemoryDataService::<Order>::new()),
            order_items: Arc::new(InMemoryDataService::<OrderItem>::new()),
            payments: Arc::new(InMemoryDataService::<Payment>::new()),
            users: Arc::new(InMemoryDataService::<User>::new()),
            tokens: Arc::new(InMemoryDataService::<AuthToken>::new()),
        }
    }

    /// Store backed by a PostgreSQL pool (schema must already exist)
    #[cfg(feature = "postgres")]
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        use crate::storage::PostgresDataService;

        Self {
            customers: Arc::new(PostgresDataService::<Customer>::new(pool.clone())),
            items: Arc::new(PostgresDataService::<Item>::new(pool.clone())),
            orders: Arc::new(PostgresDataService::<Order>::new(pool.clone())),
            order_items: Arc::new(PostgresDataService::<OrderItem>::new(pool.clone())),
            payments: Arc::new(PostgresDataService::<Payment>::new(pool.clone())),
            users: Arc::new(PostgresDataService::<User>::new(pool.clone())),
            tokens: Arc::new(PostgresDataService::<AuthToken>::new(pool)),
        }
    }

    /// Build the store selected by the storage configuration
    pub async fn connect(config: &StorageConfig) -> OrderDeskResult<Self> {
        match config.backend {
            StorageBackend::Memory => Ok(Self::in_memory()),
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres => {
                let url = config.database_url.as_deref().ok_or_else(|| {
                    ConfigError::InvalidValue {
                        field: "storage.database_url".to_string(),
                        value: String::new(),
                        message: "required for the postgres backend".to_string(),
                    }
                })?;
                let pool = crate::storage::postgres::connect(url, config.max_connections).await?;
                tracing::info!(max_connections = config.max_connections, "connected to PostgreSQL");
                Ok(Self::postgres(pool))
            }
            #[cfg(not(feature = "postgres"))]
            StorageBackend::Postgres => Err(ConfigError::InvalidValue {
                field: "storage.backend".to_string(),
                value: "postgres".to_string(),
                message: "built without the `postgres` feature".to_string(),
            }
            .into()),
        }
    }

    // --- lookups ---------------------------------------------------------

    pub async fn require_customer(&self, id: &Uuid) -> OrderDeskResult<Customer> {
        require(self.customers.as_ref(), id).await
    }

    pub async fn require_item(&self, id: &Uuid) -> OrderDeskResult<Item> {
        require(self.items.as_ref(), id).await
    }

    pub async fn require_order(&self, id: &Uuid) -> OrderDeskResult<Order> {
        require(self.orders.as_ref(), id).await
    }

    pub async fn require_order_item(&self, id: &Uuid) -> OrderDeskResult<OrderItem> {
        require(self.order_items.as_ref(), id).await
    }

    pub async fn require_payment(&self, id: &Uuid) -> OrderDeskResult<Payment> {
        require(self.payments.as_ref(), id).await
    }

    pub async fn require_user(&self, id: &Uuid) -> OrderDeskResult<User> {
        require(self.users.as_ref(), id).await
    }

    /// Load every business collection into a [`Ledger`]
    pub async fn ledger(&self) -> OrderDeskResult<Ledger> {
        let (customers, items, orders, order_items, payments) = tokio::try_join!(
            self.customers.list(),
            self.items.list(),
            self.orders.list(),
            self.order_items.list(),
            self.payments.list(),
        )?;
        Ok(Ledger::new(customers, items, orders, order_items, payments)?)
    }

    // --- writes ----------------------------------------------------------

    /// Insert an order with its lines, removing everything written so far if
    /// any insert fails
    pub async fn create_order(&self, order: Order, lines: &[(Uuid, u32)]) -> OrderDeskResult<Order> {
        let order = self.orders.create(order).await?;
        for (item, quantity) in lines {
            if let Err(err) = self
                .order_items
                .create(OrderItem::new(order.id, *item, *quantity))
                .await
            {
                tracing::warn!(order_id = %order.id, error = %err, "order line insert failed, rolling back");
                self.discard_order(&order.id).await;
                return Err(err.into());
            }
        }
        Ok(order)
    }

    async fn discard_order(&self, id: &Uuid) {
        if let Err(err) = self.order_items.delete_where("order", &id.to_string()).await {
            tracing::error!(order_id = %id, error = %err, "failed to remove lines of a discarded order");
        }
        if let Err(err) = self.orders.delete(id).await {
            tracing::error!(order_id = %id, error = %err, "failed to remove a discarded order");
        }
    }

    // --- cascading deletes -----------------------------------------------

    /// Delete a customer together with its orders
    pub async fn delete_customer(&self, id: &Uuid) -> OrderDeskResult<()> {
        self.require_customer(id).await?;
        for order in self.orders.search("customer", &id.to_string()).await? {
            self.delete_order(&order.id).await?;
        }
        self.customers.delete(id).await?;
        Ok(())
    }

    /// Delete an order together with its line items and payments
    pub async fn delete_order(&self, id: &Uuid) -> OrderDeskResult<()> {
        self.require_order(id).await?;
        let key = id.to_string();
        let lines = self.order_items.delete_where("order", &key).await?;
        let payments = self.payments.delete_where("order", &key).await?;
        self.orders.delete(id).await?;
        tracing::debug!(order_id = %id, lines, payments, "order deleted");
        Ok(())
    }

    /// Delete an item together with the order lines referencing it
    pub async fn delete_item(&self, id: &Uuid) -> OrderDeskResult<()> {
        self.require_item(id).await?;
        self.order_items.delete_where("item", &id.to_string()).await?;
        self.items.delete(id).await?;
        Ok(())
    }

    /// Delete a user together with its API tokens
    pub async fn delete_user(&self, id: &Uuid) -> OrderDeskResult<()> {
        self.require_user(id).await?;
        self.tokens.delete_where("user", &id.to_string()).await?;
        self.users.delete(id).await?;
        Ok(())
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Fetch a record or fail with not-found
pub async fn require<T: Data>(service: &dyn DataService<T>, id: &Uuid) -> OrderDeskResult<T> {
    service
        .get(id)
        .await?
        .ok_or_else(|| EntityError::not_found(T::resource_name_singular(), *id).into())
}
