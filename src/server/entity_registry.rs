//! Entity registry collecting the route descriptors of every entity

use axum::Router;
use std::collections::BTreeMap;

/// Trait that describes how to build routes for an entity
///
/// Each entity (Customer, Order, Payment, ...) implements this trait to
/// provide its CRUD and report routes. Descriptors carry their own state
/// and return a stateless `Router`.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "order")
    fn entity_type(&self) -> &str;

    /// The plural form used in URLs (e.g., "orders")
    fn plural(&self) -> &str;

    /// Build the routes for this entity
    ///
    /// Usually:
    /// - GET/POST /{plural}
    /// - GET/PUT/PATCH/DELETE /{plural}/{id}
    /// - entity specific reports under /{plural}/...
    fn build_routes(&self) -> Router;
}

/// Registry for all entities in the application, keyed by entity type
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register an entity descriptor, replacing one of the same type
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge the routes of every registered entity into one router
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered entity types in alphabetical order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    /// Plural of a registered entity type
    pub fn plural_of(&self, entity_type: &str) -> Option<&str> {
        self.descriptors.get(entity_type).map(|d| d.plural())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    struct MockDescriptor {
        entity_type: String,
        plural: String,
    }

    impl MockDescriptor {
        fn boxed(entity_type: &str, plural: &str) -> Box<Self> {
            Box::new(Self {
                entity_type: entity_type.to_string(),
                plural: plural.to_string(),
            })
        }
    }

    impl EntityDescriptor for MockDescriptor {
        fn entity_type(&self) -> &str {
            &self.entity_type
        }

        fn plural(&self) -> &str {
            &self.plural
        }

        fn build_routes(&self) -> Router {
            Router::new().route(&format!("/{}", self.plural), get(|| async { "[]" }))
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(EntityRegistry::new().entity_types().is_empty());
        assert!(EntityRegistry::default().entity_types().is_empty());
    }

    #[test]
    fn test_entity_types_are_sorted() {
        let mut registry = EntityRegistry::new();
        registry.register(MockDescriptor::boxed("payment", "payments"));
        registry.register(MockDescriptor::boxed("customer", "customers"));
        registry.register(MockDescriptor::boxed("order_item", "order-items"));
        assert_eq!(
            registry.entity_types(),
            vec!["customer", "order_item", "payment"]
        );
        assert_eq!(registry.plural_of("order_item"), Some("order-items"));
        assert_eq!(registry.plural_of("invoice"), None);
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(MockDescriptor::boxed("order", "orders"));
        registry.register(MockDescriptor::boxed("order", "purchases"));
        assert_eq!(registry.entity_types().len(), 1);
        assert_eq!(registry.plural_of("order"), Some("purchases"));
    }

    #[tokio::test]
    async fn test_build_routes_merges_every_descriptor() {
        let mut registry = EntityRegistry::new();
        registry.register(MockDescriptor::boxed("customer", "customers"));
        registry.register(MockDescriptor::boxed("item", "items"));

        let server = axum_test::TestServer::new(registry.build_routes()).unwrap();
        server.get("/customers").await.assert_status_ok();
        server.get("/items").await.assert_status_ok();
    }
}
