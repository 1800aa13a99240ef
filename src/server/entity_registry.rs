//! Entity registry: the route tables of the collections under `/api`

use super::state::AppState;
use axum::Router;
use axum::handler::Handler;
use axum::routing::MethodRouter;

/// One path of a collection, relative to its base path
pub struct EntityRoute {
    suffix: &'static str,
    methods: Vec<&'static str>,
    router: MethodRouter<AppState>,
}

impl EntityRoute {
    /// Route at `{base}{suffix}`, e.g. `"/{id}/pdf"`
    pub fn at(suffix: &'static str) -> Self {
        Self {
            suffix,
            methods: Vec::new(),
            router: MethodRouter::new(),
        }
    }

    pub fn get<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.methods.push("GET");
        self.router = self.router.get(handler);
        self
    }

    pub fn post<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.methods.push("POST");
        self.router = self.router.post(handler);
        self
    }

    pub fn put<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.methods.push("PUT");
        self.router = self.router.put(handler);
        self
    }

    pub fn delete<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.methods.push("DELETE");
        self.router = self.router.delete(handler);
        self
    }

    pub fn suffix(&self) -> &'static str {
        self.suffix
    }

    /// Methods in the order they were added
    pub fn methods(&self) -> &[&'static str] {
        &self.methods
    }
}

/// A collection exposed under `/api/{plural}`
pub trait EntityDescriptor: Send + Sync {
    /// Singular name, e.g. "invoice"
    fn entity_type(&self) -> &str;

    /// Plural name, e.g. "invoices"
    fn plural(&self) -> &str;

    fn base_path(&self) -> String {
        format!("/api/{}", self.plural())
    }

    /// Paths of the collection, relative to `base_path`
    fn routes(&self) -> Vec<EntityRoute>;
}

/// Ordered set of descriptors, keyed by entity type
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: Vec<Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the invoice and customer collections
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(super::descriptors::InvoiceDescriptor));
        registry.register(Box::new(super::descriptors::CustomerDescriptor));
        registry
    }

    /// Register a descriptor
    ///
    /// A descriptor for an entity type already present takes over its slot.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        match self
            .descriptors
            .iter_mut()
            .find(|d| d.entity_type() == descriptor.entity_type())
        {
            Some(slot) => *slot = descriptor,
            None => self.descriptors.push(descriptor),
        }
    }

    /// Entity types in registration order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.entity_type()).collect()
    }

    /// `(method, path)` of every registered route, in registration order
    pub fn route_table(&self) -> Vec<(&'static str, String)> {
        let mut table = Vec::new();
        for descriptor in &self.descriptors {
            let base = descriptor.base_path();
            for route in descriptor.routes() {
                let path = format!("{}{}", base, route.suffix);
                table.extend(route.methods.iter().map(|m| (*m, path.clone())));
            }
        }
        table
    }

    /// Router serving every registered route against `state`
    pub fn build_routes(&self, state: AppState) -> Router {
        let mut router = Router::new();
        for descriptor in &self.descriptors {
            let base = descriptor.base_path();
            for route in descriptor.routes() {
                router = router.route(&format!("{}{}", base, route.suffix), route.router);
            }
            tracing::debug!(entity = descriptor.entity_type(), %base, "entity routes registered");
        }
        router.with_state(state)
    }
}
