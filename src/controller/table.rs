use crate::controller::{ControllerMetadata, HttpMethod, RouteDefinition, normalize_path};
use crate::di::ServiceIdentity;
use std::collections::HashMap;

/// Route declarations per controller type.
///
/// `mark_controller` and `add_route` may be called in either order for the
/// same type; neither discards what the other recorded.
#[derive(Debug, Default)]
pub struct RouteTable {
    controllers: HashMap<ServiceIdentity, ControllerMetadata>,
}

impl RouteTable {
    /// Create an empty route table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the path prefix of `controller`
    pub fn mark_controller(&mut self, controller: ServiceIdentity, prefix: &str) {
        self.controllers.entry(controller).or_default().prefix = normalize_path(prefix);
    }

    /// Append a route to `controller`; order of calls is preserved
    pub fn add_route(
        &mut self,
        controller: ServiceIdentity,
        method: HttpMethod,
        path: &str,
        handler_name: impl Into<String>,
    ) {
        self.controllers
            .entry(controller)
            .or_default()
            .routes
            .push(RouteDefinition {
                method,
                path: normalize_path(path),
                handler_name: handler_name.into(),
            });
    }

    /// Normalized prefix, empty when none was recorded
    pub fn prefix(&self, controller: &ServiceIdentity) -> &str {
        self.controllers
            .get(controller)
            .map_or("", |metadata| metadata.prefix.as_str())
    }

    /// Routes of `controller` in declaration order.
    pub fn routes(&self, controller: &ServiceIdentity) -> &[RouteDefinition] {
        self.controllers
            .get(controller)
            .map(|metadata| metadata.routes.as_slice())
            .unwrap_or_default()
    }

    /// Get everything recorded for `controller`
    pub fn metadata(&self, controller: &ServiceIdentity) -> Option<&ControllerMetadata> {
        self.controllers.get(controller)
    }

    /// Whether anything was recorded for `controller`
    pub fn contains(&self, controller: &ServiceIdentity) -> bool {
        self.controllers.contains_key(controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Catalog;
    struct Unknown;

    fn catalog() -> ServiceIdentity {
        ServiceIdentity::of::<Catalog>()
    }

    #[test]
    fn test_defaults_for_unknown_type() {
        let table = RouteTable::new();
        let unknown = ServiceIdentity::of::<Unknown>();
        assert_eq!(table.prefix(&unknown), "");
        assert!(table.routes(&unknown).is_empty());
        assert!(!table.contains(&unknown));
    }

    #[test]
    fn test_mark_after_routes_keeps_routes() {
        let mut table = RouteTable::new();
        table.add_route(catalog(), HttpMethod::Get, "items", "list");
        table.add_route(catalog(), HttpMethod::Post, "", "create");
        table.mark_controller(catalog(), "catalog");

        assert_eq!(table.prefix(&catalog()), "/catalog");
        let routes = table.routes(&catalog());
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].path, "/items");
        assert_eq!(routes[0].handler_name, "list");
        assert_eq!(routes[1].path, "");
        assert_eq!(routes[1].method, HttpMethod::Post);
    }

    #[test]
    fn test_mark_before_routes_keeps_prefix() {
        let mut table = RouteTable::new();
        table.mark_controller(catalog(), "");
        assert!(table.contains(&catalog()));
        assert!(table.routes(&catalog()).is_empty());

        table.add_route(catalog(), HttpMethod::Delete, "/items/{id}", "remove");
        assert_eq!(table.prefix(&catalog()), "");
        assert_eq!(
            table.metadata(&catalog()).unwrap().routes[0],
            RouteDefinition {
                method: HttpMethod::Delete,
                path: "/items/{id}".to_string(),
                handler_name: "remove".to_string(),
            }
        );
    }
}
