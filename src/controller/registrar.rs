use crate::controller::{BoundHandler, HandlerSet, HttpMethod, RouteTable, RoutingHost, bind, join_paths};
use crate::di::{FromInjection, InjectionResolver, ManagedInstance, ServiceIdentity};
use crate::error::{ConfigurationError, Result};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds controllers and binds their declared routes into a routing host.
#[derive(Default)]
pub struct ControllerRegistrar {
    handlers: HashMap<ServiceIdentity, Box<dyn Any + Send + Sync>>,
    instances: Vec<ManagedInstance>,
}

impl ControllerRegistrar {
    /// Create a registrar with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `handlers` available to routes of `C` by name.
    pub fn add_handlers<C: Send + Sync + 'static>(&mut self, handlers: HandlerSet<C>) {
        self.handlers
            .insert(ServiceIdentity::of::<C>(), Box::new(handlers));
    }

    fn handler_set<C: Send + Sync + 'static>(&self) -> Option<&HandlerSet<C>> {
        self.handlers
            .get(&ServiceIdentity::of::<C>())
            .and_then(|set| set.downcast_ref::<HandlerSet<C>>())
    }

    /// Construct one `C` and register every declared route with `host`.
    ///
    /// All handler names are resolved before the host is touched, so a
    /// missing handler leaves the host unchanged.
    pub fn register_controller<C, H>(
        &mut self,
        host: &mut H,
        resolver: &InjectionResolver,
        table: &RouteTable,
    ) -> Result<Arc<C>>
    where
        C: FromInjection,
        H: RoutingHost + ?Sized,
    {
        let identity = ServiceIdentity::of::<C>();
        let controller = Arc::new(resolver.construct::<C>()?);

        let prefix = table.prefix(&identity);
        let handlers = self.handler_set::<C>();
        let bound: Vec<(HttpMethod, String, BoundHandler)> = table
            .routes(&identity)
            .iter()
            .map(|route| -> Result<(HttpMethod, String, BoundHandler)> {
                let handler = handlers
                    .and_then(|set| set.get(&route.handler_name))
                    .ok_or_else(|| {
                        ConfigurationError::handler_not_found(
                            identity.type_name(),
                            route.handler_name.as_str(),
                        )
                    })?;
                Ok((
                    route.method,
                    join_paths(prefix, &route.path),
                    bind(handler, Arc::clone(&controller)),
                ))
            })
            .collect::<Result<_>>()?;

        for (method, path, handler) in bound {
            tracing::debug!("Mapped {{{} {}}}", method, path);
            host.register(method, &path, handler);
        }

        tracing::info!(
            "{} registered ({} routes)",
            identity.short_name(),
            table.routes(&identity).len()
        );
        self.instances
            .push(ManagedInstance::new(Arc::clone(&controller)));
        Ok(controller)
    }

    /// Controllers built so far, in registration order.
    pub fn instances(&self) -> &[ManagedInstance] {
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::BoxFuture;
    use crate::di::{InjectionArgs, Injectable, SingletonRegistry};
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;

    #[derive(Default)]
    struct RecordingHost {
        registered: Vec<(HttpMethod, String)>,
    }

    impl RecordingHost {
        fn record(&mut self, method: HttpMethod, path: &str) {
            self.registered.push((method, path.to_string()));
        }
    }

    impl RoutingHost for RecordingHost {
        fn get(&mut self, path: &str, _handler: BoundHandler) {
            self.record(HttpMethod::Get, path);
        }

        fn post(&mut self, path: &str, _handler: BoundHandler) {
            self.record(HttpMethod::Post, path);
        }

        fn put(&mut self, path: &str, _handler: BoundHandler) {
            self.record(HttpMethod::Put, path);
        }

        fn delete(&mut self, path: &str, _handler: BoundHandler) {
            self.record(HttpMethod::Delete, path);
        }

        fn patch(&mut self, path: &str, _handler: BoundHandler) {
            self.record(HttpMethod::Patch, path);
        }
    }

    struct Inventory;

    impl Injectable for Inventory {
        fn create() -> Self {
            Inventory
        }
    }

    struct ShelfController {
        inventory: Arc<Inventory>,
    }

    impl ShelfController {
        async fn list(self: Arc<Self>, _request: Request<Body>) -> &'static str {
            "list"
        }
    }

    impl FromInjection for ShelfController {
        fn from_injection(args: InjectionArgs) -> Result<Self> {
            Ok(ShelfController {
                inventory: args.require(0)?,
            })
        }
    }

    fn setup() -> (InjectionResolver, RouteTable, ControllerRegistrar) {
        let registry = Arc::new(SingletonRegistry::new());
        registry.mark_injectable::<Inventory>();
        let mut resolver = InjectionResolver::new(registry);
        resolver.record_injection_point(
            ServiceIdentity::of::<ShelfController>(),
            0,
            ServiceIdentity::of::<Inventory>(),
        );
        (resolver, RouteTable::new(), ControllerRegistrar::new())
    }

    fn shelf() -> ServiceIdentity {
        ServiceIdentity::of::<ShelfController>()
    }

    fn list_handlers() -> HandlerSet<ShelfController> {
        let mut handlers = HandlerSet::new();
        handlers.insert("list", ShelfController::list);
        handlers
    }

    #[test]
    fn test_registers_every_route_with_full_path() {
        let (resolver, mut table, mut registrar) = setup();
        table.mark_controller(shelf(), "shelf");
        table.add_route(shelf(), HttpMethod::Get, "", "list");
        table.add_route(shelf(), HttpMethod::Post, "items", "list");
        table.add_route(shelf(), HttpMethod::Patch, "/items/{id}", "list");
        registrar.add_handlers(list_handlers());

        let mut host = RecordingHost::default();
        let controller = registrar
            .register_controller::<ShelfController, _>(&mut host, &resolver, &table)
            .unwrap();

        assert_eq!(
            host.registered,
            vec![
                (HttpMethod::Get, "/shelf".to_string()),
                (HttpMethod::Post, "/shelf/items".to_string()),
                (HttpMethod::Patch, "/shelf/items/{id}".to_string()),
            ]
        );
        assert_eq!(registrar.instances().len(), 1);
        let tracked = registrar.instances()[0].downcast::<ShelfController>().unwrap();
        assert!(Arc::ptr_eq(&tracked, &controller));
        let inventory = resolver.registry().resolve::<Inventory>().unwrap();
        assert!(Arc::ptr_eq(&controller.inventory, &inventory));
    }

    #[test]
    fn test_empty_prefix_and_path_map_to_root() {
        let (resolver, mut table, mut registrar) = setup();
        table.mark_controller(shelf(), "");
        table.add_route(shelf(), HttpMethod::Get, "", "list");
        registrar.add_handlers(list_handlers());

        let mut host = RecordingHost::default();
        registrar
            .register_controller::<ShelfController, _>(&mut host, &resolver, &table)
            .unwrap();
        assert_eq!(host.registered, vec![(HttpMethod::Get, "/".to_string())]);
    }

    #[test]
    fn test_duplicate_slashes_are_kept() {
        let (resolver, mut table, mut registrar) = setup();
        table.mark_controller(shelf(), "/shelf/");
        table.add_route(shelf(), HttpMethod::Get, "/items", "list");
        registrar.add_handlers(list_handlers());

        let mut host = RecordingHost::default();
        registrar
            .register_controller::<ShelfController, _>(&mut host, &resolver, &table)
            .unwrap();
        assert_eq!(
            host.registered,
            vec![(HttpMethod::Get, "/shelf//items".to_string())]
        );
    }

    #[test]
    fn test_missing_handler_fails_without_touching_host() {
        let (resolver, mut table, mut registrar) = setup();
        table.mark_controller(shelf(), "shelf");
        table.add_route(shelf(), HttpMethod::Get, "", "list");
        table.add_route(shelf(), HttpMethod::Delete, "", "clear");
        registrar.add_handlers(list_handlers());

        let mut host = RecordingHost::default();
        let err = registrar
            .register_controller::<ShelfController, _>(&mut host, &resolver, &table)
            .err()
            .unwrap();

        match err {
            ConfigurationError::HandlerNotFound { handler, .. } => assert_eq!(handler, "clear"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(host.registered.is_empty());
        assert!(registrar.instances().is_empty());
    }

    #[test]
    fn test_unregistered_handler_set_fails() {
        let (resolver, mut table, mut registrar) = setup();
        table.add_route(shelf(), HttpMethod::Get, "", "list");

        let mut host = RecordingHost::default();
        let err = registrar
            .register_controller::<ShelfController, _>(&mut host, &resolver, &table)
            .err()
            .unwrap();
        assert!(matches!(err, ConfigurationError::HandlerNotFound { .. }));
    }

    #[test]
    fn test_each_registration_builds_a_new_controller() {
        let (resolver, table, mut registrar) = setup();
        let mut host = RecordingHost::default();

        let first = registrar
            .register_controller::<ShelfController, _>(&mut host, &resolver, &table)
            .unwrap();
        let second = registrar
            .register_controller::<ShelfController, _>(&mut host, &resolver, &table)
            .unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first.inventory, &second.inventory));
        assert_eq!(registrar.instances().len(), 2);
        assert!(host.registered.is_empty());
    }

    #[tokio::test]
    async fn test_bound_handler_is_callable_standalone() {
        let (resolver, mut table, mut registrar) = setup();
        table.add_route(shelf(), HttpMethod::Get, "list", "list");
        registrar.add_handlers(list_handlers());

        struct CapturingHost(Option<BoundHandler>);

        impl RoutingHost for CapturingHost {
            fn get(&mut self, _path: &str, handler: BoundHandler) {
                self.0 = Some(handler);
            }
            fn post(&mut self, _path: &str, _handler: BoundHandler) {}
            fn put(&mut self, _path: &str, _handler: BoundHandler) {}
            fn delete(&mut self, _path: &str, _handler: BoundHandler) {}
            fn patch(&mut self, _path: &str, _handler: BoundHandler) {}
        }

        let mut host = CapturingHost(None);
        registrar
            .register_controller::<ShelfController, _>(&mut host, &resolver, &table)
            .unwrap();

        let handler = host.0.take().unwrap();
        let future: BoxFuture<Response> = handler(Request::new(Body::empty()));
        let body = axum::body::to_bytes(future.await.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"list");
    }
}
