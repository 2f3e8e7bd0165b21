//! Application Bootstrap
//!
//! Owns the singleton registry, injection resolver, route table, controller
//! registrar and repeat scheduler for one process, and wires them together
//! from the descriptors each type supplies.

use crate::controller::{
    Controller, ControllerDescriptor, ControllerRegistrar, RouteTable, RoutingHost,
};
use crate::di::{
    FromInjection, Injectable, InjectionResolver, ManagedInstance, ServiceDescriptor,
    ServiceIdentity, SingletonRegistry,
};
use crate::error::Result;
use crate::scheduler::{RepeatHandle, RepeatScheduler, RepeatSchedule};
use std::collections::HashSet;
use std::sync::Arc;

/// Process-scoped container for services, controllers and their schedules.
///
/// # Example
///
/// ```rust,ignore
/// let mut app = Application::new();
/// app.injectable::<ExampleInjectableService>();
///
/// let mut router = Router::new();
/// app.register_controller::<HomeController, _>(&mut router)?;
/// app.register_controller::<AnotherController, _>(&mut router)?;
///
/// app.start_all_repeats()?;
/// ```
pub struct Application {
    registry: Arc<SingletonRegistry>,
    resolver: InjectionResolver,
    routes: RouteTable,
    registrar: ControllerRegistrar,
    scheduler: RepeatScheduler,
    declared_services: HashSet<ServiceIdentity>,
    declared_controllers: HashSet<ServiceIdentity>,
}

impl Application {
    /// Create an empty application with its own singleton registry.
    pub fn new() -> Self {
        let registry = Arc::new(SingletonRegistry::new());
        Self {
            resolver: InjectionResolver::new(Arc::clone(&registry)),
            registry,
            routes: RouteTable::new(),
            registrar: ControllerRegistrar::new(),
            scheduler: RepeatScheduler::new(),
            declared_services: HashSet::new(),
            declared_controllers: HashSet::new(),
        }
    }

    /// Mark `S` as a singleton service and record its repeat schedules.
    pub fn injectable<S: Injectable>(&mut self) -> &mut Self {
        self.registry.mark_injectable::<S>();
        let identity = ServiceIdentity::of::<S>();
        if self.declared_services.insert(identity) {
            let mut descriptor = ServiceDescriptor::<S>::new();
            S::describe(&mut descriptor);
            for repeat in descriptor.repeats {
                self.scheduler.declare(identity, repeat);
            }
        }
        self
    }

    /// Mark `S` injectable and build its singleton right away.
    pub fn register_service<S: Injectable>(&mut self) -> Result<Arc<S>> {
        self.injectable::<S>();
        self.registry.resolve::<S>()
    }

    /// Record the declarations of `C`. Only the first call per type has an effect.
    pub fn declare_controller<C: Controller>(&mut self) -> &mut Self {
        let identity = ServiceIdentity::of::<C>();
        if !self.declared_controllers.insert(identity) {
            return self;
        }

        let mut descriptor = ControllerDescriptor::<C>::new();
        C::describe(&mut descriptor);

        for (method, path, handler_name) in descriptor.routes {
            self.routes.add_route(identity, method, &path, handler_name);
        }
        self.routes.mark_controller(identity, &descriptor.prefix);
        for (index, service) in descriptor.injections {
            self.resolver.record_injection_point(identity, index, service);
        }
        self.registrar.add_handlers(descriptor.handlers);
        for repeat in descriptor.repeats {
            self.scheduler.declare(identity, repeat);
        }

        tracing::debug!(
            "Declared controller {} at {:?}",
            identity.short_name(),
            self.routes.prefix(&identity)
        );
        self
    }

    /// Build a `C` and bind its routes into `host`.
    pub fn register_controller<C, H>(&mut self, host: &mut H) -> Result<Arc<C>>
    where
        C: Controller,
        H: RoutingHost + ?Sized,
    {
        self.declare_controller::<C>();
        self.registrar
            .register_controller::<C, H>(host, &self.resolver, &self.routes)
    }

    /// The singleton of `S`, built on first request.
    pub fn resolve<S: Send + Sync + 'static>(&self) -> Result<Arc<S>> {
        self.registry.resolve::<S>()
    }

    /// Build a fresh `T` with its injection points filled. Never cached.
    pub fn construct<T: FromInjection>(&self) -> Result<T> {
        self.resolver.construct::<T>()
    }

    /// Start the declared schedules of one live instance.
    pub fn start_repeats(&mut self, instance: &ManagedInstance) -> Result<Vec<RepeatHandle>> {
        self.scheduler.start_repeats(instance)
    }

    /// Start the schedules of every registered controller, then of every
    /// materialized singleton in creation order.
    pub fn start_all_repeats(&mut self) -> Result<Vec<RepeatHandle>> {
        let mut instances = self.registrar.instances().to_vec();
        instances.extend(self.registry.list_instances());

        let mut handles = Vec::new();
        for instance in &instances {
            handles.extend(self.scheduler.start_repeats(instance)?);
        }
        tracing::info!(
            "Started {} repeat schedules across {} instances",
            handles.len(),
            instances.len()
        );
        Ok(handles)
    }

    /// Schedules declared for `T`, in declaration order.
    pub fn repeat_schedules<T: 'static>(&self) -> Vec<RepeatSchedule> {
        self.scheduler.schedules(&ServiceIdentity::of::<T>())
    }

    /// Controllers built so far, in registration order.
    pub fn controller_instances(&self) -> &[ManagedInstance] {
        self.registrar.instances()
    }

    /// Materialized singletons in creation order.
    pub fn singleton_instances(&self) -> Vec<ManagedInstance> {
        self.registry.list_instances()
    }

    /// Get the shared singleton registry
    pub fn registry(&self) -> &Arc<SingletonRegistry> {
        &self.registry
    }

    /// Get the declared routes of every controller
    pub fn route_table(&self) -> &RouteTable {
        &self.routes
    }

    /// Cancel every running repeat schedule and drop all singletons.
    pub fn shutdown(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        let dropped = self.registry.shutdown();
        tracing::info!(
            "Application shut down ({} repeat schedules cancelled, {} singletons dropped)",
            cancelled,
            dropped
        );
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
