use crate::di::{Injectable, ServiceIdentity};
use crate::error::{ConfigurationError, Result};
use dashmap::DashMap;
use std::any::Any;
use std::sync::{Arc, Mutex, PoisonError};

/// Type-erased shared instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// An instance together with the identity it was created for.
#[derive(Clone)]
pub struct ManagedInstance {
    identity: ServiceIdentity,
    instance: Instance,
}

impl ManagedInstance {
    /// Wrap a typed instance
    pub fn new<T: Send + Sync + 'static>(instance: Arc<T>) -> Self {
        Self {
            identity: ServiceIdentity::of::<T>(),
            instance,
        }
    }

    pub(crate) fn from_parts(identity: ServiceIdentity, instance: Instance) -> Self {
        Self { identity, instance }
    }

    pub fn identity(&self) -> ServiceIdentity {
        self.identity
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Recover the typed instance
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.instance.clone().downcast::<T>().ok()
    }
}

impl std::fmt::Debug for ManagedInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedInstance")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Process-scoped map from service identity to its single shared instance.
///
/// Services become eligible through [`mark_injectable`](Self::mark_injectable)
/// and are built lazily, exactly once, on first resolution. Instances live
/// until [`shutdown`](Self::shutdown).
pub struct SingletonRegistry {
    factories: DashMap<ServiceIdentity, Factory>,
    instances: DashMap<ServiceIdentity, Instance>,
    creation_order: Mutex<Vec<ServiceIdentity>>,
}

impl SingletonRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
            instances: DashMap::new(),
            creation_order: Mutex::new(Vec::new()),
        }
    }

    /// Record that `T` is managed as a singleton. Marking twice is a no-op.
    ///
    /// Returns `true` the first time `T` is marked.
    pub fn mark_injectable<T: Injectable>(&self) -> bool {
        let identity = ServiceIdentity::of::<T>();
        let mut created = false;
        self.factories.entry(identity).or_insert_with(|| {
            created = true;
            Arc::new(|| Arc::new(T::create()) as Instance)
        });
        created
    }

    /// Whether `identity` was marked injectable
    pub fn is_injectable(&self, identity: &ServiceIdentity) -> bool {
        self.factories.contains_key(identity)
    }

    /// Get the singleton of `T`, building it on first request
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let identity = ServiceIdentity::of::<T>();
        self.resolve_identity(&identity)?
            .downcast::<T>()
            .map_err(|_| ConfigurationError::DowncastFailed {
                type_name: identity.type_name().to_string(),
            })
    }

    /// Return the instance for `identity`, building it on first use.
    pub fn resolve_identity(&self, identity: &ServiceIdentity) -> Result<Instance> {
        if let Some(existing) = self.instances.get(identity) {
            return Ok(existing.value().clone());
        }

        // Clone the factory out so no factories shard stays locked while it runs.
        let factory = self
            .factories
            .get(identity)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ConfigurationError::not_injectable(identity.type_name()))?;

        let entry = self.instances.entry(*identity).or_insert_with(|| {
            let instance = factory();
            self.creation_order
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(*identity);
            tracing::debug!("Created singleton {}", identity.short_name());
            instance
        });
        Ok(entry.value().clone())
    }

    /// All materialized singletons in creation order.
    pub fn list_instances(&self) -> Vec<ManagedInstance> {
        let order = self
            .creation_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        order
            .into_iter()
            .filter_map(|identity| {
                self.instances
                    .get(&identity)
                    .map(|entry| ManagedInstance::from_parts(identity, entry.value().clone()))
            })
            .collect()
    }

    /// Number of materialized singletons
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop every materialized singleton. Injectable marks are kept, so a
    /// later `resolve` builds a fresh instance.
    pub fn shutdown(&self) -> usize {
        let mut order = self
            .creation_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let dropped = order.len();
        order.clear();
        self.instances.clear();
        dropped
    }
}

impl Default for SingletonRegistry {
    fn default() -> Self {
        Self::new()
    }
}
