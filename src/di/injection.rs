use crate::di::{FromInjection, Instance, ServiceIdentity, SingletonRegistry};
use crate::error::{ConfigurationError, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Highest constructor position an injection point may target.
pub const MAX_INJECTION_INDEX: usize = 255;

/// Constructor parameter positions mapped to the service injected there.
///
/// Positions that are not recorded are left for the constructor to fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionMap {
    points: BTreeMap<usize, ServiceIdentity>,
}

impl InjectionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `index` to `service`. A later record for the same index wins.
    pub fn record(&mut self, index: usize, service: ServiceIdentity) -> Option<ServiceIdentity> {
        self.points.insert(index, service)
    }

    pub fn get(&self, index: usize) -> Option<&ServiceIdentity> {
        self.points.get(&index)
    }

    /// Injection points in ascending parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ServiceIdentity)> {
        self.points.iter().map(|(index, service)| (*index, service))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Positional constructor arguments assembled from an [`InjectionMap`].
///
/// Injected positions hold the resolved singleton; every other position up to
/// the highest injected index is a hole.
pub struct InjectionArgs {
    target: ServiceIdentity,
    slots: Vec<Option<Instance>>,
}

impl InjectionArgs {
    /// Argument list with no slots
    pub fn empty(target: ServiceIdentity) -> Self {
        Self {
            target,
            slots: Vec::new(),
        }
    }

    pub fn target(&self) -> ServiceIdentity {
        self.target
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `index` holds no injected instance
    pub fn is_hole(&self, index: usize) -> bool {
        self.slots.get(index).is_none_or(Option::is_none)
    }

    /// The slot at `index`. Holes, positions past the end and slots holding
    /// another type all come back as `None`.
    pub fn get<T: Send + Sync + 'static>(&self, index: usize) -> Option<Arc<T>> {
        self.slots
            .get(index)?
            .clone()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// Like [`get`](Self::get), but a missing slot is a configuration error.
    pub fn require<T: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>> {
        self.get(index)
            .ok_or_else(|| ConfigurationError::MissingInjection {
                target: self.target.type_name().to_string(),
                index,
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    fn place(&mut self, index: usize, instance: Instance) -> Result<()> {
        if index > MAX_INJECTION_INDEX {
            return Err(ConfigurationError::InjectionIndexOutOfRange {
                target: self.target.type_name().to_string(),
                index,
                limit: MAX_INJECTION_INDEX,
            });
        }
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(instance);
        Ok(())
    }
}

/// Builds instances whose constructor parameters are partly injected.
///
/// Construction is never cached; singleton sharing comes solely from what the
/// registry hands out for each injected position.
pub struct InjectionResolver {
    registry: Arc<SingletonRegistry>,
    maps: HashMap<ServiceIdentity, InjectionMap>,
}

impl InjectionResolver {
    /// Create a resolver backed by `registry`
    pub fn new(registry: Arc<SingletonRegistry>) -> Self {
        Self {
            registry,
            maps: HashMap::new(),
        }
    }

    /// Get the backing registry
    pub fn registry(&self) -> &Arc<SingletonRegistry> {
        &self.registry
    }

    /// Inject `service` as argument `index` of `constructor`; the last record wins
    pub fn record_injection_point(
        &mut self,
        constructor: ServiceIdentity,
        index: usize,
        service: ServiceIdentity,
    ) {
        if let Some(previous) = self
            .maps
            .entry(constructor)
            .or_default()
            .record(index, service)
        {
            tracing::debug!(
                "Injection point {} of {} replaced: {} -> {}",
                index,
                constructor.short_name(),
                previous.short_name(),
                service.short_name()
            );
        }
    }

    /// Copy of the injection points recorded for `target`
    pub fn injection_map(&self, target: &ServiceIdentity) -> InjectionMap {
        self.maps.get(target).cloned().unwrap_or_default()
    }

    /// Resolve every recorded injection point of `target` into an argument list.
    pub fn assemble(&self, target: ServiceIdentity) -> Result<InjectionArgs> {
        let mut args = InjectionArgs::empty(target);
        if let Some(map) = self.maps.get(&target) {
            for (index, service) in map.iter() {
                let instance = self.registry.resolve_identity(service)?;
                args.place(index, instance)?;
            }
        }
        Ok(args)
    }

    /// Build a new `T`; never cached
    pub fn construct<T: FromInjection>(&self) -> Result<T> {
        let args = self.assemble(ServiceIdentity::of::<T>())?;
        T::from_injection(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::Injectable;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static REPORT_BUILDS: AtomicUsize = AtomicUsize::new(0);

    struct Greeter;

    impl Injectable for Greeter {
        fn create() -> Self {
            Greeter
        }
    }

    struct Unmarked;

    /// Built by hand inside the constructor, never injected.
    struct Notebook {
        id: usize,
    }

    impl Notebook {
        fn new() -> Self {
            Notebook {
                id: REPORT_BUILDS.fetch_add(1, Ordering::SeqCst),
            }
        }
    }

    struct Report {
        notebook: Notebook,
        greeter: Arc<Greeter>,
        slot_zero_was_hole: bool,
    }

    impl FromInjection for Report {
        fn from_injection(args: InjectionArgs) -> Result<Self> {
            Ok(Report {
                slot_zero_was_hole: args.is_hole(0),
                notebook: Notebook::new(),
                greeter: args.require(1)?,
            })
        }
    }

    struct NeedsUnmarked;

    impl FromInjection for NeedsUnmarked {
        fn from_injection(_args: InjectionArgs) -> Result<Self> {
            Ok(NeedsUnmarked)
        }
    }

    fn resolver() -> InjectionResolver {
        let registry = Arc::new(SingletonRegistry::new());
        registry.mark_injectable::<Greeter>();
        InjectionResolver::new(registry)
    }

    #[test]
    fn test_last_record_for_an_index_wins() {
        let mut map = InjectionMap::new();
        assert!(map.record(1, ServiceIdentity::of::<Unmarked>()).is_none());
        assert!(map.record(1, ServiceIdentity::of::<Greeter>()).is_some());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(1), Some(&ServiceIdentity::of::<Greeter>()));
    }

    #[test]
    fn test_assemble_leaves_uninjected_positions_as_holes() {
        let mut resolver = resolver();
        let target = ServiceIdentity::of::<Report>();
        resolver.record_injection_point(target, 1, ServiceIdentity::of::<Greeter>());

        let args = resolver.assemble(target).unwrap();
        assert_eq!(args.len(), 2);
        assert!(args.is_hole(0));
        assert!(!args.is_hole(1));
        assert!(args.get::<Greeter>(0).is_none());

        let greeter = args.get::<Greeter>(1).unwrap();
        let singleton = resolver.registry().resolve::<Greeter>().unwrap();
        assert!(Arc::ptr_eq(&greeter, &singleton));
    }

    #[test]
    fn test_construct_builds_a_new_instance_every_time() {
        let mut resolver = resolver();
        resolver.record_injection_point(
            ServiceIdentity::of::<Report>(),
            1,
            ServiceIdentity::of::<Greeter>(),
        );

        let first = resolver.construct::<Report>().unwrap();
        let second = resolver.construct::<Report>().unwrap();

        assert!(first.slot_zero_was_hole);
        assert_ne!(first.notebook.id, second.notebook.id);
        assert!(Arc::ptr_eq(&first.greeter, &second.greeter));
    }

    #[test]
    fn test_construct_without_map_gets_empty_args() {
        let resolver = resolver();
        let err = resolver.construct::<Report>().err().unwrap();
        assert!(matches!(
            err,
            ConfigurationError::MissingInjection { index: 1, .. }
        ));
    }

    #[test]
    fn test_unmarked_dependency_propagates() {
        let mut resolver = resolver();
        resolver.record_injection_point(
            ServiceIdentity::of::<NeedsUnmarked>(),
            0,
            ServiceIdentity::of::<Unmarked>(),
        );
        let err = resolver.construct::<NeedsUnmarked>().err().unwrap();
        assert!(matches!(err, ConfigurationError::NotInjectable { .. }));
    }

    #[test]
    fn test_absurd_index_is_rejected() {
        let mut resolver = resolver();
        let target = ServiceIdentity::of::<Report>();
        resolver.record_injection_point(
            target,
            usize::MAX,
            ServiceIdentity::of::<Greeter>(),
        );

        let err = resolver.assemble(target).err().unwrap();
        assert!(matches!(
            err,
            ConfigurationError::InjectionIndexOutOfRange { index: usize::MAX, .. }
        ));

        resolver.record_injection_point(
            ServiceIdentity::of::<NeedsUnmarked>(),
            MAX_INJECTION_INDEX,
            ServiceIdentity::of::<Greeter>(),
        );
        let args = resolver
            .assemble(ServiceIdentity::of::<NeedsUnmarked>())
            .unwrap();
        assert_eq!(args.len(), MAX_INJECTION_INDEX + 1);
    }

    #[test]
    fn test_wrong_type_in_slot_reads_as_none() {
        let mut resolver = resolver();
        let target = ServiceIdentity::of::<Report>();
        resolver.record_injection_point(target, 0, ServiceIdentity::of::<Greeter>());

        let args = resolver.assemble(target).unwrap();
        assert!(args.get::<Notebook>(0).is_none());
        assert!(args.get::<Greeter>(0).is_some());
        assert!(args.is_hole(3));
    }
}
