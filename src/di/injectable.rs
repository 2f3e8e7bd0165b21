use crate::di::InjectionArgs;
use crate::error::Result;
use crate::scheduler::{Repeat, RepeatDeclaration};

/// A type whose single shared instance is managed by the [`SingletonRegistry`].
///
/// `create` is the zero-argument construction path used the first time the
/// service is resolved. Services that want periodic work declare it in
/// `describe`.
///
/// # Example
/// ```
/// use ferrule::di::{Injectable, ServiceDescriptor};
/// use ferrule::scheduler::Repeat;
/// use std::time::Duration;
///
/// pub struct CacheService;
///
/// impl CacheService {
///     fn evict(&self) {}
/// }
///
/// impl Injectable for CacheService {
///     fn create() -> Self {
///         CacheService
///     }
///
///     fn describe(service: &mut ServiceDescriptor<Self>) {
///         service.repeat("evict", Repeat::every(Duration::from_secs(60)).forever(), Self::evict);
///     }
/// }
/// ```
///
/// [`SingletonRegistry`]: crate::di::SingletonRegistry
pub trait Injectable: Sized + Send + Sync + 'static {
    fn create() -> Self;

    fn describe(_service: &mut ServiceDescriptor<Self>) {}
}

/// Construction from an assembled injection argument list.
///
/// Slots declared as injection points hold resolved singletons. Every other
/// slot is a hole the implementation fills on its own, usually by building a
/// private instance.
pub trait FromInjection: Sized + Send + Sync + 'static {
    fn from_injection(args: InjectionArgs) -> Result<Self>;
}

/// Declarations collected from [`Injectable::describe`].
pub struct ServiceDescriptor<S> {
    pub(crate) repeats: Vec<RepeatDeclaration>,
    _service: std::marker::PhantomData<fn() -> S>,
}

impl<S: Send + Sync + 'static> ServiceDescriptor<S> {
    pub(crate) fn new() -> Self {
        Self {
            repeats: Vec::new(),
            _service: std::marker::PhantomData,
        }
    }

    /// Run `method` on the singleton according to `repeat` once repeats are started.
    pub fn repeat<F>(&mut self, name: &str, repeat: Repeat, method: F) -> &mut Self
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.repeats
            .push(RepeatDeclaration::new::<S, F>(name, repeat, method));
        self
    }
}
