mod identity;
mod injectable;
mod injection;
mod registry;

pub use identity::ServiceIdentity;
pub use injectable::{FromInjection, Injectable, ServiceDescriptor};
pub use injection::{InjectionArgs, InjectionMap, InjectionResolver, MAX_INJECTION_INDEX};
pub use registry::{Instance, ManagedInstance, SingletonRegistry};
