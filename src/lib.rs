//! # Ferrule
//!
//! Singleton dependency injection, controller-based routing and fixed-delay
//! repeat schedules for Axum applications.
//!
//! ## Features
//!
//! - **Singleton Services**: types marked injectable are built once, on first use
//! - **Constructor Injection**: controllers declare which singleton fills each argument
//! - **Controller-based Routing**: a path prefix per controller, one route per handler
//! - **Repeat Schedules**: run a service method every N milliseconds, a bounded number of times or forever
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ferrule::prelude::*;
//! use std::time::Duration;
//!
//! // 1. Define a singleton service
//! pub struct GreetingService;
//!
//! impl GreetingService {
//!     fn greet(&self) -> &'static str {
//!         "hello"
//!     }
//!
//!     fn heartbeat(&self) {
//!         tracing::info!("still alive");
//!     }
//! }
//!
//! impl Injectable for GreetingService {
//!     fn create() -> Self {
//!         GreetingService
//!     }
//!
//!     fn describe(service: &mut ServiceDescriptor<Self>) {
//!         service.repeat(
//!             "heartbeat",
//!             Repeat::every(Duration::from_secs(30)).forever(),
//!             Self::heartbeat,
//!         );
//!     }
//! }
//!
//! // 2. Define a controller that receives it
//! pub struct GreetingController {
//!     greetings: Arc<GreetingService>,
//! }
//!
//! impl GreetingController {
//!     async fn hello(self: Arc<Self>, _request: Request<Body>) -> &'static str {
//!         self.greetings.greet()
//!     }
//! }
//!
//! impl FromInjection for GreetingController {
//!     fn from_injection(args: InjectionArgs) -> Result<Self> {
//!         Ok(GreetingController {
//!             greetings: args.require(0)?,
//!         })
//!     }
//! }
//!
//! impl Controller for GreetingController {
//!     fn describe(controller: &mut ControllerDescriptor<Self>) {
//!         controller
//!             .prefix("greetings")
//!             .inject::<GreetingService>(0)
//!             .get("hello", "hello", Self::hello);
//!     }
//! }
//!
//! // 3. Bootstrap
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut app = Application::new();
//!     app.injectable::<GreetingService>();
//!
//!     let mut router: Router = Router::new();
//!     app.register_controller::<GreetingController, _>(&mut router)?;
//!     app.start_all_repeats()?;
//!
//!     // Serve `router`...
//!     app.shutdown();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod di;
pub mod error;
pub mod lifecycle;
pub mod scheduler;

// Re-export core types
pub use config::ConfigService;
pub use controller::{Controller, ControllerDescriptor, HttpMethod, RoutingHost};
pub use di::{FromInjection, Injectable, InjectionArgs, ServiceDescriptor, SingletonRegistry};
pub use error::{ConfigurationError, Result};
pub use lifecycle::{Application, shutdown_signal};
pub use scheduler::{Repeat, RepeatCount};

// Re-export commonly used types from dependencies
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use ferrule::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ConfigService;
    pub use crate::controller::{Controller, ControllerDescriptor, HttpMethod, RoutingHost};
    pub use crate::di::{
        FromInjection, Injectable, InjectionArgs, ManagedInstance, ServiceDescriptor,
        ServiceIdentity,
    };
    pub use crate::error::{ConfigurationError, Result};
    pub use crate::lifecycle::{Application, shutdown_signal};
    pub use crate::scheduler::{Repeat, RepeatCount, RepeatHandle};
    pub use axum::{
        Json, Router,
        body::Body,
        http::{Request, StatusCode},
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
