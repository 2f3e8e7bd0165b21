//! Controllers and route registration.
//!
//! A controller declares its prefix, injection points, routes and repeat
//! schedules through [`Controller::describe`]. The declarations land in a
//! [`RouteTable`] (prefix and route definitions) and a typed [`HandlerSet`]
//! (handler name to method). [`ControllerRegistrar::register_controller`]
//! then builds the instance and hands every bound handler to a
//! [`RoutingHost`], which `axum::Router` implements.

mod descriptor;
mod handler;
mod host;
mod registrar;
mod route;
mod table;

pub use descriptor::{Controller, ControllerDescriptor};
pub use handler::{BoundHandler, BoxFuture, HandlerSet, RouteHandler, bind};
pub use host::RoutingHost;
pub use registrar::ControllerRegistrar;
pub use route::{ControllerMetadata, HttpMethod, RouteDefinition, join_paths, normalize_path};
pub use table::RouteTable;
