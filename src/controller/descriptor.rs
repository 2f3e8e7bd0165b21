use crate::controller::{HandlerSet, HttpMethod};
use crate::di::{FromInjection, ServiceIdentity};
use crate::scheduler::{Repeat, RepeatDeclaration};
use axum::{body::Body, http::Request, response::IntoResponse};
use std::future::Future;
use std::sync::Arc;

/// A type grouping HTTP handlers under a common path prefix.
///
/// # Example
/// ```
/// use ferrule::prelude::*;
///
/// pub struct PingController;
///
/// impl PingController {
///     async fn ping(self: Arc<Self>, _request: Request<Body>) -> &'static str {
///         "pong"
///     }
/// }
///
/// impl FromInjection for PingController {
///     fn from_injection(_args: InjectionArgs) -> Result<Self> {
///         Ok(PingController)
///     }
/// }
///
/// impl Controller for PingController {
///     fn describe(controller: &mut ControllerDescriptor<Self>) {
///         controller.prefix("health").get("ping", "ping", Self::ping);
///     }
/// }
/// ```
pub trait Controller: FromInjection {
    fn describe(controller: &mut ControllerDescriptor<Self>);
}

/// Declarations collected from [`Controller::describe`].
pub struct ControllerDescriptor<C> {
    pub(crate) prefix: String,
    pub(crate) injections: Vec<(usize, ServiceIdentity)>,
    pub(crate) routes: Vec<(HttpMethod, String, String)>,
    pub(crate) handlers: HandlerSet<C>,
    pub(crate) repeats: Vec<RepeatDeclaration>,
}

impl<C: Send + Sync + 'static> ControllerDescriptor<C> {
    pub(crate) fn new() -> Self {
        Self {
            prefix: String::new(),
            injections: Vec::new(),
            routes: Vec::new(),
            handlers: HandlerSet::new(),
            repeats: Vec::new(),
        }
    }

    /// Set the path prefix shared by every route
    pub fn prefix(&mut self, prefix: &str) -> &mut Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Pass the `S` singleton as constructor argument `index`.
    pub fn inject<S: Send + Sync + 'static>(&mut self, index: usize) -> &mut Self {
        self.injections.push((index, ServiceIdentity::of::<S>()));
        self
    }

    /// Declare a route and supply its handler in one step
    pub fn route<F, Fut, R>(
        &mut self,
        method: HttpMethod,
        path: &str,
        handler_name: &str,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(Arc<C>, Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        self.routes
            .push((method, path.to_string(), handler_name.to_string()));
        self.handlers.insert(handler_name, handler);
        self
    }

    pub fn get<F, Fut, R>(&mut self, path: &str, handler_name: &str, handler: F) -> &mut Self
    where
        F: Fn(Arc<C>, Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        self.route(HttpMethod::Get, path, handler_name, handler)
    }

    pub fn post<F, Fut, R>(&mut self, path: &str, handler_name: &str, handler: F) -> &mut Self
    where
        F: Fn(Arc<C>, Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        self.route(HttpMethod::Post, path, handler_name, handler)
    }

    pub fn put<F, Fut, R>(&mut self, path: &str, handler_name: &str, handler: F) -> &mut Self
    where
        F: Fn(Arc<C>, Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        self.route(HttpMethod::Put, path, handler_name, handler)
    }

    pub fn delete<F, Fut, R>(&mut self, path: &str, handler_name: &str, handler: F) -> &mut Self
    where
        F: Fn(Arc<C>, Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        self.route(HttpMethod::Delete, path, handler_name, handler)
    }

    pub fn patch<F, Fut, R>(&mut self, path: &str, handler_name: &str, handler: F) -> &mut Self
    where
        F: Fn(Arc<C>, Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        self.route(HttpMethod::Patch, path, handler_name, handler)
    }

    /// Declare a route by handler name only; the handler must be supplied
    /// separately through [`handler`](Self::handler).
    pub fn route_name(&mut self, method: HttpMethod, path: &str, handler_name: &str) -> &mut Self {
        self.routes
            .push((method, path.to_string(), handler_name.to_string()));
        self
    }

    pub fn handler<F, Fut, R>(&mut self, handler_name: &str, handler: F) -> &mut Self
    where
        F: Fn(Arc<C>, Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        self.handlers.insert(handler_name, handler);
        self
    }

    /// Run `method` on each built controller according to `repeat`
    pub fn repeat<F>(&mut self, name: &str, repeat: Repeat, method: F) -> &mut Self
    where
        F: Fn(&C) + Send + Sync + 'static,
    {
        self.repeats
            .push(RepeatDeclaration::new::<C, F>(name, repeat, method));
        self
    }
}
