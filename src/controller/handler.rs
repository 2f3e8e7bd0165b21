use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// A controller method that has not been tied to an instance yet.
pub type RouteHandler<C> = Arc<dyn Fn(Arc<C>, Request<Body>) -> BoxFuture<Response> + Send + Sync>;

/// A handler already bound to its controller instance, ready for a routing host.
pub type BoundHandler = Arc<dyn Fn(Request<Body>) -> BoxFuture<Response> + Send + Sync>;

/// Typed handlers of one controller, looked up by the names its routes declare.
pub struct HandlerSet<C> {
    handlers: HashMap<String, RouteHandler<C>>,
}

impl<C: Send + Sync + 'static> HandlerSet<C> {
    /// Create an empty handler set
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` under `name`, replacing an earlier one.
    ///
    /// Any `async fn(self: Arc<Self>, Request<Body>) -> impl IntoResponse`
    /// method fits.
    pub fn insert<F, Fut, R>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(Arc<C>, Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        let erased: RouteHandler<C> = Arc::new(
            move |controller: Arc<C>, request: Request<Body>| -> BoxFuture<Response> {
                let future = handler(controller, request);
                Box::pin(async move { future.await.into_response() })
            },
        );
        self.handlers.insert(name.into(), erased);
    }

    /// Look up a handler by name
    pub fn get(&self, name: &str) -> Option<&RouteHandler<C>> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C: Send + Sync + 'static> Default for HandlerSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tie `handler` to `controller` so the host can call it with a request alone.
pub fn bind<C: Send + Sync + 'static>(handler: &RouteHandler<C>, controller: Arc<C>) -> BoundHandler {
    let handler = Arc::clone(handler);
    Arc::new(move |request: Request<Body>| handler(Arc::clone(&controller), request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    struct Counter {
        label: &'static str,
    }

    impl Counter {
        async fn show(self: Arc<Self>, _request: Request<Body>) -> String {
            self.label.to_string()
        }

        async fn teapot(self: Arc<Self>, _request: Request<Body>) -> StatusCode {
            StatusCode::IM_A_TEAPOT
        }
    }

    #[tokio::test]
    async fn test_bound_handler_sees_its_instance() {
        let mut handlers = HandlerSet::<Counter>::new();
        handlers.insert("show", Counter::show);
        handlers.insert("teapot", Counter::teapot);
        assert_eq!(handlers.len(), 2);
        assert!(handlers.contains("show"));
        assert!(handlers.get("missing").is_none());

        let controller = Arc::new(Counter { label: "seven" });
        let show = bind(handlers.get("show").unwrap(), controller.clone());
        let response = show(Request::new(Body::empty())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"seven");

        let teapot = bind(handlers.get("teapot").unwrap(), controller);
        let response = teapot(Request::new(Body::empty())).await;
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }
}
