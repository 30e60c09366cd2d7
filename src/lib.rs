extern crate self as replybot;

use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

#[macro_use]
mod macros;
mod api;
mod engine;
mod responses;

pub use api::{
    Clock, Context, Options, Outcome, Resolution, Resolver, resolve, resolve_async, resolve_verbose_with,
    resolve_with,
};
pub use engine::{
    CONFIDENCE_FLOOR, Layer, Ranking, Rating, Registry, RegistryError, RunMetrics, merge, rank, similarity,
};
pub use responses::calculator::{CalcError, evaluate};

// --- Registry types ---------------------------------------------------------

/// A normalized matching target.
///
/// Keys are lowercased and trimmed on construction; they are never shown to
/// the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResponseKey(String);

impl ResponseKey {
    /// Normalize `phrase` into a key. Fails when nothing but whitespace is left.
    pub fn new(phrase: impl AsRef<str>) -> Result<Self, RegistryError> {
        let key = phrase.as_ref().trim().to_lowercase();
        if key.is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        Ok(ResponseKey(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for ResponseKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResponseKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Synchronous producer: receives the original-case message and the ambient
/// context.
pub type Producer = Arc<dyn Fn(&str, &mut Context) -> String + Send + Sync>;

/// Asynchronous producer. It gets owned copies of the message and of a forked
/// context so the returned future does not borrow from the resolver.
pub type AsyncProducer = Arc<dyn Fn(String, Context) -> BoxFuture<'static, String> + Send + Sync>;

/// What a key resolves to.
#[derive(Clone)]
pub enum ResponseValue {
    /// Fixed text, returned verbatim.
    Static(String),
    /// Computed at query time.
    Computed(Producer),
    /// Computed at query time by a future.
    AsyncComputed(AsyncProducer),
}

impl ResponseValue {
    pub fn text(text: impl Into<String>) -> Self {
        ResponseValue::Static(text.into())
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&str, &mut Context) -> String + Send + Sync + 'static,
    {
        ResponseValue::Computed(Arc::new(f))
    }

    /// Wrap an async producer.
    ///
    /// ```
    /// use replybot::ResponseValue;
    ///
    /// let value = ResponseValue::computed_async(|message, _ctx| async move { message.to_uppercase() });
    /// assert!(value.is_async());
    /// ```
    pub fn computed_async<F, Fut>(f: F) -> Self
    where
        F: Fn(String, Context) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = String> + Send + 'static,
    {
        ResponseValue::AsyncComputed(Arc::new(move |message: String, ctx: Context| -> BoxFuture<'static, String> {
            Box::pin(f(message, ctx))
        }))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, ResponseValue::AsyncComputed(_))
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            ResponseValue::Static(_) => "static",
            ResponseValue::Computed(_) => "computed",
            ResponseValue::AsyncComputed(_) => "async",
        }
    }
}

impl fmt::Debug for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseValue::Static(text) => f.debug_tuple("Static").field(text).finish(),
            ResponseValue::Computed(_) => f.debug_tuple("Computed").field(&"<function>").finish(),
            ResponseValue::AsyncComputed(_) => f.debug_tuple("AsyncComputed").field(&"<function>").finish(),
        }
    }
}

impl From<&'static str> for ResponseValue {
    fn from(text: &'static str) -> Self {
        ResponseValue::Static(text.to_string())
    }
}

impl From<String> for ResponseValue {
    fn from(text: String) -> Self {
        ResponseValue::Static(text)
    }
}
