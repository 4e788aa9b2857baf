//! Caller-supplied data sources.

use std::future::Future;

use async_trait::async_trait;

use crate::error::FetchError;

/// An asynchronous data source keyed by a dependency value.
///
/// Zero-argument producers use `K = ()`. Closures returning a future of
/// `Result<T, E>` implement this trait when `E: Into<FetchError>`.
#[async_trait]
pub trait Producer<K, T>: Send + Sync + 'static {
    /// Produce the value for `key`.
    async fn produce(&self, key: &K) -> Result<T, FetchError>;
}

#[async_trait]
impl<K, T, E, F, Fut> Producer<K, T> for F
where
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    K: Clone + Send + Sync + 'static,
    T: Send + 'static,
    E: Into<FetchError> + Send + 'static,
{
    async fn produce(&self, key: &K) -> Result<T, FetchError> {
        (self)(key.clone()).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closure_producer() {
        let producer = |page: u32| async move { Ok::<_, String>(vec![page, page + 1]) };
        let result = producer.produce(&3).await;
        assert_eq!(result, Ok(vec![3, 4]));
    }

    #[tokio::test]
    async fn test_closure_error_is_converted() {
        let producer = |_: ()| async { Err::<Vec<String>, _>("server error") };
        let result = producer.produce(&()).await;
        assert_eq!(result, Err(FetchError::Producer("server error".to_string())));
    }

    struct Fixed(Vec<&'static str>);

    #[async_trait]
    impl Producer<(), Vec<&'static str>> for Fixed {
        async fn produce(&self, _key: &()) -> Result<Vec<&'static str>, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_struct_producer() {
        let producer = Fixed(vec!["a", "b"]);
        assert_eq!(producer.produce(&()).await, Ok(vec!["a", "b"]));
    }
}
