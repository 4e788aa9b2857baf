//! Timeout race for producer calls.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Race `fut` against a timer of `limit`.
///
/// If the timer wins, `fut` is dropped, so its eventual result can never be
/// observed.
pub async fn with_timeout<F, T>(fut: F, limit: Duration) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_completes_within_limit() {
        let fut = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok::<_, FetchError>(42)
        };
        assert_eq!(with_timeout(fut, Duration::from_secs(10)).await, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out() {
        let fut = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, FetchError>(42)
        };
        let err = with_timeout(fut, Duration::from_secs(10)).await.unwrap_err();
        assert_eq!(err.to_string(), "Request timeout after 10 seconds");
    }

    #[tokio::test(start_paused = true)]
    async fn test_inner_error_passes_through() {
        let fut = async { Err::<i32, _>(FetchError::network("network down")) };
        let err = with_timeout(fut, Duration::from_secs(10)).await.unwrap_err();
        assert_eq!(err, FetchError::Network("network down".to_string()));
    }
}
