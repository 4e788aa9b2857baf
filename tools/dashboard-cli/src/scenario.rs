//! Simulated backend behaviour for `dashboard fetch`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;
use dashboard_data::{FetchError, Producer};

/// How long the `slow` scenario takes to respond.
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

/// Backend behaviour to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scenario {
    /// Respond immediately.
    #[default]
    Ok,
    /// Respond after two seconds.
    Slow,
    /// Fail the first call with a network error, then respond.
    Flaky,
    /// Always answer with a server error.
    Down,
    /// Never respond.
    Hang,
}

impl Scenario {
    pub fn describe(&self) -> &'static str {
        match self {
            Scenario::Ok => "backend responds immediately",
            Scenario::Slow => "backend responds after 2s",
            Scenario::Flaky => "first call fails, later calls succeed",
            Scenario::Down => "every call fails with a server error",
            Scenario::Hang => "backend never responds",
        }
    }

    /// Play call number `call` (0-based) against `data`.
    pub async fn respond<T>(self, call: u32, data: T) -> Result<T, FetchError> {
        match self {
            Scenario::Ok => Ok(data),
            Scenario::Slow => {
                tokio::time::sleep(SLOW_DELAY).await;
                Ok(data)
            }
            Scenario::Flaky if call == 0 => Err(FetchError::network("connection reset by peer")),
            Scenario::Flaky => Ok(data),
            Scenario::Down => Err(FetchError::producer("server error")),
            Scenario::Hang => std::future::pending().await,
        }
    }
}

/// Wrap `load` in a producer that behaves like `scenario`.
pub fn scenario_producer<T, F>(scenario: Scenario, load: F) -> impl Producer<(), T>
where
    F: Fn() -> T + Send + Sync + 'static,
    T: Send + 'static,
{
    let calls = Arc::new(AtomicU32::new(0));
    move |_: ()| {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        scenario.respond(call, load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flaky_recovers_on_second_call() {
        let producer = scenario_producer(Scenario::Flaky, || vec![1, 2, 3]);
        assert_eq!(
            producer.produce(&()).await,
            Err(FetchError::Network("connection reset by peer".to_string()))
        );
        assert_eq!(producer.produce(&()).await, Ok(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_down_always_fails() {
        let producer = scenario_producer(Scenario::Down, Vec::<u8>::new);
        for _ in 0..3 {
            assert_eq!(
                producer.produce(&()).await,
                Err(FetchError::Producer("server error".to_string()))
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_takes_two_seconds() {
        let producer = scenario_producer(Scenario::Slow, || "done");
        let started = tokio::time::Instant::now();
        assert_eq!(producer.produce(&()).await, Ok("done"));
        assert!(started.elapsed() >= SLOW_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hang_never_resolves() {
        let producer = scenario_producer(Scenario::Hang, || "never");
        let outcome = tokio::time::timeout(Duration::from_secs(60), producer.produce(&())).await;
        assert!(outcome.is_err());
    }
}
