//! Observable fetch state.

use crate::error::FetchError;

/// The value a view renders from.
///
/// `data` stays in place while a refresh is loading. After any failure it
/// holds the empty value of `T`, so it is `None` only before the first
/// attempt settles.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// Last fetched value, or the empty value after a failure.
    pub data: Option<T>,
    /// True while an attempt is outstanding.
    pub loading: bool,
    /// Message of the most recent failure.
    pub error: Option<String>,
    /// 1 while the automatic retry is pending or running, else 0.
    pub retry_count: u8,
    /// True between a failure and the start of its automatic retry.
    pub retry_pending: bool,
}

impl<T> FetchState<T> {
    /// State before the first attempt.
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            retry_count: 0,
            retry_pending: false,
        }
    }

    /// Mark an attempt as outstanding. Data is left untouched.
    pub fn begin_attempt(&mut self, retry_count: u8) {
        self.loading = true;
        self.error = None;
        self.retry_count = retry_count;
        self.retry_pending = false;
    }

    /// Commit a successful result.
    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.retry_count = 0;
        self.retry_pending = false;
        self.loading = false;
    }

    /// Commit a failure, replacing data with the empty value.
    pub fn fail(&mut self, error: &FetchError)
    where
        T: Default,
    {
        self.data = Some(T::default());
        self.error = Some(error.to_string());
        self.loading = false;
    }

    /// Record that the automatic retry has been armed.
    pub fn schedule_retry(&mut self, retry_count: u8) {
        self.retry_count = retry_count;
        self.retry_pending = true;
    }

    /// Whether nothing further will happen without a refetch or key change.
    pub fn is_settled(&self) -> bool {
        !self.loading && !self.retry_pending && self.data.is_some()
    }

    /// Whether the last attempt has settled with an error.
    pub fn is_error(&self) -> bool {
        !self.loading && self.error.is_some()
    }

    /// Whether the last attempt has settled successfully.
    pub fn is_success(&self) -> bool {
        !self.loading && self.error.is_none() && self.data.is_some()
    }

    /// Data for rendering, substituting the empty value before first settle.
    pub fn data_or_default(&self) -> T
    where
        T: Clone + Default,
    {
        self.data.clone().unwrap_or_default()
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_keeps_stale_data() {
        let mut state = FetchState::idle();
        state.succeed(vec!["a"]);
        state.begin_attempt(0);
        assert!(state.loading);
        assert_eq!(state.data, Some(vec!["a"]));
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_fail_installs_empty_value() {
        let mut state: FetchState<Vec<String>> = FetchState::idle();
        state.begin_attempt(0);
        state.fail(&FetchError::from("server error"));
        assert_eq!(state.data, Some(Vec::new()));
        assert_eq!(state.error.as_deref(), Some("server error"));
        assert!(!state.loading);
        assert!(state.is_error());
    }

    #[test]
    fn test_schedule_retry_is_not_settled() {
        let mut state: FetchState<Vec<u8>> = FetchState::idle();
        state.begin_attempt(0);
        state.fail(&FetchError::from("server error"));
        assert!(state.is_settled());
        state.schedule_retry(1);
        assert!(!state.is_settled());
        assert_eq!(state.retry_count, 1);
        state.begin_attempt(1);
        assert!(!state.retry_pending);
    }

    #[test]
    fn test_succeed_resets_retry_count() {
        let mut state = FetchState::idle();
        state.begin_attempt(1);
        state.succeed(vec![1, 2]);
        assert_eq!(state.retry_count, 0);
        assert!(state.is_success());
    }

    #[test]
    fn test_data_or_default_before_first_settle() {
        let state: FetchState<Vec<u8>> = FetchState::idle();
        assert!(state.data_or_default().is_empty());
        assert!(!state.is_success());
        assert!(!state.is_error());
    }
}
