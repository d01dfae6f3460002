//! Blocking user notifications

/// Host hook for blocking, alert-style warnings
///
/// Called synchronously; the submission does not continue until it returns.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show a warning and wait for it to be dismissed
    fn notify_blocking(&self, message: &str);
}
