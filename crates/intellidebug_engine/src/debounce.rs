use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// A single-slot delayed callback.
///
/// Each [`Debouncer::reschedule`] cancels the previously installed timer before
/// arming a new one, so at most one callback is ever pending.
#[derive(Debug)]
pub struct Debouncer {
    handle: Handle,
    pending: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            pending: None,
        }
    }

    /// Runs `callback` after `delay` unless another reschedule or cancel comes first.
    pub fn reschedule<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        self.handle.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => callback(),
            }
        });
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Box<dyn FnOnce() + Send>) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        let make = move |label: &str| -> Box<dyn FnOnce() + Send> {
            let sink = sink.clone();
            let label = label.to_string();
            Box::new(move || sink.lock().unwrap().push(label))
        };
        (fired, make)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_only_last_callback() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Handle::current());
        let window = Duration::from_millis(2000);

        for text in ["a", "ab", "abc"] {
            debouncer.reschedule(window, make(text));
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_periods_fire_each_window() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Handle::current());
        let window = Duration::from_millis(100);

        debouncer.reschedule(window, make("first"));
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.reschedule(window, make("second"));
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(
            *fired.lock().unwrap(),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_firing() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Handle::current());

        debouncer.reschedule(Duration::from_millis(100), make("never"));
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(fired.lock().unwrap().is_empty());
    }
}
