//! Copy-to-clipboard state for code snippets.
//!
//! Every rendered snippet owns one [`SnippetState`]. A successful copy flips
//! `copied` to true and schedules a reset. A newer copy supersedes the pending
//! reset, and dropping the state cancels it, so a reset never fires against a
//! destroyed snippet.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long a snippet reports "copied" after a successful copy.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Clipboard write failure.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display server).
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard refused the write.
    #[error("Clipboard write failed: {0}")]
    Write(String),
}

/// Platform capability that writes text to the clipboard.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// System clipboard via `arboard`.
///
/// A fresh handle is opened per write on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send {
        let text = text.to_owned();
        async move {
            tokio::task::spawn_blocking(move || {
                let mut clipboard = arboard::Clipboard::new()
                    .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
                clipboard
                    .set_text(text)
                    .map_err(|e| ClipboardError::Write(e.to_string()))
            })
            .await
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?
        }
    }
}

/// Per-snippet copied/not-copied state with timed reset.
pub struct SnippetState<C> {
    clipboard: C,
    reset_delay: Duration,
    copied: Arc<watch::Sender<bool>>,
    generation: Arc<AtomicU64>,
    reset_task: Option<JoinHandle<()>>,
}

impl<C: Clipboard> SnippetState<C> {
    /// Create a state that resets after [`DEFAULT_RESET_DELAY`].
    pub fn new(clipboard: C) -> Self {
        Self::with_reset_delay(clipboard, DEFAULT_RESET_DELAY)
    }

    /// Create a state with a custom reset delay.
    pub fn with_reset_delay(clipboard: C, reset_delay: Duration) -> Self {
        let (copied, _rx) = watch::channel(false);
        Self {
            clipboard,
            reset_delay,
            copied: Arc::new(copied),
            generation: Arc::new(AtomicU64::new(0)),
            reset_task: None,
        }
    }

    /// Copy `text` to the clipboard.
    ///
    /// On success `copied` becomes true until `reset_delay` after the most
    /// recent successful copy. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the clipboard error; `copied` is left untouched.
    pub async fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Err(e) = self.clipboard.write_text(text).await {
            tracing::debug!(error = %e, "Snippet copy failed");
            return Err(e);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.reset_task.take() {
            previous.abort();
        }
        self.copied.send_replace(true);

        let copied = Arc::clone(&self.copied);
        let current = Arc::clone(&self.generation);
        let delay = self.reset_delay;
        self.reset_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) == generation {
                copied.send_replace(false);
            }
        }));

        Ok(())
    }

    /// True while the last copy is still being acknowledged.
    pub fn is_copied(&self) -> bool {
        *self.copied.borrow()
    }

    /// Watch the copied flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.copied.subscribe()
    }

    /// Delay before `copied` resets.
    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }
}

impl<C> Drop for SnippetState<C> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.reset_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    use super::*;

    #[derive(Default)]
    struct FakeClipboard {
        writes: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeClipboard {
        fn failing() -> Self {
            Self {
                writes: Mutex::default(),
                fail: true,
            }
        }
    }

    impl Clipboard for &FakeClipboard {
        fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send {
            let result = if self.fail {
                Err(ClipboardError::Write("permission denied".to_owned()))
            } else {
                self.writes.lock().unwrap().push(text.to_owned());
                Ok(())
            };
            std::future::ready(result)
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_sets_then_resets() {
        let clipboard = FakeClipboard::default();
        let mut state = SnippetState::new(&clipboard);
        assert!(!state.is_copied());

        state.copy("abc").await.unwrap();
        assert!(state.is_copied());
        assert_eq!(*clipboard.writes.lock().unwrap(), vec!["abc".to_owned()]);

        sleep(ms(1999)).await;
        assert!(state.is_copied());

        sleep(ms(2)).await;
        assert!(!state.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_restarts_timer() {
        let clipboard = FakeClipboard::default();
        let mut state = SnippetState::new(&clipboard);

        state.copy("first").await.unwrap();
        sleep(ms(500)).await;
        state.copy("second").await.unwrap();

        // Past the first copy's deadline
        sleep(ms(1600)).await;
        assert!(state.is_copied());

        sleep(ms(399)).await;
        assert!(state.is_copied());

        sleep(ms(2)).await;
        assert!(!state.is_copied());
        assert_eq!(clipboard.writes.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_both_transitions() {
        let clipboard = FakeClipboard::default();
        let mut state = SnippetState::new(&clipboard);
        let mut rx = state.subscribe();

        state.copy("abc").await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_copy_stays_uncopied() {
        let clipboard = FakeClipboard::failing();
        let mut state = SnippetState::new(&clipboard);

        let err = state.copy("abc").await.unwrap_err();

        assert_eq!(err, ClipboardError::Write("permission denied".to_owned()));
        assert!(!state.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_with_pending_reset_leaves_others_alone() {
        let clipboard = FakeClipboard::default();
        let mut dropped = SnippetState::new(&clipboard);
        let mut kept = SnippetState::with_reset_delay(&clipboard, ms(5000));
        let dropped_rx = dropped.subscribe();

        dropped.copy("one").await.unwrap();
        kept.copy("two").await.unwrap();
        drop(dropped);

        sleep(ms(2500)).await;

        assert!(kept.is_copied());
        // No reset was delivered for the dropped snippet
        assert!(*dropped_rx.borrow());

        sleep(ms(2600)).await;
        assert!(!kept.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_reset_delay() {
        let clipboard = FakeClipboard::default();
        let mut state = SnippetState::with_reset_delay(&clipboard, ms(100));
        assert_eq!(state.reset_delay(), ms(100));

        state.copy("x").await.unwrap();
        sleep(ms(101)).await;

        assert!(!state.is_copied());
    }
}
