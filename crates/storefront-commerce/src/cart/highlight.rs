//! "Added to cart" highlight with a self-clearing timer.
//!
//! State transitions are published on a [`tokio::sync::watch`] channel so a
//! view can react to every change, including the brief `Idle` used to
//! restart the animation when the same product is added twice in a row.
//!
//! The clear timer is a Tokio task. Superseding a highlight aborts the old
//! task, and the task itself only publishes or clears when its token is
//! still current, so a task that runs on while being aborted cannot
//! overwrite a newer highlight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::ids::ProductId;

/// The product currently highlighted and the token of the add that set it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Highlight {
    pub product_id: ProductId,
    pub token: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighted(Highlight),
}

impl HighlightState {
    pub fn is_idle(&self) -> bool {
        matches!(self, HighlightState::Idle)
    }

    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            HighlightState::Highlighted(h) => Some(&h.product_id),
            HighlightState::Idle => None,
        }
    }

    pub fn token(&self) -> Option<u64> {
        match self {
            HighlightState::Highlighted(h) => Some(h.token),
            HighlightState::Idle => None,
        }
    }

    pub fn is_product(&self, product_id: &str) -> bool {
        self.product_id().is_some_and(|id| id.as_str() == product_id)
    }
}

/// Drives [`HighlightState`] for one cart.
///
/// Timers run on the Tokio runtime captured at construction, or on the
/// caller's runtime when none was captured. Without either, highlights are
/// still published but never expire on their own.
#[derive(Debug)]
pub struct Highlighter {
    duration: Duration,
    sequence: Arc<AtomicU64>,
    state: Arc<watch::Sender<HighlightState>>,
    pending: Option<JoinHandle<()>>,
    runtime: Option<Handle>,
}

impl Highlighter {
    pub fn new(duration: Duration) -> Self {
        let (state, _) = watch::channel(HighlightState::Idle);
        Self {
            duration,
            sequence: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
            pending: None,
            runtime: Handle::try_current().ok(),
        }
    }

    /// Run clear timers on `runtime` instead of the ambient one.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> HighlightState {
        self.state.borrow().clone()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<HighlightState> {
        self.state.subscribe()
    }

    pub fn is_highlighted(&self, product_id: &str) -> bool {
        self.state.borrow().is_product(product_id)
    }

    /// Highlight `product_id` and arm the clear timer. Returns the token
    /// assigned to this highlight.
    ///
    /// If the product is already highlighted, the state first drops to
    /// `Idle` and the new highlight is published on the next scheduler tick
    /// so observers see the restart.
    pub fn trigger(&mut self, product_id: ProductId) -> u64 {
        let token = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_pending();

        let restart = self.state.borrow().is_product(product_id.as_str());
        let highlight = Highlight { product_id, token };

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!(
                product_id = %highlight.product_id,
                token,
                "no Tokio runtime, highlight will not expire"
            );
            if restart {
                self.state.send_replace(HighlightState::Idle);
            }
            self.state.send_replace(HighlightState::Highlighted(highlight));
            return token;
        };

        let state = Arc::clone(&self.state);
        let sequence = Arc::clone(&self.sequence);
        let duration = self.duration;

        if restart {
            debug!(product_id = %highlight.product_id, token, "restarting highlight");
            state.send_replace(HighlightState::Idle);
            self.pending = Some(runtime.spawn(async move {
                tokio::task::yield_now().await;
                if !publish_if_current(&state, &sequence, highlight) {
                    return;
                }
                tokio::time::sleep(duration).await;
                clear_if_current(&state, token);
            }));
        } else {
            debug!(product_id = %highlight.product_id, token, "highlighting product");
            state.send_replace(HighlightState::Highlighted(highlight));
            self.pending = Some(runtime.spawn(async move {
                tokio::time::sleep(duration).await;
                clear_if_current(&state, token);
            }));
        }

        token
    }

    /// Abort the armed timer, if any. The current state is left as is.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Cancel the timer and return to `Idle`.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.state.send_replace(HighlightState::Idle);
    }
}

impl Drop for Highlighter {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Publish a deferred highlight unless a later trigger has taken a newer
/// token. An aborted task can still reach this point before its next await.
fn publish_if_current(
    state: &watch::Sender<HighlightState>,
    sequence: &AtomicU64,
    highlight: Highlight,
) -> bool {
    let token = highlight.token;
    let published = state.send_if_modified(|current| {
        if sequence.load(Ordering::SeqCst) != token {
            return false;
        }
        *current = HighlightState::Highlighted(highlight);
        true
    });
    if !published {
        trace!(token, "superseded restart dropped");
    }
    published
}

/// Clear the highlight only if `token` still owns it.
fn clear_if_current(state: &watch::Sender<HighlightState>, token: u64) -> bool {
    let cleared = state.send_if_modified(|current| {
        if current.token() == Some(token) {
            *current = HighlightState::Idle;
            true
        } else {
            false
        }
    });
    if cleared {
        debug!(token, "highlight expired");
    } else {
        trace!(token, "stale highlight timer ignored");
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(1200);

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_highlight_clears_after_duration() {
        let mut highlighter = Highlighter::new(DURATION);
        let token = highlighter.trigger(ProductId::new("a"));
        assert_eq!(token, 1);
        assert!(highlighter.is_highlighted("a"));

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(highlighter.is_highlighted("a"));

        tokio::time::sleep(Duration::from_millis(200)).await;
        settle().await;
        assert!(highlighter.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_product_supersedes() {
        let mut highlighter = Highlighter::new(DURATION);
        highlighter.trigger(ProductId::new("a"));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        highlighter.trigger(ProductId::new("b"));

        assert!(!highlighter.is_highlighted("a"));
        assert!(highlighter.is_highlighted("b"));

        // Past the first timer's deadline; "b" must survive.
        tokio::time::sleep(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(highlighter.state().token(), Some(2));

        tokio::time::sleep(Duration::from_millis(800)).await;
        settle().await;
        assert!(highlighter.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_product_restarts_through_idle() {
        let mut highlighter = Highlighter::new(DURATION);
        let mut rx = highlighter.subscribe();

        highlighter.trigger(ProductId::new("a"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().token(), Some(1));

        highlighter.trigger(ProductId::new("a"));
        assert!(highlighter.state().is_idle());

        settle().await;
        let state = highlighter.state();
        assert!(state.is_product("a"));
        assert_eq!(state.token(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_cannot_clear_newer_highlight() {
        let highlighter = Highlighter::new(DURATION);
        highlighter.state.send_replace(HighlightState::Highlighted(Highlight {
            product_id: ProductId::new("a"),
            token: 7,
        }));

        assert!(!clear_if_current(&highlighter.state, 6));
        assert_eq!(highlighter.state().token(), Some(7));
        assert!(clear_if_current(&highlighter.state, 7));
        assert!(highlighter.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_restart_does_not_publish() {
        let highlighter = Highlighter::new(DURATION);
        highlighter.sequence.store(3, Ordering::SeqCst);
        highlighter.state.send_replace(HighlightState::Highlighted(Highlight {
            product_id: ProductId::new("b"),
            token: 3,
        }));

        let stale = Highlight {
            product_id: ProductId::new("a"),
            token: 2,
        };
        assert!(!publish_if_current(&highlighter.state, &highlighter.sequence, stale));
        assert!(highlighter.is_highlighted("b"));
        assert_eq!(highlighter.state().token(), Some(3));

        let current = Highlight {
            product_id: ProductId::new("b"),
            token: 3,
        };
        assert!(publish_if_current(&highlighter.state, &highlighter.sequence, current));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_rapid_triggers_settle_on_latest() {
        let mut highlighter = Highlighter::new(Duration::from_millis(200));
        for _ in 0..50 {
            highlighter.trigger(ProductId::new("a"));
            highlighter.trigger(ProductId::new("a"));
            let latest = highlighter.trigger(ProductId::new("b"));
            tokio::task::yield_now().await;
            assert_eq!(highlighter.state().token(), Some(latest));
        }

        let mut rx = highlighter.subscribe();
        tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|state| state.is_idle()))
            .await
            .expect("highlight expires")
            .unwrap();
    }

    #[test]
    fn test_trigger_without_runtime_does_not_panic() {
        let mut highlighter = Highlighter::new(DURATION);
        assert!(highlighter.runtime.is_none());

        assert_eq!(highlighter.trigger(ProductId::new("a")), 1);
        assert!(highlighter.is_highlighted("a"));
        assert!(highlighter.pending.is_none());

        assert_eq!(highlighter.trigger(ProductId::new("a")), 2);
        assert_eq!(highlighter.state().token(), Some(2));

        highlighter.reset();
        assert!(highlighter.state().is_idle());
    }

    #[test]
    fn test_timer_runs_on_captured_runtime() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let mut highlighter = Highlighter::new(DURATION).with_runtime(runtime.handle().clone());

        highlighter.trigger(ProductId::new("a"));
        assert!(highlighter.pending.is_some());

        runtime.block_on(async {
            tokio::time::sleep(Duration::from_millis(1300)).await;
            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
        });
        assert!(highlighter.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_timer() {
        let mut highlighter = Highlighter::new(DURATION);
        highlighter.trigger(ProductId::new("a"));
        highlighter.reset();
        assert!(highlighter.state().is_idle());
        assert!(highlighter.pending.is_none());
    }

    #[test]
    fn test_state_accessors() {
        let state = HighlightState::Highlighted(Highlight {
            product_id: ProductId::new("lamp"),
            token: 3,
        });
        assert!(state.is_product("lamp"));
        assert!(!state.is_product("sofa"));
        assert_eq!(state.token(), Some(3));
        assert!(HighlightState::default().is_idle());
    }
}
