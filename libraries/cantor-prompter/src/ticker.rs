/// Async scroll driver
///
/// Owns a `ScrollEngine` behind a lock and drives it from a spawned tokio
/// task. At most one ticker task is alive at a time: every (re)start aborts
/// the previous task first, and speed changes restart the ticker so the new
/// period applies immediately instead of after the old interval elapses.
use crate::document::LyricSheet;
use crate::engine::ScrollEngine;
use crate::types::FontSize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// A scroll engine driven by a background tokio task
pub struct Prompter {
    engine: Arc<Mutex<ScrollEngine>>,
    ticker: Option<JoinHandle<()>>,
}

impl Prompter {
    /// Create a stopped prompter at the top of an unmeasured sheet
    pub fn new() -> Self {
        Self {
            engine: Arc::new(Mutex::new(ScrollEngine::new())),
            ticker: None,
        }
    }

    /// Report measured content and viewport heights
    pub async fn set_heights(&self, content: f32, viewport: f32) {
        self.engine.lock().await.set_heights(content, viewport);
    }

    /// Current scroll offset
    pub async fn offset(&self) -> f32 {
        self.engine.lock().await.offset()
    }

    /// Whether auto-scroll is active
    pub async fn is_running(&self) -> bool {
        self.engine.lock().await.is_running()
    }

    /// Snapshot of the full scroll state, for rendering
    pub async fn snapshot(&self) -> ScrollEngine {
        self.engine.lock().await.clone()
    }

    /// Start auto-scrolling. No-op when already at the end of content.
    pub async fn play(&mut self) {
        {
            let mut engine = self.engine.lock().await;
            engine.start();
            if !engine.is_running() {
                return;
            }
        }
        self.restart_ticker().await;
    }

    /// Stop auto-scrolling, keeping the current offset
    pub async fn pause(&mut self) {
        self.stop_ticker();
        self.engine.lock().await.stop();
    }

    /// Change speed. A running prompter gets its ticker restarted so the
    /// new period takes effect on the next tick.
    pub async fn set_speed(&mut self, speed: u8) {
        let (changed, running) = {
            let mut engine = self.engine.lock().await;
            let changed = engine.set_speed(speed);
            (changed, engine.is_running())
        };
        if changed && running {
            self.restart_ticker().await;
        }
    }

    /// Toggle mirror mode; never touches scroll state or the ticker
    pub async fn toggle_mirror(&self) {
        self.engine.lock().await.toggle_mirror();
    }

    /// Change the font size
    pub async fn set_font_size(&self, size: FontSize) {
        self.engine.lock().await.set_font_size(size);
    }

    /// Jump to an absolute offset
    pub async fn seek_to(&self, offset: f32) {
        self.engine.lock().await.seek_to(offset);
    }

    /// Jump to a song's heading
    pub async fn seek_to_song(&self, sheet: &LyricSheet, song_index: usize) {
        self.engine.lock().await.seek_to_song(sheet, song_index);
    }

    /// Back to the top, stopped
    pub async fn reset(&mut self) {
        self.stop_ticker();
        self.engine.lock().await.reset();
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    async fn restart_ticker(&mut self) {
        self.stop_ticker();

        let engine = Arc::clone(&self.engine);
        let period = engine.lock().await.tick_period();
        debug!(?period, "ticker started");

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if !engine.lock().await.tick() {
                    break;
                }
            }
        }));
    }
}

impl Default for Prompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Prompter {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn ticker_scrolls_to_the_end_and_stops() {
        let mut prompter = Prompter::new();
        prompter.set_heights(105.0, 100.0).await;
        prompter.play().await;

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(prompter.offset().await, 5.0);
        assert!(!prompter.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_the_offset() {
        let mut prompter = Prompter::new();
        prompter.set_heights(1000.0, 100.0).await;
        prompter.play().await;

        tokio::time::sleep(Duration::from_millis(300)).await;
        prompter.pause().await;
        let frozen = prompter.offset().await;
        assert!(frozen > 0.0);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(prompter.offset().await, frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_change_keeps_scrolling() {
        let mut prompter = Prompter::new();
        prompter.set_heights(1000.0, 100.0).await;
        prompter.play().await;
        prompter.set_speed(10).await;

        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(prompter.is_running().await);
        assert!(prompter.offset().await > 10.0);
    }

    #[tokio::test(start_paused = true)]
    async fn play_at_end_does_not_spin() {
        let mut prompter = Prompter::new();
        prompter.set_heights(50.0, 100.0).await;
        prompter.play().await;

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(prompter.offset().await, 0.0);
        assert!(!prompter.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_top() {
        let mut prompter = Prompter::new();
        prompter.set_heights(1000.0, 100.0).await;
        prompter.play().await;

        tokio::time::sleep(Duration::from_millis(300)).await;
        prompter.reset().await;

        assert_eq!(prompter.offset().await, 0.0);
        assert!(!prompter.is_running().await);
    }
}
