/// Scroll engine
///
/// Pure scroll state: offset, speed, run flag, mirror flag, font size, and
/// the measured content/viewport heights. Time lives outside; the ticker
/// calls `tick()` once per period and the engine advances by a fixed step.
/// Scrolling speed is therefore controlled entirely by tick frequency.
use crate::document::LyricSheet;
use crate::types::FontSize;
use std::time::Duration;
use tracing::debug;

/// Distance scrolled per tick, in pixels
pub const STEP_PX: f32 = 1.0;

/// Slowest speed setting
pub const MIN_SPEED: u8 = 1;

/// Fastest speed setting
pub const MAX_SPEED: u8 = 10;

/// Teleprompter scroll state
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    offset: f32,
    speed: u8,
    running: bool,
    mirrored: bool,
    font_size: FontSize,
    content_height: f32,
    viewport_height: f32,
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self {
            offset: 0.0,
            speed: 3,
            running: false,
            mirrored: false,
            font_size: FontSize::default(),
            content_height: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl ScrollEngine {
    /// Create a stopped engine at the top of the sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rendered content and viewport heights.
    ///
    /// The view re-measures after layout changes (font size, window
    /// resize) and reports the new heights here. Offset is clamped so a
    /// shrink cannot leave it past the end.
    pub fn set_heights(&mut self, content: f32, viewport: f32) {
        self.content_height = content.max(0.0);
        self.viewport_height = viewport.max(0.0);
        self.offset = self.offset.min(self.max_offset());
    }

    /// Largest reachable offset (bottom of content flush with bottom of
    /// viewport)
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Current scroll offset in pixels
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Current speed setting
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Whether auto-scroll is active
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the display is mirrored for a glass reflector
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Current font size
    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    /// Time between ticks for the current speed.
    ///
    /// Linear map from speed to period: speed 1 ticks every 90ms, speed 9
    /// every 10ms. The 10ms floor keeps speed 10 from degenerating to a
    /// zero-length period.
    pub fn tick_period(&self) -> Duration {
        let ms = 100u64.saturating_sub(u64::from(self.speed) * 10).max(10);
        Duration::from_millis(ms)
    }

    /// Set the speed, clamped to the valid range.
    ///
    /// Returns true when the setting changed; a running ticker must then
    /// be restarted so the new period takes effect immediately rather
    /// than after the current interval elapses.
    pub fn set_speed(&mut self, speed: u8) -> bool {
        let clamped = speed.clamp(MIN_SPEED, MAX_SPEED);
        if clamped == self.speed {
            return false;
        }
        debug!(from = self.speed, to = clamped, "speed changed");
        self.speed = clamped;
        true
    }

    /// Start auto-scrolling. No-op when already at the end.
    pub fn start(&mut self) {
        if self.offset < self.max_offset() {
            self.running = true;
        }
    }

    /// Stop auto-scrolling, keeping the current offset
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Toggle auto-scrolling
    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Toggle mirror mode. Render-only: scroll state is untouched.
    pub fn toggle_mirror(&mut self) {
        self.mirrored = !self.mirrored;
    }

    /// Change font size. The view re-measures and calls `set_heights`.
    pub fn set_font_size(&mut self, size: FontSize) {
        self.font_size = size;
    }

    /// Advance one step. Returns false when the engine stopped itself at
    /// the end of the content.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let max = self.max_offset();
        self.offset = (self.offset + STEP_PX).min(max);

        if self.offset >= max {
            debug!(offset = self.offset, "reached end of content");
            self.running = false;
        }
        self.running
    }

    /// Jump to an absolute offset, clamped to the reachable range.
    /// Running state is unchanged, so a playing prompter keeps playing
    /// from the new position.
    pub fn seek_to(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Jump to a song's heading using the sheet's line-ratio mapping.
    /// Out-of-range indexes leave the offset unchanged.
    pub fn seek_to_song(&mut self, sheet: &LyricSheet, song_index: usize) {
        if let Some(offset) = sheet.seek_offset(song_index, self.content_height) {
            self.seek_to(offset);
        }
    }

    /// Back to the top, stopped
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.running = false;
    }
}
