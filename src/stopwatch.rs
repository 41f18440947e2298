// ============================================
// src/stopwatch.rs
// 経過時間の表示用タイマー
// ============================================

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::TimeDelta;

/// リセット直後の表示
pub const RESET_DISPLAY: &str = "00:00:000";

/// 表示を更新する間隔の既定値
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// 経過時間を `MM:SS.mmm` に整形する
pub fn format_elapsed(elapsed: Duration) -> String {
    let delta = TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::MAX);
    let min = delta.num_minutes();
    let sec = delta.num_seconds() % 60;
    let ms = delta.num_milliseconds() % 1000;
    format!("{min:02}:{sec:02}.{ms:03}")
}

/// `Stopwatch::start` が返すキャンセル用ハンドル
///
/// 次の tick はフラグを確認してから表示を更新する。
#[derive(Debug, Clone)]
pub struct TickHandle {
    active: Rc<Cell<bool>>,
}

impl TickHandle {
    fn new() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
        }
    }

    pub fn cancel(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

#[derive(Debug)]
pub struct Stopwatch {
    interval: Duration,
    start_time: Option<Instant>,
    next_tick: Option<Instant>,
    handle: Option<TickHandle>,
    display: String,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl Stopwatch {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            start_time: None,
            next_tick: None,
            handle: None,
            display: RESET_DISPLAY.to_string(),
        }
    }

    /// 計測を開始して、最初の表示を即座に行う
    pub fn start(&mut self, now: Instant) -> TickHandle {
        self.stop();

        let handle = TickHandle::new();
        self.handle = Some(handle.clone());
        self.start_time = Some(now);
        self.tick(now);
        handle
    }

    /// 表示を更新する。止まっていれば何もせず `false` を返す
    pub fn tick(&mut self, now: Instant) -> bool {
        let (Some(handle), Some(start)) = (&self.handle, self.start_time) else {
            return false;
        };
        if !handle.is_active() {
            self.handle = None;
            self.next_tick = None;
            return false;
        }

        self.display = format_elapsed(now.saturating_duration_since(start));
        self.next_tick = Some(now + self.interval);
        true
    }

    /// 次の tick までの待ち時間。止まっていれば `None`
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        if !self.is_running() {
            return None;
        }
        self.next_tick
            .map(|next| next.saturating_duration_since(now))
    }

    /// 計測を止める。表示は最後の値のまま
    pub fn stop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.cancel();
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.start_time = None;
        self.display = RESET_DISPLAY.to_string();
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(TickHandle::is_active)
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}
