// ============================================
// src/app.rs
// キー入力 -> クイズ操作
// ============================================

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::kanji::{Radical, RadicalIndex};
use crate::quiz::{QuizError, QuizSession, Submission};
use crate::stopwatch::Stopwatch;
use crate::view::{self, SessionView};

/// アプリ全体の状態を管理する
pub struct AppState {
    index: RadicalIndex,
    /// 部首一覧での選択位置
    selected: usize,
    session: QuizSession,
    stopwatch: Stopwatch,
    /// 解答入力欄
    input: String,
    /// 直前に埋まった解答欄 (解答欄のスクロール先)
    last_filled: Option<usize>,
    should_quit: bool,
}

impl AppState {
    pub fn new(
        index: RadicalIndex,
        radical: &str,
        tick_interval: Duration,
    ) -> Result<Self, QuizError> {
        let session = QuizSession::new(&index, radical)?;
        let selected = index.position(radical).unwrap_or_default();
        Ok(Self {
            index,
            selected,
            session,
            stopwatch: Stopwatch::new(tick_interval),
            input: String::new(),
            last_filled: None,
            should_quit: false,
        })
    }

    /// 部首を切り替える (タイマーも止めてリセット)
    pub fn select(&mut self, position: usize) {
        let Some(radical) = self.index.radical_at(position) else {
            return;
        };
        if let Err(err) = self.session.select_radical(&self.index, &radical.label) {
            tracing::error!(%err, "radical list and index disagree");
            return;
        }
        self.selected = position;
        self.last_filled = None;
        self.stopwatch.reset();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.index.len() {
            self.select(self.selected + 1);
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.select(self.selected - 1);
        }
    }

    pub fn start(&mut self, now: Instant) {
        match self.session.start() {
            Ok(()) => {
                self.last_filled = None;
                self.stopwatch.start(now);
            }
            Err(err) => tracing::debug!(%err, "start ignored"),
        }
    }

    /// 入力欄の内容で解答する。正解なら入力欄を空にする
    pub fn submit(&mut self, now: Instant) {
        match self.session.submit(&self.input) {
            Ok(Submission::Accepted { slot, finished }) => {
                self.input.clear();
                self.last_filled = Some(slot);
                if finished {
                    self.finish(now);
                }
            }
            Ok(Submission::Rejected) => {}
            Err(err) => tracing::debug!(%err, "submit ignored"),
        }
    }

    pub fn give_up(&mut self, now: Instant) {
        match self.session.give_up() {
            Ok(_) => self.finish(now),
            Err(err) => tracing::debug!(%err, "give up ignored"),
        }
    }

    fn finish(&mut self, now: Instant) {
        self.stopwatch.tick(now);
        self.stopwatch.stop();
        tracing::info!(
            radical = %self.session.radical(),
            score = self.session.score(),
            total = self.session.slots().len(),
            time = %self.stopwatch.display(),
            "quiz finished"
        );
    }

    pub fn push_text(&mut self, text: &str) {
        // 入力欄は1行のみ
        self.input.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// タイマーの表示更新
    pub fn tick(&mut self, now: Instant) {
        self.stopwatch.tick(now);
    }

    /// 次に tick が必要になるまでの時間
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.stopwatch.time_until_tick(now)
    }

    /// MARK:イベント処理
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            Event::Paste(text) => self.push_text(&text),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // AltGr で入力した文字は CONTROL | ALT で届く
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT)
        {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('s') => self.start(now),
                KeyCode::Char('g') => self.give_up(now),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            KeyCode::Enter => self.submit(now),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            focus: self.last_filled,
            ..view::describe(&self.session, &self.stopwatch)
        }
    }

    pub fn radicals(&self) -> &[Radical] {
        self.index.radicals()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
