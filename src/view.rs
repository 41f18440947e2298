// ============================================
// src/view.rs
// セッションの状態 -> 表示内容
// ============================================

use crate::quiz::{QuizSession, SessionState, Slot};
use crate::stopwatch::Stopwatch;

/// 空欄の表示 (全角スペース)
pub const SPACE: &str = "　";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStyle {
    Blank,
    Answered,
    /// ギブアップで表示した正解 (赤)
    Revealed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub text: String,
    pub style: SlotStyle,
}

impl From<&Slot> for SlotView {
    fn from(slot: &Slot) -> Self {
        match slot {
            Slot::Unfilled => Self {
                text: SPACE.to_string(),
                style: SlotStyle::Blank,
            },
            Slot::Answered(k) => Self {
                text: k.clone(),
                style: SlotStyle::Answered,
            },
            Slot::Revealed(k) => Self {
                text: k.clone(),
                style: SlotStyle::Revealed,
            },
        }
    }
}

/// ボタンの有効/無効
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actions {
    pub start: bool,
    pub submit: bool,
    pub give_up: bool,
}

impl Actions {
    pub fn for_state(state: SessionState) -> Self {
        let running = state == SessionState::Running;
        Self {
            start: !running,
            submit: running,
            give_up: running,
        }
    }
}

/// 画面に出すものすべて
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub radical: String,
    pub state: SessionState,
    pub question_count: usize,
    pub answer_count: usize,
    pub slots: Vec<SlotView>,
    /// 表示範囲に入れておく解答欄
    pub focus: Option<usize>,
    pub time: String,
    pub actions: Actions,
}

pub fn describe(session: &QuizSession, stopwatch: &Stopwatch) -> SessionView {
    SessionView {
        radical: session.radical().to_string(),
        state: session.state(),
        question_count: session.slots().len(),
        answer_count: session.score(),
        slots: session.slots().iter().map(SlotView::from).collect(),
        focus: None,
        time: stopwatch.display().to_string(),
        actions: Actions::for_state(session.state()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kanji::{KanjiEntry, RadicalIndex};
    use crate::stopwatch::RESET_DISPLAY;

    fn session() -> QuizSession {
        let entries = [KanjiEntry::new("木", "木"), KanjiEntry::new("林", "木")];
        QuizSession::new(&RadicalIndex::build(&entries), "木").unwrap()
    }

    #[test]
    fn idle_session_shows_blank_slots_and_only_start_enabled() {
        let view = describe(&session(), &Stopwatch::default());
        assert_eq!(view.radical, "木");
        assert_eq!(view.question_count, 2);
        assert_eq!(view.answer_count, 0);
        assert!(view.slots.iter().all(|s| s.style == SlotStyle::Blank && s.text == SPACE));
        assert_eq!(view.time, RESET_DISPLAY);
        assert_eq!(
            view.actions,
            Actions { start: true, submit: false, give_up: false }
        );
    }

    #[test]
    fn running_session_enables_submit_and_give_up() {
        let mut session = session();
        session.start().unwrap();
        session.submit("林").unwrap();

        let view = describe(&session, &Stopwatch::default());
        assert_eq!(view.answer_count, 1);
        assert_eq!(view.slots[1], SlotView { text: "林".into(), style: SlotStyle::Answered });
        assert_eq!(
            view.actions,
            Actions { start: false, submit: true, give_up: true }
        );
    }

    #[test]
    fn revealed_slots_are_distinguished_from_answers() {
        let mut session = session();
        session.start().unwrap();
        session.submit("木").unwrap();
        session.give_up().unwrap();

        let view = describe(&session, &Stopwatch::default());
        assert_eq!(view.slots[0].style, SlotStyle::Answered);
        assert_eq!(view.slots[1], SlotView { text: "林".into(), style: SlotStyle::Revealed });
        assert_eq!(view.state, SessionState::Finished);
        assert!(view.actions.start);
        assert!(!view.actions.submit);
    }
}
