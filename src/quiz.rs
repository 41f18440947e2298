// ============================================
// src/quiz.rs
// 部首クイズの状態管理と正誤判定
// ============================================

use thiserror::Error;

use crate::kanji::RadicalIndex;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("unknown radical \"{0}\"")]
    UnknownRadical(String),
    #[error("cannot {action} while the quiz is {state:?}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },
    #[error("the quiz is not running")]
    InactiveSession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Finished,
}

/// 解答欄1つ分の状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Unfilled,
    /// プレイヤーが正解した漢字
    Answered(String),
    /// ギブアップで表示した正解
    Revealed(String),
}

impl Slot {
    pub fn is_unfilled(&self) -> bool {
        matches!(self, Slot::Unfilled)
    }
}

/// `submit` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// `slot` 番目の解答欄が埋まった
    Accepted { slot: usize, finished: bool },
    /// 該当する空欄がない (不正解・回答済み)
    Rejected,
}

/// 選択中の部首に対する1回分のクイズ
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    radical: String,
    expected: Vec<String>,
    slots: Vec<Slot>,
    score: usize,
    state: SessionState,
}

impl QuizSession {
    /// 部首を選んだ状態のセッションを作る
    pub fn new(index: &RadicalIndex, label: &str) -> Result<Self, QuizError> {
        let mut session = Self::default();
        session.select_radical(index, label)?;
        Ok(session)
    }

    /// 部首を切り替えて、解答欄をすべて空欄に戻す
    ///
    /// 戻り値は新しい解答欄の数。
    pub fn select_radical(
        &mut self,
        index: &RadicalIndex,
        label: &str,
    ) -> Result<usize, QuizError> {
        let kanji = index
            .get(label)
            .ok_or_else(|| QuizError::UnknownRadical(label.to_string()))?;

        self.radical = label.to_string();
        self.expected = kanji.to_vec();
        self.slots = vec![Slot::Unfilled; self.expected.len()];
        self.score = 0;
        self.state = SessionState::Idle;

        tracing::info!(radical = %self.radical, slots = self.slots.len(), "radical selected");
        Ok(self.slots.len())
    }

    /// 開始 (終了後なら再挑戦)。すべて空欄にする
    pub fn start(&mut self) -> Result<(), QuizError> {
        if self.state == SessionState::Running {
            return Err(QuizError::InvalidState {
                action: "start",
                state: self.state,
            });
        }

        self.slots.iter_mut().for_each(|slot| *slot = Slot::Unfilled);
        self.score = 0;
        self.state = SessionState::Running;

        tracing::info!(radical = %self.radical, slots = self.slots.len(), "quiz started");
        Ok(())
    }

    /// 入力された漢字が合っているかを調べる
    ///
    /// 最初に見つかった「同じ漢字で、まだ空欄」の1箇所だけを埋める。
    pub fn submit(&mut self, text: &str) -> Result<Submission, QuizError> {
        if self.state != SessionState::Running {
            return Err(QuizError::InactiveSession);
        }

        let hit = self
            .expected
            .iter()
            .zip(&self.slots)
            .position(|(expected, slot)| expected == text && slot.is_unfilled());

        let Some(i) = hit else {
            tracing::debug!(text, "answer rejected");
            return Ok(Submission::Rejected);
        };

        self.slots[i] = Slot::Answered(text.to_string());
        self.score += 1;

        // 全問正解
        let finished = self.score == self.slots.len();
        if finished {
            self.state = SessionState::Finished;
            tracing::info!(radical = %self.radical, score = self.score, "all answers found");
        } else {
            tracing::debug!(text, slot = i, score = self.score, "answer accepted");
        }

        Ok(Submission::Accepted { slot: i, finished })
    }

    /// 残りの空欄に正解を表示して終了する
    ///
    /// 戻り値は表示した正解の数。
    pub fn give_up(&mut self) -> Result<usize, QuizError> {
        if self.state != SessionState::Running {
            return Err(QuizError::InactiveSession);
        }

        let mut revealed = 0;
        for (slot, expected) in self.slots.iter_mut().zip(&self.expected) {
            if slot.is_unfilled() {
                *slot = Slot::Revealed(expected.clone());
                revealed += 1;
            }
        }
        self.state = SessionState::Finished;

        tracing::info!(radical = %self.radical, score = self.score, revealed, "gave up");
        Ok(revealed)
    }

    pub fn radical(&self) -> &str {
        &self.radical
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }
}
