// --------------------------------------------------
// UI描画
// --------------------------------------------------

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::AppState;
use crate::kanji::ANY_BUSHU_SIGN;
use crate::quiz::SessionState;
use crate::view::{Actions, SessionView, SlotStyle};

pub fn draw(f: &mut Frame, app: &AppState) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("Bushu Wiz !");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // [0] 部首一覧
            Constraint::Min(20),    // [1] クイズ
        ])
        .split(inner_area);

    draw_radical_list(f, app, columns[0]);

    let view = app.view();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] 部首と問題数
            Constraint::Length(1), // [1] 正解数とタイム
            Constraint::Length(1), // [2] 空白
            Constraint::Min(1),    // [3] 解答欄
            Constraint::Length(3), // [4] 入力欄
            Constraint::Length(1), // [5] 操作説明
        ])
        .split(columns[1]);

    // 0. 部首と問題数
    let radical = if view.radical == ANY_BUSHU_SIGN {
        "すべて".to_string()
    } else {
        view.radical.clone()
    };
    let status = match view.state {
        SessionState::Idle => {
            Span::styled("Ctrl+S でスタート", Style::default().fg(Color::Gray))
        }
        SessionState::Running => Span::styled("解答中", Style::default().fg(Color::Green)),
        SessionState::Finished if view.answer_count == view.question_count => {
            Span::styled("全問正解!", Style::default().fg(Color::Magenta).bold())
        }
        SessionState::Finished => Span::styled("終了", Style::default().fg(Color::Red)),
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("部首: {}  ({}問)  ", radical, view.question_count),
                Style::default().fg(Color::White).bold(),
            ),
            status,
        ])),
        chunks[0],
    );

    // 1. 正解数とタイム
    f.render_widget(
        Paragraph::new(format!(
            "正解: {} / {}    Time: {}",
            view.answer_count, view.question_count, view.time
        ))
        .style(Style::default().fg(Color::Yellow)),
        chunks[1],
    );

    // 2. 解答欄 (直前に埋まった欄が見えるようにスクロール)
    let answer_area = chunks[3];
    let (rows, focus_row) = slot_rows(&view, answer_area.width as usize);
    let offset = scroll_offset(focus_row, answer_area.height as usize);
    f.render_widget(Paragraph::new(rows).scroll((offset, 0)), answer_area);

    // 3. 入力欄
    let input_style = if view.actions.submit {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(
        Paragraph::new(app.input())
            .style(input_style)
            .block(Block::default().borders(Borders::ALL).title("解答")),
        chunks[4],
    );

    // 4. 操作説明 (無効な操作は灰色)
    f.render_widget(Paragraph::new(help_line(view.actions)), chunks[5]);
}

fn draw_radical_list(f: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = app
        .radicals()
        .iter()
        .map(|r| ListItem::new(format!("{} ({})", r.label, r.kanji.len())))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::RIGHT))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected()));
    f.render_stateful_widget(list, area, &mut state);
}

/// 解答欄を幅に収まるように行へ詰める
///
/// 戻り値の2つ目は `view.focus` の欄がある行。
fn slot_rows(view: &SessionView, width: usize) -> (Vec<Line<'static>>, Option<usize>) {
    let mut rows = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    let mut focus_row = None;

    for (i, slot) in view.slots.iter().enumerate() {
        let style = match slot.style {
            SlotStyle::Blank => Style::default().bg(Color::DarkGray),
            SlotStyle::Answered => Style::default().fg(Color::Green),
            // ギブアップで表示した正解は赤
            SlotStyle::Revealed => Style::default().fg(Color::Red),
        };
        let span = Span::styled(slot.text.clone(), style);
        let cell_width = span.width() + 1;

        if used > 0 && used + cell_width > width {
            rows.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        }
        if view.focus == Some(i) {
            focus_row = Some(rows.len());
        }
        spans.push(span);
        spans.push(Span::raw(" "));
        used += cell_width;
    }
    if !spans.is_empty() {
        rows.push(Line::from(spans));
    }
    (rows, focus_row)
}

/// `focus_row` が `height` 行の表示範囲の最下行に来るだけスクロールする
fn scroll_offset(focus_row: Option<usize>, height: usize) -> u16 {
    let Some(row) = focus_row else {
        return 0;
    };
    let offset = (row + 1).saturating_sub(height.max(1));
    u16::try_from(offset).unwrap_or(u16::MAX)
}

fn help_line(actions: Actions) -> Line<'static> {
    let key = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(label, style)
    };

    Line::from(vec![
        key("[↑↓] 部首  ", true),
        key("[Ctrl+S] スタート  ", actions.start),
        key("[Enter] 解答  ", actions.submit),
        key("[Ctrl+G] ギブアップ  ", actions.give_up),
        key("[Esc] 終了", true),
    ])
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::kanji::{KanjiEntry, RadicalIndex};

    fn new_app() -> AppState {
        let entries = [
            KanjiEntry::new("木", "木"),
            KanjiEntry::new("林", "木"),
            KanjiEntry::new("花", "艹"),
        ];
        AppState::new(RadicalIndex::build(&entries), "木", Duration::from_millis(10)).unwrap()
    }

    fn render(app: &AppState) -> Buffer {
        render_at(app, 80, 16)
    }

    fn render_at(app: &AppState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text_of(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn idle_screen_shows_counts_and_reset_time() {
        let text = text_of(&render(&new_app()));
        assert!(text.contains("0 / 2"));
        assert!(text.contains("Time: 00:00:000"));
        assert!(text.contains("(2"));
        assert!(text.contains("Ctrl+S"));
    }

    #[test]
    fn revealed_answers_are_red() {
        let t0 = Instant::now();
        let mut app = new_app();
        app.start(t0);
        app.push_text("木");
        app.submit(t0);
        app.give_up(t0 + Duration::from_millis(42));

        let buffer = render(&app);
        let revealed = buffer
            .content()
            .iter()
            .find(|cell| cell.symbol() == "林")
            .expect("revealed kanji is drawn");
        assert_eq!(revealed.fg, Color::Red);

        let text = text_of(&buffer);
        assert!(text.contains("1 / 2"));
        assert!(text.contains("00:00.042"));
    }

    /// U+4E00 から連続する `count` 文字を、すべて部首 "A" として並べる
    fn large_app(count: u32) -> (AppState, Vec<String>) {
        let kanji: Vec<String> = (0..count)
            .map(|i| char::from_u32(0x4E00 + i).unwrap().to_string())
            .collect();
        let entries: Vec<KanjiEntry> = kanji
            .iter()
            .map(|k| KanjiEntry::new(k.as_str(), "A"))
            .collect();
        let app = AppState::new(RadicalIndex::build(&entries), "A", Duration::from_millis(10))
            .unwrap();
        (app, kanji)
    }

    fn cell_of<'a>(buffer: &'a Buffer, symbol: &str) -> Option<&'a ratatui::buffer::Cell> {
        buffer.content().iter().find(|cell| cell.symbol() == symbol)
    }

    #[test]
    fn newly_answered_slot_is_scrolled_into_view() {
        let t0 = Instant::now();
        let (mut app, kanji) = large_app(601);
        app.start(t0);

        let last = kanji.last().unwrap();
        app.push_text(last);
        app.submit(t0);

        let buffer = render_at(&app, 80, 24);
        let cell = cell_of(&buffer, last).expect("last answer is on screen");
        assert_eq!(cell.fg, Color::Green);
        // 先頭の行は上へスクロールアウトしている
        assert!(cell_of(&buffer, &kanji[0]).is_none());

        // 先頭に戻って解答すると先頭行が見える
        app.push_text(&kanji[0]);
        app.submit(t0);
        let buffer = render_at(&app, 80, 24);
        assert!(cell_of(&buffer, &kanji[0]).is_some());
        assert!(cell_of(&buffer, last).is_none());
    }

    #[test]
    fn rows_break_at_the_area_width() {
        let (mut app, _) = large_app(10);
        app.start(Instant::now());
        let mut view = app.view();
        view.focus = Some(9);

        // 1欄 = 全角2セル + 区切り1セル
        let (rows, focus_row) = slot_rows(&view, 7);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.width() <= 7));
        assert_eq!(focus_row, Some(4));

        assert_eq!(scroll_offset(focus_row, 3), 2);
        assert_eq!(scroll_offset(focus_row, 5), 0);
        assert_eq!(scroll_offset(None, 1), 0);
    }
}
