// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::fs::{self, File, OpenOptions};
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod app;
mod dataset;
mod kanji;
mod quiz;
mod stopwatch;
mod ui;
mod view;

use app::AppState;
use dataset::Dataset;
use kanji::{ANY_BUSHU_SIGN, RadicalIndex};

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use ratatui::prelude::*;

/// 部首が選ばれていない間のイベント待ち時間
const IDLE_POLL: Duration = Duration::from_millis(250);

/// 部首ごとに漢字を答えるクイズ
#[derive(Parser, Debug)]
#[command(name = "bushuwiz", version, about)]
struct Cli {
    /// 漢字データ (JSON: [{"kanji": "木", "bushu": "木"}, ...])
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// 最初に選ぶ部首 ("-" はすべての部首)
    #[arg(long, default_value = ANY_BUSHU_SIGN)]
    radical: String,

    /// タイム表示の更新間隔 (ミリ秒)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// ログの出力先
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// 部首の一覧を表示して終了する
    #[arg(long)]
    list: bool,
}

// --------------------------------------------------
// メイン関数 (TUIセットアップと実行ループ)
// --------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.clone());

    let dataset = match &cli.dataset {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("failed to load dataset {}", path.display()))?,
        None => Dataset::builtin(),
    };
    let index = dataset.index();
    tracing::info!(
        kanji = dataset.entries().len(),
        radicals = index.len(),
        "dataset loaded"
    );

    if cli.list {
        print_radicals(&index);
        return Ok(());
    }

    // 端末を切り替える前に設定の誤りを報告する
    let mut app_state = AppState::new(index, &cli.radical, Duration::from_millis(cli.tick_ms))
        .context("invalid --radical")?;

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app_state);
    restore_terminal()?;
    result
}

fn print_radicals(index: &RadicalIndex) {
    for radical in index.radicals() {
        println!("{}\t{}", radical.label, radical.kanji.len());
    }
}

fn init_tracing(log_file: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout/stderr に書くと TUI が崩れるので、ファイルに出せなければログなし
    let Some((path, file)) = open_log_file(log_file) else {
        tracing_subscriber::registry().with(env_filter).init();
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .init();
    tracing::info!(path = %path.display(), "logging initialized");
}

fn open_log_file(explicit: Option<PathBuf>) -> Option<(PathBuf, File)> {
    let candidates = match explicit {
        Some(path) => vec![path],
        None => log_file_candidates(),
    };

    for candidate in candidates {
        if let Some(parent) = candidate.parent()
            && fs::create_dir_all(parent).is_err()
        {
            continue;
        }
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&candidate) {
            return Some((candidate, file));
        }
    }
    None
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(proj_dirs) = ProjectDirs::from("jp", "Fukumoto0141", "BUSHU_WIZ") {
        candidates.push(proj_dirs.data_dir().join("logs").join("bushu_wiz.log"));
    }
    // 万が一取得できなかったらカレントディレクトリに（フォールバック）
    candidates.push(PathBuf::from(".bushu_wiz").join("logs").join("bushu_wiz.log"));
    candidates
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(EnableBracketedPaste)?; // IME の確定文字列を Paste で受け取る
    stdout().execute(Hide)?;
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<()> {
    stdout().execute(Show)?;
    stdout().execute(DisableBracketedPaste)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, app_state: &mut AppState) -> Result<()> {
    while !app_state.should_quit() {
        terminal.draw(|f| ui::draw(f, app_state))?;

        // タイマー動作中は次の tick まで、止まっていれば長めに待つ
        let timeout = app_state
            .time_until_tick(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            let ev = event::read()?;
            app_state.handle_event(ev, Instant::now());
        }
        app_state.tick(Instant::now());
    }

    Ok(())
}
