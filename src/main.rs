mod api;
mod app_service;
mod app_state;
mod commands;
mod config;
mod content;
mod ui;
mod wizard;

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::api::{ContentApi, PortalClient};
use crate::app_service::handle_command;
use crate::app_state::{App, AppEvent};
use crate::commands::AppCommand;
use crate::config::PortalConfig;
use crate::ui::draw;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg = PortalConfig::from_env().context("invalid configuration")?;

    let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
    std::fs::create_dir_all(&cfg.log_dir)
        .with_context(|| format!("cannot create log dir {}", cfg.log_dir.display()))?;
    let log_path = cfg.log_dir.join(format!("portal-{}.log", ts));
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("cannot create log file {}", log_path.display()))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file))) // 终端归 TUI 所有，日志只写文件
        .filter_level(log::LevelFilter::Warn)
        .filter_module("ppdb_portal", log::LevelFilter::Info)
        .filter_module("reqwest", log::LevelFilter::Error)
        .filter_module("hyper", log::LevelFilter::Error)
        .init();
    info!("starting with {:?}", cfg);

    let mut startup_info = vec![
        format!("✓ API: {}", cfg.api_url),
        format!("✓ Storage: {}", cfg.storage_url),
        format!("Log: {}", log_path.display()),
    ];

    let client = PortalClient::new(cfg.api_url.clone()).context("cannot build http client")?;
    info!("{} ready", client);
    let api: Arc<dyn ContentApi> = Arc::new(client);
    let cfg = Arc::new(cfg);

    // 创建核心 Channel
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<AppCommand>();
    let (evt_tx, evt_rx) = mpsc::unbounded_channel::<AppEvent>();

    // 后台 Actor：每条命令一个任务，互不阻塞
    {
        let api = api.clone();
        let cfg = cfg.clone();
        tokio::spawn(async move {
            while let Some(cmd) = cmd_rx.recv().await {
                tokio::spawn(handle_command(
                    api.clone(),
                    cfg.clone(),
                    cmd,
                    evt_tx.clone(),
                ));
            }
            warn!("command channel closed");
        });
    }

    startup_info.push("Tekan / lalu ketik help untuk daftar perintah".to_string());

    // TUI 初始化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cfg, startup_info, cmd_tx, evt_rx);

    // 主循环
    let res = match app.evt_rx.take() {
        Some(rx) => run_app_loop(&mut terminal, &mut app, rx, cfg.hero_interval).await,
        None => Ok(()),
    };

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;
    info!("bye");
    Ok(())
}

async fn run_app_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut evt_rx: mpsc::UnboundedReceiver<AppEvent>,
    hero_interval: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| draw(f, app))?;

        while let Ok(event) = evt_rx.try_recv() {
            app.apply_event(event);
        }

        if last_tick.elapsed() >= hero_interval {
            app.on_tick();
            last_tick = Instant::now();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key_event(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
