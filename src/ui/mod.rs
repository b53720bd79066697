use crate::app_state::{App, FocusArea, InputMode, Page, ViewMode, MENU};
use crate::content::about::AboutPage;
use crate::content::achievements::{filter_tabs, level_badge, AchievementsPage};
use crate::content::admissions::{AdmissionsPage, FLOW};
use crate::content::format::{format_date_id, html_to_text};
use crate::content::settings::KEY_LOGO_URL;
use crate::content::{ArticlePage, ArticleState, HomePage, NewsPage};
use crate::wizard::fields::field;
use crate::wizard::{confirmation_summary, Outcome, Step, WizardPage};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    // 创建布局
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 顶部标题栏
            Constraint::Min(0),    // 中间内容区域
            Constraint::Length(10), // 底部命令/日志区域
        ])
        .split(f.size());

    render_top_bar(f, chunks[0]);

    // 中间内容区域（左侧菜单 + 主视图）
    let middle_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(0)])
        .split(chunks[1]);

    render_left_menu(f, middle_chunks[0], app);
    render_main_view(f, middle_chunks[1], app);
    render_bottom_bar(f, chunks[2], app);
}

fn render_top_bar(f: &mut Frame, area: Rect) {
    let title = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Green));

    let title_text = Line::from(vec![
        Span::styled(
            " Portal Sekolah ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - Informasi & PPDB"),
    ]);

    let paragraph = Paragraph::new(title_text)
        .block(title)
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_left_menu(f: &mut Frame, area: Rect, app: &App) {
    let active_mode = match app.view_mode() {
        ViewMode::Article => ViewMode::News,
        m => m,
    };
    let menu_items: Vec<ListItem> = MENU
        .iter()
        .enumerate()
        .map(|(i, (text, mode))| {
            let is_selected = i == app.menu_selected_index;
            let is_active = *mode == active_mode;

            let style = if is_selected {
                if app.focus_area == FocusArea::Menu {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                }
            } else if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_active { "● " } else { "○ " };
            ListItem::new(format!("{}{}", prefix, text)).style(style)
        })
        .collect();

    let title = if app.focus_area == FocusArea::Menu {
        "Menu (Enter)"
    } else {
        "Menu (←)"
    };

    let menu = List::new(menu_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(focus_style(app.focus_area == FocusArea::Menu)),
    );

    f.render_widget(menu, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    }
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn muted(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    ))
}

fn field_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.into()),
    ])
}

fn render_main_view(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus_area == FocusArea::MainView;
    let (title, lines) = match &app.page {
        Page::Home(home) => ("Beranda (1-9/n/p banner)", home_lines(home, app)),
        Page::About(about) => ("Tentang Kami (↑↓ gulir)", about_lines(about, app)),
        Page::Achievements(page) => ("Prestasi (f/F filter, ↑↓ pilih)", achievement_lines(page, app)),
        Page::News(news) => ("Informasi (↑↓ pilih, Enter buka, n/p halaman)", news_lines(news)),
        Page::Article(article) => ("Artikel (x kembali, ↑↓ gulir)", article_lines(article, app)),
        Page::Admissions(page) => ("PPDB (Enter daftar)", admissions_lines(page)),
        Page::Register(form) => (
            "Daftar PPDB (↑↓ field, Enter isi, ←→ pilih, n/p langkah, s kirim, r ulang)",
            register_lines(form),
        ),
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(focus_style(focused)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0)); // 应用滚动偏移
    f.render_widget(paragraph, area);
}

fn home_lines(home: &HomePage, app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            home.title().to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(home.subtitle().to_string()),
    ];
    if home.carousel.is_empty() {
        lines.push(muted("Belum ada banner."));
    }
    if let Some(hero) = home.carousel.current() {
        if let (Some(text), Some(url)) = (hero.cta_text.as_deref(), hero.cta_url.as_deref()) {
            lines.push(field_line(text, url.to_string()));
        }
        let media = app.assets.resolve(hero.media_url.as_deref());
        if !media.is_empty() {
            lines.push(muted(format!("{:?}: {}", hero.media_type, media)));
        }
    }
    if home.carousel.len() > 1 {
        lines.push(Line::from(home.carousel.dots()));
    }
    let logo = app
        .assets
        .resolve(home.settings.get(KEY_LOGO_URL).map(String::as_str));
    if !logo.is_empty() {
        lines.push(muted(format!("Logo: {}", logo)));
    }

    lines.push(Line::from(""));
    lines.push(heading("--- Fasilitas ---"));
    if home.facilities.is_empty() {
        lines.push(muted("Belum ada data fasilitas."));
    }
    for facility in &home.facilities {
        lines.push(Line::from(format!(
            "  • {}{}",
            facility.name,
            facility
                .description
                .as_deref()
                .map(|d| format!(" - {}", d))
                .unwrap_or_default()
        )));
    }

    lines.push(Line::from(""));
    lines.push(heading("--- Berita Terbaru ---"));
    if home.latest_posts.is_empty() {
        lines.push(muted("Belum ada artikel."));
    }
    for post in &home.latest_posts {
        let date = post
            .published_at
            .as_deref()
            .map(format_date_id)
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<18}", date), Style::default().fg(Color::Gray)),
            Span::raw(post.title.clone()),
        ]));
    }
    lines
}

fn about_lines(about: &AboutPage, app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![heading("--- Visi ---"), Line::from(about.vision().to_string())];
    lines.push(Line::from(""));
    lines.push(heading("--- Misi ---"));
    for (i, mission) in about.missions().iter().enumerate() {
        lines.push(Line::from(format!("  {}. {}", i + 1, mission)));
    }

    lines.push(Line::from(""));
    lines.push(heading("--- Guru & Staf ---"));
    if about.teachers.is_empty() {
        lines.push(muted("Belum ada data guru."));
    }
    for teacher in &about.teachers {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}", teacher.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                teacher
                    .position
                    .as_deref()
                    .map(|p| format!(" ({})", p))
                    .unwrap_or_default(),
                Style::default().fg(Color::Cyan),
            ),
        ]));
        let photo = app.assets.resolve(teacher.photo_url.as_deref());
        if !photo.is_empty() {
            lines.push(muted(format!("    {}", photo)));
        }
    }

    lines.push(Line::from(""));
    lines.push(heading("--- Fasilitas ---"));
    for facility in &about.facilities {
        lines.push(Line::from(format!("  • {}", facility.name)));
    }
    lines
}

fn achievement_lines(page: &AchievementsPage, app: &App) -> Vec<Line<'static>> {
    let tabs: Vec<Span> = filter_tabs(&page.filter)
        .into_iter()
        .map(|(label, active)| {
            if active {
                Span::styled(
                    format!("[{}] ", label),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(format!(" {}  ", label))
            }
        })
        .collect();
    let mut lines = vec![Line::from(tabs), Line::from("")];

    if page.loading {
        lines.push(muted("Memuat..."));
        return lines;
    }
    if page.items.is_empty() {
        lines.push(muted(page.empty_message()));
        return lines;
    }
    for (i, item) in page.items.iter().enumerate() {
        let style = if i == page.selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<14}", level_badge(&item.level)),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(item.title.clone(), style),
            Span::raw(
                item.year
                    .map(|y| format!("  {}", y))
                    .unwrap_or_default(),
            ),
        ]));
        if i == page.selected {
            if let Some(student) = item.student_name.as_deref() {
                lines.push(field_line("    Siswa", student.to_string()));
            }
            if let Some(comp) = item.competition_name.as_deref() {
                lines.push(field_line("    Lomba", comp.to_string()));
            }
            let image = app.assets.resolve(item.image_url.as_deref());
            if !image.is_empty() {
                lines.push(muted(format!("    {}", image)));
            }
        }
    }
    lines
}

fn news_lines(news: &NewsPage) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if news.loading {
        lines.push(muted("Memuat..."));
        return lines;
    }
    if news.posts.is_empty() {
        lines.push(muted(news.empty_message()));
    }
    for (i, post) in news.posts.iter().enumerate() {
        let style = if i == news.selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let date = post
            .published_at
            .as_deref()
            .map(format_date_id)
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{:<18}", date), Style::default().fg(Color::Gray)),
            Span::styled(post.title.clone(), style),
        ]));
        if let Some(excerpt) = post.excerpt.as_deref().filter(|e| !e.is_empty()) {
            lines.push(muted(format!("    {}", excerpt)));
        }
    }
    if news.show_pagination() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "Halaman {} / {}  ({} artikel, {} per halaman)",
            news.page, news.last_page, news.total, news.per_page
        )));
    }
    lines
}

fn article_lines(article: &ArticlePage, app: &App) -> Vec<Line<'static>> {
    match &article.state {
        ArticleState::Loading => vec![muted("Memuat artikel...")],
        ArticleState::NotFound => vec![
            heading("Artikel tidak ditemukan"),
            muted(format!("Tidak ada artikel dengan slug \"{}\".", article.slug)),
        ],
        ArticleState::Unavailable => vec![
            heading("Artikel tidak dapat dimuat"),
            muted("Silakan coba lagi nanti."),
        ],
        ArticleState::Ready(post) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    post.title.clone(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(post.author_name().to_string(), Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::raw(
                        post.published_at
                            .as_deref()
                            .map(format_date_id)
                            .unwrap_or_default(),
                    ),
                ]),
            ];
            let thumb = app.assets.resolve(post.thumbnail_path());
            if !thumb.is_empty() {
                lines.push(muted(thumb));
            }
            lines.push(Line::from(""));
            lines.extend(
                html_to_text(&post.content)
                    .lines()
                    .map(|l| Line::from(l.to_string())),
            );
            lines
        }
    }
}

fn admissions_lines(page: &AdmissionsPage) -> Vec<Line<'static>> {
    let mut lines = vec![heading(page.heading()), Line::from(page.intro()), Line::from("")];
    for (label, value) in page.cards() {
        let value_style = match (label, page.is_open()) {
            ("Status", true) => Style::default().fg(Color::Green),
            ("Status", false) => Style::default().fg(Color::Red),
            _ => Style::default(),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<10}", label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(value, value_style),
        ]));
    }
    if let Some(left) = page.remaining() {
        lines.push(muted(format!("  Sisa kuota: {}", left)));
    }
    lines.push(Line::from(""));
    lines.push(heading("--- Alur Pendaftaran ---"));
    for (n, title, desc) in FLOW {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. {:<18}", n, title), Style::default().fg(Color::Cyan)),
            Span::raw(desc),
        ]));
    }
    lines
}

fn register_lines(form: &WizardPage) -> Vec<Line<'static>> {
    let wizard = &form.wizard;
    let step = wizard.step();

    if let Some(outcome) = wizard.outcome() {
        return match outcome {
            Outcome::Success {
                registration_number,
            } => vec![
                heading("Pendaftaran Berhasil!"),
                Line::from("Nomor pendaftaran Anda:"),
                Line::from(Span::styled(
                    registration_number.clone().unwrap_or_else(|| "-".to_string()),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                muted("Simpan nomor ini untuk proses selanjutnya."),
            ],
            Outcome::Failure { message } => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        "Pendaftaran Gagal",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(message.clone()),
                ];
                lines.extend(error_lines(form, &[]));
                lines.push(muted("Tekan r untuk mencoba lagi."));
                lines
            }
        };
    }

    let progress: Vec<Span> = Step::ALL
        .iter()
        .map(|s| {
            let style = if *s == step {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if *s < step {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" {} ", s.number()), style)
        })
        .collect();

    let mut lines = vec![
        Line::from(progress),
        heading(format!("Langkah {}: {}", step.number(), step.title())),
        muted(step.description()),
        Line::from(""),
    ];

    // 当前步骤表单里显示不到的错误集中放在顶部，确认页上是全部错误
    let on_step: Vec<&str> = form.fields().iter().map(|f| f.name).collect();
    let banner = error_lines(form, &on_step);
    if !banner.is_empty() {
        lines.push(Line::from(Span::styled(
            "Periksa kembali data berikut:",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.extend(banner);
        lines.push(Line::from(""));
    }

    if step == Step::Confirmation {
        for section in confirmation_summary(wizard.draft()) {
            lines.push(heading(format!("--- {} ---", section.title)));
            for (label, value) in section.rows {
                lines.push(field_line(&format!("  {}", label), value));
            }
        }
        lines.push(Line::from(""));
        lines.push(if wizard.is_submitting() {
            muted("Mengirim...")
        } else {
            muted("Tekan s untuk mengirim pendaftaran.")
        });
        return lines;
    }

    for (i, spec) in form.fields().into_iter().enumerate() {
        let is_focused = i == form.cursor();
        let value = match (is_focused, form.edit_buffer()) {
            (true, Some(buf)) => format!("{}_", buf),
            _ => wizard
                .draft()
                .get(spec.name)
                .map(|v| spec.display_value(v).to_string())
                .unwrap_or_default(),
        };
        let marker = if spec.required { "*" } else { " " };
        let label_style = if is_focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<26}", marker, spec.label), label_style),
            Span::raw(" "),
            Span::styled(value, Style::default().fg(Color::Cyan)),
        ]));
        if let Some(msgs) = wizard.errors().get(spec.name) {
            for msg in msgs {
                lines.push(Line::from(Span::styled(
                    format!("   {}", msg),
                    Style::default().fg(Color::Red),
                )));
            }
        }
    }

    let mut nav = Vec::new();
    if !step.is_first() {
        nav.push("p kembali");
    }
    if !step.is_last() {
        nav.push("n lanjut");
    }
    lines.push(Line::from(""));
    lines.push(muted(nav.join("  ")));
    lines
}

/// 字段错误列表，`skip` 中的字段不列出
fn error_lines(form: &WizardPage, skip: &[&str]) -> Vec<Line<'static>> {
    form.wizard
        .errors()
        .iter()
        .filter(|(name, _)| !skip.contains(&name.as_str()))
        .flat_map(|(name, msgs)| {
            let label = field(name).map_or(name.as_str(), |f| f.label);
            msgs.iter().map(move |m| {
                Line::from(Span::styled(
                    format!("  • {}: {}", label, m),
                    Style::default().fg(Color::Red),
                ))
            })
        })
        .collect()
}

fn render_bottom_bar(f: &mut Frame, area: Rect, app: &App) {
    let bottom_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    // 命令输入区域
    let command_prompt = if app.input_mode == InputMode::Command {
        let mut spans = vec![Span::styled(
            "Perintah: ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];
        let cur = app.command_cursor.min(app.command_input.len());
        let (left, right) = app.command_input.split_at(cur);
        spans.push(Span::raw(left));
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(right));

        // 如果有建议，添加浅灰色幽灵文本
        if let Some(hint) = app.get_completion_hint() {
            spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    } else {
        Line::from(vec![
            Span::styled("Perintah: ", Style::default().fg(Color::Yellow)),
            Span::raw("(tekan / untuk mode perintah, q keluar)"),
        ])
    };
    let command_paragraph = Paragraph::new(command_prompt).block(
        Block::default()
            .borders(Borders::ALL)
            .title(if app.input_mode == InputMode::Command {
                "Mode Perintah (Enter jalankan, Esc batal, Tab lengkapi)"
            } else {
                "Perintah"
            })
            .style(if app.input_mode == InputMode::Command {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            }),
    );
    f.render_widget(command_paragraph, bottom_chunks[0]);

    // 日志区域：最新的在顶部
    let visible = bottom_chunks[1].height.saturating_sub(2) as usize;
    let log_items: Vec<ListItem> = app
        .log_messages
        .iter()
        .rev()
        .take(visible.max(1))
        .map(|msg| {
            let style = if msg.starts_with('✓') {
                Style::default().fg(Color::Green)
            } else if msg.starts_with('✗') {
                Style::default().fg(Color::Red)
            } else if msg.starts_with('⚠') {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(msg.as_str()).style(style)
        })
        .collect();

    let log = List::new(log_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Log ({} baris)", app.log_messages.len()))
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(log, bottom_chunks[1]);
}
