use crate::api::{
    ApiError, AssetResolver, Achievement, Facility, Hero, Post, PostPage, PpdbInfo,
    RegistrationReceipt, Teacher,
};
use crate::commands::app_command::completion_hint;
use crate::commands::AppCommand;
use crate::config::PortalConfig;
use crate::content::{
    AboutPage, AchievementsPage, AdmissionsPage, ArticlePage, ArticleState, HomePage, LevelFilter,
    NewsPage, Settings,
};
use crate::wizard::{Outcome, WizardAction, WizardEffect, WizardPage};
use crossterm::event::KeyCode;
use std::str::FromStr;
use tokio::sync::mpsc;

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ViewMode {
    Home,
    About,
    Achievements,
    News,
    Article,
    Admissions,
    Register,
}

/// 左侧菜单：标签与对应视图（文章详情不在菜单里，归到“Informasi”下）
pub const MENU: [(&str, ViewMode); 6] = [
    ("Beranda", ViewMode::Home),
    ("Tentang Kami", ViewMode::About),
    ("Prestasi", ViewMode::Achievements),
    ("Informasi", ViewMode::News),
    ("PPDB", ViewMode::Admissions),
    ("Daftar PPDB", ViewMode::Register),
];

#[derive(PartialEq, Debug, Clone)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(PartialEq, Debug, Clone)]
pub enum FocusArea {
    Menu,     // 焦点在左侧菜单
    MainView, // 焦点在主视图
}

/// 当前挂载的页面及其私有状态
///
/// 同一时刻只有一个页面存活；切换页面即丢弃旧状态，迟到的响应找不到目标就被丢弃。
#[derive(Debug)]
pub enum Page {
    Home(HomePage),
    About(AboutPage),
    Achievements(AchievementsPage),
    News(NewsPage),
    Article(ArticlePage),
    Admissions(AdmissionsPage),
    Register(Box<WizardPage>),
}

impl Page {
    pub fn view_mode(&self) -> ViewMode {
        match self {
            Page::Home(_) => ViewMode::Home,
            Page::About(_) => ViewMode::About,
            Page::Achievements(_) => ViewMode::Achievements,
            Page::News(_) => ViewMode::News,
            Page::Article(_) => ViewMode::Article,
            Page::Admissions(_) => ViewMode::Admissions,
            Page::Register(_) => ViewMode::Register,
        }
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Message(String),
    Error(String),
    Settings(Settings),
    Heroes(Vec<Hero>),
    Facilities(Vec<Facility>),
    LatestPosts(Vec<Post>),
    Teachers(Vec<Teacher>),
    Achievements(Vec<Achievement>),
    /// 失败时为 None
    Posts(Option<PostPage>),
    Article { slug: String, state: ArticleState },
    Admissions(Option<PpdbInfo>),
    Registration(Result<RegistrationReceipt, ApiError>),
}

pub struct App {
    pub page: Page,
    pub input_mode: InputMode,
    pub focus_area: FocusArea,
    pub menu_selected_index: usize,
    pub scroll: u16,
    pub assets: AssetResolver,
    pub posts_per_page: u32,
    pub entity_id: u64,
    pub unit_id: u64,
    pub command_input: String,
    pub command_cursor: usize,
    pub command_history: Vec<String>,
    pub command_history_index: Option<usize>,
    pub log_messages: Vec<String>,
    pub cmd_tx: mpsc::UnboundedSender<AppCommand>,
    pub evt_rx: Option<mpsc::UnboundedReceiver<AppEvent>>,
}

impl App {
    /// 创建并挂载首页
    pub fn new(
        cfg: &PortalConfig,
        startup_info: Vec<String>,
        cmd_tx: mpsc::UnboundedSender<AppCommand>,
        evt_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> App {
        let mut log_messages = vec!["Aplikasi dimulai".to_string()];
        log_messages.extend(startup_info);

        let mut app = App {
            page: Page::Home(HomePage::new()),
            input_mode: InputMode::Normal,
            focus_area: FocusArea::Menu,
            menu_selected_index: 0,
            scroll: 0,
            assets: AssetResolver::new(cfg.storage_url.clone()),
            posts_per_page: cfg.posts_per_page,
            entity_id: cfg.entity_id,
            unit_id: cfg.unit_id,
            command_input: String::new(),
            command_cursor: 0,
            command_history: Vec::new(),
            command_history_index: None,
            log_messages,
            cmd_tx,
            evt_rx: Some(evt_rx),
        };
        app.show_home();
        app
    }

    pub fn view_mode(&self) -> ViewMode {
        self.page.view_mode()
    }

    fn send(&self, cmd: AppCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// 替换当前页面并同步菜单高亮
    fn mount(&mut self, page: Page) {
        let mode = page.view_mode();
        self.page = page;
        self.scroll = 0;
        let menu_mode = if mode == ViewMode::Article {
            ViewMode::News
        } else {
            mode
        };
        if let Some(i) = MENU.iter().position(|(_, m)| *m == menu_mode) {
            self.menu_selected_index = i;
        }
    }

    pub fn show_home(&mut self) {
        self.mount(Page::Home(HomePage::new()));
        self.send(AppCommand::LoadHome);
    }

    pub fn show_about(&mut self) {
        self.mount(Page::About(AboutPage::new()));
        self.send(AppCommand::LoadAbout);
    }

    pub fn show_achievements(&mut self, level: LevelFilter) {
        self.mount(Page::Achievements(AchievementsPage::new(level.clone())));
        self.send(AppCommand::LoadAchievements { level });
    }

    pub fn show_news(&mut self, page: u32) {
        self.mount(Page::News(NewsPage::new(page, self.posts_per_page)));
        self.send(AppCommand::LoadPosts { page });
    }

    /// `from_page` 是按 x/Esc 返回时的新闻页码
    pub fn show_article(&mut self, slug: String, from_page: u32) {
        self.mount(Page::Article(ArticlePage::new(slug.clone(), from_page)));
        self.send(AppCommand::LoadArticle { slug });
    }

    pub fn show_admissions(&mut self) {
        self.mount(Page::Admissions(AdmissionsPage::new()));
        self.send(AppCommand::LoadAdmissions);
    }

    /// 报名向导每次进入都是一份新的草稿
    pub fn show_register(&mut self) {
        self.mount(Page::Register(Box::new(WizardPage::new(
            self.entity_id,
            self.unit_id,
        ))));
    }

    fn open_menu_item(&mut self, index: usize) {
        match MENU.get(index).map(|(_, m)| *m) {
            Some(ViewMode::Home) => self.show_home(),
            Some(ViewMode::About) => self.show_about(),
            Some(ViewMode::Achievements) => self.show_achievements(LevelFilter::all()),
            Some(ViewMode::News) => self.show_news(1),
            Some(ViewMode::Admissions) => self.show_admissions(),
            Some(ViewMode::Register) => self.show_register(),
            Some(ViewMode::Article) | None => {}
        }
    }

    /// 定时器驱动的横幅轮播；只在首页挂载时生效
    pub fn on_tick(&mut self) -> bool {
        match &mut self.page {
            Page::Home(home) => home.carousel.tick(),
            _ => false,
        }
    }

    /// 把后台结果写入当前页面；目标页面不存在时丢弃
    pub fn apply_event(&mut self, event: AppEvent) {
        match (event, &mut self.page) {
            (AppEvent::Message(msg), _) | (AppEvent::Error(msg), _) => {
                self.log_messages.push(msg)
            }
            (AppEvent::Settings(s), Page::Home(home)) => home.settings = s,
            (AppEvent::Settings(s), Page::About(about)) => about.settings = s,
            (AppEvent::Heroes(heroes), Page::Home(home)) => home.set_heroes(heroes),
            (AppEvent::Facilities(list), Page::Home(home)) => home.facilities = list,
            (AppEvent::Facilities(list), Page::About(about)) => about.facilities = list,
            (AppEvent::LatestPosts(posts), Page::Home(home)) => home.latest_posts = posts,
            (AppEvent::Teachers(list), Page::About(about)) => about.teachers = list,
            (AppEvent::Achievements(items), Page::Achievements(page)) => page.apply(items),
            (AppEvent::Posts(Some(result)), Page::News(news)) => news.apply(result),
            (AppEvent::Posts(None), Page::News(news)) => news.apply_empty(),
            (AppEvent::Article { slug, state }, Page::Article(article)) => {
                article.apply(&slug, state);
            }
            (AppEvent::Admissions(info), Page::Admissions(page)) => page.info = info,
            (AppEvent::Registration(result), Page::Register(form)) if form.wizard.is_submitting() => {
                form.dispatch(WizardAction::Submitted(result));
                if let Some(outcome) = form.wizard.outcome() {
                    self.log_messages.push(outcome.log_line());
                }
            }
            // 向导已关闭或已重新打开：结果只进日志栏，不能丢
            (AppEvent::Registration(result), _) => {
                log::warn!("registration result arrived after the wizard was closed");
                self.log_messages.push(Outcome::from_result(&result).log_line());
            }
            // 页面已卸载
            _ => {}
        }
    }

    /// 获取当前的补全建议
    pub fn get_completion_hint(&self) -> Option<String> {
        completion_hint(&self.command_input).map(str::to_string)
    }

    /// 执行命令栏输入；返回 true 表示退出
    fn run_command_line(&mut self, line: &str) -> bool {
        let cmd = AppCommand::from_str(line).unwrap_or_else(|_| AppCommand::Unknown(line.to_string()));
        match cmd {
            AppCommand::Quit => return true,
            AppCommand::LoadHome => self.show_home(),
            AppCommand::LoadAbout => self.show_about(),
            AppCommand::LoadAchievements { level } => self.show_achievements(level),
            AppCommand::LoadPosts { page } => self.show_news(page),
            AppCommand::LoadArticle { slug } => self.show_article(slug, 1),
            AppCommand::LoadAdmissions => self.show_admissions(),
            AppCommand::OpenRegister => self.show_register(),
            other => self.send(other),
        }
        self.focus_area = FocusArea::MainView;
        false
    }

    fn finish_command_input(&mut self) {
        self.command_history_index = None;
        self.command_input.clear();
        self.command_cursor = 0;
        self.input_mode = InputMode::Normal;
    }

    fn handle_command_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Enter => {
                let line = self.command_input.trim().to_string();
                if line.is_empty() {
                    self.finish_command_input();
                    return false;
                }
                self.command_history.push(line.clone());
                self.finish_command_input();
                return self.run_command_line(&line);
            }
            KeyCode::Esc => self.finish_command_input(),
            KeyCode::Tab => {
                if let Some(hint) = self.get_completion_hint() {
                    let insert = format!("{} ", hint);
                    self.command_input.insert_str(self.command_cursor, &insert);
                    self.command_cursor += insert.len();
                }
            }
            KeyCode::Up => {
                if self.command_history.is_empty() {
                    return false;
                }
                let next = match self.command_history_index {
                    None => self.command_history.len().saturating_sub(1),
                    Some(i) => i.saturating_sub(1),
                };
                self.recall_history(next);
            }
            KeyCode::Down => {
                let Some(i) = self.command_history_index else {
                    return false;
                };
                if i + 1 >= self.command_history.len() {
                    self.command_history_index = None;
                    self.command_input.clear();
                    self.command_cursor = 0;
                } else {
                    self.recall_history(i + 1);
                }
            }
            KeyCode::Backspace => {
                if self.command_cursor > 0 {
                    let idx = prev_char_boundary(&self.command_input, self.command_cursor);
                    self.command_input.remove(idx);
                    self.command_cursor = idx;
                }
            }
            KeyCode::Left => {
                self.command_cursor = prev_char_boundary(&self.command_input, self.command_cursor);
            }
            KeyCode::Right => {
                if let Some(c) = self.command_input[self.command_cursor..].chars().next() {
                    self.command_cursor += c.len_utf8();
                }
            }
            KeyCode::Home => self.command_cursor = 0,
            KeyCode::End => self.command_cursor = self.command_input.len(),
            KeyCode::Char(c) => {
                self.command_input.insert(self.command_cursor, c);
                self.command_cursor += c.len_utf8();
            }
            _ => {}
        }
        false
    }

    fn recall_history(&mut self, index: usize) {
        self.command_history_index = Some(index);
        if let Some(cmd) = self.command_history.get(index) {
            self.command_input = cmd.clone();
            self.command_cursor = self.command_input.len();
        }
    }

    /// 报名页编辑字段时，按键全部写入编辑缓冲
    fn handle_edit_key(form: &mut WizardPage, key: KeyCode) {
        match key {
            KeyCode::Enter => form.commit_edit(),
            KeyCode::Esc => form.cancel_edit(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Tab => form.newline(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyCode) -> bool {
        if self.input_mode == InputMode::Command {
            return self.handle_command_key(key);
        }

        if let Page::Register(form) = &mut self.page {
            if form.is_editing() {
                Self::handle_edit_key(form, key);
                return false;
            }
        }

        // 正常模式下的按键处理
        match key {
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Command;
                self.command_input.clear();
                self.command_cursor = 0;
            }
            KeyCode::Char('q') => return true,
            KeyCode::Left | KeyCode::Right if self.focus_area == FocusArea::MainView => {
                let forward = key == KeyCode::Right;
                match &mut self.page {
                    Page::Register(form) if form.focused().is_some_and(|f| !f.is_textual()) => {
                        form.cycle(forward)
                    }
                    _ if !forward => self.focus_area = FocusArea::Menu,
                    _ => {}
                }
            }
            KeyCode::Right => self.focus_area = FocusArea::MainView,
            KeyCode::Left => {}
            KeyCode::Up | KeyCode::Down => {
                let down = key == KeyCode::Down;
                if self.focus_area == FocusArea::Menu {
                    if down {
                        self.menu_selected_index = (self.menu_selected_index + 1).min(MENU.len() - 1);
                    } else {
                        self.menu_selected_index = self.menu_selected_index.saturating_sub(1);
                    }
                } else {
                    self.move_in_view(down);
                }
            }
            KeyCode::Enter | KeyCode::Char('c') => {
                if self.focus_area == FocusArea::Menu {
                    self.open_menu_item(self.menu_selected_index);
                    // 确认后自动切换焦点到主视图
                    self.focus_area = FocusArea::MainView;
                } else {
                    self.confirm_in_view();
                }
            }
            KeyCode::Char('x') | KeyCode::Esc => {
                if let Page::Article(article) = &self.page {
                    let page = article.from_page;
                    self.show_news(page);
                }
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if let Page::Achievements(page) = &mut self.page {
                    let next = page.filter.cycle(key == KeyCode::Char('f'));
                    let level = page.set_filter(next);
                    self.send(AppCommand::LoadAchievements { level });
                }
            }
            KeyCode::Char('n') | KeyCode::Char('p') => self.page_step(key == KeyCode::Char('n')),
            KeyCode::Char('s') => self.submit_registration(),
            KeyCode::Char('r') => {
                if let Page::Register(form) = &mut self.page {
                    form.dispatch(WizardAction::Retry);
                }
            }
            KeyCode::Char(d @ '1'..='9') => {
                if let Page::Home(home) = &mut self.page {
                    let index = d as usize - '1' as usize;
                    home.carousel.select(index);
                }
            }
            _ => {}
        }
        false
    }

    fn move_in_view(&mut self, down: bool) {
        let step = |sel: &mut usize, len: usize| {
            if down {
                if *sel + 1 < len {
                    *sel += 1;
                }
            } else {
                *sel = sel.saturating_sub(1);
            }
        };
        match &mut self.page {
            Page::Achievements(page) => step(&mut page.selected, page.items.len()),
            Page::News(news) => step(&mut news.selected, news.posts.len()),
            Page::Register(form) => form.move_cursor(down),
            _ => {
                self.scroll = if down {
                    self.scroll.saturating_add(1)
                } else {
                    self.scroll.saturating_sub(1)
                }
            }
        }
    }

    fn confirm_in_view(&mut self) {
        match &mut self.page {
            Page::News(news) => {
                if let Some(slug) = news.selected_post().map(|p| p.slug.clone()) {
                    let from_page = news.page;
                    self.show_article(slug, from_page);
                }
            }
            Page::Admissions(_) => self.show_register(),
            Page::Register(form) => form.activate(),
            _ => {}
        }
    }

    /// n/p：新闻翻页、向导前后步、首页横幅切换
    fn page_step(&mut self, forward: bool) {
        match &mut self.page {
            Page::News(news) => {
                let target = if forward {
                    news.next_page()
                } else {
                    news.prev_page()
                };
                if let Some(page) = target {
                    let page = news.go_to(page);
                    self.send(AppCommand::LoadPosts { page });
                }
            }
            Page::Register(form) => {
                let action = if forward {
                    WizardAction::Next
                } else {
                    WizardAction::Previous
                };
                form.dispatch(action);
            }
            Page::Home(home) => {
                let len = home.carousel.len();
                if len > 1 {
                    let i = home.carousel.index();
                    let target = if forward { (i + 1) % len } else { (i + len - 1) % len };
                    home.carousel.select(target);
                }
            }
            _ => {}
        }
    }

    fn submit_registration(&mut self) {
        let Page::Register(form) = &mut self.page else {
            return;
        };
        if let Some(WizardEffect::Submit(payload)) = form.dispatch(WizardAction::Submit) {
            self.log_messages.push("Mengirim pendaftaran...".to_string());
            self.send(AppCommand::SubmitRegistration { payload });
        }
    }
}

fn prev_char_boundary(s: &str, cursor: usize) -> usize {
    s[..cursor]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Step;
    use pretty_assertions::assert_eq;

    fn app() -> (App, mpsc::UnboundedReceiver<AppCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (_evt_tx, evt_rx) = mpsc::unbounded_channel();
        (App::new(&PortalConfig::default(), Vec::new(), cmd_tx, evt_rx), cmd_rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<AppCommand>) -> Vec<AppCommand> {
        let mut out = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    fn type_line(app: &mut App, line: &str) -> bool {
        app.handle_key_event(KeyCode::Char('/'));
        for c in line.chars() {
            app.handle_key_event(KeyCode::Char(c));
        }
        app.handle_key_event(KeyCode::Enter)
    }

    #[test]
    fn startup_mounts_home_and_loads_it() {
        let (app, mut rx) = app();
        assert_eq!(app.view_mode(), ViewMode::Home);
        assert_eq!(drain(&mut rx), vec![AppCommand::LoadHome]);
    }

    #[test]
    fn command_line_navigates_and_loads() {
        let (mut app, mut rx) = app();
        drain(&mut rx);
        assert!(!type_line(&mut app, "prestasi nasional"));
        assert_eq!(app.view_mode(), ViewMode::Achievements);
        assert_eq!(
            drain(&mut rx),
            vec![AppCommand::LoadAchievements {
                level: LevelFilter::new("nasional")
            }]
        );
        assert_eq!(app.command_history, vec!["prestasi nasional".to_string()]);
        assert!(type_line(&mut app, "quit"));
    }

    #[test]
    fn late_response_for_unmounted_view_is_dropped() {
        let (mut app, _rx) = app();
        app.show_about();
        app.apply_event(AppEvent::Heroes(vec![Hero {
            id: 1,
            title: "Banner".to_string(),
            subtitle: None,
            media_type: Default::default(),
            media_url: None,
            cta_text: None,
            cta_url: None,
            order: 0,
        }]));
        app.show_home();
        let Page::Home(home) = &app.page else {
            panic!("home not mounted");
        };
        assert!(home.carousel.is_empty());
    }

    #[test]
    fn failed_posts_show_empty_list() {
        let (mut app, _rx) = app();
        app.show_news(2);
        app.apply_event(AppEvent::Posts(None));
        let Page::News(news) = &app.page else {
            panic!("news not mounted");
        };
        assert!(!news.loading);
        assert!(news.posts.is_empty());
        assert_eq!(news.page, 2);
    }

    #[test]
    fn filter_key_refetches_achievements() {
        let (mut app, mut rx) = app();
        app.show_achievements(LevelFilter::all());
        drain(&mut rx);
        app.handle_key_event(KeyCode::Char('f'));
        let cmds = drain(&mut rx);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(&cmds[0], AppCommand::LoadAchievements { level } if level.query().is_some()));
    }

    #[test]
    fn register_flow_through_keys() {
        let (mut app, mut rx) = app();
        type_line(&mut app, "daftar");
        drain(&mut rx);

        // 第一步没填时不能前进
        app.handle_key_event(KeyCode::Char('n'));
        let Page::Register(form) = &app.page else {
            panic!("register not mounted");
        };
        assert_eq!(form.wizard.step(), Step::StudentData);
        assert_eq!(form.wizard.errors().len(), 2);

        // 姓名
        app.handle_key_event(KeyCode::Enter);
        for c in "Aisyah".chars() {
            app.handle_key_event(KeyCode::Char(c));
        }
        app.handle_key_event(KeyCode::Enter);
        // 性别
        app.handle_key_event(KeyCode::Down);
        app.handle_key_event(KeyCode::Right);
        for _ in 0..4 {
            app.handle_key_event(KeyCode::Char('n'));
        }
        app.handle_key_event(KeyCode::Char('s'));

        let cmds = drain(&mut rx);
        match cmds.as_slice() {
            [AppCommand::SubmitRegistration { payload }] => {
                assert_eq!(payload.fields.get("student_name").map(String::as_str), Some("Aisyah"));
                assert_eq!(payload.fields.get("gender").map(String::as_str), Some("L"));
                assert_eq!(payload.entity_id, 1);
            }
            other => panic!("unexpected commands: {:?}", other),
        }

        app.apply_event(AppEvent::Registration(Ok(RegistrationReceipt {
            registration_number: Some("PPDB-2024-0001".to_string()),
        })));
        let Page::Register(form) = &app.page else {
            panic!("register not mounted");
        };
        assert_eq!(
            form.wizard.outcome(),
            Some(&Outcome::Success {
                registration_number: Some("PPDB-2024-0001".to_string())
            })
        );
        assert_eq!(
            app.log_messages.last().map(String::as_str),
            Some("✓ Pendaftaran berhasil: PPDB-2024-0001")
        );
    }

    /// 通过按键填好第一步并提交
    fn submit_minimal_registration(app: &mut App) {
        type_line(app, "daftar");
        app.handle_key_event(KeyCode::Enter);
        for c in "Aisyah".chars() {
            app.handle_key_event(KeyCode::Char(c));
        }
        app.handle_key_event(KeyCode::Enter);
        app.handle_key_event(KeyCode::Down);
        app.handle_key_event(KeyCode::Right);
        for _ in 0..4 {
            app.handle_key_event(KeyCode::Char('n'));
        }
        app.handle_key_event(KeyCode::Char('s'));
    }

    #[test]
    fn registration_result_reaches_log_after_leaving_wizard() {
        let (mut app, mut rx) = app();
        submit_minimal_registration(&mut app);
        assert!(drain(&mut rx)
            .iter()
            .any(|c| matches!(c, AppCommand::SubmitRegistration { .. })));

        app.show_home();
        app.apply_event(AppEvent::Registration(Ok(RegistrationReceipt {
            registration_number: Some("PPDB-2024-0001".to_string()),
        })));
        assert_eq!(app.view_mode(), ViewMode::Home);
        assert_eq!(
            app.log_messages.last().map(String::as_str),
            Some("✓ Pendaftaran berhasil: PPDB-2024-0001")
        );
    }

    #[test]
    fn registration_failure_for_closed_wizard_is_not_applied_to_new_one() {
        let (mut app, _rx) = app();
        submit_minimal_registration(&mut app);
        // 重新打开得到一份新的草稿
        type_line(&mut app, "daftar");
        app.apply_event(AppEvent::Registration(Err(ApiError::Transport(
            "connection reset".to_string(),
        ))));

        let Page::Register(form) = &app.page else {
            panic!("register not mounted");
        };
        assert_eq!(form.wizard.step(), Step::StudentData);
        assert!(form.wizard.outcome().is_none());
        assert_eq!(
            app.log_messages.last().map(String::as_str),
            Some("✗ Gagal mengirim pendaftaran. Silakan coba lagi.")
        );
    }

    #[test]
    fn closing_article_returns_to_its_news_page() {
        let (mut app, mut rx) = app();
        app.show_news(3);
        app.apply_event(AppEvent::Posts(Some(PostPage {
            data: vec![crate::app_service::tests::post(7, "hari-santri")],
            current_page: Some(3),
            last_page: 4,
            total: 31,
        })));
        drain(&mut rx);

        app.focus_area = FocusArea::MainView;
        app.handle_key_event(KeyCode::Enter);
        assert_eq!(app.view_mode(), ViewMode::Article);
        assert_eq!(
            drain(&mut rx),
            vec![AppCommand::LoadArticle {
                slug: "hari-santri".to_string()
            }]
        );

        app.handle_key_event(KeyCode::Char('x'));
        let Page::News(news) = &app.page else {
            panic!("news not mounted");
        };
        assert_eq!(news.page, 3);
        assert_eq!(drain(&mut rx), vec![AppCommand::LoadPosts { page: 3 }]);
    }

    #[test]
    fn article_opened_by_command_returns_to_first_page() {
        let (mut app, mut rx) = app();
        type_line(&mut app, "post hari-santri");
        drain(&mut rx);
        app.handle_key_event(KeyCode::Esc);
        assert_eq!(drain(&mut rx), vec![AppCommand::LoadPosts { page: 1 }]);
    }

    #[test]
    fn hero_tick_only_on_home() {
        let (mut app, _rx) = app();
        app.show_news(1);
        assert!(!app.on_tick());
    }
}
