//! 后台命令执行
//!
//! 每条命令在独立任务里执行，结果以 `AppEvent` 回传给界面循环。
//! 内容类请求失败时吞掉错误（记 warn 日志）并回传空结果，页面不出现错误横幅；
//! 只有报名提交与附件上传把错误显式交给界面。
use crate::api::{ApiError, Attachment, ContentApi, PostPage};
use crate::app_state::AppEvent;
use crate::commands::app_command::{AppCommand, HELP_TEXT};
use crate::config::PortalConfig;
use crate::content::{flatten_settings, ArticleState, LevelFilter};
use futures::join;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// 失败时记录日志并退化为默认值
fn or_default<T: Default>(op: &str, result: Result<T, ApiError>) -> T {
    result.unwrap_or_else(|e| {
        warn!("{} failed, showing empty state: {}", op, e);
        T::default()
    })
}

pub async fn handle_command(
    api: Arc<dyn ContentApi>,
    cfg: Arc<PortalConfig>,
    cmd: AppCommand,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    match cmd {
        AppCommand::LoadHome => load_home(api.as_ref(), &cfg, &tx).await,
        AppCommand::LoadAbout => load_about(api.as_ref(), &tx).await,
        AppCommand::LoadAchievements { level } => {
            load_achievements(api.as_ref(), &level, &tx).await
        }
        AppCommand::LoadPosts { page } => {
            let result = api.get_posts(page, cfg.posts_per_page).await;
            let page = result
                .map_err(|e| warn!("get_posts(page={}) failed: {}", page, e))
                .ok();
            let _ = tx.send(AppEvent::Posts(page));
        }
        AppCommand::LoadArticle { slug } => {
            let state = match api.get_post_by_slug(&slug).await {
                Ok(post) => ArticleState::Ready(Box::new(post)),
                Err(e) if e.is_not_found() => ArticleState::NotFound,
                Err(e) => {
                    warn!("get_post_by_slug({}) failed: {}", slug, e);
                    ArticleState::Unavailable
                }
            };
            let _ = tx.send(AppEvent::Article { slug, state });
        }
        AppCommand::LoadAdmissions => {
            let info = api
                .get_ppdb_info()
                .await
                .map_err(|e| warn!("get_ppdb_info failed: {}", e))
                .ok();
            let _ = tx.send(AppEvent::Admissions(info));
        }
        AppCommand::SubmitRegistration { payload } => {
            info!("submitting registration with {} fields", payload.fields.len());
            let result = api.submit_ppdb_registration(&payload).await;
            let _ = tx.send(AppEvent::Registration(result));
        }
        AppCommand::Upload { kind, path } => upload(api.as_ref(), kind, &path, &tx).await,
        AppCommand::Help => {
            let _ = tx.send(AppEvent::Message(HELP_TEXT.to_string()));
        }
        // 界面侧处理
        AppCommand::OpenRegister | AppCommand::Quit => {}
        AppCommand::Unknown(msg) => {
            let _ = tx.send(AppEvent::Error(msg));
        }
    }
}

async fn load_home(api: &dyn ContentApi, cfg: &PortalConfig, tx: &mpsc::UnboundedSender<AppEvent>) {
    let (settings, heroes, facilities, posts) = join!(
        api.get_settings(),
        api.get_heroes(),
        api.get_facilities(),
        api.get_posts(1, cfg.home_posts),
    );
    let _ = tx.send(AppEvent::Settings(flatten_settings(&or_default(
        "get_settings",
        settings,
    ))));
    let _ = tx.send(AppEvent::Heroes(or_default("get_heroes", heroes)));
    let _ = tx.send(AppEvent::Facilities(or_default("get_facilities", facilities)));
    let posts: PostPage = or_default("get_posts", posts);
    let _ = tx.send(AppEvent::LatestPosts(posts.data));
}

async fn load_about(api: &dyn ContentApi, tx: &mpsc::UnboundedSender<AppEvent>) {
    let (settings, teachers, facilities) =
        join!(api.get_settings(), api.get_teachers(), api.get_facilities());
    let _ = tx.send(AppEvent::Settings(flatten_settings(&or_default(
        "get_settings",
        settings,
    ))));
    let _ = tx.send(AppEvent::Teachers(or_default("get_teachers", teachers)));
    let _ = tx.send(AppEvent::Facilities(or_default("get_facilities", facilities)));
}

async fn load_achievements(
    api: &dyn ContentApi,
    level: &LevelFilter,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let items = or_default("get_achievements", api.get_achievements(level.query()).await);
    let _ = tx.send(AppEvent::Achievements(items));
}

async fn upload(
    api: &dyn ContentApi,
    kind: String,
    path: &Path,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) => {
            let _ = tx.send(AppEvent::Error(format!(
                "✗ Gagal membaca berkas {}: {}",
                path.display(),
                e
            )));
            return;
        }
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());
    let attachment = Attachment {
        file_name: file_name.clone(),
        bytes,
        kind,
    };
    match api.upload_attachment(attachment).await {
        Ok(_) => {
            let _ = tx.send(AppEvent::Message(format!("✓ Berkas terunggah: {}", file_name)));
        }
        Err(e) => {
            warn!("upload_attachment({}) failed: {}", file_name, e);
            let msg = e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string());
            let _ = tx.send(AppEvent::Error(format!("✗ Unggah gagal: {}", msg)));
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::{
        Achievement, Facility, Hero, Post, PpdbInfo, RegistrationPayload, RegistrationReceipt,
        SettingGroups, Teacher, UploadAck,
    };
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// 内存中的假后端；`fail` 为真时所有请求返回传输错误
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub fail: bool,
        pub achievements: Vec<Achievement>,
        pub posts: Vec<Post>,
        pub uploads: Mutex<Vec<(String, String, usize)>>,
        pub receipt: Option<String>,
    }

    fn down<T>() -> Result<T, ApiError> {
        Err(ApiError::Transport("connection refused".to_string()))
    }

    pub(crate) fn achievement(id: i64, level: &str) -> Achievement {
        Achievement {
            id,
            title: format!("Juara {}", id),
            student_name: None,
            competition_name: None,
            level: level.to_string(),
            year: Some(2024),
            image_url: None,
        }
    }

    pub(crate) fn post(id: i64, slug: &str) -> Post {
        Post {
            id,
            title: format!("Berita {}", id),
            slug: slug.to_string(),
            excerpt: None,
            content: "<p>Isi</p>".to_string(),
            thumbnail: None,
            thumbnail_url: None,
            status: "published".to_string(),
            published_at: Some("2024-01-12T08:00:00Z".to_string()),
            meta_title: None,
            meta_description: None,
            author: None,
        }
    }

    #[async_trait]
    impl ContentApi for FakeApi {
        async fn get_settings(&self) -> Result<SettingGroups, ApiError> {
            if self.fail {
                return down();
            }
            let groups: SettingGroups = serde_json::from_value(json!({
                "general": {"site_tagline": "Sekolah Qur'ani"},
                "profile": {"school_vision": "Unggul"}
            }))
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
            Ok(groups)
        }

        async fn get_heroes(&self) -> Result<Vec<Hero>, ApiError> {
            if self.fail {
                return down();
            }
            Ok(Vec::new())
        }

        async fn get_facilities(&self) -> Result<Vec<Facility>, ApiError> {
            if self.fail {
                return down();
            }
            Ok(vec![Facility {
                id: 1,
                name: "Masjid".to_string(),
                description: None,
                image_url: None,
                icon_svg: None,
            }])
        }

        async fn get_achievements(&self, level: Option<&str>) -> Result<Vec<Achievement>, ApiError> {
            if self.fail {
                return down();
            }
            Ok(self
                .achievements
                .iter()
                .filter(|a| level.map_or(true, |l| a.level == l))
                .cloned()
                .collect())
        }

        async fn get_posts(&self, page: u32, per_page: u32) -> Result<PostPage, ApiError> {
            if self.fail {
                return down();
            }
            let per_page = per_page.max(1) as usize;
            let start = (page.saturating_sub(1) as usize) * per_page;
            let last_page = ((self.posts.len() + per_page - 1) / per_page) as u32;
            Ok(PostPage {
                data: self.posts.iter().skip(start).take(per_page).cloned().collect(),
                current_page: Some(page),
                last_page,
                total: self.posts.len() as u64,
            })
        }

        async fn get_post_by_slug(&self, slug: &str) -> Result<Post, ApiError> {
            if self.fail {
                return down();
            }
            self.posts
                .iter()
                .find(|p| p.slug == slug)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(slug.to_string()))
        }

        async fn get_teachers(&self) -> Result<Vec<Teacher>, ApiError> {
            if self.fail {
                return down();
            }
            Ok(Vec::new())
        }

        async fn get_ppdb_info(&self) -> Result<PpdbInfo, ApiError> {
            if self.fail {
                return down();
            }
            Ok(PpdbInfo {
                is_open: true,
                year: "2024/2025".to_string(),
                quota: 60,
                registered: 12,
                ..PpdbInfo::default()
            })
        }

        async fn submit_ppdb_registration(
            &self,
            _payload: &RegistrationPayload,
        ) -> Result<RegistrationReceipt, ApiError> {
            if self.fail {
                return down();
            }
            Ok(RegistrationReceipt {
                registration_number: self.receipt.clone(),
            })
        }

        async fn upload_attachment(&self, attachment: Attachment) -> Result<UploadAck, ApiError> {
            if self.fail {
                return down();
            }
            if let Ok(mut uploads) = self.uploads.lock() {
                uploads.push((attachment.file_name, attachment.kind, attachment.bytes.len()));
            }
            Ok(json!({"ok": true}))
        }
    }

    async fn run(api: FakeApi, cmd: AppCommand) -> Vec<AppEvent> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        handle_command(Arc::new(api), Arc::new(PortalConfig::default()), cmd, tx).await;
        let mut events = Vec::new();
        while let Ok(evt) = rx.try_recv() {
            events.push(evt);
        }
        events
    }

    #[tokio::test]
    async fn nasional_filter_yields_only_nasional() {
        let api = FakeApi {
            achievements: vec![
                achievement(1, "nasional"),
                achievement(2, "kecamatan"),
                achievement(3, "nasional"),
            ],
            ..FakeApi::default()
        };
        let events = run(
            api,
            AppCommand::LoadAchievements {
                level: LevelFilter::new("nasional"),
            },
        )
        .await;
        match events.as_slice() {
            [AppEvent::Achievements(items)] => {
                assert_eq!(items.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);
                assert!(items.iter().all(|a| a.level == "nasional"));
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_filter_yields_everything() {
        let api = FakeApi {
            achievements: vec![achievement(1, "nasional"), achievement(2, "kecamatan")],
            ..FakeApi::default()
        };
        let events = run(
            api,
            AppCommand::LoadAchievements {
                level: LevelFilter::all(),
            },
        )
        .await;
        assert!(matches!(events.as_slice(), [AppEvent::Achievements(items)] if items.len() == 2));
    }

    #[tokio::test]
    async fn failed_home_load_degrades_to_empty_state() {
        let api = FakeApi {
            fail: true,
            ..FakeApi::default()
        };
        let events = run(api, AppCommand::LoadHome).await;
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| !matches!(e, AppEvent::Error(_))));
        assert!(matches!(&events[0], AppEvent::Settings(s) if s.is_empty()));
        assert!(matches!(&events[3], AppEvent::LatestPosts(p) if p.is_empty()));
    }

    #[tokio::test]
    async fn home_load_flattens_settings_and_limits_posts() {
        let api = FakeApi {
            posts: (1..=5).map(|i| post(i, &format!("berita-{}", i))).collect(),
            ..FakeApi::default()
        };
        let events = run(api, AppCommand::LoadHome).await;
        match &events[0] {
            AppEvent::Settings(s) => {
                assert_eq!(s.get("site_tagline").map(String::as_str), Some("Sekolah Qur'ani"));
                assert_eq!(s.get("school_vision").map(String::as_str), Some("Unggul"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(&events[3], AppEvent::LatestPosts(p) if p.len() == 3));
    }

    #[tokio::test]
    async fn article_distinguishes_not_found_from_unavailable() {
        let api = FakeApi {
            posts: vec![post(1, "ada")],
            ..FakeApi::default()
        };
        let events = run(
            api,
            AppCommand::LoadArticle {
                slug: "tidak-ada".to_string(),
            },
        )
        .await;
        assert!(matches!(
            events.as_slice(),
            [AppEvent::Article { state: ArticleState::NotFound, .. }]
        ));

        let api = FakeApi {
            fail: true,
            ..FakeApi::default()
        };
        let events = run(
            api,
            AppCommand::LoadArticle {
                slug: "ada".to_string(),
            },
        )
        .await;
        assert!(matches!(
            events.as_slice(),
            [AppEvent::Article { state: ArticleState::Unavailable, .. }]
        ));
    }

    #[tokio::test]
    async fn failed_posts_load_sends_none() {
        let api = FakeApi {
            fail: true,
            ..FakeApi::default()
        };
        let events = run(api, AppCommand::LoadPosts { page: 2 }).await;
        assert!(matches!(events.as_slice(), [AppEvent::Posts(None)]));
    }

    #[tokio::test]
    async fn submit_failure_is_surfaced() {
        let api = FakeApi {
            fail: true,
            ..FakeApi::default()
        };
        let payload = RegistrationPayload::new(BTreeMap::new(), 1, 1);
        let events = run(api, AppCommand::SubmitRegistration { payload }).await;
        assert!(matches!(
            events.as_slice(),
            [AppEvent::Registration(Err(ApiError::Transport(_)))]
        ));
    }

    #[tokio::test]
    async fn upload_of_missing_file_reports_error() {
        let events = run(
            FakeApi::default(),
            AppCommand::Upload {
                kind: "akta".to_string(),
                path: "/nonexistent/akta.pdf".into(),
            },
        )
        .await;
        assert!(matches!(events.as_slice(), [AppEvent::Error(_)]));
    }

    #[tokio::test]
    async fn upload_sends_file_and_type() {
        let path = std::env::temp_dir().join(format!("ppdb-upload-{}.txt", std::process::id()));
        tokio::fs::write(&path, b"dokumen").await.unwrap();
        let api = Arc::new(FakeApi::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        handle_command(
            api.clone(),
            Arc::new(PortalConfig::default()),
            AppCommand::Upload {
                kind: "kk".to_string(),
                path: path.clone(),
            },
            tx,
        )
        .await;
        let _ = tokio::fs::remove_file(&path).await;
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Message(_))));
        let uploads = api.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].1, "kk");
        assert_eq!(uploads[0].2, 7);
    }
}
