use crate::api::{Facility, Hero, Post};
use crate::content::hero::HeroCarousel;
use crate::content::settings::{setting_or, Settings, KEY_SITE_TAGLINE};

pub const DEFAULT_HERO_TITLE: &str = "Membangun Generasi Qur'ani";
pub const DEFAULT_TAGLINE: &str =
    "Pendidikan berkualitas dengan landasan akhlakul karimah untuk masa depan umat yang gemilang.";

/// 首页：横幅、设施、最新文章、设置
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    pub carousel: HeroCarousel,
    pub facilities: Vec<Facility>,
    pub latest_posts: Vec<Post>,
    pub settings: Settings,
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_heroes(&mut self, heroes: Vec<Hero>) {
        self.carousel.replace(heroes);
    }

    pub fn title(&self) -> &str {
        self.carousel
            .current()
            .map(|h| h.title.as_str())
            .unwrap_or(DEFAULT_HERO_TITLE)
    }

    /// 横幅副标题 -> `site_tagline` 设置 -> 内置标语
    pub fn subtitle(&self) -> &str {
        self.carousel
            .current()
            .and_then(|h| h.subtitle.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| setting_or(&self.settings, KEY_SITE_TAGLINE, DEFAULT_TAGLINE))
    }
}
