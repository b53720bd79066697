use crate::api::Achievement;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementLevel {
    Internasional,
    Nasional,
    Provinsi,
    Kabupaten,
    Kecamatan,
}

impl AchievementLevel {
    pub const ALL: [AchievementLevel; 5] = [
        AchievementLevel::Internasional,
        AchievementLevel::Nasional,
        AchievementLevel::Provinsi,
        AchievementLevel::Kabupaten,
        AchievementLevel::Kecamatan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementLevel::Internasional => "internasional",
            AchievementLevel::Nasional => "nasional",
            AchievementLevel::Provinsi => "provinsi",
            AchievementLevel::Kabupaten => "kabupaten",
            AchievementLevel::Kecamatan => "kecamatan",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AchievementLevel::Internasional => "Internasional",
            AchievementLevel::Nasional => "Nasional",
            AchievementLevel::Provinsi => "Provinsi",
            AchievementLevel::Kabupaten => "Kabupaten",
            AchievementLevel::Kecamatan => "Kecamatan",
        }
    }
}

impl FromStr for AchievementLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        AchievementLevel::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or(())
    }
}

/// 等级过滤：空字符串表示全部；未知等级原样透传
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelFilter(String);

impl LevelFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    /// 传给接口的参数；全部时为 None
    pub fn query(&self) -> Option<&str> {
        if self.0.is_empty() {
            None
        } else {
            Some(&self.0)
        }
    }

    pub fn known(&self) -> Option<AchievementLevel> {
        self.0.parse().ok()
    }

    pub fn label(&self) -> String {
        match (self.query(), self.known()) {
            (None, _) => "Semua".to_string(),
            (Some(_), Some(level)) => level.label().to_string(),
            (Some(raw), None) => raw.to_string(),
        }
    }

    /// 在 `Semua` 和五个等级之间循环；未知等级回到 `Semua`
    pub fn cycle(&self, forward: bool) -> LevelFilter {
        let tabs: Vec<LevelFilter> = std::iter::once(LevelFilter::all())
            .chain(AchievementLevel::ALL.iter().map(|l| LevelFilter::new(l.as_str())))
            .collect();
        let pos = tabs.iter().position(|t| t == self);
        let next = match (pos, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % tabs.len(),
            (Some(i), false) => (i + tabs.len() - 1) % tabs.len(),
        };
        tabs[next].clone()
    }
}

/// 标签页行，例如 `[Semua] Internasional Nasional ...`
pub fn filter_tabs(active: &LevelFilter) -> Vec<(String, bool)> {
    std::iter::once(LevelFilter::all())
        .chain(AchievementLevel::ALL.iter().map(|l| LevelFilter::new(l.as_str())))
        .map(|t| (t.label(), &t == active))
        .collect()
}

/// 成就页状态：每次切换过滤都会重新加载
#[derive(Debug, Clone)]
pub struct AchievementsPage {
    pub filter: LevelFilter,
    pub items: Vec<Achievement>,
    pub loading: bool,
    pub selected: usize,
}

impl AchievementsPage {
    pub fn new(filter: LevelFilter) -> Self {
        Self {
            filter,
            items: Vec::new(),
            loading: true,
            selected: 0,
        }
    }

    /// 切换过滤条件，返回需要重新加载的过滤值
    pub fn set_filter(&mut self, filter: LevelFilter) -> LevelFilter {
        self.filter = filter;
        self.loading = true;
        self.selected = 0;
        self.filter.clone()
    }

    /// 任何返回都直接覆盖（包括过期过滤条件的慢响应）
    pub fn apply(&mut self, items: Vec<Achievement>) {
        self.items = items;
        self.loading = false;
        if self.selected >= self.items.len() {
            self.selected = 0;
        }
    }

    pub fn empty_message(&self) -> &'static str {
        "Belum ada data prestasi untuk level ini."
    }
}

/// 首字母大写的等级名，用于卡片徽章
pub fn level_badge(level: &str) -> String {
    let mut chars = level.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
