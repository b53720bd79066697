use crate::api::{Facility, Teacher};
use crate::content::settings::{setting_or, Settings, KEY_SCHOOL_MISSION, KEY_SCHOOL_VISION};

pub const DEFAULT_VISION: &str = "Menjadi lembaga pendidikan Islam terdepan yang mencetak generasi Qur'ani, berilmu, berakhlak mulia, dan berwawasan global.";

pub const DEFAULT_MISSIONS: [&str; 4] = [
    "Menyelenggarakan pendidikan berkualitas berdasarkan Al-Quran dan Sunnah",
    "Mengembangkan potensi akademik dan non-akademik santri secara optimal",
    "Membentuk karakter Islami yang kuat dan berakhlakul karimah",
    "Mempersiapkan generasi yang kompetitif di era global",
];

/// "Tentang Kami"：愿景使命、教师、设施
#[derive(Debug, Clone, Default)]
pub struct AboutPage {
    pub settings: Settings,
    pub teachers: Vec<Teacher>,
    pub facilities: Vec<Facility>,
}

impl AboutPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vision(&self) -> &str {
        setting_or(&self.settings, KEY_SCHOOL_VISION, DEFAULT_VISION)
    }

    /// 设置了 `school_mission` 时作为单段文本，否则用内置条目
    pub fn missions(&self) -> Vec<&str> {
        match self
            .settings
            .get(KEY_SCHOOL_MISSION)
            .filter(|m| !m.trim().is_empty())
        {
            Some(m) => vec![m.as_str()],
            None => DEFAULT_MISSIONS.to_vec(),
        }
    }
}
