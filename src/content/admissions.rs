use crate::api::PpdbInfo;

/// 招生流程说明（编号、标题、描述）
pub const FLOW: [(u8, &str, &str); 5] = [
    (1, "Ambil Formulir", "Unduh dan isi formulir pendaftaran online melalui website."),
    (2, "Isi Data Lengkap", "Lengkapi semua data calon santri dan orang tua sesuai dokumen."),
    (3, "Upload Dokumen", "Unggah foto, akta kelahiran, KK, dan dokumen lainnya."),
    (4, "Verifikasi", "Tim kami akan memverifikasi dokumen dan data pendaftaran Anda."),
    (5, "Diterima", "Selamat! Selesaikan administrasi dan siapkan hari pertama."),
];

/// PPDB 信息页；加载失败时 `info` 保持为空，各卡片显示 `-`
#[derive(Debug, Clone, Default)]
pub struct AdmissionsPage {
    pub info: Option<PpdbInfo>,
}

impl AdmissionsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&self) -> String {
        match self.info.as_ref().filter(|i| !i.year.is_empty()) {
            Some(info) => format!("PPDB {}", info.year),
            None => "PPDB Tahun Ajaran Baru".to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.info.as_ref().is_some_and(|i| i.is_open)
    }

    pub fn intro(&self) -> &'static str {
        if self.is_open() {
            "Pendaftaran sedang dibuka! Segera daftarkan putra-putri Anda."
        } else {
            "Informasi lengkap tentang pendaftaran santri baru."
        }
    }

    /// (标签, 值) 卡片
    pub fn cards(&self) -> Vec<(&'static str, String)> {
        let dash = || "-".to_string();
        vec![
            (
                "Status",
                if self.is_open() { "Dibuka" } else { "Ditutup" }.to_string(),
            ),
            (
                "Kuota",
                self.info
                    .as_ref()
                    .map(|i| format!("{}/{}", i.registered, i.quota))
                    .unwrap_or_else(dash),
            ),
            (
                "Periode",
                self.info
                    .as_ref()
                    .map(|i| format!("{} - {}", i.start_date, i.end_date))
                    .unwrap_or_else(dash),
            ),
            (
                "Biaya",
                self.info
                    .as_ref()
                    .map(|i| i.fee.clone())
                    .filter(|f| !f.is_empty())
                    .unwrap_or_else(dash),
            ),
        ]
    }

    /// 剩余名额
    pub fn remaining(&self) -> Option<u32> {
        self.info
            .as_ref()
            .map(|i| i.quota.saturating_sub(i.registered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cards_without_info_show_placeholders() {
        let page = AdmissionsPage::new();
        assert_eq!(page.heading(), "PPDB Tahun Ajaran Baru");
        assert_eq!(
            page.cards(),
            vec![
                ("Status", "Ditutup".to_string()),
                ("Kuota", "-".to_string()),
                ("Periode", "-".to_string()),
                ("Biaya", "-".to_string()),
            ]
        );
        assert_eq!(page.remaining(), None);
    }

    #[test]
    fn cards_with_info() {
        let page = AdmissionsPage {
            info: Some(PpdbInfo {
                is_open: true,
                year: "2025/2026".to_string(),
                quota: 60,
                registered: 64,
                fee: "Rp 250.000".to_string(),
                start_date: "1 Januari 2025".to_string(),
                end_date: "30 Juni 2025".to_string(),
            }),
        };
        assert_eq!(page.heading(), "PPDB 2025/2026");
        assert!(page.intro().starts_with("Pendaftaran sedang dibuka"));
        assert_eq!(page.cards()[1].1, "64/60");
        assert_eq!(page.cards()[2].1, "1 Januari 2025 - 30 Juni 2025");
        assert_eq!(page.remaining(), Some(0));
    }
}
