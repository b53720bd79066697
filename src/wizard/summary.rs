//! 确认页摘要：从草稿投影出只读的分组展示
use crate::wizard::draft::RegistrationDraft;
use crate::wizard::fields::field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

/// 四个分组；没有值的行不展示，整组为空时仍保留标题
pub fn confirmation_summary(draft: &RegistrationDraft) -> Vec<SummarySection> {
    let value = |name: &str| -> Option<String> {
        let raw = draft.filled(name)?;
        Some(match field(name) {
            Some(spec) => spec.display_value(raw).to_string(),
            None => raw.to_string(),
        })
    };

    let birth = [value("birth_place"), value("birth_date")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");

    let section = |title, rows: Vec<(&'static str, Option<String>)>| SummarySection {
        title,
        rows: rows
            .into_iter()
            .filter_map(|(label, v)| v.map(|v| (label, v)))
            .collect(),
    };

    vec![
        section(
            "Data Siswa",
            vec![
                ("Nama Lengkap", value("student_name")),
                ("Jenis Kelamin", value("gender")),
                ("Tempat, Tgl Lahir", Some(birth).filter(|b| !b.is_empty())),
                ("NIK", value("nik")),
                ("Agama", value("religion")),
            ],
        ),
        section(
            "Alamat",
            vec![
                ("Alamat", value("address")),
                ("Desa/Kelurahan", value("village")),
                ("Kecamatan", value("district")),
                ("Asal Sekolah", value("previous_school")),
            ],
        ),
        section(
            "Data Ayah",
            vec![
                ("Nama", value("father_name")),
                ("Pekerjaan", value("father_occupation")),
                ("No. HP", value("parent_phone")),
                ("Penghasilan", value("parent_income")),
            ],
        ),
        section(
            "Data Ibu",
            vec![
                ("Nama", value("mother_name")),
                ("Pekerjaan", value("mother_occupation")),
            ],
        ),
    ]
}
