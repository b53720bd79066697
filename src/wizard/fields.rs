//! 报名表字段目录
//!
//! 每个字段声明名称、标签、输入类型以及所在步骤；草稿本身只是
//! 字段名到字符串值的扁平映射，这里只描述如何采集和展示。

use crate::wizard::step::Step;

/// 字段输入类型
///
/// - `Text` / `Date` 单行编辑；日期按 `YYYY-MM-DD` 输入，不做客户端校验
/// - `TextArea` 多行文本，编辑时 Enter 之外的按键都写入缓冲
/// - `Choice` 固定取值 + 展示标签（例如性别 L/P）
/// - `Select` 取值即标签，←/→ 循环
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    TextArea,
    Choice(&'static [(&'static str, &'static str)]),
    Select(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub step: Step,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind, step: Step) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            step,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_textual(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::Date | FieldKind::TextArea)
    }

    /// 所有可选取值（Choice/Select 以外为空）
    pub fn option_values(&self) -> Vec<&'static str> {
        match self.kind {
            FieldKind::Choice(opts) => opts.iter().map(|(v, _)| *v).collect(),
            FieldKind::Select(opts) => opts.to_vec(),
            _ => Vec::new(),
        }
    }

    /// 把存储值转换为展示文本
    pub fn display_value<'a>(&self, value: &'a str) -> &'a str {
        if let FieldKind::Choice(opts) = self.kind {
            if let Some((_, label)) = opts.iter().find(|(v, _)| *v == value) {
                return label;
            }
        }
        value
    }

    /// 在选项间循环；当前值不在选项中时从第一个（或最后一个）开始
    pub fn cycle_option(&self, current: Option<&str>, forward: bool) -> Option<&'static str> {
        let values = self.option_values();
        if values.is_empty() {
            return None;
        }
        let pos = current.and_then(|c| values.iter().position(|v| *v == c));
        let idx = match (pos, forward) {
            (None, true) => 0,
            (None, false) => values.len() - 1,
            (Some(i), true) => (i + 1) % values.len(),
            (Some(i), false) => (i + values.len() - 1) % values.len(),
        };
        Some(values[idx])
    }
}

pub const GENDER_OPTIONS: &[(&str, &str)] = &[("L", "Laki-laki"), ("P", "Perempuan")];

pub const RELIGION_OPTIONS: &[&str] = &["Islam", "Kristen", "Katolik", "Hindu", "Buddha", "Konghucu"];

pub const EDUCATION_OPTIONS: &[&str] = &[
    "SD/MI",
    "SMP/MTs",
    "SMA/MA/SMK",
    "D1",
    "D2",
    "D3",
    "S1",
    "S2",
    "S3",
];

pub const INCOME_OPTIONS: &[&str] = &[
    "< Rp 1.000.000",
    "Rp 1.000.000 - 3.000.000",
    "Rp 3.000.000 - 5.000.000",
    "Rp 5.000.000 - 10.000.000",
    "> Rp 10.000.000",
];

pub const RESIDENCE_OPTIONS: &[&str] = &["Orang tua", "Kerabat", "Kos", "Lainnya"];

pub const TRANSPORT_OPTIONS: &[&str] = &[
    "Jalan kaki",
    "Motor",
    "Jemputan Sekolah",
    "Kendaraan Umum",
    "Lainnya",
];

use FieldKind::*;
use Step::*;

pub const FIELDS: &[FieldSpec] = &[
    // Data Siswa
    FieldSpec::new("student_name", "Nama Lengkap Siswa", Text, StudentData).required(),
    FieldSpec::new("gender", "Jenis Kelamin", Choice(GENDER_OPTIONS), StudentData).required(),
    FieldSpec::new("birth_place", "Tempat Lahir", Text, StudentData),
    FieldSpec::new("birth_date", "Tanggal Lahir", Date, StudentData),
    FieldSpec::new("religion", "Agama", Select(RELIGION_OPTIONS), StudentData),
    FieldSpec::new("nik", "NIK (16 digit)", Text, StudentData),
    FieldSpec::new("no_kk", "No. KK", Text, StudentData),
    FieldSpec::new("student_phone", "No. HP Siswa", Text, StudentData),
    // Alamat & Sekolah
    FieldSpec::new("address", "Alamat Lengkap", TextArea, AddressSchool),
    FieldSpec::new("village", "Desa/Kelurahan", Text, AddressSchool),
    FieldSpec::new("district", "Kecamatan", Text, AddressSchool),
    FieldSpec::new("previous_school", "Asal Sekolah (TK/RA)", Text, AddressSchool),
    FieldSpec::new("residence_type", "Tempat Tinggal", Select(RESIDENCE_OPTIONS), AddressSchool),
    FieldSpec::new(
        "transportation",
        "Transportasi ke Sekolah",
        Select(TRANSPORT_OPTIONS),
        AddressSchool,
    ),
    FieldSpec::new("distance_to_school", "Jarak ke Sekolah", Text, AddressSchool),
    // Data Ayah
    FieldSpec::new("father_name", "Nama Ayah", Text, FatherData),
    FieldSpec::new("father_birth_place", "Tempat Lahir", Text, FatherData),
    FieldSpec::new("father_birth_date", "Tanggal Lahir", Date, FatherData),
    FieldSpec::new("father_nik", "NIK Ayah", Text, FatherData),
    FieldSpec::new("father_education", "Pendidikan", Select(EDUCATION_OPTIONS), FatherData),
    FieldSpec::new("father_occupation", "Pekerjaan", Text, FatherData),
    FieldSpec::new("parent_phone", "No. HP Orang Tua", Text, FatherData),
    FieldSpec::new(
        "parent_income",
        "Penghasilan Orang Tua",
        Select(INCOME_OPTIONS),
        FatherData,
    ),
    // Data Ibu
    FieldSpec::new("mother_name", "Nama Ibu", Text, MotherData),
    FieldSpec::new("mother_birth_place", "Tempat Lahir", Text, MotherData),
    FieldSpec::new("mother_birth_date", "Tanggal Lahir", Date, MotherData),
    FieldSpec::new("mother_nik", "NIK Ibu", Text, MotherData),
    FieldSpec::new("mother_education", "Pendidikan", Select(EDUCATION_OPTIONS), MotherData),
    FieldSpec::new("mother_occupation", "Pekerjaan", Text, MotherData),
    FieldSpec::new("notes", "Catatan Tambahan", TextArea, MotherData),
];

/// 某一步骤的字段（确认页为空）
pub fn fields_for(step: Step) -> Vec<&'static FieldSpec> {
    FIELDS.iter().filter(|f| f.step == step).collect()
}

pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}
