/// 报名向导的五个线性步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    StudentData,
    AddressSchool,
    FatherData,
    MotherData,
    Confirmation,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::StudentData,
        Step::AddressSchool,
        Step::FatherData,
        Step::MotherData,
        Step::Confirmation,
    ];

    /// 从 1 开始的序号
    pub fn number(&self) -> usize {
        match self {
            Step::StudentData => 1,
            Step::AddressSchool => 2,
            Step::FatherData => 3,
            Step::MotherData => 4,
            Step::Confirmation => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::StudentData => "Data Siswa",
            Step::AddressSchool => "Alamat & Sekolah",
            Step::FatherData => "Data Ayah",
            Step::MotherData => "Data Ibu",
            Step::Confirmation => "Konfirmasi",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Step::StudentData => "Identitas calon peserta didik",
            Step::AddressSchool => "Tempat tinggal & asal sekolah",
            Step::FatherData => "Identitas ayah kandung",
            Step::MotherData => "Identitas ibu kandung",
            Step::Confirmation => "Periksa dan kirim data",
        }
    }

    pub fn next(&self) -> Option<Step> {
        Step::ALL.get(self.number()).copied()
    }

    pub fn previous(&self) -> Option<Step> {
        self.number()
            .checked_sub(2)
            .and_then(|i| Step::ALL.get(i).copied())
    }

    pub fn is_first(&self) -> bool {
        self.previous().is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_linear() {
        assert_eq!(Step::StudentData.next(), Some(Step::AddressSchool));
        assert_eq!(Step::MotherData.next(), Some(Step::Confirmation));
        assert_eq!(Step::Confirmation.next(), None);
        assert_eq!(Step::StudentData.previous(), None);
        assert_eq!(Step::AddressSchool.previous(), Some(Step::StudentData));
        assert!(Step::StudentData.is_first());
        assert!(Step::Confirmation.is_last());
    }

    #[test]
    fn numbers_match_positions() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.number(), i + 1);
        }
    }
}
