use crate::api::FieldErrors;
use crate::wizard::draft::RegistrationDraft;
use crate::wizard::step::Step;

pub const MSG_STUDENT_NAME_REQUIRED: &str = "Nama siswa wajib diisi";
pub const MSG_GENDER_REQUIRED: &str = "Jenis kelamin wajib dipilih";

/// 步骤校验器：返回空映射表示允许前进
pub type StepValidator = fn(&RegistrationDraft) -> FieldErrors;

/// 取得某一步骤的校验器；只有第一步有同步校验
pub fn validator_for(step: Step) -> StepValidator {
    match step {
        Step::StudentData => validate_student_data,
        Step::AddressSchool | Step::FatherData | Step::MotherData | Step::Confirmation => {
            accept_all
        }
    }
}

pub fn validate_step(step: Step, draft: &RegistrationDraft) -> FieldErrors {
    validator_for(step)(draft)
}

/// `student_name` 非空，且 `gender` 为 `L` 或 `P`
fn validate_student_data(draft: &RegistrationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.filled("student_name").is_none() {
        errors.insert(
            "student_name".to_string(),
            vec![MSG_STUDENT_NAME_REQUIRED.to_string()],
        );
    }
    if !matches!(draft.filled("gender"), Some("L") | Some("P")) {
        errors.insert("gender".to_string(), vec![MSG_GENDER_REQUIRED.to_string()]);
    }
    errors
}

fn accept_all(_: &RegistrationDraft) -> FieldErrors {
    FieldErrors::new()
}
