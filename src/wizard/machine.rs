use crate::api::{ApiError, FieldErrors, RegistrationPayload, RegistrationReceipt};
use crate::wizard::draft::RegistrationDraft;
use crate::wizard::step::Step;
use crate::wizard::validate::validate_step;
use log::{info, warn};

pub const MSG_SUBMIT_FAILED: &str = "Gagal mengirim pendaftaran. Silakan coba lagi.";

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    Next,
    Previous,
    Submit,
    Retry,
    /// 提交结果（由后台任务回传）
    Submitted(Result<RegistrationReceipt, ApiError>),
}

/// reducer 要求调用方执行的副作用
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    Submit(RegistrationPayload),
}

/// 提交后的终态
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { registration_number: Option<String> },
    Failure { message: String },
}

impl Outcome {
    /// 由提交结果得出终态；失败信息优先用服务端的 message
    pub fn from_result(result: &Result<RegistrationReceipt, ApiError>) -> Self {
        match result {
            Ok(receipt) => Outcome::Success {
                registration_number: receipt.registration_number.clone(),
            },
            Err(e) => Outcome::Failure {
                message: e.server_message().unwrap_or(MSG_SUBMIT_FAILED).to_string(),
            },
        }
    }

    /// 日志栏中的一行
    pub fn log_line(&self) -> String {
        match self {
            Outcome::Success {
                registration_number,
            } => format!(
                "✓ Pendaftaran berhasil: {}",
                registration_number.as_deref().unwrap_or("-")
            ),
            Outcome::Failure { message } => format!("✗ {}", message),
        }
    }
}

/// 报名向导状态机
///
/// 五个线性步骤 + 提交终态。`submitting` 只是一个瞬时标志，不是可导航的步骤。
#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    draft: RegistrationDraft,
    errors: FieldErrors,
    submitting: bool,
    outcome: Option<Outcome>,
    entity_id: u64,
    unit_id: u64,
}

impl Wizard {
    /// 挂载时创建空草稿
    pub fn new(entity_id: u64, unit_id: u64) -> Self {
        Self {
            step: Step::StudentData,
            draft: RegistrationDraft::new(),
            errors: FieldErrors::new(),
            submitting: false,
            outcome: None,
            entity_id,
            unit_id,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// 是否还能编辑草稿
    pub fn is_editable(&self) -> bool {
        !self.submitting && self.outcome.is_none() && self.step != Step::Confirmation
    }

    /// 修改单个字段；提交中、已有结果或在确认页时拒绝
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.draft.set(name, value);
        true
    }

    /// 草稿 + 固定路由标识
    pub fn payload(&self) -> RegistrationPayload {
        RegistrationPayload::new(self.draft.to_fields(), self.entity_id, self.unit_id)
    }

    /// 唯一的状态转移入口
    pub fn dispatch(&mut self, action: WizardAction) -> Option<WizardEffect> {
        if self.submitting {
            // 提交进行中只接受结果
            return match action {
                WizardAction::Submitted(result) => {
                    self.finish(result);
                    None
                }
                _ => None,
            };
        }

        match action {
            WizardAction::Next => {
                if self.outcome.is_some() {
                    return None;
                }
                let Some(next) = self.step.next() else {
                    return None;
                };
                let errors = validate_step(self.step, &self.draft);
                if !errors.is_empty() {
                    self.errors = errors;
                    return None;
                }
                self.errors.clear();
                self.step = next;
                None
            }
            WizardAction::Previous => {
                if self.outcome.is_none() {
                    if let Some(prev) = self.step.previous() {
                        self.step = prev;
                    }
                }
                None
            }
            WizardAction::Submit => {
                if self.outcome.is_some() || self.step != Step::Confirmation {
                    return None;
                }
                self.submitting = true;
                self.errors.clear();
                Some(WizardEffect::Submit(self.payload()))
            }
            WizardAction::Retry => {
                if matches!(self.outcome, Some(Outcome::Failure { .. })) {
                    self.outcome = None;
                    self.step = Step::Confirmation;
                }
                None
            }
            // 没有在途提交时的结果直接丢弃
            WizardAction::Submitted(_) => None,
        }
    }

    fn finish(&mut self, result: Result<RegistrationReceipt, ApiError>) {
        self.submitting = false;
        match &result {
            Ok(receipt) => info!(
                "registration submitted: {}",
                receipt.registration_number.as_deref().unwrap_or("-")
            ),
            Err(e) => {
                warn!("registration failed: {}", e);
                if let Some(errors) = e.field_errors() {
                    self.errors = errors.clone();
                }
            }
        }
        self.outcome = Some(Outcome::from_result(&result));
    }
}
