use crate::api::dto::{
    Achievement, Attachment, Facility, Hero, Post, PostPage, PpdbInfo, RegistrationPayload,
    RegistrationReceipt, SettingGroups, Teacher, UploadAck,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

/// 字段 -> 错误信息列表
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// 非 2xx 响应里可能携带的结构化错误体
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http status {status}")]
    Status {
        status: u16,
        body: Option<ErrorBody>,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// 后端返回的可读消息（空字符串视为没有）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                body: Some(ErrorBody {
                    message: Some(m), ..
                }),
                ..
            } if !m.trim().is_empty() => Some(m.as_str()),
            _ => None,
        }
    }

    /// 字段级校验错误
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Status {
                body: Some(ErrorBody {
                    errors: Some(errors),
                    ..
                }),
                ..
            } => Some(errors),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// 学校网站内容 / 招生接口
///
/// 每个方法都是一次无副作用的请求-响应映射：不重试、不缓存，
/// 失败原样返回给调用方。
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn get_settings(&self) -> Result<SettingGroups, ApiError>;

    async fn get_heroes(&self) -> Result<Vec<Hero>, ApiError>;

    async fn get_facilities(&self) -> Result<Vec<Facility>, ApiError>;

    /// `level` 为空时不带过滤参数；未知级别原样透传给后端
    async fn get_achievements(&self, level: Option<&str>) -> Result<Vec<Achievement>, ApiError>;

    /// 页码越界由调用方负责，这里不做钳制
    async fn get_posts(&self, page: u32, per_page: u32) -> Result<PostPage, ApiError>;

    /// 没有匹配的文章时返回 `ApiError::NotFound`
    async fn get_post_by_slug(&self, slug: &str) -> Result<Post, ApiError>;

    async fn get_teachers(&self) -> Result<Vec<Teacher>, ApiError>;

    async fn get_ppdb_info(&self) -> Result<PpdbInfo, ApiError>;

    async fn submit_ppdb_registration(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<RegistrationReceipt, ApiError>;

    async fn upload_attachment(&self, attachment: Attachment) -> Result<UploadAck, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_server_message_is_ignored() {
        let err = ApiError::Status {
            status: 500,
            body: Some(ErrorBody {
                message: Some("  ".to_string()),
                errors: None,
            }),
        };
        assert_eq!(err.server_message(), None);
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn validation_body_is_exposed() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message": "Validasi gagal", "errors": {"nik": ["NIK tidak valid"]}}"#,
        )
        .unwrap();
        let err = ApiError::Status {
            status: 422,
            body: Some(body),
        };
        assert_eq!(err.server_message(), Some("Validasi gagal"));
        assert_eq!(
            err.field_errors().and_then(|e| e.get("nik")).cloned(),
            Some(vec!["NIK tidak valid".to_string()])
        );
    }
}
