use crate::api::dto::{
    Achievement, Attachment, Facility, Hero, ListEnvelope, Post, PostPage, PpdbInfo,
    RegistrationPayload, RegistrationReceipt, SettingGroups, SubmitEnvelope, Teacher, UploadAck,
};
use crate::api::types::{ApiError, ContentApi, ErrorBody};
use crate::api::urls::*;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

/// 学校网站 API 客户端
///
/// 所有请求共用一个 reqwest Client：固定的基础 URL 和
/// `Accept: application/json` 头。没有重试、超时策略或缓存。
pub struct PortalClient {
    client: Client,
    base_url: String,
}

impl PortalClient {
    /// 创建客户端
    ///
    /// # 参数
    ///
    /// * `base_url` - API 基础地址，例如 `http://localhost:8000/api`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .user_agent("ppdb-portal/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        join(&self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        op: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let resp = self.client.get(&url).query(query).send().await?;
        info!("{} {}(...) [{}]", self, op, url);
        decode(resp).await
    }

    async fn get_list<T: DeserializeOwned>(&self, op: &str, path: &str) -> Result<Vec<T>, ApiError> {
        let list: ListEnvelope<T> = self.get_json(op, path, &[]).await?;
        Ok(list.into_vec())
    }
}

/// 统一处理响应：非 2xx 时尽量解析结构化错误体
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let raw = resp.text().await?;

    if !status.is_success() {
        let body = serde_json::from_str::<ErrorBody>(&raw).ok();
        warn!("request failed: {} {}", status.as_u16(), raw);
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&raw)
        .map_err(|e| ApiError::InvalidResponse(format!("json parse failed: {e}, raw={raw}")))
}

#[async_trait]
impl ContentApi for PortalClient {
    async fn get_settings(&self) -> Result<SettingGroups, ApiError> {
        self.get_json("get_settings", PATH_SETTINGS, &[]).await
    }

    async fn get_heroes(&self) -> Result<Vec<Hero>, ApiError> {
        self.get_list("get_heroes", PATH_HEROES).await
    }

    async fn get_facilities(&self) -> Result<Vec<Facility>, ApiError> {
        self.get_list("get_facilities", PATH_FACILITIES).await
    }

    async fn get_achievements(&self, level: Option<&str>) -> Result<Vec<Achievement>, ApiError> {
        let mut query = Vec::new();
        if let Some(l) = level.filter(|l| !l.is_empty()) {
            query.push(("level", l.to_string()));
        }
        let list: ListEnvelope<Achievement> = self
            .get_json("get_achievements", PATH_ACHIEVEMENTS, &query)
            .await?;
        Ok(list.into_vec())
    }

    async fn get_posts(&self, page: u32, per_page: u32) -> Result<PostPage, ApiError> {
        let query = [("page", page.to_string()), ("per_page", per_page.to_string())];
        self.get_json("get_posts", PATH_POSTS, &query).await
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Post, ApiError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(ApiError::NotFound(String::new()));
        }
        match self
            .get_json("get_post_by_slug", &path_posts_slug(slug), &[])
            .await
        {
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(ApiError::NotFound(slug.to_string()))
            }
            other => other,
        }
    }

    async fn get_teachers(&self) -> Result<Vec<Teacher>, ApiError> {
        self.get_list("get_teachers", PATH_TEACHERS).await
    }

    async fn get_ppdb_info(&self) -> Result<PpdbInfo, ApiError> {
        self.get_json("get_ppdb_info", PATH_PPDB_INFO, &[]).await
    }

    async fn submit_ppdb_registration(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<RegistrationReceipt, ApiError> {
        let url = self.url(PATH_PPDB_REGISTER);
        let resp = self.client.post(&url).json(payload).send().await?;
        info!("{} submit_ppdb_registration(...) [{}]", self, url);
        let envelope: SubmitEnvelope = decode(resp).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn upload_attachment(&self, attachment: Attachment) -> Result<UploadAck, ApiError> {
        let url = self.url(PATH_PPDB_UPLOAD);
        let part = reqwest::multipart::Part::bytes(attachment.bytes)
            .file_name(attachment.file_name.clone());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("type", attachment.kind.clone());
        let resp = self.client.post(&url).multipart(form).send().await?;
        info!(
            "{} upload_attachment(...) [{}] {} ({})",
            self, url, attachment.file_name, attachment.kind
        );
        decode(resp).await
    }
}

impl std::fmt::Display for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<PortalClient [{}]>", self.base_url)
    }
}

impl std::fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<PortalClient [{}]>", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_base_url() {
        let client = PortalClient::new("http://localhost:8000/api").unwrap();
        assert_eq!(client.to_string(), "<PortalClient [http://localhost:8000/api]>");
        assert_eq!(client.url(PATH_PPDB_INFO), "http://localhost:8000/api/web/ppdb/info");
    }

    #[tokio::test]
    async fn empty_slug_is_not_found_without_request() {
        // 端口 9 上没有服务；如果真的发出请求会得到 Transport 错误
        let client = PortalClient::new("http://127.0.0.1:9/api").unwrap();
        let err = client.get_post_by_slug("  ").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let client = PortalClient::new("http://127.0.0.1:9/api").unwrap();
        let err = client.get_heroes().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
