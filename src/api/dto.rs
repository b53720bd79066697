use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 分组设置：分类 -> (键 -> 值)。值保持原始 JSON，由调用方展开。
pub type SettingGroups = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub cta_url: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub icon_svg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub competition_name: Option<String>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// 后端附加的访问器字段，部分接口只返回它
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
}

impl Post {
    /// 缩略图路径，优先使用 `thumbnail_url`
    pub fn thumbnail_path(&self) -> Option<&str> {
        self.thumbnail_url
            .as_deref()
            .or(self.thumbnail.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Admin")
    }
}

/// 分页文章信封
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostPage {
    #[serde(default)]
    pub data: Vec<Post>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: u32,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// PPDB 招生信息快照
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PpdbInfo {
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub quota: u32,
    #[serde(default)]
    pub registered: u32,
    #[serde(default)]
    pub fee: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// 列表接口既可能返回裸数组，也可能包一层 `{data: [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(v) => v,
            ListEnvelope::Wrapped { data } => data,
        }
    }
}

/// 提交给 `/ppdb/register` 的请求体：草稿字段 + 两个固定路由标识
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationPayload {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub entity_id: u64,
    pub unit_id: u64,
}

impl RegistrationPayload {
    pub fn new(mut fields: BTreeMap<String, String>, entity_id: u64, unit_id: u64) -> Self {
        // 路由标识始终以配置为准
        fields.remove("entity_id");
        fields.remove("unit_id");
        Self {
            fields,
            entity_id,
            unit_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    #[serde(default)]
    pub registration_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitEnvelope {
    #[serde(default)]
    pub data: Option<RegistrationReceipt>,
}

/// 待上传的附件
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub kind: String,
}

/// 上传回执，内容不透明
pub type UploadAck = Value;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn list_envelope_accepts_both_shapes() {
        let bare: ListEnvelope<Teacher> =
            serde_json::from_value(json!([{"id": 1, "name": "Ust. Ahmad"}])).unwrap();
        let wrapped: ListEnvelope<Teacher> =
            serde_json::from_value(json!({"data": [{"id": 1, "name": "Ust. Ahmad"}]})).unwrap();
        assert_eq!(bare.into_vec(), wrapped.into_vec());
    }

    #[test]
    fn post_tolerates_both_thumbnail_keys() {
        let post: Post = serde_json::from_value(json!({
            "id": 7,
            "title": "Hari Santri",
            "slug": "hari-santri",
            "thumbnail": "posts/a.jpg",
            "thumbnail_url": "posts/b.jpg",
            "author": null
        }))
        .unwrap();
        assert_eq!(post.thumbnail_path(), Some("posts/b.jpg"));
        assert_eq!(post.author_name(), "Admin");
    }

    #[test]
    fn payload_flattens_draft_and_pins_routing_ids() {
        let mut fields = BTreeMap::new();
        fields.insert("student_name".to_string(), "Aisyah".to_string());
        fields.insert("unit_id".to_string(), "99".to_string());
        let payload = RegistrationPayload::new(fields, 1, 1);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"student_name": "Aisyah", "entity_id": 1, "unit_id": 1})
        );
    }

    #[test]
    fn unknown_media_type_does_not_fail() {
        let hero: Hero = serde_json::from_value(json!({
            "id": 1, "title": "Selamat Datang", "media_type": "gif", "media_url": "h.gif"
        }))
        .unwrap();
        assert_eq!(hero.media_type, MediaType::Other);
    }
}
