/// 默认 API 基础 URL（未配置 PORTAL_API_URL 时使用）
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// 网站设置
pub const PATH_SETTINGS: &str = "/web/settings";

/// 首页横幅
pub const PATH_HEROES: &str = "/web/heroes";

/// 设施、成就、教师
pub const PATH_FACILITIES: &str = "/web/facilities";
pub const PATH_ACHIEVEMENTS: &str = "/web/achievements";
pub const PATH_TEACHERS: &str = "/web/teachers";

/// 文章相关路径
pub const PATH_POSTS: &str = "/web/posts";
pub fn path_posts_slug(slug: &str) -> String {
    format!("{}/{}", PATH_POSTS, slug)
}

/// PPDB 相关路径
pub const PATH_PPDB_INFO: &str = "/web/ppdb/info";
pub const PATH_PPDB_REGISTER: &str = "/ppdb/register";
pub const PATH_PPDB_UPLOAD: &str = "/web/ppdb/upload-attachment";

/// 拼接基础 URL 与路径，保证中间只有一个 `/`
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_normalizes_slashes() {
        assert_eq!(
            join("http://localhost:8000/api/", PATH_HEROES),
            "http://localhost:8000/api/web/heroes"
        );
        assert_eq!(
            join("http://localhost:8000/api", "web/heroes"),
            "http://localhost:8000/api/web/heroes"
        );
    }

    #[test]
    fn slug_path() {
        assert_eq!(path_posts_slug("hari-santri"), "/web/posts/hari-santri");
    }
}
