use crate::api::Post;

/// 文章详情页的加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleState {
    Loading,
    Ready(Box<Post>),
    /// 没有匹配 slug 的文章
    NotFound,
    /// 其它加载失败
    Unavailable,
}

/// 文章详情页；`from_page` 是返回时要回到的列表页码
#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub slug: String,
    pub state: ArticleState,
    pub from_page: u32,
}

impl ArticlePage {
    pub fn new(slug: impl Into<String>, from_page: u32) -> Self {
        Self {
            slug: slug.into(),
            state: ArticleState::Loading,
            from_page: from_page.max(1),
        }
    }

    /// 只接受与当前 slug 对应的结果
    pub fn apply(&mut self, slug: &str, state: ArticleState) -> bool {
        if slug != self.slug {
            return false;
        }
        self.state = state;
        true
    }
}
