use crate::api::{Post, PostPage};

/// 文章列表页（分页）
///
/// 页码不做越界校验：翻页请求由调用方保证在 `[1, last_page]` 内，
/// 直接输入的页码原样发给后端。
#[derive(Debug, Clone)]
pub struct NewsPage {
    pub page: u32,
    pub per_page: u32,
    pub last_page: u32,
    pub total: u64,
    pub posts: Vec<Post>,
    pub loading: bool,
    pub selected: usize,
}

impl NewsPage {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            last_page: 1,
            total: 0,
            posts: Vec::new(),
            loading: true,
            selected: 0,
        }
    }

    pub fn apply(&mut self, result: PostPage) {
        self.posts = result.data;
        self.last_page = result.last_page.max(1);
        self.total = result.total;
        self.loading = false;
        self.selected = 0;
    }

    /// 加载失败时退化为空列表
    pub fn apply_empty(&mut self) {
        self.posts.clear();
        self.loading = false;
        self.selected = 0;
    }

    /// 跳到指定页，返回需要请求的页码
    pub fn go_to(&mut self, page: u32) -> u32 {
        self.page = page;
        self.loading = true;
        self.page
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.last_page).then(|| self.page + 1)
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn show_pagination(&self) -> bool {
        self.last_page > 1
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected)
    }

    pub fn empty_message(&self) -> &'static str {
        "Belum ada artikel."
    }
}
