use regex::Regex;
use std::sync::OnceLock;

fn scheme_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("static scheme pattern"))
}

/// 判断路径是否已经是带协议的绝对 URL
pub fn is_absolute(path: &str) -> bool {
    scheme_re().is_match(path)
}

/// 把接口返回的资源路径解析为完整 URL
///
/// * 空路径 -> 空字符串
/// * 绝对 URL -> 原样返回
/// * 其它 -> `<storage_base>/<path>`
pub fn storage_url(storage_base: &str, path: Option<&str>) -> String {
    let path = match path {
        Some(p) if !p.trim().is_empty() => p.trim(),
        _ => return String::new(),
    };
    if is_absolute(path) {
        return path.to_string();
    }
    format!(
        "{}/{}",
        storage_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// 由 API 地址推导存储地址
///
/// 只替换路径中第一个完整的 `api` 段，主机名里的 `api` 不受影响；
/// 没有这一段时在末尾追加 `/storage`。
pub fn derive_storage_base(api_url: &str) -> String {
    let trimmed = api_url.trim_end_matches('/');
    let path_start = match trimmed.find("://") {
        Some(i) => trimmed[i + 3..]
            .find('/')
            .map_or(trimmed.len(), |j| i + 3 + j),
        None => 0,
    };
    let (origin, path) = trimmed.split_at(path_start);
    let mut replaced = false;
    let segments: Vec<&str> = path
        .split('/')
        .map(|seg| {
            if !replaced && seg == "api" {
                replaced = true;
                "storage"
            } else {
                seg
            }
        })
        .collect();
    if replaced {
        format!("{}{}", origin, segments.join("/"))
    } else {
        format!("{}/storage", trimmed)
    }
}

/// 持有存储地址的资源解析器，供各视图使用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    base: String,
}

impl AssetResolver {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn resolve(&self, path: Option<&str>) -> String {
        storage_url(&self.base, path)
    }
}
