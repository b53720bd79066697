use crate::api::SettingGroups;
use serde_json::Value;
use std::collections::BTreeMap;

/// 展开后的设置：键 -> 值
pub type Settings = BTreeMap<String, String>;

pub const KEY_SITE_TAGLINE: &str = "site_tagline";
pub const KEY_SCHOOL_VISION: &str = "school_vision";
pub const KEY_SCHOOL_MISSION: &str = "school_mission";
pub const KEY_LOGO_URL: &str = "logo_url";

/// 把分组设置展开成单层映射
///
/// 按源映射的迭代顺序（分类名升序）依次合并，同名键后出现的分组覆盖前面的。
/// 非对象分组被跳过；字符串原样保留，数字和布尔值转成字符串，null 与嵌套对象跳过。
pub fn flatten_settings(groups: &SettingGroups) -> Settings {
    let mut flat = Settings::new();
    for group in groups.values() {
        let Value::Object(entries) = group else {
            continue;
        };
        for (key, value) in entries {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            flat.insert(key.clone(), value);
        }
    }
    flat
}

/// 读取非空设置值，否则返回兜底文本
pub fn setting_or<'a>(settings: &'a Settings, key: &str, fallback: &'a str) -> &'a str {
    settings
        .get(key)
        .map(|s| s.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback)
}
