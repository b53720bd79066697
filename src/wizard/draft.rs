use std::collections::BTreeMap;

/// 报名草稿：字段名 -> 字符串值
///
/// 用户没有填过的字段不出现在映射里，提交时也不会补默认值或 null。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationDraft {
    values: BTreeMap<String, String>,
}

impl RegistrationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    /// 去掉首尾空白后非空的值
    pub fn filled(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn to_fields(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RegistrationDraft {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_fields_are_absent() {
        let mut d = RegistrationDraft::new();
        d.set("student_name", "Aisyah");
        assert_eq!(d.to_fields().len(), 1);
        assert_eq!(d.get("nik"), None);
        assert!(!d.to_fields().contains_key("nik"));
    }

    #[test]
    fn filled_ignores_whitespace() {
        let d: RegistrationDraft = [("student_name", "   "), ("gender", "L")].into_iter().collect();
        assert_eq!(d.filled("student_name"), None);
        assert_eq!(d.get("student_name"), Some("   "));
        assert_eq!(d.filled("gender"), Some("L"));
    }
}
