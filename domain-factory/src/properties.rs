//! 经校验的属性集（Properties）
//!
//! 实例持有的字段映射，只能由成功的 Schema 校验产出；每个实例独占
//! 一份，新实例总是获得新构建的映射，彼此之间不共享可变结构。
//! 相等性按结构比较，键的出现顺序不影响结果。
//!
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 校验通过的字段名到值的映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties(Map<String, Value>);

impl Properties {
    pub(crate) fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// 读取字段值
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 按字段遍历
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// 转回 JSON 对象（复制，不暴露内部映射）
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// 浅合并：`updates` 中的字段覆盖当前字段，产出新的 JSON 对象，
    /// 接收者保持不变
    pub(crate) fn merged_with(&self, updates: &Properties) -> Value {
        let mut merged = self.0.clone();
        for (field, value) in &updates.0 {
            merged.insert(field.clone(), value.clone());
        }
        Value::Object(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        match value {
            Value::Object(map) => Properties::new(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_accessors() {
        let p = props(json!({"id": "o1", "status": "draft"}));
        assert_eq!(p.get("id"), Some(&json!("o1")));
        assert!(p.contains("status"));
        assert!(!p.contains("missing"));
        assert_eq!(p.len(), 2);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_structural_equality_ignores_key_order() {
        let a: Value = serde_json::from_str(r#"{"id": "o1", "status": "draft"}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"status": "draft", "id": "o1"}"#).unwrap();
        assert_eq!(props(a), props(b));
    }

    #[test]
    fn test_merge_updates_win_and_receiver_is_untouched() {
        let current = props(json!({"id": "o1", "status": "draft"}));
        let updates = props(json!({"status": "confirmed"}));

        let merged = current.merged_with(&updates);
        assert_eq!(merged, json!({"id": "o1", "status": "confirmed"}));

        // 接收者保持原值
        assert_eq!(current.get("status"), Some(&json!("draft")));
    }

    #[test]
    fn test_merge_with_empty_updates_is_identity() {
        let current = props(json!({"id": "o1", "status": "draft"}));
        let merged = current.merged_with(&Properties::default());
        assert_eq!(merged, current.to_value());
    }

    #[test]
    fn test_iter_yields_every_field() {
        let p = props(json!({"id": "o1", "status": "draft"}));
        let fields: Vec<&str> = p.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(fields, ["id", "status"]);
        assert_eq!(p.iter().count(), p.len());
    }

    #[test]
    fn test_serde_round_trip() {
        let p = props(json!({"id": "o1", "total": 12.5}));
        let text = serde_json::to_string(&p).unwrap();
        let back: Properties = serde_json::from_str(&text).unwrap();
        assert_eq!(back, p);
    }
}
