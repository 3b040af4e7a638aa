//! 实体标识（Identifier）与标识提取
//!
//! 标识是属性集的纯函数：每次构造新实例时重新计算，结果确定。
//! 默认从 `id` 字段读取；字段缺失按构造期配置错误处理，绝不让
//! “未定义的标识”静默流入实例。
//!
use crate::error::{DomainError, DomainResult};
use crate::properties::Properties;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// 默认标识字段名
pub const DEFAULT_IDENTIFIER_FIELD: &str = "id";

/// 从属性集计算标识的函数
pub type IdentifierExtractor = Arc<dyn Fn(&Properties) -> DomainResult<Identifier> + Send + Sync>;

/// 实体/聚合根标识，按值比较
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier(Value);

impl Identifier {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// 字符串标识的便捷读取
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            // 字符串标识不带引号展示
            Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

/// 构造“读取指定字段”的标识提取器
///
/// 字段缺失时返回 `DomainError::MissingIdentifier`。
pub fn field_extractor(field: impl Into<String>) -> IdentifierExtractor {
    let field = field.into();
    Arc::new(move |properties: &Properties| {
        properties
            .get(&field)
            .cloned()
            .map(Identifier::new)
            .ok_or_else(|| DomainError::MissingIdentifier { field: field.clone() })
    })
}

/// 解析标识：有自定义提取器则委托之，否则读取默认 `id` 字段
pub(crate) fn resolve(
    extractor: Option<&IdentifierExtractor>,
    properties: &Properties,
) -> DomainResult<Identifier> {
    match extractor {
        Some(extract) => extract(properties),
        None => properties
            .get(DEFAULT_IDENTIFIER_FIELD)
            .cloned()
            .map(Identifier::new)
            .ok_or(DomainError::MissingIdentifier {
                field: DEFAULT_IDENTIFIER_FIELD.to_string(),
            }),
    }
}
