//! 值对象工厂（Value Object）
//!
//! 无标识、以结构相等为准的不可变对象。创建时经 Schema 校验，
//! 创建后没有任何更新通道。
//!
use crate::error::{DomainError, DomainResult};
use crate::properties::Properties;
use crate::schema::Schema;
use serde::Serialize;
use serde_json::Value;

/// 值对象类：固化一份 Schema，`create` 是唯一的实例入口
#[derive(Debug, Clone)]
pub struct ValueObjectClass {
    schema: Schema,
}

impl ValueObjectClass {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// 校验原始数据并构造值对象；校验失败时不构造任何实例
    pub fn create(&self, data: Value) -> DomainResult<ValueObject> {
        let validated = self
            .schema
            .validate(data)
            .map_err(DomainError::SchemaValidation)?;
        Ok(ValueObject {
            properties: Properties::new(validated),
        })
    }
}

/// 值对象实例：按属性结构相等比较（与键顺序无关）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueObject {
    properties: Properties,
}

impl ValueObject {
    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldRule;
    use serde_json::json;

    fn money_class() -> ValueObjectClass {
        ValueObjectClass::new(
            Schema::object()
                .field("amount", FieldRule::number())
                .field("currency", FieldRule::one_of(["CNY", "USD", "EUR"]))
                .build(),
        )
    }

    #[test]
    fn test_create_validates_and_copies() {
        let money = money_class().create(json!({"amount": 12.5, "currency": "CNY"})).unwrap();
        assert_eq!(money.properties().get("amount"), Some(&json!(12.5)));
        assert_eq!(money.properties().get("currency"), Some(&json!("CNY")));
    }

    #[test]
    fn test_create_failure_returns_errors_without_instance() {
        let err = money_class().create(json!({"amount": "lots"})).unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, "amount");
        assert_eq!(errors[1].path, "currency");
    }

    #[test]
    fn test_structural_equality() {
        let class = money_class();
        let a = class.create(json!({"amount": 10, "currency": "USD"})).unwrap();
        let b = class.create(json!({"currency": "USD", "amount": 10})).unwrap();
        let c = class.create(json!({"amount": 11, "currency": "USD"})).unwrap();

        // 相同数据（键顺序不同）相等，任一字段不同即不等
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
