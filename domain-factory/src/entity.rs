//! 实体工厂（Entity）
//!
//! 具备标识的不可变对象：`create` 经全量 Schema 校验构造实例，
//! `patch` 走两阶段校验的写时复制更新（见 `update` 模块），
//! 相等性以标识为准而非全部属性。
//!
//! 工厂配置通过 builder 固化，可选项及其缺省值：
//! - `name`：调试/展示用类名，缺省 `Entity`；
//! - `update_schema`：缺省为全量 Schema（全部字段可更新）；传入
//!   `Schema::nothing()` 可使实例在创建后完全不可变；
//! - `validate_update`：业务规则校验器，缺省不校验;
//! - `identifier_extractor`：缺省读取 `id` 字段。
//!
use crate::error::DomainResult;
use crate::identity::{Identifier, IdentifierExtractor};
use crate::properties::Properties;
use crate::schema::Schema;
use crate::update::{self, UpdateValidator};
use bon::Builder;
use serde_json::Value;
use std::fmt;

/// 实体类：固化 Schema、更新策略与标识提取方式
#[derive(Clone, Builder)]
pub struct EntityClass {
    /// 展示名（`Display` 输出用），缺省 `Entity`
    #[builder(into)]
    name: Option<String>,
    /// 全量 Schema：`create` 与合并后回验均以此为准
    schema: Schema,
    /// 更新 Schema：限定 `patch` 载荷允许的字段与取值
    update_schema: Option<Schema>,
    /// 业务规则校验器
    validate_update: Option<UpdateValidator>,
    /// 标识提取器
    identifier_extractor: Option<IdentifierExtractor>,
}

impl EntityClass {
    /// 校验原始数据并构造实体实例
    pub fn create(&self, data: Value) -> DomainResult<Entity> {
        let (properties, identifier) =
            update::create_parts(&self.schema, self.identifier_extractor.as_ref(), data)?;
        Ok(Entity {
            class: self.clone(),
            properties,
            identifier,
        })
    }

    pub(crate) fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Entity")
    }
}

impl fmt::Debug for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityClass")
            .field("name", &self.display_name())
            .field("schema", &self.schema)
            .field("update_schema", &self.update_schema)
            .field("validate_update", &self.validate_update.is_some())
            .field("identifier_extractor", &self.identifier_extractor.is_some())
            .finish()
    }
}

/// 实体实例：属性 + 构造时计算并缓存的标识
#[derive(Clone)]
pub struct Entity {
    class: EntityClass,
    properties: Properties,
    identifier: Identifier,
}

impl Entity {
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// 写时复制更新：成功时返回新实例，接收者保持不变。
    ///
    /// 更新 Schema 含标识字段时，新实例的标识可能不同于原实例，
    /// 是否允许由调用方的更新 Schema 决定。
    pub fn patch(&self, updates: Value) -> DomainResult<Entity> {
        let (properties, identifier) = update::patch_parts(
            &self.class.schema,
            self.class.update_schema.as_ref(),
            self.class.validate_update.as_ref(),
            self.class.identifier_extractor.as_ref(),
            &self.properties,
            updates,
        )?;
        Ok(Entity {
            class: self.class.clone(),
            properties,
            identifier,
        })
    }
}

/// 实体相等性以标识为准，属性差异不参与比较
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.class.display_name(), self.identifier)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.class.display_name())
            .field("identifier", &self.identifier)
            .field("properties", &self.properties)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::schema::FieldRule;
    use serde_json::json;
    use std::sync::Arc;

    fn schema() -> Schema {
        Schema::object()
            .field("id", FieldRule::string())
            .field("status", FieldRule::one_of(["draft", "confirmed", "shipped"]))
            .build()
    }

    fn order_class() -> EntityClass {
        EntityClass::builder()
            .name("Order")
            .schema(schema())
            .update_schema(
                Schema::object()
                    .field("status", FieldRule::one_of(["confirmed", "shipped"]))
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_create_computes_identifier() {
        let order = order_class().create(json!({"id": "o1", "status": "draft"})).unwrap();
        assert_eq!(order.identifier().as_str(), Some("o1"));
        assert_eq!(order.properties().get("status"), Some(&json!("draft")));
    }

    #[test]
    fn test_create_rejects_invalid_data() {
        let err = order_class().create(json!({"id": "o1", "status": "done"})).unwrap_err();
        assert!(matches!(err, DomainError::SchemaValidation(_)));
    }

    #[test]
    fn test_create_without_id_field_fails() {
        let class = EntityClass::builder()
            .schema(Schema::object().field("status", FieldRule::string()).build())
            .build();
        let err = class.create(json!({"status": "draft"})).unwrap_err();
        assert!(matches!(err, DomainError::MissingIdentifier { .. }));
    }

    #[test]
    fn test_patch_returns_new_instance_and_keeps_receiver() {
        let order = order_class().create(json!({"id": "o1", "status": "draft"})).unwrap();
        let confirmed = order.patch(json!({"status": "confirmed"})).unwrap();

        assert_eq!(confirmed.properties().get("status"), Some(&json!("confirmed")));
        // 接收者不被修改
        assert_eq!(order.properties().get("status"), Some(&json!("draft")));
        // 标识不变，两者相等
        assert_eq!(order, confirmed);
    }

    #[test]
    fn test_patch_rejects_fields_outside_update_schema() {
        let order = order_class().create(json!({"id": "o1", "status": "draft"})).unwrap();
        let err = order.patch(json!({"id": "o2"})).unwrap_err();
        assert!(matches!(err, DomainError::SchemaValidation(_)));
    }

    #[test]
    fn test_business_rule_rejection_is_surfaced() {
        let class = EntityClass::builder()
            .name("Order")
            .schema(schema())
            .update_schema(
                Schema::object()
                    .field("status", FieldRule::one_of(["confirmed", "shipped"]))
                    .build(),
            )
            .validate_update(Arc::new(|current: &Properties, updates: &Properties| {
                if updates.get("status") == Some(&json!("shipped"))
                    && current.get("status") != Some(&json!("confirmed"))
                {
                    return Err(DomainError::business_rule(
                        "cannotShipUnconfirmedOrder",
                        "only confirmed orders can ship",
                    ));
                }
                Ok(())
            }))
            .build();

        let order = class.create(json!({"id": "o1", "status": "draft"})).unwrap();
        let err = order.patch(json!({"status": "shipped"})).unwrap_err();
        match err {
            DomainError::BusinessRule { code, .. } => assert_eq!(code, "cannotShipUnconfirmedOrder"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_equality_ignores_non_identifying_properties() {
        let class = order_class();
        let a = class.create(json!({"id": "o1", "status": "draft"})).unwrap();
        let b = class.create(json!({"id": "o1", "status": "confirmed"})).unwrap();
        let c = class.create(json!({"id": "o2", "status": "draft"})).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_combines_name_and_identifier() {
        let order = order_class().create(json!({"id": "o1", "status": "draft"})).unwrap();
        assert_eq!(order.to_string(), "Order(o1)");

        let anonymous = EntityClass::builder()
            .schema(schema())
            .build()
            .create(json!({"id": "o2", "status": "draft"}))
            .unwrap();
        assert_eq!(anonymous.to_string(), "Entity(o2)");
    }

    #[test]
    fn test_custom_identifier_extractor() {
        let class = EntityClass::builder()
            .schema(
                Schema::object()
                    .field("order_no", FieldRule::string())
                    .field("status", FieldRule::string())
                    .build(),
            )
            .identifier_extractor(crate::identity::field_extractor("order_no"))
            .build();
        let order = class.create(json!({"order_no": "A-17", "status": "draft"})).unwrap();
        assert_eq!(order.identifier().as_str(), Some("A-17"));
    }
}
