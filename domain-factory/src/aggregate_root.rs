//! 聚合根工厂（Aggregate Root）
//!
//! 在实体契约（`create`/`patch`/标识相等/`Display`）之上，每个实例
//! 额外携带一份待发布领域事件序列：
//! - 创建时为空；
//! - `patch` 原样带入新实例（属性更新不丢事件）；
//! - `add_event` 追加一个事件并返回新实例；
//! - `clear_events` 返回事件序列为空的新实例。
//!
//! 事件类型 `E` 对工厂完全不透明，工厂不对事件本身做任何校验——
//! 校验（如需要）是事件自身创建路径的职责（见 `domain_event`）。
//!
use crate::error::DomainResult;
use crate::identity::{Identifier, IdentifierExtractor};
use crate::properties::Properties;
use crate::schema::Schema;
use crate::update::{self, UpdateValidator};
use bon::Builder;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// 聚合根类：配置面与实体类一致，`E` 为该聚合携带的事件类型
#[derive(Clone, Builder)]
pub struct AggregateRootClass<E> {
    /// 展示名（`Display` 输出用），缺省 `AggregateRoot`
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
    #[builder(skip)]
    _marker: PhantomData<E>,
}

impl<E: Clone> AggregateRootClass<E> {
    /// 校验原始数据并构造聚合根实例，事件序列初始为空
    pub fn create(&self, data: Value) -> DomainResult<AggregateRoot<E>> {
        let (properties, identifier) =
            update::create_parts(&self.schema, self.identifier_extractor.as_ref(), data)?;
        Ok(AggregateRoot {
            class: self.clone(),
            properties,
            identifier,
            domain_events: Vec::new(),
        })
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("AggregateRoot")
    }
}

impl<E> fmt::Debug for AggregateRootClass<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateRootClass")
            .field("name", &self.name.as_deref().unwrap_or("AggregateRoot"))
            .field("schema", &self.schema)
            .field("update_schema", &self.update_schema)
            .field("validate_update", &self.validate_update.is_some())
            .field("identifier_extractor", &self.identifier_extractor.is_some())
            .finish()
    }
}

/// 聚合根实例：属性 + 标识 + 有序的待发布事件
#[derive(Clone)]
pub struct AggregateRoot<E> {
    class: AggregateRootClass<E>,
    properties: Properties,
    identifier: Identifier,
    domain_events: Vec<E>,
}

impl<E: Clone> AggregateRoot<E> {
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// 按追加顺序返回待发布事件
    pub fn domain_events(&self) -> &[E] {
        &self.domain_events
    }

    /// 写时复制更新，当前事件序列原样带入新实例
    pub fn patch(&self, updates: Value) -> DomainResult<AggregateRoot<E>> {
        let (properties, identifier) = update::patch_parts(
            &self.class.schema,
            self.class.update_schema.as_ref(),
            self.class.validate_update.as_ref(),
            self.class.identifier_extractor.as_ref(),
            &self.properties,
            updates,
        )?;
        Ok(AggregateRoot {
            class: self.class.clone(),
            properties,
            identifier,
            domain_events: self.domain_events.clone(),
        })
    }

    /// 返回事件序列末尾追加了 `event` 的新实例，接收者不变
    pub fn add_event(&self, event: E) -> AggregateRoot<E> {
        let mut next = self.clone();
        next.domain_events.push(event);
        next
    }

    /// 返回事件序列为空的新实例，属性与标识保持不变
    pub fn clear_events(&self) -> AggregateRoot<E> {
        let mut next = self.clone();
        next.domain_events.clear();
        next
    }
}

/// 聚合根相等性以标识为准，属性与事件序列均不参与比较
impl<E> PartialEq for AggregateRoot<E> {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl<E: Clone> fmt::Display for AggregateRoot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.class.display_name(), self.identifier)
    }
}

impl<E> fmt::Debug for AggregateRoot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateRoot")
            .field("name", &self.class.name.as_deref().unwrap_or("AggregateRoot"))
            .field("identifier", &self.identifier)
            .field("properties", &self.properties)
            .field("domain_events", &self.domain_events.len())
            .finish()
    }
}
