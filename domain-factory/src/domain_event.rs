//! 领域事件工厂（Domain Event）
//!
//! 一经写入不再变化的事实记录：事件名在工厂创建时固定，发生时间
//! 在构造瞬间由库捕获（调用方不可伪造），载荷经 Schema 校验。
//! `create` 是唯一的实例入口，没有 `patch`，也不定义相等比较——
//! 需要比较时由调用方按事件名、载荷与时间自行判断。
//!
use crate::error::{DomainError, DomainResult};
use crate::properties::Properties;
use crate::schema::Schema;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// 领域事件类：固定事件名 + 载荷 Schema
#[derive(Debug, Clone)]
pub struct DomainEventClass {
    event_name: String,
    payload_schema: Schema,
}

impl DomainEventClass {
    pub fn new(event_name: impl Into<String>, payload_schema: Schema) -> Self {
        Self {
            event_name: event_name.into(),
            payload_schema,
        }
    }

    /// 该类产出的事件统一使用的事件名
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// 校验载荷并构造事件，发生时间取构造当下
    pub fn create(&self, payload: Value) -> DomainResult<DomainEvent> {
        let validated = self
            .payload_schema
            .validate(payload)
            .map_err(DomainError::SchemaValidation)?;
        Ok(DomainEvent {
            event_name: self.event_name.clone(),
            occurred_on: Utc::now(),
            payload: Properties::new(validated),
        })
    }
}

/// 领域事件实例：字段只读，经 getter 访问
#[derive(Debug, Clone, Serialize)]
pub struct DomainEvent {
    event_name: String,
    occurred_on: DateTime<Utc>,
    payload: Properties,
}

impl DomainEvent {
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn occurred_on(&self) -> &DateTime<Utc> {
        &self.occurred_on
    }

    pub fn payload(&self) -> &Properties {
        &self.payload
    }
}
