//! 共享的构造与更新管线
//!
//! 实体工厂与聚合根工厂共用同一套两阶段流程：
//! - `create_parts`：全量 Schema 校验 → 标识提取；
//! - `patch_parts`：更新 Schema 校验 → 业务规则校验 → 浅合并 →
//!   全量回验 → 标识重算。
//!
//! 任一阶段失败即短路返回，合并永远不会发生，当前实例保持不变。
//!
use crate::error::{DomainError, DomainResult};
use crate::identity::{self, Identifier, IdentifierExtractor};
use crate::properties::Properties;
use crate::schema::Schema;
use serde_json::Value;
use std::sync::Arc;

/// 业务规则校验器
///
/// 在更新载荷通过 Schema 校验之后、合并之前调用，入参为
/// （当前属性集，已校验的更新载荷）。用于表达 Schema 无法描述的
/// 约束，例如状态迁移的合法性。
pub type UpdateValidator =
    Arc<dyn Fn(&Properties, &Properties) -> DomainResult<()> + Send + Sync>;

/// 创建流程：校验原始数据并提取标识
pub(crate) fn create_parts(
    schema: &Schema,
    extractor: Option<&IdentifierExtractor>,
    data: Value,
) -> DomainResult<(Properties, Identifier)> {
    let validated = schema.validate(data).map_err(DomainError::SchemaValidation)?;
    let properties = Properties::new(validated);
    let identifier = identity::resolve(extractor, &properties)?;
    Ok((properties, identifier))
}

/// 更新流程：两阶段校验 + 合并 + 全量回验 + 标识重算
pub(crate) fn patch_parts(
    schema: &Schema,
    update_schema: Option<&Schema>,
    validate_update: Option<&UpdateValidator>,
    extractor: Option<&IdentifierExtractor>,
    current: &Properties,
    updates: Value,
) -> DomainResult<(Properties, Identifier)> {
    // 1. 更新载荷先过有效更新 Schema（未配置时退化为全量 Schema）
    let effective = update_schema.unwrap_or(schema);
    let validated = effective
        .validate(updates)
        .map_err(DomainError::SchemaValidation)?;
    let validated = Properties::new(validated);

    // 2. 业务规则校验（失败则合并不会发生）
    if let Some(check) = validate_update {
        check(current, &validated)?;
    }

    // 3+4. 合并后整体回验，捕获“局部合法、整体非法”的跨字段破坏
    let merged = current.merged_with(&validated);
    let merged = schema
        .validate(merged)
        .map_err(DomainError::PostMergeValidation)?;
    let properties = Properties::new(merged);

    // 5. 标识重算（更新 Schema 不含标识字段时必然与原值一致）
    let identifier = identity::resolve(extractor, &properties)?;
    Ok((properties, identifier))
}
