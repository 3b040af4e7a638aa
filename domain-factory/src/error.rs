//! 统一错误定义
//!
//! 聚焦 Schema 校验、合并后回验、业务规则与标识提取四类失败，
//! 全部经由 `DomainResult` 返回，构造路径上没有任何恐慌式控制流。
//!
use crate::schema::FieldError;
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    /// 原始输入（`create`）或更新载荷（`patch`）未通过 Schema 校验
    #[error("schema validation failed: {}", FieldError::join(.0))]
    SchemaValidation(Vec<FieldError>),

    /// 更新载荷本身合法，但合并后的整体未通过全量 Schema 回验
    /// （跨字段约束被破坏，说明更新 Schema 相对全量 Schema 约束不足）
    #[error("post-merge validation failed: {}", FieldError::join(.0))]
    PostMergeValidation(Vec<FieldError>),

    /// 业务规则校验器拒绝了一次 Schema 合法的更新
    #[error("business rule violated: {code}: {message}")]
    BusinessRule { code: String, message: String },

    /// 标识提取失败（属性中缺少标识字段）
    #[error("missing identifier: field `{field}` is absent from properties")]
    MissingIdentifier { field: String },
}

impl DomainError {
    /// 构造业务规则错误（供 `UpdateValidator` 使用）
    pub fn business_rule(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BusinessRule {
            code: code.into(),
            message: message.into(),
        }
    }

    /// 若为校验类错误，返回字段级错误列表
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::SchemaValidation(errors) | Self::PostMergeValidation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
