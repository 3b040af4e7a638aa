//! Schema 描述与校验器
//!
//! 以 `serde_json::Value` 为候选值类型的最小校验引擎：
//! - 对象形状（命名字段、必填/可选）
//! - 类型细化（字符串、整数、数值、布尔、枚举、任意）
//! - 自定义细化函数（闭包，返回字段级错误消息）
//! - 特殊的“不可满足” Schema（`Schema::nothing()`），任何候选值都会
//!   被拒绝，用于把实体的更新通道整体封死
//!
//! 校验不短路：同一候选值上的所有字段错误会按字段顺序收集后一并返回。
//!
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// 字段级校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// 字段路径（顶层字段即字段名；非对象候选值用 `$` 表示整体）
    pub path: String,
    /// 错误消息
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// 将一组错误拼接为单行文本（用于 `Display`）
    pub fn join(errors: &[FieldError]) -> String {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// 字段类型约束
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// JSON 字符串
    String,
    /// JSON 整数（i64/u64 范围内）
    Integer,
    /// 任意 JSON 数值
    Number,
    /// JSON 布尔
    Boolean,
    /// 字符串枚举（候选值必须是列表中的字符串之一）
    OneOf(Vec<String>),
    /// 不做类型约束
    Any,
}

impl FieldType {
    fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            FieldType::String if value.is_string() => Ok(()),
            FieldType::Integer if value.is_i64() || value.is_u64() => Ok(()),
            FieldType::Number if value.is_number() => Ok(()),
            FieldType::Boolean if value.is_boolean() => Ok(()),
            FieldType::OneOf(allowed) => match value.as_str() {
                Some(s) if allowed.iter().any(|a| a == s) => Ok(()),
                Some(s) => Err(format!("`{s}` is not one of: {}", allowed.join(", "))),
                None => Err(format!("expected string, found {}", kind_of(value))),
            },
            FieldType::Any => Ok(()),
            _ => Err(format!("expected {}, found {}", self.name(), kind_of(value))),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::OneOf(_) => "string",
            FieldType::Any => "any",
        }
    }
}

/// 自定义细化函数：对已通过类型检查的值做进一步判定
pub type Refinement = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// 单个字段的校验规则：类型 + 必填标记 + 可选的细化函数
#[derive(Clone)]
pub struct FieldRule {
    field_type: FieldType,
    required: bool,
    refinement: Option<Refinement>,
}

impl FieldRule {
    fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
            refinement: None,
        }
    }

    /// 必填字符串字段
    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    /// 必填整数字段
    pub fn integer() -> Self {
        Self::new(FieldType::Integer)
    }

    /// 必填数值字段
    pub fn number() -> Self {
        Self::new(FieldType::Number)
    }

    /// 必填布尔字段
    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    /// 必填字符串枚举字段
    pub fn one_of<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldType::OneOf(allowed.into_iter().map(Into::into).collect()))
    }

    /// 不约束类型的必填字段
    pub fn any() -> Self {
        Self::new(FieldType::Any)
    }

    /// 将字段标记为可选（缺省时不报错，存在时仍按规则校验）
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// 附加自定义细化函数，在类型检查通过后执行
    pub fn refine<F>(mut self, refinement: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.refinement = Some(Arc::new(refinement));
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    fn check(&self, value: &Value) -> Result<(), String> {
        self.field_type.check(value)?;
        if let Some(refinement) = &self.refinement {
            refinement(value)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field_type", &self.field_type)
            .field("required", &self.required)
            .field("refinement", &self.refinement.is_some())
            .finish()
    }
}

/// 对象形状描述：字段名到规则的映射
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: BTreeMap<String, FieldRule>,
}

impl ObjectSchema {
    fn validate(&self, candidate: Value) -> Result<Map<String, Value>, Vec<FieldError>> {
        let mut candidate = match candidate {
            Value::Object(map) => map,
            other => {
                return Err(vec![FieldError::new(
                    "$",
                    format!("expected an object, found {}", kind_of(&other)),
                )]);
            }
        };

        let mut errors = Vec::new();
        let mut validated = Map::new();

        for (name, rule) in &self.fields {
            match candidate.remove(name) {
                Some(value) => match rule.check(&value) {
                    Ok(()) => {
                        validated.insert(name.clone(), value);
                    }
                    Err(message) => errors.push(FieldError::new(name, message)),
                },
                None if rule.required => {
                    errors.push(FieldError::new(name, "required field is missing"));
                }
                None => {}
            }
        }

        // 剩余字段均为 Schema 未声明的字段
        for (name, _) in candidate {
            errors.push(FieldError::new(name, "unknown field"));
        }

        if errors.is_empty() { Ok(validated) } else { Err(errors) }
    }
}

/// Schema 描述
///
/// `Object` 描述对象形状；`Nothing` 是不可满足 Schema，任何候选值都会
/// 被拒绝。后者用作更新 Schema 时，实例在创建后即完全不可变。
#[derive(Debug, Clone)]
pub enum Schema {
    Object(ObjectSchema),
    Nothing,
}

impl Schema {
    /// 开始构建对象 Schema
    pub fn object() -> ObjectSchemaBuilder {
        ObjectSchemaBuilder::default()
    }

    /// 不可满足 Schema（任何候选值校验均失败）
    pub fn nothing() -> Self {
        Self::Nothing
    }

    /// 校验候选值，成功时返回新构建的字段映射（与输入不共享结构）
    pub fn validate(&self, candidate: Value) -> Result<Map<String, Value>, Vec<FieldError>> {
        match self {
            Schema::Object(object) => object.validate(candidate),
            Schema::Nothing => Err(vec![FieldError::new("$", "no value can satisfy this schema")]),
        }
    }
}

/// 对象 Schema 的链式构建器
#[derive(Debug, Default)]
pub struct ObjectSchemaBuilder {
    fields: BTreeMap<String, FieldRule>,
}

impl ObjectSchemaBuilder {
    /// 声明一个字段及其规则（同名字段以后声明者为准）
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    pub fn build(self) -> Schema {
        Schema::Object(ObjectSchema { fields: self.fields })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
