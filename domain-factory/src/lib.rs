//! 基于声明式 Schema 的领域对象工厂库（domain-factory）
//!
//! 提供四类不可变领域对象的工厂构件，用于在应用中实现：
//! - 值对象（`value_object`）：无标识、按结构相等比较
//! - 实体（`entity`）：具备标识，支持经 Schema 校验的写时复制更新
//! - 聚合根（`aggregate_root`）：实体能力之外附带待发布领域事件列表
//! - 领域事件（`domain_event`）：带时间戳、载荷经校验的事实记录
//!
//! 共享构件：
//! - Schema 校验器（`schema`）：对象形状、必填/可选字段、类型细化与
//!   “不可满足” Schema（用于实现完全不可变的更新策略）
//! - 属性集（`properties`）与标识（`identity`）
//! - 两阶段更新管线（`update`）：Schema 校验 → 业务规则校验 → 合并 →
//!   全量回验，任一阶段失败即短路，原实例绝不被修改
//!
//! 所有工厂操作通过 `DomainResult`（`Result<T, DomainError>`）返回校验
//! 结果，不以异常/恐慌作为控制流；实例一经构造即不可变，可跨线程自由
//! 共享。
//!
//! 典型用法：
//! 1. 用 `Schema::object()` 描述对象形状与约束；
//! 2. 通过 `EntityClass::builder()`（或对应工厂）固化 Schema、更新
//!    Schema、业务规则与标识提取方式；
//! 3. 调用 `create` 构造实例，调用 `patch` 得到更新后的新实例；
//! 4. 聚合根用 `add_event`/`clear_events` 管理待发布事件。
//!
pub mod aggregate_root;
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod identity;
pub mod properties;
pub mod schema;
pub mod update;
pub mod value_object;
