//! 订单示例：四类工厂的完整调用方式
//!
//! 演示内容：
//! 1. 值对象（收货地址）：结构相等，创建后不可变；
//! 2. 聚合根（订单）：更新 Schema 限定可变字段，业务规则限制状态迁移；
//! 3. 领域事件：载荷经校验，发生时间由库捕获；
//! 4. 组合式扩展：用领域包装类型 `Order` 持有聚合根实例并以委托方式
//!    暴露 `confirm`/`ship` 等业务方法（不依赖继承）。
//!
use anyhow::Result;
use domain_factory::aggregate_root::{AggregateRoot, AggregateRootClass};
use domain_factory::domain_event::{DomainEvent, DomainEventClass};
use domain_factory::error::DomainError;
use domain_factory::properties::Properties;
use domain_factory::schema::{FieldRule, Schema};
use domain_factory::value_object::ValueObjectClass;
use serde_json::json;
use std::sync::Arc;
use ulid::Ulid;

fn order_class() -> AggregateRootClass<DomainEvent> {
    AggregateRootClass::builder()
        .name("Order")
        .schema(
            Schema::object()
                .field("id", FieldRule::string())
                .field("status", FieldRule::one_of(["draft", "confirmed", "shipped"]))
                .field(
                    "total",
                    FieldRule::number().refine(|v| {
                        if v.as_f64().unwrap_or(-1.0) >= 0.0 {
                            Ok(())
                        } else {
                            Err("must not be negative".to_string())
                        }
                    }),
                )
                .build(),
        )
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
        .build()
}

fn confirmed_event_class() -> DomainEventClass {
    DomainEventClass::new(
        "order.confirmed",
        Schema::object()
            .field("order_id", FieldRule::string())
            .field("total", FieldRule::number())
            .build(),
    )
}

/// 组合式扩展：包装聚合根实例，以委托暴露业务方法
struct Order {
    root: AggregateRoot<DomainEvent>,
}

impl Order {
    fn place(total: f64) -> Result<Self> {
        let root = order_class().create(json!({
            "id": Ulid::new().to_string(),
            "status": "draft",
            "total": total,
        }))?;
        Ok(Self { root })
    }

    fn confirm(self) -> Result<Self> {
        let event = confirmed_event_class().create(json!({
            "order_id": self.root.identifier().to_string(),
            "total": self.root.properties().get("total"),
        }))?;
        let root = self.root.patch(json!({"status": "confirmed"}))?.add_event(event);
        Ok(Self { root })
    }

    fn ship(self) -> Result<Self> {
        let root = self.root.patch(json!({"status": "shipped"}))?;
        Ok(Self { root })
    }
}

fn main() -> Result<()> {
    // 值对象：相同数据相等，与键顺序无关
    let addresses = ValueObjectClass::new(
        Schema::object()
            .field("street", FieldRule::string())
            .field("city", FieldRule::string())
            .build(),
    );
    let home = addresses.create(json!({"street": "Main St 1", "city": "Springfield"}))?;
    let same = addresses.create(json!({"city": "Springfield", "street": "Main St 1"}))?;
    println!("addresses equal: {}", home == same);

    // 聚合根：draft 直接发货被业务规则拒绝
    let order = Order::place(99.5)?;
    println!("placed {}", order.root);
    match order.root.patch(json!({"status": "shipped"})) {
        Err(DomainError::BusinessRule { code, .. }) => println!("rejected: {code}"),
        Err(other) => anyhow::bail!("expected a business rule rejection, got {other}"),
        Ok(_) => anyhow::bail!("expected a business rule rejection"),
    }

    // 确认后发货成功；确认时追加领域事件
    let order = order.confirm()?;
    for event in order.root.domain_events() {
        println!("pending event: {} at {}", event.event_name(), event.occurred_on());
    }
    let order = order.ship()?;
    println!(
        "shipped {} with status {:?}",
        order.root,
        order.root.properties().get("status")
    );

    // 事件发布后清空待发布序列
    let root = order.root.clear_events();
    println!("pending events after clear: {}", root.domain_events().len());

    Ok(())
}
