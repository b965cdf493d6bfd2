//! Order Repository
//!
//! Row-level persistence for orders, lines, add-on snapshots and status
//! history. The create-order workflow drives these from one transaction;
//! composition lives in `crate::orders`.

use super::{RepoError, RepoResult};
use shared::models::{
    Order, OrderDetail, OrderItem, OrderItemAddOn, OrderItemView, OrderStatus, OrderStatusHistory,
};
use sqlx::SqlitePool;
use std::collections::HashMap;

const ORDER_SELECT: &str = "SELECT id, order_number, user_id, branch_id, address_id, status, subtotal, discount_amount, delivery_fee, total, offer_id, loyalty_points_earned, delivery_id, note, created_at, updated_at FROM orders";

const ITEM_SELECT: &str = "SELECT id, order_id, menu_item_id, item_name, unit_price, quantity, line_total FROM order_items";

const HISTORY_SELECT: &str = "SELECT id, order_id, from_status, to_status, changed_by, note, created_at FROM order_status_history";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_by_user(pool: &SqlitePool, user_id: i64, limit: i64) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE user_id = ? ORDER BY created_at DESC LIMIT ?");
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(user_id)
        .bind(limit.clamp(1, 200))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_by_branch(
    pool: &SqlitePool,
    branch_id: i64,
    status: Option<OrderStatus>,
    limit: i64,
) -> RepoResult<Vec<Order>> {
    let rows = match status {
        Some(status) => {
            let sql = format!(
                "{ORDER_SELECT} WHERE branch_id = ? AND status = ? ORDER BY created_at DESC LIMIT ?"
            );
            sqlx::query_as::<_, Order>(&sql)
                .bind(branch_id)
                .bind(status)
                .bind(limit.clamp(1, 200))
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{ORDER_SELECT} WHERE branch_id = ? ORDER BY created_at DESC LIMIT ?");
            sqlx::query_as::<_, Order>(&sql)
                .bind(branch_id)
                .bind(limit.clamp(1, 200))
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

/// Full detail: order + lines with add-ons + status history
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let items_sql = format!("{ITEM_SELECT} WHERE order_id = ? ORDER BY id");
    let items = sqlx::query_as::<_, OrderItem>(&items_sql)
        .bind(id)
        .fetch_all(pool)
        .await?;

    let add_ons = sqlx::query_as::<_, OrderItemAddOn>(
        "SELECT a.id, a.order_item_id, a.add_on_id, a.add_on_name, a.price FROM order_item_add_ons a JOIN order_items i ON a.order_item_id = i.id WHERE i.order_id = ? ORDER BY a.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let history_sql = format!("{HISTORY_SELECT} WHERE order_id = ? ORDER BY created_at");
    let history = sqlx::query_as::<_, OrderStatusHistory>(&history_sql)
        .bind(id)
        .fetch_all(pool)
        .await?;

    let mut grouped: HashMap<i64, Vec<OrderItemAddOn>> = HashMap::new();
    for add_on in add_ons {
        grouped.entry(add_on.order_item_id).or_default().push(add_on);
    }

    let items = items
        .into_iter()
        .map(|item| {
            let add_ons = grouped.remove(&item.id).unwrap_or_default();
            OrderItemView { item, add_ons }
        })
        .collect();

    Ok(Some(OrderDetail {
        order,
        items,
        history,
    }))
}

// ==================== Transactional inserts ====================

pub async fn insert_order(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order: &Order,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, user_id, branch_id, address_id, status, subtotal, discount_amount, delivery_fee, total, offer_id, loyalty_points_earned, delivery_id, note, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(order.user_id)
    .bind(order.branch_id)
    .bind(order.address_id)
    .bind(order.status)
    .bind(order.subtotal)
    .bind(order.discount_amount)
    .bind(order.delivery_fee)
    .bind(order.total)
    .bind(order.offer_id)
    .bind(order.loyalty_points_earned)
    .bind(order.delivery_id)
    .bind(&order.note)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn insert_item(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    item: &OrderItem,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, menu_item_id, item_name, unit_price, quantity, line_total) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.menu_item_id)
    .bind(&item.item_name)
    .bind(item.unit_price)
    .bind(item.quantity)
    .bind(item.line_total)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn insert_item_add_on(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    add_on: &OrderItemAddOn,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_item_add_ons (id, order_item_id, add_on_id, add_on_name, price) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(add_on.id)
    .bind(add_on.order_item_id)
    .bind(add_on.add_on_id)
    .bind(&add_on.add_on_name)
    .bind(add_on.price)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn insert_status_history(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order_id: i64,
    from_status: Option<OrderStatus>,
    to_status: OrderStatus,
    changed_by: i64,
    note: Option<&str>,
) -> RepoResult<()> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO order_status_history (id, order_id, from_status, to_status, changed_by, note, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(order_id)
    .bind(from_status)
    .bind(to_status)
    .bind(changed_by)
    .bind(note)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Move the order to a new status. The guard on the current status makes
/// concurrent transitions first-writer-wins.
pub async fn update_status(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order_id: i64,
    from_status: OrderStatus,
    to_status: OrderStatus,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4")
        .bind(to_status)
        .bind(now)
        .bind(order_id)
        .bind(from_status)
        .execute(&mut **tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Order {order_id} not in status {from_status}"
        )));
    }
    Ok(())
}

pub async fn set_delivery(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order_id: i64,
    delivery_id: Option<i64>,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE orders SET delivery_id = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(delivery_id)
        .bind(now)
        .bind(order_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
