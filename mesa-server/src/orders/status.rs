//! Order Status Machine
//!
//! Transition table plus the transactional `advance` path: the order row
//! moves together with its history entry, driver bookkeeping and coupon
//! release. Post-commit effects (loyalty credit, bus broadcast) run
//! outside the transaction.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::message::{EventType, OrderStatusChangedPayload};
use shared::models::{Order, OrderStatus};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{delivery, loyalty, offer, order};

/// The forward chain; `cancelled` only from the two earliest states.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Confirmed, Preparing)
            | (Preparing, Ready)
            | (Ready, OutForDelivery)
            | (OutForDelivery, Delivered)
            | (Pending, Cancelled)
            | (Confirmed, Cancelled)
    )
}

/// Move an order to a new status (admin / driver surface).
pub async fn advance(
    state: &ServerState,
    order_id: i64,
    to: OrderStatus,
    actor: &CurrentUser,
    note: Option<String>,
) -> AppResult<Order> {
    let pool = state.pool();
    let current = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    transition(state, current, to, actor.id, note).await
}

/// Customer-initiated cancellation of their own order.
pub async fn cancel_own(
    state: &ServerState,
    order_id: i64,
    actor: &CurrentUser,
    note: Option<String>,
) -> AppResult<Order> {
    let pool = state.pool();
    let current = order::find_by_id(pool, order_id)
        .await?
        // A foreign order reads as missing — no existence leak
        .filter(|o| o.user_id == actor.id)
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if !matches!(
        current.status,
        OrderStatus::Pending | OrderStatus::Confirmed
    ) {
        return Err(AppError::new(ErrorCode::OrderNotCancellable));
    }

    transition(state, current, OrderStatus::Cancelled, actor.id, note).await
}

/// Assign an available driver to an order being prepared.
pub async fn assign_driver(
    state: &ServerState,
    order_id: i64,
    delivery_id: i64,
    _actor: &CurrentUser,
) -> AppResult<Order> {
    let pool = state.pool();
    let current = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if !matches!(
        current.status,
        OrderStatus::Preparing | OrderStatus::Ready
    ) {
        return Err(AppError::new(ErrorCode::InvalidStatusTransition));
    }

    let driver = delivery::find_by_id(pool, delivery_id)
        .await?
        .filter(|d| d.is_active && d.branch_id == current.branch_id)
        .ok_or_else(|| AppError::new(ErrorCode::DriverNotFound))?;

    let mut tx = pool.begin().await.map_err(db_err)?;

    if !delivery::claim_driver(&mut tx, driver.id).await? {
        return Err(AppError::new(ErrorCode::DriverUnavailable));
    }
    // Swapping drivers releases the previous one
    if let Some(previous) = current.delivery_id {
        delivery::release_driver(&mut tx, previous, false).await?;
    }
    order::set_delivery(&mut tx, order_id, Some(delivery_id)).await?;

    tx.commit().await.map_err(db_err)?;

    order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// Shared transition path: status guard, history row, driver and coupon
/// bookkeeping in one transaction; loyalty credit and broadcast after.
async fn transition(
    state: &ServerState,
    current: Order,
    to: OrderStatus,
    changed_by: i64,
    note: Option<String>,
) -> AppResult<Order> {
    let from = current.status;
    if !can_transition(from, to) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot move order from {from} to {to}"),
        ));
    }
    if to == OrderStatus::OutForDelivery && current.delivery_id.is_none() {
        return Err(AppError::new(ErrorCode::NoDriverAssigned));
    }

    let pool = state.pool();
    let mut tx = pool.begin().await.map_err(db_err)?;

    order::update_status(&mut tx, current.id, from, to).await?;
    order::insert_status_history(&mut tx, current.id, Some(from), to, changed_by, note.as_deref())
        .await?;

    match to {
        OrderStatus::Cancelled => {
            if let Some(offer_id) = current.offer_id {
                offer::release_usage(&mut tx, offer_id).await?;
            }
            if let Some(delivery_id) = current.delivery_id {
                delivery::release_driver(&mut tx, delivery_id, false).await?;
            }
        }
        OrderStatus::Delivered => {
            if let Some(delivery_id) = current.delivery_id {
                delivery::release_driver(&mut tx, delivery_id, true).await?;
            }
        }
        _ => {}
    }

    tx.commit().await.map_err(db_err)?;

    // Loyalty credit happens after the commit: a failed credit leaves a
    // delivered order and an error log, never a half-finished transition.
    if to == OrderStatus::Delivered && current.loyalty_points_earned > 0 {
        let goods_value = current.total - current.delivery_fee;
        if let Err(e) = loyalty::credit_for_order(
            pool,
            current.user_id,
            current.id,
            current.loyalty_points_earned,
            goods_value,
        )
        .await
        {
            tracing::error!(
                order_id = current.id,
                error = %e,
                "Failed to credit loyalty points for delivered order"
            );
        }
    }

    let updated = order::find_by_id(pool, current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    state.notify.publish(
        EventType::OrderStatusChanged,
        &OrderStatusChangedPayload {
            order_id: updated.id,
            order_number: updated.order_number.clone(),
            from: Some(from),
            to,
        },
    );

    Ok(updated)
}

fn db_err(e: sqlx::Error) -> AppError {
    AppError::database(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_forward_chain() {
        assert!(can_transition(Pending, Confirmed));
        assert!(can_transition(Confirmed, Preparing));
        assert!(can_transition(Preparing, Ready));
        assert!(can_transition(Ready, OutForDelivery));
        assert!(can_transition(OutForDelivery, Delivered));
    }

    #[test]
    fn test_no_skipping() {
        assert!(!can_transition(Pending, Preparing));
        assert!(!can_transition(Confirmed, Ready));
        assert!(!can_transition(Pending, Delivered));
    }

    #[test]
    fn test_cancel_window() {
        assert!(can_transition(Pending, Cancelled));
        assert!(can_transition(Confirmed, Cancelled));
        assert!(!can_transition(Preparing, Cancelled));
        assert!(!can_transition(OutForDelivery, Cancelled));
    }

    #[test]
    fn test_terminal_states() {
        for to in [Pending, Confirmed, Preparing, Ready, OutForDelivery, Delivered, Cancelled] {
            assert!(!can_transition(Delivered, to));
            assert!(!can_transition(Cancelled, to));
        }
    }

    #[test]
    fn test_no_backward_moves() {
        assert!(!can_transition(Confirmed, Pending));
        assert!(!can_transition(Ready, Preparing));
        assert!(!can_transition(Delivered, OutForDelivery));
    }
}
