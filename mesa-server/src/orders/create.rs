//! Create Order Workflow
//!
//! Composes branch, address, menu items, add-ons and an optional coupon
//! into a priced, persisted order inside one database transaction. The
//! notification and confirmation-mail side effects run after the commit
//! and never fail the request.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::message::{EventType, OrderCreatedPayload};
use shared::models::{
    CreateOrderRequest, MenuItem, MenuItemAddOn, Order, OrderDetail, OrderItem, OrderItemAddOn,
    OrderStatus,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{
    address, branch as branch_repo, loyalty, menu_item, offer as offer_repo, order as order_repo,
    restaurant as restaurant_repo,
};
use crate::loyalty::points_for_order;
use crate::orders::coupon::{self, CouponContext, CouponError};
use crate::orders::pricing::{self, PricedCart};
use crate::utils::time::{minute_of_day_now, parse_hhmm, window_contains};
use crate::utils::validation::{MAX_LINE_QUANTITY, MAX_NOTE_LEN, validate_optional_text};

pub async fn create_order(
    state: &ServerState,
    user: &CurrentUser,
    req: CreateOrderRequest,
) -> AppResult<OrderDetail> {
    let pool = state.pool();
    let now = shared::util::now_millis();

    // ── 1. Request shape ────────────────────────────────────────────
    if req.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for line in &req.items {
        if line.quantity < 1 || line.quantity > MAX_LINE_QUANTITY {
            return Err(AppError::validation(format!(
                "quantity must be between 1 and {MAX_LINE_QUANTITY}"
            )));
        }
    }
    validate_optional_text(&req.note, "note", MAX_NOTE_LEN)?;

    // ── 2. Branch: active and currently open ────────────────────────
    let branch = branch_repo::find_by_id(pool, req.branch_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound))?;
    if !branch.is_active {
        return Err(AppError::new(ErrorCode::BranchInactive));
    }
    let opens = parse_hhmm(&branch.opens_at)?;
    let closes = parse_hhmm(&branch.closes_at)?;
    if !window_contains(opens, closes, minute_of_day_now()) {
        return Err(AppError::with_message(
            ErrorCode::BranchClosed,
            format!(
                "Branch is closed (hours {} - {})",
                branch.opens_at, branch.closes_at
            ),
        ));
    }

    // ── 3. Delivery address: owned by the caller ────────────────────
    let delivery_address = address::find_owned(pool, req.address_id, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AddressNotFound))?;

    // ── 4. Resolve and validate menu items + add-ons ────────────────
    let cart_lines = resolve_cart(state, &req, branch.id).await?;

    // ── 5. Price the cart ───────────────────────────────────────────
    let cart = pricing::price_cart(&cart_lines);

    // ── 6. Branch minimum ───────────────────────────────────────────
    if cart.subtotal < branch.min_order_amount {
        return Err(AppError::with_message(
            ErrorCode::OrderBelowMinimum,
            format!(
                "Order subtotal {:.2} is below the branch minimum {:.2}",
                cart.subtotal, branch.min_order_amount
            ),
        ));
    }

    // ── 7. Coupon ───────────────────────────────────────────────────
    let (applied_offer, discount_amount) =
        resolve_coupon(state, user, &req, branch.id, &cart, now).await?;

    // ── 8. Totals and loyalty forecast ──────────────────────────────
    let delivery_fee = branch.delivery_fee;
    let total = pricing::compute_total(cart.subtotal, discount_amount, delivery_fee);
    let goods_value = total - delivery_fee;

    let account = loyalty::ensure_account(pool, user.id).await?;
    let points_earned = points_for_order(goods_value, account.tier);

    // ── 9. Persist: one transaction ─────────────────────────────────
    let order_id = shared::util::snowflake_id();
    let order = Order {
        id: order_id,
        order_number: shared::util::order_number(order_id),
        user_id: user.id,
        branch_id: branch.id,
        address_id: delivery_address.id,
        status: OrderStatus::Pending,
        subtotal: cart.subtotal,
        discount_amount,
        delivery_fee,
        total,
        offer_id: applied_offer,
        loyalty_points_earned: points_earned,
        delivery_id: None,
        note: req.note.clone(),
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;

    order_repo::insert_order(&mut tx, &order).await?;

    for line in &cart.lines {
        let item_id = shared::util::snowflake_id();
        order_repo::insert_item(
            &mut tx,
            &OrderItem {
                id: item_id,
                order_id,
                menu_item_id: line.menu_item_id,
                item_name: line.item_name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.line_total,
            },
        )
        .await?;

        for add_on in &line.add_ons {
            order_repo::insert_item_add_on(
                &mut tx,
                &OrderItemAddOn {
                    id: shared::util::snowflake_id(),
                    order_item_id: item_id,
                    add_on_id: add_on.id,
                    add_on_name: add_on.name.clone(),
                    price: add_on.price,
                },
            )
            .await?;
        }
    }

    order_repo::insert_status_history(&mut tx, order_id, None, OrderStatus::Pending, user.id, None)
        .await?;

    // Re-check the usage cap under the transaction: two orders racing
    // for the last slot cannot both claim it.
    if let Some(offer_id) = applied_offer
        && !offer_repo::claim_usage(&mut tx, offer_id).await?
    {
        return Err(CouponError::Exhausted.into());
    }

    branch_repo::record_order(&mut tx, branch.id, total).await?;
    restaurant_repo::record_order(&mut tx, branch.restaurant_id, total).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        order_id,
        order_number = %order.order_number,
        user_id = user.id,
        branch_id = branch.id,
        total,
        "Order created"
    );

    // ── 10. Post-commit side effects (best effort) ──────────────────
    state.notify.publish(
        EventType::OrderCreated,
        &OrderCreatedPayload {
            order_id,
            order_number: order.order_number.clone(),
            branch_id: branch.id,
            user_id: user.id,
            total,
        },
    );

    let mail = state.mail.clone();
    let order_number = order.order_number.clone();
    let username = user.username.clone();
    tokio::spawn(async move {
        if let Err(e) = mail.send_order_confirmation(&username, &order_number, total).await {
            tracing::warn!(%order_number, error = %e, "Order confirmation mail failed");
        }
    });

    order_repo::find_detail(pool, order_id)
        .await?
        .ok_or_else(|| AppError::internal("Order vanished after commit"))
}

/// Load every referenced menu item and add-on, enforcing per-line rules:
/// the item must be active, available and sold by the target branch; its
/// add-ons must belong to it and be active.
async fn resolve_cart(
    state: &ServerState,
    req: &CreateOrderRequest,
    branch_id: i64,
) -> AppResult<Vec<(MenuItem, i64, Vec<MenuItemAddOn>)>> {
    let pool = state.pool();

    let item_ids: Vec<i64> = req.items.iter().map(|l| l.menu_item_id).collect();
    let items = menu_item::find_by_ids_for_branch(pool, &item_ids, branch_id).await?;

    let add_on_ids: Vec<i64> = req
        .items
        .iter()
        .flat_map(|l| l.add_on_ids.iter().copied())
        .collect();
    let add_ons = menu_item::find_add_ons_by_ids(pool, &add_on_ids).await?;

    let mut lines = Vec::with_capacity(req.items.len());
    for line in &req.items {
        let item = items
            .get(&line.menu_item_id)
            .filter(|i| i.is_active)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::MenuItemNotFound,
                    format!("Menu item {} not found at this branch", line.menu_item_id),
                )
            })?;
        if !item.is_available {
            return Err(AppError::with_message(
                ErrorCode::MenuItemUnavailable,
                format!("{} is currently unavailable", item.name),
            ));
        }

        let mut line_add_ons = Vec::with_capacity(line.add_on_ids.len());
        for add_on_id in &line.add_on_ids {
            let add_on = add_ons
                .get(add_on_id)
                .filter(|a| a.is_active)
                .ok_or_else(|| AppError::new(ErrorCode::AddOnNotFound))?;
            if add_on.menu_item_id != item.id {
                return Err(AppError::with_message(
                    ErrorCode::AddOnMismatch,
                    format!("Add-on {} does not belong to {}", add_on.name, item.name),
                ));
            }
            line_add_ons.push(add_on.clone());
        }

        lines.push((item.clone(), line.quantity, line_add_ons));
    }

    Ok(lines)
}

/// Validate the coupon code, if any, and compute the discount.
async fn resolve_coupon(
    state: &ServerState,
    user: &CurrentUser,
    req: &CreateOrderRequest,
    branch_id: i64,
    cart: &PricedCart,
    now: i64,
) -> AppResult<(Option<i64>, f64)> {
    let Some(raw_code) = req.offer_code.as_deref() else {
        return Ok((None, 0.0));
    };
    let code = coupon::normalize_code(raw_code);
    if code.is_empty() {
        return Ok((None, 0.0));
    }

    let pool = state.pool();
    let offer = offer_repo::find_by_code(pool, &code)
        .await?
        .ok_or(CouponError::NotFound)?;

    let user_usage_count = offer_repo::count_user_usage(pool, offer.id, user.id).await?;

    let ctx = CouponContext {
        now,
        branch_id,
        subtotal: cart.subtotal,
        user_usage_count,
        lines: &cart.lines,
    };
    let discount = coupon::validate_and_price(&offer, &ctx)?;

    Ok((Some(offer.id), discount))
}
