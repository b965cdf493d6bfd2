//! End-to-end order flow against an in-memory database:
//! seed catalog → place order → walk the status machine → loyalty credit.

use mesa_server::auth::{CurrentUser, JwtConfig, password};
use mesa_server::core::{Config, ServerState};
use mesa_server::db::DbService;
use mesa_server::db::repository::{
    address, branch, category, delivery, loyalty, menu_item, offer, order, restaurant, user,
};
use mesa_server::orders;
use shared::error::ErrorCode;
use shared::models::*;

async fn test_state() -> ServerState {
    let db = DbService::new_in_memory().await.expect("in-memory db");
    let config = Config {
        work_dir: "/tmp/mesa-test".into(),
        http_port: 0,
        database_path: ":memory:".into(),
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".into(),
            expiration_minutes: 60,
            issuer: "mesa-server".into(),
            audience: "mesa-clients".into(),
        },
        environment: "test".into(),
        mail_relay_url: None,
        request_timeout_ms: 30_000,
        log_dir: None,
    };
    ServerState::with_db(config, db)
}

struct Fixture {
    state: ServerState,
    customer: CurrentUser,
    admin: CurrentUser,
    branch_id: i64,
    address_id: i64,
    margherita: i64,
    tiramisu: i64,
    extra_cheese: i64,
}

async fn seed() -> Fixture {
    let state = test_state().await;
    let pool = state.pool();

    let hash = password::hash_password("secret-pass").unwrap();
    let customer_row = user::create(
        pool,
        "ana",
        "ana@example.com",
        &hash,
        "Ana Martins",
        None,
        UserRole::Customer,
    )
    .await
    .unwrap();
    let admin_row = user::create(
        pool,
        "boss",
        "boss@example.com",
        &hash,
        "The Boss",
        None,
        UserRole::Admin,
    )
    .await
    .unwrap();

    let restaurant_row = restaurant::create(
        pool,
        RestaurantCreate {
            name: "Trattoria Mesa".into(),
            description: None,
            logo_url: None,
        },
    )
    .await
    .unwrap();

    let branch_row = branch::create(
        pool,
        BranchCreate {
            restaurant_id: restaurant_row.id,
            name: "Centro".into(),
            address: "Rua Central 1".into(),
            phone: None,
            delivery_radius_km: Some(5.0),
            delivery_fee: Some(2.5),
            min_order_amount: Some(10.0),
            // open == close means always open, keeps the test time-independent
            opens_at: "09:00".into(),
            closes_at: "09:00".into(),
        },
    )
    .await
    .unwrap();

    let category_row = category::create(
        pool,
        MenuCategoryCreate {
            branch_id: branch_row.id,
            name: "Mains".into(),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let margherita = menu_item::create(
        pool,
        MenuItemCreate {
            category_id: category_row.id,
            name: "Margherita".into(),
            description: None,
            image_url: None,
            price: 8.5,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let tiramisu = menu_item::create(
        pool,
        MenuItemCreate {
            category_id: category_row.id,
            name: "Tiramisu".into(),
            description: None,
            image_url: None,
            price: 4.0,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let extra_cheese = menu_item::create_add_on(
        pool,
        margherita.id,
        MenuItemAddOnCreate {
            name: "Extra cheese".into(),
            price: 1.0,
        },
    )
    .await
    .unwrap();

    let address_row = address::create(
        pool,
        customer_row.id,
        UserAddressCreate {
            label: "Home".into(),
            street: "Rua das Flores 12".into(),
            city: "Lisboa".into(),
            postal_code: "1000-001".into(),
            latitude: None,
            longitude: None,
            is_default: Some(true),
        },
    )
    .await
    .unwrap();

    let customer = CurrentUser {
        id: customer_row.id,
        username: customer_row.username.clone(),
        role: UserRole::Customer,
    };
    let admin = CurrentUser {
        id: admin_row.id,
        username: admin_row.username.clone(),
        role: UserRole::Admin,
    };

    Fixture {
        state,
        customer,
        admin,
        branch_id: branch_row.id,
        address_id: address_row.id,
        margherita: margherita.id,
        tiramisu: tiramisu.id,
        extra_cheese: extra_cheese.id,
    }
}

fn cart(fixture: &Fixture) -> CreateOrderRequest {
    CreateOrderRequest {
        branch_id: fixture.branch_id,
        address_id: fixture.address_id,
        items: vec![
            CartLine {
                menu_item_id: fixture.margherita,
                quantity: 2,
                add_on_ids: vec![fixture.extra_cheese],
            },
            CartLine {
                menu_item_id: fixture.tiramisu,
                quantity: 1,
                add_on_ids: vec![],
            },
        ],
        offer_code: None,
        note: None,
    }
}

#[tokio::test]
async fn test_create_order_prices_and_persists() {
    let fixture = seed().await;

    let detail = orders::create_order(&fixture.state, &fixture.customer, cart(&fixture))
        .await
        .unwrap();

    // (8.50 + 1.00) * 2 + 4.00 = 23.00; total = 23.00 + 2.50 delivery
    assert_eq!(detail.order.subtotal, 23.0);
    assert_eq!(detail.order.discount_amount, 0.0);
    assert_eq!(detail.order.delivery_fee, 2.5);
    assert_eq!(detail.order.total, 25.5);
    assert_eq!(detail.order.status, OrderStatus::Pending);
    // Bronze tier: floor(23.00 * 1.0)
    assert_eq!(detail.order.loyalty_points_earned, 23);
    assert!(detail.order.order_number.starts_with("MS-"));

    assert_eq!(detail.items.len(), 2);
    let margherita_line = detail
        .items
        .iter()
        .find(|i| i.item.item_name == "Margherita")
        .unwrap();
    assert_eq!(margherita_line.item.quantity, 2);
    assert_eq!(margherita_line.item.line_total, 19.0);
    assert_eq!(margherita_line.add_ons.len(), 1);

    // Initial history row: none → pending
    assert_eq!(detail.history.len(), 1);
    assert_eq!(detail.history[0].to_status, OrderStatus::Pending);
    assert_eq!(detail.history[0].from_status, None);

    // Denormalized branch counters moved in the same transaction
    let branch_row = branch::find_by_id(fixture.state.pool(), fixture.branch_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(branch_row.total_orders, 1);
    assert_eq!(branch_row.total_revenue, 25.5);
}

#[tokio::test]
async fn test_create_order_rejections() {
    let fixture = seed().await;
    let state = &fixture.state;

    // Empty cart
    let mut req = cart(&fixture);
    req.items.clear();
    let err = orders::create_order(state, &fixture.customer, req)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderEmpty);

    // Below branch minimum (10.00)
    let mut req = cart(&fixture);
    req.items = vec![CartLine {
        menu_item_id: fixture.tiramisu,
        quantity: 1,
        add_on_ids: vec![],
    }];
    let err = orders::create_order(state, &fixture.customer, req)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderBelowMinimum);

    // Foreign address reads as missing
    let mut req = cart(&fixture);
    req.address_id = 999_999;
    let err = orders::create_order(state, &fixture.customer, req)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AddressNotFound);

    // Add-on of another item
    let mut req = cart(&fixture);
    req.items[1].add_on_ids = vec![fixture.extra_cheese];
    let err = orders::create_order(state, &fixture.customer, req)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AddOnMismatch);

    // Unavailable item
    menu_item::update(
        state.pool(),
        fixture.margherita,
        MenuItemUpdate {
            category_id: None,
            name: None,
            description: None,
            image_url: None,
            price: None,
            is_available: Some(false),
            is_active: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();
    let err = orders::create_order(state, &fixture.customer, cart(&fixture))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuItemUnavailable);
}

#[tokio::test]
async fn test_coupon_applies_and_claims_usage() {
    let fixture = seed().await;
    let state = &fixture.state;
    let now = shared::util::now_millis();

    offer::create(
        state.pool(),
        OfferCreate {
            code: "welcome10".into(),
            name: "Welcome".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
            max_discount_amount: None,
            min_order_amount: None,
            starts_at: now - 1_000,
            ends_at: now + 3_600_000,
            usage_limit: Some(1),
            per_user_limit: None,
            branch_id: None,
            category_id: None,
            menu_item_id: None,
        },
    )
    .await
    .unwrap();

    let mut req = cart(&fixture);
    req.offer_code = Some("  welcome10 ".into()); // normalization
    let detail = orders::create_order(state, &fixture.customer, req)
        .await
        .unwrap();

    // 10% of 23.00 = 2.30; total = 20.70 + 2.50
    assert_eq!(detail.order.discount_amount, 2.3);
    assert_eq!(detail.order.total, 23.2);
    assert!(detail.order.offer_id.is_some());

    let stored = offer::find_by_id(state.pool(), detail.order.offer_id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.times_used, 1);

    // Usage cap of 1 is now exhausted
    let mut req = cart(&fixture);
    req.offer_code = Some("WELCOME10".into());
    let err = orders::create_order(state, &fixture.customer, req)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OfferExhausted);
}

#[tokio::test]
async fn test_status_walk_credits_loyalty_and_releases_driver() {
    let fixture = seed().await;
    let state = &fixture.state;
    let pool = state.pool();

    let driver = delivery::create(
        pool,
        DeliveryCreate {
            branch_id: fixture.branch_id,
            driver_name: "Rui".into(),
            driver_phone: "910000000".into(),
            vehicle_plate: None,
        },
    )
    .await
    .unwrap();

    let detail = orders::create_order(state, &fixture.customer, cart(&fixture))
        .await
        .unwrap();
    let order_id = detail.order.id;

    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
    ] {
        orders::status::advance(state, order_id, status, &fixture.admin, None)
            .await
            .unwrap();
    }

    // Dispatch requires a driver
    let err = orders::status::advance(
        state,
        order_id,
        OrderStatus::OutForDelivery,
        &fixture.admin,
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::NoDriverAssigned);

    orders::status::assign_driver(state, order_id, driver.id, &fixture.admin)
        .await
        .unwrap();
    let claimed = delivery::find_by_id(pool, driver.id).await.unwrap().unwrap();
    assert!(!claimed.is_available);

    orders::status::advance(
        state,
        order_id,
        OrderStatus::OutForDelivery,
        &fixture.admin,
        None,
    )
    .await
    .unwrap();
    let delivered = orders::status::advance(
        state,
        order_id,
        OrderStatus::Delivered,
        &fixture.admin,
        None,
    )
    .await
    .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // Driver released with the delivery counted
    let released = delivery::find_by_id(pool, driver.id).await.unwrap().unwrap();
    assert!(released.is_available);
    assert_eq!(released.total_deliveries, 1);

    // Loyalty credited on delivery, not before
    let account = loyalty::find_by_user(pool, fixture.customer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.points_balance, 23);
    assert_eq!(account.total_spent, 23.0);
    assert_eq!(account.tier, LoyaltyTier::Bronze);

    // Full history: pending + 5 transitions
    let detail = order::find_detail(pool, order_id).await.unwrap().unwrap();
    assert_eq!(detail.history.len(), 6);
}

#[tokio::test]
async fn test_customer_cancel_rules() {
    let fixture = seed().await;
    let state = &fixture.state;

    let detail = orders::create_order(state, &fixture.customer, cart(&fixture))
        .await
        .unwrap();
    let order_id = detail.order.id;

    // Another customer cannot even see the order
    let stranger = CurrentUser {
        id: 424242,
        username: "stranger".into(),
        role: UserRole::Customer,
    };
    let err = orders::status::cancel_own(state, order_id, &stranger, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);

    // Owner can cancel while pending
    let cancelled = orders::status::cancel_own(state, order_id, &fixture.customer, None)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // A preparing order is no longer cancellable
    let detail = orders::create_order(state, &fixture.customer, cart(&fixture))
        .await
        .unwrap();
    orders::status::advance(
        state,
        detail.order.id,
        OrderStatus::Confirmed,
        &fixture.admin,
        None,
    )
    .await
    .unwrap();
    orders::status::advance(
        state,
        detail.order.id,
        OrderStatus::Preparing,
        &fixture.admin,
        None,
    )
    .await
    .unwrap();
    let err = orders::status::cancel_own(state, detail.order.id, &fixture.customer, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotCancellable);
}

#[tokio::test]
async fn test_cancel_releases_coupon_usage() {
    let fixture = seed().await;
    let state = &fixture.state;
    let now = shared::util::now_millis();

    let created = offer::create(
        state.pool(),
        OfferCreate {
            code: "ONCE".into(),
            name: "Single use".into(),
            discount_type: DiscountType::FixedAmount,
            discount_value: 5.0,
            max_discount_amount: None,
            min_order_amount: None,
            starts_at: now - 1_000,
            ends_at: now + 3_600_000,
            usage_limit: Some(1),
            per_user_limit: None,
            branch_id: None,
            category_id: None,
            menu_item_id: None,
        },
    )
    .await
    .unwrap();

    let mut req = cart(&fixture);
    req.offer_code = Some("ONCE".into());
    let detail = orders::create_order(state, &fixture.customer, req)
        .await
        .unwrap();
    assert_eq!(detail.order.discount_amount, 5.0);

    orders::status::cancel_own(state, detail.order.id, &fixture.customer, None)
        .await
        .unwrap();

    let stored = offer::find_by_id(state.pool(), created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.times_used, 0);
}
