//! 门店菜单聚合查询
//!
//! 三条查询 + 内存分组，避免 N+1：分类 → 可点菜品 → 加料。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{branch as branch_repo, category as category_repo, menu_item as item_repo};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{MenuCategoryView, MenuItemView};

/// GET /api/menu/branch/:branch_id - 完整菜单（分类 + 可点菜品 + 加料）
pub async fn branch_menu(
    State(state): State<ServerState>,
    Path(branch_id): Path<i64>,
) -> AppResult<Json<Vec<MenuCategoryView>>> {
    let pool = state.pool();

    let branch = branch_repo::find_by_id(pool, branch_id)
        .await?
        .filter(|b| b.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound))?;

    let categories = category_repo::find_by_branch(pool, branch.id).await?;
    let all_items = item_repo::find_available_by_branch(pool, branch.id).await?;

    let item_ids: Vec<i64> = all_items.iter().map(|i| i.id).collect();
    let mut add_ons = item_repo::find_add_ons_for_items(pool, &item_ids).await?;

    let mut views: Vec<MenuCategoryView> = categories
        .into_iter()
        .map(|category| MenuCategoryView {
            category,
            items: Vec::new(),
        })
        .collect();

    for item in all_items {
        if let Some(view) = views.iter_mut().find(|v| v.category.id == item.category_id) {
            let add_ons = add_ons.remove(&item.id).unwrap_or_default();
            view.items.push(MenuItemView { item, add_ons });
        }
    }

    Ok(Json(views))
}
