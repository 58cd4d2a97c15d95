//! Request bodies for the reorder endpoints.

use serde::{Deserialize, Serialize};
use syllabus_ordering::{MAX_ORDER, Placement};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Moves one item to `order` within its list.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReorderDto {
    #[validate(range(min = 0))]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlacementDto {
    pub id: Uuid,
    #[validate(range(min = 0, max = MAX_ORDER))]
    pub order: i32,
}

/// Assigns new orders to several items of one list at once.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct BulkReorderDto {
    #[validate(length(min = 1), nested)]
    pub items: Vec<PlacementDto>,
}

impl BulkReorderDto {
    pub fn placements(&self) -> Vec<Placement<Uuid>> {
        self.items
            .iter()
            .map(|item| Placement::new(item.id, item.order))
            .collect()
    }
}
