use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Restock threshold used when `alert_config` carries no usable value.
pub const DEFAULT_MIN_QUANTITY: u32 = 5;

/// Fixed policy ceiling: at or above this quantity a product is healthy.
pub const AVERAGE_CEILING: u32 = 50;

/// Restocking urgency of a product. Never stored; always recomputed from
/// `quantity` and the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Out,
    Low,
    Average,
    Healthy,
}

/// Classify a product's stock health.
///
/// Zero quantity always wins: a stockout is never masked by threshold
/// metadata, malformed or not. Everywhere else a missing or undecodable
/// threshold falls back to [`DEFAULT_MIN_QUANTITY`] so a bad blob can
/// never block the view.
pub fn classify(product: &Product) -> StockStatus {
    if product.quantity == 0 {
        return StockStatus::Out;
    }

    let min_quantity = product
        .alert_config
        .min_quantity()
        .unwrap_or(DEFAULT_MIN_QUANTITY);

    if product.quantity <= min_quantity {
        StockStatus::Low
    } else if product.quantity < AVERAGE_CEILING {
        StockStatus::Average
    } else {
        StockStatus::Healthy
    }
}
