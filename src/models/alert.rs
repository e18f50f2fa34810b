use crate::config::CollectionDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorDirection {
    Increased,
    Decreased,
}

impl FloorDirection {
    pub fn icon_url(&self) -> &'static str {
        match self {
            FloorDirection::Increased => "https://nft.hardy.se/static/img/increase.png",
            FloorDirection::Decreased => "https://nft.hardy.se/static/img/decrease.png",
        }
    }
}

impl fmt::Display for FloorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorDirection::Increased => write!(f, "increased"),
            FloorDirection::Decreased => write!(f, "decreased"),
        }
    }
}

/// A detected floor-price move for one collection, carrying everything
/// the notification payload needs.
#[derive(Debug, Clone)]
pub struct FloorChange {
    pub collection: CollectionDescriptor,
    pub old_floor_price: i64,
    pub new_floor_price: i64,
}

impl FloorChange {
    /// `None` when the floor is unchanged; no notification is due then.
    pub fn detect(
        collection: &CollectionDescriptor,
        old_floor_price: i64,
        new_floor_price: i64,
    ) -> Option<Self> {
        if old_floor_price == new_floor_price {
            return None;
        }
        Some(FloorChange {
            collection: collection.clone(),
            old_floor_price,
            new_floor_price,
        })
    }

    pub fn direction(&self) -> FloorDirection {
        if self.new_floor_price > self.old_floor_price {
            FloorDirection::Increased
        } else {
            FloorDirection::Decreased
        }
    }
}
