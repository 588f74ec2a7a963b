use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CART_STORAGE_KEY;
use crate::cart::storage::CartStorage;

/// A single cart line. Field names follow the persisted JSON shape, which
/// predates this crate and must keep reading carts written by older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub store_id: Uuid,
    pub store_name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Cart lines grouped by store, in the order the stores first appeared
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartStoreGroup {
    pub store_id: Uuid,
    pub store_name: String,
    pub lines: Vec<CartLine>,
}

/// Device-local shopping cart.
///
/// Every mutation persists eagerly, so the in-memory lines and the stored
/// JSON never drift. A cart that fails to parse on load is treated as empty;
/// the stored bytes are replaced on the next mutation.
pub struct Cart {
    lines: Vec<CartLine>,
    storage: Box<dyn CartStorage>,
}

impl Cart {
    /// Load the cart from storage, falling back to empty on missing or
    /// unreadable data
    pub fn load(storage: Box<dyn CartStorage>) -> Self {
        let lines = match storage.load(CART_STORAGE_KEY) {
            Some(bytes) => match serde_json::from_slice::<Vec<CartLine>>(&bytes) {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!("Discarding unreadable cart data: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self { lines, storage }
    }

    /// Add a line to the cart. A line for the same item merges by summing
    /// quantities instead of duplicating the entry; descriptive fields keep
    /// their first-written values.
    pub fn add_item(&mut self, line: CartLine) {
        match self.lines.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => {
                existing.quantity += line.quantity;
            }
            None => {
                self.lines.push(line);
            }
        }
        self.persist();
    }

    /// Set the quantity of a line. Zero or negative removes the line.
    pub fn update_quantity(&mut self, item_id: Uuid, quantity: i32) {
        if quantity <= 0 {
            self.lines.retain(|l| l.id != item_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.id == item_id) {
            line.quantity = quantity;
        }
        self.persist();
    }

    /// Remove a line from the cart
    pub fn remove_item(&mut self, item_id: Uuid) {
        self.lines.retain(|l| l.id != item_id);
        self.persist();
    }

    /// Empty the cart and drop the persisted data
    pub fn clear(&mut self) {
        self.lines.clear();
        if let Err(e) = self.storage.remove(CART_STORAGE_KEY) {
            tracing::warn!("Failed to clear persisted cart: {}", e);
        }
    }

    /// The cart's lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of units across all lines
    pub fn total_items(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Total price across all lines
    pub fn total_amount(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum()
    }

    /// Lines grouped by store, preserving the order in which each store
    /// first appeared in the cart
    pub fn store_groups(&self) -> Vec<CartStoreGroup> {
        let mut groups: Vec<CartStoreGroup> = Vec::new();
        for line in &self.lines {
            match groups.iter_mut().find(|g| g.store_id == line.store_id) {
                Some(group) => group.lines.push(line.clone()),
                None => groups.push(CartStoreGroup {
                    store_id: line.store_id,
                    store_name: line.store_name.clone(),
                    lines: vec![line.clone()],
                }),
            }
        }
        groups
    }

    /// Mutations keep the in-memory cart regardless of storage health; a
    /// failed write is logged and retried on the next mutation.
    fn persist(&self) {
        // Serializing Vec<CartLine> cannot fail; all field types emit plain
        // JSON values.
        let bytes = serde_json::to_vec(&self.lines).unwrap_or_default();
        if let Err(e) = self.storage.save(CART_STORAGE_KEY, &bytes) {
            tracing::warn!("Failed to persist cart: {}", e);
        }
    }
}
