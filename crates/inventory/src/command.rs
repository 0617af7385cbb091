use stockroom_products::Product;

const ADD_PRODUCT: &str = "inventory.product.add";
const ADJUST_QUANTITY: &str = "inventory.product.adjust_quantity";
const REMOVE_PRODUCT: &str = "inventory.product.remove";

/// Command: AddProduct.
#[derive(Debug, Clone, PartialEq)]
pub struct AddProduct {
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

/// Command: AdjustQuantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustQuantity {
    pub index: usize,
    pub delta: i64,
}

/// Command: RemoveProduct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveProduct {
    pub index: usize,
}

/// The mutating operations a [`crate::ProductStore`] accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryCommand {
    AddProduct(AddProduct),
    AdjustQuantity(AdjustQuantity),
    RemoveProduct(RemoveProduct),
}

impl InventoryCommand {
    /// Stable name used as the `command` field in logs.
    pub fn command_type(&self) -> &'static str {
        match self {
            InventoryCommand::AddProduct(_) => ADD_PRODUCT,
            InventoryCommand::AdjustQuantity(_) => ADJUST_QUANTITY,
            InventoryCommand::RemoveProduct(_) => REMOVE_PRODUCT,
        }
    }
}

/// What a successfully handled command did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A product was appended at `index`.
    Added { index: usize },
    /// The product at `index` now has `quantity` on hand.
    Adjusted { index: usize, quantity: i64 },
    /// `product` was removed from `index`; later rows moved up by one.
    Removed { index: usize, product: Product },
}
