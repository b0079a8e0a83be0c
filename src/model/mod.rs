//! Plain domain types. The kitchen and tables are owned by actors; everything else is
//! a value type moved or cloned between them.

pub mod bill;
pub mod ids;
pub mod ingredient;
pub mod inventory;
pub mod kitchen;
pub mod menu;
pub mod order;
pub mod ordered_dish;
pub mod table;

pub use bill::*;
pub use ids::*;
pub use ingredient::*;
pub use inventory::*;
pub use kitchen::*;
pub use menu::*;
pub use order::*;
pub use ordered_dish::*;
pub use table::*;
