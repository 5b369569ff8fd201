pub mod dashboard;
pub mod order;
pub mod product;
pub mod timestamp;
pub mod user;

pub use dashboard::{DashboardSummary, TopProduct};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem, OrderListEntry, OrderStatus, OrderWithItems};
pub use product::{NewProduct, Product};
pub use user::{NewUser, Role, User};
