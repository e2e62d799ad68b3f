//! Client-level managers, one per entity kind.
//!
//! Each manager shares its cache with the [`crate::Dashactyl`] facade and
//! issues its calls through the shared [`crate::transport::Rest`] handle.

pub mod coupons;
pub mod servers;
pub mod store;
pub mod users;

pub use coupons::CouponManager;
pub use servers::ServerManager;
pub use store::StoreManager;
pub use users::{NewUser, UserManager};
