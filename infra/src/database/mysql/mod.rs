//! MySQL repository implementations

mod booking_repository_impl;
mod item_repository_impl;
pub(crate) mod rows;
mod user_repository_impl;

pub use booking_repository_impl::MySqlBookingRepository;
pub use item_repository_impl::MySqlItemRepository;
pub use user_repository_impl::MySqlUserRepository;
