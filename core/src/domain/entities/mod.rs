//! Domain entities representing core business objects.

pub mod booking;
pub mod item;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus};
pub use item::{Item, ItemCondition, PriceUnit};
pub use token::{Claims, RoleClaim, JWT_AUDIENCE, JWT_ISSUER};
pub use user::{Role, RoleSet, User};
