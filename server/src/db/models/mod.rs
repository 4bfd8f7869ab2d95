//! Database models
//!
//! One module per collection, each with the stored struct plus its
//! Create/Update request payloads.

pub mod menu_item;
pub mod order;
pub mod otp;
pub mod outlet;
pub mod rating;
pub mod serde_helpers;
pub mod user;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
pub use order::{CustomerDetails, Order, OrderId};
pub use otp::OtpRecord;
pub use outlet::{Outlet, OutletCreate, OutletId, OutletPublic, OutletUpdate};
pub use rating::{Rating, RatingCreate, RatingSummary};
pub use user::{User, UserCreate, UserId};

use validator::ValidationError;

/// Phone numbers are plain 10-digit strings
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("phone must be 10 digits".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_validation() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("98765").is_err());
        assert!(validate_phone("98765432100").is_err());
        assert!(validate_phone("98765abcde").is_err());
    }
}
