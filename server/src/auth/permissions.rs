//! Role checks
//!
//! Three roles exist: customers, outlet staff, and the single master admin
//! (an outlet account whose email matches the configured master admin
//! address). The role lives inside the validated token, never in a request
//! header.

use std::str::FromStr;

use crate::AppError;
use crate::auth::CurrentUser;

/// Account role carried in the JWT role claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Outlet,
    MasterAdmin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Outlet => "outlet",
            Role::MasterAdmin => "master_admin",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "outlet" => Ok(Role::Outlet),
            "master_admin" => Ok(Role::MasterAdmin),
            _ => Err(()),
        }
    }
}

impl CurrentUser {
    /// Only the master admin may pass
    pub fn ensure_master_admin(&self) -> Result<(), AppError> {
        if self.is_master_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Master admin access required"))
        }
    }

    /// Outlet staff acting on their own outlet, or the master admin
    pub fn ensure_outlet(&self, outlet_id: &str) -> Result<(), AppError> {
        match self.role {
            Role::MasterAdmin => Ok(()),
            Role::Outlet if self.id == outlet_id => Ok(()),
            Role::Outlet => Err(AppError::forbidden("Not your outlet")),
            Role::Customer => Err(AppError::forbidden("Outlet access required")),
        }
    }

    /// A customer acting on their own account, or the master admin
    pub fn ensure_customer(&self, user_id: &str) -> Result<(), AppError> {
        match self.role {
            Role::MasterAdmin => Ok(()),
            Role::Customer if self.id == user_id => Ok(()),
            _ => Err(AppError::forbidden("Not your account")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, id: &str) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            email: "x@y.com".to_string(),
            name: "X".to_string(),
            role,
        }
    }

    #[test]
    fn master_admin_passes_everything() {
        let admin = user(Role::MasterAdmin, "outlet:admin");
        assert!(admin.ensure_master_admin().is_ok());
        assert!(admin.ensure_outlet("outlet:other").is_ok());
        assert!(admin.ensure_customer("user:other").is_ok());
    }

    #[test]
    fn outlet_limited_to_own_id() {
        let staff = user(Role::Outlet, "outlet:a");
        assert!(staff.ensure_outlet("outlet:a").is_ok());
        assert!(staff.ensure_outlet("outlet:b").is_err());
        assert!(staff.ensure_master_admin().is_err());
        assert!(staff.ensure_customer("user:a").is_err());
    }

    #[test]
    fn customer_limited_to_own_id() {
        let customer = user(Role::Customer, "user:a");
        assert!(customer.ensure_customer("user:a").is_ok());
        assert!(customer.ensure_customer("user:b").is_err());
        assert!(customer.ensure_outlet("outlet:a").is_err());
    }

    #[test]
    fn role_round_trip() {
        for role in [Role::Customer, Role::Outlet, Role::MasterAdmin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("admin".parse::<Role>().is_err());
    }
}
