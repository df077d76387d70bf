//! Who may create an account, and with which role.
//!
//! Every function here is pure; callers gather the inputs from the store
//! and the license service.

use linkhub_core::error::AppError;
use linkhub_entity::user::UserRole;

/// Accounts a deployment may hold without the `UNLIMITED_ACCOUNTS` feature.
pub const FREE_PLAN_MAX_ACCOUNTS: u64 = 5;

/// Why a signup was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupDenial {
    /// The workspace turned signup off.
    Disabled,
    /// The unlicensed account quota is used up.
    UserLimitReached,
}

impl SignupDenial {
    /// Caller-facing reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Disabled => "signup disabled",
            Self::UserLimitReached => "maximum number of users reached",
        }
    }

    /// Convert into the error returned to the caller.
    pub fn into_error(self) -> AppError {
        match self {
            Self::Disabled => AppError::forbidden(self.reason()),
            Self::UserLimitReached => AppError::bad_request(self.reason()),
        }
    }
}

/// Outcome of a signup policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupDecision {
    /// The account may be created.
    Allow,
    /// The account must not be created.
    Deny(SignupDenial),
}

impl SignupDecision {
    /// Returns `true` for [`SignupDecision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// `Ok(())` on allow, the denial's error otherwise.
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(denial) => Err(denial.into_error()),
        }
    }
}

/// Checks the workspace signup toggle. An unset toggle allows signup.
pub fn check_signup_enabled(signup_enabled: Option<bool>) -> SignupDecision {
    match signup_enabled {
        Some(false) => SignupDecision::Deny(SignupDenial::Disabled),
        _ => SignupDecision::Allow,
    }
}

/// Checks the account quota that applies without an unlimited license.
pub fn check_account_quota(current_user_count: u64, unlimited_accounts: bool) -> SignupDecision {
    if !unlimited_accounts && current_user_count >= FREE_PLAN_MAX_ACCOUNTS {
        SignupDecision::Deny(SignupDenial::UserLimitReached)
    } else {
        SignupDecision::Allow
    }
}

/// Full signup decision: the toggle first, then the quota.
pub fn can_sign_up(
    signup_enabled: Option<bool>,
    current_user_count: u64,
    unlimited_accounts: bool,
) -> SignupDecision {
    match check_signup_enabled(signup_enabled) {
        SignupDecision::Allow => check_account_quota(current_user_count, unlimited_accounts),
        denied => denied,
    }
}

/// The first account of a deployment becomes its admin.
pub fn role_for_new_account(current_user_count: u64) -> UserRole {
    if current_user_count == 0 {
        UserRole::Admin
    } else {
        UserRole::User
    }
}
