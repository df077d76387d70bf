//! Account-provisioning rules.

pub mod signup;

pub use signup::{
    FREE_PLAN_MAX_ACCOUNTS, SignupDecision, SignupDenial, can_sign_up, check_account_quota,
    check_signup_enabled, role_for_new_account,
};
