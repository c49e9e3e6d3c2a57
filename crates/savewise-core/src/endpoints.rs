//! Backend endpoint paths, relative to the configured base URL.

pub mod auth {
    pub const LOGIN: &str = "/auth/login";
    pub const VERIFY_OTP: &str = "/auth/verify-otp";
    pub const LOGOUT: &str = "/auth/logout";
    pub const REFRESH_TOKEN: &str = "/auth/refresh-token";
}

pub mod kyc {
    pub const VERIFY_PAN: &str = "/kyc/verify-pan";
    pub const VERIFY_AADHAAR: &str = "/kyc/verify-aadhaar";
    pub const STATUS: &str = "/kyc/status";
}

pub mod wallet {
    pub const BALANCE: &str = "/wallet/balance";
    pub const ADD_MONEY: &str = "/wallet/add-money";
    pub const WITHDRAW: &str = "/wallet/withdraw";
    pub const TRANSACTIONS: &str = "/wallet/transactions";
}

pub mod savings {
    pub const GOALS: &str = "/savings/goals";
    pub const GOAL: &str = "/savings/goals/:id";
    pub const GOAL_ADD: &str = "/savings/goals/:id/add";
    pub const LOCK: &str = "/savings/lock";
    pub const AUTO_SAVE: &str = "/savings/auto-save";
}

pub mod profile {
    pub const PROFILE: &str = "/profile";
    pub const BANK_DETAILS: &str = "/profile/bank-details";
}

pub mod support {
    pub const FAQ: &str = "/support/faq";
    pub const TICKET: &str = "/support/ticket";
    pub const TICKETS: &str = "/support/tickets";
}

/// Substitute the `:id` placeholder, percent-encoding anything outside the
/// URL-safe unreserved set.
pub fn with_id(template: &str, id: &str) -> String {
    template.replace(":id", &urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_id() {
        assert_eq!(with_id(savings::GOAL, "goal-17"), "/savings/goals/goal-17");
        assert_eq!(with_id(savings::GOAL_ADD, "42"), "/savings/goals/42/add");
    }

    #[test]
    fn test_with_id_encodes_unsafe_characters() {
        assert_eq!(with_id(savings::GOAL, "a/b c"), "/savings/goals/a%2Fb%20c");
        assert_eq!(with_id(savings::GOAL, "é"), "/savings/goals/%C3%A9");
        assert_eq!(with_id(savings::GOAL, "a.b_c~d"), "/savings/goals/a.b_c~d");
    }
}
