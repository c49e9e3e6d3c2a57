//! Canned data served in demo mode.

use chrono::{Duration, SecondsFormat, Utc};

use crate::models::{
    Address, AutoSaveConfig, BankAccount, Faq, KycStatus, KycVerifyResponse, LockReceipt,
    LoginResponse, OperationReceipt, OtpVerifyResponse, SaveFrequency, SavingsGoal, Transaction,
    TransactionStatus, TransactionType, User, UserProfile, WalletBalance,
};

pub const DEMO_BALANCE: f64 = 25000.0;

/// Identifier with a time-based suffix, e.g. `TXN1767225600000`.
pub fn generated_id(prefix: &str) -> String {
    format!("{}{}", prefix, Utc::now().timestamp_millis())
}

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn login() -> LoginResponse {
    LoginResponse {
        success: true,
        message: "OTP sent successfully (demo)".to_string(),
        session_id: Some("demo-session-id".to_string()),
    }
}

pub fn otp_verification(phone: &str) -> OtpVerifyResponse {
    OtpVerifyResponse {
        success: true,
        token: "demo-jwt-token".to_string(),
        refresh_token: "demo-refresh-token".to_string(),
        user: User {
            id: "demo-user-id".to_string(),
            phone: phone.to_string(),
            name: Some("Rahul Kumar".to_string()),
            email: Some("rahul@example.com".to_string()),
        },
        kyc_status: KycStatus::default(),
    }
}

pub fn kyc_verified(document: &str) -> KycVerifyResponse {
    KycVerifyResponse {
        success: true,
        message: format!("{} verified successfully (demo)", document),
        verified: true,
    }
}

pub fn balance() -> WalletBalance {
    WalletBalance {
        last_updated: Some(days_ago(0)),
        ..WalletBalance::new(DEMO_BALANCE)
    }
}

pub fn receipt(message: &str) -> OperationReceipt {
    OperationReceipt {
        success: true,
        message: format!("{} (demo)", message),
        transaction_id: Some(generated_id("TXN")),
    }
}

pub fn transactions() -> Vec<Transaction> {
    let txn = |id: &str,
               kind: TransactionType,
               amount: f64,
               description: &str,
               category: &str,
               days: i64| Transaction {
        id: id.to_string(),
        kind,
        amount,
        description: description.to_string(),
        category: category.to_string(),
        date: days_ago(days),
        status: TransactionStatus::Completed,
        balance: None,
    };
    vec![
        txn("1", TransactionType::Credit, 5000.0, "Added to wallet", "Add Money", 0),
        txn("2", TransactionType::Debit, 1200.0, "Grocery Shopping", "Shopping", 1),
        txn("3", TransactionType::Credit, 3000.0, "Salary Credit", "Income", 2),
        txn("4", TransactionType::Debit, 500.0, "Mobile Recharge", "Bills", 3),
    ]
}

pub fn goals() -> Vec<SavingsGoal> {
    vec![
        SavingsGoal {
            id: "1".to_string(),
            name: "New Laptop".to_string(),
            target_amount: 80000.0,
            current_amount: 45000.0,
            target_date: "2026-03-31".to_string(),
            emoji: "💻".to_string(),
        },
        SavingsGoal {
            id: "2".to_string(),
            name: "Vacation".to_string(),
            target_amount: 50000.0,
            current_amount: 18000.0,
            target_date: "2026-06-30".to_string(),
            emoji: "✈️".to_string(),
        },
    ]
}

pub fn lock_receipt() -> LockReceipt {
    LockReceipt {
        success: true,
        message: "Savings locked successfully (demo)".to_string(),
        lock_id: Some(generated_id("LOCK")),
    }
}

pub fn auto_save() -> AutoSaveConfig {
    AutoSaveConfig {
        enabled: false,
        frequency: SaveFrequency::Daily,
        amount: 100.0,
        day_of_week: None,
        day_of_month: None,
    }
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: "demo-user-id".to_string(),
        name: "Rahul Kumar".to_string(),
        email: "rahul@example.com".to_string(),
        phone: "+91 9876543210".to_string(),
        date_of_birth: Some("1995-05-15".to_string()),
        address: Some(Address {
            street: "123 Main Street".to_string(),
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            pincode: "400001".to_string(),
        }),
        kyc_status: KycStatus {
            pan: true,
            aadhaar: true,
        },
    }
}

pub fn bank_accounts() -> Vec<BankAccount> {
    vec![BankAccount {
        id: "1".to_string(),
        account_number: "****1234".to_string(),
        ifsc_code: "HDFC0001234".to_string(),
        account_holder_name: "Rahul Kumar".to_string(),
        bank_name: "HDFC Bank".to_string(),
        branch: Some("Mumbai Branch".to_string()),
        is_primary: true,
    }]
}

pub fn faqs() -> Vec<Faq> {
    let faq = |id: &str, category: &str, question: &str, answer: &str| Faq {
        id: id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
        category: category.to_string(),
    };
    vec![
        faq(
            "1",
            "Wallet",
            "How do I add money to my wallet?",
            "You can add money using UPI, Net Banking, Debit Card or Credit Card from the Add Money screen.",
        ),
        faq(
            "2",
            "Wallet",
            "How long does it take to withdraw money?",
            "Withdrawals are usually processed within 1-3 business days, depending on your bank.",
        ),
        faq(
            "3",
            "KYC",
            "What documents are required for KYC verification?",
            "Your PAN card and Aadhaar card. Verification usually completes within 24 hours.",
        ),
        faq(
            "4",
            "Savings",
            "How does auto-save work?",
            "Auto-save moves a fixed amount from your wallet to your savings goals daily, weekly or monthly.",
        ),
        faq(
            "5",
            "Savings",
            "Can I withdraw locked savings before the lock period ends?",
            "No. Locked savings stay locked until the period ends, in exchange for a higher interest rate.",
        ),
    ]
}

pub fn now() -> String {
    days_ago(0)
}
