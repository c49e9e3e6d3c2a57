//! Data models for savewise entities.
//!
//! This module contains the request and response types exchanged with the
//! backend:
//!
//! - Auth and KYC: `User`, `KycStatus`, `LoginResponse`, `OtpVerifyResponse`
//! - Wallet: `WalletBalance`, `Transaction`, `AddMoneyRequest`, `WithdrawRequest`
//! - Savings: `SavingsGoal`, `AutoSaveConfig`, `LockSavingsRequest`
//! - Profile: `UserProfile`, `BankAccount`
//! - Support: `Faq`, `SupportTicket`, `CreateTicketRequest`

pub mod auth;
pub mod profile;
pub mod savings;
pub mod support;
pub mod wallet;

pub use auth::{KycStatus, KycVerifyResponse, LoginResponse, OtpVerifyResponse, User};
pub use profile::{Address, BankAccount, NewBankAccount, ProfileUpdate, UserProfile};
pub use savings::{
    AutoSaveConfig, GoalUpdate, LockReceipt, LockSavingsRequest, NewSavingsGoal, SaveFrequency,
    SavingsGoal,
};
pub use support::{CreateTicketRequest, Faq, SupportTicket, TicketPriority, TicketStatus};
pub use wallet::{
    AddMoneyRequest, CardDetails, OperationReceipt, Transaction, TransactionFilter,
    TransactionStatus, TransactionType, WalletBalance, WithdrawRequest,
};
