//! Command parsing and execution for the savewise CLI.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::{info, warn};

use savewise_core::models::{
    AddMoneyRequest, CreateTicketRequest, LockSavingsRequest, TransactionFilter, TransactionType,
    WithdrawRequest,
};
use savewise_core::{Config, Services, SessionEvent};

use crate::utils::{format_amount, format_date, format_phone, truncate_string};

/// Width of the description column in transaction listings
const DESCRIPTION_WIDTH: usize = 28;

pub const USAGE: &str = "\
Usage: savewise <command> [args]

Session:
  login <phone>                          Send an OTP and sign in
  logout                                 Sign out and forget credentials
  whoami                                 Show the signed-in user

Identity verification:
  kyc                                    Show KYC status
  kyc pan <PAN> <name>                   Verify PAN card
  kyc aadhaar <number>                   Verify Aadhaar (prompts for OTP)

Wallet:
  balance                                Show wallet balance
  add-money <amount> <method>            Add money (method: upi, card, netbanking)
  withdraw <amount> <bank-account-id>    Withdraw to a bank account
  transactions [credit|debit]            Transaction history
  dashboard                              Balance, recent transactions and goals

Savings:
  goals                                  List savings goals
  goal-add <goal-id> <amount>            Move money into a goal
  lock <amount> <months>                 Lock savings for a fixed term
  auto-save                              Show auto-save settings

Profile and help:
  profile                                Show profile
  banks                                  List bank accounts
  faq [category]                         Frequently asked questions
  tickets                                List support tickets
  ticket <subject> <description> <category>
                                         Open a support ticket
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { phone: String },
    Logout,
    WhoAmI,
    KycStatus,
    VerifyPan { pan: String, name: String },
    VerifyAadhaar { number: String },
    Balance,
    AddMoney { amount: f64, method: String },
    Withdraw { amount: f64, bank_account_id: String },
    Transactions { kind: Option<TransactionType> },
    Dashboard,
    Goals,
    GoalAdd { goal_id: String, amount: f64 },
    Lock { amount: f64, months: u32 },
    AutoSave,
    Profile,
    Banks,
    Faq { category: Option<String> },
    Tickets,
    Ticket { subject: String, description: String, category: String },
    Help,
}

fn parse_amount(value: &str) -> Result<f64> {
    let amount: f64 = value
        .trim()
        .trim_start_matches('₹')
        .replace(',', "")
        .parse()
        .with_context(|| format!("Invalid amount '{}'", value))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(anyhow::anyhow!("Amount must be greater than zero"));
    }
    Ok(amount)
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing argument <{}>\n\n{}", name, USAGE))
}

impl Command {
    /// Parse command-line arguments (without the program name).
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some(name) = args.first() else {
            return Ok(Command::Help);
        };

        let command = match name.as_str() {
            "login" => Command::Login {
                phone: arg(args, 1, "phone")?.to_string(),
            },
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "kyc" => match args.get(1).map(String::as_str) {
                None => Command::KycStatus,
                Some("pan") => Command::VerifyPan {
                    pan: arg(args, 2, "PAN")?.to_uppercase(),
                    name: args[3..].join(" "),
                },
                Some("aadhaar") => Command::VerifyAadhaar {
                    number: arg(args, 2, "number")?.replace(' ', ""),
                },
                Some(other) => return Err(anyhow::anyhow!("Unknown kyc command '{}'", other)),
            },
            "balance" => Command::Balance,
            "add-money" => Command::AddMoney {
                amount: parse_amount(arg(args, 1, "amount")?)?,
                method: arg(args, 2, "method")?.to_string(),
            },
            "withdraw" => Command::Withdraw {
                amount: parse_amount(arg(args, 1, "amount")?)?,
                bank_account_id: arg(args, 2, "bank-account-id")?.to_string(),
            },
            "transactions" => Command::Transactions {
                kind: match args.get(1) {
                    Some(kind) => Some(kind.parse().map_err(anyhow::Error::msg)?),
                    None => None,
                },
            },
            "dashboard" => Command::Dashboard,
            "goals" => Command::Goals,
            "goal-add" => Command::GoalAdd {
                goal_id: arg(args, 1, "goal-id")?.to_string(),
                amount: parse_amount(arg(args, 2, "amount")?)?,
            },
            "lock" => Command::Lock {
                amount: parse_amount(arg(args, 1, "amount")?)?,
                months: arg(args, 2, "months")?
                    .parse()
                    .context("Lock period must be a whole number of months")?,
            },
            "auto-save" => Command::AutoSave,
            "profile" => Command::Profile,
            "banks" => Command::Banks,
            "faq" => Command::Faq {
                category: args.get(1).cloned(),
            },
            "tickets" => Command::Tickets,
            "ticket" => Command::Ticket {
                subject: arg(args, 1, "subject")?.to_string(),
                description: arg(args, 2, "description")?.to_string(),
                category: arg(args, 3, "category")?.to_string(),
            },
            "help" | "-h" | "--help" => Command::Help,
            other => return Err(anyhow::anyhow!("Unknown command '{}'\n\n{}", other, USAGE)),
        };

        if let Command::VerifyPan { ref name, .. } = command {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Missing argument <name>\n\n{}", USAGE));
            }
        }
        Ok(command)
    }

    /// Commands that only make sense with a stored session.
    fn requires_session(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. } | Command::Logout | Command::Help | Command::Faq { .. }
        )
    }
}

pub struct App {
    services: Services,
    config: Config,
}

impl App {
    pub fn new(services: Services, config: Config) -> Self {
        Self { services, config }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.services.client().subscribe()
    }

    pub async fn run(&mut self, command: Command) -> Result<()> {
        if command.requires_session() && !self.services.is_authenticated() {
            return Err(anyhow::anyhow!(
                "Not signed in. Run `savewise login <phone>` first."
            ));
        }

        match command {
            Command::Help => print!("{}", USAGE),
            Command::Login { phone } => self.login(&phone).await?,
            Command::Logout => {
                self.services.logout().await?;
                println!("Signed out.");
            }
            Command::WhoAmI => self.whoami(),
            Command::KycStatus => {
                let status = self.services.kyc_status().await;
                println!("PAN:     {}", if status.pan { "verified" } else { "pending" });
                println!("Aadhaar: {}", if status.aadhaar { "verified" } else { "pending" });
            }
            Command::VerifyPan { pan, name } => {
                let response = self.services.verify_pan(&pan, &name).await?;
                println!("{}", response.message);
            }
            Command::VerifyAadhaar { number } => {
                let otp = rpassword::prompt_password("Aadhaar OTP (leave blank to skip): ")?;
                let otp = Some(otp.trim()).filter(|o| !o.is_empty());
                let response = self.services.verify_aadhaar(&number, otp).await?;
                println!("{}", response.message);
            }
            Command::Balance => {
                let balance = self.services.balance().await?;
                println!("Wallet balance: {}", format_amount(balance.balance));
            }
            Command::AddMoney { amount, method } => {
                let request = AddMoneyRequest {
                    amount,
                    payment_method: method,
                    upi_id: None,
                    card_details: None,
                };
                let receipt = self.services.add_money(&request).await?;
                println!("{}", receipt.message);
                if let Some(id) = receipt.transaction_id {
                    println!("Transaction: {}", id);
                }
            }
            Command::Withdraw {
                amount,
                bank_account_id,
            } => {
                let receipt = self
                    .services
                    .withdraw(&WithdrawRequest {
                        amount,
                        bank_account_id,
                    })
                    .await?;
                println!("{}", receipt.message);
            }
            Command::Transactions { kind } => {
                let filter = TransactionFilter {
                    kind,
                    ..Default::default()
                };
                let transactions = self.services.transactions(&filter).await?;
                print_transactions(&transactions);
            }
            Command::Dashboard => self.dashboard().await?,
            Command::Goals => {
                let goals = self.services.goals().await?;
                print_goals(&goals);
            }
            Command::GoalAdd { goal_id, amount } => {
                self.services.add_to_goal(&goal_id, amount).await?;
                println!("Added {} to goal {}.", format_amount(amount), goal_id);
            }
            Command::Lock { amount, months } => {
                let receipt = self
                    .services
                    .lock_savings(&LockSavingsRequest {
                        amount,
                        lock_period: months.to_string(),
                        reason: None,
                    })
                    .await?;
                println!("{}", receipt.message);
            }
            Command::AutoSave => {
                let config = self.services.auto_save().await?;
                if config.enabled {
                    println!(
                        "Auto-save: {} {}",
                        config.frequency,
                        format_amount(config.amount)
                    );
                } else {
                    println!("Auto-save is off.");
                }
            }
            Command::Profile => {
                let profile = self.services.profile().await?;
                println!("{}", profile.name);
                println!("Phone:   {}", format_phone(&profile.phone));
                println!("Email:   {}", profile.email);
                if let Some(dob) = profile.date_of_birth {
                    println!("Born:    {}", format_date(&dob));
                }
                if let Some(address) = profile.address {
                    println!("Address: {}", address.formatted());
                }
            }
            Command::Banks => {
                for account in self.services.bank_accounts().await? {
                    let primary = if account.is_primary { " (primary)" } else { "" };
                    println!(
                        "{}  {}  {}  {}{}",
                        account.id,
                        account.bank_name,
                        account.masked_number(),
                        account.ifsc_code,
                        primary
                    );
                }
            }
            Command::Faq { category } => {
                for faq in self.services.faqs(category.as_deref()).await? {
                    println!("[{}] {}\n    {}\n", faq.category, faq.question, faq.answer);
                }
            }
            Command::Tickets => {
                let tickets = self.services.tickets().await?;
                if tickets.is_empty() {
                    println!("No support tickets.");
                }
                for ticket in tickets {
                    println!(
                        "{}  {:<12} {}  {}",
                        ticket.id,
                        ticket.status.to_string(),
                        format_date(&ticket.created_at),
                        ticket.subject
                    );
                }
            }
            Command::Ticket {
                subject,
                description,
                category,
            } => {
                let ticket = self
                    .services
                    .create_ticket(&CreateTicketRequest {
                        subject,
                        description,
                        category,
                        priority: None,
                    })
                    .await?;
                println!("Ticket {} opened.", ticket.id);
            }
        }
        Ok(())
    }

    async fn login(&mut self, phone: &str) -> Result<()> {
        let login = self.services.login_with_phone(phone).await?;
        if !login.success {
            return Err(anyhow::anyhow!("{}", login.message));
        }
        println!("OTP sent to {}", format_phone(phone));

        let otp = rpassword::prompt_password("OTP: ")?;
        let verified = self
            .services
            .verify_otp(phone, otp.trim(), login.session_id.as_deref())
            .await?;

        self.config.last_phone = Some(phone.to_string());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }

        println!("Welcome, {}!", verified.user.display_name());
        if !verified.kyc_status.is_complete() {
            println!("Complete KYC with `savewise kyc pan` and `savewise kyc aadhaar`.");
        }
        info!("Login complete");
        Ok(())
    }

    fn whoami(&self) {
        match self.services.current_user() {
            Some(user) => {
                println!("{}", user.display_name());
                println!("Phone: {}", format_phone(&user.phone));
                if let Some(email) = user.email {
                    println!("Email: {}", email);
                }
            }
            None => println!("Signed in (no cached profile)."),
        }
    }

    /// Fetch the home screen data concurrently.
    async fn dashboard(&self) -> Result<()> {
        let filter = TransactionFilter {
            limit: Some(5),
            ..Default::default()
        };
        let (balance, transactions, goals) = futures::join!(
            self.services.balance(),
            self.services.transactions(&filter),
            self.services.goals(),
        );

        println!("Wallet balance: {}\n", format_amount(balance?.balance));

        match transactions {
            Ok(transactions) => print_transactions(&transactions),
            Err(e) => println!("Transactions unavailable: {}", e),
        }
        println!();

        match goals {
            Ok(goals) => print_goals(&goals),
            Err(e) => println!("Goals unavailable: {}", e),
        }
        Ok(())
    }
}

fn print_transactions(transactions: &[savewise_core::models::Transaction]) {
    if transactions.is_empty() {
        println!("No transactions yet.");
        return;
    }
    for txn in transactions {
        println!(
            "{:<12} {:<width$} {:>14}  {}",
            format_date(&txn.date),
            truncate_string(&txn.description, DESCRIPTION_WIDTH),
            format_amount(txn.signed_amount()),
            txn.status,
            width = DESCRIPTION_WIDTH
        );
    }
}

fn print_goals(goals: &[savewise_core::models::SavingsGoal]) {
    if goals.is_empty() {
        println!("No savings goals yet.");
        return;
    }
    for goal in goals {
        println!(
            "{} {} ({}): {} of {}, {} to go by {}",
            goal.emoji,
            goal.name,
            goal.id,
            format_amount(goal.current_amount),
            format_amount(goal.target_amount),
            format_amount(goal.remaining()),
            format_date(&goal.target_date)
        );
    }
}

/// Flush stdout before blocking on input or exiting.
pub fn flush() {
    let _ = io::stdout().flush();
}
