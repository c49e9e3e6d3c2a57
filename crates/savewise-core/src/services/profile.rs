use super::{demo, Services};
use crate::api::ApiResult;
use crate::endpoints;
use crate::models::profile::BankAccountsResponse;
use crate::models::{BankAccount, NewBankAccount, ProfileUpdate, UserProfile};

impl Services {
    pub async fn profile(&self) -> ApiResult<UserProfile> {
        let result = self.client.get(endpoints::profile::PROFILE).await;
        self.or_demo("profile", result, demo::profile)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        self.client.put(endpoints::profile::PROFILE, update).await
    }

    pub async fn bank_accounts(&self) -> ApiResult<Vec<BankAccount>> {
        let result = self
            .client
            .get::<BankAccountsResponse>(endpoints::profile::BANK_DETAILS)
            .await
            .map(|r| r.accounts);
        self.or_demo("bank_accounts", result, demo::bank_accounts)
    }

    pub async fn add_bank_account(&self, account: &NewBankAccount) -> ApiResult<BankAccount> {
        let result = self
            .client
            .post(endpoints::profile::BANK_DETAILS, account)
            .await;
        self.or_demo("add_bank_account", result, || {
            account.clone().into_account(demo::generated_id("bank-"))
        })
    }
}
