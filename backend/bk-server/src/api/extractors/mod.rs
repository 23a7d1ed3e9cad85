pub mod bearer_account;
