mod account;
mod email;
mod login_attempt;
mod provider;
