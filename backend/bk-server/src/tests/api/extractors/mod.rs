mod bearer_account;
