//! Per-user ledger account.

use serde::Serialize;

/// A user's running balance.
///
/// Debits (money paid by the user) increase the balance; credits decrease it.
/// Autopay records create the account but never touch the balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserAccount {
    /// Signed 64-bit user identifier.
    pub user_id: i64,

    /// Sum of debits minus sum of credits, in stream order.
    pub balance: f64,
}

impl UserAccount {
    /// Creates an account with a zero balance.
    pub fn new(user_id: i64) -> Self {
        UserAccount {
            user_id,
            balance: 0.0,
        }
    }

    /// Records a debit against the account.
    pub fn debit(&mut self, amount: f64) {
        self.balance += amount;
    }

    /// Records a credit against the account.
    pub fn credit(&mut self, amount: f64) {
        self.balance -= amount;
    }
}
