use crate::domain::{Amount, Person};

#[derive(Debug, Clone, PartialEq)]
pub enum OperationKind {
    Open {
        owner: Person,
        initial_balance: Option<Amount>,
        overdraft_limit: Option<Amount>,
        debit_limit: Option<Amount>,
    },
    Credit { amount: Amount },
    Debit { amount: Amount },
    Transfer { amount: Amount, target: i64 },
    SetOverdraftLimit { limit: Amount },
    SetDebitLimit { limit: Amount },
}

/// One step of a replay script, applied to `account`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub account: i64,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.kind {
            OperationKind::Open { owner, .. } => {
                write!(f, "open,account={},owner={}", self.account, owner)
            }
            OperationKind::Credit { amount } => {
                write!(f, "credit,account={},amount={}", self.account, amount)
            }
            OperationKind::Debit { amount } => {
                write!(f, "debit,account={},amount={}", self.account, amount)
            }
            OperationKind::Transfer { amount, target } => write!(
                f,
                "transfer,account={},amount={},target={}",
                self.account, amount, target
            ),
            OperationKind::SetOverdraftLimit { limit } => {
                write!(f, "set_overdraft_limit,account={},limit={}", self.account, limit)
            }
            OperationKind::SetDebitLimit { limit } => {
                write!(f, "set_debit_limit,account={},limit={}", self.account, limit)
            }
        }
    }
}
