/// Why a domain operation rejected its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Reason {
    #[error("account number cannot be negative")]
    NegativeAccountId,

    #[error("account owner is missing")]
    MissingOwner,

    #[error("person {0} is missing")]
    MissingPersonField(&'static str),

    #[error("initial balance cannot be below the overdraft limit")]
    InitialBalanceBelowOverdraft,

    #[error("overdraft limit cannot be negative")]
    NegativeOverdraftLimit,

    #[error("debit limit cannot be negative")]
    NegativeDebitLimit,

    #[error("overdraft limit cannot be lower than the current overdraft")]
    OverdraftLimitBelowCurrentOverdraft,

    #[error("credited amount must be positive")]
    NonPositiveCredit,

    #[error("debited amount must be positive")]
    NonPositiveDebit,

    #[error("amount exceeds the debit limit")]
    DebitLimitExceeded,

    #[error("balance cannot go below the overdraft limit")]
    OverdraftLimitExceeded,

    #[error("destination account is missing")]
    MissingDestination,

    #[error("resulting balance is out of range")]
    AmountOutOfRange,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] Reason),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Engine failed with: {0}")]
    Engine(String),
}

impl Error {
    /// The validation reason, when this is a domain rejection.
    pub fn reason(&self) -> Option<Reason> {
        match self {
            Error::InvalidArgument(reason) => Some(*reason),
            _ => None,
        }
    }
}
