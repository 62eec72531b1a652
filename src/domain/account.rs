use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Amount, Error, Person, error::Reason};

pub const DEFAULT_OVERDRAFT_LIMIT: Amount = dec!(800);
pub const DEFAULT_DEBIT_LIMIT: Amount = dec!(1000);

/// A bank account with an overdraft ceiling and a per-operation debit ceiling.
///
/// The balance never drops below `-overdraft_limit`, and both limits stay
/// non-negative. Every mutation is validated before the state changes, so a
/// rejected operation leaves the account untouched.
#[derive(Debug, Clone)]
pub struct Account {
    id: u64,
    owner: Arc<Person>,
    balance: Amount,
    overdraft_limit: Amount, // magnitude the balance may go below zero
    debit_limit: Amount,     // largest amount a single debit may remove
}

impl Account {
    /// Opens an empty account with the default limits.
    pub fn new(id: i64, owner: Arc<Person>) -> Result<Self, Error> {
        Self::with_deposit(id, owner, Decimal::ZERO)
    }

    /// Opens an account holding `initial_deposit`, with the default limits.
    pub fn with_deposit(
        id: i64,
        owner: Arc<Person>,
        initial_deposit: Amount,
    ) -> Result<Self, Error> {
        Self::with_limits(
            id,
            owner,
            initial_deposit,
            DEFAULT_OVERDRAFT_LIMIT,
            DEFAULT_DEBIT_LIMIT,
        )
    }

    pub fn with_limits(
        id: i64,
        owner: Arc<Person>,
        initial_balance: Amount,
        overdraft_limit: Amount,
        debit_limit: Amount,
    ) -> Result<Self, Error> {
        let id = u64::try_from(id).map_err(|_| Reason::NegativeAccountId)?;

        if initial_balance < -overdraft_limit {
            return Err(Reason::InitialBalanceBelowOverdraft.into());
        }
        if overdraft_limit < Decimal::ZERO {
            return Err(Reason::NegativeOverdraftLimit.into());
        }
        if debit_limit < Decimal::ZERO {
            return Err(Reason::NegativeDebitLimit.into());
        }

        Ok(Self {
            id,
            owner,
            balance: initial_balance,
            overdraft_limit,
            debit_limit,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn owner(&self) -> &Arc<Person> {
        &self.owner
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn overdraft_limit(&self) -> Amount {
        self.overdraft_limit
    }

    pub fn debit_limit(&self) -> Amount {
        self.debit_limit
    }

    /// How far below zero the balance currently is, or zero.
    pub fn overdraft_amount(&self) -> Amount {
        if self.balance < Decimal::ZERO {
            -self.balance
        } else {
            Decimal::ZERO
        }
    }

    pub fn is_overdrawn(&self) -> bool {
        self.balance < Decimal::ZERO
    }

    /// The largest debit that would currently pass both limits.
    ///
    /// Not clamped at zero: an account sitting below its overdraft limit
    /// reports a negative value. The headroom saturates at `Decimal::MAX`,
    /// where the debit limit is always the tighter bound.
    pub fn allowed_debit(&self) -> Amount {
        self.debit_limit
            .min(self.balance.saturating_add(self.overdraft_limit))
    }

    pub fn set_overdraft_limit(&mut self, limit: Amount) -> Result<(), Error> {
        if limit < Decimal::ZERO {
            return Err(Reason::NegativeOverdraftLimit.into());
        }
        if limit < self.overdraft_amount() {
            return Err(Reason::OverdraftLimitBelowCurrentOverdraft.into());
        }

        self.overdraft_limit = limit;
        Ok(())
    }

    pub fn set_debit_limit(&mut self, limit: Amount) -> Result<(), Error> {
        if limit < Decimal::ZERO {
            return Err(Reason::NegativeDebitLimit.into());
        }

        self.debit_limit = limit;
        Ok(())
    }

    pub fn credit(&mut self, amount: Amount) -> Result<(), Error> {
        if amount <= Decimal::ZERO {
            return Err(Reason::NonPositiveCredit.into());
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(Reason::AmountOutOfRange)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: Amount) -> Result<(), Error> {
        if amount <= Decimal::ZERO {
            return Err(Reason::NonPositiveDebit.into());
        }
        if amount > self.debit_limit {
            return Err(Reason::DebitLimitExceeded.into());
        }
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or(Reason::AmountOutOfRange)?;
        if balance < -self.overdraft_limit {
            return Err(Reason::OverdraftLimitExceeded.into());
        }

        self.balance = balance;
        Ok(())
    }

    /// Debits this account then credits `destination`.
    ///
    /// A failed debit stops the transfer before the destination is touched;
    /// a failed credit restores this account's balance.
    pub fn transfer(&mut self, amount: Amount, destination: &mut Account) -> Result<(), Error> {
        let balance = self.balance;
        self.debit(amount)?;
        if let Err(e) = destination.credit(amount) {
            self.balance = balance;
            return Err(e);
        }
        Ok(())
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Account{{id={}, owner={}, balance={}, overdraft={}}}",
            self.id,
            self.owner,
            self.balance,
            self.overdraft_amount()
        )
    }
}
