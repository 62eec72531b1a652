use futures::StreamExt;

use crate::domain::{
    Account, Amount, Error, Operation, OperationKind, Person, Reason,
    account::{DEFAULT_DEBIT_LIMIT, DEFAULT_OVERDRAFT_LIMIT},
    traits::{AccountRepository, DeadLetterQueue, OperationStream},
};

/// Replays a stream of operations against the accounts held by a repository.
#[derive(Debug)]
pub struct Engine<I, O, D>
where
    I: OperationStream,
    O: AccountRepository,
    D: DeadLetterQueue,
{
    ingestion: I,
    repository: O,
    dlq: D,
}

impl<I, O, D> Engine<I, O, D>
where
    I: OperationStream,
    O: AccountRepository,
    D: DeadLetterQueue,
{
    pub fn new(ingestion: I, repository: O, dlq: D) -> Self {
        Self {
            ingestion,
            repository,
            dlq,
        }
    }

    /// Applies every operation in order. Rejected operations are sent to the
    /// dead-letter queue and do not stop the replay.
    pub async fn process(&mut self) -> Result<(), Error> {
        let mut res = self.ingestion.stream();
        let (mut applied, mut rejected) = (0usize, 0usize);

        while let Some(op) = res.next().await {
            let outcome = op.and_then(|op| {
                tracing::debug!(%op, "applying operation");
                self.apply_operation(op)
            });
            match outcome {
                Ok(()) => applied += 1,
                Err(e) => {
                    rejected += 1;
                    self.dlq.report(&e);
                }
            }
        }

        tracing::info!(applied, rejected, "replay finished");
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.repository.flush()
    }

    fn apply_operation(&mut self, op: Operation) -> Result<(), Error> {
        match op.kind {
            OperationKind::Open {
                owner,
                initial_balance,
                overdraft_limit,
                debit_limit,
            } => self.open(
                op.account,
                owner,
                initial_balance,
                overdraft_limit,
                debit_limit,
            ),
            OperationKind::Credit { amount } => self.account(op.account)?.credit(amount),
            OperationKind::Debit { amount } => self.account(op.account)?.debit(amount),
            OperationKind::Transfer { amount, target } => {
                self.transfer(op.account, amount, target)
            }
            OperationKind::SetOverdraftLimit { limit } => {
                self.account(op.account)?.set_overdraft_limit(limit)
            }
            OperationKind::SetDebitLimit { limit } => {
                self.account(op.account)?.set_debit_limit(limit)
            }
        }
    }

    fn open(
        &mut self,
        account_id: i64,
        owner: Person,
        initial_balance: Option<Amount>,
        overdraft_limit: Option<Amount>,
        debit_limit: Option<Amount>,
    ) -> Result<(), Error> {
        let owner = self.repository.owner(owner);

        let account = match (initial_balance, overdraft_limit, debit_limit) {
            (None, None, None) => Account::new(account_id, owner)?,
            (Some(deposit), None, None) => Account::with_deposit(account_id, owner, deposit)?,
            (balance, overdraft, debit) => Account::with_limits(
                account_id,
                owner,
                balance.unwrap_or(Amount::ZERO),
                overdraft.unwrap_or(DEFAULT_OVERDRAFT_LIMIT),
                debit.unwrap_or(DEFAULT_DEBIT_LIMIT),
            )?,
        };

        self.repository.open(account)
    }

    fn account(&mut self, account_id: i64) -> Result<&mut Account, Error> {
        u64::try_from(account_id)
            .ok()
            .and_then(|id| self.repository.get_mut(id))
            .ok_or_else(|| Error::Engine(format!("Account {} not found", account_id)))
    }

    fn transfer(&mut self, source_id: i64, amount: Amount, target_id: i64) -> Result<(), Error> {
        if source_id == target_id {
            let account = self.account(source_id)?;
            account.debit(amount)?;
            return account.credit(amount);
        }

        let source_key = u64::try_from(source_id)
            .map_err(|_| Error::Engine(format!("Account {} not found", source_id)))?;
        let mut source = self
            .repository
            .take(source_key)
            .ok_or_else(|| Error::Engine(format!("Account {} not found", source_id)))?;

        let result = match u64::try_from(target_id)
            .ok()
            .and_then(|id| self.repository.get_mut(id))
        {
            Some(destination) => source.transfer(amount, destination),
            None => Err(Reason::MissingDestination.into()),
        };

        self.repository.restore(source);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output_repository::CsvOutput;
    use futures::stream::{self, Stream};
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use std::pin::Pin;

    struct VecStream(Option<Vec<Result<Operation, Error>>>);

    impl OperationStream for VecStream {
        type OpStream = Pin<Box<dyn Stream<Item = Result<Operation, Error>> + Send>>;

        fn stream(&mut self) -> Self::OpStream {
            Box::pin(stream::iter(self.0.take().unwrap_or_default()))
        }
    }

    #[derive(Default)]
    struct CollectingDLQ(RefCell<Vec<String>>);

    impl DeadLetterQueue for CollectingDLQ {
        fn report(&self, error: &Error) {
            self.0.borrow_mut().push(error.to_string());
        }
    }

    fn op(account: i64, kind: OperationKind) -> Result<Operation, Error> {
        Ok(Operation { kind, account })
    }

    fn open(account: i64, balance: Option<Amount>) -> Result<Operation, Error> {
        op(
            account,
            OperationKind::Open {
                owner: Person::new("Dupont", "Jean", "123 rue de la Paix"),
                initial_balance: balance,
                overdraft_limit: None,
                debit_limit: None,
            },
        )
    }

    async fn run(ops: Vec<Result<Operation, Error>>) -> TestEngine {
        let mut engine = Engine::new(
            VecStream(Some(ops)),
            CsvOutput::new(Vec::new()),
            CollectingDLQ::default(),
        );
        engine.process().await.unwrap();
        engine
    }

    type TestEngine = Engine<VecStream, CsvOutput<Vec<u8>>, CollectingDLQ>;

    fn balance(engine: &mut TestEngine, id: u64) -> Amount {
        engine.repository.get_mut(id).unwrap().balance()
    }

    #[tokio::test]
    async fn replays_the_reference_scenario() {
        let mut engine = run(vec![
            open(1001, None),
            open(1002, Some(dec!(1000))),
            op(1001, OperationKind::Credit { amount: dec!(2000) }),
            op(1001, OperationKind::Debit { amount: dec!(500) }),
            op(1001, OperationKind::Transfer { amount: dec!(300), target: 1002 }),
            op(1001, OperationKind::SetOverdraftLimit { limit: dec!(1000) }),
            op(1001, OperationKind::SetDebitLimit { limit: dec!(1500) }),
            op(1001, OperationKind::Debit { amount: dec!(1500) }),
        ])
        .await;

        assert!(engine.dlq.0.borrow().is_empty());
        assert_eq!(balance(&mut engine, 1001), dec!(-300));
        assert_eq!(balance(&mut engine, 1002), dec!(1300));
    }

    #[tokio::test]
    async fn open_shares_owner_between_accounts() {
        let mut engine = run(vec![open(1, None), open(2, None)]).await;
        let first = engine.repository.get_mut(1).unwrap().owner().clone();
        let second = engine.repository.get_mut(2).unwrap().owner().clone();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn open_fills_missing_limits_with_defaults() {
        let mut engine = run(vec![op(
            5,
            OperationKind::Open {
                owner: Person::new("Martin", "Marie", "rue"),
                initial_balance: None,
                overdraft_limit: None,
                debit_limit: Some(dec!(50)),
            },
        )])
        .await;
        let account = engine.repository.get_mut(5).unwrap();
        assert_eq!(account.balance(), dec!(0));
        assert_eq!(account.overdraft_limit(), dec!(800));
        assert_eq!(account.debit_limit(), dec!(50));
    }

    #[tokio::test]
    async fn rejected_operations_go_to_the_dlq() {
        let mut engine = run(vec![
            open(1, None),
            open(1, Some(dec!(5))),
            open(-4, None),
            op(2, OperationKind::Credit { amount: dec!(10) }),
            op(1, OperationKind::Debit { amount: dec!(900) }),
            Err(Error::Ingestion("broken row".to_string())),
            op(1, OperationKind::Credit { amount: dec!(10) }),
        ])
        .await;

        let reports = engine.dlq.0.borrow().clone();
        assert_eq!(
            reports,
            vec![
                "Engine failed with: Account 1 already exists",
                "Invalid argument: account number cannot be negative",
                "Engine failed with: Account 2 not found",
                "Invalid argument: balance cannot go below the overdraft limit",
                "Ingestion failed with: broken row",
            ]
        );
        assert_eq!(balance(&mut engine, 1), dec!(10));
    }

    #[tokio::test]
    async fn transfer_to_unknown_target_keeps_source() {
        let mut engine = run(vec![
            open(1, Some(dec!(100))),
            op(1, OperationKind::Transfer { amount: dec!(40), target: 9 }),
        ])
        .await;

        assert_eq!(
            *engine.dlq.0.borrow(),
            vec!["Invalid argument: destination account is missing"]
        );
        assert_eq!(balance(&mut engine, 1), dec!(100));
    }

    #[tokio::test]
    async fn failed_transfer_does_not_credit_destination() {
        let mut engine = run(vec![
            open(1, None),
            open(2, None),
            op(1, OperationKind::Transfer { amount: dec!(1001), target: 2 }),
        ])
        .await;

        assert_eq!(engine.dlq.0.borrow().len(), 1);
        assert_eq!(balance(&mut engine, 1), dec!(0));
        assert_eq!(balance(&mut engine, 2), dec!(0));
    }

    #[tokio::test]
    async fn transfer_to_self_is_neutral() {
        let mut engine = run(vec![
            open(1, Some(dec!(100))),
            op(1, OperationKind::Transfer { amount: dec!(40), target: 1 }),
        ])
        .await;

        assert!(engine.dlq.0.borrow().is_empty());
        assert_eq!(balance(&mut engine, 1), dec!(100));
    }
}
