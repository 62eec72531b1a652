use std::sync::Arc;

use futures::Stream;

use crate::domain::{Account, Error, Operation, Person};

pub trait OperationStream {
    type OpStream: Stream<Item = Result<Operation, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::OpStream;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

pub trait AccountRepository {
    /// Returns the shared handle for `person`, creating it on first sight.
    fn owner(&mut self, person: Person) -> Arc<Person>;

    fn open(&mut self, account: Account) -> Result<(), Error>;

    fn get_mut(&mut self, account_id: u64) -> Option<&mut Account>;

    /// Removes an account so it can be borrowed alongside another one.
    /// Callers hand it back with [`AccountRepository::restore`].
    fn take(&mut self, account_id: u64) -> Option<Account>;

    fn restore(&mut self, account: Account);

    fn flush(&mut self) -> Result<(), Error>;
}
