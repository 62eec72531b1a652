pub mod account;
pub mod amount;
pub mod error;
pub mod operation;
pub mod person;
pub mod traits;

pub use account::Account;
pub use amount::Amount;
pub use error::{Error, Reason};
pub use operation::{Operation, OperationKind};
pub use person::Person;
pub use traits::{AccountRepository, DeadLetterQueue, OperationStream};
