use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::domain::amount::deserialize_optional_amount;
use crate::domain::traits::OperationStream;
use crate::domain::{Amount, Error, Operation, OperationKind, Person, Reason};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self { reader: Some(rdr) }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    account: i64,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    amount: Option<Amount>,
    #[serde(default)]
    target: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    overdraft_limit: Option<Amount>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    debit_limit: Option<Amount>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

fn required(value: Option<Amount>, column: &str, kind: &str) -> Result<Amount, Error> {
    value.ok_or_else(|| Error::Ingestion(format!("{} requires a {} value", kind, column)))
}

impl TryFrom<CsvRow> for Operation {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let kind = match row.kind.to_ascii_lowercase().as_str() {
            "open" => {
                let owner = match (row.name, row.first_name, row.address) {
                    (None, None, None) => return Err(Reason::MissingOwner.into()),
                    (name, first_name, address) => {
                        Person::try_from_parts(name, first_name, address)?
                    }
                };
                OperationKind::Open {
                    owner,
                    initial_balance: row.amount,
                    overdraft_limit: row.overdraft_limit,
                    debit_limit: row.debit_limit,
                }
            }
            "credit" => OperationKind::Credit {
                amount: required(row.amount, "amount", "credit")?,
            },
            "debit" => OperationKind::Debit {
                amount: required(row.amount, "amount", "debit")?,
            },
            "transfer" => OperationKind::Transfer {
                amount: required(row.amount, "amount", "transfer")?,
                target: row.target.ok_or(Reason::MissingDestination)?,
            },
            "set_overdraft_limit" => OperationKind::SetOverdraftLimit {
                limit: required(row.overdraft_limit, "overdraft_limit", "set_overdraft_limit")?,
            },
            "set_debit_limit" => OperationKind::SetDebitLimit {
                limit: required(row.debit_limit, "debit_limit", "set_debit_limit")?,
            },
            other => {
                return Err(Error::Ingestion(format!(
                    "Invalid operation type: {}",
                    other
                )));
            }
        };

        Ok(Operation {
            kind,
            account: row.account,
        })
    }
}

impl<R: Read + Send + 'static> OperationStream for CsvReader<R> {
    type OpStream = Pin<Box<dyn Stream<Item = Result<Operation, Error>> + Send>>;

    fn stream(&mut self) -> Self::OpStream {
        // The stream owns the reader, so it can only be produced once.
        let reader = match self.reader.take() {
            Some(r) => r,
            None => {
                return Box::pin(stream::iter(Vec::<Result<Operation, Error>>::new()));
            }
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Operation::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}
