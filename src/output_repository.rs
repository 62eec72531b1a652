use std::collections::{BTreeMap, HashMap, btree_map::Entry};
use std::io::Write;
use std::sync::Arc;

use crate::domain::{Account, AccountRepository, Error, Person};

/// Keeps accounts in memory, ordered by id, and writes a CSV summary on flush.
#[derive(Debug)]
pub struct CsvOutput<W: Write> {
    accounts: BTreeMap<u64, Account>,
    owners: HashMap<Person, Arc<Person>>,
    writer: W,
}

impl<W: Write> CsvOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            accounts: BTreeMap::new(),
            owners: HashMap::new(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvOutput<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> AccountRepository for CsvOutput<W> {
    fn owner(&mut self, person: Person) -> Arc<Person> {
        self.owners
            .entry(person)
            .or_insert_with_key(|p| Arc::new(p.clone()))
            .clone()
    }

    fn open(&mut self, account: Account) -> Result<(), Error> {
        match self.accounts.entry(account.id()) {
            Entry::Vacant(e) => {
                e.insert(account);
                Ok(())
            }
            Entry::Occupied(e) => Err(Error::Engine(format!(
                "Account {} already exists",
                e.key()
            ))),
        }
    }

    fn get_mut(&mut self, account_id: u64) -> Option<&mut Account> {
        self.accounts.get_mut(&account_id)
    }

    fn take(&mut self, account_id: u64) -> Option<Account> {
        self.accounts.remove(&account_id)
    }

    fn restore(&mut self, account: Account) {
        self.accounts.insert(account.id(), account);
    }

    fn flush(&mut self) -> Result<(), Error> {
        let mut wtr = csv::Writer::from_writer(&mut self.writer);
        wtr.write_record([
            "account",
            "owner",
            "balance",
            "overdraft",
            "overdraft_limit",
            "debit_limit",
        ])?;
        for (account_id, account) in &self.accounts {
            wtr.write_record([
                account_id.to_string(),
                account.owner().to_string(),
                account.balance().to_string(),
                account.overdraft_amount().to_string(),
                account.overdraft_limit().to_string(),
                account.debit_limit().to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
