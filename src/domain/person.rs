use crate::domain::{Error, error::Reason};

/// Holder of one or more accounts. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    name: String,
    first_name: String,
    address: String,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        first_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            first_name: first_name.into(),
            address: address.into(),
        }
    }

    /// Builds a person from fields that may be absent, e.g. empty CSV columns.
    /// Fails on the first missing field, checked in name, first name, address order.
    pub fn try_from_parts(
        name: Option<String>,
        first_name: Option<String>,
        address: Option<String>,
    ) -> Result<Self, Error> {
        let name = name.ok_or(Reason::MissingPersonField("name"))?;
        let first_name = first_name.ok_or(Reason::MissingPersonField("first name"))?;
        let address = address.ok_or(Reason::MissingPersonField("address"))?;

        Ok(Self::new(name, first_name, address))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl core::fmt::Display for Person {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.name, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jean() -> Person {
        Person::new("Dupont", "Jean", "123 rue de la Paix")
    }

    #[test]
    fn accessors_return_constructor_values() {
        let person = jean();
        assert_eq!(person.name(), "Dupont");
        assert_eq!(person.first_name(), "Jean");
        assert_eq!(person.address(), "123 rue de la Paix");
    }

    #[test]
    fn empty_strings_are_accepted() {
        let person = Person::new("", "", "");
        assert_eq!(person.name(), "");
    }

    #[test]
    fn missing_fields_are_rejected() {
        let some = |s: &str| Some(s.to_string());

        let err = Person::try_from_parts(None, some("Jean"), some("rue")).unwrap_err();
        assert_eq!(err.reason(), Some(Reason::MissingPersonField("name")));

        let err = Person::try_from_parts(some("Dupont"), None, some("rue")).unwrap_err();
        assert_eq!(err.reason(), Some(Reason::MissingPersonField("first name")));

        let err = Person::try_from_parts(some("Dupont"), some("Jean"), None).unwrap_err();
        assert_eq!(err.reason(), Some(Reason::MissingPersonField("address")));
    }

    #[test]
    fn complete_parts_build_the_same_person() {
        let person = Person::try_from_parts(
            Some("Dupont".into()),
            Some("Jean".into()),
            Some("123 rue de la Paix".into()),
        )
        .unwrap();
        assert_eq!(person, jean());
    }

    #[test]
    fn display_puts_first_name_before_name() {
        assert_eq!(jean().to_string(), "Jean Dupont (123 rue de la Paix)");
    }
}
