use crate::errors::*;
use snafu::ensure;
use std::fmt;
use std::str::FromStr;

/// Where a [`Producer`](struct.Producer.html) sends: a node name (typically an exchange) and an
/// optional subject used as the routing key.
///
/// Addresses are written `name[/subject]`, so `"amq.direct/map_example"` names the
/// `amq.direct` exchange with routing key `map_example`.
///
/// ```rust
/// use mapmsg::Address;
///
/// let address: Address = "amq.direct/map_example".parse().unwrap();
/// assert_eq!(address.name(), "amq.direct");
/// assert_eq!(address.subject(), Some("map_example"));
/// assert_eq!(address.to_string(), "amq.direct/map_example");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    name: String,
    subject: Option<String>,
}

impl Address {
    /// Create an address with no subject. Fails if `name` is empty or contains `/`.
    pub fn new<S: Into<String>>(name: S) -> Result<Address> {
        let name = name.into();
        ensure!(
            !name.is_empty() && !name.contains('/'),
            InvalidAddressSnafu { address: name }
        );
        Ok(Address {
            name,
            subject: None,
        })
    }

    /// Create an address with a subject. An empty subject is the same as no subject.
    pub fn with_subject<S0: Into<String>, S1: Into<String>>(
        name: S0,
        subject: S1,
    ) -> Result<Address> {
        let address = Address::new(name)?;
        let subject = subject.into();
        Ok(Address {
            subject: if subject.is_empty() {
                None
            } else {
                Some(subject)
            },
            ..address
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Address> {
        // Address options (`; {...}`) are not supported.
        ensure!(!s.contains(';'), InvalidAddressSnafu { address: s });
        let s = s.trim();
        match s.find('/') {
            Some(pos) => {
                // Report the whole string rather than the empty name.
                ensure!(pos > 0, InvalidAddressSnafu { address: s });
                Address::with_subject(&s[..pos], &s[pos + 1..])
            }
            None => Address::new(s),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "{}/{}", self.name, subject),
            None => f.write_str(&self.name),
        }
    }
}
