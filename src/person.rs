//! Person records and the greeting rendered from them
//!
//! Two revisions of the same record exist side by side. [`PersonWithEmail`]
//! adds a required `email` field, so every construction site has to supply
//! it; a literal written against the older shape no longer compiles:
//!
//! ```compile_fail
//! use greet_server::person::PersonWithEmail;
//!
//! let user = PersonWithEmail {
//!     name: "Alice".to_string(),
//!     age: 30,
//! };
//! ```
//!
//! The same rule holds when a record arrives as data: deserializing a
//! `PersonWithEmail` without `email` is an error rather than a default.

use serde::{Deserialize, Serialize};

/// Renders a one-line greeting from a record
pub trait Greet {
    fn greet(&self) -> String;
}

/// A person with a name and an age
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

/// A [`Person`] that can also be reached by email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonWithEmail {
    pub name: String,
    pub age: u32,
    pub email: String,
}

impl Greet for Person {
    fn greet(&self) -> String {
        format!("Hello, {}! You are {} years old.", self.name, self.age)
    }
}

impl Greet for PersonWithEmail {
    fn greet(&self) -> String {
        format!(
            "Hello, {}! You are {} years old. Your email is {}.",
            self.name, self.age, self.email
        )
    }
}

impl From<PersonWithEmail> for Person {
    fn from(person: PersonWithEmail) -> Self {
        Self {
            name: person.name,
            age: person.age,
        }
    }
}

/// The record greeted once at startup
pub fn demo_person() -> PersonWithEmail {
    PersonWithEmail {
        name: "Alice".to_string(),
        age: 30,
        email: "alice@example.com".to_string(),
    }
}
