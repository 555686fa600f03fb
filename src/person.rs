//! Sample people served by the mock API.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A regular user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub age: u32,
    pub occupation: String,
}

/// An administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub name: String,
    pub age: u32,
    pub role: String,
}

/// Either kind of person, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Person {
    User(User),
    Admin(Admin),
}

impl Person {
    pub fn name(&self) -> &str {
        match self {
            Person::User(user) => &user.name,
            Person::Admin(admin) => &admin.name,
        }
    }

    pub fn age(&self) -> u32 {
        match self {
            Person::User(user) => user.age,
            Person::Admin(admin) => admin.age,
        }
    }

    /// The role of an admin, or the occupation of a user.
    pub fn detail(&self) -> &str {
        match self {
            Person::User(user) => &user.occupation,
            Person::Admin(admin) => &admin.role,
        }
    }
}

impl From<User> for Person {
    fn from(user: User) -> Self {
        Person::User(user)
    }
}

impl From<Admin> for Person {
    fn from(admin: Admin) -> Self {
        Person::Admin(admin)
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.name(), self.age(), self.detail())
    }
}

static ADMINS: Lazy<Vec<Admin>> = Lazy::new(|| {
    vec![
        Admin {
            name: "Jane Doe".to_string(),
            age: 32,
            role: "Administrator".to_string(),
        },
        Admin {
            name: "Bruce Willis".to_string(),
            age: 64,
            role: "World saver".to_string(),
        },
    ]
});

static USERS: Lazy<Vec<User>> = Lazy::new(|| {
    vec![
        User {
            name: "Max Mustermann".to_string(),
            age: 25,
            occupation: "Chimney sweep".to_string(),
        },
        User {
            name: "Kate Müller".to_string(),
            age: 23,
            occupation: "Astronaut".to_string(),
        },
    ]
});

/// The static admin list.
pub fn admins() -> &'static [Admin] {
    &ADMINS
}

/// The static user list.
pub fn users() -> &'static [User] {
    &USERS
}
