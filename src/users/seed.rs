//! Fixed dataset used to repopulate an empty store.

use super::types::User;

/// Number of records in the seed dataset.
pub const SEED_COUNT: usize = 13;

const SEED: [(&str, &str, i64); SEED_COUNT] = [
    ("1", "Bob", 19),
    ("2", "James", 75),
    ("3", "Georgina", 31),
    ("4", "Margret", 55),
    ("5", "Terry", 26),
    ("6", "Frank", 46),
    ("7", "Sarah", 25),
    ("8", "Tom", 67),
    ("9", "Charles", 34),
    ("10", "Charlotte", 53),
    ("11", "Emily", 18),
    ("12", "Roger", 42),
    ("13", "Jane", 21),
];

/// The seed users, in id order.
pub fn seed_users() -> Vec<User> {
    SEED
        .iter()
        .map(|&(id, name, age)| User::new(id, name, age))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_sequential_and_unique() {
        let users = seed_users();
        assert_eq!(users.len(), SEED_COUNT);

        let ids: HashSet<_> = users.iter().map(|u| u.id.clone()).collect();
        assert_eq!(ids.len(), SEED_COUNT);

        for (i, user) in users.iter().enumerate() {
            assert_eq!(user.id, (i + 1).to_string());
        }
    }
}
