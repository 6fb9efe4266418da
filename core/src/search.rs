//! Client-side search over an already fetched user list.

use crate::types::User;

/// Users whose name or email contains `query`, ignoring case, in their
/// original order. An empty query matches everyone.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    if query.is_empty() {
        return users.iter().collect();
    }
    let query = query.to_lowercase();
    users
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&query) || user.email.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str, email: &str) -> User {
        User {
            id: Some(id),
            name: name.to_string(),
            email: email.to_string(),
            ..User::default()
        }
    }

    fn users() -> Vec<User> {
        vec![
            user(1, "Leanne Graham", "Sincere@april.biz"),
            user(2, "Ervin Howell", "Shanna@melissa.tv"),
            user(3, "Clementine Bauch", "Nathan@yesenia.net"),
        ]
    }

    fn ids(found: &[&User]) -> Vec<u64> {
        found.iter().filter_map(|user| user.id).collect()
    }

    #[test]
    fn empty_query_returns_everyone_in_order() {
        let all = users();
        assert_eq!(ids(&filter_users(&all, "")), [1, 2, 3]);
    }

    #[test]
    fn matches_name_case_insensitively() {
        let all = users();
        assert_eq!(ids(&filter_users(&all, "GRAHAM")), [1]);
        assert_eq!(ids(&filter_users(&all, "ervin")), [2]);
    }

    #[test]
    fn matches_email() {
        let all = users();
        assert_eq!(ids(&filter_users(&all, "yesenia.NET")), [3]);
    }

    #[test]
    fn substring_shared_by_several_users() {
        let all = users();
        // "an": Leanne, Shanna, Clementine/Nathan.
        assert_eq!(ids(&filter_users(&all, "an")), [1, 2, 3]);
        assert_eq!(ids(&filter_users(&all, "na")), [2, 3]);
    }

    #[test]
    fn no_match_is_empty() {
        let all = users();
        assert!(filter_users(&all, "zzz").is_empty());
    }

    #[test]
    fn whitespace_is_part_of_the_query() {
        let all = users();
        assert_eq!(ids(&filter_users(&all, "e g")), [1]);
        assert!(filter_users(&all, " ").len() == 3);
    }
}
