//! Role names attached to a user.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role name that bypasses every permission check.
pub const ADMIN_ROLE: &str = "ADMIN";

/// An ordered list of role names.
///
/// Matching is exact: `Roles::new` keeps names as given, so `"admin"` is not
/// the administrator role. Use [`Roles::normalized`] or
/// [`Roles::parse_loose`] at the boundary where role data enters.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Roles(Vec<String>);

impl Roles {
    /// Construct a `Roles` list from names, unchanged.
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Roles(roles.into_iter().map(|r| r.as_ref().to_string()).collect())
    }

    /// Trim and uppercase each name, dropping blanks and repeats.
    pub fn normalized<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Roles(
            roles
                .into_iter()
                .map(|r| r.as_ref().trim().to_uppercase())
                .filter(|r| !r.is_empty())
                .unique()
                .collect(),
        )
    }

    /// Accept the shapes role data shows up in on user records: a JSON
    /// array (`["guru","kaur"]`), a comma list (`guru, kaur`) or a single
    /// name. The result is normalized.
    pub fn parse_loose(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with('[') {
            if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
                return Roles::normalized(list);
            }
        }

        Roles::normalized(raw.split(',').map(|part| {
            part.trim_matches(|c: char| c.is_whitespace() || matches!(c, '[' | ']' | '"' | '\''))
        }))
    }

    /// Whether any role is exactly [`ADMIN_ROLE`].
    pub fn is_admin(&self) -> bool {
        self.0.iter().any(|r| r == ADMIN_ROLE)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Display for Roles {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Roles {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Roles::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        json_array = { r#"["guru", "kaur"]"#, &["GURU", "KAUR"] },
        comma_list = { "guru, kaur", &["GURU", "KAUR"] },
        single = { " Guru ", &["GURU"] },
        bracketed_not_json = { "[guru, 'kaur']", &["GURU", "KAUR"] },
        repeated = { "guru,GURU,kaur", &["GURU", "KAUR"] },
        blank = { "  ", &[] },
        empty_entries = { ",guru,,", &["GURU"] },
    )]
    fn test_parse_loose(raw: &str, expected: &[&str]) {
        let roles = Roles::parse_loose(raw);
        assert_eq!(roles.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_new_keeps_names_as_given() {
        let roles = Roles::new(["admin", "Guru"]);
        assert_eq!(roles.as_slice(), &["admin".to_string(), "Guru".to_string()]);
        assert!(!roles.is_admin());
    }

    #[test]
    fn test_is_admin_exact_match() {
        assert!(Roles::new(["GURU", "ADMIN"]).is_admin());
        assert!(Roles::normalized(["admin"]).is_admin());
        assert!(!Roles::default().is_admin());
    }

    #[test]
    fn test_roles_display() {
        let roles: Roles = ["GURU", "WALI_KELAS"].into_iter().collect();
        assert_eq!(roles.to_string(), "[GURU, WALI_KELAS]");
        assert_eq!(roles.len(), 2);
    }

    #[test]
    fn test_roles_serialization() {
        let roles = Roles::new(["GURU"]);
        let serialized = serde_json::to_value(&roles).unwrap();
        assert_eq!(serialized, serde_json::json!(["GURU"]));
        let deserialized: Roles = serde_json::from_value(serialized).unwrap();
        assert_eq!(roles, deserialized);
    }
}
