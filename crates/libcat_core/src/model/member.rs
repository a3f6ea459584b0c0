//! Library member record.
//!
//! Members are display-only: they are never persisted.

use std::fmt::{Display, Formatter};

pub type MemberId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: MemberId,
    name: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[MEMBER] ID: {}, Name: {}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::Member;

    #[test]
    fn display_matches_console_format() {
        let member = Member::new(2, "Sophia");
        assert_eq!(member.to_string(), "[MEMBER] ID: 2, Name: Sophia");
        assert_eq!(member.id(), 2);
        assert_eq!(member.name(), "Sophia");
    }
}
