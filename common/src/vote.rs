//! Vote values and the arithmetic of toggling a vote.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl From<VoteValue> for i8 {
    fn from(value: VoteValue) -> Self {
        match value {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl TryFrom<i8> for VoteValue {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(format!("vote value must be 1 or -1, got {other}")),
        }
    }
}


/// Score of an entity and the current member's vote on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteState {
    pub score: i64,
    #[serde(default)]
    pub user_vote: Option<VoteValue>,
}

/// What has to be sent to the server to move from one vote to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Cast(VoteValue),
    Clear,
}

impl VoteState {
    pub fn new(score: i64, user_vote: Option<VoteValue>) -> Self {
        Self { score, user_vote }
    }

    /// State after the member clicks `value`.
    ///
    /// Clicking the current vote again removes it; clicking the opposite vote
    /// swings the score by two.
    pub fn toggled(self, value: VoteValue) -> Self {
        match self.user_vote {
            Some(current) if current == value => Self {
                score: self.score - current.delta(),
                user_vote: None,
            },
            Some(current) => Self {
                score: self.score - current.delta() + value.delta(),
                user_vote: Some(value),
            },
            None => Self {
                score: self.score + value.delta(),
                user_vote: Some(value),
            },
        }
    }

    pub fn action(self) -> VoteAction {
        match self.user_vote {
            Some(value) => VoteAction::Cast(value),
            None => VoteAction::Clear,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_rules() {
        let start = VoteState::new(5, None);
        let up = start.toggled(VoteValue::Up);
        assert_eq!(up, VoteState::new(6, Some(VoteValue::Up)));

        let down = up.toggled(VoteValue::Down);
        assert_eq!(down, VoteState::new(4, Some(VoteValue::Down)));

        assert_eq!(down.toggled(VoteValue::Down), start);
        assert_eq!(up.toggled(VoteValue::Up), start);
    }

    #[test]
    fn action_follows_resulting_vote() {
        assert_eq!(VoteState::new(1, Some(VoteValue::Up)).action(), VoteAction::Cast(VoteValue::Up));
        assert_eq!(VoteState::new(1, None).action(), VoteAction::Clear);
    }

    #[test]
    fn wire_format_uses_signed_integers() {
        let json = serde_json::to_string(&VoteState::new(3, Some(VoteValue::Down))).unwrap();
        assert_eq!(json, r#"{"score":3,"userVote":-1}"#);
        let parsed: VoteState = serde_json::from_str(r#"{"score":7}"#).unwrap();
        assert_eq!(parsed, VoteState::new(7, None));
        assert!(serde_json::from_str::<VoteValue>("2").is_err());
    }
}
