use async_trait::async_trait;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
    /// The prompt was dismissed without an answer.
    Cancelled,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        self == Self::Confirmed
    }
}

/// Asks the operator before a destructive action.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &str) -> Confirmation;
}

/// Answers every prompt the same way. Used for `--yes` and in tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedAnswer(pub Confirmation);

#[async_trait]
impl Confirmer for FixedAnswer {
    async fn confirm(&self, _prompt: &str) -> Confirmation {
        self.0
    }
}
