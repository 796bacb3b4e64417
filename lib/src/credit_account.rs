use crate::error::BulkMailDispatcherError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAccount {
    pub free_credits: u64,
    pub used_credits: u64,
}

impl CreditAccount {
    pub fn new(free_credits: u64) -> Self {
        Self {
            free_credits,
            used_credits: 0,
        }
    }

    pub fn ensure_can_afford(
        &self,
        recipients_len: usize,
    ) -> Result<(), BulkMailDispatcherError> {
        let required = recipients_len as u64;
        if self.free_credits < required {
            return Err(BulkMailDispatcherError::insufficient_credits(self.free_credits, required));
        }

        Ok(())
    }

    /// Returns what was actually charged.
    pub fn charge(
        &mut self,
        sent: usize,
    ) -> u64 {
        let charged = (sent as u64).min(self.free_credits);
        self.free_credits -= charged;
        self.used_credits += charged;
        charged
    }
}

#[cfg(test)]
mod test {
    use super::CreditAccount;
    use crate::error::ErrorKind;

    #[test]
    fn should_refuse_when_credits_do_not_cover_recipients() {
        let account = CreditAccount::new(2);

        assert!(account.ensure_can_afford(2).is_ok());

        let error = account.ensure_can_afford(3).unwrap_err();
        assert_eq!(ErrorKind::InsufficientCredits, error.kind);
        assert_eq!(400, error.status_code);
        assert_eq!("Insufficient credits. You have 2 credits but need 3", error.to_string());
    }

    #[test]
    fn should_move_charged_credits_to_used() {
        let mut account = CreditAccount::new(5);

        assert_eq!(3, account.charge(3));
        assert_eq!(CreditAccount { free_credits: 2, used_credits: 3 }, account);

        assert_eq!(2, account.charge(10));
        assert_eq!(CreditAccount { free_credits: 0, used_credits: 5 }, account);
    }
}
