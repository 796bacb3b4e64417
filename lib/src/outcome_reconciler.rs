use crate::dispatch_result::{AccountingFault, DispatchResult};
use crate::send_outcome::SendOutcome;
use tracing::error;

pub struct OutcomeReconciler;

impl OutcomeReconciler {
    /// Counts successes and failures against the number of recipients handed to
    /// the dispatcher. A mismatch is reported on the result and logged, the
    /// counts are still returned as they are.
    pub fn reconcile(
        outcomes: Vec<SendOutcome>,
        expected_total: usize,
    ) -> DispatchResult {
        let (sent, failed): (Vec<&SendOutcome>, Vec<&SendOutcome>) = outcomes.iter().partition(|outcome| outcome.success);
        let sent = sent.len();
        let failed = failed.len();

        let processed = sent + failed;
        let accounting_fault = if processed != expected_total {
            error!(expected = expected_total, processed, "Email count mismatch: Expected {expected_total}, processed {processed}");
            Some(AccountingFault {
                expected: expected_total,
                processed,
            })
        } else {
            None
        };

        DispatchResult {
            success: true,
            sent,
            failed,
            total: expected_total,
            outcomes,
            error: None,
            accounting_fault,
        }
    }
}
