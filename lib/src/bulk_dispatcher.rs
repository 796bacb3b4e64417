use crate::dispatch_result::DispatchResult;
use crate::dispatcher_resources::DispatcherResources;
use crate::email_address::is_valid_email;
use crate::email_transport::{EmailTransport, OutboundEmail};
use crate::error::BulkMailDispatcherError;
use crate::outcome_reconciler::OutcomeReconciler;
use crate::recipient::Recipient;
use crate::send_outcome::{SendOutcome, NOT_ACCEPTED_ERROR};
use futures_util::future::join_all;
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use tracing::{error, info, instrument};

pub const INVALID_FROM_EMAIL_ERROR: &str = "Invalid FROM_EMAIL format. Must be a valid email address.";
pub const SEND_PANICKED_ERROR: &str = "Send task panicked";

pub struct BulkDispatcher<T: EmailTransport> {
    resources: DispatcherResources,
    transport: T,
}

impl<T: EmailTransport> BulkDispatcher<T> {
    pub fn new(
        resources: DispatcherResources,
        transport: T,
    ) -> Self {
        Self { resources, transport }
    }

    pub fn resources(&self) -> &DispatcherResources {
        &self.resources
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `html_body` to every recipient, `batch_size` at a time, pausing
    /// between batches. Only an invalid sender address is returned as an error;
    /// everything that goes wrong per recipient ends up in the outcomes.
    #[instrument(skip_all, fields(recipients = recipients.len()))]
    pub async fn dispatch(
        &self,
        recipients: &[Recipient],
        subject: &str,
        html_body: &str,
        from_address: &str,
    ) -> Result<DispatchResult, BulkMailDispatcherError> {
        let from_address = from_address.trim();
        if !is_valid_email(from_address) {
            error!("Refusing to dispatch with sender address {from_address:?}");
            return Err(BulkMailDispatcherError::configuration(INVALID_FROM_EMAIL_ERROR));
        }

        let sender = format!("{} <{}>", self.resources.effective_sender_display_name(), from_address);

        let batches = recipients.chunks(self.resources.effective_batch_size()).collect::<Vec<&[Recipient]>>();
        let batches_len = batches.len();
        let delay = self.resources.batch_delay();

        let mut outcomes = Vec::with_capacity(recipients.len());

        for (index, batch) in batches.into_iter().enumerate() {
            let batch_outcomes = self.send_batch(batch, &sender, subject, html_body).await;

            let batch_sent = batch_outcomes.iter().filter(|outcome| outcome.success).count();
            info!(
                batch = index + 1,
                batches = batches_len,
                sent = batch_sent,
                failed = batch_outcomes.len() - batch_sent,
                "Batch settled"
            );

            outcomes.extend(batch_outcomes);

            if index + 1 < batches_len {
                tokio::time::sleep(delay).await;
            }
        }

        let result = OutcomeReconciler::reconcile(outcomes, recipients.len());

        info!(sent = result.sent, failed = result.failed, total = result.total, "Dispatch finished");

        Ok(result)
    }

    async fn send_batch(
        &self,
        batch: &[Recipient],
        sender: &str,
        subject: &str,
        html_body: &str,
    ) -> Vec<SendOutcome> {
        let sends = batch
            .iter()
            .map(|recipient| AssertUnwindSafe(self.send_one(recipient, sender, subject, html_body)).catch_unwind());

        join_all(sends)
            .await
            .into_iter()
            .zip(batch)
            .map(|(settled, recipient)| match settled {
                Ok(outcome) => outcome,
                Err(_) => {
                    error!("Send to {} panicked", recipient.email());
                    SendOutcome::failed(recipient, SEND_PANICKED_ERROR)
                },
            })
            .collect()
    }

    async fn send_one(
        &self,
        recipient: &Recipient,
        sender: &str,
        subject: &str,
        html_body: &str,
    ) -> SendOutcome {
        let email = OutboundEmail {
            from: sender.to_string(),
            to: recipient.email().to_string(),
            subject: subject.to_string(),
            html: html_body.to_string(),
        };

        match self.transport.send(&email).await {
            Ok(response) => match response.accepted_id() {
                Some(response_id) => SendOutcome::accepted(recipient, response_id),
                None => {
                    error!("Email not accepted for {}: {:?}", recipient.email(), response);
                    SendOutcome::failed(recipient, NOT_ACCEPTED_ERROR)
                },
            },
            Err(transport_error) => {
                error!("Error sending email to {}: {}", recipient.email(), transport_error);
                SendOutcome::rejected(recipient, &transport_error.describe())
            },
        }
    }
}
