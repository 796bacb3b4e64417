use crate::infra::error::AppError;
use bulk_mail_dispatcher::bulk_dispatcher::BulkDispatcher;
use bulk_mail_dispatcher::campaign::Campaign;
use bulk_mail_dispatcher::campaign_settlement::{CampaignSettlement, SettlementSummary};
use bulk_mail_dispatcher::credit_account::CreditAccount;
use bulk_mail_dispatcher::dispatch_result::DispatchResult;
use bulk_mail_dispatcher::email_transport::EmailTransport;
use bulk_mail_dispatcher::recipient_normalizer::{RawRow, RecipientNormalizer};
use serde::Serialize;
use tracing::{error, info, instrument};

pub struct CampaignRequest {
    pub rows: Vec<RawRow>,
    pub subject: String,
    pub message: String,
    pub campaign_name: Option<String>,
    pub from_email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignReport {
    pub campaign: Campaign,
    pub summary: SettlementSummary,
    pub dropped_rows: usize,
}

pub struct CampaignRunner;

impl CampaignRunner {
    #[instrument(skip_all)]
    pub async fn run<T: EmailTransport>(
        dispatcher: &BulkDispatcher<T>,
        credit_account: &mut CreditAccount,
        request: CampaignRequest,
    ) -> Result<CampaignReport, AppError> {
        if request.subject.trim().is_empty() || request.message.trim().is_empty() {
            return Err(AppError::bad_request("Missing required fields"));
        }

        let normalized = RecipientNormalizer::normalize_with_report(&request.rows);
        if normalized.recipients.is_empty() {
            return Err(AppError::bad_request("No valid emails found in the file"));
        }

        credit_account.ensure_can_afford(normalized.recipients.len())?;

        let mut campaign = Campaign::start(request.campaign_name.as_deref(), &request.subject, &request.message, &normalized.recipients);
        info!(campaign_id = %campaign.id, recipients = campaign.total_count, "Campaign sending");

        let result = match dispatcher
            .dispatch(&normalized.recipients, &request.subject, &request.message, &request.from_email)
            .await
        {
            Ok(result) => result,
            Err(dispatch_error) => {
                error!("Error sending bulk emails: {dispatch_error}");
                DispatchResult::aborted(normalized.recipients.len(), &dispatch_error.cause)
            },
        };

        let summary = CampaignSettlement::settle(&mut campaign, credit_account, &result);

        Ok(CampaignReport {
            campaign,
            summary,
            dropped_rows: normalized.dropped(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::{CampaignRequest, CampaignRunner};
    use async_trait::async_trait;
    use bulk_mail_dispatcher::bulk_dispatcher::BulkDispatcher;
    use bulk_mail_dispatcher::campaign::{CampaignStatus, DeliveryStatus};
    use bulk_mail_dispatcher::credit_account::CreditAccount;
    use bulk_mail_dispatcher::dispatcher_resources::DispatcherResources;
    use bulk_mail_dispatcher::email_transport::{EmailTransport, OutboundEmail, TransportError, TransportResponse};
    use bulk_mail_dispatcher::recipient_normalizer::RawRow;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct BouncingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmailTransport for BouncingTransport {
        async fn send(
            &self,
            email: &OutboundEmail,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if email.to.starts_with("bounce") {
                Err(TransportError::new("Recipient mailbox bounced"))
            } else {
                Ok(TransportResponse::with_id("accepted"))
            }
        }
    }

    fn dispatcher() -> BulkDispatcher<BouncingTransport> {
        BulkDispatcher::new(
            DispatcherResources::new().with_batch_delay_in_millis(0),
            BouncingTransport { calls: AtomicUsize::new(0) },
        )
    }

    fn request(from_email: &str) -> CampaignRequest {
        let rows: Vec<RawRow> = serde_json::from_value(json!([
            { "Email": "ok@example.com", "Name": "Ok" },
            { "email": "bounce@example.com" },
            { "email": "not-an-email" }
        ]))
        .unwrap();

        CampaignRequest {
            rows,
            subject: "Hello".to_string(),
            message: "<p>Hi</p>".to_string(),
            campaign_name: Some("launch".to_string()),
            from_email: from_email.to_string(),
        }
    }

    #[tokio::test]
    async fn should_charge_only_delivered_emails() {
        let dispatcher = dispatcher();
        let mut account = CreditAccount::new(5);

        let report = CampaignRunner::run(&dispatcher, &mut account, request("campaigns@example.com")).await.unwrap();

        assert_eq!(1, report.dropped_rows);
        assert_eq!((1, 1, 2), (report.summary.sent, report.summary.failed, report.summary.total));
        assert_eq!(CreditAccount { free_credits: 4, used_credits: 1 }, account);
        assert_eq!(CampaignStatus::Completed, report.campaign.status);
        assert_eq!(DeliveryStatus::Failed, report.campaign.recipients[1].status);
        assert_eq!(2, dispatcher.transport().calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn should_settle_as_failed_when_sender_is_invalid() {
        let dispatcher = dispatcher();
        let mut account = CreditAccount::new(5);

        let report = CampaignRunner::run(&dispatcher, &mut account, request("")).await.unwrap();

        assert_eq!("Failed to send emails", report.summary.message);
        assert_eq!(CampaignStatus::Failed, report.campaign.status);
        assert_eq!(CreditAccount::new(5), account);
        assert_eq!(0, dispatcher.transport().calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn should_refuse_without_enough_credits() {
        let dispatcher = dispatcher();
        let mut account = CreditAccount::new(1);

        let error = CampaignRunner::run(&dispatcher, &mut account, request("campaigns@example.com")).await.unwrap_err();

        assert_eq!(400, error.status_code);
        assert_eq!("Insufficient credits. You have 1 credits but need 2", error.cause);
        assert_eq!(0, dispatcher.transport().calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn should_refuse_file_without_valid_emails() {
        let dispatcher = dispatcher();
        let mut account = CreditAccount::new(5);
        let mut request = request("campaigns@example.com");
        request.rows = serde_json::from_value(json!([{ "name": "Nobody" }])).unwrap();

        let error = CampaignRunner::run(&dispatcher, &mut account, request).await.unwrap_err();

        assert_eq!(400, error.status_code);
        assert_eq!("No valid emails found in the file", error.cause);
    }
}
