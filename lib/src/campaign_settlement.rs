use crate::campaign::{Campaign, CampaignStatus, DeliveryStatus};
use crate::credit_account::CreditAccount;
use crate::dispatch_result::DispatchResult;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{error, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementSummary {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    pub charged: u64,
    pub message: String,
}

pub struct CampaignSettlement;

impl CampaignSettlement {
    /// Applies a dispatch result to the campaign and the credit account.
    /// Credits are charged from `result.sent` only.
    #[instrument(skip_all, fields(campaign_id = %campaign.id))]
    pub fn settle(
        campaign: &mut Campaign,
        account: &mut CreditAccount,
        result: &DispatchResult,
    ) -> SettlementSummary {
        if !result.success {
            for recipient in campaign.recipients.iter_mut() {
                recipient.status = DeliveryStatus::Failed;
            }
            campaign.sent_count = 0;
            campaign.status = CampaignStatus::Failed;

            error!("Campaign failed before sending: {}", result.error.as_deref().unwrap_or("unknown"));

            return SettlementSummary {
                sent: 0,
                failed: campaign.total_count,
                total: campaign.total_count,
                charged: 0,
                message: "Failed to send emails".to_string(),
            };
        }

        let mut outcome_by_email = HashMap::new();
        for outcome in &result.outcomes {
            outcome_by_email.entry(outcome.email.as_str()).or_insert(outcome.success);
        }

        for recipient in campaign.recipients.iter_mut() {
            if let Some(success) = outcome_by_email.get(recipient.email.as_str()) {
                recipient.status = if *success { DeliveryStatus::Sent } else { DeliveryStatus::Failed };
            }
        }

        let charged = if result.sent > 0 { account.charge(result.sent) } else { 0 };

        campaign.sent_count = result.sent;
        campaign.status = if result.sent > 0 { CampaignStatus::Completed } else { CampaignStatus::Failed };

        let expected = campaign.total_count;
        if result.sent + result.failed != expected {
            error!("Count mismatch: Expected {expected}, got sent: {}, failed: {}", result.sent, result.failed);
        }

        info!(sent = result.sent, failed = result.failed, charged, "Campaign settled");

        SettlementSummary {
            sent: result.sent,
            failed: result.failed,
            total: expected,
            charged,
            message: format!("Successfully sent {} emails. {} failed.", result.sent, result.failed),
        }
    }
}
