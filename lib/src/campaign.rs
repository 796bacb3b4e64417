use crate::recipient::Recipient;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Sending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignRecipient {
    pub email: String,
    pub name: String,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    pub name: Option<String>,
    pub subject: String,
    pub message: String,
    pub recipients: Vec<CampaignRecipient>,
    pub total_count: usize,
    pub sent_count: usize,
    pub status: CampaignStatus,
}

impl Campaign {
    pub fn start(
        name: Option<&str>,
        subject: &str,
        message: &str,
        recipients: &[Recipient],
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.map(str::to_string),
            subject: subject.to_string(),
            message: message.to_string(),
            recipients: recipients
                .iter()
                .map(|recipient| CampaignRecipient {
                    email: recipient.email().to_string(),
                    name: recipient.name().to_string(),
                    status: DeliveryStatus::Pending,
                })
                .collect(),
            total_count: recipients.len(),
            sent_count: 0,
            status: CampaignStatus::Sending,
        }
    }

    pub fn count_with_status(
        &self,
        status: DeliveryStatus,
    ) -> usize {
        self.recipients.iter().filter(|recipient| recipient.status == status).count()
    }
}
