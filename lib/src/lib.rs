pub mod bulk_dispatcher;
pub mod campaign;
pub mod campaign_settlement;
pub mod credit_account;
pub mod dispatch_result;
pub mod dispatcher_resources;
pub mod email_address;
pub mod email_transport;
pub mod environment;
pub mod error;
pub mod http_gateway;
pub mod outcome_reconciler;
pub mod recipient;
pub mod recipient_normalizer;
pub mod resend_transport;
pub mod send_outcome;
