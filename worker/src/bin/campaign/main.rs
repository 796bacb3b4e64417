use bulk_mail_dispatcher::environment::Environment;
use bulk_mail_dispatcher::recipient_normalizer::RawRow;
use bulk_mail_dispatcher_worker::campaign_runner::{CampaignRequest, CampaignRunner};
use bulk_mail_dispatcher_worker::infra::error::AppError;
use bulk_mail_dispatcher_worker::state::AppState;
use std::env;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());

    let rust_log = Environment::string("RUST_LOG", "INFO");
    env::set_var("RUST_LOG", rust_log);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(Box::new(tracing_subscriber::fmt::layer().with_writer(non_blocking)))
        .init();

    info!("Starting...");

    let mut app_state = AppState::new()?;
    let request = load_request(&app_state)?;

    let report = CampaignRunner::run(&app_state.dispatcher, &mut app_state.credit_account, request).await?;

    info!(
        sent = report.summary.sent,
        failed = report.summary.failed,
        charged = report.summary.charged,
        remaining_credits = app_state.credit_account.free_credits,
        "{}",
        report.summary.message
    );

    let output = serde_json::to_string_pretty(&report).map_err(|error| AppError::new(&error.to_string(), "Failed to serialize campaign report"))?;
    println!("{output}");

    info!("Stopped!");

    Ok(())
}

fn load_request(app_state: &AppState) -> Result<CampaignRequest, AppError> {
    let recipients_file = Environment::string("RECIPIENTS_FILE", "recipients.json");
    let html_file = Environment::string("EMAIL_HTML_FILE", "message.html");

    let rows_text = std::fs::read_to_string(&recipients_file).map_err(|error| AppError::new(&error.to_string(), &format!("Failed to read {recipients_file}")))?;
    let rows: Vec<RawRow> = serde_json::from_str(&rows_text).map_err(|error| AppError::new(&error.to_string(), &format!("Failed to parse rows from {recipients_file}")))?;

    let message = std::fs::read_to_string(&html_file).map_err(|error| AppError::new(&error.to_string(), &format!("Failed to read {html_file}")))?;

    Ok(CampaignRequest {
        rows,
        subject: Environment::string("EMAIL_SUBJECT", ""),
        message,
        campaign_name: Environment::optional_string("CAMPAIGN_NAME"),
        from_email: app_state.from_email.clone(),
    })
}
