use crate::infra::error::AppError;
use bulk_mail_dispatcher::bulk_dispatcher::BulkDispatcher;
use bulk_mail_dispatcher::credit_account::CreditAccount;
use bulk_mail_dispatcher::dispatcher_resources::DispatcherResources;
use bulk_mail_dispatcher::environment::Environment;
use bulk_mail_dispatcher::resend_transport::ResendTransport;

pub struct AppState {
    pub dispatcher: BulkDispatcher<ResendTransport>,
    pub credit_account: CreditAccount,
    pub from_email: String,
}

impl AppState {
    pub fn new() -> Result<Self, AppError> {
        let resources = DispatcherResources::from_env();
        let transport = ResendTransport::from_env(resources.effective_http_timeout_in_millis())?;

        Ok(Self {
            dispatcher: BulkDispatcher::new(resources, transport),
            credit_account: CreditAccount::new(Environment::u64("FREE_CREDITS", 0)),
            from_email: Environment::string("FROM_EMAIL", ""),
        })
    }
}
