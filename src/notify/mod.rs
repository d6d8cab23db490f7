pub mod smtp;

use anyhow::Result;

use crate::models::email::OutcomeMessage;

/// Delivers the end-of-run message to whoever asked for the booking.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, message: &OutcomeMessage) -> Result<()>;
}
