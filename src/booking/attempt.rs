use anyhow::Result;
use tracing::{error, info};

use crate::booking::browser::{
    Browser, PageElement, first_visible, wait_for_element, wait_for_visible,
};
use crate::booking::constants::*;
use crate::config::Timeouts;

/// Tries to book the court behind one clicked sheet cell.
///
/// Returns `Ok(false)` when the site refuses the booking or the dialog never
/// reaches its confirmation step. Errors are driver failures.
pub async fn book_slot<B: Browser>(
    browser: &B,
    slot: &B::Element,
    timeouts: &Timeouts,
) -> Result<bool> {
    slot.click().await?;

    if let Some(duration) = wait_for_element(browser, DURATION_BUTTON_ID, timeouts.element).await? {
        if !wait_for_visible(&duration, timeouts.element).await? {
            error!("Unable to select court, duration control never became visible");
            return Ok(false);
        }

        // A visible selection alert means another cell is still selected.
        let confirm = match first_visible(browser, SELECTION_ALERT_SELECTOR).await? {
            Some(_) => {
                info!("Court selection alert, cancelling selection");
                browser
                    .find_by_id(CLEAR_SELECTION_ID)
                    .await?
                    .unwrap_or(duration)
            }
            None => duration,
        };
        confirm.click().await?;
    }

    if let Some(dialog) = browser.find_by_id(ERROR_DIALOG_ID).await? {
        if wait_for_visible(&dialog, timeouts.element).await? {
            error!("Unable to book selected court");
            if let Some(close) = first_visible(browser, DIALOG_CLOSE_SELECTOR).await? {
                close.click().await?;
            }
            return Ok(false);
        }
    }

    match wait_for_element(browser, CONFIRMATION_RETURN_ID, timeouts.element).await? {
        Some(back) => {
            if !wait_for_visible(&back, timeouts.element).await? {
                error!("Unable to get booking confirmation");
                return Ok(false);
            }
            back.click().await?;
            Ok(true)
        }
        None => {
            error!("Court booking failed, no confirmation shown");
            Ok(false)
        }
    }
}
