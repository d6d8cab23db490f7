use std::fmt;

use crate::models::club::Club;
use crate::models::window::BookingWindow;

#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub club: Club,
    pub credentials: Credentials,
    pub window: BookingWindow,
}
