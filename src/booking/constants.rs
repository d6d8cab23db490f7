// thirtyfour (selenium) inputs
pub const BASE_URL: &str = "https://courtbooking.bayclubs.com";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 800;

// Upper bound on the status request sent before each page load.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// Courts open for booking one week ahead.
pub const DAYS_AHEAD: u64 = 7;

// Login form
pub const EMAIL_INPUT_ID: &str = "InputEmail1";
pub const PASSWORD_INPUT_ID: &str = "InputPassword1";
pub const LOGIN_BUTTON_ID: &str = "loginButton";
pub const LOGIN_ERROR_ID: &str = "loginresult";

// Court sheet filters
pub const LOCATION_SELECT_ID: &str = "squashlocation";
pub const DATE_SELECT_ID: &str = "myid";

// Booking dialog
pub const DURATION_BUTTON_ID: &str = "length45";
pub const CLEAR_SELECTION_ID: &str = "clearselection";
pub const ERROR_DIALOG_ID: &str = "myModalBody";
pub const CONFIRMATION_RETURN_ID: &str = "backToCourtSheet";

// HTML class selectors
pub const SELECTION_ALERT_SELECTOR: &str = ".alert.alert-info";
pub const DIALOG_CLOSE_SELECTOR: &str = ".btn.btn-default";
