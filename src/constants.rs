// facility layout
pub const SAUNA_COUNT: u32 = 4;

// opening slots run hourly from 9:00 through 19:00
pub const FIRST_SLOT_HOUR: u32 = 9;
pub const LAST_SLOT_HOUR: u32 = 19;

// booking form timers
pub const AVAILABILITY_POLL_SECS: u64 = 10;
pub const SUBMITTED_RESET_SECS: u64 = 3;

// outbound notification
pub const DEFAULT_MAIL_API_BASE: &str = "https://api.mailgun.net";
pub const NOTIFICATION_SUBJECT: &str = "【新規予約】サウナの予約リクエストがありました";

// http server
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
