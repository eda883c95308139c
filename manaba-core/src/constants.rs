/// Prefix written into every event title this tool creates. An event is
/// "owned" iff its summary contains this substring.
pub const OWNED_MARKER: &str = "【提出：";

/// Closes the category label inside the title prefix.
pub const CATEGORY_CLOSE: &str = "】";

/// Written to the description of created events.
pub const TOOL_SIGNATURE: &str = "[manaba-auto]";

/// Row status text: not yet submitted.
pub const STATUS_NOT_SUBMITTED: &str = "未提出";

/// Row status text: accepting submissions.
pub const STATUS_OPEN: &str = "受付中";

/// Row status text meaning submitted / answered / done. Plain substring match.
pub const STATUS_SUBMITTED: [&str; 3] = ["提出済み", "回答済み", "済"];

pub const DEFAULT_BASE_URL: &str = "https://slms.mi.sanno.ac.jp/ct";
pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_TIME_ZONE: &str = "Asia/Tokyo";

/// How far back to list owned events.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 60;

/// Lead time of the single popup reminder on created events.
pub const DEFAULT_REMINDER_MINUTES: i64 = 60;

/// Google Calendar color "Tomato".
pub const DEFAULT_COLOR_ID: &str = "11";
