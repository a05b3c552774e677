// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const HEALTH_PATH: &str = "health";

// Cron routes are served under /api/cron/{slug}
pub const API_PATH: &str = "api";
pub const CRON_PATH: &str = "cron";

// Remote store RPC endpoint, relative to the store base URL
pub const RPC_PATH: &str = "rest/v1/rpc/";
pub const STORE_USER_AGENT: &str = concat!("maintenance-crons/", env!("CARGO_PKG_VERSION"));

// Secrets shorter than this are accepted but flagged at startup
pub const MIN_RECOMMENDED_SECRET_LEN: usize = 16;

// Stored procedures invoked by the cron jobs
pub const PROC_AMBULANCE_DAILY_PENALTIES: &str = "apply_ambulance_daily_penalties";
pub const PROC_OVERDUE_PENALTIES: &str = "apply_overdue_penalties";
pub const PROC_EXPIRE_PENDING_CHALLENGES: &str = "expire_pending_challenges";
pub const PROC_MONTHLY_INACTIVITY_PENALTIES: &str = "apply_monthly_inactivity_penalties";
