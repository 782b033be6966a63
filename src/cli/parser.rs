use clap::{Parser, Subcommand};

/// Command-line interface definition for puntual
#[derive(Parser)]
#[command(
    name = "puntual",
    version = env!("CARGO_PKG_VERSION"),
    about = "Time-and-attendance CLI: reconcile clock events against shift templates and manage approvals",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check that all expected tables exist")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a raw clock event for a person
    Clock {
        /// Person id
        person: i64,

        /// Motive text (e.g. "entrada", "salida", "salida de comida")
        #[arg(long = "motive", default_value = "")]
        motive: String,

        /// Numeric motive code (1=entrance, 2=exit, 3=meal-in, 4=meal-out)
        #[arg(long = "code")]
        code: Option<i64>,

        /// Date of the event (YYYY-MM-DD, default today)
        #[arg(long = "date")]
        date: Option<String>,

        /// Time of the event (HH:MM or HH:MM:SS, default now)
        #[arg(long = "time")]
        time: Option<String>,

        /// Mark the event as a manual entry
        #[arg(long = "manual")]
        manual: bool,

        /// Observation note attached to the entry
        #[arg(long = "note", default_value = "")]
        note: String,
    },

    /// Create, list or delete weekly shift templates
    Template {
        #[arg(long = "new", help = "Create a template with the given name")]
        new: Option<String>,

        #[arg(long = "list", help = "List all templates")]
        list: bool,

        #[arg(long = "del", help = "Delete a template by id")]
        del: Option<i64>,

        #[arg(long = "inactive", help = "Create the template as inactive")]
        inactive: bool,

        /// Per-day windows: HH:MM-HH:MM or HH:MM-HH:MM@HH:MM-HH:MM (meal)
        #[arg(long = "mon")]
        mon: Option<String>,
        #[arg(long = "tue")]
        tue: Option<String>,
        #[arg(long = "wed")]
        wed: Option<String>,
        #[arg(long = "thu")]
        thu: Option<String>,
        #[arg(long = "fri")]
        fri: Option<String>,
        #[arg(long = "sat")]
        sat: Option<String>,
        #[arg(long = "sun")]
        sun: Option<String>,
    },

    /// Assign a shift template to a person (replaces any previous one)
    Assign {
        /// Person id
        person: i64,

        /// Template id
        template: i64,

        #[arg(long = "role", default_value = "", help = "Role/position name")]
        role: String,
    },

    /// Show the raw event history of a person, newest first
    History {
        /// Person id
        person: i64,
    },

    /// Weekly reconciliation report for a person over a period
    Report {
        /// Person id
        person: i64,

        /// Period: YYYY-MM-DD, YYYY-MM, YYYY or FROM:TO (default: current month)
        #[arg(long = "period")]
        period: Option<String>,

        #[arg(long = "days", help = "Also print the per-day breakdown")]
        days: bool,

        #[arg(long = "json", help = "Emit the report as JSON")]
        json: bool,
    },

    /// Submit a leave/incident request, or show pending counters
    Request {
        #[arg(long = "new", help = "Create a new request")]
        new: bool,

        #[arg(long = "pending", help = "Show pending request counters")]
        pending: bool,

        #[arg(long = "kind", default_value = "permission", help = "permission | incident")]
        kind: String,

        #[arg(long = "person")]
        person: Option<i64>,

        #[arg(long = "reason", default_value = "")]
        reason: String,

        #[arg(long = "from", help = "Start date (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long = "to", help = "End date (YYYY-MM-DD, default: start date)")]
        to: Option<String>,
    },

    /// Approve or reject requests, one key or a batch of kind:id keys
    Resolve {
        /// Request keys, e.g. permission:5 incident:12
        #[arg(required = true)]
        keys: Vec<String>,

        /// approve | reject
        #[arg(long = "action")]
        action: String,

        /// Approver person id
        #[arg(long = "approver")]
        approver: i64,

        /// Resolution comment (blank keeps any existing comment)
        #[arg(long = "comment", default_value = "")]
        comment: String,

        #[arg(long = "json", help = "Emit the outcome as JSON")]
        json: bool,
    },
}
