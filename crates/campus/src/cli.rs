//! Clap derive structures for the `campus` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use campus_core::RecordId;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// campus -- command-line dashboard for school administration servers
#[derive(Debug, Parser)]
#[command(
    name = "campus",
    version,
    about = "Manage students, courses, attendance, fees, and messaging from the command line",
    long_about = "A command-line dashboard for school administration servers.\n\n\
        Every view reads through a shared query cache; every change\n\
        invalidates exactly the collections it could have touched.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "CAMPUS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, short = 's', env = "CAMPUS_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CAMPUS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "CAMPUS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage students
    #[command(alias = "st")]
    Students(StudentsArgs),

    /// Manage teachers
    #[command(alias = "te")]
    Teachers(TeachersArgs),

    /// Manage courses
    #[command(alias = "co")]
    Courses(CoursesArgs),

    /// Manage batches
    #[command(alias = "ba")]
    Batches(BatchesArgs),

    /// Manage enrollments
    #[command(alias = "en")]
    Enrollments(EnrollmentsArgs),

    /// Record and review attendance
    #[command(alias = "att")]
    Attendance(AttendanceArgs),

    /// Manage fees and payments
    Fees(FeesArgs),

    /// Manage exams
    Exams(ExamsArgs),

    /// Record and review exam results
    Results(ResultsArgs),

    /// Internal messaging
    #[command(alias = "msg")]
    Messages(MessagesArgs),

    /// Show the dashboard summary
    #[command(alias = "dash")]
    Dashboard,

    /// Watch the dashboard, refreshing on an interval
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STUDENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// List students
    #[command(alias = "ls")]
    List {
        /// Case-insensitive name search
        #[arg(long, short = 'S')]
        search: Option<String>,

        /// Only students in this batch
        #[arg(long)]
        batch: Option<RecordId>,
    },

    /// Show one student
    Show { id: RecordId },

    /// Add a student
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Batch to place the student in
        #[arg(long)]
        batch: Option<RecordId>,
        /// Joining date (YYYY-MM-DD)
        #[arg(long)]
        joined_on: Option<String>,
    },

    /// Update a student's listed fields
    Update {
        id: RecordId,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        batch: Option<RecordId>,
    },

    /// Remove a student
    Rm { id: RecordId },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TEACHERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TeachersArgs {
    #[command(subcommand)]
    pub command: TeachersCommand,
}

#[derive(Debug, Subcommand)]
pub enum TeachersCommand {
    /// List teachers
    #[command(alias = "ls")]
    List {
        /// Case-insensitive name search
        #[arg(long, short = 'S')]
        search: Option<String>,

        /// Only teachers of this subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Add a teacher
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        subject: Option<String>,
    },

    /// Update a teacher's listed fields
    Update {
        id: RecordId,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        subject: Option<String>,
    },

    /// Remove a teacher
    Rm { id: RecordId },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COURSES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CoursesArgs {
    #[command(subcommand)]
    pub command: CoursesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CoursesCommand {
    /// List courses
    #[command(alias = "ls")]
    List,

    /// Add a course
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        description: Option<String>,
        /// Teacher responsible for the course
        #[arg(long)]
        teacher: Option<RecordId>,
    },

    /// Update a course's listed fields
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        teacher: Option<RecordId>,
    },

    /// Remove a course
    Rm { id: RecordId },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BATCHES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BatchesArgs {
    #[command(subcommand)]
    pub command: BatchesCommand,
}

#[derive(Debug, Subcommand)]
pub enum BatchesCommand {
    /// List batches
    #[command(alias = "ls")]
    List,

    /// Add a batch
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        course: Option<RecordId>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
    },

    /// Update a batch's listed fields
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        course: Option<RecordId>,
        #[arg(long)]
        capacity: Option<u32>,
    },

    /// Remove a batch
    Rm { id: RecordId },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ENROLLMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EnrollmentsArgs {
    #[command(subcommand)]
    pub command: EnrollmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnrollmentsCommand {
    /// List enrollments
    #[command(alias = "ls")]
    List {
        /// Only enrollments in this batch
        #[arg(long)]
        batch: Option<RecordId>,

        /// Only enrollments of this student
        #[arg(long)]
        student: Option<RecordId>,
    },

    /// Enroll a student into a batch
    Add {
        #[arg(long)]
        student: RecordId,
        #[arg(long)]
        batch: RecordId,
        /// Enrollment date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Withdraw an enrollment
    Rm { id: RecordId },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ATTENDANCE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AttendanceArgs {
    #[command(subcommand)]
    pub command: AttendanceCommand,
}

#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// List attendance records
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        batch: Option<RecordId>,
        #[arg(long)]
        student: Option<RecordId>,
        /// Only records on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Only records with this status (present|absent|late)
        #[arg(long)]
        status: Option<String>,
    },

    /// Summarize attendance (counts and rate)
    Summary {
        #[arg(long)]
        batch: Option<RecordId>,
        #[arg(long)]
        student: Option<RecordId>,
    },

    /// Mark attendance for a session
    Mark {
        #[arg(long)]
        student: RecordId,
        #[arg(long)]
        batch: RecordId,
        /// Session date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// present|absent|late
        #[arg(long, default_value = "present")]
        status: String,
    },

    /// Change one record's status
    Set {
        id: RecordId,
        /// present|absent|late
        #[arg(long)]
        status: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FEES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FeesArgs {
    #[command(subcommand)]
    pub command: FeesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FeesCommand {
    /// List fees
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        student: Option<RecordId>,
        /// Only fees with this status (pending|paid)
        #[arg(long)]
        status: Option<String>,
        /// Only unpaid fees past their due date
        #[arg(long)]
        overdue: bool,
    },

    /// Summarize collected, pending, and overdue fees
    Summary,

    /// Add a fee
    Add {
        #[arg(long)]
        student: RecordId,
        #[arg(long)]
        amount: f64,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
    },

    /// Record a payment
    Pay {
        id: RecordId,
        /// Payment date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EXAMS & RESULTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ExamsArgs {
    #[command(subcommand)]
    pub command: ExamsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ExamsCommand {
    /// List exams
    #[command(alias = "ls")]
    List,

    /// Schedule an exam
    Add {
        #[arg(long)]
        course: RecordId,
        #[arg(long)]
        name: String,
        /// Exam date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[arg(long)]
        max_marks: u32,
    },

    /// Remove an exam
    Rm { id: RecordId },
}

#[derive(Debug, Args)]
pub struct ResultsArgs {
    #[command(subcommand)]
    pub command: ResultsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResultsCommand {
    /// List exam results
    #[command(alias = "ls")]
    List {
        /// Only results of this exam
        #[arg(long)]
        exam: Option<RecordId>,
    },

    /// Record a student's marks
    Record {
        #[arg(long)]
        exam: RecordId,
        #[arg(long)]
        student: RecordId,
        #[arg(long)]
        marks: f64,
    },

    /// Correct recorded marks
    Set {
        id: RecordId,
        #[arg(long)]
        marks: f64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MESSAGES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MessagesArgs {
    #[command(subcommand)]
    pub command: MessagesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MessagesCommand {
    /// List messages
    #[command(alias = "ls")]
    List,

    /// Send a message
    Send {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        body: String,
    },

    /// Delete a message
    Rm { id: RecordId },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WATCH / CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Refresh interval in seconds
    #[arg(long, short = 'n', default_value = "5")]
    pub interval: u64,

    /// Stop after this many refreshes (default: run until interrupted)
    #[arg(long)]
    pub count: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the loaded configuration
    Show,

    /// Create or update a profile
    Init {
        /// Server base URL
        #[arg(long)]
        server: String,

        /// Profile name
        #[arg(long, default_value = "default")]
        profile: String,
    },

    /// Set the default profile
    Use { profile: String },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
