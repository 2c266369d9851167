use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod add;
pub mod businesses;
pub mod convert;
pub mod display;
pub mod edit;
pub mod setup;
pub mod show;
pub mod tasks;

pub use add::run_add;
pub use businesses::{run_customers, run_leads};
pub use convert::run_convert;
pub use edit::run_edit;
pub use setup::{run_login, run_setup, run_whoami};
pub use show::run_show;
pub use tasks::{run_task_add, run_tasks};

#[derive(Parser)]
#[command(name = "kundebok")]
#[command(about = "Workspace-scoped CRM for the command line")]
#[command(version)]
pub struct Cli {
    /// Database file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap a workspace with an admin user and sign in
    Setup(SetupArgs),
    /// Sign in as an existing user
    Login(LoginArgs),
    /// Show the active user and workspace
    Whoami,
    /// List or search customers
    Customers(ListArgs),
    /// List or search leads
    Leads(ListArgs),
    /// Show full details for a business
    Show(ShowArgs),
    /// Add a new business
    Add(AddArgs),
    /// Edit fields on a business
    Edit(EditArgs),
    /// Convert a lead into a customer
    Convert(ConvertArgs),
    /// List or search tasks
    Tasks(TasksArgs),
    /// Add a new task
    TaskAdd(TaskAddArgs),
}

#[derive(Args)]
pub struct SetupArgs {
    /// Workspace name
    #[arg(long)]
    pub workspace: String,
    /// Email of the admin user to create
    #[arg(long)]
    pub user: String,
    /// Display name of the admin user (defaults to the email)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Email of an existing user
    pub email: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Free-text search query; omit to list everything
    pub query: Option<String>,
    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Business id
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Business name
    pub name: String,
    #[arg(long)]
    pub org_number: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub contact_person: Option<String>,
    /// Create as a customer instead of a lead
    #[arg(long)]
    pub customer: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Business id
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub org_number: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub contact_person: Option<String>,
    #[arg(long)]
    pub street_address: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub postal_city: Option<String>,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Business id
    pub id: String,
}

#[derive(Args)]
pub struct TasksArgs {
    /// Free-text search query; omit to list everything
    pub query: Option<String>,
    /// Only tasks assigned to this user (email)
    #[arg(long, value_name = "EMAIL")]
    pub assignee: Option<String>,
    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct TaskAddArgs {
    /// Task title
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Linked business id
    #[arg(long, value_name = "ID")]
    pub business: Option<String>,
    /// Assignee emails (repeatable)
    #[arg(long = "assign", value_name = "EMAIL")]
    pub assignees: Vec<String>,
}
