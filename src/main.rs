use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kundebok::cli::{
    run_add, run_convert, run_customers, run_edit, run_leads, run_login, run_setup, run_show,
    run_task_add, run_tasks, run_whoami, Cli, Commands,
};
use kundebok::db::Database;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kundebok=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let db = match cli.db {
        Some(path) => Database::open_at(path)?,
        None => Database::open()?,
    };

    match cli.command {
        Commands::Setup(args) => {
            run_setup(&db, &args.workspace, &args.user, args.name.as_deref())?;
        }
        Commands::Login(args) => {
            run_login(&db, &args.email)?;
        }
        Commands::Whoami => {
            run_whoami(&db)?;
        }
        Commands::Customers(args) => {
            run_customers(&db, args.query.as_deref(), args.json)?;
        }
        Commands::Leads(args) => {
            run_leads(&db, args.query.as_deref(), args.json)?;
        }
        Commands::Show(args) => {
            run_show(&db, &args.id)?;
        }
        Commands::Add(args) => {
            run_add(&db, &args)?;
        }
        Commands::Edit(args) => {
            run_edit(&db, &args)?;
        }
        Commands::Convert(args) => {
            run_convert(&db, &args.id)?;
        }
        Commands::Tasks(args) => {
            run_tasks(&db, args.query.as_deref(), args.assignee.as_deref(), args.json)?;
        }
        Commands::TaskAdd(args) => {
            run_task_add(&db, &args)?;
        }
    }

    Ok(())
}
