use anyhow::{bail, Result};

use super::display::print_task_table;
use super::TaskAddArgs;
use crate::db::Database;
use crate::models::Task;
use crate::session::Session;

/// Execute the tasks command. An `--assignee` email is resolved to a user id
/// before the query layer sees it.
pub fn run_tasks(db: &Database, query: Option<&str>, assignee: Option<&str>, json: bool) -> Result<()> {
    let session = Session::resolve(db)?;

    let assignee_id = match assignee {
        Some(email) => match db.get_user_by_email(email)? {
            Some(user) => Some(user.id),
            None => bail!("No user with email {}.", email),
        },
        None => None,
    };

    let tasks = match query {
        Some(q) if !q.trim().is_empty() => {
            db.search_tasks(&session.workspace_id, q, assignee_id.as_deref())
        }
        _ => db.list_tasks(&session.workspace_id, assignee_id.as_deref())?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        print_task_table(&tasks);
    }
    Ok(())
}

/// Execute the task-add command
pub fn run_task_add(db: &Database, args: &TaskAddArgs) -> Result<()> {
    let session = Session::resolve(db)?;

    let mut task = Task::new(&session.workspace_id, args.title.trim());
    task.description = args.description.clone();

    if let Some(ref business_id) = args.business {
        if db.get_business(business_id, &session.workspace_id)?.is_none() {
            bail!("No business found with ID: {}", business_id);
        }
        task.business_id = Some(business_id.clone());
    }

    let mut assignee_ids = Vec::new();
    for email in &args.assignees {
        match db.get_user_by_email(email)? {
            Some(user) => assignee_ids.push(user.id),
            None => bail!("No user with email {}.", email),
        }
    }

    db.insert_task(&task, &assignee_ids)?;

    println!("Created task {} ({})", task.title, task.id);
    Ok(())
}
