use chrono::Utc;
use rusqlite::{params, Row};
use tracing::warn;
use uuid::Uuid;

use super::{parse_timestamp, require_workspace, search, Database, QueryError};
use crate::models::{Task, TaskWithRelations, User};

/// Fields matched by the task free-text search: title, description, the
/// linked business name and any assignee name.
const SEARCH_COLUMNS: [&str; 4] = ["t.title", "t.description", "b.name", "u.name"];

impl Database {
    // ==================== TASK CREATE ====================

    pub fn insert_task(&self, task: &Task, assignee_ids: &[String]) -> Result<(), QueryError> {
        require_workspace(&task.workspace_id)?;

        self.conn()
            .execute(
                r#"INSERT INTO tasks (
                    id, workspace_id, title, description, business_id, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
                params![
                    task.id,
                    task.workspace_id,
                    task.title,
                    task.description,
                    task.business_id,
                    task.created_at.to_rfc3339(),
                    task.updated_at.to_rfc3339(),
                ],
            )
            .map_err(QueryError::create("task"))?;

        for user_id in assignee_ids {
            self.conn()
                .execute(
                    "INSERT OR IGNORE INTO task_assignees (id, task_id, user_id, created_at)
                     VALUES (?, ?, ?, ?)",
                    params![
                        Uuid::new_v4().to_string(),
                        task.id,
                        user_id,
                        Utc::now().to_rfc3339()
                    ],
                )
                .map_err(QueryError::create("task"))?;
        }

        Ok(())
    }

    // ==================== TASK READ ====================

    /// Fetch one task with relations. Same cross-workspace contract as
    /// [`Database::get_business`].
    pub fn get_task(
        &self,
        id: &str,
        workspace_id: &str,
    ) -> Result<Option<TaskWithRelations>, QueryError> {
        require_workspace(workspace_id)?;

        let mut stmt = self
            .conn()
            .prepare("SELECT * FROM tasks WHERE id = ?1 AND workspace_id = ?2")
            .map_err(QueryError::fetch("task"))?;

        let result = stmt.query_row(params![id, workspace_id], row_to_task);

        match result {
            Ok(task) => Ok(Some(self.load_relations(task)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(QueryError::fetch("task")(e)),
        }
    }

    /// List tasks for a workspace, most recently updated first, optionally
    /// narrowed to tasks carrying the given assignee.
    pub fn list_tasks(
        &self,
        workspace_id: &str,
        assignee_id: Option<&str>,
    ) -> Result<Vec<TaskWithRelations>, QueryError> {
        require_workspace(workspace_id)?;

        let mut sql = String::from("SELECT t.* FROM tasks t WHERE t.workspace_id = ?1");
        if assignee_id.is_some() {
            sql.push_str(
                " AND EXISTS (SELECT 1 FROM task_assignees ta
                              WHERE ta.task_id = t.id AND ta.user_id = ?2)",
            );
        }
        sql.push_str(" ORDER BY t.updated_at DESC");

        let mut stmt = self
            .conn()
            .prepare(&sql)
            .map_err(QueryError::fetch("tasks"))?;

        let tasks = match assignee_id {
            Some(assignee) => stmt.query_map(params![workspace_id, assignee], row_to_task),
            None => stmt.query_map(params![workspace_id], row_to_task),
        }
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(QueryError::fetch("tasks"))?;

        tasks
            .into_iter()
            .map(|task| self.load_relations(task))
            .collect()
    }

    // ==================== TASK SEARCH ====================

    /// Free-text task search with the same fail-soft contract as the business
    /// searches: errors are logged and read as an empty result.
    pub fn search_tasks(
        &self,
        workspace_id: &str,
        query: &str,
        assignee_id: Option<&str>,
    ) -> Vec<TaskWithRelations> {
        match self.search_tasks_inner(workspace_id, query, assignee_id) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(error = %err, "task search failed");
                Vec::new()
            }
        }
    }

    fn search_tasks_inner(
        &self,
        workspace_id: &str,
        query: &str,
        assignee_id: Option<&str>,
    ) -> Result<Vec<TaskWithRelations>, QueryError> {
        if query.trim().is_empty() {
            return self.list_tasks(workspace_id, assignee_id);
        }

        require_workspace(workspace_id)?;

        let mut sql = format!(
            "SELECT DISTINCT t.* FROM tasks t
             LEFT JOIN businesses b ON b.id = t.business_id
             LEFT JOIN task_assignees ta ON ta.task_id = t.id
             LEFT JOIN users u ON u.id = ta.user_id
             WHERE t.workspace_id = ?1 AND {}",
            search::like_clause(&SEARCH_COLUMNS, 2)
        );
        if assignee_id.is_some() {
            sql.push_str(
                " AND EXISTS (SELECT 1 FROM task_assignees x
                              WHERE x.task_id = t.id AND x.user_id = ?3)",
            );
        }
        sql.push_str(" ORDER BY t.updated_at DESC");

        let mut stmt = self
            .conn()
            .prepare(&sql)
            .map_err(QueryError::fetch("tasks"))?;

        let pattern = search::like_pattern(query);
        let tasks = match assignee_id {
            Some(assignee) => stmt.query_map(params![workspace_id, pattern, assignee], row_to_task),
            None => stmt.query_map(params![workspace_id, pattern], row_to_task),
        }
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(QueryError::fetch("tasks"))?;

        tasks
            .into_iter()
            .map(|task| self.load_relations(task))
            .collect()
    }

    // ==================== TASK UPDATE ====================

    /// Update title, description and business link. Bumps `updated_at`.
    pub fn update_task(&self, task: &Task) -> Result<bool, QueryError> {
        require_workspace(&task.workspace_id)?;

        let now = Utc::now();
        let rows = self
            .conn()
            .execute(
                "UPDATE tasks SET title = ?, description = ?, business_id = ?, updated_at = ?
                 WHERE id = ? AND workspace_id = ?",
                params![
                    task.title,
                    task.description,
                    task.business_id,
                    now.to_rfc3339(),
                    task.id,
                    task.workspace_id,
                ],
            )
            .map_err(QueryError::update("task"))?;

        Ok(rows > 0)
    }

    // ==================== RELATIONS ====================

    fn load_relations(&self, task: Task) -> Result<TaskWithRelations, QueryError> {
        let assignees = self.assignees_for_task(&task.id)?;

        let business = match &task.business_id {
            Some(business_id) => self.get_business(business_id, &task.workspace_id)?,
            None => None,
        };

        Ok(TaskWithRelations {
            task,
            assignees,
            business,
        })
    }

    fn assignees_for_task(&self, task_id: &str) -> Result<Vec<User>, QueryError> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT u.* FROM users u
                 JOIN task_assignees ta ON ta.user_id = u.id
                 WHERE ta.task_id = ?
                 ORDER BY u.name",
            )
            .map_err(QueryError::fetch("task"))?;

        stmt.query_map([task_id], super::users::row_to_user)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(QueryError::fetch("task"))
    }
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Task {
        id: row.get("id")?,
        workspace_id: row.get("workspace_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        business_id: row.get("business_id")?,
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Business, Stage, Workspace};
    use chrono::Duration;

    struct Fixture {
        db: Database,
        workspace: Workspace,
        user: User,
        business: Business,
    }

    fn fixture() -> Fixture {
        let db = Database::open_memory().unwrap();

        let workspace = Workspace::new("Acme");
        db.insert_workspace(&workspace).unwrap();

        let user = User::new("Kari Nordmann", "kari@acme.no");
        db.insert_user(&user).unwrap();

        let mut business = Business::new(&workspace.id, "Fjellheim AS");
        business.stage = Stage::Customer;
        db.insert_business(&business).unwrap();

        Fixture {
            db,
            workspace,
            user,
            business,
        }
    }

    #[test]
    fn test_insert_and_get_task_with_relations() {
        let f = fixture();

        let mut task = Task::new(&f.workspace.id, "Call about renewal");
        task.description = Some("Quarterly contract".to_string());
        task.business_id = Some(f.business.id.clone());
        f.db
            .insert_task(&task, std::slice::from_ref(&f.user.id))
            .unwrap();

        let fetched = f.db.get_task(&task.id, &f.workspace.id).unwrap().unwrap();
        assert_eq!(fetched.task.title, "Call about renewal");
        assert_eq!(fetched.assignees.len(), 1);
        assert_eq!(fetched.assignees[0].email, "kari@acme.no");
        assert_eq!(fetched.business.as_ref().unwrap().name, "Fjellheim AS");
    }

    #[test]
    fn test_get_task_cross_workspace_returns_none() {
        let f = fixture();
        let other = Workspace::new("Other");
        f.db.insert_workspace(&other).unwrap();

        let task = Task::new(&f.workspace.id, "Private");
        f.db.insert_task(&task, &[]).unwrap();

        assert!(f.db.get_task(&task.id, &other.id).unwrap().is_none());
        assert!(f.db.get_task(&task.id, &f.workspace.id).unwrap().is_some());
    }

    #[test]
    fn test_list_tasks_ordered_and_filtered_by_assignee() {
        let f = fixture();
        let other_user = User::new("Ola Hansen", "ola@acme.no");
        f.db.insert_user(&other_user).unwrap();

        let base = Utc::now();

        let mut assigned = Task::new(&f.workspace.id, "Assigned to Kari");
        assigned.updated_at = base + Duration::seconds(10);
        f.db.insert_task(&assigned, std::slice::from_ref(&f.user.id))
            .unwrap();

        let mut unassigned = Task::new(&f.workspace.id, "Nobody's task");
        unassigned.updated_at = base + Duration::seconds(20);
        f.db.insert_task(&unassigned, &[]).unwrap();

        let mut olas = Task::new(&f.workspace.id, "Assigned to Ola");
        olas.updated_at = base + Duration::seconds(30);
        f.db.insert_task(&olas, std::slice::from_ref(&other_user.id))
            .unwrap();

        let all = f.db.list_tasks(&f.workspace.id, None).unwrap();
        let titles: Vec<&str> = all.iter().map(|t| t.task.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Assigned to Ola", "Nobody's task", "Assigned to Kari"]
        );

        let karis = f.db.list_tasks(&f.workspace.id, Some(&f.user.id)).unwrap();
        assert_eq!(karis.len(), 1);
        assert_eq!(karis[0].task.title, "Assigned to Kari");
    }

    #[test]
    fn test_list_tasks_blank_workspace_is_an_error() {
        let f = fixture();
        assert!(matches!(
            f.db.list_tasks("", None),
            Err(QueryError::WorkspaceRequired)
        ));
        assert!(matches!(
            f.db.get_task("id", " "),
            Err(QueryError::WorkspaceRequired)
        ));
    }

    #[test]
    fn test_search_matches_title_description_business_and_assignee() {
        let f = fixture();

        let mut task = Task::new(&f.workspace.id, "Renewal call");
        task.description = Some("Discuss onboarding".to_string());
        task.business_id = Some(f.business.id.clone());
        f.db
            .insert_task(&task, std::slice::from_ref(&f.user.id))
            .unwrap();

        f.db.insert_task(&Task::new(&f.workspace.id, "Unrelated"), &[])
            .unwrap();

        for query in ["RENEWAL", "onboarding", "fjellheim", "kari"] {
            let hits = f.db.search_tasks(&f.workspace.id, query, None);
            assert_eq!(hits.len(), 1, "query {:?}", query);
            assert_eq!(hits[0].task.title, "Renewal call");
        }

        assert!(f.db.search_tasks(&f.workspace.id, "no-hit", None).is_empty());
    }

    #[test]
    fn test_search_with_assignee_filter() {
        let f = fixture();

        let kari_task = Task::new(&f.workspace.id, "Renewal for Kari");
        f.db
            .insert_task(&kari_task, std::slice::from_ref(&f.user.id))
            .unwrap();
        let loose_task = Task::new(&f.workspace.id, "Renewal unassigned");
        f.db.insert_task(&loose_task, &[]).unwrap();

        let hits = f
            .db
            .search_tasks(&f.workspace.id, "renewal", Some(&f.user.id));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].task.title, "Renewal for Kari");
    }

    #[test]
    fn test_empty_query_search_equals_listing() {
        let f = fixture();

        let base = Utc::now();
        for i in 0..3 {
            let mut t = Task::new(&f.workspace.id, format!("Task {}", i));
            t.updated_at = base + Duration::seconds(i);
            f.db.insert_task(&t, &[]).unwrap();
        }

        let listed = f.db.list_tasks(&f.workspace.id, None).unwrap();
        let searched = f.db.search_tasks(&f.workspace.id, "", None);
        assert_eq!(searched, listed);
    }

    #[test]
    fn test_search_swallows_store_failures() {
        let f = fixture();
        f.db.conn().execute_batch("DROP TABLE tasks").unwrap();

        assert!(f.db.search_tasks(&f.workspace.id, "anything", None).is_empty());
        assert!(f.db.search_tasks("", "anything", None).is_empty());
    }

    #[test]
    fn test_update_task() {
        let f = fixture();

        let mut task = Task::new(&f.workspace.id, "Before");
        f.db.insert_task(&task, &[]).unwrap();

        task.title = "After".to_string();
        task.business_id = Some(f.business.id.clone());
        assert!(f.db.update_task(&task).unwrap());

        let fetched = f.db.get_task(&task.id, &f.workspace.id).unwrap().unwrap();
        assert_eq!(fetched.task.title, "After");
        assert!(fetched.business.is_some());
    }

    #[test]
    fn test_duplicate_assignee_is_ignored() {
        let f = fixture();

        let task = Task::new(&f.workspace.id, "Doubly assigned");
        f.db
            .insert_task(&task, &[f.user.id.clone(), f.user.id.clone()])
            .unwrap();

        let fetched = f.db.get_task(&task.id, &f.workspace.id).unwrap().unwrap();
        assert_eq!(fetched.assignees.len(), 1);
    }
}
