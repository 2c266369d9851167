pub const SCHEMA_VERSION: i32 = 1;

pub const SCHEMA_V1: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL
);

-- Tenancy root
CREATE TABLE IF NOT EXISTS workspaces (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS workspace_members (
    id TEXT PRIMARY KEY,
    workspace_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'member',
    created_at TEXT NOT NULL,
    FOREIGN KEY (workspace_id) REFERENCES workspaces(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    UNIQUE(workspace_id, user_id)
);

CREATE TABLE IF NOT EXISTS businesses (
    id TEXT PRIMARY KEY,
    workspace_id TEXT NOT NULL,
    name TEXT NOT NULL,
    org_number TEXT,
    org_form TEXT,
    industry_code TEXT,
    industry_description TEXT,
    email TEXT,
    phone TEXT,
    contact_person TEXT,
    street_address TEXT,
    postal_code TEXT,
    postal_city TEXT,
    stage TEXT NOT NULL DEFAULT 'lead',
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (workspace_id) REFERENCES workspaces(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    workspace_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    business_id TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (workspace_id) REFERENCES workspaces(id) ON DELETE CASCADE,
    FOREIGN KEY (business_id) REFERENCES businesses(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS task_assignees (
    id TEXT PRIMARY KEY,
    task_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (task_id) REFERENCES tasks(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    UNIQUE(task_id, user_id)
);

-- Key-value settings (active user, etc.)
CREATE TABLE IF NOT EXISTS app_settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_business_workspace ON businesses(workspace_id);
CREATE INDEX IF NOT EXISTS idx_business_workspace_stage ON businesses(workspace_id, stage);
CREATE INDEX IF NOT EXISTS idx_business_updated ON businesses(updated_at);
CREATE INDEX IF NOT EXISTS idx_task_workspace ON tasks(workspace_id);
CREATE INDEX IF NOT EXISTS idx_task_business ON tasks(business_id);
CREATE INDEX IF NOT EXISTS idx_task_updated ON tasks(updated_at);
CREATE INDEX IF NOT EXISTS idx_assignee_task ON task_assignees(task_id);
CREATE INDEX IF NOT EXISTS idx_assignee_user ON task_assignees(user_id);
CREATE INDEX IF NOT EXISTS idx_member_workspace ON workspace_members(workspace_id);
CREATE INDEX IF NOT EXISTS idx_member_user ON workspace_members(user_id);
CREATE INDEX IF NOT EXISTS idx_user_email ON users(email);
"#;
