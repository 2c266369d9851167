mod business;
mod task;
mod user;
mod workspace;

pub use business::{Business, BusinessStatus, Stage};
pub use task::{Task, TaskWithRelations};
pub use user::User;
pub use workspace::{MemberRole, Workspace, WorkspaceMember};
