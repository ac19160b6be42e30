use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::error::{AppError, AppResult};
use crate::models::{Manager, NewManager, User};
use crate::schema::{managers, users};

#[derive(Debug, Clone, Copy, Default)]
pub struct ManagerRepository;

impl ManagerRepository {
    pub async fn create(&self, conn: &mut AsyncPgConnection, new_manager: &NewManager) -> AppResult<Manager> {
        diesel::insert_into(managers::table)
            .values(new_manager)
            .returning(Manager::as_returning())
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, conn: &mut AsyncPgConnection, manager_id: i64) -> AppResult<Option<Manager>> {
        managers::table
            .find(manager_id)
            .select(Manager::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Managers of a todo joined with their users, in registration order.
    pub async fn find_by_todo_id_with_user(
        &self,
        conn: &mut AsyncPgConnection,
        todo_id: i64,
    ) -> AppResult<Vec<(Manager, User)>> {
        managers::table
            .inner_join(users::table)
            .filter(managers::todo_id.eq(todo_id))
            .order(managers::id.asc())
            .select((Manager::as_select(), User::as_select()))
            .load(conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn delete(&self, conn: &mut AsyncPgConnection, manager_id: i64) -> AppResult<usize> {
        diesel::delete(managers::table.find(manager_id))
            .execute(conn)
            .await
            .map_err(AppError::from)
    }
}
