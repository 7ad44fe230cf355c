use super::{describe_failure, messages};
use roster_client::{AdminApi, ClientError};
use roster_core::{SortField, SortState, UserFields, UserId, UserRecord};
use tracing::{debug, warn};

/// Users table state.
///
/// Mutations are not optimistic: the list only changes through a full
/// re-fetch after the server accepted the change. They are only attempted
/// for admin accounts.
#[derive(Debug, Default)]
pub struct UsersView {
    users: Vec<UserRecord>,
    me: Option<UserRecord>,
    pub sort: SortState,
    pub error: Option<String>,
    login_required: bool,
}

impl UsersView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort(sort: SortState) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Records in server order.
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn me(&self) -> Option<&UserRecord> {
        self.me.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.me.as_ref().is_some_and(|me| me.is_admin)
    }

    /// Whether the last failure needs a fresh login.
    pub fn login_required(&self) -> bool {
        self.login_required
    }

    pub fn find(&self, user_id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == user_id)
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.select(field);
    }

    /// Records in display order.
    pub fn sorted(&self) -> Vec<UserRecord> {
        self.sort.sorted(&self.users)
    }

    /// Reload the current user and the full list.
    ///
    /// A failure to identify the current user is not an error by itself;
    /// the previous value is kept. A malformed list empties the table, any
    /// other failure leaves the previous list in place.
    pub async fn refetch<A: AdminApi + ?Sized>(&mut self, api: &A) -> bool {
        match api.current_user().await {
            Ok(me) => self.me = Some(me),
            Err(e) => debug!(error = %e, "Could not identify current user"),
        }

        match api.list_users().await {
            Ok(users) => {
                debug!(users = users.len(), "Users loaded");
                self.users = users;
                self.error = None;
                self.login_required = false;
                true
            }
            Err(ClientError::UnexpectedFormat(detail)) => {
                warn!(detail = %detail, "User list has unexpected format");
                self.users.clear();
                self.error = Some(messages::UNEXPECTED_FORMAT.to_string());
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to load users");
                let (message, login_required) = describe_failure(messages::USERS_LOAD_FAILED, &e);
                self.error = Some(message);
                self.login_required = login_required;
                false
            }
        }
    }

    pub async fn create<A: AdminApi + ?Sized>(&mut self, api: &A, fields: &UserFields) -> bool {
        if !self.ensure_admin(api).await {
            return false;
        }
        let result = api.create_user(fields).await;
        self.after_mutation(api, result.map(|_| ()), messages::CREATE_FAILED)
            .await
    }

    pub async fn update<A: AdminApi + ?Sized>(
        &mut self,
        api: &A,
        user_id: UserId,
        fields: &UserFields,
    ) -> bool {
        if !self.ensure_admin(api).await {
            return false;
        }
        let result = api.update_user(user_id, fields).await;
        self.after_mutation(api, result.map(|_| ()), messages::UPDATE_FAILED)
            .await
    }

    pub async fn delete<A: AdminApi + ?Sized>(&mut self, api: &A, user_id: UserId) -> bool {
        if !self.ensure_admin(api).await {
            return false;
        }
        let result = api.delete_user(user_id).await;
        self.after_mutation(api, result.map(|_| ()), messages::DELETE_FAILED)
            .await
    }

    /// Mutations are admin-only. A current user that cannot be identified
    /// is left for the server to reject.
    async fn ensure_admin<A: AdminApi + ?Sized>(&mut self, api: &A) -> bool {
        if self.me.is_none() {
            match api.current_user().await {
                Ok(me) => self.me = Some(me),
                Err(e) => debug!(error = %e, "Could not identify current user"),
            }
        }

        match &self.me {
            Some(me) if !me.is_admin => {
                warn!(user = %me.name, "Mutation refused for non-admin user");
                self.error = Some(messages::ADMIN_REQUIRED.to_string());
                self.login_required = false;
                false
            }
            _ => true,
        }
    }

    async fn after_mutation<A: AdminApi + ?Sized>(
        &mut self,
        api: &A,
        result: roster_client::Result<()>,
        action: &str,
    ) -> bool {
        match result {
            Ok(()) => self.refetch(api).await,
            Err(e) => {
                warn!(error = %e, action, "Mutation rejected");
                let (message, login_required) = describe_failure(action, &e);
                self.error = Some(message);
                self.login_required = login_required;
                false
            }
        }
    }

    /// Render the table in display order.
    pub fn render(&self) -> String {
        const COLUMNS: [(&str, Option<SortField>); 8] = [
            ("ID", Some(SortField::Id)),
            ("Name", Some(SortField::Name)),
            ("Birth year", Some(SortField::BirthYear)),
            ("Gender", Some(SortField::Gender)),
            ("Admin", Some(SortField::IsAdmin)),
            ("Created", Some(SortField::CreatedAt)),
            ("Created by", Some(SortField::CreatedBy)),
            ("Avatar", None),
        ];

        let header: Vec<String> = COLUMNS
            .iter()
            .map(|(title, field)| match field {
                Some(field) => format!("{} {}", title, self.sort.indicator(*field)),
                None => (*title).to_string(),
            })
            .collect();

        let rows: Vec<Vec<String>> = self
            .sorted()
            .iter()
            .map(|user| {
                vec![
                    user.id.to_string(),
                    user.name.clone(),
                    user.birth_year.to_string(),
                    user.gender.to_string(),
                    if user.is_admin { "yes" } else { "no" }.to_string(),
                    user.created_at.clone(),
                    user.created_by.clone().unwrap_or_else(|| "-".to_string()),
                    user.avatar_path
                        .as_ref()
                        .map_or_else(|| "-".to_string(), |_| "yes".to_string()),
                ]
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&format_row(&header, &widths));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');

        if rows.is_empty() {
            out.push_str(messages::NO_DATA);
            out.push('\n');
        }
        for row in &rows {
            out.push_str(&format_row(row, &widths));
            out.push('\n');
        }
        out
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
