//! Users resource (`/api/admin/users`). Admin-only on the backend.
//!
//! The endpoint answers the whole collection as a raw array and
//! understands no query parameters, so search, the `role`/`active`
//! filters, and pagination are all applied client-side.

use vela_core::paginate::{slice_page, PageQuery, PageResult};
use vela_core::types::{NewUser, Role, User};

use crate::envelope::ListEnvelope;
use crate::error::ClientResult;
use crate::http::ApiClient;

const BASE: &str = "/api/admin/users";

/// Client for the users resource.
#[derive(Debug, Clone)]
pub struct UsersApi {
    api: ApiClient,
}

impl UsersApi {
    pub fn new(api: ApiClient) -> Self {
        UsersApi { api }
    }

    /// One page of users matching the query's search term and filters.
    ///
    /// Search matches case-insensitively on first names, last names, and
    /// e-mail. Recognized filters: `role` (`ADMIN`/`VENDEDOR`) and
    /// `active` (`active`/`inactive`). The reported total counts the
    /// filtered collection, so the page controls stay consistent with
    /// what is shown.
    pub async fn list(&self, query: &PageQuery) -> ClientResult<PageResult<User>> {
        let envelope: ListEnvelope<User> = self.api.get(BASE).await?;
        let matching = apply_filters(envelope.into_items(), query);
        Ok(slice_page(matching, query))
    }

    pub async fn get(&self, id: &str) -> ClientResult<User> {
        self.api.get(&format!("{BASE}/{id}")).await
    }

    pub async fn create(&self, new_user: &NewUser) -> ClientResult<User> {
        self.api.post(BASE, new_user).await
    }

    pub async fn update(&self, id: &str, user: &User) -> ClientResult<User> {
        self.api.put(&format!("{BASE}/{id}"), user).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.api.delete(&format!("{BASE}/{id}")).await
    }

    /// Flips the account's active flag, returning the updated user.
    pub async fn toggle_active(&self, id: &str) -> ClientResult<User> {
        self.api.patch_empty(&format!("{BASE}/{id}/toggle-active")).await
    }
}

/// Narrows the fetched collection to the rows the query asks for.
fn apply_filters(users: Vec<User>, query: &PageQuery) -> Vec<User> {
    let search = query.search_term.trim().to_lowercase();

    users
        .into_iter()
        .filter(|u| {
            if !search.is_empty() {
                let hit = u.first_names.to_lowercase().contains(&search)
                    || u.last_names.to_lowercase().contains(&search)
                    || u.email.to_lowercase().contains(&search);
                if !hit {
                    return false;
                }
            }

            if let Some(role) = query.filters.get("role") {
                let wire = match u.role {
                    Role::Admin => "ADMIN",
                    Role::Seller => "VENDEDOR",
                };
                if wire != role {
                    return false;
                }
            }

            match query.filters.get("active").map(String::as_str) {
                Some("active") if !u.active => return false,
                Some("inactive") if u.active => return false,
                _ => {}
            }

            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: &str, email: &str, role: Role, active: bool) -> User {
        User {
            id: Some(format!("u-{email}")),
            national_id: "0912345678".to_string(),
            first_names: first.to_string(),
            last_names: last.to_string(),
            email: email.to_string(),
            role,
            active,
        }
    }

    fn staff() -> Vec<User> {
        vec![
            user("Maria", "Lopez", "maria@example.com", Role::Admin, true),
            user("Ana", "Suarez", "ana@example.com", Role::Seller, true),
            user("Carlos", "Mariscal", "carlos@example.com", Role::Seller, false),
        ]
    }

    #[test]
    fn test_search_matches_names_and_email_case_insensitive() {
        let mut query = PageQuery::new(10);
        query.set_search_term("MARI");

        // "Maria" (first names) and "Mariscal" (last names)
        let matched = apply_filters(staff(), &query);
        assert_eq!(matched.len(), 2);

        query.set_search_term("ana@");
        let matched = apply_filters(staff(), &query);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].email, "ana@example.com");
    }

    #[test]
    fn test_role_and_active_filters() {
        let mut query = PageQuery::new(10);
        query.set_filter("role", "VENDEDOR");
        let matched = apply_filters(staff(), &query);
        assert_eq!(matched.len(), 2);

        query.set_filter("active", "inactive");
        let matched = apply_filters(staff(), &query);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].first_names, "Carlos");

        query.set_filter("active", "active");
        query.set_filter("role", "");
        let matched = apply_filters(staff(), &query);
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_filtered_total_feeds_pagination() {
        let mut query = PageQuery::new(2);
        query.set_filter("role", "VENDEDOR");

        let page = slice_page(apply_filters(staff(), &query), &query);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items.len(), 2);

        // No filters: three users, page 2 holds the remainder
        let mut query = PageQuery::new(2);
        query.page = 2;
        let page = slice_page(apply_filters(staff(), &query), &query);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.items.len(), 1);
    }
}
