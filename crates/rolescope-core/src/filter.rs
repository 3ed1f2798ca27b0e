//! Incremental case-insensitive filter over the role collection.

use std::rc::Rc;

use crate::MAX_QUERY_LEN;
use crate::role::Role;

/// Ordered subsequence of `roles` whose name or description contains `query`
/// as a case-insensitive substring. An empty query is the identity.
#[must_use]
pub fn filter_roles(roles: &[Rc<Role>], query: &str) -> Vec<Rc<Role>> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return roles.to_vec();
    }
    roles
        .iter()
        .filter(|role| {
            role.name.to_lowercase().contains(&needle)
                || role.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Filter state: query text, derived filtered sequence, and cursor.
///
/// Recomputed synchronously on every edit; the collections are small enough
/// that correctness beats incremental diffing. When the filtered sequence
/// shrinks below the cursor, the cursor resets to 0 rather than clamping to
/// the new last item — jumping to an unrelated final entry would be more
/// surprising than returning to the top.
#[derive(Debug)]
pub struct RoleFilter {
    query: String,
    filtered: Vec<Rc<Role>>,
    cursor: usize,
}

impl RoleFilter {
    /// Create a filter over the full collection (empty query).
    #[must_use]
    pub fn new(roles: &[Rc<Role>]) -> Self {
        Self {
            query: String::new(),
            filtered: roles.to_vec(),
            cursor: 0,
        }
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The filtered sequence, in source order.
    #[must_use]
    pub fn filtered(&self) -> &[Rc<Role>] {
        &self.filtered
    }

    /// Cursor index into the filtered sequence.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The role under the cursor, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Rc<Role>> {
        self.filtered.get(self.cursor)
    }

    /// Append a character to the query and recompute. Input beyond the
    /// query length cap is ignored.
    pub fn push_char(&mut self, c: char, roles: &[Rc<Role>]) {
        if self.query.len() + c.len_utf8() > MAX_QUERY_LEN {
            return;
        }
        self.query.push(c);
        self.recompute(roles);
    }

    /// Delete the last character of the query and recompute.
    pub fn pop_char(&mut self, roles: &[Rc<Role>]) {
        if self.query.pop().is_some() {
            self.recompute(roles);
        }
    }

    /// Clear the query, restoring the full collection with the cursor at 0.
    pub fn clear(&mut self, roles: &[Rc<Role>]) {
        self.query.clear();
        self.filtered = roles.to_vec();
        self.cursor = 0;
    }

    fn recompute(&mut self, roles: &[Rc<Role>]) {
        self.filtered = filter_roles(roles, &self.query);
        if self.cursor >= self.filtered.len() {
            self.cursor = 0;
        }
    }

    /// Move the cursor down one entry, bounded at the end.
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.filtered.len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor up one entry, bounded at 0.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Jump to the first entry.
    pub fn move_first(&mut self) {
        self.cursor = 0;
    }

    /// Jump to the last entry.
    pub fn move_last(&mut self) {
        if !self.filtered.is_empty() {
            self.cursor = self.filtered.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn role(name: &str, description: &str) -> Rc<Role> {
        Rc::new(Role {
            name: name.to_string(),
            arn: format!("arn:aws:iam::123456789012:role/{name}"),
            create_date: datetime!(2023-01-01 00:00:00 UTC),
            last_used: None,
            description: description.to_string(),
            max_session_duration: 3600,
            path: "/".to_string(),
            role_id: format!("AROA{name}"),
            tags: Vec::new(),
            trust_policy: String::new(),
            managed_policies: Vec::new(),
            inline_policies: Vec::new(),
        })
    }

    fn sample() -> Vec<Rc<Role>> {
        vec![
            role("prod-admin", "production administrator"),
            role("dev-reader", "developer read access"),
            role("prod-reader", "production read access"),
        ]
    }

    #[test]
    fn query_prod_keeps_both_prod_roles_in_order() {
        let roles = sample();
        let filtered = filter_roles(&roles, "prod");
        let names: Vec<&str> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["prod-admin", "prod-reader"]);
    }

    #[test]
    fn empty_query_is_identity() {
        let roles = sample();
        let filtered = filter_roles(&roles, "");
        assert_eq!(filtered.len(), roles.len());
        for (kept, original) in filtered.iter().zip(roles.iter()) {
            assert!(Rc::ptr_eq(kept, original));
        }
    }

    #[test]
    fn matching_is_case_insensitive_and_covers_description() {
        let roles = sample();
        assert_eq!(filter_roles(&roles, "PROD").len(), 2);
        assert_eq!(filter_roles(&roles, "developer").len(), 1);
        assert!(filter_roles(&roles, "missing").is_empty());
    }

    #[test]
    fn result_is_ordered_subsequence() {
        let roles = sample();
        let filtered = filter_roles(&roles, "reader");
        let mut last_position = 0;
        for kept in &filtered {
            let position = roles
                .iter()
                .position(|r| Rc::ptr_eq(r, kept))
                .expect("filtered role must come from the source");
            assert!(position >= last_position);
            last_position = position;
        }
    }

    #[test]
    fn cursor_resets_to_zero_when_filter_shrinks_past_it() {
        let roles = sample();
        let mut filter = RoleFilter::new(&roles);
        filter.move_last();
        assert_eq!(filter.cursor(), 2);

        for c in "prod".chars() {
            filter.push_char(c, &roles);
        }
        assert_eq!(filter.filtered().len(), 2);
        assert_eq!(filter.cursor(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds_after_any_navigation() {
        let roles = sample();
        let mut filter = RoleFilter::new(&roles);
        filter.move_up();
        assert_eq!(filter.cursor(), 0);
        filter.move_down();
        filter.move_down();
        filter.move_down();
        assert_eq!(filter.cursor(), 2);
        filter.move_first();
        assert_eq!(filter.cursor(), 0);
        filter.move_last();
        assert_eq!(filter.cursor(), 2);
        assert!(filter.cursor() < filter.filtered().len());
    }

    #[test]
    fn query_length_is_capped() {
        let roles = sample();
        let mut filter = RoleFilter::new(&roles);
        for _ in 0..150 {
            filter.push_char('a', &roles);
        }
        assert_eq!(filter.query().len(), crate::MAX_QUERY_LEN);
    }

    #[test]
    fn clear_restores_full_collection() {
        let roles = sample();
        let mut filter = RoleFilter::new(&roles);
        for c in "prod".chars() {
            filter.push_char(c, &roles);
        }
        filter.move_down();
        filter.clear(&roles);
        assert_eq!(filter.query(), "");
        assert_eq!(filter.filtered().len(), 3);
        assert_eq!(filter.cursor(), 0);
    }

    #[test]
    fn pop_char_recomputes() {
        let roles = sample();
        let mut filter = RoleFilter::new(&roles);
        for c in "prod-a".chars() {
            filter.push_char(c, &roles);
        }
        assert_eq!(filter.filtered().len(), 1);
        filter.pop_char(&roles);
        filter.pop_char(&roles);
        assert_eq!(filter.filtered().len(), 2);
    }

    #[test]
    fn empty_collection_keeps_cursor_at_zero() {
        let roles: Vec<Rc<Role>> = Vec::new();
        let mut filter = RoleFilter::new(&roles);
        filter.move_down();
        filter.move_last();
        assert_eq!(filter.cursor(), 0);
        assert!(filter.selected().is_none());
    }
}
