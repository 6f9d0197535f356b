//! Filtered SELECT assembly.
//!
//! A [`Clause`] carries JOIN fragments, one predicate and the parameters that
//! predicate binds. Clauses are only constructible from `&'static str`
//! fragments plus `?` placeholders, so statement text never contains a
//! request value. [`Filters`] orders clauses and renders the final statement
//! with parameters in placeholder order.

use crate::store::SqlParam;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    joins: &'static [&'static str],
    predicate: String,
    params: Vec<SqlParam>,
}

impl Clause {
    /// A single predicate whose placeholders are bound by `params` in order.
    pub fn new(joins: &'static [&'static str], predicate: &'static str, params: Vec<SqlParam>) -> Self {
        debug_assert_eq!(
            predicate.matches('?').count(),
            params.len(),
            "placeholder count mismatch in `{}`",
            predicate
        );
        Self {
            joins,
            predicate: predicate.to_string(),
            params,
        }
    }

    /// `(fragment OR fragment OR ...)`, one single-placeholder fragment per
    /// value. `None` when there are no values.
    pub fn any_of(
        joins: &'static [&'static str],
        fragment: &'static str,
        values: Vec<SqlParam>,
    ) -> Option<Self> {
        debug_assert_eq!(fragment.matches('?').count(), 1);
        if values.is_empty() {
            return None;
        }
        let predicate = format!("({})", vec![fragment; values.len()].join(" OR "));
        Some(Self {
            joins,
            predicate,
            params: values,
        })
    }

    /// `column IN (?, ...)`. `None` when there are no values.
    pub fn in_list(
        joins: &'static [&'static str],
        column: &'static str,
        values: Vec<SqlParam>,
    ) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let predicate = format!("{} IN ({})", column, vec!["?"; values.len()].join(","));
        Some(Self {
            joins,
            predicate,
            params: values,
        })
    }
}

/// Normalized pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub limit: i64,
}

impl Page {
    /// Absent or non-positive values fall back to page 1 and the default
    /// size; the size is capped at [`MAX_PAGE_SIZE`].
    pub fn new(number: Option<i64>, limit: Option<i64>) -> Self {
        let number = number.filter(|n| *n > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        Self { number, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

#[derive(Debug, Clone, Default)]
pub struct Filters {
    clauses: Vec<Clause>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Option<Clause>) -> &mut Self {
        if let Some(clause) = clause {
            self.clauses.push(clause);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn select(&self, base: &'static str, order_by: &'static str, page: Option<Page>) -> BuiltQuery {
        let mut built = self.render(base);
        built.sql.push_str(" ORDER BY ");
        built.sql.push_str(order_by);
        if let Some(page) = page {
            built.sql.push_str(" LIMIT ? OFFSET ?");
            built.params.push(SqlParam::Int(page.limit));
            built.params.push(SqlParam::Int(page.offset()));
        }
        built
    }

    pub fn count(&self, base: &'static str) -> BuiltQuery {
        self.render(base)
    }

    fn render(&self, base: &'static str) -> BuiltQuery {
        let mut sql = String::from(base);
        let mut params = Vec::new();

        let mut seen: Vec<&'static str> = Vec::new();
        for join in self.clauses.iter().flat_map(|c| c.joins.iter().copied()) {
            if !seen.contains(&join) {
                seen.push(join);
                sql.push(' ');
                sql.push_str(join);
            }
        }

        for (i, clause) in self.clauses.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&clause.predicate);
            params.extend(clause.params.iter().cloned());
        }

        BuiltQuery { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG_JOINS: &[&str] = &["JOIN tags g ON g.item_id = i.id"];

    #[test]
    fn no_filters_renders_base_only() {
        let q = Filters::new().select("SELECT i.id FROM items i", "i.id", None);
        assert_eq!(q.sql, "SELECT i.id FROM items i ORDER BY i.id");
        assert!(q.params.is_empty());
    }

    #[test]
    fn clauses_combine_with_and_in_push_order() {
        let mut filters = Filters::new();
        filters
            .push(Clause::any_of(TAG_JOINS, "g.name = ?", vec!["a".into(), "b".into()]))
            .push(Some(Clause::new(&[], "i.name LIKE ?", vec!["%x%".into()])));

        let q = filters.select("SELECT i.id FROM items i", "i.id DESC", Some(Page::new(Some(3), Some(10))));
        assert_eq!(
            q.sql,
            "SELECT i.id FROM items i JOIN tags g ON g.item_id = i.id \
             WHERE (g.name = ? OR g.name = ?) AND i.name LIKE ? ORDER BY i.id DESC LIMIT ? OFFSET ?"
        );
        assert_eq!(
            q.params,
            vec!["a".into(), "b".into(), "%x%".into(), SqlParam::Int(10), SqlParam::Int(20)]
        );
    }

    #[test]
    fn count_shares_filters_without_order_or_limit() {
        let mut filters = Filters::new();
        filters.push(Clause::in_list(TAG_JOINS, "g.id", vec![SqlParam::Int(4), SqlParam::Int(9)]));

        let q = filters.count("SELECT COUNT(DISTINCT i.id) FROM items i");
        assert_eq!(
            q.sql,
            "SELECT COUNT(DISTINCT i.id) FROM items i JOIN tags g ON g.item_id = i.id WHERE g.id IN (?,?)"
        );
        assert_eq!(q.params, vec![SqlParam::Int(4), SqlParam::Int(9)]);
    }

    #[test]
    fn empty_value_lists_add_nothing() {
        let mut filters = Filters::new();
        filters
            .push(Clause::any_of(TAG_JOINS, "g.name = ?", vec![]))
            .push(Clause::in_list(TAG_JOINS, "g.id", vec![]));
        assert!(filters.is_empty());
    }

    #[test]
    fn shared_joins_render_once() {
        let mut filters = Filters::new();
        filters
            .push(Clause::in_list(TAG_JOINS, "g.id", vec![SqlParam::Int(1)]))
            .push(Some(Clause::new(TAG_JOINS, "g.name <> ?", vec!["z".into()])));
        let q = filters.count("SELECT COUNT(*) FROM items i");
        assert_eq!(q.sql.matches("JOIN tags").count(), 1);
    }

    #[test]
    fn page_defaults_and_cap() {
        assert_eq!(Page::new(None, None), Page { number: 1, limit: DEFAULT_PAGE_SIZE });
        assert_eq!(Page::new(Some(0), Some(-5)), Page { number: 1, limit: DEFAULT_PAGE_SIZE });
        assert_eq!(Page::new(Some(2), Some(500)).limit, MAX_PAGE_SIZE);
        assert_eq!(Page::new(Some(3), Some(100)).offset(), 200);
    }
}
