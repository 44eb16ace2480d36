//! PostgREST-style table queries.
//!
//! Builds the request path for a read against a hosted table store:
//! `/rest/v1/{table}?select=...&{column}=eq.{value}&order={column}.{dir}`.

use std::fmt::Write as _;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// A read query against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<(String, Order)>,
}

impl TableQuery {
    /// Start a query on `table`.
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: None,
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Set the select list (columns and embedded resources).
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = Some(columns.into());
        self
    }

    /// Equality filter. Dotted columns filter embedded resources.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters
            .push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    /// Add a sort key.
    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        let dir = if ascending { Order::Asc } else { Order::Desc };
        self.order.push((column.into(), dir));
        self
    }

    /// Table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Render the request path, including the query string.
    pub fn to_path(&self) -> String {
        let mut params: Vec<(String, String)> = Vec::new();

        params.push((
            "select".to_string(),
            self.select.clone().unwrap_or_else(|| "*".to_string()),
        ));
        params.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(col, dir)| format!("{}.{}", col, dir.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }

        let mut path = format!("/rest/v1/{}?", encode(&self.table));
        for (i, (key, value)) in params.iter().enumerate() {
            if i > 0 {
                path.push('&');
            }
            let _ = write!(path, "{}={}", encode(key), encode(value));
        }
        path
    }
}

/// Percent-encode everything PostgREST does not need verbatim.
fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'~'
            | b'*'
            | b'('
            | b')'
            | b':'
            | b',' => out.push(b as char),
            _ => {
                let _ = write!(out, "%{:02X}", b);
            }
        }
    }
    out
}
