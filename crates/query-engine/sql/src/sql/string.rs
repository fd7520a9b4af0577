//! Type definitions of a low-level SQL string representation.

/// A parameter-bound SQL string.
///
/// Built left to right by the template compiler: plain syntax and spliced
/// literals extend the text, bound parameters add a positional `?` marker and
/// push the value onto `params` in marker order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sql {
    pub sql: String,
    pub params: Vec<Param>,
}

/// A parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// A literal string value.
    String(String),
    /// An absent request parameter, bound as SQL NULL.
    Null,
}

impl Default for Sql {
    fn default() -> Self {
        Self::new()
    }
}

impl Sql {
    pub fn new() -> Sql {
        Sql {
            sql: String::new(),
            params: vec![],
        }
    }

    /// Append raw SQL syntax.
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a bound parameter as a positional `?` marker.
    pub fn append_param(&mut self, param: Param) {
        self.sql.push('?');
        self.params.push(param);
    }
}
