//! Template parsing: multi-statement splitting, fetch-directive extraction,
//! placeholder substitution and fetch-mode inference.

use std::sync::LazyLock;

use regex::Regex;

use litegate_configuration::{MissingParameterPolicy, QueryLibrary, DEFAULT_SCOPE};
use query_engine_sql::sql::statement::{Batch, DatabaseName, Statement};
use query_engine_sql::sql::string::{Param, Sql};

use super::error::Error;
use super::{ParameterResolver, DATABASE_PARAMETER, ENTITY_PARAMETER, QUERY_PARAMETER};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(\w+)%").expect("placeholder pattern"));
static ONE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| directive_pattern("one"));
static ALL_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| directive_pattern("all"));
static OID_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| directive_pattern("oid"));
static NB_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| directive_pattern("nb"));

fn directive_pattern(keyword: &str) -> Regex {
    Regex::new(&format!(r"(?i)\s*\|\s*{keyword}\s*$")).expect("directive pattern")
}

/// Compile the template addressed by the request into an executable batch.
///
/// The database name and query id are resolved through the request itself;
/// the entity name, when supplied, selects the library scope and otherwise
/// the default scope is searched.
pub fn compile(
    library: &QueryLibrary,
    policy: MissingParameterPolicy,
    resolver: &dyn ParameterResolver,
) -> Result<Batch, Error> {
    let database = resolve_mandatory(resolver, DATABASE_PARAMETER)?;
    let query_id = resolve_mandatory(resolver, QUERY_PARAMETER)?;
    let scope = resolver
        .resolve(ENTITY_PARAMETER)
        .unwrap_or_else(|| DEFAULT_SCOPE.to_string());

    let template = library.lookup(&scope, &query_id)?;

    let mut statements = template
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| compile_segment(segment, policy, resolver))
        .collect::<Result<Vec<Statement>, Error>>()?;

    // a multi-statement batch never produces row, oid or count output
    if statements.len() > 1 {
        for statement in &mut statements {
            statement.clear_fetch();
        }
    }

    let batch = Batch {
        database: DatabaseName(database),
        statements,
    };

    tracing::info!("compiled batch: {:?}", batch);
    Ok(batch)
}

/// Compile one `;`-separated template segment into a statement.
fn compile_segment(
    segment: &str,
    policy: MissingParameterPolicy,
    resolver: &dyn ParameterResolver,
) -> Result<Statement, Error> {
    let (body, directives) = extract_fetch_directives(segment);
    let sql = substitute_placeholders(&body, policy, resolver)?;

    let verb = body
        .split_whitespace()
        .next()
        .map(str::to_ascii_uppercase)
        .unwrap_or_default();

    let mut statement = Statement::new(sql);
    statement.fetch_one = directives.one;
    statement.fetch_all = directives.all || verb == "SELECT";
    statement.fetch_oid = directives.oid || verb == "INSERT";
    statement.fetch_count = directives.nb || verb == "UPDATE" || verb == "DELETE";

    // `one` and `all` are mutually exclusive; `one` wins
    statement.fetch_all = statement.fetch_all && !statement.fetch_one;

    Ok(statement)
}

/// Which fetch directives appeared on a segment.
#[derive(Debug, Default)]
struct FetchDirectives {
    one: bool,
    all: bool,
    oid: bool,
    nb: bool,
}

/// Strip the trailing fetch directives from a segment, in priority order.
fn extract_fetch_directives(segment: &str) -> (String, FetchDirectives) {
    let mut body = segment.to_string();
    let mut strip = |pattern: &Regex| -> bool {
        match pattern.find(&body) {
            Some(found) => {
                body.truncate(found.start());
                true
            }
            None => false,
        }
    };

    let one = strip(&ONE_DIRECTIVE);
    let all = strip(&ALL_DIRECTIVE);
    let oid = strip(&OID_DIRECTIVE);
    let nb = strip(&NB_DIRECTIVE);

    (body, FetchDirectives { one, all, oid, nb })
}

/// Replace every `%name%` placeholder, left to right.
///
/// The reserved database and entity names splice their resolved value into
/// the SQL text (they name objects, not values); every other name becomes a
/// positional bind marker. The scan resumes after each replacement, so a
/// spliced value is never rescanned and the loop is finite.
fn substitute_placeholders(
    body: &str,
    policy: MissingParameterPolicy,
    resolver: &dyn ParameterResolver,
) -> Result<Sql, Error> {
    let mut sql = Sql::new();
    let mut rest = body;

    while let Some(found) = PLACEHOLDER.find(rest) {
        sql.append_syntax(&rest[..found.start()]);
        let name = found.as_str().trim_matches('%');

        if name == DATABASE_PARAMETER || name == ENTITY_PARAMETER {
            let value = resolve_mandatory(resolver, name)?;
            sql.append_syntax(&value);
        } else {
            match resolver.resolve(name) {
                Some(value) => sql.append_param(Param::String(value)),
                None => match policy {
                    MissingParameterPolicy::BindNull => sql.append_param(Param::Null),
                    MissingParameterPolicy::Reject => {
                        return Err(Error::MissingParameter(name.to_string()))
                    }
                },
            }
        }

        rest = &rest[found.end()..];
    }

    sql.append_syntax(rest);
    Ok(sql)
}

/// Resolve a parameter the operation cannot do without.
fn resolve_mandatory(resolver: &dyn ParameterResolver, name: &str) -> Result<String, Error> {
    resolver
        .resolve(name)
        .ok_or_else(|| Error::MissingParameter(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use litegate_configuration::LookupError;
    use similar_asserts::assert_eq;
    use std::collections::BTreeMap;

    fn library() -> QueryLibrary {
        let entries: &[(&str, &[(&str, &str)])] = &[
            (
                "test",
                &[
                    ("drop.table", "DROP TABLE IF EXISTS test"),
                    (
                        "insert",
                        "INSERT INTO test ( key, value ) VALUES ( %key%, %value% )",
                    ),
                    ("select.one", "SELECT * FROM test WHERE oid = %oid% | one"),
                    ("select.all", "SELECT * FROM test"),
                    ("update", "UPDATE test SET value = %value% WHERE key = %key%"),
                    ("delete", "DELETE FROM test WHERE oid = %oid%"),
                    (
                        "replace",
                        "DELETE FROM test WHERE key=%key%; \
                         INSERT INTO test (key,value) VALUES(%key%,%value%)",
                    ),
                    ("insert.entity", "INSERT INTO %tb% ( key ) VALUES ( %key% )"),
                    ("select.shout", "SELECT * FROM test WHERE oid = %oid%  |  ONE "),
                    ("pair", "INSERT INTO test (key,value) VALUES (%key%,%key%)"),
                ],
            ),
            (
                "default",
                &[
                    ("version", "SELECT sqlite_version() AS version"),
                    ("insert.entity", "INSERT INTO %tb% ( key ) VALUES ( %key% )"),
                ],
            ),
        ];

        QueryLibrary(
            entries
                .iter()
                .map(|(scope, queries)| {
                    (
                        (*scope).to_string(),
                        queries
                            .iter()
                            .map(|(id, template)| ((*id).to_string(), (*template).to_string()))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    fn request(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    fn compile_request(pairs: &[(&str, &str)]) -> Result<Batch, Error> {
        compile(
            &library(),
            MissingParameterPolicy::BindNull,
            &request(pairs),
        )
    }

    #[test]
    fn template_without_placeholders_binds_nothing() {
        let batch =
            compile_request(&[("db", "test"), ("tb", "test"), ("qr", "drop.table")]).unwrap();

        assert_eq!(batch.statements.len(), 1);
        let statement = &batch.statements[0];
        assert_eq!(statement.sql.sql, "DROP TABLE IF EXISTS test");
        assert!(statement.sql.params.is_empty());
        assert!(!statement.fetch_one);
        assert!(!statement.fetch_all);
        assert!(!statement.fetch_oid);
        assert!(!statement.fetch_count);
    }

    #[test]
    fn insert_binds_parameters_in_order_and_infers_oid() {
        let batch = compile_request(&[
            ("db", "test"),
            ("tb", "test"),
            ("qr", "insert"),
            ("key", "one"),
            ("value", "un"),
        ])
        .unwrap();

        let statement = &batch.statements[0];
        assert_eq!(
            statement.sql.sql,
            "INSERT INTO test ( key, value ) VALUES ( ?, ? )"
        );
        assert_eq!(
            statement.sql.params,
            vec![
                Param::String("one".to_string()),
                Param::String("un".to_string())
            ]
        );
        assert!(statement.fetch_oid);
        assert!(!statement.fetch_one);
        assert!(!statement.fetch_all);
        assert!(!statement.fetch_count);
    }

    #[test]
    fn update_infers_count() {
        let batch = compile_request(&[
            ("db", "test"),
            ("tb", "test"),
            ("qr", "update"),
            ("key", "one"),
            ("value", "uno"),
        ])
        .unwrap();

        let statement = &batch.statements[0];
        assert_eq!(
            statement.sql.sql,
            "UPDATE test SET value = ? WHERE key = ?"
        );
        assert_eq!(
            statement.sql.params,
            vec![
                Param::String("uno".to_string()),
                Param::String("one".to_string())
            ]
        );
        assert!(statement.fetch_count);
        assert!(!statement.fetch_oid);
    }

    #[test]
    fn select_infers_all() {
        let batch = compile_request(&[("db", "test"), ("tb", "test"), ("qr", "select.all")]).unwrap();

        let statement = &batch.statements[0];
        assert!(statement.fetch_all);
        assert!(!statement.fetch_one);
        assert!(!statement.fetch_oid);
        assert!(!statement.fetch_count);
    }

    #[test]
    fn one_directive_beats_inferred_all() {
        let batch = compile_request(&[
            ("db", "test"),
            ("tb", "test"),
            ("qr", "select.one"),
            ("oid", "1"),
        ])
        .unwrap();

        let statement = &batch.statements[0];
        assert_eq!(statement.sql.sql, "SELECT * FROM test WHERE oid = ?");
        assert!(statement.fetch_one);
        assert!(!statement.fetch_all);
    }

    #[test]
    fn directives_ignore_case_and_whitespace() {
        let batch = compile_request(&[
            ("db", "test"),
            ("tb", "test"),
            ("qr", "select.shout"),
            ("oid", "1"),
        ])
        .unwrap();

        let statement = &batch.statements[0];
        assert_eq!(statement.sql.sql, "SELECT * FROM test WHERE oid = ?");
        assert!(statement.fetch_one);
        assert!(!statement.fetch_all);
    }

    #[test]
    fn multi_statement_batch_disables_every_fetch() {
        let batch = compile_request(&[
            ("db", "test"),
            ("tb", "test"),
            ("qr", "replace"),
            ("key", "three"),
            ("value", "three"),
        ])
        .unwrap();

        assert!(batch.is_multi());
        assert_eq!(batch.statements.len(), 2);
        for statement in &batch.statements {
            assert!(!statement.fetch_one);
            assert!(!statement.fetch_all);
            assert!(!statement.fetch_oid);
            assert!(!statement.fetch_count);
        }
    }

    #[test]
    fn absent_parameter_binds_null() {
        let batch =
            compile_request(&[("db", "test"), ("tb", "test"), ("qr", "select.one")]).unwrap();

        assert_eq!(batch.statements[0].sql.params, vec![Param::Null]);
    }

    #[test]
    fn absent_parameter_is_rejected_under_strict_policy() {
        let err = compile(
            &library(),
            MissingParameterPolicy::Reject,
            &request(&[("db", "test"), ("tb", "test"), ("qr", "select.one")]),
        )
        .unwrap_err();

        assert_eq!(err, Error::MissingParameter("oid".to_string()));
        assert_eq!(err.to_string(), "missing parameter oid");
    }

    #[test]
    fn database_and_query_id_are_mandatory() {
        let err = compile_request(&[("tb", "test"), ("qr", "insert")]).unwrap_err();
        assert_eq!(err.to_string(), "missing parameter db");

        let err = compile_request(&[("db", "test"), ("tb", "test")]).unwrap_err();
        assert_eq!(err.to_string(), "missing parameter qr");
    }

    #[test]
    fn entity_placeholder_splices_the_literal_name() {
        let batch = compile_request(&[
            ("db", "test"),
            ("tb", "audit"),
            ("qr", "insert.entity"),
            ("key", "one"),
        ])
        .unwrap();

        let statement = &batch.statements[0];
        assert_eq!(statement.sql.sql, "INSERT INTO audit ( key ) VALUES ( ? )");
        assert_eq!(statement.sql.params, vec![Param::String("one".to_string())]);
    }

    #[test]
    fn entity_placeholder_without_entity_is_an_error() {
        // the default scope resolves the template, but %tb% has nothing to
        // splice
        let err = compile_request(&[("db", "test"), ("qr", "insert.entity"), ("key", "one")])
            .unwrap_err();
        assert_eq!(err.to_string(), "missing parameter tb");
    }

    #[test]
    fn missing_entity_falls_back_to_the_default_scope() {
        let batch = compile_request(&[("db", "test"), ("qr", "version")]).unwrap();

        let statement = &batch.statements[0];
        assert_eq!(statement.sql.sql, "SELECT sqlite_version() AS version");
        assert!(statement.fetch_all);
    }

    #[test]
    fn unknown_query_id_reports_the_section() {
        let err =
            compile_request(&[("db", "test"), ("tb", "test"), ("qr", "nope")]).unwrap_err();

        assert_eq!(
            err,
            Error::Lookup(LookupError::QueryNotFound {
                scope: "test".to_string(),
                query_id: "nope".to_string(),
            })
        );
        assert_eq!(err.to_string(), "missing option nope in section test");
    }

    #[test]
    fn repeated_placeholder_is_bound_once_per_occurrence() {
        let batch = compile_request(&[
            ("db", "test"),
            ("tb", "test"),
            ("qr", "pair"),
            ("key", "k"),
        ])
        .unwrap();

        let statement = &batch.statements[0];
        assert_eq!(statement.sql.sql, "INSERT INTO test (key,value) VALUES (?,?)");
        assert_eq!(
            statement.sql.params,
            vec![Param::String("k".to_string()), Param::String("k".to_string())]
        );
    }
}
