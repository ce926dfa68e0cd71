//! Minified GraphQL query-document synthesis.
//!
//! [`synthesize`] turns a declarative [`Shape`](shape::Shape) and a
//! [`Variables`](variables::Variables) set into a single-line document
//! string: an optional `query(...)` argument-declaration header followed by
//! the selection clause. Output is whitespace-free and comma-free wherever
//! GraphQL permits, and deterministic for equal inputs.
//!
//! Synthesis is pure and total: it performs no I/O, holds no state, and
//! never fails. A shape the synthesizer cannot interpret renders as an empty
//! clause and is left for the server to reject.
//!
//! Mutations are not synthesized; they are supplied to the client as
//! pre-formed document strings.

mod naming;
pub mod shape;
pub mod variables;

use self::shape::Shape;
use self::variables::Variables;

/// Render the query document for `shape` with the given `variables`.
///
/// With no variables only the selection clause is emitted; otherwise it is
/// prefixed with `query(` + the sorted argument declarations + `)`.
#[must_use]
pub fn synthesize(shape: &Shape, variables: &Variables) -> String {
    let mut out = String::new();
    if !variables.is_empty() {
        out.push_str("query(");
        variables.write_declarations(&mut out);
        out.push(')');
    }
    shape::write_selection(&mut out, shape, false);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::shape::Field;
    use super::*;

    #[test]
    fn test_no_variables_emits_bare_selection() {
        let shape = Shape::object([Field::auto(
            "Health",
            Shape::object([
                Field::named("_id", Shape::Scalar),
                Field::named("status", Shape::Scalar),
            ]),
        )]);
        assert_eq!(synthesize(&shape, &Variables::new()), "{health{_id,status}}");
    }

    #[test]
    fn test_variables_prepend_query_header() {
        let shape = Shape::object([Field::named(
            "listingsAndReviews(limit: $limit)",
            Shape::object([
                Field::named("_id", Shape::Scalar),
                Field::auto("Name", Shape::Scalar),
            ]),
        )]);
        let variables = Variables::new().with("limit", 3_i64).unwrap();
        assert_eq!(
            synthesize(&shape, &variables),
            "query($limit:Int!){listingsAndReviews(limit: $limit){_id,name}}"
        );
    }

    #[test]
    fn test_multiple_variables_sorted_without_separators() {
        let shape = Shape::object([Field::named(
            "items(first: $first, after: $after)",
            Shape::object([Field::named("_id", Shape::Scalar)]),
        )]);
        let variables = Variables::new()
            .with("first", 10_i64)
            .unwrap()
            .with("after", None::<String>)
            .unwrap();
        assert_eq!(
            synthesize(&shape, &variables),
            "query($after:ID$first:Int!){items(first: $first, after: $after){_id}}"
        );
    }

    #[test]
    fn test_equal_variable_sets_synthesize_identical_documents() {
        let shape = Shape::object([Field::auto("Node", Shape::Scalar)]);
        let a = Variables::new()
            .with("x", 1_i64)
            .unwrap()
            .with("y", 2_i64)
            .unwrap();
        let b = Variables::new()
            .with("y", 2_i64)
            .unwrap()
            .with("x", 1_i64)
            .unwrap();
        assert_eq!(synthesize(&shape, &a), synthesize(&shape, &b));
    }

    #[test]
    fn test_top_level_scalar_renders_empty() {
        assert_eq!(synthesize(&Shape::Scalar, &Variables::new()), "");
    }
}
