//! End-to-end document synthesis through the public API.

#![allow(clippy::unwrap_used)]

use realm_graphql::{Field, Shape, Variables, synthesize};

#[test]
fn health_check_document() {
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
fn sample_listings_document() {
    let shape = Shape::object([Field::named(
        "listingsAndReviews(limit: $limit)",
        Shape::object([
            Field::named("_id", Shape::Scalar),
            Field::auto("Name", Shape::Scalar),
            Field::named("listing_url", Shape::Scalar),
        ]),
    )]);
    let variables = Variables::new().with("limit", 3_i64).unwrap();
    assert_eq!(
        synthesize(&shape, &variables),
        "query($limit:Int!){listingsAndReviews(limit: $limit){_id,name,listing_url}}"
    );
}

#[test]
fn derived_names_and_embedded_fields() {
    // An embedded (flattened) record contributes its children directly to
    // the parent selection set; derived names are initialism-aware.
    let listing = Shape::object([
        Field::named("_id", Shape::Scalar),
        Field::flattened(Shape::object([
            Field::auto("ListingURL", Shape::Scalar),
            Field::auto("ReviewIDs", Shape::Scalar),
        ])),
        Field::auto("HostAPIKey", Shape::Scalar),
    ]);
    let shape = Shape::object([Field::auto(
        "Listings",
        Shape::list(Shape::optional(listing)),
    )]);
    assert_eq!(
        synthesize(&shape, &Variables::new()),
        "{listings{_id,listingUrl,reviewIds,hostApiKey}}"
    );
}

#[test]
fn variable_declarations_are_deterministic() {
    let shape = Shape::object([Field::named(
        "accounts(sortBy: ACCOUNT_ID_ASC, limit: $limit, after: $after)",
        Shape::object([Field::named("account_id", Shape::Scalar)]),
    )]);

    let forward = Variables::new()
        .with("after", None::<String>)
        .unwrap()
        .with("limit", 5_i64)
        .unwrap()
        .with("tags", vec!["a".to_string(), "b".to_string()])
        .unwrap();
    let backward = Variables::new()
        .with("tags", vec!["a".to_string(), "b".to_string()])
        .unwrap()
        .with("limit", 5_i64)
        .unwrap()
        .with("after", None::<String>)
        .unwrap();

    let document = synthesize(&shape, &forward);
    assert_eq!(document, synthesize(&shape, &backward));
    assert!(document.starts_with("query($after:ID$limit:Int!$tags:[ID!]!)"));
}
