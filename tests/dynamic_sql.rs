// Exercises the dynamic SQL layer through the public API, against an
// entity table that is not one of the built-in repositories. The layer is
// generic: any entity describable as a filter table and a column map gets
// the same machinery.

use serde_json::{json, Map, Value};

use jobboard::query::{
    build_filter_predicate, build_partial_update, ClauseKind, ColumnMap, Criterion, FilterSpec,
    QueryError, RangePair,
};

const USERS: FilterSpec = FilterSpec {
    criteria: &[
        Criterion { field: "username", column: "username", kind: ClauseKind::Contains },
        Criterion { field: "minAge", column: "age", kind: ClauseKind::Min },
        Criterion { field: "maxAge", column: "age", kind: ClauseKind::Max },
        Criterion { field: "hasKarma", column: "karma", kind: ClauseKind::PositiveFlag },
    ],
    ranges: &[RangePair { min_field: "minAge", max_field: "maxAge" }],
};

const USER_COLUMNS: ColumnMap = ColumnMap(&[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
]);

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn predicate_numbering_matches_value_positions() {
    let criteria = object(json!({
        "username": "al",
        "minAge": 21,
        "maxAge": 65,
        "hasKarma": true,
    }));

    let built = build_filter_predicate(&criteria, &USERS).unwrap();
    assert_eq!(
        built.sql,
        r#""username" ILIKE $1 AND "age" >= $2 AND "age" <= $3 AND "karma" > $4"#
    );
    assert_eq!(built.params, vec![json!("%al%"), json!(21), json!(65), json!(0)]);
}

#[test]
fn update_and_predicate_stay_independent() {
    // A repository splices these into different statements; each fragment
    // numbers its own placeholders from $1.
    let payload = object(json!({ "firstName": "Aliya", "age": 32 }));
    let set = build_partial_update(&payload, USER_COLUMNS).unwrap();

    let criteria = object(json!({ "minAge": 30 }));
    let predicate = build_filter_predicate(&criteria, &USERS).unwrap();

    assert_eq!(set.sql, r#""first_name"=$1, "age"=$2"#);
    assert_eq!(predicate.sql, r#""age" >= $1"#);
}

#[test]
fn range_validation_runs_before_assembly() {
    let criteria = object(json!({ "username": "al", "minAge": 66, "maxAge": 21 }));

    let err = build_filter_predicate(&criteria, &USERS).unwrap_err();
    assert_eq!(
        err,
        QueryError::InvalidRange { min_field: "minAge", max_field: "maxAge" }
    );
}

#[test]
fn absent_criteria_produce_no_clauses() {
    let built = build_filter_predicate(&Map::new(), &USERS).unwrap();
    assert!(built.is_empty());

    let err = build_partial_update(&Map::new(), USER_COLUMNS).unwrap_err();
    assert_eq!(err, QueryError::EmptyPayload);
}
