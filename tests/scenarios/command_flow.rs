//! The JSON command layer driving a collection

use normstore::{Collection, Command, Error, Executor, Output, Query, RecordId, StoreConfig};

const CONFIG: &str = r#"
[[indexes]]
attribute = "containerId"

[indexes.order]
field = "name"

[[indexes]]
attribute = "slug"
kind = "unique"
"#;

fn collection() -> Collection {
    crate::common::init_tracing();
    let executor = Executor::from_config(StoreConfig::from_toml_str(CONFIG).unwrap()).unwrap();
    Collection::new(executor)
}

fn dispatch(collection: &mut Collection, json: &str) -> normstore::Result<Output> {
    let cmd: Command = serde_json::from_str(json).unwrap();
    collection.dispatch(cmd)
}

fn select(collection: &Collection, json: &str) -> Output {
    let query: Query = serde_json::from_str(json).unwrap();
    collection.select(query).unwrap()
}

#[test]
fn test_json_session() {
    let mut collection = collection();
    dispatch(
        &mut collection,
        r#"{"Load":{"records":[
            {"id":1,"containerId":1,"name":"Z","slug":"z"},
            {"id":2,"containerId":2,"name":"B","slug":"b"},
            {"id":4,"containerId":1,"name":"E","slug":"e"}
        ]}}"#,
    )
    .unwrap();

    assert_eq!(
        select(&collection, r#"{"IndexGet":{"index":"byContainerId","key":1}}"#),
        Output::Ids(vec![RecordId::Int(4), RecordId::Int(1)])
    );

    let created = dispatch(
        &mut collection,
        r#"{"Create":{"record":{"containerId":1,"name":"A","slug":"a"}}}"#,
    )
    .unwrap();
    assert_eq!(created, Output::Created { id: RecordId::Int(5) });

    dispatch(&mut collection, r#"{"Update":{"id":1,"values":{"name":"B"}}}"#).unwrap();
    assert_eq!(
        select(&collection, r#"{"IndexGet":{"index":"byContainerId","key":1}}"#),
        Output::Ids(vec![RecordId::Int(5), RecordId::Int(1), RecordId::Int(4)])
    );

    assert_eq!(
        select(&collection, r#"{"IndexExists":{"index":"bySlug","key":"a"}}"#),
        Output::Bool(true)
    );

    dispatch(&mut collection, r#"{"Delete":{"id":5}}"#).unwrap();
    assert_eq!(
        select(&collection, r#"{"IndexExists":{"index":"bySlug","key":"a"}}"#),
        Output::Bool(false)
    );
    assert_eq!(select(&collection, r#""LastCreatedId""#), Output::Int(4));
}

#[test]
fn test_json_duplicate_create() {
    let mut collection = collection();
    dispatch(&mut collection, r#"{"Create":{"record":{"id":10}}}"#).unwrap();
    let err = dispatch(&mut collection, r#"{"Create":{"record":{"id":10}}}"#).unwrap_err();
    assert_eq!(err, Error::DuplicateIdentifier { id: RecordId::Int(10) });
    assert_eq!(
        select(&collection, r#""GetAllIds""#),
        Output::Ids(vec![RecordId::Int(10)])
    );
}
