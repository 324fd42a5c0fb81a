use treestore::{Identifier, Record, TreeStore};

const ITEMS: &str = r#"[
    {"id": 1, "parent": "root"},
    {"id": 2, "parent": 1, "type": "test"},
    {"id": 3, "parent": 1, "type": "test"},
    {"id": 4, "parent": 2, "type": "test"},
    {"id": 5, "parent": 2, "type": "test"},
    {"id": 6, "parent": 2, "type": "test"},
    {"id": 7, "parent": 4, "type": null},
    {"id": 8, "parent": 4, "type": null}
]"#;

// Same records, children listed before their parents.
const ITEMS_REVERSED: &str = r#"[
    {"id": 8, "parent": 4, "type": null},
    {"id": 7, "parent": 4, "type": null},
    {"id": 6, "parent": 2, "type": "test"},
    {"id": 5, "parent": 2, "type": "test"},
    {"id": 4, "parent": 2, "type": "test"},
    {"id": 3, "parent": 1, "type": "test"},
    {"id": 2, "parent": 1, "type": "test"},
    {"id": 1, "parent": "root"}
]"#;

fn store() -> TreeStore {
    TreeStore::from_json_str(ITEMS).unwrap()
}

fn to_json(records: &[&Record]) -> String {
    serde_json::to_string(records).unwrap()
}

#[test]
fn get_all_returns_every_record_sorted() {
    assert_eq!(
        to_json(&store().get_all()),
        r#"[{"id":1,"parent":"root"},{"id":2,"parent":1,"type":"test"},{"id":3,"parent":1,"type":"test"},{"id":4,"parent":2,"type":"test"},{"id":5,"parent":2,"type":"test"},{"id":6,"parent":2,"type":"test"},{"id":7,"parent":4,"type":null},{"id":8,"parent":4,"type":null}]"#
    );
}

#[test]
fn get_item_returns_original_record() {
    let store = store();
    let item = store.get_item(&Identifier::from(7)).unwrap();
    assert_eq!(
        serde_json::to_string(item).unwrap(),
        r#"{"id":7,"parent":4,"type":null}"#
    );
}

#[test]
fn get_children_in_attach_order() {
    let store = store();
    assert_eq!(
        to_json(&store.get_children(&Identifier::from(4)).unwrap()),
        r#"[{"id":7,"parent":4,"type":null},{"id":8,"parent":4,"type":null}]"#
    );
    assert_eq!(to_json(&store.get_children(&Identifier::from(5)).unwrap()), "[]");
    assert_eq!(
        to_json(&store.get_children(&Identifier::from(2)).unwrap()),
        r#"[{"id":4,"parent":2,"type":"test"},{"id":5,"parent":2,"type":"test"},{"id":6,"parent":2,"type":"test"}]"#
    );
}

#[test]
fn get_all_children_sorted_by_id() {
    assert_eq!(
        to_json(&store().get_all_children(&Identifier::from(2)).unwrap()),
        r#"[{"id":4,"parent":2,"type":"test"},{"id":5,"parent":2,"type":"test"},{"id":6,"parent":2,"type":"test"},{"id":7,"parent":4,"type":null},{"id":8,"parent":4,"type":null}]"#
    );
}

#[test]
fn get_all_parents_nearest_first() {
    assert_eq!(
        to_json(&store().get_all_parents(&Identifier::from(7)).unwrap()),
        r#"[{"id":4,"parent":2,"type":"test"},{"id":2,"parent":1,"type":"test"},{"id":1,"parent":"root"}]"#
    );
}

#[test]
fn input_order_does_not_change_sorted_queries() {
    let forward = store();
    let reversed = TreeStore::from_json_str(ITEMS_REVERSED).unwrap();
    assert_eq!(to_json(&forward.get_all()), to_json(&reversed.get_all()));
    assert_eq!(
        to_json(&forward.get_all_parents(&Identifier::from(8)).unwrap()),
        to_json(&reversed.get_all_parents(&Identifier::from(8)).unwrap())
    );
    // Sibling order follows the input
    assert_eq!(
        to_json(&reversed.get_children(&Identifier::from(4)).unwrap()),
        r#"[{"id":8,"parent":4,"type":null},{"id":7,"parent":4,"type":null}]"#
    );
}

#[test]
fn string_identifiers_sort_lexicographically() {
    let store = TreeStore::from_json_str(
        r#"[
            {"id": "b", "parent": "z"},
            {"id": "z", "parent": "root", "label": "top"},
            {"id": "a", "parent": "z"},
            {"id": "c", "parent": "a"}
        ]"#,
    )
    .unwrap();
    let ids: Vec<String> = store
        .get_all_children(&Identifier::from("z"))
        .unwrap()
        .iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(
        to_json(&store.get_all_parents(&Identifier::from("c")).unwrap()),
        r#"[{"id":"a","parent":"z"},{"id":"z","parent":"root","label":"top"}]"#
    );
}

#[test]
fn field_order_and_extra_fields_survive() {
    let raw = r#"[{"parent":"root","name":"x","id":1,"nested":{"b":1,"a":[true,null]}}]"#;
    let store = TreeStore::from_json_str(raw).unwrap();
    assert_eq!(to_json(&store.get_all()), raw);
}
