//! Drag-to-reorder through the editor down to the remote rows

use menu_client::{MemoryTableClient, Row, Table};
use menu_core::catalog::MenuEditor;
use menu_core::ordering::{DragEvent, OrderedCollection, move_item};
use serde_json::{Value, json};
use shared::models::Business;
use std::sync::Arc;

fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn business() -> Business {
    serde_json::from_value(json!({"id": "b1", "slug": "kose-kafe", "name": "Köşe Kafe"}))
        .expect("business fixture")
}

fn product(id: &str, category_id: &str, sort_order: i32) -> Row {
    row(json!({
        "id": id,
        "business_id": "b1",
        "category_id": category_id,
        "name": id.to_uppercase(),
        "price": 50.0,
        "sort_order": sort_order
    }))
}

/// Category X holds A..D, category Y holds E..F
fn seeded() -> MemoryTableClient {
    let client = MemoryTableClient::new();
    client.seed(
        Table::Categories,
        [
            row(json!({"id": "x", "business_id": "b1", "name": "Sıcak", "sort_order": 0})),
            row(json!({"id": "y", "business_id": "b1", "name": "Soğuk", "sort_order": 1})),
        ],
    );
    client.seed(
        Table::Products,
        [
            product("a", "x", 0),
            product("b", "x", 1),
            product("c", "x", 2),
            product("d", "x", 3),
            product("e", "y", 0),
            product("f", "y", 1),
        ],
    );
    client
}

fn stored_order(client: &MemoryTableClient, id: &str) -> Value {
    client.row(Table::Products, id).expect("row exists")["sort_order"].clone()
}

#[test]
fn move_is_not_a_swap() {
    let mut ids = vec!["A", "B", "C", "D"];
    move_item(&mut ids, 0, 2);
    assert_eq!(ids, ["B", "C", "A", "D"]);
    assert_ne!(ids, ["C", "B", "A", "D"]);
}

#[tokio::test]
async fn drag_gesture_reorders_and_persists_scope_only() -> anyhow::Result<()> {
    let client = seeded();
    let mut editor = MenuEditor::open(Arc::new(client.clone()), business())
        .await?
        .with_activation_distance(8.0);

    editor.handle_product_event(
        "x",
        DragEvent::PointerDown {
            id: "a".into(),
            x: 10.0,
            y: 10.0,
        },
    );
    editor.handle_product_event("x", DragEvent::PointerMove { x: 10.0, y: 12.0 });
    assert!(editor.products("x").iter().map(|p| p.id.as_str()).eq(["a", "b", "c", "d"]));

    editor.handle_product_event("x", DragEvent::PointerMove { x: 10.0, y: 90.0 });
    let handle = editor
        .handle_product_event(
            "x",
            DragEvent::PointerUp {
                over: Some("c".into()),
            },
        )
        .ok_or_else(|| anyhow::anyhow!("drag produced no move"))?;

    // local order is visible before persistence finishes
    let local: Vec<&str> = editor.products("x").iter().map(|p| p.id.as_str()).collect();
    assert_eq!(local, ["b", "c", "a", "d"]);

    let report = handle.await?;
    assert_eq!(report.updated, 4);
    assert_eq!(stored_order(&client, "b"), json!(0));
    assert_eq!(stored_order(&client, "c"), json!(1));
    assert_eq!(stored_order(&client, "a"), json!(2));
    assert_eq!(stored_order(&client, "d"), json!(3));

    // category Y untouched
    assert_eq!(stored_order(&client, "e"), json!(0));
    assert_eq!(stored_order(&client, "f"), json!(1));
    assert!(client.update_log().iter().all(|call| call.id != "e" && call.id != "f"));
    Ok(())
}

#[tokio::test]
async fn partial_failure_leaves_local_order_and_reports_drift() -> anyhow::Result<()> {
    let client = seeded();
    client.fail_writes_for("b");
    let mut editor = MenuEditor::open(Arc::new(client.clone()), business()).await?;

    let report = editor
        .reorder_products("x", "d", "a")
        .ok_or_else(|| anyhow::anyhow!("no move"))?
        .await?;

    let local: Vec<&str> = editor.products("x").iter().map(|p| p.id.as_str()).collect();
    assert_eq!(local, ["d", "a", "b", "c"]);
    assert_eq!(report.updated, 3);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "b");
    // b still has its old position remotely: remote order is mixed
    assert_eq!(stored_order(&client, "b"), json!(1));
    assert_eq!(stored_order(&client, "a"), json!(1));
    Ok(())
}

#[tokio::test]
async fn category_reorder_and_reload() -> anyhow::Result<()> {
    let client = seeded();
    let store = Arc::new(client.clone());
    let mut editor = MenuEditor::open(store.clone(), business()).await?;

    editor
        .reorder_categories("y", "x")
        .ok_or_else(|| anyhow::anyhow!("no move"))?
        .await?;

    let reloaded = MenuEditor::open(store, business()).await?;
    let ids: Vec<&str> = reloaded.categories().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["y", "x"]);
    Ok(())
}

#[test]
fn collection_without_gesture_activation_keeps_order() {
    let mut collection = OrderedCollection::<shared::models::SliderItem>::new(Vec::new());
    assert!(collection.apply_move("a", "b").is_none());
    assert!(collection.is_empty());
}
