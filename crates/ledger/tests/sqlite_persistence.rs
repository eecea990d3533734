use stockbook_core::Entity;
use stockbook_inventory::{Drink, Ingredient, Unit};
use stockbook_ledger::Ledger;
use stockbook_storage::SqliteStore;

fn db_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}", dir.path().join("stock.db").display())
}

#[test]
fn collections_survive_process_restart() {
    let dir = tempfile::tempdir().unwrap();

    let before = {
        let mut ledger = Ledger::open(SqliteStore::open(&db_url(&dir)).unwrap()).unwrap();

        let mut coke = Drink::new("Coca Cola");
        coke.initial_stock = 24.0;
        let coke = ledger.upsert(coke).unwrap();
        ledger.revise_sold(coke.id(), 10.0).unwrap();
        ledger.record_actual_count(coke.id(), 12.0).unwrap();

        let mut rice = Ingredient::new("Rice", Unit::Kg);
        rice.initial_stock = 25.0;
        rice.used = 8.0;
        ledger.upsert(rice).unwrap();

        ledger.snapshot()
    };

    let reopened = Ledger::open(SqliteStore::open(&db_url(&dir)).unwrap()).unwrap();
    assert_eq!(reopened.snapshot(), before);

    let coke = &reopened.list::<Drink>()[0];
    assert_eq!(coke.expected_remaining(), 14.0);
    assert_eq!(coke.discrepancy(), 2.0);
    assert_eq!(reopened.list::<Ingredient>()[0].remaining(), 17.0);
}

#[test]
fn deletes_are_persisted() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let mut ledger = Ledger::open(SqliteStore::open(&db_url(&dir)).unwrap()).unwrap();
        ledger.load_demo_data().unwrap();
        let id = ledger.list::<Ingredient>()[0].id().clone();
        ledger.delete::<Ingredient>(&id).unwrap();
        id
    };

    let reopened = Ledger::open(SqliteStore::open(&db_url(&dir)).unwrap()).unwrap();
    assert_eq!(reopened.list::<Ingredient>().len(), 2);
    assert!(reopened.get::<Ingredient>(&id).is_err());
}
