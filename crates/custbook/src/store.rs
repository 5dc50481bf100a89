//! The customer store.
//!
//! [`CustomerStore`] owns the canonical, ordered list of customers and mirrors
//! it into a single slot of a [`SlotStore`] after every mutation. Newest
//! customers come first. Missing ids are never errors: lookups return `None`,
//! updates and deletes leave the collection and the slot untouched.

use tracing::{debug, info};

use crate::customer::{Customer, CustomerFields, CustomerId};
use crate::error::{Error, Result};
use crate::storage::SlotStore;

/// Default key of the slot holding the customer list.
pub const DEFAULT_SLOT_KEY: &str = "customersStorage";

/// Write-through store over a list of customers.
///
/// Ids are not validated: creating a duplicate id is a caller error, after
/// which lookups, updates and deletes act on the first match.
#[derive(Debug)]
pub struct CustomerStore<S> {
    slots: S,
    key: String,
    customers: Vec<Customer>,
    seed: Vec<Customer>,
}

impl<S: SlotStore> CustomerStore<S> {
    /// Open the store on the slot named `key`.
    ///
    /// Loads the slot if it holds a value. Otherwise the collection starts as
    /// `seed` and is written to the slot immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or written, or if it holds
    /// something other than a customer list.
    pub fn open(slots: S, key: impl Into<String>, seed: Vec<Customer>) -> Result<Self> {
        let key = key.into();
        let existing = slots.read(&key)?;

        let mut store = Self {
            slots,
            key,
            customers: Vec::new(),
            seed,
        };

        match existing {
            Some(raw) => {
                store.customers = serde_json::from_str(&raw).map_err(|source| {
                    Error::CorruptSlot {
                        key: store.key.clone(),
                        source,
                    }
                })?;
                debug!(
                    "Loaded {} customers from slot '{}'",
                    store.customers.len(),
                    store.key
                );
            }
            None => store.seed_slot()?,
        }

        Ok(store)
    }

    /// The current collection, newest first.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of customers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Key of the backing slot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backend the store writes through to.
    #[must_use]
    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Consume the store and hand back its backend.
    #[must_use]
    pub fn into_slots(self) -> S {
        self.slots
    }

    /// Find the first customer with the given id.
    #[must_use]
    pub fn lookup(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|customer| &customer.id == id)
    }

    /// Insert `customer` at the front of the collection and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written. The in-memory
    /// collection already contains the customer in that case.
    pub fn create(&mut self, customer: Customer) -> Result<()> {
        debug!("Creating customer {}", customer.id);
        self.customers.insert(0, customer);
        self.persist()
    }

    /// Replace the mutable fields of the customer with `id` and persist.
    ///
    /// Returns `false` without writing anything when no customer matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    pub fn update(&mut self, id: &CustomerId, fields: CustomerFields) -> Result<bool> {
        let Some(customer) = self.customers.iter_mut().find(|c| &c.id == id) else {
            debug!("Update of unknown customer {} ignored", id);
            return Ok(false);
        };

        customer.apply(fields);
        debug!("Updated customer {}", id);
        self.persist()?;
        Ok(true)
    }

    /// Remove the first customer with `id`, persist, and return it.
    ///
    /// Returns `None` without writing anything when no customer matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    pub fn delete(&mut self, id: &CustomerId) -> Result<Option<Customer>> {
        let Some(index) = self.customers.iter().position(|c| &c.id == id) else {
            debug!("Delete of unknown customer {} ignored", id);
            return Ok(None);
        };

        let removed = self.customers.remove(index);
        debug!("Deleted customer {}", id);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Drop the slot and seed it again, as on first open.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be removed or written.
    pub fn reset(&mut self) -> Result<()> {
        if self.slots.remove(&self.key)? {
            debug!("Removed slot '{}'", self.key);
        }
        self.seed_slot()
    }

    /// Serialized form of the collection, as written to the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.customers)?)
    }

    fn seed_slot(&mut self) -> Result<()> {
        info!(
            "Slot '{}' is empty, seeding {} customers",
            self.key,
            self.seed.len()
        );
        self.customers = self.seed.clone();
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let raw = self.to_json()?;
        self.slots.write(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_customers;
    use crate::storage::{MemorySlots, SqliteSlots};

    fn customer(id: impl Into<CustomerId>, name: &str) -> Customer {
        Customer::new(
            id,
            CustomerFields {
                name: name.to_string(),
                ..CustomerFields::default()
            },
        )
    }

    fn id(n: i64) -> CustomerId {
        CustomerId::Number(n)
    }

    fn named(name: &str) -> CustomerFields {
        CustomerFields {
            name: name.to_string(),
            ..CustomerFields::default()
        }
    }

    fn ab_store() -> CustomerStore<MemorySlots> {
        CustomerStore::open(
            MemorySlots::new(),
            DEFAULT_SLOT_KEY,
            vec![customer(id(1), "A"), customer(id(2), "B")],
        )
        .unwrap()
    }

    fn ids<S: SlotStore>(store: &CustomerStore<S>) -> Vec<CustomerId> {
        store.customers().iter().map(|c| c.id.clone()).collect()
    }

    fn persisted(slots: &MemorySlots) -> Vec<Customer> {
        let raw = slots.read(DEFAULT_SLOT_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_open_seeds_empty_slot() {
        let store = ab_store();

        assert_eq!(ids(&store), vec![id(1), id(2)]);
        assert_eq!(store.slots().write_count(), 1);
        assert_eq!(persisted(store.slots()), store.customers());
    }

    #[test]
    fn test_open_loads_existing_slot_without_reseeding() {
        let mut slots = MemorySlots::new();
        let stored = vec![customer("x", "Stored")];
        slots
            .write(DEFAULT_SLOT_KEY, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        let store = CustomerStore::open(slots, DEFAULT_SLOT_KEY, default_customers()).unwrap();

        assert_eq!(store.customers(), stored.as_slice());
        assert_eq!(store.slots().write_count(), 1);
    }

    #[test]
    fn test_open_keeps_empty_list() {
        let mut slots = MemorySlots::new();
        slots.write(DEFAULT_SLOT_KEY, "[]").unwrap();

        let store = CustomerStore::open(slots, DEFAULT_SLOT_KEY, default_customers()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_rejects_corrupt_slot() {
        let mut slots = MemorySlots::new();
        slots.write(DEFAULT_SLOT_KEY, "{not json").unwrap();

        let err = CustomerStore::open(slots, DEFAULT_SLOT_KEY, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::CorruptSlot { .. }));
    }

    #[test]
    fn test_scenario() {
        let mut store = ab_store();

        store.create(customer(id(3), "C")).unwrap();
        assert_eq!(ids(&store), vec![id(3), id(1), id(2)]);

        assert!(store.update(&id(2), named("B2")).unwrap());
        assert_eq!(store.lookup(&id(2)).unwrap().name, "B2");
        assert_eq!(store.lookup(&id(1)).unwrap().name, "A");
        assert_eq!(store.lookup(&id(3)).unwrap().name, "C");

        let removed = store.delete(&id(1)).unwrap();
        assert_eq!(removed.map(|c| c.name), Some("A".to_string()));
        assert_eq!(ids(&store), vec![id(3), id(2)]);

        assert!(store.delete(&id(99)).unwrap().is_none());
        assert_eq!(ids(&store), vec![id(3), id(2)]);
        assert_eq!(store.lookup(&id(2)).unwrap().name, "B2");

        assert_eq!(store.lookup(&id(3)).unwrap().id, id(3));
        assert!(store.lookup(&id(42)).is_none());

        assert_eq!(persisted(store.slots()), store.customers());
    }

    #[test]
    fn test_create_places_customer_first() {
        let mut store = ab_store();
        let newest = customer("new", "Newest");

        store.create(newest.clone()).unwrap();

        assert_eq!(store.customers()[0], newest);
        assert_eq!(store.len(), 3);
        assert_eq!(persisted(store.slots())[0], newest);
    }

    #[test]
    fn test_lookup_returns_created_records() {
        let mut store = CustomerStore::open(MemorySlots::new(), "k", Vec::new()).unwrap();
        for n in 0..20 {
            store.create(customer(id(n), &format!("C{n}"))).unwrap();
        }

        for n in 0..20 {
            assert_eq!(store.lookup(&id(n)).unwrap().name, format!("C{n}"));
        }
    }

    #[test]
    fn test_lookup_is_strict_about_id_type() {
        let store = ab_store();
        assert!(store.lookup(&CustomerId::from("1")).is_none());
    }

    #[test]
    fn test_update_replaces_every_mutable_field() {
        let mut store = ab_store();
        let fields = CustomerFields {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 Analytical Way".to_string(),
            phone: "555-0199".to_string(),
            country: "England".to_string(),
        };

        assert!(store.update(&id(1), fields.clone()).unwrap());

        let updated = store.lookup(&id(1)).unwrap();
        assert_eq!(updated.id, id(1));
        assert_eq!(updated.fields(), fields);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut store = ab_store();
        let before = store.customers().to_vec();
        let writes = store.slots().write_count();

        assert!(!store.update(&id(42), named("Ghost")).unwrap());

        assert_eq!(store.customers(), before.as_slice());
        assert_eq!(store.slots().write_count(), writes);
    }

    #[test]
    fn test_delete_missing_id_leaves_collection_unchanged() {
        let mut store = ab_store();
        let before = store.customers().to_vec();
        let writes = store.slots().write_count();

        assert!(store.delete(&id(99)).unwrap().is_none());

        assert_eq!(store.customers(), before.as_slice());
        assert_eq!(store.slots().write_count(), writes);
    }

    #[test]
    fn test_duplicate_ids_act_on_first_match() {
        let mut store = ab_store();
        store.create(customer(id(1), "Shadow")).unwrap();

        assert_eq!(store.lookup(&id(1)).unwrap().name, "Shadow");

        store.delete(&id(1)).unwrap();
        assert_eq!(store.lookup(&id(1)).unwrap().name, "A");
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut store = ab_store();
        store.create(customer(id(3), "C")).unwrap();
        store.delete(&id(1)).unwrap();

        store.reset().unwrap();

        assert_eq!(ids(&store), vec![id(1), id(2)]);
        assert_eq!(persisted(store.slots()), store.customers());
    }

    #[test]
    fn test_reset_reseeds_through_absent_slot() {
        let slots = SqliteSlots::open_in_memory().unwrap();
        let mut store =
            CustomerStore::open(slots, DEFAULT_SLOT_KEY, vec![customer(id(1), "A")]).unwrap();
        store.create(customer("extra", "Extra")).unwrap();

        store.reset().unwrap();

        let reopened = CustomerStore::open(store.into_slots(), DEFAULT_SLOT_KEY, Vec::new())
            .unwrap();
        assert_eq!(ids(&reopened), vec![id(1)]);
    }

    #[test]
    fn test_round_trip_through_memory_slots() {
        let mut store = ab_store();
        store.create(customer("s-9", "Text id")).unwrap();
        store.update(&id(2), named("B2")).unwrap();
        let expected = store.customers().to_vec();

        let reopened =
            CustomerStore::open(store.into_slots(), DEFAULT_SLOT_KEY, default_customers())
                .unwrap();

        assert_eq!(reopened.customers(), expected.as_slice());
    }

    #[test]
    fn test_round_trip_through_sqlite() {
        let db_path = std::env::temp_dir().join(format!(
            "custbook_store_test_{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&db_path);

        let expected = {
            let slots = SqliteSlots::open(&db_path).unwrap();
            let mut store = CustomerStore::open(slots, DEFAULT_SLOT_KEY, default_customers())
                .unwrap();
            store.create(customer(id(100), "Persisted")).unwrap();
            store.delete(&id(2)).unwrap();
            store.customers().to_vec()
        };

        let slots = SqliteSlots::open(&db_path).unwrap();
        let store = CustomerStore::open(slots, DEFAULT_SLOT_KEY, Vec::new()).unwrap();
        assert_eq!(store.customers(), expected.as_slice());

        drop(store);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_to_json_matches_slot() {
        let store = ab_store();
        assert_eq!(
            store.slots().read(DEFAULT_SLOT_KEY).unwrap(),
            Some(store.to_json().unwrap())
        );
    }
}
