//! Seed data for a fresh customer slot.
//!
//! The seed list is only used when the slot is empty at startup, or when the
//! store is explicitly reset.

use std::path::Path;

use tracing::debug;

use crate::customer::{Customer, CustomerFields, CustomerId};
use crate::error::{Error, Result};

/// The built-in default customers.
#[must_use]
pub fn default_customers() -> Vec<Customer> {
    [
        (
            1,
            "Leanne Graham",
            "sincere@april.biz",
            "Kulas Light, Gwenborough",
            "1-770-736-8031",
            "United States",
        ),
        (
            2,
            "Ervin Howell",
            "shanna@melissa.tv",
            "Victor Plains, Wisokyburgh",
            "010-692-6593",
            "Canada",
        ),
        (
            3,
            "Clementine Bauch",
            "nathan@yesenia.net",
            "Douglas Extension, McKenziehaven",
            "1-463-123-4447",
            "Ireland",
        ),
        (
            4,
            "Patricia Lebsack",
            "julianne.oconner@kory.org",
            "Hoeger Mall, South Elvis",
            "493-170-9623",
            "Australia",
        ),
        (
            5,
            "Chelsey Dietrich",
            "lucio_hettinger@annie.ca",
            "Skiles Walks, Roscoeview",
            "254-954-1289",
            "New Zealand",
        ),
    ]
    .into_iter()
    .map(|(id, name, email, address, phone, country)| {
        Customer::new(
            CustomerId::Number(id),
            CustomerFields {
                name: name.to_string(),
                email: email.to_string(),
                address: address.to_string(),
                phone: phone.to_string(),
                country: country.to_string(),
            },
        )
    })
    .collect()
}

/// Load a seed list from a JSON file holding an array of customers.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a customer array.
pub fn load_seed(path: &Path) -> Result<Vec<Customer>> {
    let raw =
        std::fs::read_to_string(path).map_err(|e| Error::seed_load(path, e.to_string()))?;
    let customers: Vec<Customer> =
        serde_json::from_str(&raw).map_err(|e| Error::seed_load(path, e.to_string()))?;
    debug!(
        "Loaded {} seed customers from {}",
        customers.len(),
        path.display()
    );
    Ok(customers)
}

/// Resolve the seed list: the given file if any, otherwise the built-in list.
///
/// # Errors
///
/// Returns an error if a seed file is given and cannot be loaded.
pub fn resolve_seed(file: Option<&Path>) -> Result<Vec<Customer>> {
    match file {
        Some(path) => load_seed(path),
        None => Ok(default_customers()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_default_customers_not_empty() {
        assert!(!default_customers().is_empty());
    }

    #[test]
    fn test_default_customer_ids_unique() {
        let customers = default_customers();
        let ids: HashSet<&CustomerId> = customers.iter().map(|c| &c.id).collect();
        assert_eq!(ids.len(), customers.len());
    }

    #[test]
    fn test_resolve_seed_without_file() {
        assert_eq!(resolve_seed(None).unwrap(), default_customers());
    }

    #[test]
    fn test_load_seed_from_file() {
        let path = std::env::temp_dir().join(format!("custbook_seed_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"id":"a1","name":"A","email":"a@x.io","address":"","phone":"","country":"FR"}]"#,
        )
        .unwrap();

        let customers = load_seed(&path).unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].id, CustomerId::from("a1"));
        assert_eq!(customers[0].country, "FR");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_seed_missing_file() {
        let err = load_seed(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, Error::SeedLoad { .. }));
    }

    #[test]
    fn test_load_seed_rejects_non_array() {
        let path =
            std::env::temp_dir().join(format!("custbook_bad_seed_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"id":1}"#).unwrap();

        let err = load_seed(&path).unwrap_err();
        assert!(matches!(err, Error::SeedLoad { .. }));

        let _ = std::fs::remove_file(&path);
    }
}
