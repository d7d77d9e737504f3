//! In-memory storage backend.
//!
//! Keeps the whole customer aggregate in process memory behind a read-write
//! lock. Suitable for tests and single-process development; data is lost on
//! restart. Enforces the same primary-key and foreign-key rules the relational
//! backends get from their schemas, so the consistency contract (duplicate-id
//! failures, cascade delete, batch atomicity) is observable without a database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::db::errors::{Result, StoreError};
use crate::db::models::{
    CustomerDetail, CustomerRow, CustomerWrite, EmployeeRow, EmployeeWrite, FileRow, Logo, NewFile,
};
use crate::db::store::CustomerStore;

struct CustomerEntry {
    customer: CustomerRow,
    logo: Option<Logo>,
    created_at: DateTime<Utc>,
    /// Insertion counter, tie-breaker for creations in the same instant.
    seq: u64,
    files: HashMap<String, FileRow>,
    employees: HashMap<String, EmployeeRow>,
}

#[derive(Default)]
struct State {
    customers: HashMap<String, CustomerEntry>,
    next_seq: u64,
}

/// In-memory implementation of [`CustomerStore`].
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn constraint(table: &str, message: impl Into<String>) -> StoreError {
    StoreError::ConstraintViolation {
        constraint: None,
        table: Some(table.to_string()),
        message: message.into(),
    }
}

impl State {
    fn file_id_taken(&self, id: &str) -> bool {
        self.customers.values().any(|c| c.files.contains_key(id))
    }

    fn employee_id_taken(&self, id: &str) -> bool {
        self.customers.values().any(|c| c.employees.contains_key(id))
    }
}

#[async_trait::async_trait]
impl CustomerStore for InMemoryStore {
    async fn init_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRow>> {
        let state = self.state.read();
        let mut entries: Vec<_> = state
            .customers
            .values()
            .map(|e| (e.created_at, e.seq, e.customer.clone()))
            .collect();
        entries.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
        Ok(entries.into_iter().map(|(_, _, row)| row).collect())
    }

    async fn get_customer(&self, id: &str) -> Result<Option<CustomerDetail>> {
        let state = self.state.read();
        let Some(entry) = state.customers.get(id) else {
            return Ok(None);
        };

        let mut files: Vec<FileRow> = entry.files.values().cloned().collect();
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then_with(|| a.id.cmp(&b.id)));

        let mut employees: Vec<EmployeeRow> = entry.employees.values().cloned().collect();
        employees.sort_by(|a, b| {
            (&a.last_name, &a.first_name, &a.id).cmp(&(&b.last_name, &b.first_name, &b.id))
        });

        Ok(Some(CustomerDetail {
            customer: entry.customer.clone(),
            logo: entry.logo.clone(),
            files,
            employees,
        }))
    }

    async fn create_customer(&self, id: &str, customer: &CustomerWrite) -> Result<()> {
        let mut state = self.state.write();
        if state.customers.contains_key(id) {
            return Err(constraint("customers", format!("duplicate customer id '{id}'")));
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        state.customers.insert(
            id.to_string(),
            CustomerEntry {
                customer: CustomerRow {
                    id: id.to_string(),
                    company_name: customer.company_name.clone(),
                    inn: customer.inn.clone(),
                    address: Some(customer.address.clone()),
                    contact: Some(customer.contact.clone()),
                    status: customer.status.clone(),
                },
                logo: None,
                created_at: Utc::now(),
                seq,
                files: HashMap::new(),
                employees: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn update_customer(&self, id: &str, customer: &CustomerWrite) -> Result<u64> {
        let mut state = self.state.write();
        let Some(entry) = state.customers.get_mut(id) else {
            return Ok(0);
        };
        entry.customer.company_name = customer.company_name.clone();
        entry.customer.inn = customer.inn.clone();
        entry.customer.address = Some(customer.address.clone());
        entry.customer.contact = Some(customer.contact.clone());
        entry.customer.status = customer.status.clone();
        Ok(1)
    }

    async fn delete_customer(&self, id: &str) -> Result<u64> {
        // Dropping the entry drops its files and employees with it, the
        // in-memory equivalent of the relational cascade.
        let mut state = self.state.write();
        Ok(if state.customers.remove(id).is_some() { 1 } else { 0 })
    }

    async fn set_logo(&self, id: &str, name: &str, data: &str) -> Result<u64> {
        let mut state = self.state.write();
        let Some(entry) = state.customers.get_mut(id) else {
            return Ok(0);
        };
        entry.logo = Some(Logo {
            name: name.to_string(),
            data: data.to_string(),
        });
        Ok(1)
    }

    async fn add_files(&self, customer_id: &str, files: &[NewFile]) -> Result<()> {
        let mut state = self.state.write();

        // Validate the whole batch before touching anything so a failure in
        // the middle leaves no partial writes, like the relational rollback.
        if !state.customers.contains_key(customer_id) {
            return Err(constraint(
                "customer_files",
                format!("unknown customer id '{customer_id}'"),
            ));
        }
        let mut batch_ids: Vec<&str> = Vec::with_capacity(files.len());
        for file in files {
            if state.file_id_taken(&file.id) || batch_ids.contains(&file.id.as_str()) {
                return Err(constraint("customer_files", format!("duplicate file id '{}'", file.id)));
            }
            batch_ids.push(&file.id);
        }

        let entry = state
            .customers
            .get_mut(customer_id)
            .expect("customer existence checked above");
        for file in files {
            entry.files.insert(
                file.id.clone(),
                FileRow {
                    id: file.id.clone(),
                    name: file.name.clone(),
                    size_kb: file.size_kb,
                    uploaded_at: file.uploaded_at.clone(),
                },
            );
        }
        Ok(())
    }

    async fn delete_file(&self, file_id: &str) -> Result<u64> {
        let mut state = self.state.write();
        for entry in state.customers.values_mut() {
            if entry.files.remove(file_id).is_some() {
                return Ok(1);
            }
        }
        Ok(0)
    }

    async fn add_employee(&self, customer_id: &str, id: &str, employee: &EmployeeWrite) -> Result<()> {
        let mut state = self.state.write();
        if !state.customers.contains_key(customer_id) {
            return Err(constraint(
                "customer_employees",
                format!("unknown customer id '{customer_id}'"),
            ));
        }
        if state.employee_id_taken(id) {
            return Err(constraint("customer_employees", format!("duplicate employee id '{id}'")));
        }
        let entry = state
            .customers
            .get_mut(customer_id)
            .expect("customer existence checked above");
        entry.employees.insert(
            id.to_string(),
            EmployeeRow {
                id: id.to_string(),
                first_name: employee.first_name.clone(),
                last_name: employee.last_name.clone(),
                phone: Some(employee.phone.clone()),
                email: Some(employee.email.clone()),
            },
        );
        Ok(())
    }

    async fn update_employee(&self, employee_id: &str, employee: &EmployeeWrite) -> Result<u64> {
        let mut state = self.state.write();
        for entry in state.customers.values_mut() {
            if let Some(row) = entry.employees.get_mut(employee_id) {
                row.first_name = employee.first_name.clone();
                row.last_name = employee.last_name.clone();
                row.phone = Some(employee.phone.clone());
                row.email = Some(employee.email.clone());
                return Ok(1);
            }
        }
        Ok(0)
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<u64> {
        let mut state = self.state.write();
        for entry in state.customers.values_mut() {
            if entry.employees.remove(employee_id).is_some() {
                return Ok(1);
            }
        }
        Ok(0)
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(company: &str) -> CustomerWrite {
        CustomerWrite {
            company_name: company.to_string(),
            inn: "7701234567".to_string(),
            address: String::new(),
            contact: String::new(),
            status: "В работе".to_string(),
        }
    }

    fn file(id: &str, uploaded_at: &str) -> NewFile {
        NewFile {
            id: id.to_string(),
            name: format!("{id}.pdf"),
            size_kb: 128,
            uploaded_at: uploaded_at.to_string(),
        }
    }

    fn employee(first: &str, last: &str) -> EmployeeWrite {
        EmployeeWrite {
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: String::new(),
            email: String::new(),
        }
    }

    #[test_log::test(tokio::test)]
    async fn create_list_delete_round_trip() {
        let store = InMemoryStore::new();
        store.create_customer("c1", &customer("Холод-Сервис")).await.unwrap();

        let listed = store.list_customers().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "c1");
        assert_eq!(listed[0].company_name, "Холод-Сервис");

        assert_eq!(store.delete_customer("c1").await.unwrap(), 1);
        assert!(store.list_customers().await.unwrap().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn duplicate_customer_id_is_a_constraint_violation() {
        let store = InMemoryStore::new();
        store.create_customer("c1", &customer("A")).await.unwrap();

        let err = store.create_customer("c1", &customer("B")).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation { .. }));

        // The original row is untouched.
        let detail = store.get_customer("c1").await.unwrap().unwrap();
        assert_eq!(detail.customer.company_name, "A");
    }

    #[test_log::test(tokio::test)]
    async fn update_of_missing_id_is_a_silent_no_op() {
        let store = InMemoryStore::new();
        assert_eq!(store.update_customer("ghost", &customer("X")).await.unwrap(), 0);
        // No row was created by the update...
        assert!(store.list_customers().await.unwrap().is_empty());
        // ...and the detail lookup still reports the id as missing.
        assert!(store.get_customer("ghost").await.unwrap().is_none());
    }

    #[test_log::test(tokio::test)]
    async fn list_orders_newest_first() {
        let store = InMemoryStore::new();
        store.create_customer("c1", &customer("first")).await.unwrap();
        store.create_customer("c2", &customer("second")).await.unwrap();
        store.create_customer("c3", &customer("third")).await.unwrap();

        let ids: Vec<_> = store.list_customers().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["c3", "c2", "c1"]);
    }

    #[test_log::test(tokio::test)]
    async fn delete_cascades_to_files_and_employees() {
        let store = InMemoryStore::new();
        store.create_customer("c1", &customer("A")).await.unwrap();
        store.add_files("c1", &[file("f1", "2024-01-01")]).await.unwrap();
        store.add_employee("c1", "e1", &employee("Иван", "Петров")).await.unwrap();

        assert_eq!(store.delete_customer("c1").await.unwrap(), 1);

        // The children went with the parent: their ids are free again.
        assert_eq!(store.delete_file("f1").await.unwrap(), 0);
        assert_eq!(store.delete_employee("e1").await.unwrap(), 0);
    }

    #[test_log::test(tokio::test)]
    async fn file_batch_is_all_or_nothing() {
        let store = InMemoryStore::new();
        store.create_customer("c1", &customer("A")).await.unwrap();
        store.add_files("c1", &[file("f1", "2024-01-01")]).await.unwrap();

        // Second item collides with the existing f1: nothing from the batch
        // may be persisted.
        let err = store
            .add_files("c1", &[file("f2", "2024-01-02"), file("f1", "2024-01-03"), file("f3", "2024-01-04")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation { .. }));

        let detail = store.get_customer("c1").await.unwrap().unwrap();
        assert_eq!(detail.files.len(), 1);
        assert_eq!(detail.files[0].id, "f1");
    }

    #[test_log::test(tokio::test)]
    async fn files_for_unknown_customer_are_rejected() {
        let store = InMemoryStore::new();
        let err = store.add_files("ghost", &[file("f1", "2024-01-01")]).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation { .. }));
    }

    #[test_log::test(tokio::test)]
    async fn logo_overwrite_keeps_only_the_latest() {
        let store = InMemoryStore::new();
        store.create_customer("c1", &customer("A")).await.unwrap();

        assert_eq!(store.set_logo("c1", "old.png", "AAAA").await.unwrap(), 1);
        assert_eq!(store.set_logo("c1", "new.png", "BBBB").await.unwrap(), 1);

        let detail = store.get_customer("c1").await.unwrap().unwrap();
        let logo = detail.logo.unwrap();
        assert_eq!(logo.name, "new.png");
        assert_eq!(logo.data, "BBBB");
    }

    #[test_log::test(tokio::test)]
    async fn detail_orders_files_and_employees() {
        let store = InMemoryStore::new();
        store.create_customer("c1", &customer("A")).await.unwrap();
        store
            .add_files("c1", &[file("f1", "2024-01-01"), file("f2", "2024-03-01"), file("f3", "2024-02-01")])
            .await
            .unwrap();
        store.add_employee("c1", "e1", &employee("Б", "Петров")).await.unwrap();
        store.add_employee("c1", "e2", &employee("А", "Иванов")).await.unwrap();

        let detail = store.get_customer("c1").await.unwrap().unwrap();

        let file_ids: Vec<_> = detail.files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(file_ids, vec!["f2", "f3", "f1"]);

        let surnames: Vec<_> = detail.employees.iter().map(|e| e.last_name.as_str()).collect();
        assert_eq!(surnames, vec!["Иванов", "Петров"]);
    }

    #[test_log::test(tokio::test)]
    async fn employee_update_overwrites_all_fields() {
        let store = InMemoryStore::new();
        store.create_customer("c1", &customer("A")).await.unwrap();
        store.add_employee("c1", "e1", &employee("Иван", "Петров")).await.unwrap();

        let updated = EmployeeWrite {
            first_name: "Пётр".to_string(),
            last_name: "Сидоров".to_string(),
            phone: "+7 900 000-00-00".to_string(),
            email: String::new(),
        };
        assert_eq!(store.update_employee("e1", &updated).await.unwrap(), 1);

        let detail = store.get_customer("c1").await.unwrap().unwrap();
        assert_eq!(detail.employees[0].last_name, "Сидоров");
        assert_eq!(detail.employees[0].phone.as_deref(), Some("+7 900 000-00-00"));

        // Unknown employee id: silent no-op, same as the customer update.
        assert_eq!(store.update_employee("ghost", &updated).await.unwrap(), 0);
    }
}
