//! The application state: both collections, their id counters and settings
//!
//! A `Ledger` is created once at start-up from whatever the
//! [`DocumentStore`] holds and lives for the whole process. Every mutating
//! operation ends by rewriting all documents through the store. Callers are
//! expected to hold one lock around each call so that "mutate, then
//! persist" is never interleaved.
//!
//! Persistence failures are reported to the caller after the in-memory
//! change has already been applied; memory and disk may then disagree until
//! the next successful save.

use indexmap::IndexMap;

use super::calculator::apply_totals;
use super::error::{EntityError, InvoicerResult, StorageError};
use super::model::{Client, Customer, Invoice, Meta, RecordId, Settings};
use super::sequence::IdSequence;
use super::store::DocumentStore;

pub const INVOICE: &str = "Invoice";
pub const CUSTOMER: &str = "Customer";

/// In-memory collections backed by a document store
pub struct Ledger {
    invoices: IndexMap<RecordId, Invoice>,
    customers: IndexMap<RecordId, Customer>,
    invoice_ids: IdSequence,
    customer_ids: IdSequence,
    settings: Settings,
    store: Box<dyn DocumentStore>,
}

impl Ledger {
    /// Load the ledger from `store`
    ///
    /// `defaults` is used unless the stored settings name a company. When the
    /// resulting settings point at a data directory, the store is redirected
    /// there for every later save.
    ///
    /// A counter that lags behind the stored records (lost or truncated
    /// `meta.json`) is moved past the highest stored id.
    pub fn open(store: impl DocumentStore + 'static, defaults: Settings) -> Self {
        let mut store: Box<dyn DocumentStore> = Box::new(store);
        let snapshot = store.load();

        let settings = if snapshot.meta.settings.company.name.is_empty() {
            defaults
        } else {
            snapshot.meta.settings
        };

        if !settings.data_directory.is_empty() {
            store.set_data_directory(&settings.data_directory);
        }

        let invoices: IndexMap<RecordId, Invoice> =
            snapshot.invoices.into_iter().map(|i| (i.id, i)).collect();
        let customers: IndexMap<RecordId, Customer> =
            snapshot.customers.into_iter().map(|c| (c.id, c)).collect();

        Self {
            invoice_ids: resume_sequence(INVOICE, snapshot.meta.next_id, invoices.keys()),
            customer_ids: resume_sequence(
                CUSTOMER,
                snapshot.meta.next_customer_id,
                customers.keys(),
            ),
            invoices,
            customers,
            settings,
            store,
        }
    }

    // ---------------------------------------------------------------------
    // Invoices
    // ---------------------------------------------------------------------

    /// All invoices in insertion order
    pub fn invoices(&self) -> Vec<Invoice> {
        self.invoices.values().cloned().collect()
    }

    /// Position and record of an invoice
    pub fn find_invoice(&self, id: RecordId) -> Option<(usize, &Invoice)> {
        self.invoices.get_full(&id).map(|(pos, _, inv)| (pos, inv))
    }

    pub fn invoice(&self, id: RecordId) -> InvoicerResult<Invoice> {
        self.find_invoice(id)
            .map(|(_, inv)| inv.clone())
            .ok_or_else(|| EntityError::not_found(INVOICE, id).into())
    }

    /// Create an invoice from a client draft
    ///
    /// Assigns the id and number, snapshots the referenced customer into
    /// `client` when it exists, and recomputes every amount. A template name
    /// is only kept when the draft is flagged as a template.
    pub fn create_invoice(&mut self, mut draft: Invoice) -> InvoicerResult<Invoice> {
        draft.customer_id = draft.customer_id.filter(|id| *id > 0);
        if let Some(customer) = draft.customer_id.and_then(|id| self.customers.get(&id)) {
            draft.client = Client::from(customer);
        }

        draft.id = self.invoice_ids.next();
        draft.invoice_num = Invoice::number_for(draft.id);
        if !draft.template {
            draft.template_name.clear();
        }
        apply_totals(&mut draft);

        self.invoices.insert(draft.id, draft.clone());
        self.persist()?;

        tracing::info!(id = draft.id, number = %draft.invoice_num, "invoice created");
        Ok(draft)
    }

    pub fn delete_invoice(&mut self, id: RecordId) -> InvoicerResult<Invoice> {
        let removed = self
            .invoices
            .shift_remove(&id)
            .ok_or(EntityError::not_found(INVOICE, id))?;
        self.persist()?;
        Ok(removed)
    }

    /// Flip the template flag
    ///
    /// Turning it on stores `template_name`; turning it off clears the name.
    pub fn toggle_template(
        &mut self,
        id: RecordId,
        template_name: Option<String>,
    ) -> InvoicerResult<Invoice> {
        let invoice = self
            .invoices
            .get_mut(&id)
            .ok_or(EntityError::not_found(INVOICE, id))?;

        invoice.template = !invoice.template;
        invoice.template_name = if invoice.template {
            template_name.unwrap_or_default()
        } else {
            String::new()
        };
        let updated = invoice.clone();

        self.persist()?;
        Ok(updated)
    }

    // ---------------------------------------------------------------------
    // Customers
    // ---------------------------------------------------------------------

    /// All customers in insertion order
    pub fn customers(&self) -> Vec<Customer> {
        self.customers.values().cloned().collect()
    }

    /// Position and record of a customer
    pub fn find_customer(&self, id: RecordId) -> Option<(usize, &Customer)> {
        self.customers.get_full(&id).map(|(pos, _, c)| (pos, c))
    }

    pub fn customer(&self, id: RecordId) -> InvoicerResult<Customer> {
        self.find_customer(id)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| EntityError::not_found(CUSTOMER, id).into())
    }

    pub fn create_customer(&mut self, mut draft: Customer) -> InvoicerResult<Customer> {
        draft.id = self.customer_ids.next();
        self.customers.insert(draft.id, draft.clone());
        self.persist()?;

        tracing::info!(id = draft.id, "customer created");
        Ok(draft)
    }

    /// Replace a customer wholesale, keeping only its id
    ///
    /// Invoices already issued to this customer keep their old snapshot.
    pub fn update_customer(
        &mut self,
        id: RecordId,
        mut replacement: Customer,
    ) -> InvoicerResult<Customer> {
        let slot = self
            .customers
            .get_mut(&id)
            .ok_or(EntityError::not_found(CUSTOMER, id))?;

        replacement.id = id;
        *slot = replacement.clone();

        self.persist()?;
        Ok(replacement)
    }

    /// Remove a customer; invoices referencing it are left untouched
    pub fn delete_customer(&mut self, id: RecordId) -> InvoicerResult<Customer> {
        let removed = self
            .customers
            .shift_remove(&id)
            .ok_or(EntityError::not_found(CUSTOMER, id))?;
        self.persist()?;
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings and save into the (possibly new) directory
    pub fn update_settings(&mut self, settings: Settings) -> InvoicerResult<()> {
        if !settings.data_directory.is_empty() {
            self.store.set_data_directory(&settings.data_directory);
            tracing::info!(dir = %settings.data_directory, "data directory changed");
        }
        self.settings = settings;
        self.persist()?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Counters and settings as they will be written to `meta.json`
    pub fn meta(&self) -> Meta {
        Meta {
            next_id: self.invoice_ids.peek(),
            next_customer_id: self.customer_ids.peek(),
            settings: self.settings.clone(),
        }
    }

    pub fn data_directory(&self) -> std::path::PathBuf {
        self.store.data_directory()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let invoices: Vec<Invoice> = self.invoices.values().cloned().collect();
        let customers: Vec<Customer> = self.customers.values().cloned().collect();

        self.store
            .save(&invoices, &customers, &self.meta())
            .inspect_err(|e| tracing::warn!(error = %e, "failed to save documents"))
    }
}

/// Counter for a collection, never below the highest stored id plus one
fn resume_sequence<'a>(
    entity_type: &'static str,
    stored: RecordId,
    ids: impl Iterator<Item = &'a RecordId>,
) -> IdSequence {
    match ids.max() {
        Some(&max) if stored <= max => {
            let resumed = max.saturating_add(1);
            tracing::warn!(
                entity = entity_type,
                stored,
                resumed,
                "id counter behind stored records, skipping occupied ids"
            );
            IdSequence::starting_at(resumed)
        }
        _ => IdSequence::starting_at(stored),
    }
}
