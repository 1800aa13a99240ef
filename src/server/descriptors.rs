//! Route descriptors for the invoice and customer collections

use super::entity_registry::{EntityDescriptor, EntityRoute};
use super::handlers::{customers, invoices};

/// Routes of `/api/invoices`
pub struct InvoiceDescriptor;

impl EntityDescriptor for InvoiceDescriptor {
    fn entity_type(&self) -> &str {
        "invoice"
    }

    fn plural(&self) -> &str {
        "invoices"
    }

    fn routes(&self) -> Vec<EntityRoute> {
        vec![
            EntityRoute::at("")
                .get(invoices::list_invoices)
                .post(invoices::create_invoice),
            EntityRoute::at("/{id}")
                .get(invoices::get_invoice)
                .delete(invoices::delete_invoice),
            EntityRoute::at("/{id}/template").put(invoices::toggle_template),
            EntityRoute::at("/{id}/pdf").get(invoices::invoice_pdf),
        ]
    }
}

/// Routes of `/api/customers`
pub struct CustomerDescriptor;

impl EntityDescriptor for CustomerDescriptor {
    fn entity_type(&self) -> &str {
        "customer"
    }

    fn plural(&self) -> &str {
        "customers"
    }

    fn routes(&self) -> Vec<EntityRoute> {
        vec![
            EntityRoute::at("")
                .get(customers::list_customers)
                .post(customers::create_customer),
            EntityRoute::at("/{id}")
                .get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        ]
    }
}
