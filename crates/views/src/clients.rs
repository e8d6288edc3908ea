//! Clients page: search by name, email or phone.

use crate::definition::ViewDefinition;
use crate::schema::ViewSchema;
use chrono::{DateTime, Utc};
use pipeline::filters::FieldValue;
use store::{Client, Dataset, RecordStore};

sort_order! {
    ClientSort for Client {
        Name => "name", |a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase());
        TotalSpent => "spent-desc", |a, b| b.total_spent.total_cmp(&a.total_spent);
        Newest => "newest", |a, b| b.joined_at.cmp(&a.joined_at);
    }
}

pub struct ClientsView;

impl ViewDefinition for ClientsView {
    type Item = Client;
    type Sort = ClientSort;

    const ROUTE: &'static str = "clients";

    fn schema() -> ViewSchema {
        ViewSchema::new::<Client, ClientSort>(Self::ROUTE)
    }

    fn search_fields(client: &Client) -> Vec<&str> {
        vec![&client.name, &client.email, &client.phone]
    }

    fn enum_field(_param: &str) -> Option<FieldValue<Client>> {
        None
    }

    fn timestamp(client: &Client) -> Option<DateTime<Utc>> {
        Some(client.joined_at)
    }

    fn store(dataset: &Dataset) -> &RecordStore<Client> {
        &dataset.clients
    }

    fn store_mut(dataset: &mut Dataset) -> &mut RecordStore<Client> {
        &mut dataset.clients
    }
}
