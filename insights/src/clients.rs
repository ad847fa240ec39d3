use shared_types::{Client, ClientType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientStats {
    pub total: usize,
    pub individuals: usize,
    pub organizations: usize,
}

impl ClientStats {
    pub fn compute(clients: &[Client]) -> Self {
        Self {
            total: clients.len(),
            individuals: count_by_type(clients, ClientType::Individual),
            organizations: count_by_type(clients, ClientType::Organization),
        }
    }
}

pub fn count_by_type(clients: &[Client], client_type: ClientType) -> usize {
    clients
        .iter()
        .filter(|c| c.client_type() == client_type)
        .count()
}
