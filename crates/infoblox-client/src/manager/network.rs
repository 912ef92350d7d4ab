//! Network view and network operations

use super::{DeleteOutcome, ObjectManager, Selector};
use crate::common::query::SearchFilter;
use crate::connector_trait::IbConnector;
use crate::error::IbError;
use crate::models::{Ea, EaDiff, Network, NetworkView, Reference};

/// Field changes for [`ObjectManager::update_network_view`]; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkViewUpdate {
    /// New view name; renaming changes the reference
    pub name: Option<String>,
    /// Free-form comment
    pub comment: Option<String>,
}

/// Field changes for [`ObjectManager::update_network`]; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkUpdate {
    /// Free-form comment
    pub comment: Option<String>,
}

impl<C: IbConnector> ObjectManager<C> {
    /// Create a network view
    pub async fn create_network_view(
        &self,
        name: &str,
        comment: Option<String>,
        ea: Ea,
    ) -> Result<NetworkView, IbError> {
        self.create_object(NetworkView::new(name, comment, ea)).await
    }

    /// Network view called `name`, if it exists
    pub async fn get_network_view(&self, name: &str) -> Result<Option<NetworkView>, IbError> {
        self.find_first(SearchFilter::new().with("name", name)).await
    }

    /// Network view by reference
    pub async fn get_network_view_by_ref(&self, reference: &Reference) -> Result<NetworkView, IbError> {
        self.get_by_ref(reference).await
    }

    /// Every network view, optionally narrowed by extensible attributes
    pub async fn find_network_views(&self, ea: &Ea) -> Result<Vec<NetworkView>, IbError> {
        let mut filter = SearchFilter::new();
        for (name, value) in ea.iter() {
            filter.insert_ea(name, value);
        }
        self.search(filter).await
    }

    /// Rename or re-comment a network view and apply an EA diff
    pub async fn update_network_view(
        &self,
        reference: &Reference,
        update: NetworkViewUpdate,
        ea: &EaDiff,
    ) -> Result<NetworkView, IbError> {
        self.update_object(
            reference,
            |nv: &mut NetworkView| {
                if let Some(name) = update.name {
                    nv.name = Some(name);
                }
                if let Some(comment) = update.comment {
                    nv.comment = Some(comment);
                }
            },
            ea,
        )
        .await
    }

    /// Delete a network view by reference when bound, by name otherwise
    pub async fn delete_network_view(&self, view: &NetworkView) -> Result<DeleteOutcome, IbError> {
        self.delete_object::<NetworkView>(&Selector::of(view)).await
    }

    /// Create an IPv4 network in `network_view`
    pub async fn create_network(
        &self,
        network_view: &str,
        cidr: &str,
        comment: Option<String>,
        ea: Ea,
    ) -> Result<Network, IbError> {
        self.create_object(Network::new(network_view, cidr, comment, ea)).await
    }

    /// Network `cidr` in `network_view`, if it exists
    pub async fn get_network(&self, network_view: &str, cidr: &str) -> Result<Option<Network>, IbError> {
        let filter = SearchFilter::new()
            .with("network_view", network_view)
            .with("network", cidr);
        self.find_first(filter).await
    }

    /// Network by reference
    pub async fn get_network_by_ref(&self, reference: &Reference) -> Result<Network, IbError> {
        self.get_by_ref(reference).await
    }

    /// Every network in `network_view`
    pub async fn find_networks(&self, network_view: &str) -> Result<Vec<Network>, IbError> {
        self.search(SearchFilter::new().with("network_view", network_view))
            .await
    }

    /// Re-comment a network and apply an EA diff; the network view cannot change
    pub async fn update_network(
        &self,
        reference: &Reference,
        update: NetworkUpdate,
        ea: &EaDiff,
    ) -> Result<Network, IbError> {
        self.update_object(
            reference,
            |net: &mut Network| {
                if let Some(comment) = update.comment {
                    net.comment = Some(comment);
                }
            },
            ea,
        )
        .await
    }

    /// Delete a network by reference when bound, by view and CIDR otherwise
    pub async fn delete_network(&self, network: &Network) -> Result<DeleteOutcome, IbError> {
        self.delete_object::<Network>(&Selector::of(network)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManagerConfig;
    use crate::mock::MockConnector;
    use crate::models::{EaValue, parse_network_ref, parse_network_view_ref};

    fn manager() -> (MockConnector, ObjectManager<MockConnector>) {
        let mock = MockConnector::new();
        (mock.clone(), ObjectManager::new(mock, ManagerConfig::default()))
    }

    #[tokio::test]
    async fn test_network_view_lifecycle() {
        let (mock, manager) = manager();

        let created = manager
            .create_network_view("blue", Some("lab".to_string()), Ea::new().with("Site", "Blr"))
            .await
            .unwrap();
        let reference = created.reference.clone().unwrap();
        let parsed = parse_network_view_ref(&reference).unwrap();
        assert_eq!(parsed.name, "blue");
        assert!(!parsed.is_default);

        let found = manager.get_network_view("blue").await.unwrap().unwrap();
        assert_eq!(found.reference, created.reference);
        assert_eq!(found.ea.get("Site"), Some(&EaValue::from("Blr")));

        let renamed = manager
            .update_network_view(
                &reference,
                NetworkViewUpdate {
                    name: Some("green".to_string()),
                    comment: None,
                },
                &EaDiff::new(),
            )
            .await
            .unwrap();
        assert_eq!(renamed.comment.as_deref(), Some("lab"));
        assert_eq!(parse_network_view_ref(renamed.reference.as_ref().unwrap()).unwrap().name, "green");
        assert!(manager.get_network_view("blue").await.unwrap().is_none());

        let outcome = manager.delete_network_view(&renamed).await.unwrap();
        assert_eq!(outcome.reference(), renamed.reference.as_ref());
        assert!(mock.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_network_view_is_none() {
        let (_mock, manager) = manager();
        assert!(manager.get_network_view("nowhere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_network_lifecycle() {
        let (mock, manager) = manager();

        let created = manager
            .create_network("default", "10.10.0.0/24", None, Ea::new())
            .await
            .unwrap();
        let parsed = parse_network_ref(created.reference.as_ref().unwrap()).unwrap();
        assert_eq!(parsed.cidr, "10.10.0.0/24");
        assert_eq!(parsed.network_view, "default");

        let found = manager.get_network("default", "10.10.0.0/24").await.unwrap().unwrap();
        assert_eq!(found.reference, created.reference);
        assert!(manager.get_network("blue", "10.10.0.0/24").await.unwrap().is_none());

        let updated = manager
            .update_network(
                created.reference.as_ref().unwrap(),
                NetworkUpdate {
                    comment: Some("uplinks".to_string()),
                },
                &EaDiff::new().add("VLAN", 42),
            )
            .await
            .unwrap();
        assert_eq!(updated.comment.as_deref(), Some("uplinks"));
        assert_eq!(updated.ea.get("VLAN"), Some(&EaValue::Int(42)));
        assert_eq!(updated.network_view.as_deref(), Some("default"));

        // Unbound copy: deleted by identity
        let unbound = Network::new("default", "10.10.0.0/24", None, Ea::new());
        let outcome = manager.delete_network(&unbound).await.unwrap();
        assert_eq!(outcome.reference(), updated.reference.as_ref());
        assert!(mock.is_empty());
    }

    #[tokio::test]
    async fn test_find_networks_by_view() {
        let (_mock, manager) = manager();
        manager.create_network("default", "10.0.0.0/24", None, Ea::new()).await.unwrap();
        manager.create_network("default", "10.0.1.0/24", None, Ea::new()).await.unwrap();
        manager.create_network("blue", "10.0.0.0/24", None, Ea::new()).await.unwrap();

        let nets = manager.find_networks("default").await.unwrap();
        assert_eq!(nets.len(), 2);
        assert!(nets.iter().all(|n| n.network_view.as_deref() == Some("default")));
    }

    #[tokio::test]
    async fn test_invalid_cidr_never_reaches_connector() {
        let (mock, manager) = manager();
        let err = manager
            .create_network("default", "10.0.0.0/40", None, Ea::new())
            .await
            .unwrap_err();
        assert!(matches!(err, IbError::Validation { ref field, .. } if field == "network"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_find_network_views_by_ea() {
        let (_mock, manager) = manager();
        manager.create_network_view("blr", None, Ea::new().with("Site", "Blr")).await.unwrap();
        manager.create_network_view("pune", None, Ea::new().with("Site", "Pune")).await.unwrap();

        let all = manager.find_network_views(&Ea::new()).await.unwrap();
        assert_eq!(all.len(), 2);

        let blr = manager.find_network_views(&Ea::new().with("Site", "Blr")).await.unwrap();
        assert_eq!(blr.len(), 1);
        assert_eq!(blr[0].name.as_deref(), Some("blr"));
    }
}
