//! DNS record operations

use super::{DeleteOutcome, ObjectManager, Selector};
use crate::common::query::SearchFilter;
use crate::connector_trait::IbConnector;
use crate::error::IbError;
use crate::models::{
    AddressTarget, Ea, EaDiff, RecordA, RecordHttps, RecordMx, RecordSrv, Reference, check_u16,
};
use std::net::Ipv4Addr;

/// Apply a TTL change; setting one also turns on `use_ttl`
fn apply_ttl(ttl: &mut Option<u32>, use_ttl: &mut Option<bool>, new: Option<u32>) {
    if let Some(new) = new {
        *ttl = Some(new);
        *use_ttl = Some(true);
    }
}

/// Field changes for [`ObjectManager::update_a_record`]; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ARecordUpdate {
    /// New record name (FQDN); renaming changes the reference
    pub name: Option<String>,
    /// New literal address
    pub ipv4addr: Option<Ipv4Addr>,
    /// TTL in seconds; also sets `use_ttl`
    pub ttl: Option<u32>,
    /// Free-form comment
    pub comment: Option<String>,
}

/// Field changes for [`ObjectManager::update_mx_record`]; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MxRecordUpdate {
    /// New record name (FQDN); renaming changes the reference
    pub name: Option<String>,
    /// Host that accepts mail for `name`
    pub mail_exchanger: Option<String>,
    /// Preference, 0 to 65535; lower is preferred
    pub preference: Option<u32>,
    /// TTL in seconds; also sets `use_ttl`
    pub ttl: Option<u32>,
    /// Free-form comment
    pub comment: Option<String>,
}

impl MxRecordUpdate {
    fn validate(&self) -> Result<(), IbError> {
        check_u16("preference", self.preference)
    }
}

/// Field changes for [`ObjectManager::update_srv_record`]; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SrvRecordUpdate {
    /// New record name (FQDN); renaming changes the reference
    pub name: Option<String>,
    /// Priority, 0 to 65535; lower is tried first
    pub priority: Option<u32>,
    /// Weight among equal priorities, 0 to 65535
    pub weight: Option<u32>,
    /// Service port, 0 to 65535
    pub port: Option<u32>,
    /// Host providing the service
    pub target: Option<String>,
    /// TTL in seconds; also sets `use_ttl`
    pub ttl: Option<u32>,
    /// Free-form comment
    pub comment: Option<String>,
}

impl SrvRecordUpdate {
    fn validate(&self) -> Result<(), IbError> {
        check_u16("priority", self.priority)?;
        check_u16("weight", self.weight)?;
        check_u16("port", self.port)
    }
}

/// Field changes for [`ObjectManager::update_https_record`]; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpsRecordUpdate {
    /// New record name (FQDN); renaming changes the reference
    pub name: Option<String>,
    /// Priority, 0 to 65535; 0 marks an alias record
    pub priority: Option<u32>,
    /// Target host of the service binding
    pub target_name: Option<String>,
    /// TTL in seconds; also sets `use_ttl`
    pub ttl: Option<u32>,
    /// Free-form comment
    pub comment: Option<String>,
}

impl HttpsRecordUpdate {
    fn validate(&self) -> Result<(), IbError> {
        check_u16("priority", self.priority)
    }
}

impl<C: IbConnector> ObjectManager<C> {
    /// Create an A record.
    ///
    /// With an explicit `ipv4addr` the record gets that address. Without one,
    /// `cidr` names the network in `network_view` the store allocates the
    /// next free address from.
    pub async fn create_a_record(
        &self,
        network_view: &str,
        view: &str,
        name: &str,
        ipv4addr: Option<Ipv4Addr>,
        cidr: Option<&str>,
        ea: Ea,
    ) -> Result<RecordA, IbError> {
        let target = match (ipv4addr, cidr) {
            (Some(ip), _) => AddressTarget::Explicit(ip),
            (None, Some(cidr)) => AddressTarget::NextAvailable {
                network: cidr.to_string(),
                network_view: network_view.to_string(),
            },
            (None, None) => {
                return Err(IbError::validation(
                    "ipv4addr",
                    "an address or a network to allocate from is required",
                ));
            }
        };
        self.create_object(RecordA::new(view, name, target).with_ea(ea))
            .await
    }

    /// A record `name` in `view`, optionally pinned to one address
    pub async fn get_a_record(
        &self,
        view: &str,
        name: &str,
        ipv4addr: Option<Ipv4Addr>,
    ) -> Result<Option<RecordA>, IbError> {
        let mut filter = SearchFilter::new().with("view", view).with("name", name);
        if let Some(ip) = ipv4addr {
            filter.insert("ipv4addr", ip.to_string());
        }
        self.find_first(filter).await
    }

    /// A record by reference
    pub async fn get_a_record_by_ref(&self, reference: &Reference) -> Result<RecordA, IbError> {
        self.get_by_ref(reference).await
    }

    /// Every A record for `name` in `view`
    pub async fn find_a_records(&self, view: &str, name: &str) -> Result<Vec<RecordA>, IbError> {
        self.search(SearchFilter::new().with("view", view).with("name", name))
            .await
    }

    /// Change an A record's fields and apply an EA diff
    pub async fn update_a_record(
        &self,
        reference: &Reference,
        update: ARecordUpdate,
        ea: &EaDiff,
    ) -> Result<RecordA, IbError> {
        self.update_object(
            reference,
            |record: &mut RecordA| {
                if let Some(name) = update.name {
                    record.name = Some(name);
                }
                if let Some(ip) = update.ipv4addr {
                    record.ipv4addr = Some(AddressTarget::Explicit(ip));
                }
                apply_ttl(&mut record.ttl, &mut record.use_ttl, update.ttl);
                if let Some(comment) = update.comment {
                    record.comment = Some(comment);
                }
            },
            ea,
        )
        .await
    }

    /// Delete an A record by reference when bound, by view, name and address otherwise
    pub async fn delete_a_record(&self, record: &RecordA) -> Result<DeleteOutcome, IbError> {
        self.delete_object::<RecordA>(&Selector::of(record)).await
    }

    /// Create an MX record for `fqdn` pointing at `mail_exchanger`
    pub async fn create_mx_record(
        &self,
        view: &str,
        fqdn: &str,
        mail_exchanger: &str,
        preference: u32,
        comment: Option<String>,
        ea: Ea,
    ) -> Result<RecordMx, IbError> {
        let mut record = RecordMx::new(view, fqdn, mail_exchanger, preference).with_ea(ea);
        record.comment = comment;
        self.create_object(record).await
    }

    /// MX record `fqdn` in `view`, optionally narrowed to one mail exchanger
    pub async fn get_mx_record(
        &self,
        view: &str,
        fqdn: &str,
        mail_exchanger: Option<&str>,
    ) -> Result<Option<RecordMx>, IbError> {
        let mut filter = SearchFilter::new().with("view", view).with("name", fqdn);
        filter.insert_opt("mail_exchanger", mail_exchanger);
        self.find_first(filter).await
    }

    /// MX record by reference
    pub async fn get_mx_record_by_ref(&self, reference: &Reference) -> Result<RecordMx, IbError> {
        self.get_by_ref(reference).await
    }

    /// Every MX record for `fqdn` in `view`
    pub async fn find_mx_records(&self, view: &str, fqdn: &str) -> Result<Vec<RecordMx>, IbError> {
        self.search(SearchFilter::new().with("view", view).with("name", fqdn))
            .await
    }

    /// Change an MX record's fields and apply an EA diff
    pub async fn update_mx_record(
        &self,
        reference: &Reference,
        update: MxRecordUpdate,
        ea: &EaDiff,
    ) -> Result<RecordMx, IbError> {
        update.validate()?;
        self.update_object(
            reference,
            |record: &mut RecordMx| {
                if let Some(name) = update.name {
                    record.name = Some(name);
                }
                if let Some(mx) = update.mail_exchanger {
                    record.mail_exchanger = Some(mx);
                }
                if let Some(preference) = update.preference {
                    record.preference = Some(preference);
                }
                apply_ttl(&mut record.ttl, &mut record.use_ttl, update.ttl);
                if let Some(comment) = update.comment {
                    record.comment = Some(comment);
                }
            },
            ea,
        )
        .await
    }

    /// Delete an MX record by reference when bound, by view, name and exchanger otherwise
    pub async fn delete_mx_record(&self, record: &RecordMx) -> Result<DeleteOutcome, IbError> {
        self.delete_object::<RecordMx>(&Selector::of(record)).await
    }

    /// Create an SRV record; build it with [`RecordSrv::new`] and its `with_*` setters
    pub async fn create_srv_record(&self, record: RecordSrv) -> Result<RecordSrv, IbError> {
        self.create_object(record).await
    }

    /// SRV record `name` in `view`, optionally narrowed by target and port
    pub async fn get_srv_record(
        &self,
        view: &str,
        name: &str,
        target: Option<&str>,
        port: Option<u32>,
    ) -> Result<Option<RecordSrv>, IbError> {
        let mut filter = SearchFilter::new().with("view", view).with("name", name);
        filter.insert_opt("target", target);
        if let Some(port) = port {
            filter.insert_number("port", port);
        }
        self.find_first(filter).await
    }

    /// SRV record by reference
    pub async fn get_srv_record_by_ref(&self, reference: &Reference) -> Result<RecordSrv, IbError> {
        self.get_by_ref(reference).await
    }

    /// Every SRV record for `name` in `view`
    pub async fn find_srv_records(&self, view: &str, name: &str) -> Result<Vec<RecordSrv>, IbError> {
        self.search(SearchFilter::new().with("view", view).with("name", name))
            .await
    }

    /// Change an SRV record's fields and apply an EA diff
    pub async fn update_srv_record(
        &self,
        reference: &Reference,
        update: SrvRecordUpdate,
        ea: &EaDiff,
    ) -> Result<RecordSrv, IbError> {
        update.validate()?;
        self.update_object(
            reference,
            |record: &mut RecordSrv| {
                if let Some(name) = update.name {
                    record.name = Some(name);
                }
                if let Some(priority) = update.priority {
                    record.priority = Some(priority);
                }
                if let Some(weight) = update.weight {
                    record.weight = Some(weight);
                }
                if let Some(port) = update.port {
                    record.port = Some(port);
                }
                if let Some(target) = update.target {
                    record.target = Some(target);
                }
                apply_ttl(&mut record.ttl, &mut record.use_ttl, update.ttl);
                if let Some(comment) = update.comment {
                    record.comment = Some(comment);
                }
            },
            ea,
        )
        .await
    }

    /// Delete an SRV record by reference when bound, by view, name, target and port otherwise
    pub async fn delete_srv_record(&self, record: &RecordSrv) -> Result<DeleteOutcome, IbError> {
        self.delete_object::<RecordSrv>(&Selector::of(record)).await
    }

    /// Create an HTTPS record; `priority` 0 makes it an alias record
    pub async fn create_https_record(
        &self,
        view: &str,
        name: &str,
        priority: u32,
        target_name: &str,
        comment: Option<String>,
        ea: Ea,
    ) -> Result<RecordHttps, IbError> {
        let mut record = RecordHttps::new(view, name, priority, target_name).with_ea(ea);
        record.comment = comment;
        self.create_object(record).await
    }

    /// HTTPS record `name` in `view`, optionally narrowed to one target
    pub async fn get_https_record(
        &self,
        view: &str,
        name: &str,
        target_name: Option<&str>,
    ) -> Result<Option<RecordHttps>, IbError> {
        let mut filter = SearchFilter::new().with("view", view).with("name", name);
        filter.insert_opt("target_name", target_name);
        self.find_first(filter).await
    }

    /// HTTPS record by reference
    pub async fn get_https_record_by_ref(&self, reference: &Reference) -> Result<RecordHttps, IbError> {
        self.get_by_ref(reference).await
    }

    /// Every HTTPS record for `name` in `view`
    pub async fn find_https_records(&self, view: &str, name: &str) -> Result<Vec<RecordHttps>, IbError> {
        self.search(SearchFilter::new().with("view", view).with("name", name))
            .await
    }

    /// Change an HTTPS record's fields and apply an EA diff
    pub async fn update_https_record(
        &self,
        reference: &Reference,
        update: HttpsRecordUpdate,
        ea: &EaDiff,
    ) -> Result<RecordHttps, IbError> {
        update.validate()?;
        self.update_object(
            reference,
            |record: &mut RecordHttps| {
                if let Some(name) = update.name {
                    record.name = Some(name);
                }
                if let Some(priority) = update.priority {
                    record.priority = Some(priority);
                }
                if let Some(target_name) = update.target_name {
                    record.target_name = Some(target_name);
                }
                apply_ttl(&mut record.ttl, &mut record.use_ttl, update.ttl);
                if let Some(comment) = update.comment {
                    record.comment = Some(comment);
                }
            },
            ea,
        )
        .await
    }

    /// Delete an HTTPS record by reference when bound, by view, name and target otherwise
    pub async fn delete_https_record(&self, record: &RecordHttps) -> Result<DeleteOutcome, IbError> {
        self.delete_object::<RecordHttps>(&Selector::of(record)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManagerConfig;
    use crate::mock::MockConnector;
    use crate::models::{EaValue, IbObject, parse_record_ref};
    use serde_json::json;

    fn manager() -> (MockConnector, ObjectManager<MockConnector>) {
        let mock = MockConnector::new();
        (mock.clone(), ObjectManager::new(mock, ManagerConfig::default()))
    }

    #[tokio::test]
    async fn test_mx_record_end_to_end() {
        let (mock, manager) = manager();

        let created = manager
            .create_mx_record("default", "test.example.com", "example.com", 10, None, Ea::new())
            .await
            .unwrap();
        let reference = created.reference.clone().unwrap();
        assert!(reference.as_str().starts_with("record:mx/"));
        assert!(reference.as_str().ends_with(":test.example.com/default"));

        let stored = mock.object(&reference).unwrap();
        assert_eq!(stored["name"], "test.example.com");
        assert_eq!(stored["mail_exchanger"], "example.com");
        assert_eq!(stored["preference"], 10);
        assert_eq!(stored["view"], "default");

        let by_ref = manager.get_mx_record_by_ref(&reference).await.unwrap();
        assert_eq!(by_ref, created);

        let by_search = manager
            .get_mx_record("default", "test.example.com", Some("example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_search.reference, created.reference);

        let outcome = manager.delete_mx_record(&by_search).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted(reference));
        assert!(mock.is_empty());
    }

    #[tokio::test]
    async fn test_a_record_round_trip() {
        let (_mock, manager) = manager();
        let ip = Ipv4Addr::new(192, 168, 1, 7);

        let created = manager
            .create_a_record("default", "default", "a7.test.com", Some(ip), None, Ea::new())
            .await
            .unwrap();
        let parsed = parse_record_ref(created.reference.as_ref().unwrap()).unwrap();
        assert_eq!(parsed.kind, "record:a");
        assert_eq!(parsed.name, "a7.test.com");
        assert_eq!(parsed.view, "default");

        let fetched = manager
            .get_a_record("default", "a7.test.com", Some(ip))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name.as_deref(), Some("a7.test.com"));
        assert_eq!(fetched.view.as_deref(), Some("default"));
        assert_eq!(fetched.ipv4addr, Some(AddressTarget::Explicit(ip)));
        assert_eq!(fetched.reference, created.reference);
    }

    #[tokio::test]
    async fn test_a_record_allocates_next_available() {
        let (mock, manager) = manager();

        let first = manager
            .create_a_record("default", "default", "h1.test.com", None, Some("10.1.0.0/24"), Ea::new())
            .await
            .unwrap();
        let second = manager
            .create_a_record("default", "default", "h2.test.com", None, Some("10.1.0.0/24"), Ea::new())
            .await
            .unwrap();

        assert_eq!(mock.object(first.reference.as_ref().unwrap()).unwrap()["ipv4addr"], "10.1.0.1");
        assert_eq!(mock.object(second.reference.as_ref().unwrap()).unwrap()["ipv4addr"], "10.1.0.2");

        let fetched = manager.get_a_record_by_ref(second.reference.as_ref().unwrap()).await.unwrap();
        assert_eq!(fetched.ipv4addr, Some(AddressTarget::Explicit(Ipv4Addr::new(10, 1, 0, 2))));
    }

    #[tokio::test]
    async fn test_a_record_without_address_or_network_is_rejected() {
        let (mock, manager) = manager();
        let err = manager
            .create_a_record("default", "default", "h.test.com", None, None, Ea::new())
            .await
            .unwrap_err();
        assert!(matches!(err, IbError::Validation { ref field, .. } if field == "ipv4addr"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_a_record_from_malformed_network_is_rejected() {
        let (mock, manager) = manager();
        let err = manager
            .create_a_record("default", "default", "h.test.com", None, Some("10.0.0.0"), Ea::new())
            .await
            .unwrap_err();
        assert!(matches!(err, IbError::Validation { ref field, .. } if field == "ipv4addr"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_ea_add_is_idempotent() {
        let (mock, manager) = manager();
        let created = manager
            .create_a_record(
                "default",
                "default",
                "a7.test.com",
                Some(Ipv4Addr::new(192, 168, 1, 7)),
                None,
                Ea::new(),
            )
            .await
            .unwrap();
        let reference = created.reference.unwrap();
        let diff = EaDiff::new().add("Site", "Blr");

        let once = manager
            .update_a_record(&reference, ARecordUpdate::default(), &diff)
            .await
            .unwrap();
        let twice = manager
            .update_a_record(once.reference.as_ref().unwrap(), ARecordUpdate::default(), &diff)
            .await
            .unwrap();

        assert_eq!(once.ea, twice.ea);
        assert_eq!(twice.ea.len(), 1);
        assert_eq!(
            mock.object(twice.reference.as_ref().unwrap()).unwrap()["extattrs"],
            json!({ "Site": { "value": "Blr" } })
        );
    }

    #[tokio::test]
    async fn test_update_a_record_rename_rebinds() {
        let (_mock, manager) = manager();
        let created = manager
            .create_a_record("default", "default", "old.test.com", Some(Ipv4Addr::new(10, 0, 0, 9)), None, Ea::new())
            .await
            .unwrap();

        let updated = manager
            .update_a_record(
                created.reference.as_ref().unwrap(),
                ARecordUpdate {
                    name: Some("new.test.com".to_string()),
                    ttl: Some(300),
                    ..Default::default()
                },
                &EaDiff::new(),
            )
            .await
            .unwrap();

        assert_ne!(updated.reference, created.reference);
        assert_eq!(parse_record_ref(updated.reference.as_ref().unwrap()).unwrap().name, "new.test.com");
        assert_eq!(updated.ttl, Some(300));
        assert_eq!(updated.use_ttl, Some(true));
        assert_eq!(updated.ipv4addr, created.ipv4addr);
    }

    #[tokio::test]
    async fn test_update_mx_out_of_range_is_local() {
        let (mock, manager) = manager();
        let created = manager
            .create_mx_record("default", "m.test.com", "mx.test.com", 10, None, Ea::new())
            .await
            .unwrap();
        let calls_before = mock.calls().len();

        let err = manager
            .update_mx_record(
                created.reference.as_ref().unwrap(),
                MxRecordUpdate {
                    preference: Some(65536),
                    ..Default::default()
                },
                &EaDiff::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, IbError::Validation { ref field, .. } if field == "preference"));
        assert_eq!(mock.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_update_mx_keeps_unchanged_fields() {
        let (_mock, manager) = manager();
        let created = manager
            .create_mx_record(
                "default",
                "m.test.com",
                "mx.test.com",
                10,
                Some("primary".to_string()),
                Ea::new().with("Owner", "mail"),
            )
            .await
            .unwrap();

        let updated = manager
            .update_mx_record(
                created.reference.as_ref().unwrap(),
                MxRecordUpdate {
                    preference: Some(5),
                    ..Default::default()
                },
                &EaDiff::new().remove("Owner"),
            )
            .await
            .unwrap();

        assert_eq!(updated.preference, Some(5));
        assert_eq!(updated.mail_exchanger.as_deref(), Some("mx.test.com"));
        assert_eq!(updated.comment.as_deref(), Some("primary"));
        assert!(updated.ea.is_empty());
    }

    #[tokio::test]
    async fn test_srv_record_search_by_port() {
        let (_mock, manager) = manager();
        let ldap = RecordSrv::new("default", "_ldap._tcp.test.com", 10, 5, 389, "dc1.test.com");
        let ldaps = RecordSrv::new("default", "_ldap._tcp.test.com", 10, 5, 636, "dc1.test.com");
        manager.create_srv_record(ldap).await.unwrap();
        let secure = manager.create_srv_record(ldaps).await.unwrap();

        let found = manager
            .get_srv_record("default", "_ldap._tcp.test.com", Some("dc1.test.com"), Some(636))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.reference, secure.reference);
        assert_eq!(found.port, Some(636));
    }

    #[tokio::test]
    async fn test_srv_record_update_and_identity_delete() {
        let (mock, manager) = manager();
        let created = manager
            .create_srv_record(
                RecordSrv::new("default", "_sip._udp.test.com", 0, 0, 5060, "sip.test.com").with_ttl(60),
            )
            .await
            .unwrap();

        let err = manager
            .update_srv_record(
                created.reference.as_ref().unwrap(),
                SrvRecordUpdate {
                    weight: Some(70_000),
                    ..Default::default()
                },
                &EaDiff::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, IbError::Validation { ref field, .. } if field == "weight"));

        let updated = manager
            .update_srv_record(
                created.reference.as_ref().unwrap(),
                SrvRecordUpdate {
                    weight: Some(20),
                    ..Default::default()
                },
                &EaDiff::new(),
            )
            .await
            .unwrap();
        assert_eq!(updated.weight, Some(20));
        assert_eq!(updated.ttl, Some(60));

        let unbound = RecordSrv::new("default", "_sip._udp.test.com", 0, 20, 5060, "sip.test.com");
        assert_eq!(unbound.descriptor().kind(), "record:srv");
        let outcome = manager.delete_srv_record(&unbound).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted(_)));
        assert!(mock.is_empty());
    }

    #[tokio::test]
    async fn test_https_record_lifecycle() {
        let (mock, manager) = manager();
        let created = manager
            .create_https_record(
                "default",
                "svc.test.com",
                1,
                "cdn.test.com",
                Some("edge".to_string()),
                Ea::new().with("Managed", true),
            )
            .await
            .unwrap();
        assert_eq!(
            mock.object(created.reference.as_ref().unwrap()).unwrap()["extattrs"],
            json!({ "Managed": { "value": "True" } })
        );

        let found = manager
            .get_https_record("default", "svc.test.com", None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.ea.get("Managed"), Some(&EaValue::Bool(true)));

        let updated = manager
            .update_https_record(
                found.reference.as_ref().unwrap(),
                HttpsRecordUpdate {
                    priority: Some(0),
                    target_name: Some("origin.test.com".to_string()),
                    ..Default::default()
                },
                &EaDiff::new(),
            )
            .await
            .unwrap();
        assert_eq!(updated.priority, Some(0));
        assert_eq!(updated.target_name.as_deref(), Some("origin.test.com"));

        let by_ref = manager
            .get_https_record_by_ref(updated.reference.as_ref().unwrap())
            .await
            .unwrap();
        assert_eq!(by_ref, updated);

        manager.delete_https_record(&by_ref).await.unwrap();
        assert!(mock.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_record_by_identity_is_absent() {
        let (_mock, manager) = manager();
        let ghost = RecordMx::new("default", "ghost.test.com", "mx.test.com", 10);
        assert_eq!(manager.delete_mx_record(&ghost).await.unwrap(), DeleteOutcome::Absent);
    }
}
