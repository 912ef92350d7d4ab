//! DHCP range template operations

use super::{DeleteOutcome, ObjectManager, Selector};
use crate::common::query::SearchFilter;
use crate::connector_trait::IbConnector;
use crate::error::IbError;
use crate::models::{Ea, EaDiff, RangeTemplate, Reference};

/// Field changes for [`ObjectManager::update_range_template`]; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeTemplateUpdate {
    /// New template name
    pub name: Option<String>,
    /// Range length; must be at least 1
    pub number_of_addresses: Option<u32>,
    /// Start of the range as an offset into the network
    pub offset: Option<u32>,
    /// Free-form comment
    pub comment: Option<String>,
}

impl<C: IbConnector> ObjectManager<C> {
    /// Create a range template `number_of_addresses` long, starting `offset` into the network
    pub async fn create_range_template(
        &self,
        name: &str,
        number_of_addresses: u32,
        offset: u32,
        comment: Option<String>,
        ea: Ea,
    ) -> Result<RangeTemplate, IbError> {
        let mut template = RangeTemplate::new(name, number_of_addresses, offset).with_ea(ea);
        template.comment = comment;
        self.create_object(template).await
    }

    /// Range template called `name`; a missing template is `NotFound`
    pub async fn get_range_template(&self, name: &str) -> Result<RangeTemplate, IbError> {
        let selector = Selector::Search(SearchFilter::new().with("name", name));
        self.fetch_one(&selector).await
    }

    /// Range template by reference
    pub async fn get_range_template_by_ref(&self, reference: &Reference) -> Result<RangeTemplate, IbError> {
        self.get_by_ref(reference).await
    }

    /// Every range template
    pub async fn find_range_templates(&self) -> Result<Vec<RangeTemplate>, IbError> {
        self.search(SearchFilter::new()).await
    }

    /// Resize, move or rename a range template and apply an EA diff
    pub async fn update_range_template(
        &self,
        reference: &Reference,
        update: RangeTemplateUpdate,
        ea: &EaDiff,
    ) -> Result<RangeTemplate, IbError> {
        if update.number_of_addresses == Some(0) {
            return Err(IbError::validation("number_of_addresses", "must be at least 1"));
        }
        self.update_object(
            reference,
            |template: &mut RangeTemplate| {
                if let Some(name) = update.name {
                    template.name = Some(name);
                }
                if let Some(n) = update.number_of_addresses {
                    template.number_of_addresses = Some(n);
                }
                if let Some(offset) = update.offset {
                    template.offset = Some(offset);
                }
                if let Some(comment) = update.comment {
                    template.comment = Some(comment);
                }
            },
            ea,
        )
        .await
    }

    /// Delete a range template by reference when bound, by name otherwise
    pub async fn delete_range_template(&self, template: &RangeTemplate) -> Result<DeleteOutcome, IbError> {
        self.delete_object::<RangeTemplate>(&Selector::of(template)).await
    }
}
