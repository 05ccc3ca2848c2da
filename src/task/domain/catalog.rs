//! Static catalog of reference types and the task kinds applicable to each.

use super::{ParseCatalogError, ReferenceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of external business object a task serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceType {
    /// A customer order.
    Order,
    /// A customer or partner entity.
    Entity,
    /// An inbound enquiry.
    Enquiry,
}

impl ReferenceType {
    /// Every reference type known to the catalog.
    pub const ALL: [Self; 3] = [Self::Order, Self::Entity, Self::Enquiry];

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "ORDER",
            Self::Entity => "ENTITY",
            Self::Enquiry => "ENQUIRY",
        }
    }

    /// Returns the task kinds that apply to this reference type, in catalog
    /// order.
    #[must_use]
    pub fn applicable_kinds(self) -> Vec<TaskKind> {
        TaskKind::ALL
            .into_iter()
            .filter(|kind| kind.applies_to(self))
            .collect()
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReferenceType {
    type Error = ParseCatalogError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == normalized)
            .ok_or_else(|| ParseCatalogError {
                catalog: "reference type",
                label: value.to_owned(),
            })
    }
}

/// Category of work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    /// Raise the invoice for an order.
    CreateInvoice,
    /// Arrange pickup of an order's goods.
    ArrangePickup,
    /// Collect payment for an order.
    CollectPayment,
    /// Assign a customer entity to a sales person.
    AssignCustomerToSalesPerson,
}

impl TaskKind {
    /// Every task kind in catalog order.
    pub const ALL: [Self; 4] = [
        Self::CreateInvoice,
        Self::ArrangePickup,
        Self::CollectPayment,
        Self::AssignCustomerToSalesPerson,
    ];

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateInvoice => "CREATE_INVOICE",
            Self::ArrangePickup => "ARRANGE_PICKUP",
            Self::CollectPayment => "COLLECT_PAYMENT",
            Self::AssignCustomerToSalesPerson => "ASSIGN_CUSTOMER_TO_SALES_PERSON",
        }
    }

    /// Returns a human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CreateInvoice => "Create Invoice",
            Self::ArrangePickup => "Arrange Pickup",
            Self::CollectPayment => "Collect Payment",
            Self::AssignCustomerToSalesPerson => "Assign Customer to Sales Person",
        }
    }

    /// Returns the reference types this kind can be raised against.
    #[must_use]
    pub const fn reference_types(self) -> &'static [ReferenceType] {
        match self {
            Self::CreateInvoice | Self::ArrangePickup | Self::CollectPayment => {
                &[ReferenceType::Order]
            }
            Self::AssignCustomerToSalesPerson => &[ReferenceType::Entity],
        }
    }

    /// Returns `true` when this kind applies to the reference type.
    #[must_use]
    pub fn applies_to(self, reference_type: ReferenceType) -> bool {
        self.reference_types().contains(&reference_type)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = ParseCatalogError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == normalized)
            .ok_or_else(|| ParseCatalogError {
                catalog: "task kind",
                label: value.to_owned(),
            })
    }
}

/// Composite key of the external business object a task serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskReference {
    reference_id: ReferenceId,
    reference_type: ReferenceType,
}

impl TaskReference {
    /// Creates a reference from its parts.
    #[must_use]
    pub const fn new(reference_id: ReferenceId, reference_type: ReferenceType) -> Self {
        Self {
            reference_id,
            reference_type,
        }
    }

    /// Returns the external object identifier.
    #[must_use]
    pub const fn reference_id(&self) -> ReferenceId {
        self.reference_id
    }

    /// Returns the external object type.
    #[must_use]
    pub const fn reference_type(&self) -> ReferenceType {
        self.reference_type
    }
}

impl fmt::Display for TaskReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.reference_type, self.reference_id)
    }
}
