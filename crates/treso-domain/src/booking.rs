//! Container and booking records from the pending-container screen.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single container line tagged with the carrier booking it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerRecord {
    pub container_number: String,
    pub booking_number: String,
    pub client_name: String,
    #[serde(default)]
    pub vessel: Option<String>,
    #[serde(default)]
    pub shipping_line: Option<String>,
    #[serde(default)]
    pub container_type: Option<String>,
    #[serde(default)]
    pub eta: Option<NaiveDate>,
    #[serde(default)]
    pub etd: Option<NaiveDate>,
}

impl ContainerRecord {
    pub fn new(
        container_number: impl Into<String>,
        booking_number: impl Into<String>,
        client_name: impl Into<String>,
    ) -> Self {
        Self {
            container_number: container_number.into(),
            booking_number: booking_number.into(),
            client_name: client_name.into(),
            vessel: None,
            shipping_line: None,
            container_type: None,
            eta: None,
            etd: None,
        }
    }

    /// True when `other` carries the same booking-level metadata.
    pub fn shares_booking_metadata(&self, other: &ContainerRecord) -> bool {
        self.client_name == other.client_name
            && self.vessel == other.vessel
            && self.shipping_line == other.shipping_line
            && self.eta == other.eta
            && self.etd == other.etd
    }
}

/// Containers sharing one booking number. Recomputed from container records on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingGroup {
    pub booking_number: String,
    pub client_name: String,
    pub vessel: Option<String>,
    pub shipping_line: Option<String>,
    pub eta: Option<NaiveDate>,
    pub etd: Option<NaiveDate>,
    pub containers: Vec<ContainerRecord>,
    pub container_count: usize,
}

impl BookingGroup {
    /// Opens a group whose metadata is taken from `first`.
    pub fn seeded_by(first: ContainerRecord) -> Self {
        Self {
            booking_number: first.booking_number.clone(),
            client_name: first.client_name.clone(),
            vessel: first.vessel.clone(),
            shipping_line: first.shipping_line.clone(),
            eta: first.eta,
            etd: first.etd,
            containers: vec![first],
            container_count: 1,
        }
    }

    pub fn push(&mut self, record: ContainerRecord) {
        self.containers.push(record);
        self.container_count = self.containers.len();
    }
}
