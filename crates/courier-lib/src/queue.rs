//! Two-tier dispatch queue.
//!
//! Orders from both tiers share one ordered map keyed by
//! `(tier, arrival sequence)`. Because [`DeliveryTier::Expedited`] sorts first,
//! popping the smallest key always drains every expedited order before any
//! standard one, and the monotonically increasing sequence keeps each tier in
//! arrival order.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::location::LocationId;
use crate::order::{DeliveryTier, Order};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct QueueKey {
    tier: DeliveryTier,
    sequence: u64,
}

impl QueueKey {
    fn tier_bounds(tier: DeliveryTier) -> (Self, Self) {
        (
            Self { tier, sequence: 0 },
            Self {
                tier,
                sequence: u64::MAX,
            },
        )
    }
}

/// Pending orders for one session plus the locations accepting deliveries.
#[derive(Debug, Clone, Default)]
pub struct DispatchQueue {
    available: BTreeSet<LocationId>,
    orders: BTreeMap<QueueKey, Order>,
    next_sequence: u64,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue that accepts deliveries to `available`.
    pub fn with_available<I>(available: I) -> Self
    where
        I: IntoIterator<Item = LocationId>,
    {
        let mut queue = Self::new();
        queue.set_available_locations(available);
        queue
    }

    /// Replace today's available locations. Already queued orders are kept.
    pub fn set_available_locations<I>(&mut self, available: I)
    where
        I: IntoIterator<Item = LocationId>,
    {
        self.available = available.into_iter().collect();
        debug!(count = self.available.len(), "available locations updated");
    }

    pub fn available_locations(&self) -> impl Iterator<Item = &LocationId> {
        self.available.iter()
    }

    /// Whether orders for `location` are accepted this session.
    pub fn is_location_valid(&self, location: &str) -> bool {
        self.available.contains(location)
    }

    /// Queue an order for delivery.
    ///
    /// Fails with [`Error::UnavailableLocation`] when the location is not in
    /// today's available set; the queue is left untouched in that case.
    pub fn enqueue(
        &mut self,
        name: impl Into<String>,
        tier: DeliveryTier,
        location: impl Into<LocationId>,
    ) -> Result<&Order> {
        let location = location.into();
        if !self.is_location_valid(location.as_str()) {
            debug!(%location, "rejecting order for unavailable location");
            return Err(Error::UnavailableLocation { location });
        }

        let order = Order::new(name.into(), tier, location);
        let key = QueueKey {
            tier,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;

        info!(
            order = order.name(),
            priority = order.priority(),
            location = %order.location(),
            "order added"
        );
        Ok(self.orders.entry(key).or_insert(order))
    }

    /// Remove and return the next order to deliver, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<Order> {
        let (key, order) = self.orders.pop_first()?;
        debug!(tier = %key.tier, order = order.name(), "order dequeued");
        Some(order)
    }

    /// Next order to deliver without removing it.
    pub fn peek(&self) -> Option<&Order> {
        self.orders.values().next()
    }

    /// Orders of one tier in dispatch order. Does not modify the queue.
    pub fn show(&self, tier: DeliveryTier) -> impl Iterator<Item = &Order> {
        let (low, high) = QueueKey::tier_bounds(tier);
        self.orders.range(low..=high).map(|(_, order)| order)
    }

    /// Queued expedited orders in dispatch order.
    pub fn show_fast(&self) -> impl Iterator<Item = &Order> {
        self.show(DeliveryTier::Expedited)
    }

    /// Queued standard orders in dispatch order.
    pub fn show_normal(&self) -> impl Iterator<Item = &Order> {
        self.show(DeliveryTier::Standard)
    }

    /// Every queued order in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn tier_len(&self, tier: DeliveryTier) -> usize {
        self.show(tier).count()
    }

    /// Start a fresh session: drop every queued order and available location.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
