use std::fmt::Write;

use serde::Serialize;

use crate::dispatch::{DeliveryLeg, DispatchPlan};
use crate::error::{Error, Result};
use crate::location::{LocationCatalog, LocationId};
use crate::order::DeliveryTier;
use crate::path::{DistanceMap, RoutePath};

/// Presentation style for turning a summary into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    RichText,
}

/// A location with its label resolved for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocationRef {
    pub code: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LocationRef {
    fn resolve(catalog: &LocationCatalog, code: &LocationId) -> Self {
        Self {
            code: code.clone(),
            label: catalog.label(code.as_str()).map(str::to_string),
        }
    }

    fn display_name(&self) -> String {
        match &self.label {
            Some(label) => format!("{} ({})", self.code, label),
            None => self.code.to_string(),
        }
    }
}

fn format_distance(distance: Option<u64>) -> String {
    match distance {
        Some(units) => format!("{units} units"),
        None => "no path found".to_string(),
    }
}

/// One delivery in a [`DispatchSummary`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LegSummary {
    pub sequence: usize,
    pub order: String,
    pub tier: DeliveryTier,
    pub priority: u8,
    pub from: LocationRef,
    pub to: LocationRef,
    pub distance: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<LocationRef>>,
}

impl LegSummary {
    fn from_leg(catalog: &LocationCatalog, leg: &DeliveryLeg) -> Self {
        Self {
            sequence: leg.sequence,
            order: leg.order.name().to_string(),
            tier: leg.order.tier(),
            priority: leg.order.priority(),
            from: LocationRef::resolve(catalog, &leg.from),
            to: LocationRef::resolve(catalog, &leg.to),
            distance: leg.distance,
            path: leg.path.as_ref().map(|steps| {
                steps
                    .iter()
                    .map(|code| LocationRef::resolve(catalog, code))
                    .collect()
            }),
        }
    }

    fn joined_path(&self) -> Option<String> {
        self.path.as_ref().map(|steps| {
            steps
                .iter()
                .map(|step| step.code.to_string())
                .collect::<Vec<_>>()
                .join(" -> ")
        })
    }
}

/// Structured view of a dispatch pass that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DispatchSummary {
    pub start: LocationRef,
    pub finish: LocationRef,
    pub deliveries: usize,
    pub total_distance: u64,
    pub unreachable: usize,
    pub legs: Vec<LegSummary>,
}

impl DispatchSummary {
    /// Convert a [`DispatchPlan`] into a summary with location labels.
    ///
    /// An empty plan finishes where it started with no distance travelled.
    pub fn from_plan(catalog: &LocationCatalog, plan: &DispatchPlan) -> Self {
        Self {
            start: LocationRef::resolve(catalog, &plan.start),
            finish: LocationRef::resolve(catalog, plan.finish()),
            deliveries: plan.legs.len(),
            total_distance: plan.total_distance(),
            unreachable: plan.unreachable_count(),
            legs: plan
                .legs
                .iter()
                .map(|leg| LegSummary::from_leg(catalog, leg))
                .collect(),
        }
    }

    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Dispatch: {} -> {} ({} deliveries, {} units)",
            self.start.display_name(),
            self.finish.display_name(),
            self.deliveries,
            self.total_distance
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "{:>3}: {} [{}] {} -> {}: {}",
                leg.sequence,
                leg.order,
                leg.tier,
                leg.from.display_name(),
                leg.to.display_name(),
                format_distance(leg.distance)
            );
            if let Some(path) = leg.joined_path() {
                let _ = writeln!(buffer, "     via {path}");
            }
        }
        if self.unreachable > 0 {
            let _ = writeln!(buffer, "{} deliveries had no path", self.unreachable);
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Dispatch** _{} → {}_ ({} deliveries, `{}` units)",
            self.start.display_name(),
            self.finish.display_name(),
            self.deliveries,
            self.total_distance
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** ({}) {} → {}: `{}`",
                leg.sequence,
                leg.order,
                leg.tier,
                leg.from.display_name(),
                leg.to.display_name(),
                format_distance(leg.distance)
            );
        }
        buffer
    }
}

/// One row of a [`DistanceSummary`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DistanceEntry {
    pub location: LocationRef,
    pub distance: Option<u64>,
}

/// Shortest distances from one source with labels resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DistanceSummary {
    pub source: LocationRef,
    pub entries: Vec<DistanceEntry>,
}

impl DistanceSummary {
    /// Summarise `distances`, listing every catalog location.
    ///
    /// Catalog locations without routes appear with no distance.
    pub fn from_map(catalog: &LocationCatalog, distances: &DistanceMap) -> Self {
        let entries = catalog
            .codes()
            .map(|code| DistanceEntry {
                location: LocationRef::resolve(catalog, code),
                distance: distances.distance_to(code.as_str()),
            })
            .collect();

        Self {
            source: LocationRef::resolve(catalog, distances.source()),
            entries,
        }
    }

    pub fn render(&self, mode: RenderMode) -> String {
        let mut buffer = String::new();
        let _ = match mode {
            RenderMode::PlainText => writeln!(
                buffer,
                "Shortest distances from {}:",
                self.source.display_name()
            ),
            RenderMode::RichText => writeln!(
                buffer,
                "**Shortest distances** from _{}_",
                self.source.display_name()
            ),
        };
        for entry in &self.entries {
            let bullet = match mode {
                RenderMode::PlainText => "  ",
                RenderMode::RichText => "* ",
            };
            let _ = writeln!(
                buffer,
                "{bullet}{}: {}",
                entry.location.display_name(),
                format_distance(entry.distance)
            );
        }
        buffer
    }
}

/// A shortest path with labels resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathSummary {
    pub from: LocationRef,
    pub to: LocationRef,
    pub distance: u64,
    pub hops: usize,
    pub steps: Vec<LocationRef>,
}

impl PathSummary {
    pub fn from_path(catalog: &LocationCatalog, path: &RoutePath) -> Result<Self> {
        let (Some(first), Some(last)) = (path.steps.first(), path.steps.last()) else {
            return Err(Error::EmptyRoutePath);
        };

        Ok(Self {
            from: LocationRef::resolve(catalog, first),
            to: LocationRef::resolve(catalog, last),
            distance: path.distance,
            hops: path.hop_count(),
            steps: path
                .steps
                .iter()
                .map(|code| LocationRef::resolve(catalog, code))
                .collect(),
        })
    }

    pub fn render(&self, mode: RenderMode) -> String {
        let joined = self
            .steps
            .iter()
            .map(LocationRef::display_name)
            .collect::<Vec<_>>();
        match mode {
            RenderMode::PlainText => format!(
                "Route: {} -> {} ({} hops, {} units)\n{}\n",
                self.from.display_name(),
                self.to.display_name(),
                self.hops,
                self.distance,
                joined.join(" -> ")
            ),
            RenderMode::RichText => format!(
                "**Route** _{} → {}_ ({} hops, `{}` units)\n{}\n",
                self.from.display_name(),
                self.to.display_name(),
                self.hops,
                self.distance,
                joined.join(" → ")
            ),
        }
    }
}
