//! Inspection use cases.
//!
//! Each command is one store request whose result is turned into a
//! [`Report`]. The inspection binary is a thin clap front end over
//! [`Inspect`].

mod report;
mod run_query;

pub use report::Report;
pub use run_query::RunQuery;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use wayfarer_domain::{
    self as domain, LocationSlug, NpcSlug, StoreRecord, WorldHistoryEntry,
};

use super::history::{clamp_limit, DEFAULT_HISTORY_LIMIT};
use crate::entities::{History, Item, Location, Nation, Npc, Party, Scenario, Schema};
use crate::infrastructure::ports::{RepoError, TablePatch, TableQuery, TableStore};

/// One inspection request.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectCommand {
    Locations { location_type: Option<String> },
    Location { slug: LocationSlug },
    Items {
        item_type: Option<String>,
        search: Option<String>,
    },
    Npcs,
    Npc { slug: NpcSlug },
    SetNpcImage { slug: NpcSlug, image: String },
    Nations,
    Scenarios { quest_types: Vec<String> },
    Profiles,
    Party,
    History { limit: Option<i64> },
    Schema { table: String },
    Select(TableQuery),
    Update(TablePatch),
}

/// Runs inspection commands against one store.
pub struct Inspect {
    locations: Location,
    items: Item,
    npcs: Npc,
    nations: Nation,
    scenarios: Scenario,
    party: Party,
    history: History,
    schema: Schema,
    query: RunQuery,
}

impl Inspect {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            locations: Location::new(Arc::clone(&store)),
            items: Item::new(Arc::clone(&store)),
            npcs: Npc::new(Arc::clone(&store)),
            nations: Nation::new(Arc::clone(&store)),
            scenarios: Scenario::new(Arc::clone(&store)),
            party: Party::new(Arc::clone(&store)),
            history: History::new(Arc::clone(&store)),
            schema: Schema::new(Arc::clone(&store)),
            query: RunQuery::new(store),
        }
    }

    pub async fn execute(&self, command: InspectCommand) -> Result<Report, RepoError> {
        tracing::debug!(?command, "Running inspection");

        match command {
            InspectCommand::Locations { location_type } => {
                let locations = match location_type.as_deref() {
                    Some(kind) => self.locations.list_by_type(kind).await?,
                    None => self.locations.list().await?,
                };
                Ok(Report::listing(
                    "Locations",
                    locations.iter().map(location_line).collect(),
                ))
            }
            InspectCommand::Location { slug } => {
                let location = self.locations.get_by_slug(&slug).await?;
                single_row(domain::Location::TABLE, &location)
            }
            InspectCommand::Items { item_type, search } => {
                let items = match (item_type.as_deref(), search.as_deref()) {
                    (_, Some(fragment)) => self.items.search(fragment).await?,
                    (Some(kind), None) => self.items.list_by_type(kind).await?,
                    (None, None) => self.items.list().await?,
                };
                Ok(Report::listing("Items", items.iter().map(item_line).collect()))
            }
            InspectCommand::Npcs => {
                let npcs = self.npcs.list().await?;
                Ok(Report::listing("NPCs", npcs.iter().map(npc_line).collect()))
            }
            InspectCommand::Npc { slug } => {
                let npc = self.npcs.get_by_slug(&slug).await?;
                single_row(domain::Npc::TABLE, &npc)
            }
            InspectCommand::SetNpcImage { slug, image } => {
                let update = self.npcs.set_image(&slug, &image).await?;
                Ok(Report::updated(domain::Npc::TABLE, to_rows(&update.updated)?))
            }
            InspectCommand::Nations => {
                let nations = self.nations.list().await?;
                Ok(Report::rows(domain::Nation::TABLE, to_rows(&nations)?))
            }
            InspectCommand::Scenarios { quest_types } => {
                let scenarios = self.scenarios.list(&quest_types).await?;
                Ok(Report::listing(
                    "Scenarios",
                    scenarios.iter().map(scenario_line).collect(),
                ))
            }
            InspectCommand::Profiles => {
                let profiles = self.party.list_profiles().await?;
                Ok(Report::rows(domain::UserProfile::TABLE, to_rows(&profiles)?))
            }
            InspectCommand::Party => {
                let members = self.party.list_members().await?;
                Ok(Report::rows(domain::PartyMember::TABLE, to_rows(&members)?))
            }
            InspectCommand::History { limit } => {
                let limit = limit.map_or(DEFAULT_HISTORY_LIMIT, clamp_limit);
                let entries = self.history.recent(limit).await?;
                Ok(Report::rows(WorldHistoryEntry::TABLE, to_rows(&entries)?))
            }
            InspectCommand::Schema { table } => {
                let found = self.schema.columns_of(&table).await?;
                Ok(Report::Columns {
                    table: found.table,
                    columns: found.columns,
                })
            }
            InspectCommand::Select(query) => self.query.read(&query).await,
            InspectCommand::Update(patch) => self.query.write(&patch).await,
        }
    }
}

fn single_row(table: &str, record: &impl Serialize) -> Result<Report, RepoError> {
    let row = serde_json::to_value(record).map_err(RepoError::serialization)?;
    Ok(Report::rows(table, vec![row]))
}

fn to_rows<T: Serialize>(records: &[T]) -> Result<Vec<Value>, RepoError> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(RepoError::serialization))
        .collect()
}

fn location_line(location: &domain::Location) -> String {
    let mut line = format!("{}  {}", location.slug, location.name);
    if let Some(kind) = &location.location_type {
        line.push_str(&format!("  [{kind}]"));
    }
    match location.map_point() {
        Some(p) => line.push_str(&format!("  map=({}, {})", p.x, p.y)),
        None => line.push_str("  map=unplaced"),
    }
    if let Some(p) = location.world_point() {
        line.push_str(&format!("  world=({}, {})", p.x, p.y));
    }
    let neighbors = location.neighbor_keys();
    if !neighbors.is_empty() {
        line.push_str(&format!("  -> {}", neighbors.join(", ")));
    }
    line
}

fn item_line(item: &domain::Item) -> String {
    let price = item
        .effective_price()
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    let kind = item.effective_type().unwrap_or("-");
    format!("{}  {}  price={price}  type={kind}", item.id, item.name)
}

fn npc_line(npc: &domain::Npc) -> String {
    match &npc.image {
        Some(image) => format!("{}  {}  {image}", npc.slug, npc.name),
        None => format!("{}  {}  (no image)", npc.slug, npc.name),
    }
}

fn scenario_line(scenario: &domain::Scenario) -> String {
    let quest_type = scenario.quest_type.as_deref().unwrap_or("-");
    format!("{}  [{quest_type}]  {}", scenario.id, scenario.title)
}
