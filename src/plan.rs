//! The planner: one run of the weekly chore automation.
//!
//! [`plan_cycle`] and [`due_record`] are pure and unit-tested directly;
//! [`run`] wires them to the Notion client. Each record creation is an
//! independent attempt whose outcome is collected into a [`RunReport`] —
//! one failure never aborts the rest of the batch.

use chrono::NaiveDate;
use serde_json::json;

use crate::chore::{columns, Assignment, Chore, Roomie};
use crate::config::{rotation_epoch, Config};
use crate::error::{ChoreError, Result};
use crate::notion::types::sort_by_stable_key;
use crate::notion::NotionClient;
use crate::rotation;

/// Date format used in titles and the due-date property.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of one record-creation attempt.
#[derive(Debug)]
pub enum CreateOutcome {
    /// The due record was created.
    Created {
        /// Chore name, for reporting.
        chore: String,
        /// Assigned roomie name, for reporting.
        roomie: String,
    },
    /// Creation failed; the batch continued.
    Failed {
        /// Chore name, for reporting.
        chore: String,
        /// What went wrong.
        error: ChoreError,
    },
}

/// Summary of one run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Chores found in the source database (after empty-title skips).
    pub chores_found: usize,
    /// Roomies found on the roster.
    pub roomies_found: usize,
    /// Per-record outcomes for this cycle's due chores, in order.
    pub outcomes: Vec<CreateOutcome>,
}

impl RunReport {
    /// Number of record creations attempted.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of records successfully created.
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, CreateOutcome::Created { .. }))
            .count()
    }
}

/// Assign a roomie to every chore due on the given week.
///
/// Ordinals are positions in the **unfiltered** chore sequence, so a
/// chore keeps the same rotation lane whether or not its neighbors are
/// due this week. Relative chore order is preserved in the output.
///
/// Returns an empty plan when either slice is empty.
pub fn plan_cycle(chores: &[Chore], roomies: &[Roomie], weeks_elapsed: i64) -> Vec<Assignment> {
    if roomies.is_empty() {
        return Vec::new();
    }

    chores
        .iter()
        .enumerate()
        .filter(|(_, chore)| chore.is_due(weeks_elapsed))
        .map(|(ordinal, chore)| {
            let idx = rotation::assignee_index(ordinal, weeks_elapsed, roomies.len());
            Assignment {
                chore_ordinal: ordinal,
                chore: chore.clone(),
                roomie: roomies[idx].clone(),
            }
        })
        .collect()
}

/// Compose the properties and icon for one due record.
///
/// Title is `🧹 {roomie}'s chore for {due date}`; the icon is the chore's
/// emoji when it has one.
pub fn due_record(
    assignment: &Assignment,
    due_date: NaiveDate,
) -> (serde_json::Value, Option<serde_json::Value>) {
    let due = due_date.format(DATE_FORMAT).to_string();
    let title = format!("🧹 {}'s chore for {due}", assignment.roomie.name);

    let properties = json!({
        (columns::NAME): {"title": [{"text": {"content": title}}]},
        (columns::DUE_DATE): {"date": {"start": due}},
        (columns::RESPONSIBLE): {"relation": [{"id": assignment.roomie.id}]},
        (columns::CHORE): {"relation": [{"id": assignment.chore.id}]},
    });

    let icon = assignment
        .chore
        .emoji
        .as_ref()
        .map(|emoji| json!({"type": "emoji", "emoji": emoji}));

    (properties, icon)
}

/// Run one cycle of the automation: fetch, plan, create, report.
///
/// Prints per-record status lines and the final tally. Fetch errors for
/// either source collection are fatal; per-record creation errors are
/// collected and reported.
///
/// # Errors
///
/// Returns the underlying [`ChoreError`] if fetching the chores or the
/// roomies fails. Per-record failures do not produce an `Err`.
pub async fn run(client: &NotionClient, config: &Config, today: NaiveDate) -> Result<RunReport> {
    let mut chore_records = client.query_database(&config.chores_database_id).await?;
    let mut roomie_records = client.query_database(&config.roomies_database_id).await?;

    // Notion's fetch order is undocumented; normalize before ordinals.
    sort_by_stable_key(&mut chore_records);
    sort_by_stable_key(&mut roomie_records);

    let chores: Vec<Chore> = chore_records
        .iter()
        .filter_map(|record| {
            let chore = Chore::from_record(record);
            if chore.is_none() {
                tracing::warn!(page_id = %record.id, "skipping chore page without a title");
            }
            chore
        })
        .collect();
    let roomies: Vec<Roomie> = roomie_records
        .iter()
        .filter_map(|record| {
            let roomie = Roomie::from_record(record);
            if roomie.is_none() {
                tracing::warn!(page_id = %record.id, "skipping roomie page without a title");
            }
            roomie
        })
        .collect();

    let mut report = RunReport {
        chores_found: chores.len(),
        roomies_found: roomies.len(),
        outcomes: Vec::new(),
    };

    if chores.is_empty() {
        println!("No chores found in the database.");
        return Ok(report);
    }
    if roomies.is_empty() {
        println!("No roomies found in the database.");
        return Ok(report);
    }

    println!(
        "Found {} chore(s) and {} roomie(s)",
        chores.len(),
        roomies.len()
    );

    let weeks = rotation::weeks_elapsed(rotation_epoch(), today);
    let due_date = today + chrono::Duration::days(7);
    tracing::debug!(weeks_elapsed = weeks, due = %due_date, "planning cycle");

    for assignment in plan_cycle(&chores, &roomies, weeks) {
        let outcome = create_task(client, config, &assignment, due_date).await;
        match &outcome {
            CreateOutcome::Created { chore, roomie } => {
                println!(
                    "✓ Created task in {chore} for {roomie} (due {})",
                    due_date.format(DATE_FORMAT)
                );
            }
            CreateOutcome::Failed { chore, error } => {
                tracing::error!(chore = %chore, error = %error, "task creation failed");
                println!("✗ Error creating task for {chore}: {error}");
            }
        }
        report.outcomes.push(outcome);
    }

    println!();
    println!(
        "Completed: {}/{} tasks created successfully",
        report.created(),
        report.attempted()
    );

    Ok(report)
}

/// Create one due record, copying the chore's content blocks.
///
/// Any failure — fetching the blocks or creating the page — becomes a
/// [`CreateOutcome::Failed`] for this chore only.
async fn create_task(
    client: &NotionClient,
    config: &Config,
    assignment: &Assignment,
    due_date: NaiveDate,
) -> CreateOutcome {
    let chore_name = assignment.chore.name.clone();

    let blocks = match client.list_block_children(&assignment.chore.id).await {
        Ok(blocks) => blocks,
        Err(error) => {
            return CreateOutcome::Failed {
                chore: chore_name,
                error,
            }
        }
    };
    let children: Vec<serde_json::Value> =
        blocks.iter().map(|block| block.to_create_request()).collect();

    let (properties, icon) = due_record(assignment, due_date);
    match client
        .create_page(&config.todos_database_id, properties, icon, children)
        .await
    {
        Ok(_) => CreateOutcome::Created {
            chore: chore_name,
            roomie: assignment.roomie.name.clone(),
        },
        Err(error) => CreateOutcome::Failed {
            chore: chore_name,
            error,
        },
    }
}
