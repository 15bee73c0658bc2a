//! Database seeding command.
//!
//! Upserts the default SMS templates and creates three demo crews with
//! their ZIP routing rules. Safe to run repeatedly: existing templates are
//! refreshed, existing crews are left alone.

use sqlx::PgPool;

use super::{CliError, crew::hash_password, database_url};

/// Demo crew password (printed after seeding).
const DEMO_PASSWORD: &str = "crew12345";

const DEFAULT_TEMPLATES: [(&str, &str); 2] = [
    (
        "Scheduled",
        "We will be there on [scheduled_date] between [timeslot] to pick up your appliance.",
    ),
    (
        "Completed",
        "Your pickup at [address] has been completed. Thank you!",
    ),
];

const DEMO_CREWS: [(&str, &str, [&str; 3]); 3] = [
    ("crew1@example.com", "North Crew", ["100", "101", "102"]),
    ("crew2@example.com", "South Crew", ["200", "201", "202"]),
    ("crew3@example.com", "East Crew", ["300", "301", "302"]),
];

/// Seed default templates, demo crews, and ZIP routes.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a statement fails.
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url()?;
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Seeding default SMS templates...");
    for (kind, text) in DEFAULT_TEMPLATES {
        sqlx::query(
            r"
            INSERT INTO sms_template (template_type, template_text)
            VALUES ($1, $2)
            ON CONFLICT (template_type)
            DO UPDATE SET template_text = EXCLUDED.template_text, updated_at = NOW()
            ",
        )
        .bind(kind)
        .bind(text)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeding demo crews...");
    let password_hash = hash_password(DEMO_PASSWORD)?;

    for (email, display_name, prefixes) in DEMO_CREWS {
        let crew_id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO crew (email, password_hash, display_name, zip_prefixes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id
            ",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(display_name)
        .bind(prefixes.map(str::to_owned).to_vec())
        .fetch_optional(&pool)
        .await?;

        let Some(crew_id) = crew_id else {
            tracing::info!(email, "Crew already exists, skipping");
            continue;
        };

        for prefix in prefixes {
            sqlx::query(
                r"
                INSERT INTO zip_assignment (zip_prefix, crew_id)
                VALUES ($1, $2)
                ON CONFLICT (zip_prefix) DO NOTHING
                ",
            )
            .bind(prefix)
            .bind(crew_id)
            .execute(&pool)
            .await?;
        }

        tracing::info!(email, crew_id, "Crew created");
    }

    tracing::info!("Seeding complete. Demo crew password: {DEMO_PASSWORD}");
    Ok(())
}
