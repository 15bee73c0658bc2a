//! SMS template repository.

use sqlx::PgPool;

use curbside_core::scheduling::SmsTemplate;
use curbside_core::{TemplateId, TemplateKind};

use super::RepositoryError;

/// Internal row type for SMS template queries.
#[derive(Debug, sqlx::FromRow)]
struct TemplateRow {
    id: i32,
    template_type: String,
    template_text: String,
}

impl TryFrom<TemplateRow> for SmsTemplate {
    type Error = RepositoryError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        let template_type = row.template_type.parse::<TemplateKind>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid template type in database: {e}"))
        })?;

        Ok(Self {
            id: TemplateId::new(row.id),
            template_type,
            template_text: row.template_text,
        })
    }
}

/// Repository for SMS notification templates.
pub struct TemplateRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TemplateRepository<'a> {
    /// Create a new template repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all templates, ordered by type.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<SmsTemplate>, RepositoryError> {
        let rows = sqlx::query_as::<_, TemplateRow>(
            "SELECT id, template_type, template_text FROM sms_template ORDER BY template_type",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create or replace the template for a kind (one row per kind).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert(
        &self,
        kind: TemplateKind,
        text: &str,
    ) -> Result<SmsTemplate, RepositoryError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r"
            INSERT INTO sms_template (template_type, template_text)
            VALUES ($1, $2)
            ON CONFLICT (template_type)
            DO UPDATE SET template_text = EXCLUDED.template_text, updated_at = NOW()
            RETURNING id, template_type, template_text
            ",
        )
        .bind(kind.as_str())
        .bind(text)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
