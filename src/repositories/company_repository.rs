use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::company::Company;
use crate::repositories::CompanyStore;
use crate::utils::errors::AppResult;

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyStore for CompanyRepository {
    async fn insert(&self, company: &Company) -> AppResult<Company> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO empresas (
                id, person_type, legal_name, cnpj, full_name, cpf, foreign_identifier,
                trade_name, profile, direct_billing, status,
                supporting_document_digest, optional_document_digest,
                rejection_reason, responsible_user, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(company.person_type)
        .bind(&company.legal_name)
        .bind(&company.cnpj)
        .bind(&company.full_name)
        .bind(&company.cpf)
        .bind(&company.foreign_identifier)
        .bind(&company.trade_name)
        .bind(company.profile)
        .bind(company.direct_billing)
        .bind(company.status)
        .bind(&company.supporting_document_digest)
        .bind(&company.optional_document_digest)
        .bind(&company.rejection_reason)
        .bind(&company.responsible_user)
        .bind(company.created_at)
        .bind(company.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM empresas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    async fn list_newest_first(&self) -> AppResult<Vec<Company>> {
        let result = sqlx::query_as::<_, Company>(
            "SELECT * FROM empresas ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    async fn save(&self, company: &Company) -> AppResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            UPDATE empresas
            SET person_type = $2, legal_name = $3, cnpj = $4, full_name = $5, cpf = $6,
                foreign_identifier = $7, trade_name = $8, profile = $9, direct_billing = $10,
                status = $11, supporting_document_digest = $12, optional_document_digest = $13,
                rejection_reason = $14, responsible_user = $15, updated_at = $16
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(company.person_type)
        .bind(&company.legal_name)
        .bind(&company.cnpj)
        .bind(&company.full_name)
        .bind(&company.cpf)
        .bind(&company.foreign_identifier)
        .bind(&company.trade_name)
        .bind(company.profile)
        .bind(company.direct_billing)
        .bind(company.status)
        .bind(&company.supporting_document_digest)
        .bind(&company.optional_document_digest)
        .bind(&company.rejection_reason)
        .bind(&company.responsible_user)
        .bind(company.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }
}
