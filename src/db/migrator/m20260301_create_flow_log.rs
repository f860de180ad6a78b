use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FlowLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FlowLog::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FlowLog::ActorId)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FlowLog::SubjectId)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FlowLog::Category)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(FlowLog::Message).text().not_null())
                    .col(ColumnDef::new(FlowLog::Variables).text().not_null())
                    .col(
                        ColumnDef::new(FlowLog::Severity)
                            .small_integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(FlowLog::Link)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(FlowLog::Location).text().not_null())
                    .col(
                        ColumnDef::new(FlowLog::Referer)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(FlowLog::CreatedAt)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flow_log_subject_id")
                    .table(FlowLog::Table)
                    .col(FlowLog::SubjectId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flow_log_created_at")
                    .table(FlowLog::Table)
                    .col(FlowLog::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FlowLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FlowLog {
    Table,
    Id,
    ActorId,
    SubjectId,
    Category,
    Message,
    Variables,
    Severity,
    Link,
    Location,
    Referer,
    CreatedAt,
}
