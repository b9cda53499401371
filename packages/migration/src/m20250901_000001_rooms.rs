use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Rooms {
    Table,
    RoomId,
    State,
    CurrentPlayerIndex,
    WinnerId,
    WinnerColor,
    RngSeed,
    TurnCount,
    CreatedAt,
    UpdatedAt,
    StartedAt,
    EndedAt,
    LockVersion,
}

#[derive(DeriveIden)]
enum RoomPlayers {
    Table,
    RoomId,
    PlayerId,
    Name,
    IsHost,
    CreatedAt,
}

#[derive(DeriveIden)]
enum RoomCards {
    Table,
    RoomId,
    CardId,
    HolderId,
    Color,
    HandSeq,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // rooms
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::RoomId)
                            .string_len(6)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::State).string_len(16).not_null())
                    .col(ColumnDef::new(Rooms::CurrentPlayerIndex).small_integer().null())
                    .col(ColumnDef::new(Rooms::WinnerId).small_integer().null())
                    .col(ColumnDef::new(Rooms::WinnerColor).string_len(16).null())
                    .col(ColumnDef::new(Rooms::RngSeed).big_integer().null())
                    .col(
                        ColumnDef::new(Rooms::TurnCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rooms::StartedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Rooms::EndedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Rooms::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        // room_players
        manager
            .create_table(
                Table::create()
                    .table(RoomPlayers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RoomPlayers::RoomId).string_len(6).not_null())
                    .col(ColumnDef::new(RoomPlayers::PlayerId).small_integer().not_null())
                    .col(ColumnDef::new(RoomPlayers::Name).string_len(64).not_null())
                    .col(ColumnDef::new(RoomPlayers::IsHost).boolean().not_null())
                    .col(
                        ColumnDef::new(RoomPlayers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RoomPlayers::RoomId)
                            .col(RoomPlayers::PlayerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_players_room")
                            .from(RoomPlayers::Table, RoomPlayers::RoomId)
                            .to(Rooms::Table, Rooms::RoomId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // room_cards
        manager
            .create_table(
                Table::create()
                    .table(RoomCards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RoomCards::RoomId).string_len(6).not_null())
                    .col(ColumnDef::new(RoomCards::CardId).string_len(36).not_null())
                    .col(ColumnDef::new(RoomCards::HolderId).small_integer().not_null())
                    .col(ColumnDef::new(RoomCards::Color).string_len(16).not_null())
                    .col(ColumnDef::new(RoomCards::HandSeq).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(RoomCards::RoomId)
                            .col(RoomCards::CardId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_cards_room")
                            .from(RoomCards::Table, RoomCards::RoomId)
                            .to(Rooms::Table, Rooms::RoomId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_cards_holder")
                    .table(RoomCards::Table)
                    .col(RoomCards::RoomId)
                    .col(RoomCards::HolderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomCards::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoomPlayers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
