// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    timeline::{TimelineItemEntity, TimelineItemUid},
    util::clock::DateTime,
};
use melodyhub_repo::{
    timeline::{RecordHeader, RecordId, TrackRepo},
    track::RecordId as TrackId,
};

use crate::{
    db::timeline_item::{models::*, schema::*},
    prelude::*,
};

fn resolve_timeline_item_id(
    connection: &mut DbConnection,
    uid: &TimelineItemUid,
) -> RepoResult<RecordId> {
    timeline_item::table
        .select(timeline_item::row_id)
        .filter(timeline_item::entity_uid.eq(uid.as_bytes().as_slice()))
        .first::<RowId>(connection)
        .map_err(repo_error)
        .map(Into::into)
}

impl TrackRepo for Connection<'_> {
    fn append_timeline_item(
        &mut self,
        track_id: TrackId,
        created_at: DateTime,
        created_entity: &TimelineItemEntity,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::try_bind(track_id, created_at, created_entity)?;
        let query = diesel::insert_into(timeline_item::table).values(&insertable);
        let rows_affected = query.execute(self.as_mut()).map_err(repo_error)?;
        debug_assert_eq!(1, rows_affected);
        resolve_timeline_item_id(self.as_mut(), &created_entity.uid)
    }

    fn load_timeline_items(
        &mut self,
        track_id: TrackId,
    ) -> RepoResult<Vec<(RecordHeader, TimelineItemEntity)>> {
        timeline_item::table
            .filter(timeline_item::track_id.eq(RowId::from(track_id)))
            .order_by(timeline_item::row_id)
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?
            .into_iter()
            .map(|record| {
                let (header, _track_id, entity): (RecordHeader, TrackId, TimelineItemEntity) =
                    record.try_into()?;
                Ok((header, entity))
            })
            .collect()
    }

    fn count_timeline_items(&mut self, track_id: TrackId) -> RepoResult<usize> {
        timeline_item::table
            .filter(timeline_item::track_id.eq(RowId::from(track_id)))
            .count()
            .get_result::<i64>(self.as_mut())
            .map_err(repo_error)
            .map(|count| {
                debug_assert!(count >= 0);
                count.unsigned_abs() as usize
            })
    }
}

#[cfg(test)]
mod tests;
