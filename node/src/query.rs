// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::errors::QueryError;
use por_kernel::codec::parse_record;
use por_kernel::{SnapshotStore, UserProof};

/// Characters of a bad record kept in the error log.
const EXCERPT_CHARS: usize = 96;

/// Resolve one query: id string -> store lookup -> parsed proof.
///
/// Holds no state between calls; any number may run at once against the
/// same store.
pub fn handle_query(store: &dyn SnapshotStore, id_param: &str) -> Result<UserProof, QueryError> {
    let id: u64 = id_param
        .parse()
        .ok()
        .filter(|_| !id_param.starts_with('+'))
        .ok_or_else(|| QueryError::InvalidId(id_param.to_string()))?;

    let raw = store.lookup(id).ok_or(QueryError::UserNotFound(id))?;

    parse_record(&raw).map_err(|source| {
        tracing::error!(
            id,
            error = %source,
            record = excerpt(&raw),
            "store returned a record the codec cannot parse"
        );
        QueryError::Codec { id, source }
    })
}

fn excerpt(raw: &str) -> &str {
    match raw.char_indices().nth(EXCERPT_CHARS) {
        Some((end, _)) => &raw[..end],
        None => raw,
    }
}
