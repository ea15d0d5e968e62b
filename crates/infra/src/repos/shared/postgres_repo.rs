use cuthub_domain::ID;
use sqlx::types::Uuid;

pub fn to_uuids(ids: &[ID]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.inner_ref()).collect()
}
