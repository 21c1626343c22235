use fnv::FnvHashMap;

use crate::config::Config;
use crate::customer::{Customer, RecordError};

/// Customers strictly closer than `config.distance_limit_km` to the office.
///
/// At most one record per `user_id` survives: a later record with the same id
/// replaces an earlier one. Output order is unspecified.
pub fn customers_within_distance(
    customers: Vec<Customer>,
    config: &Config,
) -> Result<Vec<Customer>, RecordError> {
    let total = customers.len();
    let mut nearby: FnvHashMap<i64, Customer> = FnvHashMap::default();

    for customer in customers {
        let location = customer.location()?;
        let user_id = customer.user_id()?;
        let distance = config.distance_from_office(location);

        if distance < config.distance_limit_km {
            if nearby.insert(user_id, customer).is_some() {
                tracing::debug!(user_id, "duplicate user id, keeping the later record");
            }
        } else {
            tracing::debug!(user_id, distance, "too far");
        }
    }

    tracing::info!(
        total,
        nearby = nearby.len(),
        limit_km = config.distance_limit_km,
        "filtered customers by distance"
    );
    Ok(nearby.into_values().collect())
}

/// Stable ascending sort by `user_id`.
pub fn sort_customers_by_id(customers: Vec<Customer>) -> Result<Vec<Customer>, RecordError> {
    let mut keyed = customers
        .into_iter()
        .map(|c| Ok((c.user_id()?, c)))
        .collect::<Result<Vec<(i64, Customer)>, RecordError>>()?;
    keyed.sort_by_key(|(user_id, _)| *user_id);
    Ok(keyed.into_iter().map(|(_, c)| c).collect())
}
