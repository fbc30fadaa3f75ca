//! Startup seeding of an empty data directory with the demo catalogue.
//!
//! Enabled by the `seed-data` cargo feature. Seeding is idempotent: a
//! collection that already holds records is never touched, so restarting a
//! seeded deployment changes nothing.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Course, Credential, Error, Role, User};
use crate::outbound::store::{Collection, FlatFileStore, WriteCoordinator};

/// Seed empty course and user collections from the demo fixtures.
///
/// # Errors
/// Propagates store failures and rejects fixture records that do not
/// convert into domain types (unknown role slugs).
pub async fn seed_if_empty(
    store: Arc<FlatFileStore>,
    coordinator: Arc<WriteCoordinator>,
) -> Result<(), Error> {
    let courses: Collection<Course> = Collection::new(Arc::clone(&store), Arc::clone(&coordinator));
    let seeded = courses
        .mutate::<_, Error, _>(|records| {
            if !records.is_empty() {
                return Ok((records, false));
            }
            let demo: Vec<Course> = seed_data::demo_catalogue()
                .into_iter()
                .map(convert_course)
                .collect();
            Ok((demo, true))
        })
        .await?;
    if seeded {
        info!(collection = "courses", "seeded demo catalogue");
    }

    let demo_users = seed_data::demo_users()
        .into_iter()
        .map(convert_user)
        .collect::<Result<Vec<User>, Error>>()?;
    let users: Collection<User> = Collection::new(store, coordinator);
    let seeded = users
        .mutate::<_, Error, _>(move |records| {
            if !records.is_empty() {
                return Ok((records, false));
            }
            Ok((demo_users, true))
        })
        .await?;
    if seeded {
        info!(collection = "users", "seeded demo accounts");
    }

    Ok(())
}

fn convert_course(seed: seed_data::SeedCourse) -> Course {
    Course {
        id: seed.id,
        title: seed.title,
        category: seed.category,
        price: seed.price,
        popularity: seed.popularity,
        tags: seed.tags,
        description: seed.description,
    }
}

fn convert_user(seed: seed_data::SeedUser) -> Result<User, Error> {
    let role = Role::from_str(&seed.role)
        .map_err(|err| Error::internal(format!("invalid seed fixture: {err}")))?;
    // Fresh salt per seeding run; the plaintext never reaches the store.
    let salt = Uuid::new_v4().simple().to_string();
    Ok(User {
        id: seed.id,
        name: seed.name,
        email: seed.email,
        credential: Credential::derive(&seed.password, &salt),
        role,
        avatar: None,
    })
}
