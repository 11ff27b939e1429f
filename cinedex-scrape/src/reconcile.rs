//! Person de-duplication for a title's credits.
//!
//! Credited persons are keyed by catalog id. Depending on the refresh policy,
//! persons already in the store are either skipped for this title or fetched
//! again and re-linked. A person who fails to fetch or store is logged and
//! skipped; it never fails the title.

use cinedex_catalog::{CatalogId, CreditRole, Credits, TitleRef};
use cinedex_db::{Chunked, Connection, chunk_person, person_exists};
use cinedex_tmdb::{Catalog, ImageKind};

use crate::images::mirror_image;
use crate::settings::PersonRefresh;

/// Per-title outcome of the person pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonStats {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PersonStats {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.failed
    }
}

/// Group credit entries by person, keeping first-appearance order and every
/// role the person holds on this title.
fn credited_persons(credits: &Credits) -> Vec<(CatalogId, Vec<CreditRole>)> {
    let mut persons: Vec<(CatalogId, Vec<CreditRole>)> = Vec::new();
    for (entry, role) in credits.entries() {
        match persons.iter_mut().find(|(id, _)| *id == entry.id) {
            Some((_, roles)) => {
                if !roles.contains(&role) {
                    roles.push(role);
                }
            }
            None => persons.push((entry.id, vec![role])),
        }
    }
    persons
}

/// Fetch, link and store the persons credited on `title`.
///
/// `credits` must already be truncated; every entry left in it may cost one
/// catalog request.
pub fn reconcile_persons<C: Catalog + ?Sized>(
    conn: &Connection,
    catalog: &C,
    credits: &Credits,
    title: TitleRef,
    refresh: PersonRefresh,
    download_images: bool,
) -> PersonStats {
    let mut stats = PersonStats::default();

    for (person_id, roles) in credited_persons(credits) {
        let known = match person_exists(conn, person_id) {
            Ok(known) => known,
            Err(e) => {
                log::warn!("Could not look up person {}: {}", person_id, e);
                stats.failed += 1;
                continue;
            }
        };

        if known && refresh == PersonRefresh::NewOnly {
            log::trace!("Person {} already stored, skipping", person_id);
            stats.skipped += 1;
            continue;
        }

        let mut person = match catalog.person(person_id) {
            Ok(person) => person,
            Err(e) => {
                log::warn!("Could not fetch person {}: {}", person_id, e);
                stats.failed += 1;
                continue;
            }
        };
        for role in roles {
            person.link(title, role);
        }

        match chunk_person(conn, &person) {
            Ok(Chunked::Created) => stats.created += 1,
            Ok(Chunked::Updated) => stats.updated += 1,
            Err(e) => {
                log::warn!("Could not store person {} ({}): {}", person_id, person.name, e);
                stats.failed += 1;
                continue;
            }
        }

        if download_images {
            mirror_image(catalog, ImageKind::Profile, person.profile_path.as_deref());
        }
    }

    stats
}
