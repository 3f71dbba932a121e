// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use autoapi::{Entity, MetadataCache, Ref};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Debug, Default, Entity)]
#[entity(shared_base)]
pub struct Audit {
    #[read_only]
    pub created_at: Option<DateTime<Utc>>,
    #[version]
    pub version: i64
}

/// Signed agreement.
#[derive(Debug, Default, Entity)]
#[auto_api(
    path = "/contracts",
    expose = "create_update",
    pagination = false,
    sorting = false,
    description = "Contracts",
    tags("legal", "sales")
)]
#[entity(name = "Agreement", table = "contracts")]
#[soft_delete(deleted_field = "removed", deleted_at_field = "removed_at")]
#[auditable(versioned, created_by_field = "author")]
pub struct Contract {
    #[embedded_id]
    #[generated(uuid)]
    pub key: Uuid,

    #[column(nullable = false)]
    #[validate(not_empty, pattern = "^[A-Z]{3}-[0-9]+$")]
    #[filter(eq, in_list, not_in, param = "code")]
    pub number: String,

    #[validate(range(min = 0, max = 1000000.5))]
    #[filter(gt, gte, lt, lte)]
    pub amount: f64,

    #[validate(past_or_present)]
    #[filter(between)]
    pub signed_on: Option<NaiveDate>,

    #[json_ignore]
    #[validate(assert_true)]
    pub accepted: bool,

    #[one_to_one(mapped_by = "contract")]
    pub counterpart: Ref<Contract>,

    #[many_to_many]
    pub related: Vec<Ref<Contract>>,

    #[transient]
    pub scratch: std::collections::HashMap<String, String>,

    #[base]
    pub audit: Audit
}

fn main() {
    let cache = MetadataCache::new();
    let contract = cache.get_or_resolve::<Contract>().unwrap();
    assert_eq!(contract.type_name(), "Agreement");
    assert_eq!(contract.storage_name(), "contracts");
    assert_eq!(contract.id_field().unwrap().name(), "key");
    assert_eq!(contract.fields().len(), 9);
    assert!(contract.is_auditable());
    assert_eq!(contract.soft_delete().unwrap().deleted_field, "removed");
    assert_eq!(
        contract.field("number").unwrap().filter().unwrap().param_name.as_deref(),
        Some("code")
    );
}
