//! Collaborator bootstrap.
//!
//! Every build call makes sure the query builder carries the deep-filter
//! plugin and an operator-prefix configuration, then snapshots the prefix
//! tokens. The snapshot is taken once per process: it is consulted on
//! every recursive emit call, and the configuration is not expected to
//! change after the first build.

use std::sync::OnceLock;

use odata_orm::{OperatorPrefixes, QueryBuilder};
use tracing::debug;

use crate::ops::PrefixTables;

static PREFIX_TABLES: OnceLock<PrefixTables> = OnceLock::new();

/// Registers missing plugins on the builder and returns it together with
/// the process-wide prefix-token snapshot.
pub(crate) fn bootstrap(builder: QueryBuilder) -> (QueryBuilder, &'static PrefixTables) {
    let builder = if builder.has_deep_filter() {
        builder
    } else {
        debug!(target: "odata_filter::bootstrap", "registering deep-filter plugin");
        builder.register_deep_filter()
    };

    let (builder, config) = match builder.operator_prefixes().cloned() {
        Some(config) => (builder, config),
        None => {
            debug!(
                target: "odata_filter::bootstrap",
                "registering default operator prefixes"
            );
            let config = OperatorPrefixes::default();
            (
                builder.register_operator_prefixes(config.clone()),
                config,
            )
        }
    };

    let tables = PREFIX_TABLES.get_or_init(|| PrefixTables::from_config(&config));
    (builder, tables)
}
