//! Renders the keyspace fragment spliced into the data-store configuration.

use crate::schema::{ColumnFamily, Keyspace};

/// Replication settings emitted for every keyspace.
pub const KEYSPACE_BOILERPLATE: &str = "
<ReplicaPlacementStrategy>org.apache.cassandra.locator.RackUnawareStrategy</ReplicaPlacementStrategy>
<ReplicationFactor>1</ReplicationFactor>
<EndPointSnitch>org.apache.cassandra.locator.EndPointSnitch</EndPointSnitch>
";

/// Renders the `<Keyspace>` block for `keyspace`.
///
/// Column family lines follow the keyspace's own iteration order and are
/// joined by newlines; the replication boilerplate and closing tag follow.
#[must_use]
pub fn render_keyspace(keyspace: &dyn Keyspace) -> String {
    let mut fragment = format!("<Keyspace Name=\"{}\">\n", escape_attribute(keyspace.name()));
    let lines: Vec<String> = keyspace
        .column_families()
        .into_iter()
        .map(render_column_family)
        .collect();
    fragment.push_str(&lines.join("\n"));
    fragment.push_str(KEYSPACE_BOILERPLATE);
    fragment.push_str("</Keyspace>");
    fragment
}

/// Renders the descriptor line for one column family.
#[must_use]
pub fn render_column_family(family: &dyn ColumnFamily) -> String {
    format!(
        "<ColumnFamily Name=\"{}\" CompareWith=\"{}\"/>",
        escape_attribute(family.name()),
        escape_attribute(family.compare_with())
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
