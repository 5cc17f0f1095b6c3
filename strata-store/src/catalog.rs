use crate::Table;
use parking_lot::RwLock;
use rapidhash::RapidHashMap;
use std::io::Write;
use std::sync::{Arc, OnceLock};
use strata_base::{fatal, require, Result};

/// Process-wide registry of named tables. A singleton with an explicit
/// `reset` so tests can isolate themselves; callers serialize mutations.
pub struct Catalog {
    tables: RwLock<RapidHashMap<String, Arc<Table>>>,
}

impl Catalog {
    pub fn get() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| Catalog {
            tables: RwLock::new(RapidHashMap::default()),
        })
    }

    pub fn add_table(&self, name: &str, table: Arc<Table>) {
        let mut tables = self.tables.write();
        require!(
            !tables.contains_key(name),
            "tried to add a table under the existing name {name:?}"
        );
        tables.insert(name.to_owned(), table);
    }

    pub fn get_table(&self, name: &str) -> Arc<Table> {
        self.tables
            .read()
            .get(name)
            .cloned()
            .unwrap_or_else(|| fatal!("no table named {name:?}"))
    }

    pub fn drop_table(&self, name: &str) {
        require!(
            self.tables.write().remove(name).is_some(),
            "tried to drop the non-existent table {name:?}"
        );
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// All table names, lexicographically sorted.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// One summary line per table, in the map's internal iteration order
    /// (deterministic for a fixed key set under the fixed-seed hasher).
    pub fn print(&self, out: &mut impl Write) -> Result<()> {
        for (name, table) in self.tables.read().iter() {
            writeln!(
                out,
                "(\"{name}\", {} columns, {} rows, {} chunks)",
                table.column_count(),
                table.row_count(),
                table.chunk_count()
            )?;
        }
        Ok(())
    }

    /// Drop every binding.
    pub fn reset(&self) {
        self.tables.write().clear();
    }
}
