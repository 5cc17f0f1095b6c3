use crate::{Operator, OperatorBase};
use std::sync::Arc;
use strata_store::{Catalog, Table};

/// Leaf operator resolving a table name against the catalog.
pub struct GetTable {
    base: OperatorBase,
    name: String,
}

impl GetTable {
    pub fn new(name: impl Into<String>) -> GetTable {
        GetTable {
            base: OperatorBase::new(None, None),
            name: name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.name
    }
}

impl Operator for GetTable {
    fn base(&self) -> &OperatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OperatorBase {
        &mut self.base
    }

    fn on_execute(&mut self) -> Arc<Table> {
        Catalog::get().get_table(&self.name)
    }
}
