mod common;
pub use self::common::{FilterOperator, Query, QueryCommon};

mod legislation;
pub use self::legislation::LegislationQuery;
